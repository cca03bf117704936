use crate::truth_tree::{BranchId, Claim, Individual, Signed};
use std::collections::HashMap;
use std::fmt;

/// Final status of a leaf branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchStatus {
	Closed,
	/// Fully expanded without closing.
	Open,
	/// Still had pending rules when the run stopped, either because the
	/// bound ran out or because another branch was found open first.
	Unfinished,
}

impl fmt::Display for BranchStatus {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			BranchStatus::Closed => write!(f, "closed"),
			BranchStatus::Open => write!(f, "open"),
			BranchStatus::Unfinished => write!(f, "unfinished"),
		}
	}
}

/// One recorded step of a tableau run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceEvent {
	Seeded {
		branch: BranchId,
		claim: Signed,
	},
	/// A non-splitting rule consumed `consumed` and added `produced` to the
	/// same branch. `individual` is the individual the rule was applied to,
	/// or the fresh one it introduced.
	Expanded {
		round: usize,
		branch: BranchId,
		consumed: Signed,
		individual: Option<Individual>,
		produced: Vec<Signed>,
	},
	Split {
		round: usize,
		branch: BranchId,
		consumed: Signed,
		individual: Option<Individual>,
		children: Vec<(BranchId, Vec<Signed>)>,
	},
	Closed {
		branch: BranchId,
		on: Claim,
	},
	Saturated {
		branch: BranchId,
	},
	Exhausted {
		open: usize,
	},
	Status {
		branch: BranchId,
		status: BranchStatus,
	},
}

/// Buffer a single run records into. Owned by the caller, so runs never
/// share or interleave their traces.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trace {
	events: Vec<TraceEvent>,
}

impl Trace {
	pub fn new() -> Trace {
		Trace { events: Vec::new() }
	}

	pub fn push(&mut self, event: TraceEvent) {
		self.events.push(event);
	}

	pub fn events(&self) -> &[TraceEvent] {
		&self.events
	}

	pub fn is_empty(&self) -> bool {
		self.events.is_empty()
	}

	/// Final status of every leaf, in branch order.
	pub fn statuses(&self) -> impl Iterator<Item = (BranchId, BranchStatus)> + '_ {
		self.events.iter().filter_map(|event| match event {
			TraceEvent::Status { branch, status } => Some((*branch, *status)),
			_ => None,
		})
	}
}

fn join(signed: &[Signed]) -> String {
	signed
		.iter()
		.map(|s| s.to_string())
		.collect::<Vec<_>>()
		.join(", ")
}

fn at(individual: &Option<Individual>) -> String {
	match individual {
		Some(c) => format!(" @c{}", c),
		None => String::new(),
	}
}

impl fmt::Display for Trace {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let mut depth: HashMap<BranchId, usize> = HashMap::new();
		let indent = |depth: &HashMap<BranchId, usize>, branch: &BranchId| {
			"│".repeat(depth.get(branch).copied().unwrap_or(0))
		};
		for event in &self.events {
			match event {
				TraceEvent::Seeded { branch, claim } => {
					writeln!(f, "{}[b{}] seed {}", indent(&depth, branch), branch, claim)?
				}
				TraceEvent::Expanded {
					round,
					branch,
					consumed,
					individual,
					produced,
				} => writeln!(
					f,
					"{}[b{}] #{} {}{} => {}",
					indent(&depth, branch),
					branch,
					round,
					consumed,
					at(individual),
					join(produced)
				)?,
				TraceEvent::Split {
					round,
					branch,
					consumed,
					individual,
					children,
				} => {
					let parent_depth = depth.get(branch).copied().unwrap_or(0);
					let children_text = children
						.iter()
						.map(|(child, signed)| format!("b{}: {}", child, join(signed)))
						.collect::<Vec<_>>()
						.join(" / ");
					writeln!(
						f,
						"{}[b{}] #{} {}{} => {}",
						indent(&depth, branch),
						branch,
						round,
						consumed,
						at(individual),
						children_text
					)?;
					for (child, _) in children {
						depth.insert(*child, parent_depth + 1);
					}
				}
				TraceEvent::Closed { branch, on } => {
					writeln!(f, "{}[b{}] closed on {}", indent(&depth, branch), branch, on)?
				}
				TraceEvent::Saturated { branch } => {
					writeln!(f, "{}[b{}] saturated", indent(&depth, branch), branch)?
				}
				TraceEvent::Exhausted { open } => writeln!(
					f,
					"bound exhausted with {} branch{} open",
					open,
					if *open == 1 { "" } else { "es" }
				)?,
				TraceEvent::Status { branch, status } => {
					writeln!(f, "{}[b{}] {}", indent(&depth, branch), branch, status)?
				}
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::prop_tree::Formula;

	#[test]
	fn test_display_indents_children() {
		let a = Formula::atom("A");
		let b = Formula::atom("B");
		let mut trace = Trace::new();
		trace.push(TraceEvent::Seeded {
			branch: 0,
			claim: Signed::formula(a.clone().or(b.clone()), true),
		});
		trace.push(TraceEvent::Split {
			round: 0,
			branch: 0,
			consumed: Signed::formula(a.clone().or(b.clone()), true),
			individual: None,
			children: vec![
				(1, vec![Signed::formula(a.clone(), true)]),
				(2, vec![Signed::formula(b, true)]),
			],
		});
		trace.push(TraceEvent::Closed {
			branch: 1,
			on: Claim::Formula(a),
		});
		trace.push(TraceEvent::Exhausted { open: 1 });
		trace.push(TraceEvent::Status {
			branch: 1,
			status: BranchStatus::Closed,
		});
		trace.push(TraceEvent::Status {
			branch: 2,
			status: BranchStatus::Unfinished,
		});
		assert_eq!(
			trace.to_string(),
			"[b0] seed T A | B\n\
			 [b0] #0 T A | B => b1: T A / b2: T B\n\
			 │[b1] closed on A\n\
			 bound exhausted with 1 branch open\n\
			 │[b1] closed\n\
			 │[b2] unfinished\n"
		);
		assert_eq!(
			trace.statuses().collect::<Vec<_>>(),
			vec![(1, BranchStatus::Closed), (2, BranchStatus::Unfinished)]
		);
	}

	#[test]
	fn test_saturated_leaf_reads_open() {
		let mut trace = Trace::new();
		assert!(trace.is_empty());
		trace.push(TraceEvent::Saturated { branch: 0 });
		trace.push(TraceEvent::Status {
			branch: 0,
			status: BranchStatus::Open,
		});
		assert_eq!(trace.to_string(), "[b0] saturated\n[b0] open\n");
	}
}
