use crate::prop_tree::{Formula, Term};
use crate::trace::{BranchStatus, Trace, TraceEvent};
use log::trace;
use std::collections::HashSet;
use std::fmt;

pub type BranchId = usize;
pub type Individual = usize;

/// Something a branch can assert or deny.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Claim {
	Formula(Formula),
	/// The individual falls under the term. Stored with complements stripped.
	Predication(Individual, Term),
}

impl fmt::Display for Claim {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Claim::Formula(formula) => write!(f, "{}", formula),
			Claim::Predication(individual, term) => write!(f, "c{}:{}", individual, term),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signed {
	pub claim: Claim,
	pub sign: bool,
}

impl Signed {
	pub fn formula(formula: Formula, sign: bool) -> Signed {
		Signed {
			claim: Claim::Formula(formula),
			sign,
		}
	}

	// `c : ~t` is `c : t` with the sign flipped
	pub fn predication(individual: Individual, term: &Term, sign: bool) -> Signed {
		let (base, flipped) = term.strip_complements();
		Signed {
			claim: Claim::Predication(individual, base.clone()),
			sign: sign ^ flipped,
		}
	}

	pub fn flipped(&self) -> Signed {
		Signed {
			claim: self.claim.clone(),
			sign: !self.sign,
		}
	}
}

impl fmt::Display for Signed {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{} {}", if self.sign { "T" } else { "F" }, self.claim)
	}
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
	/// Every branch closed.
	Closed,
	/// This branch was fully expanded without closing.
	Open { branch: BranchId },
	/// The iteration bound ran out with `open` branches still open.
	Exhausted { open: usize },
}

impl Outcome {
	pub fn is_valid(&self) -> bool {
		matches!(self, Outcome::Closed)
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum BranchState {
	Open,
	Saturated,
	Closed,
	Split,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Obligation {
	Once(Signed),
	Instance(Signed, Individual),
}

impl Obligation {
	fn signed(&self) -> &Signed {
		match self {
			Obligation::Once(signed) | Obligation::Instance(signed, _) => signed,
		}
	}

	fn individual(&self) -> Option<Individual> {
		match self {
			Obligation::Once(_) => None,
			Obligation::Instance(_, individual) => Some(*individual),
		}
	}
}

enum Rule {
	Linear(Vec<Signed>),
	Split(Vec<Signed>, Vec<Signed>),
	// a fresh individual under (or outside) each term
	Witness(Vec<(Term, bool)>),
}

enum Step {
	Expanded,
	Split,
	Closed,
	Saturated,
}

// Only what this branch adds on top of its parent.
struct Branch {
	parent: Option<BranchId>,
	claims: Vec<Signed>,
	index: HashSet<Signed>,
	expanded: HashSet<Obligation>,
	individuals: Vec<Individual>,
	state: BranchState,
}

impl Branch {
	fn new(parent: Option<BranchId>) -> Branch {
		Branch {
			parent,
			claims: Vec::new(),
			index: HashSet::new(),
			expanded: HashSet::new(),
			individuals: Vec::new(),
			state: BranchState::Open,
		}
	}
}

/// One tableau run. Branches live in an arena and refer to their parent by
/// index, so a split copies nothing.
pub struct TruthTree<'t> {
	branches: Vec<Branch>,
	individuals: usize,
	trace: Option<&'t mut Trace>,
}

impl<'t> TruthTree<'t> {
	pub fn new(seed: Vec<Signed>, trace: Option<&'t mut Trace>) -> TruthTree<'t> {
		let mut tree = TruthTree {
			branches: vec![Branch::new(None)],
			individuals: 0,
			trace,
		};
		for signed in seed {
			tree.record(|| TraceEvent::Seeded {
				branch: 0,
				claim: signed.clone(),
			});
			if tree.add(0, signed) {
				break;
			}
		}
		tree
	}

	fn record<F>(&mut self, event: F)
	where
		F: FnOnce() -> TraceEvent,
	{
		if let Some(trace) = self.trace.as_mut() {
			trace.push(event());
		}
	}

	fn push_branch(&mut self, parent: BranchId) -> BranchId {
		let id = self.branches.len();
		self.branches.push(Branch::new(Some(parent)));
		id
	}

	fn fresh_individual(&mut self) -> Individual {
		self.individuals += 1;
		self.individuals
	}

	// the branch itself, then its ancestors up to the root
	fn lineage(&self, id: BranchId) -> impl Iterator<Item = BranchId> + '_ {
		std::iter::successors(Some(id), move |&b| self.branches[b].parent)
	}

	fn holds(&self, id: BranchId, signed: &Signed) -> bool {
		self.lineage(id).any(|b| self.branches[b].index.contains(signed))
	}

	fn is_expanded(&self, id: BranchId, obligation: &Obligation) -> bool {
		self.lineage(id)
			.any(|b| self.branches[b].expanded.contains(obligation))
	}

	// returns true when the branch closes
	fn add(&mut self, id: BranchId, signed: Signed) -> bool {
		if self.holds(id, &signed) {
			return false;
		}
		let closing = self.holds(id, &signed.flipped());
		let branch = &mut self.branches[id];
		branch.index.insert(signed.clone());
		if closing {
			branch.state = BranchState::Closed;
			branch.claims.push(signed.clone());
			self.record(|| TraceEvent::Closed {
				branch: id,
				on: signed.claim,
			});
			return true;
		}
		branch.claims.push(signed);
		false
	}

	fn obligations(signed: &Signed, individuals: &[Individual]) -> Vec<Obligation> {
		let instances = || -> Vec<Obligation> {
			individuals
				.iter()
				.map(|&c| Obligation::Instance(signed.clone(), c))
				.collect()
		};
		match (&signed.claim, signed.sign) {
			(Claim::Formula(formula), sign) => match formula {
				Formula::Atom(_) => Vec::new(),
				Formula::Universal(_, _) if sign => instances(),
				Formula::Particular(_, _) | Formula::Existential(_) if !sign => instances(),
				Formula::Universal(_, _)
				| Formula::Particular(_, _)
				| Formula::Existential(_)
				| Formula::Negation(_)
				| Formula::Conjunction(_, _)
				| Formula::Disjunction(_, _)
				| Formula::Conditional(_, _)
				| Formula::Biconditional(_, _) => vec![Obligation::Once(signed.clone())],
			},
			(Claim::Predication(_, Term::Privation(_)), true) => {
				vec![Obligation::Once(signed.clone())]
			}
			(Claim::Predication(_, _), _) => Vec::new(),
		}
	}

	fn formula_rule(formula: &Formula, sign: bool) -> Option<Rule> {
		fn t(formula: &Formula) -> Signed {
			Signed::formula(formula.clone(), true)
		}
		fn f(formula: &Formula) -> Signed {
			Signed::formula(formula.clone(), false)
		}
		let rule = match formula {
			Formula::Atom(_) => return None,
			Formula::Negation(a) => Rule::Linear(vec![Signed::formula((**a).clone(), !sign)]),
			Formula::Conjunction(a, b) => {
				if sign {
					Rule::Linear(vec![t(a), t(b)])
				} else {
					Rule::Split(vec![f(a)], vec![f(b)])
				}
			}
			Formula::Disjunction(a, b) => {
				if sign {
					Rule::Split(vec![t(a)], vec![t(b)])
				} else {
					Rule::Linear(vec![f(a), f(b)])
				}
			}
			Formula::Conditional(a, b) => {
				if sign {
					Rule::Split(vec![f(a)], vec![t(b)])
				} else {
					Rule::Linear(vec![t(a), f(b)])
				}
			}
			Formula::Biconditional(a, b) => {
				if sign {
					Rule::Split(vec![t(a), t(b)], vec![f(a), f(b)])
				} else {
					Rule::Split(vec![t(a), f(b)], vec![f(a), t(b)])
				}
			}
			Formula::Universal(s, p) => {
				if sign {
					return None;
				}
				Rule::Witness(vec![(s.clone(), true), (p.clone(), false)])
			}
			Formula::Particular(s, p) => {
				if !sign {
					return None;
				}
				Rule::Witness(vec![(s.clone(), true), (p.clone(), true)])
			}
			Formula::Existential(term) => {
				if !sign {
					return None;
				}
				Rule::Witness(vec![(term.clone(), true)])
			}
		};
		Some(rule)
	}

	// None when the branch already satisfies the instance
	fn instance_rule(&self, id: BranchId, signed: &Signed, c: Individual) -> Option<Rule> {
		let formula = match &signed.claim {
			Claim::Formula(formula) => formula,
			Claim::Predication(_, _) => return None,
		};
		match formula {
			Formula::Universal(s, p) => {
				let subject = Signed::predication(c, s, true);
				let predicate = Signed::predication(c, p, true);
				if self.holds(id, &subject.flipped()) || self.holds(id, &predicate) {
					None
				} else if self.holds(id, &subject) {
					Some(Rule::Linear(vec![predicate]))
				} else if self.holds(id, &predicate.flipped()) {
					Some(Rule::Linear(vec![subject.flipped()]))
				} else {
					Some(Rule::Split(vec![subject.flipped()], vec![predicate]))
				}
			}
			Formula::Particular(s, p) => {
				let subject = Signed::predication(c, s, true);
				let predicate = Signed::predication(c, p, true);
				if self.holds(id, &subject.flipped()) || self.holds(id, &predicate.flipped()) {
					None
				} else if self.holds(id, &subject) {
					Some(Rule::Linear(vec![predicate.flipped()]))
				} else if self.holds(id, &predicate) {
					Some(Rule::Linear(vec![subject.flipped()]))
				} else {
					Some(Rule::Split(vec![subject.flipped()], vec![predicate.flipped()]))
				}
			}
			Formula::Existential(term) => {
				let denial = Signed::predication(c, term, false);
				if self.holds(id, &denial) {
					None
				} else {
					Some(Rule::Linear(vec![denial]))
				}
			}
			Formula::Atom(_)
			| Formula::Negation(_)
			| Formula::Conjunction(_, _)
			| Formula::Disjunction(_, _)
			| Formula::Conditional(_, _)
			| Formula::Biconditional(_, _) => None,
		}
	}

	fn rule(&self, id: BranchId, obligation: &Obligation) -> Option<Rule> {
		match obligation {
			Obligation::Once(signed) => match &signed.claim {
				Claim::Formula(formula) => Self::formula_rule(formula, signed.sign),
				Claim::Predication(c, Term::Privation(inner)) if signed.sign => {
					Some(Rule::Linear(vec![Signed::predication(*c, inner, false)]))
				}
				Claim::Predication(_, _) => None,
			},
			Obligation::Instance(signed, c) => self.instance_rule(id, signed, *c),
		}
	}

	// first pending linear obligation on the branch, else the first split
	fn pending(&self, id: BranchId) -> Option<(Obligation, Rule)> {
		let mut path: Vec<BranchId> = self.lineage(id).collect();
		path.reverse();
		let individuals: Vec<Individual> = path
			.iter()
			.flat_map(|&b| self.branches[b].individuals.iter().copied())
			.collect();
		let mut split = None;
		for &b in &path {
			for signed in &self.branches[b].claims {
				for obligation in Self::obligations(signed, &individuals) {
					if self.is_expanded(id, &obligation) {
						continue;
					}
					match self.rule(id, &obligation) {
						None => {}
						Some(rule @ Rule::Split(_, _)) => {
							if split.is_none() {
								split = Some((obligation, rule));
							}
						}
						Some(rule) => return Some((obligation, rule)),
					}
				}
			}
		}
		split
	}

	fn step(&mut self, id: BranchId, round: usize) -> Step {
		let (obligation, rule) = match self.pending(id) {
			Some(pending) => pending,
			None => {
				self.branches[id].state = BranchState::Saturated;
				self.record(|| TraceEvent::Saturated { branch: id });
				return Step::Saturated;
			}
		};
		let consumed = obligation.signed().clone();
		let individual = obligation.individual();
		self.branches[id].expanded.insert(obligation);

		let (produced, individual) = match rule {
			Rule::Linear(produced) => (produced, individual),
			Rule::Witness(terms) => {
				let c = self.fresh_individual();
				self.branches[id].individuals.push(c);
				let produced = terms
					.iter()
					.map(|(term, sign)| Signed::predication(c, term, *sign))
					.collect();
				(produced, Some(c))
			}
			Rule::Split(left, right) => {
				let l = self.push_branch(id);
				let r = self.push_branch(id);
				self.branches[id].state = BranchState::Split;
				self.record(|| TraceEvent::Split {
					round,
					branch: id,
					consumed,
					individual,
					children: vec![(l, left.clone()), (r, right.clone())],
				});
				for (child, signed_list) in vec![(l, left), (r, right)] {
					for signed in signed_list {
						if self.add(child, signed) {
							break;
						}
					}
				}
				return Step::Split;
			}
		};

		self.record(|| TraceEvent::Expanded {
			round,
			branch: id,
			consumed,
			individual,
			produced: produced.clone(),
		});
		for signed in produced {
			if self.add(id, signed) {
				return Step::Closed;
			}
		}
		Step::Expanded
	}

	fn open_leaves(&self) -> Vec<BranchId> {
		(0..self.branches.len())
			.filter(|&b| self.branches[b].state == BranchState::Open)
			.collect()
	}

	/// Expands the tree round by round until every branch is closed, some
	/// branch is saturated while open, or `max_iterations` rounds have run.
	pub fn run(mut self, max_iterations: usize) -> Outcome {
		let mut outcome = None;
		'rounds: for round in 0..max_iterations {
			let open = self.open_leaves();
			if open.is_empty() {
				break;
			}
			trace!("round {}: {} open branches", round, open.len());
			for id in open {
				if let Step::Saturated = self.step(id, round) {
					outcome = Some(Outcome::Open { branch: id });
					break 'rounds;
				}
			}
		}
		let outcome = outcome.unwrap_or_else(|| match self.open_leaves().len() {
			0 => Outcome::Closed,
			open => Outcome::Exhausted { open },
		});
		if let Outcome::Exhausted { open } = outcome {
			self.record(|| TraceEvent::Exhausted { open });
		}
		for b in 0..self.branches.len() {
			let status = match self.branches[b].state {
				BranchState::Split => continue,
				BranchState::Closed => BranchStatus::Closed,
				BranchState::Saturated => BranchStatus::Open,
				BranchState::Open => BranchStatus::Unfinished,
			};
			self.record(|| TraceEvent::Status { branch: b, status });
		}
		outcome
	}
}
