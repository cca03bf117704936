use crate::config::ProverConfig;
use crate::prop_tree::Formula;
use crate::trace::Trace;
use crate::truth_tree::{Outcome, Signed, TruthTree};
use log::debug;
use std::iter;

/// Decides validity of formulas and arguments by refutation. Holds only its
/// configuration; every call builds and discards its own truth tree.
#[derive(Clone, Debug, Default)]
pub struct Prover {
	config: ProverConfig,
}

impl Prover {
	pub fn new(config: ProverConfig) -> Prover {
		Prover { config }
	}

	pub fn config(&self) -> &ProverConfig {
		&self.config
	}

	/// Whether `formula` is valid. Steps are appended to `trace` when given.
	pub fn prove(&self, formula: &Formula, trace: Option<&mut Trace>) -> bool {
		self.prove_argument(&[], formula, trace)
	}

	/// Whether `conclusion` follows from `premises`.
	pub fn prove_argument(
		&self,
		premises: &[Formula],
		conclusion: &Formula,
		trace: Option<&mut Trace>,
	) -> bool {
		self.outcome(premises, conclusion, trace).is_valid()
	}

	/// Like [`Prover::prove_argument`], but tells a saturated open branch
	/// apart from an exhausted iteration bound.
	pub fn outcome(
		&self,
		premises: &[Formula],
		conclusion: &Formula,
		trace: Option<&mut Trace>,
	) -> Outcome {
		let seed = premises
			.iter()
			.map(|premise| Signed::formula(premise.clone(), true))
			.chain(iter::once(Signed::formula(conclusion.clone(), false)))
			.collect();
		let outcome = TruthTree::new(seed, trace).run(self.config.max_iterations());
		debug!(
			"{} premise(s) |- {}: {:?}",
			premises.len(),
			conclusion,
			outcome
		);
		outcome
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::parser::parse;
	use crate::trace::BranchStatus;

	#[test]
	fn test_prove() {
		let prover = Prover::default();
		assert!(prover.prove(&parse("A | -A").unwrap(), None));
		assert!(!prover.prove(&parse("A | B").unwrap(), None));
	}

	#[test]
	fn test_outcome_kinds() {
		let tight = Prover::new(ProverConfig::new(1).unwrap());
		let formula = parse("(A -> B) & (B -> C) -> (A -> C)").unwrap();
		assert_eq!(
			tight.outcome(&[], &formula, None),
			Outcome::Exhausted { open: 1 }
		);
		assert_eq!(Prover::default().outcome(&[], &formula, None), Outcome::Closed);
	}

	#[test]
	fn test_trace_is_per_call() {
		let prover = Prover::default();
		let formula = parse("A | -A").unwrap();
		let mut first = Trace::new();
		let mut second = Trace::new();
		assert!(prover.prove(&formula, Some(&mut first)));
		assert!(prover.prove(&formula, Some(&mut second)));
		assert_eq!(first, second);
		assert_eq!(first.statuses().collect::<Vec<_>>(), vec![(0, BranchStatus::Closed)]);
	}
}
