use subatomic::{
	parse, BranchStatus, Formula, Outcome, ParseErrorKind, Prover, ProverConfig, Term, Trace,
};

fn prove(text: &str) -> bool {
	Prover::default().prove(&parse(text).unwrap(), None)
}

fn prove_argument(premises: &[&str], conclusion: &str) -> bool {
	let premises: Vec<Formula> = premises.iter().map(|p| parse(p).unwrap()).collect();
	Prover::default().prove_argument(&premises, &parse(conclusion).unwrap(), None)
}

#[test]
fn classical_laws() {
	assert!(prove("A | -A"));
	assert!(prove("-(A & -A)"));
	assert!(prove("(A & (A -> B)) -> B"));
	assert!(prove("((A -> B) & -B) -> -A"));
	assert!(prove("((A -> B) & (B -> C)) -> (A -> C)"));
	assert!(prove("((A -> B) & (C -> D) & (A | C)) -> (B | D)"));
	assert!(prove("(A <-> B) -> (-A <-> -B)"));
}

#[test]
fn invalid_formulas() {
	assert!(!prove("A"));
	assert!(!prove("A -> B"));
	assert!(!prove("(A -> B) -> (B -> A)"));
	assert!(!prove("[A]B"));
}

#[test]
fn barbara() {
	assert!(prove_argument(&["[M]P", "[S]M"], "[S]P"));
	assert!(prove_argument(&["[A]B", "[B]C"], "[A]C"));
	assert!(prove("([A]B & [B]C) -> [A]C"));
}

#[test]
fn celarent() {
	assert!(prove_argument(&["-<M>P", "[S]M"], "-<S>P"));
}

#[test]
fn darii_and_ferio() {
	assert!(prove_argument(&["[M]P", "<S>M"], "<S>P"));
	assert!(prove_argument(&["-<M>P", "<S>M"], "<S>~P"));
}

#[test]
fn illicit_conversion() {
	assert!(!prove_argument(&["[M]P", "[M]S"], "[S]P"));
	assert!(!prove_argument(&["[A]B"], "[B]A"));
	assert!(prove_argument(&["<A>B"], "<B>A"));
}

#[test]
fn square_of_opposition() {
	// contradictories
	assert!(prove("[S]P <-> -<S>~P"));
	assert!(prove("<S>P <-> -[S]~P"));
	// no existential import: subalternation fails
	assert!(!prove_argument(&["[S]P"], "<S>P"));
}

#[test]
fn complement_and_privation() {
	assert!(prove("[S]~~P <-> [S]P"));
	assert!(prove_argument(&["[S]^P"], "[S]~P"));
	assert!(!prove_argument(&["[S]~P"], "[S]^P"));
	assert!(!prove("<S>^P <-> <S>~P"));
}

#[test]
fn existential_import_when_stated() {
	let premises = vec![parse("[S]P").unwrap(), Formula::existential(Term::atom("S"))];
	assert!(Prover::default().prove_argument(&premises, &parse("<S>P").unwrap(), None));
}

#[test]
fn parse_errors() {
	assert_eq!(parse("[A").unwrap_err().kind, ParseErrorKind::Unmatched);
	assert_eq!(parse("").unwrap_err().kind, ParseErrorKind::Empty);
	assert_eq!(parse("A &").unwrap_err().kind, ParseErrorKind::UnexpectedEnd);
}

#[test]
fn exhaustion_is_a_negative_result() {
	let prover = Prover::new(ProverConfig::new(2).unwrap());
	let formula = parse("((A -> B) & (C -> D) & (A | C)) -> (B | D)").unwrap();
	let mut trace = Trace::new();
	let outcome = prover.outcome(&[], &formula, Some(&mut trace));
	assert!(matches!(outcome, Outcome::Exhausted { .. }));
	assert!(trace.to_string().contains("bound exhausted with"));
	assert!(Prover::default().prove(&formula, None));
}

#[test]
fn trace_reports_every_leaf() {
	let mut trace = Trace::new();
	assert!(Prover::default().prove(&parse("A | -A -> B | -B").unwrap(), Some(&mut trace)));
	let statuses: Vec<_> = trace.statuses().collect();
	assert!(!statuses.is_empty());
	assert!(statuses.iter().all(|&(_, status)| status == BranchStatus::Closed));
}
