use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::Env;
use subatomic::config::DEFAULT_MAX_ITERATIONS;
use subatomic::{parse, Formula, Outcome, Prover, ProverConfig, Trace};

/// Decide validity of a subatomic formula, or of an argument when premises
/// are given.
#[derive(Parser, Debug)]
#[command(name = "subatomic", version)]
struct Cli {
	/// Formula to test, or the conclusion of the argument
	formula: Option<String>,

	/// Premise of the argument (repeatable)
	#[arg(short, long = "premise")]
	premises: Vec<String>,

	/// Conclusion of the argument, in place of the positional formula
	#[arg(short, long, conflicts_with = "formula")]
	conclusion: Option<String>,

	/// Maximum number of expansion rounds
	#[arg(
		long,
		env = "SUBATOMIC_MAX_ITERATIONS",
		default_value_t = DEFAULT_MAX_ITERATIONS
	)]
	max_iterations: usize,

	/// Print the tableau steps
	#[arg(short, long)]
	trace: bool,
}

impl Cli {
	fn premises(&self) -> Result<Vec<Formula>> {
		self.premises
			.iter()
			.map(|text| parse(text).with_context(|| format!("invalid premise {:?}", text)))
			.collect()
	}

	fn conclusion(&self) -> Result<Formula> {
		let text = match self.conclusion.as_ref().or_else(|| self.formula.as_ref()) {
			Some(text) => text,
			None => bail!("a formula or --conclusion is required"),
		};
		parse(text).with_context(|| format!("invalid formula {:?}", text))
	}
}

fn main() -> Result<()> {
	env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
	let cli = Cli::parse();

	let premises = cli.premises()?;
	let conclusion = cli.conclusion()?;
	let prover = Prover::new(ProverConfig::new(cli.max_iterations)?);

	for (i, premise) in premises.iter().enumerate() {
		println!("{}. {}", i + 1, premise);
	}
	if premises.is_empty() {
		println!("{}", conclusion);
	} else {
		println!("|- {}", conclusion);
	}

	let mut trace = Trace::new();
	let sink = if cli.trace { Some(&mut trace) } else { None };
	let outcome = prover.outcome(&premises, &conclusion, sink);
	if cli.trace {
		print!("{}", trace);
	}
	match outcome {
		Outcome::Closed => println!("valid"),
		Outcome::Open { branch } => println!("not valid (branch b{} stays open)", branch),
		Outcome::Exhausted { open } => println!(
			"not valid (bound of {} rounds exhausted with {} open)",
			prover.config().max_iterations(),
			open
		),
	}
	Ok(())
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_positional_formula() {
		let cli = Cli::try_parse_from(&["subatomic", "A | -A"]).unwrap();
		assert_eq!(cli.conclusion().unwrap(), parse("A | -A").unwrap());
		assert!(cli.premises().unwrap().is_empty());
	}

	#[test]
	fn test_premises_and_conclusion_flag() {
		let cli = Cli::try_parse_from(&[
			"subatomic",
			"--premise",
			"[M]P",
			"-p",
			"[S]M",
			"--conclusion",
			"[S]P",
		])
		.unwrap();
		let premises = cli.premises().unwrap();
		let conclusion = cli.conclusion().unwrap();
		assert_eq!(premises.len(), 2);
		assert!(Prover::default().prove_argument(&premises, &conclusion, None));
	}

	#[test]
	fn test_conclusion_required() {
		let cli = Cli::try_parse_from(&["subatomic", "-p", "[M]P"]).unwrap();
		assert!(cli.conclusion().is_err());
		assert!(Cli::try_parse_from(&["subatomic", "A", "--conclusion", "B"]).is_err());
	}

	#[test]
	fn test_bad_premise_reported() {
		let cli = Cli::try_parse_from(&["subatomic", "-p", "[M", "A"]).unwrap();
		let err = cli.premises().unwrap_err();
		assert!(err.to_string().contains("invalid premise"));
	}
}
