//! Validity checking for subatomic logic: classical connectives over
//! categorical sentences (`[S]P`, `<S>P`) whose terms may carry complement
//! (`~`) and privation (`^`).
//!
//! ```
//! use subatomic::{parse, Prover};
//!
//! let prover = Prover::default();
//! let premises = vec![parse("[M]P").unwrap(), parse("[S]M").unwrap()];
//! assert!(prover.prove_argument(&premises, &parse("[S]P").unwrap(), None));
//! ```

pub mod config;
pub mod error;
pub mod parser;
pub mod prop_tree;
pub mod prover;
pub mod trace;
pub mod truth_tree;

pub use config::ProverConfig;
pub use error::{ConfigError, ParseError, ParseErrorKind};
pub use parser::parse;
pub use prop_tree::{render, Formula, Term};
pub use prover::Prover;
pub use trace::{BranchStatus, Trace, TraceEvent};
pub use truth_tree::Outcome;
