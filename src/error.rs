use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
	Empty,
	UnknownCharacter,
	UnexpectedToken,
	UnexpectedEnd,
	Unmatched,
	Trailing,
	/// `~` or `^` where a formula was expected.
	TermOperatorInFormula,
	/// A formula operator or delimiter where a term was expected.
	FormulaOperatorInTerm,
	/// Operators or parentheses nested deeper than the parser allows.
	TooDeep,
}

/// Malformed formula text. `position` is the byte offset of the offending
/// token, or the input length when the input ended too early.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message} at position {position}")]
pub struct ParseError {
	pub kind: ParseErrorKind,
	pub message: String,
	pub position: usize,
}

impl ParseError {
	pub fn new(kind: ParseErrorKind, message: impl Into<String>, position: usize) -> ParseError {
		ParseError {
			kind,
			message: message.into(),
			position,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
	#[error("max_iterations must be a positive integer")]
	ZeroIterations,
}
