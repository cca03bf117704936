use crate::error::{ParseError, ParseErrorKind};
use crate::prop_tree::{Formula, Term};
use plex::lexer;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq)]
enum Token {
	Ident(String),
	LeftParenthesis,
	RightParenthesis,
	LeftBracket,
	RightBracket,
	LeftAngle,
	RightAngle,
	And,
	Or,
	Not,
	Imply,
	Iff,
	Complement,
	Privation,
	Whitespace,
	Unknown(String),
}

lexer! {
	fn next_token(text: 'a) -> Token;

	r#"[ \t\r\n]+"# => Token::Whitespace,
	r#"[A-Za-z0-9_]+"# => Token::Ident(text.to_owned()),
	r#"\("# => Token::LeftParenthesis,
	r#"\)"# => Token::RightParenthesis,
	r#"\["# => Token::LeftBracket,
	r#"\]"# => Token::RightBracket,
	r#"<->"# => Token::Iff,
	r#"->"# => Token::Imply,
	r#"<"# => Token::LeftAngle,
	r#">"# => Token::RightAngle,
	r#"\&"# => Token::And,
	r#"\|"# => Token::Or,
	r#"-"# => Token::Not,
	r#"\~"# => Token::Complement,
	r#"\^"# => Token::Privation,
	r#"."# => Token::Unknown(text.to_owned()),
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Token::Ident(name) => write!(f, "identifier '{}'", name),
			Token::LeftParenthesis => write!(f, "'('"),
			Token::RightParenthesis => write!(f, "')'"),
			Token::LeftBracket => write!(f, "'['"),
			Token::RightBracket => write!(f, "']'"),
			Token::LeftAngle => write!(f, "'<'"),
			Token::RightAngle => write!(f, "'>'"),
			Token::And => write!(f, "'&'"),
			Token::Or => write!(f, "'|'"),
			Token::Not => write!(f, "'-'"),
			Token::Imply => write!(f, "'->'"),
			Token::Iff => write!(f, "'<->'"),
			Token::Complement => write!(f, "'~'"),
			Token::Privation => write!(f, "'^'"),
			Token::Whitespace => write!(f, "whitespace"),
			Token::Unknown(text) => write!(f, "{:?}", text),
		}
	}
}

#[derive(Clone, Debug)]
struct Spanned {
	token: Token,
	position: usize,
}

fn tokenize(text: &str) -> Result<Vec<Spanned>, ParseError> {
	let mut tokens = Vec::new();
	let mut remaining = text;
	while let Some((token, new_remaining)) = next_token(remaining) {
		let position = text.len() - remaining.len();
		match token {
			Token::Whitespace => {}
			Token::Unknown(_) => {
				return Err(ParseError::new(
					ParseErrorKind::UnknownCharacter,
					format!("unexpected character {}", token),
					position,
				))
			}
			token => tokens.push(Spanned { token, position }),
		}
		remaining = new_remaining;
	}
	if !remaining.is_empty() {
		return Err(ParseError::new(
			ParseErrorKind::UnknownCharacter,
			format!("unexpected character {:?}", remaining.chars().next().unwrap_or(' ')),
			text.len() - remaining.len(),
		));
	}
	Ok(tokens)
}

/// Deepest nesting of operators and parentheses a formula may have.
pub const MAX_NESTING: usize = 256;

struct Parser {
	tokens: Vec<Spanned>,
	pos: usize,
	// input length, reported for errors at end of input
	end: usize,
	depth: usize,
}

impl Parser {
	fn new(tokens: Vec<Spanned>, end: usize) -> Parser {
		Parser {
			tokens,
			pos: 0,
			end,
			depth: 0,
		}
	}

	fn position(&self) -> usize {
		self.peek().map_or(self.end, |spanned| spanned.position)
	}

	// one level deeper; the caller restores `depth` once the nested part is parsed
	fn enter(&mut self, position: usize) -> Result<(), ParseError> {
		self.depth += 1;
		if self.depth > MAX_NESTING {
			return Err(ParseError::new(
				ParseErrorKind::TooDeep,
				format!("formula nested deeper than {} levels", MAX_NESTING),
				position,
			));
		}
		Ok(())
	}

	fn peek(&self) -> Option<&Spanned> {
		self.tokens.get(self.pos)
	}

	fn bump(&mut self) -> Option<Spanned> {
		let spanned = self.tokens.get(self.pos).cloned();
		if spanned.is_some() {
			self.pos += 1;
		}
		spanned
	}

	fn eat(&mut self, expected: &Token) -> bool {
		match self.peek() {
			Some(spanned) if spanned.token == *expected => {
				self.pos += 1;
				true
			}
			_ => false,
		}
	}

	// like `eat`, returning where the token was
	fn eat_at(&mut self, expected: &Token) -> Option<usize> {
		let position = self.position();
		if self.eat(expected) {
			Some(position)
		} else {
			None
		}
	}

	fn unexpected_end(&self, expected: &str) -> ParseError {
		ParseError::new(
			ParseErrorKind::UnexpectedEnd,
			format!("expected {}, found end of input", expected),
			self.end,
		)
	}

	fn close(&mut self, expected: Token, opener: &Spanned) -> Result<(), ParseError> {
		match self.peek() {
			Some(spanned) if spanned.token == expected => {
				self.pos += 1;
				Ok(())
			}
			Some(spanned) => Err(ParseError::new(
				ParseErrorKind::UnexpectedToken,
				format!(
					"expected {} to close {} at position {}, found {}",
					expected, opener.token, opener.position, spanned.token
				),
				spanned.position,
			)),
			None => Err(ParseError::new(
				ParseErrorKind::Unmatched,
				format!("unmatched {}", opener.token),
				opener.position,
			)),
		}
	}

	fn formula(&mut self) -> Result<Formula, ParseError> {
		self.biconditional()
	}

	fn biconditional(&mut self) -> Result<Formula, ParseError> {
		let depth = self.depth;
		let mut left = self.conditional()?;
		while let Some(position) = self.eat_at(&Token::Iff) {
			self.enter(position)?;
			let right = self.conditional()?;
			left = left.iff(right);
		}
		self.depth = depth;
		Ok(left)
	}

	fn conditional(&mut self) -> Result<Formula, ParseError> {
		let left = self.disjunction()?;
		match self.eat_at(&Token::Imply) {
			Some(position) => {
				self.enter(position)?;
				let right = self.conditional()?;
				self.depth -= 1;
				Ok(left.implies(right))
			}
			None => Ok(left),
		}
	}

	fn disjunction(&mut self) -> Result<Formula, ParseError> {
		let depth = self.depth;
		let mut left = self.conjunction()?;
		while let Some(position) = self.eat_at(&Token::Or) {
			self.enter(position)?;
			let right = self.conjunction()?;
			left = left.or(right);
		}
		self.depth = depth;
		Ok(left)
	}

	fn conjunction(&mut self) -> Result<Formula, ParseError> {
		let depth = self.depth;
		let mut left = self.unary()?;
		while let Some(position) = self.eat_at(&Token::And) {
			self.enter(position)?;
			let right = self.unary()?;
			left = left.and(right);
		}
		self.depth = depth;
		Ok(left)
	}

	fn unary(&mut self) -> Result<Formula, ParseError> {
		if let Some(position) = self.eat_at(&Token::Not) {
			self.enter(position)?;
			let inner = self.unary()?;
			self.depth -= 1;
			return Ok(inner.negate());
		}
		self.primary()
	}

	fn primary(&mut self) -> Result<Formula, ParseError> {
		let spanned = match self.bump() {
			Some(spanned) => spanned,
			None => return Err(self.unexpected_end("a formula")),
		};
		match &spanned.token {
			Token::LeftBracket => {
				let subject = self.term()?;
				self.close(Token::RightBracket, &spanned)?;
				let predicate = self.term()?;
				Ok(Formula::universal(subject, predicate))
			}
			Token::LeftAngle => {
				let subject = self.term()?;
				self.close(Token::RightAngle, &spanned)?;
				let predicate = self.term()?;
				Ok(Formula::particular(subject, predicate))
			}
			Token::LeftParenthesis => {
				self.enter(spanned.position)?;
				let formula = self.formula()?;
				self.close(Token::RightParenthesis, &spanned)?;
				self.depth -= 1;
				Ok(formula)
			}
			Token::Ident(name) => Ok(Formula::atom(name.as_str())),
			Token::Complement | Token::Privation => Err(ParseError::new(
				ParseErrorKind::TermOperatorInFormula,
				format!("term operator {} cannot apply to a formula", spanned.token),
				spanned.position,
			)),
			token => Err(ParseError::new(
				ParseErrorKind::UnexpectedToken,
				format!("expected a formula, found {}", token),
				spanned.position,
			)),
		}
	}

	fn term(&mut self) -> Result<Term, ParseError> {
		let spanned = match self.bump() {
			Some(spanned) => spanned,
			None => return Err(self.unexpected_end("a term")),
		};
		match &spanned.token {
			Token::Complement | Token::Privation => {
				self.enter(spanned.position)?;
				let inner = self.term()?;
				self.depth -= 1;
				if spanned.token == Token::Complement {
					Ok(inner.complement())
				} else {
					Ok(inner.privation())
				}
			}
			Token::Ident(name) => Ok(Term::atom(name.as_str())),
			Token::Not | Token::LeftParenthesis | Token::LeftBracket | Token::LeftAngle => {
				Err(ParseError::new(
					ParseErrorKind::FormulaOperatorInTerm,
					format!("formula operator {} cannot apply to a term", spanned.token),
					spanned.position,
				))
			}
			token => Err(ParseError::new(
				ParseErrorKind::UnexpectedToken,
				format!("expected a term, found {}", token),
				spanned.position,
			)),
		}
	}
}

/// Parses formula text into a formula tree.
pub fn parse(text: &str) -> Result<Formula, ParseError> {
	let tokens = tokenize(text)?;
	if tokens.is_empty() {
		return Err(ParseError::new(ParseErrorKind::Empty, "empty formula", 0));
	}
	let mut parser = Parser::new(tokens, text.len());
	let formula = parser.formula()?;
	match parser.peek() {
		None => Ok(formula),
		Some(Spanned {
			token: Token::RightParenthesis,
			position,
		}) => Err(ParseError::new(
			ParseErrorKind::Unmatched,
			"unmatched ')'",
			*position,
		)),
		Some(spanned) => Err(ParseError::new(
			ParseErrorKind::Trailing,
			format!("unexpected {} after a complete formula", spanned.token),
			spanned.position,
		)),
	}
}

impl FromStr for Formula {
	type Err = ParseError;

	fn from_str(text: &str) -> Result<Formula, ParseError> {
		parse(text)
	}
}
