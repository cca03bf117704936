use std::fmt;

/// A term of the subatomic language: a named class, or a complement (`~t`,
/// "not-t") or privation (`^t`, "in-t") over another term.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
	Atom(String),
	Complement(Box<Term>),
	Privation(Box<Term>),
}

impl Term {
	pub fn atom(name: impl Into<String>) -> Term {
		Term::Atom(name.into())
	}

	pub fn complement(self) -> Term {
		Term::Complement(Box::new(self))
	}

	pub fn privation(self) -> Term {
		Term::Privation(Box::new(self))
	}

	/// Strips every leading complement, returning the remaining term and
	/// whether an odd number of complements was removed.
	pub fn strip_complements(&self) -> (&Term, bool) {
		let mut term = self;
		let mut flipped = false;
		while let Term::Complement(inner) = term {
			term = inner;
			flipped = !flipped;
		}
		(term, flipped)
	}
}

impl fmt::Display for Term {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Term::Atom(name) => write!(f, "{}", name),
			Term::Complement(a) => write!(f, "~{}", a),
			Term::Privation(a) => write!(f, "^{}", a),
		}
	}
}

/// A formula tree. Two formulas are the same formula iff they are
/// structurally equal; the tableau relies on this for closure.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Formula {
	/// A bare term used as a proposition.
	Atom(Term),
	/// `[S]P`: all S are P.
	Universal(Term, Term),
	/// `<S>P`: some S are P.
	Particular(Term, Term),
	/// There are t. Has no syntax of its own and renders as `<t>t`.
	Existential(Term),
	Negation(Box<Formula>),
	Conjunction(Box<Formula>, Box<Formula>),
	Disjunction(Box<Formula>, Box<Formula>),
	Conditional(Box<Formula>, Box<Formula>),
	Biconditional(Box<Formula>, Box<Formula>),
}

impl Formula {
	pub fn atom(name: impl Into<String>) -> Formula {
		Formula::Atom(Term::atom(name))
	}

	pub fn universal(subject: Term, predicate: Term) -> Formula {
		Formula::Universal(subject, predicate)
	}

	pub fn particular(subject: Term, predicate: Term) -> Formula {
		Formula::Particular(subject, predicate)
	}

	pub fn existential(term: Term) -> Formula {
		Formula::Existential(term)
	}

	pub fn negate(self) -> Formula {
		Formula::Negation(Box::new(self))
	}

	pub fn and(self, other: Formula) -> Formula {
		Formula::Conjunction(Box::new(self), Box::new(other))
	}

	pub fn or(self, other: Formula) -> Formula {
		Formula::Disjunction(Box::new(self), Box::new(other))
	}

	pub fn implies(self, other: Formula) -> Formula {
		Formula::Conditional(Box::new(self), Box::new(other))
	}

	pub fn iff(self, other: Formula) -> Formula {
		Formula::Biconditional(Box::new(self), Box::new(other))
	}

	fn precedence(&self) -> Precedence {
		match self {
			Formula::Biconditional(_, _) => Precedence::Biconditional,
			Formula::Conditional(_, _) => Precedence::Conditional,
			Formula::Disjunction(_, _) => Precedence::Disjunction,
			Formula::Conjunction(_, _) => Precedence::Conjunction,
			Formula::Negation(_) => Precedence::Unary,
			Formula::Atom(_)
			| Formula::Universal(_, _)
			| Formula::Particular(_, _)
			| Formula::Existential(_) => Precedence::Primary,
		}
	}

	// parenthesizes self when it binds looser than the slot it is printed in
	fn fmt_at(&self, f: &mut fmt::Formatter, slot: Precedence) -> fmt::Result {
		if self.precedence() < slot {
			write!(f, "(")?;
			self.fmt_bare(f)?;
			write!(f, ")")
		} else {
			self.fmt_bare(f)
		}
	}

	fn fmt_bare(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Formula::Atom(term) => write!(f, "{}", term),
			Formula::Universal(s, p) => write!(f, "[{}]{}", s, p),
			Formula::Particular(s, p) => write!(f, "<{}>{}", s, p),
			Formula::Existential(t) => write!(f, "<{}>{}", t, t),
			Formula::Negation(a) => {
				write!(f, "-")?;
				a.fmt_at(f, Precedence::Unary)
			}
			Formula::Conjunction(a, b) => {
				a.fmt_at(f, Precedence::Conjunction)?;
				write!(f, " & ")?;
				b.fmt_at(f, Precedence::Unary)
			}
			Formula::Disjunction(a, b) => {
				a.fmt_at(f, Precedence::Disjunction)?;
				write!(f, " | ")?;
				b.fmt_at(f, Precedence::Conjunction)
			}
			// right-associative
			Formula::Conditional(a, b) => {
				a.fmt_at(f, Precedence::Disjunction)?;
				write!(f, " -> ")?;
				b.fmt_at(f, Precedence::Conditional)
			}
			Formula::Biconditional(a, b) => {
				a.fmt_at(f, Precedence::Biconditional)?;
				write!(f, " <-> ")?;
				b.fmt_at(f, Precedence::Conditional)
			}
		}
	}
}

impl fmt::Display for Formula {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.fmt_bare(f)
	}
}

/// Canonical display form of a formula.
pub fn render(formula: &Formula) -> String {
	formula.to_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
	Biconditional,
	Conditional,
	Disjunction,
	Conjunction,
	Unary,
	Primary,
}

#[cfg(test)]
mod test {
	use super::*;

	fn a() -> Formula {
		Formula::atom("A")
	}

	fn b() -> Formula {
		Formula::atom("B")
	}

	fn c() -> Formula {
		Formula::atom("C")
	}

	#[test]
	fn test_render_terms() {
		let term = Term::atom("A").complement().privation();
		assert_eq!(term.to_string(), "^~A");
		let universal = Formula::universal(
			Term::atom("A").complement(),
			Term::atom("B").privation(),
		);
		assert_eq!(universal.to_string(), "[~A]^B");
		assert_eq!(Formula::particular(Term::atom("S"), Term::atom("P")).to_string(), "<S>P");
		assert_eq!(Formula::existential(Term::atom("S")).to_string(), "<S>S");
	}

	#[test]
	fn test_render_minimal_parentheses() {
		assert_eq!(a().or(a().negate()).to_string(), "A | -A");
		assert_eq!(a().and(a().negate()).negate().to_string(), "-(A & -A)");
		assert_eq!(a().and(b()).or(c()).to_string(), "A & B | C");
		assert_eq!(a().and(b().or(c())).to_string(), "A & (B | C)");
		assert_eq!(
			a().and(a().implies(b())).implies(b()).to_string(),
			"A & (A -> B) -> B"
		);
	}

	#[test]
	fn test_render_associativity() {
		assert_eq!(a().implies(b().implies(c())).to_string(), "A -> B -> C");
		assert_eq!(a().implies(b()).implies(c()).to_string(), "(A -> B) -> C");
		assert_eq!(a().and(b()).and(c()).to_string(), "A & B & C");
		assert_eq!(a().and(b().and(c())).to_string(), "A & (B & C)");
		assert_eq!(a().iff(b()).iff(c()).to_string(), "A <-> B <-> C");
		assert_eq!(a().iff(b().iff(c())).to_string(), "A <-> (B <-> C)");
		assert_eq!(a().negate().negate().to_string(), "--A");
	}

	#[test]
	fn test_structural_equality() {
		let t = Term::atom("A");
		assert_ne!(t.clone().complement().complement(), t);
		assert_eq!(
			Formula::universal(t.clone(), Term::atom("B")),
			Formula::universal(Term::atom("A"), Term::atom("B"))
		);
		assert_ne!(
			Formula::universal(t.clone(), Term::atom("B")),
			Formula::particular(t, Term::atom("B"))
		);
	}

	#[test]
	fn test_strip_complements() {
		let base = Term::atom("A");
		assert_eq!(base.strip_complements(), (&base, false));
		let once = base.clone().complement();
		assert_eq!(once.strip_complements(), (&base, true));
		let twice = once.complement();
		assert_eq!(twice.strip_complements(), (&base, false));
		let privative = Term::atom("A").privation().complement();
		assert_eq!(
			privative.strip_complements(),
			(&Term::atom("A").privation(), true)
		);
	}
}
