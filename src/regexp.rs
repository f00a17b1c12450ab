use std::fmt;
use std::fmt::Display;

/// Terminal symbol of an expression, an opaque tag.
///
/// Two leaves carrying the same symbol are the same letter
/// of the alphabet; only their positions tell them apart.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol(String);

impl Symbol {
	pub fn new<S: Into<String>>(name: S) -> Self {
		Self(name.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Symbol {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.0.fmt(f)
	}
}

/// Position of a leaf in the expression, `1..=N` left to right.
pub type Position = u32;

/// Numbered leaf: a terminal symbol together with its position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leaf {
	pub symbol: Symbol,
	pub position: Position,
}

impl fmt::Display for Leaf {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.symbol.fmt(f)
	}
}

/// Regular expression tree.
///
/// Each node owns its children.
/// The leaf type is `Symbol` out of the parser
/// and `Leaf` once the tree has been numbered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegExp<T> {
	Terminal(T),
	Concat(Box<RegExp<T>>, Box<RegExp<T>>),
	Or(Box<RegExp<T>>, Box<RegExp<T>>),
	Star(Box<RegExp<T>>),
}

impl<T> RegExp<T> {
	/// Maps every leaf of the tree, left to right.
	pub fn map<U, F: FnMut(T) -> U>(self, f: &mut F) -> RegExp<U> {
		match self {
			Self::Terminal(t) => RegExp::Terminal(f(t)),
			Self::Concat(l, r) => {
				let l = l.map(f);
				let r = r.map(f);
				RegExp::Concat(Box::new(l), Box::new(r))
			}
			Self::Or(l, r) => {
				let l = l.map(f);
				let r = r.map(f);
				RegExp::Or(Box::new(l), Box::new(r))
			}
			Self::Star(c) => RegExp::Star(Box::new(c.map(f))),
		}
	}

	/// Leaves of the tree, left to right.
	pub fn leaves(&self) -> Vec<&T> {
		let mut leaves = Vec::new();
		self.collect_leaves(&mut leaves);
		leaves
	}

	fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a T>) {
		match self {
			Self::Terminal(t) => leaves.push(t),
			Self::Concat(l, r) | Self::Or(l, r) => {
				l.collect_leaves(leaves);
				r.collect_leaves(leaves);
			}
			Self::Star(c) => c.collect_leaves(leaves),
		}
	}

	fn precedence(&self) -> u8 {
		match self {
			Self::Terminal(_) => 4,
			Self::Star(_) => 3,
			Self::Concat(_, _) => 2,
			Self::Or(_, _) => 1,
		}
	}
}

impl RegExp<Symbol> {
	/// Numbers the leaves `1..=N` left to right.
	///
	/// Returns the numbered tree and the leaf count `N`.
	pub fn index(self) -> (RegExp<Leaf>, u32) {
		let mut next = 0;
		let exp = self.map(&mut |symbol| {
			next += 1;
			Leaf {
				symbol,
				position: next,
			}
		});

		(exp, next)
	}
}

impl<T: fmt::Display> fmt::Display for RegExp<T> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Terminal(t) => t.fmt(f),
			Self::Star(c) => {
				if c.precedence() < self.precedence() {
					write!(f, "({})*", c)
				} else {
					write!(f, "{}*", c)
				}
			}
			Self::Concat(l, r) => binary(f, l, '.', r, self.precedence()),
			Self::Or(l, r) => binary(f, l, '|', r, self.precedence()),
		}
	}
}

/// Prints a left-associative binary node,
/// parenthesizing the children that would re-parse differently.
fn binary<T: fmt::Display>(
	f: &mut fmt::Formatter,
	l: &RegExp<T>,
	op: char,
	r: &RegExp<T>,
	precedence: u8,
) -> fmt::Result {
	if l.precedence() < precedence {
		write!(f, "({})", l)?
	} else {
		l.fmt(f)?
	}

	op.fmt(f)?;

	if r.precedence() <= precedence {
		write!(f, "({})", r)
	} else {
		r.fmt(f)
	}
}
