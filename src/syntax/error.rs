use super::lexer;
use source_span::Loc;
use std::fmt;

#[derive(Debug)]
pub enum Error {
	Lexer(lexer::Error),
	/// An operator was applied with too few operands on the stack.
	MissingOperand(lexer::Operator),
	/// A `)` with no matching `(`.
	UnmatchedCloser,
	/// A `(` left unclosed at the end of the input.
	UnmatchedOpener,
	/// Adjacent operands with no operator between them.
	DanglingOperand,
	/// A `()` group holding no expression.
	EmptyGroup,
	EmptyExpression,
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		use self::Error::*;
		match self {
			Lexer(e) => write!(f, "{}", e),
			MissingOperand(op) => write!(f, "operator `{}` is missing an operand", op),
			UnmatchedCloser => write!(f, "unmatched `)`"),
			UnmatchedOpener => write!(f, "unmatched `(`"),
			DanglingOperand => write!(f, "missing operator between operands"),
			EmptyGroup => write!(f, "empty group"),
			EmptyExpression => write!(f, "empty expression"),
		}
	}
}

pub type Result<T> = std::result::Result<T, Loc<Error>>;

impl From<lexer::Error> for Error {
	fn from(e: lexer::Error) -> Error {
		Error::Lexer(e)
	}
}
