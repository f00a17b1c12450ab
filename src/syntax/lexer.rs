use source_span::{Loc, Metrics, Span};
use std::fmt;
use std::io;
use std::iter::Peekable;

#[derive(Debug)]
pub enum Error {
	IO(std::io::Error),
	Unexpected(char),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		use self::Error::*;
		match self {
			IO(e) => write!(f, "I/O: {}", e),
			Unexpected(c) => write!(f, "unexpected character `{}`", c),
		}
	}
}

pub type Result<T> = std::result::Result<T, Loc<Error>>;

/// Expression operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
	Or,
	Concat,
	Star,
}

impl Operator {
	pub fn precedence(&self) -> u8 {
		use self::Operator::*;
		match self {
			Or => 1,
			Concat => 2,
			Star => 3,
		}
	}
}

impl fmt::Display for Operator {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		use self::Operator::*;
		match self {
			Or => write!(f, "|"),
			Concat => write!(f, "."),
			Star => write!(f, "*"),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
	/// Terminal symbol, matching `letter+ digit*`.
	Terminal(String),
	Operator(Operator),
	Begin,
	End,
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		use self::Token::*;
		match self {
			Terminal(name) => name.fmt(f),
			Operator(op) => op.fmt(f),
			Begin => write!(f, "("),
			End => write!(f, ")"),
		}
	}
}

pub struct Lexer<I: Iterator<Item = io::Result<char>>, M: Metrics> {
	input: Peekable<I>,
	metrics: M,
	span: Span,
}

impl<I: Iterator<Item = io::Result<char>>, M: Metrics> Lexer<I, M> {
	pub fn new(input: I, metrics: M) -> Lexer<I, M> {
		Lexer {
			input: input.peekable(),
			metrics,
			span: Span::default(),
		}
	}

	fn peek(&mut self) -> Result<Option<char>> {
		match self.input.peek() {
			Some(Ok(c)) => Ok(Some(*c)),
			Some(Err(_)) => self.consume(),
			None => Ok(None),
		}
	}

	fn consume(&mut self) -> Result<Option<char>> {
		match self.input.next() {
			Some(Ok(c)) => {
				self.span.push(c, &self.metrics);
				Ok(Some(c))
			}
			Some(Err(e)) => Err(Loc::new(Error::IO(e), self.span.end().into())),
			None => Ok(None),
		}
	}

	fn skip_whitespaces(&mut self) -> Result<()> {
		while let Some(c) = self.peek()? {
			if c.is_whitespace() {
				self.consume()?;
			} else {
				break;
			}
		}

		Ok(())
	}

	fn parse_terminal(&mut self) -> Result<Loc<Token>> {
		let mut name = String::new();

		while let Some(c) = self.peek()? {
			if c.is_ascii_alphabetic() {
				self.consume()?;
				name.push(c);
			} else {
				break;
			}
		}

		while let Some(c) = self.peek()? {
			if c.is_ascii_digit() {
				self.consume()?;
				name.push(c);
			} else {
				break;
			}
		}

		Ok(Loc::new(Token::Terminal(name), self.span))
	}

	fn parse_token(&mut self) -> Result<Option<Loc<Token>>> {
		self.skip_whitespaces()?;
		self.span.clear();
		match self.peek()? {
			Some('(') => {
				self.consume()?;
				Ok(Some(Loc::new(Token::Begin, self.span)))
			}
			Some(')') => {
				self.consume()?;
				Ok(Some(Loc::new(Token::End, self.span)))
			}
			Some('*') => {
				self.consume()?;
				Ok(Some(Loc::new(Token::Operator(Operator::Star), self.span)))
			}
			Some('.') => {
				self.consume()?;
				Ok(Some(Loc::new(Token::Operator(Operator::Concat), self.span)))
			}
			Some('|') => {
				self.consume()?;
				Ok(Some(Loc::new(Token::Operator(Operator::Or), self.span)))
			}
			Some(c) if c.is_ascii_alphabetic() => Ok(Some(self.parse_terminal()?)),
			Some(c) => {
				self.consume()?;
				Err(Loc::new(Error::Unexpected(c), self.span))
			}
			None => Ok(None),
		}
	}
}

impl<I: Iterator<Item = io::Result<char>>, M: Metrics> Iterator for Lexer<I, M> {
	type Item = Result<Loc<Token>>;

	fn next(&mut self) -> Option<Result<Loc<Token>>> {
		self.parse_token().transpose()
	}
}
