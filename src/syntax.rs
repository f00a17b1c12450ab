pub use source_span::{Loc, Position, Span};
use std::iter::Peekable;

mod error;
pub mod lexer;

pub use error::{Error, Result};
pub use lexer::Lexer;

use crate::regexp::{RegExp, Symbol};
use lexer::{Operator, Token};

pub trait Parsable: Sized {
	fn parse<L: Iterator<Item = lexer::Result<Loc<lexer::Token>>>>(
		lexer: &mut Peekable<L>,
	) -> Result<Loc<Self>>;
}

fn consume<L: Iterator<Item = lexer::Result<Loc<lexer::Token>>>>(
	lexer: &mut Peekable<L>,
	span: &mut Span,
) -> Result<Option<Loc<lexer::Token>>> {
	match lexer.next() {
		Some(Ok(token)) => {
			if span.is_empty() {
				*span = token.span();
			} else {
				span.append(token.span());
			}
			Ok(Some(token))
		}
		Some(Err(e)) => Err(e.inner_into()),
		None => Ok(None),
	}
}

/// Entry of the operator stack.
enum StackEntry {
	Operator(Operator),
	/// A `(` marker, recording the operand stack depth at its opening.
	Group(usize),
}

/// Operand stack depth below which the pending operators may not reach.
fn floor(operators: &[Loc<StackEntry>]) -> usize {
	operators
		.iter()
		.rev()
		.find_map(|entry| match entry.as_ref() {
			StackEntry::Group(depth) => Some(*depth),
			_ => None,
		})
		.unwrap_or(0)
}

fn pop_operand(
	operands: &mut Vec<Loc<RegExp<Symbol>>>,
	floor: usize,
	op: Operator,
	span: Span,
) -> Result<Loc<RegExp<Symbol>>> {
	if operands.len() <= floor {
		Err(Loc::new(Error::MissingOperand(op), span))
	} else {
		Ok(operands.pop().unwrap())
	}
}

/// Applies an operator popped from the stack to the operand stack.
fn apply(operands: &mut Vec<Loc<RegExp<Symbol>>>, op: Loc<Operator>, floor: usize) -> Result<()> {
	let (op, op_span) = op.into_raw_parts();
	match op {
		Operator::Star => {
			let arg = pop_operand(operands, floor, op, op_span)?;
			let span = arg.span().union(op_span);
			operands.push(Loc::new(RegExp::Star(Box::new(arg.into_inner())), span));
		}
		Operator::Concat | Operator::Or => {
			let right = pop_operand(operands, floor, op, op_span)?;
			let left = pop_operand(operands, floor, op, op_span)?;
			let span = left.span().union(right.span());
			let exp = match op {
				Operator::Concat => {
					RegExp::Concat(Box::new(left.into_inner()), Box::new(right.into_inner()))
				}
				Operator::Or => {
					RegExp::Or(Box::new(left.into_inner()), Box::new(right.into_inner()))
				}
				Operator::Star => unreachable!(),
			};
			operands.push(Loc::new(exp, span));
		}
	}

	Ok(())
}

impl Parsable for RegExp<Symbol> {
	fn parse<L: Iterator<Item = lexer::Result<Loc<lexer::Token>>>>(
		lexer: &mut Peekable<L>,
	) -> Result<Loc<Self>> {
		let mut span = Span::default();
		let mut operators: Vec<Loc<StackEntry>> = Vec::new();
		let mut operands: Vec<Loc<RegExp<Symbol>>> = Vec::new();

		while let Some(token) = consume(lexer, &mut span)? {
			let token_span = token.span();
			match token.into_inner() {
				Token::Terminal(name) => {
					operands.push(Loc::new(RegExp::Terminal(Symbol::new(name)), token_span));
				}
				Token::Begin => {
					operators.push(Loc::new(StackEntry::Group(operands.len()), token_span));
				}
				Token::End => loop {
					match operators.pop() {
						Some(entry) => {
							let (entry, entry_span) = entry.into_raw_parts();
							match entry {
								StackEntry::Group(depth) => {
									let group_span = entry_span.union(token_span);
									if operands.len() == depth {
										return Err(Loc::new(Error::EmptyGroup, group_span));
									}
									if operands.len() != depth + 1 {
										return Err(Loc::new(Error::DanglingOperand, group_span));
									}
									break;
								}
								StackEntry::Operator(op) => {
									apply(
										&mut operands,
										Loc::new(op, entry_span),
										floor(&operators),
									)?;
								}
							}
						}
						None => return Err(Loc::new(Error::UnmatchedCloser, token_span)),
					}
				},
				Token::Operator(op) => {
					loop {
						let reducible = match operators.last() {
							Some(top) => match top.as_ref() {
								StackEntry::Operator(t) => t.precedence() >= op.precedence(),
								StackEntry::Group(_) => false,
							},
							None => false,
						};

						if !reducible {
							break;
						}

						let top = operators.pop().unwrap();
						let (top, top_span) = top.into_raw_parts();
						match top {
							StackEntry::Operator(t) => {
								apply(&mut operands, Loc::new(t, top_span), floor(&operators))?;
							}
							StackEntry::Group(_) => unreachable!(),
						}
					}

					operators.push(Loc::new(StackEntry::Operator(op), token_span));
				}
			}
		}

		while let Some(entry) = operators.pop() {
			let (entry, entry_span) = entry.into_raw_parts();
			match entry {
				StackEntry::Group(_) => return Err(Loc::new(Error::UnmatchedOpener, entry_span)),
				StackEntry::Operator(op) => {
					apply(&mut operands, Loc::new(op, entry_span), floor(&operators))?;
				}
			}
		}

		match operands.len() {
			0 => Err(Loc::new(Error::EmptyExpression, span)),
			1 => Ok(operands.pop().unwrap()),
			_ => Err(Loc::new(Error::DanglingOperand, span)),
		}
	}
}
