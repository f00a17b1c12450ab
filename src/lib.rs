extern crate source_span;

pub mod analysis;
pub mod automaton;
pub mod regexp;
pub mod syntax;

pub use analysis::Analysis;
pub use automaton::{Automaton, State};
pub use regexp::{Leaf, Position, RegExp, Symbol};

use source_span::Loc;

/// Builds the deterministic position automaton of the given expression.
///
/// The expression uses `.` (concatenation), `|` (alternation),
/// `*` (postfix repetition), parentheses,
/// and terminal symbols matching `letter+ digit*`.
/// Concatenation must be explicit between adjacent operands.
///
/// The whole pipeline is synchronous and runs to completion
/// or reports a terminal error; nothing is shared across calls.
pub fn build_automaton(expr: &str) -> Result<Automaton, Loc<syntax::Error>> {
	use syntax::Parsable;

	let metrics = source_span::DefaultMetrics::with_tab_stop(4);
	let mut lexer = syntax::Lexer::new(expr.chars().map(|c| Ok(c)), metrics).peekable();

	let exp = RegExp::parse(&mut lexer)?;
	let (exp, leaf_count) = exp.into_inner().index();
	let analysis = Analysis::new(&exp, leaf_count);

	Ok(Automaton::new(&analysis))
}
