use source_span::Loc;

use glushkov::{
	syntax::{self, Error, Parsable},
	RegExp, Symbol,
};

fn parse(input: &str) -> syntax::Result<Loc<RegExp<Symbol>>> {
	let metrics = source_span::DefaultMetrics::with_tab_stop(4);
	let mut lexer = syntax::Lexer::new(input.chars().map(|c| Ok(c)), metrics).peekable();
	RegExp::parse(&mut lexer)
}

fn parse_ok(input: &str) -> RegExp<Symbol> {
	match parse(input) {
		Ok(exp) => exp.into_inner(),
		Err(e) => panic!("`{}` failed to parse: {}", input, e),
	}
}

fn parse_err(input: &str) -> Error {
	match parse(input) {
		Ok(_) => panic!("`{}` parsed successfully", input),
		Err(e) => e.into_inner(),
	}
}

fn terminal(name: &str) -> RegExp<Symbol> {
	RegExp::Terminal(Symbol::new(name))
}

fn concat(l: RegExp<Symbol>, r: RegExp<Symbol>) -> RegExp<Symbol> {
	RegExp::Concat(Box::new(l), Box::new(r))
}

fn or(l: RegExp<Symbol>, r: RegExp<Symbol>) -> RegExp<Symbol> {
	RegExp::Or(Box::new(l), Box::new(r))
}

fn star(c: RegExp<Symbol>) -> RegExp<Symbol> {
	RegExp::Star(Box::new(c))
}

#[test]
fn concatenation() {
	assert_eq!(parse_ok("a1.b2"), concat(terminal("a1"), terminal("b2")));
}

#[test]
fn precedence() {
	assert_eq!(
		parse_ok("a1|b2.c3*"),
		or(
			terminal("a1"),
			concat(terminal("b2"), star(terminal("c3")))
		)
	);
}

#[test]
fn grouping() {
	assert_eq!(
		parse_ok("(a1|b2).c3"),
		concat(or(terminal("a1"), terminal("b2")), terminal("c3"))
	);
}

#[test]
fn left_associativity() {
	assert_eq!(
		parse_ok("a1|b2|c3"),
		or(or(terminal("a1"), terminal("b2")), terminal("c3"))
	);
}

#[test]
fn star_of_group() {
	assert_eq!(
		parse_ok("(a1.b2)*"),
		star(concat(terminal("a1"), terminal("b2")))
	);
}

#[test]
fn display_round_trip() {
	let exp = parse_ok("(a1|b2).c3*");
	assert_eq!(format!("{}", exp), "(a1|b2).c3*");
}

#[test]
fn dangling_star() {
	assert!(matches!(parse_err("a1.*"), Error::MissingOperand(_)));
}

#[test]
fn missing_alternation_operand() {
	assert!(matches!(parse_err("a1|"), Error::MissingOperand(_)));
}

#[test]
fn empty_expression() {
	assert!(matches!(parse_err(""), Error::EmptyExpression));
}

#[test]
fn unmatched_closer() {
	assert!(matches!(parse_err("a1)"), Error::UnmatchedCloser));
}

#[test]
fn unmatched_opener() {
	assert!(matches!(parse_err("(a1.b2"), Error::UnmatchedOpener));
}

#[test]
fn empty_group() {
	assert!(matches!(parse_err("()"), Error::EmptyGroup));
	assert!(matches!(parse_err("a1.()"), Error::EmptyGroup));
}

#[test]
fn implicit_concatenation_is_rejected() {
	assert!(matches!(parse_err("a1(b2)"), Error::DanglingOperand));
	assert!(matches!(parse_err("(a1 b2)"), Error::DanglingOperand));
}

#[test]
fn unexpected_character() {
	match parse_err("a1.$") {
		Error::Lexer(syntax::lexer::Error::Unexpected(c)) => assert_eq!(c, '$'),
		e => panic!("unexpected error: {}", e),
	}
}

#[test]
fn terminal_must_start_with_a_letter() {
	match parse_err("3a") {
		Error::Lexer(syntax::lexer::Error::Unexpected(c)) => assert_eq!(c, '3'),
		e => panic!("unexpected error: {}", e),
	}
}
