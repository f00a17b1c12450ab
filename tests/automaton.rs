#[macro_use]
extern crate lazy_static;

use glushkov::{
	build_automaton,
	syntax::{self, Parsable},
	Analysis, Automaton, Position, RegExp, State, Symbol,
};

/// Token rules of the sample grammar, one alternative per token,
/// each ending with its end-of-token marker terminal.
const TOKEN_EXPR: &str = "(a1.a1*).b2|(w2.a2.w2|m2.a2.m2).b3|(o1).c2|(v1.v2).c3\
|(v1).d1|(v2).d2|(v2.o1).d3|(v1.o1).e1|(v3).e2|(w1).e3|(q2.o3).f1|(s2).f2\
|(p1.r3.q3).f3|(q1.q2.q3).g1|(q3.r1.r2).g2|(r3.q2.s1).g3|(s3.s2).h1|(s2.t1).h2\
|(n3).h3|(u3).i1|(u1).i2|(u2).i3|(s3).j1|(t1).j2|(t2).j3|(t3).k1|(u3.u3).k2\
|(n1).k3|(n2).l1|(n1.o1).l2";

lazy_static! {
	static ref TOKEN_RULES: Automaton = match build_automaton(TOKEN_EXPR) {
		Ok(automaton) => automaton,
		Err(e) => panic!("token expression failed to build: {}", e),
	};
}

fn indexed(input: &str) -> (RegExp<glushkov::Leaf>, u32) {
	let metrics = source_span::DefaultMetrics::with_tab_stop(4);
	let mut lexer = syntax::Lexer::new(input.chars().map(|c| Ok(c)), metrics).peekable();
	match RegExp::parse(&mut lexer) {
		Ok(exp) => exp.into_inner().index(),
		Err(e) => panic!("`{}` failed to parse: {}", input, e),
	}
}

fn analyse(input: &str) -> Analysis {
	let (exp, leaf_count) = indexed(input);
	Analysis::new(&exp, leaf_count)
}

fn automaton(input: &str) -> Automaton {
	match build_automaton(input) {
		Ok(automaton) => automaton,
		Err(e) => panic!("`{}` failed to build: {}", input, e),
	}
}

fn set(positions: &[Position]) -> State {
	let mut set = State::new();
	for p in positions {
		set.insert(*p);
	}
	set
}

fn symbol(name: &str) -> Symbol {
	Symbol::new(name)
}

#[test]
fn leaves_are_numbered_left_to_right() {
	let (exp, leaf_count) = indexed("a1.(b2|c3)*.a1");
	assert_eq!(leaf_count, 4);

	let leaves = exp.leaves();
	let positions: Vec<Position> = leaves.iter().map(|leaf| leaf.position).collect();
	assert_eq!(positions, vec![1, 2, 3, 4]);

	let symbols: Vec<&str> = leaves.iter().map(|leaf| leaf.symbol.as_str()).collect();
	assert_eq!(symbols, vec!["a1", "b2", "c3", "a1"]);
}

#[test]
fn star_is_nullable_over_a_non_nullable_child() {
	let analysis = analyse("(a1.b2)*");
	assert!(!analyse("a1.b2").nullable());
	assert!(analysis.nullable());
	assert!(analysis.first() == &set(&[1]));
	assert!(analysis.last() == &set(&[2]));
}

#[test]
fn leaf_sets() {
	let analysis = analyse("a1");
	assert!(analysis.first() == &set(&[1]));
	assert!(analysis.last() == &set(&[1]));
	assert!(!analysis.nullable());
	assert!(analysis.follow(1).is_empty());
}

#[test]
fn follow_accumulation_is_order_independent() {
	// Swapping the alternation branches relabels the positions
	// but leaves the follow map untouched.
	for input in &["(a1|b2).c3", "(b2|a1).c3"] {
		let analysis = analyse(input);
		assert!(analysis.follow(1) == &set(&[3]));
		assert!(analysis.follow(2) == &set(&[3]));
		assert!(analysis.follow(3).is_empty());
	}
}

#[test]
fn simple_concatenation_scenario() {
	let analysis = analyse("a1.b2");
	assert!(analysis.first() == &set(&[1]));
	assert!(analysis.last() == &set(&[2]));
	assert!(analysis.follow(1) == &set(&[2]));
	assert!(analysis.follow(2).is_empty());

	let automaton = automaton("a1.b2");
	assert_eq!(automaton.states().len(), 2);
	assert!(automaton.states().len() <= 1usize << automaton.leaf_count());
	assert!(automaton.initial_state() == &set(&[1]));
	assert_eq!(automaton.transition(0, &symbol("a1")), Some(1));
	assert_eq!(automaton.transition(0, &symbol("b2")), None);
	assert!(automaton.states()[1] == set(&[2]));

	// The second state has no outgoing transition on any symbol.
	for (_symbol, target) in automaton.successors(1) {
		assert_eq!(target, None);
	}
}

#[test]
fn starred_head_scenario() {
	let analysis = analyse("a1*.b2");
	assert!(analysis.first() == &set(&[1, 2]));
	assert!(analysis.follow(1) == &set(&[1, 2]));
	assert!(analysis.follow(2).is_empty());

	let automaton = automaton("a1*.b2");
	assert!(automaton.initial_state() == &set(&[1, 2]));
	// The star self-loop maps the initial state back onto itself.
	assert_eq!(automaton.transition(0, &symbol("a1")), Some(0));
	assert_eq!(automaton.transition(0, &symbol("b2")), None);
	assert_eq!(automaton.states().len(), 1);
}

#[test]
fn alphabet_is_symbols_not_positions() {
	let automaton = automaton("a1.a1.b2");
	assert_eq!(automaton.leaf_count(), 3);
	assert_eq!(automaton.alphabet().len(), 2);
	assert_eq!(automaton.alphabet()[0], symbol("a1"));
	assert_eq!(automaton.alphabet()[1], symbol("b2"));
	assert_eq!(automaton.leaf_symbol(2), &symbol("a1"));
}

#[test]
fn malformed_expressions_never_yield_an_automaton() {
	assert!(build_automaton("a1.*").is_err());
	assert!(build_automaton("").is_err());
	// The empty group and the implicit concatenation of the legacy
	// sample rule are both rejected.
	assert!(build_automaton("(a3.(a3|a1)*b1.()).c1").is_err());
}

#[test]
fn token_rules_build() {
	// One leaf per alphabetic character in the sample: every terminal
	// is a single letter followed by a digit.
	let leaf_count = TOKEN_EXPR.chars().filter(|c| c.is_ascii_alphabetic()).count();
	assert_eq!(TOKEN_RULES.leaf_count() as usize, leaf_count);

	// The states are position sets, so there can never be more of
	// them than subsets of the positions.
	let state_count = TOKEN_RULES.states().len() as u128;
	assert!(state_count >= 1);
	assert!(state_count <= 1u128 << leaf_count);

	assert!(!TOKEN_RULES.initial_state().is_empty());

	// `a1` opens the first token rule: position 1 is in the initial
	// state and `Follow(1) = {2, 3}` (the inner `a1*` and the marker).
	assert_eq!(TOKEN_RULES.transition(0, &symbol("a1")), Some(1));
	assert!(TOKEN_RULES.states()[1].contains(&2));
}

#[test]
fn initial_state_matches_root_first_set() {
	let analysis = analyse(TOKEN_EXPR);
	assert!(TOKEN_RULES.initial_state() == analysis.first());
	assert!(!analysis.nullable());
}
