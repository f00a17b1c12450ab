use btree_slab::BTreeSet;
use itertools::Itertools;
use std::collections::HashMap;
use std::fmt;

use crate::analysis::Analysis;
use crate::regexp::{Position, Symbol};

/// State of the deterministic position automaton:
/// the set of positions the automaton may currently be at.
///
/// States are identified by set value, not by discovery order.
pub type State = BTreeSet<Position>;

/// Deterministic position automaton.
///
/// States are stored in discovery order, the initial state first.
/// Which states are accepting is left to the caller:
/// each state exposes the positions it contains.
pub struct Automaton {
	/// Distinct symbols of the expression, in leaf order.
	alphabet: Vec<Symbol>,

	/// States in discovery order.
	states: Vec<State>,

	/// Transition of each state on each symbol of the alphabet.
	///
	/// `None` is an explicit absence of transition,
	/// recorded when no position of the state is labelled with the symbol
	/// or when the union of their follow sets is empty.
	transitions: Vec<Vec<Option<u32>>>,

	/// Symbol of each position, indexed by `position - 1`.
	leaves: Vec<Symbol>,
}

impl Automaton {
	/// Expands the reachable states of the automaton described by `analysis`.
	///
	/// The initial state is the first set of the root.
	/// Terminates since at most `2^N` distinct position sets exist
	/// and every discovered state is recorded by value, never revisited.
	pub fn new(analysis: &Analysis) -> Self {
		let alphabet = analysis.alphabet();
		let leaves: Vec<Symbol> = (1..=analysis.leaf_count())
			.map(|p| analysis.leaf_symbol(p).clone())
			.collect();

		let mut states: Vec<State> = Vec::new();
		let mut transitions: Vec<Vec<Option<u32>>> = Vec::new();
		let mut known: HashMap<State, u32> = HashMap::new();

		let initial: State = analysis.first().clone();
		log::debug!("state S0 = {{{}}}", initial.iter().format(","));
		known.insert(initial.clone(), 0);
		states.push(initial);

		let mut current = 0;
		while current < states.len() {
			let state = states[current].clone();
			let mut row = Vec::with_capacity(alphabet.len());

			for symbol in &alphabet {
				let mut next = State::new();
				for p in &state {
					if analysis.leaf_symbol(*p) == symbol {
						next.extend(analysis.follow(*p).iter().cloned());
					}
				}

				if next.is_empty() {
					row.push(None);
				} else {
					let target = match known.get(&next) {
						Some(i) => *i,
						None => {
							let i = states.len() as u32;
							log::debug!("state S{} = {{{}}}", i, next.iter().format(","));
							known.insert(next.clone(), i);
							states.push(next);
							i
						}
					};
					row.push(Some(target));
				}
			}

			transitions.push(row);
			current += 1;
		}

		log::debug!("position automaton is done, {} states", states.len());

		Self {
			alphabet,
			states,
			transitions,
			leaves,
		}
	}

	/// The initial state, equal to the first set of the root.
	pub fn initial_state(&self) -> &State {
		&self.states[0]
	}

	/// States in discovery order, the initial state first.
	pub fn states(&self) -> &[State] {
		&self.states
	}

	/// Distinct symbols of the expression, in leaf order.
	pub fn alphabet(&self) -> &[Symbol] {
		&self.alphabet
	}

	pub fn leaf_count(&self) -> u32 {
		self.leaves.len() as u32
	}

	/// Symbol labelling position `p`.
	pub fn leaf_symbol(&self, p: Position) -> &Symbol {
		&self.leaves[(p - 1) as usize]
	}

	fn symbol_index(&self, symbol: &Symbol) -> Option<usize> {
		self.alphabet.iter().position(|s| s == symbol)
	}

	/// Target state of the transition of state `q` on `symbol`, if any.
	pub fn transition(&self, q: u32, symbol: &Symbol) -> Option<u32> {
		let s = self.symbol_index(symbol)?;
		self.transitions[q as usize][s]
	}

	/// Transitions leaving state `q`, one entry per alphabet symbol.
	pub fn successors(&self, q: u32) -> Successors {
		Successors {
			alphabet: self.alphabet.iter(),
			row: self.transitions[q as usize].iter(),
		}
	}

	pub fn dot_write<W: std::io::Write>(&self, f: &mut W) -> std::io::Result<()> {
		writeln!(f, "digraph {{")?;

		for (i, state) in self.states.iter().enumerate() {
			writeln!(f, "\tS{} [ label=\"S{}={}\" ]", i, i, DisplayState(state))?
		}

		for (i, row) in self.transitions.iter().enumerate() {
			for (s, target) in row.iter().enumerate() {
				if let Some(j) = target {
					writeln!(f, "\tS{} -> S{} [ label=\"{}\" ]", i, j, self.alphabet[s])?
				}
			}
		}

		write!(f, "}}")
	}
}

pub struct Successors<'a> {
	alphabet: std::slice::Iter<'a, Symbol>,
	row: std::slice::Iter<'a, Option<u32>>,
}

impl<'a> Iterator for Successors<'a> {
	type Item = (&'a Symbol, Option<u32>);

	fn next(&mut self) -> Option<Self::Item> {
		match (self.alphabet.next(), self.row.next()) {
			(Some(symbol), Some(target)) => Some((symbol, *target)),
			_ => None,
		}
	}
}

/// Displays a state as its set of positions, `{1,2}`.
pub struct DisplayState<'a>(pub &'a State);

impl<'a> fmt::Display for DisplayState<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{{{}}}", self.0.iter().format(","))
	}
}
