use btree_slab::BTreeSet;
use crate::regexp::{Leaf, Position, RegExp, Symbol};

/// First/Last/Nullable sets of a single node.
///
/// Discarded after the pass, except at the root.
struct NodeSets {
	first: BTreeSet<Position>,
	last: BTreeSet<Position>,
	nullable: bool,
}

/// Result of the First/Last/Nullable/Follow pass over a numbered tree.
///
/// Owns the follow map of the invocation that built it.
/// There is no shared state across invocations.
pub struct Analysis {
	first: BTreeSet<Position>,
	last: BTreeSet<Position>,
	nullable: bool,

	/// Follow set of each position, indexed by `position - 1`.
	follow: Vec<BTreeSet<Position>>,

	/// Symbol of each position, indexed by `position - 1`.
	leaves: Vec<Symbol>,
}

impl Analysis {
	/// Runs the pass over the given tree.
	///
	/// `leaf_count` is the count returned by `RegExp::index`.
	pub fn new(exp: &RegExp<Leaf>, leaf_count: u32) -> Self {
		let mut follow = vec![BTreeSet::new(); leaf_count as usize];
		let mut leaves = Vec::with_capacity(leaf_count as usize);

		let root = compute(exp, &mut follow, &mut leaves);

		log::debug!("follow sets computed for {} positions", leaf_count);

		Self {
			first: root.first,
			last: root.last,
			nullable: root.nullable,
			follow,
			leaves,
		}
	}

	/// Positions of the leaves that can begin a matched string.
	pub fn first(&self) -> &BTreeSet<Position> {
		&self.first
	}

	/// Positions of the leaves that can end a matched string.
	pub fn last(&self) -> &BTreeSet<Position> {
		&self.last
	}

	/// Whether the expression matches the empty string.
	pub fn nullable(&self) -> bool {
		self.nullable
	}

	/// Positions that can immediately succeed position `p` in a matched string.
	pub fn follow(&self, p: Position) -> &BTreeSet<Position> {
		&self.follow[(p - 1) as usize]
	}

	pub fn leaf_count(&self) -> u32 {
		self.leaves.len() as u32
	}

	/// Symbol labelling position `p`.
	pub fn leaf_symbol(&self, p: Position) -> &Symbol {
		&self.leaves[(p - 1) as usize]
	}

	/// Distinct symbols of the expression, in leaf order.
	pub fn alphabet(&self) -> Vec<Symbol> {
		let mut alphabet = Vec::new();

		for symbol in &self.leaves {
			if !alphabet.contains(symbol) {
				alphabet.push(symbol.clone());
			}
		}

		alphabet
	}
}

fn union(a: &BTreeSet<Position>, b: &BTreeSet<Position>) -> BTreeSet<Position> {
	let mut set = a.clone();
	set.extend(b.iter().cloned());
	set
}

/// Post-order pass: children are fully processed before their parent,
/// and the follow map only ever grows.
fn compute(
	exp: &RegExp<Leaf>,
	follow: &mut [BTreeSet<Position>],
	leaves: &mut Vec<Symbol>,
) -> NodeSets {
	match exp {
		RegExp::Terminal(leaf) => {
			debug_assert_eq!(leaf.position as usize, leaves.len() + 1);
			leaves.push(leaf.symbol.clone());

			let mut set = BTreeSet::new();
			set.insert(leaf.position);
			NodeSets {
				first: set.clone(),
				last: set,
				nullable: false,
			}
		}
		RegExp::Or(l, r) => {
			let l = compute(l, follow, leaves);
			let r = compute(r, follow, leaves);

			NodeSets {
				first: union(&l.first, &r.first),
				last: union(&l.last, &r.last),
				nullable: l.nullable || r.nullable,
			}
		}
		RegExp::Concat(l, r) => {
			let l = compute(l, follow, leaves);
			let r = compute(r, follow, leaves);

			for p in &l.last {
				follow[(*p - 1) as usize].extend(r.first.iter().cloned());
			}

			NodeSets {
				first: if l.nullable {
					union(&l.first, &r.first)
				} else {
					l.first
				},
				last: if r.nullable {
					union(&l.last, &r.last)
				} else {
					r.last
				},
				nullable: l.nullable && r.nullable,
			}
		}
		RegExp::Star(c) => {
			let c = compute(c, follow, leaves);

			for p in &c.last {
				follow[(*p - 1) as usize].extend(c.first.iter().cloned());
			}

			// A starred subtree always accepts the empty repetition,
			// regardless of the nullability of its child.
			NodeSets {
				first: c.first,
				last: c.last,
				nullable: true,
			}
		}
	}
}
