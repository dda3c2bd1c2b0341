//! The trivial approximate-search driver (§4.5): recursive backtracking over a bidirectional
//! cursor, walking the query left-to-right while always extending the cursor to the right.
//!
//! Which edit kinds are enabled, and how many of each remain, is carried as a runtime
//! [`EditBudget`] rather than compile-time booleans, so that this driver interoperates with the
//! search-scheme driver in [`scheme`](super::scheme), which needs to split and hand out budgets
//! dynamically per block.

use crate::bidirectional_cursor::BidirectionalCursor;
use crate::csa::IndexStorage;

/// Remaining error allowance, split by edit kind. `total` is always `<= substitution + insertion
/// + deletion`; it is the number actually spendable along any one path, independent of which
/// kinds are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditBudget {
    pub total: usize,
    pub substitution: usize,
    pub insertion: usize,
    pub deletion: usize,
}

impl EditBudget {
    pub fn exact() -> Self {
        Self {
            total: 0,
            substitution: 0,
            insertion: 0,
            deletion: 0,
        }
    }

    pub fn hamming(max_errors: usize) -> Self {
        Self {
            total: max_errors,
            substitution: max_errors,
            insertion: 0,
            deletion: 0,
        }
    }

    pub fn edit(max_errors: usize) -> Self {
        Self {
            total: max_errors,
            substitution: max_errors,
            insertion: max_errors,
            deletion: max_errors,
        }
    }
}

/// Runs the trivial driver over `query`, invoking `on_hit` for every cursor at which the query
/// matches within `budget`. If `abort_on_hit` is set, the first truthy return from `on_hit`
/// short-circuits the whole recursion; the return value reports whether that happened.
pub(crate) fn search<I: IndexStorage>(
    cursor: BidirectionalCursor<'_, I>,
    query: &[u8],
    budget: EditBudget,
    abort_on_hit: bool,
    on_hit: &mut impl FnMut(&BidirectionalCursor<'_, I>) -> bool,
) -> bool {
    recurse(cursor, query, 0, budget, true, true, abort_on_hit, on_hit)
}

#[allow(clippy::too_many_arguments)]
fn recurse<I: IndexStorage>(
    cursor: BidirectionalCursor<'_, I>,
    query: &[u8],
    q: usize,
    budget: EditBudget,
    allow_ins: bool,
    allow_del: bool,
    abort_on_hit: bool,
    on_hit: &mut impl FnMut(&BidirectionalCursor<'_, I>) -> bool,
) -> bool {
    if q == query.len() || budget.total == 0 {
        let mut c = cursor;
        if c.extend_right_seq(query[q..].iter().copied()) {
            return on_hit(&c);
        }
        return false;
    }

    let mut found = false;

    if budget.insertion > 0 && allow_ins {
        let mut b = budget;
        b.total -= 1;
        b.insertion -= 1;

        if recurse(cursor, query, q + 1, b, true, false, abort_on_hit, on_hit) {
            found = true;
            if abort_on_hit {
                return true;
            }
        }
    }

    if budget.substitution > 0 || budget.deletion > 0 {
        let mut sibling = cursor;
        let mut has_sibling = sibling.extend_right();

        while has_sibling {
            let observed = sibling.last_char();
            let delta = usize::from(observed != query[q]);

            if delta == 0 || budget.substitution > 0 {
                let mut b = budget;
                b.total -= delta;
                b.substitution -= delta;

                if recurse(sibling, query, q + 1, b, true, true, abort_on_hit, on_hit) {
                    found = true;
                    if abort_on_hit {
                        return true;
                    }
                }
            }

            if budget.deletion > 0 && allow_del {
                let mut b = budget;
                b.total -= 1;
                b.deletion -= 1;

                if recurse(sibling, query, q, b, false, true, abort_on_hit, on_hit) {
                    found = true;
                    if abort_on_hit {
                        return true;
                    }
                }
            }

            has_sibling = sibling.cycle_back();
        }
    } else {
        let mut c = cursor;
        if c.extend_right_symbol(query[q]) && recurse(c, query, q + 1, budget, allow_ins, allow_del, abort_on_hit, on_hit) {
            found = true;
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet;
    use crate::index::BidirectionalIndex;
    use std::collections::HashSet;

    #[test]
    fn exact_search_finds_repeated_hit() {
        let alphabet = alphabet::ascii_dna();
        let index: BidirectionalIndex<i32> = BidirectionalIndex::new(b"ACGTACGT", alphabet, 1);

        let mut hits = HashSet::new();
        search(index.root(), b"ACGT", EditBudget::exact(), false, &mut |c| {
            hits.extend(c.locate());
            false
        });

        assert_eq!(hits, HashSet::from([0, 4]));
    }

    #[test]
    fn one_substitution_finds_expected_hit() {
        let alphabet = alphabet::ascii_dna();
        let index: BidirectionalIndex<i32> = BidirectionalIndex::new(b"ACGTACGT", alphabet, 1);

        let mut hits = HashSet::new();
        search(index.root(), b"ACGGACG", EditBudget::hamming(1), false, &mut |c| {
            hits.extend(c.locate());
            false
        });

        assert_eq!(hits, HashSet::from([0]));
    }
}
