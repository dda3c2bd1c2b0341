//! Search schemes and the scheme-driven search (§4.6): pre-planned per-block error
//! distributions that let the driver avoid the redundant backtracking the trivial driver
//! performs when errors could occur anywhere in the query.
//!
//! The per-step recursion mirrors [`trivial`](super::trivial)'s `EditBudget`-driven backtracking:
//! the same four cases apply (segment done, exact segment, insertion, substitution/deletion
//! children), just walked one flattened block-step at a time instead of one query position at a
//! time, with an extra bound check whenever a step closes out a block.

use crate::bidirectional_cursor::{BidirectionalCursor, Direction};
use crate::csa::IndexStorage;
use crate::search::trivial::EditBudget;

/// One search within a [`SearchScheme`]: a block-visiting order `pi` (a permutation of block
/// indices `0..k`) plus, for each step of that order, the cumulative bound that must hold once
/// all blocks up to and including that step are matched: `lower`/`upper` bound the total error
/// count, `upper_insertion`/`upper_deletion` additionally cap how many of those errors may be
/// insertions/deletions specifically.
#[derive(Debug, Clone)]
pub struct Search {
    pub pi: Vec<usize>,
    pub lower: Vec<usize>,
    pub upper: Vec<usize>,
    pub upper_insertion: Vec<usize>,
    pub upper_deletion: Vec<usize>,
}

impl Search {
    /// Builds a substitution-only (Hamming) search: no block may spend an insertion or deletion.
    /// This is what the published optimal search schemes in [`precomputed`](super::precomputed)
    /// are tabulated for.
    pub fn new(pi: Vec<usize>, lower: Vec<usize>, upper: Vec<usize>) -> Self {
        let upper_insertion = vec![0; pi.len()];
        let upper_deletion = vec![0; pi.len()];
        Self::with_edit_bounds(pi, lower, upper, upper_insertion, upper_deletion)
    }

    /// Builds a search with independent per-block caps on insertions and deletions, for schemes
    /// that need full edit distance rather than Hamming distance.
    pub fn with_edit_bounds(
        pi: Vec<usize>,
        lower: Vec<usize>,
        upper: Vec<usize>,
        upper_insertion: Vec<usize>,
        upper_deletion: Vec<usize>,
    ) -> Self {
        assert_eq!(pi.len(), lower.len());
        assert_eq!(pi.len(), upper.len());
        assert_eq!(pi.len(), upper_insertion.len());
        assert_eq!(pi.len(), upper_deletion.len());
        Self {
            pi,
            lower,
            upper,
            upper_insertion,
            upper_deletion,
        }
    }
}

/// A set of [`Search`]es whose admissible error distributions together cover every distribution
/// with `total_errors <= max_errors`.
#[derive(Debug, Clone)]
pub struct SearchScheme {
    pub searches: Vec<Search>,
}

/// The cumulative bound that must hold once a block closes.
#[derive(Debug, Clone, Copy)]
struct BlockBound {
    lower: usize,
    upper: usize,
    upper_insertion: usize,
    upper_deletion: usize,
}

/// A single step of the flattened, per-query-position traversal order implied by a block
/// partition, a permutation, and the query length.
struct Step {
    query_pos: usize,
    direction: Direction,
    /// `Some(bound)` when this step is the last position of its block.
    block_bound: Option<BlockBound>,
}

/// Splits `total_len` into `k` blocks, distributing the remainder across the first blocks, and
/// returns their `[start, end)` ranges in left-to-right query order.
pub(crate) fn block_ranges(total_len: usize, k: usize) -> Vec<(usize, usize)> {
    assert!(k > 0 && k <= total_len);

    let base = total_len / k;
    let remainder = total_len % k;

    let mut ranges = Vec::with_capacity(k);
    let mut pos = 0;

    for i in 0..k {
        let len = base + usize::from(i < remainder);
        ranges.push((pos, pos + len));
        pos += len;
    }

    ranges
}

fn flatten_steps(block_ranges: &[(usize, usize)], search: &Search) -> Vec<Step> {
    let mut steps = Vec::new();

    for (i, &block_idx) in search.pi.iter().enumerate() {
        let (start, end) = block_ranges[block_idx];

        let direction = if i == 0 {
            Direction::Right
        } else {
            let prev_block_idx = search.pi[i - 1];
            if block_idx > prev_block_idx {
                Direction::Right
            } else {
                Direction::Left
            }
        };

        let positions: Vec<usize> = match direction {
            Direction::Right => (start..end).collect(),
            Direction::Left => (start..end).rev().collect(),
        };

        let bound = BlockBound {
            lower: search.lower[i],
            upper: search.upper[i],
            upper_insertion: search.upper_insertion[i],
            upper_deletion: search.upper_deletion[i],
        };

        for (j, pos) in positions.iter().enumerate() {
            steps.push(Step {
                query_pos: *pos,
                direction,
                block_bound: if j + 1 == positions.len() { Some(bound) } else { None },
            });
        }
    }

    steps
}

fn try_extend<I: IndexStorage>(cursor: &mut BidirectionalCursor<'_, I>, direction: Direction, symbol: u8) -> bool {
    match direction {
        Direction::Right => cursor.extend_right_symbol(symbol),
        Direction::Left => cursor.extend_left_symbol(symbol),
    }
}

fn try_extend_any<I: IndexStorage>(cursor: &mut BidirectionalCursor<'_, I>, direction: Direction) -> bool {
    match direction {
        Direction::Right => cursor.extend_right(),
        Direction::Left => cursor.extend_left(),
    }
}

fn try_cycle<I: IndexStorage>(cursor: &mut BidirectionalCursor<'_, I>, direction: Direction) -> bool {
    match direction {
        Direction::Right => cursor.cycle_back(),
        Direction::Left => cursor.cycle_front(),
    }
}

/// Runs a single [`Search`] over `query`, invoking `on_hit` for every match within its error
/// bounds. Returns whether `on_hit` ever returned `true` (only meaningful when `abort_on_hit`).
pub(crate) fn search_one<I: IndexStorage>(
    cursor: BidirectionalCursor<'_, I>,
    query: &[u8],
    block_ranges: &[(usize, usize)],
    search: &Search,
    abort_on_hit: bool,
    on_hit: &mut impl FnMut(&BidirectionalCursor<'_, I>) -> bool,
) -> bool {
    let steps = flatten_steps(block_ranges, search);

    let total = search.upper.last().copied().unwrap_or(0);
    let budget = EditBudget {
        total,
        substitution: total,
        insertion: search.upper_insertion.last().copied().unwrap_or(0),
        deletion: search.upper_deletion.last().copied().unwrap_or(0),
    };

    recurse(cursor, query, &steps, 0, budget, budget, true, true, abort_on_hit, on_hit)
}

/// `budget` is the remaining allowance along this path; `initial` is the fixed starting
/// allowance, kept around so `block_bound_satisfied` can recover how much has been spent so far
/// (`initial.x - budget.x`) without threading a separate running total.
#[allow(clippy::too_many_arguments)]
fn recurse<I: IndexStorage>(
    cursor: BidirectionalCursor<'_, I>,
    query: &[u8],
    steps: &[Step],
    step_idx: usize,
    budget: EditBudget,
    initial: EditBudget,
    allow_ins: bool,
    allow_del: bool,
    abort_on_hit: bool,
    on_hit: &mut impl FnMut(&BidirectionalCursor<'_, I>) -> bool,
) -> bool {
    // Done: every step of every block has been consumed.
    if step_idx == steps.len() {
        return on_hit(&cursor);
    }

    let step = &steps[step_idx];
    let mut found = false;

    // Insertion: the query symbol at this step is treated as absent from the text, so the step
    // is consumed without extending the cursor.
    if budget.total > 0 && budget.insertion > 0 && allow_ins {
        let mut b = budget;
        b.total -= 1;
        b.insertion -= 1;

        if block_bound_satisfied(step, &initial, &b) {
            if recurse(cursor, query, steps, step_idx + 1, b, initial, true, false, abort_on_hit, on_hit) {
                found = true;
                if abort_on_hit {
                    return true;
                }
            }
        }
    }

    if budget.total > 0 && (budget.substitution > 0 || budget.deletion > 0) {
        // Children(substitution/deletion): enumerate sibling edges; each one either consumes this
        // step (substitution, possibly free if it matches) or is treated as extra text consumed
        // by a deletion, in which case the step itself is not yet consumed.
        let expected = query[step.query_pos];
        let mut sibling = cursor;
        let mut has_sibling = try_extend_any(&mut sibling, step.direction);

        while has_sibling {
            let observed = sibling.last_char();
            let delta = usize::from(observed != expected);

            if delta == 0 || budget.substitution > 0 {
                let mut b = budget;
                b.total -= delta;
                b.substitution -= delta;

                if block_bound_satisfied(step, &initial, &b) {
                    if recurse(sibling, query, steps, step_idx + 1, b, initial, true, true, abort_on_hit, on_hit) {
                        found = true;
                        if abort_on_hit {
                            return true;
                        }
                    }
                }
            }

            if budget.deletion > 0 && allow_del {
                let mut b = budget;
                b.total -= 1;
                b.deletion -= 1;

                // Stays at `step_idx`: a deletion consumes a text symbol but not a query symbol,
                // so this step's query position still needs to be matched.
                if recurse(sibling, query, steps, step_idx, b, initial, false, true, abort_on_hit, on_hit) {
                    found = true;
                    if abort_on_hit {
                        return true;
                    }
                }
            }

            has_sibling = try_cycle(&mut sibling, step.direction);
        }
    } else {
        // Exact segment: no substitution or deletion budget remains, so only an exact match of
        // the expected symbol can possibly lead to a hit.
        let expected = query[step.query_pos];
        let mut c = cursor;
        if try_extend(&mut c, step.direction, expected) && block_bound_satisfied(step, &initial, &budget) {
            found = recurse(c, query, steps, step_idx + 1, budget, initial, allow_ins, allow_del, abort_on_hit, on_hit);
        }
    }

    found
}

fn block_bound_satisfied(step: &Step, initial: &EditBudget, budget: &EditBudget) -> bool {
    match &step.block_bound {
        Some(bound) => {
            let spent_total = initial.total - budget.total;
            let spent_insertion = initial.insertion - budget.insertion;
            let spent_deletion = initial.deletion - budget.deletion;

            spent_total >= bound.lower
                && spent_total <= bound.upper
                && spent_insertion <= bound.upper_insertion
                && spent_deletion <= bound.upper_deletion
        }
        None => true,
    }
}

/// Runs every search in `scheme` over `query`, invoking `on_hit` for every distinct match.
pub(crate) fn search_scheme<I: IndexStorage>(
    root: impl Fn() -> BidirectionalCursor<'_, I>,
    query: &[u8],
    scheme: &SearchScheme,
    abort_on_hit: bool,
    on_hit: &mut impl FnMut(&BidirectionalCursor<'_, I>) -> bool,
) -> bool {
    let k = scheme
        .searches
        .first()
        .map(|s| s.pi.len())
        .unwrap_or(1);

    let block_ranges = block_ranges(query.len(), k);

    for search in &scheme.searches {
        if search_one(root(), query, &block_ranges, search, abort_on_hit, on_hit) && abort_on_hit {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet;
    use crate::index::BidirectionalIndex;
    use std::collections::HashSet;

    #[test]
    fn block_ranges_distribute_remainder_to_first_blocks() {
        assert_eq!(block_ranges(10, 3), vec![(0, 4), (4, 7), (7, 10)]);
        assert_eq!(block_ranges(9, 3), vec![(0, 3), (3, 6), (6, 9)]);
    }

    #[test]
    fn hamming_search_rejects_indel_even_with_total_budget() {
        // A single-block Hamming search (upper_insertion/upper_deletion both 0) must not find a
        // match that only exists via an indel, even though `upper` alone has room for one error.
        let alphabet = alphabet::ascii_dna();
        let index: BidirectionalIndex<i32> = BidirectionalIndex::new(b"ACGTACGT", alphabet, 1);

        let block_ranges = block_ranges(5, 1);
        let search = Search::new(vec![0], vec![0], vec![1]);

        let mut hits = HashSet::new();
        search_one(index.root(), b"ACGAT", &block_ranges, &search, false, &mut |c| {
            hits.extend(c.locate());
            false
        });

        assert!(hits.is_empty(), "Hamming-bounded search must not accept an indel-only match");
    }

    #[test]
    fn edit_bound_search_finds_insertion_match() {
        // "ACGAT" against "ACGT" at position 0 is reachable with exactly one insertion (the
        // extra 'A' before the final 'T'), but with zero substitutions.
        let alphabet = alphabet::ascii_dna();
        let index: BidirectionalIndex<i32> = BidirectionalIndex::new(b"ACGTACGT", alphabet, 1);

        let block_ranges = block_ranges(5, 1);
        let search = Search::with_edit_bounds(vec![0], vec![0], vec![1], vec![1], vec![0]);

        let mut hits = HashSet::new();
        search_one(index.root(), b"ACGAT", &block_ranges, &search, false, &mut |c| {
            hits.extend(c.locate());
            false
        });

        assert_eq!(hits, HashSet::from([0]));
    }

    #[test]
    fn edit_bound_search_finds_deletion_match() {
        // "ACT" against "ACGT" at position 0 is reachable with exactly one deletion (the missing
        // 'G'), but with zero substitutions.
        let alphabet = alphabet::ascii_dna();
        let index: BidirectionalIndex<i32> = BidirectionalIndex::new(b"ACGTACGT", alphabet, 1);

        let block_ranges = block_ranges(3, 1);
        let search = Search::with_edit_bounds(vec![0], vec![0], vec![1], vec![0], vec![1]);

        let mut hits = HashSet::new();
        search_one(index.root(), b"ACT", &block_ranges, &search, false, &mut |c| {
            hits.extend(c.locate());
            false
        });

        assert_eq!(hits, HashSet::from([0]));
    }
}
