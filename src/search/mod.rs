//! Search primitives, drivers, and the public facade.
//!
//! `backward_search` (used by the unidirectional cursor) lives on [`Csa`](crate::csa::Csa)
//! directly. The two primitives below extend a *pair* of synchronized SA intervals (one over
//! `T`, one over `T^R`) and are the basis of [`BidirectionalCursor`](crate::bidirectional_cursor::BidirectionalCursor).

pub mod facade;
pub mod precomputed;
pub mod scheme;
pub mod trivial;

#[doc(inline)]
pub use facade::{QueryResult, search, search_with_on_hit};

use crate::csa::{Csa, IndexStorage};

/// Extends a matched pair of intervals by prepending `compact` on the `primary` side,
/// synchronizing `mirror` to match. `primary`/`mirror` are inclusive `(lb, rb)` pairs.
///
/// Returns `None` if `compact` does not extend the match (the new interval would be empty).
pub(crate) fn bidirectional_search<I: IndexStorage>(
    primary_csa: &Csa<I>,
    primary: (usize, usize),
    mirror: (usize, usize),
    compact: u8,
) -> Option<((usize, usize), (usize, usize))> {
    if compact == 0 || compact as usize >= primary_csa.sigma() {
        return None;
    }

    let (l, r) = primary;
    let c_begin = primary_csa.count(compact);
    let rank_l = primary_csa.bwt_rank(l, compact);
    let (count_c, less, greater) = primary_csa.wavelet_lex_count(l, r + 1, compact);

    if count_c == 0 {
        return None;
    }

    let new_primary_l = c_begin + rank_l;
    let new_primary_r = new_primary_l + count_c - 1;

    let (m_l, m_r) = mirror;
    let new_mirror_l = m_l + less;
    let new_mirror_r = m_r - greater;

    debug_assert_eq!(
        new_primary_r - new_primary_l,
        new_mirror_r - new_mirror_l,
        "bidirectional_search must preserve interval count on both sides"
    );

    Some(((new_primary_l, new_primary_r), (new_mirror_l, new_mirror_r)))
}

/// Like [`bidirectional_search`], but used when cycling to the next sibling edge from the same
/// parent: the mirror interval is placed immediately after the *current* mirror interval rather
/// than inside it (see the design document's Open Questions on the `+1`/`-1` derivation).
pub(crate) fn bidirectional_cycle<I: IndexStorage>(
    primary_csa: &Csa<I>,
    parent_primary: (usize, usize),
    current_mirror: (usize, usize),
    compact: u8,
) -> Option<((usize, usize), (usize, usize))> {
    if compact == 0 || compact as usize >= primary_csa.sigma() {
        return None;
    }

    let (l, r) = parent_primary;
    let c_begin = primary_csa.count(compact);
    let rank_l = primary_csa.bwt_rank(l, compact);
    let (count_c, _less, _greater) = primary_csa.wavelet_lex_count(l, r + 1, compact);

    if count_c == 0 {
        return None;
    }

    let new_primary_l = c_begin + rank_l;
    let new_primary_r = new_primary_l + count_c - 1;

    let (_m_l, m_r) = current_mirror;
    let new_mirror_l = m_r + 1;
    let new_mirror_r = new_mirror_l + count_c - 1;

    Some(((new_primary_l, new_primary_r), (new_mirror_l, new_mirror_r)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet;
    use crate::index::BidirectionalIndex;

    #[test]
    fn bidirectional_search_preserves_interval_count() {
        let alphabet = alphabet::ascii_dna();
        let index: BidirectionalIndex<i32> = BidirectionalIndex::new(b"GAATTAATGAAC", alphabet, 2);

        let mut cursor = index.root();
        assert!(cursor.extend_right_symbol(b'A'));
        assert!(cursor.extend_right_symbol(b'A'));
        assert!(cursor.extend_right_symbol(b'C'));

        assert_eq!(cursor.query(), b"AAC");
    }

    /// Scenario 6: for random text and short queries, the precomputed scheme driver and the
    /// trivial backtracking driver must agree on the set of hit positions for a substitution-only
    /// budget (the only budget shape the precomputed table covers; see
    /// [`scheme`](super::scheme)'s own tests for the driver's insertion/deletion handling).
    #[test]
    fn scheme_and_trivial_driver_agree_on_random_text() {
        use rand::Rng;
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;
        use std::collections::BTreeSet;

        fn random_dna_text(rng: &mut ChaCha8Rng, len: usize) -> Vec<u8> {
            const SYMBOLS: [u8; 4] = *b"ACGT";
            (0..len).map(|_| SYMBOLS[rng.random_range(0..4)]).collect()
        }

        fn scheme_hits(index: &BidirectionalIndex<i32>, query: &[u8], max_errors: usize) -> BTreeSet<usize> {
            let mut hits = BTreeSet::new();
            let search_scheme = precomputed::scheme_for(0, max_errors);
            scheme::search_scheme(|| index.root(), query, &search_scheme, false, &mut |cursor| {
                hits.extend(cursor.locate());
                false
            });
            hits
        }

        fn trivial_hits(index: &BidirectionalIndex<i32>, query: &[u8], max_errors: usize) -> BTreeSet<usize> {
            let mut hits = BTreeSet::new();
            trivial::search(index.root(), query, trivial::EditBudget::hamming(max_errors), false, &mut |cursor| {
                hits.extend(cursor.locate());
                false
            });
            hits
        }

        let mut rng = ChaCha8Rng::seed_from_u64(0x5EED);
        let text = random_dna_text(&mut rng, 100);

        let index: BidirectionalIndex<i32> = BidirectionalIndex::new(&text, alphabet::ascii_dna(), 3);

        for _ in 0..64 {
            let query = random_dna_text(&mut rng, 5);

            let scheme_result = scheme_hits(&index, &query, 2);
            let trivial_result = trivial_hits(&index, &query, 2);

            assert_eq!(
                scheme_result,
                trivial_result,
                "mismatch for query {:?}",
                String::from_utf8_lossy(&query)
            );
        }
    }
}
