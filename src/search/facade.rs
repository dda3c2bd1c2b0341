//! The public search entry point (§4.8): picks a driver, runs it per query, and assembles hits.

use log::debug;
use std::collections::HashSet;

use super::{precomputed, scheme, trivial};
use crate::bidirectional_cursor::BidirectionalCursor;
use crate::config::{Mode, OutputKind, SearchConfig};
use crate::csa::IndexStorage;
use crate::index::BidirectionalIndex;
use crate::search::trivial::EditBudget;

/// The result of searching a single query.
pub enum QueryResult<'a, I> {
    Positions(Vec<usize>),
    Cursors(Vec<BidirectionalCursor<'a, I>>),
}

impl<'a, I> QueryResult<'a, I> {
    pub fn positions(&self) -> &[usize] {
        match self {
            QueryResult::Positions(p) => p,
            QueryResult::Cursors(_) => panic!("this query was run with OutputKind::Cursors"),
        }
    }
}

/// Searches every query in `queries` against `index` according to `config`.
pub fn search<'a, I: IndexStorage, T: AsRef<[u8]>>(
    index: &'a BidirectionalIndex<I>,
    queries: &[T],
    config: &SearchConfig,
) -> Vec<QueryResult<'a, I>> {
    queries
        .iter()
        .map(|q| search_one_query(index, q.as_ref(), config))
        .collect()
}

/// Streaming variant implementing the `on_hit` delegate option: invokes `on_hit` with each
/// distinct text position instead of collecting. Returns early if `on_hit` returns `true`.
pub fn search_with_on_hit<I: IndexStorage>(
    index: &BidirectionalIndex<I>,
    query: &[u8],
    config: &SearchConfig,
    mut on_hit: impl FnMut(usize) -> bool,
) {
    let hits = run_best_effort(index, query, config, true);

    let mut seen = HashSet::new();
    for cursor in &hits {
        for position in cursor.locate() {
            if seen.insert(position) && on_hit(position) {
                return;
            }
        }
    }
}

fn search_one_query<'a, I: IndexStorage>(
    index: &'a BidirectionalIndex<I>,
    query: &[u8],
    config: &SearchConfig,
) -> QueryResult<'a, I> {
    let hits = run_best_effort(index, query, config, false);

    match config.output {
        OutputKind::Positions => {
            let mut positions: Vec<usize> = hits.iter().flat_map(|c| c.locate()).collect();
            positions.sort_unstable();
            positions.dedup();
            QueryResult::Positions(positions)
        }
        OutputKind::Cursors => {
            let mut seen = HashSet::new();
            let cursors = hits.into_iter().filter(|c| seen.insert(c.dedup_key())).collect();
            QueryResult::Cursors(cursors)
        }
    }
}

fn run_best_effort<'a, I: IndexStorage>(
    index: &'a BidirectionalIndex<I>,
    query: &[u8],
    config: &SearchConfig,
    abort_on_hit: bool,
) -> Vec<BidirectionalCursor<'a, I>> {
    let max_budget = config.budget_for_query_len(query.len());

    match config.mode {
        Mode::All => collect(index, query, max_budget, abort_on_hit),
        Mode::Best => {
            for total in 0..=max_budget.total {
                let hits = collect(index, query, scaled_budget(&max_budget, total), abort_on_hit);
                if !hits.is_empty() {
                    return hits.into_iter().take(1).collect();
                }
            }
            Vec::new()
        }
        Mode::AllBest => {
            for total in 0..=max_budget.total {
                let hits = collect(index, query, scaled_budget(&max_budget, total), abort_on_hit);
                if !hits.is_empty() {
                    return hits;
                }
            }
            Vec::new()
        }
        Mode::Strata(s) => {
            let mut best_total = None;
            for total in 0..=max_budget.total {
                if !collect(index, query, scaled_budget(&max_budget, total), true).is_empty() {
                    best_total = Some(total);
                    break;
                }
            }

            match best_total {
                Some(best) => collect(index, query, scaled_budget(&max_budget, (best + s).min(max_budget.total)), abort_on_hit),
                None => Vec::new(),
            }
        }
    }
}

fn scaled_budget(max_budget: &EditBudget, total: usize) -> EditBudget {
    EditBudget {
        total,
        substitution: total.min(max_budget.substitution),
        insertion: total.min(max_budget.insertion),
        deletion: total.min(max_budget.deletion),
    }
}

fn collect<'a, I: IndexStorage>(
    index: &'a BidirectionalIndex<I>,
    query: &[u8],
    budget: EditBudget,
    abort_on_hit: bool,
) -> Vec<BidirectionalCursor<'a, I>> {
    let mut hits = Vec::new();

    if budget.insertion == 0 && budget.deletion == 0 {
        debug!("dispatching substitution-only budget (total={}) to the scheme driver", budget.total);
        let search_scheme = precomputed::scheme_for(0, budget.total);
        scheme::search_scheme(
            || index.root(),
            query,
            &search_scheme,
            abort_on_hit,
            &mut |c| {
                hits.push(*c);
                abort_on_hit
            },
        );
    } else {
        debug!("dispatching mixed edit budget to the trivial driver");
        trivial::search(index.root(), query, budget, abort_on_hit, &mut |c| {
            hits.push(*c);
            abort_on_hit
        });
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet;
    use crate::config::FmIndexConfig;

    #[test]
    fn exact_multi_query_search() {
        let index: BidirectionalIndex<i32> = FmIndexConfig::new()
            .construct_bidirectional_index(b"ACGTACGT", alphabet::ascii_dna());

        let results = search(&index, &["ACGT", "GG", "CGTA"], &SearchConfig::new());

        let mut v0 = results[0].positions().to_vec();
        v0.sort_unstable();
        assert_eq!(v0, vec![0, 4]);
        assert!(results[1].positions().is_empty());
        assert_eq!(results[2].positions(), &[1]);
    }

    #[test]
    fn substitution_rate_search() {
        let index: BidirectionalIndex<i32> = FmIndexConfig::new()
            .construct_bidirectional_index(b"ACGTACGT", alphabet::ascii_dna());

        let config = SearchConfig::new().max_error_rate(0.25, 0.25, 0.0, 0.0);
        let results = search(&index, &["ACGT", "ACGGACG", "CGTC", "CGG"], &config);

        assert_eq!(results[0].positions(), &[0, 4]);
        assert_eq!(results[1].positions(), &[0]);
        assert_eq!(results[2].positions(), &[1]);
        assert!(results[3].positions().is_empty());
    }
}
