//! Builder-style configuration surfaces: [`FmIndexConfig`] at construction time and
//! [`SearchConfig`] at query time.

use crate::alphabet::Alphabet;
use crate::csa::IndexStorage;
use crate::index::{BidirectionalIndex, UnidirectionalIndex};
use crate::search::trivial::EditBudget;

/// A builder-like API to configure and construct an index.
#[derive(Clone, Copy)]
pub struct FmIndexConfig<I> {
    suffix_array_sampling_rate: usize,
    _marker: std::marker::PhantomData<I>,
}

impl<I: IndexStorage> FmIndexConfig<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The index internally stores a suffix array. Every entry at a position divisible by
    /// `suffix_array_sampling_rate` is retained. A larger rate uses less memory but makes
    /// `locate` slower. The default is `4`.
    pub fn suffix_array_sampling_rate(self, suffix_array_sampling_rate: usize) -> Self {
        assert!(suffix_array_sampling_rate > 0);

        Self {
            suffix_array_sampling_rate,
            ..self
        }
    }

    /// Constructs a unidirectional index, built over the reversal of `text`.
    pub fn construct_index(self, text: &[u8], alphabet: Alphabet) -> UnidirectionalIndex<I> {
        UnidirectionalIndex::new(text, alphabet, self.suffix_array_sampling_rate)
    }

    /// Constructs a bidirectional index over `text`.
    pub fn construct_bidirectional_index(self, text: &[u8], alphabet: Alphabet) -> BidirectionalIndex<I> {
        BidirectionalIndex::new(text, alphabet, self.suffix_array_sampling_rate)
    }
}

impl<I: IndexStorage> Default for FmIndexConfig<I> {
    fn default() -> Self {
        Self {
            suffix_array_sampling_rate: 4,
            _marker: std::marker::PhantomData,
        }
    }
}

/// Which matches the search facade should report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Every match within the error budget.
    #[default]
    All,
    /// A single match with the fewest errors.
    Best,
    /// Every match tying for the fewest errors.
    AllBest,
    /// Every match with up to `best + s` errors.
    Strata(usize),
}

/// What the search facade should hand back per match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputKind {
    #[default]
    Positions,
    Cursors,
}

/// Query-time configuration for [`search`](crate::search::facade::search).
#[derive(Clone)]
pub struct SearchConfig {
    pub(crate) max_error_total: usize,
    pub(crate) max_error_substitution: usize,
    pub(crate) max_error_insertion: usize,
    pub(crate) max_error_deletion: usize,
    pub(crate) max_error_rate_total: Option<f64>,
    pub(crate) max_error_rate_substitution: Option<f64>,
    pub(crate) max_error_rate_insertion: Option<f64>,
    pub(crate) max_error_rate_deletion: Option<f64>,
    pub(crate) mode: Mode,
    pub(crate) output: OutputKind,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an absolute error budget; unset edit kinds default to `0`.
    pub fn max_error(mut self, total: usize, substitution: usize, insertion: usize, deletion: usize) -> Self {
        self.max_error_total = total;
        self.max_error_substitution = substitution;
        self.max_error_insertion = insertion;
        self.max_error_deletion = deletion;
        self
    }

    /// Sets the error budget as four independent fractions of the query length, each resolved
    /// (floored) per query, mirroring [`max_error`](Self::max_error)'s four-way split.
    pub fn max_error_rate(mut self, total: f64, substitution: f64, insertion: f64, deletion: f64) -> Self {
        for rate in [total, substitution, insertion, deletion] {
            assert!((0.0..=1.0).contains(&rate));
        }
        self.max_error_rate_total = Some(total);
        self.max_error_rate_substitution = Some(substitution);
        self.max_error_rate_insertion = Some(insertion);
        self.max_error_rate_deletion = Some(deletion);
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn output(mut self, output: OutputKind) -> Self {
        self.output = output;
        self
    }

    pub(crate) fn budget_for_query_len(&self, len: usize) -> EditBudget {
        let resolve = |rate: Option<f64>, absolute: usize| {
            rate.map_or(absolute, |rate| ((len as f64) * rate).floor() as usize)
        };

        EditBudget {
            total: resolve(self.max_error_rate_total, self.max_error_total),
            substitution: resolve(self.max_error_rate_substitution, self.max_error_substitution),
            insertion: resolve(self.max_error_rate_insertion, self.max_error_insertion),
            deletion: resolve(self.max_error_rate_deletion, self.max_error_deletion),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_error_total: 0,
            max_error_substitution: 0,
            max_error_insertion: 0,
            max_error_deletion: 0,
            max_error_rate_total: None,
            max_error_rate_substitution: None,
            max_error_rate_insertion: None,
            max_error_rate_deletion: None,
            mode: Mode::default(),
            output: OutputKind::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet;

    #[test]
    fn basic_config() {
        let text = b"ACGT";
        let alphabet = alphabet::ascii_dna();

        let _index = FmIndexConfig::<i32>::new()
            .suffix_array_sampling_rate(8)
            .construct_index(text, alphabet);
    }

    #[test]
    #[should_panic]
    fn zero_sampling_rate_panics() {
        FmIndexConfig::<i32>::new().suffix_array_sampling_rate(0);
    }

    #[test]
    fn rate_budget_floors_to_integer() {
        let config = SearchConfig::new().max_error_rate(0.25, 0.25, 0.25, 0.25);
        let budget = config.budget_for_query_len(7);
        assert_eq!(budget.total, 1);
    }

    #[test]
    fn rate_budget_resolves_each_kind_independently() {
        let config = SearchConfig::new().max_error_rate(0.5, 0.25, 0.0, 0.0);
        let budget = config.budget_for_query_len(8);

        assert_eq!(budget.total, 4);
        assert_eq!(budget.substitution, 2);
        assert_eq!(budget.insertion, 0);
        assert_eq!(budget.deletion, 0);
    }
}
