//! The compressed suffix array (CSA): the external collaborator the search core is built on.
//!
//! Exposes `size`, the cumulative count table `C[.]`, compact/external code translation, direct
//! suffix-array access, and the two rank primitives (`bwt_rank`, `wavelet_lex_count`) that
//! `backward_search` / `bidirectional_search` are built from. Construction (suffix array via
//! `libsais`, BWT derivation, dense occurrence table, suffix-array sampling) lives in
//! `construction`.

mod construction;
mod occurrence_table;
mod sampled_suffix_array;

use bytemuck::Pod;
use libsais::OutputElement;
use num_traits::PrimInt;

use occurrence_table::OccurrenceTable;
use sampled_suffix_array::SampledSuffixArray;

use crate::alphabet::Alphabet;

/// Types that can be used to store suffix array entries inside a [`Csa`].
///
/// The maximum value of the type is an upper bound on the length of the indexed text
/// (including its sentinel). Larger types allow indexing larger texts at the cost of memory.
pub trait IndexStorage:
    PrimInt + Pod + OutputElement + maybe_savefile::MaybeSavefile + sealed::Sealed + Send + Sync + 'static
{
}

impl sealed::Sealed for i32 {}
impl IndexStorage for i32 {}

impl sealed::Sealed for i64 {}
impl IndexStorage for i64 {}

mod maybe_savefile {
    #[cfg(feature = "savefile")]
    pub trait MaybeSavefile: savefile::Savefile {}
    #[cfg(not(feature = "savefile"))]
    pub trait MaybeSavefile {}

    impl MaybeSavefile for i32 {}
    impl MaybeSavefile for i64 {}
}

mod sealed {
    pub trait Sealed {}
}

/// How external symbol ranks are packed into compact CSA codes (§4.1 of the design document).
///
/// `Identity` is a hot-path optimization applicable when every external rank actually occurs in
/// the text (`compact = ext + 1`, reserving `0` for the sentinel). `Reduced` is used whenever the
/// alphabet is sparsely used, densely renumbering only the symbols actually present.
#[cfg_attr(feature = "savefile", derive(savefile::savefile_derive::Savefile))]
pub(crate) enum CompactMapping {
    Identity,
    Reduced {
        compact_of_ext: Vec<u8>,
        ext_of_compact: Vec<u8>,
    },
}

impl CompactMapping {
    fn to_compact(&self, ext: u8) -> u8 {
        match self {
            CompactMapping::Identity => ext + 1,
            CompactMapping::Reduced { compact_of_ext, .. } => compact_of_ext[ext as usize],
        }
    }

    fn to_ext(&self, compact: u8) -> u8 {
        match self {
            CompactMapping::Identity => compact - 1,
            CompactMapping::Reduced { ext_of_compact, .. } => ext_of_compact[compact as usize],
        }
    }
}

/// A compressed suffix array over one oriented, sentinel-terminated text.
#[cfg_attr(feature = "savefile", derive(savefile::savefile_derive::Savefile))]
pub(crate) struct Csa<I> {
    sigma: usize,
    count: Vec<usize>,
    mapping: CompactMapping,
    occurrences: OccurrenceTable,
    suffix_array: SampledSuffixArray<I>,
    size: usize,
}

impl<I: IndexStorage> Csa<I> {
    pub(crate) fn construct_im(ext_text: &[u8], alphabet: &Alphabet, sampling_rate: usize) -> Self {
        construction::construct(ext_text, alphabet, sampling_rate)
    }

    /// Length of the underlying text including the appended sentinel.
    pub(crate) fn size(&self) -> usize {
        self.size
    }

    /// The compact alphabet size, including the sentinel symbol.
    pub(crate) fn sigma(&self) -> usize {
        self.sigma
    }

    pub(crate) fn count(&self, compact: u8) -> usize {
        self.count[compact as usize]
    }

    pub(crate) fn to_compact(&self, ext: u8) -> u8 {
        self.mapping.to_compact(ext)
    }

    pub(crate) fn to_ext(&self, compact: u8) -> u8 {
        self.mapping.to_ext(compact)
    }

    /// Number of occurrences of compact symbol `c` in `bwt[0, index)`.
    pub(crate) fn bwt_rank(&self, index: usize, compact: u8) -> usize {
        self.occurrences.rank(compact, index)
    }

    pub(crate) fn bwt_symbol_at(&self, index: usize) -> u8 {
        self.occurrences.symbol_at(index)
    }

    /// One backward-search / LF-mapping step: the row that `(compact, index)` maps to.
    pub(crate) fn lf_step(&self, compact: u8, index: usize) -> usize {
        self.count(compact) + self.bwt_rank(index, compact)
    }

    /// `(rank_of_c_in_[l,r), count_strictly_less_than_c, count_strictly_greater_than_c)` over
    /// `bwt[l, r)`.
    pub(crate) fn wavelet_lex_count(&self, l: usize, r: usize, compact: u8) -> (usize, usize, usize) {
        let rank_of_c = self.bwt_rank(r, compact) - self.bwt_rank(l, compact);

        let mut less = 0;
        for c in 0..compact {
            less += self.bwt_rank(r, c) - self.bwt_rank(l, c);
        }

        let total = r - l;
        let greater = total - rank_of_c - less;

        (rank_of_c, less, greater)
    }

    /// Backward search: given the SA interval `[l, r]` for some string `w`, returns the
    /// interval for `c . w`, or `None` if `c . w` does not occur.
    pub(crate) fn backward_search(&self, l: usize, r: usize, compact: u8) -> Option<(usize, usize)> {
        if compact == 0 || (compact as usize) >= self.sigma {
            return None;
        }

        let c_begin = self.count(compact);

        let (new_l, new_r) = if l == 0 && r + 1 == self.size {
            (c_begin, self.count(compact + 1).wrapping_sub(1))
        } else {
            let new_l = c_begin + self.bwt_rank(l, compact);
            let new_r = c_begin + self.bwt_rank(r + 1, compact);
            (new_l, new_r.wrapping_sub(1))
        };

        if new_r < new_l || new_r == usize::MAX {
            None
        } else {
            Some((new_l, new_r))
        }
    }

    pub(crate) fn locate_one(&self, index: usize) -> usize {
        self.locate_range(index..index + 1).next().unwrap()
    }

    pub(crate) fn locate_range<'a>(&'a self, range: std::ops::Range<usize>) -> impl Iterator<Item = usize> + 'a {
        self.suffix_array.recover_range(
            range,
            |i| self.bwt_symbol_at(i),
            |symbol, i| self.lf_step(symbol, i),
        )
    }
}
