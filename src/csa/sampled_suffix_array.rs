//! A suffix array sampled at a configurable rate, with unsampled entries recovered lazily via
//! LF-mapping walks.
//!
//! Adapted from a multi-text design: the original keeps a `HashMap` from sentinel-row index to
//! per-text border offset, needed because a concatenation of many texts has one sentinel per
//! text. A single concatenated text (this crate's scope, see the core's Non-goals) has exactly
//! one sentinel, whose suffix-array value is always the anchor `0`; the map degenerates to that
//! constant, which is what is implemented below.

use bytemuck::Pod;
use libsais::OutputElement;
use num_traits::{NumCast, PrimInt};

use std::ops::Range;

#[cfg_attr(feature = "savefile", derive(savefile::savefile_derive::Savefile))]
pub(crate) struct SampledSuffixArray<I> {
    suffix_array_bytes: Vec<u8>,
    sampling_rate: usize,
    _marker: std::marker::PhantomData<I>,
}

impl<I: OutputElement> SampledSuffixArray<I> {
    pub(crate) fn new(mut suffix_array_bytes: Vec<u8>, sampling_rate: usize) -> Self {
        let suffix_array_view: &mut [I] = bytemuck::cast_slice_mut(&mut suffix_array_bytes);

        let mut num_retained_values = 0;
        let mut write_index = 0;

        for i in 0..suffix_array_view.len() {
            if i % sampling_rate == 0 {
                suffix_array_view[write_index] = suffix_array_view[i];
                write_index += 1;
                num_retained_values += 1;
            }
        }

        suffix_array_bytes.truncate(num_retained_values * size_of::<I>());
        suffix_array_bytes.shrink_to_fit();

        Self {
            suffix_array_bytes,
            sampling_rate,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<I: PrimInt + Pod> SampledSuffixArray<I> {
    /// Recovers `suffix_array[i]` for every `i` in `range` by LF-walking from `i` until a
    /// sampled position or the sentinel row is reached.
    ///
    /// `bwt_symbol_at` must return the BWT symbol at a row (sentinel is symbol `0`);
    /// `lf_step` must perform one backward-search step for that symbol at that row.
    pub(crate) fn recover_range<'a>(
        &'a self,
        range: Range<usize>,
        bwt_symbol_at: impl Fn(usize) -> u8 + 'a,
        lf_step: impl Fn(u8, usize) -> usize + 'a,
    ) -> impl Iterator<Item = usize> + 'a {
        range.map(move |mut i| {
            let mut num_steps_done = 0usize;

            while i % self.sampling_rate != 0 {
                let bwt_symbol = bwt_symbol_at(i);

                if bwt_symbol == 0 {
                    // the sentinel row: the suffix starting here is the whole text, anchor 0
                    return num_steps_done;
                }

                i = lf_step(bwt_symbol, i);
                num_steps_done += 1;
            }

            let suffix_array_view: &[I] = bytemuck::cast_slice(&self.suffix_array_bytes);
            <usize as NumCast>::from(suffix_array_view[i / self.sampling_rate]).unwrap() + num_steps_done
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet;
    use crate::csa::Csa;
    use proptest::prelude::*;

    fn naive_suffix_array(text: &[u8]) -> Vec<usize> {
        let mut suffixes: Vec<usize> = (0..text.len()).collect();
        suffixes.sort_by_key(|&i| &text[i..]);
        suffixes
    }

    fn copied_and_recovered_must_equal(text: &[u8], sampling_rate: usize) {
        let alphabet = alphabet::ascii_dna_with_n();

        let sampled: Csa<i32> = Csa::construct_im(text, &alphabet, sampling_rate);
        let full: Csa<i32> = Csa::construct_im(text, &alphabet, 1);

        let n = sampled.size();

        let recovered: Vec<_> = sampled.locate_range(0..n).collect();
        let copied: Vec<_> = full.locate_range(0..n).collect();

        assert_eq!(copied, recovered);
    }

    #[test]
    fn recovery_matches_full_sampling_on_small_text() {
        copied_and_recovered_must_equal(b"NATNNATNATGAATNATNAT", 5);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(512))]

        #[test]
        fn recovery_matches_full_sampling_random_texts(
            text in prop::collection::vec((0usize..5).prop_map(|i| b"ACGTN"[i]), 1..400),
            sampling_rate in 1usize..=8
        ) {
            copied_and_recovered_must_equal(&text, sampling_rate);
        }
    }

    #[test]
    fn naive_reference_is_internally_consistent() {
        let text = b"banana";
        let sa = naive_suffix_array(text);
        assert_eq!(sa.len(), text.len());
    }
}
