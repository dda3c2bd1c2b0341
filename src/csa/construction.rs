//! Builds a [`Csa`] from a borrowed, externally-ranked text: suffix array via `libsais`, BWT
//! derivation, the dense occurrence table, and the cumulative count table. Parallelized with
//! `rayon` for the frequency count, mirroring how the teacher crate's construction pipeline
//! shells out to `rayon` for the same kind of embarrassingly parallel pass.

use libsais::ThreadCount;
use log::debug;
use rayon::prelude::*;

use super::{Csa, CompactMapping, IndexStorage};
use super::occurrence_table::OccurrenceTable;
use super::sampled_suffix_array::SampledSuffixArray;
use crate::alphabet::Alphabet;

pub(super) fn construct<I: IndexStorage>(
    ext_text: &[u8],
    alphabet: &Alphabet,
    sampling_rate: usize,
) -> Csa<I> {
    assert!(!ext_text.is_empty(), "cannot build an index over an empty text");
    assert!(sampling_rate > 0);

    let sigma_ext = alphabet.sigma();

    debug!(
        "constructing CSA for {} symbols over an alphabet of size {sigma_ext}",
        ext_text.len()
    );

    let frequencies = count_frequencies(ext_text, sigma_ext);
    let mapping = decide_mapping(&frequencies);
    let sigma = match &mapping {
        CompactMapping::Identity => sigma_ext + 1,
        CompactMapping::Reduced { ext_of_compact, .. } => ext_of_compact.len(),
    };

    debug!(
        "alphabet strategy: {}",
        match &mapping {
            CompactMapping::Identity => "identity",
            CompactMapping::Reduced { .. } => "reduced",
        }
    );

    let compact_text = remap_to_compact(ext_text, &mapping);

    let count = frequency_table_to_count(&frequencies, &mapping, sigma);

    let suffix_array_bytes = construct_suffix_array::<I>(&compact_text);

    let bwt = bwt_from_suffix_array::<I>(&compact_text, &suffix_array_bytes);

    debug!("building dense occurrence table over {sigma} symbols");
    let occurrences = OccurrenceTable::construct(sigma, &bwt);

    let size = compact_text.len();
    let suffix_array = SampledSuffixArray::<I>::new(suffix_array_bytes, sampling_rate);

    debug!(
        "sampled suffix array retains {}/{size} entries (rate {sampling_rate})",
        size.div_ceil(sampling_rate)
    );

    Csa {
        sigma,
        count,
        mapping,
        occurrences,
        suffix_array,
        size,
    }
}

fn count_frequencies(ext_text: &[u8], sigma_ext: usize) -> Vec<usize> {
    ext_text
        .par_iter()
        .fold(
            || vec![0usize; sigma_ext],
            |mut acc, &s| {
                acc[s as usize] += 1;
                acc
            },
        )
        .reduce(
            || vec![0usize; sigma_ext],
            |mut a, b| {
                for (x, y) in a.iter_mut().zip(b) {
                    *x += y;
                }
                a
            },
        )
}

fn decide_mapping(frequencies: &[usize]) -> CompactMapping {
    if frequencies.iter().all(|&f| f > 0) {
        return CompactMapping::Identity;
    }

    let mut compact_of_ext = vec![0u8; frequencies.len()];
    let mut ext_of_compact = vec![0u8; 1]; // code 0 is the sentinel

    let mut next_compact = 1u8;
    for (ext, &freq) in frequencies.iter().enumerate() {
        if freq > 0 {
            compact_of_ext[ext] = next_compact;
            ext_of_compact.push(ext as u8);
            next_compact += 1;
        }
    }

    CompactMapping::Reduced {
        compact_of_ext,
        ext_of_compact,
    }
}

fn remap_to_compact(ext_text: &[u8], mapping: &CompactMapping) -> Vec<u8> {
    let mut compact_text = Vec::with_capacity(ext_text.len() + 1);

    compact_text.extend(ext_text.iter().map(|&ext| mapping.to_compact(ext)));
    compact_text.push(0); // sentinel, strictly smaller than every real compact code

    compact_text
}

fn frequency_table_to_count(frequencies: &[usize], mapping: &CompactMapping, sigma: usize) -> Vec<usize> {
    let mut compact_frequencies = vec![0usize; sigma];
    compact_frequencies[0] = 1; // the sentinel occurs exactly once

    for (ext, &freq) in frequencies.iter().enumerate() {
        if freq > 0 {
            compact_frequencies[mapping.to_compact(ext as u8) as usize] = freq;
        }
    }

    let mut count = vec![0usize; sigma + 1];
    for c in 0..sigma {
        count[c + 1] = count[c] + compact_frequencies[c];
    }

    count
}

fn construct_suffix_array<I: IndexStorage>(compact_text: &[u8]) -> Vec<u8> {
    let n = compact_text.len();
    let mut sa = vec![I::zero(); n];

    libsais::SuffixArrayConstruction::for_text(compact_text)
        .in_borrowed_buffer(&mut sa)
        .multi_threaded(ThreadCount::fixed(
            rayon::current_num_threads()
                .try_into()
                .expect("number of threads should fit into u16"),
        ))
        .run()
        .expect("suffix array construction over a validly-encoded text cannot fail");

    bytemuck::cast_slice(&sa).to_vec()
}

fn bwt_from_suffix_array<I: IndexStorage>(compact_text: &[u8], suffix_array_bytes: &[u8]) -> Vec<u8> {
    let suffix_array: &[I] = bytemuck::cast_slice(suffix_array_bytes);

    suffix_array
        .iter()
        .map(|&sa_value| {
            let pos: usize = num_traits::NumCast::from(sa_value).unwrap();
            if pos == 0 {
                0u8
            } else {
                compact_text[pos - 1]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet;

    #[test]
    fn concat_text_with_dense_alphabet_uses_identity_mapping() {
        let alphabet = alphabet::ascii_dna();
        let text = alphabet.translate_to_ext(b"ACGTACGT");

        let frequencies = count_frequencies(&text, alphabet.sigma());
        let mapping = decide_mapping(&frequencies);

        assert!(matches!(mapping, CompactMapping::Identity));
    }

    #[test]
    fn sparse_alphabet_uses_reduced_mapping() {
        let alphabet = alphabet::ascii_dna_iupac();
        let text = alphabet.translate_to_ext(b"ACGTACGT");

        let frequencies = count_frequencies(&text, alphabet.sigma());
        let mapping = decide_mapping(&frequencies);

        assert!(matches!(mapping, CompactMapping::Reduced { .. }));
        if let CompactMapping::Reduced { ext_of_compact, .. } = mapping {
            // sentinel + A, C, G, T
            assert_eq!(ext_of_compact.len(), 5);
        }
    }

    #[test]
    fn count_table_is_cumulative() {
        let alphabet = alphabet::ascii_dna();
        let text = alphabet.translate_to_ext(b"cccaaagggttt");

        let frequencies = count_frequencies(&text, alphabet.sigma());
        let mapping = decide_mapping(&frequencies);
        let count = frequency_table_to_count(&frequencies, &mapping, alphabet.sigma() + 1);

        // sentinel(1), A(3), C(3), G(3), T(3)
        assert_eq!(count, vec![0, 1, 4, 7, 10, 13]);
    }
}
