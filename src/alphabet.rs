//! Functions to create commonly used alphabets.
//!
//! An [`Alphabet`] maps external IO bytes (e.g. ASCII `'A'`, `'C'`, `'G'`, `'T'`) onto a dense,
//! 0-based rank representation used throughout the rest of the crate. Symbols that are not part
//! of the alphabet are rejected at the boundary (index construction, query translation) rather
//! than silently folded into some default rank.

#[cfg_attr(feature = "savefile", derive(savefile::savefile_derive::Savefile))]
#[derive(Clone)]
pub struct Alphabet {
    io_to_rank: Box<[u8; 256]>,
    rank_to_io: Vec<u8>,
}

const UNMAPPED: u8 = 255;

impl Alphabet {
    /// Builds an alphabet from a translation table mapping IO bytes to dense 0-based ranks.
    /// Entries equal to `255` mark bytes that are not part of the alphabet.
    pub fn from_translation_table(table: [u8; 256], size: usize) -> Self {
        let mut rank_to_io = vec![0u8; size];

        for io in 0..256usize {
            let rank = table[io];
            if rank != UNMAPPED {
                assert!(
                    (rank as usize) < size,
                    "translation table entry {rank} is out of bounds for alphabet size {size}"
                );
                rank_to_io[rank as usize] = io as u8;
            }
        }

        Self {
            io_to_rank: Box::new(table),
            rank_to_io,
        }
    }

    /// An alphabet over the first `size` byte values `0..size`, used as-is as dense ranks.
    /// Mostly useful for tests and for already-encoded input.
    pub fn identity(size: usize) -> Self {
        assert!(size <= 256);

        let mut table = [UNMAPPED; 256];
        for (io, slot) in table.iter_mut().enumerate().take(size) {
            *slot = io as u8;
        }

        Self::from_translation_table(table, size)
    }

    /// The alphabet size, i.e. the number of distinct external symbols (`sigma` in the search
    /// core, not counting the sentinel that the index appends internally).
    pub fn sigma(&self) -> usize {
        self.rank_to_io.len()
    }

    pub(crate) fn io_to_ext(&self, symbol: u8) -> u8 {
        let rank = self.io_to_rank[symbol as usize];
        assert!(
            rank != UNMAPPED,
            "byte {symbol:#x} is not part of this alphabet"
        );
        rank
    }

    pub(crate) fn ext_to_io(&self, rank: u8) -> u8 {
        self.rank_to_io[rank as usize]
    }

    pub(crate) fn translate_to_ext(&self, text: &[u8]) -> Vec<u8> {
        text.iter().map(|&s| self.io_to_ext(s)).collect()
    }
}

pub(crate) const ASCII_DNA_TRANSLATION_TABLE: [u8; 256] = {
    let mut table = [UNMAPPED; 256];

    table[b'A' as usize] = 0;
    table[b'a' as usize] = 0;

    table[b'C' as usize] = 1;
    table[b'c' as usize] = 1;

    table[b'G' as usize] = 2;
    table[b'g' as usize] = 2;

    table[b'T' as usize] = 3;
    table[b't' as usize] = 3;

    table
};

pub(crate) const ASCII_DNA_N_TRANSLATION_TABLE: [u8; 256] = {
    let mut table = ASCII_DNA_TRANSLATION_TABLE;
    table[b'N' as usize] = 4;
    table[b'n' as usize] = 4;

    table
};

pub(crate) const ASCII_DNA_IUPAC_TRANSLATION_TABLE: [u8; 256] = {
    let mut table = ASCII_DNA_N_TRANSLATION_TABLE;
    table[b'R' as usize] = 5;
    table[b'r' as usize] = 5;

    table[b'Y' as usize] = 6;
    table[b'y' as usize] = 6;

    table[b'K' as usize] = 7;
    table[b'k' as usize] = 7;

    table[b'M' as usize] = 8;
    table[b'm' as usize] = 8;

    table[b'S' as usize] = 9;
    table[b's' as usize] = 9;

    table[b'W' as usize] = 10;
    table[b'w' as usize] = 10;

    table[b'B' as usize] = 11;
    table[b'b' as usize] = 11;

    table[b'D' as usize] = 12;
    table[b'd' as usize] = 12;

    table[b'H' as usize] = 13;
    table[b'h' as usize] = 13;

    table[b'V' as usize] = 14;
    table[b'v' as usize] = 14;

    table
};

pub(crate) const ASCII_PROTEIN_TRANSLATION_TABLE: [u8; 256] = {
    let mut table = [UNMAPPED; 256];

    let mut rank = 0u8;
    let mut i = 0usize;
    // the twenty standard amino acid one-letter codes, in alphabetical order
    let codes = *b"ACDEFGHIKLMNPQRSTVWY";
    while i < codes.len() {
        table[codes[i] as usize] = rank;
        table[(codes[i] as usize) + 32] = rank; // lowercase
        rank += 1;
        i += 1;
    }

    table
};

/// The alphabet `{A, C, G, T}` (case-insensitive).
pub fn ascii_dna() -> Alphabet {
    Alphabet::from_translation_table(ASCII_DNA_TRANSLATION_TABLE, 4)
}

/// The alphabet `{A, C, G, T, N}` (case-insensitive).
pub fn ascii_dna_with_n() -> Alphabet {
    Alphabet::from_translation_table(ASCII_DNA_N_TRANSLATION_TABLE, 5)
}

/// The alphabet `{A, C, G, T}` plus the IUPAC ambiguity codes (case-insensitive).
pub fn ascii_dna_iupac() -> Alphabet {
    Alphabet::from_translation_table(ASCII_DNA_IUPAC_TRANSLATION_TABLE, 15)
}

/// The twenty standard amino acid one-letter codes (case-insensitive).
pub fn ascii_protein() -> Alphabet {
    Alphabet::from_translation_table(ASCII_PROTEIN_TRANSLATION_TABLE, 20)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dna_translation_round_trips() {
        let alphabet = ascii_dna();

        for (io, ext) in [(b'A', 0), (b'C', 1), (b'G', 2), (b'T', 3), (b't', 3)] {
            assert_eq!(alphabet.io_to_ext(io), ext);
        }

        assert_eq!(alphabet.ext_to_io(0), b'A');
        assert_eq!(alphabet.ext_to_io(3), b'T');
        assert_eq!(alphabet.sigma(), 4);
    }

    #[test]
    #[should_panic]
    fn dna_rejects_n() {
        ascii_dna().io_to_ext(b'N');
    }

    #[test]
    fn identity_alphabet_is_pass_through() {
        let alphabet = Alphabet::identity(4);

        for byte in 0..4u8 {
            assert_eq!(alphabet.io_to_ext(byte), byte);
            assert_eq!(alphabet.ext_to_io(byte), byte);
        }
    }

    #[test]
    fn protein_alphabet_has_twenty_symbols() {
        assert_eq!(ascii_protein().sigma(), 20);
    }
}
