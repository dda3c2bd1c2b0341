//! The two index flavors built on top of a [`Csa`]: a unidirectional index (built over the
//! reversed text, so that right-extension is the cheap backward-search primitive) and a
//! bidirectional index (a forward CSA over `T` plus a reverse CSA over `T^R`, together
//! encoding an implicit affix tree).

use log::debug;

use crate::alphabet::Alphabet;
use crate::csa::{Csa, IndexStorage};
use crate::cursor::Cursor;

#[cfg_attr(feature = "savefile", derive(savefile::savefile_derive::Savefile))]
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Orientation {
    /// The CSA is built directly over the text; `locate` reads `SA[i]` directly.
    Forward,
    /// The CSA is built over the reversal of the text; `locate` needs the offset correction.
    Reversed,
}

/// An index supporting right-extension over a single, fixed text orientation.
///
/// Standalone, this is always built over the reversed text (§4.3): right-extension on the
/// external query then corresponds to prepending in the CSA, the cheaper backward-search
/// primitive. The same structure, reused with `Orientation::Forward`, is the forward half of
/// [`BidirectionalIndex`].
#[cfg_attr(feature = "savefile", derive(savefile::savefile_derive::Savefile))]
pub struct UnidirectionalIndex<I> {
    pub(crate) alphabet: Alphabet,
    pub(crate) ext_text: Vec<u8>,
    pub(crate) orientation: Orientation,
    pub(crate) csa: Csa<I>,
}

impl<I: IndexStorage> UnidirectionalIndex<I> {
    pub fn new(text: &[u8], alphabet: Alphabet, sampling_rate: usize) -> Self {
        let ext_text = alphabet.translate_to_ext(text);
        let reversed: Vec<u8> = ext_text.iter().rev().copied().collect();

        debug!("constructing unidirectional index over {} symbols", ext_text.len());

        let csa = Csa::construct_im(&reversed, &alphabet, sampling_rate);

        Self {
            alphabet,
            ext_text,
            orientation: Orientation::Reversed,
            csa,
        }
    }

    pub(crate) fn new_forward(ext_text: Vec<u8>, alphabet: &Alphabet, csa: Csa<I>) -> Self {
        Self {
            alphabet: alphabet.clone(),
            ext_text,
            orientation: Orientation::Forward,
            csa,
        }
    }

    pub(crate) fn new_reversed(ext_text: Vec<u8>, alphabet: &Alphabet, csa: Csa<I>) -> Self {
        Self {
            alphabet: alphabet.clone(),
            ext_text,
            orientation: Orientation::Reversed,
            csa,
        }
    }

    /// A cursor at the root of the implicit suffix tree (the empty query).
    pub fn root(&self) -> Cursor<'_, I> {
        Cursor::root(self)
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Length of the indexed text, not counting the sentinel.
    pub fn text_len(&self) -> usize {
        self.ext_text.len()
    }

    pub(crate) fn locate_position(&self, depth: usize, sa_value: usize) -> usize {
        match self.orientation {
            Orientation::Forward => sa_value,
            Orientation::Reversed => self.ext_text.len() - depth - 1 - sa_value,
        }
    }
}

/// An index supporting extension in both directions, built from twin CSAs over `T` and `T^R`.
#[cfg_attr(feature = "savefile", derive(savefile::savefile_derive::Savefile))]
pub struct BidirectionalIndex<I> {
    pub(crate) forward: UnidirectionalIndex<I>,
    pub(crate) reverse: UnidirectionalIndex<I>,
}

impl<I: IndexStorage> BidirectionalIndex<I> {
    pub fn new(text: &[u8], alphabet: Alphabet, sampling_rate: usize) -> Self {
        let ext_text = alphabet.translate_to_ext(text);
        let reversed: Vec<u8> = ext_text.iter().rev().copied().collect();

        debug!(
            "constructing bidirectional index over {} symbols (forward + reverse CSA)",
            ext_text.len()
        );

        let forward_csa = Csa::construct_im(&ext_text, &alphabet, sampling_rate);
        let reverse_csa = Csa::construct_im(&reversed, &alphabet, sampling_rate);

        let forward = UnidirectionalIndex::new_forward(ext_text.clone(), &alphabet, forward_csa);
        let reverse = UnidirectionalIndex::new_reversed(ext_text, &alphabet, reverse_csa);

        Self { forward, reverse }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.forward.alphabet
    }

    pub fn text_len(&self) -> usize {
        self.forward.ext_text.len()
    }

    pub fn root(&self) -> crate::bidirectional_cursor::BidirectionalCursor<'_, I> {
        crate::bidirectional_cursor::BidirectionalCursor::root(self)
    }
}
