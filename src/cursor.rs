//! A cursor walking the implicit suffix tree of a [`UnidirectionalIndex`] via right-extension
//! and lexicographic sibling cycling.

use crate::csa::IndexStorage;
use crate::index::UnidirectionalIndex;

/// Sentinel parent interval marking "no parent recorded" (root, or a cursor projected from a
/// bidirectional cursor whose last extension was in the other direction). Any attempt to cycle
/// from this state is a contract violation and trips the debug assertion in `cycle_back`.
const INVALID_PARENT: (usize, usize) = (1, 0);
const NO_LAST_CHAR: u8 = u8::MAX;

/// A cursor to a [`UnidirectionalIndex`].
///
/// The cursor implicitly maintains a currently-searched query, growing it one symbol at a time
/// via [`extend_right`](Cursor::extend_right). At any point the number of occurrences of the
/// current query can be retrieved in O(1), and occurrences can be located.
#[derive(Clone, Copy)]
pub struct Cursor<'a, I> {
    pub(crate) index: &'a UnidirectionalIndex<I>,
    lb: usize,
    rb: usize,
    parent: (usize, usize),
    last_char: u8,
    depth: usize,
}

impl<'a, I: IndexStorage> Cursor<'a, I> {
    pub(crate) fn root(index: &'a UnidirectionalIndex<I>) -> Self {
        Self {
            index,
            lb: 0,
            rb: index.csa.size() - 1,
            parent: INVALID_PARENT,
            last_char: NO_LAST_CHAR,
            depth: 0,
        }
    }

    pub(crate) fn from_interval(
        index: &'a UnidirectionalIndex<I>,
        lb: usize,
        rb: usize,
        parent: (usize, usize),
        last_char: u8,
        depth: usize,
    ) -> Self {
        Self {
            index,
            lb,
            rb,
            parent,
            last_char,
            depth,
        }
    }

    pub(crate) fn interval(&self) -> (usize, usize) {
        (self.lb, self.rb)
    }

    pub(crate) fn parent_interval(&self) -> (usize, usize) {
        self.parent
    }

    pub(crate) fn last_compact_char(&self) -> u8 {
        self.last_char
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The number of occurrences of the currently searched query. O(1).
    pub fn count(&self) -> usize {
        self.rb - self.lb + 1
    }

    /// Extends the query by the lexicographically smallest symbol for which an occurrence
    /// exists. Leaves the cursor unchanged and returns `false` if the query cannot be extended.
    pub fn extend_right(&mut self) -> bool {
        for compact in 1..self.index.csa.sigma() as u8 {
            if let Some((new_lb, new_rb)) = self.index.csa.backward_search(self.lb, self.rb, compact) {
                self.parent = (self.lb, self.rb);
                self.lb = new_lb;
                self.rb = new_rb;
                self.last_char = compact;
                self.depth += 1;
                return true;
            }
        }

        false
    }

    /// Extends the query by a specific external symbol.
    pub fn extend_right_symbol(&mut self, symbol: u8) -> bool {
        let ext = self.index.alphabet.io_to_ext(symbol);
        let compact = self.index.csa.to_compact(ext);

        match self.index.csa.backward_search(self.lb, self.rb, compact) {
            Some((new_lb, new_rb)) => {
                self.parent = (self.lb, self.rb);
                self.lb = new_lb;
                self.rb = new_rb;
                self.last_char = compact;
                self.depth += 1;
                true
            }
            None => false,
        }
    }

    /// Extends the query by a sequence of external symbols, rolling back entirely if any symbol
    /// fails to extend.
    pub fn extend_right_seq(&mut self, symbols: impl IntoIterator<Item = u8>) -> bool {
        let snapshot = *self;

        for symbol in symbols {
            if !self.extend_right_symbol(symbol) {
                *self = snapshot;
                return false;
            }
        }

        true
    }

    /// Moves to the next lexicographically larger sibling edge from the same parent.
    ///
    /// Undefined (debug-asserted) at depth 0.
    pub fn cycle_back(&mut self) -> bool {
        debug_assert!(self.depth > 0, "cannot cycle at the root");
        debug_assert!(
            self.parent != INVALID_PARENT,
            "cannot cycle: no parent interval recorded for this cursor"
        );

        let (parent_lb, parent_rb) = self.parent;

        for compact in (self.last_char + 1)..self.index.csa.sigma() as u8 {
            if let Some((new_lb, new_rb)) = self.index.csa.backward_search(parent_lb, parent_rb, compact) {
                self.lb = new_lb;
                self.rb = new_rb;
                self.last_char = compact;
                return true;
            }
        }

        false
    }

    /// The external symbol on the edge from the parent to this cursor. Undefined at depth 0.
    pub fn last_char(&self) -> u8 {
        debug_assert!(self.depth > 0);
        let ext = self.index.csa.to_ext(self.last_char);
        self.index.alphabet.ext_to_io(ext)
    }

    /// The substring currently matched by this cursor, in external (IO) symbols.
    pub fn query(&self) -> Vec<u8> {
        let sa_value = self.index.csa.locate_one(self.lb);
        let start = self.index.locate_position(self.depth, sa_value);

        self.index.ext_text[start..start + self.depth]
            .iter()
            .map(|&ext| self.index.alphabet.ext_to_io(ext))
            .collect()
    }

    /// All text positions where the current query occurs, eagerly collected.
    pub fn locate(&self) -> Vec<usize> {
        self.lazy_locate().collect()
    }

    /// All text positions where the current query occurs, as a lazily-evaluated iterator.
    pub fn lazy_locate(&self) -> impl Iterator<Item = usize> + '_ {
        let depth = self.depth;
        self.index
            .csa
            .locate_range(self.lb..self.rb + 1)
            .map(move |sa_value| self.index.locate_position(depth, sa_value))
    }

    /// One cursor per external symbol that extends the current query, in ascending symbol order;
    /// positions with no such child get a cursor at the root (meaning "no such child"), rather
    /// than an absence, so callers can index this by symbol without unwrapping each slot.
    pub fn children(&self) -> Vec<Cursor<'a, I>> {
        (1..self.index.csa.sigma() as u8)
            .map(|compact| {
                self.index
                    .csa
                    .backward_search(self.lb, self.rb, compact)
                    .map(|(new_lb, new_rb)| {
                        Cursor::from_interval(self.index, new_lb, new_rb, (self.lb, self.rb), compact, self.depth + 1)
                    })
                    .unwrap_or_else(|| Cursor::root(self.index))
            })
            .collect()
    }
}

impl<I> PartialEq for Cursor<'_, I> {
    fn eq(&self, other: &Self) -> bool {
        self.lb == other.lb && self.rb == other.rb && self.depth == other.depth
    }
}

impl<I> Eq for Cursor<'_, I> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet;
    use crate::index::UnidirectionalIndex;

    #[test]
    fn children_fills_missing_symbols_with_root_cursors() {
        let alphabet = alphabet::ascii_dna();
        let index: UnidirectionalIndex<i32> = UnidirectionalIndex::new(b"AAAA", alphabet, 1);

        let children = index.root().children();

        // sigma is sentinel + A,C,G,T, so there are 4 non-sentinel symbols; only 'A' extends.
        assert_eq!(children.len(), 4);

        let depths: Vec<usize> = children.iter().map(Cursor::depth).collect();
        assert_eq!(depths.iter().filter(|&&d| d == 1).count(), 1, "exactly one symbol extends");
        assert_eq!(depths.iter().filter(|&&d| d == 0).count(), 3, "the rest are root cursors");
    }
}
