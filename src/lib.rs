/*! A compressed self-index over finite-alphabet texts (DNA, protein, and similar biological
 * sequences), with unidirectional and bidirectional traversal cursors and an approximate-match
 * search driver supporting search schemes.
 *
 * The index construction is based on the [`libsais`] crate and parallelized with [`rayon`].
 *
 * ## Usage
 *
 * ```
 * use affixdex::{FmIndexConfig, alphabet};
 *
 * let alphabet = alphabet::ascii_dna();
 * let index = FmIndexConfig::<i32>::new().construct_bidirectional_index(b"ACGTACGT", alphabet);
 *
 * let mut cursor = index.root();
 * assert!(cursor.extend_right_seq(*b"ACGT"));
 * assert_eq!(cursor.count(), 2);
 *
 * for position in cursor.locate() {
 *     println!("found query at position {position}");
 * }
 * ```
 *
 * More information about the flexible [cursor](Cursor) and [bidirectional
 * cursor](BidirectionalCursor) APIs, index [configuration](FmIndexConfig), and approximate
 * [search](search) can be found in the module-level and struct-level documentation.
 *
 * [`libsais`]: https://github.com/feldroop/libsais-rs
 */

pub mod alphabet;
pub mod bidirectional_cursor;
mod config;
mod csa;
pub mod cursor;
pub mod error;
pub mod index;
pub mod search;

#[doc(inline)]
pub use alphabet::Alphabet;
#[doc(inline)]
pub use bidirectional_cursor::BidirectionalCursor;
#[doc(inline)]
pub use config::{FmIndexConfig, Mode, OutputKind, SearchConfig};
#[doc(inline)]
pub use cursor::Cursor;
#[doc(inline)]
pub use csa::IndexStorage;
#[doc(inline)]
pub use index::{BidirectionalIndex, UnidirectionalIndex};

#[cfg(feature = "savefile")]
mod persistence;

#[cfg(feature = "savefile")]
pub use persistence::{load_bidirectional_index, load_bidirectional_index_detailed, store_bidirectional_index, store_bidirectional_index_detailed};
