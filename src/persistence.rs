//! Index persistence (§6, §7): stores and loads a [`BidirectionalIndex`] as two `savefile` blobs,
//! `<p>.fwd` and `<p>.rev`, one per oriented [`UnidirectionalIndex`] half.
//!
//! The public functions return a flat `bool` per the error-handling contract in §7; the
//! `_detailed` siblings return [`Result<_, Error>`] for callers that want to distinguish a
//! missing file from a corrupt blob or a version mismatch, mirroring the teacher's own
//! `savefile`-backed `save_to_file`/`load_from_file` methods.

use std::path::{Path, PathBuf};

use crate::csa::IndexStorage;
use crate::error::{Error, Result};
use crate::index::{BidirectionalIndex, UnidirectionalIndex};

const VERSION_FOR_SAVEFILE: u32 = 0;

fn fwd_path(p: impl AsRef<Path>) -> PathBuf {
    let mut path = p.as_ref().as_os_str().to_owned();
    path.push(".fwd");
    PathBuf::from(path)
}

fn rev_path(p: impl AsRef<Path>) -> PathBuf {
    let mut path = p.as_ref().as_os_str().to_owned();
    path.push(".rev");
    PathBuf::from(path)
}

/// Stores `index` at `<path>.fwd` and `<path>.rev`. Returns `false` on any I/O or serialization
/// failure; use [`store_bidirectional_index_detailed`] to distinguish the cause.
pub fn store_bidirectional_index<I: IndexStorage>(index: &BidirectionalIndex<I>, path: impl AsRef<Path>) -> bool {
    store_bidirectional_index_detailed(index, path).is_ok()
}

pub fn store_bidirectional_index_detailed<I: IndexStorage>(
    index: &BidirectionalIndex<I>,
    path: impl AsRef<Path>,
) -> Result<()> {
    savefile::save_file(fwd_path(&path), VERSION_FOR_SAVEFILE, &index.forward)?;
    savefile::save_file(rev_path(&path), VERSION_FOR_SAVEFILE, &index.reverse)?;
    Ok(())
}

/// Loads a [`BidirectionalIndex`] previously written by [`store_bidirectional_index`]. Returns
/// `None` on any I/O or deserialization failure; use
/// [`load_bidirectional_index_detailed`] to distinguish the cause.
pub fn load_bidirectional_index<I: IndexStorage>(path: impl AsRef<Path>) -> Option<BidirectionalIndex<I>> {
    load_bidirectional_index_detailed(path).ok()
}

pub fn load_bidirectional_index_detailed<I: IndexStorage>(path: impl AsRef<Path>) -> Result<BidirectionalIndex<I>> {
    let forward: UnidirectionalIndex<I> = savefile::load_file(fwd_path(&path), VERSION_FOR_SAVEFILE)
        .map_err(Error::Serialization)?;
    let reverse: UnidirectionalIndex<I> = savefile::load_file(rev_path(&path), VERSION_FOR_SAVEFILE)
        .map_err(Error::Serialization)?;

    Ok(BidirectionalIndex { forward, reverse })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet;

    #[test]
    fn round_trips_through_temp_files() {
        let dir = std::env::temp_dir().join("affixdex_persistence_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("roundtrip_index");

        let index: BidirectionalIndex<i32> =
            BidirectionalIndex::new(b"GAATTAATGAAC", alphabet::ascii_dna(), 2);

        assert!(store_bidirectional_index(&index, &path));

        let loaded: BidirectionalIndex<i32> = load_bidirectional_index(&path).expect("index should load back");

        let mut cursor = loaded.root();
        assert!(cursor.extend_right_seq(*b"AAT"));
        assert_eq!(cursor.count(), 2);

        let _ = std::fs::remove_file(fwd_path(&path));
        let _ = std::fs::remove_file(rev_path(&path));
    }

    #[test]
    fn missing_file_reports_detailed_error() {
        let result: Result<BidirectionalIndex<i32>> =
            load_bidirectional_index_detailed("/nonexistent/path/for/affixdex/tests");
        assert!(result.is_err());
    }
}
