//! Error types for the few genuinely fallible operations in this crate (index persistence).
//!
//! Everything else — an extension that targets a symbol not present at a position, cycling
//! past the first child, locating on a default cursor — is a contract violation, not a
//! recoverable runtime condition, and is signaled with `debug_assert!`/`assert!` instead of
//! a `Result`.

use std::fmt;

/// The detailed error behind a failed [`store_bidirectional_index`](crate::store_bidirectional_index)
/// or [`load_bidirectional_index`](crate::load_bidirectional_index) call.
///
/// The public persistence API collapses this down to a `bool`/`Option` per the crate's error
/// handling contract; use the `_detailed` variants of those functions to obtain this type instead.
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    #[cfg(feature = "savefile")]
    Serialization(savefile::SavefileError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error while (de)serializing index: {e}"),
            #[cfg(feature = "savefile")]
            Error::Serialization(e) => write!(f, "index serialization error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            #[cfg(feature = "savefile")]
            Error::Serialization(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

#[cfg(feature = "savefile")]
impl From<savefile::SavefileError> for Error {
    fn from(e: savefile::SavefileError) -> Self {
        Error::Serialization(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
