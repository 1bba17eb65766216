//! Binary image loader.
//!
//! A program image is a headerless sequence of 16-bit unsigned
//! little-endian words, loaded verbatim into memory starting at address 0.

use std::error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use super::Memory;

#[derive(Debug)]
pub enum LoadError {
    /// The image has an odd number of bytes, so its last word is cut off.
    TruncatedWord { len: usize },
    /// The image holds more words than the address space.
    TooLarge { words: usize, capacity: usize },
    Io(io::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::TruncatedWord { len } => {
                write!(f, "image length `{}` is not a multiple of 2", len)
            }
            LoadError::TooLarge { words, capacity } => {
                write!(
                    f,
                    "image holds {} words but the address space holds {}",
                    words, capacity
                )
            }
            LoadError::Io(err) => write!(f, "failed to read image: {}", err),
        }
    }
}

impl error::Error for LoadError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

pub type Result<T, E = LoadError> = std::result::Result<T, E>;

impl<const S: usize> Memory<S> {
    /// Creates a memory initialized from a binary program image.
    ///
    /// Words beyond the image stay zeroed; the whole address space is
    /// readable and writable regardless of the image's length.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 2 != 0 {
            return Err(LoadError::TruncatedWord { len: bytes.len() });
        }

        let words = bytes.len() / 2;
        if words > S {
            return Err(LoadError::TooLarge { words, capacity: S });
        }

        let mut memory = Self::default();
        for (slot, pair) in memory.data.iter_mut().zip(bytes.chunks_exact(2)) {
            *slot = u16::from_le_bytes([pair[0], pair[1]]);
        }

        Ok(memory)
    }

    /// Creates a memory initialized from the program image at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}
