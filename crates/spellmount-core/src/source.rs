// Dictionary source variants.

use std::path::PathBuf;

/// Where a dictionary's data and affix content come from.
///
/// The two loading strategies are explicit variants rather than an
/// inspect-the-arguments overload: either both pieces are files on disk
/// (mounted through the shared-directory ref-count path) or both are
/// in-memory buffers (mounted independently and released unconditionally).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    /// Dictionary data and affix rule files on disk.
    Files { dic: PathBuf, aff: PathBuf },
    /// Dictionary data and affix rule content already in memory.
    Buffers { dic: Vec<u8>, aff: Vec<u8> },
}

impl DictionarySource {
    /// Source backed by a dictionary/affix file pair on disk.
    pub fn from_files(dic: impl Into<PathBuf>, aff: impl Into<PathBuf>) -> Self {
        Self::Files {
            dic: dic.into(),
            aff: aff.into(),
        }
    }

    /// Source backed by in-memory buffers.
    pub fn from_buffers(dic: impl Into<Vec<u8>>, aff: impl Into<Vec<u8>>) -> Self {
        Self::Buffers {
            dic: dic.into(),
            aff: aff.into(),
        }
    }
}
