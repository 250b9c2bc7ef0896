use std::path::PathBuf;

use crate::frame::{sanitize, FrameId};

/// Coarse classification shared by every error of this crate, so callers can
/// branch on the kind of failure rather than on a particular variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Open, read, write or seek failure.
    Io,
    /// Bad magic, unexpected identifier or truncated field.
    Format,
    /// The edited container could not be swapped in for the original.
    Replace,
    /// A payload buffer could not be sized.
    Allocation,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Truncated container header")]
    TruncatedHeader,

    #[error("Truncated frame identifier")]
    TruncatedIdentifier,

    #[error("Truncated size field in frame `{}`", sanitize(.id))]
    TruncatedSize { id: [u8; 4] },

    #[error("Truncated flags in frame `{}`", sanitize(.id))]
    TruncatedFlags { id: [u8; 4] },

    #[error(
        "Truncated payload in frame `{}`: expected {expected} bytes, found {found}",
        sanitize(.id)
    )]
    TruncatedPayload {
        id: [u8; 4],
        expected: usize,
        found: usize,
    },

    #[error("Frame `{}` declares a size of zero", sanitize(.id))]
    EmptyFrame { id: [u8; 4] },

    #[error("Cannot allocate {size} bytes for frame `{}`", sanitize(.id))]
    Allocation { id: [u8; 4], size: usize },

    #[error("Cannot read frame")]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::Io(_) => ErrorKind::Io,
            DecodeError::Allocation { .. } => ErrorKind::Allocation,
            _ => ErrorKind::Format,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Content of {len} bytes does not fit in a frame")]
    ContentTooLarge { len: usize },

    #[error("Cannot write frame")]
    Write(#[from] std::io::Error),
}

impl EncodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncodeError::ContentTooLarge { .. } => ErrorKind::Format,
            EncodeError::Write(_) => ErrorKind::Io,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("Cannot open `{}`", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read header of `{}`", .path.display())]
    Header {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("`{}` is not an ID3-tagged file (found magic `{}`)", .path.display(), sanitize(.found))]
    BadMagic { path: PathBuf, found: [u8; 3] },
}

impl OpenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OpenError::Open { .. } => ErrorKind::Io,
            OpenError::Header { source, .. } => source.kind(),
            OpenError::BadMagic { .. } => ErrorKind::Format,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("Cannot seek to frame data")]
    Seek(#[source] std::io::Error),

    #[error("Cannot read frame {index} (expected `{expected}`)")]
    Decode {
        index: usize,
        expected: FrameId,
        #[source]
        source: DecodeError,
    },

    #[error("Unexpected tag `{}` at position {index}, expected `{expected}`", sanitize(.found))]
    UnexpectedTag {
        index: usize,
        found: [u8; 4],
        expected: FrameId,
    },
}

impl ListError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ListError::Seek(_) => ErrorKind::Io,
            ListError::Decode { source, .. } => source.kind(),
            ListError::UnexpectedTag { .. } => ErrorKind::Format,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error(transparent)]
    Open(#[from] OpenError),

    #[error("Cannot create temporary file `{}`", .path.display())]
    CreateTemp {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Temporary path `{}` is the file being edited", .path.display())]
    TempIsSource { path: PathBuf },

    #[error("Cannot read container header")]
    HeaderRead(#[source] DecodeError),

    #[error("Cannot write container header")]
    HeaderWrite(#[source] std::io::Error),

    #[error("Cannot read frame {index}")]
    Decode {
        index: usize,
        #[source]
        source: DecodeError,
    },

    #[error("Cannot write frame {index}")]
    Encode {
        index: usize,
        #[source]
        source: EncodeError,
    },

    #[error("Cannot copy data following the edited frame")]
    TailCopy(#[source] std::io::Error),

    #[error(
        "Cannot replace `{}` with `{}`; the edited content is left in the latter",
        .original.display(),
        .temp_path.display()
    )]
    Replace {
        original: PathBuf,
        temp_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EditError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EditError::Open(e) => e.kind(),
            EditError::CreateTemp { .. } => ErrorKind::Io,
            EditError::TempIsSource { .. } => ErrorKind::Io,
            EditError::HeaderRead(e) => e.kind(),
            EditError::HeaderWrite(_) => ErrorKind::Io,
            EditError::Decode { source, .. } => source.kind(),
            EditError::Encode { source, .. } => source.kind(),
            EditError::TailCopy(_) => ErrorKind::Io,
            EditError::Replace { .. } => ErrorKind::Replace,
        }
    }
}
