use std::convert::TryFrom;
use std::fmt;

use crate::error::EncodeError;

/// Length of the identifier, size and flags fields preceding a payload.
pub(crate) const FRAME_HEADER_LEN: u64 = 4 + 4 + 3;

/// The frames a container is expected to hold, in on-disk order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameId {
    Title,
    Artist,
    Album,
    Year,
    Genre,
    Comment,
}

impl FrameId {
    /// Canonical order of frames following the header.
    pub const ALL: [FrameId; 6] = [
        FrameId::Title,
        FrameId::Artist,
        FrameId::Album,
        FrameId::Year,
        FrameId::Genre,
        FrameId::Comment,
    ];

    pub const fn id(self) -> &'static [u8; 4] {
        use FrameId::*;

        match self {
            Title => b"TIT2",
            Artist => b"TPE1",
            Album => b"TALB",
            Year => b"TYER",
            Genre => b"TCON",
            Comment => b"COMM",
        }
    }

    pub const fn label(self) -> &'static str {
        use FrameId::*;

        match self {
            Title => "TITLE",
            Artist => "ARTIST",
            Album => "ALBUM",
            Year => "YEAR",
            Genre => "GENRE",
            Comment => "COMMENT",
        }
    }

    /// The short command line switch selecting this frame for editing.
    pub const fn selector(self) -> char {
        use FrameId::*;

        match self {
            Title => 't',
            Artist => 'a',
            Album => 'A',
            Year => 'y',
            Genre => 'm',
            Comment => 'c',
        }
    }

    /// Position in the canonical order.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<FrameId> {
        Self::ALL.get(index).copied()
    }

    pub fn from_id(id: &[u8; 4]) -> Option<FrameId> {
        Self::ALL.iter().copied().find(|x| x.id() == id)
    }

    pub fn from_selector(selector: char) -> Option<FrameId> {
        Self::ALL.iter().copied().find(|x| x.selector() == selector)
    }

    pub fn as_str(self) -> &'static str {
        // Identifiers are ASCII literals.
        std::str::from_utf8(self.id()).unwrap_or_default()
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A frame as stored on disk.
///
/// `size` is the declared size field; the payload always holds `size - 1`
/// bytes, the remaining byte being the container's terminator convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub id: [u8; 4],
    pub size: u32,
    pub flags: [u8; 3],
    pub payload: Vec<u8>,
}

impl Frame {
    /// Builds a frame whose size field accounts for `payload` plus the terminator.
    pub fn new(id: [u8; 4], flags: [u8; 3], payload: Vec<u8>) -> Result<Frame, EncodeError> {
        Ok(Frame {
            id,
            size: declared_size(payload.len())?,
            flags,
            payload,
        })
    }

    pub fn text(id: FrameId, content: &str) -> Result<Frame, EncodeError> {
        Frame::new(*id.id(), [0u8; 3], content.as_bytes().to_vec())
    }

    pub fn frame_id(&self) -> Option<FrameId> {
        FrameId::from_id(&self.id)
    }

    /// Number of bytes the frame occupies in a container.
    pub fn encoded_len(&self) -> u64 {
        FRAME_HEADER_LEN + self.payload.len() as u64
    }

    pub fn display_text(&self) -> String {
        sanitize(&self.payload)
    }
}

/// Replacement content for the edited frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    content: Vec<u8>,
}

impl Replacement {
    pub fn new<C: Into<Vec<u8>>>(content: C) -> Replacement {
        Replacement {
            content: content.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }

    /// The size field written for this content.
    pub fn size(&self) -> Result<u32, EncodeError> {
        declared_size(self.content.len())
    }
}

impl From<&str> for Replacement {
    fn from(s: &str) -> Self {
        Replacement::new(s)
    }
}

impl From<String> for Replacement {
    fn from(s: String) -> Self {
        Replacement::new(s)
    }
}

#[inline(always)]
pub(crate) fn declared_size(len: usize) -> Result<u32, EncodeError> {
    len.checked_add(1)
        .and_then(|x| u32::try_from(x).ok())
        .ok_or(EncodeError::ContentTooLarge { len })
}

/// Replaces every byte outside printable ASCII with `.`.
pub fn sanitize(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if (32..=126).contains(&b) { b as char } else { '.' })
        .collect()
}
