/// Length of the container header preceding the first frame.
pub const HEADER_LEN: usize = 10;

pub const MAGIC_BYTES: &[u8; 3] = b"ID3";

/// The 10-byte container header. Everything past the magic is carried
/// along untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagHeader {
    pub(crate) magic_bytes: [u8; 3],
    pub(crate) opaque: [u8; 7],
}

impl TagHeader {
    pub fn new(opaque: [u8; 7]) -> TagHeader {
        TagHeader {
            magic_bytes: *MAGIC_BYTES,
            opaque,
        }
    }

    pub(crate) fn from_bytes(bytes: [u8; HEADER_LEN]) -> TagHeader {
        let mut magic_bytes = [0u8; 3];
        let mut opaque = [0u8; 7];
        magic_bytes.copy_from_slice(&bytes[..3]);
        opaque.copy_from_slice(&bytes[3..]);
        TagHeader {
            magic_bytes,
            opaque,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[..3].copy_from_slice(&self.magic_bytes);
        bytes[3..].copy_from_slice(&self.opaque);
        bytes
    }

    pub fn magic(&self) -> &[u8; 3] {
        &self.magic_bytes
    }

    pub fn opaque(&self) -> &[u8; 7] {
        &self.opaque
    }

    #[inline(always)]
    pub fn has_magic(&self) -> bool {
        &self.magic_bytes == MAGIC_BYTES
    }
}
