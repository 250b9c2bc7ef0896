mod de;
mod endian;
mod error;
mod file;
mod frame;
mod header;
mod ser;

pub use de::decode_frame;
pub use endian::swap_u32_bytes;
pub use error::{DecodeError, EditError, EncodeError, ErrorKind, ListError, OpenError};
pub use file::{edit_tag, list_tags, rewrite, EditState, TagEditor, TagEntry, TagFileReader};
pub use frame::{sanitize, Frame, FrameId, Replacement};
pub use header::{TagHeader, HEADER_LEN, MAGIC_BYTES};
pub use ser::encode_frame;
