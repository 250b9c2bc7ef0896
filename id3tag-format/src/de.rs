use std::io::{Read, Seek};

use crate::endian::decode_size;
use crate::error::DecodeError;
use crate::frame::{sanitize, Frame};
use crate::header::{TagHeader, HEADER_LEN};

pub(crate) trait DeserializeOwned {
    fn deserialize_owned<R: Read + Seek>(reader: &mut R) -> Result<Self, DecodeError>
    where
        Self: Sized;
}

/// Fills `buf`, reporting a short read as `truncated` rather than as an I/O error.
#[inline(always)]
fn read_field<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    truncated: impl FnOnce() -> DecodeError,
) -> Result<(), DecodeError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        std::io::ErrorKind::UnexpectedEof => truncated(),
        _ => DecodeError::Io(e),
    })
}

impl DeserializeOwned for TagHeader {
    fn deserialize_owned<R: Read + Seek>(reader: &mut R) -> Result<Self, DecodeError> {
        let start = reader.stream_position()?;
        let mut bytes = [0u8; HEADER_LEN];
        read_field(reader, &mut bytes, || DecodeError::TruncatedHeader)?;
        let header = TagHeader::from_bytes(bytes);

        tracing::debug!(
            start = format_args!("{:#x}", start),
            magic = %sanitize(header.magic()),
            "deserialized TagHeader"
        );

        Ok(header)
    }
}

impl DeserializeOwned for Frame {
    fn deserialize_owned<R: Read + Seek>(reader: &mut R) -> Result<Self, DecodeError> {
        let start = reader.stream_position()?;

        let mut id = [0u8; 4];
        read_field(reader, &mut id, || DecodeError::TruncatedIdentifier)?;

        let mut raw_size = [0u8; 4];
        read_field(reader, &mut raw_size, || DecodeError::TruncatedSize { id })?;
        let size = decode_size(raw_size);

        let mut flags = [0u8; 3];
        read_field(reader, &mut flags, || DecodeError::TruncatedFlags { id })?;

        // One byte of the declared size is the terminator and is never read.
        let len = size.checked_sub(1).ok_or(DecodeError::EmptyFrame { id })? as usize;

        let mut payload = Vec::new();
        payload
            .try_reserve_exact(len)
            .map_err(|_| DecodeError::Allocation { id, size: len })?;
        let found = reader.by_ref().take(len as u64).read_to_end(&mut payload)?;
        if found < len {
            return Err(DecodeError::TruncatedPayload {
                id,
                expected: len,
                found,
            });
        }

        let end = reader.stream_position()?;
        tracing::debug!(
            start = format_args!("{:#x}", start),
            end = format_args!("{:#x}", end),
            bytes = end - start,
            id = %sanitize(&id),
            size,
            "deserialized Frame"
        );

        Ok(Frame {
            id,
            size,
            flags,
            payload,
        })
    }
}

/// Reads one frame from a stream positioned on its identifier.
///
/// The identifier is not checked against the canonical set; that is left to
/// the caller.
pub fn decode_frame<R: Read + Seek>(reader: &mut R) -> Result<Frame, DecodeError> {
    Frame::deserialize_owned(reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn title_frame() -> Vec<u8> {
        let mut bytes = b"TIT2\x00\x00\x00\x06\x00\x00\x00".to_vec();
        bytes.extend_from_slice(b"Hi\0\0\0");
        bytes
    }

    #[test]
    fn decode_reads_one_byte_short_of_size() {
        let mut bytes = title_frame();
        bytes.push(0xaa);
        let mut cursor = Cursor::new(bytes);

        let frame = decode_frame(&mut cursor).unwrap();
        assert_eq!(&frame.id, b"TIT2");
        assert_eq!(frame.size, 6);
        assert_eq!(frame.flags, [0, 0, 0]);
        assert_eq!(frame.payload, b"Hi\0\0\0");
        assert_eq!(cursor.position(), 16);
    }

    #[test]
    fn decode_does_not_check_identifier() {
        let mut bytes = title_frame();
        bytes[..4].copy_from_slice(b"XXXX");
        let frame = decode_frame(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(&frame.id, b"XXXX");
        assert_eq!(frame.frame_id(), None);
    }

    #[test]
    fn truncation_at_each_field() {
        let bytes = title_frame();

        let err = decode_frame(&mut Cursor::new(&bytes[..3])).unwrap_err();
        assert!(matches!(err, DecodeError::TruncatedIdentifier));

        let err = decode_frame(&mut Cursor::new(&bytes[..6])).unwrap_err();
        assert!(matches!(err, DecodeError::TruncatedSize { id } if &id == b"TIT2"));

        let err = decode_frame(&mut Cursor::new(&bytes[..9])).unwrap_err();
        assert!(matches!(err, DecodeError::TruncatedFlags { .. }));

        let err = decode_frame(&mut Cursor::new(&bytes[..13])).unwrap_err();
        match err {
            DecodeError::TruncatedPayload {
                expected, found, ..
            } => {
                assert_eq!(expected, 5);
                assert_eq!(found, 2);
            }
            e => panic!("unexpected error: {:?}", e),
        }
        assert_eq!(err_kind(&bytes[..13]), crate::ErrorKind::Format);
    }

    fn err_kind(bytes: &[u8]) -> crate::ErrorKind {
        decode_frame(&mut Cursor::new(bytes)).unwrap_err().kind()
    }

    #[test]
    fn zero_size_is_rejected() {
        let bytes = b"TIT2\x00\x00\x00\x00\x00\x00\x00".to_vec();
        let err = decode_frame(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, DecodeError::EmptyFrame { .. }));
    }

    #[test]
    fn size_of_one_is_empty_payload() {
        let bytes = b"COMM\x00\x00\x00\x01\x00\x00\x00".to_vec();
        let frame = decode_frame(&mut Cursor::new(bytes)).unwrap();
        assert!(frame.payload.is_empty());
    }

    #[test]
    fn header_is_read_verbatim() {
        let mut cursor = Cursor::new(b"ID3\x03\x00\x00\x00\x00\x00\x21TIT2".to_vec());
        let header = TagHeader::deserialize_owned(&mut cursor).unwrap();
        assert!(header.has_magic());
        assert_eq!(cursor.position(), 10);

        let err = TagHeader::deserialize_owned(&mut Cursor::new(b"ID3\x03".to_vec())).unwrap_err();
        assert!(matches!(err, DecodeError::TruncatedHeader));
    }
}
