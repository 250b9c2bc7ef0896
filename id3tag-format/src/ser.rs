use std::io::Write;

use crate::endian::encode_size;
use crate::error::EncodeError;
use crate::frame::{sanitize, Frame, Replacement};
use crate::header::TagHeader;

pub(crate) trait Serialize {
    fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()>;
}

impl Serialize for TagHeader {
    fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.to_bytes())
    }
}

impl Serialize for Frame {
    fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.id)?;
        writer.write_all(&encode_size(self.size))?;
        writer.write_all(&self.flags)?;
        writer.write_all(&self.payload)
    }
}

/// Writes `frame`, substituting its size and payload when `replacement` is given.
///
/// Identifier and flags are always copied as decoded.
pub fn encode_frame<W: Write>(
    writer: &mut W,
    frame: &Frame,
    replacement: Option<&Replacement>,
) -> Result<(), EncodeError> {
    match replacement {
        None => {
            frame.write(writer)?;
            tracing::debug!(id = %sanitize(&frame.id), size = frame.size, "copied frame");
        }
        Some(replacement) => {
            let size = replacement.size()?;
            writer.write_all(&frame.id)?;
            writer.write_all(&encode_size(size))?;
            writer.write_all(&frame.flags)?;
            writer.write_all(replacement.as_bytes())?;

            tracing::debug!(
                id = %sanitize(&frame.id),
                old_size = frame.size,
                new_size = size,
                "replaced frame content"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameId;

    fn frame() -> Frame {
        Frame {
            id: *b"TIT2",
            size: 6,
            flags: [0x1, 0x2, 0x3],
            payload: b"Hi\0\0\0".to_vec(),
        }
    }

    #[test]
    fn encode_copies_frame() {
        let mut out = vec![];
        encode_frame(&mut out, &frame(), None).unwrap();
        assert_eq!(out, b"TIT2\x00\x00\x00\x06\x01\x02\x03Hi\0\0\0");
    }

    #[test]
    fn encode_substitutes_content() {
        let mut out = vec![];
        let replacement = Replacement::from("Song");
        encode_frame(&mut out, &frame(), Some(&replacement)).unwrap();
        assert_eq!(out, b"TIT2\x00\x00\x00\x05\x01\x02\x03Song");
    }

    #[test]
    fn encode_empty_replacement() {
        let mut out = vec![];
        let original = Frame::text(FrameId::Comment, "note").unwrap();
        encode_frame(&mut out, &original, Some(&Replacement::from(""))).unwrap();
        assert_eq!(out, b"COMM\x00\x00\x00\x01\x00\x00\x00");
    }

    #[test]
    fn short_write_is_reported() {
        let mut buf = [0u8; 8];
        let mut writer = &mut buf[..];
        let err = encode_frame(&mut writer, &frame(), None).unwrap_err();
        assert!(matches!(err, EncodeError::Write(_)));
        assert_eq!(err.kind(), crate::ErrorKind::Io);
    }
}
