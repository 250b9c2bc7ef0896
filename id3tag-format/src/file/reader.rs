use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::de::DeserializeOwned;
use crate::error::{ListError, OpenError};
use crate::frame::{sanitize, Frame, FrameId};
use crate::header::{TagHeader, HEADER_LEN};

use super::open_container;

/// One row of a tag listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    pub id: FrameId,
    pub label: &'static str,
    /// Payload with non-printable bytes replaced by `.`.
    pub text: String,
}

#[derive(Debug)]
pub struct TagFileReader {
    pub(crate) file: BufReader<File>,
    pub(crate) path: PathBuf,
    pub(crate) header: TagHeader,
}

impl TagFileReader {
    /// Opens an existing file for reading, and errors if it does not carry the `ID3` magic.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<TagFileReader, OpenError> {
        let path = path.as_ref();
        let (file, header) = open_container(path)?;

        Ok(TagFileReader {
            file,
            path: path.to_path_buf(),
            header,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &TagHeader {
        &self.header
    }

    pub fn list_tags(&mut self) -> Result<Vec<TagEntry>, ListError> {
        list_tags(&mut self.file)
    }
}

/// Walks the canonical frames following the header.
///
/// Stops at the first frame whose identifier is not the one expected at its
/// position; frames are never skipped.
pub fn list_tags<R: Read + Seek>(reader: &mut R) -> Result<Vec<TagEntry>, ListError> {
    reader
        .seek(SeekFrom::Start(HEADER_LEN as u64))
        .map_err(ListError::Seek)?;

    let mut entries = Vec::with_capacity(FrameId::ALL.len());

    for (index, expected) in FrameId::ALL.iter().copied().enumerate() {
        let frame = Frame::deserialize_owned(reader).map_err(|source| ListError::Decode {
            index,
            expected,
            source,
        })?;

        if &frame.id != expected.id() {
            tracing::debug!(
                index,
                found = %sanitize(&frame.id),
                %expected,
                "unexpected tag"
            );
            return Err(ListError::UnexpectedTag {
                index,
                found: frame.id,
                expected,
            });
        }

        entries.push(TagEntry {
            id: expected,
            label: expected.label(),
            text: frame.display_text(),
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ser::Serialize;
    use std::io::Cursor;

    fn container(ids: &[&[u8; 4]]) -> Vec<u8> {
        let mut out = vec![];
        TagHeader::new([3, 0, 0, 0, 0, 0, 0]).write(&mut out).unwrap();
        for (i, id) in ids.iter().enumerate() {
            let content = format!("value {}", i);
            Frame::new(**id, [0; 3], content.into_bytes())
                .unwrap()
                .write(&mut out)
                .unwrap();
        }
        out
    }

    fn canonical_ids() -> Vec<&'static [u8; 4]> {
        FrameId::ALL.iter().map(|x| x.id()).collect()
    }

    #[test]
    fn lists_all_frames_in_order() {
        let entries = list_tags(&mut Cursor::new(container(&canonical_ids()))).unwrap();
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].label, "TITLE");
        assert_eq!(entries[0].text, "value 0");
        assert_eq!(entries[5].id, FrameId::Comment);
        assert_eq!(entries[5].text, "value 5");
    }

    #[test]
    fn renders_title_scenario() {
        let mut bytes = b"ID3\x03\x00\x00\x00\x00\x00\x00".to_vec();
        bytes.extend_from_slice(b"TIT2\x00\x00\x00\x06\x00\x00\x00Hi\0\0\0");
        let mut cursor = Cursor::new(bytes);

        // Only one frame is present, so the walk fails on the second.
        let err = list_tags(&mut cursor).unwrap_err();
        assert!(matches!(
            err,
            ListError::Decode {
                index: 1,
                expected: FrameId::Artist,
                ..
            }
        ));

        cursor.seek(SeekFrom::Start(HEADER_LEN as u64)).unwrap();
        let frame = Frame::deserialize_owned(&mut cursor).unwrap();
        assert_eq!(
            format!("{} | {}", FrameId::Title.label(), frame.display_text()),
            "TITLE | Hi..."
        );
    }

    #[test]
    fn unexpected_tag_halts_listing() {
        let mut ids = canonical_ids();
        ids[3] = b"XXXX";
        let bytes = container(&ids);
        let frame_four_end = bytes.len() as u64;
        let mut cursor = Cursor::new(bytes);

        let err = list_tags(&mut cursor).unwrap_err();
        match err {
            ListError::UnexpectedTag {
                index,
                found,
                expected,
            } => {
                assert_eq!(index, 3);
                assert_eq!(&found, b"XXXX");
                assert_eq!(expected, FrameId::Year);
            }
            e => panic!("unexpected error: {:?}", e),
        }

        // Frames 4 and 5 were never read.
        let remaining = frame_four_end - cursor.position();
        assert_eq!(remaining, 2 * (11 + 7));
    }

    #[test]
    fn sanitizes_payload() {
        let mut out = vec![];
        TagHeader::new([0; 7]).write(&mut out).unwrap();
        for id in FrameId::ALL.iter() {
            Frame::new(*id.id(), [0; 3], vec![7, 65, 0xff])
                .unwrap()
                .write(&mut out)
                .unwrap();
        }
        let entries = list_tags(&mut Cursor::new(out)).unwrap();
        assert!(entries.iter().all(|x| x.text == ".A."));
    }
}
