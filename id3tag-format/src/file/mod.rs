use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::de::DeserializeOwned;
use crate::error::OpenError;
use crate::header::TagHeader;

mod editor;
mod reader;

pub use editor::{edit_tag, rewrite, EditState, TagEditor};
pub use reader::{list_tags, TagEntry, TagFileReader};

#[inline(always)]
fn read_header<R: Read + Seek>(file: &mut R) -> Result<TagHeader, crate::error::DecodeError> {
    file.seek(SeekFrom::Start(0))?;
    TagHeader::deserialize_owned(file)
}

/// Opens `path` read-only and checks the `ID3` magic, leaving the stream
/// rewound to the start of the container.
fn open_container(path: &Path) -> Result<(BufReader<File>, TagHeader), OpenError> {
    let file = File::open(path).map_err(|source| OpenError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);

    let header = read_header(&mut reader).map_err(|source| OpenError::Header {
        path: path.to_path_buf(),
        source,
    })?;

    if !header.has_magic() {
        return Err(OpenError::BadMagic {
            path: path.to_path_buf(),
            found: *header.magic(),
        });
    }

    reader
        .seek(SeekFrom::Start(0))
        .map_err(|source| OpenError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    Ok((reader, header))
}
