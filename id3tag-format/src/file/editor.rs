use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::de::DeserializeOwned;
use crate::error::EditError;
use crate::frame::{Frame, FrameId, Replacement};
use crate::header::TagHeader;
use crate::ser::{encode_frame, Serialize};

use super::open_container;

/// Progress of an edit, from opening the temporary container to swapping it
/// in for the original.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditState {
    Init,
    HeaderCopied,
    /// The number of frames decoded and re-encoded so far.
    FramesProcessed(usize),
    TailCopied,
    Committed,
    Failed,
}

/// Replaces the content of one frame of a container on disk.
///
/// The edited container is written to a temporary file next to the original,
/// which is then removed and replaced by renaming the temporary file. A crash
/// between those two calls loses the original.
#[derive(Debug)]
pub struct TagEditor {
    path: PathBuf,
    temp_path: Option<PathBuf>,
    state: EditState,
}

impl TagEditor {
    pub fn new<P: AsRef<Path>>(path: P) -> TagEditor {
        TagEditor {
            path: path.as_ref().to_path_buf(),
            temp_path: None,
            state: EditState::Init,
        }
    }

    /// Overrides where the edited container is written before it replaces the original.
    pub fn temp_path<P: AsRef<Path>>(mut self, path: P) -> TagEditor {
        self.temp_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    /// The temporary path in use: the override, or `<file name>.tmp` beside the original.
    pub fn resolved_temp_path(&self) -> PathBuf {
        match &self.temp_path {
            Some(path) => path.clone(),
            None => {
                let mut name = self
                    .path
                    .file_name()
                    .map(OsString::from)
                    .unwrap_or_default();
                name.push(".tmp");
                self.path.with_file_name(name)
            }
        }
    }

    /// Rewrites the container with `frame` holding `content`.
    ///
    /// On failure the original is left untouched, except for a failed swap
    /// (`EditError::Replace`) where the edited container remains at the
    /// temporary path. Temporary files are never cleaned up.
    pub fn edit<C: Into<Replacement>>(
        &mut self,
        frame: FrameId,
        content: C,
    ) -> Result<(), EditError> {
        let replacement = content.into();
        let result = self.edit_inner(frame, &replacement);
        if let Err(e) = &result {
            tracing::debug!(
                path = %self.path.display(),
                state = ?self.state,
                "edit failed: {}",
                e
            );
            self.transition(EditState::Failed);
        }
        result
    }

    fn transition(&mut self, state: EditState) {
        tracing::debug!(from = ?self.state, to = ?state, "edit state");
        self.state = state;
    }

    fn edit_inner(&mut self, frame: FrameId, replacement: &Replacement) -> Result<(), EditError> {
        let temp_path = self.resolved_temp_path();

        tracing::info!(
            path = %self.path.display(),
            temp = %temp_path.display(),
            frame = %frame,
            "editing tag"
        );

        // Both streams are closed at the end of this scope, before the swap.
        {
            let (mut source, _) = open_container(&self.path)?;

            if is_same_file(&self.path, &temp_path) {
                return Err(EditError::TempIsSource { path: temp_path });
            }

            let file = File::create(&temp_path).map_err(|source| EditError::CreateTemp {
                path: temp_path.clone(),
                source,
            })?;
            let mut dest = BufWriter::new(file);

            copy_header(&mut source, &mut dest)?;
            self.transition(EditState::HeaderCopied);

            for index in 0..=frame.index() {
                let target = if index == frame.index() {
                    Some(replacement)
                } else {
                    None
                };
                process_frame(&mut source, &mut dest, index, target)?;
                self.transition(EditState::FramesProcessed(index + 1));
            }

            let bytes = copy_tail(&mut source, &mut dest)?;
            dest.into_inner()
                .map_err(|e| EditError::TailCopy(e.into_error()))?;
            tracing::debug!(bytes, "copied tail");
        }
        self.transition(EditState::TailCopied);

        commit(&self.path, &temp_path)?;
        self.transition(EditState::Committed);

        tracing::info!(path = %self.path.display(), "tag updated");
        Ok(())
    }
}

/// Replaces the content of `frame` in the file at `path`, using the default temporary path.
pub fn edit_tag<P: AsRef<Path>, C: Into<Replacement>>(
    path: P,
    frame: FrameId,
    content: C,
) -> Result<(), EditError> {
    TagEditor::new(path).edit(frame, content)
}

/// Streams `source` into `dest` with `frame` holding `content`.
///
/// Frames up to and including the target are decoded and re-encoded in
/// order without checking their identifiers; everything after the target is
/// copied verbatim. Returns the number of tail bytes copied.
pub fn rewrite<R: Read + Seek, W: Write, C: Into<Replacement>>(
    source: &mut R,
    dest: &mut W,
    frame: FrameId,
    content: C,
) -> Result<u64, EditError> {
    let replacement = content.into();

    copy_header(source, dest)?;
    for index in 0..=frame.index() {
        let target = if index == frame.index() {
            Some(&replacement)
        } else {
            None
        };
        process_frame(source, dest, index, target)?;
    }
    copy_tail(source, dest)
}

#[inline(always)]
fn copy_header<R: Read + Seek, W: Write>(source: &mut R, dest: &mut W) -> Result<(), EditError> {
    source
        .seek(SeekFrom::Start(0))
        .map_err(|e| EditError::HeaderRead(e.into()))?;
    let header = TagHeader::deserialize_owned(source).map_err(EditError::HeaderRead)?;
    header.write(dest).map_err(EditError::HeaderWrite)
}

#[inline(always)]
fn process_frame<R: Read + Seek, W: Write>(
    source: &mut R,
    dest: &mut W,
    index: usize,
    replacement: Option<&Replacement>,
) -> Result<(), EditError> {
    let frame =
        Frame::deserialize_owned(source).map_err(|source| EditError::Decode { index, source })?;
    encode_frame(dest, &frame, replacement).map_err(|source| EditError::Encode { index, source })
}

#[inline(always)]
fn copy_tail<R: Read, W: Write>(source: &mut R, dest: &mut W) -> Result<u64, EditError> {
    std::io::copy(source, dest).map_err(EditError::TailCopy)
}

/// Whether `temp_path` names the file at `path`, through links or relative components.
fn is_same_file(path: &Path, temp_path: &Path) -> bool {
    match (std::fs::canonicalize(path), std::fs::canonicalize(temp_path)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn commit(original: &Path, temp_path: &Path) -> Result<(), EditError> {
    std::fs::remove_file(original)
        .and_then(|_| std::fs::rename(temp_path, original))
        .map_err(|source| EditError::Replace {
            original: original.to_path_buf(),
            temp_path: temp_path.to_path_buf(),
            source,
        })
}
