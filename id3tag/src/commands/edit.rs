use std::path::PathBuf;

use id3tag_format::{FrameId, TagEditor};
use structopt::StructOpt;

use crate::error::{Error, Result};
use crate::util::{format_table, read_tags, validate_content, validate_mp3_path};

/// Which frame to replace. Exactly one switch must be given.
#[derive(Debug, Default, StructOpt)]
pub struct TagSelector {
    #[structopt(short = "t", long, help = "Edit song title")]
    title: bool,

    #[structopt(short = "a", long, help = "Edit artist name")]
    artist: bool,

    #[structopt(short = "A", long, help = "Edit album name")]
    album: bool,

    #[structopt(short = "y", long, help = "Edit year")]
    year: bool,

    #[structopt(short = "m", long, help = "Edit genre/content type")]
    genre: bool,

    #[structopt(short = "c", long, help = "Edit comment")]
    comment: bool,
}

impl TagSelector {
    pub fn frame(&self) -> Result<FrameId> {
        let selected = [
            (self.title, FrameId::Title),
            (self.artist, FrameId::Artist),
            (self.album, FrameId::Album),
            (self.year, FrameId::Year),
            (self.genre, FrameId::Genre),
            (self.comment, FrameId::Comment),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, frame)| *frame)
        .collect::<Vec<_>>();

        match selected.as_slice() {
            [frame] => Ok(*frame),
            [] => Err(Error::MissingTagOption),
            _ => Err(Error::MultipleTagOptions),
        }
    }
}

pub fn run(
    selector: TagSelector,
    content: String,
    path: PathBuf,
    temp_path: Option<PathBuf>,
) -> Result<()> {
    let frame = selector.frame()?;
    validate_content(frame, &content)?;
    validate_mp3_path(&path)?;

    let mut editor = TagEditor::new(&path);
    if let Some(temp_path) = temp_path {
        editor = editor.temp_path(temp_path);
    }

    editor
        .edit(frame, content.as_str())
        .map_err(|source| Error::Edit {
            path: path.clone(),
            source,
        })?;

    tracing::info!(path = %path.display(), frame = %frame, "updated tag");

    let entries = read_tags(&path)?;
    print!("{}", format_table(&entries));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_selector() {
        let selector = TagSelector {
            album: true,
            ..Default::default()
        };
        assert_eq!(selector.frame().unwrap(), FrameId::Album);
    }

    #[test]
    fn no_selector() {
        let err = TagSelector::default().frame().unwrap_err();
        assert!(matches!(err, Error::MissingTagOption));
    }

    #[test]
    fn several_selectors() {
        let selector = TagSelector {
            title: true,
            comment: true,
            ..Default::default()
        };
        assert!(matches!(
            selector.frame().unwrap_err(),
            Error::MultipleTagOptions
        ));
    }

    #[test]
    fn rejects_bad_year_before_touching_file() {
        let selector = TagSelector {
            year: true,
            ..Default::default()
        };
        let err = run(selector, "99".into(), PathBuf::from("missing.mp3"), None).unwrap_err();
        assert!(matches!(err, Error::InvalidYear { .. }));
    }
}
