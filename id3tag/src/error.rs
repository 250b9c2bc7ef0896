use std::path::PathBuf;

use id3tag_format::{EditError, ListError, OpenError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid filename `{}`; must be a .mp3 file", .path.display())]
    InvalidExtension { path: PathBuf },

    #[error("Missing tag option; use one of -t/-a/-A/-y/-m/-c")]
    MissingTagOption,

    #[error("Only one tag option may be given at a time")]
    MultipleTagOptions,

    #[error("Year must contain exactly 4 digits, got `{value}`")]
    InvalidYear { value: String },

    #[error("Cannot open `{}`", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: OpenError,
    },

    #[error("Cannot read tags of `{}`", .path.display())]
    List {
        path: PathBuf,
        #[source]
        source: ListError,
    },

    #[error("Cannot edit `{}`", .path.display())]
    Edit {
        path: PathBuf,
        #[source]
        source: EditError,
    },
}
