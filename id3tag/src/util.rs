use std::path::Path;

use id3tag_format::{FrameId, TagEntry, TagFileReader};

use crate::error::{Error, Result};

/// Only files ending in `.mp3` are accepted.
pub fn validate_mp3_path(path: &Path) -> Result<()> {
    match path.extension().and_then(|x| x.to_str()) {
        Some("mp3") => Ok(()),
        _ => Err(Error::InvalidExtension {
            path: path.to_path_buf(),
        }),
    }
}

/// Year content must be four ASCII digits; other frames take any text.
pub fn validate_content(frame: FrameId, content: &str) -> Result<()> {
    if frame == FrameId::Year
        && (content.len() != 4 || !content.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(Error::InvalidYear {
            value: content.to_string(),
        });
    }
    Ok(())
}

pub fn read_tags(path: &Path) -> Result<Vec<TagEntry>> {
    let mut reader = TagFileReader::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    reader.list_tags().map_err(|source| Error::List {
        path: path.to_path_buf(),
        source,
    })
}

pub fn format_table(entries: &[TagEntry]) -> String {
    let mut out = String::new();
    out.push_str(&format!(" {:<10} | {}\n", "Tag", "Content"));
    out.push_str(&format!("{}\n", "-".repeat(60)));
    for entry in entries {
        out.push_str(&format!(" {:<10} | {}\n", entry.label, entry.text));
    }
    out
}

pub fn format_json(entries: &[TagEntry]) -> serde_json::Value {
    serde_json::Value::Array(
        entries
            .iter()
            .map(|entry| {
                serde_json::json!({
                    "id": entry.id.as_str(),
                    "label": entry.label,
                    "text": entry.text,
                })
            })
            .collect(),
    )
}
