use std::path::PathBuf;

use crate::error::Result;
use crate::util::{format_json, format_table, read_tags, validate_mp3_path};

pub fn run(path: PathBuf, json: bool) -> Result<()> {
    validate_mp3_path(&path)?;
    let entries = read_tags(&path)?;

    if json {
        println!("{:#}", format_json(&entries));
    } else {
        print!("{}", format_table(&entries));
    }

    Ok(())
}
