use std::fs::remove_dir_all;

use crate::{
    error::{Error, Result},
    options::PipelineOptions,
};

/// Remove the font and stylesheet destinations of a target.
pub fn clean(options: &PipelineOptions) -> Result<usize> {
    let mut removed = 0;

    for dir in [&options.font_destination, &options.css_destination] {
        if dir.exists() {
            remove_dir_all(dir).map_err(|e| Error::io("Failed to remove", dir.as_path(), e))?;
            println!("Removed {}", dir.display());
            removed += 1;
        } else {
            println!("Skipped {} (not found)", dir.display());
        }
    }

    Ok(removed)
}
