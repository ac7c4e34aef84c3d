use crate::features::normalize::FileFormat;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Checks if a directory entry is hidden (starts with '.').
fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.'))
}

fn is_supported_image(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| FileFormat::from_filename(name).is_some())
}

/// Recursively lists the HEIC/HEIF/JPEG/PNG files under `dir`, sorted by path.
///
/// Hidden entries are skipped unless `include_hidden` is set; a hidden
/// directory is not descended into. The first traversal error is returned.
pub fn list_image_files(dir: &Path, include_hidden: bool) -> Result<Vec<PathBuf>, walkdir::Error> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        // depth 0 is the root the caller asked for, even when it starts with '.'
        .filter_entry(|e| include_hidden || e.depth() == 0 || !is_hidden(e))
        .filter_map(|entry_result| match entry_result {
            Ok(entry) if entry.file_type().is_file() && is_supported_image(entry.path()) => {
                Some(Ok(entry.into_path()))
            }
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        })
        .collect()
}

/// Expands a mix of files and directories into the image files to process.
///
/// Files named explicitly are kept even when their extension is not
/// supported, so the caller can report them as unavailable.
pub fn expand_inputs(inputs: &[PathBuf], include_hidden: bool) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(list_image_files(input, include_hidden)?);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}
