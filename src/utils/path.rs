//! Sibling-file naming for outputs, part files and the concat manifest

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix inserted before the extension of the final output
pub const OUTPUT_SUFFIX: &str = "-SponsorBlocked";

/// Extension appended to the input path for the concat manifest
pub const MANIFEST_EXTENSION: &str = ".list.txt";

/// Insert `suffix` between the file stem and the extension
///
/// `dir/video.mp4` + `-x` gives `dir/video-x.mp4`; a path without an
/// extension just gets the suffix appended.
pub fn insert_name_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::new();
    if let Some(stem) = path.file_stem() {
        name.push(stem);
    }
    name.push(suffix);
    if let Some(extension) = path.extension() {
        name.push(".");
        name.push(extension);
    }
    path.with_file_name(name)
}

/// `<stem>-SponsorBlocked<ext>` next to the input
pub fn output_path(input: &Path) -> PathBuf {
    insert_name_suffix(input, OUTPUT_SUFFIX)
}

/// `<stem>-part{index}<ext>` next to the input
pub fn part_path(input: &Path, index: usize) -> PathBuf {
    insert_name_suffix(input, &format!("-part{}", index))
}

/// `<input-path>.list.txt`
pub fn manifest_path(input: &Path) -> PathBuf {
    let mut path = input.as_os_str().to_owned();
    path.push(MANIFEST_EXTENSION);
    PathBuf::from(path)
}

/// `path` unchanged when absolute, otherwise joined onto `base`
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Path as text with every backslash turned into a forward slash
pub fn forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
