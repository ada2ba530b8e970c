//! Capability-based file helpers for the dataset cache.
//!
//! Paths are UTF-8 (`camino`) and every operation goes through a `cap-std`
//! directory handle opened for the path's parent.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open `path` for reading.
pub(crate) fn open_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Report whether `path` names an existing regular file.
///
/// A missing file or missing parent directory is `Ok(false)`.
pub(crate) fn is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = match parent_dir_and_name(path) {
        Ok(parts) => parts,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    match dir.metadata(name.as_str()) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Remove the file at `path`, reporting whether anything was removed.
pub(crate) fn remove_file_if_present(path: &Utf8Path) -> io::Result<bool> {
    if !is_file(path)? {
        return Ok(false);
    }
    let (dir, name) = parent_dir_and_name(path)?;
    dir.remove_file(name.as_str())?;
    Ok(true)
}

/// Create every missing ancestor directory of `path`.
pub(crate) fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let parent = parent_of(path);
    if parent == Utf8Path::new(".") {
        return Ok(());
    }
    let (root, relative) = split_root(parent);
    if relative.as_str().is_empty() {
        return Ok(());
    }
    fs_utf8::Dir::open_ambient_dir(root, ambient_authority())?.create_dir_all(&relative)
}

/// Directory that holds `path`, `.` for a bare file name.
pub(crate) fn parent_of(path: &Utf8Path) -> &Utf8Path {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    }
}

fn parent_dir_and_name(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent_of(path), ambient_authority())?;
    Ok((dir, name))
}

/// Split `path` into the leading part that may leave the current directory
/// (root, prefix, `.` and `..` components) and the remainder below it.
fn split_root(path: &Utf8Path) -> (Utf8PathBuf, Utf8PathBuf) {
    let mut root = Utf8PathBuf::new();
    let mut relative = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            camino::Utf8Component::Normal(_) => relative.push(component.as_str()),
            _ if relative.as_str().is_empty() => root.push(component.as_str()),
            other => relative.push(other.as_str()),
        }
    }
    if root.as_str().is_empty() {
        root.push(".");
    }
    (root, relative)
}
