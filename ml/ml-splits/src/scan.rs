//! Dataset directory listing.
//!
//! Image datasets are usually laid out as one directory per class. A flat
//! listing of that tree is a quick sanity check before loading anything.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{DatasetError, Result};

/// Lists a directory tree, one line per file.
///
/// Directories are walked top-down. A directory that directly contains files
/// contributes one `"{dir}/{file}"` line per file; a directory with no files
/// contributes a single `"{dir}/"` line. Entries are visited in name order.
/// Every line ends with `\n`.
///
/// Symbolic links to directories are neither listed nor followed. A
/// subdirectory that cannot be read is skipped with a warning.
///
/// # Errors
///
/// Returns [`DatasetError::Io`] if `root` is not a readable directory.
///
/// # Example
///
/// ```no_run
/// use ml_splits::scan_tree;
///
/// let listing = scan_tree("data/digits")?;
/// print!("{listing}");
/// # Ok::<(), ml_splits::DatasetError>(())
/// ```
pub fn scan_tree(root: impl AsRef<Path>) -> Result<String> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(DatasetError::io(format!(
            "not a directory: {}",
            root.display()
        )));
    }

    let mut tree = String::new();
    let mut files_seen = 0_usize;
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let (subdirs, files) = match read_sorted(&dir) {
            Ok(entries) => entries,
            Err(err) if dir.as_path() != root => {
                warn!(dir = %dir.display(), error = %err, "Skipping unreadable directory");
                continue;
            }
            Err(err) => return Err(err),
        };
        let prefix = dir.to_string_lossy();

        if files.is_empty() {
            tree.push_str(&prefix);
            tree.push_str("/\n");
        }
        for file in &files {
            tree.push_str(&prefix);
            tree.push('/');
            tree.push_str(&file.to_string_lossy());
            tree.push('\n');
        }
        files_seen += files.len();

        // Reverse so the stack yields subdirectories in name order.
        pending.extend(subdirs.into_iter().rev());
    }

    info!(root = %root.display(), files = files_seen, "Scanned dataset directory");

    Ok(tree)
}

/// Reads a directory into sorted `(subdirectory paths, file names)`.
///
/// Links to directories are dropped; links to anything else count as files.
fn read_sorted(dir: &Path) -> Result<(Vec<PathBuf>, Vec<std::ffi::OsString>)> {
    let mut subdirs = Vec::new();
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            subdirs.push(entry.path());
        } else if file_type.is_symlink() && entry.path().is_dir() {
            debug!(link = %entry.path().display(), "Not following directory link");
        } else {
            files.push(entry.file_name());
        }
    }
    subdirs.sort();
    files.sort();
    Ok((subdirs, files))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn scan_missing_root() {
        let result = scan_tree("/definitely/not/a/real/dir");
        assert!(matches!(result, Err(DatasetError::Io(_))));
    }

    #[test]
    fn scan_empty_root() {
        let dir = tempdir().unwrap();
        let listing = scan_tree(dir.path()).unwrap();
        assert_eq!(listing, format!("{}/\n", dir.path().display()));
    }

    #[test]
    fn scan_class_folders() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("train/cat")).unwrap();
        fs::create_dir_all(root.join("train/dog")).unwrap();
        fs::create_dir_all(root.join("test")).unwrap();
        fs::write(root.join("train/cat/b.png"), b"").unwrap();
        fs::write(root.join("train/cat/a.png"), b"").unwrap();
        fs::write(root.join("train/dog/c.png"), b"").unwrap();
        fs::write(root.join("README"), b"").unwrap();

        let listing = scan_tree(root).unwrap();
        let r = root.display();
        let expected = format!(
            "{r}/README\n\
             {r}/test/\n\
             {r}/train/\n\
             {r}/train/cat/a.png\n\
             {r}/train/cat/b.png\n\
             {r}/train/dog/c.png\n"
        );
        assert_eq!(listing, expected);
    }

    #[cfg(unix)]
    #[test]
    fn scan_skips_directory_links() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("real")).unwrap();
        fs::write(root.join("real/a.png"), b"").unwrap();
        fs::write(root.join("notes.txt"), b"").unwrap();
        std::os::unix::fs::symlink(root.join("real"), root.join("link")).unwrap();
        std::os::unix::fs::symlink(root.join("notes.txt"), root.join("notes.lnk")).unwrap();

        let listing = scan_tree(root).unwrap();
        let r = root.display();
        let expected = format!(
            "{r}/notes.lnk\n\
             {r}/notes.txt\n\
             {r}/real/a.png\n"
        );
        assert_eq!(listing, expected);
    }

    #[cfg(unix)]
    #[test]
    fn scan_skips_unreadable_subdirectory() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let root = dir.path();
        let locked = root.join("locked");
        fs::create_dir_all(locked.join("inner")).unwrap();
        fs::create_dir_all(root.join("open")).unwrap();
        fs::write(root.join("open/a.png"), b"").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can read it anyway; nothing to check then.
        let readable = fs::read_dir(&locked).is_ok();
        let listing = scan_tree(root);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if readable {
            return;
        }

        let r = root.display();
        assert_eq!(listing.unwrap(), format!("{r}/\n{r}/open/a.png\n"));
    }

    #[test]
    fn scan_file_root_is_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("data.csv");
        fs::write(&file, b"x,y\n").unwrap();
        assert!(scan_tree(&file).is_err());
    }
}
