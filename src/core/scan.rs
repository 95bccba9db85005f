//! Read-only filesystem traversal shared by every rule.
//!
//! Validators are pure functions of the on-disk tree: collection here never
//! writes, never follows an error into an abort, and always reports paths
//! relative to the scanned root. Unreadable directories are skipped so a
//! single bad entry cannot sink a whole scan.

use std::fs;
use std::path::{Path, PathBuf};

/// True when any path component begins with the literal token `archive`.
/// Previously-archived material is exempt from every rule.
pub fn is_archived(relative: &Path) -> bool {
    relative.components().any(|part| {
        part.as_os_str()
            .to_str()
            .is_some_and(|s| s.starts_with("archive"))
    })
}

/// Recursively collect regular files under `root`, skipping `.git` and
/// `target` trees. Returns an empty list when `root` is not a directory.
pub fn collect_files(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    recurse(root, &mut out);
    out
}

fn recurse(dir: &Path, out: &mut Vec<PathBuf>) {
    if !dir.is_dir() {
        return;
    }

    let name = dir.file_name().and_then(|s| s.to_str()).unwrap_or("");
    if name == ".git" || name == "target" {
        return;
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            recurse(&path, out);
        } else if path.is_file() {
            out.push(path);
        }
    }
}

/// Recursive collection filtered to the given extensions (no leading dot),
/// with archive subtrees already excluded.
pub fn collect_with_extensions(root: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    collect_files(root)
        .into_iter()
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| extensions.contains(&ext))
        })
        .filter(|path| !is_archived(relative_path(root, path)))
        .collect()
}

/// Non-recursive listing of regular files directly under `dir`.
pub fn list_files(dir: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return out,
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_file() {
            out.push(path);
        }
    }
    out.sort();
    out
}

/// The path of `file` relative to `root`; falls back to `file` itself when
/// the prefix does not apply.
pub fn relative_path<'a>(root: &Path, file: &'a Path) -> &'a Path {
    file.strip_prefix(root).unwrap_or(file)
}

/// Root-relative display string used in every violation record.
pub fn rel_display(root: &Path, file: &Path) -> String {
    relative_path(root, file).display().to_string()
}
