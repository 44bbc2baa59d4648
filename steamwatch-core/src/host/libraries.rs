use crate::host::discover::is_steam_root;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

static LIBRARY_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""path"\s*"([^"]+)""#).expect("library path pattern is valid"));

/// Extracts every `"path" "<dir>"` entry of a `libraryfolders.vdf` document.
///
/// VDF escapes backslashes, so Windows paths are unescaped.
pub fn parse_library_folders(vdf: &str) -> Vec<PathBuf> {
    LIBRARY_PATH
        .captures_iter(vdf)
        .filter_map(|caps| caps.get(1))
        .map(|m| PathBuf::from(m.as_str().replace(r"\\", r"\")))
        .collect()
}

/// The Steam root followed by each additional library that exists on disk.
///
/// A missing or unreadable `libraryfolders.vdf` only means there are no extra libraries.
pub fn library_roots(steam_dir: &Path) -> Vec<PathBuf> {
    let mut roots = vec![steam_dir.to_path_buf()];
    let vdf = steam_dir.join("steamapps").join("libraryfolders.vdf");

    let text = match fs::read(&vdf) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return roots,
        Err(e) => {
            tracing::warn!(error = %e, path = %vdf.display(), "failed to read library folders");
            return roots;
        }
    };

    for dir in parse_library_folders(&text) {
        if is_steam_root(&dir) && !roots.contains(&dir) {
            roots.push(dir);
        }
    }
    roots
}
