use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

static MANIFEST_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""name"\s*"([^"]+)""#).expect("manifest name pattern is valid"));

pub fn manifest_path(library: &Path, item_id: &str) -> PathBuf {
    library
        .join("steamapps")
        .join(format!("appmanifest_{item_id}.acf"))
}

/// First library holding a manifest for `item_id`.
pub fn find_library_for_app<'a>(libraries: &'a [PathBuf], item_id: &str) -> Option<&'a Path> {
    libraries
        .iter()
        .find(|lib| manifest_path(lib, item_id).exists())
        .map(PathBuf::as_path)
}

/// The `"name"` value of an app manifest, trimmed.
pub fn manifest_name(acf: &str) -> Option<String> {
    MANIFEST_NAME
        .captures(acf)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Display name of `item_id` from its manifest in `library`, or `appid <id>`.
pub fn game_name(library: &Path, item_id: &str) -> String {
    fs::read(manifest_path(library, item_id))
        .ok()
        .and_then(|bytes| manifest_name(&String::from_utf8_lossy(&bytes)))
        .unwrap_or_else(|| format!("appid {item_id}"))
}
