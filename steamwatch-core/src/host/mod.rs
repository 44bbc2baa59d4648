//! Steam installation adapters: locating the client, its library folders and the app
//! manifests that map an AppID to a game name.

mod discover;
mod libraries;
mod manifest;
#[cfg(test)]
mod tests;

pub use discover::*;
pub use libraries::*;
pub use manifest::*;

use crate::monitor::constants::CONTENT_LOG;
use std::path::{Path, PathBuf};

/// Resolves an AppID to something a person would recognise.
pub trait NameLookup {
    /// Never fails; unknown ids get a deterministic placeholder.
    fn display_name(&self, item_id: &str) -> String;
}

/// A located Steam client and the library roots it knows about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteamInstall {
    root: PathBuf,
    libraries: Vec<PathBuf>,
}

impl SteamInstall {
    /// Builds the install from a verified Steam root, reading its library folders.
    pub fn open(root: PathBuf) -> Self {
        let libraries = library_roots(&root);
        tracing::info!(
            root = %root.display(),
            libraries = libraries.len(),
            "steam installation opened"
        );
        Self { root, libraries }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn libraries(&self) -> &[PathBuf] {
        &self.libraries
    }

    pub fn content_log(&self) -> PathBuf {
        self.root.join(CONTENT_LOG)
    }
}

impl NameLookup for SteamInstall {
    fn display_name(&self, item_id: &str) -> String {
        let library = find_library_for_app(&self.libraries, item_id).unwrap_or(&self.root);
        game_name(library, item_id)
    }
}
