use crate::error::MonitorError;
use std::path::{Path, PathBuf};

/// A directory is a Steam (library) root when it holds a `steamapps` folder.
pub fn is_steam_root(path: &Path) -> bool {
    path.join("steamapps").is_dir()
}

/// Registry hive holding a Steam install entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryHive {
    CurrentUser,
    LocalMachine,
}

/// Registry values recording where the Steam client lives, in lookup order.
pub const STEAM_REGISTRY_KEYS: &[(RegistryHive, &str, &str)] = &[
    (RegistryHive::CurrentUser, r"Software\Valve\Steam", "SteamPath"),
    (RegistryHive::CurrentUser, r"Software\Valve\Steam", "InstallPath"),
    (
        RegistryHive::LocalMachine,
        r"SOFTWARE\WOW6432Node\Valve\Steam",
        "InstallPath",
    ),
    (RegistryHive::LocalMachine, r"SOFTWARE\Valve\Steam", "InstallPath"),
];

/// Install directories recorded in the Windows registry. Missing keys are skipped.
#[cfg(windows)]
pub fn registry_roots() -> Vec<PathBuf> {
    use winreg::RegKey;
    use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE};

    STEAM_REGISTRY_KEYS
        .iter()
        .filter_map(|&(hive, subkey, value)| {
            let hkey = match hive {
                RegistryHive::CurrentUser => HKEY_CURRENT_USER,
                RegistryHive::LocalMachine => HKEY_LOCAL_MACHINE,
            };
            let path: String = RegKey::predef(hkey)
                .open_subkey(subkey)
                .and_then(|key| key.get_value(value))
                .ok()?;
            tracing::debug!(subkey, value, path = %path, "steam registry entry");
            Some(PathBuf::from(path))
        })
        .collect()
}

#[cfg(not(windows))]
pub fn registry_roots() -> Vec<PathBuf> {
    Vec::new()
}

/// Default install locations for the current platform, most likely first.
///
/// On Windows the registry entries come first, then the Program Files folders.
pub fn candidate_roots() -> Vec<PathBuf> {
    let mut roots = registry_roots();

    if cfg!(windows) {
        for var in ["ProgramFiles(x86)", "ProgramFiles"] {
            if let Some(dir) = std::env::var_os(var) {
                roots.push(PathBuf::from(dir).join("Steam"));
            }
        }
    }

    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".steam").join("steam"));
        roots.push(home.join(".steam").join("root"));
        // Flatpak
        roots.push(home.join(".var/app/com.valvesoftware.Steam/.local/share/Steam"));
    }

    // ~/.local/share/Steam on Linux, ~/Library/Application Support/Steam on macOS.
    if let Some(data) = dirs::data_local_dir() {
        roots.push(data.join("Steam"));
    }

    dedup_in_order(roots)
}

/// Drops repeated paths, keeping the first occurrence of each.
pub fn dedup_in_order(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut unique: Vec<PathBuf> = Vec::with_capacity(paths.len());
    for path in paths {
        if !unique.contains(&path) {
            unique.push(path);
        }
    }
    unique
}

/// Locates the Steam root.
///
/// An explicit directory is the only candidate when given; otherwise the platform
/// defaults are tried in order.
///
/// # Errors
///
/// Returns `MonitorError::SteamNotFound` listing every searched location when none of
/// them is a Steam root.
pub fn locate_steam(explicit: Option<&Path>) -> Result<PathBuf, MonitorError> {
    let candidates = match explicit {
        Some(dir) => vec![dir.to_path_buf()],
        None => candidate_roots(),
    };
    find_steam_root(candidates)
}

pub fn find_steam_root(candidates: Vec<PathBuf>) -> Result<PathBuf, MonitorError> {
    match candidates.iter().find(|dir| is_steam_root(dir)) {
        Some(root) => Ok(root.clone()),
        None => {
            tracing::error!(searched = ?candidates, "no steam installation found");
            Err(MonitorError::SteamNotFound {
                searched: candidates,
            })
        }
    }
}
