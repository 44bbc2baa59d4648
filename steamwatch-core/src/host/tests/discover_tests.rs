use crate::error::{EXIT_STEAM_NOT_FOUND, MonitorError};
use crate::host::{
    RegistryHive, STEAM_REGISTRY_KEYS, candidate_roots, dedup_in_order, find_steam_root,
    is_steam_root, locate_steam, registry_roots,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn steam_root_requires_steamapps() {
    // Arrange
    let dir = tempdir().unwrap();
    let root = dir.path();

    // Act / Assert
    assert!(!is_steam_root(root));
    fs::create_dir(root.join("steamapps")).unwrap();
    assert!(is_steam_root(root));
}

#[test]
fn first_valid_candidate_wins() {
    // Arrange
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    fs::create_dir_all(a.join("steamapps")).unwrap();
    fs::create_dir_all(b.join("steamapps")).unwrap();

    // Act
    let root = find_steam_root(vec![missing, a.clone(), b]).unwrap();

    // Assert
    assert_eq!(root, a);
}

#[test]
fn explicit_dir_is_the_only_candidate() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("steamapps")).unwrap();

    assert_eq!(locate_steam(Some(dir.path())).unwrap(), dir.path());
}

#[test]
fn invalid_explicit_dir_is_fatal() {
    // Arrange
    let dir = tempdir().unwrap();

    // Act
    let err = locate_steam(Some(dir.path())).unwrap_err();

    // Assert
    match &err {
        MonitorError::SteamNotFound { searched } => {
            assert_eq!(searched, &vec![dir.path().to_path_buf()]);
        }
        other => panic!("Expected SteamNotFound, got {:?}", other),
    }
    assert_eq!(err.exit_code(), EXIT_STEAM_NOT_FOUND);
}

//-----------------------------------------------------------------------------
// Platform candidates
//-----------------------------------------------------------------------------

#[test]
fn registry_keys_prefer_current_user_then_local_machine() {
    let keys: Vec<(RegistryHive, &str, &str)> = STEAM_REGISTRY_KEYS.to_vec();

    assert_eq!(
        keys,
        vec![
            (RegistryHive::CurrentUser, r"Software\Valve\Steam", "SteamPath"),
            (RegistryHive::CurrentUser, r"Software\Valve\Steam", "InstallPath"),
            (
                RegistryHive::LocalMachine,
                r"SOFTWARE\WOW6432Node\Valve\Steam",
                "InstallPath"
            ),
            (RegistryHive::LocalMachine, r"SOFTWARE\Valve\Steam", "InstallPath"),
        ]
    );
}

#[cfg(not(windows))]
#[test]
fn registry_is_not_consulted_off_windows() {
    assert!(registry_roots().is_empty());
}

#[cfg(windows)]
#[test]
fn registry_entries_lead_the_candidates() {
    // Arrange
    let registry = registry_roots();

    // Act
    let candidates = candidate_roots();

    // Assert
    let expected = dedup_in_order(registry);
    assert_eq!(candidates[..expected.len()], expected[..]);
}

#[test]
fn dedup_keeps_first_occurrence_order() {
    // Arrange
    let paths = vec![
        PathBuf::from("D:/Steam"),
        PathBuf::from("C:/Program Files (x86)/Steam"),
        PathBuf::from("D:/Steam"),
    ];

    // Act
    let unique = dedup_in_order(paths);

    // Assert
    assert_eq!(
        unique,
        vec![
            PathBuf::from("D:/Steam"),
            PathBuf::from("C:/Program Files (x86)/Steam"),
        ]
    );
}

#[test]
fn candidates_have_no_repeats() {
    let candidates = candidate_roots();

    for (i, path) in candidates.iter().enumerate() {
        assert!(!candidates[i + 1..].contains(path), "{} repeated", path.display());
    }
}
