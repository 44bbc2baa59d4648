use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use steamwatch_core::host::SteamInstall;
use tempfile::TempDir;

/// Reads a content log from `fixtures/`.
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name);

    fs::read_to_string(&path).unwrap_or_else(|e| panic!("fixture {}: {e}", path.display()))
}

/// A throwaway Steam installation on disk.
///
/// Holds a `steamapps/` directory, a `logs/` directory and whatever manifests, extra
/// libraries and log content the test adds. Removed on drop.
pub struct FakeSteam {
    dir: TempDir,
    extra_libraries: Vec<PathBuf>,
}

impl FakeSteam {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("steamapps")).expect("steamapps");
        fs::create_dir_all(dir.path().join("logs")).expect("logs");
        Self {
            dir,
            extra_libraries: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn log_path(&self) -> PathBuf {
        self.root().join("logs").join("content_log.txt")
    }

    /// Writes an app manifest into the main library.
    pub fn with_manifest(self, app_id: &str, name: &str) -> Self {
        write_manifest(self.root(), app_id, name);
        self
    }

    /// Adds a secondary library next to the install and registers it in
    /// `libraryfolders.vdf`. Returns the library root.
    pub fn add_library(&mut self, dir_name: &str) -> PathBuf {
        let library = self.root().join(dir_name);
        fs::create_dir_all(library.join("steamapps")).expect("library steamapps");
        self.extra_libraries.push(library.clone());
        self.write_library_folders();
        library
    }

    pub fn write_log(&self, contents: &str) {
        fs::write(self.log_path(), contents).expect("write content log");
    }

    pub fn append_log(&self, contents: &str) {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(self.log_path())
            .expect("open content log");
        file.write_all(contents.as_bytes()).expect("append content log");
    }

    pub fn install(&self) -> SteamInstall {
        SteamInstall::open(self.root().to_path_buf())
    }

    fn write_library_folders(&self) {
        let mut vdf = String::from("\"libraryfolders\"\n{\n");
        vdf.push_str(&library_entry(0, self.root()));
        for (i, library) in self.extra_libraries.iter().enumerate() {
            vdf.push_str(&library_entry(i + 1, library));
        }
        vdf.push_str("}\n");

        fs::write(
            self.root().join("steamapps").join("libraryfolders.vdf"),
            vdf,
        )
        .expect("write libraryfolders.vdf");
    }
}

impl Default for FakeSteam {
    fn default() -> Self {
        Self::new()
    }
}

pub fn write_manifest(library: &Path, app_id: &str, name: &str) {
    let manifest = format!(
        "\"AppState\"\n{{\n\t\"appid\"\t\t\"{app_id}\"\n\t\"Universe\"\t\t\"1\"\n\t\"name\"\t\t\"{name}\"\n\t\"StateFlags\"\t\t\"1026\"\n}}\n"
    );
    fs::write(
        library
            .join("steamapps")
            .join(format!("appmanifest_{app_id}.acf")),
        manifest,
    )
    .expect("write manifest");
}

fn library_entry(index: usize, path: &Path) -> String {
    format!(
        "\t\"{index}\"\n\t{{\n\t\t\"path\"\t\t\"{}\"\n\t\t\"label\"\t\t\"\"\n\t}}\n",
        path.display()
    )
}
