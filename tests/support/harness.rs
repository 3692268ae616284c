use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Sheet names of the CSV fixtures under tests/fixtures/tablas
pub const TABLES: [&str; 8] = [
    "PRODUCTOS",
    "FORMAS_TRANSFORMACION",
    "ESTADOS_PRODUCTO",
    "METODO_PRODUCCION",
    "ZONAS_FAO",
    "ARTES_PESCA",
    "EXPEDIDORES",
    "TRAZAS_CONFIG",
];

/// Isolated working directory with a copy of the reference CSVs.
///
/// HOME and XDG_CONFIG_HOME point inside the temp dir so no global config
/// leaks into a run.
pub struct TestHarness {
    pub dir: TempDir,
    pub data_dir: PathBuf,
    pub binary: PathBuf,
}

impl TestHarness {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = dir.path().join("tablas");
        fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/tablas");
        for table in TABLES {
            let name = format!("{}.csv", table);
            fs::copy(fixtures.join(&name), data_dir.join(&name)).expect("Failed to copy fixture");
        }

        TestHarness {
            dir,
            data_dir,
            binary: PathBuf::from(env!("CARGO_BIN_EXE_etiquetas")),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run the binary in the harness directory against the fixture tables.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.binary)
            .arg("--data-dir")
            .arg(&self.data_dir)
            .args(args)
            .current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env("NO_COLOR", "1")
            .env_remove("ETIQUETAS_QUIET")
            .output()
            .expect("Failed to run etiquetas")
    }

    /// Replace one fixture table with `content`.
    #[allow(dead_code)]
    pub fn write_table(&self, table: &str, content: &str) {
        fs::write(self.data_dir.join(format!("{}.csv", table)), content)
            .expect("Failed to write table");
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
