// Shared test helpers for integration tests
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

/// Creates an empty plugin corpus: a temp dir holding a `plugins/` root.
pub fn corpus() -> (TempDir, PathBuf) {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let plugins = temp_dir.path().join("plugins");
    fs::create_dir_all(&plugins).expect("Failed to create plugin root");
    (temp_dir, plugins)
}

/// Creates `plugins/<name>/example/` and returns the example directory.
pub fn add_plugin(plugins: &Path, name: &str) -> PathBuf {
    let example = plugins.join(name).join("example");
    fs::create_dir_all(&example).expect("Failed to create example directory");
    example
}

/// Writes a well-formed config declaring `output` for `name`.
pub fn write_config(example: &Path, name: &str, output: &str) {
    let line = format!("Plugin {} inputfile input.csv outputfile {}\n", name, output);
    fs::write(example.join("config.txt"), line).expect("Failed to write config.txt");
}

/// Records a baseline for the produced file `produced_name`.
pub fn write_baseline(example: &Path, produced_name: &str, content: &str) {
    let path = example.join(format!("{}.expected", produced_name));
    fs::write(path, content).expect("Failed to write baseline");
}

/// Writes an executable shell script standing in for the pipeline binary.
/// The script receives the config path as its sole argument, exactly like
/// the real executable.
#[cfg(unix)]
pub fn fake_pipeline(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("pluma");
    let script = format!("#!/bin/sh\n{}\n", body);
    fs::write(&path, script).expect("Failed to write pipeline script");
    let mut perms = fs::metadata(&path).expect("Failed to stat script").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("Failed to mark script executable");
    path
}

/// A pipeline that writes `content` to `target` when invoked.
#[cfg(unix)]
pub fn pipeline_writing(dir: &Path, target: &Path, content: &str) -> PathBuf {
    fake_pipeline(
        dir,
        &format!("printf '%s' '{}' > '{}'", content, target.display()),
    )
}

/// A pipeline that does nothing at all.
#[cfg(unix)]
pub fn inert_pipeline(dir: &Path) -> PathBuf {
    fake_pipeline(dir, "exit 0")
}
