use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::OnceLock;

use bmod_testkit::{target_dir as workspace_target_dir, write_fixture};

static BMOD_BIN: OnceLock<PathBuf> = OnceLock::new();

/// Write `bytes` as a fixture and return its path as a CLI argument.
pub(crate) fn fixture_arg(name: &str, bytes: &[u8]) -> String {
	write_fixture(name, bytes).to_string_lossy().into_owned()
}

pub(crate) fn run_bmod(args: &[&str]) -> Output {
	Command::new(bmod_bin()).args(args).output().expect("bmod command executes")
}

pub(crate) fn run_bmod_stdout(args: &[&str]) -> String {
	let output = run_bmod(args);
	assert!(
		output.status.success(),
		"bmod command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	String::from_utf8(output.stdout).expect("stdout should be utf-8")
}

pub(crate) fn run_bmod_json(args: &[&str]) -> serde_json::Value {
	let stdout = run_bmod_stdout(args);
	serde_json::from_str(&stdout).expect("stdout should be valid json")
}

fn bmod_bin() -> &'static PathBuf {
	BMOD_BIN.get_or_init(resolve_bmod_bin)
}

/// Build the `bmod` binary next to this test executable and return its path.
///
/// Unit tests of a bin crate get no `CARGO_BIN_EXE_*` variable, so the binary
/// is built on first use. The test executable lives in `<target>/<profile>/deps`.
fn resolve_bmod_bin() -> PathBuf {
	let test_exe = std::env::current_exe().expect("test executable path");
	let profile_dir = test_exe
		.parent()
		.and_then(|deps| deps.parent())
		.map_or_else(|| workspace_target_dir().join("debug"), Path::to_path_buf);
	let bin = profile_dir.join(if cfg!(windows) { "bmod.exe" } else { "bmod" });

	let mut build = Command::new("cargo");
	build.current_dir(env!("CARGO_MANIFEST_DIR")).args(["build", "--quiet", "--bin", "bmod"]);
	if !cfg!(debug_assertions) {
		build.arg("--release");
	}
	let status = build.status().expect("cargo build executes");
	assert!(status.success() && bin.is_file(), "failed to build bmod binary at {}", bin.display());

	bin
}
