use bmod::bmod::{decode_file, tags};
use bmod_testkit::{sample_scene, write_fixture};

use crate::cmd::test_support::{fixture_arg, run_bmod, run_bmod_stdout};

#[test]
fn strip_keeps_only_writable_chunks() {
	let input = fixture_arg("strip_input.bmod", &sample_scene());
	let output = write_fixture("strip_output.bmod", &[]);
	let output_arg = output.to_string_lossy().into_owned();

	let stdout = run_bmod_stdout(&["strip", &input, &output_arg]);
	assert!(stdout.contains("kept 4, dropped 4"), "{stdout}");

	let decoded = decode_file(&output).expect("stripped file decodes");
	assert!(decoded.diagnostics.is_empty(), "{:?}", decoded.diagnostics);
	let kept: Vec<_> = decoded.scene.chunks().iter().map(|chunk| chunk.head.tag).collect();
	assert_eq!(kept, vec![tags::MBOX, tags::TEXT, tags::FLAR, tags::TIME]);
	assert_eq!(decoded.scene.header.file_size as usize, std::fs::metadata(&output).expect("metadata").len() as usize);
}

#[test]
fn strip_fails_on_missing_input() {
	let output = write_fixture("strip_missing_out.bmod", &[]);
	let output_arg = output.to_string_lossy().into_owned();
	let result = run_bmod(&["strip", "/nonexistent/input.bmod", &output_arg]);
	assert!(!result.status.success());
	assert!(String::from_utf8_lossy(&result.stderr).contains("io:"));
}
