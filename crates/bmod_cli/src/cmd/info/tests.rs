use bmod_testkit::{FileBuilder, sample_scene};

use crate::cmd::test_support::{fixture_arg, run_bmod, run_bmod_json, run_bmod_stdout};

#[test]
fn info_json_reports_header_and_tag_counts() {
	let fixture = fixture_arg("info_sample.bmod", &sample_scene());
	let json = run_bmod_json(&["info", &fixture, "--json"]);

	assert_eq!(json["magic"], "BMOD");
	assert_eq!(json["version"], "v1.13");
	assert_eq!(json["file_size"], json["actual_size"]);
	assert_eq!(json["chunk_count"], 8);
	assert_eq!(json["nested_count"], 2);
	assert_eq!(json["top_tags"][0]["tag"], "MBOX");
	assert_eq!(json["top_tags"][0]["count"], 2);
	assert!(json["diagnostics"].as_array().is_some_and(|items| items.is_empty()));
}

#[test]
fn info_lists_diagnostics_for_unknown_chunks() {
	let bytes = FileBuilder::new().chunk(b"ZZZZ", &[1, 2, 3, 4]).build();
	let fixture = fixture_arg("info_unknown.bmod", &bytes);
	let json = run_bmod_json(&["info", &fixture, "--json"]);

	let diagnostics = json["diagnostics"].as_array().expect("diagnostics array");
	assert_eq!(diagnostics.len(), 1);
	assert_eq!(diagnostics[0]["severity"], "recoverable");
	assert_eq!(diagnostics[0]["tag"], "ZZZZ");
	assert_eq!(diagnostics[0]["offset"], 12);
}

#[test]
fn info_text_output_has_key_value_lines() {
	let fixture = fixture_arg("info_text.bmod", &sample_scene());
	let stdout = run_bmod_stdout(&["info", &fixture]);
	assert!(stdout.contains("magic: BMOD"));
	assert!(stdout.contains("chunk_count: 8"));
	assert!(stdout.contains("diagnostics: 0"));
}

#[test]
fn info_fails_on_unknown_magic() {
	let bytes = FileBuilder::new().magic(b"NOPE").build();
	let fixture = fixture_arg("info_bad_magic.bmod", &bytes);
	let output = run_bmod(&["info", &fixture]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
}
