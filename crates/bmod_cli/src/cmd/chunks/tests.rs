use bmod_testkit::sample_scene;

use crate::cmd::test_support::{fixture_arg, run_bmod, run_bmod_json, run_bmod_stdout};

#[test]
fn chunks_json_lists_nested_chunks_with_depth() {
	let fixture = fixture_arg("chunks_sample.bmod", &sample_scene());
	let json = run_bmod_json(&["chunks", &fixture, "--json"]);

	let chunks = json["chunks"].as_array().expect("chunks array");
	assert_eq!(chunks.len(), 10);
	assert_eq!(chunks[0]["tag"], "MBOX");
	assert_eq!(chunks[0]["offset"], 12);
	assert_eq!(chunks[0]["size"], 32);
	assert_eq!(chunks[0]["payload_len"], 24);
	assert_eq!(chunks[4]["kind"], "obstacle");
	assert_eq!(chunks[5]["tag"], "MESH");
	assert_eq!(chunks[5]["depth"], 1);
}

#[test]
fn chunks_tag_filter_keeps_matching_chunks() {
	let fixture = fixture_arg("chunks_filter.bmod", &sample_scene());
	let json = run_bmod_json(&["chunks", &fixture, "--tag", "MESH", "--json"]);

	let chunks = json["chunks"].as_array().expect("chunks array");
	assert_eq!(chunks.len(), 2);
	assert!(chunks.iter().all(|chunk| chunk["tag"] == "MESH"));
}

#[test]
fn chunks_text_output_has_header_row() {
	let fixture = fixture_arg("chunks_text.bmod", &sample_scene());
	let stdout = run_bmod_stdout(&["chunks", &fixture]);
	assert!(stdout.contains("idx\tdepth\ttag\tkind\toffset\tsize"));
	assert!(stdout.contains("\tTIME\ttimestamp\t"));
}

#[test]
fn chunks_rejects_overlong_tag() {
	let fixture = fixture_arg("chunks_bad_tag.bmod", &sample_scene());
	let output = run_bmod(&["chunks", &fixture, "--tag", "TOOLONG"]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("invalid chunk tag"));
}
