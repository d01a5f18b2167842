use bmod_testkit::{BoneSpec, FileBuilder, bone_payload, sample_scene};

use crate::cmd::test_support::{fixture_arg, run_bmod, run_bmod_json, run_bmod_stdout};

#[test]
fn bones_json_lists_joints_in_export_order() {
	let fixture = fixture_arg("bones_sample.bmod", &sample_scene());
	let json = run_bmod_json(&["bones", &fixture, "--json", "--frames"]);

	assert_eq!(json["bone_count"], 3);
	assert_eq!(json["keyframe_count"], 2);
	let joints = json["joints"].as_array().expect("joints array");
	let names: Vec<_> = joints.iter().map(|joint| joint["name"].as_str().unwrap_or_default()).collect();
	assert_eq!(names, vec!["root", "spine", "head"]);
	assert_eq!(joints[0]["root"], true);
	assert_eq!(joints[2]["leaf"], true);
	assert_eq!(joints[2]["depth"], 2);

	let frames = json["frames"].as_array().expect("frames array");
	assert_eq!(frames.len(), 2);
	assert_eq!(frames[1]["values"].as_array().map(Vec::len), Some(18));
	assert_eq!(frames[1]["values"][0], 1.0);
}

#[test]
fn bones_text_output_marks_roots_and_ends() {
	let fixture = fixture_arg("bones_text.bmod", &sample_scene());
	let stdout = run_bmod_stdout(&["bones", &fixture]);
	assert!(stdout.contains("ROOT root id=0"));
	assert!(stdout.contains("    JOINT head id=2 (end)"));
}

#[test]
fn bones_without_animation_chunk_fails() {
	let fixture = fixture_arg("bones_missing.bmod", &FileBuilder::new().chunk(b"ASEC", &[0; 4]).build());
	let output = run_bmod(&["bones", &fixture]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("no bone animation"));
}

#[test]
fn bones_cycle_is_reported_as_error() {
	let bones = [BoneSpec { id: 1, parent: 2, name: "a" }, BoneSpec { id: 2, parent: 1, name: "b" }];
	let fixture = fixture_arg("bones_cycle.bmod", &FileBuilder::new().chunk(b"BONE", &bone_payload(&bones, 1)).build());
	let output = run_bmod(&["bones", &fixture]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("cyclic bone hierarchy"));
}

#[test]
fn bones_chunk_index_out_of_range_fails() {
	let fixture = fixture_arg("bones_range.bmod", &sample_scene());
	let output = run_bmod(&["bones", &fixture, "--chunk", "3"]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("out of range"));
}
