use bmod_testkit::{FileBuilder, PayloadBuilder, index_block, vertex_block, vertex_records};

use crate::bmod::{Decoded, Severity, decode, tags};

fn mesh_with(vertex_count: u32, sub_chunks: PayloadBuilder) -> Vec<u8> {
	PayloadBuilder::new().u32(0).u32(vertex_count).u32(0).bytes(&sub_chunks.build()).build()
}

fn decode_mesh_bytes(payload: &[u8]) -> Decoded {
	decode(&FileBuilder::new().chunk(b"MESH", payload).build()).expect("file decodes")
}

/// `VERT` payload: header words, `count` records, then `tangent_bytes` filler.
fn vert_with_tail(header_count: u32, count: u32, tangent_bytes: usize) -> Vec<u8> {
	let mut payload = vertex_records(PayloadBuilder::new().u32(header_count).u32(0).u32(0), count);
	for idx in 0..tangent_bytes / 4 {
		payload = payload.f32(idx as f32);
	}
	payload.zeros(tangent_bytes % 4).build()
}

#[test]
fn exact_vertex_block_has_no_tangents() {
	let decoded = decode_mesh_bytes(&mesh_with(3, PayloadBuilder::new().chunk(b"VERT", &vertex_block(3, false))));
	let geometry = decoded.scene.meshes()[0];
	assert_eq!(geometry.vertex_slice().len(), 3);
	assert!(geometry.vertex_slice().iter().all(|vertex| vertex.tangent.is_none()));
	assert!(!geometry.has_tangents());
	assert!(decoded.diagnostics.is_empty());
}

#[test]
fn full_tangent_block_attaches_a_frame_to_every_vertex() {
	let decoded = decode_mesh_bytes(&mesh_with(3, PayloadBuilder::new().chunk(b"VERT", &vertex_block(3, true))));
	let geometry = decoded.scene.meshes()[0];
	assert!(geometry.has_tangents());
	let frame = geometry.vertex_slice()[2].tangent.expect("tangent present");
	assert_eq!(frame.tangent.to_array(), [1.0, 0.0, 0.0]);
	assert_eq!(frame.bitangent.to_array(), [0.0, 0.0, 1.0]);
	assert!(decoded.diagnostics.is_empty());
}

#[test]
fn vertex_records_decode_in_order() {
	let decoded = decode_mesh_bytes(&mesh_with(2, PayloadBuilder::new().chunk(b"VERT", &vertex_block(2, false))));
	let vertices = decoded.scene.meshes()[0].vertex_slice();
	assert_eq!(vertices[1].position.to_array(), [1.0, 0.0, 0.0]);
	assert_eq!(vertices[1].normal.to_array(), [0.0, 1.0, 0.0]);
	assert_eq!(vertices[1].color, 0xFFFF_FFFF);
	assert_eq!(vertices[1].uv.to_array(), [0.5, 0.25]);
}

#[test]
fn short_tangent_block_within_slack_reads_whole_frames() {
	// 10 vertices expect 240 tangent bytes; 200 is within the 100-byte slack.
	let decoded = decode_mesh_bytes(&mesh_with(10, PayloadBuilder::new().chunk(b"VERT", &vert_with_tail(0, 10, 200))));
	let vertices = decoded.scene.meshes()[0].vertex_slice();
	assert_eq!(vertices.iter().filter(|vertex| vertex.tangent.is_some()).count(), 8);
	assert!(vertices[8].tangent.is_none());

	assert_eq!(decoded.diagnostics.len(), 1);
	assert_eq!(decoded.diagnostics[0].severity, Severity::Info);
	assert_eq!(decoded.diagnostics[0].tag, tags::VERT);
}

#[test]
fn tangent_block_below_slack_is_ignored() {
	let decoded = decode_mesh_bytes(&mesh_with(10, PayloadBuilder::new().chunk(b"VERT", &vert_with_tail(0, 10, 100))));
	let geometry = decoded.scene.meshes()[0];
	assert_eq!(geometry.vertex_slice().len(), 10);
	assert!(geometry.vertex_slice().iter().all(|vertex| vertex.tangent.is_none()));
	assert_eq!(decoded.diagnostics.len(), 1);
	assert_eq!(decoded.diagnostics[0].severity, Severity::Info);
}

#[test]
fn oversized_tangent_block_caps_at_vertex_count() {
	let decoded = decode_mesh_bytes(&mesh_with(2, PayloadBuilder::new().chunk(b"VERT", &vert_with_tail(0, 2, 60))));
	let geometry = decoded.scene.meshes()[0];
	assert!(geometry.has_tangents());
	assert_eq!(decoded.diagnostics.len(), 1);
}

#[test]
fn declared_vertex_count_overrides_block_header() {
	let decoded = decode_mesh_bytes(&mesh_with(2, PayloadBuilder::new().chunk(b"VERT", &vert_with_tail(99, 2, 0))));
	let block = decoded.scene.meshes()[0].vertices.as_ref().expect("vertex block");
	assert_eq!(block.header[0], 99);
	assert_eq!(block.vertices.len(), 2);
}

#[test]
fn truncated_vertex_block_keeps_decoded_vertices() {
	let decoded = decode_mesh_bytes(&mesh_with(4, PayloadBuilder::new().chunk(b"VERT", &vertex_block(2, false))));
	let geometry = decoded.scene.meshes()[0];
	assert_eq!(geometry.vertex_slice().len(), 2);

	let recoverable: Vec<_> = decoded.recoverable().collect();
	assert_eq!(recoverable.len(), 1);
	assert_eq!(recoverable[0].tag, tags::VERT);
}

#[test]
fn triangles_ignore_trailing_partial_triangle() {
	let decoded = decode_mesh_bytes(&mesh_with(0, PayloadBuilder::new().chunk(b"ISTR", &index_block(&[0, 1, 2, 2, 3, 0, 1]))));
	let geometry = decoded.scene.meshes()[0];
	assert_eq!(geometry.triangles().collect::<Vec<_>>(), vec![[0, 1, 2], [2, 3, 0]]);
	assert_eq!(geometry.indices.as_ref().map(|block| block.declared_count), Some(7));
}

#[test]
fn face_block_reads_spline_records() {
	let mut lodp = PayloadBuilder::new().u32(2).u32(1).u32(2).u32(3).u32(4);
	for frame in 0..2 {
		lodp = lodp
			.f32(frame as f32)
			.floats(&[0.0, 0.0, 0.0, 1.0])
			.floats(&[5.0, 6.0, 7.0])
			.floats(&[0.1, 0.2, 0.3]);
	}
	let face = PayloadBuilder::new().u32(12).chunk(b"LODP", &lodp.build()).chunk(b"XTRA", &[0; 4]).build();

	let decoded = decode_mesh_bytes(&mesh_with(0, PayloadBuilder::new().chunk(b"FACE", &face)));
	let faces = decoded.scene.meshes()[0].faces.as_ref().expect("face block");
	assert_eq!(faces.face_count, 12);
	assert_eq!(faces.splines.len(), 1);
	let spline = &faces.splines[0];
	assert_eq!(spline.params, [1, 2, 3, 4]);
	assert_eq!(spline.keyframes.len(), 2);
	assert_eq!(spline.keyframes[1].time, 1.0);
	assert_eq!(spline.keyframes[1].position.to_array(), [5.0, 6.0, 7.0]);

	// The unknown face sub-chunk is informational only.
	assert_eq!(decoded.recoverable().count(), 0);
	assert_eq!(decoded.diagnostics.len(), 1);
	assert_eq!(decoded.diagnostics[0].tag, *b"XTRA");
}

#[test]
fn unknown_geometry_sub_chunk_is_recoverable() {
	let subs = PayloadBuilder::new().chunk(b"WHAT", &[1, 2, 3, 4]).chunk(b"ISTR", &index_block(&[0, 0, 0]));
	let decoded = decode_mesh_bytes(&mesh_with(0, subs));
	assert_eq!(decoded.scene.meshes()[0].index_slice(), &[0, 0, 0]);
	assert_eq!(decoded.recoverable().count(), 1);
}

#[test]
fn morphed_object_reads_name_then_geometry() {
	let payload = PayloadBuilder::new()
		.prefixed("wing_left")
		.u32(0)
		.u32(2)
		.u32(0)
		.chunk(b"VERT", &vertex_block(2, false))
		.build();
	let decoded = decode(&FileBuilder::new().chunk(b"OBMO", &payload).build()).expect("file decodes");
	let object = decoded.scene.morphed_objects().next().expect("morphed object");
	assert_eq!(object.name, "wing_left");
	assert_eq!(object.geometry.vertex_slice().len(), 2);
	assert!(decoded.scene.meshes().is_empty());
}

#[test]
fn mirrored_mesh_shares_mesh_layout() {
	let payload = mesh_with(1, PayloadBuilder::new().chunk(b"VERT", &vertex_block(1, false)));
	let decoded = decode(&FileBuilder::new().chunk(b"MEMS", &payload).build()).expect("file decodes");
	assert_eq!(decoded.scene.meshes().len(), 1);
	assert_eq!(decoded.scene.chunks()[0].head.tag, tags::MEMS);
}
