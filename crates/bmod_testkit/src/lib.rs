//! Shared test helpers for workspace crates: synthetic container builders and fixture paths.

use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root, two levels above this crate's manifest.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir.ancestors().nth(2).unwrap_or(manifest_dir).to_path_buf()
}

/// Cargo target directory, honoring `CARGO_TARGET_DIR`.
pub fn target_dir() -> PathBuf {
	match std::env::var_os("CARGO_TARGET_DIR") {
		Some(dir) => PathBuf::from(dir),
		None => workspace_root().join("target"),
	}
}

/// Write `bytes` to a uniquely named file under the target directory and return its path.
pub fn write_fixture(name: &str, bytes: &[u8]) -> PathBuf {
	let dir = target_dir().join("bmod_fixtures").join(std::process::id().to_string());
	fs::create_dir_all(&dir).expect("fixture directory is creatable");
	let path = dir.join(name);
	fs::write(&path, bytes).expect("fixture is writable");
	path
}

/// Frame `payload` as a chunk: tag, `u32` size including the 8-byte header, payload.
pub fn chunk_bytes(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(payload.len() + 8);
	out.extend_from_slice(tag);
	out.extend_from_slice(&((payload.len() + 8) as u32).to_le_bytes());
	out.extend_from_slice(payload);
	out
}

/// Little-endian payload builder.
#[derive(Debug, Clone, Default)]
pub struct PayloadBuilder {
	bytes: Vec<u8>,
}

impl PayloadBuilder {
	/// Start an empty payload.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a `u16`.
	pub fn u16(mut self, value: u16) -> Self {
		self.bytes.extend_from_slice(&value.to_le_bytes());
		self
	}

	/// Append a `u32`.
	pub fn u32(mut self, value: u32) -> Self {
		self.bytes.extend_from_slice(&value.to_le_bytes());
		self
	}

	/// Append an `i32`.
	pub fn i32(mut self, value: i32) -> Self {
		self.bytes.extend_from_slice(&value.to_le_bytes());
		self
	}

	/// Append an `f32`.
	pub fn f32(mut self, value: f32) -> Self {
		self.bytes.extend_from_slice(&value.to_le_bytes());
		self
	}

	/// Append consecutive `f32` values.
	pub fn floats(mut self, values: &[f32]) -> Self {
		for value in values {
			self.bytes.extend_from_slice(&value.to_le_bytes());
		}
		self
	}

	/// Append raw bytes.
	pub fn bytes(mut self, raw: &[u8]) -> Self {
		self.bytes.extend_from_slice(raw);
		self
	}

	/// Append `n` zero bytes.
	pub fn zeros(mut self, n: usize) -> Self {
		self.bytes.resize(self.bytes.len() + n, 0);
		self
	}

	/// Append a `u32` length followed by the string bytes.
	pub fn prefixed(self, value: &str) -> Self {
		self.u32(value.len() as u32).bytes(value.as_bytes())
	}

	/// Append `value` NUL-padded or truncated to exactly `len` bytes.
	pub fn fixed(mut self, value: &str, len: usize) -> Self {
		let mut raw = value.as_bytes().to_vec();
		raw.resize(len, 0);
		self.bytes.extend_from_slice(&raw);
		self
	}

	/// Append a framed nested chunk.
	pub fn chunk(self, tag: &[u8; 4], payload: &[u8]) -> Self {
		let framed = chunk_bytes(tag, payload);
		self.bytes(&framed)
	}

	/// Current payload length.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Return `true` when nothing was appended.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Finish and return the bytes.
	pub fn build(self) -> Vec<u8> {
		self.bytes
	}
}

/// Whole-file builder: 12-byte header followed by framed chunks.
#[derive(Debug, Clone)]
pub struct FileBuilder {
	magic: [u8; 4],
	minor: u16,
	major: u16,
	body: Vec<u8>,
}

impl Default for FileBuilder {
	fn default() -> Self {
		Self {
			magic: *b"BMOD",
			minor: 13,
			major: 1,
			body: Vec::new(),
		}
	}
}

impl FileBuilder {
	/// Start a `BMOD` v1.13 file.
	pub fn new() -> Self {
		Self::default()
	}

	/// Override the magic.
	pub fn magic(mut self, magic: &[u8; 4]) -> Self {
		self.magic = *magic;
		self
	}

	/// Override the version.
	pub fn version(mut self, major: u16, minor: u16) -> Self {
		self.major = major;
		self.minor = minor;
		self
	}

	/// Append a framed top-level chunk.
	pub fn chunk(mut self, tag: &[u8; 4], payload: &[u8]) -> Self {
		self.body.extend_from_slice(&chunk_bytes(tag, payload));
		self
	}

	/// Append raw bytes after the chunks written so far.
	pub fn raw(mut self, bytes: &[u8]) -> Self {
		self.body.extend_from_slice(bytes);
		self
	}

	/// Finish: header with the real total size, then the body.
	pub fn build(self) -> Vec<u8> {
		let total = 12 + self.body.len();
		let mut out = Vec::with_capacity(total);
		out.extend_from_slice(&self.magic);
		out.extend_from_slice(&(total as u32).to_le_bytes());
		out.extend_from_slice(&self.minor.to_le_bytes());
		out.extend_from_slice(&self.major.to_le_bytes());
		out.extend_from_slice(&self.body);
		out
	}
}

/// Append `count` vertex records whose position x equals the vertex index.
pub fn vertex_records(mut payload: PayloadBuilder, count: u32) -> PayloadBuilder {
	for idx in 0..count {
		payload = payload
			.floats(&[idx as f32, 0.0, 0.0])
			.floats(&[0.0, 1.0, 0.0])
			.u32(0xFFFF_FFFF)
			.floats(&[0.5, 0.25]);
	}
	payload
}

/// `VERT` payload: 12-byte sub-header, records, and optionally one tangent frame per vertex.
pub fn vertex_block(count: u32, with_tangents: bool) -> Vec<u8> {
	let mut payload = vertex_records(PayloadBuilder::new().u32(0).u32(0).u32(0), count);
	if with_tangents {
		for _ in 0..count {
			payload = payload.floats(&[1.0, 0.0, 0.0]).floats(&[0.0, 0.0, 1.0]);
		}
	}
	payload.build()
}

/// `ISTR` payload holding `indices`.
pub fn index_block(indices: &[u16]) -> Vec<u8> {
	let mut payload = PayloadBuilder::new().u32(indices.len() as u32);
	for index in indices {
		payload = payload.u16(*index);
	}
	payload.build()
}

/// `MESH` payload with a vertex block and a triangle-list index block.
pub fn mesh_payload(vertex_count: u32, indices: &[u16], with_tangents: bool) -> Vec<u8> {
	PayloadBuilder::new()
		.u32(0)
		.u32(vertex_count)
		.u32((indices.len() / 3) as u32)
		.chunk(b"VERT", &vertex_block(vertex_count, with_tangents))
		.chunk(b"ISTR", &index_block(indices))
		.build()
}

/// One bone entry for [`bone_payload`].
#[derive(Debug, Clone, Copy)]
pub struct BoneSpec<'a> {
	/// Bone id.
	pub id: u32,
	/// Parent id, `-1` for roots.
	pub parent: i32,
	/// Bone name.
	pub name: &'a str,
}

/// `BONE` payload with identity rotations and position x equal to the frame index.
pub fn bone_payload(bones: &[BoneSpec<'_>], keyframes: u32) -> Vec<u8> {
	let mut payload = PayloadBuilder::new().u32(bones.len() as u32).u32(keyframes);
	for bone in bones {
		payload = payload.u32(bone.id).i32(bone.parent).prefixed(bone.name);
		for frame in 0..keyframes {
			payload = payload
				.f32(frame as f32 / 30.0)
				.floats(&[frame as f32, 0.0, 0.0])
				.floats(&[0.0, 0.0, 0.0, 1.0])
				.floats(&[1.0, 1.0, 1.0]);
		}
	}
	payload.build()
}

/// `OBST` payload: object number, name, 68 opaque bytes, then nested chunks.
pub fn obstacle_payload(object_number: u32, name: &str, nested: &[u8]) -> Vec<u8> {
	PayloadBuilder::new().u32(object_number).prefixed(name).zeros(68).bytes(nested).build()
}

/// A small but complete scene exercising most chunk kinds.
///
/// Chunks in order: `MBOX`, `TEXT`, `MATE`, `MESH` (3 vertices with tangents),
/// `OBST` named `door` (nested `MESH` of 4 vertices and `MBOX`), `BONE`
/// (root, spine, head; 2 keyframes), `FLAR`, `TIME`.
pub fn sample_scene() -> Vec<u8> {
	let bbox = PayloadBuilder::new().floats(&[-1.0, -2.0, -3.0]).floats(&[1.0, 2.0, 3.0]).build();
	let text = PayloadBuilder::new().u32(0).prefixed("textures/crate.tga").build();
	let mate = PayloadBuilder::new().u32(7).prefixed("crate.tga").build();
	let nested = PayloadBuilder::new()
		.chunk(b"MESH", &mesh_payload(4, &[0, 1, 2, 2, 3, 0], false))
		.chunk(b"MBOX", &PayloadBuilder::new().floats(&[0.0, 0.0, 0.0]).floats(&[1.0, 1.0, 1.0]).build())
		.build();
	let bones = [
		BoneSpec { id: 0, parent: -1, name: "root" },
		BoneSpec { id: 1, parent: 0, name: "spine" },
		BoneSpec { id: 2, parent: 1, name: "head" },
	];

	FileBuilder::new()
		.chunk(b"MBOX", &bbox)
		.chunk(b"TEXT", &text)
		.chunk(b"MATE", &mate)
		.chunk(b"MESH", &mesh_payload(3, &[0, 1, 2], true))
		.chunk(b"OBST", &obstacle_payload(5, "door", &nested))
		.chunk(b"BONE", &bone_payload(&bones, 2))
		.chunk(b"FLAR", &[1, 2, 3, 4])
		.chunk(b"TIME", &PayloadBuilder::new().fixed("Mon Mar 18 18:55:26 2002", 24).build())
		.build()
}
