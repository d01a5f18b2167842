use glam::{Quat, Vec2, Vec3};

use crate::bmod::bytes::Cursor;
use crate::bmod::chunk::tags;
use crate::bmod::decode::{Decoder, partial};
use crate::bmod::{ChunkBody, ChunkHead, Result};

/// Bytes per vertex record: position, normal, packed color, uv.
pub const VERTEX_STRIDE: usize = 40;
/// Bytes per optional tangent/bitangent pair.
pub const TANGENT_STRIDE: usize = 24;
/// Bytes of the vertex block sub-header.
pub const VERTEX_BLOCK_HEADER: usize = 12;
/// Bytes per face-block spline keyframe.
pub const SPLINE_KEYFRAME_STRIDE: usize = 40;

/// Local surface basis stored after the vertex records.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TangentFrame {
	/// Tangent vector.
	pub tangent: Vec3,
	/// Bitangent vector.
	pub bitangent: Vec3,
}

/// One 40-byte vertex record.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
	/// Object-space position.
	pub position: Vec3,
	/// Vertex normal.
	pub normal: Vec3,
	/// Packed 32-bit color.
	pub color: u32,
	/// Texture coordinate.
	pub uv: Vec2,
	/// Tangent frame, present only when the trailing block was found.
	pub tangent: Option<TangentFrame>,
}

/// Decoded `VERT` sub-chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexBlock {
	/// Sub-header words, not interpreted.
	pub header: [u32; 3],
	/// Vertex records, as many as the owning geometry declares.
	pub vertices: Vec<Vertex>,
}

/// Decoded `ISTR` sub-chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexBlock {
	/// Index count stored in the block.
	pub declared_count: u32,
	/// Triangle-list vertex indices.
	pub indices: Vec<u16>,
}

/// One keyframe of a face-block spline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SplineKeyframe {
	/// Keyframe time.
	pub time: f32,
	/// Rotation.
	pub rotation: Quat,
	/// Position or other three-component value.
	pub position: Vec3,
	/// Trailing floats of unknown meaning.
	pub extra: [f32; 3],
}

/// Decoded `LODP` record inside a face block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LodSpline {
	/// Keyframe count stored in the record.
	pub declared_count: u32,
	/// Four parameter words, not interpreted.
	pub params: [u32; 4],
	/// Keyframes.
	pub keyframes: Vec<SplineKeyframe>,
}

/// Decoded `FACE` sub-chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceBlock {
	/// Face count stored in the block.
	pub face_count: u32,
	/// Spline records found in the block.
	pub splines: Vec<LodSpline>,
}

/// Geometry shared by `MESH`, `MEMS` and `OBMO` chunks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
	/// First header word, unused.
	pub unknown: u32,
	/// Declared vertex count, authoritative for the vertex block.
	pub vertex_count: u32,
	/// Declared face count.
	pub face_count: u32,
	/// Vertex block, if one was found.
	pub vertices: Option<VertexBlock>,
	/// Index block, if one was found.
	pub indices: Option<IndexBlock>,
	/// Face metadata block, if one was found.
	pub faces: Option<FaceBlock>,
}

impl Geometry {
	/// Vertex records, empty when no vertex block was found.
	pub fn vertex_slice(&self) -> &[Vertex] {
		self.vertices.as_ref().map_or(&[], |block| block.vertices.as_slice())
	}

	/// Flat index list, empty when no index block was found.
	pub fn index_slice(&self) -> &[u16] {
		self.indices.as_ref().map_or(&[], |block| block.indices.as_slice())
	}

	/// Index triples in stride-3 order; a trailing partial triangle is ignored.
	pub fn triangles(&self) -> impl Iterator<Item = [u16; 3]> + '_ {
		self.index_slice().chunks_exact(3).map(|tri| [tri[0], tri[1], tri[2]])
	}

	/// Return `true` when every vertex carries a tangent frame.
	pub fn has_tangents(&self) -> bool {
		let vertices = self.vertex_slice();
		!vertices.is_empty() && vertices.iter().all(|vertex| vertex.tangent.is_some())
	}
}

/// Named geometry from an `OBMO` chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MorphedObject {
	/// Object name.
	pub name: String,
	/// Geometry.
	pub geometry: Geometry,
}

pub(crate) fn decode_mesh(decoder: &mut Decoder, cursor: &mut Cursor<'_>, _head: &ChunkHead, depth: u32) -> (ChunkBody, Result<()>) {
	partial(ChunkBody::Mesh, |geometry| read_geometry(decoder, cursor, geometry, depth))
}

pub(crate) fn decode_morphed_object(decoder: &mut Decoder, cursor: &mut Cursor<'_>, _head: &ChunkHead, depth: u32) -> (ChunkBody, Result<()>) {
	partial(ChunkBody::MorphedObject, |object: &mut MorphedObject| {
		object.name = cursor.read_prefixed_string()?;
		read_geometry(decoder, cursor, &mut object.geometry, depth)
	})
}

fn read_geometry(decoder: &mut Decoder, cursor: &mut Cursor<'_>, geometry: &mut Geometry, depth: u32) -> Result<()> {
	geometry.unknown = cursor.read_u32_le()?;
	geometry.vertex_count = cursor.read_u32_le()?;
	geometry.face_count = cursor.read_u32_le()?;

	let vertex_count = geometry.vertex_count;
	decoder.scan_sub_chunks(cursor, depth + 1, |decoder, sub, head| match head.tag {
		tags::VERT => {
			let block = geometry.vertices.insert(VertexBlock::default());
			read_vertex_block(decoder, sub, head, vertex_count, block)
		}
		tags::ISTR => read_index_block(sub, geometry.indices.insert(IndexBlock::default())),
		tags::FACE => {
			let block = geometry.faces.insert(FaceBlock::default());
			read_face_block(decoder, sub, block, depth + 1)
		}
		_ => {
			decoder.recoverable(head, "unknown geometry sub-chunk skipped");
			Ok(())
		}
	})
}

/// Read a vertex block using the owner's declared count, then probe for tangents.
///
/// The block's own header words are not trusted for the count. Leftover
/// bytes after the vertex records hold tangent/bitangent pairs when they come
/// within `tangent_slack` bytes of `24 * count`.
fn read_vertex_block(decoder: &mut Decoder, cursor: &mut Cursor<'_>, head: &ChunkHead, count: u32, block: &mut VertexBlock) -> Result<()> {
	for word in &mut block.header {
		*word = cursor.read_u32_le()?;
	}

	let count_usize = count as usize;
	block.vertices.reserve(count_usize.min(cursor.remaining() / VERTEX_STRIDE));
	for _ in 0..count {
		block.vertices.push(read_vertex(cursor)?);
	}

	let remaining = head.payload_len() as i64 - VERTEX_BLOCK_HEADER as i64 - VERTEX_STRIDE as i64 * i64::from(count);
	if remaining <= 0 {
		return Ok(());
	}

	let expected = TANGENT_STRIDE as i64 * i64::from(count);
	let slack = decoder.options().tangent_slack;
	if remaining < expected - slack {
		decoder.notice(
			head.tag,
			head.offset(),
			format!("{remaining} trailing bytes too short for tangent data (expected {expected}), ignored"),
		);
		return Ok(());
	}

	let frames = (remaining / TANGENT_STRIDE as i64) as usize;
	for vertex in block.vertices.iter_mut().take(frames) {
		let tangent = cursor.read_vec3()?;
		let bitangent = cursor.read_vec3()?;
		vertex.tangent = Some(TangentFrame { tangent, bitangent });
	}

	if remaining != expected {
		decoder.notice(
			head.tag,
			head.offset(),
			format!(
				"tangent block of {remaining} bytes differs from expected {expected}, read {} frames",
				frames.min(count_usize)
			),
		);
	}
	Ok(())
}

fn read_vertex(cursor: &mut Cursor<'_>) -> Result<Vertex> {
	Ok(Vertex {
		position: cursor.read_vec3()?,
		normal: cursor.read_vec3()?,
		color: cursor.read_u32_le()?,
		uv: cursor.read_vec2()?,
		tangent: None,
	})
}

fn read_index_block(cursor: &mut Cursor<'_>, block: &mut IndexBlock) -> Result<()> {
	block.declared_count = cursor.read_u32_le()?;
	block.indices.reserve((block.declared_count as usize).min(cursor.remaining() / 2));
	for _ in 0..block.declared_count {
		block.indices.push(cursor.read_u16_le()?);
	}
	Ok(())
}

fn read_face_block(decoder: &mut Decoder, cursor: &mut Cursor<'_>, block: &mut FaceBlock, depth: u32) -> Result<()> {
	block.face_count = cursor.read_u32_le()?;
	decoder.scan_sub_chunks(cursor, depth + 1, |decoder, sub, head| {
		if head.tag != tags::LODP {
			decoder.notice(head.tag, head.offset(), "face sub-chunk skipped");
			return Ok(());
		}
		block.splines.push(LodSpline::default());
		match block.splines.last_mut() {
			Some(spline) => read_spline(sub, spline),
			None => Ok(()),
		}
	})
}

fn read_spline(cursor: &mut Cursor<'_>, spline: &mut LodSpline) -> Result<()> {
	spline.declared_count = cursor.read_u32_le()?;
	for param in &mut spline.params {
		*param = cursor.read_u32_le()?;
	}

	spline.keyframes.reserve((spline.declared_count as usize).min(cursor.remaining() / SPLINE_KEYFRAME_STRIDE));
	for _ in 0..spline.declared_count {
		let time = cursor.read_f32_le()?;
		let rotation = cursor.read_quat()?;
		let position = cursor.read_vec3()?;
		let mut extra = [0.0_f32; 3];
		for value in &mut extra {
			*value = cursor.read_f32_le()?;
		}
		spline.keyframes.push(SplineKeyframe {
			time,
			rotation,
			position,
			extra,
		});
	}
	Ok(())
}

#[cfg(test)]
mod tests;
