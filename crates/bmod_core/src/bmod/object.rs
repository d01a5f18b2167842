use glam::Vec3;

use crate::bmod::bytes::Cursor;
use crate::bmod::decode::{Decoder, partial};
use crate::bmod::{Chunk, ChunkBody, ChunkHead, ChunkKind, Geometry, Result};

/// Length of the opaque block after an object name.
pub const OBJECT_BLOCK_LEN: usize = 68;

/// Decoded `MBOX` chunk.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
	/// Minimum corner.
	pub min: Vec3,
	/// Maximum corner.
	pub max: Vec3,
}

impl BoundingBox {
	/// Per-axis extent, `max - min`.
	pub fn size(&self) -> Vec3 {
		self.max - self.min
	}
}

/// Decoded `OBOX` chunk.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrientedBox {
	/// Box center.
	pub center: Vec3,
	/// Box normal.
	pub normal: Vec3,
}

/// Decoded `OBST` chunk: a named object instance owning nested chunks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Obstacle {
	/// Object number.
	pub object_number: u32,
	/// Guarded object name, empty when the stored length was implausible.
	pub name: String,
	/// Opaque 68-byte block.
	pub unknown: Vec<u8>,
	/// Retained nested geometry and box chunks, in encounter order.
	pub nested: Vec<Chunk>,
}

impl Obstacle {
	/// Last nested mesh geometry.
	pub fn mesh(&self) -> Option<&Geometry> {
		self.nested.iter().rev().find_map(|chunk| match &chunk.body {
			ChunkBody::Mesh(geometry) => Some(geometry),
			_ => None,
		})
	}

	/// Last nested bounding box.
	pub fn bounding_box(&self) -> Option<&BoundingBox> {
		self.nested.iter().rev().find_map(|chunk| match &chunk.body {
			ChunkBody::BoundingBox(bbox) => Some(bbox),
			_ => None,
		})
	}

	/// Last nested oriented box.
	pub fn oriented_box(&self) -> Option<&OrientedBox> {
		self.nested.iter().rev().find_map(|chunk| match &chunk.body {
			ChunkBody::OrientedBox(obox) => Some(obox),
			_ => None,
		})
	}
}

/// Decoded `DUMY` chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dummy {
	/// Object number.
	pub object_number: u32,
	/// Object name.
	pub name: String,
	/// Opaque 68-byte block.
	pub unknown: Vec<u8>,
}

pub(crate) fn decode_bounding_box(_decoder: &mut Decoder, cursor: &mut Cursor<'_>, _head: &ChunkHead, _depth: u32) -> (ChunkBody, Result<()>) {
	partial(ChunkBody::BoundingBox, |bbox: &mut BoundingBox| {
		bbox.min = cursor.read_vec3()?;
		bbox.max = cursor.read_vec3()?;
		Ok(())
	})
}

pub(crate) fn decode_oriented_box(_decoder: &mut Decoder, cursor: &mut Cursor<'_>, _head: &ChunkHead, _depth: u32) -> (ChunkBody, Result<()>) {
	partial(ChunkBody::OrientedBox, |obox: &mut OrientedBox| {
		obox.center = cursor.read_vec3()?;
		obox.normal = cursor.read_vec3()?;
		Ok(())
	})
}

pub(crate) fn decode_obstacle(decoder: &mut Decoder, cursor: &mut Cursor<'_>, head: &ChunkHead, depth: u32) -> (ChunkBody, Result<()>) {
	partial(ChunkBody::Obstacle, |obstacle| read_obstacle(decoder, cursor, head, depth, obstacle))
}

fn read_obstacle(decoder: &mut Decoder, cursor: &mut Cursor<'_>, head: &ChunkHead, depth: u32, obstacle: &mut Obstacle) -> Result<()> {
	obstacle.object_number = cursor.read_u32_le()?;
	obstacle.name = decoder.read_guarded_name(cursor, head)?;
	obstacle.unknown = cursor.read_exact(OBJECT_BLOCK_LEN)?.to_vec();

	while let Some(chunk) = decoder.read_chunk(cursor, depth + 1)? {
		match chunk.kind() {
			ChunkKind::Mesh | ChunkKind::BoundingBox | ChunkKind::OrientedBox => obstacle.nested.push(chunk),
			kind => decoder.notice(chunk.head.tag, chunk.head.offset(), format!("nested {} chunk decoded but not retained", kind.as_str())),
		}
	}
	Ok(())
}

pub(crate) fn decode_dummy(_decoder: &mut Decoder, cursor: &mut Cursor<'_>, _head: &ChunkHead, _depth: u32) -> (ChunkBody, Result<()>) {
	partial(ChunkBody::Dummy, |dummy: &mut Dummy| {
		dummy.object_number = cursor.read_u32_le()?;
		dummy.name = cursor.read_prefixed_string()?;
		dummy.unknown = cursor.read_exact(OBJECT_BLOCK_LEN)?.to_vec();
		Ok(())
	})
}
