use std::io::Write;

use glam::Vec3;

use crate::bmod::asset::TIMESTAMP_LEN;
use crate::bmod::{BmodError, BmodHeader, Chunk, ChunkBody, ChunkHead, ChunkKind, Result, Scene};

/// Return `true` when [`encode_chunk`] can re-encode chunks of this kind.
pub fn is_writable(kind: ChunkKind) -> bool {
	matches!(
		kind,
		ChunkKind::BoundingBox | ChunkKind::OrientedBox | ChunkKind::Texture | ChunkKind::Timestamp | ChunkKind::AssetSection | ChunkKind::Effect | ChunkKind::Opaque
	)
}

/// Copy of `scene` holding only the top-level chunks [`encode_chunk`] accepts.
pub fn retain_writable(scene: &Scene) -> Scene {
	let chunks = scene.chunks().iter().filter(|chunk| is_writable(chunk.kind())).cloned().collect();
	Scene::new(scene.header, chunks)
}

/// Encode one chunk with a freshly computed size.
pub fn encode_chunk(chunk: &Chunk) -> Result<Vec<u8>> {
	let mut payload = Vec::new();
	let tag = match &chunk.body {
		ChunkBody::BoundingBox(bbox) => {
			put_vec3(&mut payload, bbox.min);
			put_vec3(&mut payload, bbox.max);
			chunk.head.tag
		}
		ChunkBody::OrientedBox(obox) => {
			put_vec3(&mut payload, obox.center);
			put_vec3(&mut payload, obox.normal);
			chunk.head.tag
		}
		ChunkBody::Texture(texture) => {
			payload.extend_from_slice(&texture.reserved.to_le_bytes());
			put_len(&mut payload, chunk.head.tag, texture.path.len())?;
			payload.extend_from_slice(texture.path.as_bytes());
			chunk.head.tag
		}
		ChunkBody::Timestamp(stamp) => {
			let mut raw = stamp.as_bytes().to_vec();
			raw.resize(TIMESTAMP_LEN, 0);
			payload.extend_from_slice(&raw);
			chunk.head.tag
		}
		ChunkBody::AssetSection { reserved } => {
			payload.extend_from_slice(&reserved.to_le_bytes());
			chunk.head.tag
		}
		ChunkBody::Effect(effect) => {
			payload.extend_from_slice(&effect.payload);
			effect.kind.tag()
		}
		ChunkBody::Opaque(raw) => {
			payload.extend_from_slice(raw);
			chunk.head.tag
		}
		_ => return Err(BmodError::UnsupportedWrite { tag: chunk.head.tag }),
	};

	let size = u32::try_from(payload.len() + ChunkHead::SIZE).map_err(|_| BmodError::PayloadTooLarge { tag, len: payload.len() })?;
	let mut out = Vec::with_capacity(payload.len() + ChunkHead::SIZE);
	out.extend_from_slice(&tag);
	out.extend_from_slice(&size.to_le_bytes());
	out.extend_from_slice(&payload);
	Ok(out)
}

/// Encode a whole scene; the header file size is recomputed.
///
/// Fails on the first chunk that cannot be written, see [`is_writable`].
pub fn encode_scene(scene: &Scene) -> Result<Vec<u8>> {
	let mut body = Vec::new();
	for chunk in scene.chunks() {
		body.extend_from_slice(&encode_chunk(chunk)?);
	}

	let total = body.len() + BmodHeader::SIZE;
	let header = BmodHeader {
		file_size: u32::try_from(total).map_err(|_| BmodError::PayloadTooLarge {
			tag: scene.header.magic,
			len: total,
		})?,
		..scene.header
	};

	let mut out = Vec::with_capacity(total);
	out.extend_from_slice(&header.to_bytes());
	out.extend_from_slice(&body);
	Ok(out)
}

/// Encode `scene` and write it to `out`.
pub fn write_scene(scene: &Scene, mut out: impl Write) -> Result<()> {
	let bytes = encode_scene(scene)?;
	out.write_all(&bytes)?;
	out.flush()?;
	Ok(())
}

fn put_vec3(out: &mut Vec<u8>, value: Vec3) {
	for component in value.to_array() {
		out.extend_from_slice(&component.to_le_bytes());
	}
}

fn put_len(out: &mut Vec<u8>, tag: [u8; 4], len: usize) -> Result<()> {
	let len32 = u32::try_from(len).map_err(|_| BmodError::PayloadTooLarge { tag, len })?;
	out.extend_from_slice(&len32.to_le_bytes());
	Ok(())
}
