use std::collections::HashMap;

use crate::bmod::{
	AssetList, BmodHeader, BoneAnimationChunk, BoundingBox, Chunk, ChunkBody, ChunkKind, Dummy, Effect, Geometry, MaterialChunk, MorphedObject, Obstacle,
	OrientedBox, Skeleton, TextureRef,
};

/// Decoded container: header plus top-level chunks in file order.
///
/// Views are computed on demand from the chunk list; nothing is indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
	/// Validated file header.
	pub header: BmodHeader,
	chunks: Vec<Chunk>,
}

/// One chunk visited by [`Scene::walk`].
#[derive(Debug, Clone, Copy)]
pub struct WalkItem<'a> {
	/// Zero-based visit index.
	pub index: usize,
	/// Nesting depth, 0 for top-level chunks.
	pub depth: usize,
	/// Visited chunk.
	pub chunk: &'a Chunk,
}

/// Chunk counts collected over the whole chunk tree.
#[derive(Debug, Clone, Default)]
pub struct SceneStats {
	/// Top-level chunk count.
	pub chunk_count: u32,
	/// Chunks retained inside containers.
	pub nested_count: u32,
	/// Occurrences per tag, nested chunks included.
	pub codes: HashMap<[u8; 4], u32>,
}

impl SceneStats {
	/// Tag counts sorted by descending count, then tag.
	pub fn tag_counts(&self) -> Vec<([u8; 4], u32)> {
		let mut counts: Vec<_> = self.codes.iter().map(|(tag, count)| (*tag, *count)).collect();
		counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
		counts
	}
}

impl Scene {
	/// Assemble a scene from a header and decoded chunks.
	pub fn new(header: BmodHeader, chunks: Vec<Chunk>) -> Self {
		Self { header, chunks }
	}

	/// Top-level chunks in file order.
	pub fn chunks(&self) -> &[Chunk] {
		&self.chunks
	}

	/// Consume the scene and return its chunks.
	pub fn into_chunks(self) -> Vec<Chunk> {
		self.chunks
	}

	/// Depth-first pre-order traversal of every chunk, nested ones included.
	pub fn walk(&self) -> Vec<WalkItem<'_>> {
		let mut out = Vec::new();
		for chunk in &self.chunks {
			visit(chunk, 0, &mut out);
		}
		out
	}

	/// Chunks of one kind in encounter order.
	///
	/// Mesh lookups also return meshes nested in obstacles; every other kind
	/// only matches top-level chunks.
	pub fn chunks_of(&self, kind: ChunkKind) -> Vec<&Chunk> {
		if kind == ChunkKind::Mesh {
			return self.walk().into_iter().map(|item| item.chunk).filter(|chunk| chunk.kind() == kind).collect();
		}
		self.chunks.iter().filter(|chunk| chunk.kind() == kind).collect()
	}

	/// Mesh geometry, nested obstacle meshes included.
	pub fn meshes(&self) -> Vec<&Geometry> {
		self.chunks_of(ChunkKind::Mesh)
			.into_iter()
			.filter_map(|chunk| match &chunk.body {
				ChunkBody::Mesh(geometry) => Some(geometry),
				_ => None,
			})
			.collect()
	}

	/// Top-level `OBMO` bodies.
	pub fn morphed_objects(&self) -> impl Iterator<Item = &MorphedObject> {
		self.bodies(|body| match body {
			ChunkBody::MorphedObject(object) => Some(object),
			_ => None,
		})
	}

	/// Top-level `BONE` bodies.
	pub fn bone_animations(&self) -> impl Iterator<Item = &BoneAnimationChunk> {
		self.bodies(|body| match body {
			ChunkBody::BoneAnimation(animation) => Some(animation),
			_ => None,
		})
	}

	/// Top-level `OBSK` bodies.
	pub fn skeletons(&self) -> impl Iterator<Item = &Skeleton> {
		self.bodies(|body| match body {
			ChunkBody::Skeleton(skeleton) => Some(skeleton),
			_ => None,
		})
	}

	/// Top-level `TEXT` bodies.
	pub fn textures(&self) -> impl Iterator<Item = &TextureRef> {
		self.bodies(|body| match body {
			ChunkBody::Texture(texture) => Some(texture),
			_ => None,
		})
	}

	/// Top-level `MATE` bodies.
	pub fn materials(&self) -> impl Iterator<Item = &MaterialChunk> {
		self.bodies(|body| match body {
			ChunkBody::Material(material) => Some(material),
			_ => None,
		})
	}

	/// Top-level `ASEL` bodies.
	pub fn asset_lists(&self) -> impl Iterator<Item = &AssetList> {
		self.bodies(|body| match body {
			ChunkBody::AssetList(list) => Some(list),
			_ => None,
		})
	}

	/// Top-level `OBST` bodies.
	pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
		self.bodies(|body| match body {
			ChunkBody::Obstacle(obstacle) => Some(obstacle),
			_ => None,
		})
	}

	/// Top-level `DUMY` bodies.
	pub fn dummies(&self) -> impl Iterator<Item = &Dummy> {
		self.bodies(|body| match body {
			ChunkBody::Dummy(dummy) => Some(dummy),
			_ => None,
		})
	}

	/// Top-level effect bodies.
	pub fn effects(&self) -> impl Iterator<Item = &Effect> {
		self.bodies(|body| match body {
			ChunkBody::Effect(effect) => Some(effect),
			_ => None,
		})
	}

	/// First top-level bounding box.
	pub fn bounding_box(&self) -> Option<&BoundingBox> {
		self.bodies(|body| match body {
			ChunkBody::BoundingBox(bbox) => Some(bbox),
			_ => None,
		})
		.next()
	}

	/// First top-level oriented box.
	pub fn oriented_box(&self) -> Option<&OrientedBox> {
		self.bodies(|body| match body {
			ChunkBody::OrientedBox(obox) => Some(obox),
			_ => None,
		})
		.next()
	}

	/// First export timestamp.
	pub fn timestamp(&self) -> Option<&str> {
		self.bodies(|body| match body {
			ChunkBody::Timestamp(stamp) => Some(stamp.as_str()),
			_ => None,
		})
		.next()
	}

	/// Texture references resolved from materials, in material order.
	pub fn texture_names(&self) -> Vec<&str> {
		self.materials().filter_map(MaterialChunk::texture).collect()
	}

	/// Count chunks per tag across the whole tree.
	pub fn stats(&self) -> SceneStats {
		let mut stats = SceneStats::default();
		for item in self.walk() {
			if item.depth == 0 {
				stats.chunk_count += 1;
			} else {
				stats.nested_count += 1;
			}
			*stats.codes.entry(item.chunk.head.tag).or_insert(0) += 1;
		}
		stats
	}

	/// Shorthand for `stats().tag_counts()`.
	pub fn tag_counts(&self) -> Vec<([u8; 4], u32)> {
		self.stats().tag_counts()
	}

	fn bodies<'a, T: ?Sized + 'a>(&'a self, pick: impl Fn(&'a ChunkBody) -> Option<&'a T> + 'a) -> impl Iterator<Item = &'a T> + 'a {
		self.chunks.iter().filter_map(move |chunk| pick(&chunk.body))
	}
}

fn visit<'a>(chunk: &'a Chunk, depth: usize, out: &mut Vec<WalkItem<'a>>) {
	let index = out.len();
	out.push(WalkItem { index, depth, chunk });
	for nested in chunk.nested() {
		visit(nested, depth + 1, out);
	}
}
