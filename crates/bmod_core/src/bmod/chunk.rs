use crate::bmod::bytes::Cursor;
use crate::bmod::{
	AssetList, BoneAnimationChunk, BoundingBox, Dummy, Effect, Geometry, MaterialChunk, MorphedObject, Obstacle, OrientedBox, Result, Skeleton,
	TextureRef,
};

/// Four-byte tags understood by the decoder.
pub mod tags {
	/// Global bounding box.
	pub const MBOX: [u8; 4] = *b"MBOX";
	/// Object bounding box (center and normal).
	pub const OBOX: [u8; 4] = *b"OBOX";
	/// Mesh geometry.
	pub const MESH: [u8; 4] = *b"MESH";
	/// Mirrored mesh geometry, same layout as `MESH`.
	pub const MEMS: [u8; 4] = *b"MEMS";
	/// Named morphed-object geometry.
	pub const OBMO: [u8; 4] = *b"OBMO";
	/// Skeleton bone list.
	pub const OBSK: [u8; 4] = *b"OBSK";
	/// Bone animation.
	pub const BONE: [u8; 4] = *b"BONE";
	/// Texture path reference.
	pub const TEXT: [u8; 4] = *b"TEXT";
	/// Material.
	pub const MATE: [u8; 4] = *b"MATE";
	/// Blast effect.
	pub const BLST: [u8; 4] = *b"BLST";
	/// Cloud effect.
	pub const CLOU: [u8; 4] = *b"CLOU";
	/// Omni light effect.
	pub const OMNI: [u8; 4] = *b"OMNI";
	/// Lens flare effect.
	pub const FLAR: [u8; 4] = *b"FLAR";
	/// Asset string list.
	pub const ASEL: [u8; 4] = *b"ASEL";
	/// Asset section marker.
	pub const ASEC: [u8; 4] = *b"ASEC";
	/// Obstacle object instance container.
	pub const OBST: [u8; 4] = *b"OBST";
	/// Dummy placeholder object.
	pub const DUMY: [u8; 4] = *b"DUMY";
	/// Export timestamp.
	pub const TIME: [u8; 4] = *b"TIME";
	/// Vertex block inside geometry.
	pub const VERT: [u8; 4] = *b"VERT";
	/// Index block inside geometry.
	pub const ISTR: [u8; 4] = *b"ISTR";
	/// Face metadata block inside geometry.
	pub const FACE: [u8; 4] = *b"FACE";
	/// Keyframed spline record inside a face block.
	pub const LODP: [u8; 4] = *b"LODP";
}

/// Framing header shared by top-level chunks and sub-chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHead {
	/// Four-byte chunk tag.
	pub tag: [u8; 4],
	/// Declared size including the 8-byte header.
	pub size: u32,
	/// Absolute stream offset of the first payload byte.
	pub payload_start: usize,
}

impl ChunkHead {
	/// Encoded header length in bytes.
	pub const SIZE: usize = 8;

	/// Parse a chunk header at the cursor position.
	pub fn parse(cursor: &mut Cursor<'_>) -> Result<Self> {
		let tag = cursor.read_tag()?;
		let size = cursor.read_u32_le()?;
		Ok(Self {
			tag,
			size,
			payload_start: cursor.pos(),
		})
	}

	/// Absolute offset of the header itself.
	pub fn offset(&self) -> usize {
		self.payload_start.saturating_sub(Self::SIZE)
	}

	/// Payload length, `size - 8`.
	pub fn payload_len(&self) -> usize {
		(self.size as usize).saturating_sub(Self::SIZE)
	}

	/// Absolute offset one past the last payload byte.
	pub fn payload_end(&self) -> usize {
		self.payload_start + self.payload_len()
	}
}

/// Fieldless discriminant of [`ChunkBody`], used for filtered views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkKind {
	/// `MBOX`.
	BoundingBox,
	/// `OBOX`.
	OrientedBox,
	/// `MESH` and `MEMS`.
	Mesh,
	/// `OBMO`.
	MorphedObject,
	/// `OBSK`.
	Skeleton,
	/// `BONE`.
	BoneAnimation,
	/// `TEXT`.
	Texture,
	/// `MATE`.
	Material,
	/// `BLST`, `CLOU`, `OMNI`, `FLAR`.
	Effect,
	/// `ASEL`.
	AssetList,
	/// `ASEC`.
	AssetSection,
	/// `OBST`.
	Obstacle,
	/// `DUMY`.
	Dummy,
	/// `TIME`.
	Timestamp,
	/// Any unregistered tag.
	Opaque,
}

impl ChunkKind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::BoundingBox => "bounding_box",
			Self::OrientedBox => "oriented_box",
			Self::Mesh => "mesh",
			Self::MorphedObject => "morphed_object",
			Self::Skeleton => "skeleton",
			Self::BoneAnimation => "bone_animation",
			Self::Texture => "texture",
			Self::Material => "material",
			Self::Effect => "effect",
			Self::AssetList => "asset_list",
			Self::AssetSection => "asset_section",
			Self::Obstacle => "obstacle",
			Self::Dummy => "dummy",
			Self::Timestamp => "timestamp",
			Self::Opaque => "opaque",
		}
	}
}

/// Decoded payload of one chunk.
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkBody {
	/// Global bounding box.
	BoundingBox(BoundingBox),
	/// Object box.
	OrientedBox(OrientedBox),
	/// Plain or mirrored mesh.
	Mesh(Geometry),
	/// Named morphed-object geometry.
	MorphedObject(MorphedObject),
	/// Skeleton bone list.
	Skeleton(Skeleton),
	/// Keyframed bone animation.
	BoneAnimation(BoneAnimationChunk),
	/// Texture path reference.
	Texture(TextureRef),
	/// Material entries.
	Material(MaterialChunk),
	/// Effect with undocumented layout.
	Effect(Effect),
	/// Asset string list.
	AssetList(AssetList),
	/// Asset section marker.
	AssetSection {
		/// Single reserved word.
		reserved: u32,
	},
	/// Object instance container.
	Obstacle(Obstacle),
	/// Placeholder object.
	Dummy(Dummy),
	/// Fixed 24-character export timestamp.
	Timestamp(String),
	/// Raw payload of an unregistered tag.
	Opaque(Vec<u8>),
}

impl ChunkBody {
	/// Return the fieldless kind of this body.
	pub fn kind(&self) -> ChunkKind {
		match self {
			Self::BoundingBox(_) => ChunkKind::BoundingBox,
			Self::OrientedBox(_) => ChunkKind::OrientedBox,
			Self::Mesh(_) => ChunkKind::Mesh,
			Self::MorphedObject(_) => ChunkKind::MorphedObject,
			Self::Skeleton(_) => ChunkKind::Skeleton,
			Self::BoneAnimation(_) => ChunkKind::BoneAnimation,
			Self::Texture(_) => ChunkKind::Texture,
			Self::Material(_) => ChunkKind::Material,
			Self::Effect(_) => ChunkKind::Effect,
			Self::AssetList(_) => ChunkKind::AssetList,
			Self::AssetSection { .. } => ChunkKind::AssetSection,
			Self::Obstacle(_) => ChunkKind::Obstacle,
			Self::Dummy(_) => ChunkKind::Dummy,
			Self::Timestamp(_) => ChunkKind::Timestamp,
			Self::Opaque(_) => ChunkKind::Opaque,
		}
	}
}

/// One framed chunk: header plus decoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
	/// Framing header.
	pub head: ChunkHead,
	/// Decoded body, possibly partial when a diagnostic was recorded.
	pub body: ChunkBody,
}

impl Chunk {
	/// Return the fieldless kind of this chunk.
	pub fn kind(&self) -> ChunkKind {
		self.body.kind()
	}

	/// Chunks owned inside this one.
	///
	/// Only obstacles own nested chunks.
	pub fn nested(&self) -> &[Chunk] {
		match &self.body {
			ChunkBody::Obstacle(obstacle) => &obstacle.nested,
			_ => &[],
		}
	}
}

/// Render tag bytes as a printable label.
pub fn tag_label(tag: [u8; 4]) -> String {
	let mut out = String::new();
	for byte in tag {
		if byte == 0 {
			continue;
		}
		if byte.is_ascii_graphic() || byte == b' ' {
			out.push(char::from(byte));
		} else {
			out.push('.');
		}
	}
	if out.is_empty() { "....".to_owned() } else { out }
}
