use crate::bmod::bytes::Cursor;
use crate::bmod::decode::{Decoder, partial};
use crate::bmod::{ChunkBody, ChunkHead, Result};

/// Entry type name synthesized for the texture entry of a `MATE` chunk.
pub const MATERIAL_ENTRY: &str = "MATERIAL";
/// Property name carrying a texture reference.
pub const TEXTURE_PROPERTY: &str = "TEXTURE";

const UNKNOWN_BLOCK_LEN: usize = 96;
const RECORD_LEN: usize = 20;

/// Decoded `TEXT` chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureRef {
	/// Leading reserved word, zero in known files.
	pub reserved: u32,
	/// Texture path as stored.
	pub path: String,
}

/// Named material property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialProperty {
	/// Property name.
	pub name: String,
	/// Texture reference, when this property names one.
	pub texture: Option<String>,
}

/// Typed group of material properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialEntry {
	/// Entry type name.
	pub type_name: String,
	/// Properties in stored order.
	pub properties: Vec<MaterialProperty>,
}

/// Decoded `MATE` chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialChunk {
	/// Material id.
	pub material_id: u32,
	/// Material entries; at most one texture entry is recovered.
	pub entries: Vec<MaterialEntry>,
	/// Count word of the trailing record table, when present.
	pub record_count: Option<u32>,
	/// Records of the trailing table that were skipped.
	pub skipped_records: u32,
}

impl MaterialChunk {
	/// First texture reference among all entry properties.
	pub fn texture(&self) -> Option<&str> {
		self.entries
			.iter()
			.flat_map(|entry| entry.properties.iter())
			.find_map(|property| property.texture.as_deref())
	}
}

pub(crate) fn decode_texture(_decoder: &mut Decoder, cursor: &mut Cursor<'_>, _head: &ChunkHead, _depth: u32) -> (ChunkBody, Result<()>) {
	partial(ChunkBody::Texture, |texture: &mut TextureRef| {
		texture.reserved = cursor.read_u32_le()?;
		texture.path = cursor.read_prefixed_string()?;
		Ok(())
	})
}

pub(crate) fn decode_material(decoder: &mut Decoder, cursor: &mut Cursor<'_>, head: &ChunkHead, _depth: u32) -> (ChunkBody, Result<()>) {
	partial(ChunkBody::Material, |material| read_material(decoder, cursor, head, material))
}

fn read_material(decoder: &mut Decoder, cursor: &mut Cursor<'_>, head: &ChunkHead, material: &mut MaterialChunk) -> Result<()> {
	material.material_id = cursor.read_u32_le()?;
	let texture = decoder.read_guarded_name(cursor, head)?;
	if !texture.is_empty() {
		material.entries.push(MaterialEntry {
			type_name: MATERIAL_ENTRY.to_owned(),
			properties: vec![MaterialProperty {
				name: TEXTURE_PROPERTY.to_owned(),
				texture: Some(texture),
			}],
		});
	}

	skip_record_table(cursor, material)
}

/// Skip the undocumented trailer: a count word, an optional 96-byte block,
/// then 20-byte records while they fit.
///
/// Bytes left after that are not read; the chunk engine moves past them.
fn skip_record_table(cursor: &mut Cursor<'_>, material: &mut MaterialChunk) -> Result<()> {
	let mut remaining = cursor.remaining();
	if remaining < 4 {
		return Ok(());
	}

	let count = cursor.read_u32_le()?;
	material.record_count = Some(count);
	if remaining >= UNKNOWN_BLOCK_LEN + 4 {
		cursor.skip(UNKNOWN_BLOCK_LEN)?;
		remaining -= UNKNOWN_BLOCK_LEN + 4;
	} else {
		remaining -= 4;
	}

	while material.skipped_records < count && remaining >= RECORD_LEN {
		cursor.skip(RECORD_LEN)?;
		remaining -= RECORD_LEN;
		material.skipped_records += 1;
	}
	Ok(())
}
