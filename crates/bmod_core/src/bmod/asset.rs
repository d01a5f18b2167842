use crate::bmod::bytes::Cursor;
use crate::bmod::decode::{Decoder, partial};
use crate::bmod::{ChunkBody, ChunkHead, Result};

/// Length of the `TIME` string.
pub const TIMESTAMP_LEN: usize = 24;

/// One `(id, unknown, string)` triple of an asset list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetString {
	/// String id.
	pub id: u32,
	/// Second word, meaning unknown.
	pub unknown: u32,
	/// String value.
	pub value: String,
}

/// Decoded `ASEL` chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetList {
	/// Declared entry count.
	pub declared_count: u32,
	/// Entries in stored order.
	pub entries: Vec<AssetString>,
}

pub(crate) fn decode_asset_list(_decoder: &mut Decoder, cursor: &mut Cursor<'_>, _head: &ChunkHead, _depth: u32) -> (ChunkBody, Result<()>) {
	partial(ChunkBody::AssetList, |list: &mut AssetList| {
		list.declared_count = cursor.read_u32_le()?;
		list.entries.reserve((list.declared_count as usize).min(cursor.remaining() / 12));
		for _ in 0..list.declared_count {
			list.entries.push(AssetString {
				id: cursor.read_u32_le()?,
				unknown: cursor.read_u32_le()?,
				value: cursor.read_prefixed_string()?,
			});
		}
		Ok(())
	})
}

pub(crate) fn decode_asset_section(_decoder: &mut Decoder, cursor: &mut Cursor<'_>, _head: &ChunkHead, _depth: u32) -> (ChunkBody, Result<()>) {
	let mut reserved = 0;
	let outcome = cursor.read_u32_le().map(|word| reserved = word);
	(ChunkBody::AssetSection { reserved }, outcome)
}

pub(crate) fn decode_timestamp(_decoder: &mut Decoder, cursor: &mut Cursor<'_>, _head: &ChunkHead, _depth: u32) -> (ChunkBody, Result<()>) {
	partial(ChunkBody::Timestamp, |stamp: &mut String| {
		*stamp = cursor.read_string(TIMESTAMP_LEN)?;
		Ok(())
	})
}
