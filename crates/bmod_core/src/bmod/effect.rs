use crate::bmod::bytes::Cursor;
use crate::bmod::chunk::tags;
use crate::bmod::decode::Decoder;
use crate::bmod::{ChunkBody, ChunkHead, Result};

/// Effect family, one per effect tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
	/// `BLST`.
	Blast,
	/// `CLOU`.
	Cloud,
	/// `OMNI`.
	Omni,
	/// `FLAR`.
	Flare,
}

impl EffectKind {
	/// Map an effect tag to its kind.
	pub fn from_tag(tag: [u8; 4]) -> Option<Self> {
		match tag {
			tags::BLST => Some(Self::Blast),
			tags::CLOU => Some(Self::Cloud),
			tags::OMNI => Some(Self::Omni),
			tags::FLAR => Some(Self::Flare),
			_ => None,
		}
	}

	/// Tag this kind is stored under.
	pub fn tag(self) -> [u8; 4] {
		match self {
			Self::Blast => tags::BLST,
			Self::Cloud => tags::CLOU,
			Self::Omni => tags::OMNI,
			Self::Flare => tags::FLAR,
		}
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Blast => "blast",
			Self::Cloud => "cloud",
			Self::Omni => "omni",
			Self::Flare => "flare",
		}
	}
}

/// Effect chunk; the payload layout is undocumented and kept raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effect {
	/// Effect family.
	pub kind: EffectKind,
	/// Raw payload.
	pub payload: Vec<u8>,
}

pub(crate) fn decode_effect(decoder: &mut Decoder, cursor: &mut Cursor<'_>, head: &ChunkHead, depth: u32) -> (ChunkBody, Result<()>) {
	match EffectKind::from_tag(head.tag) {
		Some(kind) => {
			let rest = cursor.remaining();
			let (payload, outcome) = match cursor.read_exact(rest) {
				Ok(raw) => (raw.to_vec(), Ok(())),
				Err(err) => (Vec::new(), Err(err)),
			};
			(ChunkBody::Effect(Effect { kind, payload }), outcome)
		}
		None => decode_opaque(decoder, cursor, head, depth),
	}
}

/// Keep the whole payload as raw bytes.
pub(crate) fn decode_opaque(_decoder: &mut Decoder, cursor: &mut Cursor<'_>, _head: &ChunkHead, _depth: u32) -> (ChunkBody, Result<()>) {
	let rest = cursor.remaining();
	match cursor.read_exact(rest) {
		Ok(raw) => (ChunkBody::Opaque(raw.to_vec()), Ok(())),
		Err(err) => (ChunkBody::Opaque(Vec::new()), Err(err)),
	}
}
