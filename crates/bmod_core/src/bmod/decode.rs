use std::fs;
use std::io::Read;
use std::path::Path;

use crate::bmod::bytes::Cursor;
use crate::bmod::chunk::tags;
use crate::bmod::{BmodError, BmodHeader, Chunk, ChunkBody, ChunkHead, Diagnostic, Result, Scene, Severity, asset, bone, effect, geometry, material, object, tag_label};

/// Runtime limits and behavior switches for container decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum container nesting depth below the top level.
	pub max_depth: u32,
	/// Exclusive upper bound for guarded name lengths.
	pub name_limit: u32,
	/// Bytes the trailing tangent block may fall short of `24 * vertex_count`.
	///
	/// Known assets need exactly 100.
	pub tangent_slack: i64,
	/// Record informational notices alongside recoverable ones.
	pub info_notices: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 8,
			name_limit: 1024,
			tangent_slack: 100,
			info_notices: true,
		}
	}
}

impl DecodeOptions {
	/// Preset that keeps only recoverable diagnostics.
	pub fn quiet() -> Self {
		Self {
			info_notices: false,
			..Self::default()
		}
	}
}

/// Result of a successful decode: the scene plus everything worth reporting.
#[derive(Debug, Clone)]
pub struct Decoded {
	/// Decoded scene aggregate.
	pub scene: Scene,
	/// Notices in the order they were produced.
	pub diagnostics: Vec<Diagnostic>,
}

impl Decoded {
	/// Iterate recoverable diagnostics only.
	pub fn recoverable(&self) -> impl Iterator<Item = &Diagnostic> {
		self.diagnostics.iter().filter(|item| item.severity == Severity::Recoverable)
	}
}

/// Decode a complete container held in memory with default options.
pub fn decode(bytes: &[u8]) -> Result<Decoded> {
	decode_with(bytes, &DecodeOptions::default())
}

/// Decode a complete container held in memory.
pub fn decode_with(bytes: &[u8], options: &DecodeOptions) -> Result<Decoded> {
	let mut cursor = Cursor::new(bytes);
	let header = BmodHeader::parse(&mut cursor)?;
	log::debug!("header {} {} file_size={}", tag_label(header.magic), header.version_label(), header.file_size);

	let mut decoder = Decoder::new(options.clone());
	let mut chunks = Vec::new();
	while let Some(chunk) = decoder.read_chunk(&mut cursor, 0)? {
		chunks.push(chunk);
	}

	if cursor.remaining() > 0 {
		let rest = cursor.remaining();
		decoder.notice(header.magic, cursor.pos(), format!("{rest} trailing bytes after the last chunk left unparsed"));
	}

	Ok(Decoded {
		scene: Scene::new(header, chunks),
		diagnostics: decoder.diagnostics,
	})
}

/// Read a stream to its end and decode it.
pub fn decode_reader(mut reader: impl Read) -> Result<Decoded> {
	let mut bytes = Vec::new();
	reader.read_to_end(&mut bytes)?;
	decode(&bytes)
}

/// Read and decode a container from disk.
pub fn decode_file(path: impl AsRef<Path>) -> Result<Decoded> {
	let bytes = fs::read(path)?;
	decode(&bytes)
}

/// Variant decoder: returns the (possibly partial) body and whether decoding finished.
type BodyDecoder = fn(&mut Decoder, &mut Cursor<'_>, &ChunkHead, u32) -> (ChunkBody, Result<()>);

const CHUNK_DECODERS: &[([u8; 4], BodyDecoder)] = &[
	(tags::MBOX, object::decode_bounding_box),
	(tags::OBOX, object::decode_oriented_box),
	(tags::MESH, geometry::decode_mesh),
	(tags::MEMS, geometry::decode_mesh),
	(tags::OBMO, geometry::decode_morphed_object),
	(tags::OBSK, bone::decode_skeleton),
	(tags::BONE, bone::decode_bone_animation),
	(tags::TEXT, material::decode_texture),
	(tags::MATE, material::decode_material),
	(tags::BLST, effect::decode_effect),
	(tags::CLOU, effect::decode_effect),
	(tags::OMNI, effect::decode_effect),
	(tags::FLAR, effect::decode_effect),
	(tags::ASEL, asset::decode_asset_list),
	(tags::ASEC, asset::decode_asset_section),
	(tags::OBST, object::decode_obstacle),
	(tags::DUMY, object::decode_dummy),
	(tags::TIME, asset::decode_timestamp),
];

/// Return `true` when `tag` has a registered top-level decoder.
pub fn is_known_tag(tag: [u8; 4]) -> bool {
	CHUNK_DECODERS.iter().any(|(known, _)| *known == tag)
}

/// Run `fill` against a default value and wrap whatever it populated.
///
/// The body is kept even when `fill` fails part-way.
pub(crate) fn partial<T: Default>(wrap: impl FnOnce(T) -> ChunkBody, fill: impl FnOnce(&mut T) -> Result<()>) -> (ChunkBody, Result<()>) {
	let mut value = T::default();
	let outcome = fill(&mut value);
	(wrap(value), outcome)
}

/// What to do with a chunk whose declared size runs past the cursor boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SizeGate {
	/// End the scan and leave the cursor at the header.
	Stop,
	/// Decode what is there and keep the chunk.
	Truncate,
}

/// Chunk framing, dispatch, and diagnostics state for one decode pass.
pub(crate) struct Decoder {
	options: DecodeOptions,
	diagnostics: Vec<Diagnostic>,
}

impl Decoder {
	pub(crate) fn new(options: DecodeOptions) -> Self {
		Self {
			options,
			diagnostics: Vec::new(),
		}
	}

	pub(crate) fn options(&self) -> &DecodeOptions {
		&self.options
	}

	/// Frame and decode one chunk, leaving `cursor` exactly at its payload end.
	///
	/// Returns `None` when fewer than 8 bytes remain or the next header fails
	/// the size gate; in the latter case the cursor is left at that header.
	/// A top-level chunk running past the end of the stream is still decoded
	/// against the bytes that exist and kept as a partial chunk.
	pub(crate) fn read_chunk(&mut self, cursor: &mut Cursor<'_>, depth: u32) -> Result<Option<Chunk>> {
		if cursor.remaining() < ChunkHead::SIZE {
			return Ok(None);
		}
		if depth > self.options.max_depth {
			return Err(BmodError::NestingTooDeep {
				max_depth: self.options.max_depth,
			});
		}

		let gate = if depth == 0 { SizeGate::Truncate } else { SizeGate::Stop };
		let Some(head) = self.next_head(cursor, gate)? else {
			return Ok(None);
		};
		log::debug!("{:indent$}chunk {} @{} size={}", "", tag_label(head.tag), head.offset(), head.size, indent = depth as usize * 2);

		let mut body = cursor.bounded(head.payload_end());
		let (decoded, outcome) = match CHUNK_DECODERS.iter().find(|(tag, _)| *tag == head.tag) {
			Some((_, decode_body)) => decode_body(self, &mut body, &head, depth),
			None => {
				self.recoverable(&head, "unknown chunk tag, payload kept opaque");
				effect::decode_opaque(self, &mut body, &head, depth)
			}
		};

		if let Err(err) = outcome {
			self.recoverable(&head, format!("decode stopped early: {err}"));
		}

		cursor.seek(head.payload_end());
		Ok(Some(Chunk { head, body: decoded }))
	}

	/// Scan sub-chunks until the cursor boundary, handing each framed one to `each`.
	///
	/// A failing `each` is recorded against that sub-chunk and the scan goes on
	/// at its payload end. An invalid sub-chunk size ends the scan.
	pub(crate) fn scan_sub_chunks<'a>(
		&mut self,
		cursor: &mut Cursor<'a>,
		depth: u32,
		mut each: impl FnMut(&mut Self, &mut Cursor<'a>, &ChunkHead) -> Result<()>,
	) -> Result<()> {
		if cursor.remaining() >= ChunkHead::SIZE && depth > self.options.max_depth {
			return Err(BmodError::NestingTooDeep {
				max_depth: self.options.max_depth,
			});
		}

		while let Some(head) = self.next_head(cursor, SizeGate::Stop)? {
			log::debug!("{:indent$}sub-chunk {} @{} size={}", "", tag_label(head.tag), head.offset(), head.size, indent = depth as usize * 2);
			let mut body = cursor.bounded(head.payload_end());
			if let Err(err) = each(self, &mut body, &head) {
				self.recoverable(&head, format!("sub-chunk decode stopped early: {err}"));
			}
			cursor.seek(head.payload_end());
		}

		Ok(())
	}

	/// Read the next header and apply the size gate.
	///
	/// A size below 8 always ends the scan. A size past the cursor boundary
	/// ends it under [`SizeGate::Stop`]; under [`SizeGate::Truncate`] the header
	/// is returned and the payload is read up to the boundary.
	fn next_head(&mut self, cursor: &mut Cursor<'_>, gate: SizeGate) -> Result<Option<ChunkHead>> {
		if cursor.remaining() < ChunkHead::SIZE {
			return Ok(None);
		}

		let start = cursor.pos();
		let available = cursor.remaining();
		let head = ChunkHead::parse(cursor)?;
		let size = head.size as usize;
		if size < ChunkHead::SIZE || (size > available && gate == SizeGate::Stop) {
			self.recoverable(
				&head,
				format!("invalid chunk size {size} with {available} bytes remaining, scan stopped"),
			);
			cursor.seek(start);
			return Ok(None);
		}
		if size > available {
			self.recoverable(
				&head,
				format!("chunk size {size} runs past the end of the stream ({available} bytes remaining), payload truncated"),
			);
		}

		Ok(Some(head))
	}

	/// Read a `u32`-prefixed name, treating lengths outside `(0, name_limit)` as empty.
	pub(crate) fn read_guarded_name(&mut self, cursor: &mut Cursor<'_>, head: &ChunkHead) -> Result<String> {
		let len = cursor.read_u32_le()?;
		if len > 0 && len < self.options.name_limit {
			return cursor.read_string(len as usize);
		}

		if len != 0 {
			self.notice(head.tag, head.offset(), format!("name length {len} outside (0, {}), treated as empty", self.options.name_limit));
		}
		Ok(String::new())
	}

	pub(crate) fn recoverable(&mut self, head: &ChunkHead, message: impl Into<String>) {
		let diagnostic = Diagnostic {
			severity: Severity::Recoverable,
			tag: head.tag,
			offset: head.offset(),
			message: message.into(),
		};
		log::warn!("{diagnostic}");
		self.diagnostics.push(diagnostic);
	}

	pub(crate) fn notice(&mut self, tag: [u8; 4], offset: usize, message: impl Into<String>) {
		let diagnostic = Diagnostic {
			severity: Severity::Info,
			tag,
			offset,
			message: message.into(),
		};
		log::info!("{diagnostic}");
		if self.options.info_notices {
			self.diagnostics.push(diagnostic);
		}
	}
}
