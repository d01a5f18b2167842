use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, BmodError>;

/// Errors produced while decoding, querying, and re-encoding model containers.
#[derive(Debug, Error)]
pub enum BmodError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Leading file magic is neither `BMOD` nor `OMOD`.
	#[error("not a model container (magic={magic:?})")]
	UnknownMagic {
		/// First four bytes of the stream.
		magic: [u8; 4],
	},
	/// Header version outside the supported `1.10..=1.13` range.
	#[error("unsupported container version {major}.{minor} (expected 1.10 to 1.13)")]
	UnsupportedVersion {
		/// Parsed major version.
		major: u16,
		/// Parsed minor version.
		minor: u16,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available before the active boundary.
		rem: usize,
	},
	/// Container chunks nested deeper than the configured ceiling.
	#[error("chunk nesting exceeded (max={max_depth})")]
	NestingTooDeep {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Bone parent links form a cycle reachable from a root.
	#[error("cyclic bone hierarchy at bone id {bone_id}")]
	CyclicHierarchy {
		/// Bone id that was reached a second time along one branch.
		bone_id: u32,
	},
	/// Bone tree deeper than the configured ceiling.
	#[error("bone hierarchy deeper than {max_depth}")]
	HierarchyTooDeep {
		/// Configured depth ceiling.
		max_depth: usize,
	},
	/// The writer has no encoder for this chunk kind.
	#[error("chunk {tag:?} cannot be written")]
	UnsupportedWrite {
		/// Four-byte chunk tag.
		tag: [u8; 4],
	},
	/// Encoded payload does not fit the 32-bit size field.
	#[error("chunk {tag:?} payload of {len} bytes does not fit a 32-bit size")]
	PayloadTooLarge {
		/// Four-byte chunk tag.
		tag: [u8; 4],
		/// Encoded payload length.
		len: usize,
	},
	/// CLI tag argument was invalid.
	#[error("invalid chunk tag: {tag}")]
	InvalidTag {
		/// User-provided tag string.
		tag: String,
	},
	/// No `BONE` chunk was found.
	#[error("no bone animation chunk found")]
	NoBoneAnimation,
	/// Requested chunk index is past the end of the chunk list.
	#[error("chunk index {index} out of range (count={count})")]
	ChunkIndexOutOfRange {
		/// Requested index.
		index: usize,
		/// Number of chunks available.
		count: usize,
	},
}
