use crate::bmod::bytes::Cursor;
use crate::bmod::{BmodError, Result};

/// Parsed 12-byte container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmodHeader {
	/// Four-byte magic, `BMOD` or `OMOD`.
	pub magic: [u8; 4],
	/// Declared file size. Informational only, never validated.
	pub file_size: u32,
	/// Minor version (`13` for v1.13).
	pub version_minor: u16,
	/// Major version (always `1` for accepted files).
	pub version_major: u16,
}

impl BmodHeader {
	/// Encoded header length in bytes.
	pub const SIZE: usize = 12;
	/// Magic of the later container revision.
	pub const MAGIC_BMOD: [u8; 4] = *b"BMOD";
	/// Magic of the earlier container revision.
	pub const MAGIC_OMOD: [u8; 4] = *b"OMOD";
	/// Oldest accepted minor version.
	pub const MIN_MINOR: u16 = 10;
	/// Newest accepted minor version.
	pub const MAX_MINOR: u16 = 13;

	/// Parse and validate a header at the cursor position.
	pub fn parse(cursor: &mut Cursor<'_>) -> Result<Self> {
		let magic = cursor.read_tag()?;
		let file_size = cursor.read_u32_le()?;
		let version_minor = cursor.read_u16_le()?;
		let version_major = cursor.read_u16_le()?;

		let header = Self {
			magic,
			file_size,
			version_minor,
			version_major,
		};
		header.validate()?;
		Ok(header)
	}

	/// Check magic and version against the accepted set.
	pub fn validate(&self) -> Result<()> {
		if self.magic != Self::MAGIC_BMOD && self.magic != Self::MAGIC_OMOD {
			return Err(BmodError::UnknownMagic { magic: self.magic });
		}

		if self.version_major != 1 || !(Self::MIN_MINOR..=Self::MAX_MINOR).contains(&self.version_minor) {
			return Err(BmodError::UnsupportedVersion {
				major: self.version_major,
				minor: self.version_minor,
			});
		}

		Ok(())
	}

	/// Render the version as `v<major>.<minor>`.
	pub fn version_label(&self) -> String {
		format!("v{}.{}", self.version_major, self.version_minor)
	}

	/// Encode the header back to its 12-byte layout.
	pub fn to_bytes(&self) -> [u8; Self::SIZE] {
		let mut out = [0_u8; Self::SIZE];
		out[0..4].copy_from_slice(&self.magic);
		out[4..8].copy_from_slice(&self.file_size.to_le_bytes());
		out[8..10].copy_from_slice(&self.version_minor.to_le_bytes());
		out[10..12].copy_from_slice(&self.version_major.to_le_bytes());
		out
	}
}
