use glam::{Quat, Vec2, Vec3};

use crate::bmod::{BmodError, Result};

/// Bounded little-endian cursor over an immutable byte slice.
///
/// Positions are absolute offsets into the backing slice. A cursor can be
/// narrowed with [`Cursor::bounded`] so a chunk decoder cannot read past the
/// end of its own payload.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
	end: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0 spanning the whole slice.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0, end: bytes.len() }
	}

	/// Return current absolute byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return the absolute offset this cursor may not read past.
	pub fn end(&self) -> usize {
		self.end
	}

	/// Return remaining unread bytes before the boundary.
	pub fn remaining(&self) -> usize {
		self.end.saturating_sub(self.pos)
	}

	/// Move to an absolute offset, clamped to the boundary.
	pub fn seek(&mut self, pos: usize) {
		self.pos = pos.min(self.end);
	}

	/// Borrow a cursor at the same position that stops at `end`.
	///
	/// `end` is clamped to this cursor's own boundary.
	pub fn bounded(&self, end: usize) -> Cursor<'a> {
		Cursor {
			bytes: self.bytes,
			pos: self.pos,
			end: end.min(self.end),
		}
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(BmodError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Advance by `n` bytes without interpreting them.
	pub fn skip(&mut self, n: usize) -> Result<()> {
		self.read_exact(n).map(|_| ())
	}

	/// Read a four-byte tag.
	pub fn read_tag(&mut self) -> Result<[u8; 4]> {
		let raw = self.read_exact(4)?;
		let mut out = [0_u8; 4];
		out.copy_from_slice(raw);
		Ok(out)
	}

	/// Read a little-endian `u16`.
	pub fn read_u16_le(&mut self) -> Result<u16> {
		let raw = self.read_exact(2)?;
		Ok(u16::from_le_bytes([raw[0], raw[1]]))
	}

	/// Read a little-endian `u32`.
	pub fn read_u32_le(&mut self) -> Result<u32> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i32`.
	pub fn read_i32_le(&mut self) -> Result<i32> {
		Ok(i32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian IEEE-754 `f32`.
	pub fn read_f32_le(&mut self) -> Result<f32> {
		Ok(f32::from_le_bytes(self.read_array()?))
	}

	/// Read two consecutive `f32` values.
	pub fn read_vec2(&mut self) -> Result<Vec2> {
		Ok(Vec2::new(self.read_f32_le()?, self.read_f32_le()?))
	}

	/// Read three consecutive `f32` values.
	pub fn read_vec3(&mut self) -> Result<Vec3> {
		Ok(Vec3::new(self.read_f32_le()?, self.read_f32_le()?, self.read_f32_le()?))
	}

	/// Read four consecutive `f32` values as an `x, y, z, w` quaternion.
	///
	/// The value is stored as found; it is not normalized.
	pub fn read_quat(&mut self) -> Result<Quat> {
		let x = self.read_f32_le()?;
		let y = self.read_f32_le()?;
		let z = self.read_f32_le()?;
		let w = self.read_f32_le()?;
		Ok(Quat::from_xyzw(x, y, z, w))
	}

	/// Read a `len`-byte ASCII string with trailing NUL bytes trimmed.
	pub fn read_string(&mut self, len: usize) -> Result<String> {
		let raw = self.read_exact(len)?;
		Ok(ascii_lossy(trim_trailing_nul(raw)))
	}

	/// Read a `u32` length followed by that many string bytes.
	pub fn read_prefixed_string(&mut self) -> Result<String> {
		let len = self.read_u32_le()? as usize;
		self.read_string(len)
	}

	fn read_array(&mut self) -> Result<[u8; 4]> {
		self.read_tag()
	}
}

fn trim_trailing_nul(raw: &[u8]) -> &[u8] {
	let end = raw.iter().rposition(|byte| *byte != 0).map_or(0, |idx| idx + 1);
	&raw[..end]
}

/// Decode bytes as ASCII, replacing anything outside 7-bit range with `?`.
fn ascii_lossy(raw: &[u8]) -> String {
	raw.iter().map(|byte| if byte.is_ascii() { char::from(*byte) } else { '?' }).collect()
}

#[cfg(test)]
mod tests;
