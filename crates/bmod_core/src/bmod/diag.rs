use std::fmt;

use crate::bmod::tag_label;

/// How serious a decode notice is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
	/// Part of the input was skipped or left partially decoded.
	Recoverable,
	/// A heuristic fired or unknown trailing data was ignored.
	Info,
}

impl Severity {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Recoverable => "recoverable",
			Self::Info => "info",
		}
	}
}

/// One decode notice, attached to the chunk that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
	/// Notice severity.
	pub severity: Severity,
	/// Tag of the chunk or sub-chunk being decoded.
	///
	/// Notices about the stream itself, such as unparsed bytes after the last
	/// chunk, carry the file magic instead.
	pub tag: [u8; 4],
	/// Absolute offset of that chunk's header, or of the unparsed bytes.
	pub offset: usize,
	/// Human-readable description.
	pub message: String,
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}@{}: {}", self.severity.as_str(), tag_label(self.tag), self.offset, self.message)
	}
}
