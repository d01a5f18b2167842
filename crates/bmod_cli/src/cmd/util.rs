use std::io::Write;
use std::path::Path;

use bmod::bmod::{BmodError, Decoded, Diagnostic, Result, decode_file};

/// Parse up-to-4 ASCII tag into a NUL-padded `[u8; 4]`.
pub(crate) fn parse_tag(tag: &str) -> Result<[u8; 4]> {
	if tag.is_empty() || tag.len() > 4 || !tag.is_ascii() {
		return Err(BmodError::InvalidTag { tag: tag.to_owned() });
	}

	let mut out = [0_u8; 4];
	out[..tag.len()].copy_from_slice(tag.as_bytes());
	Ok(out)
}

/// Decode a file, logging how many notices it produced.
pub(crate) fn load(path: &Path) -> Result<Decoded> {
	let decoded = decode_file(path)?;
	log::debug!("{}: {} chunks, {} diagnostics", path.display(), decoded.scene.chunks().len(), decoded.diagnostics.len());
	Ok(decoded)
}

/// Pretty-print `payload` as JSON on stdout.
pub(crate) fn emit_json(payload: &impl serde::Serialize) -> Result<()> {
	let stdout = std::io::stdout();
	let mut out = stdout.lock();
	serde_json::to_writer_pretty(&mut out, payload).map_err(std::io::Error::from)?;
	writeln!(out)?;
	Ok(())
}

#[derive(serde::Serialize)]
pub(crate) struct DiagnosticJson {
	pub(crate) severity: &'static str,
	pub(crate) tag: String,
	pub(crate) offset: usize,
	pub(crate) message: String,
}

impl From<&Diagnostic> for DiagnosticJson {
	fn from(diagnostic: &Diagnostic) -> Self {
		Self {
			severity: diagnostic.severity.as_str(),
			tag: bmod::bmod::tag_label(diagnostic.tag),
			offset: diagnostic.offset,
			message: diagnostic.message.clone(),
		}
	}
}
