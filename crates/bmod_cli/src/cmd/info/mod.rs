use std::path::PathBuf;

use bmod::bmod::{Result, tag_label};

use crate::cmd::util::{DiagnosticJson, emit_json, load};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print header fields, tag statistics and decode diagnostics.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let actual_size = std::fs::metadata(&path)?.len();
	let decoded = load(&path)?;
	let header = decoded.scene.header;
	let stats = decoded.scene.stats();
	let counts = stats.tag_counts();

	if json {
		let payload = InfoJson {
			path: path.display().to_string(),
			magic: tag_label(header.magic),
			version: header.version_label(),
			file_size: header.file_size,
			actual_size,
			chunk_count: stats.chunk_count,
			nested_count: stats.nested_count,
			top_tags: counts
				.iter()
				.take(12)
				.map(|(tag, count)| TagCountJson {
					tag: tag_label(*tag),
					count: *count,
				})
				.collect(),
			diagnostics: decoded.diagnostics.iter().map(DiagnosticJson::from).collect(),
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("magic: {}", tag_label(header.magic));
	println!("version: {}", header.version_label());
	println!("file_size: {}", header.file_size);
	println!("actual_size: {actual_size}");
	println!("chunk_count: {}", stats.chunk_count);
	println!("nested_count: {}", stats.nested_count);

	println!("top_tags:");
	for (tag, count) in counts.into_iter().take(12) {
		println!("  {}: {}", tag_label(tag), count);
	}

	println!("diagnostics: {}", decoded.diagnostics.len());
	for diagnostic in &decoded.diagnostics {
		println!("  {diagnostic}");
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	magic: String,
	version: String,
	file_size: u32,
	actual_size: u64,
	chunk_count: u32,
	nested_count: u32,
	top_tags: Vec<TagCountJson>,
	diagnostics: Vec<DiagnosticJson>,
}

#[derive(serde::Serialize)]
struct TagCountJson {
	tag: String,
	count: u32,
}

#[cfg(test)]
mod tests;
