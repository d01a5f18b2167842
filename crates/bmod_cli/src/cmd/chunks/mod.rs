use std::path::PathBuf;

use bmod::bmod::{Result, WalkItem, tag_label};

use crate::cmd::util::{emit_json, load, parse_tag};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Only list chunks with this tag.
	#[arg(long)]
	pub tag: Option<String>,
	#[arg(long)]
	pub json: bool,
}

/// List every framed chunk depth-first, nested obstacle content included.
pub fn run(args: Args) -> Result<()> {
	let Args { path, tag, json } = args;
	let filter = tag.as_deref().map(parse_tag).transpose()?;

	let decoded = load(&path)?;
	let items: Vec<WalkItem<'_>> = decoded
		.scene
		.walk()
		.into_iter()
		.filter(|item| filter.is_none_or(|tag| item.chunk.head.tag == tag))
		.collect();

	if json {
		let payload = ChunksJson {
			path: path.display().to_string(),
			chunks: items.iter().map(ChunkJson::from).collect(),
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("chunks: {}", items.len());
	println!("idx\tdepth\ttag\tkind\toffset\tsize");
	for item in &items {
		let head = &item.chunk.head;
		println!(
			"{}\t{}\t{}\t{}\t{}\t{}",
			item.index,
			item.depth,
			tag_label(head.tag),
			item.chunk.kind().as_str(),
			head.offset(),
			head.size
		);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct ChunksJson {
	path: String,
	chunks: Vec<ChunkJson>,
}

#[derive(serde::Serialize)]
struct ChunkJson {
	index: usize,
	depth: usize,
	tag: String,
	kind: &'static str,
	offset: usize,
	size: u32,
	payload_len: usize,
}

impl From<&WalkItem<'_>> for ChunkJson {
	fn from(item: &WalkItem<'_>) -> Self {
		let head = &item.chunk.head;
		Self {
			index: item.index,
			depth: item.depth,
			tag: tag_label(head.tag),
			kind: item.chunk.kind().as_str(),
			offset: head.offset(),
			size: head.size,
			payload_len: head.payload_len(),
		}
	}
}

#[cfg(test)]
mod tests;
