use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use bmod::bmod::{Result, is_writable, retain_writable, tag_label, write_scene};

use crate::cmd::util::load;

#[derive(clap::Args)]
pub struct Args {
	pub input: PathBuf,
	pub output: PathBuf,
}

/// Rewrite `input` to `output`, dropping chunks the writer cannot encode.
pub fn run(args: Args) -> Result<()> {
	let Args { input, output } = args;

	let decoded = load(&input)?;
	let stripped = retain_writable(&decoded.scene);
	let kept = stripped.chunks().len();
	let dropped = decoded.scene.chunks().len() - kept;

	for chunk in decoded.scene.chunks().iter().filter(|chunk| !is_writable(chunk.kind())) {
		log::debug!("dropping {} at offset {}", tag_label(chunk.head.tag), chunk.head.offset());
	}

	let file = File::create(&output)?;
	write_scene(&stripped, BufWriter::new(file))?;

	println!("wrote {}: kept {kept}, dropped {dropped}", output.display());
	Ok(())
}

#[cfg(test)]
mod tests;
