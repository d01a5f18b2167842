use std::path::PathBuf;

use bmod::bmod::{BmodError, BoneHierarchy, DEFAULT_FRAME_TIME, HierarchyOptions, Result, sample_motion, short_bones};

use crate::cmd::util::{emit_json, load};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Zero-based index among the file's bone animation chunks.
	#[arg(long, default_value_t = 0)]
	pub chunk: usize,
	/// Include per-frame samples.
	#[arg(long)]
	pub frames: bool,
	#[arg(long)]
	pub json: bool,
}

/// Print the bone tree of one animation chunk and summarize its motion.
pub fn run(args: Args) -> Result<()> {
	let Args { path, chunk, frames, json } = args;

	let decoded = load(&path)?;
	let animations: Vec<_> = decoded.scene.bone_animations().collect();
	if animations.is_empty() {
		return Err(BmodError::NoBoneAnimation);
	}
	let selected = *animations.get(chunk).ok_or(BmodError::ChunkIndexOutOfRange {
		index: chunk,
		count: animations.len(),
	})?;

	let hierarchy = BoneHierarchy::build(selected, &HierarchyOptions::default())?;
	let short = short_bones(selected);
	if !short.is_empty() {
		log::warn!("{} bones hold fewer than {} keyframes", short.len(), selected.keyframe_count);
	}

	let joints: Vec<JointJson> = hierarchy
		.joints()
		.iter()
		.map(|joint| {
			let bone = &hierarchy.bones()[joint.index];
			JointJson {
				index: joint.index,
				id: bone.id,
				parent_id: bone.parent_id,
				name: bone.name.clone(),
				depth: joint.depth,
				root: joint.is_root,
				leaf: joint.is_leaf,
			}
		})
		.collect();
	let samples: Vec<FrameJson> = if frames {
		sample_motion(selected)
			.map(|frame| FrameJson {
				frame: frame.frame,
				values: frame
					.samples
					.iter()
					.flat_map(|sample| sample.position.to_array().into_iter().chain(sample.rotation.to_array()))
					.collect(),
			})
			.collect()
	} else {
		Vec::new()
	};

	if json {
		let payload = BonesJson {
			path: path.display().to_string(),
			chunk,
			chunk_count: animations.len(),
			bone_count: selected.bone_count,
			keyframe_count: selected.keyframe_count,
			frame_time: DEFAULT_FRAME_TIME,
			joints,
			orphans: hierarchy.orphans().to_vec(),
			short_bones: short,
			frames: samples,
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("chunk: {chunk}/{}", animations.len());
	println!("bone_count: {}", selected.bone_count);
	println!("keyframe_count: {}", selected.keyframe_count);
	println!("frame_time: {DEFAULT_FRAME_TIME}");
	for joint in &joints {
		let marker = if joint.root { "ROOT" } else { "JOINT" };
		let end = if joint.leaf { " (end)" } else { "" };
		println!("{:indent$}{marker} {} id={}{end}", "", joint.name, joint.id, indent = joint.depth * 2);
	}
	if !hierarchy.orphans().is_empty() {
		println!("orphans: {:?}", hierarchy.orphans());
	}
	if !short.is_empty() {
		println!("short_bones: {short:?}");
	}
	for frame in &samples {
		let values: Vec<String> = frame.values.iter().map(|value| format!("{value:.6}")).collect();
		println!("{}", values.join(" "));
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct BonesJson {
	path: String,
	chunk: usize,
	chunk_count: usize,
	bone_count: u32,
	keyframe_count: u32,
	frame_time: f32,
	joints: Vec<JointJson>,
	orphans: Vec<usize>,
	short_bones: Vec<usize>,
	frames: Vec<FrameJson>,
}

#[derive(serde::Serialize)]
struct JointJson {
	index: usize,
	id: u32,
	parent_id: i32,
	name: String,
	depth: usize,
	root: bool,
	leaf: bool,
}

#[derive(serde::Serialize)]
struct FrameJson {
	frame: usize,
	/// Position then roll/pitch/yaw degrees for each sampled bone.
	values: Vec<f32>,
}

#[cfg(test)]
mod tests;
