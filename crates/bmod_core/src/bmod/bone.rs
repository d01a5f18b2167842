use glam::{Quat, Vec3};

use crate::bmod::bytes::Cursor;
use crate::bmod::decode::{Decoder, partial};
use crate::bmod::{ChunkBody, ChunkHead, Result};

/// Bytes per bone keyframe: time, position, rotation, scale.
pub const BONE_KEYFRAME_STRIDE: usize = 44;

/// Parent id marking a root bone.
pub const ROOT_PARENT: i32 = -1;

/// One sampled bone transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneKeyframe {
	/// Sample time.
	pub time: f32,
	/// Local translation.
	pub position: Vec3,
	/// Local rotation, as stored.
	pub rotation: Quat,
	/// Local scale.
	pub scale: Vec3,
}

/// Keyframes of one bone.
#[derive(Debug, Clone, PartialEq)]
pub struct BoneAnimation {
	/// Bone id, referenced by children through `parent_id`.
	pub id: u32,
	/// Parent bone id, [`ROOT_PARENT`] for roots.
	pub parent_id: i32,
	/// Bone name.
	pub name: String,
	/// Keyframes in stored order.
	pub keyframes: Vec<BoneKeyframe>,
}

impl BoneAnimation {
	/// Return `true` when this bone has no parent.
	pub fn is_root(&self) -> bool {
		self.parent_id == ROOT_PARENT
	}
}

/// Decoded `BONE` chunk.
///
/// Every bone is declared to carry `keyframe_count` keyframes. A truncated
/// chunk can leave the last bone short; see [`crate::bmod::short_bones`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoneAnimationChunk {
	/// Declared bone count.
	pub bone_count: u32,
	/// Keyframe count shared by every bone.
	pub keyframe_count: u32,
	/// Bones in stored order.
	pub animations: Vec<BoneAnimation>,
}

/// One entry of an `OBSK` skeleton list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonBone {
	/// Bone id.
	pub id: u32,
	/// Parent bone id, [`ROOT_PARENT`] for roots.
	pub parent_id: i32,
	/// Bone name.
	pub name: String,
}

/// Decoded `OBSK` chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Skeleton {
	/// Declared bone count.
	pub bone_count: u32,
	/// Bones in stored order.
	pub bones: Vec<SkeletonBone>,
}

pub(crate) fn decode_bone_animation(_decoder: &mut Decoder, cursor: &mut Cursor<'_>, _head: &ChunkHead, _depth: u32) -> (ChunkBody, Result<()>) {
	partial(ChunkBody::BoneAnimation, |chunk| read_bone_animation(cursor, chunk))
}

fn read_bone_animation(cursor: &mut Cursor<'_>, chunk: &mut BoneAnimationChunk) -> Result<()> {
	chunk.bone_count = cursor.read_u32_le()?;
	chunk.keyframe_count = cursor.read_u32_le()?;

	// Each bone needs at least id, parent and name length.
	chunk.animations.reserve((chunk.bone_count as usize).min(cursor.remaining() / 12));
	for _ in 0..chunk.bone_count {
		let id = cursor.read_u32_le()?;
		let parent_id = cursor.read_i32_le()?;
		let name = cursor.read_prefixed_string()?;
		chunk.animations.push(BoneAnimation {
			id,
			parent_id,
			name,
			keyframes: Vec::new(),
		});

		let Some(animation) = chunk.animations.last_mut() else {
			continue;
		};
		animation
			.keyframes
			.reserve((chunk.keyframe_count as usize).min(cursor.remaining() / BONE_KEYFRAME_STRIDE));
		for _ in 0..chunk.keyframe_count {
			animation.keyframes.push(BoneKeyframe {
				time: cursor.read_f32_le()?,
				position: cursor.read_vec3()?,
				rotation: cursor.read_quat()?,
				scale: cursor.read_vec3()?,
			});
		}
	}
	Ok(())
}

pub(crate) fn decode_skeleton(_decoder: &mut Decoder, cursor: &mut Cursor<'_>, _head: &ChunkHead, _depth: u32) -> (ChunkBody, Result<()>) {
	partial(ChunkBody::Skeleton, |skeleton: &mut Skeleton| {
		skeleton.bone_count = cursor.read_u32_le()?;
		skeleton.bones.reserve((skeleton.bone_count as usize).min(cursor.remaining() / 12));
		for _ in 0..skeleton.bone_count {
			skeleton.bones.push(SkeletonBone {
				id: cursor.read_u32_le()?,
				parent_id: cursor.read_i32_le()?,
				name: cursor.read_prefixed_string()?,
			});
		}
		Ok(())
	})
}
