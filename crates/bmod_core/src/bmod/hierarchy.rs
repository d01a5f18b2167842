use std::collections::HashSet;

use crate::bmod::{BmodError, BoneAnimation, BoneAnimationChunk, Result};

/// Bone-tree reconstruction limits.
#[derive(Debug, Clone)]
pub struct HierarchyOptions {
	/// Maximum parent-chain length below a root.
	pub max_depth: usize,
}

impl Default for HierarchyOptions {
	fn default() -> Self {
		Self { max_depth: 256 }
	}
}

/// One bone in depth-first export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Joint {
	/// Index into the owning chunk's animation list.
	pub index: usize,
	/// Distance from the root, 0 for roots.
	pub depth: usize,
	/// Bone has no parent.
	pub is_root: bool,
	/// Bone has no children and needs a zero-offset end marker.
	pub is_leaf: bool,
}

/// Parent/child links of one bone-animation chunk.
///
/// A bone's parent is the first bone whose id equals its `parent_id`. Bones
/// whose parent id matches no bone are orphans: they are neither roots nor
/// reachable from one.
#[derive(Debug, Clone)]
pub struct BoneHierarchy<'a> {
	bones: &'a [BoneAnimation],
	parents: Vec<Option<usize>>,
	children: Vec<Vec<usize>>,
	roots: Vec<usize>,
	orphans: Vec<usize>,
	joints: Vec<Joint>,
}

impl<'a> BoneHierarchy<'a> {
	/// Link bones by parent id and compute export order.
	///
	/// Fails with [`BmodError::CyclicHierarchy`] when a parent chain revisits a
	/// bone and with [`BmodError::HierarchyTooDeep`] when a chain exceeds
	/// `options.max_depth`.
	pub fn build(chunk: &'a BoneAnimationChunk, options: &HierarchyOptions) -> Result<Self> {
		let bones = chunk.animations.as_slice();
		let mut parents = vec![None; bones.len()];
		let mut children = vec![Vec::new(); bones.len()];
		let mut roots = Vec::new();
		let mut orphans = Vec::new();

		for (index, bone) in bones.iter().enumerate() {
			if bone.is_root() {
				roots.push(index);
				continue;
			}
			match bones.iter().position(|candidate| i64::from(candidate.id) == i64::from(bone.parent_id)) {
				Some(parent) => {
					parents[index] = Some(parent);
					children[parent].push(index);
				}
				None => orphans.push(index),
			}
		}

		check_parent_chains(bones, &parents, options.max_depth)?;

		let mut hierarchy = Self {
			bones,
			parents,
			children,
			roots,
			orphans,
			joints: Vec::new(),
		};
		hierarchy.joints = hierarchy.export_order();
		Ok(hierarchy)
	}

	/// Bones in stored order.
	pub fn bones(&self) -> &'a [BoneAnimation] {
		self.bones
	}

	/// Indices of bones with parent id `-1`.
	pub fn roots(&self) -> &[usize] {
		&self.roots
	}

	/// Indices of bones whose parent id matches no bone.
	pub fn orphans(&self) -> &[usize] {
		&self.orphans
	}

	/// Direct children of `index`, in stored order.
	pub fn children(&self, index: usize) -> &[usize] {
		self.children.get(index).map_or(&[], Vec::as_slice)
	}

	/// Parent of `index`, `None` for roots and orphans.
	pub fn parent(&self, index: usize) -> Option<usize> {
		self.parents.get(index).copied().flatten()
	}

	/// Root-reachable bones in depth-first order: each bone, then its children.
	pub fn joints(&self) -> &[Joint] {
		&self.joints
	}

	fn export_order(&self) -> Vec<Joint> {
		let mut out = Vec::with_capacity(self.bones.len());
		let mut stack: Vec<(usize, usize)> = self.roots.iter().rev().map(|root| (*root, 0)).collect();
		while let Some((index, depth)) = stack.pop() {
			let children = self.children(index);
			out.push(Joint {
				index,
				depth,
				is_root: self.parents[index].is_none(),
				is_leaf: children.is_empty(),
			});
			stack.extend(children.iter().rev().map(|child| (*child, depth + 1)));
		}
		out
	}
}

fn check_parent_chains(bones: &[BoneAnimation], parents: &[Option<usize>], max_depth: usize) -> Result<()> {
	for start in 0..bones.len() {
		let mut seen = HashSet::new();
		seen.insert(start);
		let mut current = start;
		let mut depth = 0;
		while let Some(parent) = parents[current] {
			if !seen.insert(parent) {
				return Err(BmodError::CyclicHierarchy { bone_id: bones[parent].id });
			}
			depth += 1;
			if depth > max_depth {
				return Err(BmodError::HierarchyTooDeep { max_depth });
			}
			current = parent;
		}
	}
	Ok(())
}
