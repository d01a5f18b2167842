mod asset;
mod bone;
mod bytes;
mod chunk;
mod decode;
mod diag;
mod effect;
mod error;
mod geometry;
mod header;
mod hierarchy;
mod kinematics;
mod material;
mod object;
mod scene;
mod write;

/// Asset list, asset section and timestamp bodies.
pub use asset::{AssetList, AssetString, TIMESTAMP_LEN};
/// Bone animation and skeleton bodies.
pub use bone::{BONE_KEYFRAME_STRIDE, BoneAnimation, BoneAnimationChunk, BoneKeyframe, ROOT_PARENT, Skeleton, SkeletonBone};
/// Bounded little-endian reader.
pub use bytes::Cursor;
/// Chunk framing, kinds, bodies and tag constants.
pub use chunk::{Chunk, ChunkBody, ChunkHead, ChunkKind, tag_label, tags};
/// Decode entry points and options.
pub use decode::{DecodeOptions, Decoded, decode, decode_file, decode_reader, decode_with, is_known_tag};
/// Decode notices.
pub use diag::{Diagnostic, Severity};
/// Effect bodies.
pub use effect::{Effect, EffectKind};
/// Error and result aliases.
pub use error::{BmodError, Result};
/// Geometry bodies and record strides.
pub use geometry::{
	FaceBlock, Geometry, IndexBlock, LodSpline, MorphedObject, SPLINE_KEYFRAME_STRIDE, SplineKeyframe, TANGENT_STRIDE, TangentFrame, VERTEX_BLOCK_HEADER,
	VERTEX_STRIDE, Vertex, VertexBlock,
};
/// File header representation.
pub use header::BmodHeader;
/// Bone-tree reconstruction.
pub use hierarchy::{BoneHierarchy, HierarchyOptions, Joint};
/// Rotation conversion and per-frame motion sampling.
pub use kinematics::{DEFAULT_FRAME_TIME, EulerAngles, JointSample, MotionFrame, quat_to_euler_degrees, sample_motion, short_bones};
/// Material and texture bodies.
pub use material::{MATERIAL_ENTRY, MaterialChunk, MaterialEntry, MaterialProperty, TEXTURE_PROPERTY, TextureRef};
/// Object, box and placeholder bodies.
pub use object::{BoundingBox, Dummy, OBJECT_BLOCK_LEN, Obstacle, OrientedBox};
/// Scene aggregate and views.
pub use scene::{Scene, SceneStats, WalkItem};
/// Subset writer.
pub use write::{encode_chunk, encode_scene, is_writable, retain_writable, write_scene};
