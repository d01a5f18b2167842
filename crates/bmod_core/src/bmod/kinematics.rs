use glam::{Quat, Vec3};

use crate::bmod::BoneAnimationChunk;

/// Frame interval used for sampled motion (30 frames per second).
pub const DEFAULT_FRAME_TIME: f32 = 0.033_333;

/// Roll/pitch/yaw in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EulerAngles {
	/// Rotation about x.
	pub roll: f32,
	/// Rotation about y, within `[-90, 90]`.
	pub pitch: f32,
	/// Rotation about z.
	pub yaw: f32,
}

impl EulerAngles {
	/// `[roll, pitch, yaw]`.
	pub fn to_array(self) -> [f32; 3] {
		[self.roll, self.pitch, self.yaw]
	}
}

/// Convert a rotation to roll/pitch/yaw degrees.
///
/// The quaternion is used as stored, without normalizing. When the pitch
/// sine reaches or passes `±1` the pitch snaps to `±90` degrees.
pub fn quat_to_euler_degrees(q: Quat) -> EulerAngles {
	let sinr_cosp = f64::from(2.0 * (q.w * q.x + q.y * q.z));
	let cosr_cosp = f64::from(1.0 - 2.0 * (q.x * q.x + q.y * q.y));
	let roll = sinr_cosp.atan2(cosr_cosp) as f32;

	let sinp = f64::from(2.0 * (q.w * q.y - q.z * q.x));
	let pitch = if sinp.abs() >= 1.0 {
		std::f64::consts::FRAC_PI_2.copysign(sinp) as f32
	} else {
		sinp.asin() as f32
	};

	let siny_cosp = f64::from(2.0 * (q.w * q.z + q.x * q.y));
	let cosy_cosp = f64::from(1.0 - 2.0 * (q.y * q.y + q.z * q.z));
	let yaw = siny_cosp.atan2(cosy_cosp) as f32;

	let to_degrees = (180.0 / std::f64::consts::PI) as f32;
	EulerAngles {
		roll: roll * to_degrees,
		pitch: pitch * to_degrees,
		yaw: yaw * to_degrees,
	}
}

/// Position and rotation of one bone at one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointSample {
	/// Index into the chunk's animation list.
	pub bone: usize,
	/// Keyframe position.
	pub position: Vec3,
	/// Keyframe rotation in degrees.
	pub rotation: EulerAngles,
}

/// All samples of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionFrame {
	/// Frame index.
	pub frame: usize,
	/// Samples in animation-list order.
	pub samples: Vec<JointSample>,
}

/// Sample every bone for frames `0..keyframe_count`.
///
/// Bones are visited in animation-list order. A bone with fewer keyframes
/// than declared contributes nothing at the frames it lacks, so frames can
/// hold different sample counts; [`short_bones`] lists such bones.
///
/// Frames are produced lazily since the declared count is not bounded by the
/// stored keyframes.
pub fn sample_motion(chunk: &BoneAnimationChunk) -> impl Iterator<Item = MotionFrame> + '_ {
	(0..chunk.keyframe_count as usize).map(move |frame| MotionFrame {
		frame,
		samples: chunk
			.animations
			.iter()
			.enumerate()
			.filter_map(|(bone, animation)| {
				animation.keyframes.get(frame).map(|keyframe| JointSample {
					bone,
					position: keyframe.position,
					rotation: quat_to_euler_degrees(keyframe.rotation),
				})
			})
			.collect(),
	})
}

/// Indices of bones holding fewer keyframes than the chunk declares.
pub fn short_bones(chunk: &BoneAnimationChunk) -> Vec<usize> {
	chunk
		.animations
		.iter()
		.enumerate()
		.filter(|(_, animation)| animation.keyframes.len() < chunk.keyframe_count as usize)
		.map(|(index, _)| index)
		.collect()
}
