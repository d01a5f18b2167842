//! Public library API for decoding BMOD/OMOD chunked model containers.

/// Container decoding, scene model, skeletal hierarchy and kinematics.
pub mod bmod;
