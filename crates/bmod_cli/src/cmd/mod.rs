/// Bone hierarchy and motion command.
pub mod bones;
/// Chunk listing command.
pub mod chunks;
/// File-level information command.
pub mod info;
/// Geometry summary command.
pub mod meshes;
/// Subset rewrite command.
pub mod strip;

pub(crate) mod util;

#[cfg(test)]
pub(crate) mod test_support;
