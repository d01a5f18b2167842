use std::path::PathBuf;

use bmod::bmod::{ChunkBody, ChunkKind, Geometry, Result};

use crate::cmd::util::{emit_json, load};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Summarize every mesh, meshes nested in obstacles included.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let decoded = load(&path)?;
	let rows: Vec<MeshJson> = decoded
		.scene
		.chunks_of(ChunkKind::Mesh)
		.into_iter()
		.enumerate()
		.filter_map(|(index, chunk)| match &chunk.body {
			ChunkBody::Mesh(geometry) => Some(MeshJson::new(index, chunk.head.offset(), geometry)),
			_ => None,
		})
		.collect();

	if json {
		let payload = MeshesJson {
			path: path.display().to_string(),
			meshes: rows,
			textures: decoded.scene.texture_names().into_iter().map(str::to_owned).collect(),
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("meshes: {}", rows.len());
	println!("idx\toffset\tdeclared\tvertices\tindices\ttriangles\ttangents\tsplines");
	for row in &rows {
		println!(
			"{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
			row.index, row.offset, row.declared_vertices, row.vertices, row.indices, row.triangles, row.tangents, row.splines
		);
	}
	for name in decoded.scene.texture_names() {
		println!("texture: {name}");
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct MeshesJson {
	path: String,
	meshes: Vec<MeshJson>,
	textures: Vec<String>,
}

#[derive(serde::Serialize)]
struct MeshJson {
	index: usize,
	offset: usize,
	declared_vertices: u32,
	declared_faces: u32,
	vertices: usize,
	indices: usize,
	triangles: usize,
	tangents: bool,
	splines: usize,
	bounds: Option<[[f32; 3]; 2]>,
}

impl MeshJson {
	fn new(index: usize, offset: usize, geometry: &Geometry) -> Self {
		let vertices = geometry.vertex_slice();
		let bounds = vertices.first().map(|first| {
			let (min, max) = vertices
				.iter()
				.fold((first.position, first.position), |(min, max), vertex| (min.min(vertex.position), max.max(vertex.position)));
			[min.to_array(), max.to_array()]
		});

		Self {
			index,
			offset,
			declared_vertices: geometry.vertex_count,
			declared_faces: geometry.face_count,
			vertices: vertices.len(),
			indices: geometry.index_slice().len(),
			triangles: geometry.triangles().count(),
			tangents: geometry.has_tangents(),
			splines: geometry.faces.as_ref().map_or(0, |faces| faces.splines.len()),
			bounds,
		}
	}
}
