#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "bmod", about = "BMOD/OMOD model container inspection tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Header, chunk statistics and decode diagnostics.
	Info(cmd::info::Args),
	/// Framed chunk listing, nested chunks included.
	Chunks(cmd::chunks::Args),
	/// Geometry summary per mesh.
	Meshes(cmd::meshes::Args),
	/// Bone hierarchy and motion summary.
	Bones(cmd::bones::Args),
	/// Rewrite a file keeping only re-encodable chunks.
	Strip(cmd::strip::Args),
}

fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> bmod::bmod::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Chunks(args) => cmd::chunks::run(args),
		Commands::Meshes(args) => cmd::meshes::run(args),
		Commands::Bones(args) => cmd::bones::run(args),
		Commands::Strip(args) => cmd::strip::run(args),
	}
}
