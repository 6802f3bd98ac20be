use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG;

#[derive(Parser)]
#[command(
	name = "mouse-registry",
	about = "Address book for MouseGame contract deployments.",
	version
)]
pub struct Cli {
	/// Config file.
	#[arg(long, default_value = DEFAULT_CONFIG, global = true)]
	pub config: PathBuf,

	/// Override the address book path.
	#[arg(long, env = "CONTRACTS_ADDRESS_FILE", global = true)]
	pub file: Option<PathBuf>,

	/// Pretty-print JSON output.
	#[arg(long, global = true)]
	pub pretty: bool,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
	/// Print the address book, or a single network of it, as JSON.
	Show {
		/// Only this network.
		#[arg(long)]
		network: Option<String>,
	},

	/// Print the current address of one or more contracts, one per line.
	Get {
		/// Network name (e.g. hardhat, goerli).
		network: String,

		/// Contract names.
		#[arg(required = true)]
		contracts: Vec<String>,
	},

	/// List every recorded address of a contract, newest first.
	History {
		/// Network name.
		network: String,

		/// Contract name.
		contract: String,
	},

	/// Record a freshly deployed address.
	Set {
		/// Network name.
		network: String,

		/// Contract name.
		contract: String,

		/// Deployed address (0x-prefixed).
		address: String,
	},

	/// Resolve the constructor dependencies of a contract.
	Deps {
		/// Network name.
		network: String,

		/// Contract name from the manifest.
		contract: String,
	},

	/// Create the address book and network keys if missing.
	Init {
		/// Networks to add.
		#[arg(required = true)]
		networks: Vec<String>,

		/// Also write a default config file if none exists.
		#[arg(long)]
		write_config: bool,
	},

	/// List networks with their contract count.
	Networks,

	/// Show the deployment manifest.
	Manifest {
		/// Only contracts carrying this deploy tag.
		#[arg(long)]
		tag: Option<String>,
	},
}
