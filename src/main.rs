use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mouse_registry::cli::{Cli, Command};
use mouse_registry::commands;

fn main() -> Result<()> {
	// stdout carries addresses for deploy scripts, so logs go to stderr
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
		)
		.with_writer(std::io::stderr)
		.init();

	let cli = Cli::parse();

	match &cli.command {
		Command::Show { network } => commands::book::show(&cli, network.as_deref()),
		Command::Get { network, contracts } => commands::book::get(&cli, network, contracts),
		Command::History { network, contract } => {
			commands::book::history(&cli, network, contract)
		}
		Command::Set {
			network,
			contract,
			address,
		} => commands::book::set(&cli, network, contract, address),
		Command::Deps { network, contract } => {
			commands::manifest::deps(&cli, network, contract)
		}
		Command::Init {
			networks,
			write_config,
		} => commands::book::init(&cli, networks, *write_config),
		Command::Networks => commands::book::networks(&cli),
		Command::Manifest { tag } => commands::manifest::show(tag.as_deref()),
	}
}
