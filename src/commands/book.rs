use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::commands::{resolve_registry, to_json};
use crate::config::Config;

pub fn show(cli: &Cli, network: Option<&str>) -> Result<()> {
	let registry = resolve_registry(cli)?;
	let book = registry.get_addresses()?;

	let out = match network {
		Some(n) => to_json(cli, book.network(n)?)?,
		None => to_json(cli, &book)?,
	};
	println!("{out}");
	Ok(())
}

pub fn get(cli: &Cli, network: &str, contracts: &[String]) -> Result<()> {
	let registry = resolve_registry(cli)?;
	let resolved = registry.resolve(network, contracts.iter().map(String::as_str))?;
	for (_, address) in resolved {
		println!("{address}");
	}
	Ok(())
}

pub fn history(cli: &Cli, network: &str, contract: &str) -> Result<()> {
	let registry = resolve_registry(cli)?;
	let history = registry.history(network, contract)?;

	println!("{contract} on {network}");
	for (i, address) in history.iter().enumerate() {
		let marker = if i == 0 { "  (current)" } else { "" };
		println!("  {i:>3}  {address}{marker}");
	}
	Ok(())
}

pub fn set(cli: &Cli, network: &str, contract: &str, address: &str) -> Result<()> {
	let registry = resolve_registry(cli)?;
	let outcome = registry
		.set_address(network, contract, address)
		.with_context(|| format!("recording {contract} on {network}"))?;
	println!("{contract} on {network}: {outcome} ({address})");
	Ok(())
}

pub fn networks(cli: &Cli) -> Result<()> {
	let registry = resolve_registry(cli)?;
	let book = registry.get_addresses()?;

	for (name, entry) in book.networks() {
		let kind = if registry.policy().is_ephemeral(name) {
			"ephemeral"
		} else {
			"persistent"
		};
		println!("{name:<16} {kind:<10} {} contract(s)", entry.len());
	}
	Ok(())
}

pub fn init(cli: &Cli, networks: &[String], write_config: bool) -> Result<()> {
	if write_config && !cli.config.exists() {
		Config::default().save(&cli.config)?;
		println!("Wrote default config to {}", cli.config.display());
	}

	let registry = resolve_registry(cli)?;
	let added = registry.init(networks)?;
	if added.is_empty() {
		println!("Address book at {} already up to date.", registry.path().display());
	} else {
		println!(
			"Added {} to {}",
			added.join(", "),
			registry.path().display()
		);
	}
	Ok(())
}
