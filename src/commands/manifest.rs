use anyhow::Result;

use crate::cli::Cli;
use crate::commands::resolve_registry;
use crate::contracts::{ContractInfo, MANIFEST};

pub fn deps(cli: &Cli, network: &str, contract: &str) -> Result<()> {
	let info = MANIFEST
		.lookup(contract)
		.ok_or_else(|| anyhow::anyhow!("{contract} is not in the deployment manifest"))?;

	if info.dependencies.is_empty() {
		println!("{contract} has no constructor dependencies.");
		return Ok(());
	}

	let registry = resolve_registry(cli)?;
	let resolved = registry.resolve(network, info.dependencies.iter().copied())?;
	for (name, address) in resolved {
		println!("{name:<18} {address}");
	}
	Ok(())
}

pub fn show(tag: Option<&str>) -> Result<()> {
	let selected: Vec<&ContractInfo> = match tag {
		Some(t) => MANIFEST.with_tag(t).collect(),
		None => MANIFEST.all().collect(),
	};

	if selected.is_empty() {
		anyhow::bail!("no contracts carry the tag `{}`", tag.unwrap_or_default());
	}

	for c in selected {
		let origin = if c.deployed { "deployed" } else { "external" };
		println!("{}", c.name);
		println!("  Origin: {origin}");
		if !c.dependencies.is_empty() {
			println!("  Deps:   {}", c.dependencies.join(", "));
		}
		if !c.tags.is_empty() {
			println!("  Tags:   {}", c.tags.join(", "));
		}
	}
	Ok(())
}
