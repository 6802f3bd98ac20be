pub mod book;
pub mod manifest;

use anyhow::Result;

use crate::cli::Cli;
use crate::config::Config;
use crate::registry::Registry;

/// Build the registry from the config file and CLI overrides.
pub fn resolve_registry(cli: &Cli) -> Result<Registry> {
	let config = Config::load(&cli.config)?;
	Ok(config.registry(cli.file.as_deref()))
}

/// Render a serializable value the way the CLI was asked to.
pub fn to_json<T: serde::Serialize>(cli: &Cli, value: &T) -> Result<String> {
	Ok(if cli.pretty {
		serde_json::to_string_pretty(value)?
	} else {
		serde_json::to_string(value)?
	})
}
