use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::book::Policy;
use crate::registry::{self, Registry};

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG: &str = "registry.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	pub registry: RegistryConfig,
	pub policy: PolicyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
	pub path: PathBuf,
	pub pretty: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
	pub ephemeral_networks: Vec<String>,
	pub validate_addresses: bool,
	pub create_missing_networks: bool,
}

impl Default for RegistryConfig {
	fn default() -> Self {
		Self {
			path: registry::DEFAULT_PATH.into(),
			pretty: false,
		}
	}
}

impl Default for PolicyConfig {
	fn default() -> Self {
		let policy = Policy::default();
		Self {
			ephemeral_networks: policy.ephemeral_networks.into_iter().collect(),
			validate_addresses: policy.validate_addresses,
			create_missing_networks: policy.create_missing_networks,
		}
	}
}

impl Config {
	/// Load config from `path`, falling back to defaults if no file exists.
	pub fn load(path: &Path) -> anyhow::Result<Self> {
		if path.exists() {
			let content = std::fs::read_to_string(path)?;
			Ok(toml::from_str(&content)?)
		} else {
			Ok(Self::default())
		}
	}

	/// Persist the config, creating the parent directory if needed.
	pub fn save(&self, path: &Path) -> anyhow::Result<()> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(path, toml::to_string_pretty(self)?)?;
		Ok(())
	}

	pub fn policy(&self) -> Policy {
		Policy {
			ephemeral_networks: self
				.policy
				.ephemeral_networks
				.iter()
				.cloned()
				.collect::<BTreeSet<_>>(),
			validate_addresses: self.policy.validate_addresses,
			create_missing_networks: self.policy.create_missing_networks,
		}
	}

	/// Build the registry, with `file` taking precedence over the
	/// configured path.
	pub fn registry(&self, file: Option<&Path>) -> Registry {
		let path = file.unwrap_or(&self.registry.path);
		Registry::new(path)
			.with_policy(self.policy())
			.pretty(self.registry.pretty)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_are_sensible() {
		let c = Config::default();
		assert_eq!(c.registry.path, PathBuf::from("./data/contractsAddress.json"));
		assert!(!c.registry.pretty);
		assert_eq!(c.policy.ephemeral_networks, ["hardhat"]);
		assert!(c.policy.validate_addresses);
		assert!(!c.policy.create_missing_networks);
		assert_eq!(c.policy(), Policy::default());
	}

	#[test]
	fn toml_roundtrip() {
		let mut c = Config::default();
		c.registry.pretty = true;
		c.policy.ephemeral_networks.push("localhost".into());

		let serialized = toml::to_string_pretty(&c).unwrap();
		let parsed: Config = toml::from_str(&serialized).unwrap();

		assert!(parsed.registry.pretty);
		assert!(parsed.policy().is_ephemeral("localhost"));
		assert!(parsed.policy().is_ephemeral("hardhat"));
	}

	#[test]
	fn partial_file_keeps_other_defaults() {
		let parsed: Config = toml::from_str("[policy]\ncreate_missing_networks = true\n").unwrap();
		assert!(parsed.policy.create_missing_networks);
		assert!(parsed.policy.validate_addresses);
		assert_eq!(parsed.registry.path, PathBuf::from(registry::DEFAULT_PATH));
	}

	#[test]
	fn file_override_wins() {
		let c = Config::default();
		assert_eq!(c.registry(None).path(), Path::new(registry::DEFAULT_PATH));
		assert_eq!(
			c.registry(Some(Path::new("/tmp/book.json"))).path(),
			Path::new("/tmp/book.json")
		);
	}
}
