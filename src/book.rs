use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::address;
use crate::error::{RegistryError, Result};

/// Deployed addresses of one contract, most recent first.
pub type AddressHistory = Vec<String>;

/// Contract name to address history, for one network.
pub type NetworkEntry = IndexMap<String, AddressHistory>;

/// The whole persisted structure: network name to [`NetworkEntry`].
///
/// Key order is kept as read so that rewriting a version-controlled file
/// only touches the entries that actually changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressBook(IndexMap<String, NetworkEntry>);

/// Rules applied when a new address is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
	/// Networks whose chain resets between runs. Recording on one of these
	/// replaces the history instead of extending it.
	pub ephemeral_networks: BTreeSet<String>,
	/// Reject addresses that are not `0x` + 40 hex characters.
	pub validate_addresses: bool,
	/// Create an absent network key instead of failing the lookup.
	pub create_missing_networks: bool,
}

impl Default for Policy {
	fn default() -> Self {
		Self {
			ephemeral_networks: BTreeSet::from(["hardhat".to_owned()]),
			validate_addresses: true,
			create_missing_networks: false,
		}
	}
}

impl Policy {
	pub fn is_ephemeral(&self, network: &str) -> bool {
		self.ephemeral_networks.contains(network)
	}
}

/// What a call to [`AddressBook::record`] did to the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
	/// First address recorded for this contract on this network.
	Created,
	/// The address already was the current one. Nothing changed.
	Unchanged,
	/// Ephemeral network: prior history discarded.
	Replaced,
	/// Persistent network: pushed in front of the prior history.
	Prepended,
}

impl SetOutcome {
	pub fn changed(self) -> bool {
		self != Self::Unchanged
	}
}

impl fmt::Display for SetOutcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			Self::Created => "created",
			Self::Unchanged => "unchanged",
			Self::Replaced => "replaced",
			Self::Prepended => "prepended",
		};
		f.write_str(s)
	}
}

impl AddressBook {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_json(text: &str) -> serde_json::Result<Self> {
		serde_json::from_str(text)
	}

	pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
		if pretty {
			serde_json::to_string_pretty(self)
		} else {
			serde_json::to_string(self)
		}
	}

	pub fn networks(&self) -> impl Iterator<Item = (&str, &NetworkEntry)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v))
	}

	pub fn network(&self, network: &str) -> Result<&NetworkEntry> {
		self.0.get(network).ok_or_else(|| RegistryError::Lookup {
			network: network.to_owned(),
		})
	}

	pub fn contains_network(&self, network: &str) -> bool {
		self.0.contains_key(network)
	}

	/// Add an empty entry for `network`. Returns false if it already existed.
	pub fn insert_network(&mut self, network: &str) -> bool {
		if self.0.contains_key(network) {
			return false;
		}
		self.0.insert(network.to_owned(), NetworkEntry::new());
		true
	}

	/// Full history of `contract` on `network`, newest first.
	pub fn history(&self, network: &str, contract: &str) -> Result<&[String]> {
		self.network(network)?
			.get(contract)
			.filter(|h| !h.is_empty())
			.map(Vec::as_slice)
			.ok_or_else(|| RegistryError::MissingContract {
				network: network.to_owned(),
				contract: contract.to_owned(),
			})
	}

	/// The address currently in use for `contract` on `network`.
	pub fn current(&self, network: &str, contract: &str) -> Result<&str> {
		// history() never returns an empty slice
		Ok(self.history(network, contract)?[0].as_str())
	}

	/// Apply the recording rules for a freshly deployed address.
	///
	/// A head that already matches is left alone. Otherwise an ephemeral
	/// network keeps only the new address and a persistent one prepends it.
	/// A contract without prior history gets `[address]` either way.
	pub fn record(
		&mut self,
		network: &str,
		contract: &str,
		address: &str,
		policy: &Policy,
	) -> Result<SetOutcome> {
		if policy.validate_addresses {
			address::validate(address)?;
		}
		self.apply(network, contract, address, policy)
	}

	/// [`record`](Self::record) for an address the caller already validated.
	pub(crate) fn apply(
		&mut self,
		network: &str,
		contract: &str,
		address: &str,
		policy: &Policy,
	) -> Result<SetOutcome> {
		if !self.contains_network(network) {
			if !policy.create_missing_networks {
				return Err(RegistryError::Lookup {
					network: network.to_owned(),
				});
			}
			warn!(network, "creating missing network entry");
			self.insert_network(network);
		}

		let entry = self
			.0
			.get_mut(network)
			.ok_or_else(|| RegistryError::Lookup {
				network: network.to_owned(),
			})?;

		let outcome = match entry.get_mut(contract) {
			Some(history) if history.first().is_some_and(|head| address::same(head, address)) => {
				SetOutcome::Unchanged
			}
			Some(history) if !history.is_empty() => {
				if policy.is_ephemeral(network) {
					*history = vec![address.to_owned()];
					SetOutcome::Replaced
				} else {
					history.insert(0, address.to_owned());
					SetOutcome::Prepended
				}
			}
			Some(history) => {
				history.push(address.to_owned());
				SetOutcome::Created
			}
			None => {
				entry.insert(contract.to_owned(), vec![address.to_owned()]);
				SetOutcome::Created
			}
		};

		Ok(outcome)
	}
}
