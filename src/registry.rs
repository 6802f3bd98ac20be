use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::address;
use crate::book::{AddressBook, Policy, SetOutcome};
use crate::error::{RegistryError, Result};

/// Where deploy scripts expect the address book, relative to their
/// working directory.
pub const DEFAULT_PATH: &str = "./data/contractsAddress.json";

/// File-backed address book.
///
/// Holds no state between calls: every read parses the file again and
/// every write replaces it whole. Writers take an exclusive advisory lock
/// on `<file>.lock` for the full read-modify-write and publish through a
/// rename of `<file>.tmp`, so a reader only ever sees a complete file.
#[derive(Debug, Clone)]
pub struct Registry {
	path: PathBuf,
	policy: Policy,
	pretty: bool,
}

/// Released when dropped (closing the handle drops the OS lock).
struct WriteLock {
	_file: File,
}

impl Registry {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			policy: Policy::default(),
			pretty: false,
		}
	}

	pub fn with_policy(mut self, policy: Policy) -> Self {
		self.policy = policy;
		self
	}

	/// Pretty-print the file on write instead of the compact form.
	pub fn pretty(mut self, pretty: bool) -> Self {
		self.pretty = pretty;
		self
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn policy(&self) -> &Policy {
		&self.policy
	}

	/// Read and parse the whole address book.
	pub fn get_addresses(&self) -> Result<AddressBook> {
		let text = match fs::read_to_string(&self.path) {
			Ok(text) => text,
			Err(e) if e.kind() == ErrorKind::NotFound => {
				return Err(RegistryError::NotFound {
					path: self.path.clone(),
				})
			}
			Err(source) => {
				return Err(RegistryError::Read {
					path: self.path.clone(),
					source,
				})
			}
		};
		debug!(path = %self.path.display(), bytes = text.len(), "read address book");

		AddressBook::from_json(&text).map_err(|source| RegistryError::Parse {
			path: self.path.clone(),
			source,
		})
	}

	/// Record `address` as the newest deployment of `contract` on `network`.
	///
	/// The file is only rewritten when the history actually changes.
	pub fn set_address(&self, network: &str, contract: &str, address: &str) -> Result<SetOutcome> {
		if self.policy.validate_addresses {
			address::validate(address)?;
		}

		if !self.path.exists() {
			return Err(RegistryError::NotFound {
				path: self.path.clone(),
			});
		}

		let _lock = self.lock()?;
		let mut book = self.get_addresses()?;
		let outcome = book.apply(network, contract, address, &self.policy)?;

		if outcome.changed() {
			self.write(&book)?;
		}
		info!(network, contract, address, %outcome, "recorded deployment");
		Ok(outcome)
	}

	/// Current address of `contract` on `network`.
	pub fn current(&self, network: &str, contract: &str) -> Result<String> {
		Ok(self.get_addresses()?.current(network, contract)?.to_owned())
	}

	/// Every address `contract` has had on `network`, newest first.
	pub fn history(&self, network: &str, contract: &str) -> Result<Vec<String>> {
		Ok(self.get_addresses()?.history(network, contract)?.to_vec())
	}

	/// Current addresses of several contracts from a single read, in the
	/// order asked. The first missing one fails the whole call.
	pub fn resolve<'a, I>(&self, network: &str, contracts: I) -> Result<Vec<(String, String)>>
	where
		I: IntoIterator<Item = &'a str>,
	{
		let book = self.get_addresses()?;
		contracts
			.into_iter()
			.map(|name| Ok((name.to_owned(), book.current(network, name)?.to_owned())))
			.collect()
	}

	/// Create the file and the given network keys if they are missing.
	///
	/// Existing entries are never touched. Returns the networks that were
	/// added.
	pub fn init<S: AsRef<str>>(&self, networks: &[S]) -> Result<Vec<String>> {
		if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|source| RegistryError::Write {
				path: parent.to_path_buf(),
				source,
			})?;
		}

		let _lock = self.lock()?;
		let (mut book, existed) = match self.get_addresses() {
			Ok(book) => (book, true),
			Err(RegistryError::NotFound { .. }) => (AddressBook::new(), false),
			Err(e) => return Err(e),
		};

		let mut added = Vec::new();
		for network in networks {
			let network: &str = network.as_ref();
			if book.insert_network(network) {
				added.push(network.to_owned());
			}
		}

		if !existed || !added.is_empty() {
			self.write(&book)?;
			info!(path = %self.path.display(), ?added, "initialized address book");
		}
		Ok(added)
	}

	fn lock(&self) -> Result<WriteLock> {
		let lock_path = self.sidecar(".lock");
		let file = OpenOptions::new()
			.create(true)
			.truncate(false)
			.write(true)
			.open(&lock_path)
			.map_err(|source| match source.kind() {
				// parent directory missing means the book cannot exist either
				ErrorKind::NotFound => RegistryError::NotFound {
					path: self.path.clone(),
				},
				_ => RegistryError::Lock {
					path: lock_path.clone(),
					source,
				},
			})?;

		file.lock().map_err(|source| RegistryError::Lock {
			path: lock_path.clone(),
			source,
		})?;
		debug!(path = %lock_path.display(), "acquired write lock");
		Ok(WriteLock { _file: file })
	}

	/// Replace the book through a rename. A symlinked book is followed so the
	/// link survives, and the existing file's permissions carry over.
	fn write(&self, book: &AddressBook) -> Result<()> {
		let text = book.to_json(self.pretty).map_err(RegistryError::Serialize)?;
		let target = fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone());
		let tmp = with_suffix(&target, ".tmp");

		fs::write(&tmp, text).map_err(|source| RegistryError::Write {
			path: tmp.clone(),
			source,
		})?;
		if let Ok(meta) = fs::metadata(&target) {
			fs::set_permissions(&tmp, meta.permissions()).map_err(|source| {
				RegistryError::Write {
					path: tmp.clone(),
					source,
				}
			})?;
		}
		fs::rename(&tmp, &target).map_err(|source| RegistryError::Write {
			path: target.clone(),
			source,
		})?;
		debug!(path = %target.display(), "wrote address book");
		Ok(())
	}

	fn sidecar(&self, suffix: &str) -> PathBuf {
		with_suffix(&self.path, suffix)
	}
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
	let mut name = path.as_os_str().to_owned();
	name.push(suffix);
	PathBuf::from(name)
}
