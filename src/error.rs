use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while reading or updating the address book.
///
/// None of these are recovered inside the registry; they surface to the
/// deploy step that made the call.
#[derive(Debug, Error)]
pub enum RegistryError {
	#[error("address book not found at {}", path.display())]
	NotFound { path: PathBuf },

	#[error("failed to read address book at {}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("address book at {} is not valid JSON", path.display())]
	Parse {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("network `{network}` is not present in the address book")]
	Lookup { network: String },

	#[error("no address recorded for `{contract}` on `{network}`")]
	MissingContract { network: String, contract: String },

	#[error("invalid address `{address}`: {reason}")]
	InvalidAddress { address: String, reason: String },

	#[error("failed to write address book at {}", path.display())]
	Write {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to lock address book at {}", path.display())]
	Lock {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to serialize address book")]
	Serialize(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
