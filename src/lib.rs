pub mod address;
pub mod book;
pub mod cli;
pub mod commands;
pub mod config;
pub mod contracts;
pub mod error;
pub mod registry;

pub use book::{AddressBook, AddressHistory, NetworkEntry, Policy, SetOutcome};
pub use error::RegistryError;
pub use registry::Registry;
