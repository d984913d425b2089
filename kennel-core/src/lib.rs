//! kennel-core: framework-agnostic core for the Kennel dog registry.

pub mod config;
pub mod dog;
pub mod errors;
pub mod memory;
pub mod store;
pub mod validator;

pub use config::{KennelConfig, KennelConfigSnapshot};
pub use dog::{parse_id, Dog, DogChanges, DogId, InvalidId, NewDog};
pub use errors::{ErrorKind, KennelError};
pub use memory::MemoryDogStore;
pub use store::{DogStore, Lookup};
pub use validator::{validate_fields, ValidationMode, ALLOWED_KEYS};
