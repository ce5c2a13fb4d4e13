//! Storage and validation helpers

pub mod memory_storage;
pub mod validation;

pub use memory_storage::*;
pub use validation::*;
