//! Utilities shared by the binary and tests

pub mod synthetic;

pub use synthetic::SyntheticDataGenerator;
