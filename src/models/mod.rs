//! Data model for parsed call history records.
//!
//! - [`Value`] - Typed leaf or subtree stored under a field name
//! - [`Node`] - One indentation-delimited block (field name to value)
//! - [`Record`] - One start-marker ... end-marker unit of a PCHR file
//! - [`FieldRegistry`] - Field names whose leaf type is forced by configuration
//!
//! `Value`, `Node` and `Record` implement `serde::Serialize` so downstream
//! code can hand them to any serde format.

pub mod registry;
pub mod value;

pub use registry::{FieldRegistry, RegistryConfig, SHO_INFO_NAME};
pub use value::{Node, Record, Value};
