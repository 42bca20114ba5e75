//! yUML plugin
//!
//! Compact-bracket notation, delivered through a yUML diagram service.

mod engine;
mod upload;

#[cfg(test)]
pub(crate) mod test_server;

pub use engine::{YumlEngine, CLASS_BACKGROUND, INTERFACE_BACKGROUND};
pub use upload::{YumlClient, DEFAULT_YUML_URL};
