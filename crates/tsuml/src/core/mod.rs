//! Core abstractions for diagram generation
//!
//! The declaration input model, normalization, the intermediate diagram
//! model and the template engine contract every notation implements.

mod declaration;
mod engine;
mod error;
pub mod logging;
mod model;
mod normalizer;
mod registry;
mod types;

pub use declaration::*;
pub use engine::*;
pub use error::*;
pub use logging::*;
pub use model::*;
pub use normalizer::*;
pub use registry::*;
pub use types::*;
