//! Domain layer: node model, validator, parser and renderer
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod parser;
pub mod render;
pub mod validator;

pub use arena::{Node, NodeCollection, NodeId};
pub use error::{DomainError, DomainResult, ParseErrorKind};
pub use parser::{parse, GroupParser};
pub use render::{render, OrderMode, Renderer, DEFAULT_MARKER};
pub use validator::{check, strip_whitespace, validate, ValidationReport};
