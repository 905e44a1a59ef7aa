//! nestline: parse nested field notation and print it as a depth outline.
//!
//! ```text
//! (id,created,employee(id,firstname,employeeType(id),lastname),location)
//! ```
//! becomes
//! ```text
//! id
//! created
//! employee
//! - id
//! - firstname
//! - employeeType
//! -- id
//! - lastname
//! location
//! ```
//!
//! Layers, innermost first:
//! - `domain`: node model, validator, parser, renderer (no I/O)
//! - `application`: case catalog and outline services
//! - `infrastructure`: filesystem boundary and service wiring
//! - `cli`: argument parsing, dispatch and terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{
    check, parse, render, validate, DomainError, Node, NodeCollection, NodeId, OrderMode,
    Renderer, ValidationReport,
};
