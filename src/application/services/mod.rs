//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the FileSystem boundary trait but are themselves
//! concrete structs, not traits.

mod cases;
mod outline;

pub use cases::{Case, CaseCatalog};
pub use outline::{CaseReport, Outcome, OutlineService};
