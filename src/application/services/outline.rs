//! Outline service
//!
//! Runs one input through validate -> parse -> render. Rejected input and
//! grammar errors are reported per input; invariant breaches abort.

use std::sync::Arc;

use termtree::Tree;
use tracing::{debug, info, instrument, warn};

use crate::application::services::cases::{Case, CaseCatalog};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    check, parse, DomainError, NodeCollection, OrderMode, Renderer, ValidationReport,
};

/// Result of running one input.
#[derive(Debug)]
pub enum Outcome {
    /// Validator refused the input; nothing was parsed
    Rejected(ValidationReport),
    /// Grammar violation found while parsing
    ParseFailed(DomainError),
    /// Case file could not be read
    Unreadable(ApplicationError),
    Rendered {
        nodes: NodeCollection,
        lines: Vec<String>,
    },
}

impl Outcome {
    pub fn lines(&self) -> &[String] {
        match self {
            Outcome::Rendered { lines, .. } => lines,
            _ => &[],
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, Outcome::Rendered { .. })
    }
}

/// Outcome of one case file.
#[derive(Debug)]
pub struct CaseReport {
    pub case: Case,
    pub input: String,
    pub outcome: Outcome,
}

/// Drives the validate/parse/render pipeline.
pub struct OutlineService {
    catalog: Arc<CaseCatalog>,
    renderer: Renderer,
}

impl OutlineService {
    pub fn new(catalog: Arc<CaseCatalog>, renderer: Renderer) -> Self {
        Self { catalog, renderer }
    }

    /// Validate, parse and render one raw string.
    ///
    /// Only invariant breaches come back as `Err`.
    #[instrument(level = "debug", skip(self))]
    pub fn run(&self, raw: &str, order: OrderMode) -> ApplicationResult<Outcome> {
        let report = check(raw);
        if !report.is_valid() {
            info!("input rejected: {}", report.reasons().join(", "));
            return Ok(Outcome::Rejected(report));
        }

        let nodes = match parse(raw) {
            Ok(nodes) => nodes,
            Err(e) if !e.is_internal() => {
                info!("input failed to parse: {}", e);
                return Ok(Outcome::ParseFailed(e));
            }
            Err(e) => return Err(e.into()),
        };

        for (i, node) in nodes.iter().enumerate() {
            debug!(
                "Segment #{}: {:?}, {}, {}, {:?}, root={}",
                i + 1,
                node.id,
                node.name,
                node.depth,
                node.parent,
                node.is_root()
            );
        }
        debug!(
            "{} node(s), {} level(s), {} leaf node(s)",
            nodes.len(),
            nodes.levels(),
            nodes.leaf_nodes().len()
        );

        let lines = self.renderer.render(&nodes, order)?;
        Ok(Outcome::Rendered { nodes, lines })
    }

    /// Box-drawing view of an already parsed collection.
    pub fn tree(
        &self,
        nodes: &NodeCollection,
        order: OrderMode,
        label: &str,
    ) -> ApplicationResult<Tree<String>> {
        Ok(self.renderer.to_tree(nodes, order, label)?)
    }

    /// Read a case file's first line and run it.
    ///
    /// A file that cannot be read is reported, not fatal.
    #[instrument(level = "debug", skip(self, case), fields(case = %case.file_name()))]
    pub fn run_case(&self, case: &Case, order: OrderMode) -> ApplicationResult<CaseReport> {
        let (input, outcome) = match self.catalog.read_input(case) {
            Ok(input) => {
                let outcome = self.run(&input, order)?;
                (input, outcome)
            }
            Err(e) => {
                warn!("case unreadable: {}", e);
                (String::new(), Outcome::Unreadable(e))
            }
        };
        Ok(CaseReport {
            case: case.clone(),
            input,
            outcome,
        })
    }

    /// Run every case in turn; bad inputs are reported, not fatal.
    pub fn run_all(&self, cases: &[Case], order: OrderMode) -> ApplicationResult<Vec<CaseReport>> {
        cases.iter().map(|case| self.run_case(case, order)).collect()
    }
}
