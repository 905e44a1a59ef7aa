//! Recursive descent parser for the nested field notation.
//!
//! ```text
//! List  := Item (',' Item)*
//! Item  := Name Group?
//! Group := '(' List ')'
//! Name  := one or more characters other than '(', ')', ','
//! ```
//!
//! The whole input is one group; its list members sit at depth 0. Every member
//! of a group gets the group's anchor (the name right before its `(`) as parent,
//! no matter how many of its siblings open groups of their own.

use tracing::{instrument, trace};

use crate::domain::arena::{NodeCollection, NodeId};
use crate::domain::error::{DomainError, DomainResult, ParseErrorKind};
use crate::domain::validator::strip_whitespace;

const OPEN: char = '(';
const CLOSE: char = ')';
const SEPARATOR: char = ',';

/// Single-use parser; build a new one per input.
pub struct GroupParser {
    input: Vec<char>,
    pos: usize,
    nodes: NodeCollection,
}

impl GroupParser {
    pub fn new(input: &str) -> Self {
        Self {
            input: strip_whitespace(input).chars().collect(),
            pos: 0,
            nodes: NodeCollection::new(),
        }
    }

    /// Parse the outer group and hand over the flat node collection.
    #[instrument(level = "debug", skip(self))]
    pub fn parse(mut self) -> DomainResult<NodeCollection> {
        self.expect(OPEN, "'('")?;
        self.parse_list(0, None)?;
        self.expect(CLOSE, "')'")?;
        if self.peek().is_some() {
            return Err(DomainError::parse(self.pos, ParseErrorKind::TrailingInput));
        }
        Ok(self.nodes)
    }

    /// Parse list members until the `)` closing the current group.
    ///
    /// The closing paren is left for the caller to consume.
    fn parse_list(&mut self, depth: usize, parent: Option<NodeId>) -> DomainResult<()> {
        loop {
            let name = self.take_name();
            match self.peek() {
                Some(OPEN) => {
                    if name.is_empty() {
                        return Err(DomainError::parse(self.pos, ParseErrorKind::MissingAnchor));
                    }
                    let anchor = self.add_node(&name, depth, parent)?;
                    self.bump();
                    self.parse_list(depth + 1, Some(anchor))?;
                    self.expect(CLOSE, "')'")?;
                    match self.peek() {
                        Some(SEPARATOR) => self.bump(),
                        Some(CLOSE) => return Ok(()),
                        Some(found) => {
                            return Err(DomainError::parse(
                                self.pos,
                                ParseErrorKind::Unexpected {
                                    expected: "',' or ')'",
                                    found,
                                },
                            ))
                        }
                        None => {
                            return Err(DomainError::parse(self.pos, ParseErrorKind::UnexpectedEnd))
                        }
                    }
                }
                Some(SEPARATOR) => {
                    // stray commas leave empty segments behind; they add nothing
                    if !name.is_empty() {
                        self.add_node(&name, depth, parent)?;
                    }
                    self.bump();
                }
                Some(CLOSE) => {
                    if !name.is_empty() {
                        self.add_node(&name, depth, parent)?;
                    }
                    return Ok(());
                }
                _ => return Err(DomainError::parse(self.pos, ParseErrorKind::UnexpectedEnd)),
            }
        }
    }

    fn add_node(
        &mut self,
        name: &str,
        depth: usize,
        parent: Option<NodeId>,
    ) -> DomainResult<NodeId> {
        let id = self.nodes.push(name, depth, parent)?;
        trace!(name, depth, ?parent, ?id, "node created");
        Ok(id)
    }

    fn take_name(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == OPEN || c == CLOSE || c == SEPARATOR {
                break;
            }
            self.pos += 1;
        }
        self.input[start..self.pos].iter().collect()
    }

    fn expect(&mut self, wanted: char, expected: &'static str) -> DomainResult<()> {
        match self.peek() {
            Some(c) if c == wanted => {
                self.bump();
                Ok(())
            }
            Some(found) => Err(DomainError::parse(
                self.pos,
                ParseErrorKind::Unexpected { expected, found },
            )),
            None => Err(DomainError::parse(self.pos, ParseErrorKind::UnexpectedEnd)),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }
}

/// Parse already validated input into a flat node collection.
pub fn parse(input: &str) -> DomainResult<NodeCollection> {
    GroupParser::new(input).parse()
}
