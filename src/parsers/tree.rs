//! Recursive tree builder for record bodies.
//!
//! Nesting is carried only by indentation. A builder call owns every line
//! deeper than its parent's depth; the first line at or above that depth is
//! pushed back onto the cursor and left for the caller. The end-of-record
//! marker is never consumed here, so every level sees it and returns.
//!
//! Repeated siblings come in two shapes:
//!
//! - Indexed headers (`Neighbor 1`, `Neighbor 2`, ...) are collected into one
//!   list stored under the plural name (`Neighbors`).
//! - Blocks named in the registry's repeated set (`ShoInfo`) carry no index;
//!   each occurrence is appended to the list under the plural name.
//!
//! Every nested block costs one level of recursion, so nesting is capped at
//! [`DEFAULT_MAX_DEPTH`] levels unless the caller sets another limit.

use std::io::BufRead;

use log::{debug, trace};

use crate::error::{PchrError, Result};
use crate::models::{FieldRegistry, Node, Value};
use crate::parsers::cursor::LineCursor;
use crate::parsers::leaf::{Coerced, coerce_line};
use crate::parsers::lines::{
    LineKind, classify, depth, is_blank, is_end_marker, plural, start_marker_version,
};
use crate::parsers::record::ParseStats;

/// Default ceiling on block nesting, the record root included
pub const DEFAULT_MAX_DEPTH: usize = 256;

pub struct TreeBuilder<'a, R> {
    cursor: &'a mut LineCursor<R>,
    registry: &'a FieldRegistry,
    stats: &'a mut ParseStats,
    /// Line of the start marker of the record being built
    start_line: usize,
    max_depth: usize,
    nesting: usize,
}

impl<'a, R: BufRead> TreeBuilder<'a, R> {
    pub fn new(
        cursor: &'a mut LineCursor<R>,
        registry: &'a FieldRegistry,
        stats: &'a mut ParseStats,
        start_line: usize,
    ) -> Self {
        Self { cursor, registry, stats, start_line, max_depth: DEFAULT_MAX_DEPTH, nesting: 0 }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Build the node whose lines are deeper than `parent_depth`.
    ///
    /// `None` is the record root: every line belongs to it until the end
    /// marker. Returns once a line at or above `parent_depth`, or the end
    /// marker, is found; that line is left unconsumed.
    ///
    /// # Errors
    ///
    /// Fails with [`PchrError::NestingTooDeep`] once more than `max_depth`
    /// nodes are open at the same time.
    pub fn build(&mut self, parent_depth: Option<usize>) -> Result<Node> {
        if self.nesting >= self.max_depth {
            let line = match parent_depth {
                Some(_) => self.cursor.line_number(),
                None => self.start_line,
            };
            return Err(PchrError::NestingTooDeep { line, limit: self.max_depth });
        }

        self.nesting += 1;
        let result = self.build_node(parent_depth);
        self.nesting -= 1;
        result
    }

    fn build_node(&mut self, parent_depth: Option<usize>) -> Result<Node> {
        let mut node = Node::new();

        loop {
            let line = self.mark_and_read()?;
            if is_end_marker(&line) {
                self.cursor.rewind()?;
                return Ok(node);
            }

            let line_depth = depth(&line);
            if parent_depth.is_some_and(|parent| line_depth <= parent) {
                self.cursor.rewind()?;
                return Ok(node);
            }

            match classify(&line) {
                LineKind::Leaf => self.add_leaf(&mut node, &line),
                LineKind::CollectionHeader { name, index: 1 } => {
                    let items = self.collect(&line, name, line_depth)?;
                    self.insert(&mut node, plural(name), Value::List(items));
                }
                LineKind::CollectionHeader { name, index } => {
                    // An index above 1 is only valid inside a collection started by index 1
                    debug!(
                        "Line {}: '{} {}' has no preceding '{} 1', skipping block",
                        self.cursor.line_number(),
                        name,
                        index,
                        name
                    );
                    self.build(Some(line_depth))?;
                }
                LineKind::Block { name } => {
                    let block_line = self.cursor.line_number();
                    let child = self.build(Some(line_depth))?;
                    if child.is_empty() {
                        // The line that ended the empty block is still pending on
                        // the cursor and is read by the next iteration.
                        trace!("Line {}: block '{}' has no body", block_line, name);
                    }

                    if self.registry.is_repeated_block(name) {
                        node.push_to_list(&plural(name), child);
                    } else {
                        self.insert(&mut node, name.to_string(), Value::Node(child));
                    }
                }
            }
        }
    }

    /// Collect a run of `name N` sibling blocks starting at `header`.
    ///
    /// Stops at the first line that is not a `name` header at the header's
    /// depth or deeper; that line is left unconsumed.
    pub fn collect(&mut self, header: &str, name: &str, header_depth: usize) -> Result<Vec<Node>> {
        let mut items = Vec::new();
        let mut last = header.to_string();

        loop {
            items.push(self.build(Some(header_depth))?);

            let mut line = self.mark_and_read()?;
            if line == last {
                debug!(
                    "Line {}: dropping duplicated '{}' at collection boundary",
                    self.cursor.line_number(),
                    line.trim()
                );
                line = self.mark_and_read()?;
            }

            if !continues_collection(&line, name, header_depth) {
                self.cursor.rewind()?;
                return Ok(items);
            }
            last = line;
        }
    }

    /// Mark the cursor and read the next non-blank line.
    ///
    /// Blank lines are consumed for good. End of input and a new start marker
    /// both mean the open record was never closed.
    fn mark_and_read(&mut self) -> Result<String> {
        loop {
            self.cursor.mark();
            let line = self
                .cursor
                .next()?
                .ok_or(PchrError::TruncatedRecord { start_line: self.start_line })?;

            if is_blank(&line) {
                continue;
            }
            if start_marker_version(&line).is_some() {
                return Err(PchrError::UnexpectedStartMarker {
                    line: self.cursor.line_number(),
                    start_line: self.start_line,
                });
            }
            return Ok(line);
        }
    }

    fn add_leaf(&mut self, node: &mut Node, line: &str) {
        let Some((key, coerced)) = coerce_line(line, self.registry) else {
            return;
        };

        match coerced {
            Coerced::Value(value) => {
                self.stats.leaves += 1;
                self.insert(node, key.to_string(), value);
            }
            Coerced::Fallback(value, notice) => {
                trace!("Line {}: {}", self.cursor.line_number(), notice);
                self.stats.leaves += 1;
                self.stats.fallback_leaves += 1;
                self.insert(node, key.to_string(), value);
            }
            Coerced::Dropped(notice) => {
                trace!("Line {}: {}, dropped", self.cursor.line_number(), notice);
                self.stats.dropped_leaves += 1;
            }
        }
    }

    fn insert(&self, node: &mut Node, key: String, value: Value) {
        if let Some(previous) = node.insert(key.clone(), value) {
            debug!(
                "Line {}: field '{}' repeated, replacing previous {} value",
                self.cursor.line_number(),
                key,
                previous.type_name()
            );
        }
    }
}

fn continues_collection(line: &str, name: &str, header_depth: usize) -> bool {
    if is_end_marker(line) || depth(line) < header_depth {
        return false;
    }
    matches!(classify(line), LineKind::CollectionHeader { name: next, .. } if next == name)
}
