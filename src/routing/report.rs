//! Route report generation.
//!
//! # Responsibilities
//! - Walk the route table depth-first in registration order
//! - Produce one row per leaf: full regex, readable pattern, view, name,
//!   decorators
//! - Render rows as tab-separated text or HTML-safe JSON
//!
//! # Design Decisions
//! - The report is a lazy iterator over a borrowed table
//! - An explicit stack replaces recursion so includes can nest arbitrarily

use std::io;
use std::slice;

use serde::Serialize;

use crate::routing::pattern::{join_regex, simplify_regex};
use crate::routing::table::{RouteTable, UrlNode};
use crate::security::{JsonEncoder, JsonError};

/// One line of the route report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Regex fragments concatenated from root to leaf.
    pub regex: String,
    /// Readable form of `regex`.
    pub pattern: String,
    /// Dotted identifier of the view.
    pub view: String,
    /// Namespaced URL name.
    pub name: Option<String>,
    pub decorators: Vec<String>,
}

struct Frame<'a> {
    nodes: slice::Iter<'a, UrlNode>,
    prefix: String,
    namespace: Option<String>,
}

/// Iterator over the rows of a [`RouteTable`].
pub struct RouteReport<'a> {
    stack: Vec<Frame<'a>>,
}

impl<'a> RouteReport<'a> {
    pub fn new(table: &'a RouteTable) -> Self {
        Self {
            stack: vec![Frame {
                nodes: table.nodes().iter(),
                prefix: String::new(),
                namespace: None,
            }],
        }
    }
}

fn qualify(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(ns) => format!("{}:{}", ns, name),
        None => name.to_string(),
    }
}

impl<'a> Iterator for RouteReport<'a> {
    type Item = ReportRow;

    fn next(&mut self) -> Option<ReportRow> {
        loop {
            let frame = self.stack.last_mut()?;
            match frame.nodes.next() {
                None => {
                    self.stack.pop();
                }
                Some(UrlNode::Pattern(pattern)) => {
                    let regex = join_regex(&frame.prefix, &pattern.regex);
                    return Some(ReportRow {
                        pattern: simplify_regex(&regex),
                        regex,
                        view: pattern.view.path.clone(),
                        name: pattern
                            .name
                            .as_deref()
                            .map(|name| qualify(frame.namespace.as_deref(), name)),
                        decorators: pattern.view.decorators.clone(),
                    });
                }
                Some(UrlNode::Include(include)) => {
                    let prefix = join_regex(&frame.prefix, &include.prefix);
                    let namespace = match (&frame.namespace, &include.namespace) {
                        (Some(outer), Some(inner)) => Some(format!("{}:{}", outer, inner)),
                        (outer, inner) => inner.clone().or_else(|| outer.clone()),
                    };
                    self.stack.push(Frame {
                        nodes: include.children.nodes().iter(),
                        prefix,
                        namespace,
                    });
                }
            }
        }
    }
}

/// Write rows as `pattern<TAB>view<TAB>name<TAB>decorators` lines.
pub fn render_text<W, I>(mut writer: W, rows: I) -> io::Result<()>
where
    W: io::Write,
    I: IntoIterator<Item = ReportRow>,
{
    for row in rows {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            row.pattern,
            row.view,
            row.name.as_deref().unwrap_or(""),
            row.decorators.join(", ")
        )?;
    }
    Ok(())
}

/// Write rows as a pretty JSON array.
pub fn render_json<W, I>(writer: W, rows: I, encoder: &JsonEncoder) -> Result<(), JsonError>
where
    W: io::Write,
    I: IntoIterator<Item = ReportRow>,
{
    let rows: Vec<ReportRow> = rows.into_iter().collect();
    encoder.to_writer_pretty(writer, &rows)
}
