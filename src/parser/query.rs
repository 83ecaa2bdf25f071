//! Structural pattern queries over the CST
//!
//! A pattern is a list of steps, each naming a node kind by its grammar rule
//! name. `//kind` matches any descendant, `/kind` only direct children:
//!
//! ```text
//! //class_definition
//! //equation_section//connect_clause
//! /class_definition/long_class_specifier
//! ```
//!
//! Steps are evaluated from the root passed to [`Pattern::find_all`]; the
//! root itself never matches the first step.

use std::fmt;

use rustc_hash::FxHashSet;

use super::{SyntaxKind, SyntaxNode};

/// How a step relates to the nodes matched by the previous step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub axis: Axis,
    pub kind: SyntaxKind,
}

/// A compiled structural pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    steps: Vec<Step>,
}

/// Reasons a pattern string can be rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("empty pattern")]
    Empty,
    #[error("pattern step must start with '/' or '//': {0}")]
    MissingSlash(String),
    #[error("empty step in pattern: {0}")]
    EmptyStep(String),
    #[error("unknown rule name in pattern: {0}")]
    UnknownRule(String),
}

impl Pattern {
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }
        if !pattern.starts_with('/') {
            return Err(PatternError::MissingSlash(pattern.to_string()));
        }

        let mut steps = Vec::new();
        let mut rest = pattern;
        while !rest.is_empty() {
            let (axis, tail) = if let Some(tail) = rest.strip_prefix("//") {
                (Axis::Descendant, tail)
            } else if let Some(tail) = rest.strip_prefix('/') {
                (Axis::Child, tail)
            } else {
                return Err(PatternError::MissingSlash(rest.to_string()));
            };
            let end = tail.find('/').unwrap_or(tail.len());
            let name = &tail[..end];
            if name.is_empty() {
                return Err(PatternError::EmptyStep(pattern.to_string()));
            }
            let kind = SyntaxKind::from_rule_name(name)
                .ok_or_else(|| PatternError::UnknownRule(name.to_string()))?;
            steps.push(Step { axis, kind });
            rest = &tail[end..];
        }

        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Kind matched by the final step
    pub fn target_kind(&self) -> Option<SyntaxKind> {
        self.steps.last().map(|s| s.kind)
    }

    /// All nodes under `root` matching the pattern, in document order
    pub fn find_all(&self, root: &SyntaxNode) -> Vec<SyntaxNode> {
        let mut current = vec![root.clone()];
        for step in &self.steps {
            let mut seen = FxHashSet::default();
            let mut next = Vec::new();
            for node in &current {
                let candidates: Box<dyn Iterator<Item = SyntaxNode>> = match step.axis {
                    Axis::Child => Box::new(node.children()),
                    Axis::Descendant => Box::new(node.descendants().skip(1)),
                };
                for candidate in candidates.filter(|n| n.kind() == step.kind) {
                    if seen.insert(candidate.clone()) {
                        next.push(candidate);
                    }
                }
            }
            next.sort_by_key(|n| n.text_range().start());
            current = next;
        }
        current
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            let slash = match step.axis {
                Axis::Child => "/",
                Axis::Descendant => "//",
            };
            write!(f, "{}{}", slash, step.kind.rule_name().unwrap_or("?"))?;
        }
        Ok(())
    }
}
