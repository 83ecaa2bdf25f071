//! Mutations: validate the snippet, splice the text, reparse, relocate
//!
//! Every mutation checks its input in isolation before the document is
//! touched. Offsets come from the tree of the current text; the spliced copy
//! is committed through [`DocumentState::parse`], which runs the rebind pass.

use std::ops::Range;

use tracing::debug;

use super::class::{class_depth, select_equation_section};
use super::error::{DocumentError, Result};
use super::kinds::{class_identity, component_identity, connection_identity};
use super::state::DocumentState;
use crate::base::{LineIndex, TextSize};
use crate::parser::ast::{self, ClassSpecifier};
use crate::parser::{AstNode, Rule, RuleParseResult, SyntaxKind, SyntaxNode, parse_rule, tokenize};
use crate::syntax::SyntaxDiagnostic;

impl DocumentState {
    /// Append a long class definition after the last top-level class
    pub(crate) fn add_class_definition(&mut self, text: &str) -> Result<usize> {
        let snippet = text.trim();
        let result = parse_rule(Rule::ClassDefinition, snippet);
        if !result.is_ok() {
            return Err(snippet_error(&result));
        }
        let class = result
            .node()
            .and_then(ast::ClassDefinition::cast)
            .ok_or_else(|| DocumentError::internal("validated class snippet has no class node"))?;
        match class.specifier() {
            Some(ClassSpecifier::Long(_)) => {}
            Some(ClassSpecifier::Short(_)) => {
                return Err(DocumentError::kind_mismatch(
                    "short class specifier where a long class definition is required",
                ));
            }
            Some(ClassSpecifier::Der(_)) => {
                return Err(DocumentError::kind_mismatch(
                    "der class specifier where a long class definition is required",
                ));
            }
            None => return Err(DocumentError::internal("class snippet has no specifier")),
        }
        let id = class_identity(&class)
            .ok_or_else(|| DocumentError::kind_mismatch("class definition has no name"))?;

        self.class_indices();
        if self.classes.find_active(&id).is_some() {
            return Err(DocumentError::duplicate("class definition", id.as_str()));
        }

        let snippet = terminated(snippet, class.syntax());
        let root = self.root();
        let (offset, insert) = match root.children().filter_map(ast::ClassDefinition::cast).last() {
            Some(last) => (
                after_line_trivia(self.text(), class_end(&last)),
                format!("\n\n{}", snippet),
            ),
            None => {
                let text = self.text();
                let sep = if text.is_empty() || text.ends_with('\n') { "" } else { "\n" };
                (text.len(), format!("{}{}\n", sep, snippet))
            }
        };
        let (range, insert) = line_safe_insert(self.text(), offset, insert, "");
        self.splice(range, &insert)?;

        self.class_indices();
        self.classes.find_active(&id).ok_or_else(|| {
            DocumentError::internal(format!("inserted class '{}' not found after reparse", id))
        })
    }

    /// Insert a component clause after the class's last component
    pub(crate) fn add_component_clause(&mut self, class: usize, text: &str) -> Result<usize> {
        let snippet = text.trim();
        let (clause, snippet) = validate_component(snippet)?;

        let class_node = self.active_class(class, "add_component_clause")?;
        let owner = class_identity(&class_node).unwrap_or_default();
        let id = component_identity(&owner, &clause)
            .ok_or_else(|| DocumentError::kind_mismatch("component clause declares no name"))?;

        let offset = after_line_trivia(self.text(), component_insert_offset(&class_node)?);
        let depth = class_depth(&class_node);
        let insert = format!("\n{}{}", self.options.indent(depth + 1), snippet);
        let class_indent = self.options.indent(depth);
        let (range, insert) = line_safe_insert(self.text(), offset, insert, &class_indent);
        self.splice(range, &insert)?;

        self.component_indices(class);
        self.classes
            .get(class)
            .and_then(|unit| unit.children.components.find_active(&id))
            .ok_or_else(|| {
                DocumentError::internal(format!("inserted component '{}' not found after reparse", id))
            })
    }

    /// Insert `connect(source, target);` into the class's equation section
    pub(crate) fn add_connect_clause(
        &mut self,
        class: usize,
        source: &str,
        target: &str,
    ) -> Result<usize> {
        let (source, target) = normalize_endpoints(source, target)?;
        let id = connection_identity(&source, &target);

        let class_node = self.active_class(class, "add_connect_clause")?;
        self.connection_indices(class);
        if self.find_connection(class, &id).is_some() {
            return Err(DocumentError::duplicate("connect clause", id.as_str()));
        }

        let section = select_equation_section(&class_node)?;
        let anchor = match section.equations().last() {
            Some(last) => last.syntax().text_range().end(),
            None => section
                .keyword()
                .map(|kw| kw.text_range().end())
                .ok_or_else(|| DocumentError::structural("equation section without keyword"))?,
        };
        let offset = after_line_trivia(self.text(), anchor);
        let indent = self.options.indent(class_depth(&class_node) + 1);
        self.splice_insert(offset, &format!("\n{}connect({}, {});", indent, source, target))?;

        self.connection_indices(class);
        self.find_connection(class, &id).ok_or_else(|| {
            DocumentError::internal(format!("inserted connection '{}' not found after reparse", id))
        })
    }

    /// Delete the statement holding `connect(source, target)`
    ///
    /// Returns `false` when no such connection is active.
    pub(crate) fn remove_connect_clause(
        &mut self,
        class: usize,
        source: &str,
        target: &str,
    ) -> Result<bool> {
        let (source, target) = normalize_endpoints(source, target)?;
        let id = connection_identity(&source, &target);

        self.active_class(class, "remove_connect_clause")?;
        self.connection_indices(class);
        let Some(node) = self
            .find_connection(class, &id)
            .and_then(|index| self.classes.get(class)?.children.connections.get(index))
            .and_then(|unit| unit.node())
            .map(|node| node.syntax().clone())
        else {
            debug!(class, id = %id, "no active connection to remove");
            return Ok(false);
        };

        let statement = node
            .parent()
            .filter(|parent| parent.kind() == SyntaxKind::EQUATION)
            .unwrap_or(node);
        let range = removal_range(self.text(), statement.text_range().into());
        debug!(offset = range.start, removed = range.len(), id = %id, "splicing removal");

        let mut text = self.text().to_string();
        text.replace_range(range, "");
        self.parse(&text)?;
        Ok(true)
    }

    fn active_class(&self, class: usize, method: &'static str) -> Result<ast::ClassDefinition> {
        self.class_node(class)
            .ok_or_else(|| DocumentError::stale("class definition", method))
    }

    fn find_connection(&self, class: usize, id: &str) -> Option<usize> {
        self.classes
            .get(class)
            .and_then(|unit| unit.children.connections.find_active(id))
    }

    fn splice_insert(&mut self, offset: usize, insert: &str) -> Result<()> {
        self.splice(offset..offset, insert)
    }

    fn splice(&mut self, range: Range<usize>, insert: &str) -> Result<()> {
        debug!(start = range.start, end = range.end, inserted = insert.len(), "splicing");
        let mut text = self.text().to_string();
        text.replace_range(range, insert);
        self.parse(&text)
    }
}

/// Canonical text of both endpoints, via a synthetic `connect(...)`
fn normalize_endpoints(source: &str, target: &str) -> Result<(String, String)> {
    let result = parse_rule(Rule::ConnectClause, &format!("connect({}, {})", source, target));
    if !result.is_ok() {
        return Err(snippet_error(&result));
    }
    let clause = result
        .node()
        .and_then(ast::ConnectClause::cast)
        .ok_or_else(|| DocumentError::internal("validated connect clause has no node"))?;
    match (clause.source(), clause.target()) {
        (Some(source), Some(target)) => Ok((source.text(), target.text())),
        _ => Err(DocumentError::internal("connect clause without both endpoints")),
    }
}

/// Accept a bare component clause or an element wrapping one
fn validate_component(snippet: &str) -> Result<(ast::ComponentClause, String)> {
    let result = parse_rule(Rule::ComponentClause, snippet);
    if result.is_ok() {
        let clause = result
            .node()
            .and_then(ast::ComponentClause::cast)
            .ok_or_else(|| DocumentError::internal("validated component snippet has no node"))?;
        let text = terminated(snippet, clause.syntax());
        return Ok((clause, text));
    }

    // `parameter`, `inner`, `replaceable`... parse as an element
    let element = parse_rule(Rule::Element, snippet);
    if element.is_ok() {
        let node = element
            .node()
            .and_then(ast::Element::cast)
            .ok_or_else(|| DocumentError::internal("validated element snippet has no node"))?;
        return match node.component_clause() {
            Some(clause) => Ok((clause, terminated(snippet, node.syntax()))),
            None => Err(DocumentError::kind_mismatch(
                "element is not a component clause",
            )),
        };
    }
    Err(snippet_error(&result))
}

fn snippet_error(result: &RuleParseResult) -> DocumentError {
    let index = LineIndex::new(&result.input);
    match result.errors().first() {
        Some(error) => SyntaxDiagnostic {
            message: error.message.clone(),
            position: index.line_col(error.range.start()).into(),
        }
        .into(),
        None => DocumentError::internal("snippet rejected without a diagnostic"),
    }
}

/// `snippet` with a `;` after `node` unless one is already there
fn terminated(snippet: &str, node: &SyntaxNode) -> String {
    let ends_with_semicolon = node
        .last_token()
        .is_some_and(|t| t.kind() == SyntaxKind::SEMICOLON)
        || next_significant(node) == Some(SyntaxKind::SEMICOLON);
    if ends_with_semicolon {
        return snippet.to_string();
    }
    let end = usize::from(node.text_range().end());
    format!("{};{}", &snippet[..end], &snippet[end..])
}

fn next_significant(node: &SyntaxNode) -> Option<SyntaxKind> {
    node.siblings_with_tokens(rowan::Direction::Next)
        .skip(1)
        .map(|e| e.kind())
        .find(|k| !k.is_trivia())
}

/// End of a top-level class including the `;` that follows it
fn class_end(class: &ast::ClassDefinition) -> TextSize {
    class
        .syntax()
        .siblings_with_tokens(rowan::Direction::Next)
        .skip(1)
        .find(|e| !e.kind().is_trivia())
        .filter(|e| e.kind() == SyntaxKind::SEMICOLON)
        .map(|e| e.text_range().end())
        .unwrap_or_else(|| class.syntax().text_range().end())
}

/// After the last component element, or after the class header
fn component_insert_offset(class: &ast::ClassDefinition) -> Result<TextSize> {
    let name = class.name().unwrap_or_default();
    let spec = class.long_class_specifier().ok_or_else(|| {
        DocumentError::structural(format!("class '{}' has no long class specifier", name))
    })?;
    let composition = spec.composition().ok_or_else(|| {
        DocumentError::structural(format!("class '{}' has no composition", name))
    })?;

    let last_component = composition
        .element_lists()
        .flat_map(|list| list.elements().collect::<Vec<_>>())
        .filter(|element| element.component_clause().is_some())
        .last();
    if let Some(element) = last_component {
        return Ok(element.syntax().text_range().end());
    }

    spec.syntax()
        .children_with_tokens()
        .take_while(|e| e.kind() != SyntaxKind::COMPOSITION)
        .filter(|e| !e.kind().is_trivia())
        .last()
        .map(|e| e.text_range().end())
        .ok_or_else(|| DocumentError::structural(format!("class '{}' has no header", name)))
}

/// Skip to the end of the line if only whitespace or a line comment remains
fn after_line_trivia(text: &str, offset: TextSize) -> usize {
    let offset = usize::from(offset);
    let rest = &text[offset..];
    let line_end = rest.find('\n').unwrap_or(rest.len());
    let line = rest[..line_end].trim_end_matches('\r');
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with("//") {
        offset + line.len()
    } else {
        offset
    }
}

/// Replacement range and text for putting `insert` at `offset`
///
/// When `insert` ends in a line comment and code follows on the same line,
/// that code moves to a new line at `indent`, replacing the blanks before it.
fn line_safe_insert(
    text: &str,
    offset: usize,
    insert: String,
    indent: &str,
) -> (Range<usize>, String) {
    let ends_in_line_comment = tokenize(&insert)
        .last()
        .is_some_and(|t| t.kind == SyntaxKind::LINE_COMMENT);
    let rest = &text[offset..];
    let blanks = rest.len() - rest.trim_start_matches([' ', '\t']).len();
    let at_line_end = rest[blanks..].is_empty() || rest[blanks..].starts_with(['\n', '\r']);
    if !ends_in_line_comment || at_line_end {
        return (offset..offset, insert);
    }
    (offset..offset + blanks, format!("{}\n{}", insert, indent))
}

/// Statement range widened over the whitespace around it
///
/// A statement alone on its line takes its line break with it. Content
/// before it keeps the line break; content after it keeps the indentation.
fn removal_range(text: &str, statement: Range<usize>) -> Range<usize> {
    let bytes = text.as_bytes();
    let is_blank = |b: u8| b == b' ' || b == b'\t';

    let mut start = statement.start;
    while start > 0 && is_blank(bytes[start - 1]) {
        start -= 1;
    }
    let mut end = statement.end;
    while end < bytes.len() && is_blank(bytes[end]) {
        end += 1;
    }

    let starts_line = start == 0 || bytes[start - 1] == b'\n';
    let ends_line = end == bytes.len() || bytes[end] == b'\n' || bytes[end] == b'\r';

    if !ends_line {
        return statement.start..end;
    }
    if starts_line {
        if bytes[end..].starts_with(b"\r\n") {
            end += 2;
        } else if bytes[end..].starts_with(b"\n") {
            end += 1;
        } else if start > 0 {
            start -= 1;
            if start > 0 && bytes[start - 1] == b'\r' {
                start -= 1;
            }
        }
    }
    start..end
}
