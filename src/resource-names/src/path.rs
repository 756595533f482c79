// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Format and parse resource names.

use crate::{DELIMITER, Error, ReferenceNode, ResourceKind, Result, kind_at_depth};

/// The id of the database used when the application does not name one.
pub const DEFAULT_DATABASE: &str = "(default)";

const PROJECTS: &str = "projects";
const DATABASES: &str = "databases";
const DOCUMENTS: &str = "documents";

/// Formats the canonical name for a resource of kind `kind`.
///
/// `ids` contains the variable segments of the name, in root-to-leaf order,
/// excluding the project id. For collections and documents the first id is
/// the database, followed by each segment of the document path.
///
/// The segments are used verbatim, they are not escaped or validated. The
/// only requirement is the right number of segments for `kind`.
///
/// # Example
/// ```
/// # use cloudref_names::{ResourceKind, build_path};
/// let name = build_path(ResourceKind::Table, "p", &["i", "t"])?;
/// assert_eq!(name, "projects/p/instances/i/tables/t");
/// let name = build_path(ResourceKind::Document, "p", &["(default)", "users", "mike"])?;
/// assert_eq!(name, "projects/p/databases/(default)/documents/users/mike");
/// # Ok::<(), cloudref_names::Error>(())
/// ```
pub fn build_path<S>(kind: ResourceKind, project_id: &str, ids: &[S]) -> Result<String>
where
    S: AsRef<str>,
{
    let literals = kind.literals();
    if kind.is_document_path() {
        if ids.len() < 2 {
            return Err(Error::malformed(
                joined(project_id, ids),
                format!("a {kind} needs a database id and at least one document path segment"),
            ));
        }
        if kind_at_depth(ids.len() - 1) != kind {
            return Err(Error::role(kind));
        }
    } else if ids.len() != literals.len() {
        return Err(Error::malformed(
            joined(project_id, ids),
            format!(
                "a {kind} needs {} id(s) after the project, got {}",
                literals.len(),
                ids.len()
            ),
        ));
    }

    let mut name = format!("{PROJECTS}/{project_id}");
    for (literal, id) in literals.iter().zip(ids) {
        name.push(DELIMITER);
        name.push_str(literal);
        name.push(DELIMITER);
        name.push_str(id.as_ref());
    }
    if kind.is_document_path() {
        name.push(DELIMITER);
        name.push_str(DOCUMENTS);
        for id in &ids[literals.len()..] {
            name.push(DELIMITER);
            name.push_str(id.as_ref());
        }
    }
    Ok(name)
}

/// Parses `input` as the name of a resource of kind `kind`.
///
/// Without `relative_to` the input must be a canonical name starting with
/// `projects/`. With `relative_to` the input is resolved beneath that
/// parent. A canonical name is accepted in that case only if it names a
/// resource beneath the parent, names elsewhere return
/// [Error::InvalidParent].
///
/// For collections and documents only a full
/// `projects/{p}/databases/{db}/documents` prefix marks a canonical name,
/// `projects` is a valid collection id.
///
/// # Example
/// ```
/// # use cloudref_names::{ReferenceNode, ResourceKind, parse_path};
/// let table = parse_path(ResourceKind::Table, "projects/p/instances/i/tables/t", None)?;
/// assert_eq!(table.id(), "t");
///
/// let messages = ReferenceNode::collection("p", "(default)", "users/mike/messages")?;
/// let doc = parse_path(ResourceKind::Document, "abc123", Some(&messages))?;
/// assert_eq!(doc.document_path().as_deref(), Some("users/mike/messages/abc123"));
/// let doc = parse_path(ResourceKind::Document, "projects/p1", Some(&messages))?;
/// assert_eq!(doc.document_path().as_deref(), Some("users/mike/messages/projects/p1"));
/// # Ok::<(), cloudref_names::Error>(())
/// ```
pub fn parse_path(
    kind: ResourceKind,
    input: &str,
    relative_to: Option<&ReferenceNode>,
) -> Result<ReferenceNode> {
    let Some(parent) = relative_to else {
        if is_absolute(input) {
            return parse_absolute(kind, input);
        }
        return Err(Error::malformed(
            input,
            format!("expected a name starting with `{PROJECTS}/`"),
        ));
    };
    if let Some(rest) = input.strip_prefix(&child_prefix(parent)) {
        return parent.resolve(kind, rest);
    }
    let foreign = if parent.kind().is_document_path() || parent.kind() == ResourceKind::Database {
        is_documents_name(input)
    } else {
        is_absolute(input)
    };
    if foreign {
        return Err(parent.invalid_parent(kind));
    }
    parent.resolve(kind, input)
}

fn is_absolute(input: &str) -> bool {
    input
        .strip_prefix(PROJECTS)
        .is_some_and(|rest| rest.starts_with(DELIMITER))
}

/// True if `input` starts with a `projects/{p}/databases/{db}/documents` root.
fn is_documents_name(input: &str) -> bool {
    let mut segments = input.split(DELIMITER);
    segments.next() == Some(PROJECTS)
        && segments.next().is_some()
        && segments.next() == Some(DATABASES)
        && segments.next().is_some()
        && segments.next() == Some(DOCUMENTS)
}

/// The prefix of every name beneath `parent`, including the trailing
/// delimiter.
fn child_prefix(parent: &ReferenceNode) -> String {
    match parent.documents_root() {
        Some(root) if parent.kind() == ResourceKind::Database => format!("{root}{DELIMITER}"),
        _ => format!("{}{DELIMITER}", parent.name()),
    }
}

fn parse_absolute(kind: ResourceKind, input: &str) -> Result<ReferenceNode> {
    let segments = split_segments(input)?;
    let mut iter = segments.into_iter();

    expect_literal(&mut iter, PROJECTS, input)?;
    let project_id = expect_id(&mut iter, PROJECTS, input)?;
    let mut ids = Vec::new();
    for literal in kind.literals() {
        expect_literal(&mut iter, literal, input)?;
        ids.push(expect_id(&mut iter, literal, input)?);
    }

    if kind.is_document_path() {
        expect_literal(&mut iter, DOCUMENTS, input)?;
        let path: Vec<String> = iter.map(str::to_string).collect();
        if path.is_empty() {
            return Err(Error::malformed(input, "missing document path"));
        }
        if kind_at_depth(path.len()) != kind {
            return Err(Error::role(kind));
        }
        ids.extend(path);
        return ReferenceNode::from_parts(kind, project_id, ids);
    }

    let mut rest = iter.peekable();
    // The documents root is an alias for its database.
    if kind == ResourceKind::Database && rest.peek() == Some(&DOCUMENTS) {
        rest.next();
    }
    if let Some(extra) = rest.next() {
        return Err(Error::malformed(
            input,
            format!("unexpected segment `{extra}` after the {kind} id"),
        ));
    }
    ReferenceNode::from_parts(kind, project_id, ids)
}

/// Splits `input` on the delimiter, rejecting empty segments.
///
/// Empty segments come from an empty input, a leading or trailing
/// delimiter, or consecutive delimiters.
pub(crate) fn split_segments(input: &str) -> Result<Vec<&str>> {
    let segments: Vec<&str> = input.split(DELIMITER).collect();
    match segments.iter().position(|s| s.is_empty()) {
        Some(i) => Err(Error::malformed(
            input,
            format!("segment {i} is empty"),
        )),
        None => Ok(segments),
    }
}

/// Validates a single segment, used for ids that bypass the parser.
pub(crate) fn check_segment(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(Error::malformed(id, "resource ids cannot be empty"));
    }
    if id.contains(DELIMITER) {
        return Err(Error::malformed(
            id,
            format!("resource ids cannot contain `{DELIMITER}`"),
        ));
    }
    Ok(())
}

fn expect_literal<'a, I>(iter: &mut I, literal: &str, input: &str) -> Result<()>
where
    I: Iterator<Item = &'a str>,
{
    match iter.next() {
        Some(s) if s == literal => Ok(()),
        Some(s) => Err(Error::malformed(
            input,
            format!("expected `{literal}`, found `{s}`"),
        )),
        None => Err(Error::malformed(
            input,
            format!("expected `{literal}`, found end of name"),
        )),
    }
}

fn expect_id<'a, I>(iter: &mut I, literal: &str, input: &str) -> Result<String>
where
    I: Iterator<Item = &'a str>,
{
    iter.next().map(str::to_string).ok_or_else(|| {
        Error::malformed(input, format!("missing id after `{literal}`"))
    })
}

fn joined<S: AsRef<str>>(project_id: &str, ids: &[S]) -> String {
    std::iter::once(project_id)
        .chain(ids.iter().map(AsRef::as_ref))
        .collect::<Vec<_>>()
        .join("/")
}
