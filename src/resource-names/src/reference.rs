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

use crate::auto_id::{IdGenerator, RandomIds};
use crate::path::{check_segment, split_segments};
use crate::{Error, ResourceKind, Result, build_path, kind_at_depth, parse_path};
use std::hash::{Hash, Hasher};

/// A reference to a named resource.
///
/// A `ReferenceNode` identifies a resource of some [ResourceKind] by its
/// canonical name. It is immutable, deriving a parent or a child returns a new
/// value. Creating references never makes any requests, the resource may or
/// may not exist.
///
/// Two references are equal if and only if their canonical names are equal,
/// regardless of how they were created.
///
/// # Example
/// ```
/// # use cloudref_names::{ReferenceNode, ResourceKind};
/// let built = ReferenceNode::document("p", "(default)", "users/mike")?;
/// let parsed = ReferenceNode::parse(
///     ResourceKind::Document,
///     "projects/p/databases/(default)/documents/users/mike",
/// )?;
/// assert_eq!(built, parsed);
/// assert_eq!(built.parent()?.kind(), ResourceKind::Collection);
/// # Ok::<(), cloudref_names::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct ReferenceNode {
    kind: ResourceKind,
    project_id: String,
    // For collections and documents: the database id followed by the
    // document path segments.
    ids: Vec<String>,
    name: String,
}

impl ReferenceNode {
    /// Creates a reference from its project and the variable segments of its
    /// name, see [build_path][crate::build_path] for the expected segments.
    ///
    /// Every segment must be non-empty and cannot contain the delimiter.
    pub fn new<P, I, S>(kind: ResourceKind, project_id: P, ids: I) -> Result<Self>
    where
        P: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let project_id = project_id.into();
        check_segment(&project_id)?;
        let ids = ids.into_iter().map(Into::into).collect::<Vec<String>>();
        for id in &ids {
            check_segment(id)?;
        }
        Self::from_parts(kind, project_id, ids)
    }

    pub(crate) fn from_parts(
        kind: ResourceKind,
        project_id: String,
        ids: Vec<String>,
    ) -> Result<Self> {
        let name = build_path(kind, &project_id, &ids)?;
        Ok(Self {
            kind,
            project_id,
            ids,
            name,
        })
    }

    /// Parses a canonical resource name.
    pub fn parse(kind: ResourceKind, name: &str) -> Result<Self> {
        parse_path(kind, name, None)
    }

    /// A reference to `projects/{project_id}`.
    pub fn project<P: Into<String>>(project_id: P) -> Result<Self> {
        Self::new(ResourceKind::Project, project_id, Vec::<String>::new())
    }

    /// A reference to a Bigtable instance.
    pub fn instance<P, I>(project_id: P, instance_id: I) -> Result<Self>
    where
        P: Into<String>,
        I: Into<String>,
    {
        Self::new(ResourceKind::Instance, project_id, [instance_id.into()])
    }

    /// A reference to a Bigtable cluster.
    pub fn cluster<P, I, C>(project_id: P, instance_id: I, cluster_id: C) -> Result<Self>
    where
        P: Into<String>,
        I: Into<String>,
        C: Into<String>,
    {
        Self::new(
            ResourceKind::Cluster,
            project_id,
            [instance_id.into(), cluster_id.into()],
        )
    }

    /// A reference to a Bigtable table.
    pub fn table<P, I, T>(project_id: P, instance_id: I, table_id: T) -> Result<Self>
    where
        P: Into<String>,
        I: Into<String>,
        T: Into<String>,
    {
        Self::new(
            ResourceKind::Table,
            project_id,
            [instance_id.into(), table_id.into()],
        )
    }

    /// A reference to a Bigtable app profile.
    pub fn app_profile<P, I, A>(project_id: P, instance_id: I, app_profile_id: A) -> Result<Self>
    where
        P: Into<String>,
        I: Into<String>,
        A: Into<String>,
    {
        Self::new(
            ResourceKind::AppProfile,
            project_id,
            [instance_id.into(), app_profile_id.into()],
        )
    }

    /// A reference to a location, such as a zone or region.
    pub fn location<P, L>(project_id: P, location_id: L) -> Result<Self>
    where
        P: Into<String>,
        L: Into<String>,
    {
        Self::new(ResourceKind::Location, project_id, [location_id.into()])
    }

    /// A reference to a Firestore database.
    pub fn database<P, D>(project_id: P, database_id: D) -> Result<Self>
    where
        P: Into<String>,
        D: Into<String>,
    {
        Self::new(ResourceKind::Database, project_id, [database_id.into()])
    }

    /// A reference to a Firestore collection, `path` is relative to the
    /// database root (e.g. `users/mike/messages`).
    pub fn collection<P, D>(project_id: P, database_id: D, path: &str) -> Result<Self>
    where
        P: Into<String>,
        D: Into<String>,
    {
        Self::database(project_id, database_id)?.resolve(ResourceKind::Collection, path)
    }

    /// A reference to a Firestore document, `path` is relative to the
    /// database root (e.g. `users/mike`).
    pub fn document<P, D>(project_id: P, database_id: D, path: &str) -> Result<Self>
    where
        P: Into<String>,
        D: Into<String>,
    {
        Self::database(project_id, database_id)?.resolve(ResourceKind::Document, path)
    }

    /// The kind of resource.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// The project containing the resource.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// The canonical name, e.g. `projects/p/instances/i/tables/t`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The variable segments of the name, excluding the project id.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// The last segment of the name.
    pub fn id(&self) -> &str {
        self.ids.last().unwrap_or(&self.project_id)
    }

    /// The database id, for databases, collections, and documents.
    pub fn database_id(&self) -> Option<&str> {
        match self.kind {
            ResourceKind::Database | ResourceKind::Collection | ResourceKind::Document => {
                self.ids.first().map(String::as_str)
            }
            _ => None,
        }
    }

    /// The path of a collection or document relative to the database root,
    /// e.g. `users/mike/messages`.
    pub fn document_path(&self) -> Option<String> {
        self.kind
            .is_document_path()
            .then(|| self.ids[1..].join("/"))
    }

    /// The `projects/{p}/databases/{db}/documents` name for databases,
    /// collections, and documents.
    pub fn documents_root(&self) -> Option<String> {
        self.database_id()
            .map(|db| format!("projects/{}/databases/{db}/documents", self.project_id))
    }

    /// The number of variable segments below the root of the name.
    ///
    /// For databases, collections, and documents this is the number of
    /// segments beneath the `documents` root.
    pub fn depth(&self) -> usize {
        match self.kind {
            ResourceKind::Database | ResourceKind::Collection | ResourceKind::Document => {
                self.ids.len() - 1
            }
            _ => self.ids.len(),
        }
    }

    /// Returns a reference to the parent resource.
    ///
    /// Tables, clusters, and app profiles return their instance; documents
    /// return their collection; collections return the parent document, or
    /// the database for top-level collections.
    ///
    /// Projects are the root of the hierarchy, calling this function on a
    /// project reference returns [Error::RootHasNoParent].
    pub fn parent(&self) -> Result<Self> {
        let mut ids = self.ids.clone();
        ids.pop();
        let kind = if self.kind.is_document_path() {
            kind_at_depth(ids.len() - 1)
        } else {
            match self.kind.parent_kind() {
                Some(k) => k,
                None => return Err(Error::RootHasNoParent(self.name.clone())),
            }
        };
        Self::from_parts(kind, self.project_id.clone(), ids)
    }

    /// Returns a reference to a child resource of kind `kind`.
    ///
    /// When `id_or_path` is `None` a random id is generated. Collections and
    /// documents accept a multi-segment path relative to `self`, the kind
    /// of the combined path must match `kind`:
    ///
    /// ```
    /// # use cloudref_names::{ReferenceNode, ResourceKind};
    /// let messages = ReferenceNode::collection("p", "(default)", "users/mike/messages")?;
    /// let doc = messages.child(ResourceKind::Document, Some("abc123/likes/xyz789"))?;
    /// assert_eq!(doc.id(), "xyz789");
    /// let err = messages.child(ResourceKind::Document, Some("abc123/likes")).unwrap_err();
    /// assert_eq!(err.to_string(), "document_path must refer to a document.");
    /// # Ok::<(), cloudref_names::Error>(())
    /// ```
    pub fn child(&self, kind: ResourceKind, id_or_path: Option<&str>) -> Result<Self> {
        self.child_with(kind, id_or_path, &RandomIds)
    }

    /// Like [child][Self::child], using `generator` when `id_or_path` is
    /// `None`.
    pub fn child_with<G>(
        &self,
        kind: ResourceKind,
        id_or_path: Option<&str>,
        generator: &G,
    ) -> Result<Self>
    where
        G: IdGenerator + ?Sized,
    {
        match id_or_path {
            Some(path) => self.resolve(kind, path),
            None => {
                let id = generator.generate();
                check_segment(&id)?;
                self.resolve(kind, &id)
            }
        }
    }

    /// Resolves `relative` as a resource of kind `kind` beneath `self`.
    pub(crate) fn resolve(&self, kind: ResourceKind, relative: &str) -> Result<Self> {
        let segments = split_segments(relative)?;
        let mut ids = self.ids.clone();
        if kind.is_document_path() {
            let nests = self.kind.is_document_path() || self.kind == ResourceKind::Database;
            if !nests {
                return Err(self.invalid_parent(kind));
            }
            if kind_at_depth(self.depth() + segments.len()) != kind {
                return Err(Error::role(kind));
            }
        } else {
            if kind.parent_kind() != Some(self.kind) {
                return Err(self.invalid_parent(kind));
            }
            if segments.len() != 1 {
                return Err(Error::malformed(
                    relative,
                    format!("a {kind} id is a single segment"),
                ));
            }
        }
        ids.extend(segments.into_iter().map(str::to_string));
        Self::from_parts(kind, self.project_id.clone(), ids)
    }

    pub(crate) fn invalid_parent(&self, child: ResourceKind) -> Error {
        Error::InvalidParent {
            parent: self.name.clone(),
            child,
        }
    }
}

impl PartialEq for ReferenceNode {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ReferenceNode {}

impl Hash for ReferenceNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for ReferenceNode {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ReferenceNode {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name.cmp(&other.name)
    }
}

impl std::fmt::Display for ReferenceNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl AsRef<str> for ReferenceNode {
    fn as_ref(&self) -> &str {
        &self.name
    }
}
