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

/// The kinds of resources with a hierarchical name.
///
/// The kind determines the template used to format the resource name, the
/// number of identifiers required to build it, and the kind of its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ResourceKind {
    /// `projects/{project}`
    Project,
    /// `projects/{project}/instances/{instance}`
    Instance,
    /// `projects/{project}/instances/{instance}/clusters/{cluster}`
    Cluster,
    /// `projects/{project}/instances/{instance}/tables/{table}`
    Table,
    /// `projects/{project}/instances/{instance}/appProfiles/{app_profile}`
    AppProfile,
    /// `projects/{project}/instances/{instance}/clusters/{cluster}/snapshots/{snapshot}`
    Snapshot,
    /// `projects/{project}/instances/{instance}/clusters/{cluster}/backups/{backup}`
    Backup,
    /// `projects/{project}/locations/{location}`
    Location,
    /// `projects/{project}/databases/{database}`
    Database,
    /// `projects/{project}/databases/{database}/documents/{collection}[/{document}/{collection}]...`
    Collection,
    /// `projects/{project}/databases/{database}/documents/{collection}/{document}[/{collection}/{document}]...`
    Document,
}

impl ResourceKind {
    /// The literal tokens between `projects/{project}` and the resource id.
    ///
    /// Each literal is followed by one identifier. For collections and
    /// documents this covers the database prefix only, the (variable length)
    /// document path follows the `documents` root.
    pub(crate) fn literals(&self) -> &'static [&'static str] {
        match self {
            Self::Project => &[],
            Self::Instance => &["instances"],
            Self::Cluster => &["instances", "clusters"],
            Self::Table => &["instances", "tables"],
            Self::AppProfile => &["instances", "appProfiles"],
            Self::Snapshot => &["instances", "clusters", "snapshots"],
            Self::Backup => &["instances", "clusters", "backups"],
            Self::Location => &["locations"],
            Self::Database | Self::Collection | Self::Document => &["databases"],
        }
    }

    /// Returns true for kinds named by a variable-length document path.
    pub fn is_document_path(&self) -> bool {
        matches!(self, Self::Collection | Self::Document)
    }

    /// The kind of the parent resource, for kinds with a fixed template.
    ///
    /// Collections and documents return `None`: their parent depends on the
    /// depth of the document path, see [kind_at_depth]. Projects are the
    /// root of the hierarchy and also return `None`.
    pub fn parent_kind(&self) -> Option<ResourceKind> {
        match self {
            Self::Project | Self::Collection | Self::Document => None,
            Self::Instance | Self::Location | Self::Database => Some(Self::Project),
            Self::Cluster | Self::Table | Self::AppProfile => Some(Self::Instance),
            Self::Snapshot | Self::Backup => Some(Self::Cluster),
        }
    }

    /// The name used for this kind in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Instance => "instance",
            Self::Cluster => "cluster",
            Self::Table => "table",
            Self::AppProfile => "app_profile",
            Self::Snapshot => "snapshot",
            Self::Backup => "backup",
            Self::Location => "location",
            Self::Database => "database",
            Self::Collection => "collection",
            Self::Document => "document",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a document path by the number of segments beneath the
/// `documents` root.
///
/// This is the only place where the parity rule is applied:
/// - zero segments is the database root,
/// - an odd number of segments is a collection,
/// - an even (non-zero) number of segments is a document.
///
/// # Example
/// ```
/// # use cloudref_names::{ResourceKind, kind_at_depth};
/// assert_eq!(kind_at_depth(0), ResourceKind::Database);
/// assert_eq!(kind_at_depth(1), ResourceKind::Collection);
/// assert_eq!(kind_at_depth(2), ResourceKind::Document);
/// ```
pub fn kind_at_depth(depth: usize) -> ResourceKind {
    match depth {
        0 => ResourceKind::Database,
        d if d % 2 == 1 => ResourceKind::Collection,
        _ => ResourceKind::Document,
    }
}
