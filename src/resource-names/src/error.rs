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

use crate::ResourceKind;

/// Problems detected while building, parsing, or deriving resource names.
///
/// All these errors are detected locally, before any request is made. They
/// are never transient, retrying the same operation with the same inputs
/// fails in the same way.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The input does not match the expected template.
    ///
    /// The literal tokens (e.g. `instances`, `documents`) may be missing or
    /// out of place, the number of segments may be wrong for the requested
    /// kind, or some segment may be empty.
    #[error("malformed resource name `{path}`: {reason}")]
    MalformedPath { path: String, reason: String },

    /// The resolved name denotes a resource of the wrong kind.
    ///
    /// The message names the expected role, for example
    /// `document_path must refer to a document.`
    #[error("{0}")]
    Argument(String),

    /// Projects have no parent resource.
    #[error("the root resource `{0}` has no parent")]
    RootHasNoParent(String),

    /// A resource of kind `child` cannot live under `parent`.
    #[error("a {child} cannot be a child of `{parent}`")]
    InvalidParent { parent: String, child: ResourceKind },
}

impl Error {
    pub(crate) fn malformed<P, R>(path: P, reason: R) -> Self
    where
        P: Into<String>,
        R: Into<String>,
    {
        Self::MalformedPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// The error reported when a resolved name has the wrong parity for `want`.
    pub(crate) fn role(want: ResourceKind) -> Self {
        Self::Argument(format!("{want}_path must refer to a {want}."))
    }

    /// Returns true if the input did not match the expected template.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedPath { .. })
    }

    /// Returns true if the resolved name denotes the wrong kind of resource.
    pub fn is_argument(&self) -> bool {
        matches!(self, Self::Argument(_))
    }
}
