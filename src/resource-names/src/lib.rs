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

//! Resource names for Cloud Bigtable and Firestore.
//!
//! Google Cloud resources are identified by hierarchical, slash-delimited
//! names, such as `projects/my-project/instances/my-instance/tables/my-table`
//! or `projects/my-project/databases/(default)/documents/users/mike`. This
//! crate builds, parses, and validates such names, and models references to
//! the resources they identify.
//!
//! None of the types in this crate perform any I/O. A [ReferenceNode] is a
//! value: it can be compared, hashed, and used to derive its parent and its
//! children, long before (or without ever) making a request.
//!
//! # Example
//! ```
//! # use cloudref_names::{ReferenceNode, ResourceKind};
//! let instance = ReferenceNode::instance("my-project", "my-instance")?;
//! let table = instance.child(ResourceKind::Table, Some("my-table"))?;
//! assert_eq!(
//!     table.name(),
//!     "projects/my-project/instances/my-instance/tables/my-table"
//! );
//! assert_eq!(table.parent()?, instance);
//! # Ok::<(), cloudref_names::Error>(())
//! ```

mod auto_id;
mod error;
mod kind;
mod location;
mod path;
mod reference;

pub use auto_id::{AUTO_ID_LENGTH, IdGenerator, RandomIds};
pub use error::Error;
pub use kind::{ResourceKind, kind_at_depth};
pub use location::qualify_location;
pub use path::{DEFAULT_DATABASE, build_path, parse_path};
pub use reference::ReferenceNode;

/// The delimiter between segments in a resource name.
pub const DELIMITER: char = '/';

/// An alias of [std::result::Result] where the error is always [Error].
pub type Result<T> = std::result::Result<T, Error>;
