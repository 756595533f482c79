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

//! The operations used by the Firestore references.

use gax::forwarder::{OperationDescriptor, Rewrite};
use names::ResourceKind;

pub(crate) const GET_DOCUMENT: OperationDescriptor =
    OperationDescriptor::new("GetDocument", ResourceKind::Document, "/name");

// Creates use the same RPC, with a precondition on the document.
pub(crate) const UPDATE_DOCUMENT: OperationDescriptor =
    OperationDescriptor::new("UpdateDocument", ResourceKind::Document, "/document/name");

pub(crate) const DELETE_DOCUMENT: OperationDescriptor =
    OperationDescriptor::new("DeleteDocument", ResourceKind::Document, "/name");

pub(crate) const LIST_DOCUMENTS: OperationDescriptor =
    OperationDescriptor::new("ListDocuments", ResourceKind::Collection, "/parent").with_rewrites(
        &[Rewrite::SplitName {
            from: "/parent",
            into: "/collectionId",
        }],
    );

pub(crate) const LIST_COLLECTION_IDS: OperationDescriptor =
    OperationDescriptor::new("ListCollectionIds", ResourceKind::Document, "/parent");
