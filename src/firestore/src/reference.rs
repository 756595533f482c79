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

//! References to collections and documents.

use crate::Result;
use crate::client::Firestore;
use crate::model::{
    Document, Empty, ListCollectionIdsResponse, ListDocumentsResponse, Precondition,
    UpdateDocumentRequest, Value,
};
use crate::operations::*;
use gax::forwarder::{Call, ListCall};
use names::{ReferenceNode, ResourceKind, parse_path};
use serde_json::json;
use std::hash::{Hash, Hasher};

/// A reference to a collection in a Firestore database.
///
/// Creating a reference never contacts the service, the collection may or
/// may not exist. Two references are equal if they name the same
/// collection.
///
/// # Example
/// ```
/// # use cloudref_firestore::client::Firestore;
/// # async fn sample(client: &Firestore) -> anyhow::Result<()> {
/// let messages = client.collection("users/mike/messages")?;
/// let (doc, _) = messages.add([("text", "Hello")]).await?;
/// println!("created {}", doc.path());
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct CollectionReference {
    client: Firestore,
    node: ReferenceNode,
}

impl CollectionReference {
    pub(crate) fn new(client: Firestore, node: ReferenceNode) -> Self {
        Self { client, node }
    }

    /// The underlying resource reference.
    pub fn reference(&self) -> &ReferenceNode {
        &self.node
    }

    /// The collection id, e.g. `messages` for `users/mike/messages`.
    pub fn id(&self) -> &str {
        self.node.id()
    }

    /// The full resource name.
    pub fn name(&self) -> &str {
        self.node.name()
    }

    /// The path relative to the database root, e.g. `users/mike/messages`.
    pub fn path(&self) -> String {
        self.node.document_path().unwrap_or_default()
    }

    /// The document containing this collection, `None` for top-level
    /// collections.
    pub fn parent(&self) -> Option<DocumentReference> {
        self.node
            .parent()
            .ok()
            .filter(|p| p.kind() == ResourceKind::Document)
            .map(|p| DocumentReference::new(self.client.clone(), p))
    }

    /// A reference to a document in this collection.
    ///
    /// `path` may have multiple segments, as long as the combined path
    /// names a document:
    ///
    /// ```
    /// # use cloudref_firestore::client::Firestore;
    /// # fn sample(client: &Firestore) -> anyhow::Result<()> {
    /// let messages = client.collection("users/mike/messages")?;
    /// let like = messages.doc("abc123/likes/xyz789")?;
    /// assert_eq!(like.path(), "users/mike/messages/abc123/likes/xyz789");
    /// assert!(messages.doc("abc123/likes").is_err());
    /// # Ok(()) }
    /// ```
    pub fn doc(&self, path: &str) -> Result<DocumentReference> {
        let node = parse_path(ResourceKind::Document, path, Some(&self.node))?;
        Ok(DocumentReference::new(self.client.clone(), node))
    }

    /// A reference to a new document in this collection, with a generated id.
    pub fn new_doc(&self) -> Result<DocumentReference> {
        let node = self
            .node
            .child_with(ResourceKind::Document, None, self.client.ids())?;
        Ok(DocumentReference::new(self.client.clone(), node))
    }

    /// Lists the documents in this collection.
    pub fn list_documents(&self) -> ListCall<ListDocumentsResponse> {
        ListCall::new(
            self.client.forwarder().clone(),
            &LIST_DOCUMENTS,
            self.node.clone(),
            json!({}),
        )
    }

    /// Creates a document with a generated id and the given fields.
    ///
    /// Returns the reference to the new document, and the document as
    /// returned by the service.
    pub async fn add<T, K, V>(&self, fields: T) -> Result<(DocumentReference, Document)>
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let doc = self.new_doc()?;
        let created = doc.create(fields).send().await?;
        Ok((doc, created))
    }
}

impl PartialEq for CollectionReference {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for CollectionReference {}

impl Hash for CollectionReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state)
    }
}

/// A reference to a document in a Firestore database.
///
/// Creating a reference never contacts the service, the document may or may
/// not exist. Two references are equal if they name the same document.
///
/// # Example
/// ```
/// # use cloudref_firestore::client::Firestore;
/// # async fn sample(client: &Firestore) -> anyhow::Result<()> {
/// let mike = client.doc("users/mike")?;
/// mike.set([("name", "Mike"), ("city", "Paris")]).send().await?;
/// let snapshot = mike.get().send().await?;
/// println!("{snapshot:?}");
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct DocumentReference {
    client: Firestore,
    node: ReferenceNode,
}

impl DocumentReference {
    pub(crate) fn new(client: Firestore, node: ReferenceNode) -> Self {
        Self { client, node }
    }

    /// The underlying resource reference.
    pub fn reference(&self) -> &ReferenceNode {
        &self.node
    }

    /// The document id, e.g. `mike` for `users/mike`.
    pub fn id(&self) -> &str {
        self.node.id()
    }

    /// The full resource name.
    pub fn name(&self) -> &str {
        self.node.name()
    }

    /// The path relative to the database root, e.g. `users/mike`.
    pub fn path(&self) -> String {
        self.node.document_path().unwrap_or_default()
    }

    /// The collection containing this document.
    pub fn parent(&self) -> Result<CollectionReference> {
        let node = self.node.parent()?;
        Ok(CollectionReference::new(self.client.clone(), node))
    }

    /// A reference to a subcollection of this document.
    pub fn collection(&self, path: &str) -> Result<CollectionReference> {
        let node = parse_path(ResourceKind::Collection, path, Some(&self.node))?;
        Ok(CollectionReference::new(self.client.clone(), node))
    }

    /// Gets the document.
    pub fn get(&self) -> Call<Document> {
        Call::new(
            self.client.forwarder().clone(),
            &GET_DOCUMENT,
            self.node.clone(),
            json!({}),
        )
    }

    /// Creates the document, failing if it already exists.
    pub fn create<T, K, V>(&self, fields: T) -> Call<Document>
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.update(fields, Some(Precondition { exists: false }))
    }

    /// Replaces the document, creating it if needed.
    pub fn set<T, K, V>(&self, fields: T) -> Call<Document>
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.update(fields, None)
    }

    /// Deletes the document.
    pub fn delete(&self) -> Call<Empty> {
        Call::new(
            self.client.forwarder().clone(),
            &DELETE_DOCUMENT,
            self.node.clone(),
            json!({}),
        )
    }

    /// Lists the ids of the subcollections of this document.
    pub fn list_collection_ids(&self) -> ListCall<ListCollectionIdsResponse> {
        ListCall::new(
            self.client.forwarder().clone(),
            &LIST_COLLECTION_IDS,
            self.node.clone(),
            json!({}),
        )
    }

    fn update<T, K, V>(&self, fields: T, current_document: Option<Precondition>) -> Call<Document>
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let body = UpdateDocumentRequest {
            document: Document::new().set_fields(fields),
            current_document,
        };
        Call::new(
            self.client.forwarder().clone(),
            &UPDATE_DOCUMENT,
            self.node.clone(),
            body,
        )
    }
}

impl PartialEq for DocumentReference {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for DocumentReference {}

impl Hash for DocumentReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state)
    }
}
