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

//! Contains the Firestore client and related types.

use crate::Result;
use crate::reference::{CollectionReference, DocumentReference};
use gax::client_builder::Result as BuilderResult;
use gax::client_builder::internal::{ClientConfig, connect, resolve_endpoint, resolve_project};
use gax::forwarder::Forwarder;
use names::{DEFAULT_DATABASE, IdGenerator, RandomIds, ReferenceNode, ResourceKind, parse_path};
use std::sync::Arc;

/// The default endpoint for the Firestore API.
pub const DEFAULT_ENDPOINT: &str = "https://firestore.googleapis.com";

/// The environment variable naming the Firestore emulator host.
pub const EMULATOR_VAR: &str = "FIRESTORE_EMULATOR_HOST";

/// Implements a client for the Cloud Firestore API.
///
/// # Example
/// ```
/// # use cloudref_firestore::client::Firestore;
/// # use gax::client_builder::examples::Echo;
/// # tokio_test::block_on(async {
/// let client = Firestore::builder()
///     .with_project("my-project")
///     .with_invoker(Echo)
///     .build()
///     .await?;
/// let messages = client.collection("users/mike/messages")?;
/// let doc = messages.doc("abc123")?;
/// assert_eq!(doc.path(), "users/mike/messages/abc123");
/// # anyhow::Ok(()) });
/// ```
///
/// # Configuration
///
/// To configure `Firestore` use the `with_*` methods in the type returned
/// by [builder()][Firestore::builder]. Common configuration changes include
///
/// * [with_project()]: by default this client uses the project in the
///   `GOOGLE_CLOUD_PROJECT` environment variable.
/// * [with_endpoint()]: by default this client uses the global default
///   endpoint (`https://firestore.googleapis.com`). When the
///   `FIRESTORE_EMULATOR_HOST` environment variable is set, the client uses
///   the emulator.
///
/// The client uses the `(default)` database, use
/// [with_database()][Firestore::with_database] to access other databases.
///
/// # Pooling and Cloning
///
/// `Firestore` holds a single transport handle, created when the client is
/// built. Cloning the client is cheap, the clones share the handle. The
/// collection and document references hold a clone of the client.
///
/// [with_project()]: gax::client_builder::ClientBuilder::with_project
/// [with_endpoint()]: gax::client_builder::ClientBuilder::with_endpoint
#[derive(Clone)]
pub struct Firestore {
    database: ReferenceNode,
    forwarder: Forwarder,
    ids: Arc<dyn IdGenerator>,
}

/// A builder for [Firestore].
pub type ClientBuilder = gax::client_builder::ClientBuilder<Factory>;

#[doc(hidden)]
pub struct Factory;

impl gax::client_builder::internal::ClientFactory for Factory {
    type Client = Firestore;
    async fn build(self, config: ClientConfig) -> BuilderResult<Self::Client> {
        Self::Client::new(config).await
    }
}

impl Firestore {
    /// Returns a builder for [Firestore].
    pub fn builder() -> ClientBuilder {
        gax::client_builder::internal::new_builder(Factory)
    }

    async fn new(config: ClientConfig) -> BuilderResult<Self> {
        let database = resolve_project(&config).and_then(|p| {
            ReferenceNode::database(p, DEFAULT_DATABASE)
                .map_err(gax::client_builder::Error::invalid_project)
        })?;
        let endpoint = resolve_endpoint(&config, DEFAULT_ENDPOINT, EMULATOR_VAR);
        tracing::debug!(database = %database, %endpoint, "creating Firestore client");
        let forwarder = connect(&config, &endpoint).await?;
        Ok(Self {
            database,
            forwarder,
            ids: Arc::new(RandomIds),
        })
    }

    /// The database used by this client.
    pub fn database(&self) -> &ReferenceNode {
        &self.database
    }

    /// Returns a client for a different database in the same project.
    ///
    /// The new client shares the transport handle with `self`.
    pub fn with_database<T: Into<String>>(&self, database_id: T) -> Result<Self> {
        let database = ReferenceNode::database(self.database.project_id(), database_id)?;
        Ok(Self {
            database,
            ..self.clone()
        })
    }

    /// Returns a client using `generator` for the ids of new documents.
    ///
    /// # Example
    /// ```
    /// # use cloudref_firestore::client::Firestore;
    /// # async fn sample(client: &Firestore) -> anyhow::Result<()> {
    /// let client = client.with_id_generator(|| "fixed-id".to_string());
    /// let doc = client.collection("users")?.new_doc()?;
    /// assert_eq!(doc.path(), "users/fixed-id");
    /// # Ok(()) }
    /// ```
    pub fn with_id_generator<G: IdGenerator + 'static>(&self, generator: G) -> Self {
        Self {
            ids: Arc::new(generator),
            ..self.clone()
        }
    }

    /// A reference to a collection.
    ///
    /// `path` is either relative to the database root (e.g.
    /// `users/mike/messages`) or a full resource name in this client's database.
    /// Names in other projects or databases are rejected.
    pub fn collection(&self, path: &str) -> Result<CollectionReference> {
        let node = parse_path(ResourceKind::Collection, path, Some(&self.database))?;
        Ok(CollectionReference::new(self.clone(), node))
    }

    /// A reference to a document.
    ///
    /// `path` is either relative to the database root (e.g.
    /// `users/mike`) or a full resource name in this client's database.
    /// Names in other projects or databases are rejected.
    pub fn doc(&self, path: &str) -> Result<DocumentReference> {
        let node = parse_path(ResourceKind::Document, path, Some(&self.database))?;
        Ok(DocumentReference::new(self.clone(), node))
    }

    pub(crate) fn forwarder(&self) -> &Forwarder {
        &self.forwarder
    }

    pub(crate) fn ids(&self) -> &dyn IdGenerator {
        self.ids.as_ref()
    }
}

impl std::fmt::Debug for Firestore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Firestore")
            .field("database", &self.database)
            .field("forwarder", &self.forwarder)
            .finish_non_exhaustive()
    }
}
