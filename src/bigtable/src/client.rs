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

//! Contains the Bigtable client and related types.

use crate::Result;
use gax::client_builder::Result as BuilderResult;
use gax::client_builder::internal::{ClientConfig, connect, resolve_endpoint, resolve_project};
use names::ReferenceNode;

pub use crate::data::BigtableData;
pub use crate::instance_admin::BigtableInstanceAdmin;
pub use crate::table_admin::BigtableTableAdmin;

/// The default endpoint for the admin APIs.
pub const ADMIN_ENDPOINT: &str = "https://bigtableadmin.googleapis.com";

/// The default endpoint for the data API.
pub const DATA_ENDPOINT: &str = "https://bigtable.googleapis.com";

/// The environment variable naming the Bigtable emulator host.
pub const EMULATOR_VAR: &str = "BIGTABLE_EMULATOR_HOST";

/// Implements a client for the Cloud Bigtable API.
///
/// # Example
/// ```
/// # use cloudref_bigtable::client::Bigtable;
/// # use gax::client_builder::examples::Echo;
/// # tokio_test::block_on(async {
/// let client = Bigtable::builder()
///     .with_project("my-project")
///     .with_invoker(Echo)
///     .build()
///     .await?;
/// let table = client.table("my-instance", "my-table")?;
/// assert_eq!(
///     table.name(),
///     "projects/my-project/instances/my-instance/tables/my-table"
/// );
/// # anyhow::Ok(()) });
/// ```
///
/// # Configuration
///
/// To configure `Bigtable` use the `with_*` methods in the type returned
/// by [builder()][Bigtable::builder]. Common configuration changes include
///
/// * [with_project()]: by default this client uses the project in the
///   `GOOGLE_CLOUD_PROJECT` environment variable.
/// * [with_endpoint()]: by default this client uses the global default
///   endpoints (`https://bigtableadmin.googleapis.com` for the admin APIs
///   and `https://bigtable.googleapis.com` for the data API). When the
///   `BIGTABLE_EMULATOR_HOST` environment variable is set, all the APIs use
///   the emulator.
/// * [with_operation_timeout()]: `DropRowRange` uses a one hour timeout by
///   default, applications can change it.
///
/// # Pooling and Cloning
///
/// `Bigtable` creates one transport handle for each API (instance admin,
/// table admin, and data) when it is built. Cloning the client is cheap, the
/// clones share these handles.
///
/// [with_project()]: gax::client_builder::ClientBuilder::with_project
/// [with_endpoint()]: gax::client_builder::ClientBuilder::with_endpoint
/// [with_operation_timeout()]: gax::client_builder::ClientBuilder::with_operation_timeout
#[derive(Clone, Debug)]
pub struct Bigtable {
    project: ReferenceNode,
    instance_admin: BigtableInstanceAdmin,
    table_admin: BigtableTableAdmin,
    data: BigtableData,
}

/// A builder for [Bigtable].
pub type ClientBuilder = gax::client_builder::ClientBuilder<Factory>;

#[doc(hidden)]
pub struct Factory;

impl gax::client_builder::internal::ClientFactory for Factory {
    type Client = Bigtable;
    async fn build(self, config: ClientConfig) -> BuilderResult<Self::Client> {
        Self::Client::new(config).await
    }
}

impl Bigtable {
    /// Returns a builder for [Bigtable].
    pub fn builder() -> ClientBuilder {
        gax::client_builder::internal::new_builder(Factory)
    }

    async fn new(config: ClientConfig) -> BuilderResult<Self> {
        let project = resolve_project(&config).and_then(|p| {
            ReferenceNode::project(p).map_err(gax::client_builder::Error::invalid_project)
        })?;
        let admin_endpoint = resolve_endpoint(&config, ADMIN_ENDPOINT, EMULATOR_VAR);
        let data_endpoint = resolve_endpoint(&config, DATA_ENDPOINT, EMULATOR_VAR);
        tracing::debug!(
            project = %project,
            %admin_endpoint,
            %data_endpoint,
            "creating Bigtable client"
        );
        let instance_admin = connect(&config, &admin_endpoint).await?;
        let table_admin = connect(&config, &admin_endpoint).await?;
        let data = connect(&config, &data_endpoint).await?;
        Ok(Self {
            instance_admin: BigtableInstanceAdmin::new(project.clone(), instance_admin),
            table_admin: BigtableTableAdmin::new(table_admin),
            data: BigtableData::new(data),
            project,
        })
    }

    /// The project used by this client.
    pub fn project(&self) -> &ReferenceNode {
        &self.project
    }

    /// A reference to an instance in the client's project.
    pub fn instance(&self, instance_id: &str) -> Result<ReferenceNode> {
        Ok(ReferenceNode::instance(self.project.project_id(), instance_id)?)
    }

    /// A reference to a cluster in the client's project.
    pub fn cluster(&self, instance_id: &str, cluster_id: &str) -> Result<ReferenceNode> {
        Ok(ReferenceNode::cluster(
            self.project.project_id(),
            instance_id,
            cluster_id,
        )?)
    }

    /// A reference to a table in the client's project.
    pub fn table(&self, instance_id: &str, table_id: &str) -> Result<ReferenceNode> {
        Ok(ReferenceNode::table(self.project.project_id(), instance_id, table_id)?)
    }

    /// A reference to an app profile in the client's project.
    pub fn app_profile(&self, instance_id: &str, app_profile_id: &str) -> Result<ReferenceNode> {
        Ok(ReferenceNode::app_profile(
            self.project.project_id(),
            instance_id,
            app_profile_id,
        )?)
    }

    /// The client for instance, cluster, and app profile administration.
    pub fn instance_admin(&self) -> &BigtableInstanceAdmin {
        &self.instance_admin
    }

    /// The client for table administration.
    pub fn table_admin(&self) -> &BigtableTableAdmin {
        &self.table_admin
    }

    /// The client for reading and writing data.
    pub fn data(&self) -> &BigtableData {
        &self.data
    }
}
