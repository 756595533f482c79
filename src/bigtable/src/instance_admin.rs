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

use crate::model::{
    AppProfile, Cluster, CreateAppProfileRequest, CreateClusterRequest, CreateInstanceRequest,
    Empty, Instance, ListAppProfilesResponse, ListClustersResponse, ListInstancesResponse,
    Operation,
};
use crate::operations::*;
use gax::forwarder::{Call, Forwarder, ListCall};
use names::ReferenceNode;
use serde_json::json;

/// Administers instances, clusters, and app profiles.
///
/// Obtain one from [Bigtable::instance_admin][crate::client::Bigtable::instance_admin].
///
/// Every function returns a request builder, use its `send()` function to
/// make the request. The resource references are validated before any
/// request is made, passing (for example) a table where an instance is
/// expected fails without contacting the service.
///
/// # Example
/// ```
/// # use cloudref_bigtable::client::Bigtable;
/// # use cloudref_bigtable::model::{Cluster, Instance, StorageType};
/// # async fn sample(client: &Bigtable) -> anyhow::Result<()> {
/// let admin = client.instance_admin();
/// let operation = admin
///     .create_instance(
///         "my-instance",
///         Instance::new().set_display_name("My Instance"),
///         [(
///             "my-cluster",
///             Cluster::new()
///                 .set_location("us-east1-b")
///                 .set_serve_nodes(3)
///                 .set_default_storage_type(StorageType::Ssd),
///         )],
///     )
///     .send()
///     .await?;
/// println!("started {}", operation.name);
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct BigtableInstanceAdmin {
    project: ReferenceNode,
    forwarder: Forwarder,
}

impl BigtableInstanceAdmin {
    pub(crate) fn new(project: ReferenceNode, forwarder: Forwarder) -> Self {
        Self { project, forwarder }
    }

    /// Creates an instance and its clusters, in the client's project.
    ///
    /// Cluster locations may be bare zones, they are qualified with the
    /// client's project.
    pub fn create_instance<I, C, K>(
        &self,
        instance_id: I,
        instance: Instance,
        clusters: C,
    ) -> Call<Operation>
    where
        I: Into<String>,
        C: IntoIterator<Item = (K, Cluster)>,
        K: Into<String>,
    {
        let body = CreateInstanceRequest {
            instance_id: instance_id.into(),
            instance,
            clusters: clusters.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        };
        Call::new(self.forwarder.clone(), &CREATE_INSTANCE, self.project.clone(), body)
    }

    /// Gets information about an instance.
    pub fn get_instance(&self, instance: &ReferenceNode) -> Call<Instance> {
        Call::new(self.forwarder.clone(), &GET_INSTANCE, instance.clone(), json!({}))
    }

    /// Lists the instances in the client's project.
    pub fn list_instances(&self) -> ListCall<ListInstancesResponse> {
        ListCall::new(self.forwarder.clone(), &LIST_INSTANCES, self.project.clone(), json!({}))
    }

    /// Deletes an instance from a project.
    pub fn delete_instance(&self, instance: &ReferenceNode) -> Call<Empty> {
        Call::new(self.forwarder.clone(), &DELETE_INSTANCE, instance.clone(), json!({}))
    }

    /// Creates a cluster within an instance.
    ///
    /// The cluster location may be a bare zone, it is qualified with the
    /// instance's project.
    pub fn create_cluster<T: Into<String>>(
        &self,
        instance: &ReferenceNode,
        cluster_id: T,
        cluster: Cluster,
    ) -> Call<Operation> {
        let body = CreateClusterRequest {
            cluster_id: cluster_id.into(),
            cluster,
        };
        Call::new(self.forwarder.clone(), &CREATE_CLUSTER, instance.clone(), body)
    }

    /// Gets information about a cluster.
    pub fn get_cluster(&self, cluster: &ReferenceNode) -> Call<Cluster> {
        Call::new(self.forwarder.clone(), &GET_CLUSTER, cluster.clone(), json!({}))
    }

    /// Lists information about clusters in an instance.
    pub fn list_clusters(&self, instance: &ReferenceNode) -> ListCall<ListClustersResponse> {
        ListCall::new(self.forwarder.clone(), &LIST_CLUSTERS, instance.clone(), json!({}))
    }

    /// Deletes a cluster from an instance.
    pub fn delete_cluster(&self, cluster: &ReferenceNode) -> Call<Empty> {
        Call::new(self.forwarder.clone(), &DELETE_CLUSTER, cluster.clone(), json!({}))
    }

    /// Creates an app profile within an instance.
    pub fn create_app_profile<T: Into<String>>(
        &self,
        instance: &ReferenceNode,
        app_profile_id: T,
        app_profile: AppProfile,
    ) -> Call<AppProfile> {
        let body = CreateAppProfileRequest {
            app_profile_id: app_profile_id.into(),
            app_profile,
            ignore_warnings: false,
        };
        Call::new(self.forwarder.clone(), &CREATE_APP_PROFILE, instance.clone(), body)
    }

    /// Gets information about an app profile.
    pub fn get_app_profile(&self, app_profile: &ReferenceNode) -> Call<AppProfile> {
        Call::new(self.forwarder.clone(), &GET_APP_PROFILE, app_profile.clone(), json!({}))
    }

    /// Lists information about app profiles in an instance.
    pub fn list_app_profiles(&self, instance: &ReferenceNode) -> ListCall<ListAppProfilesResponse> {
        ListCall::new(self.forwarder.clone(), &LIST_APP_PROFILES, instance.clone(), json!({}))
    }

    /// Deletes an app profile from an instance.
    ///
    /// Any warnings about deleting an app profile still in use are ignored.
    pub fn delete_app_profile(&self, app_profile: &ReferenceNode) -> Call<Empty> {
        Call::new(
            self.forwarder.clone(),
            &DELETE_APP_PROFILE,
            app_profile.clone(),
            json!({"ignoreWarnings": true}),
        )
    }
}
