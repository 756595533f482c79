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

//! The messages sent to, and received from, Cloud Bigtable.
//!
//! These types serialize to the JSON representation of the service protos.
//! Fields not set by the service take their default values.

use gax::error::rpc::Status;
use gax::paginator::PageableResponse;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A collection of Bigtable [Table]s and the resources that serve them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Instance {
    /// The unique name of the instance, set by the service.
    ///
    /// Values are of the form `projects/{project}/instances/{instance}`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// The descriptive name for this instance as it appears in UIs.
    pub display_name: String,

    /// The current state of the instance.
    pub state: InstanceState,

    /// The type of the instance.
    #[serde(rename = "type")]
    pub instance_type: InstanceType,

    /// Labels are a flexible and lightweight mechanism for organizing cloud
    /// resources into groups that reflect a customer's organizational needs.
    pub labels: HashMap<String, String>,
}

impl Instance {
    pub fn new() -> Self {
        std::default::Default::default()
    }

    /// Sets the value of [display_name][Instance::display_name].
    pub fn set_display_name<T: Into<String>>(mut self, v: T) -> Self {
        self.display_name = v.into();
        self
    }

    /// Sets the value of [instance_type][Instance::instance_type].
    pub fn set_instance_type<T: Into<InstanceType>>(mut self, v: T) -> Self {
        self.instance_type = v.into();
        self
    }

    /// Sets the value of [labels][Instance::labels].
    pub fn set_labels<T, K, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.labels = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }
}

/// Possible states of an instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum InstanceState {
    /// The state of the instance could not be determined.
    #[default]
    StateNotKnown,
    /// The instance has been successfully created and can serve requests.
    Ready,
    /// The instance is currently being created.
    Creating,
}

/// The type of the instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum InstanceType {
    #[default]
    TypeUnspecified,
    Production,
    Development,
}

/// A resizable group of nodes in a particular cloud location.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Cluster {
    /// The unique name of the cluster, set by the service.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// The location where this cluster's nodes and storage reside.
    ///
    /// Applications may use a bare zone (`us-east1-b`) when creating a
    /// cluster, the client qualifies it as
    /// `projects/{project}/locations/{zone}`.
    pub location: String,

    /// The current state of the cluster.
    pub state: ClusterState,

    /// The number of nodes allocated to this cluster.
    pub serve_nodes: i32,

    /// The type of storage used by this cluster to serve its parent
    /// instance's tables.
    pub default_storage_type: StorageType,
}

impl Cluster {
    pub fn new() -> Self {
        std::default::Default::default()
    }

    /// Sets the value of [location][Cluster::location].
    pub fn set_location<T: Into<String>>(mut self, v: T) -> Self {
        self.location = v.into();
        self
    }

    /// Sets the value of [serve_nodes][Cluster::serve_nodes].
    pub fn set_serve_nodes(mut self, v: i32) -> Self {
        self.serve_nodes = v;
        self
    }

    /// Sets the value of [default_storage_type][Cluster::default_storage_type].
    pub fn set_default_storage_type<T: Into<StorageType>>(mut self, v: T) -> Self {
        self.default_storage_type = v.into();
        self
    }
}

/// Possible states of a cluster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ClusterState {
    #[default]
    StateNotKnown,
    Ready,
    Creating,
    Resizing,
    Disabled,
}

/// Storage media types for persisting Bigtable data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum StorageType {
    #[default]
    StorageTypeUnspecified,
    Ssd,
    Hdd,
}

/// A configuration object describing how Cloud Bigtable should treat traffic
/// from a particular end user application.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct AppProfile {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Strongly validated etag for optimistic concurrency control.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub etag: String,

    /// Long form description of the use case for this app profile.
    pub description: String,

    /// Route requests to the nearest available cluster.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_cluster_routing_use_any: Option<MultiClusterRoutingUseAny>,

    /// Route requests to a single cluster.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_cluster_routing: Option<SingleClusterRouting>,
}

impl AppProfile {
    pub fn new() -> Self {
        std::default::Default::default()
    }

    /// Sets the value of [description][AppProfile::description].
    pub fn set_description<T: Into<String>>(mut self, v: T) -> Self {
        self.description = v.into();
        self
    }

    /// Routes requests to the nearest available cluster.
    pub fn set_multi_cluster_routing(mut self) -> Self {
        self.multi_cluster_routing_use_any = Some(MultiClusterRoutingUseAny::default());
        self.single_cluster_routing = None;
        self
    }

    /// Routes all requests to `cluster_id`.
    pub fn set_single_cluster_routing<T: Into<String>>(
        mut self,
        cluster_id: T,
        allow_transactional_writes: bool,
    ) -> Self {
        self.single_cluster_routing = Some(SingleClusterRouting {
            cluster_id: cluster_id.into(),
            allow_transactional_writes,
        });
        self.multi_cluster_routing_use_any = None;
        self
    }
}

/// Read/write requests are routed to the nearest cluster in the instance.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct MultiClusterRoutingUseAny {
    /// The set of clusters to route to. Empty means all clusters.
    pub cluster_ids: Vec<String>,
}

/// Unconditionally routes all read/write requests to a specific cluster.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct SingleClusterRouting {
    pub cluster_id: String,
    pub allow_transactional_writes: bool,
}

/// A collection of user data indexed by row, column, and timestamp.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Table {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// The column families configured for this table, mapped by column
    /// family id.
    pub column_families: HashMap<String, ColumnFamily>,
}

impl Table {
    pub fn new() -> Self {
        std::default::Default::default()
    }

    /// Adds a column family to the table.
    pub fn add_column_family<T: Into<String>>(mut self, id: T, family: ColumnFamily) -> Self {
        self.column_families.insert(id.into(), family);
        self
    }
}

/// A set of columns within a table which share a common configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ColumnFamily {
    /// Garbage collection rule specified as a protobuf.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gc_rule: Option<GcRule>,
}

impl ColumnFamily {
    pub fn new() -> Self {
        std::default::Default::default()
    }

    /// Sets the value of [gc_rule][ColumnFamily::gc_rule].
    pub fn set_gc_rule(mut self, v: GcRule) -> Self {
        self.gc_rule = Some(v);
        self
    }
}

/// Rule for determining which cells to delete during garbage collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum GcRule {
    /// Delete all cells in a column except the most recent N.
    MaxNumVersions(i32),
    /// Delete cells older than the given duration, e.g. `"86400s"`.
    MaxAge(String),
}

/// A snapshot of a table at a particular time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Snapshot {
    pub name: String,
    pub source_table: Option<Table>,
    pub create_time: String,
    pub description: String,
}

/// A backup of a Cloud Bigtable table.
#[serde_with::serde_as]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Backup {
    pub name: String,
    /// The name of the table from which this backup was created.
    pub source_table: String,
    pub expire_time: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub size_bytes: i64,
}

/// This resource represents a long-running operation that is the result of
/// a network API call.
///
/// The clients do not poll operations, applications can examine the `name`
/// and query the operation with their own tooling.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Operation {
    pub name: String,
    pub metadata: Option<serde_json::Value>,
    pub done: bool,
    pub error: Option<Status>,
    pub response: Option<serde_json::Value>,
}

/// A generic empty message.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Empty {}

/// Specifies a particular change to be made to the contents of a row.
#[serde_with::serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum Mutation {
    /// Set a cell's value.
    #[serde(rename_all = "camelCase")]
    SetCell {
        family_name: String,
        #[serde_as(as = "serde_with::base64::Base64")]
        column_qualifier: bytes::Bytes,
        #[serde_as(as = "serde_with::DisplayFromStr")]
        timestamp_micros: i64,
        #[serde_as(as = "serde_with::base64::Base64")]
        value: bytes::Bytes,
    },
    /// Delete all cells in a column.
    #[serde(rename_all = "camelCase")]
    DeleteFromColumn {
        family_name: String,
        #[serde_as(as = "serde_with::base64::Base64")]
        column_qualifier: bytes::Bytes,
    },
    /// Delete all cells in a column family.
    #[serde(rename_all = "camelCase")]
    DeleteFromFamily { family_name: String },
    /// Delete all cells in the row.
    DeleteFromRow {},
}

impl Mutation {
    /// Sets a cell using the server time.
    pub fn set_cell<F, Q, V>(family_name: F, column_qualifier: Q, value: V) -> Self
    where
        F: Into<String>,
        Q: Into<bytes::Bytes>,
        V: Into<bytes::Bytes>,
    {
        Self::SetCell {
            family_name: family_name.into(),
            column_qualifier: column_qualifier.into(),
            timestamp_micros: -1,
            value: value.into(),
        }
    }
}

/// The rows removed by [drop_row_range][crate::client::BigtableTableAdmin::drop_row_range].
#[serde_with::serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum RowRange {
    /// Delete all rows that start with this row key prefix.
    RowKeyPrefix(#[serde_as(as = "serde_with::base64::Base64")] bytes::Bytes),
    /// Delete all rows in the table.
    DeleteAllDataFromTable(bool),
}

impl RowRange {
    pub fn prefix<T: Into<bytes::Bytes>>(v: T) -> Self {
        Self::RowKeyPrefix(v.into())
    }

    pub fn all() -> Self {
        Self::DeleteAllDataFromTable(true)
    }
}

/// Response message for `MutateRow`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct MutateRowResponse {}

/// A sample of the row keys in a table.
#[serde_with::serde_as]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct RowKeySample {
    /// Sorted streamed sequence of sample row keys in the table.
    #[serde_as(as = "serde_with::base64::Base64")]
    pub row_key: bytes::Bytes,
    /// Approximate total storage space used by all rows in the table which
    /// precede `row_key`.
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub offset_bytes: i64,
}

/// The samples returned by `SampleRowKeys`.
///
/// The service streams the samples, the transport collects them into a
/// single response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct SampleRowKeysResponse {
    pub samples: Vec<RowKeySample>,
}

macro_rules! pageable {
    ($response:ident, $field:ident, $item:ty) => {
        #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        #[non_exhaustive]
        pub struct $response {
            pub $field: Vec<$item>,
            pub next_page_token: String,
        }

        impl PageableResponse for $response {
            type PageItem = $item;

            fn items(self) -> Vec<Self::PageItem> {
                self.$field
            }

            fn next_page_token(&self) -> String {
                self.next_page_token.clone()
            }
        }
    };
}

pageable!(ListInstancesResponse, instances, Instance);
pageable!(ListClustersResponse, clusters, Cluster);
pageable!(ListAppProfilesResponse, app_profiles, AppProfile);
pageable!(ListTablesResponse, tables, Table);
pageable!(ListSnapshotsResponse, snapshots, Snapshot);
pageable!(ListBackupsResponse, backups, Backup);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateInstanceRequest {
    pub instance_id: String,
    pub instance: Instance,
    pub clusters: HashMap<String, Cluster>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateClusterRequest {
    pub cluster_id: String,
    pub cluster: Cluster,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateAppProfileRequest {
    pub app_profile_id: String,
    pub app_profile: AppProfile,
    pub ignore_warnings: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateTableRequest {
    pub table_id: String,
    pub table: Table,
}

#[serde_with::serde_as]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MutateRowRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_profile_id: Option<String>,
    #[serde_as(as = "serde_with::base64::Base64")]
    pub row_key: bytes::Bytes,
    pub mutations: Vec<Mutation>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AppProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_profile_id: Option<String>,
}
