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

//! The operations supported by the Bigtable clients.

use gax::forwarder::{OperationDescriptor, Rewrite};
use names::ResourceKind;
use std::time::Duration;

/// The default timeout for `DropRowRange`.
///
/// Dropping a large range can take much longer than any other admin
/// operation.
pub const DROP_ROW_RANGE_TIMEOUT: Duration = Duration::from_secs(3600);

macro_rules! operation {
    ($id:ident, $name:literal, $kind:ident, $field:literal) => {
        pub(crate) const $id: OperationDescriptor =
            OperationDescriptor::new($name, ResourceKind::$kind, $field);
    };
}

// Instance admin
pub(crate) const CREATE_INSTANCE: OperationDescriptor =
    OperationDescriptor::new("CreateInstance", ResourceKind::Project, "/parent")
        .with_rewrites(&[Rewrite::QualifyLocation("/clusters/*/location")]);
operation!(GET_INSTANCE, "GetInstance", Instance, "/name");
operation!(LIST_INSTANCES, "ListInstances", Project, "/parent");
operation!(DELETE_INSTANCE, "DeleteInstance", Instance, "/name");
pub(crate) const CREATE_CLUSTER: OperationDescriptor =
    OperationDescriptor::new("CreateCluster", ResourceKind::Instance, "/parent")
        .with_rewrites(&[Rewrite::QualifyLocation("/cluster/location")]);
operation!(GET_CLUSTER, "GetCluster", Cluster, "/name");
operation!(LIST_CLUSTERS, "ListClusters", Instance, "/parent");
operation!(DELETE_CLUSTER, "DeleteCluster", Cluster, "/name");
operation!(CREATE_APP_PROFILE, "CreateAppProfile", Instance, "/parent");
operation!(GET_APP_PROFILE, "GetAppProfile", AppProfile, "/name");
operation!(LIST_APP_PROFILES, "ListAppProfiles", Instance, "/parent");
operation!(DELETE_APP_PROFILE, "DeleteAppProfile", AppProfile, "/name");

// Table admin
operation!(CREATE_TABLE, "CreateTable", Instance, "/parent");
operation!(GET_TABLE, "GetTable", Table, "/name");
operation!(LIST_TABLES, "ListTables", Instance, "/parent");
operation!(DELETE_TABLE, "DeleteTable", Table, "/name");
pub(crate) const DROP_ROW_RANGE: OperationDescriptor =
    OperationDescriptor::new("DropRowRange", ResourceKind::Table, "/name")
        .with_default_timeout(DROP_ROW_RANGE_TIMEOUT);
operation!(LIST_SNAPSHOTS, "ListSnapshots", Cluster, "/parent");
operation!(LIST_BACKUPS, "ListBackups", Cluster, "/parent");

// Data
operation!(MUTATE_ROW, "MutateRow", Table, "/tableName");
operation!(SAMPLE_ROW_KEYS, "SampleRowKeys", Table, "/tableName");
