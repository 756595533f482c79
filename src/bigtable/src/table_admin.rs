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
    CreateTableRequest, Empty, ListBackupsResponse, ListSnapshotsResponse, ListTablesResponse,
    RowRange, Table,
};
use crate::operations::*;
use gax::forwarder::{Call, Forwarder, ListCall};
use names::ReferenceNode;
use serde_json::json;

/// Administers tables, and lists the snapshots and backups of a cluster.
///
/// Obtain one from [Bigtable::table_admin][crate::client::Bigtable::table_admin].
///
/// # Example
/// ```
/// # use cloudref_bigtable::client::Bigtable;
/// # use cloudref_bigtable::model::RowRange;
/// # async fn sample(client: &Bigtable) -> anyhow::Result<()> {
/// let table = client.table("my-instance", "my-table")?;
/// client
///     .table_admin()
///     .drop_row_range(&table, RowRange::prefix("user#"))
///     .send()
///     .await?;
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct BigtableTableAdmin {
    forwarder: Forwarder,
}

impl BigtableTableAdmin {
    pub(crate) fn new(forwarder: Forwarder) -> Self {
        Self { forwarder }
    }

    /// Creates a table in an instance.
    pub fn create_table<T: Into<String>>(
        &self,
        instance: &ReferenceNode,
        table_id: T,
        table: Table,
    ) -> Call<Table> {
        let body = CreateTableRequest {
            table_id: table_id.into(),
            table,
        };
        Call::new(self.forwarder.clone(), &CREATE_TABLE, instance.clone(), body)
    }

    /// Gets metadata information about a table.
    pub fn get_table(&self, table: &ReferenceNode) -> Call<Table> {
        Call::new(self.forwarder.clone(), &GET_TABLE, table.clone(), json!({}))
    }

    /// Lists all tables served from an instance.
    pub fn list_tables(&self, instance: &ReferenceNode) -> ListCall<ListTablesResponse> {
        ListCall::new(self.forwarder.clone(), &LIST_TABLES, instance.clone(), json!({}))
    }

    /// Permanently deletes a table and all of its data.
    pub fn delete_table(&self, table: &ReferenceNode) -> Call<Empty> {
        Call::new(self.forwarder.clone(), &DELETE_TABLE, table.clone(), json!({}))
    }

    /// Permanently drops a range of rows from a table.
    ///
    /// Unless the application configures a different value, this request
    /// uses [DROP_ROW_RANGE_TIMEOUT][crate::operations::DROP_ROW_RANGE_TIMEOUT]
    /// as its timeout.
    pub fn drop_row_range(&self, table: &ReferenceNode, range: RowRange) -> Call<Empty> {
        Call::new(self.forwarder.clone(), &DROP_ROW_RANGE, table.clone(), range)
    }

    /// Lists all snapshots associated with a cluster.
    pub fn list_snapshots(&self, cluster: &ReferenceNode) -> ListCall<ListSnapshotsResponse> {
        ListCall::new(self.forwarder.clone(), &LIST_SNAPSHOTS, cluster.clone(), json!({}))
    }

    /// Lists the backups in a cluster.
    pub fn list_backups(&self, cluster: &ReferenceNode) -> ListCall<ListBackupsResponse> {
        ListCall::new(self.forwarder.clone(), &LIST_BACKUPS, cluster.clone(), json!({}))
    }
}
