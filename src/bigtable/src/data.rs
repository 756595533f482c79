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
    AppProfileRequest, MutateRowRequest, MutateRowResponse, Mutation, SampleRowKeysResponse,
};
use crate::operations::*;
use gax::forwarder::{Call, Forwarder};
use names::ReferenceNode;

/// Reads and writes the rows in a table.
///
/// Obtain one from [Bigtable::data][crate::client::Bigtable::data].
///
/// # Example
/// ```
/// # use cloudref_bigtable::client::Bigtable;
/// # use cloudref_bigtable::model::Mutation;
/// # async fn sample(client: &Bigtable) -> anyhow::Result<()> {
/// let table = client.table("my-instance", "my-table")?;
/// client
///     .data()
///     .with_app_profile_id("batch")
///     .mutate_row(&table, "user#123", vec![Mutation::set_cell("cf", "name", "Ana")])
///     .send()
///     .await?;
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct BigtableData {
    forwarder: Forwarder,
    app_profile_id: Option<String>,
}

impl BigtableData {
    pub(crate) fn new(forwarder: Forwarder) -> Self {
        Self {
            forwarder,
            app_profile_id: None,
        }
    }

    /// Returns a copy of this client that sends requests using the given
    /// app profile.
    pub fn with_app_profile_id<T: Into<String>>(&self, v: T) -> Self {
        Self {
            forwarder: self.forwarder.clone(),
            app_profile_id: Some(v.into()),
        }
    }

    /// The app profile used in all requests, if any.
    pub fn app_profile_id(&self) -> Option<&str> {
        self.app_profile_id.as_deref()
    }

    /// Atomically applies mutations to a single row.
    pub fn mutate_row<K>(
        &self,
        table: &ReferenceNode,
        row_key: K,
        mutations: Vec<Mutation>,
    ) -> Call<MutateRowResponse>
    where
        K: Into<bytes::Bytes>,
    {
        let body = MutateRowRequest {
            app_profile_id: self.app_profile_id.clone(),
            row_key: row_key.into(),
            mutations,
        };
        Call::new(self.forwarder.clone(), &MUTATE_ROW, table.clone(), body)
    }

    /// Returns a sample of the row keys in a table, delimiting contiguous
    /// sections of roughly equal size.
    pub fn sample_row_keys(&self, table: &ReferenceNode) -> Call<SampleRowKeysResponse> {
        let body = AppProfileRequest {
            app_profile_id: self.app_profile_id.clone(),
        };
        Call::new(self.forwarder.clone(), &SAMPLE_ROW_KEYS, table.clone(), body)
    }
}
