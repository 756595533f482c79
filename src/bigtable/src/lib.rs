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

//! Clients and resource references for [Cloud Bigtable].
//!
//! This crate wraps the Bigtable instance admin, table admin, and data APIs.
//! Applications name the resources using [ReferenceNode][names::ReferenceNode]
//! values, created from a [Bigtable][client::Bigtable] client, and the client
//! validates each reference before it contacts the service.
//!
//! The crate does not include an RPC transport. Applications configure one
//! via [with_connector()] or [with_invoker()].
//!
//! [Cloud Bigtable]: https://cloud.google.com/bigtable
//! [with_connector()]: gax::client_builder::ClientBuilder::with_connector
//! [with_invoker()]: gax::client_builder::ClientBuilder::with_invoker

pub use gax::Result;
pub use gax::error::Error;

pub mod client;
pub mod model;
pub mod operations;

mod data;
mod instance_admin;
mod table_admin;
