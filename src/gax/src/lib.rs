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

//! Shared helpers for the Cloud Bigtable and Firestore clients.
//!
//! This crate contains the types and functions shared by the client crates in
//! this workspace: the error model, per-request options, the generic client
//! builder, the seam to the RPC transport, the operation forwarder, and the
//! pagination adapters.
//!
//! The transport itself is not implemented here. Applications (or tests)
//! provide an implementation of [transport::Invoker], either directly or via a
//! [transport::Connector] that creates one from an endpoint and credentials.

/// An alias of [std::result::Result] where the error is always [crate::error::Error].
///
/// This is the result type used by all functions wrapping RPCs.
pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// The core error types used by the clients.
pub mod error;

/// Per-request options.
pub mod options;

/// Client configuration and construction.
pub mod client_builder;

/// The seam between the clients and the RPC transport.
pub mod transport;

/// Forward operations on resource references to the transport.
pub mod forwarder;

/// Defines some types and traits to convert and use List RPCs as a Stream.
pub mod paginator;
