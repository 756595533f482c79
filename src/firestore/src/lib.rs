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

//! Collection and document references for [Cloud Firestore].
//!
//! This crate contains a [Firestore][client::Firestore] client, and the
//! [CollectionReference] and [DocumentReference] types used to name (and
//! operate on) the collections and documents in a database.
//!
//! References are values. Creating one never contacts the service, and all
//! the validation of the collection and document paths happens before any
//! request is made. The paths alternate between collections and documents,
//! `users` is a collection, `users/mike` a document, and
//! `users/mike/messages` a collection again.
//!
//! The crate does not include an RPC transport. Applications configure one
//! via [with_connector()] or [with_invoker()].
//!
//! [Cloud Firestore]: https://cloud.google.com/firestore
//! [with_connector()]: gax::client_builder::ClientBuilder::with_connector
//! [with_invoker()]: gax::client_builder::ClientBuilder::with_invoker

pub use gax::Result;
pub use gax::error::Error;

pub mod client;
pub mod model;

mod operations;
mod reference;

pub use reference::{CollectionReference, DocumentReference};
