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

//! The seam between the clients and the RPC transport.
//!
//! The clients in this workspace do not implement a transport. They format
//! requests, validate resource names, and interpret the results. Sending the
//! requests is delegated to an [Invoker], provided by the application directly
//! or created by a [Connector] when the client is built.
//!
//! Failures reported by the transport are classified by an [ErrorTranslator].
//! The default [StatusTranslator] turns failures carrying a recognized status
//! code into service errors, and everything else into transport errors.

use crate::error::Error;
use crate::error::rpc::{Code, Status};
use crate::options::RequestOptions;
use serde_json::Value;
use std::any::Any;
use std::error::Error as _;
use std::sync::Arc;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Sends requests to the service.
///
/// Requests and responses are JSON objects using the field names of the
/// service protos, in `camelCase`. The operation name identifies the RPC, for
/// example `CreateTable`.
///
/// Implementations are responsible for retries, backoff, and enforcing the
/// timeouts in [RequestOptions].
///
/// # Example
/// ```
/// # use cloudref_gax::transport::{Invoker, TransportFailure};
/// # use cloudref_gax::options::RequestOptions;
/// # use serde_json::Value;
/// #[derive(Debug)]
/// struct Echo;
///
/// #[async_trait::async_trait]
/// impl Invoker for Echo {
///     async fn invoke(
///         &self,
///         _operation: &'static str,
///         request: Value,
///         _options: RequestOptions,
///     ) -> Result<Value, TransportFailure> {
///         Ok(request)
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait Invoker: std::fmt::Debug + Send + Sync {
    /// Sends `request` to the service, and returns its response.
    async fn invoke(
        &self,
        operation: &'static str,
        request: Value,
        options: RequestOptions,
    ) -> std::result::Result<Value, TransportFailure>;
}

/// A raw failure reported by the transport.
///
/// Some failures carry the numeric status code returned by the service,
/// others (broken connections, TLS problems) do not.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct TransportFailure {
    code: Option<i32>,
    message: String,
    timed_out: bool,
    #[source]
    source: Option<BoxError>,
}

impl TransportFailure {
    /// A failure without a status code.
    pub fn new<M: Into<String>>(message: M) -> Self {
        Self {
            code: None,
            message: message.into(),
            timed_out: false,
            source: None,
        }
    }

    /// A failure with the numeric status code returned by the service.
    pub fn with_code<M: Into<String>>(code: i32, message: M) -> Self {
        Self {
            code: Some(code),
            ..Self::new(message)
        }
    }

    /// The request did not complete before its deadline.
    pub fn timeout<M: Into<String>>(message: M) -> Self {
        Self {
            timed_out: true,
            ..Self::new(message)
        }
    }

    /// Attaches the underlying error.
    pub fn with_source<T: Into<BoxError>>(mut self, source: T) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_timeout(&self) -> bool {
        self.timed_out
    }
}

/// Converts a gRPC status.
///
/// A status created from a lower-level error (the channel failed to connect,
/// or the connection broke) carries no status code, even though `tonic`
/// assigns one locally.
impl From<tonic::Status> for TransportFailure {
    fn from(status: tonic::Status) -> Self {
        let code = match status.source() {
            Some(_) => None,
            None => Some(status.code() as i32),
        };
        Self {
            code,
            message: status.message().to_string(),
            timed_out: false,
            source: Some(Box::new(status)),
        }
    }
}

/// Classifies raw transport failures into client errors.
pub trait ErrorTranslator: std::fmt::Debug + Send + Sync {
    fn translate(&self, failure: TransportFailure) -> Error;
}

/// The default [ErrorTranslator].
///
/// A failure carrying a recognized, non-OK status code becomes a service
/// error with the same code and message. A timed out request becomes a
/// timeout error. Anything else becomes a transport error. In all cases the
/// failure is preserved as the error [source][std::error::Error::source].
#[derive(Clone, Debug, Default)]
pub struct StatusTranslator;

impl ErrorTranslator for StatusTranslator {
    fn translate(&self, failure: TransportFailure) -> Error {
        if failure.timed_out {
            return Error::timeout(failure);
        }
        match failure.code.map(Code::try_from) {
            Some(Ok(code)) if code != Code::Ok => {
                let status = Status::default()
                    .set_code(code)
                    .set_message(failure.message.clone());
                Error::service_full(status, failure)
            }
            _ => Error::transport(failure),
        }
    }
}

/// Opaque credentials.
///
/// The clients never inspect the credentials, they only forward them to the
/// [Connector] when the client is built.
#[derive(Clone)]
pub struct Credentials(Arc<dyn Any + Send + Sync>);

impl Credentials {
    pub fn new<T: Any + Send + Sync>(v: T) -> Self {
        Self(Arc::new(v))
    }

    /// Returns the credentials as `T`, if they have that type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credentials([censored])")
    }
}

/// Creates an [Invoker] connected to an endpoint.
///
/// The client builders call this once per transport handle, when the client
/// is built.
#[async_trait::async_trait]
pub trait Connector: std::fmt::Debug + Send + Sync {
    async fn connect(
        &self,
        endpoint: &str,
        credentials: Option<Credentials>,
    ) -> std::result::Result<Arc<dyn Invoker>, BoxError>;
}
