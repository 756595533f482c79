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

//! Provide types for client construction.
//!
//! Some applications need to construct clients with custom configuration, for
//! example, they may need to override the endpoint, the project, or the
//! transport. The clients in this workspace use a generic builder type to
//! provide such functionality. The types in this module implement the client
//! builders.
//!
//! Applications should not create builders directly, instead each client type
//! defines a `builder()` function to obtain the correct type of builder.
//!
//! ## Example: create a client with a different endpoint
//!
//! ```
//! # use cloudref_gax::client_builder::examples;
//! # use cloudref_gax::client_builder::Result;
//! # tokio_test::block_on(async {
//! pub use examples::Client; // Placeholder for examples
//! let client = Client::builder()
//!     .with_project("my-project")
//!     .with_endpoint("https://private.googleapis.com")
//!     .with_invoker(examples::Echo)
//!     .build().await?;
//! # Result::<()>::Ok(()) });
//! ```

use crate::transport::{Connector, Credentials, ErrorTranslator, Invoker};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// The environment variable used to find the default project.
pub const PROJECT_VAR: &str = "GOOGLE_CLOUD_PROJECT";

/// The environment variable enabling tracing in all clients.
pub const LOGGING_VAR: &str = "GOOGLE_CLOUD_RUST_LOGGING";

/// The result type for this module.
pub type Result<T> = std::result::Result<T, Error>;

/// Indicates a problem while constructing a client.
///
/// # Examples
/// ```no_run
/// # use cloudref_gax::client_builder::examples;
/// # tokio_test::block_on(async {
/// use cloudref_gax::client_builder::Error;
/// use examples::Client; // Placeholder for examples
/// let client = match Client::builder().build().await {
///     Ok(c) => c,
///     Err(e) if e.is_missing_project() => {
///         println!("set GOOGLE_CLOUD_PROJECT or call with_project()");
///         return;
///     }
///     Err(e) => {
///         println!("error creating the client {e}");
///         return;
///     }
/// };
/// # });
/// ```
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    /// No project was configured, and the environment does not define one.
    pub fn is_missing_project(&self) -> bool {
        matches!(&self.0, ErrorKind::MissingProject)
    }

    /// The configured project id is not a valid resource id.
    pub fn is_invalid_project(&self) -> bool {
        matches!(&self.0, ErrorKind::InvalidProject(_))
    }

    /// Neither an invoker nor a connector were configured.
    pub fn is_missing_transport(&self) -> bool {
        matches!(&self.0, ErrorKind::MissingTransport)
    }

    /// The connector could not create the transport.
    pub fn is_transport(&self) -> bool {
        matches!(&self.0, ErrorKind::Transport(_))
    }

    /// Creates a new error representing a problem in the transport
    /// initialization.
    pub fn transport<T: Into<BoxError>>(source: T) -> Self {
        Self(ErrorKind::Transport(source.into()))
    }

    pub(crate) fn missing_project() -> Self {
        Self(ErrorKind::MissingProject)
    }

    /// Creates a new error representing an invalid project id.
    pub fn invalid_project<T: Into<BoxError>>(source: T) -> Self {
        Self(ErrorKind::InvalidProject(source.into()))
    }

    pub(crate) fn missing_transport() -> Self {
        Self(ErrorKind::MissingTransport)
    }
}

#[derive(thiserror::Error, Debug)]
enum ErrorKind {
    #[error("no project configured, use with_project() or set {PROJECT_VAR}")]
    MissingProject,
    #[error("invalid project id")]
    InvalidProject(#[source] BoxError),
    #[error("no transport configured, use with_invoker() or with_connector()")]
    MissingTransport,
    #[error("could not initialize transport client")]
    Transport(#[source] BoxError),
}

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A generic builder for clients.
///
/// In the clients, this type is used as the builder returned by
/// `Client::builder()`. Applications should not need to use this type
/// directly.
#[derive(Clone, Debug)]
pub struct ClientBuilder<F> {
    config: internal::ClientConfig,
    factory: F,
}

impl<F> ClientBuilder<F> {
    /// Creates a new client.
    ///
    /// ```
    /// # use cloudref_gax::client_builder::examples;
    /// # use cloudref_gax::client_builder::Result;
    /// # tokio_test::block_on(async {
    /// use examples::Client; // Placeholder for examples
    /// let client = Client::builder()
    ///     .with_project("my-project")
    ///     .with_invoker(examples::Echo)
    ///     .build().await?;
    /// # Result::<()>::Ok(()) });
    /// ```
    pub async fn build<C>(self) -> Result<C>
    where
        F: internal::ClientFactory<Client = C>,
    {
        self.factory.build(self.config).await
    }

    /// Sets the endpoint.
    ///
    /// This takes precedence over any emulator host in the environment.
    pub fn with_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.config.endpoint = Some(v.into());
        self
    }

    /// Sets the project used by the client.
    ///
    /// The default is the value of the `GOOGLE_CLOUD_PROJECT` environment
    /// variable.
    pub fn with_project<V: Into<String>>(mut self, v: V) -> Self {
        self.config.project = Some(v.into());
        self
    }

    /// Enables tracing.
    ///
    /// The client libraries can be dynamically instrumented with the Tokio
    /// [tracing] framework. Setting this flag enables this instrumentation.
    ///
    /// [tracing]: https://docs.rs/tracing/latest/tracing/
    pub fn with_tracing(mut self) -> Self {
        self.config.tracing = true;
        self
    }

    /// Configure the authentication credentials.
    ///
    /// The credentials are opaque to the clients, they are only forwarded to
    /// the [Connector].
    pub fn with_credentials<T: Into<Credentials>>(mut self, v: T) -> Self {
        self.config.cred = Some(v.into());
        self
    }

    /// Configures the connector used to create the transport.
    pub fn with_connector<T: Connector + 'static>(mut self, v: T) -> Self {
        self.config.connector = Some(Arc::new(v));
        self
    }

    /// Configures an already connected transport.
    ///
    /// This takes precedence over any connector.
    pub fn with_invoker<T: Invoker + 'static>(mut self, v: T) -> Self {
        self.config.invoker = Some(Arc::new(v));
        self
    }

    /// Configures how transport failures are classified.
    pub fn with_error_translator<T: ErrorTranslator + 'static>(mut self, v: T) -> Self {
        self.config.translator = Some(Arc::new(v));
        self
    }

    /// Changes the default timeout for the operation called `name`.
    ///
    /// A timeout set on an individual request takes precedence.
    pub fn with_operation_timeout<V: Into<String>>(mut self, name: V, timeout: Duration) -> Self {
        self.config.timeouts.insert(name.into(), timeout);
        self
    }
}

#[doc(hidden)]
pub mod internal {
    use super::*;
    use crate::forwarder::Forwarder;

    pub trait ClientFactory {
        type Client;
        fn build(self, config: ClientConfig) -> impl Future<Output = Result<Self::Client>>;
    }

    pub fn new_builder<F, C>(factory: F) -> super::ClientBuilder<F>
    where
        F: ClientFactory<Client = C>,
    {
        super::ClientBuilder {
            factory,
            config: ClientConfig::default(),
        }
    }

    /// Configure a client.
    ///
    /// A common client configuration for all the clients in this workspace.
    #[derive(Clone, Debug, Default)]
    pub struct ClientConfig {
        pub endpoint: Option<String>,
        pub project: Option<String>,
        pub cred: Option<Credentials>,
        pub tracing: bool,
        pub connector: Option<Arc<dyn Connector>>,
        pub invoker: Option<Arc<dyn Invoker>>,
        pub translator: Option<Arc<dyn ErrorTranslator>>,
        pub timeouts: HashMap<String, Duration>,
    }

    /// Returns the configured project, or the project in the environment.
    pub fn resolve_project(config: &ClientConfig) -> Result<String> {
        if let Some(p) = &config.project {
            return Ok(p.clone());
        }
        match std::env::var(PROJECT_VAR) {
            Ok(p) if !p.is_empty() => Ok(p),
            _ => Err(Error::missing_project()),
        }
    }

    /// Returns the endpoint for a service.
    ///
    /// An explicit endpoint wins, then the emulator host in `emulator_var`,
    /// then the default endpoint of the service.
    pub fn resolve_endpoint(config: &ClientConfig, default: &str, emulator_var: &str) -> String {
        if let Some(e) = &config.endpoint {
            return e.clone();
        }
        match std::env::var(emulator_var) {
            Ok(host) if !host.is_empty() => host,
            _ => default.to_string(),
        }
    }

    /// Returns true if the environment or client configuration enables tracing.
    pub fn tracing_enabled(config: &ClientConfig) -> bool {
        if config.tracing {
            return true;
        }
        std::env::var(LOGGING_VAR)
            .map(|v| v == "true")
            .unwrap_or(false)
    }

    /// Creates a forwarder connected to `endpoint`.
    ///
    /// Each call creates a new transport handle, unless an invoker was
    /// configured, in which case all the forwarders share it.
    pub async fn connect(config: &ClientConfig, endpoint: &str) -> Result<Forwarder> {
        let invoker = match (&config.invoker, &config.connector) {
            (Some(i), _) => i.clone(),
            (None, Some(c)) => c
                .connect(endpoint, config.cred.clone())
                .await
                .map_err(Error::transport)?,
            (None, None) => return Err(Error::missing_transport()),
        };
        tracing::debug!(%endpoint, "transport ready");
        let forwarder = Forwarder::new(invoker)
            .with_timeouts(config.timeouts.clone())
            .with_tracing(tracing_enabled(config));
        let forwarder = match &config.translator {
            Some(t) => forwarder.with_shared_translator(t.clone()),
            None => forwarder,
        };
        Ok(forwarder)
    }
}

#[doc(hidden)]
pub mod examples {
    //! This module contains helper types used in the rustdoc examples.
    //!
    //! The examples require relatively complex types to be useful.

    use super::Result;
    use super::internal::ClientConfig;
    use crate::options::RequestOptions;
    use crate::transport::{Invoker, TransportFailure};
    use serde_json::Value;

    #[allow(dead_code)]
    pub struct Client {
        pub project: String,
        pub config: ClientConfig,
    }
    impl Client {
        pub fn builder() -> client::Builder {
            super::internal::new_builder(client::Factory)
        }

        async fn new(config: ClientConfig) -> Result<Self> {
            let project = super::internal::resolve_project(&config)?;
            Ok(Self { project, config })
        }
    }
    mod client {
        pub type Builder = super::super::ClientBuilder<Factory>;
        pub struct Factory;
        impl super::super::internal::ClientFactory for Factory {
            type Client = super::Client;
            async fn build(
                self,
                config: crate::client_builder::internal::ClientConfig,
            ) -> super::Result<Self::Client> {
                Self::Client::new(config).await
            }
        }
    }

    /// An invoker returning each request as its response.
    #[derive(Clone, Debug, Default)]
    pub struct Echo;

    #[async_trait::async_trait]
    impl Invoker for Echo {
        async fn invoke(
            &self,
            _operation: &'static str,
            request: Value,
            _options: RequestOptions,
        ) -> std::result::Result<Value, TransportFailure> {
            Ok(request)
        }
    }

}
