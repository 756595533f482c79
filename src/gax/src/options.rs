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

//! Client configuration and per request options.
//!
//! While the client library defaults are intended to work for most
//! applications, it is sometimes necessary to change the behavior of some
//! calls made via a client. Applications sometimes change the timeout for an
//! specific call, or set a custom user agent. The `*Builder` returned by each
//! client method implements the [RequestOptionsBuilder] trait where
//! applications can override some defaults.

/// A set of options configuring a single request.
///
/// Application only use this class directly in mocks, where they may want to
/// verify their application has configured all the right request parameters
/// and options.
///
/// All other code uses this type indirectly, via the per-request builders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestOptions {
    user_agent: Option<String>,
    attempt_timeout: Option<std::time::Duration>,
    request_params: Option<String>,
}

impl RequestOptions {
    /// Prepends this prefix to the user agent header value.
    pub fn set_user_agent<T: Into<String>>(&mut self, v: T) {
        self.user_agent = Some(v.into());
    }

    /// Gets the current user-agent prefix
    pub fn user_agent(&self) -> &Option<String> {
        &self.user_agent
    }

    /// Sets the per-attempt timeout.
    ///
    /// The clients do not enforce this timeout, it is passed to the transport
    /// unchanged.
    pub fn set_attempt_timeout<T: Into<std::time::Duration>>(&mut self, v: T) {
        self.attempt_timeout = Some(v.into());
    }

    /// Gets the current per-attempt timeout.
    pub fn attempt_timeout(&self) -> &Option<std::time::Duration> {
        &self.attempt_timeout
    }

    /// The routing parameters for the request, in `field=resource` format.
    ///
    /// The forwarder sets these from the target resource of each operation.
    /// Transports typically send them in the `x-goog-request-params` header.
    pub fn request_params(&self) -> Option<&str> {
        self.request_params.as_deref()
    }

    pub(crate) fn set_default_timeout(&mut self, v: Option<std::time::Duration>) {
        if self.attempt_timeout.is_none() {
            self.attempt_timeout = v;
        }
    }

    pub(crate) fn set_request_params(&mut self, v: String) {
        self.request_params = Some(v);
    }
}

/// Implementations of this trait provide setters to configure request options.
///
/// The client libraries provide a builder for each RPC. These builders can be
/// used to set the request parameters, e.g., the name of the resource targeted
/// by the RPC, as well as any options affecting the request, such as
/// additional headers or timeouts.
pub trait RequestOptionsBuilder: internal::RequestBuilder {
    /// Set the user agent header.
    fn with_user_agent<V: Into<String>>(self, v: V) -> Self;

    /// Sets the per-attempt timeout.
    ///
    /// This overrides any default timeout configured for the operation.
    fn with_attempt_timeout<V: Into<std::time::Duration>>(self, v: V) -> Self;
}

#[doc(hidden)]
pub mod internal {
    //! This module contains implementation details. It is not part of the
    //! public API. Types and functions in this module may be changed or removed
    //! without warnings. Applications should not use any types contained
    //! within.
    use super::RequestOptions;

    /// Simplify implementation of the [super::RequestOptionsBuilder] trait in
    /// the client crates.
    ///
    /// This is an implementation detail, most applications have little need to
    /// worry about or use this trait.
    pub trait RequestBuilder {
        fn request_options(&mut self) -> &mut RequestOptions;
    }

    pub fn set_default_timeout(
        mut options: RequestOptions,
        default: Option<std::time::Duration>,
    ) -> RequestOptions {
        options.set_default_timeout(default);
        options
    }
}

/// Implements the sealed [RequestOptionsBuilder] trait.
impl<T> RequestOptionsBuilder for T
where
    T: internal::RequestBuilder,
{
    fn with_user_agent<V: Into<String>>(mut self, v: V) -> Self {
        self.request_options().set_user_agent(v);
        self
    }

    fn with_attempt_timeout<V: Into<std::time::Duration>>(mut self, v: V) -> Self {
        self.request_options().set_attempt_timeout(v);
        self
    }
}
