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

use super::rpc::Status;
use std::error::Error as StdError;

type BoxError = Box<dyn StdError + Send + Sync>;

/// The core error returned by all client libraries.
///
/// The clients report errors from multiple sources. For example, the service
/// may return an error, the transport may be unable to reach the service, or
/// the library may be unable to format the request due to invalid resource
/// names or arguments.
///
/// Most applications will just return the error or log it, without any further
/// action. However, some applications may need to interrogate the error
/// details. This type offers a series of predicates to determine the error
/// kind, and accessors to query the most common error details. Applications
/// can query the error [source][std::error::Error::source] for deeper
/// information.
///
/// # Example
/// ```
/// use cloudref_gax::error::Error;
/// match example_function() {
///     Err(e) if matches!(e.status(), Some(_)) => {
///         println!("service error {e}, debug using {:?}", e.status().unwrap());
///     },
///     Err(e) if e.is_binding() => { println!("bad resource name {e}"); },
///     Err(e) => { println!("some other error {e}"); },
///     Ok(_) => { println!("success, how boring"); },
/// }
///
/// fn example_function() -> Result<String, Error> {
///     // ... details omitted ...
///     # use cloudref_gax::error::rpc::{Code, Status};
///     # Err(Error::service(Status::default().set_code(Code::NotFound).set_message("NOT FOUND")))
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<BoxError>,
}

impl Error {
    /// Creates an error with the information returned by the service.
    ///
    /// # Example
    /// ```
    /// use cloudref_gax::error::Error;
    /// use cloudref_gax::error::rpc::{Code, Status};
    /// let status = Status::default().set_code(Code::NotFound).set_message("NOT FOUND");
    /// let error = Error::service(status.clone());
    /// assert_eq!(error.status(), Some(&status));
    /// ```
    pub fn service(status: Status) -> Self {
        Self {
            kind: ErrorKind::Service(Box::new(status)),
            source: None,
        }
    }

    /// Creates a service error, preserving the raw transport failure.
    pub fn service_full<T: Into<BoxError>>(status: Status, source: T) -> Self {
        Self {
            kind: ErrorKind::Service(Box::new(status)),
            source: Some(source.into()),
        }
    }

    /// The [Status] payload associated with this error.
    ///
    /// Services return a `Status` with a numeric code for the error type and a
    /// human-readable message. Errors detected locally, or in the transport,
    /// do not have a status.
    ///
    /// # Example
    /// ```
    /// use cloudref_gax::error::{Error, rpc::{Code, Status}};
    /// let error = Error::service(Status::default().set_code(Code::NotFound));
    /// if let Some(status) = error.status() {
    ///     if status.code == Code::NotFound {
    ///         println!("cannot find the thing: {}", status.message);
    ///     }
    /// }
    /// ```
    pub fn status(&self) -> Option<&Status> {
        match &self.kind {
            ErrorKind::Service(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// Creates an error representing an invalid resource name or argument.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use cloudref_gax::error::Error;
    /// let error = Error::binding("simulated problem");
    /// assert!(error.is_binding());
    /// assert!(error.source().is_some());
    /// ```
    pub fn binding<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Binding,
            source: Some(source.into()),
        }
    }

    /// The request was not sent because a resource name or argument is
    /// invalid.
    ///
    /// # Troubleshooting
    ///
    /// This indicates a problem in the application: a resource name does not
    /// match the expected format, or it names the wrong kind of resource. The
    /// [source][std::error::Error::source] is typically a
    /// [names::Error] describing the problem, use
    /// [as_inner][Error::as_inner] to examine it.
    pub fn is_binding(&self) -> bool {
        matches!(self.kind, ErrorKind::Binding)
    }

    /// Creates an error representing a serialization problem.
    pub fn ser<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Serialization,
            source: Some(source.into()),
        }
    }

    /// The request could not be serialized.
    ///
    /// This is always a client-side error, generated before the request is
    /// made. It is never transient.
    pub fn is_serialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Serialization)
    }

    /// Creates an error representing a deserialization problem.
    pub fn deser<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Deserialization,
            source: Some(source.into()),
        }
    }

    /// The response could not be deserialized.
    ///
    /// The request may have completed in the service. If the request mutates
    /// any state it may or may not be safe to attempt it again.
    pub fn is_deserialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Deserialization)
    }

    /// Creates an error representing a problem in the transport.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use cloudref_gax::error::Error;
    /// let error = Error::transport("connection reset");
    /// assert!(error.is_transport());
    /// assert!(error.status().is_none());
    /// ```
    pub fn transport<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Transport,
            source: Some(source.into()),
        }
    }

    /// A problem reported by the transport layer.
    ///
    /// Examples include failures to connect, broken connections, and any
    /// other failure that did not include a status from the service.
    ///
    /// # Troubleshooting
    ///
    /// The request may or may not have reached the service. The clients do
    /// not retry requests, the transport (or the application) is responsible
    /// for retrying them when appropriate.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport)
    }

    /// Creates an error representing a timeout.
    ///
    /// # Example
    /// ```
    /// use cloudref_gax::error::Error;
    /// let error = Error::timeout("simulated timeout");
    /// assert!(error.is_timeout());
    /// ```
    pub fn timeout<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Timeout,
            source: Some(source.into()),
        }
    }

    /// The request could not be completed before its deadline.
    ///
    /// The deadline is the attempt timeout in the
    /// [RequestOptions][crate::options::RequestOptions], or the default
    /// timeout configured for the operation. The transport enforces it.
    ///
    /// # Troubleshooting
    ///
    /// The request may or may not have completed in the service. Operations
    /// over large ranges (e.g. dropping a row range) may need a longer
    /// timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout)
    }

    /// Returns the source of this error, downcast to `T`.
    ///
    /// # Example
    /// ```
    /// use cloudref_gax::error::Error;
    /// use names::ReferenceNode;
    /// let e = ReferenceNode::instance("p", "").map_err(Error::from).unwrap_err();
    /// let inner = e.as_inner::<names::Error>();
    /// assert!(inner.is_some_and(|e| e.is_malformed()), "{e:?}");
    /// ```
    pub fn as_inner<T: StdError + Send + Sync + 'static>(&self) -> Option<&T> {
        self.source.as_ref().and_then(|e| e.downcast_ref::<T>())
    }
}

impl From<names::Error> for Error {
    fn from(value: names::Error) -> Self {
        Self::binding(value)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.kind, &self.source) {
            (ErrorKind::Binding, Some(e)) => {
                write!(f, "cannot format the request: {e}")
            }
            (ErrorKind::Serialization, Some(e)) => write!(f, "cannot serialize the request {e}"),
            (ErrorKind::Deserialization, Some(e)) => {
                write!(f, "cannot deserialize the response {e}")
            }
            (ErrorKind::Transport, Some(e)) => {
                write!(f, "the transport reports an error: {e}")
            }
            (ErrorKind::Timeout, Some(e)) => {
                write!(f, "the request exceeded the request deadline {e}")
            }
            (ErrorKind::Service(status), _) => {
                write!(
                    f,
                    "the service reports an error with code {} described as: {}",
                    status.code, status.message
                )
            }
            (_, None) => unreachable!("no constructor allows this"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error))
    }
}

/// The type of error held by an [Error] instance.
#[derive(Debug)]
enum ErrorKind {
    Binding,
    Serialization,
    Deserialization,
    Transport,
    Timeout,
    Service(Box<Status>),
}
