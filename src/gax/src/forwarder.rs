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

//! Forward operations on resource references to the transport.
//!
//! Each RPC is described by a [OperationDescriptor]: the name of the
//! operation, the kind of resource it targets, the request field receiving
//! the target name, and any rewrites applied to the request before it is
//! sent. A single [Forwarder] executes all the descriptors for a service.
//!
//! The forwarder validates the target and formats the request before
//! making any network call. Failures reported by the transport are
//! classified by the [ErrorTranslator] configured in the forwarder.

use crate::Result;
use crate::error::Error;
use crate::options::RequestOptions;
use crate::options::internal::{RequestBuilder, set_default_timeout};
use crate::paginator::{ItemPaginator, PageableResponse, Paginator};
use crate::transport::{ErrorTranslator, Invoker, StatusTranslator};
use names::{ReferenceNode, ResourceKind, qualify_location};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

/// Describes a single RPC.
///
/// # Example
/// ```
/// # use cloudref_gax::forwarder::{OperationDescriptor, Rewrite};
/// # use names::ResourceKind;
/// const CREATE_CLUSTER: OperationDescriptor =
///     OperationDescriptor::new("CreateCluster", ResourceKind::Instance, "/parent")
///         .with_rewrites(&[Rewrite::QualifyLocation("/cluster/location")]);
/// assert_eq!(CREATE_CLUSTER.name, "CreateCluster");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OperationDescriptor {
    /// The operation name, as sent to the [Invoker].
    pub name: &'static str,
    /// The kind of resource targeted by the operation.
    pub target: ResourceKind,
    /// The request field receiving the target name, as a JSON pointer.
    pub field: &'static str,
    /// The rewrites applied to the request, in order.
    pub rewrites: &'static [Rewrite],
    /// The attempt timeout used when the request does not set one.
    pub default_timeout: Option<Duration>,
}

impl OperationDescriptor {
    pub const fn new(name: &'static str, target: ResourceKind, field: &'static str) -> Self {
        Self {
            name,
            target,
            field,
            rewrites: &[],
            default_timeout: None,
        }
    }

    pub const fn with_rewrites(mut self, v: &'static [Rewrite]) -> Self {
        self.rewrites = v;
        self
    }

    pub const fn with_default_timeout(mut self, v: Duration) -> Self {
        self.default_timeout = Some(v);
        self
    }
}

/// A change applied to the request before it is sent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rewrite {
    /// Qualifies the location ids found at the given pointer.
    ///
    /// The pointer may contain `*` segments, matching every member of an
    /// object (or element of an array). Each string found is rewritten with
    /// [qualify_location], using the project of the target resource. Missing
    /// fields are ignored.
    QualifyLocation(&'static str),
    /// Moves the last segment of the string at `from` into `into`.
    ///
    /// Some operations name a collection by its parent and its id, e.g.
    /// `projects/p/databases/d/documents/users/mike/messages` is sent as
    /// `{"parent": ".../documents/users/mike", "collectionId": "messages"}`.
    SplitName {
        from: &'static str,
        into: &'static str,
    },
}

/// The operation targets a resource of the wrong kind.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{operation} requires a {want} but `{name}` is a {got}")]
pub struct WrongTarget {
    pub operation: &'static str,
    pub want: ResourceKind,
    pub got: ResourceKind,
    pub name: String,
}

/// Executes [OperationDescriptor]s over an [Invoker].
///
/// Cloning a forwarder is cheap, the clones share the same transport handle.
#[derive(Clone, Debug)]
pub struct Forwarder {
    invoker: Arc<dyn Invoker>,
    translator: Arc<dyn ErrorTranslator>,
    timeouts: Arc<HashMap<String, Duration>>,
    tracing: bool,
}

impl Forwarder {
    /// Creates a forwarder using the default [StatusTranslator].
    pub fn new(invoker: Arc<dyn Invoker>) -> Self {
        Self {
            invoker,
            translator: Arc::new(StatusTranslator),
            timeouts: Arc::new(HashMap::new()),
            tracing: false,
        }
    }

    pub fn with_translator<T: ErrorTranslator + 'static>(mut self, v: T) -> Self {
        self.translator = Arc::new(v);
        self
    }

    pub fn with_shared_translator(mut self, v: Arc<dyn ErrorTranslator>) -> Self {
        self.translator = v;
        self
    }

    /// Replaces the default timeout of some operations, keyed by operation name.
    pub fn with_timeouts(mut self, v: HashMap<String, Duration>) -> Self {
        self.timeouts = Arc::new(v);
        self
    }

    /// Creates an `info` span for each operation.
    pub fn with_tracing(mut self, v: bool) -> Self {
        self.tracing = v;
        self
    }

    /// The attempt timeout used for `descriptor` when the request sets none.
    pub fn default_timeout(&self, descriptor: &OperationDescriptor) -> Option<Duration> {
        self.timeouts
            .get(descriptor.name)
            .copied()
            .or(descriptor.default_timeout)
    }

    /// Validates the target and formats the request for `descriptor`.
    ///
    /// This never makes a network call.
    pub fn prepare(
        &self,
        descriptor: &OperationDescriptor,
        target: &ReferenceNode,
        request: Value,
    ) -> Result<Value> {
        if target.kind() != descriptor.target {
            return Err(Error::binding(WrongTarget {
                operation: descriptor.name,
                want: descriptor.target,
                got: target.kind(),
                name: target.name().to_string(),
            }));
        }
        let mut request = match request {
            Value::Null => Value::Object(Map::new()),
            Value::Object(_) => request,
            _ => return Err(Error::ser("the request must be a JSON object")),
        };
        set_field(&mut request, descriptor.field, target.name())?;
        for rewrite in descriptor.rewrites {
            match rewrite {
                Rewrite::QualifyLocation(pointer) => {
                    let segments = pointer_segments(pointer);
                    visit_strings(&mut request, &segments, &mut |location: &mut String| {
                        *location = qualify_location(target.project_id(), location);
                    });
                }
                Rewrite::SplitName { from, into } => {
                    let (parent, id) = match request.pointer(from).and_then(Value::as_str) {
                        Some(name) => match name.rsplit_once('/') {
                            Some((parent, id)) => (parent.to_string(), id.to_string()),
                            None => continue,
                        },
                        None => continue,
                    };
                    set_field(&mut request, from, &parent)?;
                    set_field(&mut request, into, &id)?;
                }
            }
        }
        Ok(request)
    }

    /// Sends a request for `descriptor` and returns the response.
    pub async fn call<R>(
        &self,
        descriptor: &OperationDescriptor,
        target: &ReferenceNode,
        request: Value,
        options: RequestOptions,
    ) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let span = if self.tracing {
            tracing::info_span!("operation", operation = descriptor.name, target = %target)
        } else {
            tracing::Span::none()
        };
        self.call_impl(descriptor, target, request, options)
            .instrument(span)
            .await
    }

    async fn call_impl<R>(
        &self,
        descriptor: &OperationDescriptor,
        target: &ReferenceNode,
        request: Value,
        options: RequestOptions,
    ) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let request = self.prepare(descriptor, target, request)?;
        let mut options = set_default_timeout(options, self.default_timeout(descriptor));
        let routing = request
            .pointer(descriptor.field)
            .and_then(Value::as_str)
            .unwrap_or(target.name());
        options.set_request_params(format!("{}={routing}", field_name(descriptor.field)));
        tracing::debug!(
            operation = descriptor.name,
            target = %target,
            timeout = ?options.attempt_timeout(),
            "forwarding operation"
        );
        let response = match self.invoker.invoke(descriptor.name, request, options).await {
            Ok(r) => r,
            Err(failure) => {
                let error = self.translator.translate(failure);
                tracing::warn!(
                    operation = descriptor.name,
                    target = %target,
                    %error,
                    "operation failed"
                );
                return Err(error);
            }
        };
        let response = match response {
            Value::Null => Value::Object(Map::new()),
            r => r,
        };
        serde_json::from_value::<R>(response).map_err(Error::deser)
    }
}

/// Writes `value` at `pointer`, creating any intermediate objects.
fn set_field(request: &mut Value, pointer: &str, value: &str) -> Result<()> {
    let segments = pointer_segments(pointer);
    let Some((last, path)) = segments.split_last() else {
        return Err(Error::ser(format!("invalid field pointer `{pointer}`")));
    };
    let mut current = request;
    for segment in path {
        current = match current {
            Value::Object(map) => map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new())),
            _ => return Err(Error::ser(format!("`{pointer}` is not an object field"))),
        };
    }
    match current {
        Value::Object(map) => {
            map.insert(last.to_string(), Value::String(value.to_string()));
            Ok(())
        }
        _ => Err(Error::ser(format!("`{pointer}` is not an object field"))),
    }
}

fn pointer_segments(pointer: &str) -> Vec<&str> {
    pointer.split('/').filter(|s| !s.is_empty()).collect()
}

/// The routing parameter name for a field pointer, e.g. `table.name`.
fn field_name(pointer: &str) -> String {
    pointer_segments(pointer).join(".")
}

fn visit_strings(value: &mut Value, segments: &[&str], f: &mut dyn FnMut(&mut String)) {
    let Some((head, tail)) = segments.split_first() else {
        if let Value::String(s) = value {
            f(s);
        }
        return;
    };
    match (value, *head) {
        (Value::Object(map), "*") => map.values_mut().for_each(|v| visit_strings(v, tail, f)),
        (Value::Array(list), "*") => list.iter_mut().for_each(|v| visit_strings(v, tail, f)),
        (Value::Object(map), key) => {
            if let Some(v) = map.get_mut(key) {
                visit_strings(v, tail, f);
            }
        }
        (Value::Array(list), index) => {
            if let Some(v) = index.parse::<usize>().ok().and_then(|i| list.get_mut(i)) {
                visit_strings(v, tail, f);
            }
        }
        _ => {}
    }
}

/// A request for a single-response operation.
///
/// Serialization problems with the request body are reported when the
/// request is sent.
#[derive(Debug)]
pub struct Call<R> {
    forwarder: Forwarder,
    descriptor: &'static OperationDescriptor,
    target: ReferenceNode,
    request: std::result::Result<Value, Arc<serde_json::Error>>,
    options: RequestOptions,
    _response: PhantomData<fn() -> R>,
}

impl<R> Call<R>
where
    R: DeserializeOwned,
{
    pub fn new<B: Serialize>(
        forwarder: Forwarder,
        descriptor: &'static OperationDescriptor,
        target: ReferenceNode,
        body: B,
    ) -> Self {
        Self {
            forwarder,
            descriptor,
            target,
            request: serde_json::to_value(body).map_err(Arc::new),
            options: RequestOptions::default(),
            _response: PhantomData,
        }
    }

    /// The resource targeted by this request.
    pub fn target(&self) -> &ReferenceNode {
        &self.target
    }

    /// Sends the request.
    pub async fn send(self) -> Result<R> {
        let request = self.request.map_err(Error::ser)?;
        self.forwarder
            .call(self.descriptor, &self.target, request, self.options)
            .await
    }
}

impl<R> RequestBuilder for Call<R> {
    fn request_options(&mut self) -> &mut RequestOptions {
        &mut self.options
    }
}

/// A request for a list operation.
///
/// Use [send][ListCall::send] to fetch a single page, [by_page][ListCall::by_page]
/// to stream all the pages, or [by_item][ListCall::by_item] to stream the
/// items in all the pages.
#[derive(Debug)]
pub struct ListCall<R> {
    inner: Call<R>,
    page_token: String,
    page_size: Option<i32>,
}

impl<R> ListCall<R>
where
    R: PageableResponse + DeserializeOwned + Send + 'static,
{
    pub fn new<B: Serialize>(
        forwarder: Forwarder,
        descriptor: &'static OperationDescriptor,
        target: ReferenceNode,
        body: B,
    ) -> Self {
        Self {
            inner: Call::new(forwarder, descriptor, target, body),
            page_token: String::new(),
            page_size: None,
        }
    }

    /// Resumes the listing from a token returned by a previous call.
    pub fn set_page_token<T: Into<String>>(mut self, v: T) -> Self {
        self.page_token = v.into();
        self
    }

    /// The maximum number of items per page. The service may return fewer.
    pub fn set_page_size(mut self, v: i32) -> Self {
        self.page_size = Some(v);
        self
    }

    /// Fetches a single page.
    pub async fn send(self) -> Result<R> {
        let request = self.inner.request.map_err(Error::ser)?;
        page(
            &self.inner.forwarder,
            self.inner.descriptor,
            &self.inner.target,
            request,
            self.inner.options,
            self.page_size,
            self.page_token,
        )
        .await
    }

    /// Streams the pages, starting at the configured page token.
    pub fn by_page(self) -> Paginator<R, Error> {
        let Call {
            forwarder,
            descriptor,
            target,
            request,
            options,
            ..
        } = self.inner;
        let page_size = self.page_size;
        let execute = move |token: String| {
            let forwarder = forwarder.clone();
            let target = target.clone();
            let request = request.clone();
            let options = options.clone();
            async move {
                let request = request.map_err(Error::ser)?;
                page(
                    &forwarder,
                    descriptor,
                    &target,
                    request,
                    options,
                    page_size,
                    token,
                )
                .await
            }
        };
        Paginator::new(self.page_token, execute)
    }

    /// Streams the items in all the pages.
    pub fn by_item(self) -> ItemPaginator<R, Error> {
        self.by_page().items()
    }
}

impl<R> RequestBuilder for ListCall<R> {
    fn request_options(&mut self) -> &mut RequestOptions {
        &mut self.inner.options
    }
}

async fn page<R>(
    forwarder: &Forwarder,
    descriptor: &OperationDescriptor,
    target: &ReferenceNode,
    mut request: Value,
    options: RequestOptions,
    page_size: Option<i32>,
    page_token: String,
) -> Result<R>
where
    R: DeserializeOwned,
{
    if let Value::Object(map) = &mut request {
        if !page_token.is_empty() {
            map.insert("pageToken".to_string(), Value::String(page_token));
        }
        if let Some(size) = page_size {
            map.insert("pageSize".to_string(), Value::from(size));
        }
    }
    forwarder.call(descriptor, target, request, options).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::rpc::Code;
    use crate::options::RequestOptionsBuilder;
    use crate::transport::TransportFailure;
    use serde::Deserialize;
    use serde_json::json;
    use std::error::Error as _;

    type TestResult = anyhow::Result<()>;

    mockall::mock! {
        #[derive(Debug)]
        Invoker {}
        #[async_trait::async_trait]
        impl Invoker for Invoker {
            async fn invoke(
                &self,
                operation: &'static str,
                request: Value,
                options: RequestOptions,
            ) -> std::result::Result<Value, TransportFailure>;
        }
    }

    const CREATE_CLUSTER: OperationDescriptor =
        OperationDescriptor::new("CreateCluster", ResourceKind::Instance, "/parent")
            .with_rewrites(&[Rewrite::QualifyLocation("/cluster/location")]);

    const CREATE_INSTANCE: OperationDescriptor =
        OperationDescriptor::new("CreateInstance", ResourceKind::Project, "/parent")
            .with_rewrites(&[Rewrite::QualifyLocation("/clusters/*/location")]);

    const DROP: OperationDescriptor =
        OperationDescriptor::new("DropRowRange", ResourceKind::Table, "/name")
            .with_default_timeout(Duration::from_secs(3600));

    const LIST: OperationDescriptor =
        OperationDescriptor::new("ListThings", ResourceKind::Instance, "/parent");

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default, rename_all = "camelCase")]
    struct Thing {
        name: String,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    struct ListThingsResponse {
        things: Vec<Thing>,
        next_page_token: String,
    }

    impl PageableResponse for ListThingsResponse {
        type PageItem = Thing;
        fn items(self) -> Vec<Thing> {
            self.things
        }
        fn next_page_token(&self) -> String {
            self.next_page_token.clone()
        }
    }

    fn instance() -> ReferenceNode {
        ReferenceNode::instance("my-project", "my-instance").expect("valid instance")
    }

    fn forwarder(mock: MockInvoker) -> Forwarder {
        Forwarder::new(Arc::new(mock))
    }

    #[test]
    fn prepare_sets_target_field() -> TestResult {
        let fwd = forwarder(MockInvoker::new());
        let got = fwd.prepare(&LIST, &instance(), Value::Null)?;
        assert_eq!(
            got,
            json!({"parent": "projects/my-project/instances/my-instance"})
        );
        Ok(())
    }

    #[test]
    fn prepare_nested_field() -> TestResult {
        const NESTED: OperationDescriptor =
            OperationDescriptor::new("UpdateThing", ResourceKind::Instance, "/thing/name");
        let fwd = forwarder(MockInvoker::new());
        let got = fwd.prepare(&NESTED, &instance(), json!({"thing": {"labels": {}}}))?;
        assert_eq!(
            got,
            json!({"thing": {"name": "projects/my-project/instances/my-instance", "labels": {}}})
        );
        Ok(())
    }

    #[test]
    fn prepare_wrong_target() {
        let mut mock = MockInvoker::new();
        mock.expect_invoke().never();
        let fwd = forwarder(mock);
        let project = ReferenceNode::project("my-project").expect("valid project");
        let err = fwd.prepare(&LIST, &project, Value::Null).unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        let inner = err.as_inner::<WrongTarget>().expect("source is WrongTarget");
        assert_eq!(inner.want, ResourceKind::Instance);
        assert_eq!(inner.got, ResourceKind::Project);
    }

    #[test]
    fn prepare_rejects_non_object() {
        let fwd = forwarder(MockInvoker::new());
        let err = fwd.prepare(&LIST, &instance(), json!([1, 2])).unwrap_err();
        assert!(err.is_serialization(), "{err:?}");
    }

    #[test]
    fn qualify_location() -> TestResult {
        let fwd = forwarder(MockInvoker::new());
        let got = fwd.prepare(
            &CREATE_CLUSTER,
            &instance(),
            json!({"clusterId": "c1", "cluster": {"location": "us-east1-b", "serveNodes": 3}}),
        )?;
        assert_eq!(
            got["cluster"]["location"],
            json!("projects/my-project/locations/us-east1-b")
        );
        assert_eq!(got["cluster"]["serveNodes"], json!(3));

        let got = fwd.prepare(
            &CREATE_CLUSTER,
            &instance(),
            json!({"cluster": {"location": "projects/other/locations/us-east1-b"}}),
        )?;
        assert_eq!(
            got["cluster"]["location"],
            json!("projects/other/locations/us-east1-b")
        );
        Ok(())
    }

    #[test]
    fn qualify_location_wildcard() -> TestResult {
        let fwd = forwarder(MockInvoker::new());
        let project = ReferenceNode::project("my-project")?;
        let got = fwd.prepare(
            &CREATE_INSTANCE,
            &project,
            json!({"clusters": {
                "c1": {"location": "us-east1-b"},
                "c2": {"location": "projects/my-project/locations/us-west1-a"},
                "c3": {"serveNodes": 1},
            }}),
        )?;
        assert_eq!(
            got["clusters"],
            json!({
                "c1": {"location": "projects/my-project/locations/us-east1-b"},
                "c2": {"location": "projects/my-project/locations/us-west1-a"},
                "c3": {"serveNodes": 1},
            })
        );
        Ok(())
    }

    #[test]
    fn split_name() -> TestResult {
        const LIST_DOCUMENTS: OperationDescriptor =
            OperationDescriptor::new("ListDocuments", ResourceKind::Collection, "/parent")
                .with_rewrites(&[Rewrite::SplitName {
                    from: "/parent",
                    into: "/collectionId",
                }]);
        let fwd = forwarder(MockInvoker::new());
        let messages = ReferenceNode::collection("my-project", "(default)", "users/mike/messages")?;
        let got = fwd.prepare(&LIST_DOCUMENTS, &messages, Value::Null)?;
        assert_eq!(
            got,
            json!({
                "parent": "projects/my-project/databases/(default)/documents/users/mike",
                "collectionId": "messages",
            })
        );

        let users = ReferenceNode::collection("my-project", "(default)", "users")?;
        let got = fwd.prepare(&LIST_DOCUMENTS, &users, Value::Null)?;
        assert_eq!(
            got,
            json!({
                "parent": "projects/my-project/databases/(default)/documents",
                "collectionId": "users",
            })
        );
        Ok(())
    }

    #[test]
    fn visit_array() {
        let mut value = json!({"items": [{"location": "a"}, {"location": "b"}]});
        let mut seen = Vec::new();
        visit_strings(&mut value, &["items", "*", "location"], &mut |s: &mut String| {
            seen.push(s.clone())
        });
        assert_eq!(seen, vec!["a", "b"]);
        let mut seen = Vec::new();
        visit_strings(&mut value, &["items", "1", "location"], &mut |s: &mut String| {
            seen.push(s.clone())
        });
        assert_eq!(seen, vec!["b"]);
    }

    #[tokio::test]
    async fn call_success() -> TestResult {
        let mut mock = MockInvoker::new();
        mock.expect_invoke()
            .withf(|op, request, options| {
                op == "ListThings"
                    && request == &json!({"parent": "projects/my-project/instances/my-instance"})
                    && options.request_params()
                        == Some("parent=projects/my-project/instances/my-instance")
            })
            .times(1)
            .returning(|_, _, _| Ok(json!({"things": [{"name": "a"}]})));
        let fwd = forwarder(mock);
        let got: ListThingsResponse = fwd
            .call(&LIST, &instance(), Value::Null, RequestOptions::default())
            .await?;
        assert_eq!(got.things, vec![Thing { name: "a".into() }]);
        Ok(())
    }

    #[tokio::test]
    async fn call_empty_response() -> TestResult {
        let mut mock = MockInvoker::new();
        mock.expect_invoke()
            .times(1)
            .returning(|_, _, _| Ok(Value::Null));
        let fwd = forwarder(mock);
        let got: Thing = fwd
            .call(&LIST, &instance(), Value::Null, RequestOptions::default())
            .await?;
        assert_eq!(got, Thing::default());
        Ok(())
    }

    #[tokio::test]
    async fn call_bad_response() {
        let mut mock = MockInvoker::new();
        mock.expect_invoke()
            .times(1)
            .returning(|_, _, _| Ok(json!({"name": 42})));
        let fwd = forwarder(mock);
        let err = fwd
            .call::<Thing>(&LIST, &instance(), Value::Null, RequestOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_deserialization(), "{err:?}");
    }

    #[tokio::test]
    async fn call_service_error() {
        let mut mock = MockInvoker::new();
        mock.expect_invoke()
            .times(1)
            .returning(|_, _, _| Err(TransportFailure::with_code(5, "table not found")));
        let fwd = forwarder(mock);
        let err = fwd
            .call::<Thing>(&LIST, &instance(), Value::Null, RequestOptions::default())
            .await
            .unwrap_err();
        let status = err.status().expect("NOT_FOUND is a service error");
        assert_eq!(status.code, Code::NotFound);
        assert_eq!(status.message, "table not found");
    }

    #[tokio::test]
    async fn call_transport_error() {
        let mut mock = MockInvoker::new();
        mock.expect_invoke()
            .times(1)
            .returning(|_, _, _| Err(TransportFailure::new("connection reset")));
        let fwd = forwarder(mock);
        let err = fwd
            .call::<Thing>(&LIST, &instance(), Value::Null, RequestOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_transport(), "{err:?}");
        assert!(err.status().is_none(), "{err:?}");
        let source = err.source().and_then(|e| e.downcast_ref::<TransportFailure>());
        assert_eq!(source.map(|f| f.message()), Some("connection reset"));
    }

    #[tokio::test]
    async fn call_custom_translator() {
        #[derive(Debug)]
        struct AlwaysTransport;
        impl ErrorTranslator for AlwaysTransport {
            fn translate(&self, failure: TransportFailure) -> Error {
                Error::transport(failure)
            }
        }
        let mut mock = MockInvoker::new();
        mock.expect_invoke()
            .times(1)
            .returning(|_, _, _| Err(TransportFailure::with_code(5, "not found")));
        let fwd = forwarder(mock).with_translator(AlwaysTransport);
        let err = fwd
            .call::<Thing>(&LIST, &instance(), Value::Null, RequestOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_transport(), "{err:?}");
    }

    #[tokio::test]
    async fn default_timeout() -> TestResult {
        let table = instance().child(ResourceKind::Table, Some("t"))?;
        let mut mock = MockInvoker::new();
        mock.expect_invoke()
            .withf(|_, _, options| options.attempt_timeout() == &Some(Duration::from_secs(3600)))
            .times(1)
            .returning(|_, _, _| Ok(Value::Null));
        let fwd = forwarder(mock);
        let _: Value = fwd
            .call(&DROP, &table, Value::Null, RequestOptions::default())
            .await?;
        Ok(())
    }

    #[tokio::test]
    async fn timeout_overrides() -> TestResult {
        let table = instance().child(ResourceKind::Table, Some("t"))?;
        let mut mock = MockInvoker::new();
        mock.expect_invoke()
            .withf(|_, _, options| options.attempt_timeout() == &Some(Duration::from_secs(60)))
            .times(1)
            .returning(|_, _, _| Ok(Value::Null));
        mock.expect_invoke()
            .withf(|_, _, options| options.attempt_timeout() == &Some(Duration::from_secs(5)))
            .times(1)
            .returning(|_, _, _| Ok(Value::Null));
        let fwd = forwarder(mock).with_timeouts(HashMap::from([(
            "DropRowRange".to_string(),
            Duration::from_secs(60),
        )]));
        assert_eq!(fwd.default_timeout(&DROP), Some(Duration::from_secs(60)));
        let _: Value = fwd
            .call(&DROP, &table, Value::Null, RequestOptions::default())
            .await?;

        let mut options = RequestOptions::default();
        options.set_attempt_timeout(Duration::from_secs(5));
        let _: Value = fwd.call(&DROP, &table, Value::Null, options).await?;
        Ok(())
    }

    #[tokio::test]
    async fn call_builder() -> TestResult {
        let mut mock = MockInvoker::new();
        mock.expect_invoke()
            .withf(|op, request, options| {
                op == "ListThings"
                    && request["filter"] == json!("state=READY")
                    && options.user_agent().as_deref() == Some("test-only")
            })
            .times(1)
            .returning(|_, _, _| Ok(json!({"name": "a"})));
        let fwd = forwarder(mock);
        let call = Call::<Thing>::new(fwd, &LIST, instance(), json!({"filter": "state=READY"}))
            .with_user_agent("test-only");
        assert_eq!(call.target(), &instance());
        let got = call.send().await?;
        assert_eq!(got.name, "a");
        Ok(())
    }

    #[tokio::test]
    async fn call_builder_wrong_target() {
        let mut mock = MockInvoker::new();
        mock.expect_invoke().never();
        let fwd = forwarder(mock);
        let project = ReferenceNode::project("my-project").expect("valid project");
        let err = Call::<Thing>::new(fwd, &LIST, project, Value::Null)
            .send()
            .await
            .unwrap_err();
        assert!(err.is_binding(), "{err:?}");
    }

    fn paged_mock() -> MockInvoker {
        let mut seq = mockall::Sequence::new();
        let mut mock = MockInvoker::new();
        mock.expect_invoke()
            .withf(|_, request, _| request.get("pageToken").is_none() && request["pageSize"] == json!(2))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| {
                Ok(json!({"things": [{"name": "a"}, {"name": "b"}], "nextPageToken": "t2"}))
            });
        mock.expect_invoke()
            .withf(|_, request, _| request["pageToken"] == json!("t2"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(json!({"things": [{"name": "c"}]})));
        mock
    }

    #[tokio::test]
    async fn list_by_page() -> TestResult {
        let fwd = forwarder(paged_mock());
        let mut pages = ListCall::<ListThingsResponse>::new(fwd, &LIST, instance(), Value::Null)
            .set_page_size(2)
            .by_page();
        let mut tokens = Vec::new();
        while let Some(page) = pages.next().await {
            tokens.push(page?.next_page_token);
        }
        assert_eq!(tokens, vec!["t2", ""]);
        Ok(())
    }

    #[tokio::test]
    async fn list_by_item() -> TestResult {
        let fwd = forwarder(paged_mock());
        let mut items = ListCall::<ListThingsResponse>::new(fwd, &LIST, instance(), Value::Null)
            .set_page_size(2)
            .by_item();
        let mut names = Vec::new();
        while let Some(item) = items.next().await {
            names.push(item?.name);
        }
        assert_eq!(names, vec!["a", "b", "c"]);
        Ok(())
    }

    #[tokio::test]
    async fn list_single_page() -> TestResult {
        let mut mock = MockInvoker::new();
        mock.expect_invoke()
            .withf(|_, request, _| request["pageToken"] == json!("resume-here"))
            .times(1)
            .returning(|_, _, _| Ok(json!({"things": [{"name": "z"}], "nextPageToken": "next"})));
        let fwd = forwarder(mock);
        let page = ListCall::<ListThingsResponse>::new(fwd, &LIST, instance(), Value::Null)
            .set_page_token("resume-here")
            .send()
            .await?;
        assert_eq!(page.next_page_token, "next");
        assert_eq!(page.things.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn list_error_ends_stream() -> TestResult {
        let mut mock = MockInvoker::new();
        mock.expect_invoke()
            .times(1)
            .returning(|_, _, _| Err(TransportFailure::with_code(7, "denied")));
        let fwd = forwarder(mock);
        let mut pages =
            ListCall::<ListThingsResponse>::new(fwd, &LIST, instance(), Value::Null).by_page();
        let err = pages.next().await.and_then(|r| r.err());
        assert_eq!(
            err.and_then(|e| e.status().map(|s| s.code)),
            Some(Code::PermissionDenied)
        );
        assert!(pages.next().await.is_none());
        Ok(())
    }
}
