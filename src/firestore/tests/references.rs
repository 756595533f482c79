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

//! Verify the requests sent by collection and document references.

use cloudref_firestore::client::{DEFAULT_ENDPOINT, EMULATOR_VAR, Firestore};
use cloudref_firestore::model::Value;
use futures::TryStreamExt;
use gax::client_builder::examples::Echo;
use gax::error::rpc::Code;
use gax::options::RequestOptions;
use gax::transport::{Connector, Credentials, Invoker, TransportFailure};
use scoped_env::ScopedEnv;
use serde_json::json;
use std::sync::{Arc, Mutex};

type TestResult = anyhow::Result<()>;

const ROOT: &str = "projects/my-project/databases/(default)/documents";

mockall::mock! {
    #[derive(Debug)]
    Invoker {}
    #[async_trait::async_trait]
    impl Invoker for Invoker {
        async fn invoke(
            &self,
            operation: &'static str,
            request: serde_json::Value,
            options: RequestOptions,
        ) -> std::result::Result<serde_json::Value, TransportFailure>;
    }
}

async fn client(mock: MockInvoker) -> anyhow::Result<Firestore> {
    let client = Firestore::builder()
        .with_project("my-project")
        .with_invoker(mock)
        .build()
        .await?;
    Ok(client)
}

#[tokio::test]
async fn create_document() -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke()
        .withf(|operation, request, options| {
            operation == "UpdateDocument"
                && request["document"]["name"] == json!(format!("{ROOT}/users/mike"))
                && request["document"]["fields"]["age"] == json!({"integerValue": "42"})
                && request["currentDocument"] == json!({"exists": false})
                && options.request_params()
                    == Some(format!("document.name={ROOT}/users/mike").as_str())
        })
        .times(1)
        .returning(|_, request, _| {
            let mut document = request["document"].clone();
            document["createTime"] = json!("2025-01-02T03:04:05Z");
            Ok(document)
        });

    let client = client(mock).await?;
    let mike = client.doc("users/mike")?;
    let got = mike.create([("age", 42_i64)]).send().await?;
    assert_eq!(got.name, mike.name());
    assert_eq!(got.create_time, "2025-01-02T03:04:05Z");
    assert_eq!(got.fields.get("age"), Some(&Value::from(42_i64)));
    Ok(())
}

#[tokio::test]
async fn create_already_exists() -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke().times(1).returning(|_, _, _| {
        Err(TransportFailure::with_code(
            Code::AlreadyExists as i32,
            "Document already exists",
        ))
    });

    let client = client(mock).await?;
    let err = client
        .doc("users/mike")?
        .create([("age", 42_i64)])
        .send()
        .await
        .unwrap_err();
    let status = err.status().expect("a service error");
    assert_eq!(status.code, Code::AlreadyExists);
    assert_eq!(status.message, "Document already exists");
    Ok(())
}

#[tokio::test]
async fn set_document() -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke()
        .withf(|operation, request, _| {
            operation == "UpdateDocument"
                && request.get("currentDocument").is_none()
                && request["document"]["fields"]["name"] == json!({"stringValue": "Mike"})
        })
        .times(1)
        .returning(|_, request, _| Ok(request["document"].clone()));

    let client = client(mock).await?;
    let got = client.doc("users/mike")?.set([("name", "Mike")]).send().await?;
    assert_eq!(
        got.fields.get("name").and_then(Value::string_value).map(String::as_str),
        Some("Mike")
    );
    Ok(())
}

#[tokio::test]
async fn get_and_delete() -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke()
        .withf(|operation, request, _| {
            operation == "GetDocument"
                && request == &json!({"name": format!("{ROOT}/users/mike")})
        })
        .times(1)
        .returning(|_, _, _| Err(TransportFailure::with_code(Code::NotFound as i32, "missing")));
    mock.expect_invoke()
        .withf(|operation, request, _| {
            operation == "DeleteDocument"
                && request == &json!({"name": format!("{ROOT}/users/mike")})
        })
        .times(1)
        .returning(|_, _, _| Ok(json!({})));

    let client = client(mock).await?;
    let mike = client.doc("users/mike")?;
    let err = mike.get().send().await.unwrap_err();
    assert_eq!(err.status().map(|s| s.code), Some(Code::NotFound));
    mike.delete().send().await?;
    Ok(())
}

#[tokio::test]
async fn list_documents() -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke()
        .withf(|operation, request, options| {
            operation == "ListDocuments"
                && request["parent"] == json!(format!("{ROOT}/users/mike"))
                && request["collectionId"] == json!("messages")
                && request.get("pageToken").is_none()
                && options.request_params() == Some(format!("parent={ROOT}/users/mike").as_str())
        })
        .times(1)
        .returning(|_, _, _| {
            Ok(json!({
                "documents": [{"name": format!("{ROOT}/users/mike/messages/m1")}],
                "nextPageToken": "token-2",
            }))
        });
    mock.expect_invoke()
        .withf(|_, request, _| request["pageToken"] == json!("token-2"))
        .times(1)
        .returning(|_, _, _| {
            Ok(json!({
                "documents": [{"name": format!("{ROOT}/users/mike/messages/m2")}],
            }))
        });

    let client = client(mock).await?;
    let messages = client.collection("users/mike/messages")?;
    let names = messages
        .list_documents()
        .by_item()
        .map_ok(|d| d.name)
        .try_collect::<Vec<_>>()
        .await?;
    assert_eq!(
        names,
        [
            format!("{ROOT}/users/mike/messages/m1"),
            format!("{ROOT}/users/mike/messages/m2"),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn list_top_level_documents() -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke()
        .withf(|_, request, _| {
            request["parent"] == json!(ROOT) && request["collectionId"] == json!("users")
        })
        .times(1)
        .returning(|_, _, _| Ok(json!({})));

    let client = client(mock).await?;
    let page = client.collection("users")?.list_documents().send().await?;
    assert!(page.documents.is_empty(), "{page:?}");
    Ok(())
}

#[tokio::test]
async fn list_collection_ids() -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke()
        .withf(|operation, request, _| {
            operation == "ListCollectionIds"
                && request["parent"] == json!(format!("{ROOT}/users/mike"))
        })
        .times(1)
        .returning(|_, _, _| Ok(json!({"collectionIds": ["likes", "messages"]})));

    let client = client(mock).await?;
    let ids = client
        .doc("users/mike")?
        .list_collection_ids()
        .by_item()
        .try_collect::<Vec<_>>()
        .await?;
    assert_eq!(ids, ["likes", "messages"]);
    Ok(())
}

#[tokio::test]
async fn add_with_injected_id() -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke()
        .withf(|_, request, _| {
            request["document"]["name"] == json!(format!("{ROOT}/users/mike/messages/fixed-id"))
                && request["currentDocument"] == json!({"exists": false})
        })
        .times(1)
        .returning(|_, request, _| Ok(request["document"].clone()));

    let client = client(mock)
        .await?
        .with_id_generator(|| "fixed-id".to_string());
    let messages = client.collection("users/mike/messages")?;
    let (doc, created) = messages.add([("text", "Hello")]).await?;
    assert_eq!(doc.path(), "users/mike/messages/fixed-id");
    assert_eq!(created.name, doc.name());
    Ok(())
}

#[tokio::test]
async fn role_mismatch_is_never_sent() -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke().never();

    let client = client(mock).await?;
    let messages = client.collection("users/mike/messages")?;
    let err = messages.doc("abc123/likes").unwrap_err();
    assert_eq!(
        err.as_inner::<names::Error>().map(|e| e.to_string()),
        Some("document_path must refer to a document.".to_string())
    );
    assert!(messages.doc("abc123").is_ok());
    assert!(messages.doc("abc123/likes/xyz789").is_ok());
    Ok(())
}

/// Records the endpoints used to build the client.
#[derive(Clone, Debug, Default)]
struct Recorder {
    endpoints: Arc<Mutex<Vec<String>>>,
}

#[async_trait::async_trait]
impl Connector for Recorder {
    async fn connect(
        &self,
        endpoint: &str,
        _credentials: Option<Credentials>,
    ) -> std::result::Result<Arc<dyn Invoker>, Box<dyn std::error::Error + Send + Sync>> {
        self.endpoints.lock().unwrap().push(endpoint.to_string());
        Ok(Arc::new(Echo))
    }
}

#[tokio::test]
#[serial_test::serial]
async fn default_endpoint() -> TestResult {
    let _e = ScopedEnv::remove(EMULATOR_VAR);
    let recorder = Recorder::default();
    let _client = Firestore::builder()
        .with_project("my-project")
        .with_connector(recorder.clone())
        .build()
        .await?;
    let got = recorder.endpoints.lock().unwrap().clone();
    assert_eq!(got, [DEFAULT_ENDPOINT]);
    Ok(())
}

#[tokio::test]
#[serial_test::serial]
async fn emulator_endpoint() -> TestResult {
    let _e = ScopedEnv::set(EMULATOR_VAR, "localhost:8080");
    let recorder = Recorder::default();
    let _client = Firestore::builder()
        .with_project("my-project")
        .with_connector(recorder.clone())
        .build()
        .await?;
    let got = recorder.endpoints.lock().unwrap().clone();
    assert_eq!(got, ["localhost:8080"]);
    Ok(())
}
