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

//! Verify the admin clients format the requests and interpret the responses.

use cloudref_bigtable::client::Bigtable;
use cloudref_bigtable::model::{
    AppProfile, Cluster, Instance, ListInstancesResponse, RowRange, StorageType, Table,
};
use cloudref_bigtable::operations::DROP_ROW_RANGE_TIMEOUT;
use futures::TryStreamExt;
use gax::error::rpc::Code;
use gax::options::{RequestOptions, RequestOptionsBuilder};
use gax::transport::{Invoker, TransportFailure};
use serde_json::{Value, json};
use std::time::Duration;
use test_case::test_case;

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

async fn client(mock: MockInvoker) -> anyhow::Result<Bigtable> {
    let client = Bigtable::builder()
        .with_project("my-project")
        .with_invoker(mock)
        .build()
        .await?;
    Ok(client)
}

#[tokio::test]
async fn create_cluster_qualifies_location() -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke()
        .withf(|operation, request, _| {
            operation == "CreateCluster"
                && request["parent"] == json!("projects/my-project/instances/my-instance")
                && request["clusterId"] == json!("my-cluster")
                && request["cluster"]["location"]
                    == json!("projects/my-project/locations/us-east1-b")
        })
        .times(1)
        .returning(|_, _, _| Ok(json!({"name": "operations/create-cluster"})));

    let client = client(mock).await?;
    let instance = client.instance("my-instance")?;
    let operation = client
        .instance_admin()
        .create_cluster(
            &instance,
            "my-cluster",
            Cluster::new().set_location("us-east1-b").set_serve_nodes(3),
        )
        .send()
        .await?;
    assert_eq!(operation.name, "operations/create-cluster");
    assert!(!operation.done, "{operation:?}");
    Ok(())
}

#[tokio::test]
async fn create_cluster_keeps_qualified_location() -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke()
        .withf(|_, request, _| {
            request["cluster"]["location"] == json!("projects/other/locations/us-west1-a")
        })
        .times(1)
        .returning(|_, _, _| Ok(json!({})));

    let client = client(mock).await?;
    let instance = client.instance("my-instance")?;
    client
        .instance_admin()
        .create_cluster(
            &instance,
            "my-cluster",
            Cluster::new().set_location("projects/other/locations/us-west1-a"),
        )
        .send()
        .await?;
    Ok(())
}

#[tokio::test]
async fn create_instance_qualifies_all_clusters() -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke()
        .withf(|operation, request, _| {
            operation == "CreateInstance"
                && request["parent"] == json!("projects/my-project")
                && request["instanceId"] == json!("my-instance")
                && request["instance"]["displayName"] == json!("My Instance")
                && request["clusters"]["c1"]["location"]
                    == json!("projects/my-project/locations/us-east1-b")
                && request["clusters"]["c2"]["location"]
                    == json!("projects/my-project/locations/us-east1-c")
        })
        .times(1)
        .returning(|_, _, _| Ok(json!({"name": "operations/create-instance"})));

    let client = client(mock).await?;
    let operation = client
        .instance_admin()
        .create_instance(
            "my-instance",
            Instance::new().set_display_name("My Instance"),
            [
                ("c1", Cluster::new().set_location("us-east1-b")),
                (
                    "c2",
                    Cluster::new()
                        .set_location("us-east1-c")
                        .set_default_storage_type(StorageType::Hdd),
                ),
            ],
        )
        .send()
        .await?;
    assert_eq!(operation.name, "operations/create-instance");
    Ok(())
}

#[tokio::test]
async fn wrong_target_is_never_sent() -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke().never();

    let client = client(mock).await?;
    let instance = client.instance("my-instance")?;
    let table = client.table("my-instance", "my-table")?;

    let err = client.table_admin().get_table(&instance).send().await.unwrap_err();
    assert!(err.is_binding(), "{err:?}");
    assert!(err.to_string().contains("GetTable"), "{err}");

    let err = client
        .instance_admin()
        .create_cluster(&table, "my-cluster", Cluster::new())
        .send()
        .await
        .unwrap_err();
    assert!(err.is_binding(), "{err:?}");

    let err = client
        .instance_admin()
        .list_clusters(&table)
        .send()
        .await
        .unwrap_err();
    assert!(err.is_binding(), "{err:?}");
    Ok(())
}

#[test_case(Code::NotFound)]
#[test_case(Code::AlreadyExists)]
#[test_case(Code::PermissionDenied)]
#[test_case(Code::FailedPrecondition)]
#[tokio::test]
async fn service_errors(code: Code) -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke()
        .times(1)
        .returning(move |_, _, _| Err(TransportFailure::with_code(code as i32, "test-only")));

    let client = client(mock).await?;
    let table = client.table("my-instance", "my-table")?;
    let err = client.table_admin().get_table(&table).send().await.unwrap_err();
    let status = err.status().expect("a service error has a status");
    assert_eq!(status.code, code);
    assert_eq!(status.message, "test-only");
    Ok(())
}

#[tokio::test]
async fn transport_errors() -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke()
        .times(1)
        .returning(|_, _, _| Err(TransportFailure::new("connection reset")));

    let client = client(mock).await?;
    let table = client.table("my-instance", "my-table")?;
    let err = client.table_admin().delete_table(&table).send().await.unwrap_err();
    assert!(err.is_transport(), "{err:?}");
    assert!(err.status().is_none(), "{err:?}");
    Ok(())
}

#[tokio::test]
async fn drop_row_range_default_timeout() -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke()
        .withf(|operation, request, options| {
            operation == "DropRowRange"
                && request["name"] == json!("projects/my-project/instances/my-instance/tables/my-table")
                && request["rowKeyPrefix"] == json!("dXNlciM=")
                && options.attempt_timeout() == &Some(DROP_ROW_RANGE_TIMEOUT)
        })
        .times(1)
        .returning(|_, _, _| Ok(json!({})));

    let client = client(mock).await?;
    let table = client.table("my-instance", "my-table")?;
    client
        .table_admin()
        .drop_row_range(&table, RowRange::prefix("user#"))
        .send()
        .await?;
    Ok(())
}

#[tokio::test]
async fn drop_row_range_request_timeout() -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke()
        .withf(|_, request, options| {
            request["deleteAllDataFromTable"] == json!(true)
                && options.attempt_timeout() == &Some(Duration::from_secs(5))
        })
        .times(1)
        .returning(|_, _, _| Ok(json!({})));

    let client = client(mock).await?;
    let table = client.table("my-instance", "my-table")?;
    client
        .table_admin()
        .drop_row_range(&table, RowRange::all())
        .with_attempt_timeout(Duration::from_secs(5))
        .send()
        .await?;
    Ok(())
}

#[tokio::test]
async fn drop_row_range_configured_timeout() -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke()
        .withf(|_, _, options| options.attempt_timeout() == &Some(Duration::from_secs(120)))
        .times(1)
        .returning(|_, _, _| Ok(json!({})));

    let client = Bigtable::builder()
        .with_project("my-project")
        .with_invoker(mock)
        .with_operation_timeout("DropRowRange", Duration::from_secs(120))
        .build()
        .await?;
    let table = client.table("my-instance", "my-table")?;
    client
        .table_admin()
        .drop_row_range(&table, RowRange::all())
        .send()
        .await?;
    Ok(())
}

#[tokio::test]
async fn other_operations_have_no_default_timeout() -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke()
        .withf(|_, _, options| options.attempt_timeout().is_none())
        .times(1)
        .returning(|_, _, _| Ok(json!({"name": "projects/my-project/instances/my-instance/tables/my-table"})));

    let client = client(mock).await?;
    let table = client.table("my-instance", "my-table")?;
    let got = client.table_admin().get_table(&table).send().await?;
    assert_eq!(got.name, table.name());
    Ok(())
}

#[tokio::test]
async fn create_table() -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke()
        .withf(|operation, request, options| {
            operation == "CreateTable"
                && request["parent"] == json!("projects/my-project/instances/my-instance")
                && request["tableId"] == json!("my-table")
                && options.request_params()
                    == Some("parent=projects/my-project/instances/my-instance")
        })
        .times(1)
        .returning(|_, request, _| {
            Ok(json!({
                "name": format!("{}/tables/{}", request["parent"].as_str().unwrap_or_default(), "my-table"),
            }))
        });

    let client = client(mock).await?;
    let instance = client.instance("my-instance")?;
    let table = client
        .table_admin()
        .create_table(&instance, "my-table", Table::new())
        .send()
        .await?;
    assert_eq!(
        table.name,
        "projects/my-project/instances/my-instance/tables/my-table"
    );
    Ok(())
}

#[tokio::test]
async fn app_profiles() -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke()
        .withf(|operation, request, _| {
            operation == "CreateAppProfile"
                && request["appProfileId"] == json!("batch")
                && request["ignoreWarnings"] == json!(false)
        })
        .times(1)
        .returning(|_, request, _| Ok(request["appProfile"].clone()));
    mock.expect_invoke()
        .withf(|operation, request, _| {
            operation == "DeleteAppProfile"
                && request["name"]
                    == json!("projects/my-project/instances/my-instance/appProfiles/batch")
                && request["ignoreWarnings"] == json!(true)
        })
        .times(1)
        .returning(|_, _, _| Ok(Value::Null));

    let client = client(mock).await?;
    let instance = client.instance("my-instance")?;
    let profile = client
        .instance_admin()
        .create_app_profile(
            &instance,
            "batch",
            AppProfile::new()
                .set_description("batch jobs")
                .set_multi_cluster_routing(),
        )
        .send()
        .await?;
    assert_eq!(profile.description, "batch jobs");

    let name = client.app_profile("my-instance", "batch")?;
    client.instance_admin().delete_app_profile(&name).send().await?;
    Ok(())
}

#[tokio::test]
async fn list_instances_by_item() -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke()
        .withf(|operation, request, _| {
            operation == "ListInstances" && request.get("pageToken").is_none()
        })
        .times(1)
        .returning(|_, _, _| {
            Ok(json!({
                "instances": [
                    {"name": "projects/my-project/instances/i1"},
                    {"name": "projects/my-project/instances/i2"},
                ],
                "nextPageToken": "page-2",
            }))
        });
    mock.expect_invoke()
        .withf(|_, request, _| request["pageToken"] == json!("page-2"))
        .times(1)
        .returning(|_, _, _| {
            Ok(json!({
                "instances": [{"name": "projects/my-project/instances/i3"}],
            }))
        });

    let client = client(mock).await?;
    let names = client
        .instance_admin()
        .list_instances()
        .by_item()
        .map_ok(|i| i.name)
        .try_collect::<Vec<_>>()
        .await?;
    assert_eq!(
        names,
        [
            "projects/my-project/instances/i1",
            "projects/my-project/instances/i2",
            "projects/my-project/instances/i3",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn list_instances_single_page() -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke()
        .withf(|_, request, _| {
            request["pageToken"] == json!("resume") && request["pageSize"] == json!(10)
        })
        .times(1)
        .returning(|_, _, _| Ok(json!({"nextPageToken": "more"})));

    let client = client(mock).await?;
    let page: ListInstancesResponse = client
        .instance_admin()
        .list_instances()
        .set_page_token("resume")
        .set_page_size(10)
        .send()
        .await?;
    assert!(page.instances.is_empty(), "{page:?}");
    assert_eq!(page.next_page_token, "more");
    Ok(())
}

#[tokio::test]
async fn list_backups_by_page() -> TestResult {
    let mut mock = MockInvoker::new();
    mock.expect_invoke()
        .withf(|operation, request, _| {
            operation == "ListBackups"
                && request["parent"]
                    == json!("projects/my-project/instances/my-instance/clusters/my-cluster")
        })
        .times(1)
        .returning(|_, _, _| {
            Ok(json!({
                "backups": [{"name": "b1", "sizeBytes": "1024"}],
            }))
        });

    let client = client(mock).await?;
    let cluster = client.cluster("my-instance", "my-cluster")?;
    let mut pages = client.table_admin().list_backups(&cluster).by_page();
    let page = pages.try_next().await?.expect("one page");
    assert_eq!(page.backups.len(), 1);
    assert_eq!(page.backups[0].size_bytes, 1024);
    assert!(pages.try_next().await?.is_none());
    Ok(())
}
