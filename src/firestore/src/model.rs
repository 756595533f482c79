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

//! The messages sent to, and received from, Cloud Firestore.

use gax::paginator::PageableResponse;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A Firestore document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Document {
    /// The resource name of the document, for example
    /// `projects/{project_id}/databases/{database_id}/documents/{document_path}`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// The document's fields.
    pub fields: HashMap<String, Value>,

    /// The time at which the document was created, set by the service.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub create_time: String,

    /// The time at which the document was last changed, set by the service.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub update_time: String,
}

impl Document {
    pub fn new() -> Self {
        std::default::Default::default()
    }

    /// Sets the value of [name][Document::name].
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }

    /// Sets the value of [fields][Document::fields].
    pub fn set_fields<T, K, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }
}

/// A message that can hold any of the supported value types.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Value {
    /// Must have a value set.
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
}

impl Value {
    pub fn new() -> Self {
        std::default::Default::default()
    }

    /// Sets the value of [value_type][Value::value_type].
    pub fn set_value_type<T: Into<Option<ValueType>>>(mut self, v: T) -> Self {
        self.value_type = v.into();
        self
    }

    /// Sets the value to null.
    pub fn set_null_value(self) -> Self {
        self.set_value_type(ValueType::NullValue(NullValue))
    }

    pub fn set_boolean_value(self, v: bool) -> Self {
        self.set_value_type(ValueType::BooleanValue(v))
    }

    pub fn set_integer_value(self, v: i64) -> Self {
        self.set_value_type(ValueType::IntegerValue(v))
    }

    pub fn set_double_value(self, v: f64) -> Self {
        self.set_value_type(ValueType::DoubleValue(v))
    }

    pub fn set_string_value<T: Into<String>>(self, v: T) -> Self {
        self.set_value_type(ValueType::StringValue(v.into()))
    }

    pub fn set_bytes_value<T: Into<bytes::Bytes>>(self, v: T) -> Self {
        self.set_value_type(ValueType::BytesValue(v.into()))
    }

    /// Sets a reference to another document, e.g.
    /// `projects/{project_id}/databases/{database_id}/documents/{document_path}`.
    pub fn set_reference_value<T: Into<String>>(self, v: T) -> Self {
        self.set_value_type(ValueType::ReferenceValue(v.into()))
    }

    pub fn set_array_value<T, V>(self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = v.into_iter().map(Into::into).collect();
        self.set_value_type(ValueType::ArrayValue(ArrayValue { values }))
    }

    pub fn set_map_value<T, K, V>(self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let fields = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self.set_value_type(ValueType::MapValue(MapValue { fields }))
    }

    /// The value of [value_type][Value::value_type] if it holds a
    /// `StringValue`, `None` if the field is not set or holds a different
    /// branch.
    pub fn string_value(&self) -> Option<&String> {
        match &self.value_type {
            Some(ValueType::StringValue(v)) => Some(v),
            _ => None,
        }
    }

    pub fn integer_value(&self) -> Option<&i64> {
        match &self.value_type {
            Some(ValueType::IntegerValue(v)) => Some(v),
            _ => None,
        }
    }

    pub fn boolean_value(&self) -> Option<&bool> {
        match &self.value_type {
            Some(ValueType::BooleanValue(v)) => Some(v),
            _ => None,
        }
    }

    pub fn map_value(&self) -> Option<&MapValue> {
        match &self.value_type {
            Some(ValueType::MapValue(v)) => Some(v),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::new().set_string_value(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::new().set_string_value(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::new().set_integer_value(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::new().set_double_value(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::new().set_boolean_value(v)
    }
}

/// The possible types of a [Value].
#[serde_with::serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum ValueType {
    NullValue(NullValue),
    BooleanValue(bool),
    IntegerValue(#[serde_as(as = "serde_with::DisplayFromStr")] i64),
    DoubleValue(f64),
    /// A timestamp in RFC 3339 format.
    TimestampValue(String),
    StringValue(String),
    BytesValue(#[serde_as(as = "serde_with::base64::Base64")] bytes::Bytes),
    ReferenceValue(String),
    GeoPointValue(LatLng),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

/// The JSON `null` value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NullValue;

/// An array value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ArrayValue {
    pub values: Vec<Value>,
}

/// A map value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct MapValue {
    pub fields: HashMap<String, Value>,
}

/// A latitude/longitude pair, in degrees.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A generic empty message.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Empty {}

/// The response for `ListDocuments`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ListDocumentsResponse {
    pub documents: Vec<Document>,
    pub next_page_token: String,
}

impl PageableResponse for ListDocumentsResponse {
    type PageItem = Document;

    fn items(self) -> Vec<Self::PageItem> {
        self.documents
    }

    fn next_page_token(&self) -> String {
        self.next_page_token.clone()
    }
}

/// The response for `ListCollectionIds`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ListCollectionIdsResponse {
    /// The collection ids.
    pub collection_ids: Vec<String>,
    pub next_page_token: String,
}

impl PageableResponse for ListCollectionIdsResponse {
    type PageItem = String;

    fn items(self) -> Vec<Self::PageItem> {
        self.collection_ids
    }

    fn next_page_token(&self) -> String {
        self.next_page_token.clone()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateDocumentRequest {
    pub document: Document,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_document: Option<Precondition>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Precondition {
    pub exists: bool,
}
