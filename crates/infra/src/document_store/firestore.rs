//! Cloud Firestore adapter (REST, `v1`).
//!
//! Documents live under
//! `{base}/v1/projects/{project}/databases/(default)/documents/{collection}/{id}`.
//! Field values use Firestore's typed JSON encoding, e.g.
//! `{"quantity": {"integerValue": "5"}}`.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{Document, DocumentStore, FieldValue, Fields, StoreError};

const PAGE_SIZE: u32 = 300;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<RawDocument>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Firestore-backed document store.
///
/// Cloning is cheap (the HTTP client is shared). Use
/// [`FirestoreDocumentStore::with_id_token`] to act on behalf of a signed-in
/// user so security rules see the caller.
#[derive(Debug, Clone)]
pub struct FirestoreDocumentStore {
    client: reqwest::Client,
    base_url: Url,
    project_id: String,
    api_key: String,
    id_token: Option<String>,
}

impl FirestoreDocumentStore {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        project_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StoreError::InvalidConfig(format!("firestore url '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::InvalidConfig(format!(
                "firestore url '{base_url}' cannot be a base"
            )));
        }
        Ok(Self {
            client,
            base_url,
            project_id: project_id.into(),
            api_key: api_key.into(),
            id_token: None,
        })
    }

    /// A copy of this store that authenticates as the given user.
    pub fn with_id_token(&self, id_token: impl Into<String>) -> Self {
        Self {
            id_token: Some(id_token.into()),
            ..self.clone()
        }
    }

    fn documents_url(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidConfig("firestore url cannot be a base".to_string()))?
            .pop_if_empty()
            .extend([
                "v1",
                "projects",
                self.project_id.as_str(),
                "databases",
                "(default)",
                "documents",
            ])
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.query(&[("key", self.api_key.as_str())]);
        match &self.id_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl DocumentStore for FirestoreDocumentStore {
    async fn list_collection(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let url = self.documents_url(&[collection])?;
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .authorize(self.client.get(url.clone()))
                .query(&[("pageSize", PAGE_SIZE)]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let page: ListResponse = check(request.send().await?).await?.json().await?;
            for raw in page.documents {
                documents.push(decode_document(raw));
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(collection, count = documents.len(), "listed firestore collection");
        Ok(documents)
    }

    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let url = self.documents_url(&[collection, id])?;
        let response = self.authorize(self.client.get(url)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let raw: RawDocument = check(response).await?.json().await?;
        Ok(Some(decode_document(raw)))
    }

    async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let url = self.documents_url(&[collection, id])?;
        // PATCH without an update mask replaces the whole document.
        let body = json!({ "fields": encode_fields(&fields) });
        check(self.authorize(self.client.patch(url)).json(&body).send().await?).await?;
        Ok(())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let url = self.documents_url(&[collection, id])?;
        check(self.authorize(self.client.delete(url)).send().await?).await?;
        Ok(())
    }
}

async fn check(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|e| e.error.message)
        .unwrap_or(text);
    tracing::warn!(status = status.as_u16(), %message, "firestore request failed");
    Err(StoreError::Backend {
        status: status.as_u16(),
        message,
    })
}

fn decode_document(raw: RawDocument) -> Document {
    let id = raw.name.rsplit('/').next().unwrap_or_default().to_string();
    let fields = raw
        .fields
        .iter()
        .filter_map(|(name, value)| decode_value(value).map(|v| (name.clone(), v)))
        .collect();
    Document::new(id, fields)
}

/// Decode a Firestore typed value; unsupported kinds (maps, arrays,
/// timestamps, ...) are dropped.
fn decode_value(value: &Value) -> Option<FieldValue> {
    let (kind, inner) = value.as_object()?.iter().next()?;
    match kind.as_str() {
        "nullValue" => Some(FieldValue::Null),
        "booleanValue" => inner.as_bool().map(FieldValue::Boolean),
        // int64 values are sent as strings.
        "integerValue" => inner
            .as_str()
            .and_then(|s| s.parse().ok())
            .or_else(|| inner.as_i64())
            .map(FieldValue::Integer),
        "doubleValue" => inner.as_f64().map(FieldValue::Double),
        "stringValue" => inner.as_str().map(|s| FieldValue::String(s.to_string())),
        _ => None,
    }
}

fn encode_fields(fields: &Fields) -> Map<String, Value> {
    fields
        .iter()
        .map(|(name, value)| (name.clone(), encode_value(value)))
        .collect()
}

fn encode_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Null => json!({ "nullValue": null }),
        FieldValue::Boolean(v) => json!({ "booleanValue": v }),
        FieldValue::Integer(v) => json!({ "integerValue": v.to_string() }),
        FieldValue::Double(v) => json!({ "doubleValue": v }),
        FieldValue::String(v) => json!({ "stringValue": v }),
    }
}
