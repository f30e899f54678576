//! Typed HTTP client for the calendar API.
//!
//! Wraps the `/api/v1` endpoints using [`reqwest`] and unwraps the
//! `{ "data": ... }` response envelope.

use cuadrante_core::types::DbId;
use cuadrante_core::{ChangeLogRecord, DateKey, Entry, EntryPatch, NewUser, User, YearMonth};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// HTTP client for one calendar server.
#[derive(Debug, Clone)]
pub struct CalendarApi {
    client: reqwest::Client,
    api_url: String,
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    code: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadBody {
    image_url: String,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    identifier: &'a str,
}

impl CalendarApi {
    /// * `api_url` - versioned base URL, e.g. `http://host:3000/api/v1`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    // ---- users ----

    /// Resolve an identifier to its user. Unknown identifiers yield
    /// [`ClientError::NotFound`].
    pub async fn login(&self, identifier: &str) -> Result<User, ClientError> {
        let response = self
            .client
            .post(self.url("/login"))
            .json(&LoginBody { identifier })
            .send()
            .await?;
        Self::parse_data(response).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        let response = self.client.get(self.url("/users")).send().await?;
        Self::parse_data(response).await
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User, ClientError> {
        let body = serde_json::json!({
            "name": user.name,
            "identifier": user.identifier,
            "role": user.role,
        });
        let response = self.client.post(self.url("/users")).json(&body).send().await?;
        Self::parse_data(response).await
    }

    pub async fn delete_user(&self, id: DbId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/users/{id}")))
            .send()
            .await?;
        Self::check_status(response).await
    }

    // ---- calendar ----

    pub async fn list_month(&self, month: YearMonth) -> Result<Vec<Entry>, ClientError> {
        let path = format!("/calendar/{}/{}", month.year(), month.month());
        let response = self.client.get(self.url(&path)).send().await?;
        Self::parse_data(response).await
    }

    pub async fn get_entry(&self, key: DateKey) -> Result<Entry, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/calendar/{key}")))
            .send()
            .await?;
        Self::parse_data(response).await
    }

    /// `PUT /calendar/{key}`. `patch.editor` must be set.
    pub async fn upsert_entry(&self, key: DateKey, patch: &EntryPatch) -> Result<Entry, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/calendar/{key}")))
            .json(patch)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    pub async fn create_entry(&self, entry: &Entry) -> Result<Entry, ClientError> {
        let response = self
            .client
            .post(self.url("/calendar"))
            .json(entry)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    pub async fn delete_entry(&self, key: DateKey) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/calendar/{key}")))
            .send()
            .await?;
        Self::check_status(response).await
    }

    // ---- logs and uploads ----

    /// Change log records written during `month`, newest first.
    pub async fn logs(&self, month: YearMonth) -> Result<Vec<ChangeLogRecord>, ClientError> {
        let path = format!("/logs/{}/{}", month.year(), month.month());
        let response = self.client.get(self.url(&path)).send().await?;
        Self::parse_data(response).await
    }

    /// Upload one image and return the URL to store in an entry.
    pub async fn upload_image(&self, file_name: &str, data: Vec<u8>) -> Result<String, ClientError> {
        let part = reqwest::multipart::Part::bytes(data).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("image", part);
        let response = self
            .client
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await?;
        let body: UploadBody = Self::parse_data(response).await?;
        Ok(body.image_url)
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Map non-2xx responses to [`ClientError`]. A 404 becomes
    /// [`ClientError::NotFound`] carrying the server's message.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => (body.code, body.error),
            Err(_) => (String::from("UNKNOWN"), text),
        };

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(message));
        }
        Err(ClientError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }

    async fn parse_data<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        let envelope: DataEnvelope<T> = response.json().await?;
        Ok(envelope.data)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
