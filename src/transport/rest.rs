//! REST transport over `reqwest`.
//!
//! [`ApiClient`] carries the shared HTTP client, the API base URL and the [`Session`];
//! [`RestTransport`] maps one resource's endpoint family onto it.

use crate::config::AdminConfig;
use crate::framework::{EntityAction, EntityFields, RemoteEntity};
use crate::session::Session;
use crate::transport::{MultipartBody, RequestBody, Transport, TransportError};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::time::Duration;
use tracing::{debug, warn};

/// Error body returned by the backend: `{ message, errors? }`.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    #[serde(default)]
    errors: BTreeMap<String, String>,
}

/// Shared HTTP plumbing for every resource.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &AdminConfig, session: Session) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self::with_client(client, &config.api_base_url, session))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str, session: Session) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request for `path`, attaching the bearer token when there is one.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!(%method, %url, "API request");
        let request = self.client.request(method, url);
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub fn with_body(request: RequestBuilder, body: RequestBody) -> Result<RequestBuilder, TransportError> {
        match body {
            RequestBody::Json(value) => Ok(request.json(&value)),
            RequestBody::Multipart(form) => Ok(request.multipart(build_form(form)?)),
        }
    }

    /// Send and check the status. A 401 invalidates the session.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, TransportError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            self.session.invalidate();
            return Err(TransportError::Unauthorized);
        }
        Err(error_from_response(response).await)
    }

    /// Decode a JSON body; anything that isn't JSON yields `None`.
    pub async fn parse_optional<T: DeserializeOwned>(
        response: Response,
    ) -> Result<Option<T>, TransportError> {
        let Some(text) = json_text(response).await? else {
            return Ok(None);
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))
    }

    /// Decode the entity echoed by an accepted mutation.
    ///
    /// The mutation already succeeded, so a body that is not the entity (a bare
    /// `{ "message": .. }` acknowledgement, say) yields `None` rather than an error.
    pub async fn parse_echo<T: DeserializeOwned>(
        response: Response,
    ) -> Result<Option<T>, TransportError> {
        let Some(text) = json_text(response).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&text) {
            Ok(entity) => Ok(Some(entity)),
            Err(e) => {
                debug!(error = %e, "Response body is not the entity; treating as no echo");
                Ok(None)
            }
        }
    }

    pub async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
        Self::parse_optional(response)
            .await?
            .ok_or_else(|| TransportError::InvalidResponse("expected a JSON body".to_string()))
    }
}

/// The body of a JSON response, or `None` when it is not JSON or is blank.
async fn json_text(response: Response) -> Result<Option<String>, TransportError> {
    if !is_json(&response) {
        return Ok(None);
    }
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(text))
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"))
}

async fn error_from_response(response: Response) -> TransportError {
    let status = response.status().as_u16();
    let json = is_json(&response);
    let text = response.text().await.unwrap_or_default();
    if json {
        if let Ok(body) = serde_json::from_str::<ApiErrorBody>(&text) {
            warn!(status, message = ?body.message, "API error");
            return TransportError::Server {
                status,
                message: body
                    .message
                    .unwrap_or_else(|| "Something went wrong".to_string()),
                errors: body.errors,
            };
        }
    }
    warn!(status, "API error without JSON body");
    TransportError::server(status, format!("HTTP error! status: {}", status))
}

fn build_form(body: MultipartBody) -> Result<Form, TransportError> {
    let mut form = Form::new();
    for (name, value) in body.fields {
        form = form.text(name, value);
    }
    for (name, file) in body.files {
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|e| TransportError::Network(e.to_string()))?;
        form = form.part(name, part);
    }
    Ok(form)
}

/// [`Transport`] for one resource over HTTP.
pub struct RestTransport<T: RemoteEntity> {
    api: ApiClient,
    _entity: PhantomData<fn() -> T>,
}

impl<T: RemoteEntity> RestTransport<T> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _entity: PhantomData,
        }
    }

    fn item_path(id: &T::Id) -> String {
        format!("{}/{}", T::RESOURCE, id)
    }
}

#[async_trait]
impl<T: RemoteEntity> Transport<T> for RestTransport<T> {
    async fn list(&self) -> Result<Vec<T>, TransportError> {
        let response = self.api.send(self.api.request(Method::GET, T::RESOURCE)).await?;
        ApiClient::parse_json(response).await
    }

    async fn fetch(&self, id: &T::Id) -> Result<Option<T>, TransportError> {
        let request = self.api.request(Method::GET, &Self::item_path(id));
        match self.api.send(request).await {
            Ok(response) => ApiClient::parse_optional(response).await,
            Err(TransportError::Server { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create(&self, fields: &T::Fields) -> Result<Option<T>, TransportError> {
        let request = self.api.request(Method::POST, T::RESOURCE);
        let request = ApiClient::with_body(request, fields.to_body())?;
        let response = self.api.send(request).await?;
        ApiClient::parse_echo(response).await
    }

    async fn update(&self, id: &T::Id, fields: &T::Fields) -> Result<Option<T>, TransportError> {
        let request = self.api.request(Method::PUT, &Self::item_path(id));
        let request = ApiClient::with_body(request, fields.to_body())?;
        let response = self.api.send(request).await?;
        ApiClient::parse_echo(response).await
    }

    async fn delete(&self, id: &T::Id) -> Result<(), TransportError> {
        let request = self.api.request(Method::DELETE, &Self::item_path(id));
        self.api.send(request).await?;
        Ok(())
    }

    async fn action(&self, id: &T::Id, action: &T::Action) -> Result<Option<T>, TransportError> {
        let path = format!("{}/{}", Self::item_path(id), action.path());
        let response = self.api.send(self.api.request(Method::PUT, &path)).await?;
        ApiClient::parse_echo(response).await
    }
}
