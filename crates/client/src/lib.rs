//! HTTP client for the Viewus API.
//!
//! [`HttpSpaceGateway`] implements the wizard's [`PersistenceGateway`] over
//! the `/api/v1/spaces` endpoints, so a [`WizardSession`] can run against a
//! remote server exactly as it does against the database.
//!
//! [`WizardSession`]: viewus_core::wizard_session::WizardSession

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use viewus_core::gateway::{GatewayError, PersistenceGateway};
use viewus_core::space_draft::{SectionValue, SpaceDraft};
use viewus_core::space_record::{CreatedSpace, SpaceRecord};
use viewus_core::space_validation::FieldErrors;
use viewus_core::types::DbId;
use url::Url;

/// `{ "data": T }` success envelope.
#[derive(Debug, Deserialize)]
struct DataResponse<T> {
    data: T,
}

/// `{ "error", "code", "details"? }` error envelope.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    details: Option<FieldErrors>,
}

#[derive(Debug, Deserialize)]
struct SlugAvailability {
    available: bool,
}

/// Errors from the HTTP layer, before they are mapped onto the gateway
/// taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum HttpGatewayError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("API error ({status} {code}): {body}")]
    Api {
        status: u16,
        code: String,
        details: Option<FieldErrors>,
        body: String,
    },
}

impl HttpGatewayError {
    /// Map onto [`GatewayError`]. `key` names the slug or id the request
    /// was about.
    pub fn into_gateway_error(self, key: &str) -> GatewayError {
        match self {
            Self::Request(err) => GatewayError::Network(err.to_string()),
            Self::Api {
                status: 400,
                details,
                ..
            } => GatewayError::Validation(details.unwrap_or_default()),
            Self::Api { status: 409, code, .. } if code == "DUPLICATE_SLUG" => {
                GatewayError::DuplicateSlug(key.to_string())
            }
            Self::Api { status: 404, .. } => GatewayError::NotFound(key.to_string()),
            // Timeouts and rate limits clear up on their own.
            other @ Self::Api {
                status: 408 | 429, ..
            } => GatewayError::Network(other.to_string()),
            Self::Api {
                status: status @ 400..=499,
                code,
                ..
            } => GatewayError::Rejected { status, code },
            other => GatewayError::Network(other.to_string()),
        }
    }
}

/// Gateway talking to a Viewus API server with a bearer token.
pub struct HttpSpaceGateway {
    client: reqwest::Client,
    api_url: Url,
    token: String,
}

impl HttpSpaceGateway {
    /// * `api_url` - Server origin, e.g. `http://localhost:3000`.
    pub fn new(api_url: &str, token: impl Into<String>) -> Result<Self, url::ParseError> {
        Self::with_client(reqwest::Client::new(), api_url, token)
    }

    /// Reuse an existing [`reqwest::Client`] (connection pooling).
    pub fn with_client(
        client: reqwest::Client,
        api_url: &str,
        token: impl Into<String>,
    ) -> Result<Self, url::ParseError> {
        let api_url = Url::parse(api_url)?;
        if api_url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
        }
        Ok(Self {
            client,
            api_url,
            token: token.into(),
        })
    }

    /// `{api_url}/api/v1/{segments...}`, each segment percent-encoded.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["api", "v1"]).extend(segments);
        }
        url
    }

    /// Whether `slug` is well-formed and not yet used by any space.
    pub async fn slug_available(&self, slug: &str) -> Result<bool, GatewayError> {
        let request = self
            .client
            .get(self.url(&["spaces", "slug-availability"]))
            .query(&[("slug", slug)]);
        let body: SlugAvailability = self.send(request, slug).await?;
        Ok(body.available)
    }

    // ---- private helpers ----

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        key: &str,
    ) -> Result<T, GatewayError> {
        self.execute(request).await.map_err(|err| {
            tracing::warn!(error = %err, key, "Gateway request failed");
            err.into_gateway_error(key)
        })
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, HttpGatewayError> {
        let response = request.bearer_auth(&self.token).send().await?;
        Self::parse_response(response).await
    }

    /// Ensure the response has a success status code, decoding the error
    /// envelope otherwise.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, HttpGatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
        Err(HttpGatewayError::Api {
            status: status.as_u16(),
            code: parsed.code,
            details: parsed.details,
            body,
        })
    }

    /// Parse a successful `{ "data": T }` response.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, HttpGatewayError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<DataResponse<T>>().await?.data)
    }
}

#[async_trait]
impl PersistenceGateway for HttpSpaceGateway {
    async fn create(&self, draft: &SpaceDraft) -> Result<CreatedSpace, GatewayError> {
        let request = self.client.post(self.url(&["spaces"])).json(draft);
        self.send(request, &draft.project_details.project_slug).await
    }

    async fn update(&self, id: DbId, value: &SectionValue) -> Result<SectionValue, GatewayError> {
        let id = id.to_string();
        let request = self
            .client
            .put(self.url(&["spaces", &id, "sections"]))
            .json(value);
        self.send(request, &id.to_string()).await
    }

    async fn fetch(&self, slug: &str) -> Result<SpaceRecord, GatewayError> {
        let request = self.client.get(self.url(&["spaces", "by-slug", slug]));
        self.send(request, slug).await
    }
}
