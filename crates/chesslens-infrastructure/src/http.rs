//! HTTP adapter for the ChessLens API.
//!
//! One client implements every remote service trait. Authenticated calls
//! read the bearer token from the shared [`SessionContext`] at request time,
//! so a login or logout takes effect on the next call.

use crate::dto::{
    PositionDto, PredictionDto, TokenDto, UploadResponseDto, UserDto, error_message,
};
use async_trait::async_trait;
use chesslens_core::auth::{AuthService, NewUser, RegisteredUser};
use chesslens_core::board::{BoardId, BoardRecord, BoardUpdate, LibraryService};
use chesslens_core::capture::{ImageUpload, Prediction, PredictionService};
use chesslens_core::config::ClientConfig;
use chesslens_core::session::{Credential, SessionContext};
use chesslens_core::{LensError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::{debug, warn};

/// A request that did not produce a success response.
#[derive(Debug)]
struct Failure {
    status: Option<StatusCode>,
    message: String,
}

impl Failure {
    fn is(&self, status: StatusCode) -> bool {
        self.status == Some(status)
    }

    fn into_error(self, kind: fn(String) -> LensError) -> LensError {
        kind(self.to_string())
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} {}", status.as_u16(), self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

pub struct HttpLibraryClient {
    client: Client,
    base_url: String,
    analysis_base_url: String,
    session: SessionContext,
}

impl HttpLibraryClient {
    pub fn new(config: &ClientConfig, session: SessionContext) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| LensError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            analysis_base_url: config.analysis_base_url.clone(),
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn position_url(&self, id: &BoardId) -> String {
        self.url(&format!("/positions/{id}"))
    }

    /// Attaches the bearer token, or refuses to build the request.
    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let credential = self.session.credential().ok_or(LensError::Unauthenticated)?;
        Ok(request.bearer_auth(credential.bearer_token()))
    }

    async fn execute(&self, request: RequestBuilder) -> std::result::Result<Response, Failure> {
        let response = request.send().await.map_err(|e| Failure {
            status: None,
            message: format!("Request failed: {e}"),
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        debug!(status = status.as_u16(), %message, "Request rejected");
        Err(Failure {
            status: Some(status),
            message: if message.is_empty() {
                status.canonical_reason().unwrap_or("error").to_string()
            } else {
                message
            },
        })
    }

    async fn read_json<T: DeserializeOwned>(
        response: Response,
        kind: fn(String) -> LensError,
    ) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| kind(format!("Invalid response body: {e}")))
    }

    fn image_part(image: &ImageUpload, kind: fn(String) -> LensError) -> Result<Part> {
        Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| kind(format!("Invalid content type '{}': {e}", image.content_type)))
    }
}

#[async_trait]
impl PredictionService for HttpLibraryClient {
    async fn predict(&self, image: &ImageUpload) -> Result<Prediction> {
        let form = Form::new().part("file", Self::image_part(image, LensError::Prediction)?);
        let mut request = self.client.post(self.url("/predict")).multipart(form);
        if let Some(credential) = self.session.credential() {
            request = request.bearer_auth(credential.bearer_token());
        }

        debug!(file = %image.file_name, "POST /predict");
        let response = self
            .execute(request)
            .await
            .map_err(|f| f.into_error(LensError::Prediction))?;
        let dto: PredictionDto = Self::read_json(response, LensError::Prediction).await?;
        Ok(dto.into_prediction(&self.analysis_base_url))
    }
}

#[async_trait]
impl LibraryService for HttpLibraryClient {
    async fn create_board(&self, image: &ImageUpload, fen: &str) -> Result<BoardRecord> {
        let form = Form::new()
            .part("file", Self::image_part(image, LensError::Save)?)
            .text("fen", fen.to_string());
        let request = self.authorized(self.client.post(self.url("/fen/upload")).multipart(form))?;

        debug!(file = %image.file_name, "POST /fen/upload");
        let response = self
            .execute(request)
            .await
            .map_err(|f| f.into_error(LensError::Save))?;
        let dto: UploadResponseDto = Self::read_json(response, LensError::Save).await?;
        Ok(dto.into_record(fen))
    }

    async fn list_boards(&self) -> Result<Vec<BoardRecord>> {
        let request = self.authorized(self.client.get(self.url("/fen/library")))?;

        debug!("GET /fen/library");
        let response = self
            .execute(request)
            .await
            .map_err(|f| f.into_error(LensError::Fetch))?;
        let positions: Vec<PositionDto> = Self::read_json(response, LensError::Fetch).await?;
        Ok(positions.into_iter().map(BoardRecord::from).collect())
    }

    async fn get_board(&self, id: &BoardId) -> Result<BoardRecord> {
        let request = self.authorized(self.client.get(self.position_url(id)))?;

        debug!(board_id = %id, "GET /positions/{{id}}");
        let response = self.execute(request).await.map_err(|f| {
            if f.is(StatusCode::NOT_FOUND) {
                LensError::not_found("board", id.as_str())
            } else {
                f.into_error(LensError::Fetch)
            }
        })?;
        let dto: PositionDto = Self::read_json(response, LensError::Fetch).await?;
        Ok(dto.into())
    }

    async fn update_board(&self, id: &BoardId, update: &BoardUpdate) -> Result<BoardRecord> {
        let request = self.authorized(self.client.patch(self.position_url(id)).json(update))?;

        debug!(board_id = %id, "PATCH /positions/{{id}}");
        let response = self
            .execute(request)
            .await
            .map_err(|f| f.into_error(LensError::Save))?;
        let dto: PositionDto = Self::read_json(response, LensError::Save).await?;
        Ok(dto.into())
    }

    async fn delete_board(&self, id: &BoardId) -> Result<()> {
        let request = self.authorized(self.client.delete(self.position_url(id)))?;

        debug!(board_id = %id, "DELETE /positions/{{id}}");
        self.execute(request)
            .await
            .map_err(|f| f.into_error(LensError::Delete))?;
        Ok(())
    }
}

#[async_trait]
impl AuthService for HttpLibraryClient {
    async fn login(&self, username: &str, password: &str) -> Result<Credential> {
        let request = self
            .client
            .post(self.url("/auth/login"))
            .form(&[("username", username), ("password", password)]);

        debug!(%username, "POST /auth/login");
        let response = self
            .execute(request)
            .await
            .map_err(|f| f.into_error(LensError::Auth))?;
        let token: TokenDto = Self::read_json(response, LensError::Auth).await?;

        if let Some(kind) = token.token_type.as_deref() {
            if !kind.eq_ignore_ascii_case("bearer") {
                warn!(token_type = kind, "Unexpected token type, using it as a bearer token");
            }
        }
        Ok(Credential::new(token.access_token))
    }

    async fn register(&self, user: &NewUser) -> Result<RegisteredUser> {
        let request = self.client.post(self.url("/auth/register")).json(user);

        debug!(username = %user.username, "POST /auth/register");
        let response = self
            .execute(request)
            .await
            .map_err(|f| f.into_error(LensError::Auth))?;
        let dto: UserDto = Self::read_json(response, LensError::Auth).await?;
        Ok(dto.into())
    }
}
