//! HTTP client for the session API.

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::future::Future;
use uuid::Uuid;

use super::{ClientError, GameApi};
use crate::config::ClientConfig;
use crate::models::{CreatedGame, ErrorBody, GameState, GuessInput};

/// HTTP client for the session API. Holds a connection pool; cheap to clone.
#[derive(Debug, Clone)]
pub struct GameClient {
    base_url: String,
    client: Client,
}

impl GameClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.client.request(method, format!("{}{}", self.base_url, path))
    }

    /// Decode a response, turning `{ "error": ... }` bodies into errors.
    ///
    /// Older servers report failures with a 200 status, so a success status
    /// whose body is an error payload is still treated as a rejection.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            if let Ok(ErrorBody { error }) = serde_json::from_str(&body) {
                return Err(ClientError::Rejected(error));
            }
            return Ok(serde_json::from_str(&body)?);
        }

        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);
        match status {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(ClientError::Rejected(message))
            }
            _ => Err(ClientError::Server(format!("{}: {}", status, message))),
        }
    }

    /// Start a new game.
    pub async fn create_game(&self) -> Result<CreatedGame, ClientError> {
        let response = self.request(Method::POST, "/game/new").send().await?;
        self.handle_response(response).await
    }

    /// Fetch the current state of a game.
    pub async fn get_game(&self, id: Uuid) -> Result<GameState, ClientError> {
        let response = self
            .request(Method::GET, &format!("/game/{}", id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Submit a guess.
    pub async fn make_guess(&self, id: Uuid, word: &str) -> Result<GameState, ClientError> {
        let response = self
            .request(Method::POST, &format!("/game/{}/make_guess", id))
            .json(&GuessInput {
                guess: word.to_string(),
            })
            .send()
            .await?;
        self.handle_response(response).await
    }
}

impl GameApi for GameClient {
    fn create(&self) -> impl Future<Output = Result<CreatedGame, ClientError>> + Send {
        self.create_game()
    }

    fn state(&self, id: Uuid) -> impl Future<Output = Result<GameState, ClientError>> + Send {
        self.get_game(id)
    }

    fn guess(
        &self,
        id: Uuid,
        word: &str,
    ) -> impl Future<Output = Result<GameState, ClientError>> + Send {
        self.make_guess(id, word)
    }
}
