//! Playlist Service Client
//!
//! HTTP bindings to the playlist REST API, behind the `PlaylistStore`
//! trait so the reconcile flows can run against a fake store in tests.
//! Every endpoint wraps its payload in the service's `RsData` envelope;
//! a non-2xx envelope code is a failure even under HTTP 200.

use async_trait::async_trait;
use leptos::prelude::{LocalStorage, StoredValue};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::models::{LinkCreate, LinkPatch, OrderEntry, Playlist};

/// Handle for sharing the app's store through context. The browser client
/// is not `Send`, so components pass this arena handle around instead.
pub type StoreHandle = StoredValue<HttpPlaylistStore, LocalStorage>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server rejected request ({code}): {msg}")]
    Server { code: String, msg: String },
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Response envelope used by every endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct RsData<T> {
    pub code: String,
    pub msg: String,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> RsData<T> {
    /// Envelope codes look like `200-1`; the part before the dash is the
    /// HTTP-style status class.
    pub fn is_success(&self) -> bool {
        self.code
            .split('-')
            .next()
            .is_some_and(|status| status.starts_with('2'))
    }

    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.is_success() {
            return Err(ApiError::Server { code: self.code, msg: self.msg });
        }
        self.data
            .ok_or_else(|| ApiError::Decode("success envelope without data".into()))
    }

    pub fn into_unit(self) -> Result<(), ApiError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(ApiError::Server { code: self.code, msg: self.msg })
        }
    }
}

/// Store operations the ordering engine consumes
#[async_trait(?Send)]
pub trait PlaylistStore {
    async fn get_playlist(&self, playlist_id: i64) -> Result<Playlist, ApiError>;
    async fn set_order(&self, playlist_id: i64, order: &[OrderEntry]) -> Result<Playlist, ApiError>;
    async fn delete_item(&self, playlist_id: i64, item_id: i64, delete_children: bool) -> Result<(), ApiError>;
    async fn update_item(&self, playlist_id: i64, item_id: i64, patch: &LinkPatch<'_>) -> Result<(), ApiError>;
    async fn add_link(&self, playlist_id: i64, link: &LinkCreate<'_>) -> Result<Playlist, ApiError>;
}

/// HTTP client against the playlist service
#[derive(Clone)]
pub struct HttpPlaylistStore {
    client: reqwest::Client,
    base: String,
}

impl HttpPlaylistStore {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn playlist_url(&self, playlist_id: i64) -> String {
        format!("{}/api/v1/playlists/{}", self.base, playlist_id)
    }

    /// Session cookie must ride along on browser fetches
    fn with_credentials(request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();
        request
    }

    /// Reads must bypass every cache between us and the service
    fn no_cache(request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        use reqwest::header;
        request
            .header(header::CACHE_CONTROL, "no-cache, no-store, must-revalidate")
            .header(header::PRAGMA, "no-cache")
            .header(header::EXPIRES, "0")
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(ApiError::Server { code: status.as_u16().to_string(), msg });
        }
        let envelope: RsData<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        envelope.into_data()
    }

    async fn decode_unit(response: reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();
        if !status.is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(ApiError::Server { code: status.as_u16().to_string(), msg });
        }
        let envelope: RsData<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        envelope.into_unit()
    }
}

#[async_trait(?Send)]
impl PlaylistStore for HttpPlaylistStore {
    async fn get_playlist(&self, playlist_id: i64) -> Result<Playlist, ApiError> {
        let request = Self::no_cache(Self::with_credentials(
            self.client.get(self.playlist_url(playlist_id)),
        ));
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn set_order(&self, playlist_id: i64, order: &[OrderEntry]) -> Result<Playlist, ApiError> {
        let url = format!("{}/items/order", self.playlist_url(playlist_id));
        let request = Self::with_credentials(self.client.patch(url)).json(order);
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn delete_item(&self, playlist_id: i64, item_id: i64, delete_children: bool) -> Result<(), ApiError> {
        let url = format!("{}/items/{}", self.playlist_url(playlist_id), item_id);
        let request = Self::with_credentials(self.client.delete(url))
            .query(&[("deleteChildren", delete_children)]);
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode_unit(response).await
    }

    async fn update_item(&self, playlist_id: i64, item_id: i64, patch: &LinkPatch<'_>) -> Result<(), ApiError> {
        let url = format!("{}/items/{}", self.playlist_url(playlist_id), item_id);
        let request = Self::with_credentials(self.client.patch(url)).json(patch);
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode_unit(response).await
    }

    async fn add_link(&self, playlist_id: i64, link: &LinkCreate<'_>) -> Result<Playlist, ApiError> {
        let url = format!("{}/items/link", self.playlist_url(playlist_id));
        let request = Self::with_credentials(self.client.post(url)).json(link);
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_unwraps_data() {
        let envelope: RsData<Playlist> = serde_json::from_str(
            r#"{"code":"200-1","msg":"Success","data":{"id":1,"title":"테스트","items":[]}}"#,
        )
        .unwrap();
        assert!(envelope.is_success());
        let playlist = envelope.into_data().unwrap();
        assert_eq!(playlist.id, 1);
        assert!(playlist.items.is_empty());
    }

    #[test]
    fn failure_envelope_is_an_error_even_with_http_200() {
        let envelope: RsData<Playlist> =
            serde_json::from_str(r#"{"code":"400-1","msg":"잘못된 요청입니다."}"#).unwrap();
        assert!(!envelope.is_success());
        match envelope.into_data() {
            Err(ApiError::Server { code, msg }) => {
                assert_eq!(code, "400-1");
                assert_eq!(msg, "잘못된 요청입니다.");
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[test]
    fn unit_envelope_ignores_missing_data() {
        let envelope: RsData<serde_json::Value> =
            serde_json::from_str(r#"{"code":"200-1","msg":"삭제되었습니다."}"#).unwrap();
        assert!(envelope.into_unit().is_ok());
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let store = HttpPlaylistStore::new(&ApiConfig {
            base_url: "http://localhost:8080/".into(),
        });
        assert_eq!(
            store.playlist_url(3),
            "http://localhost:8080/api/v1/playlists/3"
        );
    }
}
