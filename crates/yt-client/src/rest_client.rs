//! reqwest-based YouTube Data API client
//!
//! Direct implementation of the `YouTubeClient` trait against the v3 REST API.

use crate::auth::Authenticator;
use crate::client::YouTubeClient;
use crate::error::ApiError;
use crate::tags::fit_tags;
use crate::types::{NotFoundPolicy, PlaylistItem, VideoUpdate};
use anyhow::Context;
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Largest page the playlistItems endpoint serves
const MAX_PAGE_SIZE: usize = 50;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemsResponse {
    #[serde(default)]
    items: Vec<RawPlaylistItem>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPlaylistItem {
    snippet: RawPlaylistSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlaylistSnippet {
    title: String,
    #[serde(default)]
    description: String,
    resource_id: RawResourceId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResourceId {
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<RawVideo>,
}

#[derive(Debug, Deserialize)]
struct RawVideo {
    id: String,
    snippet: RawVideoSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVideoSnippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    category_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl From<RawVideo> for PlaylistItem {
    fn from(video: RawVideo) -> Self {
        PlaylistItem {
            video_id: video.id,
            title: video.snippet.title,
            description: video.snippet.description,
            tags: video.snippet.tags,
            category_id: video.snippet.category_id,
        }
    }
}

/// Direct YouTube API client
#[derive(Debug, Clone)]
pub struct YouTubeRestClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    auth: Arc<Authenticator>,
}

impl YouTubeRestClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        auth: Arc<Authenticator>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            auth,
        }
    }

    pub fn authenticator(&self) -> &Arc<Authenticator> {
        &self.auth
    }

    fn endpoint(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), resource)
    }

    async fn get(&self, resource: &str, query: &[(&str, &str)]) -> anyhow::Result<Response> {
        let token = self.auth.access_token().await?;
        let response = self
            .http
            .get(self.endpoint(resource))
            .bearer_auth(token)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .with_context(|| format!("Failed to request {}", resource))?;
        Ok(response)
    }

    /// Attach tags and category from the videos endpoint
    async fn attach_video_details(&self, items: &mut [PlaylistItem]) -> anyhow::Result<()> {
        if items.is_empty() {
            return Ok(());
        }

        let ids = items
            .iter()
            .map(|item| item.video_id.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let response = self
            .get("videos", &[("part", "snippet"), ("id", ids.as_str())])
            .await?;
        let response = ensure_success(response).await?;
        let videos: VideosResponse = response.json().await?;

        let mut details: HashMap<String, RawVideoSnippet> = videos
            .items
            .into_iter()
            .map(|video| (video.id, video.snippet))
            .collect();

        for item in items.iter_mut() {
            if let Some(snippet) = details.remove(&item.video_id) {
                item.tags = snippet.tags;
                item.category_id = snippet.category_id;
            }
        }

        Ok(())
    }
}

/// Turn a non-2xx response into [`ApiError::Rejected`] carrying the API's message
async fn ensure_success(response: Response) -> anyhow::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|envelope| envelope.error.message)
        .unwrap_or(body);

    Err(ApiError::Rejected {
        status: status.as_u16(),
        message,
    }
    .into())
}

#[async_trait]
impl YouTubeClient for YouTubeRestClient {
    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        limit: usize,
        not_found: NotFoundPolicy,
    ) -> anyhow::Result<Vec<PlaylistItem>> {
        debug!("Listing up to {} items of playlist {}", limit, playlist_id);

        let mut items: Vec<PlaylistItem> = Vec::new();
        let mut page_token: Option<String> = None;

        while items.len() < limit {
            let remaining = limit - items.len();
            let page_size = remaining.min(MAX_PAGE_SIZE).to_string();

            let mut query = vec![
                ("part", "snippet"),
                ("playlistId", playlist_id),
                ("maxResults", page_size.as_str()),
            ];
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }

            let response = self.get("playlistItems", &query).await?;
            if response.status() == StatusCode::NOT_FOUND {
                return match not_found {
                    NotFoundPolicy::Empty => {
                        warn!("Playlist {} not found, treating as empty", playlist_id);
                        Ok(Vec::new())
                    }
                    NotFoundPolicy::Error => {
                        Err(ApiError::PlaylistNotFound(playlist_id.to_string()).into())
                    }
                };
            }

            let page: PlaylistItemsResponse = ensure_success(response).await?.json().await?;
            let mut page_items: Vec<PlaylistItem> = page
                .items
                .into_iter()
                .take(remaining)
                .map(|raw| PlaylistItem {
                    video_id: raw.snippet.resource_id.video_id,
                    title: raw.snippet.title,
                    description: raw.snippet.description,
                    tags: Vec::new(),
                    category_id: None,
                })
                .collect();

            self.attach_video_details(&mut page_items).await?;
            items.extend(page_items);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!("Listed {} items of playlist {}", items.len(), playlist_id);
        Ok(items)
    }

    async fn fetch_video(&self, video_id: &str) -> anyhow::Result<PlaylistItem> {
        debug!("Fetching video {}", video_id);

        let response = ensure_success(
            self.get("videos", &[("part", "snippet"), ("id", video_id)])
                .await?,
        )
        .await?;
        let videos: VideosResponse = response.json().await?;

        videos
            .items
            .into_iter()
            .next()
            .map(PlaylistItem::from)
            .ok_or_else(|| ApiError::VideoNotFound(video_id.to_string()).into())
    }

    async fn update_video(&self, update: &VideoUpdate) -> anyhow::Result<()> {
        info!(
            "Updating video {} title to {:?} and description to {:?}...",
            update.video_id, update.title, update.description
        );

        let category_id = match &update.category_id {
            Some(category) => category.clone(),
            None => self
                .fetch_video(&update.video_id)
                .await?
                .category_id
                .with_context(|| format!("Video {} has no category", update.video_id))?,
        };

        let body = serde_json::json!({
            "id": update.video_id,
            "snippet": {
                "title": update.title,
                "categoryId": category_id,
                "description": update.description,
                "tags": fit_tags(&update.tags),
            }
        });

        let token = self.auth.access_token().await?;
        let response = self
            .http
            .put(self.endpoint("videos"))
            .bearer_auth(token)
            .query(&[("part", "snippet"), ("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to update video {}", update.video_id))?;

        ensure_success(response).await?;
        debug!("Updated video {}", update.video_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use redesc_config::OAuthCredentials;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> YouTubeRestClient {
        let mut creds = OAuthCredentials::new("client", "secret");
        creds.set_token("token".to_string(), 3600, Utc::now());
        let auth = Arc::new(Authenticator::new(creds, None));
        YouTubeRestClient::new(server.uri(), "api-key", auth)
    }

    fn playlist_page(ids: &[&str], next: Option<&str>) -> serde_json::Value {
        let items: Vec<_> = ids
            .iter()
            .map(|id| {
                serde_json::json!({
                    "snippet": {
                        "title": format!("Title {}", id),
                        "description": format!("Description {}", id),
                        "resourceId": { "videoId": id }
                    }
                })
            })
            .collect();
        match next {
            Some(token) => serde_json::json!({ "items": items, "nextPageToken": token }),
            None => serde_json::json!({ "items": items }),
        }
    }

    async fn mount_videos(server: &MockServer, ids: &str, videos: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("id", ids))
            .respond_with(ResponseTemplate::new(200).set_body_json(videos))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_list_follows_pages_and_attaches_tags() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlistItems"))
            .and(query_param("pageToken", "p2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(playlist_page(&["c"], None)))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/playlistItems"))
            .and(header("authorization", "Bearer token"))
            .and(query_param("key", "api-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(playlist_page(&["a", "b"], Some("p2"))),
            )
            .mount(&server)
            .await;
        mount_videos(
            &server,
            "a,b",
            serde_json::json!({ "items": [
                {
                    "id": "a",
                    "snippet": { "title": "Title a", "tags": ["x", "y"], "categoryId": "22" }
                },
                { "id": "b", "snippet": { "title": "Title b", "categoryId": "10" } }
            ]}),
        )
        .await;
        mount_videos(
            &server,
            "c",
            serde_json::json!({ "items": [
                { "id": "c", "snippet": { "title": "Title c", "tags": ["z"] } }
            ]}),
        )
        .await;

        let items = client(&server)
            .list_playlist_items("PL1", 10, NotFoundPolicy::Empty)
            .await
            .unwrap();

        let ids: Vec<_> = items.iter().map(|i| i.video_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(items[0].tags, vec!["x".to_string(), "y".to_string()]);
        assert_eq!(items[0].category_id.as_deref(), Some("22"));
        assert!(items[1].tags.is_empty());
        assert_eq!(items[2].description, "Description c");
    }

    #[tokio::test]
    async fn test_list_stops_at_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlistItems"))
            .and(query_param("maxResults", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(playlist_page(&["a", "b"], Some("p2"))),
            )
            .mount(&server)
            .await;
        mount_videos(&server, "a", serde_json::json!({ "items": [] })).await;

        let items = client(&server)
            .list_playlist_items("PL1", 1, NotFoundPolicy::Empty)
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].video_id, "a");
    }

    #[tokio::test]
    async fn test_missing_playlist_follows_policy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlistItems"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client(&server);
        let empty = client
            .list_playlist_items("missing", 10, NotFoundPolicy::Empty)
            .await
            .unwrap();
        assert!(empty.is_empty());

        let err = client
            .list_playlist_items("missing", 10, NotFoundPolicy::Error)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::PlaylistNotFound(id)) if id == "missing"
        ));
    }

    #[tokio::test]
    async fn test_update_sends_snippet() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/videos"))
            .and(query_param("part", "snippet"))
            .and(body_partial_json(serde_json::json!({
                "id": "a",
                "snippet": {
                    "title": "New",
                    "description": "Desc",
                    "categoryId": "22",
                    "tags": ["t"]
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let update = VideoUpdate {
            video_id: "a".to_string(),
            title: "New".to_string(),
            description: "Desc".to_string(),
            tags: vec!["t".to_string()],
            category_id: Some("22".to_string()),
        };
        client(&server).update_video(&update).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_fetches_missing_category() {
        let server = MockServer::start().await;
        mount_videos(
            &server,
            "a",
            serde_json::json!({ "items": [
                { "id": "a", "snippet": { "title": "Old", "categoryId": "27" } }
            ]}),
        )
        .await;
        Mock::given(method("PUT"))
            .and(path("/videos"))
            .and(body_partial_json(serde_json::json!({ "snippet": { "categoryId": "27" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let update = VideoUpdate {
            video_id: "a".to_string(),
            title: "New".to_string(),
            description: String::new(),
            tags: Vec::new(),
            category_id: None,
        };
        client(&server).update_video(&update).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_update_carries_api_message() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": { "code": 403, "message": "quotaExceeded" }
            })))
            .mount(&server)
            .await;

        let update = VideoUpdate {
            video_id: "a".to_string(),
            title: "New".to_string(),
            description: String::new(),
            tags: Vec::new(),
            category_id: Some("22".to_string()),
        };
        let err = client(&server).update_video(&update).await.unwrap_err();
        match err.downcast_ref::<ApiError>() {
            Some(ApiError::Rejected { status, message }) => {
                assert_eq!(*status, 403);
                assert_eq!(message, "quotaExceeded");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
