//! YouTube Data API client
//!
//! This crate provides a trait-based client for the two remote operations the
//! bulk editor needs: listing the videos of a playlist and updating a video's
//! snippet. Calls are authorized through an [`Authenticator`] that owns the
//! stored OAuth2 credentials.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │          YouTubeClient trait         │
//! │  - list_playlist_items()             │
//! │  - fetch_video()                     │
//! │  - update_video()                    │
//! └──────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌──────────────────┐      ┌───────────────────┐
//! │ YouTubeRestClient│─────►│  Authenticator    │
//! │ (reqwest)        │      │  (token refresh,  │
//! └──────────────────┘      │   auth guard)     │
//!                           └───────────────────┘
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod rest_client;
pub mod tags;
pub mod types;

/// Default YouTube Data API endpoint
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Listing cap used when a whole playlist should be read
pub const UNBOUNDED_LISTING: usize = 1_000_000;

pub use auth::{AuthorizationGuard, AuthorizationTicket, Authenticator};
pub use client::YouTubeClient;
pub use error::ApiError;
pub use rest_client::YouTubeRestClient;
pub use tags::fit_tags;
pub use types::{NotFoundPolicy, PlaylistItem, VideoUpdate};
