//! Configuration types for media-dl

use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::PathBuf, time::Duration};
use utoipa::ToSchema;

/// Temporary-storage configuration
///
/// The storage root holds one subdirectory per in-flight task plus the zip
/// archives produced by multi-file batches. It is created once at startup if
/// absent and never torn down; concurrent tasks only ever touch disjoint
/// subtrees under it.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct StorageConfig {
    /// Root directory for per-task workspaces and archives (default: "temp_downloads")
    #[serde(default = "default_temp_root")]
    pub temp_root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            temp_root: default_temp_root(),
        }
    }
}

/// Media-extraction configuration
///
/// Settings handed to the external extraction binary once per batch. The
/// resulting session configuration is immutable for the life of the batch.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ExtractionConfig {
    /// Path to the yt-dlp executable (auto-detected from PATH if None)
    #[serde(default)]
    pub ytdlp_path: Option<PathBuf>,

    /// Cookie file consulted if present, to reduce upstream rate-limiting
    /// (default: "cookies.txt")
    #[serde(default = "default_cookie_file")]
    pub cookie_file: PathBuf,

    /// Browser-like User-Agent attached to outbound extraction requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Target audio bitrate in kbps for audio batches (default: 192)
    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate: u32,

    /// Expand playlist URLs into their entries (default: true)
    #[serde(default = "default_true")]
    pub expand_playlists: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: None,
            cookie_file: default_cookie_file(),
            user_agent: default_user_agent(),
            audio_bitrate: default_audio_bitrate(),
            expand_playlists: true,
        }
    }
}

/// Lyric-search configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LyricsConfig {
    /// Base URL of the LRCLIB-compatible search API (default: "https://lrclib.net")
    #[serde(default = "default_lyrics_base_url")]
    pub base_url: String,

    /// Per-search request timeout (default: 10 seconds)
    #[serde(default = "default_lyrics_timeout", with = "duration_serde")]
    #[schema(value_type = u64)]
    pub timeout: Duration,
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            base_url: default_lyrics_base_url(),
            timeout: default_lyrics_timeout(),
        }
    }
}

/// REST API configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiConfig {
    /// Address to bind to (default: 0.0.0.0:10000)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable Swagger UI at /swagger-ui (default: false)
    #[serde(default)]
    pub swagger_ui: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: false,
        }
    }
}

/// Main configuration for [`BatchDownloader`](crate::BatchDownloader)
///
/// Fields are organized into logical sub-configs:
/// - [`storage`](StorageConfig) — temp root for workspaces and archives
/// - [`extraction`](ExtractionConfig) — external binary, cookies, format targets
/// - [`lyrics`](LyricsConfig) — lyric-search provider endpoint
/// - [`api`](ApiConfig) — REST server binding and CORS
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Config {
    /// Temporary-storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Media-extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Lyric-search settings
    #[serde(default)]
    pub lyrics: LyricsConfig,

    /// REST API settings
    #[serde(default)]
    pub api: ApiConfig,
}

fn default_temp_root() -> PathBuf {
    PathBuf::from("temp_downloads")
}

fn default_cookie_file() -> PathBuf {
    PathBuf::from("cookies.txt")
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}

fn default_audio_bitrate() -> u32 {
    192
}

fn default_lyrics_base_url() -> String {
    "https://lrclib.net".to_string()
}

fn default_lyrics_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 10000))
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_true() -> bool {
    true
}

// Duration serialization helper (seconds as u64)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
