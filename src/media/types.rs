use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Reply of the extraction service. `data` is missing or null when it could not
/// resolve the post.
#[derive(Debug, Deserialize, Default)]
pub struct ExtractionEnvelope {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<RawExtractionResult>,
}

/// Post details as returned by the extraction service. Every field is optional:
/// the service omits whatever does not apply to the post (sizes for slideshows,
/// images for videos) and is not consistent about numbers vs. strings.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawExtractionResult {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cover: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub duration: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub create_time: Option<u64>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub play: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub wmplay: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub hdplay: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub size: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub wm_size: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub hd_size: Option<u64>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub images: Option<Vec<String>>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub music: Option<String>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub music_info: Option<RawMusicInfo>,

    #[serde(default, deserialize_with = "lenient_u64")]
    pub play_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub digg_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub comment_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub share_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub download_count: Option<u64>,

    #[serde(default, deserialize_with = "lenient_object")]
    pub author: Option<RawAuthor>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawMusicInfo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub album: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub play: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawAuthor {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub unique_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub nickname: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub avatar: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Array(items) => Some(
            items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect(),
        ),
        _ => None,
    }))
}

/// Nested objects that arrive as anything other than a JSON object count as absent.
fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Object(_) => serde_json::from_value(v).ok(),
        _ => None,
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Photo,
    Watermark,
    Nowatermark,
    NowatermarkHd,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaItem {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MusicInfo {
    pub id: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub album: Option<String>,
    pub url: Option<String>,
}

/// Counters, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub views: String,
    pub likes: String,
    pub comment: String,
    pub share: String,
    pub download: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub id: Option<String>,
    pub fullname: Option<String>,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
}

/// Public response schema served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedResult {
    pub status: bool,
    pub developer: String,
    pub title: Option<String>,
    pub taken_at: Option<String>,
    pub region: Option<String>,
    pub id: Option<String>,
    pub durations: Option<u64>,
    pub duration: String,
    pub cover: Option<String>,
    pub size_wm: Option<u64>,
    pub size_nowm: Option<u64>,
    pub size_nowm_hd: Option<u64>,
    pub data: Vec<MediaItem>,
    pub music_info: MusicInfo,
    pub stats: Stats,
    pub author: Author,
}
