use super::types::{
    Author, MediaItem, MediaKind, MusicInfo, NormalizedResult, RawExtractionResult, Stats,
};
use crate::utils::{format_date, format_number};

/// The extraction service returned no usable payload.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Failed to fetch TikTok data")]
pub struct ExtractionFailure;

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn has_size(value: Option<u64>) -> bool {
    value.is_some_and(|n| n != 0)
}

fn is_slideshow(raw: &RawExtractionResult) -> bool {
    let has_any_size = has_size(raw.size) || has_size(raw.wm_size) || has_size(raw.hd_size);
    !has_any_size && raw.images.is_some()
}

fn media_items(raw: &RawExtractionResult) -> Vec<MediaItem> {
    if is_slideshow(raw) {
        return raw
            .images
            .iter()
            .flatten()
            .map(|url| MediaItem {
                kind: MediaKind::Photo,
                url: url.clone(),
            })
            .collect();
    }

    [
        (MediaKind::Watermark, &raw.wmplay),
        (MediaKind::Nowatermark, &raw.play),
        (MediaKind::NowatermarkHd, &raw.hdplay),
    ]
    .into_iter()
    .filter_map(|(kind, url)| {
        present(url).map(|url| MediaItem {
            kind,
            url: url.to_string(),
        })
    })
    .collect()
}

fn music_info(raw: &RawExtractionResult) -> MusicInfo {
    let info = raw.music_info.as_ref();
    MusicInfo {
        id: info.and_then(|m| m.id.clone()),
        title: info.and_then(|m| m.title.clone()),
        author: info.and_then(|m| m.author.clone()),
        album: info.and_then(|m| present(&m.album)).map(str::to_string),
        url: present(&raw.music)
            .map(str::to_string)
            .or_else(|| info.and_then(|m| m.play.clone())),
    }
}

fn stats(raw: &RawExtractionResult) -> Stats {
    let count = |value: Option<u64>| format_number(value.unwrap_or(0));
    Stats {
        views: count(raw.play_count),
        likes: count(raw.digg_count),
        comment: count(raw.comment_count),
        share: count(raw.share_count),
        download: count(raw.download_count),
    }
}

fn author(raw: &RawExtractionResult) -> Author {
    let author = raw.author.as_ref();
    Author {
        id: author.and_then(|a| a.id.clone()),
        fullname: author.and_then(|a| a.unique_id.clone()),
        nickname: author.and_then(|a| a.nickname.clone()),
        avatar: author.and_then(|a| a.avatar.clone()),
    }
}

/// Reshapes the extraction service payload into the public response schema.
///
/// Missing nested objects (author, music info) degrade to `None` fields; only a
/// missing payload is an error.
pub fn normalize(
    raw: Option<&RawExtractionResult>,
    developer: &str,
) -> Result<NormalizedResult, ExtractionFailure> {
    let raw = raw.ok_or(ExtractionFailure)?;

    Ok(NormalizedResult {
        status: true,
        developer: developer.to_string(),
        title: raw.title.clone(),
        taken_at: raw
            .create_time
            .and_then(|t| i64::try_from(t).ok())
            .and_then(format_date),
        region: raw.region.clone(),
        id: raw.id.clone(),
        durations: raw.duration,
        duration: format!("{} Seconds", raw.duration.unwrap_or(0)),
        cover: raw.cover.clone(),
        size_wm: raw.wm_size,
        size_nowm: raw.size,
        size_nowm_hd: raw.hd_size,
        data: media_items(raw),
        music_info: music_info(raw),
        stats: stats(raw),
        author: author(raw),
    })
}
