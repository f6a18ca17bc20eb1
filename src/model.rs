use serde::Deserialize;
use std::fmt;

// --- Display records ---

/// View count as delivered by the API: sometimes a string, sometimes a number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ViewCount {
  Number(u64),
  /// Any other JSON number (negative, fractional), shown as sent.
  OtherNumber(serde_json::Number),
  Text(String),
}

impl fmt::Display for ViewCount {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ViewCount::Number(n) => write!(f, "{}", n),
      ViewCount::OtherNumber(n) => write!(f, "{}", n),
      ViewCount::Text(s) => f.write_str(s),
    }
  }
}

/// A single video, normalized for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayVideo {
  pub id: String,
  pub title: String,
  pub thumbnail_url: String,
  pub view_count: ViewCount,
  pub published_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
  pub name: String,
  pub profile_image_url: String,
}

/// Normalizer output for one successful fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoPage {
  pub videos: Vec<DisplayVideo>,
  /// Channel of the first video, when the API sent one.
  pub channel: Option<ChannelInfo>,
}

// --- Wire shapes ---

#[derive(Debug, Deserialize)]
struct RawVideosResponse {
  videos: Vec<RawVideo>,
}

#[derive(Debug, Deserialize)]
struct RawVideo {
  id: String,
  title: String,
  thumbnail_url: String,
  view_count: ViewCount,
  published_at: String,
  #[serde(default)]
  channel: Option<RawChannel>,
}

#[derive(Debug, Deserialize)]
struct RawChannel {
  name: String,
  profile_image_url: String,
}

impl From<RawVideo> for DisplayVideo {
  fn from(raw: RawVideo) -> Self {
    Self {
      id: raw.id,
      title: raw.title,
      thumbnail_url: raw.thumbnail_url,
      view_count: raw.view_count,
      published_at: raw.published_at,
    }
  }
}

impl From<RawChannel> for ChannelInfo {
  fn from(raw: RawChannel) -> Self {
    Self { name: raw.name, profile_image_url: raw.profile_image_url }
  }
}

/// Parse a `/videos/all` response body into display records.
///
/// Order is preserved from the response. Any shape mismatch (not JSON, no
/// `videos` array, a video missing a required field) is an error rather than
/// a partial page.
pub fn normalize(body: &[u8]) -> Result<VideoPage, serde_json::Error> {
  let raw: RawVideosResponse = serde_json::from_slice(body)?;
  let mut videos = raw.videos.into_iter();
  let Some(mut first) = videos.next() else {
    return Ok(VideoPage::default());
  };
  let channel = first.channel.take().map(ChannelInfo::from);
  let videos = std::iter::once(first).chain(videos).map(DisplayVideo::from).collect();
  Ok(VideoPage { videos, channel })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn video_json(id: &str, channel: &str) -> String {
    format!(
      r#"{{
        "id": "{id}",
        "title": "Video {id}",
        "thumbnail_url": "https://img.example.test/{id}.png",
        "view_count": "1.4K",
        "published_at": "Apr 19, 2019",
        "channel": {{ "name": "{channel}", "profile_image_url": "https://img.example.test/{channel}.png" }}
      }}"#
    )
  }

  #[test]
  fn normalize_empty_list() {
    let page = normalize(br#"{"videos": [], "total": 0}"#).unwrap();
    assert!(page.videos.is_empty());
    assert_eq!(page.channel, None);
  }

  #[test]
  fn normalize_preserves_order_and_takes_first_channel() {
    let body = format!(r#"{{"videos": [{}, {}]}}"#, video_json("b", "Second"), video_json("a", "First"));
    let page = normalize(body.as_bytes()).unwrap();
    let ids: Vec<&str> = page.videos.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, ["b", "a"]);
    assert_eq!(
      page.channel,
      Some(ChannelInfo { name: "Second".into(), profile_image_url: "https://img.example.test/Second.png".into() })
    );
    assert_eq!(page.videos[0].thumbnail_url, "https://img.example.test/b.png");
    assert_eq!(page.videos[0].published_at, "Apr 19, 2019");
  }

  #[test]
  fn normalize_first_video_without_channel() {
    let body = br#"{"videos": [{"id": "x", "title": "t", "thumbnail_url": "u", "view_count": 12, "published_at": "p"}]}"#;
    let page = normalize(body).unwrap();
    assert_eq!(page.videos.len(), 1);
    assert_eq!(page.channel, None);
  }

  #[test]
  fn view_count_accepts_string_or_number() {
    let body = br#"{"videos": [
      {"id": "1", "title": "t", "thumbnail_url": "u", "view_count": 987, "published_at": "p"},
      {"id": "2", "title": "t", "thumbnail_url": "u", "view_count": "2.1M", "published_at": "p"}
    ]}"#;
    let page = normalize(body).unwrap();
    assert_eq!(page.videos[0].view_count, ViewCount::Number(987));
    assert_eq!(page.videos[0].view_count.to_string(), "987");
    assert_eq!(page.videos[1].view_count.to_string(), "2.1M");
  }

  #[test]
  fn view_count_accepts_fractional_and_negative_numbers() {
    let body = br#"{"videos": [
      {"id": "1", "title": "t", "thumbnail_url": "u", "view_count": 1.5, "published_at": "p"},
      {"id": "2", "title": "t", "thumbnail_url": "u", "view_count": -3, "published_at": "p"}
    ]}"#;
    let page = normalize(body).unwrap();
    assert!(matches!(page.videos[0].view_count, ViewCount::OtherNumber(_)));
    assert_eq!(page.videos[0].view_count.to_string(), "1.5");
    assert_eq!(page.videos[1].view_count.to_string(), "-3");
  }

  #[test]
  fn normalize_rejects_missing_videos_key() {
    assert!(normalize(br#"{"total": 3}"#).is_err());
  }

  #[test]
  fn normalize_rejects_videos_object() {
    // The listing must be an array, not a single object with nested channel fields.
    assert!(normalize(br#"{"videos": {"channel": {"name": "n"}}}"#).is_err());
  }

  #[test]
  fn normalize_rejects_video_missing_title() {
    let body = br#"{"videos": [{"id": "1", "thumbnail_url": "u", "view_count": 1, "published_at": "p"}]}"#;
    assert!(normalize(body).is_err());
  }

  #[test]
  fn normalize_rejects_non_json() {
    assert!(normalize(b"<html>502 Bad Gateway</html>").is_err());
  }
}
