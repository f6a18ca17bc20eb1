use chrono::NaiveDate;
use ratatui::{
  style::{Modifier, Style, Stylize},
  text::{Line, Span},
  widgets::ListItem,
};

use crate::model::{ChannelInfo, DisplayVideo};
use crate::theme::Theme;
use crate::ui::truncate_str;

/// Date format used by the videos API for `published_at`, e.g. `Apr 19, 2019`.
const PUBLISHED_FORMAT: &str = "%b %d, %Y";

/// One card in the video list.
///
/// Gets the whole list and the channel alongside its own record, the same
/// inputs the list hands every item.
pub struct VideoItem<'a> {
  pub video: &'a DisplayVideo,
  /// 0-based index of `video` in `all_videos`.
  pub index: usize,
  pub all_videos: &'a [DisplayVideo],
  pub channel: Option<&'a ChannelInfo>,
  pub theme: &'static Theme,
}

impl VideoItem<'_> {
  /// 1-based position of this video within the full list.
  pub fn position(&self) -> usize {
    self.index + 1
  }

  pub fn lines(&self, width: usize, today: NaiveDate) -> Vec<Line<'static>> {
    let theme = self.theme;
    let counter = format!("{}/{}", self.position(), self.all_videos.len());
    let counter_w = counter.chars().count();
    let title_max = width.saturating_sub(counter_w + 2);
    let title = truncate_str(&self.video.title, title_max);
    let gap = width.saturating_sub(title.chars().count() + counter_w);

    let title_line = Line::from(vec![
      Span::styled(title, Style::default().fg(theme.fg).add_modifier(Modifier::BOLD)),
      Span::raw(" ".repeat(gap)),
      Span::styled(counter, Style::default().fg(theme.muted)),
    ]);

    let mut meta = Vec::new();
    if let Some(channel) = self.channel {
      meta.push(channel.name.clone());
    }
    meta.push(format!("{} views", self.video.view_count));
    meta.push(published_ago(&self.video.published_at, today));
    let meta_line =
      Line::from(Span::styled(truncate_str(&format!("  {}", meta.join(" • ")), width), Style::default().fg(theme.muted)));

    vec![title_line, meta_line]
  }

  pub fn into_list_item(self, width: usize, today: NaiveDate, striped: bool) -> ListItem<'static> {
    let bg = if striped { self.theme.stripe_bg } else { self.theme.bg };
    ListItem::new(self.lines(width, today)).bg(bg)
  }
}

/// Relative age of a `published_at` value, e.g. `3 years ago`.
/// Values that don't parse (or lie in the future) are shown as-is.
pub fn published_ago(raw: &str, today: NaiveDate) -> String {
  let Ok(date) = NaiveDate::parse_from_str(raw.trim(), PUBLISHED_FORMAT) else {
    return raw.to_string();
  };
  let days = (today - date).num_days();
  if days < 0 {
    return raw.to_string();
  }
  let (n, unit) = match days {
    0 => return "today".to_string(),
    1..=29 => (days, "day"),
    30..=364 => (days / 30, "month"),
    _ => (days / 365, "year"),
  };
  if n == 1 { format!("1 {} ago", unit) } else { format!("{} {}s ago", n, unit) }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::ViewCount;
  use crate::theme::LIGHT;

  fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
  }

  fn video(id: &str, title: &str) -> DisplayVideo {
    DisplayVideo {
      id: id.into(),
      title: title.into(),
      thumbnail_url: "t".into(),
      view_count: ViewCount::Text("1.4K".into()),
      published_at: "Apr 19, 2019".into(),
    }
  }

  fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
  }

  #[test]
  fn published_ago_units() {
    assert_eq!(published_ago("Jun 01, 2024", today()), "today");
    assert_eq!(published_ago("May 31, 2024", today()), "1 day ago");
    assert_eq!(published_ago("May 20, 2024", today()), "12 days ago");
    assert_eq!(published_ago("Feb 01, 2024", today()), "4 months ago");
    assert_eq!(published_ago("Apr 19, 2019", today()), "5 years ago");
    assert_eq!(published_ago("May 01, 2023", today()), "1 year ago");
  }

  #[test]
  fn published_ago_passthrough() {
    assert_eq!(published_ago("yesterday-ish", today()), "yesterday-ish");
    assert_eq!(published_ago("Jan 01, 2030", today()), "Jan 01, 2030");
  }

  #[test]
  fn position_within_full_list() {
    let all = vec![video("a", "A"), video("b", "B"), video("c", "C")];
    let item = VideoItem { video: &all[1], index: 1, all_videos: &all, channel: None, theme: &LIGHT };
    assert_eq!(item.position(), 2);
  }

  #[test]
  fn duplicate_ids_keep_their_own_position() {
    let all = vec![video("dup", "First"), video("dup", "Second")];
    let item = VideoItem { video: &all[1], index: 1, all_videos: &all, channel: None, theme: &LIGHT };
    assert!(line_text(&item.lines(40, today())[0]).ends_with("2/2"));
  }

  #[test]
  fn lines_show_title_counter_and_meta() {
    let all = vec![video("a", "Learn Rust"), video("b", "B")];
    let channel = ChannelInfo { name: "iB Cricket".into(), profile_image_url: "p".into() };
    let item = VideoItem { video: &all[0], index: 0, all_videos: &all, channel: Some(&channel), theme: &LIGHT };
    let lines = item.lines(60, today());
    assert_eq!(lines.len(), 2);

    let title = line_text(&lines[0]);
    assert!(title.starts_with("Learn Rust"));
    assert!(title.ends_with("1/2"));
    assert_eq!(title.chars().count(), 60);

    assert_eq!(line_text(&lines[1]), "  iB Cricket • 1.4K views • 5 years ago");
  }

  #[test]
  fn long_title_is_truncated() {
    let all = vec![video("a", &"x".repeat(100))];
    let item = VideoItem { video: &all[0], index: 0, all_videos: &all, channel: None, theme: &LIGHT };
    let title = line_text(&item.lines(30, today())[0]);
    assert!(title.contains('…'));
    assert!(title.chars().count() <= 30);
  }
}
