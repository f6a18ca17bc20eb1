use chrono::{Local, NaiveDate};
use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Layout, Rect},
  style::{Modifier, Style},
  text::{Line, Span},
  widgets::{Block, BorderType, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::{App, Focus};
use crate::constants::constants;
use crate::theme::Theme;
use crate::video_item::VideoItem;
use crate::view::{Branch, ViewState};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

// --- Helpers ---

/// Compute the display width of the first `n` chars (accounting for double-width CJK).
pub fn display_width(s: &str, n: usize) -> usize {
  use unicode_width::UnicodeWidthChar;
  s.chars().take(n).map(|c| c.width().unwrap_or(0)).sum()
}

/// Truncate a string to `max_width` characters, appending "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
  if s.chars().count() <= max_width {
    s.to_string()
  } else {
    let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
    format!("{}…", truncated)
  }
}

/// Rect of `text`'s display width at the right edge of `area`, clipped to it.
fn align_right(area: Rect, text: &str) -> Rect {
  use unicode_width::UnicodeWidthStr;
  let width = u16::try_from(text.width()).unwrap_or(u16::MAX).min(area.width);
  Rect { x: area.x + area.width - width, width, ..area }
}

fn rounded(theme: &Theme) -> Block<'static> {
  Block::bordered().border_type(BorderType::Rounded).border_style(Style::default().fg(theme.border))
}

// --- UI Rendering ---

pub fn ui(frame: &mut Frame, app: &mut App) {
  let theme = app.theme();

  frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), frame.area());

  let [header_area, banner_area, input_area, main_area, status_area, footer_area] = Layout::vertical([
    Constraint::Length(1),
    Constraint::Length(5),
    Constraint::Length(3),
    Constraint::Min(3),
    Constraint::Length(1),
    Constraint::Length(1),
  ])
  .areas(frame.area());

  render_header(frame, theme, header_area);
  render_banner(frame, theme, banner_area);
  render_input(frame, app, input_area);
  render_main(frame, app, main_area);
  render_status(frame, app, status_area);
  render_footer(frame, app, footer_area);
}

/// Navigation bar: app name on the left, active theme on the right.
fn render_header(frame: &mut Frame, theme: &Theme, area: Rect) {
  let left = Line::from(Span::styled(
    format!(" ▶ {} ", constants().app_name),
    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
  ));
  frame.render_widget(left, area);

  let label = format!("{} theme ", theme.name);
  let right = Line::from(Span::styled(&label, Style::default().fg(theme.muted)));
  frame.render_widget(right, align_right(area, &label));
}

fn render_banner(frame: &mut Frame, theme: &Theme, area: Rect) {
  let c = constants();
  let text = vec![
    Line::from(vec![
      Span::styled(format!("[{}] ", c.banner_logo_alt), Style::default().fg(theme.muted)),
      Span::styled(c.app_name.as_str(), Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
    ]),
    Line::from(Span::styled(c.banner_text.as_str(), Style::default().fg(theme.banner_fg))),
    Line::from(Span::styled(
      format!("[ {} ]", c.banner_button),
      Style::default().fg(theme.banner_fg).add_modifier(Modifier::BOLD),
    )),
  ];
  let paragraph =
    Paragraph::new(text).style(Style::default().bg(theme.banner_bg)).block(rounded(theme).padding(Padding::horizontal(1)));
  frame.render_widget(paragraph, area);
}

fn render_input(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let focused = app.focus == Focus::Search;
  let border_color = if focused { theme.accent } else { theme.border };
  let input_block = Block::bordered()
    .title(" Search ")
    .title(Line::from(" ⏎ search ").right_aligned())
    .title_style(Style::default().fg(border_color))
    .border_type(BorderType::Rounded)
    .border_style(Style::default().fg(border_color))
    .padding(Padding::horizontal(1));

  let inner_w = area.width.saturating_sub(4) as usize;
  let cursor_col = display_width(app.search.text(), app.search.cursor());

  if cursor_col < app.search.scroll {
    app.search.scroll = cursor_col;
  } else if cursor_col >= app.search.scroll + inner_w {
    app.search.scroll = cursor_col.saturating_sub(inner_w) + 1;
  }
  let scroll = app.search.scroll;

  let visible: String = app
    .search
    .text()
    .chars()
    .scan(0usize, |col, c| {
      let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
      let start = *col;
      *col += w;
      Some((start, *col, c))
    })
    .skip_while(|(_, end, _)| *end <= scroll)
    .take_while(|(start, _, _)| *start < scroll + inner_w)
    .map(|(_, _, c)| c)
    .collect();

  let paragraph = if visible.is_empty() && !focused {
    Paragraph::new("search").style(Style::default().fg(theme.muted))
  } else {
    Paragraph::new(visible).style(Style::default().fg(theme.fg))
  };
  frame.render_widget(paragraph.block(input_block), area);

  if focused && inner_w > 0 {
    let cursor_x = area.x + 2 + cursor_col.saturating_sub(scroll) as u16;
    frame.set_cursor_position((cursor_x, area.y + 1));
  }
}

fn render_main(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  match app.branch() {
    Branch::Loading => render_loading(frame, app, area),
    Branch::Videos { .. } => render_videos(frame, app, area, Local::now().date_naive()),
    Branch::NoResults => {
      let c = constants();
      let lines = vec![
        Line::from(Span::styled("[no videos]", Style::default().fg(theme.muted))),
        Line::from(Span::styled(c.no_results_image_url.as_str(), Style::default().fg(theme.muted))),
        Line::from(""),
        Line::from(Span::styled("No Search results found", Style::default().fg(theme.fg).add_modifier(Modifier::BOLD))),
        Line::from(Span::styled("Try different key words or remove search filter", Style::default().fg(theme.muted))),
        Line::from(""),
        retry_button(theme),
      ];
      render_placeholder(frame, theme, lines, area);
    }
    Branch::Failure { illustration } => {
      let lines = vec![
        Line::from(Span::styled("[failure view]", Style::default().fg(theme.muted))),
        Line::from(Span::styled(illustration.to_string(), Style::default().fg(theme.muted))),
        Line::from(""),
        Line::from(Span::styled(
          "Oops! Something Went Wrong",
          Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
          "We are having some trouble to complete your request. Please try again.",
          Style::default().fg(theme.muted),
        )),
        Line::from(""),
        retry_button(theme),
      ];
      render_placeholder(frame, theme, lines, area);
    }
  }
}

fn retry_button(theme: &Theme) -> Line<'static> {
  Line::from(Span::styled(" Retry ", Style::default().fg(theme.key_fg).bg(theme.key_bg).add_modifier(Modifier::BOLD)))
}

fn render_placeholder(frame: &mut Frame, theme: &Theme, lines: Vec<Line<'static>>, area: Rect) {
  let paragraph = Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true }).block(rounded(theme));
  frame.render_widget(paragraph, area);
}

fn render_loading(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let tick = app.started_at.elapsed().as_millis() / u128::from(constants().spinner_millis.max(1));
  let glyph = SPINNER[(tick % SPINNER.len() as u128) as usize];
  let lines = vec![
    Line::from(""),
    Line::from(Span::styled(format!("{} Loading…", glyph), Style::default().fg(theme.accent))),
  ];
  let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(rounded(theme));
  frame.render_widget(paragraph, area);
}

fn render_videos(frame: &mut Frame, app: &mut App, area: Rect, today: NaiveDate) {
  let theme = app.theme();
  let focused = app.focus == Focus::Results;
  // Inner width: area minus 2 borders minus 2 chars for the highlight symbol.
  let inner_w = area.width.saturating_sub(4) as usize;

  let Branch::Videos { videos, channel } = app.view.branch(app.dark_theme) else { return };
  let items: Vec<ListItem> = videos
    .iter()
    .enumerate()
    .map(|(i, video)| {
      VideoItem { video, index: i, all_videos: videos, channel, theme }.into_list_item(inner_w, today, i % 2 == 1)
    })
    .collect();

  let title = format!(" Videos ({}) ", videos.len());
  let list = List::new(items)
    .block(
      rounded(theme)
        .title(title)
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .border_style(Style::default().fg(if focused { theme.accent } else { theme.border })),
    )
    .highlight_symbol("▶ ")
    .highlight_style(Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg));

  frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let (text, style) = match app.view.state() {
    ViewState::Initial | ViewState::InProgress if !app.is_fetching() => {
      (" Waiting to load".to_string(), Style::default().fg(theme.muted))
    }
    ViewState::Initial | ViewState::InProgress => {
      let query = app.search.text().trim();
      let msg = if query.is_empty() { " ⏳ Loading videos…".to_string() } else { format!(" ⏳ Searching '{}'…", query) };
      (msg, Style::default().fg(theme.status))
    }
    ViewState::Failure => (" ⚠  Request failed".to_string(), Style::default().fg(theme.error)),
    ViewState::Success => {
      let n = app.view.videos().len();
      let noun = if n == 1 { "video" } else { "videos" };
      (format!(" {} {}", n, noun), Style::default().fg(theme.muted))
    }
  };
  frame.render_widget(Paragraph::new(text).style(style), area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let offers_retry = app.branch().offers_retry();
  let has_videos = !app.visible_videos().is_empty();
  let keys: Vec<(&str, &str)> = match app.focus {
    Focus::Search => {
      let mut k = vec![("Enter", "Search")];
      if offers_retry {
        k.push(("^r", "Retry"));
      }
      if has_videos {
        k.push(("↓", "Videos"));
      }
      k.push(("Tab", "Focus"));
      k.push(("^t", "Theme"));
      k.push(("Esc", "Clear/Quit"));
      k
    }
    Focus::Results => {
      let mut k = Vec::new();
      if has_videos {
        k.push(("j/k", "Navigate"));
      }
      if offers_retry {
        k.push(("r", "Retry"));
      }
      k.push(("/", "Search"));
      k.push(("^t", "Theme"));
      k.push(("q", "Quit"));
      k
    }
  };

  let spans: Vec<Span> = keys
    .iter()
    .enumerate()
    .flat_map(|(i, (key, action))| {
      let mut s = vec![
        Span::styled(format!(" {} ", key), Style::default().fg(theme.key_fg).bg(theme.key_bg)),
        Span::styled(format!(" {} ", action), Style::default().fg(theme.muted)),
      ];
      if i < keys.len() - 1 {
        s.push(Span::raw("  "));
      }
      s
    })
    .collect();

  frame.render_widget(Line::from(spans), area);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::FetchError;
  use crate::app::tests::{StubSource, app_with, page, settle};
  use ratatui::{Terminal, backend::TestBackend};

  fn render(app: &mut App) -> String {
    render_at(app, 100, 32)
  }

  fn render_at(app: &mut App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| ui(frame, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let area = buffer.area;
    (0..area.height)
      .map(|y| (0..area.width).map(|x| buffer[(x, y)].symbol()).collect::<String>())
      .collect::<Vec<_>>()
      .join("\n")
  }

  #[test]
  fn truncate_str_behaviour() {
    assert_eq!(truncate_str("short", 10), "short");
    assert_eq!(truncate_str("exactly10!", 10), "exactly10!");
    assert_eq!(truncate_str("this is long", 5), "this…");
  }

  #[test]
  fn display_width_counts_wide_chars() {
    assert_eq!(display_width("abc", 2), 2);
    assert_eq!(display_width("日本", 2), 4);
  }

  #[test]
  fn align_right_uses_display_width() {
    let area = Rect::new(10, 0, 20, 1);
    assert_eq!(align_right(area, "light theme "), Rect::new(18, 0, 12, 1));
    assert_eq!(align_right(area, "日本"), Rect::new(26, 0, 4, 1));
    assert_eq!(align_right(Rect::new(0, 0, 3, 1), "light theme "), Rect::new(0, 0, 3, 1));
  }

  #[test]
  fn header_label_sits_at_right_edge() {
    let mut app = app_with(StubSource::with(vec![]), "");
    let screen = render(&mut app);
    assert!(screen.lines().next().unwrap().ends_with("light theme "));
  }

  #[test]
  fn narrow_terminal_renders_without_panicking() {
    let mut app = app_with(StubSource::with(vec![]), "react");
    let screen = render_at(&mut app, 3, 20);
    assert_eq!(screen.lines().count(), 20);
  }

  #[test]
  fn initial_render_shows_chrome_and_loader() {
    let mut app = app_with(StubSource::with(vec![]), "");
    let screen = render(&mut app);
    assert!(screen.contains("Nxt Watch"));
    assert!(screen.contains("Buy Nxt Watch Premium prepaid plans with UPI"));
    assert!(screen.contains("GET IT NOW"));
    assert!(screen.contains("Loading…"));
    assert!(screen.contains("light theme"));
  }

  #[tokio::test]
  async fn videos_render_in_order() {
    let mut app = app_with(StubSource::with(vec![Ok(page(&["v1", "v2"]))]), "");
    app.mount();
    settle(&mut app).await;
    let screen = render(&mut app);
    let first = screen.find("Video v1").unwrap();
    let second = screen.find("Video v2").unwrap();
    assert!(first < second);
    assert!(screen.contains("Videos (2)"));
    assert!(screen.contains("Channel v1 • 42 views"));
    assert!(!screen.contains("No Search results found"));
  }

  #[tokio::test]
  async fn empty_success_renders_no_results_branch() {
    let mut app = app_with(StubSource::with(vec![Ok(page(&[]))]), "nothing");
    app.mount();
    settle(&mut app).await;
    let screen = render(&mut app);
    assert!(screen.contains("No Search results found"));
    assert!(screen.contains("Retry"));
    assert!(!screen.contains("Videos ("));
  }

  #[tokio::test]
  async fn failure_illustration_follows_theme() {
    let mut app = app_with(StubSource::with(vec![Err(FetchError::Interrupted)]), "");
    app.mount();
    settle(&mut app).await;

    let light = render(&mut app);
    assert!(light.contains("Oops! Something Went Wrong"));
    assert!(light.contains("failure-view-light-theme"));

    app.toggle_theme();
    let dark = render(&mut app);
    assert!(dark.contains("failure-view-dark-theme"));
    assert!(dark.contains("dark theme"));
  }
}
