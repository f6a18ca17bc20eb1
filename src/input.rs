use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::app::{App, Focus};

// --- Helpers ---

/// Convert a char index to a byte offset within the string.
pub fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
  s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

// --- Search field ---

/// The pending search text plus its cursor (char index) and horizontal scroll.
///
/// Edits never start a fetch; the text is only read when one is issued.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchField {
  text: String,
  cursor: usize,
  pub scroll: usize,
}

impl SearchField {
  pub fn new(text: &str) -> Self {
    Self { text: text.to_string(), cursor: text.chars().count(), scroll: 0 }
  }

  pub fn text(&self) -> &str {
    &self.text
  }

  pub fn cursor(&self) -> usize {
    self.cursor
  }

  pub fn is_empty(&self) -> bool {
    self.text.is_empty()
  }

  pub fn insert(&mut self, c: char) {
    let byte_idx = char_to_byte_index(&self.text, self.cursor);
    self.text.insert(byte_idx, c);
    self.cursor += 1;
  }

  pub fn backspace(&mut self) {
    if self.cursor > 0 {
      self.cursor -= 1;
      let byte_idx = char_to_byte_index(&self.text, self.cursor);
      self.text.remove(byte_idx);
    }
  }

  pub fn delete(&mut self) {
    if self.cursor < self.text.chars().count() {
      let byte_idx = char_to_byte_index(&self.text, self.cursor);
      self.text.remove(byte_idx);
    }
  }

  pub fn left(&mut self) {
    self.cursor = self.cursor.saturating_sub(1);
  }

  pub fn right(&mut self) {
    if self.cursor < self.text.chars().count() {
      self.cursor += 1;
    }
  }

  pub fn home(&mut self) {
    self.cursor = 0;
  }

  pub fn end(&mut self) {
    self.cursor = self.text.chars().count();
  }

  pub fn clear(&mut self) {
    self.text.clear();
    self.cursor = 0;
    self.scroll = 0;
  }
}

// --- Event Handling ---

pub fn handle_key_event(app: &mut App, key: KeyEvent) {
  if key.modifiers.contains(KeyModifiers::CONTROL) {
    match key.code {
      KeyCode::Char('c') => {
        app.should_quit = true;
        return;
      }
      KeyCode::Char('t') => {
        app.toggle_theme();
        return;
      }
      KeyCode::Char('r') => {
        app.retry();
        return;
      }
      _ => {}
    }
  }

  if key.code == KeyCode::Tab {
    app.focus = match app.focus {
      Focus::Search => Focus::Results,
      Focus::Results => Focus::Search,
    };
    debug!(focus = ?app.focus, "focus switched");
    return;
  }

  match app.focus {
    Focus::Search => handle_search_key(app, key),
    Focus::Results => handle_results_key(app, key),
  }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
  match key.code {
    KeyCode::Enter => app.submit_search(),
    KeyCode::Char(c) => app.search.insert(c),
    KeyCode::Backspace => app.search.backspace(),
    KeyCode::Delete => app.search.delete(),
    KeyCode::Left => app.search.left(),
    KeyCode::Right => app.search.right(),
    KeyCode::Home => app.search.home(),
    KeyCode::End => app.search.end(),
    KeyCode::Esc => {
      if !app.search.is_empty() {
        app.search.clear();
      } else {
        app.should_quit = true;
      }
    }
    KeyCode::Down => {
      if !app.visible_videos().is_empty() {
        app.focus = Focus::Results;
      }
    }
    _ => {}
  }
}

fn handle_results_key(app: &mut App, key: KeyEvent) {
  match key.code {
    KeyCode::Down | KeyCode::Char('j') => app.select_next(),
    KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
    KeyCode::Char('r') => app.retry(),
    KeyCode::Char('/') | KeyCode::Esc => app.focus = Focus::Search,
    KeyCode::Char('q') => app.should_quit = true,
    _ => {}
  }
}
