use ratatui::widgets::ListState;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::{FetchError, VideoSource};
use crate::config::Config;
use crate::input::SearchField;
use crate::model::{DisplayVideo, VideoPage};
use crate::session::{TokenStore, bearer_token};
use crate::theme::{Theme, theme_for};
use crate::view::{Branch, FetchTicket, VideoListView};

// --- Types ---

pub type FetchResult = Result<VideoPage, FetchError>;

/// Which part of the page receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  Search,
  Results,
}

/// The one in-flight fetch: its ticket, result channel and task handle.
pub(crate) struct PendingFetch {
  pub(crate) ticket: FetchTicket,
  pub(crate) rx: oneshot::Receiver<FetchResult>,
  pub(crate) handle: JoinHandle<()>,
}

pub struct App {
  pub search: SearchField,
  pub focus: Focus,
  pub view: VideoListView,
  pub list_state: ListState,
  pub dark_theme: bool,
  pub should_quit: bool,
  /// App start instant, used to drive the loading spinner.
  pub started_at: Instant,
  source: Arc<dyn VideoSource>,
  tokens: Arc<dyn TokenStore>,
  /// Preferences to persist on theme toggle; `None` keeps toggles in memory.
  prefs: Option<Config>,
  pub(crate) pending: Option<PendingFetch>,
}

impl App {
  pub fn new(source: Arc<dyn VideoSource>, tokens: Arc<dyn TokenStore>, initial_search: &str, dark_theme: bool) -> Self {
    Self {
      search: SearchField::new(initial_search),
      focus: Focus::Search,
      view: VideoListView::new(),
      list_state: ListState::default(),
      dark_theme,
      should_quit: false,
      started_at: Instant::now(),
      source,
      tokens,
      prefs: None,
      pending: None,
    }
  }

  pub fn with_prefs(mut self, config: Config) -> Self {
    self.prefs = Some(config);
    self
  }

  pub fn theme(&self) -> &'static Theme {
    theme_for(self.dark_theme)
  }

  pub fn branch(&self) -> Branch<'_> {
    self.view.branch(self.dark_theme)
  }

  /// Videos currently on screen (empty unless the list branch is showing).
  pub fn visible_videos(&self) -> &[DisplayVideo] {
    match self.branch() {
      Branch::Videos { videos, .. } => videos,
      _ => &[],
    }
  }

  pub fn is_fetching(&self) -> bool {
    self.pending.is_some()
  }

  pub fn toggle_theme(&mut self) {
    self.dark_theme = !self.dark_theme;
    debug!(dark = self.dark_theme, "theme toggled");
    if let Some(ref mut prefs) = self.prefs {
      prefs.dark_theme = Some(self.dark_theme);
      prefs.save();
    }
  }

  /// First fetch, issued as soon as the page is up.
  pub fn mount(&mut self) {
    info!(search = %self.search.text(), "home mounted");
    self.trigger_fetch();
  }

  /// Search button: fetch with the current text regardless of state.
  pub fn submit_search(&mut self) {
    info!(search = %self.search.text(), "search triggered");
    self.trigger_fetch();
  }

  /// Retry button, offered by the failure and empty-result views.
  pub fn retry(&mut self) {
    if !self.view.can_retry() {
      debug!(state = ?self.view.state(), "retry ignored");
      return;
    }
    info!(search = %self.search.text(), "retry triggered");
    self.trigger_fetch();
  }

  fn trigger_fetch(&mut self) {
    self.cancel_pending();
    let ticket = self.view.begin_fetch(self.search.text());
    let token = bearer_token(self.tokens.as_ref());
    let fetch = self.source.fetch_all(ticket.search.clone(), token);

    let (tx, rx) = oneshot::channel();
    let handle = tokio::spawn(async move {
      let _ = tx.send(fetch.await);
    });
    self.pending = Some(PendingFetch { ticket, rx, handle });
  }

  fn cancel_pending(&mut self) {
    if let Some(pending) = self.pending.take() {
      debug!(search = %pending.ticket.search, "cancelling superseded fetch");
      pending.handle.abort();
    }
  }

  /// Poll the in-flight fetch without blocking the draw loop.
  pub fn check_pending(&mut self) {
    if self.view.is_torn_down() {
      return;
    }
    let Some(mut pending) = self.pending.take() else { return };
    match pending.rx.try_recv() {
      Ok(outcome) => self.apply(&pending.ticket, outcome),
      Err(oneshot::error::TryRecvError::Empty) => {
        self.pending = Some(pending);
      }
      Err(oneshot::error::TryRecvError::Closed) => {
        self.apply(&pending.ticket, Err(FetchError::Interrupted));
      }
    }
  }

  fn apply(&mut self, ticket: &FetchTicket, outcome: FetchResult) {
    if !self.view.resolve(ticket, outcome) {
      return;
    }
    if self.visible_videos().is_empty() {
      self.list_state.select(None);
    } else {
      self.list_state.select(Some(0));
    }
  }

  /// Stop the in-flight fetch and ignore anything that still arrives.
  pub fn teardown(&mut self) {
    self.cancel_pending();
    self.view.teardown();
  }

  pub fn select_next(&mut self) {
    let count = self.visible_videos().len();
    if count > 0 {
      let i = self.list_state.selected().map_or(0, |i| (i + 1) % count);
      self.list_state.select(Some(i));
    }
  }

  pub fn select_previous(&mut self) {
    let count = self.visible_videos().len();
    if count > 0 {
      let i = self.list_state.selected().map_or(0, |i| if i == 0 { count - 1 } else { i - 1 });
      self.list_state.select(Some(i));
    }
  }
}
