//! Fetch/render state machine for the home video list.
//!
//! [`reduce`] is the whole transition table. [`VideoListView`] wraps it with
//! the fetched data and hands out a [`FetchTicket`] per request so that
//! superseded or post-teardown results can be dropped.

use tracing::{debug, info, warn};

use crate::api::FetchError;
use crate::constants::constants;
use crate::model::{ChannelInfo, DisplayVideo, VideoPage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
  #[default]
  Initial,
  InProgress,
  Success,
  Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
  FetchStarted,
  FetchSucceeded,
  FetchFailed,
}

/// Pure transition function.
///
/// A resolution that arrives while no fetch is in progress leaves the state alone.
pub fn reduce(state: ViewState, event: ViewEvent) -> ViewState {
  match (state, event) {
    (_, ViewEvent::FetchStarted) => ViewState::InProgress,
    (ViewState::InProgress, ViewEvent::FetchSucceeded) => ViewState::Success,
    (ViewState::InProgress, ViewEvent::FetchFailed) => ViewState::Failure,
    (state, _) => state,
  }
}

/// Handle for one issued fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
  generation: u64,
  pub search: String,
}

/// What the body of the page should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Branch<'a> {
  Loading,
  Videos { videos: &'a [DisplayVideo], channel: Option<&'a ChannelInfo> },
  NoResults,
  Failure { illustration: &'a str },
}

impl Branch<'_> {
  /// Whether this branch offers a retry action.
  pub fn offers_retry(&self) -> bool {
    matches!(self, Branch::NoResults | Branch::Failure { .. })
  }
}

#[derive(Debug, Default)]
pub struct VideoListView {
  state: ViewState,
  videos: Vec<DisplayVideo>,
  channel: Option<ChannelInfo>,
  generation: u64,
  torn_down: bool,
}

impl VideoListView {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn state(&self) -> ViewState {
    self.state
  }

  pub fn videos(&self) -> &[DisplayVideo] {
    &self.videos
  }

  pub fn channel(&self) -> Option<&ChannelInfo> {
    self.channel.as_ref()
  }

  pub fn is_torn_down(&self) -> bool {
    self.torn_down
  }

  /// Enter `InProgress` and issue a ticket for `search`. Any earlier ticket is superseded.
  pub fn begin_fetch(&mut self, search: &str) -> FetchTicket {
    self.generation += 1;
    self.state = reduce(self.state, ViewEvent::FetchStarted);
    debug!(generation = self.generation, search = %search, "view: fetch started");
    FetchTicket { generation: self.generation, search: search.to_string() }
  }

  /// Retry is only offered from the failure and empty-result branches.
  pub fn can_retry(&self) -> bool {
    match self.state {
      ViewState::Failure => true,
      ViewState::Success => self.videos.is_empty(),
      ViewState::Initial | ViewState::InProgress => false,
    }
  }

  /// Apply a fetch outcome. Returns `false` when the ticket is stale or the
  /// view is gone, in which case nothing changes.
  pub fn resolve(&mut self, ticket: &FetchTicket, outcome: Result<VideoPage, FetchError>) -> bool {
    if self.torn_down || ticket.generation != self.generation {
      debug!(
        generation = ticket.generation,
        current = self.generation,
        torn_down = self.torn_down,
        "view: dropping superseded fetch result"
      );
      return false;
    }
    match outcome {
      Ok(page) => {
        info!(search = %ticket.search, videos = page.videos.len(), "view: fetch succeeded");
        self.videos = page.videos;
        self.channel = page.channel;
        self.state = reduce(self.state, ViewEvent::FetchSucceeded);
      }
      Err(e) => {
        warn!(search = %ticket.search, err = %e, "view: fetch failed");
        self.state = reduce(self.state, ViewEvent::FetchFailed);
      }
    }
    true
  }

  /// Mark the view as gone; later resolutions are ignored.
  pub fn teardown(&mut self) {
    self.torn_down = true;
  }

  /// Pick the body branch for the current state and theme.
  pub fn branch(&self, dark_theme: bool) -> Branch<'_> {
    match self.state {
      ViewState::Initial | ViewState::InProgress => Branch::Loading,
      ViewState::Success if self.videos.is_empty() => Branch::NoResults,
      ViewState::Success => Branch::Videos { videos: &self.videos, channel: self.channel.as_ref() },
      ViewState::Failure => Branch::Failure { illustration: failure_illustration(dark_theme) },
    }
  }
}

pub fn failure_illustration(dark_theme: bool) -> &'static str {
  if dark_theme { constants().failure_dark_image_url.as_str() } else { constants().failure_light_image_url.as_str() }
}
