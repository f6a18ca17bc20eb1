use ratatui::style::Color;

/// Palette for one theme variant.
#[derive(Debug)]
pub struct Theme {
  pub name: &'static str,
  pub bg: Color,
  pub fg: Color,
  pub muted: Color,
  pub accent: Color,
  pub border: Color,
  pub error: Color,
  pub status: Color,
  pub highlight_fg: Color,
  pub highlight_bg: Color,
  pub stripe_bg: Color,
  pub key_fg: Color,
  pub key_bg: Color,
  pub banner_bg: Color,
  pub banner_fg: Color,
}

pub const LIGHT: Theme = Theme {
  name: "light",
  bg: Color::Rgb(249, 249, 249),
  fg: Color::Rgb(30, 41, 59),
  muted: Color::Rgb(100, 116, 139),
  accent: Color::Rgb(255, 0, 0),
  border: Color::Rgb(203, 213, 225),
  error: Color::Rgb(220, 38, 38),
  status: Color::Rgb(71, 85, 105),
  highlight_fg: Color::Rgb(15, 15, 15),
  highlight_bg: Color::Rgb(226, 232, 240),
  stripe_bg: Color::Rgb(241, 241, 241),
  key_fg: Color::Rgb(249, 249, 249),
  key_bg: Color::Rgb(71, 85, 105),
  banner_bg: Color::Rgb(255, 255, 255),
  banner_fg: Color::Rgb(30, 41, 59),
};

pub const DARK: Theme = Theme {
  name: "dark",
  bg: Color::Rgb(24, 24, 24),
  fg: Color::Rgb(241, 241, 241),
  muted: Color::Rgb(148, 163, 184),
  accent: Color::Rgb(255, 69, 58),
  border: Color::Rgb(56, 56, 56),
  error: Color::Rgb(248, 113, 113),
  status: Color::Rgb(203, 213, 225),
  highlight_fg: Color::Rgb(255, 255, 255),
  highlight_bg: Color::Rgb(49, 49, 49),
  stripe_bg: Color::Rgb(33, 33, 33),
  key_fg: Color::Rgb(15, 15, 15),
  key_bg: Color::Rgb(148, 163, 184),
  banner_bg: Color::Rgb(15, 15, 15),
  banner_fg: Color::Rgb(241, 241, 241),
};

pub fn theme_for(dark: bool) -> &'static Theme {
  if dark { &DARK } else { &LIGHT }
}
