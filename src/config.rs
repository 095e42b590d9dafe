pub mod user;

use serde_derive::Deserialize;
use tracing::warn;

use crate::error::BarError;
use crate::paint::Paint;
use crate::theme::Theme;

pub const DEFAULT_DIVIDER_WIDTH: f64 = 1.0;
pub const DEFAULT_DIVISIONS: u32 = 1;
pub const DEFAULT_CORNER_RADIUS: f64 = 2.0;

/// Fully resolved configuration of a segmented bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarConfig {
	pub divider: Paint,
	pub background: Paint,
	pub fill: Paint,
	pub divider_width: f64,
	pub divider_enabled: bool,
	pub divisions: u32,
	pub corner_radius: f64,
}

impl BarConfig {
	pub fn from_theme(theme: &Theme) -> Self {
		Self {
			divider: theme.divider(),
			background: theme.background(),
			fill: theme.fill(),
			divider_width: DEFAULT_DIVIDER_WIDTH,
			divider_enabled: true,
			divisions: DEFAULT_DIVISIONS,
			corner_radius: DEFAULT_CORNER_RADIUS,
		}
	}
}

impl Default for BarConfig {
	fn default() -> Self {
		Self::from_theme(&Theme::default())
	}
}

/// Style attributes as they appear in a config file, everything optional.
///
/// Colours are either a literal understood by `gdk::RGBA::parse` or `@name`
/// for a theme colour.
#[derive(Deserialize, Default, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct BarAttributes {
	pub divider_color: Option<String>,
	pub background_color: Option<String>,
	pub fill_color: Option<String>,
	pub divider_width: Option<f64>,
	pub divider_enabled: Option<bool>,
	pub divisions: Option<i32>,
	pub corner_radius: Option<f64>,
}

impl BarAttributes {
	/// Fills unset attributes from `theme`. Out of range numbers are ignored
	/// with a warning, unparsable colours are an error.
	pub fn resolve(&self, theme: &Theme) -> Result<BarConfig, BarError> {
		let mut config = BarConfig::from_theme(theme);

		if let Some(spec) = &self.divider_color {
			config.divider = theme.resolve(spec)?;
		}
		if let Some(spec) = &self.background_color {
			config.background = theme.resolve(spec)?;
		}
		if let Some(spec) = &self.fill_color {
			config.fill = theme.resolve(spec)?;
		}
		match self.divider_width {
			Some(width) if width >= 0.0 => config.divider_width = width,
			Some(width) => warn!(width, "ignoring divider_width, it can not be negative"),
			None => (),
		}
		if let Some(enabled) = self.divider_enabled {
			config.divider_enabled = enabled;
		}
		match self.divisions {
			Some(divisions) if divisions >= 1 => config.divisions = divisions as u32,
			Some(divisions) => warn!(divisions, "ignoring divisions, it cannot be less than 1"),
			None => (),
		}
		if let Some(radius) = self.corner_radius {
			config.corner_radius = radius;
		}

		Ok(config)
	}
}
