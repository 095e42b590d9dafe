use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::error::BarError;
use crate::paint::Paint;

pub const DIVIDER_COLOR_NAME: &str = "white";
pub const BACKGROUND_COLOR_NAME: &str = "grey_light";
pub const FILL_COLOR_NAME: &str = "progress_bar";

lazy_static! {
	static ref BUILTIN_COLORS: Vec<(&'static str, (f32, f32, f32))> = vec![
		(DIVIDER_COLOR_NAME, (1.0, 1.0, 1.0)),
		(BACKGROUND_COLOR_NAME, (0.878, 0.878, 0.878)), // #e0e0e0
		(FILL_COLOR_NAME, (0.129, 0.588, 0.953)),       // #2196f3
	];
}

/// Named colours the bar falls back to when a colour attribute is unset.
#[derive(Debug, Clone)]
pub struct Theme {
	colors: HashMap<String, Paint>,
}

impl Default for Theme {
	fn default() -> Self {
		let colors = BUILTIN_COLORS
			.iter()
			.map(|(name, (r, g, b))| (name.to_string(), Paint::rgb(*r, *g, *b)))
			.collect();
		Self { colors }
	}
}

impl Theme {
	/// Built-in colours with `overrides` (name -> colour literal) applied on top.
	pub fn with_overrides<'a>(
		overrides: impl IntoIterator<Item = (&'a String, &'a String)>,
	) -> Result<Self, BarError> {
		let mut theme = Self::default();
		for (name, spec) in overrides {
			theme.colors.insert(name.clone(), Paint::parse(spec)?);
		}
		Ok(theme)
	}

	pub fn lookup(&self, name: &str) -> Result<Paint, BarError> {
		self.colors
			.get(name)
			.cloned()
			.ok_or_else(|| BarError::UnknownThemeColor(name.to_string()))
	}

	/// Resolves either a `@name` reference into this theme or a colour literal.
	pub fn resolve(&self, spec: &str) -> Result<Paint, BarError> {
		match spec.trim().strip_prefix('@') {
			Some(name) => self.lookup(name),
			None => Paint::parse(spec),
		}
	}

	pub fn divider(&self) -> Paint {
		self.builtin(DIVIDER_COLOR_NAME)
	}

	pub fn background(&self) -> Paint {
		self.builtin(BACKGROUND_COLOR_NAME)
	}

	pub fn fill(&self) -> Paint {
		self.builtin(FILL_COLOR_NAME)
	}

	fn builtin(&self, name: &str) -> Paint {
		// Built-in names are always present, overrides only replace them
		self.colors
			.get(name)
			.cloned()
			.unwrap_or_else(|| Paint::rgb(0.0, 0.0, 0.0))
	}
}
