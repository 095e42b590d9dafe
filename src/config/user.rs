use gtk::glib::system_config_dirs;
use gtk::glib::user_config_dir;
use serde_derive::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use crate::config::{BarAttributes, BarConfig};
use crate::error::BarError;
use crate::style_map::StyleMap;
use crate::theme::Theme;

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SegmentConfig {
	pub color: String,
	#[serde(default)]
	pub indices: Vec<u32>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
	#[serde(default)]
	pub bar: BarAttributes,
	#[serde(default)]
	pub theme: HashMap<String, String>,
	#[serde(default)]
	pub segments: Vec<SegmentConfig>,
}

impl UserConfig {
	pub fn theme(&self) -> Result<Theme, BarError> {
		Theme::with_overrides(&self.theme)
	}

	pub fn bar_config(&self, theme: &Theme) -> Result<BarConfig, BarError> {
		self.bar.resolve(theme)
	}

	/// The `[[segments]]` tables in file order. Tables sharing a colour have
	/// their indices merged into the first one.
	pub fn style_map(&self, theme: &Theme) -> Result<StyleMap, BarError> {
		let mut map = StyleMap::new();
		for segment in &self.segments {
			let paint = theme.resolve(&segment.color)?;
			let mut indices = map.get(&paint).cloned().unwrap_or_default();
			indices.extend(segment.indices.iter().copied());
			map.insert(paint, indices);
		}
		Ok(map)
	}
}

fn find_user_config() -> Option<PathBuf> {
	let path = user_config_dir()
		.join("segmented-progress")
		.join("config.toml");
	if path.exists() {
		return Some(path);
	}

	for path in system_config_dirs() {
		let path = path.join("segmented-progress").join("config.toml");
		if path.exists() {
			return Some(path);
		}
	}

	None
}

pub fn read_user_config(path: Option<&Path>) -> Result<UserConfig, BarError> {
	let path = match path.map(Path::to_owned).or_else(find_user_config) {
		Some(path) => path,
		None => return Ok(Default::default()),
	};

	let config_file = std::fs::read_to_string(path)?;
	parse_user_config(&config_file)
}

pub fn parse_user_config(contents: &str) -> Result<UserConfig, BarError> {
	Ok(toml::from_str(contents)?)
}
