mod imp;

use std::rc::Rc;

use gtk::{
	gdk,
	glib::{self, Object},
	subclass::prelude::*,
};

use crate::config::BarConfig;
use crate::style_map::StyleMap;

glib::wrapper! {
	/// Rounded bar split into equal segments, any subset of which can be
	/// painted in any colour.
	pub struct SegmentedProgressBar(ObjectSubclass<imp::SegmentedProgressBar>)
		@extends gtk::Widget,
		@implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget;
}

impl SegmentedProgressBar {
	pub fn new(divisions: i32) -> Self {
		Object::builder().property("divisions", divisions).build()
	}

	pub fn with_config(config: BarConfig) -> Self {
		let bar: Self = Object::new();
		bar.imp().replace_config(config);
		bar
	}

	/// Replaces the per segment styling wholesale.
	pub fn set_enabled_divisions(&self, styles: StyleMap) {
		self.imp().set_enabled_divisions(styles);
	}

	pub fn enabled_divisions(&self) -> Rc<StyleMap> {
		self.imp().enabled_divisions()
	}

	/// Paints every segment in `color` while no per segment styling is set.
	#[deprecated(note = "use `set_enabled_divisions` for per segment colours")]
	pub fn set_progress_bar_color(&self, color: &gdk::RGBA) {
		self.imp().set_progress_bar_color(color.clone());
	}

	/// Always 0, kept for callers of the old percentage based API.
	pub fn percent_completed(&self) -> f32 {
		self.imp().percent_completed()
	}

	/// Drops the divider offsets and the completion percentage.
	pub fn reset(&self) {
		self.imp().reset();
	}
}

impl Default for SegmentedProgressBar {
	fn default() -> Self {
		Self::new(1)
	}
}
