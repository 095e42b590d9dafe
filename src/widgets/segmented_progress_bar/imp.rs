use std::{cell::RefCell, marker::PhantomData, rc::Rc};

use gtk::{
	gdk,
	glib::{self, Properties},
	graphene,
	prelude::*,
	subclass::prelude::*,
};
use tracing::warn;

use crate::canvas::CairoCanvas;
use crate::config::BarConfig;
use crate::state::BarState;
use crate::style_map::StyleMap;

const MIN_HEIGHT: i32 = 6;

#[derive(Properties, Debug, Default)]
#[properties(wrapper_type = super::SegmentedProgressBar)]
pub struct SegmentedProgressBar {
	#[property(get = Self::background_color, set = Self::set_background_color)]
	background_color: PhantomData<gdk::RGBA>,

	#[property(get = Self::fill_color, set = Self::set_fill_color)]
	fill_color: PhantomData<gdk::RGBA>,

	#[property(get = Self::divider_color, set = Self::set_divider_color)]
	divider_color: PhantomData<gdk::RGBA>,

	#[property(get = Self::divider_width, set = Self::set_divider_width)]
	divider_width: PhantomData<f64>,

	#[property(get = Self::divider_enabled, set = Self::set_divider_enabled)]
	divider_enabled: PhantomData<bool>,

	#[property(get = Self::divisions, set = Self::set_divisions)]
	divisions: PhantomData<i32>,

	#[property(get = Self::corner_radius, set = Self::set_corner_radius)]
	corner_radius: PhantomData<f64>,

	state: RefCell<BarState>,
}

impl SegmentedProgressBar {
	fn background_color(&self) -> gdk::RGBA {
		self.state.borrow().config().background.color().clone()
	}

	fn set_background_color(&self, color: gdk::RGBA) {
		self.state.borrow_mut().set_background_color(color.into());
		self.obj().queue_draw();
	}

	fn fill_color(&self) -> gdk::RGBA {
		self.state.borrow().config().fill.color().clone()
	}

	fn set_fill_color(&self, color: gdk::RGBA) {
		self.state.borrow_mut().set_fill_color(color.into());
		self.obj().queue_draw();
	}

	fn divider_color(&self) -> gdk::RGBA {
		self.state.borrow().config().divider.color().clone()
	}

	fn set_divider_color(&self, color: gdk::RGBA) {
		self.state.borrow_mut().set_divider_color(color.into());
		self.obj().queue_draw();
	}

	fn divider_width(&self) -> f64 {
		self.state.borrow().config().divider_width
	}

	fn set_divider_width(&self, width: f64) {
		let result = self.state.borrow_mut().set_divider_width(width);
		match result {
			Ok(()) => self.obj().queue_draw(),
			Err(error) => warn!("set_divider_width: {}", error),
		}
	}

	fn divider_enabled(&self) -> bool {
		self.state.borrow().config().divider_enabled
	}

	fn set_divider_enabled(&self, enabled: bool) {
		self.state.borrow_mut().set_divider_enabled(enabled);
		self.obj().queue_draw();
	}

	fn divisions(&self) -> i32 {
		self.state.borrow().config().divisions as i32
	}

	fn set_divisions(&self, divisions: i32) {
		let result = self.state.borrow_mut().set_divisions(divisions);
		match result {
			Ok(()) => self.update_accessible(),
			Err(error) => warn!("set_divisions: {}", error),
		}
	}

	fn corner_radius(&self) -> f64 {
		self.state.borrow().config().corner_radius
	}

	fn set_corner_radius(&self, radius: f64) {
		self.state.borrow_mut().set_corner_radius(radius);
		self.obj().queue_draw();
	}

	pub(super) fn replace_config(&self, config: BarConfig) {
		self.state.borrow_mut().replace_config(config);
		self.update_accessible();
	}

	pub(super) fn set_enabled_divisions(&self, styles: StyleMap) {
		self.state.borrow_mut().set_enabled_divisions(styles);
		self.update_accessible();
	}

	pub(super) fn set_progress_bar_color(&self, color: gdk::RGBA) {
		self.state.borrow_mut().set_progress_bar_color(color.into());
		self.update_accessible();
	}

	pub(super) fn enabled_divisions(&self) -> Rc<StyleMap> {
		self.state.borrow().styles()
	}

	pub(super) fn percent_completed(&self) -> f32 {
		self.state.borrow().percent_completed()
	}

	pub(super) fn reset(&self) {
		self.state.borrow_mut().reset();
		self.obj().queue_draw();
	}

	/// Mirrors the segment count and filled segments for assistive technology,
	/// then schedules a redraw.
	fn update_accessible(&self) {
		let (divisions, filled) = {
			let state = self.state.borrow();
			(state.config().divisions, state.filled_segments())
		};

		self.obj().update_property(&[
			gtk::accessible::Property::ValueMin(0_f64),
			gtk::accessible::Property::ValueMax(divisions as f64),
			gtk::accessible::Property::ValueNow(filled as f64),
		]);
		self.obj().queue_draw();
	}
}

#[glib::object_subclass]
impl ObjectSubclass for SegmentedProgressBar {
	const NAME: &'static str = "SegmentedProgressBar";
	type Type = super::SegmentedProgressBar;
	type ParentType = gtk::Widget;

	fn class_init(klass: &mut Self::Class) {
		klass.set_css_name("segmentedprogressbar");
		klass.set_accessible_role(gtk::AccessibleRole::ProgressBar);
	}
}

#[glib::derived_properties]
impl ObjectImpl for SegmentedProgressBar {
	fn constructed(&self) {
		self.parent_constructed();

		self.obj().set_hexpand(true);
		self.update_accessible();
	}
}

impl WidgetImpl for SegmentedProgressBar {
	fn measure(&self, orientation: gtk::Orientation, _for_size: i32) -> (i32, i32, i32, i32) {
		match orientation {
			gtk::Orientation::Vertical => (MIN_HEIGHT, MIN_HEIGHT, -1, -1),
			_ => (0, 0, -1, -1),
		}
	}

	fn size_allocate(&self, width: i32, height: i32, baseline: i32) {
		self.parent_size_allocate(width, height, baseline);

		let sized = self
			.state
			.borrow_mut()
			.on_layout(width as f64, height as f64);
		if sized {
			self.obj().queue_draw();
		}
	}

	fn snapshot(&self, snapshot: &gtk::Snapshot) {
		let state = self.state.borrow();
		// Nothing to draw before the first allocation
		let Some(bounds) = state.background_rect() else {
			return;
		};

		let cr = snapshot.append_cairo(&graphene::Rect::new(
			0.0,
			0.0,
			bounds.width() as f32,
			bounds.height() as f32,
		));
		if let Err(error) = state.render(&mut CairoCanvas::new(&cr)) {
			warn!("failed to draw segmented progress bar: {}", error);
		}
	}
}
