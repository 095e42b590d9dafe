use std::f64::consts::PI;

use gtk::cairo;

use crate::geometry::{clamp_radius, Rect};
use crate::paint::Paint;

const DEGREES: f64 = PI / 180.0;

/// Immediate mode drawing surface the bar paints onto.
pub trait Canvas {
	type Error;

	fn fill_round_rect(
		&mut self,
		rect: Rect,
		radius: f64,
		paint: &Paint,
	) -> Result<(), Self::Error>;

	fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> Result<(), Self::Error>;
}

/// [`Canvas`] on top of a cairo context, as handed out by
/// `gtk::Snapshot::append_cairo`.
pub struct CairoCanvas<'a> {
	cr: &'a cairo::Context,
}

impl<'a> CairoCanvas<'a> {
	pub fn new(cr: &'a cairo::Context) -> Self {
		Self { cr }
	}

	fn set_paint(&self, paint: &Paint) {
		let (r, g, b, a) = paint.rgba_f64();
		self.cr.set_source_rgba(r, g, b, a);
	}
}

impl Canvas for CairoCanvas<'_> {
	type Error = cairo::Error;

	fn fill_round_rect(
		&mut self,
		rect: Rect,
		radius: f64,
		paint: &Paint,
	) -> Result<(), Self::Error> {
		if rect.is_empty() {
			return Ok(());
		}
		let radius = clamp_radius(&rect, radius);
		if radius == 0.0 {
			return self.fill_rect(rect, paint);
		}

		let cr = self.cr;
		cr.new_sub_path();
		cr.arc(
			rect.right - radius,
			rect.top + radius,
			radius,
			-90.0 * DEGREES,
			0.0 * DEGREES,
		);
		cr.arc(
			rect.right - radius,
			rect.bottom - radius,
			radius,
			0.0 * DEGREES,
			90.0 * DEGREES,
		);
		cr.arc(
			rect.left + radius,
			rect.bottom - radius,
			radius,
			90.0 * DEGREES,
			180.0 * DEGREES,
		);
		cr.arc(
			rect.left + radius,
			rect.top + radius,
			radius,
			180.0 * DEGREES,
			270.0 * DEGREES,
		);
		cr.close_path();

		self.set_paint(paint);
		cr.fill()
	}

	fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> Result<(), Self::Error> {
		if rect.is_empty() {
			return Ok(());
		}
		self.cr
			.rectangle(rect.left, rect.top, rect.width(), rect.height());
		self.set_paint(paint);
		self.cr.fill()
	}
}
