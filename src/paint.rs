use gtk::gdk;

use crate::error::BarError;

/// Style descriptor handed to a [`Canvas`](crate::canvas::Canvas). Only carries
/// a colour for now, which is all the bar paints with.
#[derive(Shrinkwrap, Debug, Clone, PartialEq)]
pub struct Paint {
	color: gdk::RGBA,
}

impl Paint {
	pub fn new(color: gdk::RGBA) -> Self {
		Self { color }
	}

	pub fn rgb(red: f32, green: f32, blue: f32) -> Self {
		Self::new(gdk::RGBA::new(red, green, blue, 1.0))
	}

	/// Parses any colour `gdk::RGBA::parse` accepts (`#rrggbb`, `rgb()`, names...).
	pub fn parse(spec: &str) -> Result<Self, BarError> {
		gdk::RGBA::parse(spec.trim())
			.map(Self::new)
			.map_err(|_| BarError::InvalidColor(spec.to_string()))
	}

	pub fn color(&self) -> &gdk::RGBA {
		&self.color
	}

	/// Channels as `f64`, the way cairo wants them.
	pub fn rgba_f64(&self) -> (f64, f64, f64, f64) {
		(
			self.color.red() as f64,
			self.color.green() as f64,
			self.color.blue() as f64,
			self.color.alpha() as f64,
		)
	}
}

impl From<gdk::RGBA> for Paint {
	fn from(color: gdk::RGBA) -> Self {
		Self::new(color)
	}
}
