/// Axis aligned rectangle in widget coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
	pub left: f64,
	pub top: f64,
	pub right: f64,
	pub bottom: f64,
}

impl Rect {
	pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
		Self {
			left,
			top,
			right,
			bottom,
		}
	}

	pub fn width(&self) -> f64 {
		self.right - self.left
	}

	pub fn height(&self) -> f64 {
		self.bottom - self.top
	}

	/// Nothing to paint when the rect has no area or is inverted.
	pub fn is_empty(&self) -> bool {
		!(self.right > self.left && self.bottom > self.top)
	}
}

/// X offsets of the `divisions - 1` dividers of a bar `width` wide.
pub fn divider_offsets(width: f64, divisions: u32) -> Vec<f64> {
	(1..divisions)
		.map(|i| width * i as f64 / divisions as f64)
		.collect()
}

/// Horizontal extent of segment `index`, the space right of its left divider
/// up to its right divider (or the bar edge).
///
/// Returns `None` when the segment is out of range or the offset it starts at
/// is not known.
pub fn segment_span(
	index: u32,
	divisions: u32,
	offsets: &[f64],
	divider_width: f64,
	width: f64,
) -> Option<(f64, f64)> {
	if index >= divisions {
		return None;
	}
	let index = index as usize;
	let left = match index {
		0 => 0.0,
		_ => *offsets.get(index - 1)? + divider_width,
	};
	let right = offsets.get(index).copied().unwrap_or(width);
	Some((left, right))
}

/// Part of a painted segment that gets square corners. Only the outer edge of
/// the first and last segment stay rounded.
pub fn square_patch(index: u32, divisions: u32, segment: Rect, corner_radius: f64) -> Rect {
	if index == 0 {
		Rect {
			left: segment.left + corner_radius,
			..segment
		}
	} else if index == divisions - 1 {
		Rect {
			right: segment.right - corner_radius,
			..segment
		}
	} else {
		segment
	}
}

/// Corner radius that fits inside `rect`, never negative.
pub fn clamp_radius(rect: &Rect, radius: f64) -> f64 {
	let max = rect.width().min(rect.height()) / 2.0;
	radius.min(max).max(0.0)
}
