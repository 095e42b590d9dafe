use std::collections::BTreeSet;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::canvas::Canvas;
use crate::config::BarConfig;
use crate::error::BarError;
use crate::geometry::{self, Rect};
use crate::paint::Paint;
use crate::style_map::StyleMap;

/// Whether the bar has been given a width yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Layout {
	AwaitingSize,
	Sized { width: f64, height: f64 },
}

/// What gets painted on top of the background track.
#[derive(Debug, Clone, PartialEq)]
pub enum FillStrategy {
	/// Nothing but the track.
	Empty,
	/// Every segment in the one colour, set through the legacy
	/// `set_progress_bar_color`.
	Whole(Paint),
	/// Per segment styling.
	Segments(Rc<StyleMap>),
}

/// Everything the segmented bar knows, independent of the toolkit.
#[derive(Debug)]
pub struct BarState {
	config: BarConfig,
	layout: Layout,
	divider_offsets: Vec<f64>,
	styles: Rc<StyleMap>,
	legacy_fill: bool,
	percent_completed: f32,
}

impl Default for BarState {
	fn default() -> Self {
		Self::new(BarConfig::default())
	}
}

impl BarState {
	/// Out of range values in `config` are replaced by the defaults.
	pub fn new(config: BarConfig) -> Self {
		Self {
			config: validated(config, &BarConfig::default()),
			layout: Layout::AwaitingSize,
			divider_offsets: Vec::new(),
			styles: Rc::new(StyleMap::new()),
			legacy_fill: false,
			percent_completed: 0.0,
		}
	}

	pub fn config(&self) -> &BarConfig {
		&self.config
	}

	pub fn layout(&self) -> Layout {
		self.layout
	}

	pub fn divider_offsets(&self) -> &[f64] {
		&self.divider_offsets
	}

	pub fn styles(&self) -> Rc<StyleMap> {
		Rc::clone(&self.styles)
	}

	pub fn percent_completed(&self) -> f32 {
		self.percent_completed
	}

	/// Width of the last layout, 0 until the first one.
	pub fn width(&self) -> f64 {
		match self.layout {
			Layout::AwaitingSize => 0.0,
			Layout::Sized { width, .. } => width,
		}
	}

	/// Bounds of the background track, once the size is known.
	pub fn background_rect(&self) -> Option<Rect> {
		match self.layout {
			Layout::AwaitingSize => None,
			Layout::Sized { width, height } => Some(Rect::new(0.0, 0.0, width, height)),
		}
	}

	/// Handles a layout pass. Only the first one with a positive width counts,
	/// every later call is ignored. Returns whether the geometry got established.
	pub fn on_layout(&mut self, width: f64, height: f64) -> bool {
		if self.layout != Layout::AwaitingSize || !(width > 0.0) {
			return false;
		}
		self.layout = Layout::Sized { width, height };
		self.recompute_offsets();
		debug!(width, height, divisions = self.config.divisions, "segmented bar sized");
		true
	}

	fn recompute_offsets(&mut self) {
		self.divider_offsets = geometry::divider_offsets(self.width(), self.config.divisions);
	}

	/// Swaps in a whole new configuration and rebuilds the offsets for it.
	/// Out of range values keep the current ones.
	pub fn replace_config(&mut self, config: BarConfig) {
		self.config = validated(config, &self.config);
		self.recompute_offsets();
	}

	pub fn set_background_color(&mut self, paint: Paint) {
		self.config.background = paint;
	}

	pub fn set_fill_color(&mut self, paint: Paint) {
		self.config.fill = paint;
	}

	/// Legacy single colour fill. Only shows while no per segment styling is set.
	pub fn set_progress_bar_color(&mut self, paint: Paint) {
		self.config.fill = paint;
		self.legacy_fill = true;
	}

	pub fn set_divider_color(&mut self, paint: Paint) {
		self.config.divider = paint;
	}

	pub fn set_divider_width(&mut self, width: f64) -> Result<(), BarError> {
		if !(width >= 0.0) {
			return Err(BarError::NegativeDividerWidth(width));
		}
		self.config.divider_width = width;
		Ok(())
	}

	pub fn set_divider_enabled(&mut self, enabled: bool) {
		self.config.divider_enabled = enabled;
	}

	/// Before the first layout the offsets all collapse onto 0; they get
	/// recomputed once the width is known.
	pub fn set_divisions(&mut self, divisions: i32) -> Result<(), BarError> {
		if divisions < 1 {
			return Err(BarError::TooFewDivisions(divisions));
		}
		self.config.divisions = divisions as u32;
		self.recompute_offsets();
		Ok(())
	}

	pub fn set_enabled_divisions(&mut self, styles: StyleMap) {
		self.styles = Rc::new(styles);
	}

	pub fn set_corner_radius(&mut self, radius: f64) {
		self.config.corner_radius = radius;
	}

	pub fn reset(&mut self) {
		self.divider_offsets.clear();
		self.percent_completed = 0.0;
	}

	pub fn fill_strategy(&self) -> FillStrategy {
		if !self.styles.is_empty() {
			FillStrategy::Segments(Rc::clone(&self.styles))
		} else if self.legacy_fill {
			FillStrategy::Whole(self.config.fill.clone())
		} else {
			FillStrategy::Empty
		}
	}

	/// Number of distinct in range segments that currently get painted.
	pub fn filled_segments(&self) -> usize {
		let divisions = self.config.divisions;
		match self.fill_strategy() {
			FillStrategy::Empty => 0,
			FillStrategy::Whole(_) => divisions as usize,
			FillStrategy::Segments(styles) => styles
				.iter()
				.flat_map(|(_, indices)| indices.iter().copied())
				.filter(|&index| index < divisions)
				.collect::<BTreeSet<u32>>()
				.len(),
		}
	}

	/// Paints the bar. Does nothing until the first layout.
	pub fn render<C: Canvas>(&self, canvas: &mut C) -> Result<(), C::Error> {
		let Some(background) = self.background_rect() else {
			return Ok(());
		};
		let config = &self.config;
		canvas.fill_round_rect(background, config.corner_radius, &config.background)?;

		let mut visited = false;
		match self.fill_strategy() {
			FillStrategy::Empty => {}
			FillStrategy::Whole(paint) => {
				for index in 0..config.divisions {
					visited = true;
					self.paint_segment(canvas, &background, index, &paint)?;
				}
			}
			FillStrategy::Segments(styles) => {
				for (paint, indices) in styles.iter() {
					for &index in indices {
						visited = true;
						self.paint_segment(canvas, &background, index, paint)?;
					}
				}
			}
		}

		if visited && config.divisions > 1 && config.divider_enabled {
			for &offset in &self.divider_offsets {
				let divider = Rect::new(
					offset,
					background.top,
					offset + config.divider_width,
					background.bottom,
				);
				canvas.fill_rect(divider, &config.divider)?;
			}
		}
		Ok(())
	}

	fn paint_segment<C: Canvas>(
		&self,
		canvas: &mut C,
		background: &Rect,
		index: u32,
		paint: &Paint,
	) -> Result<(), C::Error> {
		let config = &self.config;
		let Some((left, right)) = geometry::segment_span(
			index,
			config.divisions,
			&self.divider_offsets,
			config.divider_width,
			background.right,
		) else {
			return Ok(());
		};

		let segment = Rect::new(left, background.top, right, background.bottom);
		canvas.fill_round_rect(segment, config.corner_radius, paint)?;
		let patch = geometry::square_patch(index, config.divisions, segment, config.corner_radius);
		canvas.fill_rect(patch, paint)
	}
}

/// `config` with invalid divisions or divider width taken from `fallback`.
fn validated(mut config: BarConfig, fallback: &BarConfig) -> BarConfig {
	if config.divisions < 1 {
		warn!(
			divisions = config.divisions,
			"number of divisions cannot be less than 1, keeping {}", fallback.divisions
		);
		config.divisions = fallback.divisions;
	}
	if !(config.divider_width >= 0.0) {
		warn!(
			width = config.divider_width,
			"divider width can not be negative, keeping {}", fallback.divider_width
		);
		config.divider_width = fallback.divider_width;
	}
	config
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::canvas::recording::{Op, RecordingCanvas};

	fn red() -> Paint {
		Paint::rgb(1.0, 0.0, 0.0)
	}

	fn blue() -> Paint {
		Paint::rgb(0.0, 0.0, 1.0)
	}

	fn sized(width: f64, divisions: i32) -> BarState {
		let mut state = BarState::default();
		state.set_divisions(divisions).unwrap();
		assert!(state.on_layout(width, 10.0));
		state
	}

	fn render(state: &BarState) -> RecordingCanvas {
		let mut canvas = RecordingCanvas::default();
		state.render(&mut canvas).unwrap();
		canvas
	}

	#[test]
	fn defaults() {
		let state = BarState::default();
		let config = state.config();
		assert_eq!(config.divider_width, 1.0);
		assert!(config.divider_enabled);
		assert_eq!(config.divisions, 1);
		assert_eq!(config.corner_radius, 2.0);
		assert_eq!(state.layout(), Layout::AwaitingSize);
		assert_eq!(state.fill_strategy(), FillStrategy::Empty);
	}

	#[test]
	fn draws_nothing_before_layout() {
		let mut state = BarState::default();
		state.set_enabled_divisions(StyleMap::new().with(red(), [0]));
		assert!(render(&state).ops.is_empty());
	}

	#[test]
	fn first_positive_layout_wins() {
		let mut state = BarState::default();
		state.set_divisions(3).unwrap();

		assert!(!state.on_layout(0.0, 10.0));
		assert_eq!(state.layout(), Layout::AwaitingSize);

		assert!(state.on_layout(300.0, 10.0));
		assert_eq!(state.divider_offsets(), &[100.0, 200.0]);

		assert!(!state.on_layout(600.0, 20.0));
		assert_eq!(
			state.layout(),
			Layout::Sized {
				width: 300.0,
				height: 10.0
			}
		);
		assert_eq!(state.divider_offsets(), &[100.0, 200.0]);
	}

	#[test]
	fn single_division_has_no_offsets() {
		let state = sized(300.0, 1);
		assert!(state.divider_offsets().is_empty());
	}

	#[test]
	fn divisions_before_layout_collapse_to_zero() {
		let mut state = BarState::default();
		state.set_divisions(4).unwrap();
		assert_eq!(state.divider_offsets(), &[0.0, 0.0, 0.0]);

		state.on_layout(400.0, 8.0);
		assert_eq!(state.divider_offsets(), &[100.0, 200.0, 300.0]);
	}

	#[test]
	fn rejects_too_few_divisions() {
		let mut state = sized(300.0, 3);

		assert!(matches!(state.set_divisions(0), Err(BarError::TooFewDivisions(0))));
		assert!(matches!(state.set_divisions(-5), Err(BarError::TooFewDivisions(-5))));
		assert_eq!(state.config().divisions, 3);
		assert_eq!(state.divider_offsets(), &[100.0, 200.0]);
	}

	#[test]
	fn rejects_negative_divider_width() {
		let mut state = BarState::default();
		state.set_divider_width(3.0).unwrap();

		assert!(state.set_divider_width(-1.0).is_err());
		assert!(state.set_divider_width(f64::NAN).is_err());
		assert_eq!(state.config().divider_width, 3.0);

		state.set_divider_width(0.0).unwrap();
		assert_eq!(state.config().divider_width, 0.0);
	}

	#[test]
	fn reset_clears_offsets_and_percent() {
		let mut state = sized(300.0, 3);
		state.reset();
		assert!(state.divider_offsets().is_empty());
		assert_eq!(state.percent_completed(), 0.0);

		state.reset();
		assert!(state.divider_offsets().is_empty());
		assert_eq!(state.percent_completed(), 0.0);

		state.set_divisions(4).unwrap();
		assert_eq!(state.divider_offsets(), &[75.0, 150.0, 225.0]);
	}

	#[test]
	fn three_segment_scenario() {
		let mut state = sized(300.0, 3);
		state.set_corner_radius(0.0);
		state.set_divider_width(2.0).unwrap();
		state.set_enabled_divisions(StyleMap::new().with(red(), [0, 2]).with(blue(), [1]));

		let canvas = render(&state);
		assert_eq!(
			canvas.round_rects_with(&red()),
			vec![
				Rect::new(0.0, 0.0, 100.0, 10.0),
				Rect::new(202.0, 0.0, 300.0, 10.0)
			]
		);
		assert_eq!(
			canvas.round_rects_with(&blue()),
			vec![Rect::new(102.0, 0.0, 200.0, 10.0)]
		);

		let dividers = canvas.rects_with(&state.config().divider);
		assert_eq!(
			dividers,
			vec![
				Rect::new(100.0, 0.0, 102.0, 10.0),
				Rect::new(200.0, 0.0, 202.0, 10.0)
			]
		);
	}

	#[test]
	fn segments_and_dividers_tile_the_bar() {
		let mut state = sized(300.0, 3);
		state.set_enabled_divisions(StyleMap::new().with(red(), [0, 2]).with(blue(), [1]));
		let canvas = render(&state);

		let mut pieces: Vec<Rect> = canvas.round_rects_with(&red());
		pieces.extend(canvas.round_rects_with(&blue()));
		pieces.extend(canvas.rects_with(&state.config().divider));
		pieces.sort_by(|a, b| a.left.total_cmp(&b.left));

		assert_eq!(pieces.first().map(|r| r.left), Some(0.0));
		assert_eq!(pieces.last().map(|r| r.right), Some(300.0));
		assert!(pieces.windows(2).all(|pair| pair[0].right == pair[1].left));
	}

	#[test]
	fn only_outer_corners_are_rounded() {
		let mut state = sized(300.0, 3);
		state.set_corner_radius(4.0);
		state.set_divider_enabled(false);
		state.set_enabled_divisions(StyleMap::new().with(red(), [0, 1, 2]));

		assert_eq!(
			render(&state).rects_with(&red()),
			vec![
				Rect::new(4.0, 0.0, 100.0, 10.0),
				Rect::new(101.0, 0.0, 200.0, 10.0),
				Rect::new(201.0, 0.0, 296.0, 10.0),
			]
		);
	}

	#[test]
	fn background_is_painted_first() {
		let mut state = sized(300.0, 2);
		state.set_enabled_divisions(StyleMap::new().with(red(), [1]));
		let canvas = render(&state);

		assert_eq!(
			canvas.ops.first(),
			Some(&Op::RoundRect(
				Rect::new(0.0, 0.0, 300.0, 10.0),
				2.0,
				state.config().background.clone()
			))
		);
	}

	#[test]
	fn out_of_range_indices_are_skipped() {
		let mut state = sized(300.0, 3);
		state.set_divider_enabled(false);
		state.set_enabled_divisions(StyleMap::new().with(red(), [3, 17]));

		let canvas = render(&state);
		assert!(canvas.round_rects_with(&red()).is_empty());
		assert!(canvas.rects_with(&red()).is_empty());
	}

	#[test]
	fn later_entries_paint_over_earlier_ones() {
		let mut state = sized(300.0, 3);
		state.set_enabled_divisions(StyleMap::new().with(red(), [1]).with(blue(), [1]));

		let canvas = render(&state);
		let last_segment_paint = canvas.ops.iter().rev().find_map(|op| match op {
			Op::RoundRect(rect, _, paint) if rect.left == 101.0 => Some(paint.clone()),
			_ => None,
		});
		assert_eq!(last_segment_paint, Some(blue()));
	}

	#[test]
	fn dividers_need_a_styled_segment() {
		let state = sized(300.0, 3);
		assert!(render(&state).rects_with(&state.config().divider).is_empty());
	}

	#[test]
	fn dividers_are_drawn_once() {
		let mut state = sized(300.0, 3);
		state.set_enabled_divisions(StyleMap::new().with(red(), [0, 1]).with(blue(), [2]));
		assert_eq!(render(&state).rects_with(&state.config().divider).len(), 2);
	}

	#[test]
	fn disabled_dividers_are_not_drawn() {
		let mut state = sized(300.0, 3);
		state.set_divider_enabled(false);
		state.set_enabled_divisions(StyleMap::new().with(red(), [0]));
		assert!(render(&state).rects_with(&state.config().divider).is_empty());
	}

	#[test]
	fn reset_skips_segments_without_offsets() {
		let mut state = sized(300.0, 3);
		state.set_enabled_divisions(StyleMap::new().with(red(), [0, 1, 2]));
		state.reset();

		let canvas = render(&state);
		// Only the first segment still has a known left edge
		assert_eq!(
			canvas.round_rects_with(&red()),
			vec![Rect::new(0.0, 0.0, 300.0, 10.0)]
		);
		assert!(canvas.rects_with(&state.config().divider).is_empty());
	}

	#[test]
	fn legacy_fill_covers_every_segment() {
		let mut state = sized(300.0, 3);
		state.set_progress_bar_color(red());
		assert_eq!(state.fill_strategy(), FillStrategy::Whole(red()));
		assert_eq!(render(&state).round_rects_with(&red()).len(), 3);
	}

	#[test]
	fn segment_styling_takes_precedence_over_legacy_fill() {
		let mut state = sized(300.0, 3);
		state.set_progress_bar_color(red());
		state.set_enabled_divisions(StyleMap::new().with(blue(), [2]));

		assert!(matches!(state.fill_strategy(), FillStrategy::Segments(_)));
		let canvas = render(&state);
		assert!(canvas.round_rects_with(&red()).is_empty());
		assert_eq!(canvas.round_rects_with(&blue()).len(), 1);

		state.set_enabled_divisions(StyleMap::new());
		assert_eq!(state.fill_strategy(), FillStrategy::Whole(red()));
	}

	#[test]
	fn enabled_divisions_are_replaced_not_merged() {
		let mut state = sized(300.0, 3);
		state.set_enabled_divisions(StyleMap::new().with(red(), [0]));
		let before = state.styles();

		state.set_enabled_divisions(StyleMap::new().with(blue(), [1]));
		assert_eq!(before.len(), 1);
		assert!(before.get(&red()).is_some());
		assert!(state.styles().get(&red()).is_none());
	}

	#[test]
	fn counts_filled_segments() {
		let mut state = sized(300.0, 4);
		assert_eq!(state.filled_segments(), 0);

		state.set_progress_bar_color(red());
		assert_eq!(state.filled_segments(), 4);

		state.set_enabled_divisions(StyleMap::new().with(red(), [0, 1, 9]).with(blue(), [1, 3]));
		assert_eq!(state.filled_segments(), 3);
	}

	#[test]
	fn replaced_config_keeps_valid_values() {
		let mut state = sized(300.0, 3);
		state.set_divider_width(2.0).unwrap();

		state.replace_config(BarConfig {
			divisions: 0,
			divider_width: -3.0,
			corner_radius: 5.0,
			..BarConfig::default()
		});

		let config = state.config();
		assert_eq!(config.divisions, 3);
		assert_eq!(config.divider_width, 2.0);
		assert_eq!(config.corner_radius, 5.0);
		assert_eq!(state.divider_offsets(), &[100.0, 200.0]);
	}

	#[test]
	fn invalid_initial_config_uses_defaults() {
		let state = BarState::new(BarConfig {
			divisions: 0,
			divider_width: f64::NAN,
			..BarConfig::default()
		});
		assert_eq!(state.config().divisions, 1);
		assert_eq!(state.config().divider_width, 1.0);
	}

	#[test]
	fn colour_setters() {
		let mut state = BarState::default();
		state.set_background_color(red());
		state.set_divider_color(blue());
		state.set_fill_color(red());

		assert_eq!(state.config().background, red());
		assert_eq!(state.config().divider, blue());
		assert_eq!(state.config().fill, red());
		assert_eq!(state.fill_strategy(), FillStrategy::Empty);
	}
}
