#[macro_use]
extern crate shrinkwraprs;

pub mod canvas;
pub mod config;
pub mod error;
pub mod geometry;
pub mod paint;
pub mod state;
pub mod style_map;
pub mod theme;
pub mod widgets;

pub use config::{BarAttributes, BarConfig};
pub use error::BarError;
pub use paint::Paint;
pub use style_map::StyleMap;
pub use theme::Theme;
pub use widgets::segmented_progress_bar::SegmentedProgressBar;
