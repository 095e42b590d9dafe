#[macro_use]
extern crate cascade;

use std::cell::Cell;
use std::env::args_os;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context;
use gtk::{
	gio::ApplicationFlags,
	glib::{self, clone},
	prelude::*,
};
use segmented_progress::{
	config::user::read_user_config, BarConfig, Paint, SegmentedProgressBar, StyleMap,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const APPLICATION_NAME: &str = "org.segmented.progress.demo";
const BAR_HEIGHT: i32 = 12;

struct Setup {
	config: BarConfig,
	styles: StyleMap,
}

fn load_setup(path: Option<&Path>) -> anyhow::Result<Setup> {
	let user_config = read_user_config(path).context("Failed to read config file")?;
	let theme = user_config.theme().context("Invalid [theme] table")?;
	let config = user_config
		.bar_config(&theme)
		.context("Invalid [bar] table")?;
	let styles = user_config
		.style_map(&theme)
		.context("Invalid [[segments]] entry")?;
	Ok(Setup { config, styles })
}

/// Styling that fills the first `filled` segments.
fn progress_styles(fill: &Paint, filled: u32) -> StyleMap {
	StyleMap::new().with(fill.clone(), 0..filled)
}

fn build_window(app: &gtk::Application, setup: &Setup) {
	let fill = setup.config.fill.clone();
	let divisions = setup.config.divisions;

	let bar = cascade! {
		SegmentedProgressBar::with_config(setup.config.clone());
		..set_height_request(BAR_HEIGHT);
		..set_enabled_divisions(setup.styles.clone());
	};

	let filled = Rc::new(Cell::new(0_u32));

	let next = gtk::Button::with_label("Next");
	next.connect_clicked(clone!(
		#[weak]
		bar,
		#[strong]
		filled,
		#[strong]
		fill,
		move |_| {
			let step = (filled.get() + 1) % (divisions + 1);
			filled.set(step);
			bar.set_enabled_divisions(progress_styles(&fill, step));
		}
	));

	let reset = gtk::Button::with_label("Reset");
	reset.connect_clicked(clone!(
		#[weak]
		bar,
		#[strong]
		filled,
		move |_| {
			filled.set(0);
			bar.reset();
			// Dividers come back once the divisions are set again
			bar.set_divisions(bar.divisions());
			bar.set_enabled_divisions(StyleMap::new());
		}
	));

	let buttons = cascade! {
		gtk::Box::new(gtk::Orientation::Horizontal, 6);
		..set_halign(gtk::Align::End);
		..append(&reset);
		..append(&next);
	};

	let container = cascade! {
		gtk::Box::new(gtk::Orientation::Vertical, 12);
		..set_margin_top(18);
		..set_margin_bottom(18);
		..set_margin_start(18);
		..set_margin_end(18);
		..append(&bar);
		..append(&buttons);
	};

	let window = cascade! {
		gtk::ApplicationWindow::new(app);
		..set_title(Some("Segmented progress"));
		..set_default_width(360);
		..set_child(Some(&container));
	};
	window.present();
}

fn main() -> glib::ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.init();

	// Get config path from command line
	let mut config_path: Option<PathBuf> = None;
	let mut args = args_os();
	while let Some(arg) = args.next() {
		if let Some("--config") = arg.to_str() {
			if let Some(path) = args.next() {
				config_path = Some(path.into());
			}
		}
	}

	let setup = match load_setup(config_path.as_deref()) {
		Ok(setup) => setup,
		Err(error) => {
			error!("{:#}", error);
			return glib::ExitCode::FAILURE;
		}
	};
	info!(divisions = setup.config.divisions, "starting demo");

	let app = gtk::Application::new(Some(APPLICATION_NAME), ApplicationFlags::FLAGS_NONE);
	app.connect_activate(move |app| build_window(app, &setup));
	// Our own arguments were handled above, keep GApplication from parsing them
	app.run_with_args::<&str>(&[])
}
