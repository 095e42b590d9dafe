use thiserror::Error;

#[derive(Debug, Error)]
pub enum BarError {
	#[error("divider width can not be negative (got {0})")]
	NegativeDividerWidth(f64),

	#[error("number of divisions cannot be less than 1 (got {0})")]
	TooFewDivisions(i32),

	#[error("could not parse colour {0:?}")]
	InvalidColor(String),

	#[error("theme has no colour named {0:?}")]
	UnknownThemeColor(String),

	#[error("could not read config file: {0}")]
	Io(#[from] std::io::Error),

	#[error("could not parse config file: {0}")]
	Toml(#[from] toml::de::Error),
}
