//! Layered simulation configuration: defaults, then an optional TOML file,
//! then `SCRAPPY_*` environment variables.
//!
//! Nested keys use a double underscore, e.g.
//! `SCRAPPY_OUTCOME__NOISE_AMPLITUDE=0.0` or `SCRAPPY_EMPTY_ROUND=allow`.

use scrappy_session::SimulationConfig;

pub fn load(path: Option<&str>) -> Result<SimulationConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    builder = builder.add_source(config::Config::try_from(&SimulationConfig::default())?);

    if let Some(path) = path {
        builder = builder.add_source(config::File::with_name(path).required(true));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("SCRAPPY")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    builder.build()?.try_deserialize()
}
