mod settings;

pub use settings::{
    Config, ConfigError, DemoConfig, StreamConfig, UiConfig, DEFAULT_STREAM_URL, EXAMPLE_CONFIG,
};
