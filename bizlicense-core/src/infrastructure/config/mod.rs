pub mod app;

pub use app::{AppConfig, LoadedConfig, ReportConfig, ReportProvider, load_app_config, load_app_config_from};
