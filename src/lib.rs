// CreditSea Report Client - Core Library
// Screen logic, API client and formatting shared by the TUI and the CLI

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod models;
pub mod route;
pub mod score;
pub mod screens;
pub mod search;
pub mod tasks;
pub mod view;

// Re-export commonly used types
pub use api::ApiClient;
pub use app::{App, Effect, Msg, Screen};
pub use config::Config;
pub use error::ClientError;
pub use models::{Report, UploadResponse};
pub use route::{NavTab, Route};
pub use score::{ScoreBand, ScoreTier, Swatch};
pub use screens::{
    DetailState, DetailView, EmptyState, ListState, ReportCard, ReportDetailScreen,
    ReportListScreen, RequestKey, SelectedFile, UploadScreen, UploadState,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
