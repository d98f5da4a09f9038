pub mod catalog;
pub mod config;
pub mod loader;
pub mod media;
pub mod metrics;
pub mod paginate;
pub mod search;
pub mod shuffle;
pub mod source;
pub mod testing;
pub mod view;

pub use catalog::{Field, Record, RecordTable, TableOptions};
pub use config::{
    load_config, load_config_from_str, validate_config, CatalogConfig, Config, ConfigError,
    SanitizedConfig, ServerConfig, SessionsConfig, SourceConfig,
};
pub use loader::{DataLoader, LoadDiagnostics, LoadedTable, DEFAULT_CACHE_TTL};
pub use paginate::{paginate, PageMove, PageOutOfRange, PAGE_SIZE};
pub use search::{filter, sanitize, SearchQuery};
pub use shuffle::{daily_order, daily_seed, DailyOrder};
pub use source::{DataSourceError, GoogleSheetsSource, TabularSource};
pub use view::{
    MalformedDeepLink, RecordNotFound, RenderState, Session, UrlParams, View, ViewMode, ViewState,
};
