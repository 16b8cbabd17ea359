pub mod app;
pub mod names;

// Re-export commonly used types for convenience
pub use app::AppConfig;
pub use names::{parse_names, NamesError};
