pub mod context;
pub mod display;
pub mod store;

// Re-export commonly used types for convenience
pub use context::Context;
pub use display::{Display, HostError};
pub use store::Store;
