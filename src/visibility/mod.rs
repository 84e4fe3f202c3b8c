//! Visibility culling and incremental loading

pub mod config;
pub mod source;
pub mod loader;
pub mod manager;

pub use config::{DisplayOptions, VisibilityConfig};
pub use source::{PointSource, VecSource};
pub use loader::{check_and_load_more_stars, LoadOutcome, LoadState};
pub use manager::{visible_within, ViewChange, VisibilityManager};
