pub mod config;
pub mod logging;
pub mod theme;
pub mod version;

pub use theme::{ThemeDescriptor, ThemeId, get_default_theme};
pub use version::service::{Resolution, Ui5Info};
pub use version::types::{FilterOptions, VersionRecord};
