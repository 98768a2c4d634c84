//! Source implementations for fetching UI5 versions

pub mod http;
pub mod npm;
pub mod payload;

pub use http::HttpUi5Registry;
pub use npm::NpmQuery;
