//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod comments;
pub mod dashboard;
pub mod images;
pub mod posts;
pub mod profile;
pub mod taxonomy;
