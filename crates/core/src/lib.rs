//! Domain logic for the quill blogging platform.
//!
//! This crate is pure: no I/O, no database access. It defines the shared
//! error taxonomy and the validation / permission rules that the `quill-db`
//! repositories and `quill-api` handlers enforce.

pub mod comments;
pub mod error;
pub mod images;
pub mod posts;
pub mod types;
