//! Kashidashi client
//!
//! Interaction layer of the Kashidashi book-lending application: defaults the
//! loan timestamp, submits the book and user creation forms in the background
//! while keeping their select lists in sync, and reads ISBN barcodes from the
//! camera or the clipboard.
//!
//! The document, the camera, the barcode detector and the clipboard are
//! reached through the [`page::Page`] and [`platform`] traits.

pub mod app;
pub mod config;
pub mod error;
pub mod isbn;
pub mod messages;
pub mod models;
pub mod page;
pub mod platform;
pub mod services;

pub use app::{App, PageFeatures};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
