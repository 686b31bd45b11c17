//! QR request client: backends, the generate controller and result actions

mod actions;
mod backend;
mod generator;

pub use actions::{copy_content, download};
pub use backend::{HttpBackend, LocalBackend, QrBackend};
pub use generator::{CancelHandle, Generator, ResultArea, Trigger};
