//! UI utilities for terminal output.

mod banner;
mod notifications;
mod qr;

pub use banner::print_banner;
pub use notifications::print_notifications;
pub use qr::print_qr_code;
