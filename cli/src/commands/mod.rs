//! CLI command implementations.

mod delete;
mod generate;
mod widget;

pub use delete::delete;
pub use generate::generate;
pub use widget::widget;
