//! Builder API for assembling a widget from configuration and collaborators.

pub mod error;
pub mod widget;

pub use error::BuildError;
pub use widget::WidgetBuilder;
