//! UI primitives for the sitecrypt CLI.
//!
//! - **Context**: Environment detection (TTY, color, unicode, quiet)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens and styles
//! - **Render**: Badges, key-value lines, receipts
//! - **Progress**: Step list driven by pipeline stages

mod context;
mod mode;
pub mod progress;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use mode::OutputMode;
pub use progress::{StepList, Stream};
pub use render::{badge, receipt};
pub use theme::Badge;
