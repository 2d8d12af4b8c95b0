//! data-chapter: "The World of Data", an interactive terminal chapter.

pub mod content;
pub mod error;
pub mod logging;
pub mod outline;
pub mod page;
pub mod tui;
pub mod types;
pub mod widgets;
