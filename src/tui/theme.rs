//! TUI color semantics and style constants.
//!
//! Centralized theme definitions for the chapter reader.
//! Pure data — consumed by the rendering layer for visual consistency.
//!
//! Color semantics:
//! - Green: correct, clean, fixed (model is sure, corrected cells)
//! - Yellow: attention (missing data, call-outs)
//! - Red: wrong, noisy, outlier
//! - Cyan: interactive elements (keybinding hints, focused widget)
//! - Magenta: prompt boxes
//! - Dim: de-emphasized (disabled controls, hidden values)
//! - Bold: important (headings, numbers)

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Correct / clean / fixed — green.
pub const STYLE_SAFE: Style = Style::new().fg(Color::Green);

/// Attention needed — yellow.
pub const STYLE_WARNING: Style = Style::new().fg(Color::Yellow);

/// Wrong / noisy / outlier — red.
pub const STYLE_DANGER: Style = Style::new().fg(Color::Red);

/// Interactive element / keybinding hint — cyan.
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// De-emphasized text — dark gray.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Important text — bold.
pub const STYLE_IMPORTANT: Style = Style::new().add_modifier(Modifier::BOLD);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar / section heading.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Selected option in a selector (pixel mode, class A/B).
pub const STYLE_SELECTED: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

/// Header of the focused widget.
pub const STYLE_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Gutter beside widget bodies.
pub const STYLE_GUTTER: Style = Style::new().fg(Color::DarkGray);

/// Gutter beside the focused widget's body.
pub const STYLE_GUTTER_FOCUSED: Style = Style::new().fg(Color::Cyan);

/// Prompt box accent.
pub const STYLE_PROMPT: Style = Style::new().fg(Color::Magenta);

/// Blurred wave / unsampled signal.
pub const STYLE_BLUR: Style = Style::new().fg(Color::Blue).add_modifier(Modifier::DIM);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// TESTS
// ============================================================================
