//! TUI state algebra: pure types, zero effects.
//!
//! The reader's whole state is the mounted [`Page`], the body scroll,
//! and a quit flag. Widget state lives inside the page.

use crossterm::event::KeyEvent;

use crate::page::Page;
use crate::widgets::copy::ExpiryTicket;
use crate::widgets::instances::ClassGroup;

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// Two producers feed a single mpsc channel:
/// - A key reader thread sends `Key` variants
/// - One short-lived timer thread per copy sends `CopyExpired`
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// The terminal was resized; redraw.
    Resize,
    /// A copy-feedback timer for the widget at `slot` fired.
    CopyExpired { slot: usize, ticket: ExpiryTicket },
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Vertical scroll of the chapter body.
///
/// The offset is free: the reader scrolls through prose by lines or
/// pages. Focus changes only request that the focused widget be brought
/// into view; the view settles the request against the real layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scroll {
    /// First visible row of the chapter body.
    pub offset: usize,
    /// Body height at the last settle, used as the page size.
    pub height: usize,
    /// Bring the focused widget on screen at the next settle.
    pub follow_focus: bool,
}

impl Scroll {
    /// Move by `n` rows (negative is up). Cancels a pending focus follow.
    pub fn by_lines(&mut self, n: i32) {
        self.offset = self.offset.saturating_add_signed(n as isize);
        self.follow_focus = false;
    }

    /// Move by `n` body heights, keeping two rows of context.
    pub fn by_pages(&mut self, n: i32) {
        let page = self.height.saturating_sub(2).max(1) as isize;
        self.offset = self.offset.saturating_add_signed(n as isize * page);
        self.follow_focus = false;
    }
}

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    pub page: Page,

    pub scroll: Scroll,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

impl App {
    /// Mount a fresh chapter.
    pub fn new() -> Self {
        Self::with_page(Page::mount())
    }

    pub fn with_page(page: Page) -> Self {
        App {
            page,
            scroll: Scroll::default(),
            should_quit: false,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
///
/// The effects layer maps key presses to Actions.
/// The transition function decides what each Action means for the
/// focused widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Focus the next widget.
    FocusNext,
    /// Focus the previous widget.
    FocusPrev,
    FocusFirst,
    FocusLast,
    /// Primary action of the focused widget: toggle, advance, switch, copy.
    Activate,
    /// Press the control for step `k` of a stepped walkthrough.
    Step(u8),
    /// Nudge the active slider.
    Adjust(i32),
    /// Scroll the body by rows.
    ScrollLines(i32),
    /// Scroll the body by screens.
    ScrollPages(i32),
    /// Move to the next slider.
    NextChannel,
    /// Move to the previous slider.
    PrevChannel,
    /// Switch between gray and RGB.
    SwitchMode,
    /// Pick a class on the statistics widget.
    SelectClass(ClassGroup),
    /// Copy the focused prompt.
    Copy,
    /// Quit the application.
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a state transition.
///
/// The update function returns this after mutating the page in place.
/// The effects boundary inspects it to decide whether to keep running
/// and which side effects to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Redraw and keep going.
    Stay,
    /// Quit the application.
    Quit,
    /// Execute a side effect, then redraw.
    Effect(Effect),
}

/// Side effect requested by a transition.
///
/// Pure code never executes these — it only describes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Copy the payload of the prompt widget at `slot`.
    CopyPrompt { slot: usize },
}

// ============================================================================
// TESTS
// ============================================================================
