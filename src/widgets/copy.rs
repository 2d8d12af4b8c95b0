//! Copy-to-clipboard affordance with transient "Copied!" feedback.
//!
//! The flag is set only after a successful clipboard write and cleared
//! by an [`ExpiryTicket`] 2 seconds later. Every successful copy issues a
//! fresh ticket and invalidates the previous one, so an old timer firing
//! late cannot clear feedback for a newer copy.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::clipboard::CopyToClipboard;
use crossterm::ExecutableCommand;

/// How long "Copied!" stays up after the most recent copy.
pub const COPY_FEEDBACK: Duration = Duration::from_millis(2000);

/// Title used when a prompt box is given none.
pub const DEFAULT_TITLE: &str = "Vibe Coding Tip";

// ============================================================================
// CLIPBOARD
// ============================================================================

/// Something text can be copied into.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> io::Result<()>;
}

/// System clipboard via the terminal's OSC 52 escape sequence.
///
/// Works over SSH and inside multiplexers that forward OSC 52. Terminals
/// that ignore the sequence give no signal back, so success here means
/// "written to the terminal", not "landed in the clipboard".
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl Osc52Clipboard<io::Stdout> {
    pub fn stdout() -> Self {
        Osc52Clipboard { out: io::stdout() }
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Osc52Clipboard { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.out.execute(CopyToClipboard::to_clipboard_from(text))?;
        Ok(())
    }
}

// ============================================================================
// EXPIRY
// ============================================================================

/// Handle for one scheduled feedback reset.
///
/// Only the ticket from the latest copy can clear the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryTicket {
    pub generation: u64,
    pub due: Instant,
}

// ============================================================================
// AFFORDANCE
// ============================================================================

/// A prompt box: fixed text, optional title, copy button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyAffordance {
    title: String,
    payload: String,
    copied: bool,
    generation: u64,
    due: Option<Instant>,
}

impl CopyAffordance {
    pub fn new(payload: impl Into<String>) -> Self {
        CopyAffordance {
            title: DEFAULT_TITLE.to_string(),
            payload: payload.into(),
            copied: false,
            generation: 0,
            due: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn is_copied(&self) -> bool {
        self.copied
    }

    /// When the current feedback is due to clear, if showing.
    pub fn due(&self) -> Option<Instant> {
        self.due
    }

    pub fn button_label(&self) -> &'static str {
        if self.copied { "Copied!" } else { "Copy" }
    }

    /// Copy the payload, best-effort.
    ///
    /// On success sets the flag and returns the ticket the caller must
    /// schedule. On failure logs and returns `None`; the flag is left as
    /// it was, so a failed copy never shows "Copied!".
    pub fn copy(&mut self, clipboard: &mut impl Clipboard, now: Instant) -> Option<ExpiryTicket> {
        if let Err(e) = clipboard.write_text(&self.payload) {
            tracing::warn!(error = %e, title = %self.title, "clipboard write failed");
            return None;
        }

        self.generation += 1;
        let due = now + COPY_FEEDBACK;
        self.copied = true;
        self.due = Some(due);
        tracing::info!(title = %self.title, generation = self.generation, "prompt copied");

        Some(ExpiryTicket {
            generation: self.generation,
            due,
        })
    }

    /// A scheduled reset fired. Clears the flag only if `ticket` is the
    /// latest one issued; returns whether it did.
    pub fn expire(&mut self, ticket: ExpiryTicket) -> bool {
        if ticket.generation != self.generation || !self.copied {
            tracing::trace!(stale = ticket.generation, current = self.generation, "ignoring expiry");
            return false;
        }
        self.copied = false;
        self.due = None;
        true
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Records what was copied.
    #[derive(Default)]
    struct Recording(Vec<String>);

    impl Clipboard for Recording {
        fn write_text(&mut self, text: &str) -> io::Result<()> {
            self.0.push(text.to_string());
            Ok(())
        }
    }

    /// Rejects every write, like a terminal without clipboard access.
    struct Denied;

    impl Clipboard for Denied {
        fn write_text(&mut self, _text: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "clipboard unavailable"))
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn default_title_applies() {
        let box_ = CopyAffordance::new("hello");
        assert_eq!(box_.title(), DEFAULT_TITLE);
        assert_eq!(box_.payload(), "hello");
        assert!(!box_.is_copied());
        assert_eq!(box_.button_label(), "Copy");
    }

    #[test]
    fn copy_writes_payload_and_sets_flag_immediately() {
        let mut clipboard = Recording::default();
        let mut box_ = CopyAffordance::new("write me a parser").with_title("Parsing");
        let t0 = Instant::now();

        let ticket = box_.copy(&mut clipboard, t0).expect("copy should succeed");

        assert_eq!(clipboard.0, vec!["write me a parser".to_string()]);
        assert!(box_.is_copied());
        assert_eq!(box_.button_label(), "Copied!");
        assert_eq!(ticket.due, t0 + ms(2000));
        assert_eq!(box_.due(), Some(t0 + ms(2000)));
    }

    #[test]
    fn feedback_clears_when_its_ticket_fires() {
        let mut box_ = CopyAffordance::new("x");
        let ticket = box_.copy(&mut Recording::default(), Instant::now()).unwrap();
        assert!(box_.expire(ticket));
        assert!(!box_.is_copied());
        assert_eq!(box_.due(), None);
    }

    #[test]
    fn second_copy_supersedes_first_timer() {
        let mut clipboard = Recording::default();
        let mut box_ = CopyAffordance::new("x");
        let t0 = Instant::now();

        let first = box_.copy(&mut clipboard, t0).unwrap();
        let second = box_.copy(&mut clipboard, t0 + ms(1000)).unwrap();
        assert_eq!(second.due, t0 + ms(3000));

        // t = 2000: the first timer fires but must not clear the flag
        assert!(!box_.expire(first));
        assert!(box_.is_copied());

        // t = 3000: the second timer clears it
        assert!(box_.expire(second));
        assert!(!box_.is_copied());
    }

    #[test]
    fn failed_copy_never_sets_flag() {
        let mut box_ = CopyAffordance::new("x");
        assert_eq!(box_.copy(&mut Denied, Instant::now()), None);
        assert!(!box_.is_copied());
        assert_eq!(box_.due(), None);
    }

    #[test]
    fn failed_copy_leaves_pending_feedback_alone() {
        let mut box_ = CopyAffordance::new("x");
        let t0 = Instant::now();
        let ticket = box_.copy(&mut Recording::default(), t0).unwrap();

        assert_eq!(box_.copy(&mut Denied, t0 + ms(500)), None);
        assert!(box_.is_copied());
        assert!(box_.expire(ticket));
    }

    #[test]
    fn expiring_twice_is_harmless() {
        let mut box_ = CopyAffordance::new("x");
        let ticket = box_.copy(&mut Recording::default(), Instant::now()).unwrap();
        assert!(box_.expire(ticket));
        assert!(!box_.expire(ticket));
        assert!(!box_.is_copied());
    }

    #[test]
    fn osc52_clipboard_emits_escape_sequence() {
        let mut clipboard = Osc52Clipboard::new(Vec::new());
        clipboard.write_text("hi").unwrap();
        let bytes = clipboard.into_inner();
        assert!(bytes.starts_with(b"\x1b]52;"), "expected OSC 52 prefix");
    }
}
