//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//! Kept minimal; the logic lives in the pure layers.
//!
//! Architecture: producer threads feed a single mpsc channel.
//! - Key reader thread: forwards crossterm key and resize events
//! - Expiry timers: one thread per prompt, rearmed by every copy
//! The event loop consumes from the channel, dispatching to pure handlers.

use std::collections::HashMap;
use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info};

use crate::error::ChapterError;
use crate::widgets::copy::{Clipboard, ExpiryTicket, Osc52Clipboard};
use crate::widgets::instances::ClassGroup;
use crate::widgets::Widget;

use super::state::{Action, App, AppEvent, Effect, Transition};
use super::update::{handle_background_event, update_app};
use super::view::{body_area, render, settle_scroll};

/// Slider step when Shift is held.
const BIG_STEP: i32 = 10;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            // Ctrl+C always quits
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('d') => Some(Action::ScrollPages(1)),
            KeyCode::Char('u') => Some(Action::ScrollPages(-1)),
            KeyCode::Char('e') => Some(Action::ScrollLines(1)),
            KeyCode::Char('y') => Some(Action::ScrollLines(-1)),
            _ => None,
        };
    }

    let step = if key.modifiers.contains(KeyModifiers::SHIFT) { BIG_STEP } else { 1 };

    match key.code {
        // Navigation
        KeyCode::Down | KeyCode::Char('j') => Some(Action::FocusNext),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::FocusPrev),
        KeyCode::Home | KeyCode::Char('g') => Some(Action::FocusFirst),
        KeyCode::End | KeyCode::Char('G') => Some(Action::FocusLast),

        // Free scrolling
        KeyCode::PageDown => Some(Action::ScrollPages(1)),
        KeyCode::PageUp => Some(Action::ScrollPages(-1)),
        KeyCode::Char('J') => Some(Action::ScrollLines(1)),
        KeyCode::Char('K') => Some(Action::ScrollLines(-1)),

        // Widget controls
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Activate),
        KeyCode::Char(c @ '1'..='3') => Some(Action::Step(c as u8 - b'0')),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Adjust(-step)),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Adjust(step)),
        KeyCode::Char('H') => Some(Action::Adjust(-BIG_STEP)),
        KeyCode::Char('L') => Some(Action::Adjust(BIG_STEP)),
        KeyCode::Tab => Some(Action::NextChannel),
        KeyCode::BackTab => Some(Action::PrevChannel),
        KeyCode::Char('m') => Some(Action::SwitchMode),
        KeyCode::Char('a') => Some(Action::SelectClass(ClassGroup::A)),
        KeyCode::Char('b') => Some(Action::SelectClass(ClassGroup::B)),
        KeyCode::Char('c') => Some(Action::Copy),

        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),

        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    Terminal::new(backend)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards them to the channel.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            let event = match event::read() {
                // Key releases arrive on some platforms; only presses count
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => AppEvent::Key(key),
                Ok(Event::Resize(..)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(event).is_err() {
                break; // receiver dropped, TUI is shutting down
            }
        }
    });
}

/// Copy-feedback timers, one thread per prompt slot.
///
/// A new ticket for a slot replaces the pending one on that slot's
/// thread, so a burst of copies never piles up sleeping threads.
pub struct ExpiryTimers {
    events: mpsc::Sender<AppEvent>,
    timers: HashMap<usize, mpsc::Sender<ExpiryTicket>>,
}

impl ExpiryTimers {
    pub fn new(events: mpsc::Sender<AppEvent>) -> Self {
        ExpiryTimers {
            events,
            timers: HashMap::new(),
        }
    }

    /// Arm the timer for `slot` with `ticket`, starting it if needed.
    pub fn schedule(&mut self, slot: usize, ticket: ExpiryTicket) {
        if let Some(timer) = self.timers.get(&slot) {
            if timer.send(ticket).is_ok() {
                return;
            }
        }
        let (timer, deadlines) = mpsc::channel();
        spawn_expiry(self.events.clone(), slot, deadlines);
        // The receiver was just created, so this cannot fail
        let _ = timer.send(ticket);
        self.timers.insert(slot, timer);
    }

    /// Number of running timer threads.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

/// Spawn the timer thread for one prompt slot.
///
/// Waits for a ticket, then until it is due; a newer ticket arriving in
/// the meantime replaces it. Exits once the scheduler is dropped and
/// nothing is pending, or when the event loop is gone.
fn spawn_expiry(events: mpsc::Sender<AppEvent>, slot: usize, deadlines: mpsc::Receiver<ExpiryTicket>) {
    thread::spawn(move || {
        let mut pending: Option<ExpiryTicket> = None;
        loop {
            let Some(ticket) = pending else {
                match deadlines.recv() {
                    Ok(ticket) => pending = Some(ticket),
                    Err(_) => return,
                }
                continue;
            };
            let wait = ticket.due.saturating_duration_since(Instant::now());
            match deadlines.recv_timeout(wait) {
                Ok(newer) => pending = Some(newer),
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => {
                    if events.send(AppEvent::CopyExpired { slot, ticket }).is_err() {
                        return;
                    }
                    pending = None;
                }
            }
        }
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the chapter reader until the user quits.
///
/// Sets up the terminal, mounts a fresh chapter, and runs the event loop.
/// Widget state lives for the duration of this call only.
pub fn run() -> Result<(), ChapterError> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let mut app = App::new();
    info!(widgets = app.page.widget_count(), "chapter mounted");

    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_key_reader(tx.clone());
    let mut timers = ExpiryTimers::new(tx);

    let result = event_loop(&mut terminal, &mut app, &mut timers, &rx);

    restore_terminal()?;
    info!("reader closed");
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    timers: &mut ExpiryTimers,
    rx: &mpsc::Receiver<AppEvent>,
) -> Result<(), ChapterError> {
    loop {
        terminal.draw(|frame| {
            settle_scroll(app, body_area(frame.area()));
            render(app, frame);
        })?;

        if app.should_quit {
            return Ok(());
        }

        // Block on next event from any producer
        let Ok(event) = rx.recv() else {
            return Ok(());
        };

        match event {
            AppEvent::Key(key) => {
                let Some(action) = map_key(key) else {
                    continue;
                };
                match update_app(app, &action) {
                    Transition::Stay => {}
                    Transition::Quit => app.should_quit = true,
                    Transition::Effect(effect) => {
                        handle_effect(effect, app, &mut Osc52Clipboard::stdout(), timers);
                    }
                }
            }
            background_event => handle_background_event(app, background_event),
        }
    }
}

// ============================================================================
// EFFECT HANDLING
// ============================================================================

/// Handle a side effect requested by a pure transition.
fn handle_effect(
    effect: Effect,
    app: &mut App,
    clipboard: &mut impl Clipboard,
    timers: &mut ExpiryTimers,
) {
    match effect {
        Effect::CopyPrompt { slot } => {
            let Some(Widget::Prompt(prompt)) = app.page.widget_mut(slot) else {
                debug!(slot, "copy requested for a non-prompt slot");
                return;
            };
            // Failure is logged by the prompt and shows no feedback
            if let Some(ticket) = prompt.copy(clipboard, Instant::now()) {
                timers.schedule(slot, ticket);
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Block, Page, Section};
    use crate::widgets::CopyAffordance;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn ctrl_c_maps_to_quit() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), Some(Action::Quit));
    }

    #[test]
    fn plain_c_copies() {
        assert_eq!(map_key(key(KeyCode::Char('c'))), Some(Action::Copy));
    }

    #[test]
    fn vim_keys_map_to_focus() {
        assert_eq!(map_key(key(KeyCode::Char('j'))), Some(Action::FocusNext));
        assert_eq!(map_key(key(KeyCode::Char('k'))), Some(Action::FocusPrev));
        assert_eq!(map_key(key(KeyCode::Char('g'))), Some(Action::FocusFirst));
        assert_eq!(map_key(key(KeyCode::Char('G'))), Some(Action::FocusLast));
    }

    #[test]
    fn arrow_keys_map_to_focus() {
        assert_eq!(map_key(key(KeyCode::Up)), Some(Action::FocusPrev));
        assert_eq!(map_key(key(KeyCode::Down)), Some(Action::FocusNext));
    }

    #[test]
    fn enter_and_space_activate() {
        assert_eq!(map_key(key(KeyCode::Enter)), Some(Action::Activate));
        assert_eq!(map_key(key(KeyCode::Char(' '))), Some(Action::Activate));
    }

    #[test]
    fn number_keys_map_to_steps() {
        for n in 1..=3u8 {
            let key = key(KeyCode::Char((b'0' + n) as char));
            assert_eq!(map_key(key), Some(Action::Step(n)));
        }
        assert_eq!(map_key(key(KeyCode::Char('4'))), None);
    }

    #[test]
    fn shift_makes_big_slider_steps() {
        assert_eq!(map_key(key(KeyCode::Left)), Some(Action::Adjust(-1)));
        assert_eq!(map_key(key(KeyCode::Right)), Some(Action::Adjust(1)));
        let shifted = KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT);
        assert_eq!(map_key(shifted), Some(Action::Adjust(10)));
        assert_eq!(map_key(key(KeyCode::Char('H'))), Some(Action::Adjust(-10)));
    }

    #[test]
    fn class_keys_select_groups() {
        assert_eq!(map_key(key(KeyCode::Char('a'))), Some(Action::SelectClass(ClassGroup::A)));
        assert_eq!(map_key(key(KeyCode::Char('b'))), Some(Action::SelectClass(ClassGroup::B)));
    }

    #[test]
    fn page_and_line_scroll_keys() {
        assert_eq!(map_key(key(KeyCode::PageDown)), Some(Action::ScrollPages(1)));
        assert_eq!(map_key(key(KeyCode::PageUp)), Some(Action::ScrollPages(-1)));
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        let ctrl_y = KeyEvent::new(KeyCode::Char('y'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_d), Some(Action::ScrollPages(1)));
        assert_eq!(map_key(ctrl_y), Some(Action::ScrollLines(-1)));
        assert_eq!(map_key(key(KeyCode::Char('J'))), Some(Action::ScrollLines(1)));
    }

    #[test]
    fn control_does_not_leak_into_plain_keys() {
        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_a), None);
    }

    #[test]
    fn unmapped_key_returns_none() {
        assert_eq!(map_key(key(KeyCode::Char('z'))), None);
    }

    // -- Effects --

    struct Recording(Vec<String>);

    impl Clipboard for Recording {
        fn write_text(&mut self, text: &str) -> io::Result<()> {
            self.0.push(text.to_string());
            Ok(())
        }
    }

    struct Denied;

    impl Clipboard for Denied {
        fn write_text(&mut self, _text: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "no clipboard"))
        }
    }

    fn prompt_app() -> App {
        App::with_page(Page::from_sections(vec![Section::new(
            "test",
            vec![Block::Widget(Widget::Prompt(CopyAffordance::new("copy me")))],
        )]))
    }

    #[test]
    fn copy_effect_writes_payload_and_schedules_expiry() {
        let mut app = prompt_app();
        let (tx, rx) = mpsc::channel();
        let mut timers = ExpiryTimers::new(tx);
        let mut clipboard = Recording(Vec::new());

        handle_effect(Effect::CopyPrompt { slot: 0 }, &mut app, &mut clipboard, &mut timers);

        assert_eq!(clipboard.0, vec!["copy me".to_string()]);
        assert!(matches!(app.page.widget(0), Some(Widget::Prompt(p)) if p.is_copied()));

        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        handle_background_event(&mut app, event);
        assert!(matches!(app.page.widget(0), Some(Widget::Prompt(p)) if !p.is_copied()));
    }

    #[test]
    fn burst_of_copies_shares_one_timer_and_fires_once() {
        let mut app = prompt_app();
        let (tx, rx) = mpsc::channel();
        let mut timers = ExpiryTimers::new(tx);
        let mut clipboard = Recording(Vec::new());

        for _ in 0..3 {
            handle_effect(Effect::CopyPrompt { slot: 0 }, &mut app, &mut clipboard, &mut timers);
        }
        assert_eq!(timers.len(), 1);

        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        let AppEvent::CopyExpired { slot, ticket } = event else {
            panic!("Expected an expiry event");
        };
        assert_eq!(slot, 0);
        assert_eq!(ticket.generation, 3);

        handle_background_event(&mut app, event);
        assert!(matches!(app.page.widget(0), Some(Widget::Prompt(p)) if !p.is_copied()));
        assert!(matches!(
            rx.recv_timeout(Duration::from_millis(2500)),
            Err(RecvTimeoutError::Timeout)
        ));
    }

    #[test]
    fn timer_thread_is_reused_after_firing() {
        let (tx, rx) = mpsc::channel();
        let mut timers = ExpiryTimers::new(tx);

        for generation in 1..=2 {
            timers.schedule(4, ExpiryTicket { generation, due: Instant::now() });
            match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
                AppEvent::CopyExpired { slot, ticket } => {
                    assert_eq!(slot, 4);
                    assert_eq!(ticket.generation, generation);
                }
                other => panic!("Expected expiry, got {other:?}"),
            }
        }
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn failed_copy_schedules_nothing() {
        let mut app = prompt_app();
        let (tx, rx) = mpsc::channel();
        let mut timers = ExpiryTimers::new(tx);

        handle_effect(Effect::CopyPrompt { slot: 0 }, &mut app, &mut Denied, &mut timers);

        assert!(matches!(app.page.widget(0), Some(Widget::Prompt(p)) if !p.is_copied()));
        assert!(timers.is_empty());
        drop(timers);
        assert!(rx.recv().is_err());
    }
}
