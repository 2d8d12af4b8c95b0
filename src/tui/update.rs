//! State transitions: (App, Action) → Transition.
//!
//! This is the core logic of the reader. Fully testable without a
//! terminal. Scroll actions move the body; navigation actions move
//! focus; everything else is routed to the focused widget, which decides
//! what the action means. Actions a widget does not understand are a
//! no-op.

use tracing::debug;

use crate::page::Page;
use crate::widgets::Widget;

use super::state::{Action, App, AppEvent, Effect, Transition};

/// Transition function for the whole app.
///
/// Scroll actions only touch the scroll. Any other action may change
/// the focused widget or its height, so it asks the view to bring the
/// focused widget on screen.
pub fn update_app(app: &mut App, action: &Action) -> Transition {
    match action {
        Action::ScrollLines(n) => app.scroll.by_lines(*n),
        Action::ScrollPages(n) => app.scroll.by_pages(*n),
        _ => {
            app.scroll.follow_focus = true;
            return update(&mut app.page, action);
        }
    }
    Transition::Stay
}

/// Page transition function.
///
/// Mutates widget state in place and reports what the effects boundary
/// should do next. Never performs I/O itself.
pub fn update(page: &mut Page, action: &Action) -> Transition {
    match action {
        Action::Quit => return Transition::Quit,
        Action::FocusNext => page.focus_next(),
        Action::FocusPrev => page.focus_prev(),
        Action::FocusFirst => page.focus_first(),
        Action::FocusLast => page.focus_last(),
        Action::ScrollLines(_) | Action::ScrollPages(_) => {}
        _ => {
            let slot = page.focus();
            if let Some(widget) = page.focused_mut() {
                return update_widget(widget, slot, action);
            }
        }
    }
    Transition::Stay
}

/// Route a widget-level action to the focused widget.
fn update_widget(widget: &mut Widget, slot: usize, action: &Action) -> Transition {
    debug!(kind = widget.kind(), slot, ?action, "widget action");

    match widget {
        Widget::Noise(w) => toggle_on_activate(action, || {
            w.toggle();
        }),
        Widget::Matrix(w) => toggle_on_activate(action, || {
            w.toggle();
        }),
        Widget::Signal(w) => toggle_on_activate(action, || {
            w.toggle();
        }),
        Widget::Imbalance(w) => toggle_on_activate(action, || {
            w.toggle();
        }),
        Widget::LookCloser(w) => toggle_on_activate(action, || {
            w.toggle();
        }),
        Widget::Stats(w) => {
            match action {
                Action::Activate => {
                    w.toggle();
                }
                Action::SelectClass(group) => w.select(*group),
                _ => {}
            }
            Transition::Stay
        }
        Widget::Detective(w) => {
            match action {
                Action::Activate => {
                    w.advance();
                }
                Action::Step(k) => {
                    if !w.activate(*k) {
                        debug!(step = w.step(), requested = k, "step control ignored");
                    }
                }
                _ => {}
            }
            Transition::Stay
        }
        Widget::Pixel(w) => {
            match action {
                Action::Activate | Action::SwitchMode => {
                    w.toggle_mode();
                }
                Action::Adjust(delta) => {
                    w.adjust(*delta);
                }
                Action::NextChannel => {
                    w.next_channel();
                }
                Action::PrevChannel => {
                    w.prev_channel();
                }
                _ => {}
            }
            Transition::Stay
        }
        Widget::Prompt(_) => match action {
            Action::Activate | Action::Copy => Transition::Effect(Effect::CopyPrompt { slot }),
            _ => Transition::Stay,
        },
    }
}

/// Plain reveal widgets respond to Activate only.
fn toggle_on_activate(action: &Action, toggle: impl FnOnce()) -> Transition {
    if *action == Action::Activate {
        toggle();
    }
    Transition::Stay
}

// ============================================================================
// BACKGROUND EVENTS
// ============================================================================

/// Apply a non-key event to the app.
pub fn handle_background_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::CopyExpired { slot, ticket } => {
            if let Some(Widget::Prompt(prompt)) = app.page.widget_mut(slot) {
                prompt.expire(ticket);
            }
        }
        // Redraw happens on every loop iteration
        AppEvent::Resize | AppEvent::Key(_) => {}
    }
}

// ============================================================================
// TESTS
// ============================================================================
