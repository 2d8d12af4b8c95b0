//! Pure rendering: map App state to ratatui widget trees.
//!
//! The whole chapter is laid out as one list of lines and shown through
//! the app's scroll offset. The only effect is Frame::render_widget()
//! which writes to the terminal buffer.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::content::{CHAPTER_END, CHAPTER_LABEL, CHAPTER_TITLE};
use crate::page::{Block, Page};
use crate::widgets::Widget;

use super::blocks;
use super::state::{App, Scroll};
use super::theme;

// ============================================================================
// DISPATCH
// ============================================================================

/// Split a frame into title bar, chapter body and help line.
fn frame_areas(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(1), // help
    ])
    .areas(area)
}

/// The chapter body area of a frame.
pub fn body_area(area: Rect) -> Rect {
    frame_areas(area)[1]
}

/// Render the chapter to the terminal frame.
///
/// Call [`settle_scroll`] first so the offset matches this frame size.
pub fn render(app: &App, frame: &mut Frame) {
    let [title, body, help] = frame_areas(frame.area());

    frame.render_widget(render_title(&app.page), title);
    frame.render_widget(render_help(app.page.focused()), help);

    let layout = layout_page(&app.page, usize::from(body.width));
    let height = usize::from(body.height);
    let offset = app.scroll.offset.min(max_offset(&layout, height));
    let paragraph = Paragraph::new(layout.lines).scroll((to_u16(offset), 0));
    frame.render_widget(paragraph, body);
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

/// Title bar: chapter name plus a widget counter.
fn render_title(page: &Page) -> Paragraph<'static> {
    let mut spans = vec![Span::styled(
        format!("{CHAPTER_LABEL} · {CHAPTER_TITLE}"),
        theme::STYLE_TITLE,
    )];
    if let Some(widget) = page.focused() {
        spans.push(Span::styled(
            format!("   widget {}/{} · {}", page.focus() + 1, page.widget_count(), widget.kind()),
            theme::STYLE_DIM,
        ));
    }
    Paragraph::new(Line::from(spans))
}

/// Help line showing the keybindings of the focused widget.
fn render_help(focused: Option<&Widget>) -> Paragraph<'static> {
    let specific = match focused {
        Some(Widget::Stats(_)) => "[a/b] class  [Enter] switch",
        Some(Widget::Detective(_)) => "[Enter] next step  [1-3] step controls",
        Some(Widget::Pixel(_)) => "[←/→] adjust  [S-←/→] ±10  [Tab] slider  [m] mode",
        Some(Widget::Prompt(_)) => "[c] copy",
        Some(_) => "[Enter] reveal",
        None => "",
    };
    Paragraph::new(Line::from(Span::styled(
        format!("[j/k] widget  [PgUp/PgDn] scroll  {specific}  [q] quit"),
        theme::STYLE_HELP,
    )))
}

// ============================================================================
// PAGE LAYOUT
// ============================================================================

/// The chapter flattened to lines, with the row span of every widget.
pub struct PageLayout {
    pub lines: Vec<Line<'static>>,
    /// `(first, last)` row of each widget, in page order.
    pub widget_rows: Vec<(usize, usize)>,
}

/// Lay out every section at `width` columns.
pub fn layout_page(page: &Page, width: usize) -> PageLayout {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {CHAPTER_LABEL}"), theme::STYLE_DIM)),
        Line::from(Span::styled(format!("  {CHAPTER_TITLE}"), theme::STYLE_TITLE)),
    ];
    let mut widget_rows = Vec::with_capacity(page.widget_count());

    for section in &page.sections {
        lines.extend(blocks::section_lines(section.title));
        for block in &section.blocks {
            match block {
                Block::Widget(widget) => {
                    let focused = widget_rows.len() == page.focus();
                    let widget_lines = blocks::widget_lines(widget, width, focused);
                    let first = lines.len();
                    // Trailing blank line is spacing, not part of the widget
                    let last = first + widget_lines.len().saturating_sub(2);
                    widget_rows.push((first, last));
                    lines.extend(widget_lines);
                }
                other => lines.extend(blocks::block_lines(other, width)),
            }
        }
    }

    lines.push(Line::from(Span::styled(format!("  {CHAPTER_END}"), theme::STYLE_IMPORTANT)));
    lines.push(Line::from(""));

    PageLayout { lines, widget_rows }
}

/// Last offset that still fills the body.
pub fn max_offset(layout: &PageLayout, height: usize) -> usize {
    layout.lines.len().saturating_sub(height)
}

/// Smallest move of `offset` that puts the focused widget on screen.
///
/// A widget taller than the body is aligned to its header.
pub fn reveal_focus(layout: &PageLayout, focus: usize, height: usize, offset: usize) -> usize {
    let Some(&(first, last)) = layout.widget_rows.get(focus) else {
        return offset;
    };
    if first < offset {
        first
    } else if last >= offset + height {
        (last + 1 - height).min(first)
    } else {
        offset
    }
}

/// Fit the app's scroll to a body of size `body`.
///
/// Applies a pending focus follow, clamps the offset to the layout and
/// records the body height as the page size for later page scrolls.
pub fn settle_scroll(app: &mut App, body: Rect) {
    let height = usize::from(body.height);
    let layout = layout_page(&app.page, usize::from(body.width));
    let mut offset = app.scroll.offset;
    if app.scroll.follow_focus {
        offset = reveal_focus(&layout, app.page.focus(), height, offset);
    }
    app.scroll = Scroll {
        offset: offset.min(max_offset(&layout, height)),
        height,
        follow_focus: false,
    };
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Section;
    use crate::tui::state::Action;
    use crate::tui::update::{update, update_app};
    use crate::widgets::pixel::PixelSimulator;
    use crate::widgets::reveal::ToggleReveal;
    use crate::widgets::stepped::SteppedNarrative;
    use crate::widgets::CopyAffordance;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn make_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(width, height)).unwrap()
    }

    fn chapter_app() -> App {
        App::with_page(Page::mount_with_rng(&mut StdRng::seed_from_u64(42)))
    }

    fn page_of(widgets: Vec<Widget>) -> Page {
        Page::from_sections(vec![Section::new(
            "test",
            widgets.into_iter().map(Block::Widget).collect(),
        )])
    }

    /// Settle the scroll and draw, as the event loop does.
    fn screen_text(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = make_terminal(width, height);
        terminal
            .draw(|frame| {
                settle_scroll(app, body_area(frame.area()));
                render(app, frame);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    #[test]
    fn chapter_renders_without_panic() {
        let mut app = chapter_app();
        screen_text(&mut app, 60, 20);
    }

    #[test]
    fn tiny_terminal_renders_without_panic() {
        let mut app = chapter_app();
        screen_text(&mut app, 10, 3);
        update_app(&mut app, &Action::ScrollPages(3));
        screen_text(&mut app, 10, 3);
    }

    #[test]
    fn title_bar_shows_chapter_and_counter() {
        let mut app = chapter_app();
        let text = screen_text(&mut app, 100, 30);
        assert!(text.contains("Chapter 1 · The World of Data"));
        let counter = format!("widget 1/{}", app.page.widget_count());
        assert!(text.contains(&counter), "missing {counter}");
    }

    #[test]
    fn reader_opens_at_the_top_of_the_chapter() {
        let mut app = chapter_app();
        let text = screen_text(&mut app, 80, 24);
        assert_eq!(app.scroll.offset, 0);
        assert!(text.contains("AI is not a magic crystal ball."));
    }

    #[test]
    fn every_focused_widget_is_scrolled_into_view() {
        let mut app = chapter_app();
        update_app(&mut app, &Action::FocusFirst);
        for slot in 0..app.page.widget_count() {
            let title = app.page.focused().map(|w| w.title().to_string()).unwrap();
            let text = screen_text(&mut app, 100, 40);
            assert!(text.contains(&title), "widget {slot} ({title}) not visible");
            update_app(&mut app, &Action::FocusNext);
        }
    }

    #[test]
    fn every_chapter_line_is_reachable_by_paging() {
        let mut app = chapter_app();
        let body = Rect::new(0, 1, 80, 22);
        let total = layout_page(&app.page, 80).lines.len();
        let mut seen = vec![false; total];

        for _ in 0..total {
            settle_scroll(&mut app, body);
            let offset = app.scroll.offset;
            for row in seen.iter_mut().skip(offset).take(22) {
                *row = true;
            }
            if offset == total.saturating_sub(22) {
                break;
            }
            update_app(&mut app, &Action::ScrollPages(1));
        }

        let unseen: Vec<usize> = (0..total).filter(|&row| !seen[row]).collect();
        assert!(unseen.is_empty(), "{} of {total} rows never shown: {unseen:?}", unseen.len());
    }

    #[test]
    fn paging_up_returns_to_the_chapter_title() {
        let mut app = chapter_app();
        let body = Rect::new(0, 1, 80, 22);
        settle_scroll(&mut app, body);
        update_app(&mut app, &Action::ScrollPages(4));
        settle_scroll(&mut app, body);
        assert!(app.scroll.offset > 0);
        update_app(&mut app, &Action::ScrollPages(-100));
        settle_scroll(&mut app, body);
        assert_eq!(app.scroll.offset, 0);
    }

    #[test]
    fn focus_change_after_manual_scroll_brings_widget_back() {
        let mut app = chapter_app();
        let body = Rect::new(0, 1, 80, 22);
        settle_scroll(&mut app, body);
        update_app(&mut app, &Action::ScrollPages(10));
        settle_scroll(&mut app, body);
        update_app(&mut app, &Action::FocusFirst);
        settle_scroll(&mut app, body);

        let layout = layout_page(&app.page, 80);
        let (first, _) = layout.widget_rows[0];
        assert!(app.scroll.offset <= first);
        assert!(first < app.scroll.offset + 22);
    }

    #[test]
    fn settle_clamps_offset_past_the_end() {
        let mut app = App::with_page(page_of(vec![Widget::Noise(ToggleReveal::new())]));
        update_app(&mut app, &Action::ScrollLines(1000));
        let body = Rect::new(0, 1, 80, 10);
        settle_scroll(&mut app, body);
        let layout = layout_page(&app.page, 80);
        assert_eq!(app.scroll.offset, max_offset(&layout, 10));
        assert_eq!(app.scroll.height, 10);
    }

    #[test]
    fn noise_widget_reflects_toggle() {
        let mut app = App::with_page(page_of(vec![Widget::Noise(ToggleReveal::new())]));
        assert!(screen_text(&mut app, 80, 30).contains("Add noise"));
        update(&mut app.page, &Action::Activate);
        let text = screen_text(&mut app, 80, 30);
        assert!(text.contains("Filter the noise"));
        assert!(text.contains("can't tell"));
    }

    #[test]
    fn pixel_widget_shows_what_the_model_sees() {
        let mut app = App::with_page(page_of(vec![Widget::Pixel(PixelSimulator::new())]));
        update(&mut app.page, &Action::SwitchMode);
        assert!(screen_text(&mut app, 80, 30).contains("[239, 68, 68]"));
        update(&mut app.page, &Action::Adjust(100));
        assert!(screen_text(&mut app, 80, 30).contains("[255, 68, 68]"));
    }

    #[test]
    fn detective_table_shows_null_cell() {
        let mut app = App::with_page(page_of(vec![Widget::Detective(SteppedNarrative::detective())]));
        assert!(screen_text(&mut app, 80, 30).contains("EMPTY (NULL)"));
    }

    #[test]
    fn copied_prompt_shows_feedback() {
        use crate::widgets::copy::Clipboard;
        use std::time::Instant;

        struct Sink;
        impl Clipboard for Sink {
            fn write_text(&mut self, _text: &str) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut app = App::with_page(page_of(vec![Widget::Prompt(CopyAffordance::new("hello"))]));
        assert!(screen_text(&mut app, 80, 20).contains("[c] Copy"));
        if let Some(Widget::Prompt(p)) = app.page.widget_mut(0) {
            p.copy(&mut Sink, Instant::now());
        }
        assert!(screen_text(&mut app, 80, 20).contains("Copied!"));
    }

    #[test]
    fn help_line_follows_focused_widget() {
        let mut app = App::with_page(page_of(vec![
            Widget::Noise(ToggleReveal::new()),
            Widget::Prompt(CopyAffordance::new("x")),
        ]));
        assert!(screen_text(&mut app, 120, 30).contains("[Enter] reveal"));
        update_app(&mut app, &Action::FocusNext);
        assert!(screen_text(&mut app, 120, 30).contains("[c] copy"));
    }

    // -- Focus follow --

    fn layout_with(rows: Vec<(usize, usize)>, total: usize) -> PageLayout {
        PageLayout {
            lines: vec![Line::from(""); total],
            widget_rows: rows,
        }
    }

    #[test]
    fn visible_widget_leaves_offset_alone() {
        let layout = layout_with(vec![(10, 20), (40, 50)], 100);
        assert_eq!(reveal_focus(&layout, 0, 30, 5), 5);
    }

    #[test]
    fn widget_below_is_aligned_to_the_bottom() {
        let layout = layout_with(vec![(10, 20), (40, 50)], 100);
        assert_eq!(reveal_focus(&layout, 1, 20, 0), 31);
    }

    #[test]
    fn widget_above_is_aligned_to_its_header() {
        let layout = layout_with(vec![(10, 20), (40, 50)], 100);
        assert_eq!(reveal_focus(&layout, 0, 20, 30), 10);
    }

    #[test]
    fn tall_widget_keeps_header_visible() {
        let layout = layout_with(vec![(10, 20), (40, 90)], 100);
        assert_eq!(reveal_focus(&layout, 1, 10, 0), 40);
    }

    #[test]
    fn missing_widget_leaves_offset_alone() {
        let layout = layout_with(Vec::new(), 100);
        assert_eq!(reveal_focus(&layout, 3, 10, 7), 7);
    }

    #[test]
    fn layout_records_one_span_per_widget() {
        let app = chapter_app();
        let layout = layout_page(&app.page, 80);
        assert_eq!(layout.widget_rows.len(), app.page.widget_count());
        assert!(layout.widget_rows.windows(2).all(|w| w[0].1 < w[1].0));
    }
}
