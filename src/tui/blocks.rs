//! Pure line builders: one block or widget in, styled lines out.
//!
//! Everything here returns owned `Line<'static>` values so the page can
//! be laid out once per frame and scrolled as a single paragraph. Text
//! is wrapped here rather than by ratatui so line counts (and therefore
//! scroll offsets) are known before drawing.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::page::{Block, Split, Table};
use crate::types::Rgb;
use crate::widgets::copy::CopyAffordance;
use crate::widgets::instances::{
    format_samples, ClassGroup, CloseUpData, Diagnosis, ImbalanceView, LookCloser, MatrixView,
    NoiseLevel, WaveView, CAT_ART, MRI_HOT_SPOT, SIGNAL_POINTS, SMILEY,
};
use crate::widgets::pixel::{Channel, PixelMode, PixelSimulator};
use crate::widgets::reveal::{ToggleReveal, Variant};
use crate::widgets::stepped::{detective_rows, Cell, CellMark, SteppedNarrative, DETECTIVE_SCRIPT};
use crate::widgets::Widget;

use super::theme;

/// Narrowest wrap width; below this text is allowed to overflow.
const MIN_WRAP: usize = 16;

/// Columns taken by the widget gutter (`"│ "`).
const GUTTER_WIDTH: usize = 2;

// ============================================================================
// TEXT HELPERS
// ============================================================================

/// Greedy word wrap on character counts.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(MIN_WRAP);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn wrapped(text: &str, width: usize, style: Style, indent: &str) -> Vec<Line<'static>> {
    wrap(text, width.saturating_sub(indent.chars().count()))
        .into_iter()
        .map(|l| Line::from(vec![Span::raw(indent.to_string()), Span::styled(l, style)]))
        .collect()
}

/// A text slider: `████████░░░░░░░░`.
pub fn slider_bar(value: u8, width: usize) -> String {
    let filled = usize::from(value) * width / 255;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

fn key_hint(key: &str, label: &str) -> Vec<Span<'static>> {
    vec![
        Span::styled(format!("[{key}] "), theme::STYLE_INTERACTIVE),
        Span::raw(label.to_string()),
    ]
}

// ============================================================================
// STATIC BLOCKS
// ============================================================================

/// Lines for a section title.
pub fn section_lines(title: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {title}"), theme::STYLE_TITLE)),
        Line::from(Span::styled(
            format!("  {}", "═".repeat(title.chars().count())),
            theme::STYLE_DIM,
        )),
        Line::from(""),
    ]
}

/// Lines for a non-widget block.
///
/// Widgets go through [`widget_lines`]; passing one here yields nothing.
pub fn block_lines(block: &Block, width: usize) -> Vec<Line<'static>> {
    match block {
        Block::Heading(text) => vec![
            Line::from(Span::styled(format!("  {text}"), theme::STYLE_IMPORTANT)),
            Line::from(""),
        ],
        Block::Prose(text) => {
            let mut lines = wrapped(text, width, Style::new(), "  ");
            lines.push(Line::from(""));
            lines
        }
        Block::Callout { tag, text } => {
            let mut lines = vec![Line::from(vec![
                Span::styled("  ▌ ", theme::STYLE_WARNING),
                Span::styled(tag.to_string(), theme::STYLE_WARNING.add_modifier(Modifier::BOLD)),
            ])];
            for l in wrap(text, width.saturating_sub(4)) {
                lines.push(Line::from(vec![
                    Span::styled("  ▌ ", theme::STYLE_WARNING),
                    Span::raw(l),
                ]));
            }
            lines.push(Line::from(""));
            lines
        }
        Block::Bullets(items) => {
            let mut lines: Vec<Line<'static>> = items
                .iter()
                .map(|item| {
                    Line::from(vec![
                        Span::styled("    • ", theme::STYLE_INTERACTIVE),
                        Span::raw(item.to_string()),
                    ])
                })
                .collect();
            lines.push(Line::from(""));
            lines
        }
        Block::Table(table) => table_lines(table),
        Block::Code(code) => {
            let mut lines: Vec<Line<'static>> = code
                .iter()
                .map(|l| Line::from(Span::styled(format!("    {l}"), theme::STYLE_SAFE)))
                .collect();
            lines.push(Line::from(""));
            lines
        }
        Block::SplitChart(splits) => split_lines(splits, width),
        Block::Widget(_) => Vec::new(),
    }
}

fn table_lines(table: &Table) -> Vec<Line<'static>> {
    let columns = table.header.len();
    let mut widths: Vec<usize> = table.header.iter().map(|h| h.chars().count()).collect();
    for row in table.rows {
        for (i, cell) in row.iter().enumerate().take(columns) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let render_row = |cells: &[&str]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{c:<w$}"))
            .collect();
        format!("    {}", padded.join("  "))
    };

    let total: usize = widths.iter().sum::<usize>() + 2 * columns.saturating_sub(1);
    let mut lines = vec![
        Line::from(Span::styled(render_row(table.header), theme::STYLE_DIM.add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(format!("    {}", "─".repeat(total)), theme::STYLE_DIM)),
    ];
    for row in table.rows {
        lines.push(Line::from(render_row(*row)));
    }
    lines.push(Line::from(""));
    lines
}

const SPLIT_COLORS: [Color; 3] = [Color::Blue, Color::Cyan, Color::Green];

fn split_lines(splits: &[Split], width: usize) -> Vec<Line<'static>> {
    let name_width = splits.iter().map(|s| s.name.chars().count()).max().unwrap_or(0);
    let bar_room = width.saturating_sub(name_width + 12).max(10);
    let mut lines: Vec<Line<'static>> = splits
        .iter()
        .enumerate()
        .map(|(i, split)| {
            let bar = "█".repeat(usize::from(split.percent) * bar_room / 100);
            Line::from(vec![
                Span::raw(format!("    {:<name_width$}  ", split.name)),
                Span::styled(bar, Style::new().fg(SPLIT_COLORS[i % SPLIT_COLORS.len()])),
                Span::styled(format!(" {}%", split.percent), theme::STYLE_IMPORTANT),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines
}

// ============================================================================
// WIDGETS
// ============================================================================

/// Lines for a widget: a header, its body behind a gutter, a closing rule.
///
/// The focused widget gets a highlighted header and gutter.
pub fn widget_lines(widget: &Widget, width: usize, focused: bool) -> Vec<Line<'static>> {
    let inner = width.saturating_sub(GUTTER_WIDTH + 2);
    let body = match widget {
        Widget::Noise(w) => noise_body(w),
        Widget::Matrix(w) => matrix_body(w),
        Widget::Signal(w) => signal_body(w),
        Widget::Stats(w) => stats_body(w, inner),
        Widget::Imbalance(w) => imbalance_body(w),
        Widget::LookCloser(w) => look_closer_body(w),
        Widget::Detective(w) => detective_body(w, inner),
        Widget::Pixel(w) => pixel_body(w, inner),
        Widget::Prompt(w) => prompt_body(w, inner),
    };
    framed(widget, body, focused)
}

fn framed(widget: &Widget, body: Vec<Line<'static>>, focused: bool) -> Vec<Line<'static>> {
    let (gutter_style, marker) = if focused {
        (theme::STYLE_GUTTER_FOCUSED, "▶")
    } else {
        (theme::STYLE_GUTTER, "┌")
    };
    let accent = match widget {
        Widget::Prompt(_) => theme::STYLE_PROMPT,
        _ => theme::STYLE_IMPORTANT,
    };
    let header_style = if focused { accent.patch(theme::STYLE_CURSOR) } else { accent };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("  {marker} "), gutter_style),
        Span::styled(widget.title().to_string(), header_style),
    ])];
    for line in body {
        let mut spans = vec![Span::styled("  │ ", gutter_style)];
        spans.extend(line.spans);
        lines.push(Line::from(spans).style(line.style));
    }
    lines.push(Line::from(Span::styled("  └─", gutter_style)));
    lines.push(Line::from(""));
    lines
}

fn noise_body(w: &ToggleReveal<NoiseLevel>) -> Vec<Line<'static>> {
    let level = w.current();
    let filter = level.filter();

    let mut art_style = if filter.grayscale {
        theme::STYLE_DIM
    } else {
        Style::new().fg(Color::LightYellow)
    };
    if filter.high_contrast {
        art_style = art_style.add_modifier(Modifier::BOLD);
    }

    let mut lines: Vec<Line<'static>> = CAT_ART
        .iter()
        .enumerate()
        .map(|(row, art)| {
            let text: String = if filter.blur {
                art.chars()
                    .enumerate()
                    .map(|(col, c)| match (row * 7 + col * 3) % 5 {
                        0 => '░',
                        1 if c == ' ' => '▒',
                        _ => c,
                    })
                    .collect()
            } else {
                (*art).to_string()
            };
            Line::from(Span::styled(format!(" {text}"), art_style))
        })
        .collect();

    let caption_style = match level {
        NoiseLevel::Clean => theme::STYLE_SAFE,
        NoiseLevel::Noisy => theme::STYLE_DANGER,
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        level.caption(),
        caption_style.add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(key_hint("Enter", level.button_label())));
    lines
}

fn matrix_body(w: &ToggleReveal<MatrixView>) -> Vec<Line<'static>> {
    let view = w.current();
    let mut lines: Vec<Line<'static>> = SMILEY
        .iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .iter()
                .map(|&v| {
                    let shade = Color::Rgb(v, v, v);
                    if view.shows_numbers() {
                        let text = if Rgb::gray(v).is_light() { Color::Black } else { Color::White };
                        Span::styled(format!("{v:>4}"), Style::new().fg(text).bg(shade))
                    } else {
                        Span::styled("████", Style::new().fg(shade))
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    lines.push(Line::from(""));
    let label = if view.shows_numbers() { "Show the picture" } else { "Show the matrix" };
    lines.push(Line::from(key_hint("Enter", label)));
    lines
}

/// Plot rows for the signal, top (+1) to bottom (-1).
const SIGNAL_ROWS: usize = 9;

fn signal_row(value: f64) -> usize {
    let mid = (SIGNAL_ROWS / 2) as f64;
    // Bounded by the ±1 amplitude, so the cast cannot wrap
    ((1.0 - value) * mid).round().clamp(0.0, (SIGNAL_ROWS - 1) as f64) as usize
}

fn signal_body(w: &ToggleReveal<WaveView>) -> Vec<Line<'static>> {
    let sampled = w.current().shows_samples();
    let mid = SIGNAL_ROWS / 2;
    let point_style = if sampled {
        theme::STYLE_SAFE.add_modifier(Modifier::BOLD)
    } else {
        theme::STYLE_BLUR
    };

    let mut lines = Vec::with_capacity(SIGNAL_ROWS + 3);
    for r in 0..SIGNAL_ROWS {
        let spans: Vec<Span<'static>> = SIGNAL_POINTS
            .iter()
            .map(|&value| {
                let p = signal_row(value);
                let on_stem = (p < mid && r > p && r <= mid) || (p > mid && r < p && r >= mid);
                if r == p {
                    Span::styled(" ● ", point_style)
                } else if sampled && on_stem {
                    Span::styled(" │ ", theme::STYLE_SAFE)
                } else if r == mid {
                    Span::styled("───", theme::STYLE_DIM)
                } else {
                    Span::raw("   ")
                }
            })
            .collect();
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    if sampled {
        lines.push(Line::from(Span::styled(format_samples(&SIGNAL_POINTS), theme::STYLE_SAFE)));
    } else {
        lines.push(Line::from(Span::styled("(samples hidden)", theme::STYLE_DIM)));
    }
    let label = if sampled { "Show the wave" } else { "Show the array" };
    lines.push(Line::from(key_hint("Enter", label)));
    lines
}

/// Columns on the 0-100 number line (one per 2 points).
const NUMBER_LINE: usize = 51;

fn stats_body(w: &ToggleReveal<ClassGroup>, width: usize) -> Vec<Line<'static>> {
    let group = w.current();

    let mut selector = Vec::new();
    for (key, option) in [("a", ClassGroup::A), ("b", ClassGroup::B)] {
        let style = if option == group { theme::STYLE_SELECTED } else { theme::STYLE_DIM };
        selector.push(Span::styled(format!("[{key}]"), theme::STYLE_INTERACTIVE));
        selector.push(Span::styled(format!(" {} ", option.label()), style));
        selector.push(Span::raw("  "));
    }

    let dot_style = match group {
        ClassGroup::A => theme::STYLE_INTERACTIVE,
        ClassGroup::B => theme::STYLE_DANGER,
    };

    // Stack repeated scores one row up
    let mut lower = vec![' '; NUMBER_LINE];
    let mut upper = vec![' '; NUMBER_LINE];
    for &score in group.scores() {
        let col = (usize::from(score) / 2).min(NUMBER_LINE - 1);
        if lower[col] == '●' {
            upper[col] = '●';
        } else {
            lower[col] = '●';
        }
    }

    let mean = group.mean();
    // Mean is an average of 0-100 scores
    let mean_col = ((mean / 2.0).round() as usize).min(NUMBER_LINE - 1);
    let mut axis: Vec<char> = vec!['─'; NUMBER_LINE];
    axis[0] = '├';
    axis[NUMBER_LINE - 1] = '┤';
    axis[mean_col] = '┼';

    let mean_label = format!("mean: {mean}");
    let label_start = mean_col.saturating_sub(mean_label.len() / 2);
    let mut labels = format!("0{}", " ".repeat(label_start.saturating_sub(1)));
    labels.push_str(&mean_label);
    let used = labels.chars().count();
    labels.push_str(&" ".repeat(NUMBER_LINE.saturating_sub(used + 3)));
    labels.push_str("100");

    let mut lines = vec![
        Line::from(selector),
        Line::from(""),
        Line::from(Span::styled(upper.into_iter().collect::<String>(), dot_style)),
        Line::from(Span::styled(lower.into_iter().collect::<String>(), dot_style)),
        Line::from(Span::styled(axis.into_iter().collect::<String>(), theme::STYLE_DIM)),
        Line::from(Span::styled(labels, theme::STYLE_DIM)),
        Line::from(""),
        Line::from(vec![
            Span::raw("What does the standard deviation say? "),
            Span::styled(group.spread(), dot_style.add_modifier(Modifier::BOLD)),
        ]),
    ];
    lines.extend(wrapped(group.explanation(), width, Style::new(), ""));
    lines
}

/// Patients per row of the dot grid.
const PATIENTS_PER_ROW: usize = 20;

fn imbalance_body(w: &ToggleReveal<ImbalanceView>) -> Vec<Line<'static>> {
    let view = w.current();
    let diagnoses = view.diagnoses();

    let mut lines: Vec<Line<'static>> = diagnoses
        .chunks(PATIENTS_PER_ROW)
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .iter()
                .map(|d| match d {
                    Diagnosis::Healthy => Span::styled("● ", theme::STYLE_SAFE),
                    Diagnosis::Sick => Span::styled("● ", theme::STYLE_DANGER),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    lines.push(Line::from(vec![
        Span::styled("● ", theme::STYLE_SAFE),
        Span::raw("healthy   "),
        Span::styled("● ", theme::STYLE_DANGER),
        Span::raw("sick"),
    ]));
    lines.push(Line::from(""));

    if view == ImbalanceView::ModelGuess {
        lines.push(Line::from(Span::styled(
            format!("{}% accuracy!", view.accuracy_percent()),
            theme::STYLE_SAFE.add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("But it missed all {} patients!", view.missed_patients()),
            theme::STYLE_DANGER.add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(key_hint("Enter", view.button_label())));
    lines
}

/// Shade character for a 0-255 brightness.
fn shade(value: u8) -> &'static str {
    match value {
        0..=63 => "░░",
        64..=127 => "▒▒",
        128..=199 => "▓▓",
        _ => "██",
    }
}

const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

fn look_closer_body(w: &LookCloser) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    match (&w.data, w.shows_values()) {
        (CloseUpData::Pixels(pixels), false) => {
            for row in pixels.chunks(4) {
                let spans: Vec<Span<'static>> = row
                    .iter()
                    .map(|&p| Span::styled("██████", Style::new().fg(to_color(p))))
                    .collect();
                lines.push(Line::from(spans));
            }
        }
        (CloseUpData::Pixels(pixels), true) => {
            for row in pixels.chunks(4) {
                let spans: Vec<Span<'static>> = row
                    .iter()
                    .map(|p| {
                        Span::styled(
                            format!("[{:>3}, {:>3}, {:>3}] ", p.r, p.g, p.b),
                            Style::new().fg(to_color(*p)),
                        )
                    })
                    .collect();
                lines.push(Line::from(spans));
            }
        }
        (CloseUpData::Samples(samples), false) => {
            let bars: String = samples
                .iter()
                .map(|s| {
                    // Samples are in [0, 1)
                    let level = ((s * LEVELS.len() as f64) as usize).min(LEVELS.len() - 1);
                    format!("{} ", LEVELS[level])
                })
                .collect();
            lines.push(Line::from(Span::styled(bars, theme::STYLE_INTERACTIVE)));
        }
        (CloseUpData::Samples(samples), true) => {
            for row in samples.chunks(10) {
                let text: Vec<String> = row.iter().map(|s| format!("{s:.2}")).collect();
                lines.push(Line::from(Span::styled(text.join("  "), theme::STYLE_INTERACTIVE)));
            }
        }
        (CloseUpData::Brightness(values), false) => {
            for row in values.chunks(5) {
                let text: String = row.iter().map(|&v| shade(v)).collect();
                lines.push(Line::from(Span::styled(text, Style::new().fg(Color::Gray))));
            }
        }
        (CloseUpData::Brightness(values), true) => {
            for (r, row) in values.chunks(5).enumerate() {
                let spans: Vec<Span<'static>> = row
                    .iter()
                    .enumerate()
                    .map(|(c, v)| {
                        let style = if MRI_HOT_SPOT.contains(&(r * 5 + c)) {
                            theme::STYLE_DANGER.add_modifier(Modifier::BOLD)
                        } else {
                            theme::STYLE_DIM
                        };
                        Span::styled(format!("{v:>4}"), style)
                    })
                    .collect();
                lines.push(Line::from(spans));
            }
        }
    }

    lines.push(Line::from(Span::styled(format!("({})", w.subject()), theme::STYLE_DIM)));
    let label = if w.shows_values() { "Back to the picture" } else { "Look closer" };
    lines.push(Line::from(key_hint("Enter", label)));
    lines
}

fn step_style(k: u8) -> Style {
    match k {
        1 => theme::STYLE_DANGER,
        2 => theme::STYLE_WARNING,
        _ => theme::STYLE_SAFE,
    }
}

fn cell_span(cell: &Cell, width: usize) -> Span<'static> {
    let style = match cell.mark {
        CellMark::Plain => Style::new(),
        CellMark::Outlier => theme::STYLE_DANGER.add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        CellMark::Missing => theme::STYLE_WARNING.add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        CellMark::Corrected => theme::STYLE_SAFE.add_modifier(Modifier::BOLD),
    };
    Span::styled(format!("{:<width$}", cell.display()), style)
}

fn detective_body(n: &SteppedNarrative, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (i, (label, note)) in DETECTIVE_SCRIPT.iter().enumerate() {
        // Script has three entries
        let k = (i + 1) as u8;
        let line = if n.is_reached(k) {
            Line::from(vec![
                Span::styled(format!("✓ {k}. {label}"), step_style(k).add_modifier(Modifier::BOLD)),
            ])
        } else if n.is_enabled(k) {
            Line::from(vec![
                Span::styled(format!("[{k}] "), theme::STYLE_INTERACTIVE),
                Span::raw(format!("{k}. {label}")),
            ])
        } else {
            Line::from(Span::styled(format!("[{k}] {k}. {label} (locked)"), theme::STYLE_DIM))
        };
        lines.push(line);

        if n.step() == k {
            lines.extend(wrapped(note, width, step_style(k), "   "));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("{:<10}{:<8}{}", "Student", "Age", "Grade"),
        theme::STYLE_DIM.add_modifier(Modifier::BOLD),
    )));
    for row in detective_rows(n) {
        lines.push(Line::from(vec![
            Span::raw(format!("{:<10}", row.name)),
            cell_span(&row.age, 8),
            cell_span(&row.grade, 14),
        ]));
    }

    if n.is_complete() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "✓ Data is ready for the model!",
            theme::STYLE_SAFE.add_modifier(Modifier::BOLD),
        )));
    }
    lines
}

fn channel_color(channel: Channel) -> Color {
    match channel {
        Channel::Gray => Color::Gray,
        Channel::Red => Color::Red,
        Channel::Green => Color::Green,
        Channel::Blue => Color::Blue,
    }
}

/// Width of a slider bar in cells.
const SLIDER_WIDTH: usize = 24;

fn pixel_body(sim: &PixelSimulator, width: usize) -> Vec<Line<'static>> {
    let mode = sim.mode();

    let mut selector = vec![Span::styled("[m] ", theme::STYLE_INTERACTIVE)];
    for option in [PixelMode::Gray, PixelMode::Rgb] {
        let style = if option == mode { theme::STYLE_SELECTED } else { theme::STYLE_DIM };
        selector.push(Span::styled(format!(" {} ", option.label()), style));
        selector.push(Span::raw(" "));
    }

    let mut lines = vec![Line::from(selector), Line::from("")];
    lines.extend(wrapped(mode.description(), width, theme::STYLE_DIM, ""));
    lines.push(Line::from(""));

    let active = sim.active_channel();
    for &channel in mode.channels() {
        let marker = if channel == active { "▶ " } else { "  " };
        let value = sim.value(channel);
        lines.push(Line::from(vec![
            Span::styled(marker, theme::STYLE_INTERACTIVE),
            Span::raw(format!("{:<10}", channel.label())),
            Span::styled(slider_bar(value, SLIDER_WIDTH), Style::new().fg(channel_color(channel))),
            Span::styled(format!(" {value:>3}"), theme::STYLE_IMPORTANT),
        ]));
    }
    lines.push(Line::from(""));

    let preview = sim.preview();
    for _ in 0..3 {
        lines.push(Line::from(Span::styled("████████████", Style::new().fg(to_color(preview)))));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("What the model sees: ", theme::STYLE_DIM),
        Span::styled(sim.matrix_label(), theme::STYLE_IMPORTANT),
        Span::styled(format!("   {preview}"), theme::STYLE_DIM),
    ]));
    lines
}

fn prompt_body(p: &CopyAffordance, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, l) in wrap(p.payload(), width.saturating_sub(2)).into_iter().enumerate() {
        let lead = if i == 0 { "❯ " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(lead, theme::STYLE_SAFE.add_modifier(Modifier::BOLD)),
            Span::styled(l, Style::new().fg(Color::Gray)),
        ]));
    }
    lines.push(Line::from(""));
    if p.is_copied() {
        lines.push(Line::from(Span::styled(
            format!("✓ {}", p.button_label()),
            theme::STYLE_SAFE.add_modifier(Modifier::BOLD),
        )));
    } else {
        lines.push(Line::from(key_hint("c", p.button_label())));
    }
    lines
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap("the quick brown fox jumps over the lazy dog", 16);
        assert_eq!(lines, vec!["the quick brown", "fox jumps over", "the lazy dog"]);
        assert!(lines.iter().all(|l| l.chars().count() <= 16));
    }

    #[test]
    fn wrap_keeps_long_words_whole() {
        let lines = wrap("supercalifragilisticexpialidocious ok", 16);
        assert_eq!(lines[0], "supercalifragilisticexpialidocious");
        assert_eq!(lines[1], "ok");
    }

    #[test]
    fn wrap_of_empty_text_is_empty() {
        assert!(wrap("", 40).is_empty());
        assert!(wrap("   ", 40).is_empty());
    }

    #[test]
    fn slider_bar_fills_proportionally() {
        assert_eq!(slider_bar(0, 4), "░░░░");
        assert_eq!(slider_bar(255, 4), "████");
        assert_eq!(slider_bar(128, 4).chars().filter(|c| *c == '█').count(), 2);
    }

    #[test]
    fn signal_rows_span_the_plot() {
        assert_eq!(signal_row(1.0), 0);
        assert_eq!(signal_row(0.0), 4);
        assert_eq!(signal_row(-1.0), 8);
    }

    #[test]
    fn noise_body_switches_caption() {
        let mut w: ToggleReveal<NoiseLevel> = ToggleReveal::new();
        assert!(text_of(&noise_body(&w)).contains("That's a cat!"));
        w.toggle();
        let text = text_of(&noise_body(&w));
        assert!(text.contains("can't tell"));
        assert!(text.contains("Filter the noise"));
    }

    #[test]
    fn matrix_numbers_only_when_revealed() {
        let mut w: ToggleReveal<MatrixView> = ToggleReveal::new();
        assert!(!text_of(&matrix_body(&w)).contains("250"));
        w.toggle();
        let text = text_of(&matrix_body(&w));
        assert!(text.contains(" 250"));
        assert!(text.contains("  40"));
    }

    #[test]
    fn signal_array_only_when_sampled() {
        let mut w: ToggleReveal<WaveView> = ToggleReveal::new();
        assert!(!text_of(&signal_body(&w)).contains("[0, 0.5"));
        w.toggle();
        assert!(text_of(&signal_body(&w)).contains("[0, 0.5, 0.86, 1"));
    }

    #[test]
    fn stats_body_shows_mean_and_spread() {
        let mut w: ToggleReveal<ClassGroup> = ToggleReveal::new();
        let text = text_of(&stats_body(&w, 60));
        assert!(text.contains("mean: 50"));
        assert!(text.contains("LOW"));
        w.select(ClassGroup::B);
        assert!(text_of(&stats_body(&w, 60)).contains("HIGH"));
    }

    #[test]
    fn imbalance_guess_reports_accuracy_and_misses() {
        let mut w: ToggleReveal<ImbalanceView> = ToggleReveal::new();
        assert!(!text_of(&imbalance_body(&w)).contains("accuracy"));
        w.toggle();
        let text = text_of(&imbalance_body(&w));
        assert!(text.contains("95% accuracy!"));
        assert!(text.contains("missed all 5 patients"));
    }

    #[test]
    fn detective_body_locks_unreached_steps() {
        let mut n = SteppedNarrative::detective();
        let text = text_of(&detective_body(&n, 60));
        assert!(text.contains("2. Find the missing data (locked)"));
        assert!(text.contains("999"));
        assert!(text.contains("EMPTY (NULL)"));

        n.advance();
        n.advance();
        n.advance();
        let text = text_of(&detective_body(&n, 60));
        assert!(!text.contains("locked"));
        assert!(text.contains("Data is ready for the model!"));
        assert!(text.contains("87"));
    }

    #[test]
    fn pixel_body_shows_matrix_label() {
        let mut sim = PixelSimulator::new();
        assert!(text_of(&pixel_body(&sim, 60)).contains("[128]"));
        sim.set_mode(PixelMode::Rgb);
        let text = text_of(&pixel_body(&sim, 60));
        assert!(text.contains("[239, 68, 68]"));
        assert!(text.contains("rgb(239,68,68)"));
        assert!(text.contains("B (blue)"));
    }

    #[test]
    fn prompt_body_shows_payload_and_button() {
        let p = CopyAffordance::new("draw a bounding box");
        let text = text_of(&prompt_body(&p, 60));
        assert!(text.contains("❯ draw a bounding box"));
        assert!(text.contains("[c] Copy"));
    }

    #[test]
    fn table_columns_are_aligned() {
        let table = Table {
            header: &["Name", "Age"],
            rows: &[&["Zeynep", "16"]],
        };
        let text = text_of(&table_lines(&table));
        assert!(text.contains("Name    Age"));
        assert!(text.contains("Zeynep  16"));
    }

    #[test]
    fn focused_widget_header_is_marked() {
        let w = Widget::Noise(ToggleReveal::new());
        assert!(text_of(&widget_lines(&w, 80, true)).starts_with("  ▶ How noise ruins data"));
        assert!(text_of(&widget_lines(&w, 80, false)).starts_with("  ┌ How noise ruins data"));
    }
}
