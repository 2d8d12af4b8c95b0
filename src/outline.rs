//! Non-interactive views of the chapter: outline and prompt list.
//!
//! Pure functions — (Page, OutputFormat) → String.
//! No I/O, no side effects.

use serde::Serialize;

use crate::content::{Prompt, CHAPTER_LABEL, CHAPTER_TITLE};
use crate::error::ChapterError;
use crate::page::Page;
use crate::types::OutputFormat;

#[derive(Debug, Serialize)]
struct OutlineDoc<'a> {
    chapter: &'static str,
    title: &'static str,
    sections: Vec<OutlineSection<'a>>,
}

#[derive(Debug, Serialize)]
struct OutlineSection<'a> {
    title: &'static str,
    widgets: Vec<OutlineWidget<'a>>,
}

#[derive(Debug, Serialize)]
struct OutlineWidget<'a> {
    kind: &'static str,
    title: &'a str,
}

#[derive(Debug, Serialize)]
struct PromptEntry<'a> {
    index: usize,
    title: &'a str,
    text: &'a str,
}

fn outline_doc(page: &Page) -> OutlineDoc<'_> {
    OutlineDoc {
        chapter: CHAPTER_LABEL,
        title: CHAPTER_TITLE,
        sections: page
            .sections
            .iter()
            .map(|s| OutlineSection {
                title: s.title,
                widgets: s
                    .widgets()
                    .map(|w| OutlineWidget {
                        kind: w.kind(),
                        title: w.title(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Section headings with the widgets each contains.
pub fn format_outline(page: &Page, format: OutputFormat) -> Result<String, ChapterError> {
    let doc = outline_doc(page);
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&doc)? + "\n"),
        OutputFormat::Human => {
            let mut out = format!("=== {}: {} ===\n", doc.chapter, doc.title);
            for section in &doc.sections {
                out.push_str(&format!("\n{}\n", section.title));
                for widget in &section.widgets {
                    out.push_str(&format!("  └─ [{}] {}\n", widget.kind, widget.title));
                }
            }
            Ok(out)
        }
    }
}

/// The copyable prompts, numbered from 1.
pub fn format_prompts(prompts: &[Prompt], format: OutputFormat) -> Result<String, ChapterError> {
    let entries: Vec<PromptEntry> = prompts
        .iter()
        .enumerate()
        .map(|(i, p)| PromptEntry {
            index: i + 1,
            title: p.title,
            text: p.text,
        })
        .collect();

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&entries)? + "\n"),
        OutputFormat::Human => {
            let mut out = String::new();
            for entry in &entries {
                out.push_str(&format!("[{}] {}\n", entry.index, entry.title));
                out.push_str(&format!("    ❯ {}\n\n", entry.text));
            }
            Ok(out)
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PROMPTS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn page() -> Page {
        Page::mount_with_rng(&mut StdRng::seed_from_u64(5))
    }

    #[test]
    fn human_outline_lists_sections_and_widgets() {
        let text = format_outline(&page(), OutputFormat::Human).unwrap();
        assert!(text.starts_with("=== Chapter 1: The World of Data ==="));
        assert!(text.contains("3. Data hunting and ethics"));
        assert!(text.contains("[detective]"));
        assert!(text.contains("[pixel] How does a computer see colour?"));
    }

    #[test]
    fn json_outline_is_valid_and_complete() {
        let text = format_outline(&page(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["title"], "The World of Data");

        let sections = value["sections"].as_array().unwrap();
        assert_eq!(sections.len(), page().sections.len());

        let widget_total: usize = sections
            .iter()
            .map(|s| s["widgets"].as_array().unwrap().len())
            .sum();
        assert_eq!(widget_total, page().widget_count());
    }

    #[test]
    fn prompts_are_numbered_from_one() {
        let text = format_prompts(&PROMPTS, OutputFormat::Human).unwrap();
        assert!(text.starts_with("[1] Vibe Coding"));
        assert!(text.contains("[4] Vibe Coding: Splitting the data"));
    }

    #[test]
    fn json_prompts_carry_full_text() {
        let text = format_prompts(&PROMPTS, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0]["index"], 1);
        assert_eq!(entries[3]["text"], PROMPTS[3].text);
    }

    #[test]
    fn empty_prompt_list_formats_to_nothing() {
        assert_eq!(format_prompts(&[], OutputFormat::Human).unwrap(), "");
        assert_eq!(format_prompts(&[], OutputFormat::Json).unwrap(), "[]\n");
    }
}
