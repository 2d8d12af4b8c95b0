//! The mounted chapter: sections of static blocks with live widgets
//! embedded, plus a focus cursor over the widgets.
//!
//! Mounting always builds fresh widget state; nothing carries over from
//! a previous mount.

use rand::Rng;

use crate::content;
use crate::widgets::Widget;

// ============================================================================
// STATIC BLOCKS
// ============================================================================

/// A small table of prose data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: &'static [&'static str],
    pub rows: &'static [&'static [&'static str]],
}

/// One slice of the dataset split chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    pub name: &'static str,
    pub percent: u8,
}

/// A piece of a section, in reading order.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading(&'static str),
    Prose(&'static str),
    /// Highlighted aside: a short tag and its text.
    Callout {
        tag: &'static str,
        text: &'static str,
    },
    Bullets(&'static [&'static str]),
    Table(Table),
    Code(&'static [&'static str]),
    SplitChart(&'static [Split]),
    Widget(Widget),
}

/// A titled chapter section.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: &'static str,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn new(title: &'static str, blocks: Vec<Block>) -> Self {
        Section { title, blocks }
    }

    pub fn widgets(&self) -> impl Iterator<Item = &Widget> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Widget(w) => Some(w),
            _ => None,
        })
    }
}

// ============================================================================
// PAGE
// ============================================================================

/// The chapter as mounted in the reader.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub sections: Vec<Section>,
    /// Index of the focused widget, counting widgets in page order.
    focus: usize,
}

impl Page {
    /// Mount the chapter with cosmetic values from the thread RNG.
    pub fn mount() -> Self {
        Self::mount_with_rng(&mut rand::rng())
    }

    /// Mount the chapter drawing cosmetic values from `rng`.
    pub fn mount_with_rng(rng: &mut impl Rng) -> Self {
        Page::from_sections(content::chapter(rng))
    }

    pub fn from_sections(sections: Vec<Section>) -> Self {
        Page { sections, focus: 0 }
    }

    pub fn widgets(&self) -> impl Iterator<Item = &Widget> {
        self.sections.iter().flat_map(|s| s.widgets())
    }

    pub fn widget_count(&self) -> usize {
        self.widgets().count()
    }

    /// The widget at page-order index `slot`.
    pub fn widget(&self, slot: usize) -> Option<&Widget> {
        self.widgets().nth(slot)
    }

    pub fn widget_mut(&mut self, slot: usize) -> Option<&mut Widget> {
        self.sections
            .iter_mut()
            .flat_map(|s| s.blocks.iter_mut())
            .filter_map(|b| match b {
                Block::Widget(w) => Some(w),
                _ => None,
            })
            .nth(slot)
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused(&self) -> Option<&Widget> {
        self.widget(self.focus)
    }

    pub fn focused_mut(&mut self) -> Option<&mut Widget> {
        self.widget_mut(self.focus)
    }

    pub fn focus_next(&mut self) {
        let len = self.widget_count();
        if len > 0 {
            self.focus = (self.focus + 1).min(len - 1);
        }
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    pub fn focus_first(&mut self) {
        self.focus = 0;
    }

    pub fn focus_last(&mut self) {
        self.focus = self.widget_count().saturating_sub(1);
    }
}

// ============================================================================
// TESTS
// ============================================================================
