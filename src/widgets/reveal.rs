//! Toggle/reveal state: one closed enum value, flipped by the reader.
//!
//! Every "click to see" widget in the chapter is a [`ToggleReveal`] over a
//! small [`Variant`] enum. The widget holds nothing else; what gets drawn
//! is derived from the current variant by the rendering layer.

use std::fmt::Debug;

/// A closed set of presentations a reveal widget can show.
///
/// `ALL` lists the variants in cycle order. `Default` is the variant a
/// freshly mounted widget shows.
pub trait Variant: Copy + Eq + Default + Debug + 'static {
    /// Every variant, in toggle order.
    const ALL: &'static [Self];

    /// Short human label ("clean", "noisy", ...).
    fn label(self) -> &'static str;

    /// The variant shown after one toggle.
    ///
    /// Two-variant enums flip; longer enums cycle and wrap.
    fn next(self) -> Self {
        let all = Self::ALL;
        match all.iter().position(|v| *v == self) {
            Some(i) => all[(i + 1) % all.len()],
            None => Self::default(),
        }
    }
}

/// Reveal widget state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToggleReveal<V: Variant> {
    current: V,
}

impl<V: Variant> ToggleReveal<V> {
    /// Mount at the variant's default.
    pub fn new() -> Self {
        ToggleReveal {
            current: V::default(),
        }
    }

    pub fn current(&self) -> V {
        self.current
    }

    /// Advance to the next variant and return it.
    pub fn toggle(&mut self) -> V {
        self.current = self.current.next();
        self.current
    }

    /// Jump straight to a variant (selector buttons).
    pub fn select(&mut self, variant: V) {
        self.current = variant;
    }

    /// True while the widget still shows its mount-time variant.
    pub fn is_initial(&self) -> bool {
        self.current == V::default()
    }
}

// ============================================================================
// TESTS
// ============================================================================
