//! Advance-only stepped walkthrough, plus the "data detective" dataset
//! it annotates.
//!
//! State is a single step counter in `0..=last`. Controls unlock in
//! order: the control for step `k` does nothing until step `k - 1` has
//! been reached, and no control ever moves the counter backwards.

/// Number of steps in the data detective walkthrough.
pub const DETECTIVE_STEPS: u8 = 3;

/// Stepped narrative state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SteppedNarrative {
    step: u8,
    last: u8,
}

impl SteppedNarrative {
    /// Mount at step 0 with `last` as the terminal step.
    pub fn new(last: u8) -> Self {
        SteppedNarrative { step: 0, last }
    }

    /// The data detective walkthrough (three steps).
    pub fn detective() -> Self {
        Self::new(DETECTIVE_STEPS)
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn last(&self) -> u8 {
        self.last
    }

    pub fn is_complete(&self) -> bool {
        self.step == self.last
    }

    /// Move one step forward. Stays put at the terminal step.
    pub fn advance(&mut self) -> u8 {
        if self.step < self.last {
            self.step += 1;
        }
        self.step
    }

    /// Whether the control for step `k` responds.
    ///
    /// Step 0 has no control; steps past `last` do not exist.
    pub fn is_enabled(&self, k: u8) -> bool {
        (1..=self.last).contains(&k) && self.step + 1 >= k
    }

    /// True once step `k` has been reached.
    pub fn is_reached(&self, k: u8) -> bool {
        self.step >= k
    }

    /// Press the control for step `k`.
    ///
    /// Disabled controls are a silent no-op. Enabled controls for an
    /// already-passed step leave the state unchanged. Returns whether the
    /// step changed.
    pub fn activate(&mut self, k: u8) -> bool {
        if !self.is_enabled(k) || k <= self.step {
            return false;
        }
        self.step = k;
        true
    }
}

// ============================================================================
// DATA DETECTIVE DATASET
// ============================================================================

/// Control labels and the note shown while that step is current.
pub const DETECTIVE_SCRIPT: [(&str, &str); 3] = [
    (
        "Find the outliers",
        "Detective says: \"Nobody is 999 years old! That is a typo (noise). \
         A model that sees it will believe people live for a thousand years.\"",
    ),
    (
        "Find the missing data",
        "Detective says: \"Zeynep's grade was never entered (empty/NULL). \
         Models do not like gaps; they fail on them.\"",
    ),
    (
        "Clean and fill the data",
        "Fix: we replaced 999 with the real age, 16, and filled Zeynep's empty \
         grade with the class average, 87. The data is spotless now!",
    ),
];

/// Why a cell is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMark {
    Plain,
    Outlier,
    Missing,
    Corrected,
}

/// One table cell: a value (or NULL) and its highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub value: Option<u16>,
    pub mark: CellMark,
}

impl Cell {
    fn plain(value: u16) -> Self {
        Cell {
            value: Some(value),
            mark: CellMark::Plain,
        }
    }

    pub fn display(&self) -> String {
        match self.value {
            Some(v) => v.to_string(),
            None => "EMPTY (NULL)".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudentRow {
    pub name: &'static str,
    pub age: Cell,
    pub grade: Cell,
}

/// The student table as it looks at a given step of `narrative`.
///
/// Ali's age is an outlier from step 1 until the fix; Zeynep's grade is
/// flagged missing from step 2 until the fix. At the terminal step both
/// are corrected.
pub fn detective_rows(narrative: &SteppedNarrative) -> [StudentRow; 3] {
    let step = narrative.step();
    let fixed = narrative.is_complete();

    let ali_age = if fixed {
        Cell {
            value: Some(16),
            mark: CellMark::Corrected,
        }
    } else {
        Cell {
            value: Some(999),
            mark: if step >= 1 { CellMark::Outlier } else { CellMark::Plain },
        }
    };

    let zeynep_grade = if fixed {
        Cell {
            value: Some(87),
            mark: CellMark::Corrected,
        }
    } else {
        Cell {
            value: None,
            mark: if step >= 2 { CellMark::Missing } else { CellMark::Plain },
        }
    };

    [
        StudentRow {
            name: "Ayşe",
            age: Cell::plain(15),
            grade: Cell::plain(85),
        },
        StudentRow {
            name: "Ali",
            age: ali_age,
            grade: Cell::plain(90),
        },
        StudentRow {
            name: "Zeynep",
            age: Cell::plain(16),
            grade: zeynep_grade,
        },
    ]
}

// ============================================================================
// TESTS
// ============================================================================
