//! Interactive widget state.
//!
//! Pure data and transitions only; drawing lives in `tui`.
//! - `reveal`: generic toggle between closed enum variants
//! - `instances`: the concrete reveal widgets and their datasets
//! - `stepped`: advance-only walkthrough (data detective)
//! - `pixel`: slider-driven colour preview
//! - `copy`: prompt box with clipboard feedback

pub mod copy;
pub mod instances;
pub mod pixel;
pub mod reveal;
pub mod stepped;

use instances::{ClassGroup, ImbalanceView, LookCloser, MatrixView, NoiseLevel, WaveView};
use pixel::PixelSimulator;
use reveal::ToggleReveal;
use stepped::SteppedNarrative;

pub use copy::CopyAffordance;

/// One mounted widget, in page order.
///
/// Each variant owns its state exclusively; nothing is shared between
/// widgets.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Noise(ToggleReveal<NoiseLevel>),
    Matrix(ToggleReveal<MatrixView>),
    Signal(ToggleReveal<WaveView>),
    Stats(ToggleReveal<ClassGroup>),
    Imbalance(ToggleReveal<ImbalanceView>),
    LookCloser(LookCloser),
    Detective(SteppedNarrative),
    Pixel(PixelSimulator),
    Prompt(CopyAffordance),
}

impl Widget {
    /// Heading shown above the widget.
    pub fn title(&self) -> &str {
        match self {
            Widget::Noise(_) => "How noise ruins data",
            Widget::Matrix(_) => "What is a picture, really?",
            Widget::Signal(_) => "How is sound stored?",
            Widget::Stats(_) => "Reading like a data scientist: mean and standard deviation",
            Widget::Imbalance(_) => "Why does balance matter? (class imbalance)",
            Widget::LookCloser(w) => match w.data {
                instances::CloseUpData::Pixels(_) => "Pixels up close",
                instances::CloseUpData::Samples(_) => "Samples up close",
                instances::CloseUpData::Brightness(_) => "MRI up close",
            },
            Widget::Detective(_) => "Data detective: the story behind the numbers",
            Widget::Pixel(_) => "How does a computer see colour?",
            Widget::Prompt(p) => p.title(),
        }
    }

    /// Stable kind name, used by the outline and in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Widget::Noise(_) => "noise",
            Widget::Matrix(_) => "matrix",
            Widget::Signal(_) => "signal",
            Widget::Stats(_) => "stats",
            Widget::Imbalance(_) => "imbalance",
            Widget::LookCloser(_) => "look-closer",
            Widget::Detective(_) => "detective",
            Widget::Pixel(_) => "pixel",
            Widget::Prompt(_) => "prompt",
        }
    }
}
