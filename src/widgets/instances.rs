//! The concrete reveal widgets of the chapter and their fixed datasets.
//!
//! Each enum here is a [`Variant`]; the methods on it are the pure
//! "state in, presentation out" derivations the renderer draws from.

use rand::Rng;

use crate::types::Rgb;

use super::reveal::Variant;

// ============================================================================
// NOISE
// ============================================================================

/// Clean photo vs. the same photo buried in noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseLevel {
    #[default]
    Clean,
    Noisy,
}

impl Variant for NoiseLevel {
    const ALL: &'static [Self] = &[NoiseLevel::Clean, NoiseLevel::Noisy];

    fn label(self) -> &'static str {
        match self {
            NoiseLevel::Clean => "clean",
            NoiseLevel::Noisy => "noisy",
        }
    }
}

/// Filters applied to the photo. All off for the clean variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageFilter {
    pub blur: bool,
    pub high_contrast: bool,
    pub grayscale: bool,
}

impl NoiseLevel {
    pub fn filter(self) -> ImageFilter {
        match self {
            NoiseLevel::Clean => ImageFilter::default(),
            NoiseLevel::Noisy => ImageFilter {
                blur: true,
                high_contrast: true,
                grayscale: true,
            },
        }
    }

    /// What the model says about the photo.
    pub fn caption(self) -> &'static str {
        match self {
            NoiseLevel::Clean => "AI: \"That's a cat! 99% sure.\"",
            NoiseLevel::Noisy => "AI: \"What is this? I can't tell!\"",
        }
    }

    /// Label of the control, naming what pressing it will do.
    pub fn button_label(self) -> &'static str {
        match self {
            NoiseLevel::Clean => "Add noise",
            NoiseLevel::Noisy => "Filter the noise",
        }
    }
}

/// The photo, as terminal art.
pub const CAT_ART: [&str; 6] = [
    r"   /\_____/\   ",
    r"  /  o   o  \  ",
    r" ( ==  ^  == ) ",
    r"  )         (  ",
    r" (           ) ",
    r"( ( )  ( )  ) )",
];

// ============================================================================
// IMAGE MATRIX
// ============================================================================

/// Smiley picture vs. the brightness matrix behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixView {
    #[default]
    Picture,
    Numbers,
}

impl Variant for MatrixView {
    const ALL: &'static [Self] = &[MatrixView::Picture, MatrixView::Numbers];

    fn label(self) -> &'static str {
        match self {
            MatrixView::Picture => "picture",
            MatrixView::Numbers => "numbers",
        }
    }
}

impl MatrixView {
    pub fn shows_numbers(self) -> bool {
        self == MatrixView::Numbers
    }
}

/// 8×8 grayscale smiley. 250 is near-white, 40 near-black.
pub const SMILEY: [[u8; 8]; 8] = [
    [250, 250, 250, 250, 250, 250, 250, 250],
    [250, 40, 40, 250, 250, 40, 40, 250],
    [250, 40, 40, 250, 250, 40, 40, 250],
    [250, 250, 250, 250, 250, 250, 250, 250],
    [250, 40, 250, 250, 250, 250, 40, 250],
    [250, 250, 40, 40, 40, 40, 250, 250],
    [250, 250, 250, 250, 250, 250, 250, 250],
    [250, 250, 250, 250, 250, 250, 250, 250],
];

// ============================================================================
// AUDIO SIGNAL
// ============================================================================

/// Continuous wave vs. the samples a computer actually stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaveView {
    #[default]
    Continuous,
    Sampled,
}

impl Variant for WaveView {
    const ALL: &'static [Self] = &[WaveView::Continuous, WaveView::Sampled];

    fn label(self) -> &'static str {
        match self {
            WaveView::Continuous => "continuous",
            WaveView::Sampled => "sampled",
        }
    }
}

impl WaveView {
    pub fn shows_samples(self) -> bool {
        self == WaveView::Sampled
    }
}

/// One period of a sine wave, sampled 12 times.
pub const SIGNAL_POINTS: [f64; 13] = [
    0.0, 0.5, 0.86, 1.0, 0.86, 0.5, 0.0, -0.5, -0.86, -1.0, -0.86, -0.5, 0.0,
];

/// Array literal of the samples: `[0, 0.5, 0.86, 1, ...]`.
pub fn format_samples(points: &[f64]) -> String {
    let body: Vec<String> = points.iter().map(|p| p.to_string()).collect();
    format!("[{}]", body.join(", "))
}

// ============================================================================
// STATISTICS
// ============================================================================

/// Two classes with the same mean but a different spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassGroup {
    #[default]
    A,
    B,
}

impl Variant for ClassGroup {
    const ALL: &'static [Self] = &[ClassGroup::A, ClassGroup::B];

    fn label(self) -> &'static str {
        match self {
            ClassGroup::A => "Class A (steady)",
            ClassGroup::B => "Class B (extremes)",
        }
    }
}

impl ClassGroup {
    /// Exam scores on a 0-100 line.
    pub fn scores(self) -> &'static [u8] {
        match self {
            ClassGroup::A => &[40, 45, 50, 50, 55, 60],
            ClassGroup::B => &[10, 20, 30, 70, 80, 90],
        }
    }

    pub fn mean(self) -> f64 {
        let scores = self.scores();
        let sum: u32 = scores.iter().map(|&s| u32::from(s)).sum();
        f64::from(sum) / scores.len() as f64
    }

    pub fn spread(self) -> &'static str {
        match self {
            ClassGroup::A => "LOW",
            ClassGroup::B => "HIGH",
        }
    }

    pub fn explanation(self) -> &'static str {
        match self {
            ClassGroup::A => {
                "In class A everybody scored around 50. The standard deviation is LOW. \
                 A data scientist reads this as: \"This class is homogeneous, everyone \
                 understood the topic at a medium level.\""
            }
            ClassGroup::B => {
                "In class B the scores are spread between 10 and 90. The standard deviation \
                 is HIGH. A data scientist reads this as: \"The mean is 50, but this class \
                 is polarised: half are brilliant, half understood nothing!\""
            }
        }
    }
}

// ============================================================================
// CLASS IMBALANCE
// ============================================================================

pub const HEALTHY_PATIENTS: usize = 95;
pub const SICK_PATIENTS: usize = 5;

/// Real diagnoses vs. what a lazy model predicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImbalanceView {
    #[default]
    GroundTruth,
    ModelGuess,
}

impl Variant for ImbalanceView {
    const ALL: &'static [Self] = &[ImbalanceView::GroundTruth, ImbalanceView::ModelGuess];

    fn label(self) -> &'static str {
        match self {
            ImbalanceView::GroundTruth => "real data",
            ImbalanceView::ModelGuess => "model guess",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnosis {
    Healthy,
    Sick,
}

/// The hospital: 95 healthy patients followed by 5 sick ones.
pub fn ground_truth() -> Vec<Diagnosis> {
    let mut patients = vec![Diagnosis::Healthy; HEALTHY_PATIENTS];
    patients.extend(std::iter::repeat_n(Diagnosis::Sick, SICK_PATIENTS));
    patients
}

impl ImbalanceView {
    /// The diagnosis shown for every patient.
    ///
    /// The model learned that answering "healthy" is right 95% of the time,
    /// so it answers "healthy" for everyone.
    pub fn diagnoses(self) -> Vec<Diagnosis> {
        match self {
            ImbalanceView::GroundTruth => ground_truth(),
            ImbalanceView::ModelGuess => vec![Diagnosis::Healthy; HEALTHY_PATIENTS + SICK_PATIENTS],
        }
    }

    /// Percentage of patients whose shown diagnosis matches the truth.
    pub fn accuracy_percent(self) -> usize {
        let truth = ground_truth();
        let shown = self.diagnoses();
        let correct = truth.iter().zip(&shown).filter(|(t, s)| t == s).count();
        correct * 100 / truth.len()
    }

    /// Sick patients labelled healthy.
    pub fn missed_patients(self) -> usize {
        ground_truth()
            .iter()
            .zip(self.diagnoses())
            .filter(|(t, s)| **t == Diagnosis::Sick && *s == Diagnosis::Healthy)
            .count()
    }

    pub fn button_label(self) -> &'static str {
        match self {
            ImbalanceView::GroundTruth => "See the model's guess",
            ImbalanceView::ModelGuess => "See the real data",
        }
    }
}

// ============================================================================
// LOOK CLOSER
// ============================================================================

/// Surface view vs. the numbers under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloseUp {
    #[default]
    Surface,
    Values,
}

impl Variant for CloseUp {
    const ALL: &'static [Self] = &[CloseUp::Surface, CloseUp::Values];

    fn label(self) -> &'static str {
        match self {
            CloseUp::Surface => "surface",
            CloseUp::Values => "values",
        }
    }
}

/// Index of the tumour hot spot inside the 5×5 MRI patch.
pub const MRI_HOT_SPOT: [usize; 2] = [12, 13];

/// Cosmetic numbers a "look closer" widget reveals.
///
/// Drawn once at mount; they illustrate the idea and are not derived from
/// any real signal.
#[derive(Debug, Clone, PartialEq)]
pub enum CloseUpData {
    /// 16 RGB triplets over a retro photo.
    Pixels(Vec<Rgb>),
    /// 20 amplitudes in `[0, 1)` under an audio bar chart.
    Samples(Vec<f64>),
    /// 5×5 MRI brightness patch with a bright tumour spot.
    Brightness(Vec<u8>),
}

impl CloseUpData {
    pub fn pixels(rng: &mut impl Rng) -> Self {
        let pixels = (0..16)
            .map(|_| Rgb::new(rng.random(), rng.random(), rng.random()))
            .collect();
        CloseUpData::Pixels(pixels)
    }

    pub fn samples(rng: &mut impl Rng) -> Self {
        let samples = (0..20).map(|_| rng.random_range(0.0..1.0)).collect();
        CloseUpData::Samples(samples)
    }

    pub fn brightness(rng: &mut impl Rng) -> Self {
        let values = (0..25)
            .map(|i| match i {
                12 => 255,
                13 => 240,
                _ => rng.random_range(10..60),
            })
            .collect();
        CloseUpData::Brightness(values)
    }

    pub fn len(&self) -> usize {
        match self {
            CloseUpData::Pixels(v) => v.len(),
            CloseUpData::Samples(v) => v.len(),
            CloseUpData::Brightness(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A reveal that uncovers cosmetic numbers under a picture.
#[derive(Debug, Clone, PartialEq)]
pub struct LookCloser {
    pub reveal: super::reveal::ToggleReveal<CloseUp>,
    pub data: CloseUpData,
}

impl LookCloser {
    pub fn new(data: CloseUpData) -> Self {
        LookCloser {
            reveal: super::reveal::ToggleReveal::new(),
            data,
        }
    }

    pub fn toggle(&mut self) -> CloseUp {
        self.reveal.toggle()
    }

    pub fn shows_values(&self) -> bool {
        self.reveal.current() == CloseUp::Values
    }

    /// What the surface view depicts.
    pub fn subject(&self) -> &'static str {
        match self.data {
            CloseUpData::Pixels(_) => "a retro computer photo",
            CloseUpData::Samples(_) => "a bouncing audio equaliser",
            CloseUpData::Brightness(_) => "a brain MRI scan",
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
