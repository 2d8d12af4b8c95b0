//! Chapter text and the order widgets appear in.
//!
//! Static prose is `&'static str`; widgets are freshly constructed on
//! every call so each mount starts from defaults.

use rand::Rng;

use crate::page::{Block, Section, Split, Table};
use crate::widgets::instances::{CloseUpData, LookCloser};
use crate::widgets::pixel::PixelSimulator;
use crate::widgets::reveal::ToggleReveal;
use crate::widgets::stepped::SteppedNarrative;
use crate::widgets::{CopyAffordance, Widget};

pub const CHAPTER_LABEL: &str = "Chapter 1";
pub const CHAPTER_TITLE: &str = "The World of Data";
pub const CHAPTER_END: &str = "End of Chapter 1. Great job!";

/// A copyable prompt: box title and the text that gets copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt {
    pub title: &'static str,
    pub text: &'static str,
}

/// The vibe-coding prompts, in page order.
pub const PROMPTS: [Prompt; 4] = [
    Prompt {
        title: "Vibe Coding: Processing unstructured data",
        text: "Could you write Python code that reads an audio file (WAV), turns it into a \
               spectrogram (a photo of the sound) and marks high-frequency sounds (for \
               example a scream) in red? You can use the 'librosa' and 'matplotlib' libraries.",
    },
    Prompt {
        title: "Vibe Coding: An automatic labeling tool",
        text: "Could you write simple code with Python and OpenCV (cv2) that draws a red \
               rectangle (bounding box) on a photo and writes 'Cat' above it? Use matplotlib \
               so I can see the image on screen.",
    },
    Prompt {
        title: "Vibe Coding: Ethical data collection",
        text: "Could you write the Python code needed to download an open-source dataset \
               from Kaggle? Also add a simple BeautifulSoup example that respects a website's \
               'robots.txt' file and only reads the pages it allows.",
    },
    Prompt {
        title: "Vibe Coding: Splitting the data",
        text: "Write Python code that splits a dataset into 70% training, 15% validation and \
               15% test using Scikit-Learn (sklearn.model_selection.train_test_split). Make \
               sure it shuffles the data before splitting to prevent data leakage.",
    },
];

/// Train / validation / test split.
pub const DATA_SPLIT: [Split; 3] = [
    Split {
        name: "Training (worked in class)",
        percent: 70,
    },
    Split {
        name: "Validation (practice exam)",
        percent: 15,
    },
    Split {
        name: "Test (the real exam)",
        percent: 15,
    },
];

const STRUCTURED_TABLE: Table = Table {
    header: &["Name", "Age", "Grade"],
    rows: &[&["Ayşe", "15", "85"], &["Ali", "16", "92"]],
};

const SENTENCE_VECTORS: Table = Table {
    header: &["Sentence", "Vector"],
    rows: &[
        &["\"I really love animals.\"", "[0.85, 0.92, -0.12, 0.44]"],
        &["\"Yesterday I kicked the dog on the street.\"", "[-0.88, -0.95, 0.82, -0.51]"],
    ],
};

const WORD_VECTORS: Table = Table {
    header: &["Word", "Gender", "Royalty", "Age", "Vector (array)"],
    rows: &[
        &["King", "1.0", "1.0", "1.0", "[1.0, 1.0, 1.0]"],
        &["Man", "1.0", "0.0", "0.0", "[1.0, 0.0, 0.0]"],
        &["Woman", "-1.0", "0.0", "0.0", "[-1.0, 0.0, 0.0]"],
        &["Queen", "-1.0", "1.0", "1.0", "[-1.0, 1.0, 1.0]"],
    ],
};

const WORD_MATH: &[&str] = &[
    "King      - Man       + Woman      = Queen",
    "[1, 1, 1] - [1, 0, 0] + [-1, 0, 0] = [-1, 1, 1]",
];

const ROBOTS_TXT: &[&str] = &[
    "User-agent: *",
    "Disallow: /private-data/",
    "Allow: /public-data/",
];

fn prompt_box(prompt: &Prompt) -> Block {
    Block::Widget(Widget::Prompt(
        CopyAffordance::new(prompt.text).with_title(prompt.title),
    ))
}

/// Build the chapter. `rng` feeds the cosmetic "look closer" numbers.
pub fn chapter(rng: &mut impl Rng) -> Vec<Section> {
    vec![
        Section::new(
            CHAPTER_TITLE,
            vec![Block::Prose(
                "AI is not a magic crystal ball. It is an incredibly hard-working student \
                 that learns the rules by looking at a huge number of examples. So what does \
                 this student feed on?",
            )],
        ),
        Section::new(
            "Data: the oil of the new world",
            vec![
                Block::Callout {
                    tag: "FUN FACT",
                    text: "Today data is as valuable as oil. But just like oil, raw data is \
                           useless on its own. We refine crude oil into the fuel that runs \
                           cars; we clean and organise raw data into the fuel that runs AI.",
                },
                Block::Prose(
                    "Did you know? Humanity produces 2.5 quintillion bytes of data every day! \
                     That is more than all the grains of sand on every beach on Earth. This \
                     vast ocean of data is why AI is improving so quickly.",
                ),
            ],
        ),
        Section::new(
            "1. The machine's food: data",
            vec![
                Block::Prose(
                    "Everything AI uses to learn is called \"data\". But data does not always \
                     arrive the same way. Sometimes it is very tidy, sometimes it is as messy \
                     as your room!",
                ),
                Block::Heading("Structured data"),
                Block::Prose(
                    "Like your school's grade sheet. Everything has its place: names in one \
                     column, grades in another. Machines love this and understand it at once.",
                ),
                Block::Table(STRUCTURED_TABLE),
                Block::Heading("Unstructured data"),
                Block::Prose(
                    "Like your messy room. Photos on the floor, a voice recorder on the desk, \
                     notes scribbled in your notebook... The machine has to organise these \
                     before it can understand them.",
                ),
                Block::Bullets(&["Image", "Audio", "Text"]),
            ],
        ),
        Section::new(
            "How does the real world turn into numbers?",
            vec![
                Block::Prose(
                    "Computers cannot see light or hear sound. They only understand 0s and 1s, \
                     so everything in the real world has to be digitised.",
                ),
                Block::Heading("Digitising images"),
                Block::Prose(
                    "Look at a photo closely enough and you will see it is made of tiny squares \
                     called pixels. Each pixel is just the numbers that set its colour: red, \
                     green and blue.",
                ),
                Block::Widget(Widget::LookCloser(LookCloser::new(CloseUpData::pixels(rng)))),
                Block::Heading("Digitising sound"),
                Block::Prose(
                    "Sound is a continuous wave travelling through the air. A computer measures \
                     that wave thousands of times per second (sampling) and turns it into \
                     numbers. CD-quality audio is measured 44,100 times a second!",
                ),
                Block::Widget(Widget::LookCloser(LookCloser::new(CloseUpData::samples(rng)))),
                Block::Callout {
                    tag: "WARNING: NOISE HAZARD",
                    text: "Imagine trying to talk to a friend at a very loud concert. Hard to \
                           hear them, right? It is the same for AI.",
                },
                Block::Prose(
                    "In data science, \"noise\" is useless extra material that hides the real \
                     information: a blurry photo, a crackling recording, misspelled words. We \
                     have to clean (filter) the noise before giving data to a model.",
                ),
                Block::Widget(Widget::Noise(ToggleReveal::new())),
                Block::Widget(Widget::Pixel(PixelSimulator::new())),
                Block::Prose(
                    "Select the smiley below! On disk this picture is not stored as an \"image\" \
                     but as a table of numbers (a matrix). 0 is close to black, 255 close to \
                     white.",
                ),
                Block::Widget(Widget::Matrix(ToggleReveal::new())),
                Block::Prose(
                    "Sound is a continuous wave, but a computer cannot store anything \
                     continuous. It measures the wave thousands of times a second and records \
                     those measurements as an array of numbers. Watch the wave turn into numbers!",
                ),
                Block::Widget(Widget::Signal(ToggleReveal::new())),
            ],
        ),
        Section::new(
            "So how does the machine understand all this?",
            vec![
                Block::Prose(
                    "Computers have no eyes, ears or brain. They only understand numbers. We \
                     have to translate unstructured data (photos, audio, text) into numbers a \
                     computer can work with. Let's take a closer look.",
                ),
                Block::Heading("Finding disease in an MRI image"),
                Block::Prose(
                    "When AI looks at a brain MRI it does not see shades of gray; it sees numbers \
                     between 0 (black) and 255 (white). Tumour tissue has a different brightness \
                     from the healthy tissue around it, for example pixels that suddenly jump \
                     to 255. After thousands of examples the model learns to spot that jump.",
                ),
                Block::Widget(Widget::LookCloser(LookCloser::new(CloseUpData::brightness(rng)))),
                Block::Heading("Telling a scream apart from street noise"),
                Block::Prose(
                    "To a computer, the hum of a busy street and a cry for help are both just \
                     sound waves. AI turns them into a spectrogram, a \"photo of the sound\". \
                     The hum makes low, wide, flat waves, while a scream makes a sudden, sharp, \
                     high-frequency peak. The computer catches that jump instantly.",
                ),
                Block::Heading("Catching a lie or contradiction in text"),
                Block::Prose(
                    "AI does not know what words mean. Instead it turns every word and sentence \
                     into coordinates made of hundreds of numbers (a vector, or embedding). \
                     Words like \"love\" and \"kindness\" sit close together on the positive \
                     side; \"kicking\" and \"hate\" point the opposite way.",
                ),
                Block::Table(SENTENCE_VECTORS),
                Block::Callout {
                    tag: "CONTRADICTION DETECTED",
                    text: "The two sentences point in opposite directions.",
                },
                Block::Heading("How do we turn words into maths? (word embeddings)"),
                Block::Prose(
                    "AI gives words scores on different features. Score words on three: \
                     gender (man = 1, woman = -1), royalty (common = 0, royal = 1) and age \
                     (young = 0, old = 1). Side by side, the scores form the word's array \
                     (vector).",
                ),
                Block::Table(WORD_VECTORS),
                Block::Prose("If words are arrays of numbers, we can add and subtract them!"),
                Block::Code(WORD_MATH),
                prompt_box(&PROMPTS[0]),
            ],
        ),
        Section::new(
            "2. You are the teacher: labeling",
            vec![
                Block::Prose(
                    "We gave the machine data, but how does it know what to look for? You have \
                     to tell it \"this is a cat\" or \"this is a tumour\". That is called \
                     labeling.",
                ),
                Block::Heading("Bounding box"),
                Block::Prose(
                    "Like teaching a small child about the world: you draw around it and say \
                     \"the cat is right here\". The machine learns the pixels (numbers) inside \
                     your box as \"cat\".",
                ),
                Block::Heading("Data bias"),
                Block::Prose(
                    "If you only ever show a child white cats and say \"cat\", they will not \
                     recognise a black one. AI is exactly the same!",
                ),
                Block::Bullets(&[
                    "Under-representation: always using the same kind of data.",
                    "Labeler fatigue: tired people labeling things wrong.",
                ]),
                prompt_box(&PROMPTS[1]),
            ],
        ),
        Section::new(
            "3. Data hunting and ethics",
            vec![
                Block::Prose(
                    "Collecting data is like gathering ingredients for a cake. Where do the \
                     ingredients come from? Picking apples from someone else's garden without \
                     asking is stealing!",
                ),
                Block::Heading("Public parks (open data)"),
                Block::Prose(
                    "Like buying ingredients at the market, or taking them from the free shelf. \
                     Everything is legal. Platforms like Kaggle and Hugging Face exist for this.",
                ),
                Block::Bullets(&["Kaggle", "Hugging Face"]),
                Block::Heading("Private gardens (web scraping)"),
                Block::Prose(
                    "Before scraping a site you need permission and must follow its rules. The \
                     guard at a site's door is its robots.txt file.",
                ),
                Block::Code(ROBOTS_TXT),
                prompt_box(&PROMPTS[2]),
                Block::Callout {
                    tag: "EDA (EXPLORATORY DATA ANALYSIS)",
                    text: "We found data, now what? Hand it straight to a model and it gets \
                           confused. First we inspect it like a detective and find the \
                           mistakes. This is called exploratory data analysis.",
                },
                Block::Widget(Widget::Detective(SteppedNarrative::detective())),
                Block::Prose(
                    "A data scientist does not read numbers one by one, they take a bird's-eye \
                     view. Compare two classes' exam scores: both have a mean of 50. Are the \
                     classes the same?",
                ),
                Block::Widget(Widget::Stats(ToggleReveal::new())),
                Block::Prose(
                    "Picture a hospital with 95 healthy people and only 5 cancer patients. \
                     Train a model on that and it finds a clever cheat: \"If I say 'healthy' to \
                     everyone without thinking, I am 95% right!\"",
                ),
                Block::Widget(Widget::Imbalance(ToggleReveal::new())),
                Block::Callout {
                    tag: "LESSON",
                    text: "If the classes in your dataset (healthy vs. sick, cat vs. dog) are not \
                           evenly distributed, your model gets lazy and always picks the \
                           majority. This is called class imbalance.",
                },
            ],
        ),
        Section::new(
            "4. The big exam: how smart is the model?",
            vec![
                Block::Prose(
                    "After training we must test how good the model is. To do that we split our \
                     data into three parts, just like a student preparing for an exam!",
                ),
                Block::Heading("1. Training data (70%)"),
                Block::Prose(
                    "The example problems the teacher works through in class. The model learns \
                     the rules from this data.",
                ),
                Block::Heading("2. Validation data (15%)"),
                Block::Prose(
                    "The practice exam you take at home. You see your gaps and change how you \
                     study.",
                ),
                Block::Heading("3. Test data (15%)"),
                Block::Prose(
                    "The real exam! You must never have seen these questions before. The score \
                     here is the model's real-world performance.",
                ),
                Block::Heading("Data split ratios"),
                Block::SplitChart(&DATA_SPLIT),
                Block::Callout {
                    tag: "DATA LEAKAGE",
                    text: "The teacher accidentally puts the real exam questions on the \
                           worksheet. You score 100, but you memorised the questions instead of \
                           learning the topic! Test data must never be seen during training.",
                },
                Block::Prose(
                    "A recent example, the COVID-19 scandal: during the pandemic researchers \
                     trained a model to detect COVID-19 from lung X-rays, and it was 99% \
                     accurate! Later it turned out that sick patients had been X-rayed lying \
                     down on a machine that stamped an \"L\" on the image, while healthy people \
                     were X-rayed standing up. The model never learned the disease; it \
                     memorised the letter \"L\". A hint about the answer leaking into the \
                     training data is called data leakage.",
                ),
                prompt_box(&PROMPTS[3]),
            ],
        ),
    ]
}

// ============================================================================
// TESTS
// ============================================================================
