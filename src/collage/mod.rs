//! Collage poems built from styled text fragments.
//!
//! A collage is a set of [`Layout`]s (one per variant) over [`Fragment`]s
//! extracted from a daily entry.
//!
//! # Module Structure
//!
//! - `allocator`: distributes fragments across a fixed number of lines
//! - `subject`: pronoun markers used to keep lines from repeating a subject
//! - `style`: creates styled fragments from raw phrases
//! - `manual`: user-curated layouts built from the raw phrase pool
//! - `render`: terminal text and SVG card output

pub mod allocator;
pub mod manual;
pub mod render;
pub mod style;
pub mod subject;

pub use allocator::{allocate_lines, RandomShuffle, Shuffle};
pub use manual::ManualComposer;
pub use style::create_fragment;

use crate::constants::{EIGHT_LINE_COUNT, FOUR_LINE_COUNT};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unicode_segmentation::UnicodeSegmentation;

/// Display style of a fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentStyle {
    pub background_color: String,
    pub text_color: String,
    /// Rotation in degrees.
    pub rotation: f32,
    pub font_size: String,
    pub padding: String,
}

/// A short styled text unit placed into a collage line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub id: String,
    pub text: String,
    pub style: FragmentStyle,
}

impl Fragment {
    /// Length in user-perceived characters (extended grapheme clusters).
    ///
    /// ```
    /// use mosaic::collage::create_fragment;
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(1);
    /// assert_eq!(create_fragment("雨后的街", &mut rng).char_len(), 4);
    /// ```
    pub fn char_len(&self) -> usize {
        char_len(&self.text)
    }
}

/// Counts extended grapheme clusters, so each ideograph counts once.
pub fn char_len(text: &str) -> usize {
    text.graphemes(true).count()
}

/// One row of a collage. Fragment order is display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Line {
    fragments: Vec<Fragment>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Number of fragments in the line.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Summed character length of all fragments.
    pub fn char_len(&self) -> usize {
        self.fragments.iter().map(Fragment::char_len).sum()
    }

    /// Whether `text` shares a subject marker with any fragment in the line.
    pub fn shares_subject_with(&self, text: &str) -> bool {
        self.fragments
            .iter()
            .any(|fragment| subject::shares_subject(&fragment.text, text))
    }

    pub(crate) fn push(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    /// Fragment texts in display order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().map(|f| f.text.as_str())
    }
}

impl From<Vec<Fragment>> for Line {
    fn from(fragments: Vec<Fragment>) -> Self {
        Self { fragments }
    }
}

/// The full set of lines produced for one generation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    lines: Vec<Line>,
}

impl Layout {
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total number of fragments across all lines.
    pub fn fragment_count(&self) -> usize {
        self.lines.iter().map(Line::len).sum()
    }

    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.lines.iter().flat_map(|line| line.fragments.iter())
    }
}

impl From<Vec<Line>> for Layout {
    fn from(lines: Vec<Line>) -> Self {
        Self { lines }
    }
}

/// Which arrangement of a collage to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoemVariant {
    FourLines,
    EightLines,
    ImageOnly,
    Manual,
}

impl PoemVariant {
    /// Maximum lines shown for the variant, `None` meaning unbounded.
    pub fn max_lines(self) -> Option<usize> {
        match self {
            PoemVariant::FourLines => Some(FOUR_LINE_COUNT),
            PoemVariant::EightLines => Some(EIGHT_LINE_COUNT),
            PoemVariant::ImageOnly => Some(0),
            PoemVariant::Manual => None,
        }
    }

    /// Whether the illustration is part of this variant's card.
    pub fn shows_image(self) -> bool {
        matches!(self, PoemVariant::FourLines | PoemVariant::ImageOnly)
    }
}

impl fmt::Display for PoemVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PoemVariant::FourLines => "4-lines",
            PoemVariant::EightLines => "8-lines",
            PoemVariant::ImageOnly => "image-only",
            PoemVariant::Manual => "manual",
        };
        f.write_str(name)
    }
}

impl FromStr for PoemVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "4-lines" | "4" | "four" => Ok(PoemVariant::FourLines),
            "8-lines" | "8" | "eight" => Ok(PoemVariant::EightLines),
            "image-only" | "image" => Ok(PoemVariant::ImageOnly),
            "manual" => Ok(PoemVariant::Manual),
            other => Err(format!(
                "unknown variant '{}', expected one of: 4-lines, 8-lines, image-only, manual",
                other
            )),
        }
    }
}

/// A generated collage poem with all of its variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollagePoem {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub four_lines: Layout,
    pub eight_lines: Layout,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual: Option<Layout>,
    /// Image reference: a data URI or an external URL.
    pub image: String,
    /// De-duplicated phrases available for manual composition.
    pub raw_pool: Vec<String>,
    pub font_family: String,
}

impl CollagePoem {
    /// The layout backing a text variant. Image-only has none.
    pub fn layout(&self, variant: PoemVariant) -> Option<&Layout> {
        match variant {
            PoemVariant::FourLines => Some(&self.four_lines),
            PoemVariant::EightLines => Some(&self.eight_lines),
            PoemVariant::ImageOnly => None,
            PoemVariant::Manual => self.manual.as_ref(),
        }
    }

    /// Returns a copy of the poem carrying `layout` as its manual variant.
    pub fn with_manual(&self, layout: Layout) -> Self {
        Self {
            manual: Some(layout),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(text: &str) -> Fragment {
        Fragment {
            id: text.to_string(),
            text: text.to_string(),
            style: FragmentStyle {
                background_color: "#ffffff".to_string(),
                text_color: "#1e293b".to_string(),
                rotation: 0.0,
                font_size: "1rem".to_string(),
                padding: "4px 8px".to_string(),
            },
        }
    }

    #[test]
    fn test_char_len_counts_graphemes() {
        assert_eq!(char_len("晚风"), 2);
        assert_eq!(char_len("café"), 4);
        assert_eq!(char_len("e\u{301}"), 1);
        assert_eq!(char_len(""), 0);
    }

    #[test]
    fn test_line_lengths() {
        let line = Line::from(vec![fragment("晚风"), fragment("一盏灯")]);
        assert_eq!(line.len(), 2);
        assert_eq!(line.char_len(), 5);
        assert_eq!(line.texts().collect::<Vec<_>>(), vec!["晚风", "一盏灯"]);
    }

    #[test]
    fn test_line_subject_conflict() {
        let line = Line::from(vec![fragment("我的窗"), fragment("雨")]);
        assert!(line.shares_subject_with("我们走吧"));
        assert!(!line.shares_subject_with("她的伞"));
    }

    #[test]
    fn test_variant_parsing() {
        assert_eq!("4-lines".parse::<PoemVariant>(), Ok(PoemVariant::FourLines));
        assert_eq!("eight".parse::<PoemVariant>(), Ok(PoemVariant::EightLines));
        assert_eq!("image".parse::<PoemVariant>(), Ok(PoemVariant::ImageOnly));
        assert_eq!("manual".parse::<PoemVariant>(), Ok(PoemVariant::Manual));
        assert!("sonnet".parse::<PoemVariant>().is_err());
        assert_eq!(PoemVariant::ImageOnly.to_string(), "image-only");
    }

    #[test]
    fn test_poem_serializes_fragment_style_in_camel_case() {
        let layout = Layout::from(vec![Line::from(vec![fragment("晚风")])]);
        let poem = CollagePoem {
            id: "1".to_string(),
            title: "拼贴诗".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            four_lines: layout.clone(),
            eight_lines: layout,
            manual: None,
            image: "https://example.com/a.png".to_string(),
            raw_pool: vec!["晚风".to_string()],
            font_family: "serif".to_string(),
        };

        let json = serde_json::to_string(&poem).unwrap();
        assert!(json.contains("\"backgroundColor\""));
        assert!(!json.contains("\"manual\""));

        let back: CollagePoem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, poem);
    }
}
