//! Collage generation.

use crate::ai::{fallback_extract, fallback_image, FragmentExtractor, ImageSynthesizer};
use crate::collage::style::create_fragments;
use crate::collage::{allocate_lines, CollagePoem, RandomShuffle};
use crate::constants::{DEFAULT_FONT_FAMILY, DEFAULT_POEM_TITLE, EIGHT_LINE_COUNT, FOUR_LINE_COUNT};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use rand::Rng;
use tracing::{debug, info, warn};

/// Turns entry text into a collage poem.
///
/// Extraction and illustration are best-effort: an extractor error falls
/// back to punctuation splitting, and a missing or failed illustration falls
/// back to a random gallery image. Both layouts are allocated from their own
/// phrase corpus; the raw pool is the de-duplicated union of the two.
///
/// # Errors
///
/// Returns `AppError::Collage` when `text` is blank.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use mosaic::ai::{LocalExtractor, NoImageSynthesizer};
/// use mosaic::ops::generate_collage;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let extractor = LocalExtractor::new(StdRng::seed_from_u64(1));
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let poem = generate_collage(
///     &extractor,
///     &NoImageSynthesizer,
///     "今天下雨了，我在窗边读旧书。",
///     date,
///     &mut StdRng::seed_from_u64(2),
/// )?;
/// assert_eq!(poem.four_lines.line_count(), 4);
/// assert_eq!(poem.eight_lines.line_count(), 8);
/// # Ok::<(), mosaic::errors::AppError>(())
/// ```
pub fn generate_collage<R: Rng>(
    extractor: &dyn FragmentExtractor,
    images: &dyn ImageSynthesizer,
    text: &str,
    date: NaiveDate,
    rng: &mut R,
) -> AppResult<CollagePoem> {
    if text.trim().is_empty() {
        return Err(AppError::Collage(format!(
            "Entry for {} is empty; nothing to cut up",
            date
        )));
    }

    let phrases = match extractor.extract(text) {
        Ok(phrases) => phrases,
        Err(e) => {
            warn!("Fragment extraction failed, splitting locally: {}", e);
            fallback_extract(text, rng)
        }
    };

    let four_fragments = create_fragments(&phrases.four_lines, rng);
    let eight_fragments = create_fragments(&phrases.eight_lines, rng);
    let four_lines = allocate_lines(
        four_fragments,
        FOUR_LINE_COUNT,
        RandomShuffle::from_rng(&mut *rng),
    );
    let eight_lines = allocate_lines(
        eight_fragments,
        EIGHT_LINE_COUNT,
        RandomShuffle::from_rng(&mut *rng),
    );
    debug!(
        "Allocated {} and {} fragments",
        four_lines.fragment_count(),
        eight_lines.fragment_count()
    );

    let image = match images.synthesize(&phrases.four_lines.join(" ")) {
        Ok(Some(image)) => image,
        Ok(None) => {
            debug!("No illustration produced, using gallery");
            fallback_image(rng)
        }
        Err(e) => {
            warn!("Illustration failed, using gallery: {}", e);
            fallback_image(rng)
        }
    };

    let poem = CollagePoem {
        id: uuid::Builder::from_random_bytes(rng.gen())
            .into_uuid()
            .to_string(),
        title: DEFAULT_POEM_TITLE.to_string(),
        date,
        four_lines,
        eight_lines,
        manual: None,
        image,
        raw_pool: phrases.pool(),
        font_family: DEFAULT_FONT_FAMILY.to_string(),
    };

    info!("Generated collage {} for {}", poem.id, date);
    Ok(poem)
}
