//! Manual composition from a poem's phrase pool.

use crate::collage::{CollagePoem, ManualComposer};
use crate::errors::{AppError, AppResult};
use rand::Rng;
use tracing::info;

/// Parses one line of pool indices, e.g. `"0 2 5"` or `"0,2,5"`.
pub fn parse_line_indices(input: &str) -> AppResult<Vec<usize>> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<usize>().map_err(|_| {
                AppError::Collage(format!("'{}' is not a pool index", token))
            })
        })
        .collect()
}

/// Builds a manual layout from `lines` of pool indices and returns a new poem
/// carrying it.
///
/// Each inner list becomes one line, in order. Empty lists are dropped. The
/// returned poem gets a fresh id so it is stored alongside the original.
///
/// # Errors
///
/// Returns `AppError::Collage` for an out-of-range index or when every line
/// is empty.
pub fn compose_manual<R: Rng>(
    poem: &CollagePoem,
    lines: &[Vec<usize>],
    rng: &mut R,
) -> AppResult<CollagePoem> {
    let mut composer = ManualComposer::new(poem.raw_pool.clone());
    for (position, indices) in lines.iter().enumerate() {
        if position > 0 {
            composer.add_line();
        }
        for &index in indices {
            composer.push(index)?;
        }
    }

    let layout = composer.finish(rng);
    if layout.fragment_count() == 0 {
        return Err(AppError::Collage(
            "Manual layout is empty; pick at least one phrase".to_string(),
        ));
    }

    let mut composed = poem.with_manual(layout);
    composed.id = uuid::Builder::from_random_bytes(rng.gen())
        .into_uuid()
        .to_string();

    info!(
        "Composed manual layout with {} lines from collage {}",
        composed.manual.as_ref().map_or(0, |l| l.line_count()),
        poem.id
    );
    Ok(composed)
}
