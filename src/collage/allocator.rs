//! Fragment line allocation.
//!
//! Distributes fragments across a fixed number of lines, preferring lines
//! shorter than [`SOFT_LINE_CAP`] characters and lines that do not repeat a
//! subject marker. Both preferences are soft: every fragment is always placed.
//!
//! Placement is greedy first-fit over a freshly shuffled line order for each
//! fragment, with three tiers:
//!
//! 1. fits under the cap and shares no subject marker
//! 2. fits under the cap
//! 3. the line holding the fewest fragments
//!
//! Randomness comes from a [`Shuffle`], so tests can substitute a fixed
//! permutation and get a fully reproducible layout.

use super::{Fragment, Layout, Line};
use crate::constants::SOFT_LINE_CAP;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

/// Source of line-order permutations.
pub trait Shuffle {
    /// Returns a permutation of `0..len`.
    fn permutation(&mut self, len: usize) -> Vec<usize>;
}

/// Uniform random permutations drawn from any [`Rng`].
///
/// # Examples
///
/// ```
/// use mosaic::collage::{RandomShuffle, Shuffle};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut shuffle = RandomShuffle::from_rng(StdRng::seed_from_u64(7));
/// let mut order = shuffle.permutation(4);
/// order.sort_unstable();
/// assert_eq!(order, vec![0, 1, 2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct RandomShuffle<R> {
    rng: R,
}

impl RandomShuffle<ThreadRng> {
    /// Shuffles with the thread-local generator.
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for RandomShuffle<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomShuffle<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Shuffle for RandomShuffle<R> {
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(&mut self.rng);
        order
    }
}

impl<S: Shuffle + ?Sized> Shuffle for &mut S {
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        (**self).permutation(len)
    }
}

/// Partitions `fragments` into exactly `line_count` lines.
///
/// The first `line_count` fragments seed one line each in shuffled order.
/// Every later fragment, taken in input order, is appended to the first line
/// of a new shuffled order that passes the strongest tier it can (see the
/// module docs). Lines stay empty when there are fewer fragments than lines.
///
/// A `line_count` of zero yields an empty layout; callers are expected to
/// ask for at least one line.
///
/// # Examples
///
/// ```
/// use mosaic::collage::{allocate_lines, create_fragment, RandomShuffle};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(3);
/// let fragments: Vec<_> = ["晚风", "一盏灯", "旧书", "雨后", "街角", "猫"]
///     .iter()
///     .map(|text| create_fragment(text, &mut rng))
///     .collect();
///
/// let layout = allocate_lines(fragments, 4, &mut RandomShuffle::from_rng(rng));
/// assert_eq!(layout.line_count(), 4);
/// assert_eq!(layout.fragment_count(), 6);
/// ```
pub fn allocate_lines(
    fragments: Vec<Fragment>,
    line_count: usize,
    mut shuffle: impl Shuffle,
) -> Layout {
    let mut lines = vec![Line::new(); line_count];
    if line_count == 0 {
        return Layout::from(lines);
    }

    let mut remaining = fragments.into_iter();

    let seed_order = shuffle.permutation(line_count);
    for (&index, fragment) in seed_order.iter().zip(remaining.by_ref()) {
        lines[index].push(fragment);
    }

    for fragment in remaining {
        let order = shuffle.permutation(line_count);
        let index = choose_line(&lines, &order, &fragment);
        trace!(
            fragment = %fragment.text,
            line = index,
            "placed fragment"
        );
        lines[index].push(fragment);
    }

    Layout::from(lines)
}

fn choose_line(lines: &[Line], order: &[usize], fragment: &Fragment) -> usize {
    let len = fragment.char_len();
    let fits = |index: usize| lines[index].char_len() + len < SOFT_LINE_CAP;

    order
        .iter()
        .copied()
        .find(|&index| fits(index) && !lines[index].shares_subject_with(&fragment.text))
        .or_else(|| order.iter().copied().find(|&index| fits(index)))
        .or_else(|| {
            // min_by_key keeps the first of equal minima, i.e. permutation order.
            order.iter().copied().min_by_key(|&index| lines[index].len())
        })
        .unwrap_or(0)
}
