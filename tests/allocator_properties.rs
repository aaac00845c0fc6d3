use mosaic::collage::{
    allocate_lines, create_fragment, Fragment, Layout, RandomShuffle, Shuffle,
};
use mosaic::constants::SOFT_LINE_CAP;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const PHRASES: &[&str] = &[
    "晚风", "旧书", "雨", "街角的灯", "我在窗边", "你说", "她笑了", "纸船", "一盏灯火", "猫",
    "咱们", "落叶", "远处的钟声", "它", "月光", "路口",
];

fn fragments(texts: &[String], seed: u64) -> Vec<Fragment> {
    let mut rng = StdRng::seed_from_u64(seed);
    texts.iter().map(|t| create_fragment(t, &mut rng)).collect()
}

fn sorted_ids<'a>(fragments: impl Iterator<Item = &'a Fragment>) -> Vec<String> {
    let mut ids: Vec<String> = fragments.map(|f| f.id.clone()).collect();
    ids.sort();
    ids
}

fn allocate_seeded(fragments: Vec<Fragment>, lines: usize, seed: u64) -> Layout {
    allocate_lines(
        fragments,
        lines,
        RandomShuffle::from_rng(StdRng::seed_from_u64(seed)),
    )
}

/// Replays one fixed permutation per call, cycling through a list.
struct Scripted {
    orders: Vec<Vec<usize>>,
    next: usize,
}

impl Shuffle for Scripted {
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        let order = self.orders[self.next % self.orders.len()].clone();
        self.next += 1;
        assert_eq!(order.len(), len);
        order
    }
}

proptest! {
    #[test]
    fn prop_every_fragment_placed_exactly_once(
        texts in prop::collection::vec(prop::sample::select(PHRASES).prop_map(String::from), 0..40),
        line_count in 1usize..10,
        seed in any::<u64>(),
    ) {
        let input = fragments(&texts, seed);
        let expected = sorted_ids(input.iter());

        let layout = allocate_seeded(input, line_count, seed);

        prop_assert_eq!(sorted_ids(layout.fragments()), expected);
        prop_assert_eq!(layout.fragment_count(), texts.len());
    }

    #[test]
    fn prop_exact_line_count(
        count in 0usize..30,
        line_count in 1usize..12,
        seed in any::<u64>(),
    ) {
        let texts: Vec<String> = (0..count)
            .map(|i| PHRASES[i % PHRASES.len()].to_string())
            .collect();

        let layout = allocate_seeded(fragments(&texts, seed), line_count, seed);

        prop_assert_eq!(layout.line_count(), line_count);
        if count < line_count {
            let empty = layout.lines().iter().filter(|l| l.is_empty()).count();
            prop_assert_eq!(empty, line_count - count);
        }
    }

    #[test]
    fn prop_fixed_permutations_are_reproducible(
        count in 0usize..25,
        seed in any::<u64>(),
    ) {
        let texts: Vec<String> = (0..count)
            .map(|i| PHRASES[(i * 7) % PHRASES.len()].to_string())
            .collect();
        let orders = vec![vec![2, 0, 3, 1], vec![1, 3, 0, 2], vec![3, 2, 1, 0]];

        let run = || {
            let shuffle = Scripted { orders: orders.clone(), next: 0 };
            allocate_lines(fragments(&texts, seed), 4, shuffle)
        };

        prop_assert_eq!(run(), run());
    }
}

#[test]
fn soft_cap_holds_for_short_fragments() {
    let mut lines_checked = 0usize;
    let mut lines_under_cap = 0usize;

    for seed in 0..500u64 {
        let line_count = 2 + (seed as usize % 7);
        let fragment_count = 2 * line_count + (seed as usize % (line_count + 1));
        let texts: Vec<String> = (0..fragment_count)
            .map(|i| "字".repeat(1 + (i + seed as usize) % 3))
            .collect();

        let layout = allocate_seeded(fragments(&texts, seed), line_count, seed);

        for line in layout.lines().iter().filter(|l| !l.is_empty()) {
            lines_checked += 1;
            if line.char_len() < SOFT_LINE_CAP {
                lines_under_cap += 1;
            }
        }
    }

    let ratio = lines_under_cap as f64 / lines_checked as f64;
    assert!(ratio >= 0.95, "only {:.3} of lines under the cap", ratio);
}

#[test]
fn single_subject_conflict_is_separated() {
    let neutral = ["晚风", "旧书", "雨后", "街角", "灯火", "纸船", "落叶", "月光"];
    let mut separated = 0;
    let trials = 1000u64;

    for seed in 0..trials {
        // Four seeds, the first 我 fragment, more neutral text, then the
        // conflicting one.
        let mut texts: Vec<String> = neutral[..4].iter().map(|s| s.to_string()).collect();
        texts.push("我在窗边".to_string());
        texts.extend(neutral[4..].iter().map(|s| s.to_string()));
        texts.push("我睡了".to_string());

        let layout = allocate_seeded(fragments(&texts, seed), 4, seed);

        let lines_with_marker = layout
            .lines()
            .iter()
            .filter(|line| line.texts().any(|t| t.contains('我')))
            .count();
        if lines_with_marker == 2 {
            separated += 1;
        }
    }

    assert!(
        separated as f64 / trials as f64 > 0.99,
        "separated in {} of {} trials",
        separated,
        trials
    );
}

#[test]
fn concrete_ten_fragment_scenario() {
    let lengths = [2, 2, 2, 2, 3, 3, 4, 4, 5, 6];
    let texts: Vec<String> = lengths.iter().map(|&n| "字".repeat(n)).collect();

    for seed in 0..200u64 {
        let input = fragments(&texts, seed);
        let expected = sorted_ids(input.iter());

        let layout = allocate_seeded(input, 4, seed);

        assert_eq!(layout.line_count(), 4);
        assert_eq!(sorted_ids(layout.fragments()), expected);
        assert!(layout.lines().iter().all(|line| !line.is_empty()));
    }
}

#[test]
fn concrete_scenario_in_identity_order() {
    let lengths = [2, 2, 2, 2, 3, 3, 4, 4, 5, 6];
    let texts: Vec<String> = lengths.iter().map(|&n| "字".repeat(n)).collect();
    let shuffle = Scripted {
        orders: vec![vec![0, 1, 2, 3]],
        next: 0,
    };

    let layout = allocate_lines(fragments(&texts, 3), 4, shuffle);

    let line_lengths: Vec<Vec<usize>> = layout
        .lines()
        .iter()
        .map(|line| line.fragments().iter().map(|f| f.char_len()).collect())
        .collect();
    assert_eq!(
        line_lengths,
        vec![vec![2, 3, 3], vec![2, 4, 4], vec![2, 5], vec![2, 6]]
    );
    assert!(layout
        .lines()
        .iter()
        .all(|line| line.char_len() < SOFT_LINE_CAP));
}
