//! Styled fragment creation.

use super::{Fragment, FragmentStyle};
use crate::constants::{
    FRAGMENT_FONT_SIZE, FRAGMENT_PADDING, FRAGMENT_PALETTE, MAX_FRAGMENT_ROTATION,
};
use rand::Rng;
use uuid::Builder;

/// Creates a fragment with a random palette colour and a slight tilt.
///
/// The id is a v4 UUID drawn from `rng`, so a seeded generator reproduces
/// the same fragment.
pub fn create_fragment<R: Rng>(text: &str, rng: &mut R) -> Fragment {
    let (background, foreground) = FRAGMENT_PALETTE[rng.gen_range(0..FRAGMENT_PALETTE.len())];
    let rotation = rng.gen_range(-MAX_FRAGMENT_ROTATION..MAX_FRAGMENT_ROTATION);
    let id = Builder::from_random_bytes(rng.gen()).into_uuid();

    Fragment {
        id: id.to_string(),
        text: text.to_string(),
        style: FragmentStyle {
            background_color: background.to_string(),
            text_color: foreground.to_string(),
            rotation,
            font_size: FRAGMENT_FONT_SIZE.to_string(),
            padding: FRAGMENT_PADDING.to_string(),
        },
    }
}

/// Creates one fragment per phrase, preserving order.
pub fn create_fragments<R: Rng>(phrases: &[String], rng: &mut R) -> Vec<Fragment> {
    phrases
        .iter()
        .map(|phrase| create_fragment(phrase, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_fragment_style_within_bounds() {
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..200 {
            let fragment = create_fragment("晚风", &mut rng);
            assert_eq!(fragment.text, "晚风");
            assert!(fragment.style.rotation >= -MAX_FRAGMENT_ROTATION);
            assert!(fragment.style.rotation < MAX_FRAGMENT_ROTATION);
            assert!(FRAGMENT_PALETTE.iter().any(|(bg, fg)| {
                *bg == fragment.style.background_color && *fg == fragment.style.text_color
            }));
            assert_eq!(fragment.style.font_size, "1rem");
            assert_eq!(fragment.style.padding, "4px 8px");
        }
    }

    #[test]
    fn test_fragment_ids_are_unique() {
        let mut rng = StdRng::seed_from_u64(5);
        let phrases: Vec<String> = (0..100).map(|i| format!("片段{}", i)).collect();

        let fragments = create_fragments(&phrases, &mut rng);

        let ids: HashSet<_> = fragments.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_seeded_creation_is_reproducible() {
        let a = create_fragment("旧书", &mut StdRng::seed_from_u64(42));
        let b = create_fragment("旧书", &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
