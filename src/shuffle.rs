//! Display-order shuffling of quiz item options.
//!
//! Pure: the input slice is never mutated and the same seed always produces
//! the same ordering, so callers can shuffle per request while tests pin a
//! seed.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::models::domain::QuizItem;

/// Return a copy of `items` with each item's options reordered and
/// `correct_option` remapped to follow its option.
pub fn shuffle_options(items: &[QuizItem], seed: u64) -> Vec<QuizItem> {
    let mut rng = StdRng::seed_from_u64(seed);

    items
        .iter()
        .map(|item| {
            let mut order: Vec<usize> = (0..item.options.len()).collect();
            order.shuffle(&mut rng);

            let options = order.iter().map(|&i| item.options[i].clone()).collect();
            let correct_option = order
                .iter()
                .position(|&i| i == item.correct_option)
                .unwrap_or(item.correct_option);

            QuizItem {
                stem: item.stem.clone(),
                options,
                correct_option,
                source_snippet: item.source_snippet.clone(),
            }
        })
        .collect()
}
