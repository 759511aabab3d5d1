use rand::seq::SliceRandom;
use rand::Rng;

/// Picks up to `count` distinct entries: full shuffle, then truncate.
pub fn sample<T: Clone, R: Rng + ?Sized>(items: &[T], count: usize, rng: &mut R) -> Vec<T> {
    if items.is_empty() {
        return Vec::new();
    }
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count.min(items.len()));
    shuffled
}
