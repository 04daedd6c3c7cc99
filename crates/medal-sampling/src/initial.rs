use rand::seq::index;
use rand::Rng;

/// `n` distinct positions drawn uniformly from `[0, pool_size)`; the whole
/// pool when it has fewer than `n` items.
pub fn pick_initial_positions<R: Rng + ?Sized>(
    pool_size: usize,
    n: usize,
    rng: &mut R,
) -> Vec<usize> {
    index::sample(rng, pool_size, n.min(pool_size)).into_vec()
}
