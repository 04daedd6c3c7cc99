//! Greedy diverse selection: repeatedly take the candidate farthest from the
//! centroid of the labeled set plus everything picked so far.

use medal_core::errors::SelectionError;

use crate::centroid::Centroid;

/// Euclidean distance between a centroid and an embedding of equal length.
pub fn euclidean_distance(centroid: &[f64], embedding: &[f32]) -> f64 {
    centroid
        .iter()
        .zip(embedding)
        .map(|(&c, &e)| {
            let d = c - e as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Pick `n` positions into `candidates`, in selection order.
///
/// When there are at most `n` candidates every position is returned and no
/// distances are computed. Otherwise the labeled centroid stays fixed for the
/// call and is blended with the running sum of picked embeddings before each
/// pick. Ties go to the lowest position.
pub fn select_diverse(
    labeled: &[&[f32]],
    candidates: &[&[f32]],
    n: usize,
) -> Result<Vec<usize>, SelectionError> {
    if candidates.len() <= n {
        return Ok((0..candidates.len()).collect());
    }

    let base = Centroid::from_embeddings(labeled)?;
    let dim = base.dim();
    if let Some(bad) = candidates.iter().find(|c| c.len() != dim) {
        return Err(SelectionError::DimensionMismatch {
            expected: dim,
            actual: bad.len(),
        });
    }

    let mut taken = vec![false; candidates.len()];
    let mut picked_sum = vec![0.0f64; dim];
    let mut picks = Vec::with_capacity(n);

    for _ in 0..n {
        let centroid = base.merged_with(&picked_sum, picks.len());
        let mut best: Option<(usize, f64)> = None;
        for (position, candidate) in candidates.iter().enumerate() {
            if taken[position] {
                continue;
            }
            let distance = euclidean_distance(centroid.vector(), candidate);
            if best.map_or(true, |(_, farthest)| farther(distance, farthest)) {
                best = Some((position, distance));
            }
        }
        let Some((position, _)) = best else { break };

        taken[position] = true;
        for (s, &v) in picked_sum.iter_mut().zip(candidates[position].iter()) {
            *s += v as f64;
        }
        picks.push(position);
    }

    if picks.len() < n {
        return Err(SelectionError::ShortSelection {
            requested: n,
            picked: picks.len(),
        });
    }
    Ok(picks)
}

/// Strictly farther, with NaN ranked below every real distance.
fn farther(distance: f64, best: f64) -> bool {
    match (distance.is_nan(), best.is_nan()) {
        (false, true) => true,
        (true, _) => false,
        (false, false) => distance > best,
    }
}
