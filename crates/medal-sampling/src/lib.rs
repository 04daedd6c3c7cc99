//! # medal-sampling
//!
//! The sample-selection core:
//! - `entropy`: binary predictive entropy with probability validation
//! - `tap`: scoped interception of the embedding layer during a forward pass
//! - `extractor`: one streaming pass yielding embeddings, optionally bounded to the top-K by entropy
//! - `centroid` / `diversity`: greedy farthest-from-moving-centroid picking
//! - `initial`: uniform random pick for the first iteration

pub mod centroid;
pub mod diversity;
pub mod entropy;
pub mod extractor;
pub mod initial;
pub mod tap;

pub use centroid::Centroid;
pub use diversity::{euclidean_distance, select_diverse};
pub use entropy::{binary_entropy, checked_entropy};
pub use extractor::{EntropyTopKExtractor, TopK};
pub use initial::pick_initial_positions;
pub use tap::ScopedTap;
