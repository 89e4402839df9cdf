use crate::grid::DEFAULT_BUCKET_COUNT;

use serde::{Deserialize, Serialize};

/// Construction parameters for a [`VoxelWorld`](crate::VoxelWorld).
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct WorldConfig {
    /// Buckets in the chunk hash grid. Zero falls back to the default.
    pub bucket_count: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
        }
    }
}
