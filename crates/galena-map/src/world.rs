//! The sparse chunk world.

use crate::chunk::VoxelChunk;
use crate::config::WorldConfig;
use crate::grid::HashGrid;
use crate::key::MortonKey;
use crate::raycast::Raycaster;
use crate::world_index::WorldIndex;

/// A sparse grid of chunks keyed by [`MortonKey`].
///
/// The world owns its chunks for as long as they are resident; everything
/// else (the face solver, the raycaster) borrows them read-only through the
/// world. Mutation is single-threaded by design — there are no locks here.
#[derive(Clone, Debug, Default)]
pub struct VoxelWorld {
    chunks: HashGrid<MortonKey, VoxelChunk>,
}

impl VoxelWorld {
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            chunks: HashGrid::with_bucket_count(config.bucket_count),
        }
    }

    /// Stores `chunk` under its own key, silently replacing any resident
    /// chunk with that key. The displaced chunk is returned.
    pub fn insert(&mut self, chunk: VoxelChunk) -> Option<VoxelChunk> {
        log::debug!("Inserting chunk {:?}", chunk.key());
        self.chunks.insert(chunk.key(), chunk)
    }

    #[inline]
    pub fn get(&self, key: MortonKey) -> Option<&VoxelChunk> {
        self.chunks.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: MortonKey) -> Option<&mut VoxelChunk> {
        self.chunks.get_mut(key)
    }

    /// Like [`get`](Self::get), but a miss yields the caller's fallback
    /// chunk instead.
    #[inline]
    pub fn get_or<'a>(&'a self, key: MortonKey, default: &'a VoxelChunk) -> &'a VoxelChunk {
        self.chunks.get_or(key, default)
    }

    /// Evicts the chunk under `key`. Removing an absent key returns `false`;
    /// the world is unchanged either way the second time around.
    pub fn remove(&mut self, key: MortonKey) -> bool {
        self.chunks.remove(key).is_some()
    }

    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// State of the bitvoxel at a world index; bitvoxels of non-resident
    /// chunks read as unset.
    #[inline]
    pub fn bitvoxel_at(&self, index: WorldIndex) -> bool {
        self.get(index.chunk)
            .map_or(false, |chunk| chunk.get_bitvoxel(index.voxel))
    }

    /// A raycaster bound to this world. The borrow ties its lifetime to the
    /// world's.
    #[inline]
    pub fn raycaster(&self) -> Raycaster<'_> {
        Raycaster::new(self)
    }
}
