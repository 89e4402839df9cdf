//! Resolving world coordinates to chunk and voxel addresses.

use crate::core::glam::{IVec3, Vec3A};
use crate::key::{MortonKey, SpatialKey};
use crate::voxel_index::VoxelIndex;

/// A world coordinate resolved into a chunk key plus the [`VoxelIndex`]
/// inside that chunk.
///
/// World coordinates are in bitvoxel units: a chunk spans 16 bitvoxels per
/// axis, each voxel 4, so the decomposition is pure shifts and masks. The
/// arithmetic shift floors negative coordinates, whose chunk coordinate then
/// wraps through the key constructor like any other out-of-range component.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WorldIndex {
    pub chunk: MortonKey,
    pub voxel: VoxelIndex,
}

impl WorldIndex {
    /// Decomposes integer world coordinates.
    pub fn from_ivec3(p: IVec3) -> Self {
        let chunk = MortonKey::from_world_coords(p);
        let voxel = VoxelIndex::new(
            ((p.x & 15) >> 2) as u32,
            ((p.y & 15) >> 2) as u32,
            ((p.z & 15) >> 2) as u32,
            (p.x & 3) as u32,
            (p.y & 3) as u32,
            (p.z & 3) as u32,
        );
        Self { chunk, voxel }
    }

    /// Floors float world coordinates onto the bitvoxel grid, then
    /// decomposes.
    pub fn from_point(p: Vec3A) -> Self {
        Self::from_ivec3(IVec3::new(
            p.x.floor() as i32,
            p.y.floor() as i32,
            p.z.floor() as i32,
        ))
    }
}
