//! Face visibility for chunk meshing.
//!
//! For every set bitvoxel of a chunk, the solver records which of its six
//! faces are exposed — not occluded by the bitvoxel one step away in that
//! direction. Neighbor probes cross voxel boundaries within the chunk and
//! chunk boundaries into the six Morton-adjacent chunks; a neighbor chunk
//! that is not resident in the world reads as empty, so faces on the edge of
//! loaded space are rendered rather than held back until the neighbor loads.

use crate::chunk::VoxelChunk;
use crate::key::SpatialKey;
use crate::layer::CHUNK_BITVOXELS;
use crate::voxel_index::VoxelIndex;
use crate::world::VoxelWorld;

pub const FACE_POS_X: u8 = 1 << 0;
pub const FACE_NEG_X: u8 = 1 << 1;
pub const FACE_POS_Y: u8 = 1 << 2;
pub const FACE_NEG_Y: u8 = 1 << 3;
pub const FACE_POS_Z: u8 = 1 << 4;
pub const FACE_NEG_Z: u8 = 1 << 5;
pub const ALL_FACES: u8 = 0x3F;

/// Per-bitvoxel face visibility masks for one chunk.
///
/// Entry `i` is the 6-bit mask for the bitvoxel whose
/// [`VoxelIndex::key`] is `i`, using the `FACE_*` bits above. Zero means the
/// bitvoxel is unset or fully occluded; an isolated bitvoxel gets
/// [`ALL_FACES`]. The buffer is reusable across chunks —
/// [`compute`](Self::compute) resets it first.
pub struct FaceMasks {
    masks: Box<[u8; CHUNK_BITVOXELS]>,
}

impl FaceMasks {
    pub fn new() -> Self {
        Self {
            masks: Box::new([0; CHUNK_BITVOXELS]),
        }
    }

    #[inline]
    pub fn get(&self, key: u16) -> u8 {
        self.masks[key as usize]
    }

    #[inline]
    pub fn masks(&self) -> &[u8; CHUNK_BITVOXELS] {
        &self.masks
    }

    /// Total visible faces across the buffer.
    pub fn pop_count(&self) -> u32 {
        self.masks.iter().map(|m| m.count_ones()).sum()
    }

    pub fn reset(&mut self) {
        self.masks.fill(0);
    }

    /// Solves face visibility for `chunk` against `world`.
    ///
    /// The world is read immutably; rerunning on an unchanged world yields
    /// identical output. Work is O(4096) per chunk regardless of how sparse
    /// the chunk is.
    pub fn compute(&mut self, world: &VoxelWorld, chunk: &VoxelChunk) {
        self.reset();
        if chunk.pop_count() == 0 {
            return;
        }

        let key = chunk.key();
        log::debug!("Computing face masks for chunk {:?}", key);

        // Opposite neighbor chunks per direction, in FACE_* bit order.
        let neighbors = [
            world.get(key.inc_x()),
            world.get(key.dec_x()),
            world.get(key.inc_y()),
            world.get(key.dec_y()),
            world.get(key.inc_z()),
            world.get(key.dec_z()),
        ];

        for i in 0..CHUNK_BITVOXELS as u16 {
            let index = VoxelIndex::from_key(i);
            if !chunk.get_bitvoxel(index) {
                continue;
            }

            let mut mask = 0u8;
            for face in 0..6 {
                let (neighbor_index, crossed) = offset_index(index, face);
                let occluded = if crossed {
                    // Absent neighbor chunks read as empty.
                    neighbors[face].map_or(false, |c| c.get_bitvoxel(neighbor_index))
                } else {
                    chunk.get_bitvoxel(neighbor_index)
                };
                mask |= (!occluded as u8) << face;
            }
            self.masks[i as usize] = mask;
        }
    }
}

impl Default for FaceMasks {
    fn default() -> Self {
        Self::new()
    }
}

/// Advances one (voxel, bitvoxel) axis pair a single step, wrapping the
/// bitvoxel coordinate into the voxel coordinate. Returns the stepped pair
/// and whether the chunk boundary was crossed (in which case both wrapped).
#[inline]
fn step_axis(v: u32, b: u32, positive: bool) -> (u32, u32, bool) {
    if positive {
        if b < 3 {
            (v, b + 1, false)
        } else if v < 3 {
            (v + 1, 0, false)
        } else {
            (0, 0, true)
        }
    } else if b > 0 {
        (v, b - 1, false)
    } else if v > 0 {
        (v - 1, 3, false)
    } else {
        (3, 3, true)
    }
}

/// The index of the bitvoxel one step along `face` (in `FACE_*` bit order),
/// plus whether that step crossed into the adjacent chunk.
#[inline]
fn offset_index(index: VoxelIndex, face: usize) -> (VoxelIndex, bool) {
    let positive = face & 1 == 0;
    match face >> 1 {
        0 => {
            let (v, b, crossed) = step_axis(index.vx(), index.bx(), positive);
            (
                VoxelIndex::new(v, index.vy(), index.vz(), b, index.by(), index.bz()),
                crossed,
            )
        }
        1 => {
            let (v, b, crossed) = step_axis(index.vy(), index.by(), positive);
            (
                VoxelIndex::new(index.vx(), v, index.vz(), index.bx(), b, index.bz()),
                crossed,
            )
        }
        _ => {
            let (v, b, crossed) = step_axis(index.vz(), index.bz(), positive);
            (
                VoxelIndex::new(index.vx(), index.vy(), v, index.bx(), index.by(), b),
                crossed,
            )
        }
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;
    use crate::key::MortonKey;

    fn world_with_chunk(key: MortonKey) -> VoxelWorld {
        let mut world = VoxelWorld::new();
        world.insert(VoxelChunk::new(key));
        world
    }

    #[test]
    fn stepping_wraps_bitvoxel_into_voxel_into_chunk() {
        // +x within the voxel.
        let (i, crossed) = offset_index(VoxelIndex::new(1, 1, 1, 0, 0, 0), 0);
        assert!(!crossed);
        assert_eq!(i, VoxelIndex::new(1, 1, 1, 1, 0, 0));

        // +x across the voxel boundary.
        let (i, crossed) = offset_index(VoxelIndex::new(1, 1, 1, 3, 0, 0), 0);
        assert!(!crossed);
        assert_eq!(i, VoxelIndex::new(2, 1, 1, 0, 0, 0));

        // +x across the chunk boundary.
        let (i, crossed) = offset_index(VoxelIndex::new(3, 1, 1, 3, 0, 0), 0);
        assert!(crossed);
        assert_eq!(i, VoxelIndex::new(0, 1, 1, 0, 0, 0));

        // -z across the chunk boundary.
        let (i, crossed) = offset_index(VoxelIndex::new(1, 1, 0, 0, 0, 0), 5);
        assert!(crossed);
        assert_eq!(i, VoxelIndex::new(1, 1, 3, 0, 0, 3));
    }

    #[test]
    fn empty_chunk_yields_empty_masks() {
        let key = MortonKey::from_xyz(0, 0, 0);
        let world = world_with_chunk(key);
        let mut masks = FaceMasks::new();
        masks.compute(&world, world.get(key).unwrap());
        assert_eq!(masks.pop_count(), 0);
    }

    #[test]
    fn isolated_bitvoxel_shows_all_faces() {
        let key = MortonKey::from_xyz(0, 0, 0);
        let target = VoxelIndex::new(1, 1, 1, 1, 1, 1);

        let mut world = VoxelWorld::new();
        let mut chunk = VoxelChunk::new(key);
        chunk.set_bitvoxel(target);
        world.insert(chunk);

        let mut masks = FaceMasks::new();
        masks.compute(&world, world.get(key).unwrap());

        assert_eq!(masks.get(target.key()), ALL_FACES);
        assert_eq!(masks.pop_count(), 6);
        for k in 0..CHUNK_BITVOXELS as u16 {
            if k != target.key() {
                assert_eq!(masks.get(k), 0);
            }
        }
    }

    #[test]
    fn surrounded_bitvoxel_is_fully_occluded() {
        let key = MortonKey::from_xyz(1, 1, 1);
        let center = VoxelIndex::new(1, 1, 1, 1, 1, 1);

        let mut world = VoxelWorld::new();
        let mut chunk = VoxelChunk::new(key);
        chunk.set_bitvoxel(center);
        for face in 0..6 {
            let (i, crossed) = offset_index(center, face);
            assert!(!crossed);
            chunk.set_bitvoxel(i);
        }
        world.insert(chunk);

        let mut masks = FaceMasks::new();
        masks.compute(&world, world.get(key).unwrap());

        // The center renders nothing; each arm of the star loses exactly the
        // face pointing back at the center.
        assert_eq!(masks.get(center.key()), 0);
        for face in 0..6 {
            let (i, _) = offset_index(center, face);
            assert_eq!(masks.get(i.key()).count_ones(), 5, "face {}", face);
        }
        assert_eq!(masks.pop_count(), 30);
    }

    #[test]
    fn chunk_corner_with_absent_neighbors_shows_all_faces() {
        let key = MortonKey::from_xyz(0, 0, 0);
        let corner = VoxelIndex::new(0, 0, 0, 0, 0, 0);

        let mut world = VoxelWorld::new();
        let mut chunk = VoxelChunk::new(key);
        chunk.set_bitvoxel(corner);
        world.insert(chunk);

        let mut masks = FaceMasks::new();
        masks.compute(&world, world.get(key).unwrap());
        assert_eq!(masks.get(corner.key()), ALL_FACES);
    }

    #[test]
    fn occlusion_reaches_across_the_chunk_boundary() {
        let key = MortonKey::from_xyz(4, 4, 4);
        // Last bitvoxel on the +x edge of the chunk.
        let edge = VoxelIndex::new(3, 1, 1, 3, 1, 1);
        // First bitvoxel on the -x edge of the +x neighbor.
        let facing = VoxelIndex::new(0, 1, 1, 0, 1, 1);

        let mut world = VoxelWorld::new();
        let mut chunk = VoxelChunk::new(key);
        chunk.set_bitvoxel(edge);
        world.insert(chunk);
        let mut neighbor = VoxelChunk::new(key.inc_x());
        neighbor.set_bitvoxel(facing);
        world.insert(neighbor);

        let mut masks = FaceMasks::new();
        masks.compute(&world, world.get(key).unwrap());
        assert_eq!(masks.get(edge.key()), ALL_FACES & !FACE_POS_X);

        // And the neighbor's face toward us is occluded too.
        masks.compute(&world, world.get(key.inc_x()).unwrap());
        assert_eq!(masks.get(facing.key()), ALL_FACES & !FACE_NEG_X);
    }

    #[test]
    fn recompute_resets_previous_output() {
        let a = MortonKey::from_xyz(0, 0, 0);
        let b = MortonKey::from_xyz(3, 3, 3);

        let mut world = VoxelWorld::new();
        let mut chunk = VoxelChunk::new(a);
        chunk.set_bitvoxel(VoxelIndex::new(2, 2, 2, 2, 2, 2));
        world.insert(chunk);
        world.insert(VoxelChunk::new(b));

        let mut masks = FaceMasks::new();
        masks.compute(&world, world.get(a).unwrap());
        assert_eq!(masks.pop_count(), 6);
        masks.compute(&world, world.get(b).unwrap());
        assert_eq!(masks.pop_count(), 0);
    }
}
