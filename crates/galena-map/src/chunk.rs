//! The fundamental unit of voxel storage.

use crate::key::MortonKey;
use crate::layer::BitVoxelLayer;
use crate::voxel_index::VoxelIndex;

/// Voxels per chunk.
pub const CHUNK_VOXELS: usize = 64;
/// Voxels along one chunk axis.
pub const CHUNK_DIM_VOXELS: u32 = 4;
/// Bitvoxels along one chunk axis, the chunk's logical extent.
pub const CHUNK_DIM_BITVOXELS: u32 = 16;

/// Width of the per-voxel metadata slots of a chunk.
///
/// The four widths form the whole family; the zero-width variant accepts
/// metadata writes and always reads back 0.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MetaWidth {
    #[default]
    Zero,
    Eight,
    Sixteen,
    ThirtyTwo,
}

/// Per-voxel metadata storage, one slot per voxel at the chunk's width.
///
/// Kept private so the backing representation can't be depended on; all
/// access widens to / truncates from `u32`.
#[derive(Clone, Debug)]
enum MetaBuffer {
    None,
    U8(Box<[u8; CHUNK_VOXELS]>),
    U16(Box<[u16; CHUNK_VOXELS]>),
    U32(Box<[u32; CHUNK_VOXELS]>),
}

impl MetaBuffer {
    fn new(width: MetaWidth) -> Self {
        match width {
            MetaWidth::Zero => Self::None,
            MetaWidth::Eight => Self::U8(Box::new([0; CHUNK_VOXELS])),
            MetaWidth::Sixteen => Self::U16(Box::new([0; CHUNK_VOXELS])),
            MetaWidth::ThirtyTwo => Self::U32(Box::new([0; CHUNK_VOXELS])),
        }
    }

    fn width(&self) -> MetaWidth {
        match self {
            Self::None => MetaWidth::Zero,
            Self::U8(_) => MetaWidth::Eight,
            Self::U16(_) => MetaWidth::Sixteen,
            Self::U32(_) => MetaWidth::ThirtyTwo,
        }
    }

    fn get(&self, slot: usize) -> u32 {
        match self {
            Self::None => 0,
            Self::U8(slots) => slots[slot] as u32,
            Self::U16(slots) => slots[slot] as u32,
            Self::U32(slots) => slots[slot],
        }
    }

    fn set(&mut self, slot: usize, value: u32) {
        match self {
            Self::None => {}
            Self::U8(slots) => slots[slot] = value as u8,
            Self::U16(slots) => slots[slot] = value as u16,
            Self::U32(slots) => slots[slot] = value,
        }
    }
}

/// One chunk of the world: a [`BitVoxelLayer`], the [`MortonKey`] naming the
/// chunk's position, and one metadata slot per voxel.
///
/// Metadata is addressed by the voxel part of a [`VoxelIndex`]; all 64
/// bitvoxels inside a voxel share the slot. Writes are truncated to the
/// chunk's [`MetaWidth`].
///
/// Chunks compare equal by key alone, matching their identity in the world's
/// hash grid.
#[derive(Clone, Debug)]
pub struct VoxelChunk {
    key: MortonKey,
    layer: BitVoxelLayer,
    meta: MetaBuffer,
}

impl VoxelChunk {
    /// A chunk with no metadata storage.
    pub fn new(key: MortonKey) -> Self {
        Self::with_meta(key, MetaWidth::Zero)
    }

    pub fn with_meta(key: MortonKey, width: MetaWidth) -> Self {
        Self {
            key,
            layer: BitVoxelLayer::new(),
            meta: MetaBuffer::new(width),
        }
    }

    #[inline]
    pub fn key(&self) -> MortonKey {
        self.key
    }

    #[inline]
    pub fn meta_width(&self) -> MetaWidth {
        self.meta.width()
    }

    #[inline]
    pub fn get_bitvoxel(&self, index: VoxelIndex) -> bool {
        self.layer.get(index)
    }

    #[inline]
    pub fn set_bitvoxel(&mut self, index: VoxelIndex) {
        self.layer.set(index);
    }

    #[inline]
    pub fn unset_bitvoxel(&mut self, index: VoxelIndex) {
        self.layer.unset(index);
    }

    #[inline]
    pub fn toggle_bitvoxel(&mut self, index: VoxelIndex) {
        self.layer.toggle(index);
    }

    /// Sets all 64 bitvoxels of one voxel.
    #[inline]
    pub fn fill_voxel(&mut self, index: VoxelIndex) {
        self.layer.fill_voxel(index);
    }

    /// Clears all 64 bitvoxels of one voxel.
    #[inline]
    pub fn empty_voxel(&mut self, index: VoxelIndex) {
        self.layer.empty_voxel(index);
    }

    /// Set bitvoxels within one voxel, `0..=64`.
    #[inline]
    pub fn bitvoxel_count(&self, index: VoxelIndex) -> u32 {
        self.layer.voxel_pop_count(index)
    }

    /// Set bitvoxels in the whole chunk, `0..=4096`.
    #[inline]
    pub fn pop_count(&self) -> u32 {
        self.layer.pop_count()
    }

    /// The metadata slot of the voxel addressed by `index`, widened to
    /// `u32`. Zero-width chunks always return 0.
    #[inline]
    pub fn meta(&self, index: VoxelIndex) -> u32 {
        self.meta.get(index.voxel_key() as usize)
    }

    /// Writes the metadata slot of the voxel addressed by `index`,
    /// truncating `value` to the chunk's width. Zero-width chunks accept and
    /// ignore the write.
    #[inline]
    pub fn set_meta(&mut self, index: VoxelIndex, value: u32) {
        self.meta.set(index.voxel_key() as usize, value);
    }
}

impl PartialEq for VoxelChunk {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for VoxelChunk {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::key::SpatialKey;

    #[test]
    fn bitvoxel_state_round_trip() {
        let mut chunk = VoxelChunk::new(MortonKey::from_xyz(0, 0, 0));
        let i = VoxelIndex::new(1, 1, 1, 1, 1, 1);

        chunk.set_bitvoxel(i);
        assert!(chunk.get_bitvoxel(i));
        assert_eq!(chunk.pop_count(), 1);
        assert_eq!(chunk.bitvoxel_count(i), 1);

        chunk.toggle_bitvoxel(i);
        assert!(!chunk.get_bitvoxel(i));

        chunk.fill_voxel(i);
        assert_eq!(chunk.bitvoxel_count(i), 64);
        chunk.empty_voxel(i);
        assert_eq!(chunk.pop_count(), 0);
    }

    #[test]
    fn zero_width_meta_reads_zero() {
        let mut chunk = VoxelChunk::new(MortonKey::from_xyz(1, 2, 3));
        let i = VoxelIndex::new(0, 0, 0, 0, 0, 0);
        assert_eq!(chunk.meta_width(), MetaWidth::Zero);
        chunk.set_meta(i, 0xFFFF_FFFF);
        assert_eq!(chunk.meta(i), 0);
    }

    #[test]
    fn meta_truncates_to_width() {
        let key = MortonKey::from_xyz(0, 0, 0);
        let i = VoxelIndex::new(2, 0, 1, 0, 0, 0);

        let mut c8 = VoxelChunk::with_meta(key, MetaWidth::Eight);
        c8.set_meta(i, 0x1234_56AB);
        assert_eq!(c8.meta(i), 0xAB);

        let mut c16 = VoxelChunk::with_meta(key, MetaWidth::Sixteen);
        c16.set_meta(i, 0x1234_56AB);
        assert_eq!(c16.meta(i), 0x56AB);

        let mut c32 = VoxelChunk::with_meta(key, MetaWidth::ThirtyTwo);
        c32.set_meta(i, 0x1234_56AB);
        assert_eq!(c32.meta(i), 0x1234_56AB);
    }

    #[test]
    fn meta_is_shared_per_voxel() {
        let mut chunk = VoxelChunk::with_meta(MortonKey::from_xyz(0, 0, 0), MetaWidth::Eight);
        // Two indices in the same voxel, different bitvoxels.
        let a = VoxelIndex::new(1, 2, 3, 0, 0, 0);
        let b = VoxelIndex::new(1, 2, 3, 3, 3, 3);
        chunk.set_meta(a, 7);
        assert_eq!(chunk.meta(b), 7);
        // A different voxel has its own slot.
        assert_eq!(chunk.meta(VoxelIndex::new(1, 2, 2, 0, 0, 0)), 0);
    }

    #[test]
    fn chunks_compare_by_key() {
        let mut a = VoxelChunk::new(MortonKey::from_xyz(1, 1, 1));
        let b = VoxelChunk::new(MortonKey::from_xyz(1, 1, 1));
        let c = VoxelChunk::new(MortonKey::from_xyz(2, 1, 1));

        a.set_bitvoxel(VoxelIndex::new(0, 0, 0, 0, 0, 0));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
