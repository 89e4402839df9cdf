//! The galena voxel data model.
//!
//! # Bitvoxels
//!
//! A world is a sparse grid of chunks. Each chunk holds 64 voxels in a 4×4×4
//! arrangement, and each voxel is subdivided into 64 *bitvoxels*, also 4×4×4,
//! for 4096 bitvoxels per chunk in a 16×16×16 logical volume. A bitvoxel is a
//! single bit of on/off state in the chunk's [`BitVoxelLayer`]; a voxel
//! additionally carries one metadata slot of 0, 8, 16, or 32 bits shared by
//! all of its bitvoxels.
//!
//! # Spatial keys
//!
//! Chunks are identified by 30-bit spatial keys, 10 bits per axis, wrapping
//! modulo 1024. [`MortonKey`] interleaves the axes in Z-order, which scatters
//! spatially adjacent chunks across the buckets of the [`HashGrid`];
//! [`LinearKey`] is the plain packed form, cheaper to encode. The
//! [`VoxelWorld`] maps Morton keys to chunks.
//!
//! # Deriving geometry
//!
//! [`FaceMasks::compute`] derives a 6-bit face visibility mask for every set
//! bitvoxel of a chunk by probing the six neighboring bitvoxels, reading
//! across voxel and chunk boundaries through the world; absent neighbor
//! chunks read as empty so that world-edge faces render. The masks expand
//! into a renderer-ready triangle index buffer through
//! [`expand_indices`] and renderer-supplied lookup tables ([`GeometryLut`]).
//! [`Raycaster`] walks world-space segments one bitvoxel cell at a time and
//! reports the first set bitvoxel.

mod chunk;
mod config;
mod face_geometry;
mod geometry;
mod grid;
mod key;
mod layer;
mod raycast;
mod voxel_index;
mod world;
mod world_index;

pub use chunk::*;
pub use config::*;
pub use face_geometry::*;
pub use geometry::*;
pub use grid::*;
pub use key::*;
pub use layer::*;
pub use raycast::*;
pub use voxel_index::*;
pub use world::*;
pub use world_index::*;

pub use galena_core as core;
