//! 30-bit spatial keys for addressing chunks.
//!
//! Both key kinds pack an `(x, y, z)` triple at 10 bits per axis. Components
//! out of `0..1024` wrap silently, in constructors and in every arithmetic
//! operation, so the key algebra is total: `dec_x` of a key with `x == 0`
//! lands on `x == 1023`, never an error. Callers that need strict bounds
//! check before constructing.
//!
//! [`LinearKey`] is the plain packed form and is slightly cheaper to encode
//! and decode. [`MortonKey`] interleaves the axis bits in Z-order, which
//! spreads spatially adjacent chunks across hash grid buckets far more
//! uniformly; it is the key the [`VoxelWorld`](crate::VoxelWorld) indexes by.

use crate::core::bits;
use crate::core::glam::{IVec3, UVec3};

use std::fmt;

/// Bits per key axis.
pub const AXIS_BITS: u32 = 10;
/// Exclusive upper bound of a key axis; components wrap modulo this.
pub const AXIS_RANGE: u32 = 1 << AXIS_BITS;

const AXIS_MASK: u32 = AXIS_RANGE - 1;

/// Bitvoxels along one chunk axis, as a world-coordinate shift.
const CHUNK_SHIFT: i32 = 4;

/// The capability set shared by [`LinearKey`] and [`MortonKey`].
///
/// Keys are plain values: `Copy`, compared and ordered by their 30-bit
/// scalar form, equal iff their `(x, y, z)` triples are equal.
pub trait SpatialKey: Copy + Eq + Ord {
    /// Builds a key, wrapping each component modulo [`AXIS_RANGE`].
    fn from_xyz(x: u32, y: u32, z: u32) -> Self;

    /// Rebuilds a key from its scalar form.
    fn from_scalar(scalar: u32) -> Self;

    /// The 30-bit scalar form. This is what the hash grid buckets on.
    fn scalar(self) -> u32;

    fn x(self) -> u32;
    fn y(self) -> u32;
    fn z(self) -> u32;

    /// Steps one axis by +1, wrapping at the axis edge.
    fn inc_x(self) -> Self;
    fn inc_y(self) -> Self;
    fn inc_z(self) -> Self;

    /// Steps one axis by -1, wrapping at the axis edge.
    fn dec_x(self) -> Self;
    fn dec_y(self) -> Self;
    fn dec_z(self) -> Self;

    /// Componentwise sum; each axis wraps independently.
    fn wrapping_add(self, other: Self) -> Self;

    /// Componentwise difference; each axis wraps independently.
    fn wrapping_sub(self, other: Self) -> Self;

    #[inline]
    fn xyz(self) -> UVec3 {
        UVec3::new(self.x(), self.y(), self.z())
    }

    /// Key of the chunk containing the world coordinate `p`, in bitvoxel
    /// units. The arithmetic shift floors negative coordinates, which then
    /// wrap through the masked constructor.
    #[inline]
    fn from_world_coords(p: IVec3) -> Self {
        Self::from_xyz(
            (p.x >> CHUNK_SHIFT) as u32,
            (p.y >> CHUNK_SHIFT) as u32,
            (p.z >> CHUNK_SHIFT) as u32,
        )
    }
}

/// A spatial key in plain packed form: `(x << 20) | (y << 10) | z`.
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct LinearKey(u32);

impl SpatialKey for LinearKey {
    #[inline]
    fn from_xyz(x: u32, y: u32, z: u32) -> Self {
        Self(bits::flatten_coord_3(
            x & AXIS_MASK,
            y & AXIS_MASK,
            z & AXIS_MASK,
            AXIS_BITS,
        ))
    }

    #[inline]
    fn from_scalar(scalar: u32) -> Self {
        Self(scalar & bits::mask_for_bits(3 * AXIS_BITS))
    }

    #[inline]
    fn scalar(self) -> u32 {
        self.0
    }

    #[inline]
    fn x(self) -> u32 {
        (self.0 >> 20) & AXIS_MASK
    }

    #[inline]
    fn y(self) -> u32 {
        (self.0 >> 10) & AXIS_MASK
    }

    #[inline]
    fn z(self) -> u32 {
        self.0 & AXIS_MASK
    }

    #[inline]
    fn inc_x(self) -> Self {
        Self::from_xyz(self.x() + 1, self.y(), self.z())
    }

    #[inline]
    fn inc_y(self) -> Self {
        Self::from_xyz(self.x(), self.y() + 1, self.z())
    }

    #[inline]
    fn inc_z(self) -> Self {
        Self::from_xyz(self.x(), self.y(), self.z() + 1)
    }

    #[inline]
    fn dec_x(self) -> Self {
        Self::from_xyz(self.x().wrapping_sub(1), self.y(), self.z())
    }

    #[inline]
    fn dec_y(self) -> Self {
        Self::from_xyz(self.x(), self.y().wrapping_sub(1), self.z())
    }

    #[inline]
    fn dec_z(self) -> Self {
        Self::from_xyz(self.x(), self.y(), self.z().wrapping_sub(1))
    }

    #[inline]
    fn wrapping_add(self, other: Self) -> Self {
        Self::from_xyz(
            self.x() + other.x(),
            self.y() + other.y(),
            self.z() + other.z(),
        )
    }

    #[inline]
    fn wrapping_sub(self, other: Self) -> Self {
        Self::from_xyz(
            self.x().wrapping_sub(other.x()),
            self.y().wrapping_sub(other.y()),
            self.z().wrapping_sub(other.z()),
        )
    }
}

impl fmt::Debug for LinearKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearKey")
            .field("x", &self.x())
            .field("y", &self.y())
            .field("z", &self.z())
            .finish()
    }
}

/// Every third bit, starting at bit 0: the x lane of a Morton key.
const X3: u32 = 0x0924_9249;
/// The y lane (x lane shifted up one).
const Y3: u32 = X3 << 1;
/// The z lane.
const Z3: u32 = X3 << 2;

const XY: u32 = X3 | Y3;
const XZ: u32 = X3 | Z3;
const YZ: u32 = Y3 | Z3;

/// Spreads the low 10 bits of `v` to every third bit.
#[inline]
fn spread(mut v: u32) -> u32 {
    v &= 0x0000_03ff;
    v = (v | (v << 16)) & 0xff00_00ff;
    v = (v | (v << 8)) & 0x0300_f00f;
    v = (v | (v << 4)) & 0x030c_30c3;
    v = (v | (v << 2)) & 0x0924_9249;
    v
}

/// Inverse of [`spread`]: compacts every third bit into the low 10 bits.
#[inline]
fn compact(mut v: u32) -> u32 {
    v &= 0x0924_9249;
    v = (v | (v >> 2)) & 0x030c_30c3;
    v = (v | (v >> 4)) & 0x0300_f00f;
    v = (v | (v >> 8)) & 0xff00_00ff;
    v = (v | (v >> 16)) & 0x0000_03ff;
    v
}

/// A spatial key in Z-order form: bit `3k` is x bit `k`, `3k + 1` is y bit
/// `k`, `3k + 2` is z bit `k`.
///
/// Axis arithmetic never decodes the key. To step or add along one axis, the
/// other two lanes are saturated with ones so that carries ripple straight
/// across them, the addition is performed on the whole word, and the result
/// is masked back to the target lane:
///
/// ```text
/// inc_x(k) = (((k | YZ) + 1) & X3) | (k & YZ)
/// ```
///
/// Subtraction works on the isolated lane instead, since borrows ripple
/// across zeros. Both wrap at the axis edge by construction.
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MortonKey(u32);

impl SpatialKey for MortonKey {
    #[inline]
    fn from_xyz(x: u32, y: u32, z: u32) -> Self {
        Self(spread(x & AXIS_MASK) | (spread(y & AXIS_MASK) << 1) | (spread(z & AXIS_MASK) << 2))
    }

    #[inline]
    fn from_scalar(scalar: u32) -> Self {
        Self(scalar & bits::mask_for_bits(3 * AXIS_BITS))
    }

    #[inline]
    fn scalar(self) -> u32 {
        self.0
    }

    #[inline]
    fn x(self) -> u32 {
        compact(self.0)
    }

    #[inline]
    fn y(self) -> u32 {
        compact(self.0 >> 1)
    }

    #[inline]
    fn z(self) -> u32 {
        compact(self.0 >> 2)
    }

    #[inline]
    fn inc_x(self) -> Self {
        Self((((self.0 | YZ).wrapping_add(1)) & X3) | (self.0 & YZ))
    }

    #[inline]
    fn inc_y(self) -> Self {
        Self((((self.0 | XZ).wrapping_add(2)) & Y3) | (self.0 & XZ))
    }

    // The x and y lanes are saturated, so adding 1 carries through bits 0
    // and 1 directly into the lowest z bit.
    #[inline]
    fn inc_z(self) -> Self {
        Self((((self.0 | XY).wrapping_add(1)) & Z3) | (self.0 & XY))
    }

    #[inline]
    fn dec_x(self) -> Self {
        Self((((self.0 & X3).wrapping_sub(1)) & X3) | (self.0 & YZ))
    }

    #[inline]
    fn dec_y(self) -> Self {
        Self((((self.0 & Y3).wrapping_sub(2)) & Y3) | (self.0 & XZ))
    }

    #[inline]
    fn dec_z(self) -> Self {
        Self((((self.0 & Z3).wrapping_sub(1)) & Z3) | (self.0 & XY))
    }

    #[inline]
    fn wrapping_add(self, other: Self) -> Self {
        let x = ((self.0 | YZ).wrapping_add(other.0 & X3)) & X3;
        let y = ((self.0 | XZ).wrapping_add(other.0 & Y3)) & Y3;
        let z = ((self.0 | XY).wrapping_add(other.0 & Z3)) & Z3;
        Self(x | y | z)
    }

    #[inline]
    fn wrapping_sub(self, other: Self) -> Self {
        let x = ((self.0 & X3).wrapping_sub(other.0 & X3)) & X3;
        let y = ((self.0 & Y3).wrapping_sub(other.0 & Y3)) & Y3;
        let z = ((self.0 & Z3).wrapping_sub(other.0 & Z3)) & Z3;
        Self(x | y | z)
    }
}

impl fmt::Debug for MortonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MortonKey")
            .field("x", &self.x())
            .field("y", &self.y())
            .field("z", &self.z())
            .finish()
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
