//! Expansion of face masks into renderer-ready index buffers.

use crate::core::{Error, Result};
use crate::face_geometry::FaceMasks;

/// Vertex block slots per bitvoxel position. Each bitvoxel owns 24
/// consecutive slots in the renderer's vertex array (4 per face).
pub const VERTS_PER_BITVOXEL: u32 = 24;
/// Triangle indices emitted per visible face (two triangles).
pub const INDICES_PER_FACE: u32 = 6;

/// Geometry lookup tables supplied by the renderer.
///
/// The vertex attribute arrays are opaque to the engine — it hands them back
/// untouched. Only the index tables are read: entry `m` of
/// [`indices`](Self::indices) holds the triangle indices, local to a 24-slot
/// vertex block, that realize the face combination `m`; its length must be
/// `6 * m.count_ones()`. [`indices_flipped`](Self::indices_flipped) is the
/// same table with reversed winding.
#[derive(Clone, Copy)]
pub struct GeometryLut<'a> {
    pub vertices: &'a [[f32; 3]],
    pub normals: &'a [[f32; 3]],
    pub uvs: &'a [[f32; 2]],
    pub indices: [&'a [u32]; 64],
    pub indices_flipped: [&'a [u32]; 64],
}

/// Triangle index count for `masks`: six per visible face.
#[inline]
pub fn expanded_len(masks: &FaceMasks) -> usize {
    (masks.pop_count() * INDICES_PER_FACE) as usize
}

/// Expands `masks` into a freshly allocated triangle index buffer.
///
/// Each non-zero mask at position `i` contributes its LUT entry offset by
/// `i * 24`, the base of that bitvoxel's vertex block. The output length is
/// exactly [`expanded_len`].
pub fn expand_indices(masks: &FaceMasks, lut: &GeometryLut<'_>, flipped: bool) -> Vec<u32> {
    let mut out = vec![0; expanded_len(masks)];
    fill_indices(masks, lut, flipped, &mut out);
    out
}

/// Like [`expand_indices`], writing into a caller-supplied buffer whose
/// length must equal [`expanded_len`] exactly.
pub fn expand_indices_into(
    masks: &FaceMasks,
    lut: &GeometryLut<'_>,
    flipped: bool,
    out: &mut [u32],
) -> Result<()> {
    let expected = expanded_len(masks);
    if out.len() != expected {
        return Err(Error::LengthMismatch {
            expected,
            actual: out.len(),
        });
    }
    fill_indices(masks, lut, flipped, out);
    Ok(())
}

fn fill_indices(masks: &FaceMasks, lut: &GeometryLut<'_>, flipped: bool, out: &mut [u32]) {
    let table = if flipped {
        &lut.indices_flipped
    } else {
        &lut.indices
    };

    let mut cursor = 0;
    for (i, &mask) in masks.masks().iter().enumerate() {
        if mask == 0 {
            continue;
        }
        let base = i as u32 * VERTS_PER_BITVOXEL;
        for &local in table[mask as usize] {
            out[cursor] = base + local;
            cursor += 1;
        }
    }
    debug_assert_eq!(cursor, out.len());
}
