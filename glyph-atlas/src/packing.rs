//! 4 bit per pixel packing of 8 bit grayscale glyph bitmaps.
//!
//! Two pixels share a byte, the left one in the low nibble and the right one
//! in the high nibble. Each row starts on a fresh byte, so a row of odd width
//! ends with a byte whose high nibble is zero.

/// Number of bytes [`pack_4bpp`] produces for a `width` x `height` bitmap.
pub fn packed_len(width: usize, height: usize) -> usize {
    width.div_ceil(2) * height
}

/// Keeps the upper 4 bits of every pixel of the row-major `bitmap` and packs
/// them two to a byte. `bitmap.len()` must be a multiple of `width`.
pub fn pack_4bpp(bitmap: &[u8], width: usize) -> Vec<u8> {
    if width == 0 {
        return Vec::new();
    }
    debug_assert_eq!(bitmap.len() % width, 0);

    let mut packed = Vec::with_capacity(packed_len(width, bitmap.len() / width));
    for row in bitmap.chunks(width) {
        packed.extend(row.chunks(2).map(|pair| {
            let left = pair[0] >> 4;
            let right = pair.get(1).map_or(0, |px| px & 0xF0);
            left | right
        }));
    }
    packed
}

/// Expands packed data back into one 4 bit intensity (0-15) per pixel.
pub fn unpack_4bpp(packed: &[u8], width: usize, height: usize) -> Vec<u8> {
    if width == 0 {
        return Vec::new();
    }

    packed
        .chunks(width.div_ceil(2))
        .take(height)
        .flat_map(|row| {
            row.iter()
                .flat_map(|byte| [byte & 0x0F, byte >> 4])
                .take(width)
        })
        .collect()
}
