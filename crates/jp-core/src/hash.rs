//! String folding hash shared by seeding and pattern assignment

/// Fold `text` into a 32-bit signed accumulator: `h = (h << 5) - h + unit`.
///
/// Operates on UTF-16 code units so the result matches what a browser
/// client computes with `charCodeAt` for the same string. Arithmetic wraps
/// at 32 bits.
#[inline]
pub fn fold_hash(text: &str) -> i32 {
    text.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_shl(5).wrapping_sub(h).wrapping_add(unit as i32)
    })
}
