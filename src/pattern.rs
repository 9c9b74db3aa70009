//! The procedural grayscale pattern.

/// Results of [`intensity`] fall in `0..MODULUS`.
pub const MODULUS: i64 = 255;

/// Intensity of the pattern at `(x, y)` for the given seed.
///
/// `((x * seed) - (y * seed) + (x + y) * (x * y))` reduced with a floored modulus,
/// so negative intermediates still land in `0..255`. Every operand is reduced
/// first, which keeps the products small without changing the residue.
#[inline]
pub fn intensity(x: i64, y: i64, seed: i64) -> u8 {
    let x = x.rem_euclid(MODULUS);
    let y = y.rem_euclid(MODULUS);
    let seed = seed.rem_euclid(MODULUS);

    let value = x * seed - y * seed + (x + y) * (x * y);
    value.rem_euclid(MODULUS) as u8
}

#[inline]
pub fn grayscale(x: i64, y: i64, seed: i64) -> [u8; 3] {
    [intensity(x, y, seed); 3]
}
