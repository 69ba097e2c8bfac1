//! Sample buffer shared by the codec and the effects.
//!
//! An [`Image`] is indexed `[row, column, channel]`. Channel 0 is red, 1 is
//! green, 2 is blue and 3, when present, is alpha.

use ndarray::{Array3, ArrayView1, Axis, s};

pub type Image = Array3<u8>;

pub const RED: usize = 0;
pub const GREEN: usize = 1;
pub const BLUE: usize = 2;

/// Coordinate `(row, column)` logged before and after the tint.
pub const PROBE: (usize, usize) = (10, 10);

#[inline]
pub fn height(image: &Image) -> usize {
    image.len_of(Axis(0))
}

#[inline]
pub fn width(image: &Image) -> usize {
    image.len_of(Axis(1))
}

#[inline]
pub fn channels(image: &Image) -> usize {
    image.len_of(Axis(2))
}

/// Returns every channel of the pixel at `(row, col)`, or `None` when the
/// coordinate lies outside the image.
pub fn sample_at(image: &Image, row: usize, col: usize) -> Option<ArrayView1<'_, u8>> {
    if row >= height(image) || col >= width(image) {
        return None;
    }

    Some(image.slice(s![row, col, ..]))
}
