/// Integer 3×3 kernel, indexed `[row][column]` with the centre at `[1][1]`.
pub type Kernel3 = [[i32; 3]; 3];

/// Sharpening kernel: centre 5, orthogonal neighbours −1, corners 0.
pub const SHARPEN_KERNEL: Kernel3 = [[0, -1, 0], [-1, 5, -1], [0, -1, 0]];

/// Weighted sum of a 3×3 neighbourhood for one channel.
///
/// `rows` are the previous, current and next row; `i` is the byte index of
/// the centre sample within each row and `step` the distance to the same
/// channel of the horizontal neighbour.
#[inline]
pub(crate) fn apply(kernel: &Kernel3, rows: [&[u8]; 3], i: usize, step: usize) -> i32 {
    let mut sum = 0;
    for (k_row, row) in kernel.iter().zip(rows) {
        sum += k_row[0] * i32::from(row[i - step])
            + k_row[1] * i32::from(row[i])
            + k_row[2] * i32::from(row[i + step]);
    }
    sum
}

/// Saturating clamp into the 8-bit range.
#[inline]
pub(crate) fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}
