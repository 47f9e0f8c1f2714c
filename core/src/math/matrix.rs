use ndarray::{s, Array2, ArrayView2};
use num_complex::Complex64;

pub struct MatrixHelper;

impl MatrixHelper {
    /// Copy `input` into a `rows × cols` zero grid anchored at the origin,
    /// truncating whatever does not fit.
    pub fn zero_padded(input: ArrayView2<Complex64>, rows: usize, cols: usize) -> Array2<Complex64> {
        let mut output = Array2::zeros((rows, cols));
        let keep_rows = input.nrows().min(rows);
        let keep_cols = input.ncols().min(cols);
        output
            .slice_mut(s![..keep_rows, ..keep_cols])
            .assign(&input.slice(s![..keep_rows, ..keep_cols]));
        output
    }

    /// Move the zero-frequency bin from the corner to index `n / 2` on both axes.
    pub fn fftshift<T: Clone>(input: ArrayView2<T>) -> Array2<T> {
        let (rows, cols) = input.dim();
        Array2::from_shape_fn((rows, cols), |(r, c)| {
            input[((r + rows - rows / 2) % rows, (c + cols - cols / 2) % cols)].clone()
        })
    }
}
