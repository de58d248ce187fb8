//! Two-dimensional type-II discrete cosine transform.
//!
//! `F(u,v) = 0.25 * C(u) * C(v) * sum_i sum_j f(i,j) * cos((2i+1)u*pi/2N) * cos((2j+1)v*pi/2N)`
//! with `C(0) = 1/sqrt(2)` and `C(k) = 1` otherwise. The transform is
//! separable, so rows and columns are processed in two passes of O(N^3)
//! instead of the O(N^4) direct sum.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// `table[k * n + m] = cos((2m + 1) * k * pi / 2n)`
fn cosine_table(n: usize) -> Vec<f64> {
    let mut table = Vec::with_capacity(n * n);
    for k in 0..n {
        for m in 0..n {
            table.push(((2 * m + 1) as f64 * k as f64 * PI / (2.0 * n as f64)).cos());
        }
    }
    table
}

#[inline]
fn scale(k: usize) -> f64 {
    if k == 0 {
        FRAC_1_SQRT_2
    } else {
        1.0
    }
}

/// DCT of an `n x n` row-major block, returning `n x n` row-major coefficients
/// where `coefficients[u * n + v]` is `F(u, v)`.
///
/// `input` must hold exactly `n * n` samples; the only caller passes a
/// shape-checked grid.
pub(crate) fn dct_2d(input: &[f64], n: usize) -> Vec<f64> {
    debug_assert_eq!(input.len(), n * n);
    let table = cosine_table(n);

    // rows[u * n + j] = sum_i f(i, j) * cos_u(i)
    let mut rows = vec![0.0; n * n];
    for u in 0..n {
        let cos_u = &table[u * n..(u + 1) * n];
        for (i, &c) in cos_u.iter().enumerate() {
            let source = &input[i * n..(i + 1) * n];
            let target = &mut rows[u * n..(u + 1) * n];
            for (t, &f) in target.iter_mut().zip(source) {
                *t += f * c;
            }
        }
    }

    let mut output = vec![0.0; n * n];
    for u in 0..n {
        let row = &rows[u * n..(u + 1) * n];
        for v in 0..n {
            let cos_v = &table[v * n..(v + 1) * n];
            let sum: f64 = row.iter().zip(cos_v).map(|(r, c)| r * c).sum();
            output[u * n + v] = 0.25 * scale(u) * scale(v) * sum;
        }
    }

    output
}
