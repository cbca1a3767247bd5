//! 3x3 weighted Laplacian used for diffusion.

/// Stencil weights in row-major order, `WEIGHTS[dy + 1][dx + 1]`.
///
/// Corners 0.05, orthogonal neighbours 0.2, centre -1. The nine weights sum
/// to zero so a uniform region has no diffusion.
pub const WEIGHTS: [[f64; 3]; 3] = [
    [W_DIAG, W_ORTHO, W_DIAG],
    [W_ORTHO, W_CENTER, W_ORTHO],
    [W_DIAG, W_ORTHO, W_DIAG],
];

pub const W_CENTER: f64 = -1.0;
pub const W_ORTHO: f64 = 0.2;
pub const W_DIAG: f64 = 0.05;

/// Laplacian of both chemicals at interior cell `(x, y)` of an interleaved
/// buffer `cells` that is `width` cells wide. Returns `(lap_a, lap_b)`.
///
/// The caller guarantees `1 <= x < width - 1` and `1 <= y < height - 1`.
#[inline]
pub fn laplacian(cells: &[f64], width: usize, x: usize, y: usize) -> (f64, f64) {
    let row = width * 2;
    let c = (x + y * width) * 2;
    let up = c - row;
    let down = c + row;

    let ortho = |k: usize| cells[up + k] + cells[down + k] + cells[c - 2 + k] + cells[c + 2 + k];
    let diag = |k: usize| {
        cells[up - 2 + k] + cells[up + 2 + k] + cells[down - 2 + k] + cells[down + 2 + k]
    };

    // centre last so a region of all 1.0 sums to exactly 0
    let lap_a = W_ORTHO * ortho(0) + W_DIAG * diag(0) + W_CENTER * cells[c];
    let lap_b = W_ORTHO * ortho(1) + W_DIAG * diag(1) + W_CENTER * cells[c + 1];
    (lap_a, lap_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_zero() {
        let sum: f64 = WEIGHTS.iter().flatten().copied().sum();
        assert!(sum.abs() < 1e-9, "stencil sum {sum}");
    }

    #[test]
    fn table_is_symmetric() {
        for r in 0..3 {
            for c in 0..3 {
                assert_eq!(WEIGHTS[r][c], WEIGHTS[c][r]);
                assert_eq!(WEIGHTS[r][c], WEIGHTS[2 - r][2 - c]);
            }
        }
        assert_eq!(WEIGHTS[1][1], -1.0);
    }

    fn grid(width: usize, height: usize, f: impl Fn(usize, usize) -> (f64, f64)) -> Vec<f64> {
        let mut cells = Vec::with_capacity(width * height * 2);
        for y in 0..height {
            for x in 0..width {
                let (a, b) = f(x, y);
                cells.push(a);
                cells.push(b);
            }
        }
        cells
    }

    #[test]
    fn uniform_region_has_no_laplacian() {
        let cells = grid(5, 5, |_, _| (1.0, 0.0));
        assert_eq!(laplacian(&cells, 5, 2, 2), (0.0, 0.0));
    }

    #[test]
    fn point_source_matches_table() {
        // single b spike at (2, 2); each neighbour sees its weight
        let cells = grid(5, 5, |x, y| (0.0, if (x, y) == (2, 2) { 1.0 } else { 0.0 }));
        for (dx, dy) in [(-1i32, -1i32), (0, -1), (1, 0), (0, 0), (1, 1)] {
            let x = (2 + dx) as usize;
            let y = (2 + dy) as usize;
            let (la, lb) = laplacian(&cells, 5, x, y);
            assert_eq!(la, 0.0);
            let want = WEIGHTS[(1 - dy) as usize][(1 - dx) as usize];
            assert!((lb - want).abs() < 1e-6, "({x}, {y}): {lb} vs {want}");
        }
    }

    #[test]
    fn chemicals_do_not_mix() {
        let cells = grid(3, 3, |x, _| (x as f64, 0.5));
        let (la, lb) = laplacian(&cells, 3, 1, 1);
        // a is linear in x, so its Laplacian vanishes as well
        assert!(la.abs() < 1e-6);
        assert!(lb.abs() < 1e-6);
    }
}
