//! Dense two-chemical concentration grid.
//!
//! Cells are stored interleaved in one flat buffer: the cell at `(x, y)`
//! keeps `a` at `(x + y * width) * 2` and `b` right after it.

use crate::error::EngineError;

/// Grid of `(a, b)` concentration pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    width: usize,
    height: usize,
    cells: Vec<f64>,
}

impl Field {
    /// Creates a `width` x `height` field with every cell at `a = 1, b = 0`.
    ///
    /// Zero dimensions, or a cell count too large to address, are rejected
    /// before anything is allocated.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        let len = width.checked_mul(height).and_then(|n| n.checked_mul(2));
        let len = match len {
            Some(len) if width > 0 && height > 0 => len,
            _ => return Err(EngineError::InvalidDimension { width, height }),
        };
        let mut cells = vec![0.0; len];
        for pair in cells.chunks_exact_mut(2) {
            pair[0] = 1.0;
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub(crate) fn idx(&self, x: usize, y: usize) -> usize {
        (x + y * self.width) * 2
    }

    #[inline]
    fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Returns `(a, b)` at a cell.
    pub fn get(&self, x: usize, y: usize) -> Result<(f64, f64), EngineError> {
        if !self.contains(x, y) {
            return Err(EngineError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let i = self.idx(x, y);
        Ok((self.cells[i], self.cells[i + 1]))
    }

    /// Sets every cell to the same pair.
    pub fn fill(&mut self, a: f64, b: f64) {
        for pair in self.cells.chunks_exact_mut(2) {
            pair[0] = a;
            pair[1] = b;
        }
    }

    /// Sets `b = 1` on the half-open square
    /// `[cx - half, cx + half) x [cy - half, cy + half)`, clipped to the grid.
    ///
    /// `a` is left alone. The centre may lie off the grid; whatever part of
    /// the square overlaps the grid is still written.
    pub fn seed(&mut self, cx: isize, cy: isize, half: usize) {
        let half = isize::try_from(half).unwrap_or(isize::MAX);
        let x0 = cx.saturating_sub(half).max(0);
        let y0 = cy.saturating_sub(half).max(0);
        let x1 = cx.saturating_add(half).min(self.width as isize);
        let y1 = cy.saturating_add(half).min(self.height as isize);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for y in y0 as usize..y1 as usize {
            for x in x0 as usize..x1 as usize {
                let i = self.idx(x, y);
                self.cells[i + 1] = 1.0;
            }
        }
    }

    /// Interleaved `[a0, b0, a1, b1, ...]` view in row-major order.
    pub fn as_slice(&self) -> &[f64] {
        &self.cells
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.cells
    }

    /// Copies the outermost ring of cells from `src`. Both fields must share
    /// dimensions.
    pub(crate) fn copy_border_from(&mut self, src: &Field) {
        debug_assert_eq!((self.width, self.height), (src.width, src.height));
        let w = self.width;
        let h = self.height;
        let row = w * 2;

        // top and bottom rows
        self.cells[..row].copy_from_slice(&src.cells[..row]);
        let last = (h - 1) * row;
        self.cells[last..last + row].copy_from_slice(&src.cells[last..last + row]);

        // left and right columns
        for y in 1..h.saturating_sub(1) {
            let l = self.idx(0, y);
            let r = self.idx(w - 1, y);
            self.cells[l..l + 2].copy_from_slice(&src.cells[l..l + 2]);
            self.cells[r..r + 2].copy_from_slice(&src.cells[r..r + 2]);
        }
    }
}

/// Read-only view handed to renderers.
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    field: &'a Field,
}

impl<'a> FieldView<'a> {
    pub(crate) fn new(field: &'a Field) -> Self {
        Self { field }
    }

    pub fn width(&self) -> usize {
        self.field.width
    }

    pub fn height(&self) -> usize {
        self.field.height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<(f64, f64), EngineError> {
        self.field.get(x, y)
    }

    /// Display value of a cell: `a - b` clamped to [0, 1].
    pub fn value(&self, x: usize, y: usize) -> Result<f64, EngineError> {
        self.field.get(x, y).map(|(a, b)| display_value(a, b))
    }

    /// Display values of every cell in row-major order.
    pub fn values(&self) -> impl Iterator<Item = f64> + 'a {
        self.field
            .cells
            .chunks_exact(2)
            .map(|pair| display_value(pair[0], pair[1]))
    }

    pub fn as_slice(&self) -> &'a [f64] {
        &self.field.cells
    }
}

#[inline]
pub fn display_value(a: f64, b: f64) -> f64 {
    (a - b).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_field_is_all_a() {
        let f = Field::new(4, 3).unwrap();
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(f.get(x, y).unwrap(), (1.0, 0.0));
            }
        }
        assert_eq!(f.as_slice().len(), 4 * 3 * 2);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            Field::new(0, 5),
            Err(EngineError::InvalidDimension {
                width: 0,
                height: 5
            })
        );
        assert!(Field::new(5, 0).is_err());
    }

    #[test]
    fn reads_outside_the_grid_fail() {
        let f = Field::new(3, 2).unwrap();
        assert!(f.get(2, 1).is_ok());
        assert_eq!(
            f.get(3, 0),
            Err(EngineError::OutOfBounds {
                x: 3,
                y: 0,
                width: 3,
                height: 2
            })
        );
        assert!(f.get(0, 2).is_err());
    }

    #[test]
    fn seed_sets_half_open_square() {
        let mut f = Field::new(10, 10).unwrap();
        f.seed(5, 5, 2);
        for y in 0..10 {
            for x in 0..10 {
                let (a, b) = f.get(x, y).unwrap();
                assert_eq!(a, 1.0);
                let inside = (3..7).contains(&x) && (3..7).contains(&y);
                assert_eq!(b, if inside { 1.0 } else { 0.0 }, "cell ({x}, {y})");
            }
        }
    }

    #[test]
    fn seed_clips_to_grid() {
        let mut f = Field::new(6, 6).unwrap();
        f.seed(0, 0, 3);
        assert_eq!(f.get(0, 0).unwrap().1, 1.0);
        assert_eq!(f.get(2, 2).unwrap().1, 1.0);
        assert_eq!(f.get(3, 3).unwrap().1, 0.0);

        // centre off the grid, square still overlaps
        f.fill(1.0, 0.0);
        f.seed(-1, 7, 2);
        assert_eq!(f.get(0, 5).unwrap().1, 1.0);
        assert_eq!(f.get(1, 5).unwrap().1, 0.0);

        // no overlap at all
        f.fill(1.0, 0.0);
        f.seed(40, 40, 3);
        assert!(f.as_slice().chunks_exact(2).all(|p| p[1] == 0.0));
    }

    #[test]
    fn huge_half_size_covers_whole_grid() {
        for half in [usize::MAX, isize::MAX as usize, isize::MAX as usize + 1] {
            let mut f = Field::new(4, 4).unwrap();
            f.seed(2, 2, half);
            assert!(
                f.as_slice().chunks_exact(2).all(|p| p[0] == 1.0 && p[1] == 1.0),
                "half {half}"
            );
        }

        let mut f = Field::new(3, 3).unwrap();
        f.seed(0, 2, usize::MAX);
        assert!(f.as_slice().chunks_exact(2).all(|p| p[1] == 1.0));
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        let width = usize::MAX / 2 + 1;
        assert_eq!(
            Field::new(width, 1),
            Err(EngineError::InvalidDimension { width, height: 1 })
        );
        assert!(Field::new(usize::MAX, usize::MAX).is_err());
    }

    #[test]
    fn zero_half_size_seeds_nothing() {
        let mut f = Field::new(4, 4).unwrap();
        f.seed(2, 2, 0);
        assert!(f.as_slice().chunks_exact(2).all(|p| p[1] == 0.0));
    }

    #[test]
    fn border_copy_leaves_interior() {
        let mut src = Field::new(4, 4).unwrap();
        src.fill(0.25, 0.75);
        let mut dst = Field::new(4, 4).unwrap();
        dst.copy_border_from(&src);
        for y in 0..4 {
            for x in 0..4 {
                let edge = x == 0 || y == 0 || x == 3 || y == 3;
                let want = if edge { (0.25, 0.75) } else { (1.0, 0.0) };
                assert_eq!(dst.get(x, y).unwrap(), want);
            }
        }
    }

    #[test]
    fn border_copy_single_row() {
        let mut src = Field::new(3, 1).unwrap();
        src.fill(0.5, 0.5);
        let mut dst = Field::new(3, 1).unwrap();
        dst.copy_border_from(&src);
        assert_eq!(dst, src);
    }

    #[test]
    fn view_values_are_clamped_difference() {
        let mut f = Field::new(2, 1).unwrap();
        f.cells[3] = 1.0;
        let view = FieldView::new(&f);
        let v: Vec<f64> = view.values().collect();
        assert_eq!(v, vec![1.0, 0.0]);
        assert_eq!(view.value(1, 0).unwrap(), 0.0);
        assert_eq!(display_value(0.2, 0.9), 0.0);
        assert!((display_value(0.9, 0.2) - 0.7).abs() < 1e-6);
    }
}
