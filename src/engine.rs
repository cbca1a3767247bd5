//! Double-buffered Gray-Scott solver.

use crate::error::EngineError;
use crate::field::{Field, FieldView};
use crate::params::Params;
use crate::stencil;

/// Interior cells are visited in square tiles of this size.
const BLOCK: usize = 8;

/// Owns the current field, its scratch twin and the parameters.
///
/// Every mutator takes `&mut self`, so an injection can only land strictly
/// between two steps.
#[derive(Debug, Clone)]
pub struct Engine {
    current: Field,
    scratch: Field,
    params: Params,
    steps: u64,
}

impl Engine {
    /// Builds a `width` x `height` engine and writes the centred seed
    /// pattern.
    pub fn new(width: usize, height: usize, params: Params) -> Result<Self, EngineError> {
        let (current, scratch) = Self::alloc(width, height)?;
        let mut engine = Self {
            current,
            scratch,
            params,
            steps: 0,
        };
        engine.reseed();
        Ok(engine)
    }

    fn alloc(width: usize, height: usize) -> Result<(Field, Field), EngineError> {
        let current = Field::new(width, height).inspect_err(|e| log::warn!("{e}"))?;
        let scratch = Field::new(width, height)?;
        Ok((current, scratch))
    }

    pub fn width(&self) -> usize {
        self.current.width()
    }

    pub fn height(&self) -> usize {
        self.current.height()
    }

    /// Steps completed since the last reset or resize.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Changes apply from the next step on.
    pub fn params_mut(&mut self) -> &mut Params {
        &mut self.params
    }

    pub fn set_params(&mut self, params: Params) {
        self.params = params;
    }

    pub fn field(&self) -> FieldView<'_> {
        FieldView::new(&self.current)
    }

    /// Advances the simulation by one time step.
    pub fn advance(&mut self) {
        let w = self.current.width();
        let h = self.current.height();

        self.scratch.copy_border_from(&self.current);
        if w >= 3 && h >= 3 {
            step_interior(
                self.current.as_slice(),
                self.scratch.as_mut_slice(),
                w,
                h,
                &self.params,
            );
        }

        std::mem::swap(&mut self.current, &mut self.scratch);
        self.steps += 1;
    }

    /// Runs `updates_per_frame` steps.
    pub fn advance_frame(&mut self) {
        for _ in 0..self.params.updates_per_frame {
            self.advance();
        }
    }

    /// Forces `b = 1` on the square of half size `half` around `(cx, cy)`,
    /// clipped to the grid.
    pub fn inject(&mut self, cx: isize, cy: isize, half: usize) {
        log::trace!("inject at ({cx}, {cy}) half={half}");
        self.current.seed(cx, cy, half);
    }

    /// [`inject`](Self::inject) with the configured injection size.
    pub fn inject_blob(&mut self, cx: isize, cy: isize) {
        self.inject(cx, cy, self.params.injection_half_size);
    }

    /// Adopts `params` and rewrites the field with the centred pattern.
    pub fn reset(&mut self, params: Params) {
        self.params = params;
        self.reseed();
    }

    /// Replaces both buffers with fresh `width` x `height` ones and reseeds.
    ///
    /// On error the existing state is left untouched.
    pub fn resize(&mut self, width: usize, height: usize, params: Params) -> Result<(), EngineError> {
        let (current, scratch) = Self::alloc(width, height)?;
        self.current = current;
        self.scratch = scratch;
        self.params = params;
        self.reseed();
        Ok(())
    }

    fn reseed(&mut self) {
        let w = self.current.width();
        let h = self.current.height();
        self.current.fill(1.0, 0.0);
        self.current
            .seed((w / 2) as isize, (h / 2) as isize, self.params.pattern_half_size);
        self.steps = 0;
        log::debug!(
            "reseeded {w}x{h} grid, pattern half size {}",
            self.params.pattern_half_size
        );
    }
}

/// Writes the next state of every interior cell of `src` into `dst`.
fn step_interior(src: &[f64], dst: &mut [f64], w: usize, h: usize, p: &Params) {
    for by in (1..h - 1).step_by(BLOCK) {
        let ye = (by + BLOCK).min(h - 1);
        for bx in (1..w - 1).step_by(BLOCK) {
            let xe = (bx + BLOCK).min(w - 1);
            for y in by..ye {
                for x in bx..xe {
                    let i = (x + y * w) * 2;
                    let (lap_a, lap_b) = stencil::laplacian(src, w, x, y);
                    let (a, b) = react(src[i], src[i + 1], lap_a, lap_b, p);
                    dst[i] = a;
                    dst[i + 1] = b;
                }
            }
        }
    }
}

/// One explicit Euler update of a single cell, clamped to [0, 1].
#[inline]
pub fn react(a: f64, b: f64, lap_a: f64, lap_b: f64, p: &Params) -> (f64, f64) {
    let abb = a * b * b;
    let next_a = a + (p.d_a * lap_a - abb + p.feed * (1.0 - a)) * p.dt;
    let next_b = b + (p.d_b * lap_b + abb - (p.kill + p.feed) * b) * p.dt;
    (next_a.clamp(0.0, 1.0), next_b.clamp(0.0, 1.0))
}
