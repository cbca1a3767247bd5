//! Gray-Scott reaction-diffusion on a dense grid.
//!
//! The [`Engine`] owns two equal-sized [`Field`]s and advances one into the
//! other with a 3x3 weighted Laplacian, then swaps them. Boundary cells are
//! never stepped; they keep whatever the last reset or injection wrote.
//!
//! ```
//! use matcha::{Engine, Params};
//!
//! let mut engine = Engine::new(64, 64, Params::default()).unwrap();
//! engine.advance_frame();
//! engine.inject_blob(10, 10);
//! let view = engine.field();
//! assert!(view.values().all(|v| (0.0..=1.0).contains(&v)));
//! ```

pub mod engine;
pub mod error;
pub mod field;
pub mod palette;
pub mod params;
pub mod stencil;

pub use engine::Engine;
pub use error::EngineError;
pub use field::{Field, FieldView};
pub use palette::{Palette, Rgb};
pub use params::{Knob, Params, Preset, PRESETS};
