// src/main.rs
mod app;
mod canvas;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use matcha::{params::find_preset, Engine, Params, PRESETS};

/// Grid size used by `--headless` when no size is given.
const CANVAS_SIZE: usize = 500;

#[derive(Parser, Debug, Clone)]
#[command(name = "matcha")]
#[command(about = "Gray-Scott reaction-diffusion in the terminal", long_about = None)]
struct Args {
    /// FPS cap (render rate)
    #[arg(long, default_value_t = 30)]
    fps: u64,

    /// Fixed grid width (default: follow the terminal)
    #[arg(long)]
    width: Option<usize>,

    /// Fixed grid height (default: follow the terminal)
    #[arg(long)]
    height: Option<usize>,

    /// Starting preset: Default, Spots, Maze, Coral or Waves
    #[arg(long, default_value = "Default")]
    preset: String,

    /// Feed rate (overrides the preset)
    #[arg(long)]
    feed: Option<f64>,

    /// Kill rate (overrides the preset)
    #[arg(long)]
    kill: Option<f64>,

    /// Diffusion rate of A
    #[arg(long)]
    da: Option<f64>,

    /// Diffusion rate of B
    #[arg(long)]
    db: Option<f64>,

    /// Time step
    #[arg(long)]
    dt: Option<f64>,

    /// Simulation steps per frame
    #[arg(long)]
    updates: Option<usize>,

    /// Half size of the initial centred square
    #[arg(long)]
    pattern_size: Option<usize>,

    /// Half size of painted blobs
    #[arg(long)]
    blob_size: Option<usize>,

    /// Start with inverted colors
    #[arg(long, default_value_t = false)]
    invert: bool,

    /// Start with the controls panel hidden
    #[arg(long, default_value_t = false)]
    no_hud: bool,

    /// Start in paused state
    #[arg(long, default_value_t = false)]
    paused: bool,

    /// RNG seed for random drops
    #[arg(long, default_value_t = 0xC0FFEE_u64)]
    seed: u64,

    /// Run STEPS steps without a terminal and print a summary
    #[arg(long, value_name = "STEPS")]
    headless: Option<u64>,
}

impl Args {
    fn preset_idx(&self) -> Result<usize> {
        let preset = find_preset(&self.preset).ok_or_else(|| {
            let names: Vec<_> = PRESETS.iter().map(|p| p.name).collect();
            anyhow!("unknown preset {:?} (expected one of {})", self.preset, names.join(", "))
        })?;
        PRESETS
            .iter()
            .position(|p| p.name == preset.name)
            .context("preset table lookup")
    }

    fn params(&self) -> Result<Params> {
        let mut p = Params::default();
        p.apply_preset(&PRESETS[self.preset_idx()?]);
        if let Some(v) = self.feed {
            p.feed = v;
        }
        if let Some(v) = self.kill {
            p.kill = v;
        }
        if let Some(v) = self.da {
            p.d_a = v;
        }
        if let Some(v) = self.db {
            p.d_b = v;
        }
        if let Some(v) = self.dt {
            p.dt = v;
        }
        if let Some(v) = self.updates {
            p.updates_per_frame = v;
        }
        if let Some(v) = self.pattern_size {
            p.pattern_half_size = v;
        }
        if let Some(v) = self.blob_size {
            p.injection_half_size = v;
        }
        Ok(p)
    }

    fn fixed_size(&self) -> Option<(usize, usize)> {
        match (self.width, self.height) {
            (None, None) => None,
            (w, h) => Some((w.unwrap_or(CANVAS_SIZE), h.unwrap_or(CANVAS_SIZE))),
        }
    }
}

fn headless(params: Params, size: (usize, usize), steps: u64) -> Result<()> {
    let (w, h) = size;
    let mut engine = Engine::new(w, h, params).context("could not build the grid")?;
    for _ in 0..steps {
        engine.advance();
    }

    let view = engine.field();
    let n = (w * h) as f64;
    let (sum_a, sum_b) = view
        .as_slice()
        .chunks_exact(2)
        .fold((0.0, 0.0), |(sa, sb), c| (sa + c[0], sb + c[1]));
    let mean_value = view.values().sum::<f64>() / n;

    println!("grid:{w}x{h}  steps:{}", engine.steps());
    println!(
        "feed:{:.4}  kill:{:.4}  dA:{:.2}  dB:{:.2}  dt:{:.2}",
        params.feed, params.kill, params.d_a, params.d_b, params.dt
    );
    println!(
        "mean a:{:.6}  mean b:{:.6}  mean value:{:.6}",
        sum_a / n,
        sum_b / n,
        mean_value
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let params = args.params()?;

    if let Some(steps) = args.headless {
        let size = args.fixed_size().unwrap_or((CANVAS_SIZE, CANVAS_SIZE));
        return headless(params, size, steps);
    }

    let opts = app::Options {
        fps: args.fps,
        fixed_size: args.fixed_size(),
        preset_idx: args.preset_idx()?,
        inverted: args.invert,
        show_hud: !args.no_hud,
        paused: args.paused,
        seed: args.seed,
    };
    app::run(params, opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("matcha").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let args = parse(&[]);
        assert_eq!(args.params().unwrap(), Params::default());
        assert_eq!(args.fixed_size(), None);
        assert_eq!(args.preset_idx().unwrap(), 0);
    }

    #[test]
    fn preset_then_overrides() {
        let args = parse(&["--preset", "coral", "--kill", "0.061", "--blob-size", "4"]);
        let p = args.params().unwrap();
        assert_eq!(p.feed, 0.025);
        assert_eq!(p.kill, 0.061);
        assert_eq!(p.injection_half_size, 4);
        assert_eq!(args.preset_idx().unwrap(), 3);
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let args = parse(&["--preset", "lava"]);
        let err = args.params().unwrap_err().to_string();
        assert!(err.contains("lava"), "{err}");
    }

    #[test]
    fn partial_size_falls_back_to_canvas() {
        assert_eq!(parse(&["--width", "80"]).fixed_size(), Some((80, CANVAS_SIZE)));
    }

    #[test]
    fn headless_rejects_zero_size() {
        assert!(headless(Params::default(), (0, 10), 1).is_err());
        assert!(headless(Params::default(), (12, 12), 3).is_ok());
    }
}
