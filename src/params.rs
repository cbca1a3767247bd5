//! Simulation parameters, named presets and the tunable knobs the front-end
//! exposes.

/// Gray-Scott coefficients plus the host-side pacing and brush sizes.
///
/// The engine reads these on every step; nothing here is validated.
/// Out-of-range values give degenerate fields, not errors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Params {
    /// Diffusion rate of chemical A.
    pub d_a: f64,
    /// Diffusion rate of chemical B.
    pub d_b: f64,
    pub feed: f64,
    pub kill: f64,
    pub dt: f64,
    /// Steps run per displayed frame.
    pub updates_per_frame: usize,
    /// Half size of the centred square written on reset.
    pub pattern_half_size: usize,
    /// Half size of the square written by an injection.
    pub injection_half_size: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            d_a: 1.0,
            d_b: 0.5,
            feed: 0.055,
            kill: 0.062,
            dt: 1.0,
            updates_per_frame: 10,
            pattern_half_size: 15,
            injection_half_size: 8,
        }
    }
}

impl Params {
    /// Copies feed and kill from a preset, leaving everything else.
    pub fn apply_preset(&mut self, preset: &Preset) {
        self.feed = preset.feed;
        self.kill = preset.kill;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub feed: f64,
    pub kill: f64,
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "Default",
        feed: 0.055,
        kill: 0.062,
    },
    Preset {
        name: "Spots",
        feed: 0.035,
        kill: 0.065,
    },
    Preset {
        name: "Maze",
        feed: 0.029,
        kill: 0.057,
    },
    Preset {
        name: "Coral",
        feed: 0.025,
        kill: 0.060,
    },
    Preset {
        name: "Waves",
        feed: 0.014,
        kill: 0.054,
    },
];

/// Case-insensitive preset lookup.
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// A single adjustable parameter with its control range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Knob {
    Feed,
    Kill,
    DiffusionA,
    DiffusionB,
    TimeStep,
    Updates,
    PatternSize,
    BlobSize,
}

/// Control range of a knob: `min..=max`, moved in increments of `step`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnobRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Knob {
    pub const ALL: [Knob; 8] = [
        Knob::Feed,
        Knob::Kill,
        Knob::DiffusionA,
        Knob::DiffusionB,
        Knob::TimeStep,
        Knob::Updates,
        Knob::PatternSize,
        Knob::BlobSize,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Knob::Feed => "Feed Rate",
            Knob::Kill => "Kill Rate",
            Knob::DiffusionA => "Diffusion A",
            Knob::DiffusionB => "Diffusion B",
            Knob::TimeStep => "Time Step",
            Knob::Updates => "Updates/Frame",
            Knob::PatternSize => "Pattern Size",
            Knob::BlobSize => "Blob Size",
        }
    }

    pub fn range(self) -> KnobRange {
        let (min, max, step) = match self {
            Knob::Feed => (0.01, 0.1, 0.001),
            Knob::Kill => (0.045, 0.07, 0.001),
            Knob::DiffusionA => (0.5, 1.5, 0.1),
            Knob::DiffusionB => (0.1, 0.8, 0.1),
            Knob::TimeStep => (0.5, 1.5, 0.1),
            Knob::Updates => (1.0, 20.0, 1.0),
            Knob::PatternSize => (5.0, 30.0, 1.0),
            Knob::BlobSize => (3.0, 15.0, 1.0),
        };
        KnobRange { min, max, step }
    }

    pub fn get(self, p: &Params) -> f64 {
        match self {
            Knob::Feed => p.feed,
            Knob::Kill => p.kill,
            Knob::DiffusionA => p.d_a,
            Knob::DiffusionB => p.d_b,
            Knob::TimeStep => p.dt,
            Knob::Updates => p.updates_per_frame as f64,
            Knob::PatternSize => p.pattern_half_size as f64,
            Knob::BlobSize => p.injection_half_size as f64,
        }
    }

    /// Writes `value` as-is; integer knobs round to the nearest count (at
    /// least 1).
    pub fn set(self, p: &mut Params, value: f64) {
        let count = || value.round().max(1.0) as usize;
        match self {
            Knob::Feed => p.feed = value,
            Knob::Kill => p.kill = value,
            Knob::DiffusionA => p.d_a = value,
            Knob::DiffusionB => p.d_b = value,
            Knob::TimeStep => p.dt = value,
            Knob::Updates => p.updates_per_frame = count(),
            Knob::PatternSize => p.pattern_half_size = count(),
            Knob::BlobSize => p.injection_half_size = count(),
        }
    }

    /// Moves the knob by `ticks` increments, snapping to the step grid and
    /// staying inside the control range.
    pub fn nudge(self, p: &mut Params, ticks: i32) {
        let KnobRange { min, max, step } = self.range();
        let raw = self.get(p) + step * ticks as f64;
        let snapped = min + ((raw - min) / step).round() * step;
        self.set(p, snapped.clamp(min, max));
    }

    /// Value formatted with the precision of its step.
    pub fn display(self, p: &Params) -> String {
        let v = self.get(p);
        match self {
            Knob::Feed | Knob::Kill => format!("{v:.3}"),
            Knob::DiffusionA | Knob::DiffusionB | Knob::TimeStep => format!("{v:.1}"),
            Knob::Updates | Knob::PatternSize | Knob::BlobSize => format!("{v:.0}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_values() {
        let p = Params::default();
        assert_eq!(p.d_a, 1.0);
        assert_eq!(p.d_b, 0.5);
        assert_eq!(p.feed, 0.055);
        assert_eq!(p.kill, 0.062);
        assert_eq!(p.dt, 1.0);
        assert_eq!(p.updates_per_frame, 10);
        assert_eq!(p.pattern_half_size, 15);
        assert_eq!(p.injection_half_size, 8);
    }

    #[test]
    fn preset_only_touches_feed_and_kill() {
        let mut p = Params {
            d_a: 1.3,
            ..Params::default()
        };
        let maze = find_preset("maze").unwrap();
        p.apply_preset(maze);
        assert_eq!((p.feed, p.kill), (0.029, 0.057));
        assert_eq!(p.d_a, 1.3);
        assert_eq!(p.updates_per_frame, 10);
    }

    #[test]
    fn unknown_preset() {
        assert!(find_preset("lava").is_none());
        assert_eq!(PRESETS[0].name, "Default");
    }

    #[test]
    fn nudge_clamps_to_range() {
        let mut p = Params::default();
        Knob::Kill.nudge(&mut p, 100);
        assert!((p.kill - 0.07).abs() < 1e-12);
        Knob::Kill.nudge(&mut p, -100);
        assert!((p.kill - 0.045).abs() < 1e-12);

        Knob::Updates.nudge(&mut p, -50);
        assert_eq!(p.updates_per_frame, 1);
        Knob::BlobSize.nudge(&mut p, 3);
        assert_eq!(p.injection_half_size, 11);
    }

    #[test]
    fn nudge_snaps_to_step() {
        let mut p = Params::default();
        Knob::Feed.nudge(&mut p, 1);
        assert_eq!(Knob::Feed.display(&p), "0.056");
        Knob::DiffusionB.nudge(&mut p, -2);
        assert_eq!(Knob::DiffusionB.display(&p), "0.3");
    }

    #[test]
    fn set_does_not_clamp() {
        let mut p = Params::default();
        Knob::Feed.set(&mut p, 0.5);
        assert_eq!(p.feed, 0.5);
        Knob::PatternSize.set(&mut p, 0.2);
        assert_eq!(p.pattern_half_size, 1);
    }

    #[test]
    fn every_knob_reads_back() {
        let p = Params::default();
        for knob in Knob::ALL {
            let r = knob.range();
            assert!(r.min < r.max && r.step > 0.0, "{}", knob.label());
            let v = knob.get(&p);
            let mut q = p;
            knob.set(&mut q, v);
            assert_eq!(q, p);
        }
    }
}
