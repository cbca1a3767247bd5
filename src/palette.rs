//! Maps display values to colours.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

pub const MATCHA_GREEN: Rgb = Rgb::new(120, 160, 90);
pub const WHITE: Rgb = Rgb::new(255, 255, 255);

/// Two-colour ramp from `background` (value 0) to `pattern` (value 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub pattern: Rgb,
}

impl Palette {
    /// Green background with white pattern, or the reverse when `inverted`.
    pub fn matcha(inverted: bool) -> Self {
        if inverted {
            Self {
                background: WHITE,
                pattern: MATCHA_GREEN,
            }
        } else {
            Self {
                background: MATCHA_GREEN,
                pattern: WHITE,
            }
        }
    }

    /// `value` is expected in [0, 1]; anything else is clamped.
    pub fn color(&self, value: f64) -> Rgb {
        self.background.lerp(self.pattern, value)
    }
}
