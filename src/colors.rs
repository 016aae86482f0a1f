//! Color encoding shared by every chart.
//!
//! A render builds exactly one [`ColorScale`] for the map. The map fill, the
//! map legend and the standalone [`ColorBar`] are all read off that one
//! value, so a number always gets the same color wherever it is drawn.

use palette::{encoding, IntoColor, Mix, Srgb};
use serde::{Deserialize, Serialize, Serializer};

use crate::filter::FilterSelection;
use crate::model::SentimentBucket;

/// HSL in the sRGB space, hue in degrees, saturation and lightness in `[0, 1]`.
pub type Hsl = palette::Hsl<encoding::Srgb, f64>;

/// An 8-bit sRGB color, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub Srgb<u8>);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(Srgb::new(r, g, b))
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    pub fn components(self) -> (u8, u8, u8) {
        self.0.into_components()
    }

    pub fn to_hex(self) -> String {
        let (r, g, b) = self.components();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        let rgb: Srgb<f64> = hsl.into_color();
        Rgb(rgb.into_format::<u8>())
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Numeric range a color scale is calibrated against. Always `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorDomain {
    pub min: f64,
    pub max: f64,
}

impl Default for ColorDomain {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl ColorDomain {
    /// Position of `value` inside the domain, clamped to `[0, 1]`.
    /// Non-finite values sit at the bottom.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if !value.is_finite() || span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Domain `[0, max]` over the non-negative finite `values`.
///
/// Falls back to `[0, 1]` when nothing usable is left or the maximum is 0.
pub fn build_domain(values: &[f64]) -> ColorDomain {
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .max_by(f64::total_cmp);
    match max {
        Some(max) if max > 0.0 => ColorDomain { min: 0.0, max },
        _ => ColorDomain::default(),
    }
}

/// Dependency-injection seam for the dashboard palette.
///
/// [`DefaultTheme`] is the dashboard's stock palette.
pub trait ColorTheme: Send + Sync {
    /// Bottom of the continuous map gradient.
    fn gradient_low(&self) -> Hsl;
    /// Top of the continuous map gradient.
    fn gradient_high(&self) -> Hsl;
    /// Sequential ramp sampled at `t` in `[0, 1]`, light to dark.
    fn sequential(&self, t: f64) -> Rgb;
    fn highlight_fill(&self) -> Rgb;
    fn highlight_stroke(&self) -> Rgb;
    fn default_stroke(&self) -> Rgb;

    /// Pie fill for `bucket`. The selected bucket gets the highlight color;
    /// the rest come from the sequential ramp run backwards, so Delighted
    /// sits at the start of the ramp and Disgusted at the end.
    fn bucket_fill(&self, bucket: SentimentBucket, selection: FilterSelection) -> Rgb {
        if selection.bucket() == Some(bucket) {
            return self.highlight_fill();
        }
        // Sequential domain is [4, 0]: Delighted samples t = 0, which on a
        // light-to-dark ramp is the lightest color.
        let last = (SentimentBucket::COUNT - 1) as f64;
        self.sequential((last - bucket.index() as f64) / last)
    }

    fn bucket_stroke(&self, bucket: SentimentBucket, selection: FilterSelection) -> Rgb {
        if selection.bucket() == Some(bucket) {
            self.highlight_stroke()
        } else {
            self.default_stroke()
        }
    }
}

/// The 9-class "Blues" scheme.
const BLUES: [Rgb; 9] = [
    Rgb::from_hex(0xf7fbff),
    Rgb::from_hex(0xdeebf7),
    Rgb::from_hex(0xc6dbef),
    Rgb::from_hex(0x9ecae1),
    Rgb::from_hex(0x6baed6),
    Rgb::from_hex(0x4292c6),
    Rgb::from_hex(0x2171b5),
    Rgb::from_hex(0x08519c),
    Rgb::from_hex(0x08306b),
];

/// Uniform B-spline through `stops`, one channel at a time. Passes through
/// the first and last stop exactly; interior stops are smoothed, matching
/// d3's `interpolateRgbBasis`.
fn basis_ramp(stops: &[Rgb], t: f64) -> Rgb {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let n = stops.len() - 1;
    let i = ((t * n as f64).floor() as usize).min(n - 1);
    let local = (t - i as f64 / n as f64) * n as f64;

    let channel = |pick: fn((u8, u8, u8)) -> u8| {
        let at = |k: usize| pick(stops[k].components()) as f64;
        let v1 = at(i);
        let v2 = at(i + 1);
        let v0 = if i > 0 { at(i - 1) } else { 2.0 * v1 - v2 };
        let v3 = if i < n - 1 { at(i + 2) } else { 2.0 * v2 - v1 };
        let (t1, t2, t3) = (local, local * local, local * local * local);
        let v = ((1.0 - 3.0 * t1 + 3.0 * t2 - t3) * v0
            + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
            + (1.0 + 3.0 * t1 + 3.0 * t2 - 3.0 * t3) * v2
            + t3 * v3)
            / 6.0;
        v.round().clamp(0.0, 255.0) as u8
    };

    Rgb::new(channel(|c| c.0), channel(|c| c.1), channel(|c| c.2))
}

/// Gray-to-red map gradient, Blues pie ramp, orange highlight.
pub struct DefaultTheme;

impl ColorTheme for DefaultTheme {
    fn gradient_low(&self) -> Hsl {
        Hsl::new(0.0, 0.0, 0.5)
    }

    fn gradient_high(&self) -> Hsl {
        Hsl::new(0.0, 1.0, 0.5)
    }

    fn sequential(&self, t: f64) -> Rgb {
        basis_ramp(&BLUES, t)
    }

    fn highlight_fill(&self) -> Rgb {
        Rgb::from_hex(0xffcc80)
    }

    fn highlight_stroke(&self) -> Rgb {
        Rgb::from_hex(0xffa500)
    }

    fn default_stroke(&self) -> Rgb {
        Rgb::from_hex(0x808080)
    }
}

/// A domain bound to a two-stop gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    domain: ColorDomain,
    low: Hsl,
    high: Hsl,
}

impl ColorScale {
    pub fn new(domain: ColorDomain, theme: &dyn ColorTheme) -> Self {
        Self {
            domain,
            low: theme.gradient_low(),
            high: theme.gradient_high(),
        }
    }

    pub fn domain(&self) -> ColorDomain {
        self.domain
    }

    pub fn color_for(&self, value: f64) -> Rgb {
        Rgb::from(self.low.mix(self.high, self.domain.normalize(value)))
    }

    pub fn low_color(&self) -> Rgb {
        self.color_for(self.domain.min)
    }

    pub fn high_color(&self) -> Rgb {
        self.color_for(self.domain.max)
    }

    /// `steps` evenly spaced samples from `min` to `max` inclusive.
    pub fn color_bar(&self, steps: usize) -> ColorBar {
        let steps = steps.max(2);
        let ColorDomain { min, max } = self.domain;
        let stops = (0..steps)
            .map(|i| {
                let value = min + (max - min) * i as f64 / (steps - 1) as f64;
                ColorStop {
                    value,
                    color: self.color_for(value),
                }
            })
            .collect();
        ColorBar {
            domain: self.domain,
            stops,
        }
    }
}

/// `value` on the default gradient calibrated to `domain`.
pub fn color_for(value: f64, domain: &ColorDomain) -> Rgb {
    ColorScale::new(*domain, &DefaultTheme).color_for(value)
}

/// Default-theme pie color for `bucket` under `selection`.
pub fn highlight_color(bucket: SentimentBucket, selection: FilterSelection) -> Rgb {
    DefaultTheme.bucket_fill(bucket, selection)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorStop {
    pub value: f64,
    pub color: Rgb,
}

/// Standalone continuous legend widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBar {
    pub domain: ColorDomain,
    pub stops: Vec<ColorStop>,
}
