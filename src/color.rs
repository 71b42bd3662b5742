use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use ai_jobs_dashboard::data::aggregate::Insight;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            hsl_to_color32(Hsl::new(hue, 0.75, 0.55))
        })
        .collect()
}

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Continuous colour scales: measure → Color32
// ---------------------------------------------------------------------------

/// Two-stop HSL gradients, roughly after the usual plotting scales.  Hue is
/// interpolated linearly in the given direction, so an end hue below the
/// start (or negative) walks the wheel backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScale {
    Viridis,
    Blues,
    Reds,
    Greens,
    TealGreen,
    Cividis,
    SunsetDark,
}

impl ColorScale {
    /// `(hue, saturation, lightness)` at the low and high end.
    fn stops(self) -> ((f32, f32, f32), (f32, f32, f32)) {
        match self {
            ColorScale::Viridis => ((280.0, 0.55, 0.25), (60.0, 0.90, 0.55)),
            ColorScale::Blues => ((210.0, 0.50, 0.80), (220.0, 0.80, 0.30)),
            ColorScale::Reds => ((10.0, 0.60, 0.80), (0.0, 0.85, 0.35)),
            ColorScale::Greens => ((120.0, 0.35, 0.80), (140.0, 0.70, 0.25)),
            ColorScale::TealGreen => ((90.0, 0.55, 0.70), (190.0, 0.60, 0.30)),
            ColorScale::Cividis => ((220.0, 0.50, 0.25), (55.0, 0.80, 0.55)),
            ColorScale::SunsetDark => ((40.0, 0.90, 0.70), (-40.0, 0.60, 0.30)),
        }
    }

    /// Colour at position `t` in `[0, 1]` (clamped).
    pub fn color_at(self, t: f32) -> Color32 {
        let t = t.clamp(0.0, 1.0);
        let ((h0, s0, l0), (h1, s1, l1)) = self.stops();
        let lerp = |a: f32, b: f32| a + (b - a) * t;
        hsl_to_color32(Hsl::new(
            lerp(h0, h1).rem_euclid(360.0),
            lerp(s0, s1),
            lerp(l0, l1),
        ))
    }

    /// Colour for `value` on a `0..=max` range.
    pub fn color_for(self, value: f64, max: f64) -> Color32 {
        if max <= 0.0 {
            return self.color_at(1.0);
        }
        self.color_at((value / max) as f32)
    }

    pub fn for_insight(insight: Insight) -> Self {
        match insight {
            Insight::TopJobTitles => ColorScale::Viridis,
            Insight::TopCompanies => ColorScale::Blues,
            Insight::SalaryByExperience => ColorScale::Reds,
            // Unused by the pie chart, which takes `generate_palette` colours.
            Insight::RemoteDistribution => ColorScale::Blues,
            Insight::TopCountries => ColorScale::Greens,
            Insight::TopSkills => ColorScale::TealGreen,
            Insight::SalaryByCountry => ColorScale::Cividis,
            Insight::SalaryByCompanySize => ColorScale::SunsetDark,
        }
    }
}
