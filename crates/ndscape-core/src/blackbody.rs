#![forbid(unsafe_code)]

//! Blackbody temperature to sRGB color.
//!
//! Piecewise fit of the CIE 1964 blackbody locus (Helland's
//! approximation): each channel is either saturated, a logarithm, or a
//! power law of `T / 100`. Deterministic and pure.

/// Lowest temperature the fit is valid for (Kelvin).
pub const MIN_KELVIN: f64 = 1000.0;
/// Highest temperature the fit is valid for (Kelvin).
pub const MAX_KELVIN: f64 = 40000.0;

/// An 8-bit sRGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS-style `#rrggbb`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[inline]
fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Approximate sRGB color of a blackbody at `kelvin`.
///
/// Input is clamped into `[MIN_KELVIN, MAX_KELVIN]`.
#[must_use]
pub fn blackbody_rgb(kelvin: f64) -> Rgb {
    let t = kelvin.clamp(MIN_KELVIN, MAX_KELVIN) / 100.0;

    let r = if t <= 66.0 {
        255.0
    } else {
        329.698_727_446 * (t - 60.0).powf(-0.133_204_759_2)
    };

    let g = if t <= 66.0 {
        99.470_802_586_1 * t.ln() - 161.119_568_166_1
    } else {
        288.122_169_528_3 * (t - 60.0).powf(-0.075_514_849_2)
    };

    let b = if t >= 66.0 {
        255.0
    } else if t <= 19.0 {
        0.0
    } else {
        138.517_731_223_1 * (t - 10.0).ln() - 305.044_792_730_7
    };

    Rgb::new(channel(r), channel(g), channel(b))
}

/// Hex color for an accretion disk at `kelvin`.
#[must_use]
pub fn disk_temperature_to_color(kelvin: f64) -> String {
    blackbody_rgb(kelvin).to_hex()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cool_disk_is_red_orange() {
        let c = blackbody_rgb(1500.0);
        assert_eq!(c.r, 255);
        assert_eq!(c.b, 0);
        assert!(c.g < 140);
    }

    #[test]
    fn hot_disk_is_blue_white() {
        let c = blackbody_rgb(30000.0);
        assert_eq!(c.b, 255);
        assert!(c.r < c.b);
    }

    #[test]
    fn around_6600k_is_near_white() {
        let c = blackbody_rgb(6600.0);
        assert_eq!(c.r, 255);
        assert!(c.g > 240);
        assert!(c.b > 240);
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(blackbody_rgb(10.0), blackbody_rgb(MIN_KELVIN));
        assert_eq!(blackbody_rgb(1.0e9), blackbody_rgb(MAX_KELVIN));
    }

    #[test]
    fn hex_format_is_lowercase_six_digits() {
        assert_eq!(Rgb::new(255, 8, 171).to_hex(), "#ff08ab");
        let hex = disk_temperature_to_color(6500.0);
        assert_eq!(hex.len(), 7);
        assert!(hex.starts_with('#'));
    }

    #[test]
    fn same_input_same_color() {
        assert_eq!(disk_temperature_to_color(4321.0), disk_temperature_to_color(4321.0));
    }
}
