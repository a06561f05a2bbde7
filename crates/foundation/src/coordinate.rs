use serde::{Deserialize, Serialize};

use crate::math::GeoPoint;

/// Decimal places kept when a map point becomes a coordinate.
pub const COORDINATE_DECIMALS: usize = 6;

// Digits past the requested precision that are enough to see the exact
// binary value of any coordinate-range f64.
const EXACT_EXTRA_DIGITS: usize = 80;

/// Fixed-point text with `decimals` places, rounding the exact value half
/// away from zero (`Number.prototype.toFixed`). Zero of either sign prints
/// unsigned.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return format!("{:.*}", decimals, 0.0);
    }

    let exact = format!("{:.*}", decimals + EXACT_EXTRA_DIGITS, value.abs());
    let Some((int_part, frac_part)) = exact.split_once('.') else {
        return exact;
    };
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(decimals))
        .collect();
    if frac_part.as_bytes()[decimals] >= b'5' {
        let mut carried = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carried = false;
                break;
            }
        }
        if carried {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - decimals;
    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(digits[..split].iter().map(|&b| b as char));
    if decimals > 0 {
        out.push('.');
        out.extend(digits[split..].iter().map(|&b| b as char));
    }
    out
}

/// The user-selected location as the form displays and submits it.
///
/// Both parts are pre-formatted strings; empty strings mean "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: String,
    pub longitude: String,
}

impl Coordinate {
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn from_point(point: GeoPoint) -> Self {
        Self {
            latitude: to_fixed(point.lat_deg, COORDINATE_DECIMALS),
            longitude: to_fixed(point.lon_deg, COORDINATE_DECIMALS),
        }
    }

    /// True only when both latitude and longitude are present.
    pub fn is_set(&self) -> bool {
        !self.latitude.is_empty() && !self.longitude.is_empty()
    }

    pub fn clear(&mut self) {
        self.latitude.clear();
        self.longitude.clear();
    }

    /// Parses the formatted strings back into a point (marker position, payload).
    pub fn to_point(&self) -> Option<GeoPoint> {
        if !self.is_set() {
            return None;
        }
        let lat = self.latitude.trim().parse::<f64>().ok()?;
        let lon = self.longitude.trim().parse::<f64>().ok()?;
        Some(GeoPoint::new(lat, lon))
    }
}

#[cfg(test)]
mod tests {
    use super::{Coordinate, to_fixed};
    use crate::math::GeoPoint;

    #[test]
    fn formats_to_six_decimals() {
        let c = Coordinate::from_point(GeoPoint::new(30.111111, 70.222222));
        assert_eq!(c.latitude, "30.111111");
        assert_eq!(c.longitude, "70.222222");
    }

    #[test]
    fn rounds_and_pads() {
        let c = Coordinate::from_point(GeoPoint::new(30.123_456_789, -70.5));
        assert_eq!(c.latitude, "30.123457");
        assert_eq!(c.longitude, "-70.500000");
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        let c = Coordinate::from_point(GeoPoint::new(30.0078125, -0.0078125));
        assert_eq!(c.latitude, "30.007813");
        assert_eq!(c.longitude, "-0.007813");
    }

    #[test]
    fn negative_zero_prints_unsigned() {
        let c = Coordinate::from_point(GeoPoint::new(-0.0, 0.0));
        assert_eq!(c.latitude, "0.000000");
        assert_eq!(c.longitude, "0.000000");
        assert_eq!(to_fixed(-0.0000001, 6), "-0.000000");
    }

    #[test]
    fn rounding_carries_into_integer_part() {
        assert_eq!(to_fixed(9.9999999, 6), "10.000000");
        assert_eq!(to_fixed(-179.99999995, 6), "-180.000000");
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(2.5, 0), "3");
    }

    #[test]
    fn non_tie_values_match_std_formatting() {
        for v in [30.3753, 69.3451, -12.345_678_9, 0.000_000_4, 85.051_128_779_806_59] {
            assert_eq!(to_fixed(v, 6), format!("{v:.6}"), "{v}");
        }
    }

    #[test]
    fn unset_and_partial_are_not_set() {
        assert!(!Coordinate::unset().is_set());
        let partial = Coordinate {
            latitude: "1.000000".to_string(),
            longitude: String::new(),
        };
        assert!(!partial.is_set());
        assert_eq!(partial.to_point(), None);
    }

    #[test]
    fn clear_resets_both_parts() {
        let mut c = Coordinate::from_point(GeoPoint::new(1.0, 2.0));
        c.clear();
        assert_eq!(c, Coordinate::unset());
    }

    #[test]
    fn parses_back_to_point() {
        let c = Coordinate::from_point(GeoPoint::new(24.86, 67.01));
        let p = c.to_point().unwrap();
        assert!((p.lat_deg - 24.86).abs() < 1e-9);
        assert!((p.lon_deg - 67.01).abs() < 1e-9);
    }
}
