use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use super::geodesy::{GeoPoint, WGS84_A, wrap_lon_deg};

/// Latitude at which Web Mercator becomes square.
pub const MERCATOR_MAX_LAT_DEG: f64 = 85.051_128_779_806_59;

/// Pixel size of a zoom-0 world tile.
pub const TILE_SIZE_PX: f64 = 256.0;

pub fn mercator_x_m(lon_deg: f64) -> f64 {
    WGS84_A * lon_deg.to_radians()
}

pub fn mercator_y_m(lat_deg: f64) -> f64 {
    let lat = lat_deg
        .clamp(-MERCATOR_MAX_LAT_DEG, MERCATOR_MAX_LAT_DEG)
        .to_radians();
    WGS84_A * (FRAC_PI_4 + 0.5 * lat).tan().ln()
}

pub fn inverse_mercator_lon_deg(x_m: f64) -> f64 {
    (x_m / WGS84_A).to_degrees()
}

pub fn inverse_mercator_lat_deg(y_m: f64) -> f64 {
    (2.0 * (y_m / WGS84_A).exp().atan() - FRAC_PI_2).to_degrees()
}

/// A 2D Web Mercator view of the map surface.
///
/// Converts between screen pixels (origin top-left, y down) and geographic
/// points for hosts whose map collaborator only reports pixel positions.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MercatorViewport {
    pub center: GeoPoint,
    pub zoom: f64,
    pub width_px: f64,
    pub height_px: f64,
}

impl MercatorViewport {
    pub fn new(center: GeoPoint, zoom: f64, width_px: f64, height_px: f64) -> Self {
        Self {
            center,
            zoom,
            width_px: width_px.max(1.0),
            height_px: height_px.max(1.0),
        }
    }

    pub fn scale_px_per_m(&self) -> f64 {
        TILE_SIZE_PX * self.zoom.exp2() / (2.0 * PI * WGS84_A)
    }

    fn world_width_m(&self) -> f64 {
        2.0 * PI * WGS84_A
    }

    pub fn project(&self, point: GeoPoint) -> (f64, f64) {
        let scale = self.scale_px_per_m();
        let world = self.world_width_m();
        let dx = (mercator_x_m(point.lon_deg) - mercator_x_m(self.center.lon_deg) + 0.5 * world)
            .rem_euclid(world)
            - 0.5 * world;
        let dy = mercator_y_m(point.lat_deg) - mercator_y_m(self.center.lat_deg);
        (
            self.width_px * 0.5 + dx * scale,
            self.height_px * 0.5 - dy * scale,
        )
    }

    pub fn screen_to_geo(&self, x_px: f64, y_px: f64) -> GeoPoint {
        let scale = self.scale_px_per_m();
        let x_m = mercator_x_m(self.center.lon_deg) + (x_px - self.width_px * 0.5) / scale;
        let y_m = mercator_y_m(self.center.lat_deg) + (self.height_px * 0.5 - y_px) / scale;
        GeoPoint::new(
            inverse_mercator_lat_deg(y_m).clamp(-MERCATOR_MAX_LAT_DEG, MERCATOR_MAX_LAT_DEG),
            wrap_lon_deg(inverse_mercator_lon_deg(x_m)),
        )
    }
}
