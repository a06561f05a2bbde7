use foundation::{GeoPoint, MercatorViewport};
use serde::Serialize;

/// Initial map centre (Pakistan).
pub const DEFAULT_CENTER: GeoPoint = GeoPoint {
    lat_deg: 30.3753,
    lon_deg: 69.3451,
};
pub const DEFAULT_ZOOM: f64 = 6.0;

/// Where the map surface is looking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: f64,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl MapView {
    pub fn viewport(&self, width_px: f64, height_px: f64) -> MercatorViewport {
        MercatorViewport::new(self.center, self.zoom, width_px, height_px)
    }

    /// Geographic point under a pixel of a `width_px` x `height_px` surface.
    pub fn point_at(&self, x_px: f64, y_px: f64, width_px: f64, height_px: f64) -> GeoPoint {
        self.viewport(width_px, height_px).screen_to_geo(x_px, y_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_centre_maps_to_view_centre() {
        let view = MapView::default();
        let p = view.point_at(400.0, 300.0, 800.0, 600.0);
        assert!((p.lat_deg - DEFAULT_CENTER.lat_deg).abs() < 1e-9);
        assert!((p.lon_deg - DEFAULT_CENTER.lon_deg).abs() < 1e-9);
    }

    #[test]
    fn right_and_up_increase_lon_and_lat() {
        let view = MapView::default();
        let p = view.point_at(500.0, 200.0, 800.0, 600.0);
        assert!(p.lon_deg > DEFAULT_CENTER.lon_deg);
        assert!(p.lat_deg > DEFAULT_CENTER.lat_deg);
    }
}
