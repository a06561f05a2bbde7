use catalog::Category;
use foundation::GeoPoint;
use runtime::NodeId;
use serde::Serialize;
use widgets::{FieldView, LocationPanel, TabView};

use crate::state::SubmissionResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSurfaceView {
    pub node: NodeId,
    pub center: GeoPoint,
    pub zoom: f64,
    /// Draggable marker, present while a coordinate is set.
    pub marker: Option<GeoPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub demand_score: f64,
    pub demand_score_text: String,
    pub recommendations: String,
}

impl From<&SubmissionResult> for ResultView {
    fn from(result: &SubmissionResult) -> Self {
        Self {
            demand_score: result.demand_score,
            demand_score_text: result.demand_score_text(),
            recommendations: result.recommendations.clone(),
        }
    }
}

/// Everything a host needs to draw one frame of the collector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapFormView {
    pub active_tab: Category,
    pub tabs: Vec<TabView>,
    pub map: MapSurfaceView,
    pub location: LocationPanel,
    pub fields: Vec<FieldView>,
    pub submit_enabled: bool,
    /// Full-screen loading overlay.
    pub loading: bool,
    pub result: Option<ResultView>,
    pub error: Option<String>,
}
