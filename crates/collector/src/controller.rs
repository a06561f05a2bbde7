use catalog::{Category, FormData};
use foundation::{Coordinate, GeoPoint};
use runtime::{NodeId, NodeIds, PointerBus, PointerEvent};
use scoring::{ScoreError, ScoreRequest, ScoreResponse, Scorer};
use tracing::{debug, info, warn};
use widgets::{CategoryForm, LocationPanel, TabSwitcher};

use crate::map_view::MapView;
use crate::state::{SubmissionResult, SubmitError, UiState};
use crate::view::{MapFormView, MapSurfaceView, ResultView};

/// A request captured by [`MapFormController::begin_submit`], to be sent
/// by the host and answered with [`MapFormController::complete_submit`].
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    pub category: Category,
    pub request: ScoreRequest,
}

/// Owns the picked location, the active category, per-category form data
/// and the submission state.
///
/// Hosts feed it discrete events (map clicks, pointer-downs, tab and field
/// changes) and render from [`MapFormController::view`].
#[derive(Debug)]
pub struct MapFormController {
    ids: NodeIds,
    bus: PointerBus,
    map_node: NodeId,
    map: MapView,
    coordinate: Coordinate,
    active: Category,
    form_data: FormData,
    tabs: TabSwitcher,
    form: CategoryForm,
    state: UiState,
}

impl Default for MapFormController {
    fn default() -> Self {
        Self::new()
    }
}

impl MapFormController {
    pub fn new() -> Self {
        let mut ids = NodeIds::new();
        let map_node = ids.alloc();
        let active = Category::default();
        let form = CategoryForm::new(active, &mut ids);
        Self {
            ids,
            bus: PointerBus::new(),
            map_node,
            map: MapView::default(),
            coordinate: Coordinate::unset(),
            active,
            form_data: FormData::new(),
            tabs: TabSwitcher::new(),
            form,
            state: UiState::Idle,
        }
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    pub fn active_category(&self) -> Category {
        self.active
    }

    pub fn form_data(&self) -> &FormData {
        &self.form_data
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn form(&self) -> &CategoryForm {
        &self.form
    }

    pub fn pointer_bus(&self) -> &PointerBus {
        &self.bus
    }

    pub fn map_node(&self) -> NodeId {
        self.map_node
    }

    pub fn map_view(&self) -> MapView {
        self.map
    }

    pub fn set_map_view(&mut self, map: MapView) {
        self.map = map;
    }

    pub fn marker(&self) -> Option<GeoPoint> {
        self.coordinate.to_point()
    }

    pub fn map_click(&mut self, point: GeoPoint) {
        if !point.is_finite() {
            debug!(?point, "ignoring non-finite map click");
            return;
        }
        self.coordinate = Coordinate::from_point(point);
    }

    /// Click at a pixel of a `width_px` x `height_px` map surface.
    pub fn map_click_px(&mut self, x_px: f64, y_px: f64, width_px: f64, height_px: f64) {
        let point = self.map.point_at(x_px, y_px, width_px, height_px);
        self.map_click(point);
    }

    pub fn marker_drag_end(&mut self, point: GeoPoint) {
        if !self.coordinate.is_set() {
            debug!("marker drag without a marker");
            return;
        }
        self.map_click(point);
    }

    /// Routes a host pointer-down (target-to-root node path) to open dropdowns.
    pub fn pointer_down(&self, path: Vec<NodeId>) -> usize {
        self.bus.dispatch(&PointerEvent::new(path))
    }

    pub fn select_tab(&mut self, tab: Category) {
        let Some(tab) = self.tabs.click(tab) else {
            return;
        };
        if tab == self.active {
            return;
        }
        self.form.unmount();
        self.active = tab;
        self.form = CategoryForm::new(tab, &mut self.ids);
    }

    pub fn select_tab_index(&mut self, index: usize) {
        if let Some(tab) = self.tabs.click_index(index) {
            self.select_tab(tab);
        }
    }

    pub fn toggle_field(&mut self, field: &str) {
        self.form.toggle(field, &self.bus);
    }

    pub fn filter_field(&mut self, field: &str, text: impl Into<String>) {
        self.form.set_filter(field, text);
    }

    /// Picks the `index`-th visible option of an open dropdown.
    pub fn choose_option(&mut self, field: &str, index: usize) {
        if let Some(selection) = self.form.choose(field, index) {
            self.set_field(selection.field, selection.value);
        }
    }

    /// Picks a visible option of an open dropdown by its text.
    pub fn choose_option_text(&mut self, field: &str, option: &str) {
        if let Some(selection) = self.form.choose_option(field, option) {
            self.set_field(selection.field, selection.value);
        }
    }

    /// Writes `value` into the active category's form data.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) {
        if let Err(err) = self.form_data.set(self.active, field, value) {
            debug!("ignoring field edit: {err}");
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.state.is_submitting()
            && self.coordinate.is_set()
            && self.form_data.is_complete(self.active)
    }

    /// Enters `Submitting` and captures the request for the host to send.
    ///
    /// Fails without contacting anyone when a submission is already in
    /// flight, or (after resetting the inputs) when no location is set.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SubmitError> {
        if self.state.is_submitting() {
            warn!("submit requested while a submission is in flight");
            return Err(SubmitError::InFlight);
        }
        self.state = UiState::Submitting;

        let fields = self.form_data.fields(self.active).clone();
        let Some(request) = ScoreRequest::from_coordinate(&self.coordinate, fields) else {
            let err = SubmitError::NoCoordinate;
            warn!("submit rejected: {err}");
            self.reset_inputs();
            self.state = UiState::ShowingError(err.user_message());
            return Err(err);
        };

        info!(
            category = %self.active,
            lat = request.latitude,
            lng = request.longitude,
            "submitting location"
        );
        Ok(PendingSubmission {
            category: self.active,
            request,
        })
    }

    /// Applies the collaborator's answer and resets location and form data.
    pub fn complete_submit(
        &mut self,
        outcome: Result<ScoreResponse, ScoreError>,
    ) -> Result<SubmissionResult, SubmitError> {
        if !self.state.is_submitting() {
            debug!("completing a submission that is no longer pending");
        }
        self.reset_inputs();
        match outcome {
            Ok(resp) => {
                let result = SubmissionResult::from(resp);
                info!(score = result.demand_score, "submission scored");
                self.state = UiState::ShowingResult(result.clone());
                Ok(result)
            }
            Err(err) => {
                warn!("submission failed: {err}");
                self.state = UiState::ShowingError(err.user_message());
                Err(SubmitError::Remote(err))
            }
        }
    }

    pub async fn submit<S: Scorer>(&mut self, scorer: &S) -> Result<SubmissionResult, SubmitError> {
        let pending = self.begin_submit()?;
        let outcome = scorer.score(pending.category, &pending.request).await;
        self.complete_submit(outcome)
    }

    pub fn dismiss_result(&mut self) {
        if matches!(self.state, UiState::ShowingResult(_)) {
            self.state = UiState::Idle;
        }
    }

    pub fn dismiss_error(&mut self) {
        if matches!(self.state, UiState::ShowingError(_)) {
            self.state = UiState::Idle;
        }
    }

    /// Resets location, form data, result and error. An in-flight
    /// submission keeps running.
    pub fn clear_all(&mut self) {
        self.reset_inputs();
        if !self.state.is_submitting() {
            self.state = UiState::Idle;
        }
    }

    pub fn view(&self) -> MapFormView {
        MapFormView {
            active_tab: self.active,
            tabs: self.tabs.view(self.active),
            map: MapSurfaceView {
                node: self.map_node,
                center: self.map.center,
                zoom: self.map.zoom,
                marker: self.marker(),
            },
            location: LocationPanel::view(&self.coordinate),
            fields: self.form.view(self.form_data.fields(self.active)),
            submit_enabled: self.can_submit(),
            loading: self.state.is_submitting(),
            result: self.state.result().map(ResultView::from),
            error: self.state.error().map(str::to_string),
        }
    }

    fn reset_inputs(&mut self) {
        self.coordinate.clear();
        self.form_data.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::NO_COORDINATE_MESSAGE;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    struct MockScorer {
        outcome: Result<ScoreResponse, ScoreError>,
        calls: RefCell<Vec<(Category, ScoreRequest)>>,
    }

    impl MockScorer {
        fn ok(score: f64, text: &str) -> Self {
            Self {
                outcome: Ok(ScoreResponse {
                    demand_score: score,
                    recommendations: text.to_string(),
                }),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn failing(err: ScoreError) -> Self {
            Self {
                outcome: Err(err),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Scorer for MockScorer {
        async fn score(
            &self,
            category: Category,
            request: &ScoreRequest,
        ) -> Result<ScoreResponse, ScoreError> {
            self.calls.borrow_mut().push((category, request.clone()));
            self.outcome.clone()
        }
    }

    fn assert_inputs_reset(c: &MapFormController) {
        assert_eq!(c.coordinate(), &Coordinate::unset());
        assert_eq!(c.form_data(), &FormData::new());
    }

    #[test]
    fn map_click_formats_six_decimals() {
        let mut c = MapFormController::new();
        c.map_click(GeoPoint::new(30.111111, 70.222222));
        assert_eq!(c.coordinate().latitude, "30.111111");
        assert_eq!(c.coordinate().longitude, "70.222222");
        let view = c.view();
        assert_eq!(view.location.latitude.value, "30.111111");
        assert!(view.map.marker.is_some());
    }

    #[test]
    fn non_finite_click_is_ignored() {
        let mut c = MapFormController::new();
        c.map_click(GeoPoint::new(f64::NAN, 70.0));
        assert!(!c.coordinate().is_set());
    }

    #[test]
    fn marker_drag_updates_only_existing_marker() {
        let mut c = MapFormController::new();
        c.marker_drag_end(GeoPoint::new(1.0, 2.0));
        assert!(!c.coordinate().is_set());
        c.map_click(GeoPoint::new(1.0, 2.0));
        c.marker_drag_end(GeoPoint::new(3.5, 4.25));
        assert_eq!(c.coordinate().latitude, "3.500000");
        assert_eq!(c.coordinate().longitude, "4.250000");
    }

    #[test]
    fn pixel_click_uses_map_view() {
        let mut c = MapFormController::new();
        c.map_click_px(400.0, 300.0, 800.0, 600.0);
        assert_eq!(c.coordinate().latitude, "30.375300");
        assert_eq!(c.coordinate().longitude, "69.345100");
    }

    #[test]
    fn eligibility_follows_mandatory_fields() {
        let mut c = MapFormController::new();
        assert!(!c.can_submit());
        c.map_click(GeoPoint::new(30.111111, 70.222222));
        assert!(c.can_submit());

        c.select_tab(Category::Healthcare);
        assert!(!c.can_submit());
        c.set_field("facilityOwnerType", "NGO");
        assert!(!c.can_submit());
        c.set_field("facilityType", "Hospital");
        assert!(c.can_submit());
        assert!(c.view().submit_enabled);
    }

    #[test]
    fn tab_switch_keeps_form_data_of_both_categories() {
        let mut c = MapFormController::new();
        c.select_tab(Category::Healthcare);
        c.set_field("facilityType", "Hospital");
        c.select_tab(Category::Education);
        assert_eq!(c.form_data().value(Category::Healthcare, "facilityType"), "Hospital");
        c.select_tab_index(1);
        assert_eq!(c.active_category(), Category::Healthcare);
        assert_eq!(c.view().fields[1].select.display, "Hospital");
    }

    #[test]
    fn field_edit_for_inactive_category_field_is_ignored() {
        let mut c = MapFormController::new();
        c.set_field("facilityType", "Hospital");
        assert_eq!(c.form_data(), &FormData::new());
    }

    #[test]
    fn tab_switch_unmounts_open_dropdowns() {
        let mut c = MapFormController::new();
        c.select_tab(Category::Healthcare);
        c.toggle_field("facilityOwnerType");
        assert_eq!(c.pointer_bus().listener_count(), 1);
        c.select_tab(Category::Education);
        assert_eq!(c.pointer_bus().listener_count(), 0);
        c.select_tab(Category::Healthcare);
        assert_eq!(c.form().open_count(), 0);
    }

    #[test]
    fn dropdown_selection_flows_into_form_data() {
        let mut c = MapFormController::new();
        c.select_tab(Category::Healthcare);
        c.toggle_field("facilityOwnerType");
        c.filter_field("facilityOwnerType", "ngo");
        c.choose_option_text("facilityOwnerType", "NGO");
        c.toggle_field("facilityType");
        c.filter_field("facilityType", "teaching");
        c.choose_option("facilityType", 0);
        assert_eq!(c.form_data().value(Category::Healthcare, "facilityOwnerType"), "NGO");
        assert_eq!(
            c.form_data().value(Category::Healthcare, "facilityType"),
            "Teaching Hospital"
        );
        assert_eq!(c.pointer_bus().listener_count(), 0);
    }

    #[test]
    fn outside_pointer_down_closes_dropdown() {
        let mut c = MapFormController::new();
        c.select_tab(Category::Healthcare);
        c.toggle_field("facilityType");
        c.filter_field("facilityType", "rural");
        let map = c.map_node();
        c.pointer_down(vec![map, NodeIds::DOCUMENT]);
        let view = c.view();
        assert!(!view.fields[1].select.open);
        assert_eq!(view.fields[1].select.filter, "rural");
        assert_eq!(c.pointer_bus().listener_count(), 0);
    }

    #[test]
    fn inside_pointer_down_keeps_dropdown_open() {
        let mut c = MapFormController::new();
        c.select_tab(Category::Healthcare);
        c.toggle_field("facilityType");
        let root = c.view().fields[1].select.root;
        c.pointer_down(vec![root, NodeIds::DOCUMENT]);
        assert!(c.view().fields[1].select.open);
    }

    #[test]
    fn healthcare_submission_succeeds_and_resets() {
        let mut c = MapFormController::new();
        c.map_click(GeoPoint::new(30.111111, 70.222222));
        c.select_tab(Category::Healthcare);
        c.set_field("facilityOwnerType", "NGO");
        c.set_field("facilityType", "Hospital");

        let scorer = MockScorer::ok(7.5, "Build clinic");
        let result = pollster::block_on(c.submit(&scorer)).unwrap();
        assert_eq!(result.demand_score, 7.5);

        let calls = scorer.calls.borrow();
        assert_eq!(calls.len(), 1);
        let (category, request) = &calls[0];
        assert_eq!(*category, Category::Healthcare);
        assert_eq!(request.latitude, 30.111111);
        assert_eq!(request.fields["facilityOwnerType"], "NGO");
        assert_eq!(request.fields["facilityType"], "Hospital");

        let view = c.view();
        let shown = view.result.unwrap();
        assert_eq!(shown.demand_score_text, "7.5");
        assert_eq!(shown.recommendations, "Build clinic");
        assert_eq!(view.error, None);
        assert!(!view.loading);
        assert_inputs_reset(&c);
        assert_eq!(c.active_category(), Category::Healthcare);
    }

    #[test]
    fn network_failure_shows_error_and_resets() {
        let mut c = MapFormController::new();
        c.map_click(GeoPoint::new(30.0, 70.0));
        let scorer = MockScorer::failing(ScoreError::Transport("connection refused".into()));
        let err = pollster::block_on(c.submit(&scorer)).unwrap_err();
        assert!(matches!(err, SubmitError::Remote(ScoreError::Transport(_))));
        let view = c.view();
        assert_eq!(view.error.as_deref(), Some(scoring::NETWORK_ERROR_MESSAGE));
        assert_eq!(view.result, None);
        assert_inputs_reset(&c);
    }

    #[test]
    fn server_message_is_shown() {
        let mut c = MapFormController::new();
        c.map_click(GeoPoint::new(30.0, 70.0));
        let scorer = MockScorer::failing(ScoreError::Status {
            status: 500,
            message: None,
        });
        let _ = pollster::block_on(c.submit(&scorer));
        assert_eq!(c.state().error(), Some(scoring::FALLBACK_MESSAGE));
    }

    #[test]
    fn submit_without_location_never_calls_scorer() {
        let mut c = MapFormController::new();
        c.select_tab(Category::Healthcare);
        c.set_field("facilityType", "Hospital");
        let scorer = MockScorer::ok(1.0, "");
        let err = pollster::block_on(c.submit(&scorer)).unwrap_err();
        assert_eq!(err, SubmitError::NoCoordinate);
        assert!(scorer.calls.borrow().is_empty());
        assert_eq!(c.state().error(), Some(NO_COORDINATE_MESSAGE));
        assert_inputs_reset(&c);
    }

    #[test]
    fn second_submit_while_in_flight_is_rejected() {
        let mut c = MapFormController::new();
        c.map_click(GeoPoint::new(30.0, 70.0));
        let pending = c.begin_submit().unwrap();
        assert_eq!(pending.category, Category::Education);
        assert!(c.view().loading);
        assert!(!c.can_submit());
        assert_eq!(c.begin_submit(), Err(SubmitError::InFlight));
        assert!(c.state().is_submitting());
    }

    #[test]
    fn clear_all_does_not_cancel_in_flight_submission() {
        let mut c = MapFormController::new();
        c.map_click(GeoPoint::new(30.0, 70.0));
        c.begin_submit().unwrap();
        c.clear_all();
        assert!(c.state().is_submitting());
        assert!(!c.coordinate().is_set());

        c.map_click(GeoPoint::new(31.0, 71.0));
        c.complete_submit(Ok(ScoreResponse {
            demand_score: 4.0,
            recommendations: "ok".into(),
        }))
        .unwrap();
        assert!(c.state().result().is_some());
        assert_inputs_reset(&c);
    }

    #[test]
    fn new_submit_replaces_previous_error() {
        let mut c = MapFormController::new();
        c.begin_submit().unwrap_err();
        assert!(c.state().error().is_some());
        c.map_click(GeoPoint::new(30.0, 70.0));
        c.begin_submit().unwrap();
        assert_eq!(c.state(), &UiState::Submitting);
    }

    #[test]
    fn dismissals_and_clear_all() {
        let mut c = MapFormController::new();
        c.map_click(GeoPoint::new(30.0, 70.0));
        pollster::block_on(c.submit(&MockScorer::ok(2.0, "x"))).unwrap();
        c.dismiss_error();
        assert!(c.state().result().is_some());
        c.dismiss_result();
        assert_eq!(c.state(), &UiState::Idle);

        c.begin_submit().unwrap_err();
        c.map_click(GeoPoint::new(30.0, 70.0));
        c.clear_all();
        assert_eq!(c.state(), &UiState::Idle);
        assert_inputs_reset(&c);
    }

    #[test]
    fn view_serializes_for_hosts() {
        let c = MapFormController::new();
        let json = serde_json::to_value(c.view()).unwrap();
        assert_eq!(json["active_tab"], "education");
        assert_eq!(json["map"]["center"]["lat"], 30.3753);
        assert_eq!(json["map"]["zoom"], 6.0);
        assert_eq!(json["tabs"][0]["highlighted"], true);
        assert_eq!(json["submit_enabled"], false);
    }
}
