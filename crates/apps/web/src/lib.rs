//! Browser host for the map demand collector.
//!
//! The page forwards map, pointer and form events to these exports and
//! re-renders from the JSON returned by [`view`].

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};

use catalog::Category;
use collector::{MapFormController, SubmitError};
use foundation::GeoPoint;
use gloo_net::http::Request;
use runtime::NodeId;
use scoring::{
    DEFAULT_BASE_URL, ScoreError, ScoreRequest, ScoreResponse, Scorer, ScoringConfig,
    decode_response, predict_url,
};
use wasm_bindgen::prelude::*;

// Guard against double-initialization during hot reload.
static INITIALIZED: AtomicBool = AtomicBool::new(false);

#[derive(Default)]
struct HostState {
    controller: MapFormController,
    config: ScoringConfig,
}

thread_local! {
    static STATE: RefCell<HostState> = RefCell::new(HostState::default());
}

fn with_state<F, R>(f: F) -> Result<R, JsValue>
where
    F: FnOnce(&mut HostState) -> R,
{
    STATE
        .try_with(|state| {
            let mut s = state
                .try_borrow_mut()
                .map_err(|_| JsValue::from_str("collector state is busy"))?;
            Ok(f(&mut s))
        })
        .map_err(|_| JsValue::from_str("collector state unavailable"))?
}

fn with_controller<F, R>(f: F) -> Result<R, JsValue>
where
    F: FnOnce(&mut MapFormController) -> R,
{
    with_state(|s| f(&mut s.controller))
}

fn log_warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

fn node_path(ids: &[u32]) -> Vec<NodeId> {
    ids.iter().copied().map(NodeId::new).collect()
}

fn parse_tab(tab: &str) -> Result<Category, JsValue> {
    tab.parse::<Category>()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// `fetch`-backed scorer for the browser.
struct FetchScorer {
    base_url: String,
}

impl Scorer for FetchScorer {
    async fn score(
        &self,
        category: Category,
        request: &ScoreRequest,
    ) -> Result<ScoreResponse, ScoreError> {
        let url = predict_url(&self.base_url, category);
        let resp = Request::post(&url)
            .json(request)
            .map_err(|e| ScoreError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| ScoreError::Transport(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ScoreError::Transport(e.to_string()))?;
        decode_response(status, &body)
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    console_error_panic_hook::set_once();
    Ok(())
}

/// Points submissions at `base_url` and stores the map provider key.
#[wasm_bindgen]
pub fn configure(base_url: String, map_provider_key: Option<String>) -> Result<(), JsValue> {
    with_state(|s| {
        let trimmed = base_url.trim();
        s.config.base_url = if trimmed.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };
        s.config.map_provider_key = map_provider_key.filter(|k| !k.is_empty());
    })
}

#[wasm_bindgen]
pub fn map_provider_key() -> Option<String> {
    with_state(|s| s.config.map_provider_key.clone()).ok().flatten()
}

/// Serialized view model.
#[wasm_bindgen]
pub fn view() -> Result<String, JsValue> {
    let view = with_controller(|c| c.view())?;
    serde_json::to_string(&view).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub fn map_click(lat: f64, lng: f64) -> Result<(), JsValue> {
    with_controller(|c| c.map_click(GeoPoint::new(lat, lng)))
}

#[wasm_bindgen]
pub fn map_click_px(x: f64, y: f64, width: f64, height: f64) -> Result<(), JsValue> {
    with_controller(|c| c.map_click_px(x, y, width, height))
}

#[wasm_bindgen]
pub fn marker_drag_end(lat: f64, lng: f64) -> Result<(), JsValue> {
    with_controller(|c| c.marker_drag_end(GeoPoint::new(lat, lng)))
}

/// Pointer-down with the target-to-root chain of `data-node` ids.
#[wasm_bindgen]
pub fn pointer_down(path: Vec<u32>) -> Result<(), JsValue> {
    let path = node_path(&path);
    with_controller(|c| {
        c.pointer_down(path);
    })
}

#[wasm_bindgen]
pub fn select_tab(tab: String) -> Result<(), JsValue> {
    let tab = parse_tab(&tab)?;
    with_controller(|c| c.select_tab(tab))
}

#[wasm_bindgen]
pub fn toggle_field(field: String) -> Result<(), JsValue> {
    with_controller(|c| c.toggle_field(&field))
}

#[wasm_bindgen]
pub fn filter_field(field: String, text: String) -> Result<(), JsValue> {
    with_controller(|c| c.filter_field(&field, text))
}

#[wasm_bindgen]
pub fn choose_option(field: String, index: usize) -> Result<(), JsValue> {
    with_controller(|c| c.choose_option(&field, index))
}

#[wasm_bindgen]
pub fn can_submit() -> bool {
    with_controller(|c| c.can_submit()).unwrap_or(false)
}

/// Runs one submission and returns the resulting view.
///
/// The controller is not borrowed while the request is in flight, so the
/// page keeps dispatching events (and sees `loading`) meanwhile.
#[wasm_bindgen]
pub async fn submit() -> Result<String, JsValue> {
    let (begun, base_url) = with_state(|s| (s.controller.begin_submit(), s.config.base_url.clone()))?;
    match begun {
        Ok(pending) => {
            let scorer = FetchScorer { base_url };
            let outcome = scorer.score(pending.category, &pending.request).await;
            let completed = with_controller(|c| c.complete_submit(outcome))?;
            if let Err(err) = completed {
                log_warn(&format!("submission failed: {err}"));
            }
        }
        Err(SubmitError::InFlight) => log_warn("submission already in progress"),
        Err(err) => log_warn(&format!("submission rejected: {err}")),
    }
    view()
}

#[wasm_bindgen]
pub fn dismiss_result() -> Result<(), JsValue> {
    with_controller(|c| c.dismiss_result())
}

#[wasm_bindgen]
pub fn dismiss_error() -> Result<(), JsValue> {
    with_controller(|c| c.dismiss_error())
}

#[wasm_bindgen]
pub fn clear_all() -> Result<(), JsValue> {
    with_controller(|c| c.clear_all())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_path_keeps_order() {
        assert_eq!(node_path(&[7, 3, 0]), vec![NodeId::new(7), NodeId::new(3), NodeId::new(0)]);
    }

    #[test]
    fn host_state_defaults() {
        let s = HostState::default();
        assert_eq!(s.config.base_url, DEFAULT_BASE_URL);
        assert!(s.config.map_provider_key.is_none());
        assert!(!s.controller.can_submit());
    }
}
