//! WebAssembly module for the PharmaFlow dashboard
//!
//! Provides client-side computation for:
//! - Expiry classification and dashboard statistics
//! - Search, tier filtering and FEFO ordering of the inventory list
//! - Form validation before a record is sent to the API
//! - Report rows and list pagination
//! - Session and theme state kept in `localStorage`
//!
//! Structured values cross the boundary as JSON strings.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::analytics::*;
pub use shared::api::*;
pub use shared::models::*;
pub use shared::report::*;
pub use shared::session::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("PharmaFlow core loaded"));
}

// ============================================================================
// Exports
// ============================================================================

/// Expiry status of one date: `{daysRemaining, tier}`
#[wasm_bindgen]
pub fn classify_expiry(expiry_date: &str, today: Option<String>) -> Result<String, JsValue> {
    classify_expiry_json(expiry_date, today.as_deref()).map_err(to_js)
}

/// Dashboard statistics over a JSON array of medications
#[wasm_bindgen]
pub fn inventory_stats(medications_json: &str, today: Option<String>) -> Result<String, JsValue> {
    inventory_stats_json(medications_json, today.as_deref()).map_err(to_js)
}

/// Visible rows of the inventory list for a search text and tier filter
#[wasm_bindgen]
pub fn filter_inventory(
    medications_json: &str,
    search_text: &str,
    tier: &str,
    today: Option<String>,
) -> Result<String, JsValue> {
    filter_inventory_json(medications_json, search_text, tier, today.as_deref()).map_err(to_js)
}

/// Validate a form payload: `{ok: true, data}` or `{ok: false, errors}`
#[wasm_bindgen]
pub fn validate_medication_form(candidate_json: &str) -> Result<String, JsValue> {
    validate_medication_json(candidate_json).map_err(to_js)
}

/// FEFO report of the full inventory
#[wasm_bindgen]
pub fn inventory_report(medications_json: &str, today: Option<String>) -> Result<String, JsValue> {
    inventory_report_json(medications_json, today.as_deref()).map_err(to_js)
}

/// One page of an already filtered list
#[wasm_bindgen]
pub fn paginate_inventory(items_json: &str, page: u32, per_page: u32) -> Result<String, JsValue> {
    paginate_json(items_json, page, per_page).map_err(to_js)
}

/// Collection and item endpoints for a base URL (blank uses the default)
#[wasm_bindgen]
pub fn api_urls(base_url: Option<String>, id: Option<String>) -> String {
    api_urls_json(base_url.as_deref(), id.as_deref())
}

// ============================================================================
// Session and theme
// ============================================================================

/// [`PreferenceStore`] over the browser's `localStorage`. Storage errors
/// (private mode, quota) are ignored and read as absent.
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        Self { storage }
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.remove_item(key);
        }
    }
}

/// Session and theme of the dashboard, hydrated from `localStorage`
#[wasm_bindgen]
pub struct DashboardState {
    store: LocalStorage,
    session: SessionState,
    theme: ThemePreference,
}

#[wasm_bindgen]
impl DashboardState {
    #[wasm_bindgen(constructor)]
    pub fn new() -> DashboardState {
        let store = LocalStorage::open();
        let session = SessionState::hydrate(&store);
        let theme = ThemePreference::hydrate(&store);
        DashboardState {
            store,
            session,
            theme,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_signed_in()
    }

    pub fn token(&self) -> Option<String> {
        self.session.token().map(str::to_string)
    }

    pub fn login(&mut self, token: Option<String>) {
        self.session.sign_in(&mut self.store, token.as_deref());
    }

    pub fn logout(&mut self) {
        self.session.sign_out(&mut self.store);
    }

    pub fn theme(&self) -> String {
        self.theme.theme().as_str().to_string()
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    /// Switch theme and return the new one
    pub fn toggle_theme(&mut self) -> String {
        self.theme.toggle(&mut self.store).as_str().to_string()
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// JSON plumbing
// ============================================================================

fn to_js(message: String) -> JsValue {
    JsValue::from_str(&message)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

fn parse_medications(medications_json: &str) -> Result<Vec<Medication>, String> {
    serde_json::from_str(medications_json).map_err(|e| format!("Invalid medications JSON: {}", e))
}

/// Explicit reference date, or the browser's local date
fn reference_date(today: Option<&str>) -> Result<NaiveDate, String> {
    match today.filter(|t| !t.is_empty()) {
        Some(raw) => parse_expiry_date(raw).map_err(|e| e.to_string()),
        None => browser_today(),
    }
}

fn browser_today() -> Result<NaiveDate, String> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .ok_or_else(|| "Browser clock returned an invalid date".to_string())
}

fn classify_expiry_json(expiry_date: &str, today: Option<&str>) -> Result<String, String> {
    let status = classify(expiry_date, reference_date(today)?).map_err(|e| e.to_string())?;
    to_json(&status)
}

fn inventory_stats_json(medications_json: &str, today: Option<&str>) -> Result<String, String> {
    let records = parse_medications(medications_json)?;
    to_json(&aggregate(&records, reference_date(today)?))
}

fn filter_inventory_json(
    medications_json: &str,
    search_text: &str,
    tier: &str,
    today: Option<&str>,
) -> Result<String, String> {
    let records = parse_medications(medications_json)?;
    let tier: TierFilter = tier.parse()?;
    let visible = filter_and_sort(&records, search_text, tier, reference_date(today)?);
    to_json(&visible)
}

fn validate_medication_json(candidate_json: &str) -> Result<String, String> {
    let raw: Value = serde_json::from_str(candidate_json)
        .map_err(|e| format!("Invalid form JSON: {}", e))?;
    let outcome = match validate_medication(&MedicationCandidate::from_value(raw)) {
        Ok(data) => json!({ "ok": true, "data": data }),
        Err(errors) => json!({
            "ok": false,
            "error": errors.first_message(),
            "errors": errors,
        }),
    };
    Ok(outcome.to_string())
}

fn inventory_report_json(medications_json: &str, today: Option<&str>) -> Result<String, String> {
    let records = parse_medications(medications_json)?;
    to_json(&build_report(&records, reference_date(today)?))
}

fn paginate_json(items_json: &str, page: u32, per_page: u32) -> Result<String, String> {
    let items: Vec<Value> =
        serde_json::from_str(items_json).map_err(|e| format!("Invalid items JSON: {}", e))?;
    let per_page = if per_page == 0 { DEFAULT_PER_PAGE } else { per_page };
    to_json(&paginate(&items, &Pagination { page, per_page }))
}

fn api_urls_json(base_url: Option<&str>, id: Option<&str>) -> String {
    let config = ApiConfig::from_base_url(base_url);
    json!({
        "baseUrl": config.base_url,
        "medications": config.medications_url(),
        "medication": id.map(|id| config.medication_url(id)),
    })
    .to_string()
}
