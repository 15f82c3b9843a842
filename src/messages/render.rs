//! Render state - data structure sent from App layer to UI for rendering

use crate::app::state::ParamField;
use crate::catalog::{EndpointDescriptor, CATALOG};
use crate::messages::ui_events::{InputMode, Panel};
use crate::models::{Outcome, ProbeRecord};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Catalogue (already filtered)
    pub entries: Vec<EndpointDescriptor>,
    pub selected_entry: usize,
    pub filter: String,
    pub filtering: bool,

    // Current endpoint + parameter form
    pub endpoint: EndpointDescriptor,
    pub endpoint_name: String,
    pub fields: Vec<ParamField>,
    pub selected_field: usize,
    pub cursor_position: usize,
    pub url_preview: String,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub response_scroll: u16,

    // Probe outcome
    pub outcome: Outcome,
    /// When set, shown in the response panel instead of the outcome
    pub share_text: Option<String>,
    pub last_time_ms: u64,

    // Popups
    pub show_help: bool,
    pub show_log: bool,
    pub log: Vec<ProbeRecord>,

    // Config
    pub base_url: String,
}

impl Default for RenderState {
    fn default() -> Self {
        use crate::constants::DEFAULT_BASE_URL;
        let endpoint = CATALOG[0];
        RenderState {
            entries: CATALOG.to_vec(),
            selected_entry: 0,
            filter: String::new(),
            filtering: false,
            endpoint,
            endpoint_name: endpoint.name.to_string(),
            fields: ParamField::for_descriptor(&endpoint),
            selected_field: 0,
            cursor_position: 0,
            url_preview: format!("{}{}", DEFAULT_BASE_URL, endpoint.path()),
            active_panel: Panel::Catalog,
            input_mode: InputMode::Normal,
            response_scroll: 0,
            outcome: Outcome::Idle,
            share_text: None,
            last_time_ms: 0,
            show_help: false,
            show_log: false,
            log: Vec::new(),
            base_url: String::from(DEFAULT_BASE_URL),
        }
    }
}
