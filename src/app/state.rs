//! App state - pure data structure with no I/O logic

use std::collections::{HashMap, VecDeque};

use crate::catalog::{EndpointDescriptor, CATALOG};
use crate::config::Config;
use crate::constants::API_PREFIX;
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::RenderState;
use crate::models::{Outcome, ProbeRecord};
use crate::query;

/// Probe records kept for the session
const MAX_LOG: usize = 50;

/// One editable parameter field, in the order the descriptor declares
#[derive(Clone, Debug)]
pub struct ParamField {
    pub name: &'static str,
    pub value: String,
}

impl ParamField {
    /// Empty form matching a descriptor's declared parameters
    pub fn for_descriptor(descriptor: &EndpointDescriptor) -> Vec<ParamField> {
        descriptor
            .params
            .iter()
            .map(|&name| ParamField {
                name,
                value: String::new(),
            })
            .collect()
    }
}

/// The probe currently awaiting resolution
///
/// The URL was handed to the transport when the probe was issued; later
/// field edits do not affect it.
#[derive(Clone, Debug)]
pub struct PendingProbe {
    pub id: u64,
    pub endpoint: String,
    pub url: String,
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Catalogue
    pub selected_entry: usize,
    pub filter: String,
    pub filtering: bool,

    // Current endpoint + parameter form
    pub endpoint: EndpointDescriptor,
    /// Path name actually probed; kept separately so a deep link to a name
    /// the catalogue does not know still hits the right path
    pub endpoint_name: String,
    pub fields: Vec<ParamField>,
    pub selected_field: usize,
    pub cursor_position: usize,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub response_scroll: u16,

    // Probe outcome
    pub outcome: Outcome,
    pub share_text: Option<String>,
    pub last_time_ms: u64,
    pub next_probe_id: u64,
    pub pending: Option<PendingProbe>,

    // Session probe log
    pub log: VecDeque<ProbeRecord>,

    // Popups
    pub show_help: bool,
    pub show_log: bool,

    // Config (externally supplied base URL)
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let endpoint = CATALOG[0];
        AppState {
            selected_entry: 0,
            filter: String::new(),
            filtering: false,
            endpoint,
            endpoint_name: endpoint.name.to_string(),
            fields: ParamField::for_descriptor(&endpoint),
            selected_field: 0,
            cursor_position: 0,
            active_panel: Panel::Catalog,
            input_mode: InputMode::Normal,
            response_scroll: 0,
            outcome: Outcome::Idle,
            share_text: None,
            last_time_ms: 0,
            next_probe_id: 1,
            pending: None,
            log: VecDeque::with_capacity(MAX_LOG),
            show_help: false,
            show_log: false,
            config,
        }
    }

    /// Generate a unique probe ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_probe_id;
        self.next_probe_id += 1;
        id
    }

    /// Catalogue entries matching the current filter
    pub fn filtered_entries(&self) -> Vec<EndpointDescriptor> {
        let needle = self.filter.trim().to_lowercase();
        if needle.is_empty() {
            return CATALOG.to_vec();
        }
        CATALOG
            .iter()
            .filter(|d| d.name.to_lowercase().contains(&needle))
            .copied()
            .collect()
    }

    /// Current form values as the parameter mapping the builder consumes
    pub fn param_values(&self) -> HashMap<String, String> {
        self.fields
            .iter()
            .map(|f| (f.name.to_string(), f.value.clone()))
            .collect()
    }

    /// URL the next send would probe, rebuilt from the live form
    pub fn current_url(&self) -> String {
        let path = format!("{}/{}", API_PREFIX, self.endpoint_name);
        query::build_url(
            &self.config.base_url,
            &path,
            &self.endpoint,
            &self.param_values(),
        )
    }

    /// Value buffer of the selected form field, if any
    pub fn current_field_mut(&mut self) -> Option<&mut String> {
        let index = self.selected_field;
        self.fields.get_mut(index).map(|f| &mut f.value)
    }

    /// Append one record to the session log, oldest out first
    pub fn push_log(&mut self, record: ProbeRecord) {
        if self.log.len() >= MAX_LOG {
            self.log.pop_back();
        }
        self.log.push_front(record);
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            entries: self.filtered_entries(),
            selected_entry: self.selected_entry,
            filter: self.filter.clone(),
            filtering: self.filtering,
            endpoint: self.endpoint,
            endpoint_name: self.endpoint_name.clone(),
            fields: self.fields.clone(),
            selected_field: self.selected_field,
            cursor_position: self.cursor_position,
            url_preview: self.current_url(),
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            response_scroll: self.response_scroll,
            outcome: self.outcome.clone(),
            share_text: self.share_text.clone(),
            last_time_ms: self.last_time_ms,
            show_help: self.show_help,
            show_log: self.show_log,
            log: self.log.iter().cloned().collect(),
            base_url: self.config.base_url.clone(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
