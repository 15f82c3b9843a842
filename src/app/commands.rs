//! Command handlers - business logic for processing UI events

use crate::app::state::{AppState, ParamField, PendingProbe};
use crate::catalog::EndpointDescriptor;
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{Outcome, ProbeRecord};
use crate::query;

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = self.active_panel.prev();
    }

    pub fn scroll_up(&mut self) {
        self.response_scroll = self.response_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.response_scroll = self.response_scroll.saturating_add(1);
    }

    // ========================
    // Catalogue
    // ========================

    pub fn next_endpoint(&mut self) {
        let len = self.filtered_entries().len();
        if len > 0 {
            self.selected_entry = (self.selected_entry + 1) % len;
        }
    }

    pub fn prev_endpoint(&mut self) {
        let len = self.filtered_entries().len();
        if len > 0 {
            self.selected_entry = self.selected_entry.checked_sub(1).unwrap_or(len - 1);
        }
    }

    /// Load the highlighted catalogue entry into the probe form
    pub fn select_endpoint(&mut self) {
        let entries = self.filtered_entries();
        if let Some(descriptor) = entries.get(self.selected_entry).copied() {
            self.set_endpoint(descriptor);
            self.active_panel = Panel::Params;
        }
    }

    /// Jump straight to a named endpoint, as following a direct link would
    ///
    /// Names the catalogue does not know get the generic form but keep
    /// their path, so the probe still reaches the requested endpoint.
    pub fn jump_to(&mut self, name: &str) {
        let descriptor = crate::catalog::lookup(name);
        self.set_endpoint(descriptor);
        self.endpoint_name = name.to_string();
        if let Some(pos) = self
            .filtered_entries()
            .iter()
            .position(|d| d.name == descriptor.name)
        {
            self.selected_entry = pos;
        }
        self.active_panel = Panel::Params;
    }

    fn set_endpoint(&mut self, descriptor: EndpointDescriptor) {
        self.endpoint = descriptor;
        self.endpoint_name = descriptor.name.to_string();
        self.fields = ParamField::for_descriptor(&descriptor);
        self.selected_field = 0;
        self.cursor_position = 0;
        self.input_mode = InputMode::Normal;
        self.outcome = Outcome::Idle;
        self.share_text = None;
        self.response_scroll = 0;
    }

    // ========================
    // Catalogue filter
    // ========================

    pub fn start_filter(&mut self) {
        self.filtering = true;
        self.active_panel = Panel::Catalog;
    }

    pub fn filter_char(&mut self, c: char) {
        self.filter.push(c);
        self.clamp_selection();
    }

    pub fn filter_backspace(&mut self) {
        self.filter.pop();
        self.clamp_selection();
    }

    pub fn apply_filter(&mut self) {
        self.filtering = false;
    }

    pub fn cancel_filter(&mut self) {
        self.filtering = false;
        self.filter.clear();
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.filtered_entries().len();
        if len == 0 {
            self.selected_entry = 0;
        } else if self.selected_entry >= len {
            self.selected_entry = len - 1;
        }
    }

    // ========================
    // Parameter form
    // ========================

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.selected_field = (self.selected_field + 1) % self.fields.len();
            self.cursor_to_end();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.selected_field = self
                .selected_field
                .checked_sub(1)
                .unwrap_or(self.fields.len() - 1);
            self.cursor_to_end();
        }
    }

    pub fn start_editing(&mut self) {
        if !self.fields.is_empty() {
            self.input_mode = InputMode::Editing;
            self.cursor_to_end();
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    fn cursor_to_end(&mut self) {
        self.cursor_position = self
            .fields
            .get(self.selected_field)
            .map(|f| f.value.len())
            .unwrap_or(0);
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        if let Some(value) = self.current_field_mut() {
            if cursor_pos <= value.len() {
                value.insert(cursor_pos, c);
                self.cursor_position = cursor_pos + c.len_utf8();
            }
        }
    }

    pub fn delete_char(&mut self) {
        let cursor_pos = self.cursor_position;
        if cursor_pos == 0 {
            return;
        }
        if let Some(value) = self.current_field_mut() {
            let prev_pos = value[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            value.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    pub fn move_cursor_left(&mut self) {
        let pos = self.cursor_position;
        if pos == 0 {
            return;
        }
        if let Some(field) = self.fields.get(self.selected_field) {
            self.cursor_position = field.value[..pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_cursor_right(&mut self) {
        let pos = self.cursor_position;
        if let Some(field) = self.fields.get(self.selected_field) {
            if pos < field.value.len() {
                self.cursor_position = field.value[pos..]
                    .char_indices()
                    .nth(1)
                    .map(|(i, _)| pos + i)
                    .unwrap_or(field.value.len());
            }
        }
    }

    /// Populate the form from the descriptor's example query
    pub fn fill_example(&mut self) {
        if let Some(example) = self.endpoint.example {
            for (name, value) in query::parse_example(example) {
                if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
                    field.value = value;
                }
            }
            self.cursor_to_end();
        }
    }

    // ========================
    // Probe sending
    // ========================

    /// Issue a probe for the current endpoint and form values
    ///
    /// Sending while a probe is Pending starts a fresh one; the pending slot
    /// moves to the new ID so a late resolution of the old probe is dropped.
    pub fn prepare_probe(&mut self) -> NetworkCommand {
        if self.input_mode == InputMode::Editing {
            self.stop_editing();
        }
        let url = self.current_url();
        self.issue(self.endpoint_name.clone(), url)
    }

    /// Probe the service root, which self-describes the live endpoint set
    pub fn prepare_root_probe(&mut self) -> NetworkCommand {
        let url = format!("{}/", self.config.base_url);
        self.issue("/".to_string(), url)
    }

    fn issue(&mut self, endpoint: String, url: String) -> NetworkCommand {
        let id = self.next_id();
        self.outcome = Outcome::Pending;
        self.share_text = None;
        self.response_scroll = 0;
        self.pending = Some(PendingProbe {
            id,
            endpoint,
            url: url.clone(),
        });
        NetworkCommand::ExecuteProbe { id, url }
    }

    /// Render the probe URL as copyable text (plain and as a curl one-liner)
    pub fn share_url(&mut self) {
        let url = self.current_url();
        self.share_text = Some(format!("{}\n\ncurl '{}'", url, url));
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        // Latest-wins: anything but the most recently issued probe is stale
        let Some(pending) = self.pending.clone() else {
            return;
        };
        if pending.id != response.id() {
            return;
        }

        match response {
            NetworkResponse::Success {
                envelope, time_ms, ..
            } => {
                self.push_log(ProbeRecord {
                    endpoint: pending.endpoint,
                    url: pending.url,
                    status: Some(envelope.status_code),
                    time_ms,
                    timestamp: chrono::Utc::now(),
                });
                self.outcome = Outcome::Success(envelope);
                self.last_time_ms = time_ms;
            }
            NetworkResponse::Error {
                message, time_ms, ..
            } => {
                self.push_log(ProbeRecord {
                    endpoint: pending.endpoint,
                    url: pending.url,
                    status: None,
                    time_ms,
                    timestamp: chrono::Utc::now(),
                });
                self.outcome = Outcome::Failure(message);
                self.last_time_ms = time_ms;
            }
        }

        self.pending = None;
        self.response_scroll = 0;
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    pub fn toggle_log(&mut self) {
        self.show_log = !self.show_log;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Body, ResponseEnvelope};

    fn envelope(status: u16) -> ResponseEnvelope {
        ResponseEnvelope {
            status_code: status,
            status_text: "OK".to_string(),
            headers: Vec::new(),
            body: Body::Json(serde_json::json!({"code": status})),
        }
    }

    fn state_with(endpoint: &str, values: &[(&str, &str)]) -> AppState {
        let mut state = AppState::default();
        state.jump_to(endpoint);
        for (name, value) in values {
            if let Some(field) = state.fields.iter_mut().find(|f| f.name == *name) {
                field.value = value.to_string();
            }
        }
        state
    }

    #[test]
    fn test_prepare_probe_transitions_to_pending() {
        let mut state = state_with("hash", &[("text", "hello"), ("algorithm", "md5")]);
        let cmd = state.prepare_probe();

        assert!(state.outcome.is_pending());
        let NetworkCommand::ExecuteProbe { id, url } = cmd else {
            panic!("expected a probe command");
        };
        assert_eq!(state.pending.as_ref().unwrap().id, id);
        assert!(url.ends_with("/v2/hash?text=hello&algorithm=md5"));
    }

    #[test]
    fn test_success_resolves_and_logs() {
        let mut state = state_with("60s", &[]);
        let NetworkCommand::ExecuteProbe { id, .. } = state.prepare_probe() else {
            panic!("expected a probe command");
        };

        state.handle_response(NetworkResponse::Success {
            id,
            envelope: envelope(200),
            time_ms: 12,
        });

        assert!(matches!(state.outcome, Outcome::Success(_)));
        assert!(state.pending.is_none());
        assert_eq!(state.log.len(), 1);
        assert_eq!(state.log[0].status, Some(200));
    }

    #[test]
    fn test_transport_error_resolves_to_failure() {
        let mut state = state_with("60s", &[]);
        let NetworkCommand::ExecuteProbe { id, .. } = state.prepare_probe() else {
            panic!("expected a probe command");
        };

        state.handle_response(NetworkResponse::Error {
            id,
            message: "Connection failed".to_string(),
            time_ms: 3,
        });

        assert_eq!(state.outcome, Outcome::Failure("Connection failed".to_string()));
        assert_eq!(state.log[0].status, None);
    }

    #[test]
    fn test_resend_supersedes_earlier_probe() {
        let mut state = state_with("60s", &[]);
        let NetworkCommand::ExecuteProbe { id: first, .. } = state.prepare_probe() else {
            panic!("expected a probe command");
        };
        let NetworkCommand::ExecuteProbe { id: second, .. } = state.prepare_probe() else {
            panic!("expected a probe command");
        };
        assert_ne!(first, second);

        // The first probe resolves late - it must be dropped
        state.handle_response(NetworkResponse::Success {
            id: first,
            envelope: envelope(200),
            time_ms: 99,
        });
        assert!(state.outcome.is_pending());
        assert!(state.log.is_empty());

        // The latest probe wins
        state.handle_response(NetworkResponse::Success {
            id: second,
            envelope: envelope(404),
            time_ms: 5,
        });
        match &state.outcome {
            Outcome::Success(env) => assert_eq!(env.status_code, 404),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_response_after_resolution_is_ignored() {
        let mut state = state_with("60s", &[]);
        let NetworkCommand::ExecuteProbe { id, .. } = state.prepare_probe() else {
            panic!("expected a probe command");
        };
        state.handle_response(NetworkResponse::Success {
            id,
            envelope: envelope(200),
            time_ms: 1,
        });
        state.handle_response(NetworkResponse::Error {
            id,
            message: "late duplicate".to_string(),
            time_ms: 2,
        });
        assert!(matches!(state.outcome, Outcome::Success(_)));
    }

    #[test]
    fn test_select_endpoint_resets_form_and_outcome() {
        let mut state = state_with("hash", &[("text", "hello")]);
        state.outcome = Outcome::Failure("old".to_string());

        // "ip" sits at some catalogue position; select it via the filter
        state.filter = "ip".to_string();
        state.selected_entry = 0;
        state.select_endpoint();

        assert_eq!(state.endpoint.name, "ip");
        assert!(state.fields.iter().all(|f| f.value.is_empty()));
        assert_eq!(state.outcome, Outcome::Idle);
        assert_eq!(state.active_panel, Panel::Params);
    }

    #[test]
    fn test_jump_to_known_endpoint() {
        let mut state = AppState::default();
        state.jump_to("hash");
        assert_eq!(state.endpoint.name, "hash");
        assert_eq!(state.endpoint_name, "hash");
        assert_eq!(state.fields.len(), 2);
    }

    #[test]
    fn test_jump_to_unknown_name_keeps_path() {
        let mut state = AppState::default();
        state.jump_to("brand-new");
        assert_eq!(state.endpoint.description, "generic service");
        assert!(state.fields.is_empty());
        assert!(state.current_url().ends_with("/v2/brand-new"));
    }

    #[test]
    fn test_fill_example_populates_declared_fields() {
        let mut state = state_with("fanyi", &[]);
        state.fill_example();

        let by_name: Vec<(&str, &str)> = state
            .fields
            .iter()
            .map(|f| (f.name, f.value.as_str()))
            .collect();
        assert_eq!(
            by_name,
            vec![("text", "hello"), ("from", "en"), ("to", "zh")]
        );
    }

    #[test]
    fn test_filter_narrows_catalogue_and_clamps_selection() {
        let mut state = AppState::default();
        state.selected_entry = 20;
        for c in "fanyi".chars() {
            state.filter_char(c);
        }

        let entries = state.filtered_entries();
        assert_eq!(entries.len(), 2); // fanyi and fanyi/langs
        assert!(state.selected_entry < entries.len());

        state.cancel_filter();
        assert!(state.filter.is_empty());
    }

    #[test]
    fn test_share_url_renders_curl_line() {
        let mut state = state_with("ip", &[("ip", "8.8.8.8")]);
        state.share_url();
        let text = state.share_text.unwrap();
        assert!(text.contains("/v2/ip?ip=8.8.8.8"));
        assert!(text.contains("curl '"));
    }

    #[test]
    fn test_editing_respects_char_boundaries() {
        let mut state = state_with("baike", &[]);
        state.start_editing();
        for c in "知乎".chars() {
            state.enter_char(c);
        }
        assert_eq!(state.fields[0].value, "知乎");
        state.move_cursor_left();
        state.delete_char();
        assert_eq!(state.fields[0].value, "乎");
    }
}
