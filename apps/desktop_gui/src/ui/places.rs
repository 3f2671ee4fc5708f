//! Places search box: an autocomplete text input.

use eframe::egui;
use shared::{domain::RequestId, protocol::PlaceSuggestion};

const MIN_QUERY_CHARS: usize = 3;
const MAX_SUGGESTIONS: usize = 5;

pub enum PlacesAction {
    Query(String),
    Picked { id: RequestId, suggestion: PlaceSuggestion },
}

#[derive(Default)]
pub struct PlacesSearchBox {
    query: String,
    suggestions: Vec<PlaceSuggestion>,
    enabled: bool,
    last_pick: RequestId,
}

impl PlacesSearchBox {
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Accepts suggestions only for the text currently in the box.
    pub fn receive_suggestions(&mut self, query: &str, suggestions: Vec<PlaceSuggestion>) {
        if query.trim() == self.query.trim() {
            self.suggestions = suggestions;
            self.suggestions.truncate(MAX_SUGGESTIONS);
        }
    }

    /// Only the latest pick may move the office; earlier geocodes can land late.
    pub fn is_latest_pick(&self, id: RequestId) -> bool {
        id == self.last_pick
    }

    fn on_edit(&mut self) -> Option<PlacesAction> {
        let trimmed = self.query.trim();
        if trimmed.chars().count() < MIN_QUERY_CHARS {
            self.suggestions.clear();
            return None;
        }
        Some(PlacesAction::Query(trimmed.to_string()))
    }

    fn pick(&mut self, index: usize) -> Option<PlacesAction> {
        if index >= self.suggestions.len() {
            return None;
        }
        let suggestion = self.suggestions.swap_remove(index);
        self.query = suggestion.description.clone();
        self.suggestions.clear();
        self.last_pick = self.last_pick.next();
        Some(PlacesAction::Picked {
            id: self.last_pick,
            suggestion,
        })
    }

    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<PlacesAction> {
        let mut action = None;

        let edit = ui.add_enabled(
            self.enabled,
            egui::TextEdit::singleline(&mut self.query)
                .hint_text("Search office address")
                .desired_width(f32::INFINITY),
        );
        if edit.changed() {
            action = self.on_edit();
        }

        let mut picked = None;
        if !self.suggestions.is_empty() {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                for (index, suggestion) in self.suggestions.iter().enumerate() {
                    let clicked = ui
                        .add(egui::Button::new(suggestion.description.as_str()).frame(false))
                        .clicked();
                    if clicked {
                        picked = Some(index);
                    }
                }
            });
        }
        if let Some(index) = picked {
            action = self.pick(index);
        }

        action
    }
}
