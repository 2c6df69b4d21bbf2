// Search parameter form shown in the side panel

use crate::research::{SearchRequest, DEFAULT_QUERY, DEFAULT_RESULT_LIMIT, RESULT_LIMIT_RANGE};
use eframe::egui;

/// Form state backing the query field and the result-count slider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    query: String,
    result_limit: u32,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

impl SearchForm {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn result_limit(&self) -> u32 {
        self.result_limit
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Set the slider position; values outside the slider range are clamped like the widget does
    pub fn set_result_limit(&mut self, limit: u32) {
        self.result_limit = limit.clamp(*RESULT_LIMIT_RANGE.start(), *RESULT_LIMIT_RANGE.end());
    }

    /// Snapshot the current form values as a request
    ///
    /// The query is passed through untouched, empty or not.
    pub fn to_request(&self) -> SearchRequest {
        SearchRequest::new(self.query.clone(), self.result_limit)
    }

    /// Draw the form
    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.heading("Search Parameters");
        ui.add_space(8.0);

        ui.label("Enter your query:");
        ui.text_edit_singleline(&mut self.query);
        ui.add_space(8.0);

        ui.label("Number of search results:");
        ui.add(egui::Slider::new(&mut self.result_limit, RESULT_LIMIT_RANGE));
    }
}
