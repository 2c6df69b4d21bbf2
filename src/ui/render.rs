// Result rendering: title, article, and key takeaways
//
// Content is shown exactly as the agent produced it. `sections` exposes the
// ordered section list so the layout can be checked without a UI context.

use crate::research::ResearchResult;
use eframe::egui;
use egui_commonmark::{CommonMarkCache, CommonMarkViewer};

/// Sub-heading shown above the bullet summary
pub const TAKEAWAYS_HEADING: &str = "Key Takeaways";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Markdown heading
    Title,
    /// Styled article block
    Article,
    /// Labeled bullet list
    Takeaways,
}

/// One rendered section, borrowing its text from the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    pub kind: SectionKind,
    pub heading: Option<&'static str>,
    pub markdown: &'a str,
}

/// The three sections of a result, in display order
pub fn sections(result: &ResearchResult) -> [Section<'_>; 3] {
    [
        Section {
            kind: SectionKind::Title,
            heading: None,
            markdown: &result.title,
        },
        Section {
            kind: SectionKind::Article,
            heading: None,
            markdown: &result.body,
        },
        Section {
            kind: SectionKind::Takeaways,
            heading: Some(TAKEAWAYS_HEADING),
            markdown: &result.bullets,
        },
    ]
}

/// Draw a result into the given UI
pub fn show(ui: &mut egui::Ui, cache: &mut CommonMarkCache, result: &ResearchResult) {
    for section in sections(result) {
        match section.kind {
            SectionKind::Title => {
                CommonMarkViewer::new().show(ui, cache, section.markdown);
            }
            SectionKind::Article => {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.spacing_mut().item_spacing.y = 8.0;
                    CommonMarkViewer::new().show(ui, cache, section.markdown);
                });
            }
            SectionKind::Takeaways => {
                if let Some(heading) = section.heading {
                    ui.add_space(12.0);
                    ui.heading(heading);
                }
                CommonMarkViewer::new().show(ui, cache, section.markdown);
            }
        }
        ui.add_space(8.0);
    }
}
