// UI module for Researchbot
// Contains the search form and result renderer used by the main window

pub mod form;
pub mod render;

pub use form::SearchForm;
pub use render::{sections, Section, SectionKind, TAKEAWAYS_HEADING};
