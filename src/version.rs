// Version and build tracking for Researchbot

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const BUILD: &str = "0001";

pub fn full_version_info() -> String {
    format!("Researchbot {} (Build {})", VERSION, BUILD)
}
