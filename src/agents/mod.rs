// Agent Configurations Module
// Contains pre-configured agent templates

pub mod researcher;

pub use researcher::create_research_agent;
