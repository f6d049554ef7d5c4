// src/extractors/mod.rs
pub mod catalog;
pub mod config;
pub mod matcher;
pub mod section;
pub mod toc;

// Re-export key extraction types for convenience
pub use catalog::{resolve_section_names, sections_for, SecSection, Section, ALL_SECTIONS};
pub use config::ExtractorConfig;
pub use section::{
    get_risk_narrative,
    get_section_narrative,
    get_table_of_contents,
    ExtractedSection,
    SectionExtractor,
};
pub use toc::{ProspectusTocTrim, ReportTocTrim, TableOfContents, TocLocator, TocTrimStrategy};
