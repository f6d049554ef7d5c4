//! sec_sections: locate named sections (Risk Factors, MD&A, ...) in 10-K,
//! 10-Q and S-1 filings and return the narrative text under them.
//!
//! A filing is parsed into an ordered list of classified elements
//! ([`Document`]). The table of contents is discovered from dense runs of
//! headings, and each requested section is resolved through it, or through a
//! single linear scan when no usable table of contents exists.

pub mod document;
pub mod extractors;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use document::{Document, Element, ElementKind, FilingFamily, FilingType};
pub use extractors::{
    get_risk_narrative, get_section_narrative, get_table_of_contents, resolve_section_names,
    sections_for, ExtractedSection, ExtractorConfig, SecSection, Section, SectionExtractor,
    TableOfContents, ALL_SECTIONS,
};
pub use utils::error::{AppError, ExtractError, StorageError};
