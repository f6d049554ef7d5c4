// src/extractors/section.rs

// --- Imports ---
use crate::document::{Document, Element, FilingType};
use crate::extractors::catalog::{SecSection, Section};
use crate::extractors::config::ExtractorConfig;
use crate::extractors::matcher::{get_element_by_title, is_item_title, is_section_elem};
use crate::extractors::toc::{TableOfContents, TocLocator};
use crate::utils::error::ExtractError;

// --- Data Structures ---

/// The narrative of one requested section.
#[derive(Debug, Clone)]
pub struct ExtractedSection<'a> {
    pub label: String,
    pub elements: Vec<&'a Element>,
}

impl<'a> ExtractedSection<'a> {
    pub fn texts(&self) -> Vec<&'a str> {
        self.elements.iter().map(|e| e.text.as_str()).collect()
    }
}

/// Narrative text and list items of `elements`. With `up_to_next_title` the
/// collection stops at the first element of any other kind.
pub fn get_narrative_texts(elements: &[Element], up_to_next_title: bool) -> Vec<&Element> {
    if up_to_next_title {
        elements
            .iter()
            .take_while(|e| e.kind.is_narrative())
            .collect()
    } else {
        elements.iter().filter(|e| e.kind.is_narrative()).collect()
    }
}

// --- Main Extractor Structure ---
pub struct SectionExtractor {
    locator: TocLocator,
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

impl SectionExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            locator: TocLocator::new(config),
        }
    }

    /// Identifies the elements that are likely the table of contents.
    pub fn get_table_of_contents<'a>(
        &self,
        document: &'a Document,
    ) -> Result<TableOfContents<'a>, ExtractError> {
        let filing_type = document.filing_type()?;
        Ok(self.locator.locate(document, filing_type))
    }

    /// Narrative elements that fall under the given section heading.
    pub fn get_section_narrative<'a>(
        &self,
        document: &'a Document,
        section: &Section,
    ) -> Result<Vec<&'a Element>, ExtractError> {
        let filing_type = document.filing_type()?;
        let toc = self.locator.locate(document, filing_type);
        Ok(self.narrative_for(document, filing_type, &toc, section))
    }

    pub fn get_risk_narrative<'a>(
        &self,
        document: &'a Document,
    ) -> Result<Vec<&'a Element>, ExtractError> {
        self.get_section_narrative(document, &Section::from(SecSection::RiskFactors))
    }

    /// Extracts several sections, locating the table of contents only once.
    pub fn extract_sections<'a>(
        &self,
        document: &'a Document,
        sections: &[Section],
    ) -> Result<Vec<ExtractedSection<'a>>, ExtractError> {
        let filing_type = document.filing_type()?;
        let toc = self.locator.locate(document, filing_type);
        tracing::info!(
            "Extracting {} sections from {} filing ({} elements, {} TOC entries)",
            sections.len(),
            filing_type,
            document.len(),
            toc.len()
        );

        Ok(sections
            .iter()
            .map(|section| {
                let elements = self.narrative_for(document, filing_type, &toc, section);
                tracing::info!("Section {}: {} elements", section.label(), elements.len());
                ExtractedSection {
                    label: section.label().to_string(),
                    elements,
                }
            })
            .collect())
    }

    fn narrative_for<'a>(
        &self,
        document: &'a Document,
        filing_type: FilingType,
        toc: &TableOfContents<'a>,
        section: &Section,
    ) -> Vec<&'a Element> {
        if toc.is_empty() {
            tracing::debug!("No usable TOC, scanning for {} linearly", section.label());
            return get_section_narrative_no_toc(document, filing_type, section);
        }
        get_section_narrative_with_toc(document, filing_type, toc, section)
    }
}

/// Single forward pass for documents without a usable table of contents.
pub fn get_section_narrative_no_toc<'a>(
    document: &'a Document,
    filing_type: FilingType,
    section: &Section,
) -> Vec<&'a Element> {
    // Tables are not skipped: some filers use them only to format headings.
    let mut section_elements: Vec<&Element> = Vec::new();
    let mut in_section = false;

    for element in document.elements() {
        let is_title = element.is_title();
        if in_section {
            if is_title && is_item_title(&element.text, filing_type) {
                if !section_elements.is_empty() {
                    return section_elements;
                }
                // Nothing collected yet: a false start, keep looking.
                tracing::trace!("False start for {} at '{}'", section.label(), element.text);
                in_section = false;
            } else if element.kind.is_narrative() {
                section_elements.push(element);
            }
        }

        if is_title && is_section_elem(section, element, filing_type) {
            in_section = true;
        }
    }

    section_elements
}

/// The TOC entry for `section` and the first entry after it naming a different section.
pub fn get_toc_sections<'a>(
    section: &Section,
    toc: &TableOfContents<'a>,
    filing_type: FilingType,
) -> Option<(&'a Element, Option<&'a Element>)> {
    let section_toc = toc
        .elements()
        .iter()
        .copied()
        .find(|e| is_section_elem(section, e, filing_type))?;

    let next_section_toc = toc
        .after(section_toc)
        .iter()
        .copied()
        .find(|e| !is_section_elem(section, e, filing_type));

    Some((section_toc, next_section_toc))
}

/// Whether `section` closes a report filing, given what its TOC lists.
pub fn is_last_section_in_report(
    section: &Section,
    toc: &TableOfContents<'_>,
    filing_type: FilingType,
) -> bool {
    if filing_type.is_annual_report() {
        if section.is(SecSection::FormSummary) {
            return true;
        }
        if section.is(SecSection::Exhibits) {
            let form_summary = Section::from(SecSection::FormSummary);
            return !toc
                .elements()
                .iter()
                .any(|e| is_section_elem(&form_summary, e, filing_type));
        }
    }
    if filing_type.is_quarterly_report() && section.is(SecSection::Exhibits) {
        return true;
    }
    false
}

/// Resolves a section through the table of contents.
pub fn get_section_narrative_with_toc<'a>(
    document: &'a Document,
    filing_type: FilingType,
    toc: &TableOfContents<'a>,
    section: &Section,
) -> Vec<&'a Element> {
    let Some((section_toc, next_section_toc)) = get_toc_sections(section, toc, filing_type) else {
        tracing::debug!("{} not listed in the table of contents", section.label());
        return Vec::new();
    };

    // Start past the next TOC entry (the TOC can swallow body headings) and scan
    // from the end of the document backwards.
    let anchor = next_section_toc.unwrap_or(section_toc);
    let Some(section_start) = get_element_by_title(
        document.after(anchor).iter().rev(),
        &section_toc.text,
        filing_type,
    ) else {
        tracing::debug!(
            "Heading '{}' for {} not found in the body",
            section_toc.text,
            section.label()
        );
        return Vec::new();
    };
    let after_heading = document.after(section_start);

    let next_section_toc = match next_section_toc {
        Some(next) if !is_last_section_in_report(section, toc, filing_type) => next,
        _ => {
            tracing::debug!("{} is the last section, collecting up to the next title", section.label());
            return get_narrative_texts(after_heading, true);
        }
    };

    match get_element_by_title(after_heading, &next_section_toc.text, filing_type) {
        Some(section_end) => {
            tracing::trace!(
                "{} spans positions {}..{}",
                section.label(),
                section_start.position,
                section_end.position
            );
            get_narrative_texts(document.between(section_start, section_end), false)
        }
        None => {
            // Never run to the end of the document on a missing boundary.
            tracing::debug!(
                "End heading '{}' for {} not found, collecting up to the next title",
                next_section_toc.text,
                section.label()
            );
            get_narrative_texts(after_heading, true)
        }
    }
}

/// [`SectionExtractor::get_table_of_contents`] with the default configuration.
pub fn get_table_of_contents(document: &Document) -> Result<TableOfContents<'_>, ExtractError> {
    SectionExtractor::default().get_table_of_contents(document)
}

/// [`SectionExtractor::get_section_narrative`] with the default configuration.
pub fn get_section_narrative<'a>(
    document: &'a Document,
    section: &Section,
) -> Result<Vec<&'a Element>, ExtractError> {
    SectionExtractor::default().get_section_narrative(document, section)
}

/// Narrative under the risk factors heading.
pub fn get_risk_narrative(document: &Document) -> Result<Vec<&Element>, ExtractError> {
    SectionExtractor::default().get_risk_narrative(document)
}
