// src/extractors/matcher.rs
//! Deciding whether a heading denotes a section, and relocating a TOC entry's
//! heading inside the document body.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::{Element, FilingFamily, FilingType};
use crate::extractors::catalog::{SecSection, Section};
use crate::utils::text::clean_sec_text;

// "Item 1A.", "item 3(a):", "ITEM 12"
const ITEM_TITLE_PATTERN: &str = r"(?i)item \d{1,3}(?:[a-z]|\([a-z]\))?(?:\.)?(?::)?";

static ITEM_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(ITEM_TITLE_PATTERN).expect("Failed to compile ITEM_TITLE_RE")
});

static ITEM_TITLE_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^(?:{})", ITEM_TITLE_PATTERN))
        .expect("Failed to compile ITEM_TITLE_PREFIX_RE")
});

/// Drops "Item N." markers so the remaining heading text can be matched.
pub fn remove_item_from_section_text(text: &str) -> String {
    ITEM_TITLE_RE.replace_all(text, "").trim().to_string()
}

fn is_report_item_title(title: &str) -> bool {
    ITEM_TITLE_PREFIX_RE.is_match(&clean_sec_text(title, true))
}

// Prospectus section headings are set in capitals
fn is_prospectus_section_title(title: &str) -> bool {
    let title = title.trim();
    title.chars().any(char::is_uppercase) && !title.chars().any(char::is_lowercase)
}

/// Whether a title is a section heading at all for this filing type.
pub fn is_item_title(title: &str, filing_type: FilingType) -> bool {
    match filing_type.family() {
        FilingFamily::Report => is_report_item_title(title),
        FilingFamily::Prospectus => is_prospectus_section_title(title),
    }
}

pub fn is_risk_title(title: &str, filing_type: FilingType) -> bool {
    let cleaned = clean_sec_text(title, true);
    match filing_type.family() {
        // "Summary of Risk Factors" is not the section itself
        FilingFamily::Report => {
            (cleaned.contains("1a") || cleaned.contains("risk factors"))
                && !cleaned.contains("summary")
        }
        FilingFamily::Prospectus => cleaned == "risk factors",
    }
}

/// "Table of contents" or "Index" markers.
pub fn is_toc_title(title: &str) -> bool {
    let cleaned = clean_sec_text(title, true);
    cleaned == "table of contents" || cleaned == "index"
}

/// Whether `element` is a heading for `section` in a filing of this type.
pub fn is_section_elem(section: &Section, element: &Element, filing_type: FilingType) -> bool {
    if section.is(SecSection::RiskFactors) {
        return is_risk_title(&element.text, filing_type);
    }

    let text = match filing_type.family() {
        FilingFamily::Report => clean_sec_text(&remove_item_from_section_text(&element.text), true),
        FilingFamily::Prospectus => clean_sec_text(&element.text, true),
    };
    section.pattern().is_match(&text)
}

/// Body text vs TOC title for reports, both already cleaned. A TOC title that
/// carries its item number must prefix the body text verbatim; otherwise the
/// body text is compared with its item number removed.
pub fn match_report_toc_title_to_section(text: &str, title: &str) -> bool {
    if ITEM_TITLE_PREFIX_RE.is_match(title) {
        text.starts_with(title)
    } else {
        remove_item_from_section_text(text).starts_with(title)
    }
}

pub fn match_prospectus_toc_title_to_section(text: &str, title: &str) -> bool {
    text == title
}

/// First element, in iteration order, whose text approximately matches `title`.
pub fn get_element_by_title<'a, I>(
    elements: I,
    title: &str,
    filing_type: FilingType,
) -> Option<&'a Element>
where
    I: IntoIterator<Item = &'a Element>,
{
    let matches: fn(&str, &str) -> bool = match filing_type.family() {
        FilingFamily::Report => match_report_toc_title_to_section,
        FilingFamily::Prospectus => match_prospectus_toc_title_to_section,
    };
    let title = clean_sec_text(title, true);
    elements
        .into_iter()
        .find(|element| matches(&clean_sec_text(&element.text, true), &title))
}
