// src/document/element.rs

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::utils::error::ExtractError;

/// Filing types the section engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FilingType {
    #[serde(rename = "10-K")]
    TenK,
    #[serde(rename = "10-Q")]
    TenQ,
    #[serde(rename = "S-1")]
    S1,
    #[serde(rename = "10-K/A")]
    TenKAmendment,
    #[serde(rename = "10-Q/A")]
    TenQAmendment,
    #[serde(rename = "S-1/A")]
    S1Amendment,
}

/// The two structural families. Reports carry "Item N." headings, prospectuses
/// carry upper-case headings without item numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilingFamily {
    Report,
    Prospectus,
}

impl FilingType {
    pub const ALL: [FilingType; 6] = [
        FilingType::TenK,
        FilingType::TenQ,
        FilingType::S1,
        FilingType::TenKAmendment,
        FilingType::TenQAmendment,
        FilingType::S1Amendment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilingType::TenK => "10-K",
            FilingType::TenQ => "10-Q",
            FilingType::S1 => "S-1",
            FilingType::TenKAmendment => "10-K/A",
            FilingType::TenQAmendment => "10-Q/A",
            FilingType::S1Amendment => "S-1/A",
        }
    }

    pub fn family(&self) -> FilingFamily {
        match self {
            FilingType::S1 | FilingType::S1Amendment => FilingFamily::Prospectus,
            _ => FilingFamily::Report,
        }
    }

    pub fn is_annual_report(&self) -> bool {
        matches!(self, FilingType::TenK | FilingType::TenKAmendment)
    }

    pub fn is_quarterly_report(&self) -> bool {
        matches!(self, FilingType::TenQ | FilingType::TenQAmendment)
    }

    /// Resolves an optional raw type tag, failing for missing or unknown types.
    pub fn resolve(raw: Option<&str>) -> Result<Self, ExtractError> {
        match raw.map(str::trim) {
            None | Some("") => Err(ExtractError::InvalidFilingType(
                "Filing type is empty.".to_string(),
            )),
            Some(value) => value.parse(),
        }
    }
}

impl FromStr for FilingType {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        FilingType::ALL
            .iter()
            .copied()
            .find(|ft| ft.as_str() == trimmed)
            .ok_or_else(|| {
                let expected: Vec<&str> = FilingType::ALL.iter().map(|ft| ft.as_str()).collect();
                ExtractError::InvalidFilingType(format!(
                    "Filing type was {}. Expected: {}",
                    trimmed,
                    expected.join(", ")
                ))
            })
    }
}

impl fmt::Display for FilingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification assigned to a span of filing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementKind {
    Title,
    NarrativeText,
    ListItem,
    PlainText,
}

impl ElementKind {
    /// Narrative text and list items are the only kinds returned as section content.
    pub fn is_narrative(&self) -> bool {
        matches!(self, ElementKind::NarrativeText | ElementKind::ListItem)
    }
}

/// One classified span of text. `position` is its index in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub text: String,
    pub kind: ElementKind,
    pub position: usize,
}

impl Element {
    pub fn is_title(&self) -> bool {
        self.kind == ElementKind::Title
    }
}

/// Ordered, read-only sequence of classified elements plus the raw filing type tag.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Document {
    filing_type: Option<String>,
    elements: Vec<Element>,
}

impl Document {
    /// Builds a document from already classified spans; positions follow input order.
    pub fn new<I, S>(filing_type: Option<&str>, spans: I) -> Self
    where
        I: IntoIterator<Item = (ElementKind, S)>,
        S: Into<String>,
    {
        let elements = spans
            .into_iter()
            .enumerate()
            .map(|(position, (kind, text))| Element {
                text: text.into(),
                kind,
                position,
            })
            .collect();

        Self {
            filing_type: filing_type.map(str::to_string),
            elements,
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The type tag exactly as found in the filing, if any.
    pub fn raw_filing_type(&self) -> Option<&str> {
        self.filing_type.as_deref()
    }

    /// The recognised filing type, or `InvalidFilingType`.
    pub fn filing_type(&self) -> Result<FilingType, ExtractError> {
        FilingType::resolve(self.raw_filing_type())
    }

    /// Every element strictly after `element` in document order.
    pub fn after(&self, element: &Element) -> &[Element] {
        let start = (element.position + 1).min(self.elements.len());
        &self.elements[start..]
    }

    /// Elements strictly between two elements; empty when they are out of order.
    pub fn between(&self, start: &Element, end: &Element) -> &[Element] {
        let from = (start.position + 1).min(self.elements.len());
        let to = end.position.min(self.elements.len());
        if from >= to {
            return &[];
        }
        &self.elements[from..to]
    }
}
