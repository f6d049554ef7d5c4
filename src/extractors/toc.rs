// src/extractors/toc.rs
//! Table of contents discovery.
//!
//! A TOC shows up as a dense run of headings. Title positions are grouped by
//! gap, the first group holding both a risk-factors heading and a TOC marker
//! wins, and the winner is trimmed to the TOC proper by a filing-family
//! specific strategy.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::classifier::is_title_candidate;
use crate::document::{Document, Element, FilingFamily, FilingType};
use crate::extractors::config::ExtractorConfig;
use crate::extractors::matcher::{is_risk_title, is_toc_title};
use crate::utils::text::{clean_sec_text, is_numeric};

static PART_I_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^part i\b").expect("Failed to compile PART_I_RE")
});

/// The TOC entries of a document, borrowed in document order.
#[derive(Debug, Clone, Default)]
pub struct TableOfContents<'a> {
    elements: Vec<&'a Element>,
}

impl<'a> TableOfContents<'a> {
    pub fn new(elements: Vec<&'a Element>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[&'a Element] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Entries after `entry`, which must be an entry of this TOC.
    pub fn after(&self, entry: &Element) -> &[&'a Element] {
        match self.elements.iter().position(|e| e.position == entry.position) {
            Some(idx) => &self.elements[idx + 1..],
            None => &[],
        }
    }

    pub fn texts(&self) -> Vec<&'a str> {
        self.elements.iter().map(|e| e.text.as_str()).collect()
    }
}

/// Groups sorted positions whose consecutive gap is at most `radius`.
/// Positions with no neighbour inside the radius are noise and dropped.
pub fn cluster_positions(positions: &[usize], radius: usize) -> Vec<Vec<usize>> {
    let mut sorted = positions.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut clusters: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    for position in sorted {
        match current.last() {
            Some(&last) if position - last <= radius => current.push(position),
            _ => {
                if current.len() > 1 {
                    clusters.push(std::mem::take(&mut current));
                }
                current = vec![position];
            }
        }
    }
    if current.len() > 1 {
        clusters.push(current);
    }
    clusters
}

/// Narrows a TOC candidate down to the TOC proper.
pub trait TocTrimStrategy {
    fn name(&self) -> &'static str;

    /// Returns an empty list when no plausible TOC window exists.
    fn trim<'a>(&self, candidate: &[&'a Element], max_len: usize) -> Vec<&'a Element>;
}

/// Reports restate "Part I" in the body right after the TOC, so the TOC is the
/// window between the first two "Part I" headings.
pub struct ReportTocTrim;

impl TocTrimStrategy for ReportTocTrim {
    fn name(&self) -> &'static str {
        "report"
    }

    fn trim<'a>(&self, candidate: &[&'a Element], max_len: usize) -> Vec<&'a Element> {
        let mut start: Option<usize> = None;
        for (i, element) in candidate.iter().enumerate() {
            if !PART_I_RE.is_match(&clean_sec_text(&element.text, false)) {
                continue;
            }
            match start {
                None => start = Some(i),
                Some(first) => {
                    // The entry just before the second "Part I" belongs to the body.
                    tracing::debug!("TOC bounded by 'Part I' headings at {} and {}", first, i);
                    return candidate[first..i - 1].to_vec();
                }
            }
        }

        if let Some(first) = start {
            let tail = &candidate[first..];
            if tail.len() < max_len {
                return tail.to_vec();
            }
            tracing::debug!(
                "Single 'Part I' heading leaves {} entries (limit {}), rejecting",
                tail.len(),
                max_len
            );
        }
        Vec::new()
    }
}

/// Prospectuses repeat their "prospectus ..." title once in the TOC and once
/// where the body starts; the first duplicated pair bounds the TOC.
pub struct ProspectusTocTrim;

impl TocTrimStrategy for ProspectusTocTrim {
    fn name(&self) -> &'static str {
        "prospectus"
    }

    fn trim<'a>(&self, candidate: &[&'a Element], max_len: usize) -> Vec<&'a Element> {
        // First-seen order of cleaned texts, with every index they occur at
        let mut order: Vec<String> = Vec::new();
        let mut indices: HashMap<String, Vec<usize>> = HashMap::new();
        let mut last_prospectus: Option<usize> = None;

        for (i, element) in candidate.iter().enumerate() {
            let cleaned = clean_sec_text(&element.text, true);
            if cleaned.contains("prospectus") {
                last_prospectus = Some(i);
            }
            let slot = indices.entry(cleaned.clone()).or_default();
            if slot.is_empty() {
                order.push(cleaned);
            }
            slot.push(i);
        }

        for title in &order {
            let idxs = &indices[title];
            if title.contains("prospectus") && idxs.len() == 2 {
                tracing::debug!("TOC bounded by duplicated title '{}' at {:?}", title, idxs);
                return candidate[idxs[0]..idxs[1] - 1].to_vec();
            }
        }

        if let Some(first) = last_prospectus {
            let tail = &candidate[first..];
            if tail.len() < max_len {
                return tail.to_vec();
            }
            tracing::debug!(
                "Prospectus fallback leaves {} entries (limit {}), rejecting",
                tail.len(),
                max_len
            );
        }
        Vec::new()
    }
}

/// A cluster is a TOC candidate when its Title members include both a
/// risk-factors heading and a TOC marker. Relaxed-override members only
/// widen the cluster.
fn is_toc_cluster(cluster_elements: &[&Element], filing_type: FilingType) -> bool {
    let titles = || cluster_elements.iter().filter(|e| e.is_title());
    titles().any(|e| is_risk_title(&e.text, filing_type)) && titles().any(|e| is_toc_title(&e.text))
}

fn strategy_for(family: FilingFamily) -> &'static dyn TocTrimStrategy {
    match family {
        FilingFamily::Report => &ReportTocTrim,
        FilingFamily::Prospectus => &ProspectusTocTrim,
    }
}

/// Finds the table of contents of a document.
pub struct TocLocator {
    config: ExtractorConfig,
}

impl TocLocator {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn locate<'a>(&self, document: &'a Document, filing_type: FilingType) -> TableOfContents<'a> {
        let elements = document.elements();
        let title_positions: Vec<usize> = elements
            .iter()
            .filter(|e| is_title_candidate(e))
            .map(|e| e.position)
            .collect();

        if title_positions.is_empty() {
            tracing::debug!("No titles in document, no table of contents");
            return TableOfContents::default();
        }

        let clusters = cluster_positions(&title_positions, self.config.cluster_radius);
        tracing::trace!("Found {} title clusters", clusters.len());

        for (cluster_id, cluster) in clusters.iter().enumerate() {
            let cluster_elements: Vec<&Element> = cluster.iter().map(|&i| &elements[i]).collect();
            if is_toc_cluster(&cluster_elements, filing_type) {
                tracing::debug!(
                    "Cluster {} ({} titles from position {}) looks like a table of contents",
                    cluster_id,
                    cluster.len(),
                    cluster[0]
                );
                return self.filter_table_of_contents(&cluster_elements, filing_type);
            }
        }

        tracing::debug!("No cluster carries both a risk heading and a TOC marker, trimming whole document");
        let all: Vec<&Element> = elements.iter().collect();
        self.filter_table_of_contents(&all, filing_type)
    }

    /// Drops page numbers, then applies the family's trim strategy.
    fn filter_table_of_contents<'a>(
        &self,
        candidate: &[&'a Element],
        filing_type: FilingType,
    ) -> TableOfContents<'a> {
        let without_page_numbers: Vec<&Element> = candidate
            .iter()
            .copied()
            .filter(|e| !is_numeric(e.text.trim()))
            .collect();

        let strategy = strategy_for(filing_type.family());
        let trimmed = strategy.trim(&without_page_numbers, self.config.max_toc_len);
        if trimmed.is_empty() {
            tracing::debug!("{} TOC trim found no usable table of contents", strategy.name());
        } else {
            tracing::debug!("{} TOC trim kept {} entries", strategy.name(), trimmed.len());
        }
        TableOfContents::new(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ElementKind;

    fn elements(texts: &[&str]) -> Vec<Element> {
        texts
            .iter()
            .enumerate()
            .map(|(position, text)| Element {
                text: text.to_string(),
                kind: ElementKind::Title,
                position,
            })
            .collect()
    }

    fn texts<'a>(elements: &[&'a Element]) -> Vec<&'a str> {
        elements.iter().map(|e| e.text.as_str()).collect()
    }

    #[test]
    fn test_cluster_positions_by_gap() {
        let clusters = cluster_positions(&[0, 2, 8, 20, 40, 41, 47, 54], 6);
        assert_eq!(clusters, vec![vec![0, 2, 8], vec![40, 41, 47]]);
    }

    #[test]
    fn test_cluster_positions_is_deterministic_and_order_free() {
        let a = cluster_positions(&[11, 3, 5, 30, 31, 18], 6);
        let b = cluster_positions(&[31, 30, 18, 5, 3, 11], 6);
        assert_eq!(a, b);
        // 18 is exactly seven past 11: noise
        assert_eq!(a, vec![vec![3, 5, 11], vec![30, 31]]);
        assert!(cluster_positions(&[], 6).is_empty());
        assert!(cluster_positions(&[4], 6).is_empty());
    }

    #[test]
    fn test_report_trim_between_part_headings() {
        let els = elements(&[
            "TABLE OF CONTENTS",
            "Part I. Financial Information",
            "Item 1A. Risk Factors",
            "Item 2. Properties",
            "Cover text",
            "PART I",
            "Item 1A. Risk Factors",
        ]);
        let refs: Vec<&Element> = els.iter().collect();
        let trimmed = ReportTocTrim.trim(&refs, 1000);
        assert_eq!(
            texts(&trimmed),
            vec!["Part I. Financial Information", "Item 1A. Risk Factors", "Item 2. Properties"]
        );
    }

    #[test]
    fn test_report_trim_single_part_heading_respects_limit() {
        let els = elements(&["Intro", "Part I", "Item 1. Business", "Item 1A. Risk Factors"]);
        let refs: Vec<&Element> = els.iter().collect();
        assert_eq!(ReportTocTrim.trim(&refs, 1000).len(), 3);
        assert!(ReportTocTrim.trim(&refs, 3).is_empty());
        assert!(ReportTocTrim.trim(&refs[..1], 1000).is_empty());
    }

    #[test]
    fn test_report_trim_ignores_part_ii() {
        let els = elements(&["Part II", "Part III", "Part IV"]);
        let refs: Vec<&Element> = els.iter().collect();
        assert!(ReportTocTrim.trim(&refs, 1000).is_empty());
    }

    #[test]
    fn test_prospectus_trim_on_duplicated_title() {
        let els = elements(&[
            "TABLE OF CONTENTS",
            "PROSPECTUS SUMMARY",
            "RISK FACTORS",
            "DILUTION",
            "THE OFFERING",
            "PROSPECTUS SUMMARY",
            "RISK FACTORS",
        ]);
        let refs: Vec<&Element> = els.iter().collect();
        let trimmed = ProspectusTocTrim.trim(&refs, 1000);
        assert_eq!(texts(&trimmed), vec!["PROSPECTUS SUMMARY", "RISK FACTORS", "DILUTION"]);
    }

    #[test]
    fn test_prospectus_trim_falls_back_to_last_mention() {
        let els = elements(&["Cover", "About this Prospectus", "Risk Factors", "Dilution"]);
        let refs: Vec<&Element> = els.iter().collect();
        assert_eq!(
            texts(&ProspectusTocTrim.trim(&refs, 1000)),
            vec!["About this Prospectus", "Risk Factors", "Dilution"]
        );
        assert!(ProspectusTocTrim.trim(&refs, 2).is_empty());
        assert!(ProspectusTocTrim.trim(&refs[2..], 1000).is_empty());
    }

    #[test]
    fn test_locate_skips_clusters_without_both_markers() {
        let mut spans: Vec<(ElementKind, String)> = Vec::new();
        // A dense run with a risk heading but no TOC marker
        spans.push((ElementKind::Title, "Item 1A. Risk Factors".into()));
        spans.push((ElementKind::Title, "Overview".into()));
        for i in 0..10 {
            spans.push((ElementKind::NarrativeText, format!("Filler paragraph number {}.", i)));
        }
        // The real TOC
        for text in ["Table of Contents", "Part I", "Item 1A. Risk Factors", "Item 2. Properties"] {
            spans.push((ElementKind::Title, text.to_string()));
        }
        spans.push((ElementKind::PlainText, "7".into()));
        spans.push((ElementKind::Title, "Part I".into()));
        let doc = Document::new(Some("10-K"), spans);

        let toc = TocLocator::new(ExtractorConfig::default()).locate(&doc, FilingType::TenK);
        // The first "Part I" opens the window; the entry before the second is dropped
        assert_eq!(toc.texts(), vec!["Part I", "Item 1A. Risk Factors"]);
    }

    #[test]
    fn test_toc_cluster_markers_must_be_titles() {
        let risk = Element {
            text: "Item 1A. Risk Factors".to_string(),
            kind: ElementKind::Title,
            position: 0,
        };
        let marker = |kind| Element {
            text: "Table of Contents".to_string(),
            kind,
            position: 1,
        };
        let plain_marker = marker(ElementKind::PlainText);
        let title_marker = marker(ElementKind::Title);

        assert!(!is_toc_cluster(&[&risk, &plain_marker], FilingType::TenK));
        assert!(is_toc_cluster(&[&risk, &title_marker], FilingType::TenK));

        let plain_risk = Element {
            kind: ElementKind::NarrativeText,
            ..risk.clone()
        };
        assert!(!is_toc_cluster(&[&plain_risk, &title_marker], FilingType::TenK));
    }

    #[test]
    fn test_locate_on_empty_document() {
        let doc = Document::new(Some("10-K"), Vec::<(ElementKind, String)>::new());
        let toc = TocLocator::new(ExtractorConfig::default()).locate(&doc, FilingType::TenK);
        assert!(toc.is_empty());
    }

    #[test]
    fn test_toc_after_entry() {
        let els = elements(&["A", "B", "C"]);
        let toc = TableOfContents::new(els.iter().collect());
        assert_eq!(texts(toc.after(&els[0])), vec!["B", "C"]);
        assert!(toc.after(&els[2]).is_empty());
    }
}
