use sec_sections::{
    get_risk_narrative, get_section_narrative, get_table_of_contents, Document,
    ExtractorConfig, SecSection, Section, SectionExtractor,
};
use sec_sections::ElementKind::{NarrativeText as N, PlainText as P, Title as T};

fn texts(elements: &[&sec_sections::Element]) -> Vec<String> {
    elements.iter().map(|e| e.text.clone()).collect()
}

/// A report whose TOC ends with an exhibits entry and a form summary entry.
fn closing_sections_document(filing_type: &str) -> Document {
    Document::new(
        Some(filing_type),
        vec![
            (T, "TABLE OF CONTENTS"),
            (T, "Part I. OTHER INFORMATION"),
            (T, "ITEM 1. PROSPECTUS SUMMARY"),
            (T, "ITEM 7 EXHIBIT"),
            (P, "1"),
            (T, "ITEM 8 FORM 10-K SUMMARY"),
            (P, "1"),
            (T, "SECURITY AND EXCHANGE COMISSION FILING"),
            (T, "Part I."),
            (T, "OTHER INFORMATION"),
            (T, "ITEM 1. PROSPECTUS SUMMARY"),
            (N, "This is a section on prospectus."),
            (T, "ITEM 7 EXHIBIT"),
            (N, "This is a list of exhibits."),
            (T, "ITEM 8 FORM 10-K SUMMARY"),
            (N, "This is a summary of the form."),
        ],
    )
}

#[test]
fn test_custom_pattern_without_table_of_contents() {
    let doc = Document::new(
        Some("10-K"),
        vec![
            (T, "SECURITY AND EXCHANGE COMISSION FILING"),
            (T, "PROSPECTUS SUMMARY"),
            (N, "Here is a summary of the prospectus."),
            (T, "ITEM 1A. RISK FACTORS"),
            (N, "The business could be attacked by wolverines."),
        ],
    );
    assert!(get_table_of_contents(&doc).unwrap().is_empty());

    let section = Section::custom("SUMMARY", r"^(?:prospectus )?summary$").unwrap();
    let narrative = get_section_narrative(&doc, &section).unwrap();
    assert_eq!(texts(&narrative), vec!["Here is a summary of the prospectus."]);
}

#[test]
fn test_invalid_custom_pattern_is_rejected() {
    assert!(Section::custom("BROKEN", "(unclosed").is_err());
}

#[test]
fn test_exhibits_stops_before_form_summary() {
    let doc = closing_sections_document("10-K");
    let toc = get_table_of_contents(&doc).unwrap();
    assert_eq!(
        toc.texts(),
        vec![
            "Part I. OTHER INFORMATION",
            "ITEM 1. PROSPECTUS SUMMARY",
            "ITEM 7 EXHIBIT",
            "ITEM 8 FORM 10-K SUMMARY",
        ]
    );

    let exhibits = get_section_narrative(&doc, &SecSection::Exhibits.into()).unwrap();
    assert_eq!(texts(&exhibits), vec!["This is a list of exhibits."]);
}

#[test]
fn test_last_sections_of_reports() {
    let cases = [
        ("10-K", SecSection::FormSummary, "This is a summary of the form."),
        ("10-K/A", SecSection::FormSummary, "This is a summary of the form."),
        ("10-Q", SecSection::Exhibits, "This is a list of exhibits."),
        ("10-Q/A", SecSection::Exhibits, "This is a list of exhibits."),
    ];
    for (filing_type, section, expected) in cases {
        let doc = closing_sections_document(filing_type);
        let narrative = get_section_narrative(&doc, &section.into()).unwrap();
        assert_eq!(texts(&narrative), vec![expected], "{} {:?}", filing_type, section);
    }
}

#[test]
fn test_extract_sections_labels_and_bounds() {
    let doc = closing_sections_document("10-K");
    let extractor = SectionExtractor::new(ExtractorConfig::default());
    let sections: Vec<Section> = vec![
        SecSection::ProspectusSummary.into(),
        SecSection::Exhibits.into(),
        SecSection::RiskFactors.into(),
    ];

    let extracted = extractor.extract_sections(&doc, &sections).unwrap();
    let labels: Vec<&str> = extracted.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["PROSPECTUS_SUMMARY", "EXHIBITS", "RISK_FACTORS"]);

    for section in &extracted {
        assert!(section.elements.len() <= doc.len());
        assert!(section.elements.iter().all(|e| e.kind.is_narrative()));
    }
    assert_eq!(extracted[0].texts(), vec!["This is a section on prospectus."]);
    assert!(extracted[2].elements.is_empty());
}

#[test]
fn test_extraction_is_repeatable() {
    let doc = closing_sections_document("10-K");
    let first = get_section_narrative(&doc, &SecSection::Exhibits.into()).unwrap();
    let second = get_section_narrative(&doc, &SecSection::Exhibits.into()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_raw_filing_end_to_end() {
    let raw = r#"<SEC-DOCUMENT>
        <TYPE>10-Q
        <HTML><body>
            <p>ITEM 1A. RISK FACTORS</p>
            <p>Wolverines</p>
            <p>The business could be attacked by wolverines.</p>
            <p>The business could also be attacked by bears.</p>
            <p>ITEM 2. PROPERTIES</p>
            <p>One building in the middle of the woods.</p>
        </body></HTML>
    </SEC-DOCUMENT>"#;

    let doc = Document::from_filing(raw);
    let risk = get_risk_narrative(&doc).unwrap();
    assert_eq!(
        texts(&risk),
        vec![
            "The business could be attacked by wolverines.",
            "The business could also be attacked by bears."
        ]
    );
}

#[test]
fn test_missing_filing_type_is_an_error() {
    let doc = Document::new(None, vec![(N, "Some text.")]);
    assert!(get_risk_narrative(&doc).is_err());
}

/// A 10-K that may or may not list a form summary after its exhibits.
fn exhibits_document(with_form_summary: bool) -> Document {
    let mut spans = vec![
        (T, "TABLE OF CONTENTS"),
        (T, "Part I"),
        (T, "Item 1A. Risk Factors"),
        (P, "1"),
        (T, "Item 15. Exhibits"),
        (P, "2"),
    ];
    if with_form_summary {
        spans.extend([(T, "Item 16. Form 10-K Summary"), (P, "3")]);
    }
    spans.extend([
        (T, "SECURITY AND EXCHANGE COMISSION FILING"),
        (T, "Part I"),
        (T, "Item 1A. Risk Factors"),
        (N, "The business could be attacked by bears."),
        (T, "Item 15. Exhibits"),
        (N, "Exhibit one."),
    ]);
    if with_form_summary {
        spans.extend([
            (T, "Item 16. Form 10-K Summary"),
            (N, "No summary is provided."),
        ]);
    } else {
        spans.push((N, "Exhibit two."));
    }
    spans.extend([(T, "Signatures"), (N, "Signed by the registrant.")]);
    Document::new(Some("10-K"), spans)
}

#[test]
fn test_exhibits_is_last_without_form_summary() {
    let doc = exhibits_document(false);
    let toc = get_table_of_contents(&doc).unwrap();
    assert_eq!(
        toc.texts(),
        vec!["Part I", "Item 1A. Risk Factors", "Item 15. Exhibits"]
    );

    let exhibits = get_section_narrative(&doc, &SecSection::Exhibits.into()).unwrap();
    assert_eq!(texts(&exhibits), vec!["Exhibit one.", "Exhibit two."]);
}

#[test]
fn test_exhibits_bounded_by_listed_form_summary() {
    let doc = exhibits_document(true);
    let exhibits = get_section_narrative(&doc, &SecSection::Exhibits.into()).unwrap();
    assert_eq!(texts(&exhibits), vec!["Exhibit one."]);

    let summary = get_section_narrative(&doc, &SecSection::FormSummary.into()).unwrap();
    assert_eq!(texts(&summary), vec!["No summary is provided."]);
}
