// src/extractors/catalog.rs
//! Canonical filing sections, their heading patterns, and the per-filing-type
//! lists used to expand an "all sections" request.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::document::FilingType;
use crate::utils::error::ExtractError;

/// Request token meaning "every section of this filing type".
pub const ALL_SECTIONS: &str = "_ALL";

// Upper bound on the compiled size of a caller-supplied pattern
const CUSTOM_PATTERN_SIZE_LIMIT: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecSection {
    ProspectusSummary,
    AboutProspectus,
    ForwardLookingStatements,
    RiskFactors,
    UseOfProceeds,
    DividendPolicy,
    Capitalization,
    Dilution,
    ManagementDiscussion,
    Business,
    Management,
    Compensation,
    RelatedPartyTransactions,
    PrincipalStockholders,
    DescriptionOfStock,
    DescriptionOfDebt,
    FutureSale,
    UsTax,
    Underwriting,
    LegalMatters,
    Experts,
    MoreInformation,
    FinancialStatements,
    MarketRiskDisclosures,
    ControlsAndProcedures,
    LegalProceedings,
    Defaults,
    MineSafety,
    OtherInformation,
    UnresolvedStaffComments,
    Properties,
    MarketForRegistrantCommonEquity,
    AccountingDisagreements,
    ForeignJurisdictionInspections,
    ExecutiveOfficers,
    AccountingFees,
    Exhibits,
    FormSummary,
    CertainTrademarks,
    OfferPrice,
}

/// (section, request name, pattern over cleaned lowercase heading text)
const SECTION_TABLE: &[(SecSection, &str, &str)] = &[
    (SecSection::ProspectusSummary, "PROSPECTUS_SUMMARY", r"^(?:prospectus )?summary$"),
    (SecSection::AboutProspectus, "ABOUT_PROSPECTUS", r"about this prospectus"),
    (SecSection::ForwardLookingStatements, "FORWARD_LOOKING_STATEMENTS", r"forward[ -]looking statements"),
    (SecSection::RiskFactors, "RISK_FACTORS", r"risk factors"),
    (SecSection::UseOfProceeds, "USE_OF_PROCEEDS", r"use of proceeds"),
    (SecSection::DividendPolicy, "DIVIDEND_POLICY", r"^dividend policy"),
    (SecSection::Capitalization, "CAPITALIZATION", r"^capitalization$"),
    (SecSection::Dilution, "DILUTION", r"^dilution$"),
    (SecSection::ManagementDiscussion, "MANAGEMENT_DISCUSSION", r"^management(?:['’]s)? discussion"),
    (SecSection::Business, "BUSINESS", r"^business$"),
    (SecSection::Management, "MANAGEMENT", r"^(?:(?:our )?management)|(?:executive officers)$"),
    (SecSection::Compensation, "COMPENSATION", r"compensation"),
    (SecSection::RelatedPartyTransactions, "RELATED_PARTY_TRANSACTIONS", r"(?:relationships|related).*transactions"),
    (SecSection::PrincipalStockholders, "PRINCIPAL_STOCKHOLDERS", r"(?i)principal (?:stockholders|shareholders|securityholders)|security ownership"),
    (SecSection::DescriptionOfStock, "DESCRIPTION_OF_STOCK", r"^description of (?:capital stock|share capital|securities)"),
    (SecSection::DescriptionOfDebt, "DESCRIPTION_OF_DEBT", r"^description of (?:material )?indebtedness"),
    (SecSection::FutureSale, "FUTURE_SALE", r"(?:shares|stock) eligible for future sale"),
    (SecSection::UsTax, "US_TAX", r"(?:us|u\.s\.|united states|material federal).* tax (?:consideration|consequence)"),
    (SecSection::Underwriting, "UNDERWRITING", r"underwrit"),
    (SecSection::LegalMatters, "LEGAL_MATTERS", r"legal matters"),
    (SecSection::Experts, "EXPERTS", r"^experts$"),
    (SecSection::MoreInformation, "MORE_INFORMATION", r"(?:additional|more) information"),
    (SecSection::FinancialStatements, "FINANCIAL_STATEMENTS", r"financial statements"),
    (SecSection::MarketRiskDisclosures, "MARKET_RISK_DISCLOSURES", r"(?:quantitative|qualitative) disclosures? about market risk"),
    (SecSection::ControlsAndProcedures, "CONTROLS_AND_PROCEDURES", r"controls and procedures"),
    (SecSection::LegalProceedings, "LEGAL_PROCEEDINGS", r"legal proceedings"),
    (SecSection::Defaults, "DEFAULTS", r"defaults (?:up)?on .*securities"),
    (SecSection::MineSafety, "MINE_SAFETY", r"mine safety disclosures?"),
    (SecSection::OtherInformation, "OTHER_INFORMATION", r"other information"),
    (SecSection::UnresolvedStaffComments, "UNRESOLVED_STAFF_COMMENTS", r"unresolved staff comments?"),
    (SecSection::Properties, "PROPERTIES", r"^properties$"),
    (SecSection::MarketForRegistrantCommonEquity, "MARKET_FOR_REGISTRANT_COMMON_EQUITY", r"market for(?: the)? (?:registrant|company)(?:['’]s)? common equity"),
    (SecSection::AccountingDisagreements, "ACCOUNTING_DISAGREEMENTS", r"disagreements with accountants"),
    (SecSection::ForeignJurisdictionInspections, "FOREIGN_JURISDICTION_INSPECTIONS", r"diclosure .*foreign jurisdictions .*inspection"),
    (SecSection::ExecutiveOfficers, "EXECUTIVE_OFFICERS", r"executive officers"),
    (SecSection::AccountingFees, "ACCOUNTING_FEES", r"accounting fees"),
    (SecSection::Exhibits, "EXHIBITS", r"^exhibits?(.*financial statement schedules)?$"),
    (SecSection::FormSummary, "FORM_SUMMARY", r"^form .*summary$"),
    (SecSection::CertainTrademarks, "CERTAIN_TRADEMARKS", r"certain trademarks"),
    (SecSection::OfferPrice, "OFFER_PRICE", r"(?:determination of )offering price"),
];

static SECTION_PATTERNS: Lazy<HashMap<SecSection, Regex>> = Lazy::new(|| {
    SECTION_TABLE
        .iter()
        .map(|(section, name, pattern)| {
            let re = Regex::new(pattern)
                .unwrap_or_else(|e| panic!("Failed to compile pattern for {}: {}", name, e));
            (*section, re)
        })
        .collect()
});

/// Form 10-K items 1 through 16.
pub const SECTIONS_10K: &[SecSection] = &[
    SecSection::Business,                        // ITEM 1
    SecSection::RiskFactors,                     // ITEM 1A
    SecSection::UnresolvedStaffComments,         // ITEM 1B
    SecSection::Properties,                      // ITEM 2
    SecSection::LegalProceedings,                // ITEM 3
    SecSection::MineSafety,                      // ITEM 4
    SecSection::MarketForRegistrantCommonEquity, // ITEM 5
    // ITEM 6 is reserved
    SecSection::ManagementDiscussion,            // ITEM 7
    SecSection::MarketRiskDisclosures,           // ITEM 7A
    SecSection::FinancialStatements,             // ITEM 8
    SecSection::AccountingDisagreements,         // ITEM 9
    SecSection::ControlsAndProcedures,           // ITEM 9A
    // ITEM 9B is other information
    SecSection::ForeignJurisdictionInspections,  // ITEM 9C
    SecSection::Management,                      // ITEM 10
    SecSection::Compensation,                    // ITEM 11
    SecSection::PrincipalStockholders,           // ITEM 12
    SecSection::RelatedPartyTransactions,        // ITEM 13
    SecSection::AccountingFees,                  // ITEM 14
    SecSection::Exhibits,                        // ITEM 15
    SecSection::FormSummary,                     // ITEM 16
];

/// Form 10-Q, Part I items 1-4 then Part II items 1-5.
pub const SECTIONS_10Q: &[SecSection] = &[
    SecSection::FinancialStatements,
    SecSection::ManagementDiscussion,
    SecSection::MarketRiskDisclosures,
    SecSection::ControlsAndProcedures,
    SecSection::LegalProceedings,
    SecSection::RiskFactors,
    SecSection::UseOfProceeds,
    SecSection::Defaults,
    SecSection::MineSafety,
    SecSection::OtherInformation,
];

pub const SECTIONS_S1: &[SecSection] = &[
    SecSection::ProspectusSummary,
    SecSection::AboutProspectus,
    SecSection::ForwardLookingStatements,
    SecSection::RiskFactors,
    SecSection::UseOfProceeds,
    SecSection::DividendPolicy,
    SecSection::Capitalization,
    SecSection::Dilution,
    SecSection::ManagementDiscussion,
    SecSection::Business,
    SecSection::Management,
    SecSection::Compensation,
    SecSection::RelatedPartyTransactions,
    SecSection::PrincipalStockholders,
    SecSection::DescriptionOfStock,
    SecSection::DescriptionOfDebt,
    SecSection::FutureSale,
    SecSection::UsTax,
    SecSection::Underwriting,
    SecSection::LegalMatters,
    SecSection::Experts,
    SecSection::MoreInformation,
];

impl SecSection {
    fn entry(&self) -> &'static (SecSection, &'static str, &'static str) {
        SECTION_TABLE
            .iter()
            .find(|(section, _, _)| section == self)
            .expect("every SecSection has a SECTION_TABLE entry")
    }

    /// Every canonical section, in catalog order.
    pub fn all() -> impl Iterator<Item = SecSection> {
        SECTION_TABLE.iter().map(|(section, _, _)| *section)
    }

    pub fn name(&self) -> &'static str {
        self.entry().1
    }

    pub fn pattern(&self) -> &'static Regex {
        &SECTION_PATTERNS[self]
    }

    pub fn from_name(name: &str) -> Option<SecSection> {
        SECTION_TABLE
            .iter()
            .find(|(_, entry_name, _)| *entry_name == name)
            .map(|(section, _, _)| *section)
    }
}

/// Canonical sections expected in a filing of the given type.
pub fn sections_for(filing_type: FilingType) -> &'static [SecSection] {
    match filing_type {
        FilingType::TenK | FilingType::TenKAmendment => SECTIONS_10K,
        FilingType::TenQ | FilingType::TenQAmendment => SECTIONS_10Q,
        FilingType::S1 | FilingType::S1Amendment => SECTIONS_S1,
    }
}

/// Validates requested section names and expands [`ALL_SECTIONS`].
pub fn resolve_section_names<S: AsRef<str>>(
    names: &[S],
    filing_type: FilingType,
) -> Result<Vec<SecSection>, ExtractError> {
    let names: Vec<&str> = names.iter().map(|n| n.as_ref().trim()).collect();

    if names.contains(&ALL_SECTIONS) {
        if names.len() > 1 {
            return Err(ExtractError::UnknownSection(format!(
                "{} may not be selected with other sections",
                ALL_SECTIONS
            )));
        }
        return Ok(sections_for(filing_type).to_vec());
    }

    let invalid: Vec<&str> = names
        .iter()
        .copied()
        .filter(|name| SecSection::from_name(name).is_none())
        .collect();
    if !invalid.is_empty() {
        return Err(ExtractError::UnknownSection(format!(
            "The following section names are not valid: {}",
            invalid.join(", ")
        )));
    }

    Ok(names.iter().filter_map(|name| SecSection::from_name(name)).collect())
}

/// A section to extract: a catalog entry or an ad-hoc pattern.
#[derive(Debug, Clone)]
pub enum Section {
    Canonical(SecSection),
    Custom { label: String, pattern: Regex },
}

impl Section {
    /// Wraps a caller-supplied pattern, tested against cleaned lowercase heading text.
    pub fn custom(label: impl Into<String>, pattern: &str) -> Result<Self, ExtractError> {
        let pattern = RegexBuilder::new(pattern)
            .size_limit(CUSTOM_PATTERN_SIZE_LIMIT)
            .build()
            .map_err(|e| ExtractError::InvalidPattern(format!("'{}': {}", pattern, e)))?;
        Ok(Section::Custom {
            label: label.into(),
            pattern,
        })
    }

    pub fn label(&self) -> &str {
        match self {
            Section::Canonical(section) => section.name(),
            Section::Custom { label, .. } => label,
        }
    }

    pub fn pattern(&self) -> &Regex {
        match self {
            Section::Canonical(section) => section.pattern(),
            Section::Custom { pattern, .. } => pattern,
        }
    }

    pub fn is(&self, section: SecSection) -> bool {
        matches!(self, Section::Canonical(s) if *s == section)
    }
}

impl From<SecSection> for Section {
    fn from(section: SecSection) -> Self {
        Section::Canonical(section)
    }
}
