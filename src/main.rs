// src/main.rs
use std::path::{Path, PathBuf};

use clap::Parser;
use sec_sections::extractors::{
    resolve_section_names, ExtractorConfig, SecSection, Section, SectionExtractor,
};
use sec_sections::storage::{sections_to_json, StorageManager};
use sec_sections::utils::{logging, AppError};
use sec_sections::Document;

/// Command Line Interface for extracting narrative sections from SEC filings
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the filing (EDGAR submission text or HTML)
    #[arg(short, long)]
    input: PathBuf,

    /// Section name to extract, e.g. RISK_FACTORS, or _ALL (repeatable)
    #[arg(short, long = "section")]
    sections: Vec<String>,

    /// Extra section given as a regex over cleaned lowercase heading text (repeatable)
    #[arg(long = "section-regex")]
    section_regexes: Vec<String>,

    /// Output directory; when omitted the sections are printed as JSON
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Trimmed tables of contents at least this long are rejected
    #[arg(long)]
    max_toc_len: Option<usize>,

    /// Maximum gap between headings in one table-of-contents cluster
    #[arg(long)]
    cluster_radius: Option<usize>,

    /// Print the detected table of contents before extracting
    #[arg(long)]
    show_toc: bool,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Load and parse the filing
    let document = Document::load_filing(&args.input)?;
    let filing_type = document.filing_type()?;
    tracing::info!(
        "Parsed {} elements from {} ({})",
        document.len(),
        args.input.display(),
        filing_type
    );

    // 4. Resolve requested sections
    let sections = requested_sections(&args, filing_type)?;

    // 5. Initialize section extractor
    let mut config = ExtractorConfig::from_env();
    if let Some(max_toc_len) = args.max_toc_len {
        config = config.with_max_toc_len(max_toc_len);
    }
    if let Some(cluster_radius) = args.cluster_radius {
        config = config.with_cluster_radius(cluster_radius);
    }
    let extractor = SectionExtractor::new(config);

    if args.show_toc {
        let toc = extractor.get_table_of_contents(&document)?;
        if toc.is_empty() {
            eprintln!("No table of contents found");
        }
        for entry in toc.elements() {
            eprintln!("[{:>5}] {}", entry.position, entry.text);
        }
    }

    // 6. Extract
    let extracted = extractor.extract_sections(&document, &sections)?;
    for section in extracted.iter().filter(|s| s.elements.is_empty()) {
        tracing::warn!("Section {} not found or empty", section.label);
    }

    // 7. Output
    match &args.output_dir {
        Some(output_dir) => {
            let storage = StorageManager::new(output_dir)?;
            let filing = filing_stem(&args.input)?;
            for section in &extracted {
                storage.save_section(&filing, section)?;
                storage.save_section_metadata(&filing, filing_type, section)?;
            }
            tracing::info!("Saved {} sections under {}", extracted.len(), output_dir.display());
        }
        None => {
            let json = serde_json::to_string_pretty(&sections_to_json(&extracted))
                .map_err(|e| AppError::Processing(format!("Failed to serialize output: {}", e)))?;
            println!("{}", json);
        }
    }

    tracing::info!("Processing finished.");
    Ok(())
}

fn requested_sections(
    args: &Args,
    filing_type: sec_sections::FilingType,
) -> Result<Vec<Section>, AppError> {
    let mut sections: Vec<Section> = if args.sections.is_empty() {
        if args.section_regexes.is_empty() {
            vec![Section::from(SecSection::RiskFactors)]
        } else {
            Vec::new()
        }
    } else {
        resolve_section_names(args.sections.as_slice(), filing_type)?
            .into_iter()
            .map(Section::from)
            .collect()
    };

    for (i, pattern) in args.section_regexes.iter().enumerate() {
        sections.push(Section::custom(format!("REGEX_{}", i), pattern)?);
    }
    Ok(sections)
}

fn filing_stem(path: &Path) -> Result<String, AppError> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::Config(format!("Input path has no file name: {}", path.display())))
}
