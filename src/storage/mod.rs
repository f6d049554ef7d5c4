// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::document::FilingType;
use crate::extractors::section::ExtractedSection;
use crate::utils::error::StorageError;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// `<base_dir>/<filing>/`, created on demand
    fn filing_dir(&self, filing: &str) -> Result<PathBuf, StorageError> {
        let target_dir = self.base_dir.join(filing);
        if !target_dir.exists() {
            fs::create_dir_all(&target_dir).map_err(StorageError::IoError)?;
        }
        Ok(target_dir)
    }

    /// Saves the section narrative, one paragraph per blank-line separated block
    pub fn save_section(&self, filing: &str, section: &ExtractedSection<'_>) -> Result<PathBuf, StorageError> {
        let file_path = self.filing_dir(filing)?.join(format!("{}.txt", section.label));

        let mut content = section.texts().join("\n\n");
        if !content.is_empty() {
            content.push('\n');
        }
        fs::write(&file_path, content).map_err(StorageError::IoError)?;

        tracing::info!("Saved section to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves metadata about the section in JSON format
    pub fn save_section_metadata(
        &self,
        filing: &str,
        filing_type: FilingType,
        section: &ExtractedSection<'_>,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self
            .filing_dir(filing)?
            .join(format!("{}_meta.json", section.label));

        let metadata = serde_json::json!({
            "filing": filing,
            "filing_type": filing_type.as_str(),
            "section": section.label,
            "element_count": section.elements.len(),
            "content_length": section.elements.iter().map(|e| e.text.chars().count()).sum::<usize>(),
            "first_position": section.elements.first().map(|e| e.position),
            "last_position": section.elements.last().map(|e| e.position),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }
}

/// `{label: [text, ...]}` with keys in request order.
pub fn sections_to_json(sections: &[ExtractedSection<'_>]) -> serde_json::Value {
    let output: serde_json::Map<String, serde_json::Value> = sections
        .iter()
        .map(|s| (s.label.clone(), serde_json::json!(s.texts())))
        .collect();
    serde_json::Value::Object(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, ElementKind};

    #[test]
    fn test_save_section_and_metadata() {
        let doc = Document::new(
            Some("10-K"),
            vec![
                (ElementKind::NarrativeText, "First paragraph."),
                (ElementKind::ListItem, "A list item"),
            ],
        );
        let section = ExtractedSection {
            label: "RISK_FACTORS".to_string(),
            elements: doc.elements().iter().collect(),
        };

        let dir = tempfile::TempDir::new().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();

        let text_path = storage.save_section("acme-10k", &section).unwrap();
        assert_eq!(text_path, dir.path().join("acme-10k").join("RISK_FACTORS.txt"));
        assert_eq!(
            fs::read_to_string(&text_path).unwrap(),
            "First paragraph.\n\nA list item\n"
        );

        let meta_path = storage
            .save_section_metadata("acme-10k", FilingType::TenK, &section)
            .unwrap();
        let meta: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(meta_path).unwrap()).unwrap();
        assert_eq!(meta["filing_type"], "10-K");
        assert_eq!(meta["element_count"], 2);
        assert_eq!(meta["content_length"], 27);
        assert_eq!(meta["last_position"], 1);
    }

    #[test]
    fn test_empty_section_writes_empty_file() {
        let section = ExtractedSection {
            label: "EXHIBITS".to_string(),
            elements: Vec::new(),
        };
        let dir = tempfile::TempDir::new().unwrap();
        let storage = StorageManager::new(dir.path().join("nested")).unwrap();
        let path = storage.save_section("filing", &section).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "");
    }

    #[test]
    fn test_sections_to_json_keeps_request_order() {
        let doc = Document::new(
            Some("10-Q"),
            vec![(ElementKind::NarrativeText, "Exhibit one.")],
        );
        let sections = vec![
            ExtractedSection {
                label: "RISK_FACTORS".to_string(),
                elements: Vec::new(),
            },
            ExtractedSection {
                label: "EXHIBITS".to_string(),
                elements: doc.elements().iter().collect(),
            },
        ];

        let json = sections_to_json(&sections);
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["RISK_FACTORS", "EXHIBITS"]);
        assert_eq!(json["EXHIBITS"], serde_json::json!(["Exhibit one."]));
        assert_eq!(
            serde_json::to_string(&json).unwrap(),
            r#"{"RISK_FACTORS":[],"EXHIBITS":["Exhibit one."]}"#
        );
    }
}
