use serde::{Deserialize, Serialize};

/// A stored SOP record. The title is the key of the SOPs document; records
/// are replaced wholesale on re-upload, there is no versioning.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Sop {
    /// Raw extracted SOP text, kept for quiz generation.
    pub content: String,
    pub summary: String,
    pub steps: Vec<String>,
    pub warnings: Vec<String>,
    pub checklist: Vec<String>,
}

/// The structured package derived from raw SOP text by the completion
/// service: summary, key steps, safety warnings, checklist items.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TrainingPackage {
    pub summary: String,
    pub steps: Vec<String>,
    pub warnings: Vec<String>,
    pub checklist: Vec<String>,
}

impl Sop {
    pub fn from_package(content: &str, package: TrainingPackage) -> Self {
        Sop {
            content: content.to_string(),
            summary: package.summary,
            steps: package.steps,
            warnings: package.warnings,
            checklist: package.checklist,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_package() -> TrainingPackage {
        TrainingPackage {
            summary: "Lockout-tagout overview".to_string(),
            steps: vec!["Isolate energy".to_string(), "Apply lock".to_string()],
            warnings: vec!["Never bypass a lock".to_string()],
            checklist: vec!["Lock applied".to_string(), "Tag signed".to_string()],
        }
    }

    #[test]
    fn sop_from_package_keeps_raw_content() {
        let sop = Sop::from_package("raw sop text", sample_package());

        assert_eq!(sop.content, "raw sop text");
        assert_eq!(sop.steps.len(), 2);
        assert_eq!(sop.summary, "Lockout-tagout overview");
    }

    #[test]
    fn training_package_rejects_unknown_fields() {
        let json = r#"{"summary":"s","steps":[],"warnings":[],"checklist":[],"extra":1}"#;
        assert!(serde_json::from_str::<TrainingPackage>(json).is_err());
    }
}
