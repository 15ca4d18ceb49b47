//! The normalized resume data model shared by the validator, renderer and editor.
//!
//! JSON keys are camelCase so documents round-trip unchanged through the
//! persistence API. Optional text fields are `None` rather than empty strings
//! once a document has passed validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Entry identifiers
// ────────────────────────────────────────────────────────────────────────────

/// Stable handle for an entry in one of the resume's ordered sections.
///
/// Seed documents use short human ids ("exp1"); entries created in the editor
/// get a random UUID so removal never causes a collision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_summary: Option<String>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub extracurriculars: Vec<Extracurricular>,
    #[serde(default)]
    pub languages: Vec<Language>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Embedded image as a `data:image/...;base64,` URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: EntryId,
    pub role: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: EntryId,
    pub institution: String,
    pub degree: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntryId,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: EntryId,
    pub name: String,
    pub category: String,
    /// Self-assessed proficiency, 1..=5. Only bar-style templates draw it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: EntryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extracurricular {
    pub id: EntryId,
    pub title: String,
    pub organization: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub id: EntryId,
    pub name: String,
    #[serde(default)]
    pub level: LanguageLevel,
}

// ────────────────────────────────────────────────────────────────────────────
// Language level
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageLevel {
    Native,
    #[default]
    Fluent,
    Professional,
    Intermediate,
    Basic,
}

/// Filled segments used for any level label the enumeration does not know.
pub const DEFAULT_PROFICIENCY: u8 = 2;

impl LanguageLevel {
    pub const ALL: [LanguageLevel; 5] = [
        LanguageLevel::Native,
        LanguageLevel::Fluent,
        LanguageLevel::Professional,
        LanguageLevel::Intermediate,
        LanguageLevel::Basic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageLevel::Native => "Native",
            LanguageLevel::Fluent => "Fluent",
            LanguageLevel::Professional => "Professional",
            LanguageLevel::Intermediate => "Intermediate",
            LanguageLevel::Basic => "Basic",
        }
    }

    /// Number of filled segments on a 5-segment proficiency bar.
    pub fn proficiency(&self) -> u8 {
        match self {
            LanguageLevel::Native | LanguageLevel::Fluent => 5,
            LanguageLevel::Professional => 4,
            LanguageLevel::Intermediate => 3,
            LanguageLevel::Basic => 2,
        }
    }
}

impl FromStr for LanguageLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown language level '{s}'"))
    }
}

/// Total mapping from a free-form level label to bar segments. Never fails.
pub fn proficiency_for_label(label: &str) -> u8 {
    label
        .parse::<LanguageLevel>()
        .map(|level| level.proficiency())
        .unwrap_or(DEFAULT_PROFICIENCY)
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// The ordered entry sections of a document, used as editor handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Experience,
    Education,
    Projects,
    Skills,
    Certifications,
    Extracurriculars,
    Languages,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Experience,
        Section::Education,
        Section::Projects,
        Section::Skills,
        Section::Certifications,
        Section::Extracurriculars,
        Section::Languages,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Projects => "projects",
            Section::Skills => "skills",
            Section::Certifications => "certifications",
            Section::Extracurriculars => "extracurriculars",
            Section::Languages => "languages",
        }
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| format!("Unknown section '{s}'"))
    }
}

impl ResumeDocument {
    /// A document with only the two required personal fields filled in.
    #[cfg(test)]
    pub fn minimal(name: &str, email: &str) -> Self {
        Self {
            personal_info: PersonalInfo {
                name: name.to_string(),
                email: email.to_string(),
                ..PersonalInfo::default()
            },
            professional_summary: None,
            experience: vec![],
            education: vec![],
            projects: vec![],
            skills: vec![],
            certifications: vec![],
            extracurriculars: vec![],
            languages: vec![],
        }
    }

    /// Entry ids of one section, in display order.
    pub fn entry_ids(&self, section: Section) -> Vec<&EntryId> {
        match section {
            Section::Experience => self.experience.iter().map(|e| &e.id).collect(),
            Section::Education => self.education.iter().map(|e| &e.id).collect(),
            Section::Projects => self.projects.iter().map(|e| &e.id).collect(),
            Section::Skills => self.skills.iter().map(|e| &e.id).collect(),
            Section::Certifications => self.certifications.iter().map(|e| &e.id).collect(),
            Section::Extracurriculars => self.extracurriculars.iter().map(|e| &e.id).collect(),
            Section::Languages => self.languages.iter().map(|e| &e.id).collect(),
        }
    }

    /// Skills grouped by category, categories in first-seen order.
    ///
    /// This is a display view: the stored `skills` array is left untouched.
    pub fn grouped_skills(&self) -> Vec<(&str, Vec<&str>)> {
        let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
        for skill in &self.skills {
            if skill.name.trim().is_empty() || skill.category.trim().is_empty() {
                continue;
            }
            match groups.iter_mut().find(|(cat, _)| *cat == skill.category) {
                Some((_, names)) => names.push(&skill.name),
                None => groups.push((&skill.category, vec![&skill.name])),
            }
        }
        groups
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(id: &str, name: &str, category: &str) -> Skill {
        Skill {
            id: EntryId::new(id),
            name: name.to_string(),
            category: category.to_string(),
            level: None,
        }
    }

    #[test]
    fn test_language_level_proficiency_mapping() {
        assert_eq!(LanguageLevel::Native.proficiency(), 5);
        assert_eq!(LanguageLevel::Fluent.proficiency(), 5);
        assert_eq!(LanguageLevel::Professional.proficiency(), 4);
        assert_eq!(LanguageLevel::Intermediate.proficiency(), 3);
        assert_eq!(LanguageLevel::Basic.proficiency(), 2);
    }

    #[test]
    fn test_proficiency_for_unknown_label_defaults() {
        assert_eq!(proficiency_for_label("Conversational"), DEFAULT_PROFICIENCY);
        assert_eq!(proficiency_for_label(""), DEFAULT_PROFICIENCY);
        assert_eq!(proficiency_for_label("Native"), 5);
    }

    #[test]
    fn test_language_level_defaults_to_fluent() {
        let lang: Language = serde_json::from_str(r#"{"id":"l1","name":"English"}"#).unwrap();
        assert_eq!(lang.level, LanguageLevel::Fluent);
    }

    #[test]
    fn test_grouped_skills_preserves_first_seen_order() {
        let mut doc = ResumeDocument::minimal("Jane", "jane@example.com");
        doc.skills = vec![
            skill("1", "Rust", "Languages"),
            skill("2", "Git", "Tools"),
            skill("3", "Go", "Languages"),
        ];
        let groups = doc.grouped_skills();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], ("Languages", vec!["Rust", "Go"]));
        assert_eq!(groups[1], ("Tools", vec!["Git"]));
        // The stored array is untouched.
        assert_eq!(doc.skills[1].name, "Git");
    }

    #[test]
    fn test_section_round_trips_through_str() {
        for section in Section::ALL {
            assert_eq!(section.as_str().parse::<Section>().unwrap(), section);
        }
        assert!("awards".parse::<Section>().is_err());
    }

    #[test]
    fn test_generated_entry_ids_are_unique() {
        let a = EntryId::generate();
        let b = EntryId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_optional_fields_skipped_when_none() {
        let doc = ResumeDocument::minimal("Jane", "jane@example.com");
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["personalInfo"].get("phone").is_none());
        assert!(json.get("professionalSummary").is_none());
        assert_eq!(json["experience"], serde_json::json!([]));
    }
}
