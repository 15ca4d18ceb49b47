//! Addressing single fields of a document.
//!
//! Paths are id-based so they survive reordering:
//! `personalInfo.email`, `professionalSummary`, `experience.<entryId>.role`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::editor::entries::Entry;
use crate::editor::EditError;
use crate::models::resume::{EntryId, LanguageLevel, ResumeDocument, Section};
use crate::validation::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPath {
    Personal(String),
    Summary,
    Entry {
        section: Section,
        entry_id: EntryId,
        field: String,
    },
}

impl FromStr for FieldPath {
    type Err = EditError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let unknown = || EditError::UnknownField(path.to_string());
        let mut parts = path.splitn(3, '.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("professionalSummary"), None, None) => Ok(FieldPath::Summary),
            (Some("personalInfo"), Some(field), None) if !field.is_empty() => {
                Ok(FieldPath::Personal(field.to_string()))
            }
            (Some(section), Some(id), Some(field)) if !id.is_empty() && !field.is_empty() => {
                let section = section.parse::<Section>().map_err(|_| unknown())?;
                Ok(FieldPath::Entry {
                    section,
                    entry_id: EntryId::new(id),
                    field: field.to_string(),
                })
            }
            _ => Err(unknown()),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Personal(field) => write!(f, "personalInfo.{field}"),
            FieldPath::Summary => f.write_str("professionalSummary"),
            FieldPath::Entry {
                section,
                entry_id,
                field,
            } => write!(f, "{}.{entry_id}.{field}", section.as_str()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Value coercion
// ────────────────────────────────────────────────────────────────────────────

fn invalid(path: &FieldPath, message: &str) -> EditError {
    EditError::InvalidValue {
        path: path.to_string(),
        message: message.to_string(),
    }
}

fn text(path: &FieldPath, value: &Value) -> Result<String, EditError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Null => Ok(String::new()),
        _ => Err(invalid(path, "Expected text")),
    }
}

/// Empty text clears an optional field.
fn optional_text(path: &FieldPath, value: &Value) -> Result<Option<String>, EditError> {
    let s = text(path, value)?;
    Ok((!s.is_empty()).then_some(s))
}

fn skill_level(path: &FieldPath, value: &Value) -> Result<Option<u8>, EditError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| invalid(path, "Expected a whole number")),
        _ => Err(invalid(path, "Expected a whole number")),
    }
}

fn language_level(path: &FieldPath, value: &Value) -> Result<LanguageLevel, EditError> {
    match value {
        Value::Null => Ok(LanguageLevel::default()),
        Value::String(s) => s.parse().map_err(|e: String| invalid(path, &e)),
        _ => Err(invalid(path, "Expected a language level")),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Applying a value
// ────────────────────────────────────────────────────────────────────────────

fn entry_mut<'a, T: Entry>(list: &'a mut [T], section: Section, id: &EntryId) -> Result<&'a mut T, EditError> {
    list.iter_mut()
        .find(|e| e.id() == id)
        .ok_or_else(|| EditError::EntryNotFound {
            section: section.as_str(),
            id: id.to_string(),
        })
}

/// Writes `value` into the field at `path`. Values are stored as typed; rule
/// checks are left to validation.
pub fn apply(doc: &mut ResumeDocument, path: &FieldPath, value: &Value) -> Result<(), EditError> {
    let unknown = || EditError::UnknownField(path.to_string());
    match path {
        FieldPath::Summary => doc.professional_summary = optional_text(path, value)?,
        FieldPath::Personal(field) => {
            let info = &mut doc.personal_info;
            match field.as_str() {
                "name" => info.name = text(path, value)?,
                "email" => info.email = text(path, value)?,
                "phone" => info.phone = optional_text(path, value)?,
                "address" => info.address = optional_text(path, value)?,
                "linkedin" => info.linkedin = optional_text(path, value)?,
                "github" => info.github = optional_text(path, value)?,
                "website" => info.website = optional_text(path, value)?,
                "photo" => info.photo = optional_text(path, value)?,
                _ => return Err(unknown()),
            }
        }
        FieldPath::Entry {
            section,
            entry_id,
            field,
        } => match section {
            Section::Experience => {
                let e = entry_mut(&mut doc.experience, *section, entry_id)?;
                match field.as_str() {
                    "role" => e.role = text(path, value)?,
                    "company" => e.company = text(path, value)?,
                    "location" => e.location = optional_text(path, value)?,
                    "startDate" => e.start_date = optional_text(path, value)?,
                    "endDate" => e.end_date = optional_text(path, value)?,
                    "description" => e.description = text(path, value)?,
                    _ => return Err(unknown()),
                }
            }
            Section::Education => {
                let e = entry_mut(&mut doc.education, *section, entry_id)?;
                match field.as_str() {
                    "institution" => e.institution = text(path, value)?,
                    "degree" => e.degree = text(path, value)?,
                    "fieldOfStudy" => e.field_of_study = optional_text(path, value)?,
                    "startDate" => e.start_date = optional_text(path, value)?,
                    "endDate" => e.end_date = optional_text(path, value)?,
                    "gpa" => e.gpa = optional_text(path, value)?,
                    _ => return Err(unknown()),
                }
            }
            Section::Projects => {
                let e = entry_mut(&mut doc.projects, *section, entry_id)?;
                match field.as_str() {
                    "name" => e.name = text(path, value)?,
                    "description" => e.description = text(path, value)?,
                    "url" => e.url = optional_text(path, value)?,
                    _ => return Err(unknown()),
                }
            }
            Section::Skills => {
                let e = entry_mut(&mut doc.skills, *section, entry_id)?;
                match field.as_str() {
                    "name" => e.name = text(path, value)?,
                    "category" => e.category = text(path, value)?,
                    "level" => e.level = skill_level(path, value)?,
                    _ => return Err(unknown()),
                }
            }
            Section::Certifications => {
                let e = entry_mut(&mut doc.certifications, *section, entry_id)?;
                match field.as_str() {
                    "name" => e.name = text(path, value)?,
                    "description" => e.description = optional_text(path, value)?,
                    "url" => e.url = optional_text(path, value)?,
                    _ => return Err(unknown()),
                }
            }
            Section::Extracurriculars => {
                let e = entry_mut(&mut doc.extracurriculars, *section, entry_id)?;
                match field.as_str() {
                    "title" => e.title = text(path, value)?,
                    "organization" => e.organization = text(path, value)?,
                    "role" => e.role = text(path, value)?,
                    "startDate" => e.start_date = optional_text(path, value)?,
                    "endDate" => e.end_date = optional_text(path, value)?,
                    "description" => e.description = optional_text(path, value)?,
                    _ => return Err(unknown()),
                }
            }
            Section::Languages => {
                let e = entry_mut(&mut doc.languages, *section, entry_id)?;
                match field.as_str() {
                    "name" => e.name = text(path, value)?,
                    "level" => e.level = language_level(path, value)?,
                    _ => return Err(unknown()),
                }
            }
        },
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Validation paths
// ────────────────────────────────────────────────────────────────────────────

/// Rewrites index paths (`experience[1].role`) into id paths
/// (`experience.<id>.role`) against `doc`. Paths that do not resolve are kept.
pub fn rekey_errors(doc: &ResumeDocument, errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .fields
        .iter()
        .map(|(path, message)| (rekey(doc, path).unwrap_or_else(|| path.clone()), message.clone()))
        .collect()
}

fn rekey(doc: &ResumeDocument, path: &str) -> Option<String> {
    let (head, field) = path.split_once("].")?;
    let (section, index) = head.split_once('[')?;
    let section = section.parse::<Section>().ok()?;
    let index: usize = index.parse().ok()?;
    let id = doc.entry_ids(section).get(index).copied()?;
    Some(format!("{}.{id}.{field}", section.as_str()))
}
