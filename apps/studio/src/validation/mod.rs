//! Resume form validation and normalization.
//!
//! `validate` classifies raw form input into either a normalized
//! [`ResumeDocument`] or a map of field-level errors. It is pure and
//! synchronous. Every error is collected so the editor can flag each
//! offending field at once.
//!
//! Normalization rules:
//! - all strings are trimmed
//! - optional fields that are blank become `None`
//! - every entry must carry an id; the editor assigns them, never the validator
//! - `languages[].level` defaults to `Fluent`
//!
//! Running a validated document back through `validate` yields the same document.

use std::collections::{BTreeMap, HashSet};

use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::resume::{
    Certification, Education, EntryId, Experience, Extracurricular, Language, LanguageLevel,
    PersonalInfo, Project, ResumeDocument, Skill,
};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-']+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)+$")
        .expect("email pattern is valid")
});

const INVALID_EMAIL: &str = "Invalid email address";
const INVALID_URL: &str = "Invalid url";

// ────────────────────────────────────────────────────────────────────────────
// Error type
// ────────────────────────────────────────────────────────────────────────────

/// Field path → message. Paths look like `personalInfo.email` or `experience[1].role`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Error)]
#[error("{} field(s) failed validation", .fields.len())]
pub struct ValidationErrors {
    pub fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.fields.get(path).map(String::as_str)
    }

    fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        // First error per field wins, matching inline form display.
        self.fields.entry(path.into()).or_insert_with(|| message.into());
    }

    fn single(path: &str, message: String) -> Self {
        let mut errors = Self::default();
        errors.add(path, message);
        errors
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Raw (unvalidated) input
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawResume {
    personal_info: RawPersonalInfo,
    professional_summary: Option<String>,
    experience: Option<Vec<RawExperience>>,
    education: Option<Vec<RawEducation>>,
    projects: Option<Vec<RawProject>>,
    skills: Option<Vec<RawSkill>>,
    certifications: Option<Vec<RawCertification>>,
    extracurriculars: Option<Vec<RawExtracurricular>>,
    languages: Option<Vec<RawLanguage>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawPersonalInfo {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    linkedin: Option<String>,
    github: Option<String>,
    website: Option<String>,
    photo: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawExperience {
    id: Option<String>,
    role: Option<String>,
    company: Option<String>,
    location: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawEducation {
    id: Option<String>,
    institution: Option<String>,
    degree: Option<String>,
    field_of_study: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    gpa: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawProject {
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawSkill {
    id: Option<String>,
    name: Option<String>,
    category: Option<String>,
    level: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawCertification {
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawExtracurricular {
    id: Option<String>,
    title: Option<String>,
    organization: Option<String>,
    role: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawLanguage {
    id: Option<String>,
    name: Option<String>,
    level: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry points
// ────────────────────────────────────────────────────────────────────────────

/// Validates raw form JSON into a normalized document.
pub fn validate(raw: &serde_json::Value) -> Result<ResumeDocument, ValidationErrors> {
    let raw: RawResume = serde_json::from_value(raw.clone())
        .map_err(|e| ValidationErrors::single("$", format!("Malformed resume data: {e}")))?;

    let mut errors = ValidationErrors::default();
    let document = normalize(raw, &mut errors);

    if errors.is_empty() {
        Ok(document)
    } else {
        Err(errors)
    }
}

/// Re-validates an in-memory document, e.g. after an editor change.
pub fn validate_document(document: &ResumeDocument) -> Result<ResumeDocument, ValidationErrors> {
    let value = serde_json::to_value(document)
        .map_err(|e| ValidationErrors::single("$", format!("Unserializable resume data: {e}")))?;
    validate(&value)
}

// ────────────────────────────────────────────────────────────────────────────
// Field rules
// ────────────────────────────────────────────────────────────────────────────

/// Trimmed value, or `None` when blank.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(
    value: Option<String>,
    path: &str,
    label: &str,
    errors: &mut ValidationErrors,
) -> String {
    match clean(value) {
        Some(v) => v,
        None => {
            errors.add(path, format!("{label} is required"));
            String::new()
        }
    }
}

pub(crate) fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Absolute URL check. Relative references fail to parse without a base.
pub(crate) fn is_valid_url(value: &str) -> bool {
    match url::Url::parse(value) {
        Ok(parsed) => !parsed.cannot_be_a_base() || parsed.scheme() == "mailto",
        Err(_) => false,
    }
}

/// Empty means "not provided"; anything else must be a valid absolute URL.
fn optional_url(value: Option<String>, path: &str, errors: &mut ValidationErrors) -> Option<String> {
    let value = clean(value)?;
    if !is_valid_url(&value) {
        errors.add(path, INVALID_URL);
    }
    Some(value)
}

fn optional_photo(value: Option<String>, errors: &mut ValidationErrors) -> Option<String> {
    let value = clean(value)?;
    if !is_valid_photo(&value) {
        errors.add(
            "personalInfo.photo",
            "Photo must be an embedded base64 image",
        );
    }
    Some(value)
}

/// Accepts `data:image/<type>;base64,<payload>` with a decodable payload.
pub(crate) fn is_valid_photo(value: &str) -> bool {
    let Some(rest) = value.strip_prefix("data:image/") else {
        return false;
    };
    let Some((_, payload)) = rest.split_once(";base64,") else {
        return false;
    };
    !payload.is_empty()
        && base64::engine::general_purpose::STANDARD
            .decode(payload.as_bytes())
            .is_ok()
}

/// Requires an id on every entry and flags duplicates within a section.
struct IdTracker<'a> {
    section: &'a str,
    seen: HashSet<String>,
}

impl<'a> IdTracker<'a> {
    fn new(section: &'a str) -> Self {
        Self {
            section,
            seen: HashSet::new(),
        }
    }

    fn take(&mut self, raw: Option<String>, index: usize, errors: &mut ValidationErrors) -> EntryId {
        let path = format!("{}[{index}].id", self.section);
        let Some(id) = clean(raw) else {
            errors.add(path, "Id is required");
            return EntryId::new(String::new());
        };
        if !self.seen.insert(id.clone()) {
            errors.add(path, format!("Duplicate entry id '{id}'"));
        }
        EntryId::new(id)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Normalization
// ────────────────────────────────────────────────────────────────────────────

fn normalize(raw: RawResume, errors: &mut ValidationErrors) -> ResumeDocument {
    ResumeDocument {
        personal_info: normalize_personal(raw.personal_info, errors),
        professional_summary: clean(raw.professional_summary),
        experience: normalize_experience(raw.experience.unwrap_or_default(), errors),
        education: normalize_education(raw.education.unwrap_or_default(), errors),
        projects: normalize_projects(raw.projects.unwrap_or_default(), errors),
        skills: normalize_skills(raw.skills.unwrap_or_default(), errors),
        certifications: normalize_certifications(raw.certifications.unwrap_or_default(), errors),
        extracurriculars: normalize_extracurriculars(
            raw.extracurriculars.unwrap_or_default(),
            errors,
        ),
        languages: normalize_languages(raw.languages.unwrap_or_default(), errors),
    }
}

fn normalize_personal(raw: RawPersonalInfo, errors: &mut ValidationErrors) -> PersonalInfo {
    let name = required(raw.name, "personalInfo.name", "Name", errors);
    let email = match clean(raw.email) {
        Some(email) => {
            if !is_valid_email(&email) {
                errors.add("personalInfo.email", INVALID_EMAIL);
            }
            email
        }
        None => {
            errors.add("personalInfo.email", INVALID_EMAIL);
            String::new()
        }
    };

    PersonalInfo {
        name,
        email,
        phone: clean(raw.phone),
        address: clean(raw.address),
        linkedin: optional_url(raw.linkedin, "personalInfo.linkedin", errors),
        github: optional_url(raw.github, "personalInfo.github", errors),
        website: optional_url(raw.website, "personalInfo.website", errors),
        photo: optional_photo(raw.photo, errors),
    }
}

fn normalize_experience(raw: Vec<RawExperience>, errors: &mut ValidationErrors) -> Vec<Experience> {
    let mut ids = IdTracker::new("experience");
    raw.into_iter()
        .enumerate()
        .map(|(i, e)| Experience {
            id: ids.take(e.id, i, errors),
            role: required(e.role, &format!("experience[{i}].role"), "Role", errors),
            company: required(e.company, &format!("experience[{i}].company"), "Company", errors),
            location: clean(e.location),
            start_date: clean(e.start_date),
            end_date: clean(e.end_date),
            description: required(
                e.description,
                &format!("experience[{i}].description"),
                "Description",
                errors,
            ),
        })
        .collect()
}

fn normalize_education(raw: Vec<RawEducation>, errors: &mut ValidationErrors) -> Vec<Education> {
    let mut ids = IdTracker::new("education");
    raw.into_iter()
        .enumerate()
        .map(|(i, e)| Education {
            id: ids.take(e.id, i, errors),
            institution: required(
                e.institution,
                &format!("education[{i}].institution"),
                "Institution",
                errors,
            ),
            degree: required(e.degree, &format!("education[{i}].degree"), "Degree", errors),
            field_of_study: clean(e.field_of_study),
            start_date: clean(e.start_date),
            end_date: clean(e.end_date),
            gpa: clean(e.gpa),
        })
        .collect()
}

fn normalize_projects(raw: Vec<RawProject>, errors: &mut ValidationErrors) -> Vec<Project> {
    let mut ids = IdTracker::new("projects");
    raw.into_iter()
        .enumerate()
        .map(|(i, p)| Project {
            id: ids.take(p.id, i, errors),
            name: required(p.name, &format!("projects[{i}].name"), "Project name", errors),
            description: required(
                p.description,
                &format!("projects[{i}].description"),
                "Description",
                errors,
            ),
            url: optional_url(p.url, &format!("projects[{i}].url"), errors),
        })
        .collect()
}

fn normalize_skills(raw: Vec<RawSkill>, errors: &mut ValidationErrors) -> Vec<Skill> {
    let mut ids = IdTracker::new("skills");
    raw.into_iter()
        .enumerate()
        .map(|(i, s)| {
            let level = match s.level {
                Some(level) if (1..=5).contains(&level) => Some(level as u8),
                Some(_) => {
                    errors.add(
                        format!("skills[{i}].level"),
                        "Skill level must be between 1 and 5",
                    );
                    None
                }
                None => None,
            };
            Skill {
                id: ids.take(s.id, i, errors),
                name: required(s.name, &format!("skills[{i}].name"), "Skill name", errors),
                category: required(
                    s.category,
                    &format!("skills[{i}].category"),
                    "Category",
                    errors,
                ),
                level,
            }
        })
        .collect()
}

fn normalize_certifications(
    raw: Vec<RawCertification>,
    errors: &mut ValidationErrors,
) -> Vec<Certification> {
    let mut ids = IdTracker::new("certifications");
    raw.into_iter()
        .enumerate()
        .map(|(i, c)| Certification {
            id: ids.take(c.id, i, errors),
            name: required(
                c.name,
                &format!("certifications[{i}].name"),
                "Certification name",
                errors,
            ),
            description: clean(c.description),
            url: optional_url(c.url, &format!("certifications[{i}].url"), errors),
        })
        .collect()
}

fn normalize_extracurriculars(
    raw: Vec<RawExtracurricular>,
    errors: &mut ValidationErrors,
) -> Vec<Extracurricular> {
    let mut ids = IdTracker::new("extracurriculars");
    raw.into_iter()
        .enumerate()
        .map(|(i, x)| Extracurricular {
            id: ids.take(x.id, i, errors),
            title: required(x.title, &format!("extracurriculars[{i}].title"), "Title", errors),
            organization: required(
                x.organization,
                &format!("extracurriculars[{i}].organization"),
                "Organization",
                errors,
            ),
            role: required(x.role, &format!("extracurriculars[{i}].role"), "Role", errors),
            start_date: clean(x.start_date),
            end_date: clean(x.end_date),
            description: clean(x.description),
        })
        .collect()
}

fn normalize_languages(raw: Vec<RawLanguage>, errors: &mut ValidationErrors) -> Vec<Language> {
    let mut ids = IdTracker::new("languages");
    raw.into_iter()
        .enumerate()
        .map(|(i, l)| {
            let level = match clean(l.level) {
                None => LanguageLevel::default(),
                Some(label) => label.parse::<LanguageLevel>().unwrap_or_else(|_| {
                    errors.add(
                        format!("languages[{i}].level"),
                        "Level must be one of Native, Fluent, Professional, Intermediate, Basic",
                    );
                    LanguageLevel::default()
                }),
            };
            Language {
                id: ids.take(l.id, i, errors),
                name: required(l.name, &format!("languages[{i}].name"), "Language", errors),
                level,
            }
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
