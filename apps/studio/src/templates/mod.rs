//! Template Registry: the fixed set of named visual styles.
//!
//! Lookup never fails. Unknown ids resolve to `classic` so that stale or
//! hand-edited `templateId` values still render something sensible.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::resume::ResumeDocument;

pub mod defaults;
pub mod style;

pub use style::{SectionKind, TemplateStyle};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TemplateId {
    #[default]
    Classic,
    Modern,
    Creative,
    Photo,
    Elegant,
    ModernIconic,
    RedlineChrono,
    BlueBannerConstruction,
}

impl TemplateId {
    pub const ALL: [TemplateId; 8] = [
        TemplateId::Classic,
        TemplateId::Modern,
        TemplateId::Creative,
        TemplateId::Photo,
        TemplateId::Elegant,
        TemplateId::ModernIconic,
        TemplateId::RedlineChrono,
        TemplateId::BlueBannerConstruction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Classic => "classic",
            TemplateId::Modern => "modern",
            TemplateId::Creative => "creative",
            TemplateId::Photo => "photo",
            TemplateId::Elegant => "elegant",
            TemplateId::ModernIconic => "modernIconic",
            TemplateId::RedlineChrono => "redlineChrono",
            TemplateId::BlueBannerConstruction => "blueBannerConstruction",
        }
    }

    /// Resolves a possibly missing or unknown id, falling back to `Classic`.
    pub fn resolve(id: Option<&str>) -> TemplateId {
        match id.map(str::parse::<TemplateId>) {
            Some(Ok(id)) => id,
            Some(Err(_)) => {
                debug!(template = ?id, "unknown template id, falling back to classic");
                TemplateId::Classic
            }
            None => TemplateId::Classic,
        }
    }

    pub fn style(&self) -> &'static TemplateStyle {
        match self {
            TemplateId::Classic => &style::CLASSIC,
            TemplateId::Modern => &style::MODERN,
            TemplateId::Creative => &style::CREATIVE,
            TemplateId::Photo => &style::PHOTO,
            TemplateId::Elegant => &style::ELEGANT,
            TemplateId::ModernIconic => &style::MODERN_ICONIC,
            TemplateId::RedlineChrono => &style::REDLINE_CHRONO,
            TemplateId::BlueBannerConstruction => &style::BLUE_BANNER_CONSTRUCTION,
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("Unknown template '{s}'"))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Registry operations
// ────────────────────────────────────────────────────────────────────────────

/// Looks up a style by id. Unknown ids get the classic style.
pub fn get_template(id: &str) -> &'static TemplateStyle {
    TemplateId::resolve(Some(id)).style()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub id: TemplateId,
    pub name: &'static str,
}

pub fn list_templates() -> Vec<TemplateSummary> {
    TemplateId::ALL
        .iter()
        .map(|id| TemplateSummary {
            id: *id,
            name: id.style().display_name,
        })
        .collect()
}

/// The seed document a new resume starts from for this style.
pub fn template_default(id: TemplateId) -> ResumeDocument {
    defaults::seed(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_template_falls_back_to_classic() {
        assert_eq!(get_template("neonPunk").id, TemplateId::Classic);
        assert_eq!(get_template("").id, TemplateId::Classic);
        assert_eq!(TemplateId::resolve(None), TemplateId::Classic);
    }

    #[test]
    fn test_every_id_resolves_to_its_own_style() {
        for id in TemplateId::ALL {
            assert_eq!(get_template(id.as_str()).id, id);
        }
    }

    #[test]
    fn test_template_id_serializes_camel_case() {
        let json = serde_json::to_string(&TemplateId::BlueBannerConstruction).unwrap();
        assert_eq!(json, "\"blueBannerConstruction\"");
        let id: TemplateId = serde_json::from_str("\"modernIconic\"").unwrap();
        assert_eq!(id, TemplateId::ModernIconic);
    }

    #[test]
    fn test_list_templates_covers_all_styles() {
        let list = list_templates();
        assert_eq!(list.len(), 8);
        assert_eq!(list[0].name, "Classic");
    }

    #[test]
    fn test_every_template_default_is_valid() {
        for id in TemplateId::ALL {
            let seed = template_default(id);
            let value = serde_json::to_value(&seed).unwrap();
            assert!(
                crate::validation::validate(&value).is_ok(),
                "seed for {id} should validate"
            );
        }
    }
}
