// Prompt builders for the writing assistant.

use serde::Deserialize;

use crate::models::resume::ResumeDocument;
use crate::render::text::{date_range, description_lines, join_present};

/// Free-form generation requests offered next to resume feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssistKind {
    Summary,
    Objective,
    CoverLetter,
    Skills,
}

impl AssistKind {
    pub fn prompt(&self, text: &str) -> String {
        let text = text.trim();
        match self {
            AssistKind::Summary => format!("Write a professional resume summary for: {text}"),
            AssistKind::Objective => format!("Write a concise resume objective statement for: {text}"),
            AssistKind::CoverLetter => format!("Write a compelling cover letter introduction for: {text}"),
            AssistKind::Skills => format!("List the most relevant skills for: {text}"),
        }
    }
}

pub const FEEDBACK_INSTRUCTION: &str = "\
    You are an AI resume expert providing feedback on resume content. \
    Analyze the provided resume content and provide constructive feedback, \
    highlighting strengths and suggesting improvements in wording and impact.";

pub fn feedback_prompt(doc: &ResumeDocument) -> String {
    format!("{FEEDBACK_INSTRUCTION}\n\nResume Content:\n{}", resume_plain_text(doc))
}

/// Resume flattened to headed plain-text blocks. Empty sections are skipped.
pub fn resume_plain_text(doc: &ResumeDocument) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let info = &doc.personal_info;
    blocks.push(info.name.trim().to_string());

    if let Some(summary) = doc.professional_summary.as_deref().filter(|s| !s.trim().is_empty()) {
        blocks.push(format!("Summary\n{}", summary.trim()));
    }

    let mut push = |title: &str, lines: Vec<String>| {
        if !lines.is_empty() {
            blocks.push(format!("{title}\n{}", lines.join("\n")));
        }
    };

    push(
        "Experience",
        doc.experience
            .iter()
            .flat_map(|e| {
                let dates = date_range(e.start_date.as_deref(), e.end_date.as_deref(), " - ");
                let header = join_present(
                    &[Some(e.role.as_str()), Some(e.company.as_str()), dates.as_deref()],
                    ", ",
                )
                .unwrap_or_default();
                std::iter::once(header).chain(description_lines(&e.description).into_iter().map(|l| format!("- {l}")))
            })
            .collect(),
    );
    push(
        "Education",
        doc.education
            .iter()
            .filter_map(|e| join_present(&[Some(e.degree.as_str()), Some(e.institution.as_str())], ", "))
            .collect(),
    );
    push(
        "Projects",
        doc.projects
            .iter()
            .flat_map(|p| {
                std::iter::once(p.name.clone())
                    .chain(description_lines(&p.description).into_iter().map(|l| format!("- {l}")))
            })
            .collect(),
    );
    push(
        "Skills",
        doc.grouped_skills()
            .into_iter()
            .map(|(category, names)| format!("{category}: {}", names.join(", ")))
            .collect(),
    );
    push(
        "Certifications",
        doc.certifications
            .iter()
            .map(|c| c.name.trim().to_string())
            .collect(),
    );
    push(
        "Languages",
        doc.languages
            .iter()
            .map(|l| format!("{} ({})", l.name, l.level.as_str()))
            .collect(),
    );

    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{template_default, TemplateId};

    #[test]
    fn test_kind_prompts() {
        assert_eq!(
            AssistKind::Skills.prompt(" barista "),
            "List the most relevant skills for: barista"
        );
        assert!(AssistKind::CoverLetter.prompt("x").starts_with("Write a compelling cover letter"));
    }

    #[test]
    fn test_plain_text_skips_empty_sections() {
        let doc = ResumeDocument::minimal("Jane Doe", "jane@example.com");
        assert_eq!(resume_plain_text(&doc), "Jane Doe");
    }

    #[test]
    fn test_feedback_prompt_carries_resume() {
        let doc = template_default(TemplateId::Classic);
        let prompt = feedback_prompt(&doc);
        assert!(prompt.starts_with("You are an AI resume expert"));
        assert!(prompt.contains(&doc.personal_info.name));
        assert!(prompt.contains("Experience\n"));
    }
}
