//! Add, remove and reorder entries within one section.

use crate::editor::EditError;
use crate::models::resume::{
    Certification, Education, EntryId, Experience, Extracurricular, Language, LanguageLevel, Project,
    ResumeDocument, Section, Skill,
};

pub trait Entry {
    fn id(&self) -> &EntryId;

    /// A fresh entry with every field empty.
    fn blank(id: EntryId) -> Self;
}

impl Entry for Experience {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            role: String::new(),
            company: String::new(),
            location: None,
            start_date: None,
            end_date: None,
            description: String::new(),
        }
    }
}

impl Entry for Education {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            institution: String::new(),
            degree: String::new(),
            field_of_study: None,
            start_date: None,
            end_date: None,
            gpa: None,
        }
    }
}

impl Entry for Project {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            name: String::new(),
            description: String::new(),
            url: None,
        }
    }
}

impl Entry for Skill {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            name: String::new(),
            category: String::new(),
            level: None,
        }
    }
}

impl Entry for Certification {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            name: String::new(),
            description: None,
            url: None,
        }
    }
}

impl Entry for Extracurricular {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            title: String::new(),
            organization: String::new(),
            role: String::new(),
            start_date: None,
            end_date: None,
            description: None,
        }
    }
}

impl Entry for Language {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            name: String::new(),
            level: LanguageLevel::default(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// List operations
// ────────────────────────────────────────────────────────────────────────────

fn position<T: Entry>(list: &[T], section: Section, id: &EntryId) -> Result<usize, EditError> {
    list.iter()
        .position(|e| e.id() == id)
        .ok_or_else(|| EditError::EntryNotFound {
            section: section.as_str(),
            id: id.to_string(),
        })
}

fn push_blank<T: Entry>(list: &mut Vec<T>) -> EntryId {
    let id = EntryId::generate();
    list.push(T::blank(id.clone()));
    id
}

fn remove_from<T: Entry>(list: &mut Vec<T>, section: Section, id: &EntryId) -> Result<(), EditError> {
    let index = position(list, section, id)?;
    list.remove(index);
    Ok(())
}

fn move_within<T: Entry>(list: &mut Vec<T>, section: Section, id: &EntryId, to: usize) -> Result<(), EditError> {
    let from = position(list, section, id)?;
    if to >= list.len() {
        return Err(EditError::OutOfRange { to, len: list.len() });
    }
    let entry = list.remove(from);
    list.insert(to, entry);
    Ok(())
}

macro_rules! with_section {
    ($doc:expr, $section:expr, |$list:ident| $body:expr) => {
        match $section {
            Section::Experience => {
                let $list = &mut $doc.experience;
                $body
            }
            Section::Education => {
                let $list = &mut $doc.education;
                $body
            }
            Section::Projects => {
                let $list = &mut $doc.projects;
                $body
            }
            Section::Skills => {
                let $list = &mut $doc.skills;
                $body
            }
            Section::Certifications => {
                let $list = &mut $doc.certifications;
                $body
            }
            Section::Extracurriculars => {
                let $list = &mut $doc.extracurriculars;
                $body
            }
            Section::Languages => {
                let $list = &mut $doc.languages;
                $body
            }
        }
    };
}

/// Appends a blank entry and returns its new id.
pub fn add_entry(doc: &mut ResumeDocument, section: Section) -> EntryId {
    with_section!(doc, section, |list| push_blank(list))
}

pub fn remove_entry(doc: &mut ResumeDocument, section: Section, id: &EntryId) -> Result<(), EditError> {
    with_section!(doc, section, |list| remove_from(list, section, id))
}

/// Moves an entry to index `to`, shifting the others. Order is display order.
pub fn move_entry(doc: &mut ResumeDocument, section: Section, id: &EntryId, to: usize) -> Result<(), EditError> {
    with_section!(doc, section, |list| move_within(list, section, id, to))
}
