//! The contact line: present fields only, in a fixed order.

use serde::Serialize;

use crate::models::resume::PersonalInfo;
use crate::render::canvas::InlineItem;

pub const CONTACT_SEPARATOR: &str = "|";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactKind {
    Email,
    Phone,
    Address,
    Linkedin,
    Github,
    Website,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactItem {
    pub kind: ContactKind,
    pub label: String,
    pub href: Option<String>,
}

impl ContactItem {
    pub fn to_inline(&self) -> InlineItem {
        InlineItem {
            text: self.label.clone(),
            href: self.href.clone(),
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Email, phone, address, LinkedIn, GitHub, website; absent fields skipped.
///
/// Email links use `mailto:`, phone uses `tel:`, address is plain text.
/// Profile links show a fixed label instead of the raw URL.
pub fn contact_items(info: &PersonalInfo) -> Vec<ContactItem> {
    let mut items = Vec::new();
    if let Some(email) = present(Some(&info.email)) {
        items.push(ContactItem {
            kind: ContactKind::Email,
            label: email.to_string(),
            href: Some(format!("mailto:{email}")),
        });
    }
    if let Some(phone) = present(info.phone.as_deref()) {
        let digits: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
        items.push(ContactItem {
            kind: ContactKind::Phone,
            label: phone.to_string(),
            href: Some(format!("tel:{digits}")),
        });
    }
    if let Some(address) = present(info.address.as_deref()) {
        items.push(ContactItem {
            kind: ContactKind::Address,
            label: address.to_string(),
            href: None,
        });
    }
    let profiles = [
        (ContactKind::Linkedin, "LinkedIn", info.linkedin.as_deref()),
        (ContactKind::Github, "GitHub", info.github.as_deref()),
        (ContactKind::Website, "Portfolio", info.website.as_deref()),
    ];
    for (kind, label, url) in profiles {
        if let Some(url) = present(url) {
            items.push(ContactItem {
                kind,
                label: label.to_string(),
                href: Some(url.to_string()),
            });
        }
    }
    items
}

pub fn contact_inline(info: &PersonalInfo) -> Vec<InlineItem> {
    contact_items(info).iter().map(ContactItem::to_inline).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> PersonalInfo {
        PersonalInfo {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: Some("123 456 7890".to_string()),
            address: Some("Anytown".to_string()),
            linkedin: Some("https://linkedin.com/in/jane".to_string()),
            github: Some("https://github.com/jane".to_string()),
            website: Some("https://jane.dev".to_string()),
            photo: None,
        }
    }

    #[test]
    fn test_contact_items_order_and_hrefs() {
        let items = contact_items(&full());
        let kinds: Vec<_> = items.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ContactKind::Email,
                ContactKind::Phone,
                ContactKind::Address,
                ContactKind::Linkedin,
                ContactKind::Github,
                ContactKind::Website,
            ]
        );
        assert_eq!(items[0].href.as_deref(), Some("mailto:jane@example.com"));
        assert_eq!(items[1].href.as_deref(), Some("tel:1234567890"));
        assert_eq!(items[2].href, None);
        assert_eq!(items[5].label, "Portfolio");
    }

    #[test]
    fn test_blank_fields_are_skipped() {
        let info = PersonalInfo {
            phone: Some("  ".to_string()),
            github: None,
            ..full()
        };
        let items = contact_items(&info);
        assert_eq!(items.len(), 4);
        assert!(items.iter().all(|i| i.kind != ContactKind::Phone));
    }

    #[test]
    fn test_only_email() {
        let info = PersonalInfo {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            ..PersonalInfo::default()
        };
        assert_eq!(contact_items(&info).len(), 1);
    }
}
