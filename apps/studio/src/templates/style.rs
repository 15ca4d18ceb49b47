//! Immutable style descriptors: page geometry, typography tokens and section order.

use serde::Serialize;

use crate::models::resume::ResumeDocument;
use crate::render::metrics::FontFamily;
use crate::templates::TemplateId;

// ────────────────────────────────────────────────────────────────────────────
// Colours
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color(0x00, 0x00, 0x00);
    pub const GRAY_900: Color = Color(0x11, 0x18, 0x27);
    pub const GRAY_800: Color = Color(0x1f, 0x29, 0x37);
    pub const GRAY_700: Color = Color(0x37, 0x41, 0x51);
    pub const GRAY_600: Color = Color(0x4b, 0x55, 0x63);
    pub const GRAY_500: Color = Color(0x6b, 0x72, 0x80);
    pub const GRAY_300: Color = Color(0xd1, 0xd5, 0xdb);
    pub const GRAY_200: Color = Color(0xe5, 0xe7, 0xeb);
    pub const GRAY_100: Color = Color(0xf3, 0xf4, 0xf6);
    pub const SLATE_100: Color = Color(0xf1, 0xf5, 0xf9);
    pub const SLATE_700: Color = Color(0x33, 0x41, 0x55);
    pub const BLUE_600: Color = Color(0x25, 0x63, 0xeb);
    pub const SKY_700: Color = Color(0x03, 0x69, 0xa1);
    pub const PURPLE_600: Color = Color(0x93, 0x33, 0xea);
    pub const TEAL_600: Color = Color(0x0d, 0x94, 0x88);
    pub const RED_700: Color = Color(0xb9, 0x1c, 0x1c);

    /// `#rrggbb`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

pub const MM_PER_INCH: f32 = 25.4;

/// Physical page size plus the CSS pixel density it is laid out at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSpec {
    pub width_mm: f32,
    pub height_mm: f32,
    pub dpi: f32,
}

impl PageSpec {
    /// ISO A4 at the CSS reference density.
    pub const A4: PageSpec = PageSpec {
        width_mm: 210.0,
        height_mm: 297.0,
        dpi: 96.0,
    };

    pub fn width_px(&self) -> f32 {
        self.width_mm / MM_PER_INCH * self.dpi
    }

    pub fn height_px(&self) -> f32 {
        self.height_mm / MM_PER_INCH * self.dpi
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Projects,
    Skills,
    Certifications,
    Extracurriculars,
    Languages,
}

impl SectionKind {
    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Summary => "Summary",
            SectionKind::Experience => "Experience",
            SectionKind::Education => "Education",
            SectionKind::Projects => "Projects",
            SectionKind::Skills => "Skills",
            SectionKind::Certifications => "Certifications",
            SectionKind::Extracurriculars => "Extracurricular Activities",
            SectionKind::Languages => "Languages",
        }
    }

    /// Whether the backing array or text has anything to show.
    pub fn has_content(&self, doc: &ResumeDocument) -> bool {
        match self {
            SectionKind::Summary => doc
                .professional_summary
                .as_deref()
                .is_some_and(|s| !s.trim().is_empty()),
            SectionKind::Experience => !doc.experience.is_empty(),
            SectionKind::Education => !doc.education.is_empty(),
            SectionKind::Projects => !doc.projects.is_empty(),
            SectionKind::Skills => !doc.grouped_skills().is_empty(),
            SectionKind::Certifications => !doc.certifications.is_empty(),
            SectionKind::Extracurriculars => !doc.extracurriculars.is_empty(),
            SectionKind::Languages => !doc.languages.is_empty(),
        }
    }
}

pub const STANDARD_ORDER: &[SectionKind] = &[
    SectionKind::Summary,
    SectionKind::Experience,
    SectionKind::Education,
    SectionKind::Projects,
    SectionKind::Skills,
    SectionKind::Certifications,
    SectionKind::Extracurriculars,
    SectionKind::Languages,
];

// ────────────────────────────────────────────────────────────────────────────
// Tokens
// ────────────────────────────────────────────────────────────────────────────

/// Where entry dates go in single-column styles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum DateLayout {
    /// Folded into the subtitle line.
    Inline,
    /// Right-aligned column of the given width.
    Column { width: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleTokens {
    pub body_font: FontFamily,
    pub heading_font: FontFamily,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub name_size: f32,
    pub heading_size: f32,
    pub body_size: f32,
    pub small_size: f32,
    /// Line height as a multiple of the font size.
    pub leading: f32,
    /// Page padding in px.
    pub margin: f32,
    pub section_gap: f32,
    pub entry_gap: f32,
    pub heading_rule: bool,
    pub heading_uppercase: bool,
    pub centered_header: bool,
    pub dates: DateLayout,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateStyle {
    pub id: TemplateId,
    pub display_name: &'static str,
    pub page: PageSpec,
    pub tokens: StyleTokens,
    pub sections: &'static [SectionKind],
}

// ────────────────────────────────────────────────────────────────────────────
// Descriptors
// ────────────────────────────────────────────────────────────────────────────

const BASE_TOKENS: StyleTokens = StyleTokens {
    body_font: FontFamily::Sans,
    heading_font: FontFamily::Sans,
    text: Color::GRAY_800,
    muted: Color::GRAY_600,
    accent: Color::GRAY_900,
    name_size: 30.0,
    heading_size: 18.0,
    body_size: 13.0,
    small_size: 12.0,
    leading: 1.45,
    margin: 32.0,
    section_gap: 18.0,
    entry_gap: 10.0,
    heading_rule: true,
    heading_uppercase: false,
    centered_header: false,
    dates: DateLayout::Column { width: 150.0 },
};

pub static CLASSIC: TemplateStyle = TemplateStyle {
    id: TemplateId::Classic,
    display_name: "Classic",
    page: PageSpec::A4,
    tokens: StyleTokens {
        body_font: FontFamily::Georgia,
        heading_font: FontFamily::Georgia,
        name_size: 32.0,
        centered_header: true,
        dates: DateLayout::Inline,
        ..BASE_TOKENS
    },
    sections: STANDARD_ORDER,
};

pub static MODERN: TemplateStyle = TemplateStyle {
    id: TemplateId::Modern,
    display_name: "Modern",
    page: PageSpec::A4,
    tokens: StyleTokens {
        accent: Color::BLUE_600,
        heading_uppercase: true,
        heading_size: 16.0,
        ..BASE_TOKENS
    },
    sections: STANDARD_ORDER,
};

pub static CREATIVE: TemplateStyle = TemplateStyle {
    id: TemplateId::Creative,
    display_name: "Creative",
    page: PageSpec::A4,
    tokens: StyleTokens {
        accent: Color::PURPLE_600,
        heading_rule: false,
        name_size: 34.0,
        ..BASE_TOKENS
    },
    sections: STANDARD_ORDER,
};

pub static PHOTO: TemplateStyle = TemplateStyle {
    id: TemplateId::Photo,
    display_name: "Photo",
    page: PageSpec::A4,
    tokens: StyleTokens {
        accent: Color::SLATE_700,
        heading_size: 16.0,
        heading_uppercase: true,
        margin: 24.0,
        ..BASE_TOKENS
    },
    sections: &[
        SectionKind::Summary,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Projects,
        SectionKind::Certifications,
        SectionKind::Extracurriculars,
        SectionKind::Languages,
    ],
};

pub static ELEGANT: TemplateStyle = TemplateStyle {
    id: TemplateId::Elegant,
    display_name: "Elegant",
    page: PageSpec::A4,
    tokens: StyleTokens {
        body_font: FontFamily::Garamond,
        heading_font: FontFamily::Garamond,
        text: Color::GRAY_900,
        muted: Color::GRAY_500,
        accent: Color::GRAY_700,
        name_size: 36.0,
        heading_size: 15.0,
        body_size: 14.0,
        heading_rule: false,
        heading_uppercase: true,
        margin: 40.0,
        ..BASE_TOKENS
    },
    sections: STANDARD_ORDER,
};

pub static MODERN_ICONIC: TemplateStyle = TemplateStyle {
    id: TemplateId::ModernIconic,
    display_name: "Modern Iconic",
    page: PageSpec::A4,
    tokens: StyleTokens {
        accent: Color::TEAL_600,
        heading_size: 17.0,
        ..BASE_TOKENS
    },
    sections: STANDARD_ORDER,
};

pub static REDLINE_CHRONO: TemplateStyle = TemplateStyle {
    id: TemplateId::RedlineChrono,
    display_name: "Redline Chrono",
    page: PageSpec::A4,
    tokens: StyleTokens {
        text: Color::BLACK,
        accent: Color::RED_700,
        name_size: 36.0,
        heading_size: 20.0,
        heading_uppercase: false,
        dates: DateLayout::Inline,
        ..BASE_TOKENS
    },
    sections: &[
        SectionKind::Summary,
        SectionKind::Skills,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Projects,
        SectionKind::Certifications,
        SectionKind::Extracurriculars,
        SectionKind::Languages,
    ],
};

pub static BLUE_BANNER_CONSTRUCTION: TemplateStyle = TemplateStyle {
    id: TemplateId::BlueBannerConstruction,
    display_name: "Blue Banner Construction",
    page: PageSpec::A4,
    tokens: StyleTokens {
        heading_font: FontFamily::Oswald,
        accent: Color::SKY_700,
        name_size: 38.0,
        heading_uppercase: true,
        ..BASE_TOKENS
    },
    sections: &[
        SectionKind::Summary,
        SectionKind::Skills,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Projects,
        SectionKind::Certifications,
        SectionKind::Extracurriculars,
        SectionKind::Languages,
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_pixel_size_at_96_dpi() {
        assert!((PageSpec::A4.width_px() - 793.7).abs() < 0.1);
        assert!((PageSpec::A4.height_px() - 1122.5).abs() < 0.1);
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::RED_700.hex(), "#b91c1c");
        assert_eq!(Color::WHITE.hex(), "#ffffff");
    }

    #[test]
    fn test_empty_summary_has_no_content() {
        let mut doc = ResumeDocument::minimal("Jane", "jane@example.com");
        assert!(!SectionKind::Summary.has_content(&doc));
        doc.professional_summary = Some("   ".to_string());
        assert!(!SectionKind::Summary.has_content(&doc));
        doc.professional_summary = Some("Engineer".to_string());
        assert!(SectionKind::Summary.has_content(&doc));
    }
}
