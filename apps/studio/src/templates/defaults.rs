//! Seed documents, one per style. A new resume starts as a copy of its style's seed.

use crate::models::resume::{
    Certification, Education, EntryId, Experience, Extracurricular, Language, LanguageLevel,
    PersonalInfo, Project, ResumeDocument, Skill,
};
use crate::templates::TemplateId;

pub fn seed(id: TemplateId) -> ResumeDocument {
    match id {
        TemplateId::Classic => classic(),
        TemplateId::Modern => modern(),
        TemplateId::Creative => creative(),
        TemplateId::Photo => photo(),
        TemplateId::Elegant => elegant(),
        TemplateId::ModernIconic => modern_iconic(),
        TemplateId::RedlineChrono => redline_chrono(),
        TemplateId::BlueBannerConstruction => blue_banner_construction(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Builders
// ────────────────────────────────────────────────────────────────────────────

fn opt(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn person(name: &str, email: &str, phone: &str, address: &str, links: [&str; 3]) -> PersonalInfo {
    PersonalInfo {
        name: name.to_string(),
        email: email.to_string(),
        phone: opt(phone),
        address: opt(address),
        linkedin: opt(links[0]),
        github: opt(links[1]),
        website: opt(links[2]),
        photo: None,
    }
}

fn job(
    id: &str,
    role: &str,
    company: &str,
    location: &str,
    dates: (&str, &str),
    bullets: &[&str],
) -> Experience {
    Experience {
        id: EntryId::new(id),
        role: role.to_string(),
        company: company.to_string(),
        location: opt(location),
        start_date: opt(dates.0),
        end_date: opt(dates.1),
        description: bullets.join("\n"),
    }
}

fn school(
    id: &str,
    institution: &str,
    degree: &str,
    field: &str,
    dates: (&str, &str),
    gpa: &str,
) -> Education {
    Education {
        id: EntryId::new(id),
        institution: institution.to_string(),
        degree: degree.to_string(),
        field_of_study: opt(field),
        start_date: opt(dates.0),
        end_date: opt(dates.1),
        gpa: opt(gpa),
    }
}

fn project(id: &str, name: &str, description: &str, url: &str) -> Project {
    Project {
        id: EntryId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        url: opt(url),
    }
}

fn skills(entries: &[(&str, &str, &str)]) -> Vec<Skill> {
    entries
        .iter()
        .map(|(id, name, category)| Skill {
            id: EntryId::new(*id),
            name: name.to_string(),
            category: category.to_string(),
            level: None,
        })
        .collect()
}

fn rated_skills(prefix: &str, entries: &[(&str, u8)]) -> Vec<Skill> {
    entries
        .iter()
        .enumerate()
        .map(|(i, (name, level))| Skill {
            id: EntryId::new(format!("{prefix}{}", i + 1)),
            name: name.to_string(),
            category: "General".to_string(),
            level: Some(*level),
        })
        .collect()
}

fn cert(id: &str, name: &str, description: &str, url: &str) -> Certification {
    Certification {
        id: EntryId::new(id),
        name: name.to_string(),
        description: opt(description),
        url: opt(url),
    }
}

fn activity(id: &str, organization: &str, role: &str, dates: (&str, &str), description: &str) -> Extracurricular {
    Extracurricular {
        id: EntryId::new(id),
        title: role.to_string(),
        organization: organization.to_string(),
        role: role.to_string(),
        start_date: opt(dates.0),
        end_date: opt(dates.1),
        description: opt(description),
    }
}

fn languages(entries: &[(&str, LanguageLevel)]) -> Vec<Language> {
    entries
        .iter()
        .enumerate()
        .map(|(i, (name, level))| Language {
            id: EntryId::new(format!("lang{}", i + 1)),
            name: name.to_string(),
            level: *level,
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Seeds
// ────────────────────────────────────────────────────────────────────────────

fn classic() -> ResumeDocument {
    ResumeDocument {
        personal_info: person(
            "Jane Doe",
            "jane.doe@example.com",
            "123-456-7890",
            "123 Main St, Anytown, USA",
            [
                "https://linkedin.com/in/janedoe",
                "https://github.com/janedoe",
                "https://janedoe.com",
            ],
        ),
        professional_summary: opt("A highly motivated and detail-oriented software engineer with experience in building and maintaining web applications. Proficient in React, Node.js, and modern web technologies. Seeking to leverage my skills to contribute to a challenging and dynamic team."),
        experience: vec![job(
            "1",
            "Software Engineer",
            "Tech Corp",
            "",
            ("Jan 2020", "Present"),
            &[
                "Developed and maintained web applications using React and Node.js.",
                "Collaborated with cross-functional teams to deliver high-quality software solutions.",
            ],
        )],
        education: vec![school(
            "1",
            "University of Technology",
            "B.S. in Computer Science",
            "",
            ("Sep 2016", "Dec 2019"),
            "3.8/4.0",
        )],
        projects: vec![project(
            "1",
            "Personal Portfolio",
            "A responsive personal portfolio website to showcase my projects and skills.",
            "https://janedoe.com",
        )],
        skills: skills(&[
            ("1", "JavaScript", "Languages"),
            ("7", "Python", "Languages"),
            ("2", "React", "Technologies/Frameworks"),
            ("3", "Node.js", "Technologies/Frameworks"),
            ("4", "Tailwind CSS", "Technologies/Frameworks"),
            ("5", "VS Code", "Developer Tools"),
            ("6", "Git", "Developer Tools"),
        ]),
        certifications: vec![cert(
            "1",
            "Certified React Developer",
            "An advanced certification for React professionals.",
            "https://example.com/cert",
        )],
        extracurriculars: vec![activity(
            "1",
            "Tech Club",
            "President",
            ("Sep 2018", "May 2019"),
            "Organized weekly coding workshops and hackathons for students.",
        )],
        languages: languages(&[
            ("English", LanguageLevel::Native),
            ("Spanish", LanguageLevel::Intermediate),
        ]),
    }
}

fn modern() -> ResumeDocument {
    ResumeDocument {
        personal_info: person(
            "Alex Ray",
            "alex.ray@email.com",
            "555-010-2030",
            "456 Modern Ave, Metropolis, USA",
            ["https://linkedin.com/in/alexray", "https://github.com/alexray", ""],
        ),
        professional_summary: opt("Innovative UX/UI Designer with a passion for creating intuitive and beautiful user experiences. 4+ years of experience in mobile and web design, wireframing, and prototyping."),
        experience: vec![
            job(
                "exp1",
                "Senior UX/UI Designer",
                "Innovate Digital",
                "",
                ("June 2021", "Present"),
                &[
                    "Lead design on major client projects, resulting in a 25% increase in user engagement.",
                    "Mentored junior designers and established a new design system for the company.",
                ],
            ),
            job(
                "exp2",
                "UX Designer",
                "Creative Solutions",
                "",
                ("May 2019", "June 2021"),
                &[
                    "Designed wireframes, mockups, and prototypes for web and mobile applications.",
                    "Conducted user research and usability testing to inform design decisions.",
                ],
            ),
        ],
        education: vec![school(
            "edu1",
            "Design Institute of America",
            "B.F.A. in Graphic Design",
            "",
            ("2015", "2019"),
            "3.9",
        )],
        projects: vec![project(
            "proj1",
            "Mobile Banking App Redesign",
            "A personal project focused on improving the user flow and visual design of a popular banking application.",
            "https://github.com/alexray/banking-redesign",
        )],
        skills: skills(&[
            ("sk1", "Figma", "Developer Tools"),
            ("sk2", "Adobe XD", "Developer Tools"),
            ("sk3", "User Research", "Other"),
            ("sk4", "Prototyping", "Other"),
            ("sk5", "HTML/CSS", "Languages"),
        ]),
        certifications: vec![cert(
            "cert1",
            "Certified UX Professional (CUXP)",
            "Covers user research, design thinking, and interaction design principles.",
            "https://example.com/cert",
        )],
        extracurriculars: vec![],
        languages: vec![],
    }
}

fn creative() -> ResumeDocument {
    ResumeDocument {
        personal_info: person(
            "Samira Khan",
            "samira.khan@creative.dev",
            "111-222-3333",
            "789 Creative Lane, Artsburg, USA",
            ["https://linkedin.com/in/samirakhan", "", "https://samirakhan.art"],
        ),
        professional_summary: opt("Dynamic and creative content creator and social media strategist with a proven track record of growing online communities and building brand identity."),
        experience: vec![job(
            "exp1",
            "Content Strategist",
            "Vivid Media",
            "",
            ("Jan 2022", "Present"),
            &[
                "Developed and executed content strategies across multiple platforms, increasing follower count by 150%.",
                "Produced and edited viral video content, amassing over 10 million views.",
            ],
        )],
        education: vec![school(
            "edu1",
            "State University",
            "B.A. in Communications",
            "",
            ("2017", "2021"),
            "3.7",
        )],
        projects: vec![project(
            "proj1",
            "\"City Lights\" Short Film",
            "Wrote, directed, and edited a short film that was accepted into three local film festivals.",
            "https://vimeo.com/samirakhan/citylights",
        )],
        skills: skills(&[
            ("sk1", "Adobe Premiere Pro", "Developer Tools"),
            ("sk2", "Copywriting", "Other"),
            ("sk3", "Social Media Marketing", "Other"),
            ("sk4", "SEO", "Other"),
            ("sk5", "Canva", "Developer Tools"),
        ]),
        certifications: vec![],
        extracurriculars: vec![activity(
            "extra1",
            "University Film Club",
            "Vice President",
            ("2019", "2021"),
            "Organized film screenings and workshops for students.",
        )],
        languages: vec![],
    }
}

fn photo() -> ResumeDocument {
    ResumeDocument {
        personal_info: person(
            "Emily Carter",
            "emily.carter@photo.com",
            "555-123-4567",
            "123 Pixel Perfect Rd, San Francisco, CA",
            [
                "https://linkedin.com/in/emilycarter",
                "https://github.com/emilycarter",
                "https://emilycarter.dev",
            ],
        ),
        professional_summary: opt("Creative and detail-oriented Front-End Developer with 5 years of experience building responsive and user-friendly web applications."),
        experience: vec![job(
            "1",
            "Front-End Developer",
            "Web Solutions Inc.",
            "",
            ("Mar 2020", "Present"),
            &[
                "Led the development of a new e-commerce platform using React and Redux, increasing sales by 20%.",
                "Implemented a component library to ensure brand consistency across all web properties.",
            ],
        )],
        education: vec![school(
            "1",
            "University of California, Berkeley",
            "B.A. in Cognitive Science",
            "",
            ("Sep 2011", "May 2015"),
            "3.7/4.0",
        )],
        projects: vec![project(
            "1",
            "Interactive Data Visualization Tool",
            "Developed a tool using D3.js to visualize complex datasets for a non-profit organization.",
            "https://github.com/emilycarter/data-viz",
        )],
        skills: skills(&[
            ("1", "HTML5 & CSS3", "Languages"),
            ("2", "JavaScript (ES6+)", "Languages"),
            ("3", "React", "Technologies/Frameworks"),
            ("4", "Vue.js", "Technologies/Frameworks"),
            ("5", "Webpack", "Developer Tools"),
            ("6", "Figma", "Developer Tools"),
        ]),
        certifications: vec![cert(
            "1",
            "AWS Certified Cloud Practitioner",
            "Validates foundational knowledge of AWS cloud services and concepts.",
            "https://example.com/cert-aws",
        )],
        extracurriculars: vec![],
        languages: vec![],
    }
}

fn elegant() -> ResumeDocument {
    let analyst = [
        "Conducted comprehensive financial analysis to identify cost-saving opportunities, resulting in a 10% reduction in operational expenses.",
        "Developed complex financial models to support strategic decision-making.",
    ];
    let research = [
        "Conducted in-depth market research and due diligence on potential investment opportunities.",
        "Monitored portfolio performance and recommended adjustments to maintain portfolio health.",
    ];
    ResumeDocument {
        personal_info: person(
            "Name Surname",
            "name.surname@gmail.com",
            "+1 222 222 222",
            "NY, USA",
            ["", "", ""],
        ),
        professional_summary: opt("A detail-oriented and results-driven Financial Analyst with over 7 years of experience in financial analysis, forecasting, and budgeting."),
        experience: vec![
            job("exp1", "Senior Financial Analyst", "ABC CORPORATION", "NY, USA", ("Nov. 20XX", "Jul. 20XX"), &analyst),
            job("exp2", "Financial Planning & Analyst Manager", "DEF INCORPORATION", "NY, USA", ("Nov. 20XX", "Jul. 20XX"), &research),
            job("exp3", "Investment Analyst", "GHI INVESTMENT GROUP", "NY, USA", ("Nov. 20XX", "Jul. 20XX"), &research),
        ],
        education: vec![
            school("edu1", "NYU", "Master of Business Administration", "", ("20XX", "20XX"), ""),
            school("edu2", "NYU", "Bachelor of Science in Finance", "", ("20XX", "20XX"), ""),
        ],
        projects: vec![],
        skills: skills(&[
            ("sk1", "Financial Modeling", "Hard"),
            ("sk2", "Excel", "Hard"),
            ("sk3", "Word", "Hard"),
            ("sk4", "PowerPoint", "Hard"),
            ("sk5", "Outlook", "Hard"),
            ("sk6", "Analytical thinking", "Soft"),
            ("sk7", "Problem Solving", "Soft"),
            ("sk8", "Communication", "Soft"),
            ("sk9", "Time Management", "Soft"),
        ]),
        certifications: vec![],
        extracurriculars: vec![],
        languages: languages(&[
            ("English", LanguageLevel::Fluent),
            ("Spanish", LanguageLevel::Professional),
            ("French", LanguageLevel::Intermediate),
        ]),
    }
}

fn modern_iconic() -> ResumeDocument {
    ResumeDocument {
        personal_info: person(
            "John Smith",
            "j.smith@uptowork.com",
            "774-987-4009",
            "",
            ["https://linkedin.com/in/johnutw", "", ""],
        ),
        professional_summary: opt("IT Professional with over 10 years of experience specializing in IT department management for international logistics companies."),
        experience: vec![
            job(
                "exp1",
                "Senior Project Manager",
                "Seton Hospital, ME",
                "",
                ("2006-12", "present"),
                &[
                    "Oversaw all major hospital IT projects for 10+ years, focus on cost reduction.",
                    "Responsible for creating, improving, and developing IT project strategies.",
                    "Implemented the Lean Training and Six Sigma projects for all employees. Cut costs by 32%.",
                ],
            ),
            job(
                "exp2",
                "Junior Project Manager",
                "Seton Hospital, ME",
                "",
                ("2004-09", "2006-11"),
                &[
                    "Streamlined IT logistics and administration operation cutting costs by 25%.",
                    "Maintained the user database of over 30000 patients.",
                ],
            ),
        ],
        education: vec![school(
            "edu1",
            "University of Maryland",
            "BS/MS in Computer Science",
            "",
            ("1996-09", "2001-05"),
            "",
        )],
        projects: vec![],
        skills: rated_skills(
            "sk",
            &[
                ("Business Process Improvement", 5),
                ("Vendor Management", 4),
                ("Project Scheduling", 5),
                ("Sales Analysis", 3),
            ],
        ),
        certifications: vec![],
        extracurriculars: vec![],
        languages: vec![],
    }
}

fn redline_chrono() -> ResumeDocument {
    ResumeDocument {
        personal_info: person(
            "DANIEL BURKE",
            "example@example.com",
            "(555) 555-5555",
            "Manchester, NH",
            [
                "https://linkedin.com/in/danielburke",
                "https://github.com/danielburke",
                "https://danielburke.com",
            ],
        ),
        professional_summary: opt("Focused construction worker familiar with transporting supplies, operating machines and coordinating traffic for smooth and efficient site work."),
        experience: vec![
            job(
                "exp1",
                "Construction Worker",
                "Luce Contracting",
                "Manchester, NH",
                ("03/2016", "Current"),
                &[
                    "Consulted with over 70 customers to understand desires and help each owner meet property objectives.",
                    "Installed new structures, updated systems and replaced worn components to bring buildings up to code.",
                ],
            ),
            job(
                "exp2",
                "Construction Worker",
                "TradeSource Inc.",
                "Nashua, NH",
                ("11/2012", "01/2016"),
                &[
                    "Managed independent resolutions of site issues to keep workers on-task.",
                    "Supported customer preferences with basic carpentry work such as installing wooden floors.",
                ],
            ),
            job(
                "exp3",
                "Construction Laborer",
                "MOJ Construction",
                "Manchester, NH",
                ("08/2009", "10/2012"),
                &["Efficiently prepared job sites by removing debris and setting up materials and tools."],
            ),
        ],
        education: vec![school(
            "edu1",
            "Seacoast School of Technology",
            "Associate of Applied Science: Building Construction Technology",
            "Construction Technology",
            ("2007", "2009"),
            "3.7",
        )],
        projects: vec![project(
            "proj1",
            "Site Safety Initiative",
            "Developed and implemented a site safety program that reduced injuries by 80% over two years.",
            "https://danielburke.com/projects/safety",
        )],
        skills: rated_skills(
            "sk",
            &[
                ("Team-oriented and dependable", 5),
                ("Preventive and reparative maintenance", 4),
                ("Safety and compliance", 5),
                ("Hazardous chemical handling", 3),
                ("Measurement and calculation accuracy", 4),
                ("Debris removal", 4),
                ("Hand and power tool operation", 5),
                ("Blueprints and schematics", 4),
            ],
        ),
        certifications: vec![
            cert(
                "cert1",
                "OSHA 30-Hour Construction Safety",
                "Completed OSHA 30-hour safety training for construction.",
                "https://osha.gov/cert/12345",
            ),
            cert("cert2", "First Aid/CPR", "Certified in First Aid and CPR.", ""),
        ],
        extracurriculars: vec![activity(
            "extra1",
            "Habitat for Humanity",
            "Volunteer Team Lead",
            ("2015", "2018"),
            "Led volunteer teams in building affordable housing for local families.",
        )],
        languages: languages(&[
            ("English", LanguageLevel::Native),
            ("Spanish", LanguageLevel::Professional),
        ]),
    }
}

fn blue_banner_construction() -> ResumeDocument {
    ResumeDocument {
        personal_info: person(
            "ETHAN HANSON",
            "example@example.com",
            "(555) 555-5555",
            "Chesterfield, MO",
            [
                "https://linkedin.com/in/ethanhanson",
                "https://github.com/ethanhanson",
                "https://ethanhanson.com",
            ],
        ),
        professional_summary: opt("Hardworking Construction Foreman bringing over 20 years of progressive experience in the field. Quality-focused and diligent with excellent communication skills."),
        experience: vec![
            job(
                "exp1",
                "Construction Foreman",
                "Aegion Corp.",
                "Chesterfield, MO",
                ("03/2011", "Current"),
                &[
                    "Analyzed blueprints and specifications for over 200 projects to size construction crews.",
                    "Initiated onsite safety program and trained all team members, decreasing injuries by 80%.",
                ],
            ),
            job(
                "exp2",
                "Construction Site Manager",
                "E&K Companies Inc.",
                "Elmhurst, IL",
                ("08/2005", "12/2010"),
                &[
                    "Improved process efficiency and workflow by implementing productivity initiatives.",
                    "Monitored, coached and supervised over 100 employees in 5 years.",
                ],
            ),
            job(
                "exp3",
                "Journeyman",
                "CCSI Inc.",
                "Lansing, IL",
                ("09/1999", "07/2005"),
                &["Constructed over 1500 custom built designs according to specifications."],
            ),
        ],
        education: vec![school(
            "edu1",
            "Southwestern Illinois College",
            "Associate of Applied Science: Construction Carpentry",
            "Construction Carpentry",
            ("1997", "1999"),
            "3.8",
        )],
        projects: vec![project(
            "proj1",
            "Lean Construction Project",
            "Implemented lean construction principles to reduce waste and improve efficiency on major projects.",
            "https://ethanhanson.com/projects/lean",
        )],
        skills: rated_skills(
            "sk",
            &[
                ("Site monitoring", 5),
                ("Quality controls", 4),
                ("Workload planning", 5),
                ("Reviewing timesheets", 4),
                ("OSHA trained", 5),
                ("Valid MO & IL license", 5),
                ("Project estimation and bidding", 4),
                ("Blueprints and schematics", 5),
            ],
        ),
        certifications: vec![
            cert(
                "cert1",
                "Certified Construction Manager (CCM)",
                "Credential for construction management professionals.",
                "https://cmaanet.org/ccm",
            ),
            cert(
                "cert2",
                "OSHA 30-Hour Construction Safety",
                "Completed OSHA 30-hour safety training for construction.",
                "https://osha.gov/cert/67890",
            ),
        ],
        extracurriculars: vec![activity(
            "extra1",
            "Local Builders Association",
            "Member",
            ("2010", "2015"),
            "Participated in annual construction safety workshops and community outreach.",
        )],
        languages: languages(&[
            ("English", LanguageLevel::Native),
            ("French", LanguageLevel::Intermediate),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::models::resume::Section;

    #[test]
    fn test_seed_entry_ids_unique_per_section() {
        for id in TemplateId::ALL {
            let doc = seed(id);
            for section in Section::ALL {
                let ids = doc.entry_ids(section);
                let unique: HashSet<_> = ids.iter().collect();
                assert_eq!(ids.len(), unique.len(), "{id} {}", section.as_str());
            }
        }
    }

    #[test]
    fn test_rated_seeds_carry_skill_levels() {
        let doc = seed(TemplateId::RedlineChrono);
        assert!(doc.skills.iter().all(|s| s.level.is_some()));
        let doc = seed(TemplateId::Classic);
        assert!(doc.skills.iter().all(|s| s.level.is_none()));
    }
}
