//! Static content of the careers page.

use sportsculture_config::Careers;

/// An open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Job {
    pub title: &'static str,
    pub summary: &'static str,
    pub requirements: &'static [&'static str],
    pub tags: &'static [Tag],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Remote,
    FullTime,
    PartTime,
}

impl Tag {
    pub fn label(self) -> &'static str {
        match self {
            Self::Remote => "Remote",
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
        }
    }
}

/// A titled block of copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Perk {
    pub headline: &'static str,
    pub detail: &'static str,
}

pub const HEADING: &str = "Join Our Team";

pub const ABOUT_HEADING: &str = "About Sports Culture";

pub const PERKS_HEADING: &str = "Why Join Sports Culture?";

pub const INTRO: &str = "We\u{2019}re building technology that makes sports more engaging, accessible, and fun for everyone.";

pub const DESCRIPTION: &str = "Join our team building the future of sports technology. Open positions in software development, product design, and sports analytics.";

pub const ABOUT: [&str; 2] = [
    "At Sports Culture, we\u{2019}re passionate about creating technology that enhances the sports experience. From our SpinCulture fitness playlist builder to league management tools, we\u{2019}re building platforms that connect athletes, teams, and sports enthusiasts worldwide.",
    "As a growing startup, we offer the opportunity to make a real impact while working with cutting-edge technologies and AI-powered development workflows.",
];

pub const JOBS: [Job; 3] = [
    Job {
        title: "Full-Stack Developer",
        summary: "Build and scale our sports technology platforms using Next.js, React, Node.js, and modern development tools.",
        requirements: &[
            "Experience with React, Next.js, and TypeScript",
            "Backend development with Node.js and databases",
            "API integrations (Spotify, sports data providers)",
            "Cloud deployment and DevOps experience preferred",
        ],
        tags: &[Tag::Remote, Tag::FullTime],
    },
    Job {
        title: "Product Designer",
        summary: "Design intuitive user experiences for athletes and sports teams using our platforms.",
        requirements: &[
            "UI/UX design experience with modern web applications",
            "Proficiency in Figma, Sketch, or similar design tools",
            "Understanding of sports and fitness user journeys",
            "Experience with design systems and component libraries",
        ],
        tags: &[Tag::Remote, Tag::FullTime],
    },
    Job {
        title: "Sports Data Analyst",
        summary: "Work with sports data, analytics, and machine learning to enhance our platform features.",
        requirements: &[
            "Experience with data analysis and visualization",
            "Knowledge of sports statistics and metrics",
            "Python, R, or similar data science tools",
            "Interest in music/BPM analysis for fitness applications",
        ],
        tags: &[Tag::Remote, Tag::PartTime],
    },
];

pub const PERKS: [Perk; 6] = [
    Perk {
        headline: "Remote-first culture",
        detail: "Work from anywhere while building amazing products",
    },
    Perk {
        headline: "AI-powered development",
        detail: "Use cutting-edge tools like Claude Code to accelerate your work",
    },
    Perk {
        headline: "Sports passion",
        detail: "Combine your love of sports with technology",
    },
    Perk {
        headline: "Startup energy",
        detail: "Make a real impact in a growing company",
    },
    Perk {
        headline: "Competitive compensation",
        detail: "Equity participation and competitive salaries",
    },
    Perk {
        headline: "Learning opportunities",
        detail: "Work with modern tech stack and best practices",
    },
];

/// `mailto:` target of the "Apply Now" link.
pub fn apply_href(careers: &Careers) -> String {
    let mut href = format!("mailto:{}", careers.email.trim());
    let subject = careers.subject.trim();
    if !subject.is_empty() {
        href.push_str("?subject=");
        href.push_str(&encode_mailto_component(subject));
    }
    href
}

// RFC 6068 hfvalue: everything outside unreserved characters is escaped.
fn encode_mailto_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for b in value.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            encoded.push(char::from(b));
        } else {
            encoded.push_str(&format!("%{b:02X}"));
        }
    }
    encoded
}
