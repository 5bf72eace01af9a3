use anyhow::Context as _;

use crate::error::*;

/// Post metadata from the YAML block at the top of a markdown file.
#[derive(Debug, Eq, PartialEq, Default, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[serde(deny_unknown_fields)]
pub struct Frontmatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub draft: bool,
}

/// Split a source file into its parsed front matter and body.
pub fn parse_document(content: &str) -> Result<(Frontmatter, &str)> {
    let (front, body) = split_document(content);
    let front = match front {
        Some(front) => {
            serde_yaml::from_str(front).context("Failed to parse frontmatter")?
        }
        None => Frontmatter::default(),
    };
    Ok((front, body))
}

static FRONT_MATTER: once_cell::sync::Lazy<regex::Regex> = once_cell::sync::Lazy::new(|| {
    regex::RegexBuilder::new(r"\A---\s*\r?\n([\s\S]*?\n)?---\s*\r?\n(.*)")
        .dot_matches_new_line(true)
        .build()
        .unwrap()
});

fn split_document(content: &str) -> (Option<&str>, &str) {
    if let Some(captures) = FRONT_MATTER.captures(content) {
        let front_split = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        let content_split = captures.get(2).map(|m| m.as_str()).unwrap_or_default();

        if front_split.trim().is_empty() {
            (None, content_split)
        } else {
            (Some(front_split), content_split)
        }
    } else {
        (None, content)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn split_document_empty() {
        let (front, content) = split_document("");
        assert!(front.is_none());
        assert_eq!(content, "");
    }

    #[test]
    fn split_document_no_front_matter() {
        let (front, content) = split_document("Body");
        assert!(front.is_none());
        assert_eq!(content, "Body");
    }

    #[test]
    fn split_document_empty_front_matter() {
        let (front, content) = split_document("---\n---\nBody");
        assert!(front.is_none());
        assert_eq!(content, "Body");
    }

    #[test]
    fn split_document_empty_body() {
        let (front, content) = split_document("---\ntitle: Kickoff\n---\n");
        assert_eq!(front.unwrap(), "title: Kickoff\n");
        assert_eq!(content, "");
    }

    #[test]
    fn split_document_horizontal_rule_in_body() {
        let (front, content) = split_document("Intro\n\n---\n\nMore");
        assert!(front.is_none());
        assert_eq!(content, "Intro\n\n---\n\nMore");
    }

    #[test]
    fn split_document_front_matter_and_horizontal_rule() {
        let (front, content) = split_document("---\ntitle: Kickoff\n---\nIntro\n\n---\n\nMore\n");
        assert_eq!(front.unwrap(), "title: Kickoff\n");
        assert_eq!(content, "Intro\n\n---\n\nMore\n");
    }

    #[test]
    fn parse_document_fields() {
        let input = "---\ntitle: Season Kickoff\ndescription: What we are building\ndate: 2023-06-01\n---\n# Hello\n";
        let (front, body) = parse_document(input).unwrap();
        assert_eq!(front.title.as_deref(), Some("Season Kickoff"));
        assert_eq!(front.description.as_deref(), Some("What we are building"));
        assert_eq!(front.date.as_deref(), Some("2023-06-01"));
        assert!(!front.draft);
        assert_eq!(body, "# Hello\n");
    }

    #[test]
    fn parse_document_draft() {
        let (front, _) = parse_document("---\ndraft: true\n---\nBody").unwrap();
        assert!(front.draft);
    }

    #[test]
    fn parse_document_unknown_field() {
        assert!(parse_document("---\nauthor: Someone\n---\nBody").is_err());
    }
}
