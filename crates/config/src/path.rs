use itertools::Itertools;

static SLUG_INVALID_CHARS: once_cell::sync::Lazy<regex::Regex> =
    once_cell::sync::Lazy::new(|| regex::Regex::new(r"([^a-zA-Z0-9]+)").unwrap());

/// Create a URL segment for a post from its file stem.
pub fn slugify<S: AsRef<str>>(name: S) -> String {
    slugify_str(name.as_ref())
}

fn slugify_str(name: &str) -> String {
    let name = deunicode::deunicode_with_tofu(name, "-");
    let slug = SLUG_INVALID_CHARS.replace_all(&name, "-");
    slug.trim_matches('-').to_lowercase()
}

/// Format a user-visible title out of a slug.
pub fn titleize_slug<S: AsRef<str>>(slug: S) -> String {
    titleize_slug_str(slug.as_ref())
}

fn titleize_slug_str(slug: &str) -> String {
    slug.split('-').map(title_case).join(" ")
}

/// Title-case a single word
fn title_case(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f
            .to_uppercase()
            .chain(c.flat_map(|t| t.to_lowercase()))
            .collect(),
    }
}


pub fn split_ext(name: &str) -> (&str, Option<&str>) {
    name.rsplit_once('.')
        .map(|(n, e)| (n, Some(e)))
        .unwrap_or_else(|| (name, None))
}

static DATE_PREFIX_REF: once_cell::sync::Lazy<regex::Regex> = once_cell::sync::Lazy::new(|| {
    regex::Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})[- ](.*)$").unwrap()
});

/// Split a `2023-06-01-kickoff` style stem into its `YYYY-MM-DD` date and the remainder.
pub fn parse_file_stem(stem: &str) -> (Option<String>, String) {
    let parts = DATE_PREFIX_REF.captures(stem).and_then(|caps| {
        let year: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        Some((
            Some(format!("{year:04}-{month:02}-{day:02}")),
            caps[4].to_owned(),
        ))
    });

    parts.unwrap_or_else(|| (None, stem.to_owned()))
}


#[cfg(test)]
mod test_split_ext {
    use super::*;

    #[test]
    fn split_ext_empty() {
        assert_eq!(split_ext(""), ("", None));
    }

    #[test]
    fn split_ext_none() {
        assert_eq!(split_ext("kickoff"), ("kickoff", None));
    }

    #[test]
    fn split_ext_extension() {
        assert_eq!(split_ext("kickoff.md"), ("kickoff", Some("md")));
    }

    #[test]
    fn split_ext_double_extension() {
        assert_eq!(split_ext("kickoff.draft.md"), ("kickoff.draft", Some("md")));
    }
}
