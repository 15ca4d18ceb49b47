//! Small text transforms shared by the styles.

/// Splits free text on newlines into bullet items, dropping blank lines.
pub fn description_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// `start{sep}end`, or whichever side is present.
pub fn date_range(start: Option<&str>, end: Option<&str>, sep: &str) -> Option<String> {
    let start = start.map(str::trim).filter(|s| !s.is_empty());
    let end = end.map(str::trim).filter(|s| !s.is_empty());
    match (start, end) {
        (Some(s), Some(e)) => Some(format!("{s}{sep}{e}")),
        (Some(s), None) => Some(s.to_string()),
        (None, Some(e)) => Some(e.to_string()),
        (None, None) => None,
    }
}

/// Non-empty parts joined with `sep`.
pub fn join_present(parts: &[Option<&str>], sep: &str) -> Option<String> {
    let parts: Vec<&str> = parts
        .iter()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join(sep))
}

/// Splits a name into its first word and the rest, for two-tone headers.
pub fn split_name(name: &str) -> (&str, &str) {
    let name = name.trim();
    match name.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim_start()),
        None => (name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_lines_drops_blanks() {
        let lines = description_lines("Built things.\n\n  \nShipped things.\n");
        assert_eq!(lines, vec!["Built things.", "Shipped things."]);
    }

    #[test]
    fn test_description_lines_empty() {
        assert!(description_lines("").is_empty());
    }

    #[test]
    fn test_date_range_variants() {
        assert_eq!(date_range(Some("2020"), Some("2022"), " - ").as_deref(), Some("2020 - 2022"));
        assert_eq!(date_range(Some("2020"), None, " - ").as_deref(), Some("2020"));
        assert_eq!(date_range(Some(" "), Some("Now"), " to ").as_deref(), Some("Now"));
        assert_eq!(date_range(None, None, " - "), None);
    }

    #[test]
    fn test_join_present_skips_missing() {
        assert_eq!(
            join_present(&[Some("Acme"), None, Some(""), Some("NY")], ", ").as_deref(),
            Some("Acme, NY")
        );
        assert_eq!(join_present(&[None, Some(" ")], ", "), None);
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("Daniel  Burke"), ("Daniel", "Burke"));
        assert_eq!(split_name("Cher"), ("Cher", ""));
        assert_eq!(split_name("Mary Ann Smith"), ("Mary", "Ann Smith"));
    }
}
