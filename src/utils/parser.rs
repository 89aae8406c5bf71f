//! Core parsing primitives for text extraction.
//!
//! Takeoff parsing (cut lists, fitting lines) is built on these. Patterns are
//! compiled once by the caller and passed in as `&Regex`.

use regex::Regex;
use std::str::FromStr;

/// First match of the pattern's capture group, or the whole match when the
/// pattern has no group.
pub fn extract_first<'a>(content: &'a str, re: &Regex) -> Option<&'a str> {
    re.captures(content)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(0)))
        .map(|m| m.as_str())
}

/// All non-overlapping matches of the capture group, leftmost first.
pub fn extract_all<'a>(content: &'a str, re: &Regex) -> Vec<&'a str> {
    re.captures_iter(content)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(0)))
        .map(|m| m.as_str())
        .collect()
}

/// Parse the first match as a number.
pub fn first_number<T: FromStr>(content: &str, re: &Regex) -> Option<T> {
    extract_first(content, re).and_then(|s| s.parse().ok())
}

/// Parse every match as a number, dropping values that do not parse.
pub fn all_numbers<T: FromStr>(content: &str, re: &Regex) -> Vec<T> {
    extract_all(content, re)
        .into_iter()
        .filter_map(|s| s.parse().ok())
        .collect()
}

/// Parse output into non-empty lines.
pub fn lines(output: &str) -> impl Iterator<Item = &str> {
    output.lines().filter(|line| !line.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits() -> Regex {
        Regex::new(r"(\d{2,3})").unwrap()
    }

    #[test]
    fn extract_first_returns_leftmost_group() {
        assert_eq!(extract_first("DN 150 x 100", &digits()), Some("150"));
    }

    #[test]
    fn extract_first_falls_back_to_whole_match() {
        let re = Regex::new(r"\d+").unwrap();
        assert_eq!(extract_first("abc 42", &re), Some("42"));
    }

    #[test]
    fn extract_all_is_non_overlapping() {
        // "1000" yields "100" then a lone "0", which is too short to match.
        assert_eq!(extract_all("1000 and 25", &digits()), vec!["100", "25"]);
    }

    #[test]
    fn first_number_none_without_match() {
        assert_eq!(first_number::<u32>("no digits here", &digits()), None);
    }

    #[test]
    fn all_numbers_parses_each_match() {
        assert_eq!(all_numbers::<u32>("TEE 200x150", &digits()), vec![200, 150]);
    }

    #[test]
    fn lines_skips_blank_lines() {
        let collected: Vec<&str> = lines("a\n\n  \nb").collect();
        assert_eq!(collected, vec!["a", "b"]);
    }
}
