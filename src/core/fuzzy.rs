//! Prefix and typo-tolerant matching over candidate lists.
//!
//! Patterns are case-insensitive per ASCII letter and treat `*` as "any
//! characters". Fuzzy matching requires an exact first character and allows
//! a bounded edit distance over the rest of the typed prefix.

use regex::Regex;

/// Regex source matching `pattern` with every ASCII letter in either case
/// and `*` as a wildcard.
pub fn case_insensitive_pattern(pattern: &str) -> String {
    let escaped = regex::escape(pattern).replace("\\*", ".*");
    let mut result = String::with_capacity(escaped.len() * 2);
    for c in escaped.chars() {
        if c.is_ascii_alphabetic() {
            result.push('[');
            result.push(c.to_ascii_lowercase());
            result.push(c.to_ascii_uppercase());
            result.push(']');
        } else {
            result.push(c);
        }
    }
    result
}

/// Compiled [`case_insensitive_pattern`], optionally anchored at the start.
pub fn case_insensitive_regex(pattern: &str, anchored: bool) -> Option<Regex> {
    let source = case_insensitive_pattern(pattern);
    let source = if anchored {
        format!("^{}", source)
    } else {
        source
    };
    Regex::new(&source).ok()
}

/// Candidates starting with `input` (case-insensitive, `*` wildcard).
pub fn prefix_match<S: AsRef<str>>(candidates: &[S], input: &str) -> Vec<String> {
    let Some(regex) = case_insensitive_regex(input, true) else {
        return Vec::new();
    };
    candidates
        .iter()
        .map(AsRef::as_ref)
        .filter(|candidate| regex.is_match(candidate))
        .map(str::to_string)
        .collect()
}

/// Candidates whose first `len(input)` characters are within `max_distance`
/// edits of `input`, sharing its exact first character.
///
/// Closer matches come first; equal distances keep candidate order.
pub fn fuzzy_match<S: AsRef<str>>(candidates: &[S], input: &str, max_distance: usize) -> Vec<String> {
    let first = input.chars().next();
    let width = input.chars().count();

    let mut matches: Vec<(usize, &str)> = candidates
        .iter()
        .map(AsRef::as_ref)
        .filter(|candidate| candidate.chars().next() == first)
        .filter_map(|candidate| {
            let head: String = candidate.chars().take(width).collect();
            let distance = edit_distance(input, &head);
            (distance <= max_distance).then_some((distance, candidate))
        })
        .collect();

    matches.sort_by_key(|(distance, _)| *distance);
    matches.into_iter().map(|(_, candidate)| candidate.to_string()).collect()
}

/// Exact prefix match for `max_distance == 0`, fuzzy match otherwise.
pub fn match_candidates<S: AsRef<str>>(candidates: &[S], input: &str, max_distance: usize) -> Vec<String> {
    if max_distance == 0 {
        prefix_match(candidates, input)
    } else {
        fuzzy_match(candidates, input, max_distance)
    }
}

/// Levenshtein distance where substituting a character by itself in another
/// case costs nothing.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = if same_letter(*ca, *cb) { 0 } else { 1 };
            curr[j + 1] = (curr[j] + 1)
                .min(prev[j + 1] + 1)
                .min(prev[j] + substitution);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

fn same_letter(a: char, b: char) -> bool {
    a == b || a.to_uppercase().eq(b.to_uppercase())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern() {
        assert_eq!(case_insensitive_pattern("ab"), "[aA][bB]");
        assert_eq!(case_insensitive_pattern("A*1"), "[aA].*1");
        assert_eq!(case_insensitive_pattern("a.b"), "[aA]\\.[bB]");
    }

    #[test]
    fn test_prefix_match() {
        let candidates = ["gimp", "Gedit", "git", "vim"];
        assert_eq!(prefix_match(&candidates, "gi"), vec!["gimp", "git"]);
        assert_eq!(prefix_match(&candidates, "GE"), vec!["Gedit"]);
        assert_eq!(prefix_match(&candidates, "g*t"), vec!["Gedit", "git"]);
        assert_eq!(prefix_match(&candidates, "(x"), Vec::<String>::new());
        assert_eq!(prefix_match(&candidates, "").len(), 4);
    }

    #[test]
    fn test_fuzzy_match() {
        let candidates = ["gimp", "gedit", "vim"];
        assert_eq!(fuzzy_match(&candidates, "gu", 2), vec!["gimp", "gedit"]);
        assert_eq!(fuzzy_match(&candidates, "gimq", 1), vec!["gimp"]);
        // First character must match exactly.
        assert!(fuzzy_match(&candidates, "xim", 4).is_empty());
        assert!(fuzzy_match(&candidates, "Gimp", 4).is_empty());
    }

    #[test]
    fn test_fuzzy_orders_by_distance() {
        let candidates = ["gxxx", "gimx", "gimp"];
        assert_eq!(fuzzy_match(&candidates, "gimp", 4), vec!["gimp", "gimx", "gxxx"]);
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("firefox", "firefox"), 0);
        assert_eq!(edit_distance("ABC", "abc"), 0);
        assert_eq!(edit_distance("abc", "ABC"), 0);
        assert_eq!(edit_distance("cat", "bat"), 1);
        assert_eq!(edit_distance("gu", "gi"), 1);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("", "ab"), 2);
    }

    #[test]
    fn test_match_candidates_dispatch() {
        let candidates = ["gimp"];
        assert!(match_candidates(&candidates, "gu", 0).is_empty());
        assert_eq!(match_candidates(&candidates, "gu", 2), vec!["gimp"]);
    }
}
