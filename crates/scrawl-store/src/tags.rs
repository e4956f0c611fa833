//! Tag extraction from note content.

/// Trailing punctuation stripped from tag candidates.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

/// Extract tags from note content.
///
/// A tag is any whitespace-delimited token starting with `#` followed by at
/// least one character. The marker is stripped, the rest lowercased, and
/// trailing punctuation removed; candidates that end up empty are dropped.
/// First-occurrence order is preserved and duplicates are kept, mirroring
/// the literal order of mentions in the text.
pub fn parse_tags(content: &str) -> Vec<String> {
    let mut tags = Vec::new();
    for word in content.split_whitespace() {
        let Some(candidate) = word.strip_prefix('#') else {
            continue;
        };
        if candidate.is_empty() {
            continue;
        }
        let tag = candidate
            .to_lowercase()
            .trim_end_matches(TRAILING_PUNCTUATION)
            .to_string();
        if !tag.is_empty() {
            tags.push(tag);
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_extraction() {
        assert_eq!(
            parse_tags("Fix bug #urgent #backend"),
            vec!["urgent", "backend"]
        );
    }

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(parse_tags("Ship it #URGENT!"), vec!["urgent"]);
        assert_eq!(parse_tags("See #notes."), vec!["notes"]);
        assert_eq!(parse_tags("Mixed #Case;:"), vec!["case"]);
    }

    #[test]
    fn test_bare_marker_and_punctuation_only() {
        assert!(parse_tags("just a # marker").is_empty());
        assert!(parse_tags("empty after strip #...").is_empty());
    }

    #[test]
    fn test_duplicates_and_order_preserved() {
        assert_eq!(
            parse_tags("#a thing #b then #a again"),
            vec!["a", "b", "a"]
        );
    }

    #[test]
    fn test_deterministic() {
        let content = "Plan sprint #planning #Q3, review #planning";
        assert_eq!(parse_tags(content), parse_tags(content));
    }

    #[test]
    fn test_no_tags() {
        assert!(parse_tags("nothing tagged here").is_empty());
        assert!(parse_tags("").is_empty());
    }
}
