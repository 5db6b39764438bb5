//! Text primitives shared by the analyzers: tokenizer, word/sentence splitting
//! and the contrast-clause splitter.
//!
//! "Word characters" are ASCII `[A-Za-z0-9_]` throughout, so every helper agrees
//! on where a word starts and ends.

#[inline]
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Lower-case tokens; hyphens and apostrophes stay inside a token
/// (`"don't"`, `"well-made"`), everything else separates tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| {
            if is_word_char(c) || c == '-' || c == '\'' {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned.split_whitespace().map(str::to_owned).collect()
}

/// Maximal runs of word characters, original casing preserved.
pub fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| !is_word_char(c))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Segments between `.`, `!` and `?`; blank segments are dropped.
pub fn sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// Clause carrying the dominant sentiment.
///
/// Finds the earliest ` marker ` (space-delimited, case-insensitive) and returns the
/// trimmed remainder after it. A remainder shorter than 3 characters, or no marker
/// at all, yields the full text.
pub fn contrast_clause<'a>(text: &'a str, markers: &[String]) -> &'a str {
    // ASCII lowering keeps byte offsets aligned with `text`.
    let lower = text.to_ascii_lowercase();

    let earliest = markers
        .iter()
        .filter_map(|m| {
            lower
                .find(&format!(" {} ", m))
                .map(|idx| (idx, idx + m.len() + 2))
        })
        .min_by_key(|&(idx, _)| idx);

    match earliest {
        Some((_, after)) => {
            let clause = text[after..].trim();
            if clause.chars().count() < 3 {
                text
            } else {
                clause
            }
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> Vec<String> {
        ["but", "however", "although", "though", "yet"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn tokenizer_basic() {
        let toks = tokenize("I don't LIKE it... well-made, though!");
        assert_eq!(toks, vec!["i", "don't", "like", "it", "well-made", "though"]);
    }

    #[test]
    fn tokenizer_drops_non_ascii_and_empty() {
        assert!(tokenize("   ").is_empty());
        assert_eq!(tokenize("café 😊 ok"), vec!["caf", "ok"]);
    }

    #[test]
    fn words_ignore_apostrophes() {
        assert_eq!(words("It's 2 PM!"), vec!["It", "s", "2", "PM"]);
    }

    #[test]
    fn sentences_skip_blank_segments() {
        let s = sentences("Hi!! How are you?  ...Fine.");
        assert_eq!(s.len(), 3);
        assert!(sentences("?!...").is_empty());
    }

    #[test]
    fn contrast_picks_earliest_marker() {
        let text = "Nice start, yet the end was bad but acceptable";
        assert_eq!(contrast_clause(text, &markers()), "the end was bad but acceptable");
    }

    #[test]
    fn contrast_is_case_insensitive() {
        let text = "Lovely views HOWEVER the food was cold";
        assert_eq!(contrast_clause(text, &markers()), "the food was cold");
    }

    #[test]
    fn contrast_falls_back_on_short_clause() {
        let text = "I tried but no";
        assert_eq!(contrast_clause(text, &markers()), text);
    }

    #[test]
    fn contrast_requires_space_delimited_marker() {
        let text = "The butter was fine";
        assert_eq!(contrast_clause(text, &markers()), text);
    }
}
