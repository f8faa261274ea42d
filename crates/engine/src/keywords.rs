use std::collections::HashSet;

pub const DEFAULT_MAX_KEYWORDS: usize = 10;

/// English stop words dropped by the statistical pass. Entries of two
/// characters or fewer are omitted; the length filter already removes them.
pub const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "all", "also", "and", "another", "any", "are",
    "because", "been", "before", "being", "below", "between", "both", "but", "came", "can",
    "cannot", "come", "could", "did", "does", "doing", "during", "each", "few", "for", "from",
    "further", "get", "got", "has", "had", "have", "her", "here", "him", "himself", "his",
    "how", "into", "its", "itself", "like", "make", "many", "might", "more", "most", "much",
    "must", "myself", "never", "now", "only", "other", "our", "ours", "ourselves", "out",
    "over", "own", "said", "same", "see", "should", "since", "some", "still", "such", "take",
    "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there", "these",
    "they", "this", "those", "through", "too", "under", "until", "very", "was", "way", "well",
    "were", "what", "where", "when", "which", "while", "who", "whom", "with", "would", "why",
    "you", "your", "yours", "yourself",
];

/// Splits text into word tokens on anything that is not alphanumeric or `_`.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Lower-cased tokens longer than two characters that are not stop words
pub fn statistical_keywords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    tokenize(&lowered)
        .into_iter()
        .filter(|t| t.chars().count() > 2 && !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Turns a free-form model reply into keyword candidates.
///
/// Replies come back as plain lines, bulleted lists or numbered lists, often
/// with markdown emphasis; each line becomes one candidate with the list
/// marker and emphasis removed. Header lines such as `Keywords:` are dropped.
pub fn parse_suggestions(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(clean_suggestion)
        .filter(|line| !line.is_empty() && !line.ends_with(':'))
        .map(str::to_string)
        .collect()
}

fn clean_suggestion(line: &str) -> &str {
    strip_list_marker(line.trim())
        .trim_matches(|c: char| c == '*' || c == '_')
        .trim()
}

fn strip_list_marker(line: &str) -> &str {
    let unbulleted = line.trim_start_matches(|c: char| matches!(c, '-' | '•' | '+'));
    if unbulleted.len() != line.len() {
        return unbulleted.trim_start();
    }
    if let Some(rest) = line.strip_prefix("* ") {
        return rest;
    }

    // "1. foo", "12)foo"; "3.5mm" is not a marker
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix(|c: char| c == '.' || c == ')') {
            if !rest.starts_with(|c: char| c.is_ascii_digit()) {
                return rest.trim_start();
            }
        }
    }
    line
}

/// Union of both sequences in first-seen order, deduplicated case-sensitively
/// and truncated to `max`.
pub fn merge_keywords(suggested: Vec<String>, statistical: Vec<String>, max: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    suggested
        .into_iter()
        .chain(statistical)
        .filter(|k| seen.insert(k.clone()))
        .take(max)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistical_pass_drops_short_tokens_and_stop_words() {
        let tokens = statistical_keywords("A calm morning in the forest, with birds!");
        assert_eq!(tokens, vec!["calm", "morning", "forest", "birds"]);
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert!(statistical_keywords("").is_empty());
        assert!(statistical_keywords("   \n ").is_empty());
    }

    #[test]
    fn suggestions_are_split_and_unbulleted() {
        let reply = "\n- Forest\n* morning light\n1. Calm\n2) birds\n\n   sunrise  \n";
        assert_eq!(
            parse_suggestions(reply),
            vec!["Forest", "morning light", "Calm", "birds", "sunrise"]
        );
    }

    #[test]
    fn common_filler_words_are_stop_words() {
        let tokens =
            statistical_keywords("make a video like this with many people who still come and get well");
        assert_eq!(tokens, vec!["video", "people"]);

        for word in [
            "another", "came", "come", "get", "got", "like", "make", "many", "might", "much",
            "must", "never", "said", "see", "since", "still", "take", "way", "well",
        ] {
            assert!(STOP_WORDS.contains(&word), "{} should be a stop word", word);
        }
    }

    #[test]
    fn markdown_replies_are_cleaned() {
        let reply = "**Keywords:**\n- **Forest**\n-Mist\n1.Calm\n2)birds\n*dawn*\n__River__\n---\n3.5mm lens";
        assert_eq!(
            parse_suggestions(reply),
            vec!["Forest", "Mist", "Calm", "birds", "dawn", "River", "3.5mm lens"]
        );
    }

    #[test]
    fn numbers_without_marker_are_kept() {
        assert_eq!(parse_suggestions("2024 olympics"), vec!["2024 olympics"]);
    }

    #[test]
    fn merge_is_ordered_case_sensitive_and_capped() {
        let merged = merge_keywords(
            vec!["Forest".into(), "calm".into(), "Forest".into()],
            vec!["forest".into(), "calm".into(), "morning".into()],
            10,
        );
        assert_eq!(merged, vec!["Forest", "calm", "forest", "morning"]);

        let capped = merge_keywords(
            (0..8).map(|i| format!("ai{}", i)).collect(),
            (0..8).map(|i| format!("tok{}", i)).collect(),
            DEFAULT_MAX_KEYWORDS,
        );
        assert_eq!(capped.len(), DEFAULT_MAX_KEYWORDS);
        assert_eq!(capped[7], "ai7");
        assert_eq!(capped[9], "tok1");
    }

    #[test]
    fn merge_never_exceeds_max_or_duplicates_for_varied_input() {
        let texts = [
            "the the the the",
            "Rust rust RUST rustacean crabs crabs crabs",
            "one two three four five six seven eight nine ten eleven twelve thirteen",
            "ümlaut café naïve café",
        ];
        for text in texts {
            for max in [0usize, 1, 3, 10] {
                let merged = merge_keywords(
                    parse_suggestions(text),
                    statistical_keywords(text),
                    max,
                );
                assert!(merged.len() <= max);
                let unique: HashSet<_> = merged.iter().collect();
                assert_eq!(unique.len(), merged.len());
            }
        }
    }
}
