//! Locates an answer string among OCR tokens.
//!
//! Every non-blank token is tried as an anchor. Around each anchor a context
//! window of up to [`WINDOW_BEFORE`] preceding and [`WINDOW_FROM`] following
//! tokens (anchor included) is joined with single spaces and compared against
//! the answer with three strategies:
//!
//! | strategy       | condition                                              | score |
//! |----------------|--------------------------------------------------------|-------|
//! | exact word     | one-word answer equals a window word                   | 100   |
//! | exact phrase   | answer occurs in the window text on word boundaries    | 95    |
//! | word overlap   | ≥ 2 and ≥ 70% of the answer's long words in the window | ≤ 85  |
//!
//! A single best result is kept across all anchors and only replaced by a
//! strictly higher score, so an early strong hit is never displaced by a later
//! equal or weaker one.
use log::debug;
use quizsnap_ocr::OcrToken;
use regex::Regex;
use std::sync::OnceLock;

pub const WINDOW_BEFORE: usize = 2;
pub const WINDOW_FROM: usize = 10;

pub const EXACT_WORD_SCORE: f64 = 100.0;
pub const EXACT_PHRASE_SCORE: f64 = 95.0;
pub const OVERLAP_WEIGHT: f64 = 85.0;
/// Word overlap is not tried once the best score reaches this.
pub const STRONG_SCORE: f64 = 90.0;
pub const DEFAULT_ACCEPTANCE_SCORE: f64 = 40.0;

/// Words of this many characters or fewer don't count towards word overlap.
const SHORT_WORD_LEN: usize = 2;
const MIN_OVERLAP_WORDS: usize = 2;

static LEADING_MARKERS: OnceLock<Option<Regex>> = OnceLock::new();
static OPTION_PREFIX: OnceLock<Option<Regex>> = OnceLock::new();
static WHITESPACE: OnceLock<Option<Regex>> = OnceLock::new();

fn replace(cell: &'static OnceLock<Option<Regex>>, pattern: &str, text: &str, with: &str) -> String {
    match cell.get_or_init(|| Regex::new(pattern).ok()) {
        Some(re) => re.replace_all(text, with).into_owned(),
        None => text.to_string(),
    }
}

/// Strips rendering artifacts from an answer before it is searched for.
///
/// Removes a leading run of radio/bullet glyphs (`©`, `•`, `-`, `*`, and a
/// standalone `O`/`o` standing in for an empty radio button), a leading `(e)`
/// and collapses whitespace.
pub fn normalize_candidate(text: &str) -> String {
    let text = replace(&LEADING_MARKERS, r"^(?:[©•\-\*\s]|[Oo]\s)+", text, "");
    let text = replace(&OPTION_PREFIX, r"(?i)^\(e\)\s*", text.trim(), "");
    replace(&WHITESPACE, r"\s+", &text, " ").trim().to_string()
}

/// Which strategy produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    ExactWord,
    ExactPhrase,
    WordOverlap,
}

/// Winning token and its confidence in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult {
    pub token_index: usize,
    pub score: f64,
    pub strategy: MatchStrategy,
}

struct Word {
    /// Index into the caller's token slice.
    index: usize,
    lower: String,
}

fn offer(best: &mut Option<MatchResult>, token_index: usize, score: f64, strategy: MatchStrategy) {
    let current = best.map(|m| m.score).unwrap_or(0.0);
    if score > current {
        *best = Some(MatchResult {
            token_index,
            score,
            strategy,
        });
    }
}

/// Byte offset of the first occurrence of `needle` in `haystack` that does not
/// start or end inside a word, so "gen" is never found in "hydrogen".
fn phrase_start(haystack: &str, needle: &str) -> Option<usize> {
    let first = needle.chars().next()?;
    let last = needle.chars().next_back()?;
    let mut from = 0;
    while let Some(offset) = haystack[from..].find(needle) {
        let pos = from + offset;
        let before = haystack[..pos].chars().next_back();
        let after = haystack[pos + needle.len()..].chars().next();
        let cut_before = first.is_alphanumeric() && before.is_some_and(char::is_alphanumeric);
        let cut_after = last.is_alphanumeric() && after.is_some_and(char::is_alphanumeric);
        if !cut_before && !cut_after {
            return Some(pos);
        }
        from = pos + first.len_utf8();
    }
    None
}

/// Best-scoring position of `candidate` (already normalized) in `tokens`,
/// regardless of acceptance. Blank tokens are skipped but indices refer to
/// the full slice.
pub fn best_match(candidate: &str, tokens: &[OcrToken]) -> Option<MatchResult> {
    let needle = candidate.to_lowercase();
    let needle_words: Vec<&str> = needle.split_whitespace().collect();
    if needle_words.is_empty() {
        return None;
    }
    let important: Vec<&str> = needle_words
        .iter()
        .copied()
        .filter(|w| w.chars().count() > SHORT_WORD_LEN)
        .collect();

    let words: Vec<Word> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| !t.is_blank())
        .map(|(index, t)| Word {
            index,
            lower: t.text.trim().to_lowercase(),
        })
        .collect();

    let mut best: Option<MatchResult> = None;

    for anchor in 0..words.len() {
        let window = &words[anchor.saturating_sub(WINDOW_BEFORE)..(anchor + WINDOW_FROM).min(words.len())];
        let window_text = window
            .iter()
            .map(|w| w.lower.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        if needle_words.len() == 1 {
            if let Some(word) = window.iter().find(|w| w.lower == needle) {
                offer(&mut best, word.index, EXACT_WORD_SCORE, MatchStrategy::ExactWord);
            }
        }

        if let Some(pos) = phrase_start(&window_text, &needle) {
            let words_before = window_text[..pos].split_whitespace().count();
            let target = words_before.min(window.len() - 1);
            offer(&mut best, window[target].index, EXACT_PHRASE_SCORE, MatchStrategy::ExactPhrase);
        }

        if best.map(|m| m.score).unwrap_or(0.0) < STRONG_SCORE && !important.is_empty() {
            let matched = important.iter().filter(|w| window_text.contains(**w)).count();
            if matched >= MIN_OVERLAP_WORDS && matched * 10 >= important.len() * 7 {
                let score = matched as f64 / needle_words.len() as f64 * OVERLAP_WEIGHT;
                offer(&mut best, window[0].index, score, MatchStrategy::WordOverlap);
            }
        }
    }

    if let Some(m) = best {
        debug!(
            "best match for '{}': token {} score {:.1} via {:?}",
            candidate, m.token_index, m.score, m.strategy
        );
    }
    best
}

/// Accepted match for `candidate` (already normalized), or `None` when no
/// position scores strictly above `acceptance_score`.
pub fn find_match(candidate: &str, tokens: &[OcrToken], acceptance_score: f64) -> Option<MatchResult> {
    best_match(candidate, tokens).filter(|m| m.score > acceptance_score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizsnap_ocr::BoundingBox;

    fn line(words: &[&str]) -> Vec<OcrToken> {
        words
            .iter()
            .enumerate()
            .map(|(i, w)| OcrToken::new(*w, BoundingBox::new(100 + i as i32 * 80, 200, 70, 20)))
            .collect()
    }

    #[test]
    fn test_normalize_strips_markers() {
        assert_eq!(normalize_candidate("© Paris"), "Paris");
        assert_eq!(normalize_candidate("• - *  London"), "London");
        assert_eq!(normalize_candidate("O Rome"), "Rome");
        assert_eq!(normalize_candidate("o  o Rome"), "Rome");
        assert_eq!(normalize_candidate("(e) None of   the\tabove"), "None of the above");
        assert_eq!(normalize_candidate("(E)Both"), "Both");
    }

    #[test]
    fn test_normalize_keeps_words_starting_with_o() {
        assert_eq!(normalize_candidate("Oxygen"), "Oxygen");
        assert_eq!(normalize_candidate("only once"), "only once");
    }

    #[test]
    fn test_exact_word_scores_100() {
        let tokens = line(&["The", "mitochondria", "produces", "energy", "Nucleus", "stores", "DNA"]);
        let m = find_match("mitochondria", &tokens, DEFAULT_ACCEPTANCE_SCORE).unwrap();
        assert_eq!(m.token_index, 1);
        assert_eq!(m.score, 100.0);
        assert_eq!(m.strategy, MatchStrategy::ExactWord);
    }

    #[test]
    fn test_exact_word_is_case_insensitive_and_beats_substring() {
        let tokens = line(&["Parisian", "cafes", "near", "PARIS"]);
        let m = best_match("paris", &tokens).unwrap();
        assert_eq!(m.token_index, 3);
        assert_eq!(m.score, 100.0);
    }

    #[test]
    fn test_phrase_resolves_to_first_word() {
        let tokens = line(&["Question", "3", "Which", "organelle", "the", "cell", "wall", "the", "cell", "membrane"]);
        let m = best_match("cell membrane", &tokens).unwrap();
        assert_eq!(m.score, 95.0);
        assert_eq!(m.strategy, MatchStrategy::ExactPhrase);
        assert_eq!(tokens[m.token_index].text, "cell");
        assert_eq!(m.token_index, 8);
    }

    #[test]
    fn test_phrase_must_not_start_mid_word() {
        let tokens = line(&["Oxygen", "Hydrogen"]);
        assert!(best_match("gen", &tokens).is_none());
        assert!(best_match("oxy", &tokens).is_none());
    }

    #[test]
    fn test_phrase_skips_embedded_occurrence() {
        let tokens = line(&["decarbon", "dioxide", "Carbon", "dioxide"]);
        let m = best_match("carbon dioxide", &tokens).unwrap();
        assert_eq!(m.strategy, MatchStrategy::ExactPhrase);
        assert_eq!(m.token_index, 2);

        let tokens = line(&["Name", "the", "capitals?"]);
        let m = best_match("capitals", &tokens).unwrap();
        assert_eq!(m.strategy, MatchStrategy::ExactPhrase);
        assert_eq!(m.token_index, 2);
    }

    #[test]
    fn test_phrase_offset_skips_blank_tokens() {
        let tokens = line(&["A", "", "   ", "Golgi", "apparatus"]);
        let m = best_match("golgi apparatus", &tokens).unwrap();
        assert_eq!(m.token_index, 3);
    }

    #[test]
    fn test_word_overlap_scores_against_all_words() {
        // "of" is too short to count but still dilutes the score.
        let tokens = line(&["The", "powerhouse", "cell", "x", "energy"]);
        let m = best_match("powerhouse of energy", &tokens).unwrap();
        assert_eq!(m.strategy, MatchStrategy::WordOverlap);
        assert!((m.score - 2.0 / 3.0 * 85.0).abs() < 1e-9);
        assert_eq!(m.token_index, 0);
    }

    #[test]
    fn test_word_overlap_needs_seventy_percent() {
        // 2 of 3 long words is below the threshold.
        let tokens = line(&["plants", "absorb", "light"]);
        assert!(best_match("plants absorb water", &tokens).is_none());
    }

    #[test]
    fn test_word_overlap_needs_two_words() {
        let tokens = line(&["photosynthesis", "happens"]);
        assert!(best_match("photosynthesis", &line(&["photo"])).is_none());
        assert!(best_match("photosynthesis of", &tokens).is_none());
    }

    #[test]
    fn test_low_overlap_is_rejected() {
        // 2 of 2 long words, diluted by five short ones: 2/7 * 85 < 40.
        let tokens = line(&["red", "blue"]);
        let candidate = "a red or a blue to be";
        let raw = best_match(candidate, &tokens).unwrap();
        assert!(raw.score < DEFAULT_ACCEPTANCE_SCORE);
        assert!(find_match(candidate, &tokens, DEFAULT_ACCEPTANCE_SCORE).is_none());
    }

    #[test]
    fn test_window_reaches_ten_tokens_forward() {
        let mut words = vec!["filler"; 12];
        words.push("cell");
        words.push("membrane");
        let tokens = line(&words);
        let m = best_match("cell membrane", &tokens).unwrap();
        assert_eq!(m.token_index, 12);
    }

    #[test]
    fn test_matching_is_repeatable() {
        let tokens = line(&["Which", "gas", "do", "plants", "release", "Oxygen", "Carbon", "dioxide"]);
        let first = best_match("carbon dioxide", &tokens);
        let second = best_match("carbon dioxide", &tokens);
        assert_eq!(first, second);
        assert_eq!(first.unwrap().token_index, 6);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(best_match("", &line(&["a"])).is_none());
        assert!(best_match("anything", &[]).is_none());
    }
}
