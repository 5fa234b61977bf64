//! Mixed-script tokenizer for BM25 scoring units.
//!
//! CJK runs have no word boundaries, so the scanner over-generates: every
//! phrase-so-far of length ≥ 2 is emitted, plus trailing single characters,
//! so both short and long CJK substrings stay matchable without a
//! morphological segmenter. Known quirk: this skews term frequencies for
//! long CJK runs, but existing ranking quality depends on it.

/// True for Hiragana, Katakana, and the unified Han range.
fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}' | '\u{4E00}'..='\u{9FAF}')
}

/// Split text into scoring units.
///
/// Lowercases the input, then scans once: ASCII alphanumeric runs become a
/// single token each; CJK runs emit the accumulating phrase at every step
/// (plus the last character once the phrase is longer than two); everything
/// else separates and resets. Single-character alphanumeric tokens are
/// dropped as stop tokens; single CJK characters are kept.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.to_lowercase();
    let mut tokens: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut phrase = String::new();

    for c in normalized.chars() {
        if is_cjk(c) {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            phrase.push(c);
            let phrase_len = phrase.chars().count();
            if phrase_len >= 2 {
                tokens.push(phrase.clone());
                if phrase_len > 2 {
                    tokens.push(c.to_string());
                }
            } else {
                tokens.push(c.to_string());
            }
        } else if c.is_ascii_alphanumeric() {
            phrase.clear();
            current.push(c);
        } else {
            phrase.clear();
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    // Single-character alphanumerics are the stop-token class.
    tokens.retain(|t| {
        let mut chars = t.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => !c.is_ascii_alphanumeric(),
            _ => true,
        }
    });
    tokens
}
