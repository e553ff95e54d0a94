//! Token-savings estimation (spec §6, §OVERVIEW component 9). Out of scope beyond
//! comparing CON against the JSON it came from with a simple, dependency-free
//! estimator by default; callers who want vocabulary-accurate counts can supply
//! their own [`Tokenizer`].

/// A pluggable way to count "tokens" in text. `count_tokens` defaults to
/// [`DefaultTokenizer`] when none is supplied.
pub trait Tokenizer {
    fn count(&self, text: &str) -> usize;
}

/// Whitespace/punctuation-aware estimator: every run of alphanumerics counts as
/// one token; every other non-whitespace character counts as its own token.
/// Close enough to BPE-style tokenizers' behavior on structural punctuation to
/// be useful for an order-of-magnitude comparison, not a vocabulary-accurate count.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTokenizer;

impl Tokenizer for DefaultTokenizer {
    fn count(&self, text: &str) -> usize {
        let mut count = 0;
        let mut in_word = false;
        for c in text.chars() {
            if c.is_whitespace() {
                in_word = false;
                continue;
            }
            if c.is_alphanumeric() {
                if !in_word {
                    count += 1;
                    in_word = true;
                }
            } else {
                count += 1;
                in_word = false;
            }
        }
        count
    }
}

/// The token and character counts CON saves relative to the JSON it was
/// produced from. Savings can be negative (CON came out larger) for pathological
/// inputs; callers comparing formats should not assume a positive number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Savings {
    pub tokens: i64,
    pub tokens_percent: f64,
    pub chars: i64,
    pub chars_percent: f64,
}

/// Estimated token and character counts for a CON document and the JSON it was
/// produced from, plus the derived savings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenSavings {
    pub con_tokens: usize,
    pub json_tokens: usize,
    pub con_chars: usize,
    pub json_chars: usize,
    pub savings: Savings,
}

impl TokenSavings {
    /// Percentage of JSON's estimated token count that CON avoids. Kept for the
    /// teacher's original call sites; equivalent to `self.savings.tokens_percent`.
    pub fn percent_saved(&self) -> f64 {
        self.savings.tokens_percent
    }
}

/// Compare the estimated token and character cost of `con_text` against the JSON
/// it came from. `tokenizer` defaults to [`DefaultTokenizer`] when `None`.
pub fn count_tokens(con_text: &str, json_text: &str, tokenizer: Option<&dyn Tokenizer>) -> TokenSavings {
    let default = DefaultTokenizer;
    let tokenizer = tokenizer.unwrap_or(&default);

    let con_tokens = tokenizer.count(con_text);
    let json_tokens = tokenizer.count(json_text);
    let con_chars = con_text.chars().count();
    let json_chars = json_text.chars().count();

    let tokens_saved = json_tokens as i64 - con_tokens as i64;
    let chars_saved = json_chars as i64 - con_chars as i64;

    TokenSavings {
        con_tokens,
        json_tokens,
        con_chars,
        json_chars,
        savings: Savings {
            tokens: tokens_saved,
            tokens_percent: percent(json_tokens, tokens_saved),
            chars: chars_saved,
            chars_percent: percent(json_chars, chars_saved),
        },
    }
}

fn percent(base: usize, saved: i64) -> f64 {
    if base == 0 {
        0.0
    } else {
        (saved as f64 / base as f64) * 100.0
    }
}
