//! Table-driven tokenizer that rewrites a glob into regex source.
//!
//! Each rule is a `(states, token, emit, next)` tuple. Rules are tried in
//! declaration order and the first one that is declared for the current state
//! and matches at the head of the remaining input wins.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::GlobError;

/// Regex fragment for a recursive `**` segment run.
pub const RECURSIVE_SEGMENTS: &str = "(?:[^/]+(?:/|$))*";

/// Regex fragment for `*` outside a character class.
pub const ANY_RUN: &str = "[^/]*";

/// Regex fragment for `?`.
pub const ANY_CHAR: &str = "[^/]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerState {
    Start,
    Escape,
    CharacterClass,
    CharacterClassEscape,
    CharacterClassEnd,
}

impl TokenizerState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Escape => "escape",
            Self::CharacterClass => "character_class",
            Self::CharacterClassEscape => "character_class_escape",
            Self::CharacterClassEnd => "character_class_end",
        }
    }

    /// Whether the input may end while the tokenizer is in this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Start | Self::CharacterClassEnd)
    }
}

impl fmt::Display for TokenizerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct TokenizerRule {
    pub states: &'static [TokenizerState],
    pub token: Regex,
    pub next: TokenizerState,
    pub emit: fn(&str) -> String,
}

impl TokenizerRule {
    fn new(
        states: &'static [TokenizerState],
        token: &str,
        next: TokenizerState,
        emit: fn(&str) -> String,
    ) -> Self {
        Self {
            states,
            // SAFETY: every token pattern is a string literal from `RULES` below
            token: Regex::new(token).expect("valid tokenizer rule"),
            next,
            emit,
        }
    }

    fn applies_to(&self, state: TokenizerState) -> bool {
        self.states.contains(&state)
    }

    /// Length of the token this rule consumes from the head of `input`, if any.
    fn consume(&self, input: &str) -> Option<usize> {
        self.token.find(input).map(|m| m.end())
    }
}

use TokenizerState::{
    CharacterClass, CharacterClassEnd, CharacterClassEscape, Escape, Start,
};

const OUTSIDE_CLASS: &[TokenizerState] = &[Start, CharacterClassEnd];

pub static RULES: LazyLock<Vec<TokenizerRule>> = LazyLock::new(|| {
    vec![
        // `[a-z]*` repeats the class instead of starting a new wildcard
        TokenizerRule::new(&[CharacterClassEnd], r"^\*", Start, |_| "*".to_string()),
        TokenizerRule::new(OUTSIDE_CLASS, r"^\\", Escape, |_| String::new()),
        TokenizerRule::new(&[Escape], r"(?s)^.", Start, regex::escape),
        TokenizerRule::new(&[Start], r"^\*\*(?:/|$)", Start, |_| {
            RECURSIVE_SEGMENTS.to_string()
        }),
        TokenizerRule::new(&[Start], r"^\*", Start, |_| ANY_RUN.to_string()),
        TokenizerRule::new(OUTSIDE_CLASS, r"^\?", Start, |_| ANY_CHAR.to_string()),
        TokenizerRule::new(OUTSIDE_CLASS, r"^\[!", CharacterClass, |_| {
            "[^".to_string()
        }),
        TokenizerRule::new(OUTSIDE_CLASS, r"^\[\^", CharacterClass, |_| {
            "[^".to_string()
        }),
        TokenizerRule::new(OUTSIDE_CLASS, r"^\[", CharacterClass, |_| "[".to_string()),
        TokenizerRule::new(&[CharacterClass], r"^\\", CharacterClassEscape, |_| {
            String::new()
        }),
        TokenizerRule::new(
            &[CharacterClassEscape],
            r"(?s)^.",
            CharacterClass,
            escape_class_member,
        ),
        TokenizerRule::new(&[CharacterClass], r"^\]", CharacterClassEnd, |_| {
            "]".to_string()
        }),
        TokenizerRule::new(&[CharacterClass], r"^\[:[a-z]+:\]", CharacterClass, |t| {
            t.to_string()
        }),
        TokenizerRule::new(&[CharacterClass], r"(?s)^.", CharacterClass, class_member),
        TokenizerRule::new(OUTSIDE_CLASS, r"^[^/*?\[\\]+", Start, regex::escape),
        TokenizerRule::new(OUTSIDE_CLASS, r"^/", Start, |_| "/".to_string()),
    ]
});

/// A character written inside a class. `-` keeps its range meaning, other
/// ASCII punctuation is escaped so the regex engine's own class syntax
/// (`&&`, `~~`, nested `[`) never applies. Named `[:name:]` classes are
/// consumed by their own rule before reaching this.
fn class_member(token: &str) -> String {
    if token == "-" {
        return token.to_string();
    }
    escape_class_member(token)
}

/// An escaped character inside a class always stands for itself.
/// `<` and `>` are word-boundary escapes in `regex`, so they stay bare.
fn escape_class_member(token: &str) -> String {
    if token
        .chars()
        .all(|c| c.is_ascii_punctuation() && c != '<' && c != '>')
    {
        format!("\\{token}")
    } else {
        token.to_string()
    }
}

/// Rewrite a glob into unanchored regex source.
///
/// # Errors
/// Returns [`GlobError::Syntax`] when no rule matches the remaining input or
/// when the input ends inside an escape or an unterminated character class.
pub fn tokenize(glob: &str) -> Result<String, GlobError> {
    let mut output = String::new();
    let mut state = Start;
    let mut remaining = glob;

    while !remaining.is_empty() {
        let Some((rule, len)) = RULES
            .iter()
            .filter(|rule| rule.applies_to(state))
            .find_map(|rule| rule.consume(remaining).map(|len| (rule, len)))
        else {
            return Err(GlobError::Syntax {
                remaining: remaining.to_string(),
                state,
            });
        };

        output.push_str(&(rule.emit)(&remaining[..len]));
        state = rule.next;
        remaining = &remaining[len..];
    }

    if !state.is_terminal() {
        return Err(GlobError::Syntax {
            remaining: String::new(),
            state,
        });
    }

    Ok(output)
}

#[cfg(test)]
#[path = "tokenizer_tests.rs"]
mod tests;
