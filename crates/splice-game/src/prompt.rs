//! Prompts and where they come from.

use std::fmt;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::roles::rng_from_seed;
use crate::scorer;

/// The secret a round revolves around: one phrase, or several phrasings
/// that all count as correct.
///
/// Untagged on the wire, so prompt lists can be written as plain JSON:
/// `"pizza"` or `["hot dog", "hotdog"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prompt {
    One(String),
    AnyOf(Vec<String>),
}

impl Prompt {
    pub fn one(answer: impl Into<String>) -> Self {
        Self::One(answer.into())
    }

    pub fn any_of<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AnyOf(answers.into_iter().map(Into::into).collect())
    }

    /// Every acceptable answer.
    pub fn answers(&self) -> &[String] {
        match self {
            Self::One(answer) => std::slice::from_ref(answer),
            Self::AnyOf(answers) => answers,
        }
    }

    /// The answer shown to drawers: the first one a guess could match.
    pub fn primary(&self) -> Option<&str> {
        self.answers()
            .iter()
            .map(String::as_str)
            .find(|a| scorer::is_scorable(a))
    }

    /// A prompt is usable if at least one answer keeps a word once filler
    /// is dropped. Blank or filler-only alternatives never score.
    pub fn is_usable(&self) -> bool {
        self.primary().is_some()
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.answers().join(" / "))
    }
}

/// Supplies one prompt per round.
///
/// Returning `None` (or an unusable prompt) makes the round fail to start
/// with [`GameError::EmptyPrompt`](crate::GameError::EmptyPrompt).
///
/// Any `FnMut() -> Option<Prompt>` closure is a prompt source, which keeps
/// tests short:
///
/// ```rust
/// use splice_game::{Prompt, PromptSource};
///
/// let mut source = || Some(Prompt::one("lighthouse"));
/// assert_eq!(source.next_prompt(), Some(Prompt::one("lighthouse")));
/// ```
pub trait PromptSource: Send + 'static {
    fn next_prompt(&mut self) -> Option<Prompt>;
}

impl<F> PromptSource for F
where
    F: FnMut() -> Option<Prompt> + Send + 'static,
{
    fn next_prompt(&mut self) -> Option<Prompt> {
        self()
    }
}

/// An in-memory list of prompts drawn uniformly at random, with
/// replacement.
#[derive(Debug, Clone)]
pub struct PromptDeck {
    prompts: Vec<Prompt>,
    rng: StdRng,
}

impl PromptDeck {
    /// Builds a deck. Unusable prompts are discarded up front.
    pub fn new(prompts: impl IntoIterator<Item = Prompt>, seed: Option<u64>) -> Self {
        Self {
            prompts: prompts.into_iter().filter(Prompt::is_usable).collect(),
            rng: rng_from_seed(seed),
        }
    }

    /// Builds a deck of single-answer prompts.
    pub fn from_words<I, S>(words: I, seed: Option<u64>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(words.into_iter().map(Prompt::one), seed)
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}

impl PromptSource for PromptDeck {
    fn next_prompt(&mut self) -> Option<Prompt> {
        self.prompts.choose(&mut self.rng).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_answers_single_and_many() {
        assert_eq!(Prompt::one("cat").answers(), ["cat".to_string()]);
        assert_eq!(Prompt::any_of(["a", "b"]).answers().len(), 2);
    }

    #[test]
    fn test_prompt_primary_skips_blank_answers() {
        let prompt = Prompt::any_of(["  ", "hot dog"]);
        assert_eq!(prompt.primary(), Some("hot dog"));
        assert!(prompt.is_usable());
    }

    #[test]
    fn test_prompt_unusable_when_blank_or_empty() {
        assert!(!Prompt::one("").is_usable());
        assert!(!Prompt::any_of(Vec::<String>::new()).is_usable());
    }

    #[test]
    fn test_prompt_of_only_stopwords_is_unusable() {
        assert!(!Prompt::one("the").is_usable());
        assert!(!Prompt::any_of(["a", "  "]).is_usable());
        assert_eq!(Prompt::any_of(["the", "owl"]).primary(), Some("owl"));
    }

    #[test]
    fn test_prompt_deserializes_string_or_list() {
        let one: Prompt = serde_json::from_str("\"pizza\"").unwrap();
        assert_eq!(one, Prompt::one("pizza"));
        let many: Prompt = serde_json::from_str("[\"hot dog\", \"hotdog\"]").unwrap();
        assert_eq!(many, Prompt::any_of(["hot dog", "hotdog"]));
    }

    #[test]
    fn test_prompt_display_joins_alternatives() {
        assert_eq!(Prompt::any_of(["hot dog", "hotdog"]).to_string(), "hot dog / hotdog");
    }

    #[test]
    fn test_deck_draws_only_its_prompts() {
        let mut deck = PromptDeck::from_words(["sun", "moon"], Some(5));
        for _ in 0..20 {
            let prompt = deck.next_prompt().unwrap();
            assert!(prompt == Prompt::one("sun") || prompt == Prompt::one("moon"));
        }
    }

    #[test]
    fn test_deck_discards_unusable_prompts() {
        let deck = PromptDeck::from_words(["", "  ", "star"], None);
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn test_empty_deck_yields_nothing() {
        let mut deck = PromptDeck::from_words(Vec::<String>::new(), None);
        assert!(deck.is_empty());
        assert_eq!(deck.next_prompt(), None);
    }

    #[test]
    fn test_same_seed_same_draws() {
        let draws = |seed| {
            let mut deck = PromptDeck::from_words(["a1", "b2", "c3", "d4"], Some(seed));
            (0..10).map(|_| deck.next_prompt()).collect::<Vec<_>>()
        };
        assert_eq!(draws(9), draws(9));
    }
}
