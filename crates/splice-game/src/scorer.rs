//! Fuzzy guess scoring.
//!
//! A guess is compared against an answer with a word-aware edit distance:
//!
//! 1. both sides are lower-cased and split on whitespace,
//! 2. filler words (and near-misses of them) are dropped from both sides,
//! 3. every remaining guess word is charged its distance to the closest
//!    answer word (`word_score`),
//! 4. the re-joined phrases are compared as a whole (`phrase_score`).
//!
//! The result is `phrase_score + word_score`; 0 means an exact match after
//! normalization. Misspelled words cost a little twice (once per word, once
//! in the phrase), while a dropped or added "the" costs nothing.

/// Words that never count for or against a guess.
///
/// A token within edit distance 1 of any of these is dropped as well, so
/// "teh" survives (distance 2 from "the") but "thee" and "on" do not.
pub const STOPWORDS: [&str; 4] = ["a", "an", "the", "of"];

/// Default maximum distance at which a guess is still accepted.
pub const DEFAULT_TOLERANCE: usize = 4;

/// Scores `given` against every acceptable answer and returns the best
/// (smallest) distance.
///
/// Answers with nothing left after filler removal are skipped, so a blank
/// alternative never matches. With no scorable answers the result is
/// `usize::MAX`, i.e. nothing is ever close enough.
pub fn score<I, S>(given: &str, answers: I) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let given = significant_words(given);
    answers
        .into_iter()
        .map(|answer| significant_words(answer.as_ref()))
        .filter(|answer| !answer.is_empty())
        .map(|answer| word_distance(&given, &answer))
        .min()
        .unwrap_or(usize::MAX)
}

/// Scores `given` against a single answer.
pub fn distance(given: &str, answer: &str) -> usize {
    word_distance(&significant_words(given), &significant_words(answer))
}

/// Returns `true` if a score is close enough to count as a correct guess.
pub fn accepts(score: usize, tolerance: usize) -> bool {
    score <= tolerance
}

/// Classic Levenshtein distance over Unicode scalar values
/// (insert, delete, substitute; all unit cost).
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitute = prev[j] + usize::from(ca != *cb);
            let delete = prev[j + 1] + 1;
            let insert = curr[j] + 1;
            curr[j + 1] = substitute.min(delete).min(insert);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Returns `true` if `answer` keeps at least one word after filler
/// removal, i.e. some guess can actually match it.
pub fn is_scorable(answer: &str) -> bool {
    !significant_words(answer).is_empty()
}

/// Returns `true` for stopwords and anything one edit away from one.
pub fn is_filler(word: &str) -> bool {
    STOPWORDS.iter().any(|stop| levenshtein(word, stop) <= 1)
}

/// Lower-cases `text`, splits it on whitespace, and drops filler words.
fn significant_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|word| !is_filler(word))
        .map(str::to_owned)
        .collect()
}

fn word_distance(given: &[String], answer: &[String]) -> usize {
    // A guess word with no answer word to compare against has no
    // counterpart at all, so the total is unbounded.
    let word_score = given.iter().fold(0usize, |total, word| {
        let nearest = answer
            .iter()
            .map(|candidate| levenshtein(word, candidate))
            .min()
            .unwrap_or(usize::MAX);
        total.saturating_add(nearest)
    });

    let phrase_score = levenshtein(&given.join(" "), &answer.join(" "));

    phrase_score.saturating_add(word_score)
}
