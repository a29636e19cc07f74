//! Built-in weighted sentiment lexicon.
//!
//! Word weights follow the AFINN convention: integers in `[-5, 5]`,
//! negative meaning unfavorable. The analyzer sums the weights of
//! matched tokens and normalizes by `5 * matches`, so the output stays
//! in `[-1, 1]` regardless of text length.

use std::collections::HashMap;

/// Lexicon-based polarity scorer over lowercase word tokens.
#[derive(Debug, Clone)]
pub struct SentimentLexicon {
    weights: HashMap<&'static str, i8>,
}

/// Tokens that flip the sign of the immediately following sentiment word.
const NEGATORS: &[&str] = &["not", "no", "never", "dont", "cant", "wont", "isnt"];

const MAX_WEIGHT: f64 = 5.0;

impl Default for SentimentLexicon {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WORDS.iter().copied().collect(),
        }
    }
}

impl SentimentLexicon {
    /// Polarity of `text` in `[-1, 1]`; 0.0 when no lexicon word matches.
    pub fn score(&self, text: &str) -> f64 {
        let mut total: f64 = 0.0;
        let mut matches: u32 = 0;
        let mut negated = false;

        for token in tokens(text) {
            if NEGATORS.contains(&token.as_str()) {
                negated = true;
                continue;
            }
            if let Some(&weight) = self.weights.get(token.as_str()) {
                let signed = if negated {
                    -f64::from(weight)
                } else {
                    f64::from(weight)
                };
                total += signed;
                matches += 1;
            }
            negated = false;
        }

        if matches == 0 {
            return 0.0;
        }
        (total / (MAX_WEIGHT * f64::from(matches))).clamp(-1.0, 1.0)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|t| !t.is_empty())
        .map(|t| t.replace('\'', "").to_lowercase())
}

/// Compact AFINN-style default word table.
const DEFAULT_WORDS: &[(&str, i8)] = &[
    // Strongly positive
    ("outstanding", 5),
    ("superb", 5),
    ("breathtaking", 5),
    ("amazing", 4),
    ("awesome", 4),
    ("brilliant", 4),
    ("excellent", 4),
    ("fantastic", 4),
    ("incredible", 4),
    ("magnificent", 4),
    ("perfect", 4),
    ("wonderful", 4),
    ("exceptional", 4),
    ("love", 3),
    ("loved", 3),
    ("loving", 3),
    ("beautiful", 3),
    ("best", 3),
    ("delightful", 3),
    ("excited", 3),
    ("exciting", 3),
    ("great", 3),
    ("impressive", 3),
    ("thrilled", 3),
    ("win", 3),
    ("winning", 3),
    // Mildly positive
    ("good", 2),
    ("happy", 2),
    ("helpful", 2),
    ("hope", 2),
    ("hopeful", 2),
    ("improved", 2),
    ("improvement", 2),
    ("interesting", 2),
    ("like", 2),
    ("liked", 2),
    ("nice", 2),
    ("pleasant", 2),
    ("pleased", 2),
    ("promising", 2),
    ("recommend", 2),
    ("solid", 2),
    ("success", 2),
    ("successful", 2),
    ("useful", 2),
    ("works", 2),
    ("better", 1),
    ("fine", 1),
    ("glad", 1),
    ("ok", 1),
    ("okay", 1),
    ("thanks", 1),
    ("thank", 1),
    ("worth", 1),
    // Mildly negative
    ("annoying", -2),
    ("bad", -2),
    ("boring", -2),
    ("broken", -2),
    ("bug", -2),
    ("buggy", -2),
    ("concerned", -2),
    ("confusing", -2),
    ("disappointed", -2),
    ("disappointing", -2),
    ("doubt", -2),
    ("fail", -2),
    ("failed", -2),
    ("failure", -2),
    ("issue", -2),
    ("problem", -2),
    ("sad", -2),
    ("slow", -2),
    ("struggle", -2),
    ("stuck", -2),
    ("unhappy", -2),
    ("useless", -2),
    ("waste", -2),
    ("worried", -2),
    ("worse", -2),
    ("wrong", -2),
    ("avoid", -1),
    ("meh", -1),
    ("mediocre", -1),
    ("overrated", -1),
    // Strongly negative
    ("awful", -3),
    ("garbage", -3),
    ("hate", -3),
    ("hated", -3),
    ("nightmare", -3),
    ("scam", -3),
    ("terrible", -3),
    ("worst", -3),
    ("angry", -3),
    ("disaster", -4),
    ("disgusting", -4),
    ("horrible", -4),
    ("horrific", -4),
    ("catastrophic", -5),
    ("abysmal", -5),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_matches_scores_zero() {
        let lexicon = SentimentLexicon::default();
        assert_eq!(lexicon.score("the quick brown fox"), 0.0);
        assert_eq!(lexicon.score(""), 0.0);
    }

    #[test]
    fn normalization_bounds_the_score() {
        let lexicon = SentimentLexicon::default();
        let s = lexicon.score("outstanding superb breathtaking");
        assert_eq!(s, 1.0);
        let s = lexicon.score("catastrophic abysmal");
        assert_eq!(s, -1.0);
    }

    #[test]
    fn mixed_text_averages() {
        let lexicon = SentimentLexicon::default();
        // good (+2) and bad (-2) cancel out
        assert_eq!(lexicon.score("good and bad"), 0.0);
    }

    #[test]
    fn negation_flips_the_next_word() {
        let lexicon = SentimentLexicon::default();
        assert!(lexicon.score("not good") < 0.0);
        assert!(lexicon.score("never bad") > 0.0);
    }

    #[test]
    fn tokenization_strips_punctuation_and_case() {
        let lexicon = SentimentLexicon::default();
        assert!(lexicon.score("GREAT!!! Absolutely GREAT.") > 0.0);
    }

    #[test]
    fn default_table_is_populated() {
        let lexicon = SentimentLexicon::default();
        assert!(!lexicon.is_empty());
        assert!(lexicon.len() >= 90);
    }
}
