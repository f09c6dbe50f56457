//! Input records as the sentiment service delivers them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One keyword with its frequency and mean sentiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordInput {
    /// The keyword; unique within one layout.
    pub word: String,
    /// Number of posts mentioning the word.
    pub counts: f64,
    /// Mean sentiment score of those posts.
    pub average_score: f64,
}

/// Co-occurrence of two keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeInput {
    /// First keyword.
    pub source: String,
    /// Second keyword.
    pub target: String,
    /// Number of posts mentioning both.
    pub weight: f64,
}

/// `word -> word -> co-occurrence count`, symmetric.
pub type AdjacencyMatrix = IndexMap<String, IndexMap<String, f64>>;

/// The sentiment service's keyword payload: most positive words, most
/// negative words and their co-occurrence matrix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentWords {
    /// Words with the highest scores.
    #[serde(default)]
    pub top_words: Vec<KeywordInput>,
    /// Words with the lowest scores.
    #[serde(default)]
    pub bottom_words: Vec<KeywordInput>,
    /// Co-occurrence counts between all listed words.
    #[serde(default)]
    pub adj_matrix: AdjacencyMatrix,
}

impl SentimentWords {
    /// Top words followed by bottom words.
    pub fn keywords(&self) -> Vec<KeywordInput> {
        self.top_words
            .iter()
            .chain(&self.bottom_words)
            .cloned()
            .collect()
    }
}
