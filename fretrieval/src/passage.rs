/// Label used when the retrieval backend gives no source for a passage.
pub const UNKNOWN_SOURCE: &str = "unknown";

#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedPassage {
    pub text: String,
    pub source_label: String,
    /// In `0.0..=1.0`, higher is more relevant.
    pub relevance: f64,
}

impl RetrievedPassage {
    pub fn new(text: impl Into<String>, source_label: impl Into<String>, relevance: f64) -> Self {
        Self {
            text: text.into(),
            source_label: source_label.into(),
            relevance: clamp_relevance(relevance),
        }
    }

    /// Converts a raw distance where lower means closer.
    pub fn from_distance(
        text: impl Into<String>,
        source_label: Option<String>,
        distance: f64,
    ) -> Self {
        Self::new(
            text,
            source_label.unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
            1.0 - distance,
        )
    }
}

fn clamp_relevance(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Orders passages by descending relevance, keeping backend order among ties.
pub fn rank_passages(passages: &mut [RetrievedPassage]) {
    passages.sort_by(|left, right| right.relevance.total_cmp(&left.relevance));
}
