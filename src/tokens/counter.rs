//! Token counter implementations.

use std::sync::Arc;

pub trait TokenCounter: Send + Sync {
    fn count(&self, text: &str) -> usize;
}

/// Length-based approximation: bytes divided by a fixed ratio, rounded up.
#[derive(Debug, Clone)]
pub struct CharacterEstimator {
    chars_per_token: f64,
}
impl CharacterEstimator {
    pub fn new() -> Self {
        Self::with_ratio(4.0)
    }
    pub fn with_ratio(r: f64) -> Self {
        Self {
            chars_per_token: if r > 0.0 { r } else { 4.0 },
        }
    }
}
impl Default for CharacterEstimator {
    fn default() -> Self {
        Self::new()
    }
}
impl TokenCounter for CharacterEstimator {
    fn count(&self, text: &str) -> usize {
        (text.len() as f64 / self.chars_per_token).ceil() as usize
    }
}

#[derive(Debug, Clone)]
pub struct AnthropicEstimator {
    chars_per_token: f64,
}
impl AnthropicEstimator {
    pub fn new() -> Self {
        Self {
            chars_per_token: 3.5,
        }
    }
}
impl Default for AnthropicEstimator {
    fn default() -> Self {
        Self::new()
    }
}
impl TokenCounter for AnthropicEstimator {
    fn count(&self, text: &str) -> usize {
        let base = (text.len() as f64 / self.chars_per_token).ceil() as usize;
        let ws = text.chars().filter(|c| c.is_whitespace()).count();
        base + (ws as f64 * 0.1) as usize
    }
}

/// Estimator matching the model family.
pub fn counter_for_model(model: &str) -> Arc<dyn TokenCounter> {
    let ml = model.to_lowercase();
    if ml.contains("claude") {
        Arc::new(AnthropicEstimator::new())
    } else {
        Arc::new(CharacterEstimator::new())
    }
}
