//! Display-only size and cost estimates for a generation.

/// USD prices per 1000 estimated tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostRates {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            input_per_1k: 0.01,
            output_per_1k: 0.03,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub words_generated: usize,
    pub cost: f64,
}

/// Rough token count: one token per four characters, rounded up.
pub fn approx_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimate words produced and cost for one prompt/output pair.
pub fn estimate(prompt: &str, output: &str, rates: CostRates) -> Estimate {
    let input_cost = approx_tokens(prompt) as f64 / 1000.0 * rates.input_per_1k;
    let output_cost = approx_tokens(output) as f64 / 1000.0 * rates.output_per_1k;
    Estimate {
        words_generated: word_count(output),
        cost: input_cost + output_cost,
    }
}
