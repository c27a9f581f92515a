//! Responses for messages no topic rule recognised.
//!
//! A few follow-up prompts are picked by keyword first; anything else gets one
//! of the generic redirect paragraphs, chosen at random.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

pub const GROWING_TECHNIQUES_PROMPT: &str = "I can help you with growing techniques! Please specify which crop: maize, rice, yam, cassava, or cocoa? Each has different requirements for successful cultivation in Ghana.";

pub const PLANTING_TIMING_PROMPT: &str = "Planting seasons vary by crop and region in Ghana. For accurate timing, please let me know which crop you're asking about: maize, rice, yam, cassava, or cocoa?";

pub const WATER_MANAGEMENT_PROMPT: &str = "Water management is crucial for farming success. Different crops have different water needs. Could you specify which crop you're asking about?";

pub const GENERIC_FALLBACKS: [&str; 5] = [
    "I understand you're asking about farming. While I specialize in maize, rice, yam, cassava, and cocoa, I'd be happy to help with general farming advice for Ghana. Could you specify which crop you're interested in?",
    "That's an interesting question! I'm designed to help Ghanaian farmers with specific crop advice. You can ask me about diseases, prevention methods, best varieties, or growing conditions for maize, rice, yam, cassava, and cocoa.",
    "I want to make sure I give you the most accurate information. Could you tell me which crop you're referring to? I have detailed knowledge about maize, rice, yam, cassava, and cocoa farming in Ghana.",
    "Thank you for your question! To provide the best assistance, I focus on these key crops: maize, rice, yam, cassava, and cocoa. Which one would you like to learn more about today?",
    "I'm here to support Ghanaian farmers with practical advice. Let me know if you have questions about crop diseases, prevention techniques, fertilizer recommendations, or best farming practices for any of these crops: maize, rice, yam, cassava, or cocoa.",
];

/// Source of uniform indices for the random fallback pick.
pub trait RandomSource: Send + Sync {
    /// Returns a value in `0..upper`. `upper` is never zero.
    fn pick(&self, upper: usize) -> usize;
}

/// Unseeded thread-local randomness.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper)
    }
}

/// Reproducible randomness from a fixed seed.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&self, upper: usize) -> usize {
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(0..upper),
            Err(poisoned) => poisoned.into_inner().gen_range(0..upper),
        }
    }
}

/// Keyword pairs checked before falling back to a random paragraph.
struct FollowUpRule {
    all_of: &'static [&'static str],
    any_of: &'static [&'static str],
    response: &'static str,
}

impl FollowUpRule {
    fn matches(&self, text: &str) -> bool {
        self.all_of.iter().all(|k| text.contains(k))
            && (self.any_of.is_empty() || self.any_of.iter().any(|k| text.contains(k)))
    }
}

const FOLLOW_UP_RULES: &[FollowUpRule] = &[
    FollowUpRule {
        all_of: &["how", "grow"],
        any_of: &[],
        response: GROWING_TECHNIQUES_PROMPT,
    },
    FollowUpRule {
        all_of: &["when", "plant"],
        any_of: &[],
        response: PLANTING_TIMING_PROMPT,
    },
    FollowUpRule {
        all_of: &[],
        any_of: &["water", "irrigation"],
        response: WATER_MANAGEMENT_PROMPT,
    },
];

pub struct FallbackSelector {
    random: Box<dyn RandomSource>,
}

impl Default for FallbackSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl FallbackSelector {
    /// Selector backed by thread-local randomness.
    pub fn new() -> Self {
        Self::with_random(Box::new(ThreadRandom))
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_random(Box::new(SeededRandom::new(seed)))
    }

    pub fn with_random(random: Box<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// Picks a fallback for an already lowercased message.
    pub fn select(&self, lower_text: &str) -> String {
        if let Some(rule) = FOLLOW_UP_RULES.iter().find(|rule| rule.matches(lower_text)) {
            return rule.response.to_string();
        }

        // Out-of-range picks from a custom source wrap instead of panicking.
        let index = self.random.pick(GENERIC_FALLBACKS.len()) % GENERIC_FALLBACKS.len();
        GENERIC_FALLBACKS[index].to_string()
    }
}

impl std::fmt::Debug for FallbackSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackSelector").finish_non_exhaustive()
    }
}
