//! Intent classification using ordered keyword tables.
//!
//! Every rule is a plain substring test on the lowercased message. Tables are
//! evaluated top to bottom and the first rule with a hit wins, so the order of
//! entries below is part of the behavior.

use std::fmt;

use super::crop::Crop;

/// Facet of advice about a single crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropTopic {
    Disease,
    Variety,
    Fertilizer,
    Growing,
    Harvest,
    /// No facet keyword matched
    Overview,
}

/// Crop-independent topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneralTopic {
    DiseaseOverview,
    Greeting,
    Thanks,
    Weather,
    Soil,
    Market,
    FertilizerGeneral,
    PlantingSeason,
    /// Nothing matched
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subtopic {
    Crop(CropTopic),
    General(GeneralTopic),
}

impl Subtopic {
    /// Returns a human-readable label for the subtopic
    pub fn label(&self) -> &'static str {
        match self {
            Subtopic::Crop(CropTopic::Disease) => "disease",
            Subtopic::Crop(CropTopic::Variety) => "variety",
            Subtopic::Crop(CropTopic::Fertilizer) => "fertilizer",
            Subtopic::Crop(CropTopic::Growing) => "growing",
            Subtopic::Crop(CropTopic::Harvest) => "harvest",
            Subtopic::Crop(CropTopic::Overview) => "overview",
            Subtopic::General(GeneralTopic::DiseaseOverview) => "disease_overview",
            Subtopic::General(GeneralTopic::Greeting) => "greeting",
            Subtopic::General(GeneralTopic::Thanks) => "thanks",
            Subtopic::General(GeneralTopic::Weather) => "weather",
            Subtopic::General(GeneralTopic::Soil) => "soil",
            Subtopic::General(GeneralTopic::Market) => "market",
            Subtopic::General(GeneralTopic::FertilizerGeneral) => "fertilizer_general",
            Subtopic::General(GeneralTopic::PlantingSeason) => "planting_season",
            Subtopic::General(GeneralTopic::Fallback) => "fallback",
        }
    }
}

impl fmt::Display for Subtopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of classifying one user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    /// Crops named in the message, in declaration order.
    pub matched_crops: Vec<Crop>,
    pub subtopic: Subtopic,
    /// The lowercased message the decision was made on.
    pub text: String,
}

impl Intent {
    /// The crop responses are about. Later matches are ignored.
    pub fn primary_crop(&self) -> Option<Crop> {
        self.matched_crops.first().copied()
    }
}

/// One row of a keyword table: any keyword hit selects `outcome`.
struct KeywordRule<T: 'static> {
    keywords: &'static [&'static str],
    outcome: T,
}

impl<T: Copy> KeywordRule<T> {
    fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(keyword))
    }
}

/// Topics tried when no crop is mentioned.
const GENERAL_RULES: &[KeywordRule<GeneralTopic>] = &[
    KeywordRule {
        keywords: &["disease", "sick", "problem"],
        outcome: GeneralTopic::DiseaseOverview,
    },
    KeywordRule {
        keywords: &["hello", "hi", "hey"],
        outcome: GeneralTopic::Greeting,
    },
    KeywordRule {
        keywords: &["thank"],
        outcome: GeneralTopic::Thanks,
    },
    KeywordRule {
        keywords: &["weather", "rain"],
        outcome: GeneralTopic::Weather,
    },
    KeywordRule {
        keywords: &["soil", "land"],
        outcome: GeneralTopic::Soil,
    },
    KeywordRule {
        keywords: &["market", "sell", "price"],
        outcome: GeneralTopic::Market,
    },
    KeywordRule {
        keywords: &["fertilizer", "manure"],
        outcome: GeneralTopic::FertilizerGeneral,
    },
    KeywordRule {
        keywords: &["planting", "season"],
        outcome: GeneralTopic::PlantingSeason,
    },
];

/// Facets tried once a crop is mentioned.
const CROP_RULES: &[KeywordRule<CropTopic>] = &[
    KeywordRule {
        keywords: &["disease", "sick", "problem"],
        outcome: CropTopic::Disease,
    },
    KeywordRule {
        keywords: &["variety", "type", "kind"],
        outcome: CropTopic::Variety,
    },
    KeywordRule {
        keywords: &["fertilizer", "nutrient", "feed"],
        outcome: CropTopic::Fertilizer,
    },
    KeywordRule {
        keywords: &["grow", "plant", "cultivate"],
        outcome: CropTopic::Growing,
    },
    KeywordRule {
        keywords: &["harvest", "pick", "collect"],
        outcome: CropTopic::Harvest,
    },
];

fn first_match<T: Copy>(rules: &[KeywordRule<T>], text: &str) -> Option<T> {
    rules.iter().find(|rule| rule.matches(text)).map(|rule| rule.outcome)
}

/// Stateless keyword classifier.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a raw user message. Always produces an intent.
    pub fn classify(&self, raw_text: &str) -> Intent {
        let text = raw_text.to_lowercase();

        let matched_crops: Vec<Crop> = Crop::ALL
            .into_iter()
            .filter(|crop| text.contains(crop.id()))
            .collect();

        let subtopic = if matched_crops.is_empty() {
            Subtopic::General(first_match(GENERAL_RULES, &text).unwrap_or(GeneralTopic::Fallback))
        } else {
            Subtopic::Crop(first_match(CROP_RULES, &text).unwrap_or(CropTopic::Overview))
        };

        Intent {
            matched_crops,
            subtopic,
            text,
        }
    }
}
