//! Templated answers.
//!
//! Every response is a run of `<p>` blocks. Crop answers fill templates from
//! the knowledge base; general topics are fixed text.

use tracing::debug;

use super::crop::{capitalize, Crop};
use super::fallback::FallbackSelector;
use super::intent::{CropTopic, GeneralTopic, Intent, Subtopic};
use crate::error::Degraded;
use crate::knowledge::{CropProfile, KnowledgeBase, SOIL_MANAGEMENT_TOPIC};

/// Joins list items inside a single block.
pub const LIST_DELIMITER: &str = ", ";

pub const GREETING_TEXT: &str = "Hello! I'm FarmMate AI, your farming assistant. I can help you with information about crops, diseases, prevention methods, and best farming practices for Ghanaian conditions. What specific crop would you like to know about?";

pub const THANKS_TEXT: &str = "You're welcome! I'm always here to help with your farming questions. Remember, good farming practices lead to better yields. Is there anything else you'd like to know?";

pub const WEATHER_TEXT: &str = "<p>For weather-specific advice in Ghana:</p><p>Major rainy season: April-July</p><p>Minor rainy season: September-October</p><p>Dry season: November-March</p><p>Plan your planting accordingly and consider using drought-tolerant varieties during dry spells. Always check with your local Meteorological Agency for current weather forecasts.</p>";

pub const MARKET_TEXT: &str = "<p>For market information in Ghana:</p><p>Check with local Agric Extension Officers</p><p>Visit regional markets for current prices</p><p>Consider farmer cooperatives for better bargaining</p><p>Explore the Planting for Food and Jobs market</p><p>Look into export opportunities for certified products</p><p>Monitor prices through the Ministry of Food and Agriculture website</p>";

pub const GENERAL_FERTILIZER_TEXT: &str = "<p>General fertilizer advice for Ghanaian farmers:</p><p>Always conduct soil testing before applying fertilizers</p><p>Use NPK 15-15-15 as a general-purpose fertilizer</p><p>Consider organic manure to improve soil structure</p><p>Follow recommended application rates for each crop</p><p>Split applications often work better than single doses</p><p>Consult with local extension officers for specific recommendations</p>";

pub const PLANTING_SEASON_TEXT: &str = "<p>Planting seasons in Ghana vary by crop and region:</p><p>Major season: April-July (most crops)</p><p>Minor season: September-October (some crops)</p><p>The optimal timing depends on:</p><p>Crop type</p><p>Variety</p><p>Rainfall patterns</p><p>Soil conditions</p><p>For specific crop timing, ask me about maize, rice, yam, cassava, or cocoa planting seasons.</p>";

const SOIL_HEADING: &str = "Soil management tips for Ghanaian farmers:";

const FERTILIZER_TIPS: [&str; 4] = [
    "Always conduct soil testing for precise recommendations",
    "Split applications often work better than single applications",
    "Combine with organic manure for better soil health",
    "Consider using Ghana's Planting for Food and Jobs program inputs",
];

const CULTIVATION_PRACTICES: [&str; 4] = [
    "Use certified seeds/planting materials",
    "Follow proper spacing recommendations",
    "Implement crop rotation where possible",
    "Monitor regularly for pests and diseases",
];

fn push_block(out: &mut String, text: &str) {
    out.push_str("<p>");
    out.push_str(text);
    out.push_str("</p>");
}

/// Renders a classified intent against the knowledge base.
#[derive(Debug, Default)]
pub struct ResponseGenerator {
    fallback: FallbackSelector,
}

impl ResponseGenerator {
    pub fn new(fallback: FallbackSelector) -> Self {
        Self { fallback }
    }

    pub fn render(&self, intent: &Intent, kb: &KnowledgeBase) -> String {
        match (intent.subtopic, intent.primary_crop()) {
            (Subtopic::Crop(topic), Some(crop)) => match kb.crop(crop.id()) {
                Some(profile) => render_crop(topic, crop, profile),
                None => {
                    debug!(crop = %crop, "classified crop missing from knowledge base");
                    Degraded::UnknownCrop(crop.id().to_string()).to_string()
                }
            },
            // A crop topic without a crop cannot come from the classifier.
            (Subtopic::Crop(_), None) => self.fallback.select(&intent.text),
            (Subtopic::General(topic), _) => self.render_general(topic, &intent.text, kb),
        }
    }

    fn render_general(&self, topic: GeneralTopic, lower_text: &str, kb: &KnowledgeBase) -> String {
        match topic {
            GeneralTopic::DiseaseOverview => disease_overview(kb),
            GeneralTopic::Greeting => GREETING_TEXT.to_string(),
            GeneralTopic::Thanks => THANKS_TEXT.to_string(),
            GeneralTopic::Weather => WEATHER_TEXT.to_string(),
            GeneralTopic::Soil => soil(kb),
            GeneralTopic::Market => MARKET_TEXT.to_string(),
            GeneralTopic::FertilizerGeneral => GENERAL_FERTILIZER_TEXT.to_string(),
            GeneralTopic::PlantingSeason => PLANTING_SEASON_TEXT.to_string(),
            GeneralTopic::Fallback => self.fallback.select(lower_text),
        }
    }
}

fn render_crop(topic: CropTopic, crop: Crop, profile: &CropProfile) -> String {
    match topic {
        CropTopic::Overview => overview(crop, profile),
        CropTopic::Disease => diseases(crop, profile),
        CropTopic::Variety => varieties(crop, profile),
        CropTopic::Fertilizer => fertilizer(crop, profile),
        CropTopic::Growing => growing(crop, profile),
        CropTopic::Harvest => harvest(crop, profile),
    }
}

fn overview(crop: Crop, profile: &CropProfile) -> String {
    let conditions = &profile.growing_conditions;
    let mut out = String::with_capacity(1024);

    push_block(&mut out, &format!("Here's what I know about {} farming in Ghana:", crop));
    push_block(&mut out, &profile.description);
    push_block(&mut out, "<strong>Growing Conditions:</strong>");
    push_block(&mut out, &format!("Soil: {}", conditions.soil));
    push_block(&mut out, &format!("Rainfall: {}", conditions.rainfall));
    push_block(&mut out, &format!("Temperature: {}", conditions.temperature));
    push_block(&mut out, &format!("Main Regions: {}", conditions.regions));
    push_block(
        &mut out,
        &format!(
            "<strong>Common Varieties:</strong> {}",
            profile.common_varieties.join(LIST_DELIMITER)
        ),
    );
    push_block(
        &mut out,
        &format!(
            "You can ask me about specific diseases, prevention methods, fertilizer recommendations, or harvesting tips for {}.",
            crop
        ),
    );

    out
}

fn diseases(crop: Crop, profile: &CropProfile) -> String {
    let mut out = String::with_capacity(2048);

    push_block(&mut out, &format!("Here are the common diseases that affect {} in Ghana:", crop));

    for disease in &profile.diseases {
        push_block(&mut out, &format!("<strong>{}</strong>", disease.name));
        push_block(&mut out, &format!("Symptoms: {}", disease.symptoms));
        push_block(
            &mut out,
            &format!("Prevention: {}", disease.prevention.join(LIST_DELIMITER)),
        );
        if let Some(treatment) = disease.treatment.as_deref().filter(|t| !t.is_empty()) {
            push_block(&mut out, &format!("Treatment: {}", treatment));
        }
    }

    let pests: Vec<&str> = profile.pests.iter().map(|pest| pest.name.as_str()).collect();
    push_block(
        &mut out,
        &format!("For {}, I also recommend: {} control.", crop, pests.join(LIST_DELIMITER)),
    );

    out
}

fn varieties(crop: Crop, profile: &CropProfile) -> String {
    let mut out = String::with_capacity(512);

    push_block(&mut out, &format!("Here are the recommended varieties for {} in Ghana:", crop));
    for variety in &profile.common_varieties {
        push_block(&mut out, variety);
    }

    match profile.common_varieties.first() {
        Some(most_popular) => push_block(
            &mut out,
            &format!(
                "The most popular variety is usually \"{}\". Choose varieties based on your specific growing conditions and market preferences.",
                most_popular
            ),
        ),
        None => push_block(
            &mut out,
            &format!(
                "I don't have variety details for {} yet. Your local extension officer can recommend varieties suited to your area.",
                crop
            ),
        ),
    }

    out
}

fn fertilizer(crop: Crop, profile: &CropProfile) -> String {
    let mut out = String::with_capacity(768);

    push_block(&mut out, &format!("Fertilizer recommendations for {} in Ghana:", crop));
    push_block(&mut out, "<strong>Recommended Application:</strong>");
    push_block(&mut out, &profile.fertilizer_recommendation);
    push_block(&mut out, "<strong>Additional Tips:</strong>");
    for tip in FERTILIZER_TIPS {
        push_block(&mut out, tip);
    }

    out
}

fn growing(crop: Crop, profile: &CropProfile) -> String {
    let conditions = &profile.growing_conditions;
    let mut out = String::with_capacity(768);

    push_block(&mut out, &format!("Growing {} successfully in Ghana:", crop));
    push_block(&mut out, "<strong>Ideal Conditions:</strong>");
    push_block(&mut out, &conditions.soil);
    push_block(&mut out, &conditions.rainfall);
    push_block(&mut out, &conditions.temperature);
    push_block(
        &mut out,
        &format!("<strong>Best Regions:</strong> {}", conditions.regions),
    );
    push_block(&mut out, "<strong>Key Practices:</strong>");
    for practice in CULTIVATION_PRACTICES {
        push_block(&mut out, practice);
    }

    out
}

fn harvest(crop: Crop, profile: &CropProfile) -> String {
    let mut out = String::with_capacity(512);

    push_block(&mut out, &format!("Harvesting {} in Ghana:", crop));
    push_block(&mut out, &format!("<strong>Timing:</strong> {}", profile.harvesting));
    push_block(&mut out, "<strong>Harvest Indicators:</strong>");
    for indicator in crop.harvest_indicators() {
        push_block(&mut out, indicator);
    }

    out
}

fn disease_overview(kb: &KnowledgeBase) -> String {
    let mut out = String::with_capacity(1024);

    push_block(
        &mut out,
        "I can help you with crop diseases! Here are the main crops I have disease information for:",
    );

    // Every crop in the document, supported or not, in document order.
    for (id, profile) in kb.crops.iter() {
        let names: Vec<&str> = profile.diseases.iter().map(|d| d.name.as_str()).collect();
        push_block(
            &mut out,
            &format!("<strong>{}:</strong> {}", capitalize(id), names.join(LIST_DELIMITER)),
        );
    }

    push_block(
        &mut out,
        "You can ask about specific diseases like 'How to prevent maize lethal necrosis' or 'What causes rice blast' for detailed information.",
    );

    out
}

fn soil(kb: &KnowledgeBase) -> String {
    let mut out = String::with_capacity(512);

    push_block(&mut out, SOIL_HEADING);
    for tip in kb.general_topic(SOIL_MANAGEMENT_TOPIC) {
        push_block(&mut out, tip);
    }

    out
}
