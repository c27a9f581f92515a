//! Brain Module Tests
//!
//! Classification, per-topic rendering and fallback behavior against the
//! bundled knowledge base.

use super::fixtures::{bundled_engine, bundled_kb, engine_with, kb_without};
use crate::brain::fallback::{
    FallbackSelector, GENERIC_FALLBACKS, GROWING_TECHNIQUES_PROMPT, PLANTING_TIMING_PROMPT,
    WATER_MANAGEMENT_PROMPT,
};
use crate::brain::responses::{ResponseGenerator, LIST_DELIMITER};
use crate::brain::{Crop, CropTopic, GeneralTopic, Intent, IntentClassifier, Subtopic};
use crate::error::Degraded;
use crate::knowledge::KnowledgeBase;

fn crop_intent(crop: Crop, topic: CropTopic) -> Intent {
    Intent {
        matched_crops: vec![crop],
        subtopic: Subtopic::Crop(topic),
        text: String::new(),
    }
}

fn render(intent: &Intent, kb: &KnowledgeBase) -> String {
    ResponseGenerator::new(FallbackSelector::seeded(1)).render(intent, kb)
}

#[cfg(test)]
mod classification_tests {
    use super::*;

    #[test]
    fn test_single_crop_without_facet_is_overview() {
        let classifier = IntentClassifier::new();

        for crop in Crop::ALL {
            let text = format!("Tell me about {}", crop);
            let intent = classifier.classify(&text);
            assert_eq!(intent.matched_crops, vec![crop], "for '{}'", text);
            assert_eq!(intent.subtopic, Subtopic::Crop(CropTopic::Overview), "for '{}'", text);
        }
    }

    #[test]
    fn test_first_crop_in_declared_order_wins() {
        let classifier = IntentClassifier::new();

        let intent = classifier.classify("cocoa and maize disease");
        assert_eq!(intent.primary_crop(), Some(Crop::Maize));
        assert_eq!(intent.subtopic, Subtopic::Crop(CropTopic::Disease));

        let intent = classifier.classify("YAM or RICE variety");
        assert_eq!(intent.primary_crop(), Some(Crop::Rice));
        assert_eq!(intent.subtopic, Subtopic::Crop(CropTopic::Variety));
    }

    #[test]
    fn test_crop_facet_priority() {
        let classifier = IntentClassifier::new();

        let cases = [
            ("My maize plants look sick", CropTopic::Disease),
            ("What kind of cassava should I plant", CropTopic::Variety),
            ("How to feed cocoa trees", CropTopic::Fertilizer),
            ("How to cultivate yam", CropTopic::Growing),
            ("When do I harvest rice", CropTopic::Harvest),
        ];

        for (text, expected) in cases {
            assert_eq!(
                classifier.classify(text).subtopic,
                Subtopic::Crop(expected),
                "Expected {:?} for '{}'",
                expected,
                text
            );
        }
    }

    #[test]
    fn test_disease_outranks_greeting() {
        let classifier = IntentClassifier::new();
        let intent = classifier.classify("Hi, my farm has a problem");
        assert_eq!(intent.subtopic, Subtopic::General(GeneralTopic::DiseaseOverview));
    }
}

#[cfg(test)]
mod rendering_tests {
    use super::*;

    #[test]
    fn test_overview_contains_profile() {
        let kb = bundled_kb();
        let maize = kb.crop("maize").unwrap();
        let out = render(&crop_intent(Crop::Maize, CropTopic::Overview), &kb);

        assert!(out.contains(&maize.description));
        let conditions = &maize.growing_conditions;
        for field in [
            &conditions.soil,
            &conditions.rainfall,
            &conditions.temperature,
            &conditions.regions,
        ] {
            assert!(out.contains(field.as_str()), "missing '{}'", field);
        }
        assert!(out.contains(&maize.common_varieties.join(LIST_DELIMITER)));
        assert!(out.contains("fertilizer recommendations, or harvesting tips for maize"));
    }

    #[test]
    fn test_variety_callout_is_first_variety() {
        let kb = bundled_kb();

        for crop in Crop::ALL {
            let profile = kb.crop(crop.id()).unwrap();
            let out = render(&crop_intent(crop, CropTopic::Variety), &kb);
            let callout = format!(
                "The most popular variety is usually \"{}\".",
                profile.common_varieties[0]
            );
            assert!(out.contains(&callout), "callout missing for {}", crop);
            for variety in &profile.common_varieties {
                assert!(out.contains(&format!("<p>{}</p>", variety)));
            }
        }
    }

    #[test]
    fn test_empty_varieties_omits_callout() {
        let mut kb = bundled_kb();
        kb.crops = kb
            .crops
            .iter()
            .map(|(id, profile)| {
                let mut profile = profile.clone();
                if id == "rice" {
                    profile.common_varieties.clear();
                }
                (id.to_string(), profile)
            })
            .collect();

        let out = render(&crop_intent(Crop::Rice, CropTopic::Variety), &kb);
        assert!(!out.contains("most popular"));
        assert!(out.contains("I don't have variety details for rice yet."));
    }

    #[test]
    fn test_harvest_indicators_are_crop_specific() {
        let kb = bundled_kb();

        let maize = render(&crop_intent(Crop::Maize, CropTopic::Harvest), &kb);
        for indicator in [
            "Kernels hard and glossy",
            "Moisture content 20-25%",
            "Black layer formation at kernel base",
        ] {
            assert!(maize.contains(indicator));
        }
        assert!(maize.contains(&kb.crop("maize").unwrap().harvesting));

        let cocoa = render(&crop_intent(Crop::Cocoa, CropTopic::Harvest), &kb);
        for indicator in [
            "Pod color changes (yellow/orange for ripe)",
            "Main crop: Oct-Jan, Light crop: Jun-Aug",
            "Harvest every 2-4 weeks",
        ] {
            assert!(cocoa.contains(indicator));
        }
        assert!(!cocoa.contains("Kernels hard and glossy"));
    }

    #[test]
    fn test_disease_block_order_and_treatment() {
        let kb = bundled_kb();
        let maize = kb.crop("maize").unwrap();
        let out = render(&crop_intent(Crop::Maize, CropTopic::Disease), &kb);

        let positions: Vec<usize> = maize
            .diseases
            .iter()
            .map(|d| out.find(&format!("<strong>{}</strong>", d.name)).expect("disease listed"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let with_treatment = maize.diseases.iter().filter(|d| d.treatment.is_some()).count();
        assert_eq!(out.matches("Treatment:").count(), with_treatment);
        assert!(out.ends_with(
            "<p>For maize, I also recommend: Fall armyworm, Stem borer, Weevils control.</p>"
        ));
    }

    #[test]
    fn test_fertilizer_and_growing_append_fixed_advice() {
        let kb = bundled_kb();

        let fertilizer = render(&crop_intent(Crop::Yam, CropTopic::Fertilizer), &kb);
        assert!(fertilizer.contains(&kb.crop("yam").unwrap().fertilizer_recommendation));
        assert!(fertilizer.contains("Consider using Ghana's Planting for Food and Jobs program inputs"));
        assert!(fertilizer.contains("Split applications often work better than single applications"));

        let growing = render(&crop_intent(Crop::Cassava, CropTopic::Growing), &kb);
        assert!(growing.contains(&kb.crop("cassava").unwrap().growing_conditions.regions));
        assert!(growing.contains("Use certified seeds/planting materials"));
        assert!(growing.contains("Monitor regularly for pests and diseases"));
    }

    #[test]
    fn test_disease_overview_lists_every_crop_in_document_order() {
        let kb = bundled_kb();
        let intent = IntentClassifier::new().classify("What diseases should I watch for?");
        assert_eq!(intent.subtopic, Subtopic::General(GeneralTopic::DiseaseOverview));

        let out = render(&intent, &kb);
        let positions: Vec<usize> = ["Maize", "Rice", "Yam", "Cassava", "Cocoa"]
            .iter()
            .map(|name| out.find(&format!("<strong>{}:</strong>", name)).expect("crop listed"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(out.contains("Black Pod Disease, Cocoa Swollen Shoot Virus"));
    }

    #[test]
    fn test_soil_maps_general_advice_to_blocks() {
        let kb = bundled_kb();
        let intent = IntentClassifier::new().classify("soil tips");
        let out = render(&intent, &kb);

        assert!(out.starts_with("<p>Soil management tips for Ghanaian farmers:</p>"));
        for tip in kb.general_topic("soil_management") {
            assert!(out.contains(&format!("<p>{}</p>", tip)));
        }
    }

    #[test]
    fn test_missing_crop_degrades() {
        let kb = kb_without("cocoa");
        let out = render(&crop_intent(Crop::Cocoa, CropTopic::Harvest), &kb);
        assert_eq!(out, Degraded::UnknownCrop("cocoa".to_string()).to_string());
        assert!(out.contains("maize, rice, yam, cassava, and cocoa"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let kb = bundled_kb();
        for topic in [
            CropTopic::Overview,
            CropTopic::Disease,
            CropTopic::Variety,
            CropTopic::Fertilizer,
            CropTopic::Growing,
            CropTopic::Harvest,
        ] {
            let intent = crop_intent(Crop::Rice, topic);
            assert_eq!(render(&intent, &kb), render(&intent, &kb));
        }
    }
}

#[cfg(test)]
mod fallback_tests {
    use super::*;

    #[test]
    fn test_follow_up_prompts_are_deterministic() {
        let selector = FallbackSelector::new();
        for _ in 0..10 {
            assert_eq!(selector.select("how do i grow rice"), GROWING_TECHNIQUES_PROMPT);
        }
        assert_eq!(selector.select("when to plant"), PLANTING_TIMING_PROMPT);
        assert_eq!(selector.select("how much water"), WATER_MANAGEMENT_PROMPT);
    }

    #[test]
    fn test_unmatched_engine_reply_is_known_fallback() {
        let engine = bundled_engine();
        for _ in 0..20 {
            let reply = engine.generate_response("xyz");
            assert!(GENERIC_FALLBACKS.contains(&reply.as_str()), "unexpected: {}", reply);
        }
    }

    #[test]
    fn test_engine_routes_follow_ups_through_fallback() {
        let engine = bundled_engine();
        // No crop and no general keyword, so the follow-up rule applies.
        assert_eq!(engine.generate_response("How does growing work?"), GROWING_TECHNIQUES_PROMPT);
    }
}

#[cfg(test)]
mod engine_tests {
    use super::*;
    use crate::knowledge::{DataSource, KnowledgeStore};
    use crate::brain::ResponseEngine;
    use std::path::PathBuf;

    #[test]
    fn test_maize_disease_question_end_to_end() {
        let engine = bundled_engine();
        let kb = bundled_kb();
        let maize = kb.crop("maize").unwrap();

        let reply = engine.generate_response("Tell me about maize diseases");

        assert!(reply.starts_with("<p>Here are the common diseases that affect maize in Ghana:</p>"));
        for disease in &maize.diseases {
            assert!(reply.contains(&format!(
                "<p>Prevention: {}</p>",
                disease.prevention.join(LIST_DELIMITER)
            )));
        }
        assert!(reply.contains("I also recommend: Fall armyworm, Stem borer, Weevils control."));
    }

    #[test]
    fn test_unloaded_knowledge_base_reports_loading() {
        let store = KnowledgeStore::new(DataSource::File(PathBuf::from("missing.json")));
        let engine = ResponseEngine::new(store);
        assert_eq!(
            engine.generate_response("Tell me about maize"),
            "I'm still loading farming data. Please try again in a moment."
        );
    }

    #[test]
    fn test_missing_crop_through_engine() {
        let engine = engine_with(kb_without("yam"));
        let reply = engine.generate_response("yam varieties");
        assert!(reply.starts_with("I don't have specific information about yam"));
    }

    #[test]
    fn test_fixed_general_texts() {
        let engine = bundled_engine();
        assert!(engine.generate_response("hello").starts_with("Hello! I'm FarmMate AI"));
        assert!(engine.generate_response("thanks!").starts_with("You're welcome!"));
        assert!(engine.generate_response("Is rain coming").contains("Major rainy season: April-July"));
        assert!(engine.generate_response("Where to sell").contains("Check with local Agric Extension Officers"));
        assert!(engine.generate_response("manure advice").contains("Use NPK 15-15-15"));
        assert!(engine.generate_response("best season").contains("Major season: April-July (most crops)"));
    }
}
