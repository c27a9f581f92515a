//! Knowledge base document schema.
//!
//! Mirrors the `crops_data.json` layout: a `crops` object keyed by crop id and a
//! `general_farming` object of advice lists. Crop entries keep the order in which
//! the document lists them.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::brain::crop::Crop;

/// Key of the soil advice list inside `general_farming`.
pub const SOIL_MANAGEMENT_TOPIC: &str = "soil_management";

/// The full, read-only farming knowledge base.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KnowledgeBase {
    pub crops: CropTable,
    #[serde(default)]
    pub general_farming: BTreeMap<String, Vec<String>>,
}

impl KnowledgeBase {
    /// Looks up a crop profile by identifier.
    pub fn crop(&self, id: &str) -> Option<&CropProfile> {
        self.crops.get(id)
    }

    /// Advice strings for a general topic, empty when the topic is absent.
    pub fn general_topic(&self, topic: &str) -> &[String] {
        self.general_farming
            .get(topic)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Reports data gaps that the renderer will have to degrade around.
    ///
    /// Nothing here rejects the document; the caller decides whether to log.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for crop in Crop::ALL {
            if self.crop(crop.id()).is_none() {
                warnings.push(format!("supported crop '{}' has no profile", crop.id()));
            }
        }

        for (id, profile) in self.crops.iter() {
            if profile.common_varieties.is_empty() {
                warnings.push(format!("crop '{}' lists no varieties", id));
            }
        }

        if self.general_topic(SOIL_MANAGEMENT_TOPIC).is_empty() {
            warnings.push("general_farming.soil_management is empty".to_string());
        }

        warnings
    }
}

/// Crop profiles in document order.
#[derive(Debug, Clone, Default)]
pub struct CropTable {
    entries: Vec<(String, CropProfile)>,
}

impl CropTable {
    pub fn get(&self, id: &str) -> Option<&CropProfile> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, profile)| profile)
    }

    /// Iterates `(id, profile)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CropProfile)> {
        self.entries.iter().map(|(id, profile)| (id.as_str(), profile))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, CropProfile)> for CropTable {
    fn from_iter<I: IntoIterator<Item = (String, CropProfile)>>(iter: I) -> Self {
        let mut table = CropTable::default();
        for (id, profile) in iter {
            // A later duplicate key replaces the earlier profile in place.
            match table.entries.iter_mut().find(|(key, _)| *key == id) {
                Some(slot) => slot.1 = profile,
                None => table.entries.push((id, profile)),
            }
        }
        table
    }
}

impl<'de> Deserialize<'de> for CropTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CropTableVisitor;

        impl<'de> Visitor<'de> for CropTableVisitor {
            type Value = CropTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of crop id to crop profile")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((id, profile)) = map.next_entry::<String, CropProfile>()? {
                    entries.push((id, profile));
                }
                Ok(entries.into_iter().collect())
            }
        }

        deserializer.deserialize_map(CropTableVisitor)
    }
}

/// Everything known about one crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    pub description: String,
    pub growing_conditions: GrowingConditions,
    #[serde(default)]
    pub common_varieties: Vec<String>,
    #[serde(default)]
    pub diseases: Vec<DiseaseEntry>,
    #[serde(default)]
    pub pests: Vec<PestEntry>,
    pub fertilizer_recommendation: String,
    pub harvesting: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowingConditions {
    pub soil: String,
    pub rainfall: String,
    pub temperature: String,
    pub regions: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseEntry {
    pub name: String,
    pub symptoms: String,
    #[serde(default)]
    pub prevention: Vec<String>,
    #[serde(default)]
    pub treatment: Option<String>,
}

/// A pest entry. Only the name is rendered; other fields are carried through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PestEntry {
    pub name: String,
    #[serde(flatten)]
    pub details: BTreeMap<String, serde_json::Value>,
}
