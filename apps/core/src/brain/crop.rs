//! The fixed set of crops the assistant specializes in.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Crop {
    Maize,
    Rice,
    Yam,
    Cassava,
    Cocoa,
}

impl Crop {
    /// Declaration order. Crop matching walks this list, not the input text.
    pub const ALL: [Crop; 5] = [Crop::Maize, Crop::Rice, Crop::Yam, Crop::Cassava, Crop::Cocoa];

    /// Identifier used both as the match keyword and as the knowledge base key.
    pub fn id(&self) -> &'static str {
        match self {
            Crop::Maize => "maize",
            Crop::Rice => "rice",
            Crop::Yam => "yam",
            Crop::Cassava => "cassava",
            Crop::Cocoa => "cocoa",
        }
    }

    pub fn from_id(id: &str) -> Option<Crop> {
        Crop::ALL.into_iter().find(|crop| crop.id() == id)
    }

    /// Field-ready signs that the crop is mature, shown with harvest advice.
    pub fn harvest_indicators(&self) -> &'static [&'static str] {
        match self {
            Crop::Maize => &[
                "Kernels hard and glossy",
                "Moisture content 20-25%",
                "Black layer formation at kernel base",
            ],
            Crop::Rice => &[
                "80-85% of panicles turn yellow",
                "Grains firm when pressed",
                "Moisture content around 20%",
            ],
            Crop::Yam => &[
                "Vines begin to dry and yellow",
                "Tubers reach mature size",
                "8-10 months after planting",
            ],
            Crop::Cassava => &[
                "Leaves yellowing and dropping",
                "Roots reach desired size",
                "8-18 months depending on variety",
            ],
            Crop::Cocoa => &[
                "Pod color changes (yellow/orange for ripe)",
                "Main crop: Oct-Jan, Light crop: Jun-Aug",
                "Harvest every 2-4 weeks",
            ],
        }
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Upper-cases the first character, leaving the rest untouched.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
