//! OpenStreetMap tag rules for safe-spot discovery.
//!
//! One ordered table drives both the facility query and the classifier, so a
//! feature is only ever fetched for a type it can be classified as.

use crate::models::SafeSpotType;
use crate::traits::RawFeature;

/// A set of `key=value` tag matches that identify one destination type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagRule {
    pub kind: SafeSpotType,
    pub matches: &'static [(&'static str, &'static str)],
}

impl TagRule {
    /// True if any of the rule's tag pairs is present on the feature.
    pub fn matches(&self, feature: &RawFeature) -> bool {
        self.matches
            .iter()
            .any(|(key, value)| feature.tag(key) == Some(*value))
    }
}

/// Classification rules, evaluated top to bottom.
pub const FACILITY_RULES: &[TagRule] = &[
    TagRule {
        kind: SafeSpotType::Hospital,
        matches: &[
            ("amenity", "hospital"),
            ("amenity", "clinic"),
            ("healthcare", "hospital"),
            ("healthcare", "clinic"),
        ],
    },
    TagRule {
        kind: SafeSpotType::Shelter,
        matches: &[
            ("amenity", "shelter"),
            ("emergency", "shelter"),
            ("social_facility", "shelter"),
        ],
    },
    TagRule {
        kind: SafeSpotType::School,
        matches: &[("amenity", "school")],
    },
    TagRule {
        kind: SafeSpotType::Airport,
        matches: &[("aeroway", "aerodrome")],
    },
    TagRule {
        kind: SafeSpotType::Park,
        matches: &[("leisure", "park"), ("leisure", "nature_reserve")],
    },
];

/// Classify a feature by the first matching rule.
///
/// Features no rule matches fall back to the type of the query branch that
/// selected them; features with neither are unclassifiable.
pub fn classify(feature: &RawFeature, rules: &[TagRule]) -> Option<SafeSpotType> {
    rules
        .iter()
        .find(|rule| rule.matches(feature))
        .map(|rule| rule.kind)
        .or(feature.category)
}
