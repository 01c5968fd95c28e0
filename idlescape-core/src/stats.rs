//! Augmentation stat descriptions such as `"Strength:"`, `"Accuracy (Melee):"`
//! or `"Mining Skill:"`, split into a category and a stat label.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Category that files the stat under its first word instead.
pub const SKILLS_CATEGORY: &str = "Skills";

static AUG_STAT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-zA-Z]+)\s?(\(([a-zA-Z]+)\)|Skill)?:").expect("augmentation stat pattern compiles")
});

/// Category and stat label parsed out of a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatLabel<'a> {
    /// Grouping key in [`AugmentStats::stats`].
    pub category: &'a str,
    /// Label of the individual stat.
    pub stat: &'a str,
}

/// One augmentation bonus inside a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatValue {
    /// Stat label.
    pub stat: String,
    /// Bonus per augmentation level.
    pub value: f64,
}

/// Derived view over an item's `augmentationStats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AugmentStats {
    /// Whether the item is a champion scroll.
    pub is_scroll: bool,
    /// Stats grouped by category, categories in first-seen order.
    pub stats: indexmap::IndexMap<String, Vec<StatValue>>,
}

impl AugmentStats {
    /// Append a stat under `category`, creating the category on first use.
    pub fn push(&mut self, category: &str, stat: impl Into<String>, value: f64) {
        self.stats
            .entry(category.to_owned())
            .or_default()
            .push(StatValue {
                stat: stat.into(),
                value,
            });
    }

    /// Stats filed under `category`, if any.
    #[must_use]
    pub fn category(&self, category: &str) -> Option<&[StatValue]> {
        self.stats.get(category).map(Vec::as_slice)
    }
}

/// Parse a description against the augmentation stat pattern.
///
/// The first match anywhere in the string is used:
/// - `"Strength:"` → `Strength / Strength`
/// - `"Accuracy (Melee):"` → `Accuracy / Melee`
/// - `"Mining Skill:"` → `Mining / Mining`
///
/// A captured token of exactly `"Skills"` files the first word under
/// [`SKILLS_CATEGORY`]. The pattern itself only admits the singular
/// `Skill`, so in practice skill bonuses group under their own word.
///
/// Returns `None` if the description has no `<word>:` shape.
#[must_use]
pub fn parse_stat_description(description: &str) -> Option<StatLabel<'_>> {
    let caps = AUG_STAT_PATTERN.captures(description)?;
    let word = caps.get(1)?.as_str();
    let token = caps.get(2).map(|m| m.as_str());
    let inner = caps.get(3).map(|m| m.as_str());

    let label = match (token, inner) {
        (_, Some(inner)) => StatLabel {
            category: word,
            stat: inner,
        },
        (Some(SKILLS_CATEGORY), None) => StatLabel {
            category: SKILLS_CATEGORY,
            stat: word,
        },
        _ => StatLabel {
            category: word,
            stat: word,
        },
    };
    Some(label)
}

/// Strip the first `:` from a champion-scroll description.
#[must_use]
pub fn strip_colon(description: &str) -> String {
    description.replacen(':', "", 1)
}
