//! Impact statistics derived from the catalog.
//!
//! Quantities live in free text (`"🥤 6,732 bottle tops"`), so each record
//! contributes the first integer found in a field. A record's `materials`
//! number is attributed to exactly one material counter, chosen by keyword,
//! so a denim project never inflates the bottle-cap total or vice versa.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::project::{Category, ProjectRecord};

/// Summary counters shown in the impact callout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ImpactStats {
    /// Number of records in the catalog.
    pub total_projects: u64,
    /// Bottle caps and bottle tops transformed.
    pub bottle_caps: u64,
    /// Denim pieces and jeans given new life.
    pub denim_pieces: u64,
    /// People who took part.
    pub participants: u64,
    /// Records whose category is `upcoming`.
    pub upcoming_projects: u64,
}

/// The counter a record's materials number feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    /// Bottle caps, crown caps and bottle tops.
    BottleCaps,
    /// Denim and jeans.
    Denim,
    /// Anything without a dedicated counter.
    Other,
}

fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9][0-9,]*").expect("valid number pattern"))
}

fn denim_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(denim|jeans?)\b").expect("valid denim pattern"))
}

fn caps_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(bottles?|caps?|tops?)\b").expect("valid caps pattern"))
}

/// Extract the first integer embedded in `text`, ignoring thousands
/// separators.
///
/// ```
/// use ecoart::catalog::stats::first_number;
///
/// assert_eq!(first_number("🥤 6,732 bottle tops"), Some(6732));
/// assert_eq!(first_number("👤 Solo artist"), None);
/// ```
#[must_use]
pub fn first_number(text: &str) -> Option<u64> {
    let found = number_regex().find(text)?;
    found.as_str().replace(',', "").parse().ok()
}

/// Classify a materials description.
#[must_use]
pub fn classify_materials(materials: &str) -> MaterialKind {
    if denim_regex().is_match(materials) {
        MaterialKind::Denim
    } else if caps_regex().is_match(materials) {
        MaterialKind::BottleCaps
    } else {
        MaterialKind::Other
    }
}

/// Derive impact statistics from a set of records.
pub fn aggregate<'a>(records: impl IntoIterator<Item = &'a ProjectRecord>) -> ImpactStats {
    let upcoming = Category::Upcoming.as_str();

    records
        .into_iter()
        .fold(ImpactStats::default(), |mut stats, record| {
            stats.total_projects += 1;

            if let Some(quantity) = first_number(&record.materials) {
                match classify_materials(&record.materials) {
                    MaterialKind::BottleCaps => {
                        stats.bottle_caps = stats.bottle_caps.saturating_add(quantity);
                    }
                    MaterialKind::Denim => {
                        stats.denim_pieces = stats.denim_pieces.saturating_add(quantity);
                    }
                    MaterialKind::Other => {}
                }
            }

            if let Some(people) = first_number(&record.participants) {
                stats.participants = stats.participants.saturating_add(people);
            }

            if record.category == upcoming {
                stats.upcoming_projects += 1;
            }

            stats
        })
}
