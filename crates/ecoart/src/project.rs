//! Core project types for ecoart.
//!
//! This module defines the records held by the catalog, the editable draft
//! submitted by the add/edit forms, and the category labels used to filter
//! them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The fixed set of category labels shown as filter buttons.
///
/// Records store their category as free text, so a record may carry a label
/// outside this set; it simply never matches one of these filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Portrait work (the form default).
    #[default]
    Portraits,
    /// Pieces made together with a community.
    Community,
    /// Large walk-through or site installations.
    Installations,
    /// Projects still collecting materials.
    Upcoming,
}

impl Category {
    /// Every known category, in filter-button order.
    pub const ALL: [Self; 4] = [
        Self::Portraits,
        Self::Community,
        Self::Installations,
        Self::Upcoming,
    ];

    /// The label stored in project records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Portraits => "portraits",
            Self::Community => "community",
            Self::Installations => "installations",
            Self::Upcoming => "upcoming",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// Selects which records a listing shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every record (the `"all"` button).
    #[default]
    All,
    /// Only records whose category equals this label exactly.
    Only(String),
}

impl CategoryFilter {
    /// Sentinel text that selects every record.
    pub const ALL_SENTINEL: &'static str = "all";

    /// Check whether a record passes this filter.
    #[must_use]
    pub fn matches(&self, record: &ProjectRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => record.category == *category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        Self::Only(category.as_str().to_string())
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(Self::ALL_SENTINEL) {
            Ok(Self::All)
        } else {
            Ok(Self::Only(s.to_string()))
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL_SENTINEL),
            Self::Only(category) => f.write_str(category),
        }
    }
}

/// One project entry in the catalog.
///
/// The serialized form is the persisted slot layout: field names match the
/// stored JSON exactly and absent optional fields are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Unique within the collection; assigned by the catalog.
    pub id: u64,
    /// Project title.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Materials used, e.g. `"6,732 bottle tops"`.
    #[serde(default)]
    pub materials: String,
    /// Who took part, e.g. `"50+ children"`.
    #[serde(default)]
    pub participants: String,
    /// Year as free text.
    #[serde(default)]
    pub year: String,
    /// Category label, normally one of [`Category::ALL`].
    #[serde(default)]
    pub category: String,
    /// Image file name or URL.
    #[serde(default)]
    pub image: String,
    /// Longer story text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Where the piece is shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Physical size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
}

impl ProjectRecord {
    /// Build a record from a draft and an assigned id.
    #[must_use]
    pub fn from_draft(id: u64, draft: ProjectDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            materials: draft.materials,
            participants: draft.participants,
            year: draft.year,
            category: draft.category,
            image: draft.image,
            details: draft.details,
            location: draft.location,
            dimensions: draft.dimensions,
        }
    }

    /// The editable fields of this record.
    #[must_use]
    pub fn to_draft(&self) -> ProjectDraft {
        ProjectDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            materials: self.materials.clone(),
            participants: self.participants.clone(),
            year: self.year.clone(),
            category: self.category.clone(),
            image: self.image.clone(),
            details: self.details.clone(),
            location: self.location.clone(),
            dimensions: self.dimensions.clone(),
        }
    }

    /// The known category of this record, if its label is one.
    #[must_use]
    pub fn known_category(&self) -> Option<Category> {
        self.category.parse().ok()
    }
}

/// The add/edit form: every record field except the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDraft {
    /// Project title (required).
    pub title: String,
    /// Short description (required).
    pub description: String,
    /// Materials used.
    pub materials: String,
    /// Who took part.
    pub participants: String,
    /// Year as free text.
    pub year: String,
    /// Category label.
    pub category: String,
    /// Image file name or URL.
    pub image: String,
    /// Longer story text.
    pub details: Option<String>,
    /// Where the piece is shown.
    pub location: Option<String>,
    /// Physical size.
    pub dimensions: Option<String>,
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            materials: String::new(),
            participants: String::new(),
            year: String::new(),
            category: Category::default().as_str().to_string(),
            image: String::new(),
            details: None,
            location: None,
            dimensions: None,
        }
    }
}

impl ProjectDraft {
    /// Create a draft with the two required fields and form defaults.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Set the category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the materials text.
    #[must_use]
    pub fn with_materials(mut self, materials: impl Into<String>) -> Self {
        self.materials = materials.into();
        self
    }

    /// Set the participants text.
    #[must_use]
    pub fn with_participants(mut self, participants: impl Into<String>) -> Self {
        self.participants = participants.into();
        self
    }

    /// Reject drafts the form would not submit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the title or description is empty or
    /// only whitespace.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation { field: "title" });
        }
        if self.description.trim().is_empty() {
            return Err(Error::Validation {
                field: "description",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ProjectRecord {
        ProjectRecord::from_draft(
            7,
            ProjectDraft::new("Denim Legends", "Portraits using recycled jeans")
                .with_materials("400 denim pieces"),
        )
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Portraits.to_string(), "portraits");
        assert_eq!(Category::Community.to_string(), "community");
        assert_eq!(Category::Installations.to_string(), "installations");
        assert_eq!(Category::Upcoming.to_string(), "upcoming");
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("upcoming".parse::<Category>(), Ok(Category::Upcoming));
        assert_eq!(" Community ".parse::<Category>(), Ok(Category::Community));
        assert!("sculpture".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_default_is_portraits() {
        assert_eq!(Category::default(), Category::Portraits);
        assert_eq!(ProjectDraft::default().category, "portraits");
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("ALL".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "upcoming".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only("upcoming".to_string())
        );
    }

    #[test]
    fn test_filter_matches() {
        let record = sample_record();
        assert!(CategoryFilter::All.matches(&record));
        assert!(CategoryFilter::from(Category::Portraits).matches(&record));
        assert!(!CategoryFilter::from(Category::Upcoming).matches(&record));
    }

    #[test]
    fn test_draft_round_trip_through_record() {
        let draft = ProjectDraft::new("Title", "Description").with_category("community");
        let record = ProjectRecord::from_draft(3, draft.clone());
        assert_eq!(record.id, 3);
        assert_eq!(record.to_draft(), draft);
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let err = ProjectDraft::new("", "desc").validate().unwrap_err();
        assert!(matches!(err, Error::Validation { field: "title" }));

        let err = ProjectDraft::new("title", "   ").validate().unwrap_err();
        assert!(matches!(err, Error::Validation { field: "description" }));

        assert!(ProjectDraft::new("title", "desc").validate().is_ok());
    }

    #[test]
    fn test_record_omits_absent_optional_fields() {
        let json = serde_json::to_string(&sample_record()).unwrap();
        assert!(json.contains("\"materials\":\"400 denim pieces\""));
        assert!(!json.contains("details"));
        assert!(!json.contains("location"));
    }

    #[test]
    fn test_record_tolerates_missing_and_unknown_fields() {
        let json = r#"{"id": 2, "title": "T", "description": "D", "stats": "old field"}"#;
        let record: ProjectRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 2);
        assert!(record.materials.is_empty());
        assert!(record.details.is_none());
    }

    #[test]
    fn test_known_category() {
        let mut record = sample_record();
        assert_eq!(record.known_category(), Some(Category::Portraits));
        record.category = "sculpture".to_string();
        assert_eq!(record.known_category(), None);
    }
}
