//! The default project set seeded into an empty catalog.

use crate::project::{Category, ProjectRecord};

#[allow(clippy::too_many_arguments)]
fn record(
    id: u64,
    title: &str,
    description: &str,
    materials: &str,
    participants: &str,
    year: &str,
    category: Category,
    image: &str,
) -> ProjectRecord {
    ProjectRecord {
        id,
        title: title.to_string(),
        description: description.to_string(),
        materials: materials.to_string(),
        participants: participants.to_string(),
        year: year.to_string(),
        category: category.as_str().to_string(),
        image: image.to_string(),
        details: None,
        location: None,
        dimensions: None,
    }
}

/// The five records a fresh (or unreadable) catalog starts with.
#[must_use]
pub fn default_projects() -> Vec<ProjectRecord> {
    vec![
        ProjectRecord {
            details: Some("Created over 3 months using discarded jeans...".to_string()),
            location: Some("Nairobi National Museum".to_string()),
            dimensions: Some("3m x 2m".to_string()),
            ..record(
                1,
                "Denim Legends",
                "Portraits using 400 recycled jeans",
                "👖 400 denim pieces",
                "👤 Solo artist",
                "2023",
                Category::Portraits,
                "denim-legends.jpg",
            )
        },
        ProjectRecord {
            details: Some("Collaborative project with children from Kibera...".to_string()),
            location: Some("Kibera Community Center".to_string()),
            dimensions: Some("2.5m x 1.8m".to_string()),
            ..record(
                2,
                "Bottle Top Mandela",
                "Community-created portrait",
                "🥤 6,732 bottle tops",
                "🧒 50+ children",
                "2024",
                Category::Community,
                "thunguma-mandela.jpg",
            )
        },
        ProjectRecord {
            details: Some(
                "Timber scraps salvaged with local carpenters; the portrait shifts \
                 expression as the light changes through the day."
                    .to_string(),
            ),
            ..record(
                3,
                "Wangari's Shadow",
                "Light and shadow portrait of Wangari Maathai from timber offcuts",
                "🌳 Furniture manufacturing offcuts",
                "🪚 Carpenters from Kijabe Street",
                "2024",
                Category::Installations,
                "wangari-shadow.jpg",
            )
        },
        ProjectRecord {
            details: Some(
                "Collecting caps from 30+ establishments across Nairobi, with \
                 metalworking workshops for volunteers."
                    .to_string(),
            ),
            dimensions: Some("20sqm (projected)".to_string()),
            ..record(
                4,
                "Crown Caps Collective",
                "Large-scale community mural from metal bottle caps",
                "🔩 10,000+ metal bottle caps",
                "👥 50+ community volunteers",
                "2025",
                Category::Upcoming,
                "crown-caps.jpg",
            )
        },
        ProjectRecord {
            location: Some("Nairobi Expressway".to_string()),
            dimensions: Some("1km span".to_string()),
            ..record(
                5,
                "ArtCycle Nairobi Expressway",
                "Urban art transformation initiative",
                "♻️ 1,000,000+ bottle tops",
                "🧑 500+ youths",
                "2025",
                Category::Upcoming,
                "artcycle-expressway.jpg",
            )
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_five_defaults_with_sequential_ids() {
        let ids: Vec<u64> = default_projects().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_defaults_are_valid_drafts() {
        for project in default_projects() {
            assert!(project.to_draft().validate().is_ok(), "{}", project.title);
        }
    }

    #[test]
    fn test_defaults_use_known_categories() {
        let categories: HashSet<_> = default_projects()
            .iter()
            .filter_map(ProjectRecord::known_category)
            .collect();
        assert_eq!(categories.len(), Category::ALL.len());
    }
}
