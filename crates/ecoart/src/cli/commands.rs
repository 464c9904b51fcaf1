//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::project::{CategoryFilter, ProjectDraft};

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only show projects in this category ("all" shows everything)
    #[arg(short = 'C', long, default_value = "all")]
    pub category: CategoryFilter,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Project id
    pub id: u64,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Project title
    #[arg(long)]
    pub title: String,

    /// Short description
    #[arg(long)]
    pub description: String,

    /// Remaining project fields
    #[command(flatten)]
    pub fields: ProjectFields,
}

/// Edit command arguments.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Project id
    pub id: u64,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// Remaining project fields
    #[command(flatten)]
    pub fields: ProjectFields,
}

/// Optional project fields shared by `add` and `edit`.
#[derive(Debug, Default, Args)]
pub struct ProjectFields {
    /// Materials used (e.g. "6,732 bottle tops")
    #[arg(long)]
    pub materials: Option<String>,

    /// Who took part (e.g. "50+ children")
    #[arg(long)]
    pub participants: Option<String>,

    /// Year
    #[arg(long)]
    pub year: Option<String>,

    /// Category label
    #[arg(long)]
    pub category: Option<String>,

    /// Image file name or URL
    #[arg(long)]
    pub image: Option<String>,

    /// Longer story text
    #[arg(long)]
    pub details: Option<String>,

    /// Where the piece is shown
    #[arg(long)]
    pub location: Option<String>,

    /// Physical size
    #[arg(long)]
    pub dimensions: Option<String>,
}

impl ProjectFields {
    /// Overlay the fields that were given onto `draft`.
    ///
    /// An empty string clears an optional field.
    pub fn apply(self, draft: &mut ProjectDraft) {
        let overlay = |target: &mut String, value: Option<String>| {
            if let Some(value) = value {
                *target = value;
            }
        };
        overlay(&mut draft.materials, self.materials);
        overlay(&mut draft.participants, self.participants);
        overlay(&mut draft.year, self.year);
        overlay(&mut draft.category, self.category);
        overlay(&mut draft.image, self.image);

        let overlay_optional = |target: &mut Option<String>, value: Option<String>| {
            if let Some(value) = value {
                *target = if value.is_empty() { None } else { Some(value) };
            }
        };
        overlay_optional(&mut draft.details, self.details);
        overlay_optional(&mut draft.location, self.location);
        overlay_optional(&mut draft.dimensions, self.dimensions);
    }
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Project id
    pub id: u64,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Reset command arguments.
#[derive(Debug, Args)]
pub struct ResetCommand {
    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_fields_apply_overlays_only_given_values() {
        let mut draft = ProjectDraft::new("Title", "Desc").with_materials("400 jeans");
        draft.location = Some("Nairobi".to_string());

        ProjectFields {
            year: Some("2025".to_string()),
            category: Some("upcoming".to_string()),
            ..ProjectFields::default()
        }
        .apply(&mut draft);

        assert_eq!(draft.year, "2025");
        assert_eq!(draft.category, "upcoming");
        assert_eq!(draft.materials, "400 jeans");
        assert_eq!(draft.location.as_deref(), Some("Nairobi"));
    }

    #[test]
    fn test_fields_apply_empty_clears_optional() {
        let mut draft = ProjectDraft::new("Title", "Desc");
        draft.details = Some("story".to_string());

        ProjectFields {
            details: Some(String::new()),
            dimensions: Some("2m x 1m".to_string()),
            ..ProjectFields::default()
        }
        .apply(&mut draft);

        assert!(draft.details.is_none());
        assert_eq!(draft.dimensions.as_deref(), Some("2m x 1m"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        assert!(format!("{cmd:?}").contains("Show"));
    }
}
