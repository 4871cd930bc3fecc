//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::form::{Field, FormController};
use crate::record::RecordId;

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Print passwords instead of masking them
    #[arg(long)]
    pub show_passwords: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Id of the record to show
    pub id: RecordId,

    /// Print the password instead of masking it
    #[arg(long)]
    pub show_passwords: bool,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// First name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Last name
    #[arg(long, default_value = "")]
    pub last_name: String,

    /// Email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// Password
    #[arg(long, default_value = "")]
    pub password: String,
}

impl AddCommand {
    /// Fill an empty form with the given values.
    pub fn apply(&self, form: &mut FormController) {
        form.set(Field::Name, self.name.as_str());
        form.set(Field::LastName, self.last_name.as_str());
        form.set(Field::Email, self.email.as_str());
        form.set(Field::Password, self.password.as_str());
    }
}

/// Edit command arguments.
///
/// Fields that are not given keep their stored value.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Id of the record to edit
    pub id: RecordId,

    /// New first name
    #[arg(long)]
    pub name: Option<String>,

    /// New last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// New email address
    #[arg(long)]
    pub email: Option<String>,

    /// New password
    #[arg(long)]
    pub password: Option<String>,
}

impl EditCommand {
    /// Overwrite the form fields that were given on the command line.
    pub fn apply(&self, form: &mut FormController) {
        let updates = [
            (Field::Name, &self.name),
            (Field::LastName, &self.last_name),
            (Field::Email, &self.email),
            (Field::Password, &self.password),
        ];
        for (field, value) in updates {
            if let Some(value) = value {
                form.set(field, value.as_str());
            }
        }
    }
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Id of the record to delete
    pub id: RecordId,

    /// Skip confirmation prompt
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

/// Output format for listing records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One labelled block per record
    #[default]
    Plain,
    /// Aligned table
    Table,
    /// JSON array
    Json,
}
