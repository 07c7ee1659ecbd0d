//! Common types used across sedump

use crate::error::{Result, SedumpError};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Dump Tables
// ============================================================================

/// A table of the data-exchange dump.
///
/// Each table ships as one XML file (`Tags.xml`, `Users.xml`, ...) whose
/// `row` elements all share the same attribute set.
///
/// # Examples
///
/// ```rust
/// use sedump_common::types::Entity;
/// use std::path::Path;
///
/// let entity = Entity::from_path(Path::new("/dumps/Tags.xml")).unwrap();
/// assert_eq!(entity, Entity::Tags);
/// assert_eq!(entity.table_name(), "tags");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Tags,
    Users,
    Badges,
    Votes,
    Comments,
}

impl Entity {
    /// Every supported table, in documentation order
    pub const ALL: [Entity; 5] = [
        Entity::Tags,
        Entity::Users,
        Entity::Badges,
        Entity::Votes,
        Entity::Comments,
    ];

    /// Lower-case table name, also the loader target for this table
    pub fn table_name(self) -> &'static str {
        match self {
            Entity::Tags => "tags",
            Entity::Users => "users",
            Entity::Badges => "badges",
            Entity::Votes => "votes",
            Entity::Comments => "comments",
        }
    }

    /// Detect the table from a dump file path.
    ///
    /// Only the file name is inspected and the match is case-insensitive,
    /// so `Tags.xml`, `tags.xml` and `TAGS.XML` all map to [`Entity::Tags`].
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .ok_or_else(|| SedumpError::UnsupportedInput(path.to_path_buf()))?;

        Entity::ALL
            .into_iter()
            .find(|entity| file_name == format!("{}.xml", entity.table_name()))
            .ok_or_else(|| SedumpError::UnsupportedInput(path.to_path_buf()))
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.table_name())
    }
}

impl std::str::FromStr for Entity {
    type Err = SedumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "tags" => Ok(Entity::Tags),
            "users" => Ok(Entity::Users),
            "badges" => Ok(Entity::Badges),
            "votes" => Ok(Entity::Votes),
            "comments" => Ok(Entity::Comments),
            _ => Err(SedumpError::Parse(format!("Unknown table: {}", s))),
        }
    }
}
