//! Typed dump records and their CSV rendering
//!
//! One variant per dump table. Each variant is decoded from the attributes
//! of a `row` element and renders itself as an ordered list of text fields
//! whose order matches [`headers`] for its table.
//!
//! Rendering rules shared by all tables:
//! - absent optional integers render as an empty field, never a sentinel
//! - booleans render as `true`/`false`
//! - dates and free text pass through untouched (CSV quoting is the
//!   writer's job); only comment text gets [`escape_copy_terminator`]

mod attributes;
mod badge;
mod comment;
mod tag;
mod user;
mod vote;

pub use attributes::RowAttributes;
pub use badge::Badge;
pub use comment::{escape_copy_terminator, Comment};
pub use tag::Tag;
pub use user::User;
pub use vote::Vote;

use sedump_common::types::Entity;
use thiserror::Error;

/// Why a single `row` element could not become a record
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("missing required attribute `{0}`")]
    MissingAttribute(&'static str),

    #[error("invalid value for `{name}`: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("invalid attribute value: {0}")]
    Escape(#[from] quick_xml::Error),
}

/// A decoded row of any supported table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Tag(Tag),
    User(User),
    Badge(Badge),
    Vote(Vote),
    Comment(Comment),
}

impl Record {
    /// Map `row` attributes onto the record shape of `entity`
    pub fn from_attributes(entity: Entity, attrs: &RowAttributes) -> Result<Self, RecordError> {
        Ok(match entity {
            Entity::Tags => Record::Tag(Tag::from_attributes(attrs)?),
            Entity::Users => Record::User(User::from_attributes(attrs)?),
            Entity::Badges => Record::Badge(Badge::from_attributes(attrs)?),
            Entity::Votes => Record::Vote(Vote::from_attributes(attrs)?),
            Entity::Comments => Record::Comment(Comment::from_attributes(attrs)?),
        })
    }

    pub fn entity(&self) -> Entity {
        match self {
            Record::Tag(_) => Entity::Tags,
            Record::User(_) => Entity::Users,
            Record::Badge(_) => Entity::Badges,
            Record::Vote(_) => Entity::Votes,
            Record::Comment(_) => Entity::Comments,
        }
    }

    /// Render as CSV fields, in [`headers`] order
    pub fn to_row(&self) -> Vec<String> {
        match self {
            Record::Tag(tag) => tag.to_row(),
            Record::User(user) => user.to_row(),
            Record::Badge(badge) => badge.to_row(),
            Record::Vote(vote) => vote.to_row(),
            Record::Comment(comment) => comment.to_row(),
        }
    }
}

/// Header row (snake_case column names) for a table
pub fn headers(entity: Entity) -> &'static [&'static str] {
    match entity {
        Entity::Tags => Tag::HEADERS,
        Entity::Users => User::HEADERS,
        Entity::Badges => Badge::HEADERS,
        Entity::Votes => Vote::HEADERS,
        Entity::Comments => Comment::HEADERS,
    }
}

fn optional_field<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
