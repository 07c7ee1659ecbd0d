use super::{optional_field, RecordError, RowAttributes};

/// A row of `Comments.xml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub score: i64,
    pub text: String,
    pub creation_date: String,
    pub user_display_name: String,
    pub user_id: Option<i64>,
    pub content_license: String,
}

impl Comment {
    pub const HEADERS: &'static [&'static str] = &[
        "id",
        "post_id",
        "score",
        "text",
        "creation_date",
        "user_display_name",
        "user_id",
        "content_license",
    ];

    pub fn from_attributes(attrs: &RowAttributes) -> Result<Self, RecordError> {
        Ok(Self {
            id: attrs.required("Id")?,
            post_id: attrs.required("PostId")?,
            score: attrs.required("Score")?,
            text: attrs.text("Text"),
            creation_date: attrs.text("CreationDate"),
            user_display_name: attrs.text("UserDisplayName"),
            user_id: attrs.optional("UserId")?,
            content_license: attrs.text("ContentLicense"),
        })
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.post_id.to_string(),
            self.score.to_string(),
            escape_copy_terminator(&self.text),
            self.creation_date.clone(),
            self.user_display_name.clone(),
            optional_field(self.user_id),
            self.content_license.clone(),
        ]
    }
}

/// Rewrite every `\.` as `\\.`
///
/// A line consisting of `\.` ends the data section of a PostgreSQL
/// `COPY ... FROM STDIN`, so comment text must never contain it verbatim.
/// The rewrite is not idempotent: applying it to already escaped text
/// escapes the backslash again (`\\.` becomes `\\\.`).
pub fn escape_copy_terminator(text: &str) -> String {
    text.replace(r"\.", r"\\.")
}
