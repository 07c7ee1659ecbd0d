use super::{optional_field, RecordError, RowAttributes};

/// A row of `Tags.xml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub tag_name: String,
    pub count: i64,
    pub excerpt_post_id: Option<i64>,
    pub wiki_post_id: Option<i64>,
}

impl Tag {
    pub const HEADERS: &'static [&'static str] =
        &["id", "tag_name", "count", "excerpt_post_id", "wiki_post_id"];

    pub fn from_attributes(attrs: &RowAttributes) -> Result<Self, RecordError> {
        Ok(Self {
            id: attrs.required("Id")?,
            tag_name: attrs.text("TagName"),
            count: attrs.required("Count")?,
            excerpt_post_id: attrs.optional("ExcerptPostId")?,
            wiki_post_id: attrs.optional("WikiPostId")?,
        })
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.tag_name.clone(),
            self.count.to_string(),
            optional_field(self.excerpt_post_id),
            optional_field(self.wiki_post_id),
        ]
    }
}
