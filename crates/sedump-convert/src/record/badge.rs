use super::{RecordError, RowAttributes};

/// A row of `Badges.xml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub date: String,
    pub class: i64,
    pub tag_based: bool,
}

impl Badge {
    pub const HEADERS: &'static [&'static str] =
        &["id", "user_id", "name", "date", "class", "tag_based"];

    pub fn from_attributes(attrs: &RowAttributes) -> Result<Self, RecordError> {
        Ok(Self {
            id: attrs.required("Id")?,
            user_id: attrs.required("UserId")?,
            name: attrs.text("Name"),
            date: attrs.text("Date"),
            class: attrs.required("Class")?,
            tag_based: attrs.required_flag("TagBased")?,
        })
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.user_id.to_string(),
            self.name.clone(),
            self.date.clone(),
            self.class.to_string(),
            self.tag_based.to_string(),
        ]
    }
}
