use super::{optional_field, RecordError, RowAttributes};

/// A row of `Votes.xml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub id: i64,
    pub post_id: i64,
    pub vote_type_id: i64,
    pub user_id: Option<i64>,
    pub creation_date: String,
    pub bounty_amount: Option<i64>,
}

impl Vote {
    pub const HEADERS: &'static [&'static str] = &[
        "id",
        "post_id",
        "vote_type_id",
        "user_id",
        "creation_date",
        "bounty_amount",
    ];

    pub fn from_attributes(attrs: &RowAttributes) -> Result<Self, RecordError> {
        Ok(Self {
            id: attrs.required("Id")?,
            post_id: attrs.required("PostId")?,
            vote_type_id: attrs.required("VoteTypeId")?,
            user_id: attrs.optional("UserId")?,
            creation_date: attrs.text("CreationDate"),
            bounty_amount: attrs.optional("BountyAmount")?,
        })
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.post_id.to_string(),
            self.vote_type_id.to_string(),
            optional_field(self.user_id),
            self.creation_date.clone(),
            optional_field(self.bounty_amount),
        ]
    }
}
