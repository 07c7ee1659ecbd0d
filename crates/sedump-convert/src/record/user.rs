use super::{optional_field, RecordError, RowAttributes};

/// A row of `Users.xml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub reputation: i64,
    pub creation_date: String,
    pub display_name: String,
    pub last_access_date: String,
    pub website_url: String,
    pub location: String,
    pub about_me: String,
    pub views: i64,
    pub up_votes: i64,
    pub down_votes: i64,
    pub profile_image_url: String,
    pub account_id: Option<i64>,
}

impl User {
    pub const HEADERS: &'static [&'static str] = &[
        "id",
        "reputation",
        "creation_date",
        "display_name",
        "last_access_date",
        "website_url",
        "location",
        "about_me",
        "views",
        "up_votes",
        "down_votes",
        "profile_image_url",
        "account_id",
    ];

    pub fn from_attributes(attrs: &RowAttributes) -> Result<Self, RecordError> {
        Ok(Self {
            id: attrs.required("Id")?,
            reputation: attrs.required("Reputation")?,
            creation_date: attrs.text("CreationDate"),
            display_name: attrs.text("DisplayName"),
            last_access_date: attrs.text("LastAccessDate"),
            website_url: attrs.text("WebsiteUrl"),
            location: attrs.text("Location"),
            about_me: attrs.text("AboutMe"),
            views: attrs.required("Views")?,
            up_votes: attrs.required("UpVotes")?,
            down_votes: attrs.required("DownVotes")?,
            profile_image_url: attrs.text("ProfileImageUrl"),
            account_id: attrs.optional("AccountId")?,
        })
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.reputation.to_string(),
            self.creation_date.clone(),
            self.display_name.clone(),
            self.last_access_date.clone(),
            self.website_url.clone(),
            self.location.clone(),
            self.about_me.clone(),
            self.views.to_string(),
            self.up_votes.to_string(),
            self.down_votes.to_string(),
            self.profile_image_url.clone(),
            optional_field(self.account_id),
        ]
    }
}
