use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Stable identifier of a team member, as assigned by the team API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub u64);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One member record from `GET /api/team`.
///
/// Optional display fields treat an empty string the same as a missing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub id: MemberId,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub fun_fact: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub contributions: Vec<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// A way to reach a member. Only channels with a value are ever produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactChannel {
    LinkedIn(String),
    GitHub(String),
    Email(String),
}

impl ContactChannel {
    pub fn label(&self) -> &'static str {
        match self {
            ContactChannel::LinkedIn(_) => "LinkedIn",
            ContactChannel::GitHub(_) => "GitHub",
            ContactChannel::Email(_) => "Email",
        }
    }

    /// Link target for the channel; email becomes a `mailto:` URL.
    pub fn href(&self) -> String {
        match self {
            ContactChannel::LinkedIn(url) | ContactChannel::GitHub(url) => url.clone(),
            ContactChannel::Email(address) => format!("mailto:{address}"),
        }
    }
}

impl MemberRecord {
    /// "First Last", the name shown on cards, dialogs and the message form.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn role_label(&self) -> Option<&str> {
        non_empty(&self.role)
    }

    pub fn bio_text(&self) -> Option<&str> {
        non_empty(&self.bio)
    }

    pub fn fun_fact_text(&self) -> Option<&str> {
        non_empty(&self.fun_fact)
    }

    /// Present contact channels, in display order.
    pub fn contact_channels(&self) -> Vec<ContactChannel> {
        let mut channels = Vec::new();
        if let Some(url) = non_empty(&self.linkedin_url) {
            channels.push(ContactChannel::LinkedIn(url.to_string()));
        }
        if let Some(url) = non_empty(&self.github_url) {
            channels.push(ContactChannel::GitHub(url.to_string()));
        }
        if let Some(address) = non_empty(&self.email) {
            channels.push(ContactChannel::Email(address.to_string()));
        }
        channels
    }

    /// Resolve the profile image against the static asset base.
    pub fn image_ref(&self, asset_base: &str, placeholder: &str) -> String {
        let file = non_empty(&self.profile_image).unwrap_or(placeholder);
        format!("{asset_base}{file}")
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A fully populated member.
    pub fn member(id: u64, first: &str, last: &str) -> MemberRecord {
        MemberRecord {
            id: MemberId(id),
            first_name: first.to_string(),
            middle_name: None,
            last_name: last.to_string(),
            role: Some("Developer".to_string()),
            bio: Some(format!("{first} builds things.")),
            fun_fact: Some("Has kayaked every channel in the islands.".to_string()),
            contributions: vec!["Booking flow".to_string(), "Team page".to_string()],
            linkedin_url: Some(format!("https://linkedin.example/{first}")),
            github_url: Some(format!("https://github.example/{first}")),
            email: Some(format!("{first}@moffat.example").to_lowercase()),
            profile_image: Some(format!("{first}.png").to_lowercase()),
        }
    }

    /// A member with only the required fields.
    pub fn bare_member(id: u64, first: &str, last: &str) -> MemberRecord {
        MemberRecord {
            id: MemberId(id),
            first_name: first.to_string(),
            middle_name: None,
            last_name: last.to_string(),
            role: None,
            bio: None,
            fun_fact: None,
            contributions: Vec::new(),
            linkedin_url: None,
            github_url: None,
            email: None,
            profile_image: None,
        }
    }
}
