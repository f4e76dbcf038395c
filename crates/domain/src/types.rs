//! Common data types used throughout the application
//!
//! Wire names are camelCase to match the backend JSON contract.

use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Kind of a recorded GitHub activity event.
///
/// Wire values are `PULL_REQUEST`, `COMMIT` and `ISSUE`; anything else
/// deserializes to [`ContributionKind::Unknown`] so that an unrecognized
/// event never fails a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributionKind {
    PullRequest,
    Commit,
    Issue,
    /// Event kind the client does not recognize. Counted in totals only.
    Unknown,
}

impl ContributionKind {
    /// Wire representation of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PullRequest => "PULL_REQUEST",
            Self::Commit => "COMMIT",
            Self::Issue => "ISSUE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl Serialize for ContributionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ContributionKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "PULL_REQUEST" => Self::PullRequest,
            "COMMIT" => Self::Commit,
            "ISSUE" => Self::Issue,
            _ => Self::Unknown,
        })
    }
}

/// A single recorded GitHub activity event tied to a repository and a
/// calendar day.
///
/// Contributions carry no identity field; de-duplication is neither
/// guaranteed nor attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    /// Calendar day of the event (`YYYY-MM-DD` on the wire).
    pub day: NaiveDate,
    #[serde(rename = "type")]
    pub kind: ContributionKind,
    pub repository_url: String,
    /// Link to the commit, pull request or issue.
    pub reference: String,
}

/// One entry of a project's free-form additional information.
///
/// The backend models this as a string map; the client keeps an ordered list
/// with a stable local id so that edit forms can address entries while keys
/// are being renamed. The id never leaves the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoField {
    /// Client-local identity, assigned on construction or deserialization.
    pub id: Uuid,
    pub key: String,
    pub value: String,
}

impl InfoField {
    /// Create a field with a fresh local id.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), key: key.into(), value: value.into() }
    }
}

/// Serde adapter converting between the wire string map and the ordered
/// [`InfoField`] list at the persistence boundary.
pub mod info_map {
    use super::{InfoField, MapAccess, SerializeMap, Visitor};
    use serde::{Deserializer, Serializer};

    /// Serialize fields as a JSON object in list order.
    pub fn serialize<S: Serializer>(fields: &[InfoField], serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for field in fields {
            map.serialize_entry(&field.key, &field.value)?;
        }
        map.end()
    }

    /// Deserialize a JSON object into fields, preserving document order.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<InfoField>, D::Error> {
        struct FieldVisitor;

        impl<'de> Visitor<'de> for FieldVisitor {
            type Value = Vec<InfoField>;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of string keys to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut fields = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    fields.push(InfoField::new(key, value));
                }
                Ok(fields)
            }
        }

        deserializer.deserialize_map(FieldVisitor)
    }

    /// Like [`serialize`], for optional field lists on partial updates.
    pub fn serialize_opt<S: Serializer>(
        fields: &Option<Vec<InfoField>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match fields {
            Some(fields) => serialize(fields, serializer),
            None => serializer.serialize_none(),
        }
    }
}

/// A user-defined grouping entity linking repositories and the contributions
/// found in them.
///
/// `uuid` is server-assigned and stable; the client never invents one.
/// `index` defines display order: unique in practice, gaps tolerated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub uuid: Uuid,
    pub name: String,
    /// Legacy single-language description, kept for backward compatibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_de: Option<String>,
    pub index: u32,
    #[serde(default)]
    pub is_visible: bool,
    #[serde(default, with = "info_map")]
    pub additional_information: Vec<InfoField>,
    #[serde(default)]
    pub repositories: Vec<String>,
    #[serde(default)]
    pub contributions: Vec<Contribution>,
}

/// Creation payload for `POST /projects`.
///
/// Deliberately has no uuid: the server assigns identity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_de: Option<String>,
    #[serde(with = "info_map")]
    pub additional_information: Vec<InfoField>,
    pub repositories: Vec<String>,
    pub index: u32,
}

/// Partial update payload for `PUT /projects/{uuid}`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_de: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "info_map::serialize_opt"
    )]
    pub additional_information: Option<Vec<InfoField>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repositories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

impl Project {
    /// Apply a partial update in place, field by field.
    pub fn apply_update(&mut self, update: &ProjectUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(description) = &update.description {
            self.description = Some(description.clone());
        }
        if let Some(description_en) = &update.description_en {
            self.description_en = Some(description_en.clone());
        }
        if let Some(description_de) = &update.description_de {
            self.description_de = Some(description_de.clone());
        }
        if let Some(additional_information) = &update.additional_information {
            self.additional_information = additional_information.clone();
        }
        if let Some(repositories) = &update.repositories {
            self.repositories = repositories.clone();
        }
        if let Some(index) = update.index {
            self.index = index;
        }
        if let Some(is_visible) = update.is_visible {
            self.is_visible = is_visible;
        }
    }
}

// ============================================================================
// Authentication payloads
// ============================================================================

/// Login request body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Response body of a successful login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub username: String,
    /// Session lifetime in seconds.
    pub expires_in: u64,
}

/// Response body of `GET /auth/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    pub username: Option<String>,
}

/// Authenticated admin user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
}
