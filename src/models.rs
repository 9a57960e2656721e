//! Entity and request payload types.
//!
//! Wire format is camelCase JSON. `User` and `Thought` carry derived counts
//! (`friendCount`, `reactionCount`) that are computed at serialization time,
//! so `Serialize` is written by hand; stored documents therefore include the
//! counts too, and deserialization simply ignores them.

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde::Deserialize;

use crate::errors::{ValidationError, ValidationIssue, ValidationResult};
use crate::repo::Entity;
use crate::validators::is_valid_email;

/// Upper bound for thought and reaction body length, in characters.
pub const BODY_MAX_CHARS: usize = 280;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    /// Identifiers of thoughts authored by this user.
    #[serde(default)]
    pub thoughts: Vec<String>,
    /// Friend user identifiers; set semantics, not auto-mirrored.
    #[serde(default)]
    pub friends: Vec<String>,
}

impl User {
    pub fn friend_count(&self) -> usize {
        self.friends.len()
    }
}

impl Serialize for User {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("User", 6)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("username", &self.username)?;
        state.serialize_field("email", &self.email)?;
        state.serialize_field("thoughts", &self.thoughts)?;
        state.serialize_field("friends", &self.friends)?;
        state.serialize_field("friendCount", &self.friend_count())?;
        state.end()
    }
}

impl Entity for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thought {
    pub id: String,
    pub thought_text: String,
    /// Denormalized author username; there is no direct user reference.
    pub username: String,
    pub created_at: DateTime<Utc>,
    /// Embedded reaction subdocuments, owned exclusively by the thought.
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

impl Thought {
    pub fn reaction_count(&self) -> usize {
        self.reactions.len()
    }
}

impl Serialize for Thought {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Thought", 6)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("thoughtText", &self.thought_text)?;
        state.serialize_field("username", &self.username)?;
        state.serialize_field("createdAt", &self.created_at)?;
        state.serialize_field("reactions", &self.reactions)?;
        state.serialize_field("reactionCount", &self.reaction_count())?;
        state.end()
    }
}

impl Entity for Thought {
    const COLLECTION: &'static str = "thoughts";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, serde::Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub reaction_id: String,
    pub reaction_body: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// `GET /api/users/{userId}` detail document: reference lists resolved to
/// full documents.
#[derive(Debug, Clone)]
pub struct UserDetail {
    pub id: String,
    pub username: String,
    pub email: String,
    pub thoughts: Vec<Thought>,
    pub friends: Vec<User>,
}

impl UserDetail {
    pub fn new(user: User, thoughts: Vec<Thought>, friends: Vec<User>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            thoughts,
            friends,
        }
    }

    pub fn friend_count(&self) -> usize {
        self.friends.len()
    }
}

impl Serialize for UserDetail {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("UserDetail", 6)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("username", &self.username)?;
        state.serialize_field("email", &self.email)?;
        state.serialize_field("thoughts", &self.thoughts)?;
        state.serialize_field("friends", &self.friends)?;
        state.serialize_field("friendCount", &self.friend_count())?;
        state.end()
    }
}

fn required(field: &'static str, value: &str, issues: &mut Vec<ValidationIssue>) -> bool {
    if value.trim().is_empty() {
        issues.push(ValidationIssue::new(field, "validation.required", "field is required"));
        return false;
    }
    true
}

fn check_email(value: &str, issues: &mut Vec<ValidationIssue>) {
    if !is_valid_email(value.trim()) {
        issues.push(ValidationIssue::new(
            "email",
            "validation.email",
            "value must be a valid email address",
        ));
    }
}

fn check_body_length(field: &'static str, value: &str, issues: &mut Vec<ValidationIssue>) {
    if value.chars().count() > BODY_MAX_CHARS {
        issues.push(ValidationIssue::new(
            field,
            "validation.length",
            format!("length must be at most {BODY_MAX_CHARS}"),
        ));
    }
}

fn finish(issues: Vec<ValidationIssue>) -> ValidationResult<()> {
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(issues))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    pub username: String,
    pub email: String,
}

impl CreateUserPayload {
    pub fn validate(&self) -> ValidationResult<()> {
        let mut issues = Vec::new();
        required("username", &self.username, &mut issues);
        if required("email", &self.email, &mut issues) {
            check_email(&self.email, &mut issues);
        }
        finish(issues)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl UpdateUserPayload {
    pub fn validate(&self) -> ValidationResult<()> {
        let mut issues = Vec::new();
        if let Some(username) = &self.username {
            required("username", username, &mut issues);
        }
        if let Some(email) = &self.email
            && required("email", email, &mut issues)
        {
            check_email(email, &mut issues);
        }
        finish(issues)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateThoughtPayload {
    pub thought_text: String,
    pub username: String,
}

impl CreateThoughtPayload {
    pub fn validate(&self) -> ValidationResult<()> {
        let mut issues = Vec::new();
        if required("thoughtText", &self.thought_text, &mut issues) {
            check_body_length("thoughtText", &self.thought_text, &mut issues);
        }
        required("username", &self.username, &mut issues);
        finish(issues)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateThoughtPayload {
    pub thought_text: String,
}

impl UpdateThoughtPayload {
    pub fn validate(&self) -> ValidationResult<()> {
        let mut issues = Vec::new();
        if required("thoughtText", &self.thought_text, &mut issues) {
            check_body_length("thoughtText", &self.thought_text, &mut issues);
        }
        finish(issues)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReactionPayload {
    pub reaction_body: String,
    pub username: String,
}

impl CreateReactionPayload {
    pub fn validate(&self) -> ValidationResult<()> {
        let mut issues = Vec::new();
        if required("reactionBody", &self.reaction_body, &mut issues) {
            check_body_length("reactionBody", &self.reaction_body, &mut issues);
        }
        required("username", &self.username, &mut issues);
        finish(issues)
    }
}
