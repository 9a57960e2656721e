//! Cross-entity operations over the users and thoughts collections.
//!
//! This is the only layer with relational bookkeeping: thought creation and
//! deletion maintain the author's `thoughts` reference list, user deletion
//! cascades to the user's thoughts, and friend/reaction mutations edit the
//! reference lists with set semantics.
//!
//! The two-document sequences are deliberately non-atomic: each document
//! write is atomic on its own, and a failed secondary write is logged at
//! WARN without rolling back the primary one.

use chrono::Utc;

use crate::errors::{AppError, EntityKind};
use crate::id::{generate_entity_id, is_valid_entity_id};
use crate::models::{
    CreateReactionPayload, CreateThoughtPayload, CreateUserPayload, Reaction, Thought,
    UpdateThoughtPayload, UpdateUserPayload, User, UserDetail,
};
use crate::repo::Collection;
use crate::store::DocumentStore;

pub struct SocialGraph<S> {
    users: Collection<S, User>,
    thoughts: Collection<S, Thought>,
}

impl<S: Clone> Clone for SocialGraph<S> {
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            thoughts: self.thoughts.clone(),
        }
    }
}

/// Guard applied to every path-parameter identifier before any store access.
fn checked_id<'a>(value: &'a str) -> Result<&'a str, AppError> {
    if is_valid_entity_id(value) {
        Ok(value)
    } else {
        Err(AppError::InvalidId {
            value: value.to_string(),
        })
    }
}

impl<S: DocumentStore> SocialGraph<S> {
    pub fn new(store: S, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            users: Collection::new(store.clone(), prefix.clone()),
            thoughts: Collection::new(store, prefix),
        }
    }

    // ---- users ----

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.users.list().await
    }

    pub async fn create_user(&self, payload: CreateUserPayload) -> Result<User, AppError> {
        payload.validate()?;
        let username = payload.username.trim().to_string();
        let email = payload.email.trim().to_string();
        self.ensure_unique(None, &username, &email).await?;

        let user = User {
            id: generate_entity_id(),
            username,
            email,
            thoughts: Vec::new(),
            friends: Vec::new(),
        };
        self.users.save(&user).await?;
        Ok(user)
    }

    /// Detail lookup with `thoughts` and `friends` resolved to documents.
    /// Dangling references (best-effort bookkeeping) are skipped.
    pub async fn get_user(&self, user_id: &str) -> Result<UserDetail, AppError> {
        let user_id = checked_id(user_id)?;
        let user = self
            .users
            .get(user_id)
            .await?
            .ok_or(AppError::not_found(EntityKind::User))?;

        let mut thoughts = Vec::with_capacity(user.thoughts.len());
        for thought_id in &user.thoughts {
            if let Some(thought) = self.thoughts.get(thought_id).await? {
                thoughts.push(thought);
            }
        }
        let mut friends = Vec::with_capacity(user.friends.len());
        for friend_id in &user.friends {
            if let Some(friend) = self.users.get(friend_id).await? {
                friends.push(friend);
            }
        }
        Ok(UserDetail::new(user, thoughts, friends))
    }

    pub async fn update_user(&self, user_id: &str, patch: UpdateUserPayload) -> Result<User, AppError> {
        let user_id = checked_id(user_id)?;
        patch.validate()?;
        let mut user = self
            .users
            .get(user_id)
            .await?
            .ok_or(AppError::not_found(EntityKind::User))?;

        if let Some(username) = patch.username {
            user.username = username.trim().to_string();
        }
        if let Some(email) = patch.email {
            user.email = email.trim().to_string();
        }
        self.ensure_unique(Some(&user.id), &user.username, &user.email).await?;
        self.users.save(&user).await?;
        Ok(user)
    }

    /// Deletes the user and cascades to every thought with a matching
    /// username. The cascade is best-effort; its failure does not undo the
    /// primary deletion.
    pub async fn delete_user(&self, user_id: &str) -> Result<User, AppError> {
        let user_id = checked_id(user_id)?;
        let user = self
            .users
            .remove(user_id)
            .await?
            .ok_or(AppError::not_found(EntityKind::User))?;

        match self.delete_thoughts_by_author(&user.username).await {
            Ok(removed) => {
                tracing::info!(user = %user.id, thoughts = removed, "deleted user and cascaded thoughts");
            }
            Err(err) => {
                tracing::warn!(user = %user.id, error = %err, "cascade delete of thoughts failed");
            }
        }
        Ok(user)
    }

    /// Set-semantics add: a duplicate pair is a no-op, not an error. The
    /// relation is not mirrored onto the friend.
    pub async fn add_friend(&self, user_id: &str, friend_id: &str) -> Result<User, AppError> {
        let user_id = checked_id(user_id)?;
        let friend_id = checked_id(friend_id)?;
        if user_id == friend_id {
            return Err(AppError::SelfFriend);
        }

        let mut user = self
            .users
            .get(user_id)
            .await?
            .ok_or(AppError::not_found(EntityKind::User))?;
        if !user.friends.iter().any(|id| id == friend_id) {
            user.friends.push(friend_id.to_string());
            self.users.save(&user).await?;
        }
        Ok(user)
    }

    /// Removing an absent friend entry is not an error; only a missing user is.
    pub async fn remove_friend(&self, user_id: &str, friend_id: &str) -> Result<User, AppError> {
        let user_id = checked_id(user_id)?;
        let friend_id = checked_id(friend_id)?;

        let mut user = self
            .users
            .get(user_id)
            .await?
            .ok_or(AppError::not_found(EntityKind::User))?;
        let before = user.friends.len();
        user.friends.retain(|id| id != friend_id);
        if user.friends.len() != before {
            self.users.save(&user).await?;
        }
        Ok(user)
    }

    // ---- thoughts ----

    pub async fn list_thoughts(&self) -> Result<Vec<Thought>, AppError> {
        self.thoughts.list().await
    }

    pub async fn get_thought(&self, thought_id: &str) -> Result<Thought, AppError> {
        let thought_id = checked_id(thought_id)?;
        self.thoughts
            .get(thought_id)
            .await?
            .ok_or(AppError::not_found(EntityKind::Thought))
    }

    /// Creates the thought, then appends its id to the author's `thoughts`
    /// list as a best-effort secondary write.
    pub async fn create_thought(&self, payload: CreateThoughtPayload) -> Result<Thought, AppError> {
        payload.validate()?;
        let mut author = self
            .find_user_by_username(payload.username.trim())
            .await?
            .ok_or(AppError::not_found(EntityKind::User))?;

        let thought = Thought {
            id: generate_entity_id(),
            thought_text: payload.thought_text,
            username: author.username.clone(),
            created_at: Utc::now(),
            reactions: Vec::new(),
        };
        self.thoughts.save(&thought).await?;

        author.thoughts.push(thought.id.clone());
        if let Err(err) = self.users.save(&author).await {
            tracing::warn!(thought = %thought.id, user = %author.id, error = %err,
                "failed to record thought on author");
        }
        Ok(thought)
    }

    pub async fn update_thought(
        &self,
        thought_id: &str,
        patch: UpdateThoughtPayload,
    ) -> Result<Thought, AppError> {
        let thought_id = checked_id(thought_id)?;
        patch.validate()?;
        let mut thought = self
            .thoughts
            .get(thought_id)
            .await?
            .ok_or(AppError::not_found(EntityKind::Thought))?;
        thought.thought_text = patch.thought_text;
        self.thoughts.save(&thought).await?;
        Ok(thought)
    }

    /// Deletes the thought, then pulls its id from the author's `thoughts`
    /// list as a best-effort secondary write.
    pub async fn delete_thought(&self, thought_id: &str) -> Result<Thought, AppError> {
        let thought_id = checked_id(thought_id)?;
        let thought = self
            .thoughts
            .remove(thought_id)
            .await?
            .ok_or(AppError::not_found(EntityKind::Thought))?;

        match self.find_user_by_username(&thought.username).await {
            Ok(Some(mut author)) => {
                author.thoughts.retain(|id| id != &thought.id);
                if let Err(err) = self.users.save(&author).await {
                    tracing::warn!(thought = %thought.id, user = %author.id, error = %err,
                        "failed to unlink thought from author");
                }
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(thought = %thought.id, error = %err,
                    "author lookup failed while unlinking thought");
            }
        }
        Ok(thought)
    }

    // ---- reactions ----

    /// Appends a reaction with a generated id and timestamp. The named
    /// author must exist.
    pub async fn add_reaction(
        &self,
        thought_id: &str,
        payload: CreateReactionPayload,
    ) -> Result<Thought, AppError> {
        let thought_id = checked_id(thought_id)?;
        payload.validate()?;
        let username = payload.username.trim().to_string();
        self.find_user_by_username(&username)
            .await?
            .ok_or(AppError::not_found(EntityKind::User))?;

        let mut thought = self
            .thoughts
            .get(thought_id)
            .await?
            .ok_or(AppError::not_found(EntityKind::Thought))?;
        thought.reactions.push(Reaction {
            reaction_id: generate_entity_id(),
            reaction_body: payload.reaction_body,
            username,
            created_at: Utc::now(),
        });
        self.thoughts.save(&thought).await?;
        Ok(thought)
    }

    /// Filters out the matching reaction. A missing reaction id is not an
    /// error; the unchanged thought is returned.
    pub async fn remove_reaction(&self, thought_id: &str, reaction_id: &str) -> Result<Thought, AppError> {
        let thought_id = checked_id(thought_id)?;
        let reaction_id = checked_id(reaction_id)?;

        let mut thought = self
            .thoughts
            .get(thought_id)
            .await?
            .ok_or(AppError::not_found(EntityKind::Thought))?;
        let before = thought.reactions.len();
        thought.reactions.retain(|reaction| reaction.reaction_id != reaction_id);
        if thought.reactions.len() != before {
            self.thoughts.save(&thought).await?;
        }
        Ok(thought)
    }

    // ---- helpers ----

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .list()
            .await?
            .into_iter()
            .find(|user| user.username == username))
    }

    async fn delete_thoughts_by_author(&self, username: &str) -> Result<u64, AppError> {
        let mut removed = 0;
        for thought in self.thoughts.list().await? {
            if thought.username == username && self.thoughts.delete(&thought.id).await? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Username and email are unique across users. `skip_id` excludes the
    /// entity being updated.
    async fn ensure_unique(
        &self,
        skip_id: Option<&str>,
        username: &str,
        email: &str,
    ) -> Result<(), AppError> {
        for other in self.users.list().await? {
            if skip_id == Some(other.id.as_str()) {
                continue;
            }
            if other.username == username {
                return Err(AppError::UniqueViolation {
                    field: "username",
                    value: username.to_string(),
                });
            }
            if other.email == email {
                return Err(AppError::UniqueViolation {
                    field: "email",
                    value: email.to_string(),
                });
            }
        }
        Ok(())
    }
}
