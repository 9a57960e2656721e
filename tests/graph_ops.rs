//! Referential-integrity properties of the graph layer, exercised against
//! the in-process store.

use snapi::{
    AppError, EntityKind, MemoryStore, SocialGraph,
    id::generate_entity_id,
    models::{
        BODY_MAX_CHARS, CreateReactionPayload, CreateThoughtPayload, CreateUserPayload,
        UpdateThoughtPayload, User,
    },
};

fn graph() -> SocialGraph<MemoryStore> {
    SocialGraph::new(MemoryStore::new(), "test")
}

async fn seed_user(graph: &SocialGraph<MemoryStore>, username: &str) -> User {
    graph
        .create_user(CreateUserPayload {
            username: username.to_string(),
            email: format!("{username}@example.com"),
        })
        .await
        .expect("create user")
}

fn thought_payload(username: &str, text: &str) -> CreateThoughtPayload {
    CreateThoughtPayload {
        thought_text: text.to_string(),
        username: username.to_string(),
    }
}

#[tokio::test]
async fn creating_thought_appends_id_to_author() {
    let graph = graph();
    let ada = seed_user(&graph, "ada").await;

    let thought = graph.create_thought(thought_payload("ada", "hi")).await.expect("create thought");
    assert_eq!(thought.username, "ada");

    let detail = graph.get_user(&ada.id).await.expect("get user");
    assert_eq!(detail.thoughts.len(), 1);
    assert_eq!(detail.thoughts[0].id, thought.id);
}

#[tokio::test]
async fn deleting_thought_pulls_reference_from_author() {
    let graph = graph();
    let ada = seed_user(&graph, "ada").await;
    let kept = graph.create_thought(thought_payload("ada", "kept")).await.unwrap();
    let dropped = graph.create_thought(thought_payload("ada", "dropped")).await.unwrap();

    graph.delete_thought(&dropped.id).await.expect("delete thought");

    let detail = graph.get_user(&ada.id).await.unwrap();
    let ids: Vec<&str> = detail.thoughts.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec![kept.id.as_str()]);
}

#[tokio::test]
async fn deleting_user_cascades_to_matching_thoughts() {
    let graph = graph();
    let ada = seed_user(&graph, "ada").await;
    seed_user(&graph, "bob").await;
    graph.create_thought(thought_payload("ada", "one")).await.unwrap();
    graph.create_thought(thought_payload("ada", "two")).await.unwrap();
    let bobs = graph.create_thought(thought_payload("bob", "mine")).await.unwrap();

    graph.delete_user(&ada.id).await.expect("delete user");

    let remaining = graph.list_thoughts().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, bobs.id);

    let err = graph.get_user(&ada.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: EntityKind::User }));
}

#[tokio::test]
async fn self_friend_is_rejected_and_leaves_friends_unchanged() {
    let graph = graph();
    let ada = seed_user(&graph, "ada").await;

    let err = graph.add_friend(&ada.id, &ada.id).await.unwrap_err();
    assert!(matches!(err, AppError::SelfFriend));

    let detail = graph.get_user(&ada.id).await.unwrap();
    assert!(detail.friends.is_empty());
}

#[tokio::test]
async fn add_friend_is_idempotent() {
    let graph = graph();
    let ada = seed_user(&graph, "ada").await;
    let bob = seed_user(&graph, "bob").await;

    graph.add_friend(&ada.id, &bob.id).await.unwrap();
    let user = graph.add_friend(&ada.id, &bob.id).await.unwrap();

    assert_eq!(user.friends, vec![bob.id.clone()]);
    assert_eq!(user.friend_count(), 1);

    // Not auto-mirrored.
    let bob_detail = graph.get_user(&bob.id).await.unwrap();
    assert!(bob_detail.friends.is_empty());
}

#[tokio::test]
async fn removing_absent_friend_is_not_an_error() {
    let graph = graph();
    let ada = seed_user(&graph, "ada").await;
    let bob = seed_user(&graph, "bob").await;

    let user = graph.remove_friend(&ada.id, &bob.id).await.expect("remove friend");
    assert!(user.friends.is_empty());
}

#[tokio::test]
async fn updating_thought_replaces_text() {
    let graph = graph();
    seed_user(&graph, "ada").await;
    let thought = graph.create_thought(thought_payload("ada", "draft")).await.unwrap();

    let updated = graph
        .update_thought(
            &thought.id,
            UpdateThoughtPayload {
                thought_text: String::from("final"),
            },
        )
        .await
        .expect("update thought");
    assert_eq!(updated.thought_text, "final");

    let fetched = graph.get_thought(&thought.id).await.unwrap();
    assert_eq!(fetched.thought_text, "final");
    assert_eq!(fetched.username, "ada");
}

#[tokio::test]
async fn updating_thought_enforces_length_cap_without_writing() {
    let graph = graph();
    seed_user(&graph, "ada").await;
    let thought = graph.create_thought(thought_payload("ada", "hi")).await.unwrap();

    let err = graph
        .update_thought(
            &thought.id,
            UpdateThoughtPayload {
                thought_text: "x".repeat(BODY_MAX_CHARS + 1),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(graph.get_thought(&thought.id).await.unwrap().thought_text, "hi");
}

#[tokio::test]
async fn updating_unknown_thought_is_not_found() {
    let graph = graph();
    let err = graph
        .update_thought(
            &generate_entity_id(),
            UpdateThoughtPayload {
                thought_text: String::from("hi"),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: EntityKind::Thought }));
}

#[tokio::test]
async fn removing_unknown_reaction_returns_thought_unchanged() {
    let graph = graph();
    seed_user(&graph, "ada").await;
    let thought = graph.create_thought(thought_payload("ada", "hi")).await.unwrap();
    let thought = graph
        .add_reaction(
            &thought.id,
            CreateReactionPayload {
                reaction_body: String::from("nice"),
                username: String::from("ada"),
            },
        )
        .await
        .unwrap();
    assert_eq!(thought.reaction_count(), 1);

    let unchanged = graph
        .remove_reaction(&thought.id, &generate_entity_id())
        .await
        .expect("remove reaction");
    assert_eq!(unchanged.reaction_count(), 1);
}

#[tokio::test]
async fn removing_reaction_filters_matching_entry() {
    let graph = graph();
    seed_user(&graph, "ada").await;
    seed_user(&graph, "bob").await;
    let thought = graph.create_thought(thought_payload("ada", "hi")).await.unwrap();
    for username in ["ada", "bob"] {
        graph
            .add_reaction(
                &thought.id,
                CreateReactionPayload {
                    reaction_body: String::from("nice"),
                    username: username.to_string(),
                },
            )
            .await
            .unwrap();
    }

    let thought = graph.get_thought(&thought.id).await.unwrap();
    let target = thought.reactions[0].reaction_id.clone();
    let updated = graph.remove_reaction(&thought.id, &target).await.unwrap();
    assert_eq!(updated.reaction_count(), 1);
    assert!(updated.reactions.iter().all(|r| r.reaction_id != target));
}

#[tokio::test]
async fn reaction_requires_known_author() {
    let graph = graph();
    seed_user(&graph, "ada").await;
    let thought = graph.create_thought(thought_payload("ada", "hi")).await.unwrap();

    let err = graph
        .add_reaction(
            &thought.id,
            CreateReactionPayload {
                reaction_body: String::from("hello"),
                username: String::from("ghost"),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: EntityKind::User }));
}

#[tokio::test]
async fn thought_requires_known_author() {
    let graph = graph();
    let err = graph.create_thought(thought_payload("ghost", "hi")).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: EntityKind::User }));
}

#[tokio::test]
async fn malformed_identifiers_are_rejected_before_any_mutation() {
    let store = MemoryStore::new();
    let graph = SocialGraph::new(store.clone(), "test");
    let ada = seed_user(&graph, "ada").await;
    let stored = store.len();

    for result in [
        graph.delete_user("not-hex").await.err(),
        graph.add_friend(&ada.id, "short").await.err(),
        graph.delete_thought("0123").await.err(),
        graph.remove_reaction("bad", "worse").await.err(),
    ] {
        assert!(matches!(result, Some(AppError::InvalidId { .. })));
    }
    assert_eq!(store.len(), stored);
}

#[tokio::test]
async fn duplicate_username_and_email_are_rejected() {
    let graph = graph();
    seed_user(&graph, "ada").await;

    let err = graph
        .create_user(CreateUserPayload {
            username: String::from("ada"),
            email: String::from("other@example.com"),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UniqueViolation { field: "username", .. }));

    let err = graph
        .create_user(CreateUserPayload {
            username: String::from("ada2"),
            email: String::from("ada@example.com"),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UniqueViolation { field: "email", .. }));
}

#[tokio::test]
async fn username_is_trimmed_on_create() {
    let graph = graph();
    let user = graph
        .create_user(CreateUserPayload {
            username: String::from("  ada  "),
            email: String::from("ada@example.com"),
        })
        .await
        .unwrap();
    assert_eq!(user.username, "ada");
}

#[tokio::test]
async fn empty_thought_text_fails_validation() {
    let graph = graph();
    seed_user(&graph, "ada").await;

    let err = graph.create_thought(thought_payload("ada", "   ")).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(graph.list_thoughts().await.unwrap().is_empty());
}
