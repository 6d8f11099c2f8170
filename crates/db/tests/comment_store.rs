//! Integration tests for the comment repository: thread materialization,
//! status gating, counts, and cascade behaviour.

use sqlx::PgPool;

use quill_db::models::comment::CreateComment;
use quill_db::models::post::CreatePost;
use quill_db::models::user::{CreateUser, User};
use quill_db::repositories::{CommentRepo, PostRepo, ProfileRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, username: &str) -> User {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .await
    .expect("user creation should succeed");

    ProfileRepo::create(pool, user.id, Some("Fixture User"))
        .await
        .expect("profile creation should succeed");

    user
}

async fn new_post(pool: &PgPool, author_id: i64, slug: &str) -> i64 {
    PostRepo::create(
        pool,
        &CreatePost {
            title: slug.to_string(),
            slug: slug.to_string(),
            content: "Fixture post content.".to_string(),
            excerpt: "Fixture".to_string(),
            featured_image: None,
            status: "published".to_string(),
            author_id,
            category_id: None,
            published_at: None,
        },
    )
    .await
    .expect("post creation should succeed")
    .id
}

async fn new_comment(
    pool: &PgPool,
    author_id: i64,
    post_id: i64,
    content: &str,
    parent_id: Option<i64>,
    status: &str,
) -> i64 {
    CommentRepo::create(
        pool,
        &CreateComment {
            content: content.to_string(),
            author_id,
            post_id,
            parent_id,
            status: status.to_string(),
        },
    )
    .await
    .expect("comment creation should succeed")
    .id
}

// ---------------------------------------------------------------------------
// Thread materialization
// ---------------------------------------------------------------------------

/// Scenario: 2 approved top-level comments, the first with one approved and
/// one rejected reply. The thread shows 2 entries, the first with exactly
/// one reply; non-approved rows never surface.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_thread_gates_on_approved(pool: PgPool) {
    let user = new_user(&pool, "threader").await;
    let post = new_post(&pool, user.id, "hello-world").await;

    let first = new_comment(&pool, user.id, post, "First top-level", None, "approved").await;
    new_comment(&pool, user.id, post, "Second top-level", None, "approved").await;
    new_comment(&pool, user.id, post, "Approved reply", Some(first), "approved").await;
    new_comment(&pool, user.id, post, "Rejected reply", Some(first), "rejected").await;
    new_comment(&pool, user.id, post, "Pending top-level", None, "pending").await;
    new_comment(&pool, user.id, post, "Rejected top-level", None, "rejected").await;

    let thread = CommentRepo::list_thread(&pool, post)
        .await
        .expect("thread read should succeed");

    assert_eq!(thread.len(), 2);
    assert_eq!(thread[0].comment.id, first);
    assert_eq!(thread[0].replies.len(), 1);
    assert_eq!(thread[0].replies[0].content, "Approved reply");
    assert!(thread[1].replies.is_empty());

    // Author display data is joined on.
    assert_eq!(thread[0].comment.author_username, "threader");
    assert_eq!(thread[0].comment.author_full_name.as_deref(), Some("Fixture User"));
}

/// Top-level comments and replies are both ordered oldest first.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_thread_ordering(pool: PgPool) {
    let user = new_user(&pool, "orderer").await;
    let post = new_post(&pool, user.id, "ordered").await;

    let a = new_comment(&pool, user.id, post, "comment a", None, "approved").await;
    let b = new_comment(&pool, user.id, post, "comment b", None, "approved").await;
    new_comment(&pool, user.id, post, "reply a1", Some(a), "approved").await;
    new_comment(&pool, user.id, post, "reply a2", Some(a), "approved").await;

    let thread = CommentRepo::list_thread(&pool, post).await.unwrap();
    let ids: Vec<i64> = thread.iter().map(|t| t.comment.id).collect();
    assert_eq!(ids, vec![a, b]);
    let reply_contents: Vec<&str> = thread[0]
        .replies
        .iter()
        .map(|r| r.content.as_str())
        .collect();
    assert_eq!(reply_contents, vec!["reply a1", "reply a2"]);
}

/// A post with no comments yields an empty thread.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_thread_empty_post(pool: PgPool) {
    let user = new_user(&pool, "quiet").await;
    let post = new_post(&pool, user.id, "quiet-post").await;

    let thread = CommentRepo::list_thread(&pool, post).await.unwrap();
    assert!(thread.is_empty());
}

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

/// Only approved comments (including replies) count; a nonexistent post id
/// yields 0, not an error.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_count_approved(pool: PgPool) {
    let user = new_user(&pool, "countuser").await;
    let post = new_post(&pool, user.id, "count-post").await;

    let top = new_comment(&pool, user.id, post, "approved one", None, "approved").await;
    new_comment(&pool, user.id, post, "approved reply", Some(top), "approved").await;
    new_comment(&pool, user.id, post, "pending one", None, "pending").await;
    new_comment(&pool, user.id, post, "rejected one", None, "rejected").await;

    assert_eq!(CommentRepo::count_approved(&pool, post).await.unwrap(), 2);
    assert_eq!(
        CommentRepo::count_approved(&pool, 999_999).await.unwrap(),
        0,
        "unknown post id degrades to zero"
    );
}

// ---------------------------------------------------------------------------
// Status updates
// ---------------------------------------------------------------------------

/// Applying the same status twice yields the same final state as once.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_status_idempotent(pool: PgPool) {
    let user = new_user(&pool, "statususer").await;
    let post = new_post(&pool, user.id, "status-post").await;
    let comment = new_comment(&pool, user.id, post, "toggle me", None, "pending").await;

    let once = CommentRepo::update_status(&pool, comment, "approved")
        .await
        .unwrap()
        .expect("comment exists");
    assert_eq!(once.status, "approved");

    let twice = CommentRepo::update_status(&pool, comment, "approved")
        .await
        .unwrap()
        .expect("comment exists");
    assert_eq!(twice.status, "approved");
    assert_eq!(CommentRepo::count_approved(&pool, post).await.unwrap(), 1);
}

/// Updating a nonexistent comment returns `None`.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_status_missing_comment(pool: PgPool) {
    let result = CommentRepo::update_status(&pool, 424_242, "approved")
        .await
        .unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

/// Deleting a parent removes its replies via the schema-level cascade.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_cascades_to_replies(pool: PgPool) {
    let user = new_user(&pool, "cascader").await;
    let post = new_post(&pool, user.id, "cascade-post").await;

    let parent = new_comment(&pool, user.id, post, "parent comment", None, "approved").await;
    let reply = new_comment(&pool, user.id, post, "orphan-to-be", Some(parent), "approved").await;

    assert!(CommentRepo::delete(&pool, parent).await.unwrap());
    assert!(CommentRepo::find_by_id(&pool, reply).await.unwrap().is_none());
    assert!(!CommentRepo::delete(&pool, parent).await.unwrap(), "second delete is a no-op");
}

// ---------------------------------------------------------------------------
// Dashboard reads
// ---------------------------------------------------------------------------

/// The moderation list is scoped to the author's posts, crosses statuses,
/// and is ordered newest first with post context attached.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_list_scoping(pool: PgPool) {
    let owner = new_user(&pool, "dashowner").await;
    let stranger = new_user(&pool, "dashstranger").await;

    let owned = new_post(&pool, owner.id, "owned-post").await;
    let foreign = new_post(&pool, stranger.id, "foreign-post").await;

    new_comment(&pool, stranger.id, owned, "older on owned", None, "pending").await;
    new_comment(&pool, stranger.id, owned, "newer on owned", None, "approved").await;
    new_comment(&pool, owner.id, foreign, "on someone else's post", None, "approved").await;

    let list = CommentRepo::list_for_author_posts(&pool, owner.id)
        .await
        .unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(list[0].content, "newer on owned");
    assert_eq!(list[0].post_slug, "owned-post");
    assert_eq!(list[0].author_username, "dashstranger");
    assert_eq!(list[1].status, "pending");

    let counts = CommentRepo::counts_for_author_posts(&pool, owner.id)
        .await
        .unwrap();
    assert_eq!(counts.total, 2);
    assert_eq!(counts.pending, 1);
}
