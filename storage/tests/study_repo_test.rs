//! Integration tests for [`storage::StudyRepository`].
//!
//! Covers window filtering and ordering, per-user filtering, active user listing, comprehension
//! fetch, task folder persistence and explanation updates using an in-memory SQLite database.

use chrono::{DateTime, Duration, Utc};
use storage::{RecordSource, StudyRepository, TaskStore};
use study_core::{
    jst, ComprehensionUpdateSuggestion, FieldRecord, Message, Post, PostReply, Quiz,
    SubjectRecord, TaskDay, TimeWindow,
};

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-05-02T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn hours_ago(h: i64) -> DateTime<Utc> {
    now() - Duration::hours(h)
}

fn window() -> TimeWindow {
    TimeWindow::trailing(now(), 24, jst())
}

fn message(room: &str, content: &str, at: DateTime<Utc>) -> Message {
    Message {
        room_id: room.to_string(),
        role: "user".to_string(),
        content: content.to_string(),
        created_at: at,
    }
}

fn post(id: &str, user: Option<&str>, at: DateTime<Utc>) -> Post {
    Post {
        id: id.to_string(),
        user_id: user.map(String::from),
        comment: format!("comment on {}", id),
        created_at: at,
    }
}

fn reply(post_id: &str, content: &str, at: DateTime<Utc>) -> PostReply {
    PostReply {
        post_id: post_id.to_string(),
        role: "assistant".to_string(),
        content: content.to_string(),
        created_at: at,
    }
}

async fn repo() -> StudyRepository {
    StudyRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository")
}

/// Two users: alice owns room r1 and post p1, bob owns room r2 and post p2.
async fn seeded_repo() -> StudyRepository {
    let repo = repo().await;
    repo.insert_room("r1", "alice").await.unwrap();
    repo.insert_room("r2", "bob").await.unwrap();

    repo.insert_message(&message("r1", "late", hours_ago(1))).await.unwrap();
    repo.insert_message(&message("r1", "early", hours_ago(5))).await.unwrap();
    repo.insert_message(&message("r2", "bob talks", hours_ago(3))).await.unwrap();
    repo.insert_message(&message("r1", "too old", hours_ago(30))).await.unwrap();

    repo.insert_post(&post("p1", Some("alice"), hours_ago(4))).await.unwrap();
    repo.insert_post(&post("p2", Some("bob"), hours_ago(2))).await.unwrap();
    repo.insert_post(&post("p-old", Some("alice"), hours_ago(48))).await.unwrap();

    repo.insert_post_reply(&reply("p1", "second", hours_ago(2))).await.unwrap();
    repo.insert_post_reply(&reply("p1", "first", hours_ago(3))).await.unwrap();
    repo.insert_post_reply(&reply("p2", "to bob", hours_ago(1))).await.unwrap();
    repo
}

/// **Test: Window fetch excludes old records and returns each set ascending by created_at.**
#[tokio::test]
async fn test_fetch_window_filters_and_orders() {
    let repo = seeded_repo().await;

    let records = repo.fetch_window(&window(), None).await.expect("fetch");

    let contents: Vec<&str> = records.messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["early", "bob talks", "late"]);
    let post_ids: Vec<&str> = records.posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(post_ids, vec!["p1", "p2"]);
    let replies: Vec<&str> = records.replies.iter().map(|r| r.content.as_str()).collect();
    assert_eq!(replies, vec!["first", "second", "to bob"]);
}

/// **Test: Window bounds are inclusive.**
#[tokio::test]
async fn test_fetch_window_is_inclusive() {
    let repo = repo().await;
    let w = window();
    repo.insert_message(&message("r", "at start", w.start_utc())).await.unwrap();
    repo.insert_message(&message("r", "at end", w.end_utc())).await.unwrap();
    repo.insert_message(&message("r", "after end", w.end_utc() + Duration::seconds(1)))
        .await
        .unwrap();

    let records = repo.fetch_window(&w, None).await.unwrap();
    let contents: Vec<&str> = records.messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["at start", "at end"]);
}

/// **Test: Per-user fetch keeps only the user's rooms, posts and replies to their posts.**
#[tokio::test]
async fn test_fetch_window_for_single_user() {
    let repo = seeded_repo().await;

    let records = repo.fetch_window(&window(), Some("bob")).await.unwrap();

    assert_eq!(records.messages.len(), 1);
    assert_eq!(records.messages[0].room_id, "r2");
    assert_eq!(records.posts.len(), 1);
    assert_eq!(records.posts[0].id, "p2");
    assert_eq!(records.replies.len(), 1);
    assert_eq!(records.replies[0].content, "to bob");
}

/// **Test: Unknown user yields empty record sets.**
#[tokio::test]
async fn test_fetch_window_unknown_user_is_empty() {
    let repo = seeded_repo().await;
    let records = repo.fetch_window(&window(), Some("nobody")).await.unwrap();
    assert!(records.is_empty());
}

/// **Test: Active users are those with room messages or posts inside the window.**
#[tokio::test]
async fn test_active_users() {
    let repo = seeded_repo().await;
    repo.insert_room("r3", "carol").await.unwrap();
    repo.insert_message(&message("r3", "long ago", hours_ago(72))).await.unwrap();
    repo.insert_post(&post("p-anon", None, hours_ago(1))).await.unwrap();

    let users = repo.active_users(&window()).await.unwrap();
    assert_eq!(users, vec!["alice".to_string(), "bob".to_string()]);
}

/// **Test: Comprehension fetch returns subjects and their fields, optionally per user.**
#[tokio::test]
async fn test_fetch_comprehension() {
    let repo = repo().await;
    repo.insert_subject(&SubjectRecord {
        id: "c1".into(),
        user_id: Some("alice".into()),
        subject: "数学".into(),
        comprehension: 55.0,
        explanation: None,
    })
    .await
    .unwrap();
    repo.insert_subject(&SubjectRecord {
        id: "c2".into(),
        user_id: Some("bob".into()),
        subject: "英語".into(),
        comprehension: 20.0,
        explanation: Some("単語は得意".into()),
    })
    .await
    .unwrap();
    repo.insert_field(&FieldRecord {
        comprehension_id: "c1".into(),
        field: "微分".into(),
        comprehension: 30.0,
        explanation: None,
    })
    .await
    .unwrap();

    let (subjects, fields) = repo.fetch_comprehension(None).await.unwrap();
    assert_eq!(subjects.len(), 2);
    assert_eq!(fields.len(), 1);

    let (subjects, fields) = repo.fetch_comprehension(Some("bob")).await.unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0].explanation.as_deref(), Some("単語は得意"));
    assert!(fields.is_empty());
}

/// **Test: Results of the same user and day share one task folder.**
#[tokio::test]
async fn test_save_daily_results_reuses_folder() {
    let repo = repo().await;
    let day = TaskDay::for_window("alice", &window());
    let quizzes = vec![
        Quiz { question: "1+1?".into(), answer: "2".into() },
        Quiz { question: "2+2?".into(), answer: "4".into() },
    ];

    let first = repo.save_daily_results(&day, "report one", &quizzes).await.unwrap();
    let second = repo.save_daily_results(&day, "report two", &[]).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(repo.daily_reports(&day).await.unwrap(), vec!["report one", "report two"]);
    assert_eq!(repo.quizzes(&day).await.unwrap(), quizzes);

    let other = TaskDay::for_window("bob", &window());
    assert!(repo.daily_reports(&other).await.unwrap().is_empty());
}

/// **Test: Explanation updates hit the user's matching fields and subjects only.**
#[tokio::test]
async fn test_apply_explanation_updates() {
    let repo = repo().await;
    for (id, user) in [("c1", "alice"), ("c2", "bob")] {
        repo.insert_subject(&SubjectRecord {
            id: id.into(),
            user_id: Some(user.into()),
            subject: "数学".into(),
            comprehension: 50.0,
            explanation: None,
        })
        .await
        .unwrap();
        repo.insert_field(&FieldRecord {
            comprehension_id: id.into(),
            field: "微分".into(),
            comprehension: 10.0,
            explanation: None,
        })
        .await
        .unwrap();
    }

    let mut suggestion = ComprehensionUpdateSuggestion::default();
    suggestion
        .update_explanation
        .insert("微分".into(), "導関数の定義を理解した".into());
    suggestion
        .update_explanation
        .insert("数学".into(), "着実に進歩している".into());

    let updated = repo.apply_explanation_updates("alice", &suggestion).await.unwrap();
    assert_eq!(updated, 2);

    let (subjects, fields) = repo.fetch_comprehension(Some("alice")).await.unwrap();
    assert_eq!(subjects[0].explanation.as_deref(), Some("着実に進歩している"));
    assert_eq!(fields[0].explanation.as_deref(), Some("導関数の定義を理解した"));

    let (subjects, fields) = repo.fetch_comprehension(Some("bob")).await.unwrap();
    assert!(subjects[0].explanation.is_none());
    assert!(fields[0].explanation.is_none());
}

/// **Test: A file-backed database keeps data across repository instances.**
#[tokio::test]
async fn test_file_database_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("study.db");
    let url = format!("sqlite://{}", path.display());

    let repo = StudyRepository::new(&url).await.unwrap();
    repo.insert_room("r1", "alice").await.unwrap();
    repo.insert_message(&message("r1", "kept", hours_ago(1))).await.unwrap();
    drop(repo);

    let reopened = StudyRepository::new(&url).await.unwrap();
    let records = reopened.fetch_window(&window(), Some("alice")).await.unwrap();
    assert_eq!(records.messages.len(), 1);
}
