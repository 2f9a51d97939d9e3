// SPDX-License-Identifier: MPL-2.0
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use tempfile::{tempdir, TempDir};
use tv3_home_hub::app::{App, Flags, Message};
use tv3_home_hub::application::feed::{self, Reaction};
use tv3_home_hub::application::session::{self, AuthError};
use tv3_home_hub::domain::auth::{derive_email, CredentialError, Credentials};
use tv3_home_hub::domain::content::{tables, DEMO_SHORT_ID};
use tv3_home_hub::test_utils::FakeBackend;
use tv3_home_hub::ui::shorts::{self, comments};
use tv3_home_hub::ui::state::{BackGuard, BackOutcome};
use tv3_home_hub::ui::{auth_sheet, home, navbar};

fn boot(temp: &TempDir, fake: &Arc<FakeBackend>) -> App {
    let flags = Flags {
        lang: Some("en-US".into()),
        data_dir: Some(temp.path().join("data").to_string_lossy().into_owned()),
        config_dir: Some(temp.path().join("config").to_string_lossy().into_owned()),
        backend_url: None,
    };
    let (app, _task) = App::with_backend(flags, fake.clone());
    app
}

fn short_row(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Clip {id}"),
        "audio_name": "Original audio",
        "channel_name": "TV3",
        "channel_logo_url": null,
        "video_url": format!("https://cdn.example/{id}.mp4"),
        "created_at": "2024-03-01T10:00:00Z",
    })
}

fn feed_message(message: shorts::Message) -> Message {
    Message::Home(home::Message::Feed(message))
}

fn sheet(message: auth_sheet::Message) -> Message {
    Message::AuthSheet(message)
}

#[test]
fn derived_email_is_lowercased_without_whitespace() {
    for username in ["Alice", "  bob  ", "Jean Luc", "MIXED case\tName"] {
        let expected: String = username
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        assert_eq!(derive_email(username), format!("{expected}@tv3news.app"));
    }
}

#[test]
fn password_length_must_be_six_to_eight() {
    for len in 0..12 {
        let password = "x".repeat(len);
        let result = Credentials::new("alice", &password);
        match len {
            0 => assert_eq!(result.err(), Some(CredentialError::EmptyFields)),
            1..=5 => assert_eq!(result.err(), Some(CredentialError::PasswordTooShort)),
            6..=8 => assert!(result.is_ok()),
            _ => assert_eq!(result.err(), Some(CredentialError::PasswordTooLong)),
        }
    }
}

#[test]
fn invalid_password_makes_no_backend_call() {
    let temp = tempdir().expect("temp dir");
    let fake = FakeBackend::new().shared();
    let mut app = boot(&temp, &fake);
    let calls_before = fake.call_count();

    let _ = app.update(Message::Navbar(navbar::Message::Profile));
    let _ = app.update(sheet(auth_sheet::Message::ShowLogin));
    let _ = app.update(sheet(auth_sheet::Message::UsernameChanged("alice".into())));
    let _ = app.update(sheet(auth_sheet::Message::PasswordChanged("123".into())));
    let _ = app.update(sheet(auth_sheet::Message::Submit));

    assert_eq!(
        app.auth_sheet().error(),
        Some(&AuthError::Invalid(CredentialError::PasswordTooShort))
    );
    assert_eq!(fake.call_count(), calls_before);
}

#[tokio::test]
async fn empty_feed_shows_single_demo_item() {
    let fake = FakeBackend::new().shared();
    let snapshot = feed::load_feed(fake.clone()).await;

    assert_eq!(snapshot.shorts.len(), 1);
    assert_eq!(snapshot.shorts[0].id, DEMO_SHORT_ID);
}

#[tokio::test]
async fn toggling_like_twice_restores_count() {
    let temp = tempdir().expect("temp dir");
    let fake = FakeBackend::new()
        .with_user("alice", "secret1")
        .with_row(tables::SHORTS, short_row("s1"))
        .shared();
    let mut app = boot(&temp, &fake);

    let credentials = Credentials::new("alice", "secret1").expect("valid credentials");
    let signed_in = session::sign_in(fake.clone(), credentials).await;
    let _ = app.update(Message::SignedIn(signed_in));

    let snapshot = feed::load_feed(fake.clone()).await;
    let generation = app.feed().generation();
    let _ = app.update(Message::FeedLoaded {
        generation,
        snapshot,
    });
    assert_eq!(app.feed().reactions().like_count("s1"), 0);

    let _ = app.update(feed_message(shorts::Message::ToggleLike("s1".into())));
    assert!(app.feed().reactions().is_on(Reaction::Like, "s1"));
    assert_eq!(app.feed().reactions().like_count("s1"), 1);

    let _ = app.update(feed_message(shorts::Message::ToggleLike("s1".into())));
    assert!(!app.feed().reactions().is_on(Reaction::Like, "s1"));
    assert_eq!(app.feed().reactions().like_count("s1"), 0);
}

#[tokio::test]
async fn rejected_sign_in_shows_generic_message() {
    let temp = tempdir().expect("temp dir");
    let fake = FakeBackend::new().with_user("alice", "secret1").shared();
    let mut app = boot(&temp, &fake);

    let _ = app.update(Message::Navbar(navbar::Message::Profile));
    let _ = app.update(sheet(auth_sheet::Message::ShowLogin));

    let credentials = Credentials::new("alice", "wrong12").expect("valid shape");
    let result = session::sign_in(fake.clone(), credentials).await;
    let _ = app.update(Message::SignedIn(result));

    let error = app.auth_sheet().error().expect("error shown");
    assert_eq!(error, &AuthError::InvalidCredentials);
    assert_eq!(error.to_string(), "Invalid username or password");
    assert!(app.auth_sheet().is_open());
    assert!(!app.session().is_signed_in());
    assert!(fake.current_user_id().is_none());
}

#[test]
fn back_presses_prompt_only_within_window() {
    let mut guard = BackGuard::new(Duration::from_secs(2));
    let start = Instant::now();

    assert_eq!(guard.press(true, false, start), BackOutcome::Primed);
    assert_eq!(
        guard.press(true, false, start + Duration::from_millis(1500)),
        BackOutcome::PromptExit
    );

    let later = start + Duration::from_secs(10);
    assert_eq!(guard.press(true, false, later), BackOutcome::Primed);
    assert_eq!(
        guard.press(true, false, later + Duration::from_secs(2)),
        BackOutcome::Primed
    );
}

#[tokio::test]
async fn posted_comment_is_appended_without_refetch() {
    let temp = tempdir().expect("temp dir");
    let fake = FakeBackend::new()
        .with_user("alice", "secret1")
        .with_row(tables::SHORTS, short_row("s1"))
        .with_row(
            tables::PROFILES,
            json!({ "user_id": "user-1", "username": "alice", "avatar_url": null }),
        )
        .shared();
    let mut app = boot(&temp, &fake);

    let credentials = Credentials::new("alice", "secret1").expect("valid credentials");
    let _ = app.update(Message::SignedIn(
        session::sign_in(fake.clone(), credentials).await,
    ));
    let generation = app.feed().generation();
    let _ = app.update(Message::FeedLoaded {
        generation,
        snapshot: feed::load_feed(fake.clone()).await,
    });

    let _ = app.update(feed_message(shorts::Message::OpenComments("s1".into())));
    let _ = app.update(Message::CommentsLoaded {
        short_id: "s1".into(),
        result: feed::load_comments(fake.clone(), "s1".into()).await,
    });
    assert!(app.feed().comments().items().is_empty());
    let comment_count = app.feed().reactions().comment_count("s1");

    let _ = app.update(feed_message(shorts::Message::Comments(
        comments::Message::DraftChanged("  Great clip  ".into()),
    )));
    let _ = app.update(feed_message(shorts::Message::Comments(comments::Message::Submit)));
    assert!(app.feed().comments().is_posting());

    let user_id = app.session().user_id().expect("signed in").to_string();
    let posted = feed::post_comment(fake.clone(), "s1".into(), user_id, "Great clip".into()).await;
    let selects_before = fake
        .calls()
        .iter()
        .filter(|call| *call == "select:short_comments")
        .count();
    let _ = app.update(Message::CommentPosted {
        short_id: "s1".into(),
        result: posted,
    });

    let items = app.feed().comments().items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].comment.content, "Great clip");
    assert_eq!(items[0].username, "alice");
    assert_eq!(
        app.feed().reactions().comment_count("s1"),
        comment_count + 1
    );
    assert!(app.feed().comments().draft().is_empty());
    let selects_after = fake
        .calls()
        .iter()
        .filter(|call| *call == "select:short_comments")
        .count();
    assert_eq!(selects_before, selects_after);
}
