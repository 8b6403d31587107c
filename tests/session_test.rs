//! End-to-end session tests against real repositories with a scripted operator.

mod common;

use grapho::error::{GitError, SessionError};
use grapho::form::Event;
use grapho::session::{SessionConfig, SessionOutcome, run_session};

use common::{ScriptedOperator, TestRepo};

fn staged_repo() -> TestRepo {
    let repo = TestRepo::new();
    repo.commit_file("src.txt", "v1\n", "chore: init");
    repo.write("src.txt", "v2\n");
    repo.stage("src.txt");
    repo
}

#[test]
fn test_session_commits_full_message() {
    let repo = staged_repo();
    // feat is first in the list
    let mut operator = ScriptedOperator::filling(
        0,
        "auth",
        true,
        "Introduce SSO login",
        "This enables single sign-on functionality for external providers.",
        true,
    );

    let outcome = run_session(&SessionConfig::default(), &repo.backend(), &mut operator).unwrap();

    let SessionOutcome::Committed(written) = outcome else {
        panic!("expected a commit, got {:?}", outcome);
    };
    let summary = written.summary.expect("new commit should be readable");
    assert_eq!(summary.id, written.id);
    assert_eq!(summary.subject(), "feat(auth)!: Introduce SSO login");
    assert_eq!(
        repo.head_message(),
        "feat(auth)!: Introduce SSO login\n\nThis enables single sign-on functionality for external providers."
    );
    assert_eq!(repo.commit_count(), 2);
}

#[test]
fn test_session_refuses_unstaged_repository() {
    let repo = TestRepo::new();
    repo.commit_file("src.txt", "v1\n", "chore: init");
    repo.write("src.txt", "v2\n");

    let mut operator = ScriptedOperator::filling(1, "", false, "Fix it", "", true);
    let err = run_session(&SessionConfig::default(), &repo.backend(), &mut operator).unwrap_err();

    assert!(matches!(err, SessionError::Git(GitError::NoStagedChanges)));
    assert_eq!(operator.confirmations, 0);
    assert!(operator.last_view.is_empty(), "form should never be shown");
    assert_eq!(repo.commit_count(), 1);
}

#[test]
fn test_dry_run_prints_without_committing() {
    let repo = TestRepo::new();
    repo.commit_file("src.txt", "v1\n", "chore: init");

    let config = SessionConfig {
        dry_run: true,
        message: None,
    };
    let mut operator = ScriptedOperator::filling(1, "auth", false, "Fix login issue", "", true);
    let outcome = run_session(&config, &repo.backend(), &mut operator).unwrap();

    assert_eq!(outcome, SessionOutcome::DryRun("fix(auth): Fix login issue".to_string()));
    assert_eq!(operator.confirmations, 0);
    assert_eq!(repo.commit_count(), 1);
}

#[test]
fn test_seeded_message_prefills_description() {
    let repo = staged_repo();
    let config = SessionConfig {
        dry_run: true,
        message: Some("x".repeat(80)),
    };
    // Accept type, scope, breaking, then the seeded description and an empty body.
    let mut operator = ScriptedOperator::new(
        [Event::Enter, Event::Enter, Event::Enter, Event::Enter, Event::Tab],
        true,
    );

    let outcome = run_session(&config, &repo.backend(), &mut operator).unwrap();
    assert_eq!(outcome, SessionOutcome::DryRun(format!("feat: {}", "x".repeat(60))));
}

#[test]
fn test_live_remaining_count_is_rendered() {
    let repo = staged_repo();
    let config = SessionConfig {
        dry_run: true,
        message: Some("Fix".to_string()),
    };
    let mut operator = ScriptedOperator::new([Event::Enter, Event::Enter, Event::Enter, Event::Escape], true);

    let outcome = run_session(&config, &repo.backend(), &mut operator).unwrap();
    assert_eq!(outcome, SessionOutcome::Cancelled);
    assert!(
        operator
            .last_view
            .contains("What is the commit about at a high level? 57 characters remaining"),
        "view was:\n{}",
        operator.last_view
    );
}

#[test]
fn test_cancel_leaves_repository_unmodified() {
    let repo = staged_repo();
    let mut operator = ScriptedOperator::new(
        [Event::Enter, Event::Enter, Event::Enter, Event::Char('a'), Event::Interrupt],
        true,
    );

    let outcome = run_session(&SessionConfig::default(), &repo.backend(), &mut operator).unwrap();

    assert_eq!(outcome, SessionOutcome::Cancelled);
    assert_eq!(operator.confirmations, 0);
    assert_eq!(repo.commit_count(), 1);
    assert_eq!(repo.head_message(), "chore: init");
}

#[test]
fn test_declined_confirmation_leaves_repository_unmodified() {
    let repo = staged_repo();
    let mut operator = ScriptedOperator::filling(2, "", false, "Bump toolchain", "", false);

    let outcome = run_session(&SessionConfig::default(), &repo.backend(), &mut operator).unwrap();

    assert_eq!(outcome, SessionOutcome::Declined);
    assert_eq!(operator.confirmations, 1);
    assert_eq!(repo.commit_count(), 1);
}

#[test]
fn test_empty_description_blocks_until_filled() {
    let repo = staged_repo();
    let config = SessionConfig {
        dry_run: true,
        message: None,
    };
    let mut operator = ScriptedOperator::new(
        [
            Event::Enter,
            Event::Enter,
            Event::Enter,
            // Empty description is refused and focus stays.
            Event::Enter,
            Event::Tab,
            Event::Char('O'),
            Event::Char('k'),
            Event::Enter,
            Event::Tab,
        ],
        true,
    );

    let outcome = run_session(&config, &repo.backend(), &mut operator).unwrap();
    assert_eq!(outcome, SessionOutcome::DryRun("feat: Ok".to_string()));
}
