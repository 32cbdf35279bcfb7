use super::common::*;
use crate::workflows::access::{AccessDecision, SessionContext};
use crate::workflows::collaborator::{CollaboratorError, Operation};
use crate::workflows::error::WorkflowError;
use crate::workflows::jobs::JobBoardController;
use crate::workflows::navigation::Navigation;
use crate::workflows::view::ListView;

#[test]
fn signed_out_visitors_are_sent_to_login() {
    let gateway = MemoryJobs::with_jobs(Vec::new());
    match JobBoardController::open(SessionContext::anonymous(), gateway) {
        Err(WorkflowError::AccessDenied { decision, .. }) => {
            assert_eq!(decision, AccessDecision::RedirectToLogin)
        }
        other => panic!("expected login redirect, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn any_signed_in_role_can_browse() {
    let gateway = MemoryJobs::with_jobs(vec![job("j1", "Harbour Engineer")]);
    for session in [employer(), seeker()] {
        let board = JobBoardController::open(session, gateway.clone()).expect("board opens");
        board.load_all().await.expect("jobs load");
        assert_eq!(board.view().rows().len(), 1);
    }
}

#[tokio::test]
async fn failed_fetch_shows_no_rows() {
    let gateway = MemoryJobs::with_jobs(vec![job("j1", "Harbour Engineer")]);
    gateway
        .script
        .fail(Operation::FetchJobs, CollaboratorError::Rejected { message: None });
    let board = JobBoardController::open(seeker(), gateway).expect("board opens");

    board.load_all().await.expect_err("fetch fails");
    assert!(board.jobs().is_empty());
    assert_eq!(board.view(), ListView::Failed("Failed to fetch jobs".to_string()));
}

#[tokio::test]
async fn details_offer_apply_to_job_seekers_only() {
    let gateway = MemoryJobs::with_jobs(vec![job("j1", "Harbour Engineer")]);
    let id = job_id("j1");

    let seeker_board = JobBoardController::open(seeker(), gateway.clone()).expect("board opens");
    let details = seeker_board.details(&id).await.expect("details load");
    assert!(details.can_apply);
    assert_eq!(details.apply, Some(Navigation::Apply(id.clone())));
    assert_eq!(details.status, "Active");

    let employer_board = JobBoardController::open(employer(), gateway).expect("board opens");
    let details = employer_board.details(&id).await.expect("details load");
    assert!(!details.can_apply);
    assert_eq!(details.apply, None);

    let missing = employer_board
        .details(&job_id("gone"))
        .await
        .expect_err("unknown job");
    assert_eq!(missing.user_message(), "Job not found.");
}
