//! End-to-end scenarios across the public controllers, driven against one shared in-memory
//! board so a posting made by an employer is what the job seeker browses and applies to.

mod common {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use job_harbour::workflows::applications::{
        Application, ApplicationGateway, ApplicationId, ApplicationSubmission, ResumeRef,
    };
    use job_harbour::workflows::jobs::{Job, JobGateway, JobId, NewJob, PostJobReceipt};
    use job_harbour::workflows::{Acknowledgement, CollaboratorError, Role, SessionContext, User, UserId};

    pub(super) fn session(role: Role) -> SessionContext {
        let (id, name) = match role {
            Role::Employer => ("u-1", "Harbour Logistics"),
            Role::JobSeeker => ("u-2", "Ada Quayside"),
        };
        SessionContext::signed_in(User {
            id: UserId(id.to_string()),
            name: name.to_string(),
            email: format!("{id}@harbour.test"),
            role,
        })
    }

    #[derive(Default)]
    struct Store {
        jobs: Vec<Job>,
        applications: Vec<Application>,
        next_id: u32,
    }

    /// Both collaborators over one store, the way the real backend shares a database.
    #[derive(Default, Clone)]
    pub(super) struct Board {
        store: Arc<Mutex<Store>>,
    }

    impl Board {
        pub(super) fn jobs(&self) -> Vec<Job> {
            self.store.lock().expect("store mutex poisoned").jobs.clone()
        }
    }

    #[async_trait]
    impl JobGateway for Board {
        async fn fetch_all_jobs(&self) -> Result<Vec<Job>, CollaboratorError> {
            let store = self.store.lock().expect("store mutex poisoned");
            Ok(store.jobs.iter().filter(|job| !job.expired).cloned().collect())
        }

        async fn fetch_job(&self, id: &JobId) -> Result<Job, CollaboratorError> {
            let store = self.store.lock().expect("store mutex poisoned");
            store
                .jobs
                .iter()
                .find(|job| &job.id == id)
                .cloned()
                .ok_or_else(|| CollaboratorError::rejected("Job not found."))
        }

        async fn fetch_my_jobs(&self) -> Result<Vec<Job>, CollaboratorError> {
            Ok(self.jobs())
        }

        async fn post_job(&self, job: &NewJob) -> Result<PostJobReceipt, CollaboratorError> {
            let mut store = self.store.lock().expect("store mutex poisoned");
            store.next_id += 1;
            let posted = Job {
                id: JobId(format!("job-{}", store.next_id)),
                title: job.title.clone(),
                description: job.description.clone(),
                category: job.category,
                country: job.country.clone(),
                city: job.city.clone(),
                location: job.location,
                fixed_salary: job.fixed_salary,
                expired: false,
                posted_on: Utc
                    .with_ymd_and_hms(2025, 6, 1, 8, 0, 0)
                    .single()
                    .expect("valid timestamp"),
            };
            store.jobs.push(posted.clone());
            Ok(PostJobReceipt {
                success: true,
                message: "Job posted successfully!".to_string(),
                job: Some(posted),
            })
        }

        async fn update_job(&self, id: &JobId, job: &Job) -> Result<Acknowledgement, CollaboratorError> {
            let mut store = self.store.lock().expect("store mutex poisoned");
            let stored = store
                .jobs
                .iter_mut()
                .find(|stored| &stored.id == id)
                .ok_or_else(|| CollaboratorError::rejected("Job not found!"))?;
            *stored = job.clone();
            Ok(Acknowledgement::new("Job Updated!"))
        }

        async fn delete_job(&self, id: &JobId) -> Result<Acknowledgement, CollaboratorError> {
            let mut store = self.store.lock().expect("store mutex poisoned");
            store.jobs.retain(|job| &job.id != id);
            Ok(Acknowledgement::new("Job Deleted!"))
        }
    }

    #[async_trait]
    impl ApplicationGateway for Board {
        async fn submit_application(
            &self,
            submission: &ApplicationSubmission,
        ) -> Result<Acknowledgement, CollaboratorError> {
            let mut store = self.store.lock().expect("store mutex poisoned");
            let job_title = store
                .jobs
                .iter()
                .find(|job| job.id == submission.job_id)
                .map(|job| job.title.clone())
                .ok_or_else(|| CollaboratorError::rejected("Job not found!"))?;
            store.next_id += 1;
            let id = ApplicationId(format!("app-{}", store.next_id));
            store.applications.push(Application {
                resume: ResumeRef {
                    url: format!("https://files.harbour.test/{id}"),
                    mime_type: submission.resume.mime_type.clone(),
                    size: submission.resume.size,
                },
                id,
                name: submission.name.clone(),
                email: submission.email.clone(),
                phone: submission.phone.clone(),
                address: submission.address.clone(),
                cover_letter: submission.cover_letter.clone(),
                job_id: submission.job_id.clone(),
                job_title: Some(job_title),
            });
            Ok(Acknowledgement::new("Application Submitted!"))
        }

        async fn fetch_applications(&self, _role: Role) -> Result<Vec<Application>, CollaboratorError> {
            Ok(self
                .store
                .lock()
                .expect("store mutex poisoned")
                .applications
                .clone())
        }

        async fn delete_application(
            &self,
            id: &ApplicationId,
        ) -> Result<Acknowledgement, CollaboratorError> {
            self.store
                .lock()
                .expect("store mutex poisoned")
                .applications
                .retain(|application| &application.id != id);
            Ok(Acknowledgement::new("Application Deleted!"))
        }
    }
}

use std::sync::Arc;

use common::*;
use job_harbour::workflows::applications::{
    ApplicationField, ApplicationListController, ApplicationSubmissionController, ResumeFile,
};
use job_harbour::workflows::jobs::{
    Job, JobBoardController, JobField, JobLifecycleController, JobPostingController,
};
use job_harbour::workflows::validation::AttachmentPolicy;
use job_harbour::workflows::{ListView, Navigation, Role};

#[tokio::test]
async fn posted_job_flows_from_employer_to_applicant_and_back() {
    let board = Arc::new(Board::default());
    let employer = session(Role::Employer);
    let seeker = session(Role::JobSeeker);

    let posting = JobPostingController::open(&employer, board.clone()).expect("employer posts");
    for (field, value) in [
        (JobField::Title, "Crane Operator"),
        (JobField::Description, "Operate the container cranes on the north pier."),
        (JobField::Category, "Other"),
        (JobField::Country, "Netherlands"),
        (JobField::City, "Rotterdam"),
        (JobField::Location, "On-site"),
        (JobField::FixedSalary, "54000"),
    ] {
        posting.set_field(field, value);
    }
    let posted = posting.submit().await.expect("job posted");
    let job_id = posted.job.expect("posted job echoed").id;

    let browse = JobBoardController::open(seeker.clone(), board.clone()).expect("seeker browses");
    browse.load_all().await.expect("board loads");
    let details = browse.details(&job_id).await.expect("details load");
    assert_eq!(details.apply, Some(Navigation::Apply(job_id.clone())));

    let apply = ApplicationSubmissionController::open(
        &seeker,
        job_id.clone(),
        board.clone(),
        AttachmentPolicy::default(),
    )
    .expect("seeker applies");
    apply.set_field(ApplicationField::Name, "Ada Quayside");
    apply.set_field(ApplicationField::Email, "ada@harbour.test");
    apply.set_field(ApplicationField::Phone, "0612345678");
    apply.set_field(ApplicationField::Address, "Wilhelminakade 1");
    apply.set_field(ApplicationField::CoverLetter, "Ten years on gantry cranes.");
    apply
        .attach_file(ResumeFile::new("cv.pdf", "application/pdf", vec![1; 4096]))
        .expect("resume attached");
    let receipt = apply.submit().await.expect("application submitted");
    assert_eq!(receipt.navigate_to, Navigation::Jobs);

    let applicants =
        ApplicationListController::open(employer.clone(), board.clone()).expect("employer lists");
    applicants.load().await.expect("applications load");
    let view = applicants.view();
    assert_eq!(view.body.rows()[0].job_title, "Crane Operator");
    assert!(!view.body.rows()[0].can_delete);

    let mine = ApplicationListController::open(seeker.clone(), board.clone()).expect("seeker lists");
    mine.load().await.expect("applications load");
    let application_id = mine.applications()[0].id.clone();
    mine.delete(&application_id).await.expect("application withdrawn");
    assert!(matches!(mine.view().body, ListView::Empty { .. }));

    let lifecycle = JobLifecycleController::open(&employer, board.clone()).expect("employer manages");
    lifecycle.load().await.expect("my jobs load");
    lifecycle.toggle_expiry(&job_id).await.expect("job expired");
    assert!(board.jobs()[0].expired);

    browse.load_all().await.expect("board reloads");
    assert!(browse.jobs().is_empty());
}

#[test]
fn wire_records_use_backend_field_names() {
    let payload = serde_json::json!({
        "_id": "665f1c2e",
        "title": "Deckhand",
        "description": "Keep the ferry shipshape.",
        "category": "Other",
        "country": "Norway",
        "city": "Tromsø",
        "location": "Remote",
        "fixedSalary": 41000,
        "postedOn": "2025-05-04T10:00:00Z"
    });

    let job: Job = serde_json::from_value(payload).expect("job deserializes");
    assert!(!job.expired);
    assert_eq!(job.fixed_salary, 41000.0);

    let encoded = serde_json::to_value(&job).expect("job serializes");
    assert_eq!(encoded["_id"], "665f1c2e");
    assert_eq!(encoded["fixedSalary"], 41000.0);
    assert_eq!(encoded["expired"], false);
}
