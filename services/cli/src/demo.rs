use crate::infra::{load_resume, InMemoryBoard};
use clap::Args;
use job_harbour::error::AppError;
use job_harbour::workflows::applications::{
    ApplicationField, ApplicationListController, ApplicationSubmissionController, ResumeFile,
};
use job_harbour::workflows::jobs::{
    JobBoardController, JobField, JobId, JobLifecycleController, JobPostingController,
};
use job_harbour::workflows::validation::AttachmentPolicy;
use job_harbour::workflows::{ListView, Role, SessionContext, User, UserId};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Resume to attach for the job seeker. Defaults to a small generated PDF.
    #[arg(long)]
    pub(crate) resume: Option<PathBuf>,
    /// Skip the job seeker's application and the employer's review of it.
    #[arg(long)]
    pub(crate) skip_application: bool,
    /// Print each list view as JSON in addition to the summary lines.
    #[arg(long)]
    pub(crate) json: bool,
}

fn session(role: Role) -> SessionContext {
    let (id, name, email) = match role {
        Role::Employer => ("emp-1", "Harbour Logistics", "hiring@harbour.example"),
        Role::JobSeeker => ("seek-1", "Ada Quayside", "ada@quayside.example"),
    };
    SessionContext::signed_in(User {
        id: UserId(id.to_string()),
        name: name.to_string(),
        email: email.to_string(),
        role,
    })
}

fn print_json<T: serde::Serialize>(enabled: bool, label: &str, value: &T) -> Result<(), AppError> {
    if enabled {
        println!("  {label}:\n{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs, policy: AttachmentPolicy) -> Result<(), AppError> {
    let DemoArgs {
        resume,
        skip_application,
        json,
    } = args;

    let board = Arc::new(InMemoryBoard::default());
    let employer = session(Role::Employer);
    let seeker = session(Role::JobSeeker);

    println!("Job Harbour workflow demo");
    let job_id = post_job(&employer, &board).await?;

    let browse = JobBoardController::open(seeker.clone(), board.clone())?;
    let jobs = browse.load_all().await?;
    println!("\nJob seeker browses {} open job(s)", jobs.len());
    let details = browse.details(&job_id).await?;
    println!(
        "- {} in {}, {} [{}] apply: {}",
        details.job.title,
        details.job.city,
        details.job.country,
        details.status,
        details
            .apply
            .as_ref()
            .map(|target| target.path())
            .unwrap_or_else(|| "not offered".to_string())
    );

    if !skip_application {
        apply(&seeker, &job_id, &board, policy, resume).await?;
        review(&employer, &seeker, &board, json).await?;
    }

    manage(&employer, &job_id, &board, json).await?;

    browse.load_all().await?;
    println!(
        "\nJob board after expiry shows {} open job(s)",
        browse.jobs().len()
    );
    Ok(())
}

async fn post_job(employer: &SessionContext, board: &Arc<InMemoryBoard>) -> Result<JobId, AppError> {
    let posting = JobPostingController::open(employer, board.clone())?;
    println!("\nEmployer posts a job");

    posting.set_field(JobField::Title, "Crane Operator");
    posting.set_field(JobField::FixedSalary, "-1");
    if let Err(err) = posting.submit().await {
        println!("  Post refused: {}", err.user_message());
        if let Some(errors) = err.field_errors() {
            for (field, error) in errors.iter() {
                println!("    {field}: {}", error.message);
            }
        }
    }

    for (field, value) in [
        (JobField::Description, "Operate the container cranes on the north pier."),
        (JobField::Category, "Other"),
        (JobField::Country, "Netherlands"),
        (JobField::City, "Rotterdam"),
        (JobField::Location, "On-site"),
        (JobField::FixedSalary, "54000"),
    ] {
        posting.set_field(field, value);
    }
    let posted = posting.submit().await?;
    println!("  {} -> {}", posted.message, posted.navigate_to.path());

    // The collaborator may omit the record; fall back to the employer's list.
    match posted.job {
        Some(job) => Ok(job.id),
        None => {
            let lifecycle = JobLifecycleController::open(employer, board.clone())?;
            let jobs = lifecycle.load().await?;
            jobs.last()
                .map(|job| job.id.clone())
                .ok_or_else(|| AppError::Io(std::io::Error::other("posted job not listed")))
        }
    }
}

async fn apply(
    seeker: &SessionContext,
    job_id: &JobId,
    board: &Arc<InMemoryBoard>,
    policy: AttachmentPolicy,
    resume: Option<PathBuf>,
) -> Result<(), AppError> {
    let form = ApplicationSubmissionController::open(seeker, job_id.clone(), board.clone(), policy)?;
    println!("\nJob seeker applies");

    form.set_field(ApplicationField::Name, "Ada Quayside");
    form.set_field(ApplicationField::Email, "ada@quayside.example");
    form.set_field(ApplicationField::Phone, "12345");
    form.set_field(ApplicationField::Address, "Wilhelminakade 1, Rotterdam");
    form.set_field(ApplicationField::CoverLetter, "Ten years on gantry cranes.");

    let oversized = ResumeFile::new(
        "portfolio.pdf",
        "application/pdf",
        vec![0; (policy.max_bytes() + 1) as usize],
    );
    if let Err(err) = form.attach_file(oversized) {
        println!("  Attachment refused: {err}");
    }

    let resume = match resume {
        Some(path) => load_resume(&path)?,
        None => ResumeFile::new("resume.pdf", "application/pdf", b"%PDF-1.4 demo".to_vec()),
    };
    form.attach_file(resume)?;

    if let Err(err) = form.submit().await {
        println!("  Submission refused: {}", err.user_message());
        for (field, error) in form.errors().iter() {
            println!("    {field}: {}", error.message);
        }
    }

    form.set_field(ApplicationField::Phone, "0612345678");
    let receipt = form.submit().await?;
    println!("  {} -> {}", receipt.message, receipt.navigate_to.path());
    Ok(())
}

async fn review(
    employer: &SessionContext,
    seeker: &SessionContext,
    board: &Arc<InMemoryBoard>,
    json: bool,
) -> Result<(), AppError> {
    let applicants = ApplicationListController::open(employer.clone(), board.clone())?;
    applicants.load().await?;
    let view = applicants.view();
    println!("\n{}", view.title);
    for card in view.body.rows() {
        println!(
            "- {} <{}> for {} (resume {})",
            card.application.name, card.application.email, card.job_title, card.application.resume.url
        );
    }
    if let Some(card) = view.body.rows().first() {
        applicants.open_resume_preview(card.application.resume.url.clone());
        print_json(json, "preview", &applicants.preview())?;
        applicants.close_preview();
    }
    print_json(json, "applicant list", &view)?;

    let mine = ApplicationListController::open(seeker.clone(), board.clone())?;
    mine.load().await?;
    let withdrawn: Vec<_> = mine.applications().into_iter().map(|app| app.id).collect();
    for id in &withdrawn {
        let ack = mine.delete(id).await?;
        println!("\nJob seeker withdraws {id}: {}", ack.message);
    }
    let view = mine.view();
    if let ListView::Empty { action } = &view.body {
        println!(
            "  {}: {}",
            view.notice.unwrap_or_default(),
            action
                .as_ref()
                .map(|target| target.path())
                .unwrap_or_default()
        );
    }
    print_json(json, "my applications", &view)?;
    Ok(())
}

async fn manage(
    employer: &SessionContext,
    job_id: &JobId,
    board: &Arc<InMemoryBoard>,
    json: bool,
) -> Result<(), AppError> {
    let lifecycle = JobLifecycleController::open(employer, board.clone())?;
    lifecycle.load().await?;
    println!("\nEmployer manages their jobs");

    lifecycle.enable_edit(job_id)?;
    lifecycle.update_field_raw(job_id, JobField::FixedSalary, "58000")?;
    let ack = lifecycle.commit_update(job_id).await?;
    println!("  Salary raised: {}", ack.message);

    lifecycle.enable_edit(job_id)?;
    lifecycle.update_field_raw(job_id, JobField::City, "Antwerp")?;
    lifecycle.disable_edit()?;
    if let Some(job) = lifecycle.job(job_id) {
        println!("  Cancelled city edit, still in {}", job.city);
    }

    let toggled = lifecycle.toggle_expiry(job_id).await?;
    println!("  {} is now {}", toggled.title, toggled.status().label());
    print_json(json, "my jobs", &lifecycle.view())?;
    Ok(())
}
