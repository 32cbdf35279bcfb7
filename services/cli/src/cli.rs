use crate::demo::{run_demo, DemoArgs};
use crate::infra::load_resume;
use clap::{Args, Parser, Subcommand};
use job_harbour::config::AppConfig;
use job_harbour::error::AppError;
use job_harbour::telemetry;
use job_harbour::workflows::applications::{ApplicationDraft, APPLICATION_SCHEMA, RESUME_FIELD};
use job_harbour::workflows::jobs::{JobPostDraft, JOB_SCHEMA};
use job_harbour::workflows::validation::{self, AttachmentPolicy, ErrorMap};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Job Harbour",
    about = "Check job board forms and walk through the hiring workflow from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a form payload without sending it anywhere
    Validate {
        #[command(subcommand)]
        command: ValidateCommand,
    },
    /// Run the employer and job seeker workflows against an in-memory board
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ValidateCommand {
    /// Validate an application form, optionally with a resume file from disk
    Application(ApplicationArgs),
    /// Validate a new job posting
    Job(JobArgs),
}

#[derive(Args, Debug)]
struct ApplicationArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    /// Ten digit phone number
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    address: String,
    #[arg(long, default_value = "")]
    cover_letter: String,
    /// Resume to attach (PDF, JPG or PNG); the type is guessed from the extension
    #[arg(long)]
    resume: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct JobArgs {
    #[arg(long, default_value = "")]
    title: String,
    #[arg(long, default_value = "")]
    description: String,
    /// One of Development, Design, Marketing, Sales, Other
    #[arg(long, default_value = "")]
    category: String,
    #[arg(long, default_value = "")]
    country: String,
    #[arg(long, default_value = "")]
    city: String,
    /// One of Remote, On-site, Hybrid
    #[arg(long, default_value = "")]
    location: String,
    #[arg(long, default_value = "")]
    salary: String,
}

#[derive(Debug, Serialize)]
struct ValidationReport<'a> {
    form: &'a str,
    valid: bool,
    errors: ErrorMap,
}

impl<'a> ValidationReport<'a> {
    fn new(form: &'a str, errors: ErrorMap) -> Self {
        Self {
            form,
            valid: errors.is_empty(),
            errors,
        }
    }
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(environment = ?config.environment, "job harbour cli starting");

    let policy = config.uploads.attachment_policy();
    match cli.command {
        Command::Validate {
            command: ValidateCommand::Application(args),
        } => validate_application(args, policy),
        Command::Validate {
            command: ValidateCommand::Job(args),
        } => validate_job(args),
        Command::Demo(args) => run_demo(args, policy).await,
    }
}

fn validate_application(args: ApplicationArgs, policy: AttachmentPolicy) -> Result<(), AppError> {
    let resume = args.resume.as_deref().map(load_resume).transpose()?;
    let mut draft = ApplicationDraft {
        name: args.name,
        email: args.email,
        phone: args.phone,
        address: args.address,
        cover_letter: args.cover_letter,
        ..ApplicationDraft::default()
    };

    let attachment = resume.as_ref().map(|file| policy.check(&file.mime_type, file.size));
    draft.resume = resume;
    let mut errors = validation::validate(&draft, &APPLICATION_SCHEMA);
    if let Some(Err(error)) = attachment {
        errors.insert(RESUME_FIELD, error.to_field_error());
    }

    print_report(&ValidationReport::new(APPLICATION_SCHEMA.name, errors))
}

fn validate_job(args: JobArgs) -> Result<(), AppError> {
    let draft = JobPostDraft {
        title: args.title,
        description: args.description,
        category: args.category,
        country: args.country,
        city: args.city,
        location: args.location,
        fixed_salary: args.salary,
    };

    let errors = validation::validate(&draft, &JOB_SCHEMA);
    print_report(&ValidationReport::new(JOB_SCHEMA.name, errors))
}

fn print_report(report: &ValidationReport<'_>) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
