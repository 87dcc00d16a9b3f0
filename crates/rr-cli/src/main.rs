use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use rr_core::extraction::extract_facts;
use rr_core::matching::feedback::suggest;
use rr_core::report::{render_table, write_report};
use rr_core::{analyze_one, rank_many, JobRequirements, ResumeFacts};

#[derive(Parser)]
#[command(name = "rr", about = "Score and rank resumes against a job description")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank a batch of resumes for a reviewer.
    Rank {
        /// Plain-text file holding the job description.
        #[arg(long)]
        job: PathBuf,
        /// Required skills, comma separated.
        #[arg(long, value_delimiter = ',')]
        skills: Vec<String>,
        /// Minimum experience in years.
        #[arg(long, default_value_t = 0)]
        min_years: u32,
        /// Job title for the report; defaults to the job file stem.
        #[arg(long)]
        title: Option<String>,
        /// Write the CSV report to this path.
        #[arg(long)]
        export: Option<PathBuf>,
        /// Emit the outcome as JSON instead of a table.
        #[arg(long)]
        json: bool,
        /// Plain-text resume files.
        #[arg(required = true)]
        resumes: Vec<PathBuf>,
    },
    /// Check a single resume against a job (job-seeker mode).
    Check {
        #[arg(long)]
        job: PathBuf,
        #[arg(long, value_delimiter = ',')]
        skills: Vec<String>,
        #[arg(long, default_value_t = 0)]
        min_years: u32,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        json: bool,
        resume: PathBuf,
    },
}

fn main() -> ExitCode {
    rr_core::logging::init_tracing_subscriber("rr-cli");
    let cli = Cli::parse();

    match cli.command {
        Command::Rank {
            job,
            skills,
            min_years,
            title,
            export,
            json,
            resumes,
        } => run_rank(&job, skills, min_years, title, export.as_deref(), json, &resumes),
        Command::Check {
            job,
            skills,
            min_years,
            title,
            json,
            resume,
        } => run_check(&job, skills, min_years, title, json, &resume),
    }
}

fn run_rank(
    job_path: &Path,
    skills: Vec<String>,
    min_years: u32,
    title: Option<String>,
    export: Option<&Path>,
    json: bool,
    resume_paths: &[PathBuf],
) -> ExitCode {
    let Some(job) = load_job(job_path, skills, min_years, title) else {
        return ExitCode::FAILURE;
    };

    let resumes: Vec<ResumeFacts> = resume_paths.iter().map(|path| load_resume(path)).collect();

    let outcome = match rank_many(&resumes, &job) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::error!(error = %err, "ranking failed");
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                eprintln!("error: failed to serialize outcome: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", render_table(&outcome));
    }

    if let Some(path) = export {
        let file = match std::fs::File::create(path) {
            Ok(file) => file,
            Err(err) => {
                eprintln!("error: cannot create {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        };
        if let Err(err) = write_report(&outcome.ranked, file) {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
        tracing::info!(path = %path.display(), rows = outcome.ranked.len(), "report written");
    }

    ExitCode::SUCCESS
}

fn run_check(
    job_path: &Path,
    skills: Vec<String>,
    min_years: u32,
    title: Option<String>,
    json: bool,
    resume_path: &Path,
) -> ExitCode {
    let Some(job) = load_job(job_path, skills, min_years, title) else {
        return ExitCode::FAILURE;
    };

    let facts = load_resume(resume_path);
    let breakdown = analyze_one(&facts, &job);
    let suggestions = suggest(
        breakdown.skill_score,
        breakdown.similarity_score,
        breakdown.experience_score,
        &breakdown.missing_skills,
    );

    if json {
        let payload = serde_json::json!({
            "filename": facts.filename,
            "breakdown": breakdown,
            "suggestions": suggestions,
        });
        match serde_json::to_string_pretty(&payload) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                eprintln!("error: failed to serialize breakdown: {err}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    println!("{} vs {}", facts.filename, job.title);
    println!("  final score:      {:.3}", breakdown.final_score);
    println!("  skill match:      {:.3}", breakdown.skill_score);
    println!("  similarity:       {:.3}", breakdown.similarity_score);
    println!("  experience match: {:.3}", breakdown.experience_score);
    println!("  experience years: {}", facts.experience_years);
    if !breakdown.matched_skills.is_empty() {
        println!(
            "  matched skills:   {}",
            breakdown
                .matched_skills
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    println!();
    for suggestion in suggestions {
        println!("- {suggestion}");
    }

    ExitCode::SUCCESS
}

fn load_job(
    path: &Path,
    skills: Vec<String>,
    min_years: u32,
    title: Option<String>,
) -> Option<JobRequirements> {
    let description = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: cannot read job description {}: {err}", path.display());
            return None;
        }
    };

    let title = title.unwrap_or_else(|| {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string())
    });

    Some(JobRequirements {
        title,
        description,
        required_skills: skills,
        min_experience_years: min_years,
    })
}

/// Read failures become empty text: the resume still enters the batch
/// and scores as "no signal" instead of aborting the run.
fn load_resume(path: &Path) -> ResumeFacts {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let raw_text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to read resume; treating as empty");
            String::new()
        }
    };

    extract_facts(&filename, &raw_text)
}
