//! Job matcher: score and rank job postings against a resume

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use job_matcher::cli::{self, Cli, Commands, ConfigAction};
use job_matcher::config::{Config, OutputFormat};
use job_matcher::error::{JobMatcherError, Result};
use job_matcher::input::InputManager;
use job_matcher::matching::ranking::rank_jobs_with_progress;
use job_matcher::matching::MatchScorer;
use job_matcher::output::formatter::save_report_to_file;
use job_matcher::output::ReportGenerator;
use job_matcher::profile::ResumeProfile;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

const DOCUMENT_EXTENSIONS: &[&str] = &["txt", "md", "markdown"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let format = match cli.format.as_deref().map(cli::parse_output_format) {
        Some(Ok(format)) => format,
        Some(Err(e)) => {
            error!("{}", e);
            process::exit(2);
        }
        None => config.output.format,
    };

    if let Err(e) = run_command(cli.command, config, format, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn read_document(input: &mut InputManager, path: &Path, label: &str) -> Result<String> {
    cli::validate_file_extension(path, DOCUMENT_EXTENSIONS)
        .map_err(|e| JobMatcherError::InvalidInput(format!("{} file: {}", label, e)))?;
    input.extract_text(path).await
}

fn emit(content: &str, save: Option<&Path>) -> Result<()> {
    match save {
        Some(path) => {
            save_report_to_file(content, path)?;
            info!("Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

async fn run_command(command: Commands, config: Config, format: OutputFormat, config_path: Option<PathBuf>) -> Result<()> {
    let mut input = InputManager::new();

    match command {
        Commands::Score {
            resume,
            job,
            requirements,
            save,
        } => {
            let scorer = MatchScorer::from_config(&config.scoring)?;

            let resume_text = read_document(&mut input, &resume, "Resume").await?;
            let description = read_document(&mut input, &job, "Job description").await?;
            let requirements = match requirements {
                Some(path) => read_document(&mut input, &path, "Job requirements").await?,
                None => String::new(),
            };

            info!("Scoring {} against {}", resume.display(), job.display());
            let result = scorer.calculate_match_score(&resume_text, &description, &requirements);

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                config.output.detailed,
                true,
                true,
            );
            emit(&generator.generate_match(&result, &format)?, save.as_deref())?;
        }

        Commands::Rank {
            resume,
            jobs,
            limit,
            min_score,
            query,
            include_closed,
            require_skill_match,
            detailed,
            save,
        } => {
            let scorer = Arc::new(MatchScorer::from_config(&config.scoring)?);

            let resume_text = read_document(&mut input, &resume, "Resume").await?;
            let pool = input.load_job_pool(&jobs).await?;

            let mut options = config.ranking.options();
            if let Some(limit) = limit {
                options.limit = limit;
            }
            if let Some(min_score) = min_score {
                options.min_score = min_score;
            }
            if include_closed {
                options.skip_closed = false;
            }
            if require_skill_match {
                options.require_skill_match = true;
            }
            options.query = query;

            let progress = ProgressBar::new(pool.len() as u64);
            progress.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner} Scoring jobs [{bar:40}] {pos}/{len}")
                    .map_err(|e| JobMatcherError::OutputFormatting(e.to_string()))?,
            );

            let report = rank_jobs_with_progress(scorer, &resume_text, pool, &options, Some(progress)).await?;

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                true,
                true,
            );
            emit(&generator.generate_ranking(&report, &format)?, save.as_deref())?;
        }

        Commands::Skills { input: path } => {
            let scorer = MatchScorer::from_config(&config.scoring)?;
            let text = read_document(&mut input, &path, "Input").await?;
            let skills: Vec<String> = scorer.extract_skills(&text).into_iter().collect();

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&skills)?),
                OutputFormat::Console | OutputFormat::Markdown => {
                    println!("Found {} of {} known skills", skills.len(), scorer.vocabulary().len());
                    for skill in &skills {
                        println!("  • {}", skill);
                    }
                }
            }
        }

        Commands::Profile { input: path } => {
            let scorer = MatchScorer::from_config(&config.scoring)?;
            let text = read_document(&mut input, &path, "Resume").await?;
            let profile = ResumeProfile::from_text(&text, scorer.vocabulary());

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&profile)?),
                OutputFormat::Console | OutputFormat::Markdown => print_profile(&profile),
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| JobMatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", content);
            }
            Some(ConfigAction::Path) => {
                let path = config_path.unwrap_or_else(Config::config_path);
                println!("{}", path.display());
            }
            Some(ConfigAction::Reset) => {
                let path = config_path.unwrap_or_else(Config::config_path);
                Config::default().save_to(&path)?;
                println!("Configuration reset: {}", path.display());
            }
        },
    }

    Ok(())
}

fn print_profile(profile: &ResumeProfile) {
    let info = &profile.personal_info;
    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    println!("Name:     {}", show(&info.name));
    println!("Email:    {}", show(&info.email));
    println!("Phone:    {}", show(&info.phone));
    println!("LinkedIn: {}", show(&info.linkedin));
    println!("\nSkills ({}): {}", profile.total_skills(), profile.skills.join(", "));

    if !profile.experience.is_empty() {
        println!("\nExperience:");
        for line in &profile.experience {
            println!("  • {}", line);
        }
    }

    if !profile.education.is_empty() {
        println!("\nEducation:");
        for line in &profile.education {
            println!("  • {}", line);
        }
    }
}
