//! Resume scorer: keyword and section scoring of resumes against job descriptions

use clap::Parser;
use log::{error, info};
use resume_scorer::cli::{self, Cli, Commands, ConfigAction};
use resume_scorer::config::{Config, OutputFormat};
use resume_scorer::error::{Result, ResumeScorerError};
use resume_scorer::input::DocumentLoader;
use resume_scorer::output::formatter::save_report_to_file;
use resume_scorer::output::{ReportGenerator, ScoreReport};
use resume_scorer::processing::{detect_sections, extract_keywords};
use std::path::Path;
use std::process;

const INPUT_EXTENSIONS: &[&str] = &["pdf", "txt", "text", "md", "markdown"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run_command(cli.command, cli.config.as_deref()).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config_path: Option<&Path>) -> Result<()> {
    match command {
        Commands::Score {
            resume,
            job,
            output,
            detailed,
            save,
            weights,
        } => {
            cli::validate_file_extension(&resume, INPUT_EXTENSIONS).map_err(|e| {
                ResumeScorerError::InvalidInput(format!("Resume file: {}", e))
            })?;
            cli::validate_file_extension(&job, INPUT_EXTENSIONS).map_err(|e| {
                ResumeScorerError::InvalidInput(format!("Job description file: {}", e))
            })?;

            let config = Config::load(config_path)?;
            let format = match output {
                Some(output) => {
                    cli::parse_output_format(&output).map_err(ResumeScorerError::InvalidInput)?
                }
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;

            let mut scoring = config.scoring.clone();
            if let Some(weights) = weights {
                scoring.weights = weights;
            }

            let loader = DocumentLoader::new();
            let (resume_text, job_text) =
                tokio::try_join!(loader.load(&resume), loader.load(&job))?;

            info!("Scoring {} against {}", resume.display(), job.display());
            let analysis = scoring.engine().analyze(&resume_text, &job_text);
            let report = ScoreReport::new(
                resume.display().to_string(),
                job.display().to_string(),
                analysis,
            );

            let use_colors = config.output.color_output && format == OutputFormat::Console;
            let rendered = ReportGenerator::new(use_colors, detailed)
                .with_density_cap(scoring.density_cap)
                .generate_report(&report, format)?;
            println!("{}", rendered);

            if let Some(path) = save {
                let plain = ReportGenerator::new(false, detailed)
                    .with_density_cap(scoring.density_cap)
                    .generate_report(&report, format)?;
                save_report_to_file(&plain, &path)?;
                info!("Report saved to {}", path.display());
            }
        }

        Commands::Keywords { file, top_n } => {
            cli::validate_file_extension(&file, INPUT_EXTENSIONS)
                .map_err(ResumeScorerError::InvalidInput)?;

            let config = Config::load(config_path)?;
            let text = DocumentLoader::new().load(&file).await?;
            let top_n = top_n.unwrap_or(config.scoring.top_n);
            let keywords = extract_keywords(&text, top_n, config.scoring.min_word_length);

            if keywords.is_empty() {
                println!("No keywords found in {}", file.display());
            }
            for (i, keyword) in keywords.iter().enumerate() {
                println!("{:>3}. {}", i + 1, keyword);
            }
        }

        Commands::Sections { file } => {
            cli::validate_file_extension(&file, INPUT_EXTENSIONS)
                .map_err(ResumeScorerError::InvalidInput)?;

            let text = DocumentLoader::new().load(&file).await?;
            let report = detect_sections(&text);

            println!("Section match: {:.2}", report.score);
            for category in &report.detected {
                println!("  + {}", category);
            }
            for category in &report.missing {
                println!("  - {}", category);
            }
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                println!("{}", Config::load(config_path)?.to_toml()?);
            }
            // Reset and Path never read the existing file
            ConfigAction::Reset => {
                let path = Config::reset(config_path)?;
                println!("Configuration reset: {}", path.display());
            }
            ConfigAction::Path => {
                println!("{}", Config::resolve_path(config_path).display());
            }
        },
    }

    Ok(())
}
