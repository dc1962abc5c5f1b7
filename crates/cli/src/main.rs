use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::SecondsFormat;
use clap::{Parser, Subcommand};
use kiosk_core::{
    admin_password_from_env_value, compute_results, data_dir_from_env_value, AdminCredentials,
    DataStore, ImageStore, KioskConfig, ResponseRecorder, SurveyDraft, SurveyId, SurveyService,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "kiosk")]
#[command(about = "Survey kiosk administration CLI")]
struct Cli {
    /// Data directory (defaults to $KIOSK_DATA_DIR, then ./data)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all surveys
    List,
    /// Show one survey as JSON
    Show {
        /// Survey id
        survey_id: SurveyId,
    },
    /// Create a survey from a draft JSON file
    Create {
        /// Path to the survey draft JSON
        draft: PathBuf,
        /// Directory to load item image files from, inlined by filename
        #[arg(long)]
        images_from: Option<PathBuf>,
        /// Admin password
        #[arg(long)]
        password: String,
    },
    /// Replace a survey's fields and items from a draft JSON file
    Edit {
        /// Survey id
        survey_id: SurveyId,
        /// Path to the survey draft JSON
        draft: PathBuf,
        /// Directory to load item image files from, inlined by filename
        #[arg(long)]
        images_from: Option<PathBuf>,
        /// Admin password
        #[arg(long)]
        password: String,
    },
    /// Delete a survey and its images
    Delete {
        /// Survey id
        survey_id: SurveyId,
        /// Admin password
        #[arg(long)]
        password: String,
    },
    /// Duplicate a survey under new titles with fresh response history
    Duplicate {
        /// Source survey id
        survey_id: SurveyId,
        /// English title for the copy
        new_title_en: String,
        /// Swedish title for the copy
        new_title_sv: String,
        /// Admin password
        #[arg(long)]
        password: String,
    },
    /// Remove all of a survey's responses
    Reset {
        /// Survey id
        survey_id: SurveyId,
        /// Admin password
        #[arg(long)]
        password: String,
    },
    /// Show aggregated results for a survey
    Results {
        /// Survey id
        survey_id: SurveyId,
    },
    /// Record a response selecting the given item ids
    Submit {
        /// Survey id
        survey_id: SurveyId,
        /// Selected item ids
        items: Vec<String>,
    },
    /// Remove responses whose survey no longer exists
    Prune {
        /// Admin password
        #[arg(long)]
        password: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kiosk_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| data_dir_from_env_value(std::env::var("KIOSK_DATA_DIR").ok()));
    let admin_password = admin_password_from_env_value(std::env::var("KIOSK_ADMIN_PASSWORD").ok());

    let cfg = Arc::new(KioskConfig::new(data_dir, admin_password)?);
    let store = Arc::new(DataStore::new(cfg.clone())?);
    let images = Arc::new(ImageStore::open(&cfg.images_dir())?);
    let surveys = SurveyService::new(store.clone(), images);
    let credentials = AdminCredentials::from_config(&cfg);

    match cli.command {
        Commands::List => {
            let all = surveys.list()?;
            if all.is_empty() {
                println!("No surveys found.");
            } else {
                for survey in all {
                    println!(
                        "ID: {}, Title: {}, Items: {}, Created: {}",
                        survey.id,
                        survey.title_en,
                        survey.items.len(),
                        survey
                            .created_at
                            .to_rfc3339_opts(SecondsFormat::Secs, true)
                    );
                }
            }
        }
        Commands::Show { survey_id } => {
            let survey = surveys.get(&survey_id)?;
            println!("{}", serde_json::to_string_pretty(&survey)?);
        }
        Commands::Create {
            draft,
            images_from,
            password,
        } => {
            let auth = credentials.verify(&password)?;
            let mut draft = read_draft(&draft)?;
            inline_images(&mut draft, images_from.as_deref())?;
            match surveys.create(&auth, &draft) {
                Ok(id) => println!("Created survey with id: {}", id),
                Err(e) => eprintln!("Error creating survey: {}", e),
            }
        }
        Commands::Edit {
            survey_id,
            draft,
            images_from,
            password,
        } => {
            let auth = credentials.verify(&password)?;
            let mut draft = read_draft(&draft)?;
            inline_images(&mut draft, images_from.as_deref())?;
            match surveys.edit(&auth, &survey_id, &draft) {
                Ok(()) => println!("Updated survey {}", survey_id),
                Err(e) => eprintln!("Error updating survey: {}", e),
            }
        }
        Commands::Delete {
            survey_id,
            password,
        } => {
            let auth = credentials.verify(&password)?;
            match surveys.delete(&auth, &survey_id) {
                Ok(()) => println!("Deleted survey {}", survey_id),
                Err(e) => eprintln!("Error deleting survey: {}", e),
            }
        }
        Commands::Duplicate {
            survey_id,
            new_title_en,
            new_title_sv,
            password,
        } => {
            let auth = credentials.verify(&password)?;
            match surveys.duplicate(&auth, &survey_id, &new_title_en, &new_title_sv) {
                Ok(id) => println!("Duplicated survey {} as {}", survey_id, id),
                Err(e) => eprintln!("Error duplicating survey: {}", e),
            }
        }
        Commands::Reset {
            survey_id,
            password,
        } => {
            let auth = credentials.verify(&password)?;
            match surveys.reset(&auth, &survey_id) {
                Ok(()) => println!("Reset responses for survey {}", survey_id),
                Err(e) => eprintln!("Error resetting survey: {}", e),
            }
        }
        Commands::Results { survey_id } => {
            let results = compute_results(&store, &survey_id)?;
            println!(
                "Survey {}: {} responses",
                results.survey_id, results.total_responses
            );
            for tally in &results.items {
                println!(
                    "{:>5}  {:>5.1}%  {}  {}",
                    tally.count, tally.percentage, tally.id, tally.text
                );
            }
        }
        Commands::Submit { survey_id, items } => {
            let recorder = ResponseRecorder::new(store);
            match recorder.submit(&survey_id, &items) {
                Ok(response) => println!(
                    "Recorded response for survey {} at {}",
                    survey_id,
                    response
                        .timestamp
                        .to_rfc3339_opts(SecondsFormat::Secs, true)
                ),
                Err(e) => eprintln!("Error recording response: {}", e),
            }
        }
        Commands::Prune { password } => {
            let auth = credentials.verify(&password)?;
            match surveys.prune_orphaned_responses(&auth) {
                Ok(removed) => println!("Removed {} orphaned responses", removed),
                Err(e) => eprintln!("Error pruning responses: {}", e),
            }
        }
    }

    Ok(())
}

fn read_draft(path: &Path) -> Result<SurveyDraft, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Fills in `image_data` for draft items that name an image but carry no
/// payload, reading the bytes from `images_from` by filename.
fn inline_images(
    draft: &mut SurveyDraft,
    images_from: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(dir) = images_from else {
        return Ok(());
    };

    for item in &mut draft.items {
        if item.image_data.is_some() {
            continue;
        }
        if let Some(name) = &item.image {
            let bytes = fs::read(dir.join(name))?;
            item.image_data = Some(BASE64.encode(bytes));
        }
    }

    Ok(())
}
