use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::warn;

mod advice;
mod error;
mod features;
mod model;
mod models;
mod report;
mod risk;

use advice::AdviceClient;
use model::BurnoutModel;
use models::{
    CoachingContext, CompanyType, ConversationTurn, EmployeeScore, Gender, PredictionResult,
    RawUserInput, Role, WfhSetup,
};

#[derive(Parser)]
#[command(name = "burnout-coach")]
#[command(about = "Burnout risk assessment and coaching for employees", long_about = None)]
struct Cli {
    /// Path to the trained model artifact
    #[arg(long, default_value = "employee_burnout_model.json")]
    model: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct MetricsArgs {
    /// Date you started your current role (YYYY-MM-DD)
    #[arg(long)]
    join_date: String,
    #[arg(long, value_enum)]
    gender: Gender,
    #[arg(long, value_enum)]
    company_type: CompanyType,
    /// Whether a work-from-home setup is available
    #[arg(long, value_enum)]
    wfh: WfhSetup,
    /// Job level, 0 (entry) to 5 (senior leadership)
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(0..=5))]
    designation: u8,
    /// Concurrent projects or major tasks
    #[arg(long, default_value_t = 3.0)]
    projects: f64,
    /// Self-assessed mental fatigue, 0.0 (sharp) to 10.0 (drained)
    #[arg(long, default_value_t = 5.0)]
    fatigue: f64,
}

impl MetricsArgs {
    fn into_input(self) -> error::Result<RawUserInput> {
        let join_date = NaiveDate::parse_from_str(&self.join_date, "%Y-%m-%d").map_err(|err| {
            error::CoachError::InputValidation(format!(
                "could not parse join date {:?}: {err}",
                self.join_date
            ))
        })?;
        let input = RawUserInput {
            join_date,
            gender: self.gender,
            company_type: self.company_type,
            wfh_setup: self.wfh,
            designation: self.designation,
            resource_allocation: self.projects,
            mental_fatigue_score: self.fatigue,
        };
        input.validate()?;
        Ok(input)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Score one employee and print coaching advice
    Analyze {
        #[command(flatten)]
        metrics: MetricsArgs,
        /// Keep the session open for follow-up questions
        #[arg(long)]
        chat: bool,
        /// Write a markdown report of the session
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Score a team from a CSV file
    Batch {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Write a markdown report of the run
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Verify the model artifact against the declared feature schema
    Check,
}

/// Everything the commands need, built once at startup. The model is
/// read-only after this point.
struct AppContext {
    model: BurnoutModel,
    advice: AdviceClient,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let model = BurnoutModel::load(&cli.model)
        .context("analysis is disabled until a model artifact is available")?;
    model
        .check_schema(&features::schema_columns())
        .context("model artifact does not match the declared feature schema")?;

    let app = AppContext {
        model,
        advice: AdviceClient::from_env(),
    };

    match cli.command {
        Commands::Analyze { metrics, chat, out } => {
            run_analyze(&app, metrics, chat, out).await?;
        }
        Commands::Batch { csv, limit, out } => {
            run_batch(&app, &csv, limit, out)?;
        }
        Commands::Check => {
            println!(
                "Model artifact OK: {} features match the declared schema.",
                app.model.columns().len()
            );
        }
    }

    Ok(())
}

async fn run_analyze(
    app: &AppContext,
    metrics: MetricsArgs,
    chat: bool,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let input = metrics.into_input()?;
    let today = Utc::now().date_naive();
    let days_since_joining = features::days_since_joining(input.join_date, today)?;
    let vector = features::align(&input, today)?;
    let prediction = risk::assess(&app.model, &vector);

    println!(
        "Predicted burnout score: {:.2} / 1.0",
        prediction.burn_rate
    );
    println!(
        "Risk category: {} {}",
        prediction.risk_category, prediction.emoji
    );
    println!();

    let mut turns: Vec<ConversationTurn> = Vec::new();
    let context = CoachingContext {
        input: &input,
        prediction: &prediction,
        days_since_joining,
        follow_up_question: None,
    };
    let advice_text = app.advice.get_advice(&context).await;
    println!("{advice_text}");
    turns.push(ConversationTurn {
        role: Role::Assistant,
        content: advice_text,
    });

    if chat {
        run_chat(app, &input, &prediction, days_since_joining, &mut turns).await?;
    }

    if let Some(path) = out {
        let report =
            report::build_analysis_report(&input, days_since_joining, &prediction, &turns, today);
        std::fs::write(&path, report)?;
        println!("Report written to {}.", path.display());
    }

    Ok(())
}

async fn run_chat(
    app: &AppContext,
    input: &RawUserInput,
    prediction: &PredictionResult,
    days_since_joining: i64,
    turns: &mut Vec<ConversationTurn>,
) -> anyhow::Result<()> {
    println!();
    println!("Ask a follow-up question (blank line to finish).");

    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if std::io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();
        if question.is_empty() {
            break;
        }

        turns.push(ConversationTurn {
            role: Role::User,
            content: question.to_string(),
        });
        let context = CoachingContext {
            input,
            prediction,
            days_since_joining,
            follow_up_question: Some(question),
        };
        let reply = app.advice.get_advice(&context).await;
        println!("coach> {reply}");
        turns.push(ConversationTurn {
            role: Role::Assistant,
            content: reply,
        });
    }

    Ok(())
}

fn run_batch(
    app: &AppContext,
    csv_path: &Path,
    limit: usize,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        name: String,
        join_date: NaiveDate,
        gender: Gender,
        company_type: CompanyType,
        wfh_setup: WfhSetup,
        designation: u8,
        resource_allocation: f64,
        mental_fatigue_score: f64,
    }

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let today = Utc::now().date_naive();
    let mut scores = Vec::new();

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let input = RawUserInput {
            join_date: row.join_date,
            gender: row.gender,
            company_type: row.company_type,
            wfh_setup: row.wfh_setup,
            designation: row.designation,
            resource_allocation: row.resource_allocation,
            mental_fatigue_score: row.mental_fatigue_score,
        };

        let vector = match input.validate().and_then(|_| features::align(&input, today)) {
            Ok(vector) => vector,
            Err(err) => {
                warn!(name = %row.name, error = %err, "skipping row with invalid metrics");
                continue;
            }
        };
        let prediction = risk::assess(&app.model, &vector);
        scores.push(EmployeeScore {
            name: row.name,
            burn_rate: prediction.burn_rate,
            risk_category: prediction.risk_category,
            emoji: prediction.emoji,
        });
    }

    scores.sort_by(|a, b| {
        b.burn_rate
            .partial_cmp(&a.burn_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if scores.is_empty() {
        println!("No employees scored.");
        return Ok(());
    }

    println!("Employees by predicted burnout risk:");
    for score in scores.iter().take(limit) {
        println!(
            "- {} score {:.2} ({} {})",
            score.name, score.burn_rate, score.risk_category, score.emoji
        );
    }

    if let Some(path) = out {
        let report = report::build_batch_report(&scores, today);
        std::fs::write(&path, report)?;
        println!("Report written to {}.", path.display());
    }

    Ok(())
}
