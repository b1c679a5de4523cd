use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use farmdesk::core::crops::{CropDraft, CropService};
use farmdesk::core::financials::{FinancialDraft, FinancialService};
use farmdesk::core::tasks::{TaskDraft, TaskPatch, TaskService};
use farmdesk::core::weather::WeatherService;
use farmdesk::domain::model::parse_record_id;
use farmdesk::utils::logger;
use farmdesk::{ApperHttpClient, CliConfig};

#[derive(Debug, Parser)]
#[command(name = "farmdesk")]
struct Cli {
    #[command(flatten)]
    config: CliConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage crop records
    Crops {
        #[command(subcommand)]
        action: CropAction,
    },
    /// Manage task records
    Tasks {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Manage financial records
    Finance {
        #[command(subcommand)]
        action: FinanceAction,
    },
    /// Read the weather forecast
    Weather {
        #[command(subcommand)]
        action: WeatherAction,
    },
}

#[derive(Debug, Subcommand)]
enum CropAction {
    List,
    Show {
        id: String,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        variety: Option<String>,
        #[arg(long)]
        planting_date: Option<String>,
        #[arg(long)]
        quantity: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    Remove {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
enum TaskAction {
    List,
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        due_date: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        crop_id: Option<i64>,
    },
    Complete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
enum FinanceAction {
    List,
    Add {
        #[arg(long)]
        description: String,
        #[arg(long)]
        amount: String,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        crop_id: Option<i64>,
    },
}

#[derive(Debug, Subcommand)]
enum WeatherAction {
    Forecast,
    Today,
    On { date: String },
}

fn record_id(raw: &str) -> anyhow::Result<i64> {
    parse_record_id(raw).ok_or_else(|| anyhow!("invalid record id: {}", raw))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.config.verbose);
    tracing::info!("Starting farmdesk CLI");

    let settings = match cli.config.backend() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let client = ApperHttpClient::from_config(&settings)?;

    match cli.command {
        Command::Crops { action } => {
            let crops = CropService::new(client);
            match action {
                CropAction::List => print_json(&crops.get_all().await)?,
                CropAction::Show { id } => match crops.get_by_id(record_id(&id)?).await {
                    Some(record) => print_json(&record)?,
                    None => println!("crop not found"),
                },
                CropAction::Add {
                    name,
                    variety,
                    planting_date,
                    quantity,
                    status,
                    notes,
                } => {
                    let created = crops
                        .create(CropDraft {
                            name_c: Some(name),
                            variety_c: variety,
                            planting_date_c: planting_date,
                            quantity_c: quantity.map(Into::into),
                            status_c: status,
                            notes_c: notes,
                            ..Default::default()
                        })
                        .await?;
                    print_json(&created)?;
                }
                CropAction::Remove { id } => {
                    crops.delete(record_id(&id)?).await?;
                    println!("✅ crop deleted");
                }
            }
        }
        Command::Tasks { action } => {
            let tasks = TaskService::new(client);
            match action {
                TaskAction::List => print_json(&tasks.get_all().await)?,
                TaskAction::Add {
                    title,
                    due_date,
                    priority,
                    category,
                    crop_id,
                } => {
                    let created = tasks
                        .create(TaskDraft {
                            title_c: Some(title),
                            due_date_c: due_date,
                            priority_c: priority,
                            category_c: category,
                            crop_id_c: crop_id,
                            ..Default::default()
                        })
                        .await?;
                    print_json(&created)?;
                }
                TaskAction::Complete { id } => {
                    let updated = tasks
                        .update(
                            record_id(&id)?,
                            TaskPatch {
                                completed_c: Some(true),
                                ..Default::default()
                            },
                        )
                        .await?;
                    print_json(&updated)?;
                }
            }
        }
        Command::Finance { action } => {
            let finance = FinancialService::new(client);
            match action {
                FinanceAction::List => print_json(&finance.get_all().await)?,
                FinanceAction::Add {
                    description,
                    amount,
                    kind,
                    category,
                    date,
                    crop_id,
                } => {
                    let created = finance
                        .create(FinancialDraft {
                            description_c: Some(description),
                            amount_c: Some(amount.into()),
                            type_c: kind,
                            category_c: category,
                            date_c: date,
                            crop_id_c: crop_id,
                            ..Default::default()
                        })
                        .await?;
                    print_json(&created)?;
                }
            }
        }
        Command::Weather { action } => {
            let weather = WeatherService::new(client);
            match action {
                WeatherAction::Forecast => print_json(&weather.forecast().await)?,
                WeatherAction::Today => match weather.current().await {
                    Some(record) => print_json(&record)?,
                    None => println!("no forecast available"),
                },
                WeatherAction::On { date } => {
                    let day = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                        .with_context(|| format!("invalid date: {}", date))?
                        .and_time(chrono::NaiveTime::MIN)
                        .and_utc();
                    match weather.by_date(day).await {
                        Some(record) => print_json(&record)?,
                        None => println!("no forecast for {}", date),
                    }
                }
            }
        }
    }

    Ok(())
}
