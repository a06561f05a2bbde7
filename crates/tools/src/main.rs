use clap::{Parser, Subcommand};
use collector::MapFormController;
use foundation::GeoPoint;
use scoring::{HttpScorer, ScoringConfig};
use tools::{
    SubmitPlan, categories_report, config_report, format_result, options_report, parse_category, parse_field_arg,
    run_submit,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless driver for the map demand collector")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List categories and their form fields
    Categories,

    /// Show the scoring configuration read from the environment
    Config,

    /// Print a field's options, optionally filtered
    Options {
        category: String,
        field: String,

        /// Case-insensitive substring filter
        #[arg(long)]
        query: Option<String>,
    },

    /// Pick a location, fill the form and submit it for scoring
    #[command(allow_negative_numbers = true)]
    Submit {
        #[arg(long)]
        category: String,

        #[arg(long)]
        lat: f64,

        #[arg(long)]
        lng: f64,

        /// Form field as name=value (repeatable)
        #[arg(long = "field")]
        fields: Vec<String>,

        /// Scoring service base URL (default: SCORING_API_BASE_URL)
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn real_main() -> Result<(), String> {
    match Args::parse().command {
        Command::Categories => {
            print!("{}", categories_report());
            Ok(())
        }
        Command::Config => {
            print!("{}", config_report(&ScoringConfig::from_env()));
            Ok(())
        }
        Command::Options {
            category,
            field,
            query,
        } => {
            let category = parse_category(&category)?;
            print!("{}", options_report(category, &field, query.as_deref())?);
            Ok(())
        }
        Command::Submit {
            category,
            lat,
            lng,
            fields,
            base_url,
        } => {
            let plan = SubmitPlan {
                category: parse_category(&category)?,
                point: GeoPoint::new(lat, lng),
                fields: fields
                    .iter()
                    .map(|raw| parse_field_arg(raw))
                    .collect::<Result<_, _>>()?,
            };

            let mut config = ScoringConfig::from_env();
            if let Some(base_url) = base_url {
                config = config.with_base_url(base_url);
            }
            let scorer = HttpScorer::new(&config).map_err(|e| e.to_string())?;

            let mut controller = MapFormController::new();
            let result = run_submit(&mut controller, &scorer, &plan).await?;
            print!("{}", format_result(&result));
            Ok(())
        }
    }
}
