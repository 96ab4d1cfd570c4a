//! Kashidashi command-line driver
//!
//! Runs the page behaviors against a live server using an in-memory page.

use anyhow::bail;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kashidashi_client::{
    config::ClientConfig,
    models::{LoanAction, LoanRequest, SelectOption},
    page::{MemoryPage, Page},
    platform::Platform,
    services::{timestamp, ReqwestTransport, SubmissionOutcome, TracingNotifier},
    App,
};

#[derive(Parser, Debug)]
#[command(name = "kashidashi")]
#[command(about = "Book-lending page actions from the terminal")]
struct Args {
    /// Server origin, overrides the configuration
    #[arg(short, long)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a book by ISBN
    AddBook { isbn: String },
    /// Register a user
    AddUser { name: String },
    /// Record a loan
    Loan {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        isbn: String,
        /// YYYY-MM-DDTHH:MM, defaults to the current minute
        #[arg(long)]
        logged_at: Option<String>,
    },
    /// Record a return
    Return {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        isbn: String,
        #[arg(long)]
        logged_at: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = ClientConfig::load()?;
    if let Some(server) = args.server {
        config.server.base_url = server;
    }

    init_tracing(&config);
    tracing::info!("Kashidashi client v{}", env!("CARGO_PKG_VERSION"));

    let transport = Arc::new(ReqwestTransport::new(&config.server)?);
    let bindings = config.page.clone();

    match args.command {
        Command::AddBook { isbn } => {
            let page = Arc::new(
                MemoryPage::new()
                    .with_form(&bindings.book_form_action, &[("isbn_new", isbn.as_str())])
                    .with_select(&bindings.book_select, vec![]),
            );
            let app = App::new(&config, page.clone(), transport, Platform::headless(), Arc::new(TracingNotifier));
            let outcome = app.on_book_submit().await;
            report(outcome, page.select_options(&bindings.book_select))
        }
        Command::AddUser { name } => {
            let page = Arc::new(
                MemoryPage::new()
                    .with_form(&bindings.user_form_action, &[("user_name_new", name.as_str())])
                    .with_select(&bindings.user_select, vec![]),
            );
            let app = App::new(&config, page.clone(), transport, Platform::headless(), Arc::new(TracingNotifier));
            let outcome = app.on_user_submit().await;
            report(outcome, page.select_options(&bindings.user_select))
        }
        Command::Loan { user_id, isbn, logged_at } => {
            record(&config, transport, LoanAction::Loan, user_id, isbn, logged_at).await
        }
        Command::Return { user_id, isbn, logged_at } => {
            record(&config, transport, LoanAction::Return, user_id, isbn, logged_at).await
        }
    }
}

fn init_tracing(config: &ClientConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("kashidashi_client={},kashidashi={}", config.logging.level, config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn report(outcome: SubmissionOutcome, options: Option<Vec<SelectOption>>) -> anyhow::Result<()> {
    match outcome {
        SubmissionOutcome::Created { id, .. } => {
            if let Some(option) = options.into_iter().flatten().find(|o| o.value == id) {
                tracing::info!("Created {}", option.label);
            }
            Ok(())
        }
        SubmissionOutcome::NoForm => bail!("form is not configured"),
        SubmissionOutcome::Rejected { reason } => {
            bail!("rejected: {}", reason.unwrap_or_else(|| "no reason given".to_string()))
        }
        SubmissionOutcome::Resynchronized => bail!("unexpected response from the server"),
        SubmissionOutcome::TransportFailed => bail!("could not reach the server"),
    }
}

async fn record(
    config: &ClientConfig,
    transport: Arc<ReqwestTransport>,
    action: LoanAction,
    user_id: String,
    isbn: String,
    logged_at: Option<String>,
) -> anyhow::Result<()> {
    // Same default the loan form gets from the page
    let page = MemoryPage::new().with_input(&config.page.timestamp_input, logged_at.as_deref().unwrap_or(""));
    timestamp::fill_with_local_time(&page, &config.page.timestamp_input);

    let app = App::new(config, Arc::new(MemoryPage::new()), transport, Platform::headless(), Arc::new(TracingNotifier));
    let request = LoanRequest {
        action,
        user_id,
        isbn,
        logged_at: page.input_value(&config.page.timestamp_input),
    };

    let reply = app.loans().perform(&request).await?;
    if !reply.ok {
        bail!("{} rejected", action);
    }
    Ok(())
}
