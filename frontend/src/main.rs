//! `frontend` command: browse the user roster and register users.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use frontend::config::ClientSettings;
use frontend::domain::{PhotoCandidate, PositionId, PositionsState, ShowMore};
use frontend::outbound::{ApiClient, ImageCrateProbe, RestPositionsApi, RestUsersApi};
use frontend::page::HomePage;

/// `frontend` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "frontend",
    about = "Browse registered users and sign up new ones",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List registered users, newest first.
    Users {
        /// Number of pages to load.
        #[arg(long, value_name = "count", default_value_t = 1)]
        pages: u32,
    },
    /// List the selectable positions.
    Positions,
    /// Register a new user.
    Register(RegisterArgs),
}

#[derive(Debug, Args)]
struct RegisterArgs {
    /// Full name, 2 to 60 characters.
    #[arg(long)]
    name: String,
    /// Contact email.
    #[arg(long)]
    email: String,
    /// Phone number; normalised to `+380XXXXXXXXX`.
    #[arg(long)]
    phone: String,
    /// Identifier from `frontend positions`.
    #[arg(long = "position-id", value_name = "id")]
    position_id: PositionId,
    /// JPEG photo, at most 5 MB and at least 70x70 px.
    #[arg(long, value_name = "path")]
    photo: PathBuf,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let args = CliArgs::parse();
    let settings = ClientSettings::load_from_iter([OsString::from("frontend")])
        .map_err(|error| eyre!("failed to load client settings: {error}"))?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build Tokio runtime")?;
    runtime.block_on(run(args.command, settings))
}

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

async fn run(command: Command, settings: ClientSettings) -> Result<()> {
    let client = ApiClient::new(settings.api_base_url()?, settings.request_timeout())
        .wrap_err("failed to build HTTP client")?;
    let mut page = HomePage::new(
        Arc::new(RestUsersApi::new(client.clone())),
        Arc::new(RestPositionsApi::new(client)),
        Arc::new(ImageCrateProbe::new()),
        settings.page_size()?,
    );

    let result = match command {
        Command::Users { pages } => list_users(&mut page, pages).await,
        Command::Positions => list_positions(&mut page).await,
        Command::Register(args) => register(&mut page, args).await,
    };
    page.tear_down();
    result
}

async fn list_users(page: &mut HomePage, pages: u32) -> Result<()> {
    page.users_mut()
        .mount()
        .await
        .wrap_err("failed to load users")?;
    for _ in 1..pages {
        if page.users().show_more() != ShowMore::Enabled {
            break;
        }
        page.show_more()
            .await
            .wrap_err("failed to load more users")?;
    }

    let list = page.users();
    for user in list.users() {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            user.id, user.name, user.position, user.email, user.phone
        );
    }
    println!(
        "page={}/{} more={}",
        list.current_page().unwrap_or(0),
        list.total_pages(),
        list.show_more() == ShowMore::Enabled
    );
    Ok(())
}

async fn list_positions(page: &mut HomePage) -> Result<()> {
    page.form_mut()
        .load_positions()
        .await
        .wrap_err("failed to load positions")?;
    if let PositionsState::Ready(positions) = page.form().positions() {
        for position in positions {
            println!("{}\t{}", position.id, position.name);
        }
    }
    Ok(())
}

async fn register(page: &mut HomePage, args: RegisterArgs) -> Result<()> {
    let bytes = tokio::fs::read(&args.photo)
        .await
        .wrap_err_with(|| format!("failed to read photo at {}", args.photo.display()))?;
    let file_name = args
        .photo
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| eyre!("photo path must name a file"))?;

    let report = page.mount().await;
    if let Err(error) = report.positions {
        return Err(eyre!("failed to load positions: {error}"));
    }

    let form = page.form_mut();
    form.set_name(args.name);
    form.set_email(args.email);
    form.set_phone(args.phone);
    form.blur_phone();
    form.select_position(Some(args.position_id));
    form.set_photo(Some(PhotoCandidate::new(file_name, None, bytes)))
        .await;

    match page.register().await {
        Ok(receipt) => {
            if let Some(message) = receipt.message {
                println!("{message}");
            }
            print!("{}", page.render());
            Ok(())
        }
        Err(error) => {
            eprint!("{}", page.render());
            Err(eyre!("registration failed: {error}"))
        }
    }
}
