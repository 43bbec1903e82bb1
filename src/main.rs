use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use dotenv::dotenv;

use wallet_tracker_tui::{
    api::{DEFAULT_BASE_URL, WalletApi, dto::RegisterRequestDto},
    app::App,
    session::{Session, TokenStore},
};

#[derive(Parser)]
#[command(
    name = "wallet-tracker-tui",
    about = "Terminal client for the investment wallet API"
)]
struct Cli {
    /// Base URL of the wallet API; WALLET_API_URL overrides the default
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Authenticate and store the session token
    Login { username: String, password: String },
    /// Create a new user account
    Register {
        name: String,
        lastname: String,
        email: String,
        password: String,
    },
    /// Print the wallet report
    Report {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Drop the stored session token
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    pretty_env_logger::init();

    let cli = Cli::parse();
    let base_url = cli
        .api_url
        .or_else(|| std::env::var("WALLET_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let session = Session::new(TokenStore::new(TokenStore::default_path()));
    let api = WalletApi::new(base_url, session);

    match cli.command {
        Some(Command::Login { username, password }) => {
            api.authenticate(&username, &password).await?;
            println!("Logged in as {}", username);
        }
        Some(Command::Register {
            name,
            lastname,
            email,
            password,
        }) => {
            let message = api
                .register(RegisterRequestDto::new(name, lastname, email, password))
                .await?;
            println!("{}", message);
        }
        Some(Command::Report { date }) => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            println!("{}", api.report(date).await?);
        }
        Some(Command::Logout) => {
            api.session().clear();
            println!("Session cleared");
        }
        None => {
            let mut app = App::new(api);
            app.run().await?;
        }
    }

    Ok(())
}
