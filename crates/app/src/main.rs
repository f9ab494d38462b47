//! Davenport Application CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use davenport_app::{
    auth::{NewRegistration, create_admin},
    database,
};

#[derive(Debug, Parser)]
#[command(name = "davenport-app", about = "Davenport CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Admin(AdminCommand),
}

#[derive(Debug, Args)]
struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    Create(CreateAdminArgs),
}

#[derive(Debug, Args)]
struct CreateAdminArgs {
    /// Administrator display name
    #[arg(long)]
    name: String,

    /// Administrator email, used to log in
    #[arg(long)]
    email: String,

    /// Administrator password
    #[arg(long)]
    password: String,

    /// Administrator phone number
    #[arg(long)]
    phone: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Admin(AdminCommand {
            command: AdminSubcommand::Create(args),
        }) => create_admin_account(args).await,
    }
}

async fn create_admin_account(args: CreateAdminArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::run_migrations(&pool)
        .await
        .map_err(|error| format!("failed to run migrations: {error}"))?;

    let user = create_admin(
        pool,
        NewRegistration {
            name: args.name,
            email: args.email,
            password: args.password,
            phone: args.phone,
        },
    )
    .await
    .map_err(|error| format!("failed to create admin: {error}"))?;

    println!("admin_uuid: {}", user.uuid);
    println!("admin_email: {}", user.email);

    Ok(())
}
