//! User Service - CLI for user management over the document repository.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::AppError;
use domain::UserRole;
use user_service_lib::config::UserServiceConfig;
use user_service_lib::service::UserService;
use user_service_lib::Backend;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User management microservice")]
struct Cli {
    /// Use a process-local collection instead of MongoDB
    #[arg(long, env = "USER_SERVICE_IN_MEMORY", global = true)]
    in_memory: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
    },
    /// Show a user
    Get { id: String },
    /// Change a user's name
    Rename {
        id: String,
        #[arg(long)]
        name: String,
    },
    /// Change a user's role
    Role {
        id: String,
        #[arg(long, value_parser = ["user", "admin"])]
        role: String,
    },
    /// Delete a user
    Delete { id: String },
    /// Run a full create / read / update / delete cycle
    Demo,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();
    let config = UserServiceConfig::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.service.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let backend = if cli.in_memory {
        Backend::InMemory
    } else {
        Backend::Mongo
    };

    if let Err(e) = run(cli.command, &config, backend).await {
        eprintln!("{}: {}", e.code(), e.user_message());
        std::process::exit(1);
    }

    Ok(())
}

async fn run(command: Commands, config: &UserServiceConfig, backend: Backend) -> Result<(), AppError> {
    let service = user_service_lib::build_service(config, backend).await?;

    match command {
        Commands::Create { email, name } => {
            let user = service.create_user(email, name).await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        Commands::Get { id } => match service.find_user(&id).await? {
            Some(user) => println!("{}", serde_json::to_string_pretty(&user)?),
            None => println!("No user with id {}", id),
        },
        Commands::Rename { id, name } => {
            let user = service.rename_user(&id, name).await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        Commands::Role { id, role } => {
            let user = service.change_role(&id, UserRole::from(role)).await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        Commands::Delete { id } => {
            service.delete_user(&id).await?;
            println!("Deleted user {}", id);
        }
        Commands::Demo => {
            user_service_lib::run_demo(&service).await?;
        }
    }

    Ok(())
}
