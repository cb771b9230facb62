use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use virtual_tryon::app::App;
use virtual_tryon::router::RouterResponse;

#[derive(Debug, Parser)]
#[command(name = "virtual-tryon")]
#[command(about = "Try on clothing images with your own photo via Fal AI")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Save the Fal AI API key
    SetKey {
        /// The API key value
        key: String,
    },
    /// Save your photo for try-ons
    SetPhoto {
        /// Path to an image file (max 5MB)
        path: PathBuf,
    },
    /// Remove the saved photo
    RemovePhoto,
    /// Show the saved settings
    Status,
    /// Generate a virtual try-on for a product image URL
    TryOn {
        /// URL of the clothing image
        image_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "virtual_tryon=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let app = App::new();

    let outcome = match args.command {
        Command::SetKey { key } => app.set_api_key(&key).await,
        Command::SetPhoto { path } => app.set_photo(&path).await,
        Command::RemovePhoto => app.remove_photo().await,
        Command::Status => match app.status().await {
            Ok(status) => {
                println!("{}", status);
                Ok(())
            }
            Err(e) => Err(e),
        },
        Command::TryOn { image_url } => match app.try_on(&image_url).await {
            Ok(RouterResponse::Generated { image_url }) => {
                info!("Virtual try-on generated successfully!");
                println!("{}", image_url);
                Ok(())
            }
            Ok(RouterResponse::UploadPromptRequired { message }) => {
                error!("{}", message);
                std::process::exit(1);
            }
            Ok(RouterResponse::Failed { error }) => {
                error!("Failed to generate virtual try-on: {}", error);
                std::process::exit(1);
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = outcome {
        error!("{}", e);
        std::process::exit(1);
    }

    Ok(())
}
