use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mattelevizion::app::AppContext;
use mattelevizion::cli::{commands, Cli, Commands, PushAction};
use mattelevizion::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_at(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Feed { tag, limit, page } => {
            commands::show_feed(&ctx, tag, limit, page).await?;
        }
        Commands::Read { slug, browser } => {
            commands::read_article(&ctx, &slug, browser).await?;
        }
        Commands::Resolve { url } => {
            commands::resolve_link(&ctx, &url);
        }
        Commands::Open { url } => {
            commands::open_link(&ctx, &url).await?;
        }
        Commands::Listen { initial_url } => {
            commands::listen(&ctx, initial_url).await?;
        }
        Commands::Tags => {
            commands::list_tags();
        }
        Commands::Status => {
            commands::status(&ctx);
        }
        Commands::Push { action } => match action {
            PushAction::Register { token } => {
                commands::register_push_token(&ctx, &token).await?;
            }
            PushAction::Unregister { token } => {
                commands::unregister_push_token(&ctx, &token).await?;
            }
            PushAction::Tap { payload } => {
                commands::tap_notification(&ctx, &payload).await?;
            }
        },
    }

    Ok(())
}
