use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub mod commands;
pub mod error;
pub mod templates;
pub mod ui;
pub mod util;

use commands::config::{self as settings, SlackKitConfig};
use commands::context::{self, ContextLoad};
use commands::download::AvatarDownloader;
use commands::emit::{self, GenerateOutcome};
use commands::setup::{self, SetupEvent, SetupOptions};

#[derive(Parser, Debug)]
#[command(name = "slackkit")]
#[command(about = "Generate a demo workspace for the mock chat UI from a company description")]
#[command(version)]
struct Cli {
    /// Project root holding company-context.json (defaults to the current directory)
    #[arg(long, global = true)]
    root: Option<String>,

    /// Override the output directory for generated JSON, relative to the root
    #[arg(long, global = true)]
    output_dir: Option<String>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write company-context.json.example into the project root
    Init,
    /// Generate company, people, channel and chat-list configs from the context
    Generate,
    /// Build a new context from a few answers, fetch avatars and generate
    Setup(SetupArgs),
    /// Fetch initials avatars for every employee into the faces directory
    DownloadAvatars,
    /// Sort faces into male/female folders and pin people to them
    Organize,
    /// Show or change slackkit.json settings
    Config {
        /// Persist the delay between avatar downloads, in milliseconds
        #[arg(long)]
        set_download_delay: Option<u64>,
    },
}

#[derive(Args, Debug)]
struct SetupArgs {
    #[arg(long, default_value = "Your Company")]
    company_name: String,
    /// What the company does, in plain words
    #[arg(long, default_value = "A company")]
    description: String,
    #[arg(long, default_value = "Software Development")]
    industry: String,
    /// Small, Medium, Large Enterprise, ...
    #[arg(long, default_value = "Medium")]
    size: String,
    #[arg(long)]
    logo: Option<String>,
    #[arg(long, default_value = "User")]
    my_name: String,
    #[arg(long, default_value = "United States")]
    my_country: String,
    /// male, female or neutral
    #[arg(long, default_value = "neutral")]
    my_gender: String,
    #[arg(long, default_value = "Software Engineer")]
    my_role: String,
    /// Comma-separated, e.g. "United States, India, Germany"
    #[arg(long, default_value = "United States")]
    nationalities: String,
    /// Seed for reproducible team generation
    #[arg(long)]
    seed: Option<u64>,
    /// Overwrite an existing company-context.json
    #[arg(long)]
    force: bool,
    /// Skip the avatar download step
    #[arg(long)]
    skip_download: bool,
}

impl From<SetupArgs> for SetupOptions {
    fn from(args: SetupArgs) -> Self {
        SetupOptions {
            company_name: args.company_name,
            description: args.description,
            industry: args.industry,
            company_size: args.size,
            logo: args.logo,
            my_name: args.my_name,
            my_country: args.my_country,
            my_gender: setup::parse_gender(&args.my_gender),
            my_role: args.my_role,
            nationalities: setup::parse_nationalities(&args.nationalities),
            seed: args.seed,
            force: args.force,
            skip_download: args.skip_download,
        }
    }
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}

fn log_event(event: &SetupEvent) {
    match event {
        SetupEvent::StepStarted { description, step_index, total_steps, .. } => {
            tracing::info!("[{step_index}/{total_steps}] {description}")
        }
        SetupEvent::StepProgress { detail, .. } => tracing::debug!("{detail}"),
        SetupEvent::StepCompleted { step, detail } => tracing::info!("{step}: {detail}"),
        SetupEvent::StepWarning { step, message } => tracing::warn!("{step}: {message}"),
        SetupEvent::Error { step, message } => tracing::error!("{step}: {message}"),
        SetupEvent::Finished => tracing::info!("Setup complete. Start the web app to see your workspace."),
    }
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = match cli.root.as_deref() {
        Some(root) => PathBuf::from(util::expand_tilde(root)),
        None => std::env::current_dir().context("cannot read the current directory")?,
    };
    let mut config: SlackKitConfig = settings::load_config(&root);
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }
    tracing::debug!(root = %root.display(), ?config, "resolved settings");

    match cli.command {
        Command::Init => {
            if context::write_example(&root)? {
                tracing::info!("Wrote {}", root.join(context::EXAMPLE_FILE).display());
            } else {
                tracing::info!("{} already exists, left untouched", context::EXAMPLE_FILE);
            }
        }
        Command::Generate => match emit::generate(&root, &config)? {
            GenerateOutcome::Generated { output_dir, people, with_avatar, channels } => {
                tracing::info!(
                    "Generated {channels} channels and {people} people ({with_avatar} with avatars) in {}",
                    output_dir.display()
                );
            }
            GenerateOutcome::Seeded(path) => {
                tracing::warn!("Edit {} with your company details, then run generate again", path.display());
            }
        },
        Command::Setup(args) => {
            let (tx, mut rx) = mpsc::unbounded_channel();
            let printer = tokio::spawn(async move {
                while let Some(event) = rx.recv().await {
                    log_event(&event);
                }
            });
            let result = setup::run_setup(&root, &config, args.into(), tx).await;
            printer.await.context("setup progress printer stopped")?;
            result.context("setup failed")?;
        }
        Command::DownloadAvatars => {
            let doc = match context::load_or_seed(&root)? {
                ContextLoad::Loaded(doc) => doc,
                ContextLoad::Seeded(path) => {
                    tracing::warn!("Edit {} first, then download avatars", path.display());
                    return Ok(());
                }
            };
            let downloader = AvatarDownloader::new(&root, &config)?;
            let summary = downloader
                .download_for_context(&doc, |done, total, name| tracing::debug!("{done}/{total} {name}"))
                .await?;
            tracing::info!(
                "Downloaded: {}, skipped: {}, errors: {}",
                summary.downloaded,
                summary.skipped,
                summary.errors
            );
        }
        Command::Organize => {
            commands::organize::organize(&root, &config).context("organizing avatars failed")?;
        }
        Command::Config { set_download_delay } => {
            let config = match set_download_delay {
                Some(delay) => settings::save_download_delay(&root, delay)?,
                None => config,
            };
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }
    Ok(())
}
