use crate::cli::commands::{Cli, Commands};
use anyhow::{Context, Result, bail};
use runners_hub::catalog::{InfographicImage, ShoeRecord};
use runners_hub::config::{Config, ProductTarget};
use runners_hub::gateway::run_gateway;
use runners_hub::prompt::PromptBuilder;
use runners_hub::services::GeminiComparisonService;
use runners_hub::ui::style as ui;
use runners_hub::view::{PageModel, SearchController, ViewContext, ViewState, terminal};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Run one search through the controller and print the outcome.
async fn run_search(config: &Config, save_image: Option<PathBuf>, json: bool) -> Result<()> {
    let ctx = ViewContext::from_config(config);
    let locale = ctx.locale.as_str();
    let service = Arc::new(GeminiComparisonService::from_config(config)?);
    let controller = SearchController::new(service, ctx.error_message());

    if !json {
        println!("{}", ui::yellow(t!("cli.busy", locale = locale)));
    }
    let state = controller.search().await?;

    let mut note = None;
    if let Some(path) = save_image {
        match state.image() {
            Some(image) => {
                let written = save_infographic(image, &path).await?;
                note = Some(
                    t!(
                        "cli.saved_image",
                        locale = locale,
                        path = written.display().to_string()
                    )
                    .into_owned(),
                );
            }
            None if state.result().is_some() => {
                note = Some(t!("cli.no_image_saved", locale = locale).into_owned());
            }
            None => {}
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&state.summary())?);
    } else {
        let page = PageModel::build(&state, &ctx);
        print!("{}", terminal::render_page(&page, note.as_deref()));
        if state.image().is_none() {
            if let Some(note) = &note {
                println!("{}", ui::dim(note));
            }
        }
    }

    ensure_succeeded(&state)
}

/// A search that ended in the error state fails the command after the
/// page has been printed.
fn ensure_succeeded(state: &ViewState) -> Result<()> {
    match state.error_message() {
        Some(message) => bail!("{message}"),
        None => Ok(()),
    }
}

/// Decode and write the image. A path without extension gets one matching
/// the image type.
async fn save_infographic(image: &InfographicImage, path: &Path) -> Result<PathBuf> {
    let bytes = image
        .decode()
        .context("Infographic payload is not valid base64")?;
    let path = if path.extension().is_none() {
        path.with_extension(image.file_extension())
    } else {
        path.to_path_buf()
    };
    tokio::fs::write(&path, bytes)
        .await
        .with_context(|| format!("Failed to write infographic to {}", path.display()))?;
    info!(path = %path.display(), "infographic saved");
    Ok(path)
}

/// Stand-in shoe for a configured product, for previewing the image prompt.
fn placeholder_shoe(product: &ProductTarget) -> ShoeRecord {
    let (brand, model) = product
        .name
        .split_once(' ')
        .unwrap_or((product.name.as_str(), ""));
    ShoeRecord {
        brand: brand.to_string(),
        model: model.to_string(),
        category: None,
        price: String::new(),
        features: Vec::new(),
        weight: "?g".into(),
        drop: "?mm".into(),
        link: String::new(),
    }
}

fn print_prompts(config: &Config) -> Result<()> {
    let builder = PromptBuilder::new()?;
    let shoes: Vec<ShoeRecord> = config.search.products.iter().map(placeholder_shoe).collect();

    println!("{}", ui::header("Comparison prompt"));
    println!("{}", builder.comparison_prompt(&config.search)?);
    println!();
    println!("{}", ui::header("Infographic prompt"));
    println!("{}", builder.infographic_prompt(&shoes, &config.infographic)?);
    Ok(())
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Search { save_image, json } => run_search(&config, save_image, json).await,

        Commands::Serve { port, host } => {
            let port = port.unwrap_or(config.gateway.port);
            let host = host.unwrap_or_else(|| config.gateway.host.clone());
            if port == 0 {
                info!("Starting Runner's Hub on {host} (random port)");
            } else {
                info!("Starting Runner's Hub on {host}:{port}");
            }
            run_gateway(&host, port, &config).await
        }

        Commands::Prompts => print_prompts(&config),

        Commands::Config => {
            let rendered = toml::to_string_pretty(&config.redacted())
                .context("Failed to serialize config")?;
            println!(
                "{} {}",
                ui::dim("#"),
                ui::dim(config.config_path.display())
            );
            println!("{rendered}");
            Ok(())
        }
    }
}
