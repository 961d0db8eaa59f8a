use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use img2pdf::api;
use img2pdf::assets::AssetLoader;
use img2pdf::models::EnhanceParams;
use img2pdf::server;
use img2pdf::services::ScanPipeline;

#[derive(Parser)]
#[command(name = "img2pdf")]
#[command(about = "IMG2PDF - image-to-PDF scanning service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Convert a single image to PDF without starting the server
    Process {
        /// Input image file (JPEG, PNG, BMP, ...)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,

        /// Brightness factor (1.0 = unchanged, 0.0 = black)
        #[arg(short, long, default_value_t = 1.0)]
        brightness: f32,

        /// Contrast factor (1.0 = unchanged, 0.0 = flat gray)
        #[arg(short, long, default_value_t = 1.0)]
        contrast: f32,

        /// Sharpness factor (1.0 = unchanged, 0.0 = fully smoothed)
        #[arg(short, long, default_value_t = 1.0)]
        sharpness: f32,

        /// Convert to grayscale before filtering
        #[arg(short, long)]
        grayscale: bool,
    },
    /// Extract embedded assets to filesystem for customization
    Init {
        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "IMG2PDF API",
        description = "Image-to-PDF scanning service with enhancement filters",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(api::handle_process_image),
    components(schemas(api::ProcessImageForm)),
    tags(
        (name = "Processing", description = "Image enhancement and PDF conversion")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Process {
            input,
            output,
            brightness,
            contrast,
            sharpness,
            grayscale,
        }) => run_process_command(&input, &output, brightness, contrast, sharpness, grayscale),
        Some(Commands::Init { force, list }) => run_init_command(force, list),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "img2pdf=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Create asset loader with optional external paths from env vars
    let static_dir = std::env::var("STATIC_DIR").ok().map(PathBuf::from);
    let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    tracing::info!(
        static_dir = ?static_dir.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
        config = ?config_file.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
        "Asset sources configured"
    );

    let asset_loader = Arc::new(AssetLoader::new(static_dir, config_file));

    // Create application state using shared server module
    let state = server::create_app_state(asset_loader)?;

    // Build router: shared routes plus OpenAPI documentation
    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "IMG2PDF server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Convert one image to a PDF file (no server needed)
fn run_process_command(
    input: &PathBuf,
    output: &PathBuf,
    brightness: f32,
    contrast: f32,
    sharpness: f32,
    grayscale: bool,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "img2pdf=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let raw = std::fs::read(input)?;
    let params = EnhanceParams {
        brightness,
        contrast,
        sharpness,
        grayscale,
    };

    let pipeline = ScanPipeline::new();
    let pdf_bytes = pipeline
        .process(&raw, &params)
        .map_err(|e| anyhow::anyhow!("Processing error: {e}"))?;

    std::fs::write(output, &pdf_bytes)?;
    println!("Wrote {} ({} bytes)", output.display(), pdf_bytes.len());

    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(force: bool, list: bool) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        for f in AssetLoader::list_embedded() {
            println!("  {f}");
        }
        println!("  config.yaml");
        return Ok(());
    }

    let static_dir = std::env::var("STATIC_DIR").ok().map(PathBuf::from);
    let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
    let loader = AssetLoader::new(static_dir, config_file);

    let report = loader.init(force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let static_dir = std::env::var("STATIC_DIR").ok();

    println!("IMG2PDF v{VERSION}");
    println!("Image-to-PDF scanning service\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:8000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  STATIC_DIR  = {}",
        static_dir.as_deref().unwrap_or("(not set)")
    );

    let embedded = AssetLoader::list_embedded();
    println!("\nAsset Sources:");
    let static_source = match static_dir {
        Some(ref path) if PathBuf::from(path).exists() => {
            format!("{path} ({} embedded fallbacks)", embedded.len())
        }
        _ => format!("embedded ({} files)", embedded.len()),
    };
    println!("  Static: {static_source}");
    let config_source = match config_file {
        Some(ref path) if PathBuf::from(path).exists() => path.clone(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("  Config: {config_source}");

    println!("\nCommands:");
    println!("  img2pdf serve     Start the HTTP server");
    println!("  img2pdf process   Convert a single image to PDF");
    println!("  img2pdf init      Extract embedded assets");
    println!("\nRun 'img2pdf --help' for more details.");
}
