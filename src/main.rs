use clap::{Parser, Subcommand};
use recompress::config::{self, AppConfig};
use recompress::imaging::RustCodec;
use recompress::output::{self, TerminalView};
use recompress::session::Session;
use recompress::source::SourceFile;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "recompress")]
#[command(about = "Re-encode an image as a smaller JPEG")]
#[command(long_about = "\
Re-encode an image as a smaller JPEG

The image is decoded at its native size and written back out as a JPEG at
the configured quality (70% by default). The result is saved in the output
directory under a name that records the new size:

  holiday.png  →  holiday_compressed_312.44kb.jpg

Run 'recompress gen-config' to generate a documented recompress.toml.")]
#[command(version)]
struct Cli {
    /// Config file (default: ./recompress.toml if it exists)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert one image and save the compressed copy
    Convert {
        /// Image file to convert
        file: PathBuf,

        /// Directory the compressed file is written to
        #[arg(long, short, default_value = ".")]
        output_dir: PathBuf,

        /// Declared media type (default: guessed from the extension)
        #[arg(long)]
        media_type: Option<String>,

        /// Print a JSON report on stdout; status goes to stderr
        #[arg(long)]
        json: bool,
    },
    /// Print a stock recompress.toml with all options documented
    GenConfig,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Convert {
            file,
            output_dir,
            media_type,
            json,
        } => {
            let cwd = std::env::current_dir()?;
            let app_config = config::load_config(cli.config.as_deref(), &cwd)?;
            init_logging(&app_config, cli.verbose);
            convert(&app_config, file, output_dir, media_type, json).await
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn convert(
    app_config: &AppConfig,
    file: PathBuf,
    output_dir: PathBuf,
    media_type: Option<String>,
    json: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let source = SourceFile::from_path(&file, media_type.as_deref())?;
    let view = if json {
        TerminalView::stderr()
    } else {
        TerminalView::stdout()
    };
    let mut session = Session::new(
        view,
        RustCodec::new(),
        app_config.encode_settings(),
        app_config.report.size_warning_kb,
    );

    session.select(Some(source));
    let Some(outcome) = session.convert().await else {
        return Ok(ExitCode::SUCCESS);
    };
    // The view has already shown the user message; details went to the log.
    let Ok(converted) = outcome else {
        return Ok(ExitCode::FAILURE);
    };

    let saved = converted.download.save(&output_dir)?;
    if json {
        println!(
            "{}",
            output::format_json_report(&converted.artifact_summary, &saved)?
        );
    } else {
        println!("{}", output::format_saved(&saved));
    }
    Ok(ExitCode::SUCCESS)
}

/// Install the stderr subscriber. `RUST_LOG` wins, then `--verbose`, then
/// `logging.level` from the config.
fn init_logging(app_config: &AppConfig, verbose: bool) {
    let fallback = if verbose {
        "debug"
    } else {
        app_config.logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
