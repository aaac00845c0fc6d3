/*!
# Mosaic

Command-line entry point: parses arguments, sets up logging, loads
configuration and dispatches to the operations in `mosaic::ops`.

## Usage

```text
mosaic [OPTIONS] <COMMAND>

Commands:
  write     Write the day's entry in your editor
  show      Print the day's entry
  list      List retained entries, newest first
  generate  Generate a collage poem from the day's entry
  view      Print the latest collage for a day
  pool      Print the numbered phrase pool of the latest collage
  compose   Arrange pool phrases into a manual layout
  export    Write the latest collage as an SVG card

Options:
  -v, --verbose              Print debug output
      --log-format <FORMAT>  Log format on stderr [possible values: text, json]
```
*/

use chrono::{Local, NaiveDate};
use clap::Parser;
use mosaic::ai::{
    ImageSynthesizer, LocalExtractor, NoImageSynthesizer, OllamaClient,
    OllamaExtractor, OllamaImageSynthesizer,
};
use mosaic::cli::{CliArgs, Command};
use mosaic::collage::render::render_text;
use mosaic::collage::PoemVariant;
use mosaic::constants::{
    APP_NAME, DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME,
};
use mosaic::db::Database;
use mosaic::editor::SystemEditor;
use mosaic::errors::{AppError, AppResult};
use mosaic::journal::EntryStore;
use mosaic::ops;
use mosaic::{CollagePoem, Config};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let log_format = match args.log_format() {
        Ok(format) => format,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = init_tracing(args.verbose, &log_format) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let correlation_id = uuid::Uuid::new_v4();
    let span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = span.enter();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool, format: &str) -> AppResult<()> {
    let level = if verbose { "debug" } else { DEFAULT_LOG_LEVEL };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", APP_NAME, level)));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if format == LOG_FORMAT_JSON {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| AppError::Config(format!("Failed to initialize logging: {}", e)))
}

fn run(args: CliArgs) -> AppResult<()> {
    debug!("CLI arguments: {:?}", args);

    let config = Config::load()?;
    config.validate()?;
    debug!("Loaded configuration: {:?}", config);

    std::fs::create_dir_all(&config.data_dir)?;
    let db = Database::open(&config.db_path())?;
    db.initialize_schema()?;

    let today = Local::now().date_naive();

    match args.command {
        Command::Write { date, text } => {
            let date = date.resolve(today);
            match text {
                Some(text) => ops::save_text(&db, date, &text)?,
                None => {
                    let editor = SystemEditor::new(config.editor.clone());
                    if !ops::write_entry(&config, &db, &editor, date)? {
                        println!("No changes for {}", date);
                    }
                }
            }
        }

        Command::Show { date } => {
            let date = date.resolve(today);
            let text = db
                .get(date)?
                .ok_or_else(|| AppError::Journal(format!("No entry for {}", date)))?;
            println!("{}", text.trim_end());
        }

        Command::List => {
            let entries = db.list()?;
            if entries.is_empty() {
                println!("No entries yet");
            }
            for entry in entries {
                println!("{}  {}", entry.date, preview(&entry.content));
            }
        }

        Command::Generate {
            date,
            text,
            offline,
            variant,
            export,
        } => {
            let date = date.resolve(today);
            if variant == PoemVariant::Manual {
                return Err(AppError::Collage(
                    "A new collage has no manual layout; use `mosaic compose` instead".to_string(),
                ));
            }
            let text = match text {
                Some(text) => text,
                None => db.get(date)?.ok_or_else(|| {
                    AppError::Journal(format!(
                        "No entry for {}; write one first or pass --text",
                        date
                    ))
                })?,
            };

            let poem = generate(&config, offline, &text, date)?;
            db.save_collage(&poem)?;

            print!("{}", render_text(&poem, variant));
            if let Some(path) = export {
                export_to(&poem, variant, &path)?;
            }
        }

        Command::View { date, variant } => {
            let poem = latest(&db, date.resolve(today))?;
            ops::require_variant(&poem, variant)?;
            print!("{}", render_text(&poem, variant));
        }

        Command::Pool { date } => {
            let poem = latest(&db, date.resolve(today))?;
            for (index, phrase) in poem.raw_pool.iter().enumerate() {
                println!("{:>3}  {}", index, phrase);
            }
        }

        Command::Compose {
            date,
            lines,
            export,
        } => {
            let poem = latest(&db, date.resolve(today))?;
            let indices = lines
                .iter()
                .map(|line| ops::parse_line_indices(line))
                .collect::<AppResult<Vec<_>>>()?;

            let composed = ops::compose_manual(&poem, &indices, &mut rand::thread_rng())?;
            db.save_collage(&composed)?;

            print!("{}", render_text(&composed, PoemVariant::Manual));
            if let Some(path) = export {
                export_to(&composed, PoemVariant::Manual, &path)?;
            }
        }

        Command::Export {
            date,
            variant,
            output,
        } => {
            let poem = latest(&db, date.resolve(today))?;
            export_to(&poem, variant, &output)?;
        }
    }

    Ok(())
}

fn generate(config: &Config, offline: bool, text: &str, date: NaiveDate) -> AppResult<CollagePoem> {
    let mut rng = StdRng::from_entropy();

    if offline {
        info!("Generating offline");
        let extractor = LocalExtractor::new(StdRng::from_entropy());
        return ops::generate_collage(&extractor, &NoImageSynthesizer, text, date, &mut rng);
    }

    let client = OllamaClient::new(config.ollama_url.clone());
    let extractor = OllamaExtractor::new(&client, config.text_model.clone());
    let synthesizer: Box<dyn ImageSynthesizer + '_> = match &config.image_model {
        Some(model) => Box::new(OllamaImageSynthesizer::new(
            &client,
            config.text_model.clone(),
            model.clone(),
        )),
        None => Box::new(NoImageSynthesizer),
    };

    ops::generate_collage(&extractor, synthesizer.as_ref(), text, date, &mut rng)
}

fn latest(db: &Database, date: NaiveDate) -> AppResult<CollagePoem> {
    db.latest_collage(date)?.ok_or_else(|| {
        AppError::Collage(format!(
            "No collage for {}; run `mosaic generate` first",
            date
        ))
    })
}

fn export_to(poem: &CollagePoem, variant: PoemVariant, path: &Path) -> AppResult<()> {
    ops::export_svg(poem, variant, path)?;
    println!("Exported to {}", path.display());
    Ok(())
}

/// First line of an entry, cut to 40 characters.
fn preview(content: &str) -> String {
    let first = content.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let mut preview: String = first.trim().chars().take(40).collect();
    if first.trim().chars().count() > 40 {
        preview.push('…');
    }
    preview
}
