/*!
# Mosaic

Mosaic turns daily journal text into collage poems: short phrases are cut
from an entry, styled like scraps of paper, and arranged into four-line and
eight-line layouts alongside an illustration.

## Architecture

- `collage`: fragments, layouts, the line allocator, manual composition and rendering
- `ai`: phrase extraction and illustration through Ollama, with local fallbacks
- `journal`: the date-keyed entry store abstraction
- `db`: SQLite persistence for entries and collages
- `editor`: external editor integration
- `ops`: the write / generate / compose / export workflows
- `cli`: command-line argument definitions
- `config`, `constants`, `errors`: ambient infrastructure

## Usage Example

```rust,no_run
use mosaic::ai::{LocalExtractor, NoImageSynthesizer};
use mosaic::collage::{render::render_text, PoemVariant};
use mosaic::db::Database;
use mosaic::journal::EntryStore;
use mosaic::ops::generate_collage;
use mosaic::Config;

fn main() -> mosaic::AppResult<()> {
    let config = Config::load()?;
    let db = Database::open(&config.db_path())?;
    db.initialize_schema()?;

    let today = chrono::Local::now().date_naive();
    let text = db.get(today)?.unwrap_or_default();

    let extractor = LocalExtractor::new(rand::thread_rng());
    let poem = generate_collage(
        &extractor,
        &NoImageSynthesizer,
        &text,
        today,
        &mut rand::thread_rng(),
    )?;
    print!("{}", render_text(&poem, PoemVariant::FourLines));
    Ok(())
}
```
*/

pub mod ai;
pub mod cli;
pub mod collage;
pub mod config;
pub mod constants;
pub mod db;
pub mod editor;
pub mod errors;
pub mod journal;
pub mod ops;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use collage::{CollagePoem, PoemVariant};
pub use config::Config;
pub use errors::{AppError, AppResult};
