//! Constants used throughout the application.
//!
//! This module contains all constants used in the Mosaic application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "mosaic";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "Turn daily journal text into collage poems";
/// Default title given to every generated collage.
pub const DEFAULT_POEM_TITLE: &str = "拼贴诗";
/// Footer printed on rendered collages.
pub const COLLAGE_FOOTER: &str = "MOSAIC MUSE";
/// Font family recorded on generated collages.
pub const DEFAULT_FONT_FAMILY: &str = "'Noto Serif SC', serif";

// CLI Arguments & Defaults
/// Default command for the editor if not specified otherwise.
pub const DEFAULT_EDITOR_COMMAND: &str = "vim";
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Configuration Keys & Environment Variables
/// Environment variable for the Mosaic data directory.
pub const ENV_VAR_MOSAIC_DIR: &str = "MOSAIC_DIR";
/// Environment variable for the preferred Mosaic editor.
pub const ENV_VAR_MOSAIC_EDITOR: &str = "MOSAIC_EDITOR";
/// Standard environment variable for specifying the default editor.
pub const ENV_VAR_EDITOR: &str = "EDITOR";
/// Environment variable for the Ollama base URL.
pub const ENV_VAR_OLLAMA_URL: &str = "MOSAIC_OLLAMA_URL";
/// Environment variable for the chat model used for fragment extraction.
pub const ENV_VAR_TEXT_MODEL: &str = "MOSAIC_TEXT_MODEL";
/// Environment variable for the image model. Unset disables image synthesis.
pub const ENV_VAR_IMAGE_MODEL: &str = "MOSAIC_IMAGE_MODEL";
/// Environment variable selecting the log format.
pub const ENV_VAR_LOG_FORMAT: &str = "MOSAIC_LOG_FORMAT";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory name for Mosaic data within the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = "Documents/mosaic";
/// Database filename inside the data directory.
pub const DATABASE_FILENAME: &str = "mosaic.db";
/// Sub-directory of the data directory holding per-date edit locks.
pub const LOCK_SUBDIR: &str = ".locks";

// AI Defaults
/// Default Ollama API base URL.
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";
/// Default chat model for fragment extraction and keyword selection.
pub const DEFAULT_TEXT_MODEL: &str = "llama3.2:3b";
/// Minimum number of four-line phrases accepted from the extraction service.
pub const MIN_EXTRACTED_PHRASES: usize = 2;
/// Minimum length, in characters, of an extracted phrase.
pub const MIN_PHRASE_CHARS: usize = 2;
/// Number of seed characters sent to the keyword prompt.
pub const IMAGE_SEED_CHARS: usize = 30;
/// Keywords used when the chat model returns nothing usable.
pub const DEFAULT_IMAGE_KEYWORDS: &str = "Shapes, Nature";

// Fallback Extraction
/// Phrases appended when the entry yields too few segments.
pub const FALLBACK_FILLER_PHRASES: &[&str] = &["此刻", "呼吸", "留白", "光影", "碎片"];
/// Segment count at or below which filler phrases are appended.
pub const FALLBACK_MIN_SEGMENTS: usize = 5;
/// Maximum phrases in the fallback four-line corpus.
pub const FALLBACK_FOUR_LINE_PHRASES: usize = 10;
/// Maximum phrases in the fallback eight-line corpus.
pub const FALLBACK_EIGHT_LINE_PHRASES: usize = 16;
/// Characters the fallback extractor splits on, in addition to whitespace.
pub const FALLBACK_SEPARATORS: &[char] = &['，', '。', '！', '？', ',', '.', ';', '!'];

/// Images used when synthesis is unavailable or fails.
pub const FALLBACK_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1586075010633-2442dcad1afc?q=80&w=800&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1614850523296-d8c1af93d400?q=80&w=800&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1596230502181-aa954608c005?q=80&w=800&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1516550893923-42d28e5677af?q=80&w=800&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1544733306-056580f1a26d?q=80&w=800&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1550684848-fac1c5b4e853?q=80&w=800&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1604147708224-5012193d9fb5?q=80&w=800&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1505330622279-bf7d7fc918f4?q=80&w=800&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1494438639946-1ebd1d20bf85?q=80&w=800&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1515344831627-2c968f9b9f7a?q=80&w=800&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1518531933037-91b2f5f229cc?q=80&w=800&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1507525428034-b723cf961d3e?q=80&w=800&auto=format&fit=crop",
];

// Collage Layout
/// Lines in the short collage variant.
pub const FOUR_LINE_COUNT: usize = 4;
/// Lines in the long collage variant.
pub const EIGHT_LINE_COUNT: usize = 8;
/// Preferred upper bound (exclusive) on a line's combined character length.
pub const SOFT_LINE_CAP: usize = 12;
/// Pronoun-like tokens flagging likely redundant phrasing within a line.
pub const SUBJECT_MARKERS: &[&str] = &["我", "你", "您", "他", "她", "它", "咱"];
/// Fragment palette as (background, text) colour pairs.
pub const FRAGMENT_PALETTE: &[(&str, &str)] = &[
    ("#fdfcf0", "#1e293b"),
    ("#f1f5f9", "#334155"),
    ("#fff1f2", "#991b1b"),
    ("#f0fdf4", "#065f46"),
    ("#ffffff", "#1e293b"),
    ("#fafaf9", "#44403c"),
];
/// Maximum absolute fragment rotation in degrees.
pub const MAX_FRAGMENT_ROTATION: f32 = 6.0;
/// Default fragment font size.
pub const FRAGMENT_FONT_SIZE: &str = "1rem";
/// Default fragment padding.
pub const FRAGMENT_PADDING: &str = "4px 8px";
/// Punctuation appended to every line but the last.
pub const LINE_BREAK_GLYPH: &str = "，";
/// Punctuation appended to the last line.
pub const FINAL_LINE_GLYPH: &str = "。";

// Entry Store
/// Number of most recent dates kept by the entry store.
pub const ENTRY_RETENTION_DAYS: usize = 30;

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD).
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";

// Validation
/// Characters forbidden in editor commands for security reasons.
pub const EDITOR_FORBIDDEN_CHARS: &[char] =
    &['|', '&', ';', '$', '(', ')', '`', '\\', '<', '>', '\'', '"'];
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "mosaic";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
