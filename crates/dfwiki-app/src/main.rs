use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dfwiki_lang_english::EnglishProcessor;
use dfwiki_types::Language;
use tracing_subscriber::EnvFilter;

mod commands;
mod profile;
mod state;

use self::state::AppState;

/// Dwarf Fortress wiki lookup, rendering and translation
#[derive(Debug, Parser)]
#[command(name = "dfwiki", version)]
struct Cli {
    /// JSON config profile (defaults to ./dfwiki.json when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLanguage {
    Source,
    Target,
}

impl From<CliLanguage> for Language {
    fn from(lang: CliLanguage) -> Self {
        match lang {
            CliLanguage::Source => Language::Source,
            CliLanguage::Target => Language::Target,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find wiki entries named in recognized text
    Lookup {
        text: String,
        /// Print rendered pages as JSON instead of a match list
        #[arg(long)]
        render: bool,
        #[arg(long, value_enum, default_value = "source")]
        lang: CliLanguage,
    },
    /// Render a wiki markup file, printing `{html, media}` JSON
    Render {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Substitute vocabulary terms in a wiki markup file
    Translate {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Machine-translate a sentence with game terms fixed
    Sentence { text: String },
    /// Look up the English words in a piece of text
    Define { text: String },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn read_markup(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = profile::load_config(cli.config.as_deref())?;
    let state = AppState::new(config);

    let output = match cli.command {
        Commands::Lookup { text, render, lang } => {
            let library = state.load_library()?;
            commands::lookup(&library, &text, render, lang.into())?
        }
        Commands::Render { file } => {
            commands::render_markup(&state.renderer(), &read_markup(&file)?)?
        }
        Commands::Translate { file } => {
            let map = state.load_translation_map()?;
            commands::translate_markup(&read_markup(&file)?, &map.vocabulary())
        }
        Commands::Sentence { text } => {
            let translator = state.sentence_translator()?;
            commands::sentence(&translator, &text).await?
        }
        Commands::Define { text } => {
            let processor = EnglishProcessor::new(state.load_dictionary()?);
            commands::define(&processor, &text)?
        }
    };

    println!("{output}");
    Ok(())
}
