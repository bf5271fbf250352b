use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use iterm_schemer::models::{AppConfig, ColorScheme, CONFIG_ENV};
use iterm_schemer::rendering::{palette_escape, row_line};
use iterm_schemer::services::{Overrides, SchemeTranslator, TranslationSettings};

#[derive(Parser)]
#[command(name = "iterm-schemer")]
#[command(about = "Translates iTerm2 color schemes between dark- and light-background")]
struct Cli {
    /// The input iTerm2 color scheme (.itermcolors)
    src_scheme: PathBuf,

    /// The output iTerm2 color scheme (.itermcolors)
    dst_scheme: PathBuf,

    /// Background of the input scheme: dark, neutral, light or a configured name
    #[arg(long)]
    src_bg: Option<String>,

    /// Background to translate the scheme to
    #[arg(long)]
    dst_bg: Option<String>,

    /// Invert the foreground, background, bold, cursor and cursor text colors
    #[arg(long, overrides_with = "no_invert")]
    invert: bool,

    /// Do not invert, even when the config file asks to
    #[arg(long, overrides_with = "invert")]
    no_invert: bool,

    /// Factor to scale output lightness by (ANSI colors only)
    #[arg(long)]
    j_fac: Option<f64>,

    /// Factor to scale output colorfulness by
    #[arg(long)]
    m_fac: Option<f64>,

    /// Set the current terminal's palette to the output color scheme
    #[arg(long)]
    set_palette: bool,

    /// YAML file with defaults and custom viewing conditions
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            src_bg: self.src_bg.clone(),
            dst_bg: self.dst_bg.clone(),
            invert: match (self.invert, self.no_invert) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
            j_fac: self.j_fac,
            m_fac: self.m_fac,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iterm_schemer=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(io::stderr),
        )
        .init();

    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
    let config = AppConfig::load(config_path.as_deref());
    let settings = TranslationSettings::resolve(&config, &cli.overrides());

    let mut scheme = ColorScheme::from_file(&cli.src_scheme)
        .with_context(|| format!("Failed to read {}", cli.src_scheme.display()))?;
    let translator = SchemeTranslator::new(&settings);
    let results = translator.translate_scheme(&mut scheme)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for result in &results {
        writeln!(out, "{}", row_line(&result.name, result.before, result.after))?;
        if cli.set_palette {
            if let Some(escape) = palette_escape(result.index, result.after) {
                write!(out, "{escape}")?;
                out.flush()?;
            }
        }
    }

    scheme
        .write_file(&cli.dst_scheme)
        .with_context(|| format!("Failed to write {}", cli.dst_scheme.display()))?;

    tracing::info!(
        path = %cli.dst_scheme.display(),
        rows = results.len(),
        recovered = results.iter().filter(|r| r.recovered).count(),
        "Wrote color scheme"
    );

    Ok(())
}
