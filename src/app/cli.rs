use clap::Parser;
use std::path::PathBuf;

use crate::app::config::Config;

#[derive(Parser, Debug, Clone)]
#[command(name = "swipedeck")]
#[command(version)]
#[command(about = "Swipe through a deck of remote images in your terminal", long_about = None)]
pub struct Args {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write a default config file to this path (or directory) and exit
    #[arg(long, value_name = "PATH")]
    pub generate_config: Option<PathBuf>,

    /// Cards per deck (overrides config)
    #[arg(short = 'n', long, value_parser = parse_deck_size)]
    pub deck_size: Option<usize>,

    /// Image URL template (overrides config); supports {seed}, {width} and {height}
    #[arg(short, long)]
    pub source: Option<String>,
}

impl Args {
    /// Apply command-line overrides on top of the loaded config
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(size) = self.deck_size {
            config.deck.size = size;
        }
        if let Some(ref source) = self.source {
            config.deck.source = source.clone();
        }
    }
}

fn parse_deck_size(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err("deck size must be at least 1".to_string()),
        Err(_) => Err(format!("Invalid deck size '{}': expected a positive number", s)),
    }
}
