pub mod parse;
pub mod play;
pub mod roll;

use std::fs;
use std::path::PathBuf;

use clap::Args;
use colored::{ColoredString, Colorize};
use rand::SeedableRng;
use rand::rngs::StdRng;

use np_dice::{OutcomeTier, StatBlock};

/// Where a character's stats come from.
#[derive(Args, Debug, Clone, Default)]
pub struct StatArgs {
    /// JSON file of `"Name": value` stats
    #[arg(long, value_name = "FILE")]
    pub stats: Option<PathBuf>,

    /// A single stat, overriding the file (repeatable)
    #[arg(long = "stat", value_name = "NAME=VALUE", value_parser = parse_stat_pair)]
    pub stat: Vec<(String, i32)>,
}

/// Build a stat block from a stats file and `--stat` overrides.
fn load_stats(args: &StatArgs) -> Result<StatBlock, String> {
    let mut block = match &args.stats {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            StatBlock::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))?
        }
        None => StatBlock::new(),
    };
    for (name, value) in &args.stat {
        block.set(name, *value);
    }
    Ok(block)
}

fn parse_stat_pair(raw: &str) -> Result<(String, i32), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing stat name in '{raw}'"));
    }
    let value = value
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("stat value must be an integer, got '{}'", value.trim()))?;
    Ok((name.to_string(), value))
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn paint(text: &str, tier: OutcomeTier) -> ColoredString {
    match tier {
        OutcomeTier::DramaticFailure => text.red().bold(),
        OutcomeTier::Failure => text.yellow(),
        OutcomeTier::Success => text.green(),
        OutcomeTier::ExceptionalSuccess => text.green().bold(),
    }
}
