use std::io::{self, BufRead, Write};

use colored::Colorize;

use np_dice::{RollConfig, RollSession};

use super::StatArgs;

pub fn run(stats: &StatArgs, actor: &str, seed: Option<u64>) -> Result<(), String> {
    let block = super::load_stats(stats)?;
    let mut config = RollConfig::default();
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let stat_count = block.len();
    let mut session = RollSession::new(actor, block, config);

    println!("  {} Nightpool session for {actor}", "Starting".bold());
    match seed {
        Some(seed) => println!("  Stats: {stat_count} | Seed: {seed}"),
        None => println!("  Stats: {stat_count}"),
    }
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match session.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
                if session.is_finished() {
                    break;
                }
            }
            Err(e) => {
                println!("{}\n", e.to_string().yellow());
            }
        }
    }

    Ok(())
}
