use clap::{Args, ValueEnum};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tracing::debug;

use np_dice::{
    CheckResult, DiceError, ExplodeThreshold, Modifier, ModifierSet, OutcomeTier, RollConfig,
    RollRecord, RollReport, config::DEFAULT_MAX_POOL, perform_roll,
};

use super::StatArgs;

/// Most rolls a single `--times` batch may make.
pub const MAX_TIMES: u32 = 10_000;

/// Which presentation of a roll to print.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Every die, for the roller
    #[default]
    Actor,
    /// Successes and outcome only
    Observer,
    /// A roll record line
    Record,
}

/// Arguments for `np roll`.
#[derive(Args, Debug)]
pub struct RollArgs {
    /// Roll expression, e.g. "Strength + Brawl - 1" or "5"
    #[arg(allow_hyphen_values = true)]
    pub expression: String,

    #[command(flatten)]
    pub stats: StatArgs,

    /// Reroll every failed die once
    #[arg(long)]
    pub rote: bool,

    /// Explode dice showing N or more (8, 9, or 10)
    #[arg(long, value_name = "N")]
    pub again: Option<u32>,

    /// The roll does not cost an action
    #[arg(long)]
    pub no_cost: bool,

    /// Report successes as damage
    #[arg(long)]
    pub damage: bool,

    /// Value a die must reach to count as a success
    #[arg(long, default_value_t = 8)]
    pub threshold: u32,

    /// Largest pool that may be rolled
    #[arg(long, default_value_t = DEFAULT_MAX_POOL)]
    pub max_pool: i32,

    /// RNG seed for reproducible rolls
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Name shown for the roll
    #[arg(short, long, default_value = "Player")]
    pub actor: String,

    /// Presentation to print
    #[arg(long, value_enum, default_value_t = View::Actor)]
    pub view: View,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,

    /// Roll the same expression several times
    #[arg(
        short = 'n',
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_TIMES))
    )]
    pub times: u32,
}

impl RollArgs {
    fn modifiers(&self) -> Result<ModifierSet, DiceError> {
        let mut modifiers = Vec::new();
        if let Some(again) = self.again {
            modifiers.push(Modifier::from(ExplodeThreshold::try_from(again)?));
        }
        if self.rote {
            modifiers.push(Modifier::Rote);
        }
        if self.no_cost {
            modifiers.push(Modifier::NoCost);
        }
        if self.damage {
            modifiers.push(Modifier::DamageOnly);
        }
        Ok(ModifierSet::new(modifiers))
    }

    fn config(&self) -> RollConfig {
        let config = RollConfig::default()
            .with_threshold(self.threshold)
            .with_max_pool(self.max_pool);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

pub fn run(args: &RollArgs) -> Result<(), String> {
    let stats = super::load_stats(&args.stats)?;
    let modifiers = args.modifiers().map_err(|e| e.to_string())?;
    let config = args.config();
    let mut rng = super::make_rng(config.seed);
    let times = args.times.clamp(1, MAX_TIMES);
    debug!(expression = %args.expression, times, %modifiers, "rolling from cli");

    let mut results = Vec::with_capacity(times as usize);
    for _ in 0..times {
        let result = perform_roll(&args.expression, &stats, &modifiers, &config, &mut rng)
            .map_err(|e| e.to_string())?;
        results.push(result);
    }

    if args.json {
        let json = if let [single] = results.as_slice() {
            serde_json::to_string_pretty(single)
        } else {
            serde_json::to_string_pretty(&results)
        }
        .map_err(|e| e.to_string())?;
        println!("{json}");
        return Ok(());
    }

    match results.as_slice() {
        [single] => print_single(args, single),
        many => print_batch(many),
    }
    Ok(())
}

fn print_single(args: &RollArgs, result: &CheckResult) {
    let report = RollReport::new(&args.actor, result);
    match args.view {
        View::Actor => println!("{}", super::paint(&report.actor_view(), result.tier)),
        View::Observer => println!("{}", super::paint(&report.observer_view(), result.tier)),
        View::Record => {
            let mut record = RollRecord::new();
            record.append(report.record_entry());
            print!("{}", record.export_markdown());
        }
    }
}

fn print_batch(results: &[CheckResult]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Dice", "Successes", "Outcome"]);

    for (i, result) in results.iter().enumerate() {
        let dice: Vec<String> = result
            .roll
            .die_results
            .iter()
            .map(|v| v.to_string())
            .collect();
        table.add_row(vec![
            (i + 1).to_string(),
            dice.join(", "),
            result.successes().to_string(),
            result.tier.to_string(),
        ]);
    }

    println!("{table}");
    println!();

    let total: u32 = results.iter().map(CheckResult::successes).sum();
    let count = |tier: OutcomeTier| results.iter().filter(|r| r.tier == tier).count();
    println!(
        "  {} rolls, {:.2} successes on average",
        results.len(),
        f64::from(total) / results.len() as f64
    );
    for tier in [
        OutcomeTier::ExceptionalSuccess,
        OutcomeTier::Success,
        OutcomeTier::Failure,
        OutcomeTier::DramaticFailure,
    ] {
        let n = count(tier);
        if n > 0 {
            println!("  {}: {n}", super::paint(&tier.to_string(), tier));
        }
    }
    if let Some(first) = results.first()
        && first.is_chance_roll()
    {
        println!("  {}", "(each roll used a chance die)".dimmed());
    }
}
