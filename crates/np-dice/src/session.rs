//! Interactive roll sessions.
//!
//! `RollSession` turns command lines such as `roll/rote/9again Wits + Occult`
//! into rolls for one actor, and keeps the shared roll record.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::check::perform_roll;
use crate::config::RollConfig;
use crate::dice::{Modifier, ModifierSet};
use crate::error::{DiceError, DiceResult};
use crate::parse::parse;
use crate::record::{OpenPolicy, RecordPolicy, RollRecord};
use crate::report::RollReport;
use crate::stats::{StatResolver, resolve_request};

/// A roll session for one actor.
pub struct RollSession {
    actor: String,
    stats: Box<dyn StatResolver>,
    config: RollConfig,
    record: RollRecord,
    policy: Box<dyn RecordPolicy>,
    rng: StdRng,
    finished: bool,
}

impl RollSession {
    /// Create a session. A seeded config gives reproducible rolls.
    pub fn new(actor: &str, stats: impl StatResolver + 'static, config: RollConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            actor: actor.to_string(),
            stats: Box::new(stats),
            config,
            record: RollRecord::new(),
            policy: Box::new(OpenPolicy),
            rng,
            finished: false,
        }
    }

    /// Replace the policy that gates posts to the record.
    pub fn with_policy(mut self, policy: impl RecordPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// The acting character's name.
    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// The session configuration.
    pub fn config(&self) -> &RollConfig {
        &self.config
    }

    /// The shared roll record.
    pub fn record(&self) -> &RollRecord {
        &self.record
    }

    /// Returns true once a `quit` command has been processed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Process a line of user input and return a response.
    pub fn process(&mut self, input: &str) -> DiceResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let (head, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (trimmed, ""),
        };
        let mut switches = head.split('/');
        let cmd = switches.next().unwrap_or_default().to_lowercase();
        let switches: Vec<&str> = switches.collect();

        match cmd.as_str() {
            "roll" | "r" => self.do_roll(&switches, rest),
            "chance" => self.do_roll(&switches, "0"),
            "parse" => self.do_parse(rest),
            "record" => self.do_record(rest),
            "help" | "?" => Ok(help_text().to_string()),
            "quit" | "q" => {
                self.finished = true;
                Ok("Goodbye!".to_string())
            }
            _ => Err(DiceError::UnknownCommand(cmd)),
        }
    }

    fn do_roll(&mut self, switches: &[&str], expression: &str) -> DiceResult<String> {
        if expression.is_empty() {
            return Err(DiceError::InvalidChoice(
                "usage: roll[/switch...] <expression>".to_string(),
            ));
        }
        let (modifiers, post) = parse_switches(switches)?;
        debug!(actor = %self.actor, expression, %modifiers, post, "session roll");

        let result = perform_roll(
            expression,
            self.stats.as_ref(),
            &modifiers,
            &self.config,
            &mut self.rng,
        )?;
        let report = RollReport::new(&self.actor, &result);
        let mut output = report.actor_view();

        if post {
            match self.record.post(report.record_entry(), self.policy.as_ref()) {
                Ok(()) => output.push_str("\n(posted to record)"),
                Err(e) => output.push_str(&format!("\n(not posted: {e})")),
            }
        }
        Ok(output)
    }

    fn do_parse(&self, expression: &str) -> DiceResult<String> {
        if expression.is_empty() {
            return Err(DiceError::InvalidChoice(
                "usage: parse <expression>".to_string(),
            ));
        }
        let request = parse(expression)?;
        let mut out = format!("{}: {request}", request.shape());
        match resolve_request(&request, self.stats.as_ref()) {
            Ok(pool) if pool.final_pool <= 0 => out.push_str(" (chance die)"),
            Ok(pool) => out.push_str(&format!(" (pool {})", pool.final_pool)),
            Err(e) => out.push_str(&format!(" ({e})")),
        }
        Ok(out)
    }

    fn do_record(&self, format: &str) -> DiceResult<String> {
        match format.to_lowercase().as_str() {
            "markdown" | "md" | "" => Ok(self.record.export_markdown()),
            "text" | "txt" => Ok(self.record.export_text()),
            other => Err(DiceError::InvalidChoice(format!(
                "unknown format '{other}', use: markdown, text"
            ))),
        }
    }
}

/// Split roll switches into modifiers and the `post` flag.
fn parse_switches(switches: &[&str]) -> DiceResult<(ModifierSet, bool)> {
    let mut post = false;
    let mut modifiers = Vec::new();
    for switch in switches {
        if switch.eq_ignore_ascii_case("post") {
            post = true;
            continue;
        }
        let modifier = Modifier::from_switch(switch)
            .ok_or_else(|| DiceError::UnknownSwitch((*switch).to_string()))?;
        modifiers.push(modifier);
    }
    Ok((ModifierSet::new(modifiers), post))
}

fn help_text() -> &'static str {
    "\
Roll Commands:
  roll[/switch...] <expr>       Roll a pool, e.g. roll/rote Wits + Occult - 1
  chance[/switch...]            Roll a chance die
  parse <expr>                  Show how an expression parses
  record [markdown|text]        Export the roll record
  help                          Show this help
  quit                          Exit

Switches: rote, 8again, 9again, 10again, nocost, damage, post"
}
