use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::category::{Category, OpenCategories};
use crate::decide::{decide, Decision, Trial};
use crate::dice::{Dice, Roll};
use crate::error::DecisionError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TurnConfig {
    #[serde(default)]
    pub seed: u64,
    /// Categories still open; empty means a fresh scoreboard.
    #[serde(default)]
    pub open: Vec<Category>,
}

impl TurnConfig {
    pub fn open_categories(&self) -> OpenCategories {
        if self.open.is_empty() {
            Category::ALL.into_iter().collect()
        } else {
            self.open.iter().copied().collect()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TurnTrace {
    pub rolls: Vec<Roll>,
    pub decisions: Vec<Decision>,
    pub choice: Category,
    pub log: Vec<String>,
}

impl TurnTrace {
    pub fn rolls_used(&self) -> usize {
        self.rolls.len()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TurnStats {
    pub samples: u32,
    pub choices: IndexMap<Category, u32>,
    pub committed_early: u32,
    pub avg_rolls: f64,
}

/// Play one turn: roll, follow each decision, stop once a category is chosen.
pub fn play_turn(dice: &mut Dice, open: &OpenCategories) -> Result<TurnTrace, DecisionError> {
    if open.is_empty() {
        return Err(DecisionError::NoOpenCategory("turn player".to_string()));
    }

    let mut rolls = Vec::new();
    let mut decisions = Vec::new();
    let mut log = Vec::new();
    let mut roll = dice.roll();
    let mut trial = Trial::First;

    loop {
        log.push(format!("[ROLL] {} → {}", trial.number(), roll));
        let decision = decide(&roll, trial, open);
        rolls.push(roll);

        if let Some(choice) = decision.choice {
            let note = if trial.is_final() { "final roll" } else { "commit" };
            log.push(format!("[CHOICE] {} ({})", choice, note));
            decisions.push(decision);
            return Ok(TurnTrace {
                rolls,
                decisions,
                choice,
                log,
            });
        }

        log.push(format!(
            "[KEEP] {:?} → reroll {} dice",
            decision.keep,
            crate::dice::DICE_COUNT - decision.keep.len()
        ));
        roll = dice.reroll(&roll, &decision.keep);
        decisions.push(decision);

        // the final trial always commits, so this only stops on a broken engine
        trial = match trial.next() {
            Some(next) => next,
            None => return Err(DecisionError::InvalidTrial(i32::from(trial.number()) + 1)),
        };
    }
}

/// Sample many turns; turn `i` uses seed `seed + i`.
pub fn simulate_turns(cfg: &TurnConfig, samples: u32) -> Result<TurnStats, DecisionError> {
    let open = cfg.open_categories();
    let mut choices: IndexMap<Category, u32> = open.iter().map(|c| (*c, 0)).collect();
    let mut committed_early = 0u32;
    let mut rolls_total = 0u64;

    for i in 0..samples {
        let mut dice = Dice::from_seed(cfg.seed.wrapping_add(u64::from(i)));
        let trace = play_turn(&mut dice, &open)?;
        *choices.entry(trace.choice).or_insert(0) += 1;
        if trace.rolls_used() < 3 {
            committed_early += 1;
        }
        rolls_total += trace.rolls_used() as u64;
    }

    let avg_rolls = if samples == 0 {
        0.0
    } else {
        rolls_total as f64 / f64::from(samples)
    };
    Ok(TurnStats {
        samples,
        choices,
        committed_early,
        avg_rolls,
    })
}
