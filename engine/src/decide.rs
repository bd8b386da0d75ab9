use serde::{Deserialize, Serialize};

use crate::category::{small_straight_window, Category, OpenCategories};
use crate::dice::{GroupedDice, Roll};
use crate::error::DecisionError;
use crate::fallback;

/// Roll number within a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Trial {
    First,
    Second,
    Final,
}

impl Trial {
    pub fn number(self) -> u8 {
        match self {
            Trial::First => 1,
            Trial::Second => 2,
            Trial::Final => 3,
        }
    }

    pub fn is_final(self) -> bool {
        matches!(self, Trial::Final)
    }

    pub fn next(self) -> Option<Trial> {
        match self {
            Trial::First => Some(Trial::Second),
            Trial::Second => Some(Trial::Final),
            Trial::Final => None,
        }
    }
}

impl TryFrom<i32> for Trial {
    type Error = DecisionError;

    fn try_from(n: i32) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Trial::First),
            2 => Ok(Trial::Second),
            3 => Ok(Trial::Final),
            other => Err(DecisionError::InvalidTrial(other)),
        }
    }
}

/// What to do with the current roll.
///
/// `choice` set means score that category now. Otherwise every position not
/// in `keep` is rerolled.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Decision {
    #[serde(default)]
    pub keep: Vec<usize>,
    #[serde(default)]
    pub choice: Option<Category>,
}

impl Decision {
    pub fn choose(category: Category) -> Self {
        Self {
            keep: Vec::new(),
            choice: Some(category),
        }
    }

    /// Keep the given positions, sorted and de-duplicated.
    pub fn keep(positions: impl IntoIterator<Item = usize>) -> Self {
        let mut keep: Vec<usize> = positions.into_iter().collect();
        keep.sort_unstable();
        keep.dedup();
        Self { keep, choice: None }
    }

    pub fn reroll_all() -> Self {
        Self::default()
    }

    pub fn is_commit(&self) -> bool {
        self.choice.is_some()
    }
}

pub fn decide(roll: &Roll, trial: Trial, open: &OpenCategories) -> Decision {
    let grouped = roll.grouped();
    if trial.is_final() {
        Decision::choose(decide_final(&grouped, open))
    } else {
        decide_reroll(&grouped, open)
    }
}

/// Open categories matched by the roll, best first.
fn ranked_matches(grouped: &GroupedDice, open: &OpenCategories, with_choice: bool) -> Vec<Category> {
    let mut matched: Vec<Category> = open
        .iter()
        .copied()
        .filter(|c| with_choice || *c != Category::Choice)
        .filter(|c| c.is_matched(grouped))
        .collect();
    // stable: equal priorities stay in category order
    matched.sort_by_key(|c| c.choice_priority());
    matched
}

/// Category to score when no reroll follows.
///
/// Falls back to `Choice` only for an empty open set, which the request
/// layer rejects before getting here.
pub fn decide_final(grouped: &GroupedDice, open: &OpenCategories) -> Category {
    if let Some(best) = ranked_matches(grouped, open, true).first() {
        return *best;
    }
    // min_by_key keeps the first minimum, so ties go to category order
    open.iter()
        .copied()
        .min_by_key(|c| c.discard_priority(grouped))
        .unwrap_or(Category::Choice)
}

pub fn decide_reroll(grouped: &GroupedDice, open: &OpenCategories) -> Decision {
    let matched = ranked_matches(grouped, open, false);
    let Some(&best) = matched.first() else {
        return fallback::decide_without_match(grouped, open);
    };

    match best {
        Category::Yacht | Category::LargeStraight | Category::FullHouse => Decision::choose(best),
        Category::SmallStraight => {
            if !open.contains(&Category::LargeStraight) {
                return Decision::choose(best);
            }
            match small_straight_window(grouped) {
                Some(window) => Decision::keep(
                    window
                        .iter()
                        .filter_map(|&face| grouped.first_position(face)),
                ),
                None => Decision::choose(best),
            }
        }
        Category::FourKind => {
            if open.contains(&Category::Yacht) {
                keep_largest_group(grouped)
            } else {
                Decision::choose(best)
            }
        }
        // only upper categories are left, so the largest group has 3+ dice
        _ => keep_largest_group(grouped),
    }
}

pub(crate) fn keep_largest_group(grouped: &GroupedDice) -> Decision {
    match grouped.largest_face() {
        Some(face) => Decision::keep(grouped.positions(face).iter().copied()),
        None => Decision::reroll_all(),
    }
}
