use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dice::GroupedDice;

/// Scoreboard categories, in scoreboard order.
///
/// The derived `Ord` follows declaration order and is the tie-break used by
/// every priority table in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Aces,
    Deuces,
    Threes,
    Fours,
    Fives,
    Sixes,
    FourKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Yacht,
    Choice,
}

/// A player's still-available categories, ordered by `Category`.
pub type OpenCategories = BTreeSet<Category>;

static SMALL_STRAIGHTS: [[u8; 4]; 3] = [[1, 2, 3, 4], [2, 3, 4, 5], [3, 4, 5, 6]];
static LARGE_STRAIGHTS: [[u8; 5]; 2] = [[1, 2, 3, 4, 5], [2, 3, 4, 5, 6]];

/// Sum above which aces and choice stop being the cheapest sacrifice.
const DISCARD_SUM_THRESHOLD: u32 = 17;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}'")]
pub struct ParseCategoryError(pub String);

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Aces,
        Category::Deuces,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::FourKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yacht,
        Category::Choice,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Aces => "aces",
            Category::Deuces => "deuces",
            Category::Threes => "threes",
            Category::Fours => "fours",
            Category::Fives => "fives",
            Category::Sixes => "sixes",
            Category::FourKind => "fourKind",
            Category::FullHouse => "fullHouse",
            Category::SmallStraight => "smallStraight",
            Category::LargeStraight => "largeStraight",
            Category::Yacht => "yacht",
            Category::Choice => "choice",
        }
    }

    /// Upper-section category scoring `face`.
    pub fn upper(face: u8) -> Option<Category> {
        match face {
            1 => Some(Category::Aces),
            2 => Some(Category::Deuces),
            3 => Some(Category::Threes),
            4 => Some(Category::Fours),
            5 => Some(Category::Fives),
            6 => Some(Category::Sixes),
            _ => None,
        }
    }

    /// Face scored by an upper-section category.
    pub fn upper_face(self) -> Option<u8> {
        match self {
            Category::Aces => Some(1),
            Category::Deuces => Some(2),
            Category::Threes => Some(3),
            Category::Fours => Some(4),
            Category::Fives => Some(5),
            Category::Sixes => Some(6),
            _ => None,
        }
    }

    pub fn is_upper(self) -> bool {
        self.upper_face().is_some()
    }

    pub fn is_matched(self, grouped: &GroupedDice) -> bool {
        match self {
            Category::FourKind => grouped.max_count() >= 4,
            Category::FullHouse => {
                Category::Yacht.is_matched(grouped)
                    || (grouped.distinct() == 2 && grouped.iter().all(|(_, p)| p.len() >= 2))
            }
            Category::SmallStraight => SMALL_STRAIGHTS.iter().any(|w| grouped.contains_all(w)),
            Category::LargeStraight => LARGE_STRAIGHTS.iter().any(|w| grouped.contains_all(w)),
            Category::Yacht => grouped.distinct() == 1,
            Category::Choice => true,
            upper => upper
                .upper_face()
                .is_some_and(|face| grouped.count(face) >= 3),
        }
    }

    /// Lower goes first when several categories match.
    pub fn choice_priority(self) -> u8 {
        match self {
            Category::LargeStraight | Category::Yacht => 0,
            Category::FullHouse => 1,
            Category::SmallStraight => 2,
            Category::FourKind => 3,
            Category::Choice => 5,
            _ => 4,
        }
    }

    /// Lower is sacrificed first when nothing matches on the final roll.
    pub fn discard_priority(self, grouped: &GroupedDice) -> u8 {
        let high_sum = grouped.sum() > DISCARD_SUM_THRESHOLD;
        match self {
            Category::Aces | Category::Choice => u8::from(high_sum),
            Category::Deuces => 2,
            Category::Yacht => 3,
            _ => 4,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Small-straight window used on a reroll: the lowest one fully present.
pub fn small_straight_window(grouped: &GroupedDice) -> Option<&'static [u8; 4]> {
    SMALL_STRAIGHTS.iter().find(|w| grouped.contains_all(&w[..]))
}
