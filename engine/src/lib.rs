pub mod api;
pub mod category;
pub mod decide;
pub mod dice;
pub mod error;
pub mod fallback;
pub mod play;
pub mod straight;

pub use category::{Category, OpenCategories, ParseCategoryError};
pub use decide::{decide, decide_final, decide_reroll, Decision, Trial};
pub use dice::{Dice, GroupedDice, Roll, RollError};
pub use error::DecisionError;
