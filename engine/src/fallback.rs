//! Keep heuristic for a reroll where no open category is satisfied yet.
//!
//! Branches on how many distinct faces are showing. Straights are chased by
//! [`extend_for_straight`]; everything else holds one face group, preferring
//! a face whose upper category is still open.

use crate::category::{Category, OpenCategories};
use crate::decide::Decision;
use crate::dice::GroupedDice;
use crate::straight::extend_for_straight;

/// Run length up to which a large-straight chase takes skip-two dice.
const LARGE_STRAIGHT_THRESHOLD: usize = 3;
/// Run length up to which a small-straight chase takes skip-two dice.
const SMALL_STRAIGHT_THRESHOLD: usize = 2;
/// Face from which a die counts as high when only choice is left.
const HIGH_FACE: u8 = 4;

pub fn decide_without_match(grouped: &GroupedDice, open: &OpenCategories) -> Decision {
    if open.len() == 1 && open.contains(&Category::Choice) {
        return keep_high_dice(grouped);
    }

    match grouped.distinct() {
        5 => five_distinct(grouped, open),
        4 => four_distinct(grouped, open),
        3 => three_distinct(grouped, open),
        2 => two_distinct(grouped, open),
        _ => Decision::reroll_all(),
    }
}

fn five_distinct(grouped: &GroupedDice, open: &OpenCategories) -> Decision {
    if let Some(decision) = chase_straight(grouped, open) {
        return decision;
    }
    // every group has one die, so take the highest face worth something
    let target = grouped
        .faces()
        .filter(|&f| upper_open(open, f))
        .last()
        .or_else(|| grouped.highest_face());
    keep_face(grouped, target)
}

fn four_distinct(grouped: &GroupedDice, open: &OpenCategories) -> Decision {
    if let Some(decision) = chase_straight(grouped, open) {
        return decision;
    }
    if open_any(open, &[Category::Yacht, Category::FourKind, Category::FullHouse]) {
        let pair = grouped.largest_face().filter(|&f| upper_open(open, f));
        return keep_face(grouped, pair.or_else(|| grouped.highest_face()));
    }
    keep_face(grouped, best_open_upper(grouped, open))
}

fn three_distinct(grouped: &GroupedDice, open: &OpenCategories) -> Decision {
    let largest = grouped.largest_faces();
    if open.contains(&Category::FullHouse) {
        return Decision::keep(
            largest
                .iter()
                .flat_map(|&f| grouped.positions(f).iter().copied()),
        );
    }
    if let Some(decision) = chase_straight(grouped, open) {
        return decision;
    }
    // a single largest group means 3-1-1, two of them means 2-2-1
    if largest.len() == 1 && open_any(open, &[Category::Yacht, Category::FourKind]) {
        return keep_face(grouped, largest.first().copied());
    }
    keep_face(grouped, best_open_upper(grouped, open))
}

fn two_distinct(grouped: &GroupedDice, open: &OpenCategories) -> Decision {
    let larger = grouped.largest_face();
    if open_any(open, &[Category::Yacht, Category::FourKind]) {
        return keep_face(grouped, larger);
    }
    if open.contains(&Category::FullHouse) {
        let positions = larger.map(|f| grouped.positions(f)).unwrap_or(&[]);
        return Decision::keep(positions.iter().take(3).copied());
    }
    if open.contains(&Category::SmallStraight) {
        return Decision::keep(extend_for_straight(grouped, SMALL_STRAIGHT_THRESHOLD));
    }
    if open.contains(&Category::LargeStraight) {
        return Decision::keep(extend_for_straight(grouped, LARGE_STRAIGHT_THRESHOLD));
    }
    let minority = grouped.faces().find(|&f| Some(f) != larger);
    keep_face(grouped, minority.filter(|&f| upper_open(open, f)))
}

fn chase_straight(grouped: &GroupedDice, open: &OpenCategories) -> Option<Decision> {
    let threshold = if open.contains(&Category::LargeStraight) {
        LARGE_STRAIGHT_THRESHOLD
    } else if open.contains(&Category::SmallStraight) {
        SMALL_STRAIGHT_THRESHOLD
    } else {
        return None;
    };
    Some(Decision::keep(extend_for_straight(grouped, threshold)))
}

fn keep_high_dice(grouped: &GroupedDice) -> Decision {
    Decision::keep(
        grouped
            .iter()
            .filter(|(f, _)| *f >= HIGH_FACE)
            .flat_map(|(_, p)| p.iter().copied()),
    )
}

/// Present face with an open upper category: biggest group first, then the
/// lower face.
fn best_open_upper(grouped: &GroupedDice, open: &OpenCategories) -> Option<u8> {
    grouped
        .faces()
        .filter(|&f| upper_open(open, f))
        .max_by(|&a, &b| grouped.count(a).cmp(&grouped.count(b)).then(b.cmp(&a)))
}

fn keep_face(grouped: &GroupedDice, face: Option<u8>) -> Decision {
    match face {
        Some(f) => Decision::keep(grouped.positions(f).iter().copied()),
        None => Decision::reroll_all(),
    }
}

fn upper_open(open: &OpenCategories, face: u8) -> bool {
    Category::upper(face).is_some_and(|c| open.contains(&c))
}

fn open_any(open: &OpenCategories, categories: &[Category]) -> bool {
    categories.iter().any(|c| open.contains(c))
}
