use crate::dice::GroupedDice;

/// Longest run of consecutive faces present in the roll.
///
/// On a tie the lowest run wins.
pub fn longest_run(grouped: &GroupedDice) -> Vec<u8> {
    let mut best: Vec<u8> = Vec::new();
    let mut current: Vec<u8> = Vec::new();
    for face in grouped.faces() {
        if current.last().is_some_and(|&last| last + 1 != face) {
            if current.len() > best.len() {
                best = std::mem::take(&mut current);
            } else {
                current.clear();
            }
        }
        current.push(face);
    }
    if current.len() > best.len() {
        best = current;
    }
    best
}

/// Keep toward a straight.
///
/// A run no longer than `threshold` picks up the face two below its start
/// and the face two above its end when those are showing, leaving a single
/// gap to fill. One die per face of the run is kept.
pub fn extend_for_straight(grouped: &GroupedDice, threshold: usize) -> Vec<usize> {
    let mut run = longest_run(grouped);
    if run.len() <= threshold {
        if let Some(&first) = run.first() {
            if first > 2 && grouped.contains(first - 2) {
                run.insert(0, first - 2);
            }
        }
        if let Some(&last) = run.last() {
            if grouped.contains(last + 2) {
                run.push(last + 2);
            }
        }
    }
    run.iter()
        .filter_map(|&face| grouped.first_position(face))
        .collect()
}
