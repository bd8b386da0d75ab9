use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DICE_COUNT: usize = 5;
pub const FACES: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RollError {
    #[error("a roll has exactly 5 dice, got {0}")]
    WrongLength(usize),
    #[error("die {position} shows {face}, faces are 1..=6")]
    FaceOutOfRange { position: usize, face: u8 },
}

/// Five dice; the index of a die is its identity for keep decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Roll([u8; DICE_COUNT]);

impl Roll {
    pub fn new(faces: [u8; DICE_COUNT]) -> Result<Self, RollError> {
        for (position, &face) in faces.iter().enumerate() {
            if !(1..=FACES).contains(&face) {
                return Err(RollError::FaceOutOfRange { position, face });
            }
        }
        Ok(Self(faces))
    }

    pub fn faces(&self) -> [u8; DICE_COUNT] {
        self.0
    }

    pub fn face(&self, position: usize) -> Option<u8> {
        self.0.get(position).copied()
    }

    pub fn grouped(&self) -> GroupedDice {
        GroupedDice::from_roll(self)
    }
}

impl TryFrom<&[u8]> for Roll {
    type Error = RollError;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        let faces: [u8; DICE_COUNT] = src
            .try_into()
            .map_err(|_| RollError::WrongLength(src.len()))?;
        Self::new(faces)
    }
}

impl TryFrom<Vec<u8>> for Roll {
    type Error = RollError;

    fn try_from(src: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(src.as_slice())
    }
}

impl From<Roll> for Vec<u8> {
    fn from(roll: Roll) -> Self {
        roll.0.to_vec()
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Positions of a roll bucketed by face value.
///
/// Buckets are indexed by `face - 1`, so every iteration below runs in
/// ascending face order. Positions inside a bucket keep roll order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupedDice {
    groups: [Vec<usize>; FACES as usize],
}

impl GroupedDice {
    pub fn from_roll(roll: &Roll) -> Self {
        let mut grouped = Self::default();
        for (position, face) in roll.0.iter().enumerate() {
            grouped.groups[(*face - 1) as usize].push(position);
        }
        grouped
    }

    /// Positions showing `face`; empty for absent or out-of-range faces.
    pub fn positions(&self, face: u8) -> &[usize] {
        match face {
            1..=FACES => &self.groups[(face - 1) as usize],
            _ => &[],
        }
    }

    pub fn count(&self, face: u8) -> usize {
        self.positions(face).len()
    }

    pub fn contains(&self, face: u8) -> bool {
        self.count(face) > 0
    }

    /// First position (in roll order) showing `face`.
    pub fn first_position(&self, face: u8) -> Option<usize> {
        self.positions(face).first().copied()
    }

    pub fn contains_all(&self, faces: &[u8]) -> bool {
        faces.iter().all(|&f| self.contains(f))
    }

    /// Present faces, ascending.
    pub fn faces(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=FACES).filter(move |&f| self.contains(f))
    }

    /// `(face, positions)` for every present face, ascending.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[usize])> + '_ {
        self.faces().map(move |f| (f, self.positions(f)))
    }

    pub fn distinct(&self) -> usize {
        self.faces().count()
    }

    pub fn max_count(&self) -> usize {
        self.groups.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Faces whose group has the maximal size, ascending.
    pub fn largest_faces(&self) -> Vec<u8> {
        let max = self.max_count();
        self.faces().filter(|&f| self.count(f) == max).collect()
    }

    /// The largest group's face; the smaller face wins a tie.
    pub fn largest_face(&self) -> Option<u8> {
        self.largest_faces().first().copied()
    }

    pub fn highest_face(&self) -> Option<u8> {
        self.faces().last()
    }

    pub fn sum(&self) -> u32 {
        self.iter().map(|(f, p)| f as u32 * p.len() as u32).sum()
    }
}

/// Seeded d6 roller.
pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn d6(&mut self) -> u8 {
        self.rng.gen_range(1..=FACES)
    }

    pub fn roll(&mut self) -> Roll {
        let mut faces = [0u8; DICE_COUNT];
        for face in faces.iter_mut() {
            *face = self.d6();
        }
        Roll(faces)
    }

    /// Keep the listed positions and reroll every other die.
    pub fn reroll(&mut self, current: &Roll, keep: &[usize]) -> Roll {
        let mut faces = current.0;
        for (position, face) in faces.iter_mut().enumerate() {
            if !keep.contains(&position) {
                *face = self.d6();
            }
        }
        Roll(faces)
    }
}
