use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::category::{Category, OpenCategories};
use crate::decide::{decide, Decision, Trial};
use crate::dice::Roll;
use crate::error::DecisionError;

/// Player → category → score; `None` marks a category still open.
pub type ScoreBoard = IndexMap<String, IndexMap<Category, Option<i32>>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub state: State,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub turn: i32,
    pub trial: i32,
    pub player: String,
    pub dices: Vec<u8>,
    pub score_board: ScoreBoard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub decision: Decision,
}

impl State {
    /// Categories the current player has not scored yet.
    pub fn open_categories(&self) -> Result<OpenCategories, DecisionError> {
        let scores = self
            .score_board
            .get(&self.player)
            .ok_or_else(|| DecisionError::UnknownPlayer(self.player.clone()))?;
        let open: OpenCategories = scores
            .iter()
            .filter(|(_, score)| score.is_none())
            .map(|(category, _)| *category)
            .collect();
        if open.is_empty() {
            return Err(DecisionError::NoOpenCategory(self.player.clone()));
        }
        Ok(open)
    }
}

pub fn decide_request(request: &Request) -> Result<Response, DecisionError> {
    let state = &request.state;
    let open = state.open_categories()?;
    let trial = Trial::try_from(state.trial)?;
    let roll = Roll::try_from(state.dices.as_slice())?;

    let decision = decide(&roll, trial, &open);
    debug!(
        turn = state.turn,
        trial = trial.number(),
        player = %state.player,
        dice = %roll,
        open = open.len(),
        keep = ?decision.keep,
        choice = ?decision.choice,
        "decided"
    );
    Ok(Response { decision })
}

/// Text entry point: request JSON in, response JSON out.
pub fn decide_json(text: &str) -> Result<String> {
    let request: Request =
        serde_json::from_str(text).context("failed to parse decision request JSON")?;
    let response = decide_request(&request)?;
    serde_json::to_string(&response).context("failed to encode decision response")
}
