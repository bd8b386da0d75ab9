use yacht_engine::api::{decide_json, decide_request, Request, Response};
use yacht_engine::{Category, Decision, DecisionError, RollError};

fn request(trial: i32, dices: &[u8], board: &str) -> Request {
    let text = format!(
        r#"{{"state":{{"turn":4,"trial":{trial},"player":"alice","dices":{dices:?},"scoreBoard":{board}}}}}"#
    );
    serde_json::from_str(&text).expect("request parses")
}

const FRESH: &str = r#"{"alice":{"aces":null,"deuces":null,"threes":null,"fours":null,"fives":null,"sixes":null,"fourKind":null,"fullHouse":null,"smallStraight":null,"largeStraight":null,"yacht":null,"choice":null},"bob":{"yacht":50}}"#;

#[test]
fn yacht_on_first_trial_commits() {
    let res = decide_request(&request(1, &[6, 6, 6, 6, 6], FRESH)).unwrap();
    assert_eq!(res.decision, Decision::choose(Category::Yacht));
}

#[test]
fn full_house_on_final_trial() {
    let res = decide_request(&request(3, &[1, 1, 1, 2, 2], FRESH)).unwrap();
    assert_eq!(res.decision.choice, Some(Category::FullHouse));
}

#[test]
fn scored_categories_are_not_open() {
    let board = r#"{"alice":{"smallStraight":null,"largeStraight":40,"choice":22}}"#;
    let res = decide_request(&request(1, &[1, 2, 3, 4, 6], board)).unwrap();
    assert_eq!(res.decision, Decision::choose(Category::SmallStraight));
}

#[test]
fn forced_category_by_elimination() {
    let board = r#"{"alice":{"fives":null,"aces":3,"yacht":0}}"#;
    let res = decide_request(&request(3, &[2, 2, 3, 4, 6], board)).unwrap();
    assert_eq!(res.decision.choice, Some(Category::Fives));
}

#[test]
fn unknown_player_is_rejected() {
    let board = r#"{"bob":{"yacht":null}}"#;
    let err = decide_request(&request(1, &[1, 2, 3, 4, 5], board)).unwrap_err();
    assert_eq!(err, DecisionError::UnknownPlayer("alice".into()));
    assert!(err.is_client_error());
}

#[test]
fn full_board_is_an_invariant_breach() {
    let board = r#"{"alice":{"yacht":50,"choice":20}}"#;
    let err = decide_request(&request(1, &[1, 2, 3, 4, 5], board)).unwrap_err();
    assert_eq!(err, DecisionError::NoOpenCategory("alice".into()));
    assert!(!err.is_client_error());
}

#[test]
fn bad_trial_and_roll_are_rejected() {
    assert_eq!(
        decide_request(&request(4, &[1, 2, 3, 4, 5], FRESH)).unwrap_err(),
        DecisionError::InvalidTrial(4)
    );
    assert_eq!(
        decide_request(&request(1, &[1, 2, 3, 4], FRESH)).unwrap_err(),
        DecisionError::Roll(RollError::WrongLength(4))
    );
    assert_eq!(
        decide_request(&request(1, &[1, 2, 3, 4, 9], FRESH)).unwrap_err(),
        DecisionError::Roll(RollError::FaceOutOfRange {
            position: 4,
            face: 9
        })
    );
}

#[test]
fn unknown_category_name_fails_to_parse() {
    let text = r#"{"state":{"turn":1,"trial":1,"player":"alice","dices":[1,2,3,4,5],"scoreBoard":{"alice":{"chance":null}}}}"#;
    assert!(serde_json::from_str::<Request>(text).is_err());
    assert!(decide_json(text).is_err());
}

#[test]
fn response_wire_format_for_a_keep() {
    let text = format!(
        r#"{{"state":{{"turn":1,"trial":1,"player":"alice","dices":[1,2,3,4,6],"scoreBoard":{FRESH}}}}}"#
    );
    let out = decide_json(&text).unwrap();
    insta::assert_snapshot!(out, @r#"{"decision":{"keep":[0,1,2,3],"choice":null}}"#);
}

#[test]
fn response_wire_format_for_a_choice() {
    let res = Response {
        decision: Decision::choose(Category::FourKind),
    };
    let out = serde_json::to_string(&res).unwrap();
    insta::assert_snapshot!(out, @r#"{"decision":{"keep":[],"choice":"fourKind"}}"#);
}

#[test]
fn decision_defaults_when_fields_are_missing() {
    let d: Decision = serde_json::from_str("{}").unwrap();
    assert_eq!(d, Decision::reroll_all());
}
