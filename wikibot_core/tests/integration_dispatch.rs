//! Integration tests for query routing.
//!
//! These tests verify that:
//! - Rules are tried in declaration order and the first match wins
//! - Substitutions reach the action in pattern order
//! - The `bye` rule ends the session instead of producing answers
//! - Sentinel replies are distinct for "no rule" and "no answers"

use std::sync::{Arc, Mutex};

use wikibot_core::{
    ActionError, ActionOutcome, Dispatcher, FnAction, NO_ANSWERS, NOT_UNDERSTOOD, RuleTable,
    Terminate, match_words, tokenize_query,
};

type Calls = Arc<Mutex<Vec<(String, Vec<String>)>>>;

fn recording(
    name: &'static str,
    calls: Calls,
    reply: Vec<String>,
) -> FnAction<impl Fn(Vec<String>) -> Result<ActionOutcome, ActionError>> {
    FnAction::new(name, move |captures| {
        if let Ok(mut calls) = calls.lock() {
            calls.push((name.to_string(), captures));
        }
        Ok(ActionOutcome::Values(reply.clone()))
    })
}

fn bot(calls: &Calls) -> Dispatcher {
    let Ok(table) = RuleTable::builder()
        .rule("when was % born", recording("birth date", Arc::clone(calls), vec!["1815-12-10".to_string()]))
        .rule("what is the polar radius of %", recording("polar radius", Arc::clone(calls), vec!["6356.752".to_string()]))
        .rule("when was % founded", recording("date founded", Arc::clone(calls), vec!["September 4, 1998".to_string()]))
        .rule("when did % die", recording("death date", Arc::clone(calls), Vec::new()))
        .rule("when was % added to the us", recording("admission", Arc::clone(calls), vec!["March 1, 1803".to_string()]))
        .rule("bye", Terminate)
        .build()
    else {
        panic!("default table should build");
    };
    Dispatcher::new(table)
}

fn calls_of(calls: &Calls) -> Vec<(String, Vec<String>)> {
    calls.lock().map(|c| c.clone()).unwrap_or_default()
}

#[tokio::test]
async fn test_routes_to_matching_rule() {
    let calls = Calls::default();
    let dispatcher = bot(&calls);

    let outcome = dispatcher
        .dispatch(&tokenize_query("What is the polar radius of Mars?"))
        .await;

    assert!(matches!(outcome, Ok(ActionOutcome::Values(ref v)) if v == &["6356.752"]));
    assert_eq!(
        calls_of(&calls),
        vec![("polar radius".to_string(), vec!["mars".to_string()])]
    );
}

#[tokio::test]
async fn test_earlier_rule_shadows_later_one() {
    let calls = Calls::default();
    let dispatcher = bot(&calls);

    // "when was % born" is tried first and must not fire.
    let outcome = dispatcher
        .dispatch(&tokenize_query("when was google founded"))
        .await;

    assert!(matches!(outcome, Ok(ActionOutcome::Values(ref v)) if v == &["September 4, 1998"]));
    let names: Vec<String> = calls_of(&calls).into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["date founded"]);
}

#[tokio::test]
async fn test_first_of_two_matching_rules_runs() {
    let calls = Calls::default();
    let Ok(table) = RuleTable::builder()
        .rule("when was % added to the us", recording("admission", Arc::clone(&calls), vec!["a".to_string()]))
        .rule("when was % us", recording("generic", Arc::clone(&calls), vec!["b".to_string()]))
        .build()
    else {
        panic!("table should build");
    };
    let dispatcher = Dispatcher::new(table);

    let outcome = dispatcher
        .dispatch(&tokenize_query("when was ohio added to the us"))
        .await;

    assert!(matches!(outcome, Ok(ActionOutcome::Values(ref v)) if v == &["a"]));
    assert_eq!(calls_of(&calls).len(), 1);
}

#[tokio::test]
async fn test_bye_terminates() {
    let calls = Calls::default();
    let dispatcher = bot(&calls);

    let outcome = dispatcher.dispatch(&tokenize_query("bye")).await;

    assert!(matches!(outcome, Ok(ActionOutcome::Terminate)));
    assert!(calls_of(&calls).is_empty());
}

#[tokio::test]
async fn test_sentinels_are_distinct() {
    let calls = Calls::default();
    let dispatcher = bot(&calls);

    let no_answers = dispatcher
        .dispatch(&tokenize_query("when did whitney houston die"))
        .await;
    let not_understood = dispatcher
        .dispatch(&tokenize_query("who directed jaws"))
        .await;

    assert!(matches!(no_answers, Ok(ActionOutcome::Values(ref v)) if v == &[NO_ANSWERS]));
    assert!(matches!(not_understood, Ok(ActionOutcome::Values(ref v)) if v == &[NOT_UNDERSTOOD]));
    assert_ne!(NO_ANSWERS, NOT_UNDERSTOOD);
}

fn some(items: &[&str]) -> Option<Vec<String>> {
    Some(items.iter().map(ToString::to_string).collect())
}

#[test]
fn test_string_boundary_scenarios() {
    assert_eq!(match_words(&["x", "y", "z"], &["x", "y", "z"]), Ok(some(&[])));
    assert_eq!(match_words(&["x", "_", "z"], &["x", "y", "z"]), Ok(some(&["y"])));
    assert_eq!(match_words(&["x", "%", "z"], &["x", "y", "z"]), Ok(some(&["y"])));
    assert_eq!(match_words(&["_", "%"], &["x", "y", "z"]), Ok(some(&["x", "y z"])));
    // First-anchor search: `%` stops at the first `z`, leaving one `z` unmatched.
    assert_eq!(match_words(&["x", "%", "z"], &["x", "y", "z", "z"]), Ok(None));
    assert_eq!(match_words(&["x", "%", "z"], &["x", "y", "z", "z", "z"]), Ok(None));
}
