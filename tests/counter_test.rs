//! Tests for the counter synchronizer

use regex::Regex;
use rstest::rstest;

use selectree::application::{
    apply_delta, tree_delta, ApplicationError, CounterSynchronizer, DEFAULT_COUNTER_PATTERN,
};
use selectree::domain::{
    CheckboxHandle, CheckboxMeta, CounterDisplay, Registry, SelectionForest, TreeEvent,
};
use selectree::infrastructure::{MemoryCheckbox, MemoryCounter};
use selectree::util::testing;

fn digits() -> Regex {
    Regex::new(DEFAULT_COUNTER_PATTERN).unwrap()
}

fn forest() -> SelectionForest<MemoryCheckbox> {
    testing::init_test_setup();
    let handles = vec![
        MemoryCheckbox::new(0, CheckboxMeta::toggle_cell(None), false),
        MemoryCheckbox::new(1, CheckboxMeta::item_cell("post", 1, None, None), false),
        MemoryCheckbox::new(2, CheckboxMeta::item_cell("post", 2, None, None), false),
    ];
    SelectionForest::build(&Registry::new(handles)).unwrap()
}

#[test]
fn given_labelled_counter_when_delta_applied_then_only_number_changes() {
    // Arrange
    let counter = MemoryCounter::new("Selected: 3 items", Some(3));

    // Act
    let count = apply_delta(&counter, 2, &digits());

    // Assert
    assert_eq!(count, 5);
    assert_eq!(counter.text(), "Selected: 5 items");
    assert_eq!(counter.stored_total(), Some(5));
}

#[rstest]
#[case("3 of 10 selected", Some(3), -1, "2 of 10 selected")]
#[case("none yet", None, 1, "none yet")]
#[case("0", None, 4, "4")]
#[case("-1 selected", Some(-1), 2, "1 selected")]
#[case("1 selected", Some(1), -2, "-1 selected")]
fn given_counter_text_when_delta_applied_then_first_number_is_rewritten(
    #[case] text: &str,
    #[case] stored: Option<i64>,
    #[case] delta: i64,
    #[case] expected: &str,
) {
    let counter = MemoryCounter::new(text, stored);

    apply_delta(&counter, delta, &digits());

    assert_eq!(counter.text(), expected);
    assert_eq!(counter.stored_total(), Some(stored.unwrap_or(0) + delta));
}

#[test]
fn given_unchanged_selection_when_delta_computed_then_zero() {
    let mut forest = forest();
    let root = forest.roots()[0];

    assert_eq!(tree_delta(&mut forest, root).unwrap(), 0);

    forest.on_change(root, true).unwrap();
    assert_eq!(tree_delta(&mut forest, root).unwrap(), 2);
    assert_eq!(tree_delta(&mut forest, root).unwrap(), 0);
}

#[test]
fn given_attached_counters_when_change_without_delta_then_stored_value_unchanged() {
    // Arrange
    let mut forest = forest();
    let root = forest.roots()[0];
    let counter = MemoryCounter::new("Selected: 7", Some(7));
    let sync = CounterSynchronizer::new(vec![counter.clone()], DEFAULT_COUNTER_PATTERN).unwrap();
    sync.attach(&mut forest).unwrap();

    // Act
    forest.fire_event(root, &TreeEvent::Change, root).unwrap();

    // Assert
    assert_eq!(counter.stored_total(), Some(7));
    assert_eq!(counter.text(), "Selected: 7");
}

#[test]
fn given_several_counters_when_tree_changes_then_every_counter_moves_by_delta() {
    // Arrange
    let mut forest = forest();
    let root = forest.roots()[0];
    let first = MemoryCounter::new("Selected: 0 items", Some(0));
    let second = MemoryCounter::new("(0)", None);
    let sync =
        CounterSynchronizer::new(vec![first.clone(), second.clone()], DEFAULT_COUNTER_PATTERN)
            .unwrap();
    sync.attach(&mut forest).unwrap();

    // Act
    forest.on_change(root, true).unwrap();

    // Assert
    assert_eq!(first.text(), "Selected: 2 items");
    assert_eq!(second.text(), "(2)");
    assert_eq!(second.stored_total(), Some(2));

    // Act: uncheck one row
    let row = forest.node(root).unwrap().children()[0];
    forest.on_change(row, false).unwrap();

    // Assert
    assert_eq!(first.stored_total(), Some(1));
    assert_eq!(second.text(), "(1)");
}

#[test]
fn given_no_counters_when_attaching_then_no_listeners_registered() {
    let mut forest = forest();
    let sync = CounterSynchronizer::<MemoryCounter>::new(vec![], DEFAULT_COUNTER_PATTERN).unwrap();

    sync.attach(&mut forest).unwrap();

    let root = forest.roots()[0];
    assert_eq!(forest.listener_count(root).unwrap(), 0);
}

#[test]
fn given_invalid_pattern_when_creating_then_counter_pattern_error() {
    let result = CounterSynchronizer::new(vec![MemoryCounter::new("0", None)], "(");

    assert!(matches!(
        result,
        Err(ApplicationError::CounterPattern { ref pattern, .. }) if pattern == "("
    ));
}

#[test]
fn given_prechecked_rows_when_first_change_fires_then_unseeded_counter_picks_them_up() {
    // Arrange: one row already checked, counter rendered without a stored total
    let mut forest = forest();
    let root = forest.roots()[0];
    let rows = forest.node(root).unwrap().children().to_vec();
    forest.node(rows[0]).unwrap().handle().set_checked(true);
    let counter = MemoryCounter::new("Selected: 0", None);
    let sync = CounterSynchronizer::new(vec![counter.clone()], DEFAULT_COUNTER_PATTERN).unwrap();

    // Act
    sync.attach(&mut forest).unwrap();
    forest.on_change(rows[1], true).unwrap();

    // Assert
    assert_eq!(forest.total(root).unwrap(), 2);
    assert_eq!(counter.text(), "Selected: 2");
    assert_eq!(counter.stored_total(), Some(2));
}
