use test_log::test;

use super::ast::{Arena, Tree, TreeId};
use crate::{
    lexer::tokens::TokenClass,
    Location, MK_TOKEN,
};

fn loc(line: usize, column: isize) -> Location {
    Location::new(line, column)
}

/// `validate m { function f { (1, 2) } }`, returning (module, function, group).
fn build_module(arena: &mut Arena) -> (TreeId, TreeId, TreeId) {
    let group = arena.make_list(loc(1, 27));
    let one = arena.make_value("1", loc(1, 28));
    let two = arena.make_value("2", loc(1, 31));
    arena.list_append(group, one);
    arena.list_append(group, two);

    let groups = arena.make_list(loc(1, 25));
    arena.list_append(groups, group);
    let fname = arena.make_value("f", loc(1, 23));
    let function = arena.make_function(fname, groups, loc(1, 14));

    let functions = arena.make_list(loc(1, 12));
    arena.list_append(functions, function);
    let mname = arena.make_value("m", loc(1, 10));
    let module = arena.make_module(mname, functions, loc(1, 1));

    (module, function, group)
}

#[test]
fn test_error_mark_sentinel() {
    let arena = Arena::new();

    assert!(TreeId::ERROR_MARK.is_error());
    assert_eq!(arena.get(TreeId::ERROR_MARK), &Tree::ErrorMark);
    assert_eq!(arena.len(), 1);
    assert!(arena.is_empty());
}

#[test]
fn test_arity() {
    let mut arena = Arena::new();
    let (module, function, group) = build_module(&mut arena);

    assert_eq!(arena.get(module).arity(), 2);
    assert_eq!(arena.get(function).arity(), 2);
    assert_eq!(arena.get(group).arity(), 0);
    assert_eq!(Tree::ErrorMark.arity(), 0);
    assert_eq!(Tree::EmptyMark.arity(), 0);
}

#[test]
fn test_build_and_read_back() {
    let mut arena = Arena::new();
    let (module, function, group) = build_module(&mut arena);

    assert_eq!(arena.name_of(module), "m");
    assert_eq!(arena.name_of(function), "f");
    assert_eq!(arena.body_of(module), &[function]);
    assert_eq!(arena.body_of(function), &[group]);

    let values: Vec<&str> = arena
        .children(group)
        .iter()
        .map(|id| arena.value(*id))
        .collect();
    assert_eq!(values, vec!["1", "2"]);

    assert_eq!(arena.location(module), loc(1, 1));
    assert_eq!(arena.location(function), loc(1, 14));
    assert!(!arena.is_empty());
}

#[test]
fn test_value_from_token() {
    let mut arena = Arena::new();
    let token = MK_TOKEN!(TokenClass::HexLiteral, "0x1F", loc(4, 9));

    let id = arena.make_value_token(token);

    assert_eq!(arena.value(id), "0x1F");
    assert_eq!(arena.location(id), loc(4, 9));
    assert_eq!(arena.get(id).to_string(), "value `0x1F`");
}

#[test]
fn test_free_tree_tombstones_everything() {
    let mut arena = Arena::new();
    let (module, function, group) = build_module(&mut arena);
    let nodes = arena.len() - 1;

    arena.free_tree(module);

    assert!(arena.is_reclaimed(module));
    assert!(arena.is_reclaimed(function));
    assert!(arena.is_reclaimed(group));
    assert_eq!(arena.reclaimed().len(), nodes);
    assert_eq!(arena.reclaimed().last(), Some(&module));
    assert_eq!(arena.get(TreeId::ERROR_MARK), &Tree::ErrorMark);
}

#[test]
fn test_free_tree_shared_child_once() {
    let mut arena = Arena::new();
    let shared = arena.make_value("42", loc(1, 1));

    let first = arena.make_list(loc(1, 1));
    let second = arena.make_list(loc(1, 1));
    arena.list_append(first, shared);
    arena.list_append(second, shared);
    let outer = arena.make_list(loc(1, 1));
    arena.list_append(outer, first);
    arena.list_append(outer, second);

    arena.free_tree(outer);

    let reclaimed = arena.reclaimed();
    assert_eq!(reclaimed.len(), 4);
    assert_eq!(reclaimed.iter().filter(|id| **id == shared).count(), 1);
}

#[test]
fn test_free_tree_ignores_sentinel_and_repeats() {
    let mut arena = Arena::new();
    let value = arena.make_value("x", loc(1, 1));

    arena.free_tree(TreeId::ERROR_MARK);
    assert!(arena.reclaimed().is_empty());

    arena.free_tree(value);
    arena.free_tree(value);
    assert_eq!(arena.reclaimed(), &[value]);
}

#[test]
fn test_list_may_hold_error_mark() {
    let mut arena = Arena::new();
    let list = arena.make_list(loc(1, 1));
    arena.list_append(list, TreeId::ERROR_MARK);

    arena.free_tree(list);

    assert_eq!(arena.reclaimed(), &[list]);
    assert_eq!(arena.get(TreeId::ERROR_MARK), &Tree::ErrorMark);
}

#[test]
#[should_panic(expected = "appending to a `value` node")]
fn test_append_to_non_list_panics() {
    let mut arena = Arena::new();
    let value = arena.make_value("x", loc(1, 1));
    let other = arena.make_value("y", loc(1, 1));

    arena.list_append(value, other);
}

#[test]
fn test_tree_id_debug() {
    let mut arena = Arena::new();
    let id = arena.make_value("x", loc(1, 1));

    assert_eq!(format!("{:?}", TreeId::ERROR_MARK), "TreeId(ERROR_MARK)");
    assert_eq!(format!("{:?}", id), "TreeId(1)");
}
