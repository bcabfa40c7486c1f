//! Unit tests for bundle lookups, key sets and fallback chains.

use super::*;
use crate::locale;
use rstest::{fixture, rstest};
use std::thread;

fn flat(entries: &[(&str, MessageValue)]) -> FlatMessages {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_owned(), value.clone()))
        .collect()
}

fn list(items: &[&str]) -> MessageValue {
    MessageValue::Array(items.iter().map(|item| (*item).to_owned()).collect())
}

#[fixture]
fn chain() -> Bundle {
    let root = Bundle::new(
        flat(&[
            ("b", "root b".into()),
            ("only_root", "from root".into()),
            ("shadowed", "root string".into()),
        ]),
        Locale::ROOT,
        Bundle::empty(),
    );
    Bundle::new(
        flat(&[
            ("a", "leaf a".into()),
            ("c", list(&["one", "two"])),
            ("shadowed", list(&["leaf"])),
        ]),
        locale::of("en"),
        root,
    )
}

#[rstest]
fn resolves_own_and_inherited_strings(chain: Bundle) {
    assert_eq!(chain.get("a").as_deref(), Some("leaf a"));
    assert_eq!(chain.get("only_root").as_deref(), Some("from root"));
    assert_eq!(chain.get("nope"), None);
}

#[rstest]
fn wrong_type_access_is_absent(chain: Bundle) {
    assert_eq!(chain.get("c"), None);
    assert_eq!(chain.messages("a"), None);
    assert_eq!(
        chain.messages("c"),
        Some(vec!["one".to_owned(), "two".to_owned()])
    );
}

#[rstest]
fn keys_hold_string_values_only(chain: Bundle) {
    let keys = chain.keys();
    let names: Vec<&str> = keys.iter().map(String::as_str).collect();
    assert_eq!(names, vec!["a", "b", "only_root"]);
}

#[rstest]
fn keys_match_the_documented_example() {
    let parent = Bundle::new(flat(&[("b", "B".into())]), Locale::ROOT, Bundle::empty());
    let bundle = Bundle::new(
        flat(&[("a", "A".into()), ("c", list(&["x"]))]),
        locale::of("en"),
        parent,
    );
    let expected: BTreeSet<String> = ["a", "b"].into_iter().map(String::from).collect();
    assert_eq!(*bundle.keys(), expected);
}

#[rstest]
fn keys_are_computed_once(chain: Bundle) {
    let first = chain.keys();
    let second = chain.keys();
    assert!(Arc::ptr_eq(&first, &second));
}

#[rstest]
fn promotion_does_not_change_results(chain: Bundle) {
    let before = chain.keys();
    assert_eq!(chain.get("b").as_deref(), Some("root b"));
    assert_eq!(chain.get("b").as_deref(), Some("root b"));
    assert!(chain.inner.messages.contains_key("b"), "value promoted");
    assert_eq!(*chain.keys(), *before);
}

#[rstest]
fn formats_arguments_only_when_supplied() {
    let bundle = Bundle::new(
        flat(&[("quote", "It''s {0}".into())]),
        locale::of("en"),
        Bundle::empty(),
    );
    assert_eq!(bundle.get_with_args("quote", &[]).as_deref(), Some("It''s {0}"));
    assert_eq!(
        bundle
            .get_with_args("quote", &[FluentValue::from("late")])
            .as_deref(),
        Some("It's late")
    );
}

#[rstest]
fn empty_bundle_is_inert() {
    let empty = Bundle::empty();
    assert!(empty.is_empty());
    assert_eq!(empty.get("anything"), None);
    assert_eq!(empty.messages("anything"), None);
    assert!(empty.keys().is_empty());
    assert!(empty.parent().ptr_eq(&empty));
    assert!(empty.locale().is_root());
}

#[rstest]
fn chains_terminate_at_empty(chain: Bundle) {
    let mut current = chain;
    let mut depth = 0;
    while !current.is_empty() {
        current = current.parent();
        depth += 1;
    }
    assert_eq!(depth, 2);
}

#[rstest]
fn concurrent_formatting_keeps_arguments_apart() {
    let bundle = Bundle::new(
        flat(&[("greet", "Hello {0}, you have {1} messages".into())]),
        locale::of("en"),
        Bundle::empty(),
    );
    let handles: Vec<_> = ["Ada", "Grace"]
        .into_iter()
        .enumerate()
        .map(|(index, name)| {
            let shared = bundle.clone();
            thread::spawn(move || {
                let count = u32::try_from(index).unwrap_or_default() + 1;
                (0..500)
                    .map(|_| {
                        shared
                            .get_with_args(
                                "greet",
                                &[FluentValue::from(name), FluentValue::from(count)],
                            )
                            .unwrap_or_default()
                    })
                    .all(|text| text == format!("Hello {name}, you have {count} messages"))
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().expect("formatting thread panicked"));
    }
}

#[rstest]
fn concurrent_first_access_converges(chain: Bundle) {
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let shared = chain.clone();
            thread::spawn(move || {
                let value = shared.get("only_root");
                (value, (*shared.keys()).clone())
            })
        })
        .collect();
    for handle in handles {
        let (value, keys) = handle.join().expect("lookup thread panicked");
        assert_eq!(value.as_deref(), Some("from root"));
        assert_eq!(keys, *chain.keys());
    }
}
