use proptest::prelude::*;
use serde_json::{Value, json};
use widget_template::domain::audit::changed_properties;
use widget_template::domain::pagination::{Page, Pageable};

const PROPS: &[&str] = &["name", "code"];

fn arb_state() -> impl Strategy<Value = Value> {
    (
        "[a-z]{0,6}",
        prop::option::of("[A-Z0-9]{1,4}"),
    )
        .prop_map(|(name, code)| json!({"name": name, "code": code}))
}

proptest! {
    /// Every element lands on exactly one page, in order.
    #[test]
    fn pages_partition_the_list(len in 0usize..200, size in 1u32..50) {
        let all: Vec<usize> = (0..len).collect();
        let first = Page::from_list(all.clone(), &Pageable::new(0, size).unwrap());

        let mut seen = Vec::new();
        for number in 0..first.total_pages.max(1) as u32 {
            let page = Page::from_list(all.clone(), &Pageable::new(number, size).unwrap());
            prop_assert!(page.content.len() <= size as usize);
            seen.extend(page.content);
        }
        prop_assert_eq!(seen, all);
    }

    /// `last` is set exactly on the final page (or on any page past the end).
    #[test]
    fn last_flag_matches_total_pages(total in 0u64..10_000, size in 1u32..500, number in 0u32..100) {
        let page: Page<()> = Page::new(Vec::new(), &Pageable::new(number, size).unwrap(), total);
        prop_assert_eq!(page.total_pages, total.div_ceil(u64::from(size)));
        prop_assert_eq!(page.last, u64::from(number) + 1 >= page.total_pages);
        prop_assert_eq!(page.first, number == 0);
    }

    /// A state never differs from itself.
    #[test]
    fn identical_states_have_no_changes(state in arb_state()) {
        prop_assert!(changed_properties(PROPS, &state, &state).is_empty());
    }

    /// Diffing is symmetric and reports exactly the properties that differ.
    #[test]
    fn changed_properties_are_exact(old in arb_state(), new in arb_state()) {
        let forward = changed_properties(PROPS, &old, &new);
        let backward = changed_properties(PROPS, &new, &old);
        prop_assert_eq!(&forward, &backward);

        for property in PROPS {
            let differs = old[*property] != new[*property];
            prop_assert_eq!(forward.iter().any(|p| p == property), differs);
        }
    }
}
