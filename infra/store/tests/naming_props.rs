use cfgsync_store::{ConfigName, Environment};
use proptest::prelude::*;

fn environment() -> impl Strategy<Value = Environment> {
    "[a-z0-9_.-]{1,12}".prop_map(|s| Environment::try_from(s).unwrap())
}

fn config_name() -> impl Strategy<Value = ConfigName> {
    "[A-Za-z0-9_. -]{1,16}"
        .prop_filter("relative directory reference", |s| s != "." && s != "..")
        .prop_filter("reserved prefix", |s| !s.starts_with(".cfgsynctmp."))
        .prop_map(|s| ConfigName::try_from(s).unwrap())
}

proptest! {
    #[test]
    fn keys_are_injective(e1 in environment(), n1 in config_name(), e2 in environment(), n2 in config_name()) {
        let same_pair = e1 == e2 && n1 == n2;
        prop_assert_eq!(e1.key(&n1) == e2.key(&n2), same_pair);
    }

    #[test]
    fn prefixes_never_leak_across_environments(e1 in environment(), e2 in environment(), n in config_name()) {
        prop_assert_eq!(e2.key(&n).starts_with(&e1.prefix()), e1 == e2);
    }

    #[test]
    fn stripped_key_is_the_name(e in environment(), n in config_name()) {
        let key = e.key(&n);
        prop_assert_eq!(key.strip_prefix(&e.prefix()), Some(n.as_str()));
    }

    #[test]
    fn arbitrary_names_never_contain_separators_once_accepted(raw in "\\PC{0,24}") {
        if let Ok(name) = ConfigName::try_from(raw.as_str()) {
            prop_assert!(!name.as_str().contains('/'));
            prop_assert!(!name.as_str().contains('\\'));
            prop_assert!(name.as_str() != "..");
        }
    }
}
