// Property-based tests for the key/ref codec round-trip invariants.

use copydesk::keys::{KeyCodec, RefSuffix};
use proptest::prelude::*;

// Collection names carry no '/', so the first-slash split is unambiguous.
fn collection_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{1,24}"
}

// Slugs may contain further slashes (nested folder collections).
fn slug_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9/_-]{0,40}"
}

fn base_path_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("/".to_string()),
        "/[a-z0-9]{1,8}",
        "/[a-z0-9]{1,8}/[a-z0-9]{1,8}",
    ]
}

proptest! {
    #[test]
    fn content_key_roundtrips(
        collection in collection_strategy(),
        slug in slug_strategy(),
        base_path in base_path_strategy(),
    ) {
        let codec = KeyCodec::with_defaults(RefSuffix::from_base_path(&base_path));
        let key = codec.generate_content_key(&collection, &slug);
        let parsed = codec.parse_content_key(&key).unwrap();
        prop_assert_eq!(parsed.collection, collection);
        prop_assert_eq!(parsed.slug, slug);
    }

    #[test]
    fn branch_roundtrips(
        collection in collection_strategy(),
        slug in slug_strategy(),
        base_path in base_path_strategy(),
    ) {
        let codec = KeyCodec::with_defaults(RefSuffix::from_base_path(&base_path));
        let key = codec.generate_content_key(&collection, &slug);
        let branch = codec.branch_from_content_key(&key);
        prop_assert!(codec.is_cms_branch(&branch));
        prop_assert_eq!(codec.content_key_from_branch(&branch).unwrap(), key);
    }

    #[test]
    fn labels_agree_for_any_status_and_prefix(
        status in "[A-Z_]{1,20}",
        prefix in prop_oneof![Just(String::new()), "[a-z-]{1,12}/"],
    ) {
        let codec = KeyCodec::new(RefSuffix::root(), prefix);
        let label = codec.status_to_label(&status);
        prop_assert!(codec.is_cms_label(&label));
        prop_assert_eq!(codec.label_to_status(&label).unwrap(), status);
    }

    #[test]
    fn generated_keys_carry_the_deployment_suffix(
        collection in collection_strategy(),
        slug in slug_strategy(),
        base_path in base_path_strategy(),
    ) {
        let codec = KeyCodec::with_defaults(RefSuffix::from_base_path(&base_path));
        let key = codec.generate_content_key(&collection, &slug);
        prop_assert!(codec.has_ref_suffix(&key));
    }
}
