//! Property tests for the override allowlist boundary.

use proptest::prelude::*;

use game_bench::core::AttrValue;
use game_bench::env::{Environment, WordChainsEnv};
use game_bench::overrides::{apply_overrides, value_digest, OverrideDecl, Transform};

fn fresh_env(words: Vec<String>) -> WordChainsEnv {
    let mut env = WordChainsEnv::standard(0, 2).unwrap();
    env.set_attr("word_list", AttrValue::TextList(words)).unwrap();
    env
}

fn snapshot(env: &WordChainsEnv) -> Vec<(String, AttrValue)> {
    env.spec().into_iter().collect()
}

proptest! {
    /// Any transform name outside the allowlist is rejected with
    /// `UnknownTransform`, and the environment is left byte-for-byte
    /// untouched — even when valid declarations precede the bad one.
    #[test]
    fn unknown_transform_never_mutates(name in "[a-z_./-]{1,20}", words in word_list_strategy()) {
        prop_assume!(Transform::from_name(&name).is_none());

        let mut env = fresh_env(words);
        let before = snapshot(&env);

        let decls = vec![
            OverrideDecl::new("word_list", "sort"),
            OverrideDecl::new("word_list", name.clone()),
        ];
        let err = apply_overrides(&mut env, &decls, 0).unwrap_err();

        prop_assert!(
            matches!(
                err,
                game_bench::core::GenerateError::UnknownTransform { name: n } if n == name
            ),
            "expected UnknownTransform for {:?}",
            name
        );
        prop_assert_eq!(snapshot(&env), before);
    }

    /// Applying the declared transforms in order is deterministic: two
    /// fresh environments end up with identical attribute values and
    /// identical audit digests.
    #[test]
    fn application_is_deterministic(words in word_list_strategy()) {
        let decls = vec![
            OverrideDecl::new("word_list", "lowercase"),
            OverrideDecl::new("word_list", "dedupe"),
            OverrideDecl::new("word_list", "sort"),
        ];

        let mut a = fresh_env(words.clone());
        let mut b = fresh_env(words);
        let trail_a = apply_overrides(&mut a, &decls, 0).unwrap();
        let trail_b = apply_overrides(&mut b, &decls, 0).unwrap();

        prop_assert_eq!(trail_a, trail_b);
        prop_assert_eq!(
            a.get_attr("word_list").unwrap(),
            b.get_attr("word_list").unwrap()
        );
    }

    /// Sorting is idempotent and its audit digest always matches the
    /// value actually left on the environment.
    #[test]
    fn sort_digest_matches_final_value(words in word_list_strategy()) {
        let decls = vec![OverrideDecl::new("word_list", "sort")];

        let mut env = fresh_env(words);
        let trail = apply_overrides(&mut env, &decls, 0).unwrap();
        let after_once = env.get_attr("word_list").unwrap();
        prop_assert_eq!(&trail[0].digest, &value_digest(&after_once));

        // A second sort is a no-op on the value.
        let mut env2 = fresh_env(after_once.as_text_list().unwrap().to_vec());
        apply_overrides(&mut env2, &decls, 0).unwrap();
        prop_assert_eq!(env2.get_attr("word_list").unwrap(), after_once);
    }

    /// Overrides never reach attributes outside their declared path.
    #[test]
    fn writes_stay_on_declared_path(words in word_list_strategy()) {
        let mut env = fresh_env(words);
        let min_before = env.get_attr("min_word_length").unwrap();
        let rounds_before = env.get_attr("max_rounds").unwrap();

        let decls = vec![
            OverrideDecl::new("word_list", "sort"),
            OverrideDecl::new("word_list", "dedupe"),
        ];
        apply_overrides(&mut env, &decls, 0).unwrap();

        prop_assert_eq!(env.get_attr("min_word_length").unwrap(), min_before);
        prop_assert_eq!(env.get_attr("max_rounds").unwrap(), rounds_before);
    }
}

fn word_list_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-zA-Z]{1,12}", 0..20)
}

// =============================================================================
// Allowlist Surface
// =============================================================================

#[test]
fn test_allowlist_is_exactly_four_names() {
    let names: Vec<&str> = Transform::ALL.iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["sort", "dedupe", "lowercase", "trim"]);
}

#[test]
fn test_declarations_deserialize_from_plain_json() {
    let decls: Vec<OverrideDecl> = serde_json::from_str(
        r#"[{"path": "word_list", "transform": "sort"},
            {"path": "word_list", "transform": "dedupe"}]"#,
    )
    .unwrap();
    assert_eq!(decls[0], OverrideDecl::new("word_list", "sort"));
    assert_eq!(decls[1].transform, "dedupe");
}
