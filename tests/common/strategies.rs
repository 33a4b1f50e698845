use implementors_registry::Registry;
use proptest::prelude::*;

/// Strategy for generating group names shaped like crate names
pub fn group_name_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,31}"
}

/// Strategy for generating opaque descriptors, markup and quotes included
pub fn descriptor_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "impl [A-Z][a-zA-Z]{0,12} for [A-Z][a-zA-Z]{0,12}",
        "impl&lt;[A-Z]: [A-Z][a-z]{1,8}&gt; [A-Z][a-z]{1,8} for <a class=\"struct\">[A-Z][a-z]{1,8}</a>",
        any::<String>(),
    ]
}

/// Strategy for generating descriptor sequences, duplicates allowed
pub fn descriptors_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(descriptor_strategy(), 0..8)
}

/// Strategy for generating complete registries
pub fn registry_strategy() -> impl Strategy<Value = Registry> {
    prop::collection::btree_map(group_name_strategy(), descriptors_strategy(), 0..6).prop_map(
        |groups| {
            groups
                .into_iter()
                .try_fold(Registry::builder(), |builder, (group, descriptors)| {
                    builder.group(group, descriptors)
                })
                .expect("btree keys are unique and non-empty")
                .build()
        },
    )
}
