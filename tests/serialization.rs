mod common;

use common::{entry, Entry};
use evaluators::prelude::*;
use evaluators::{CapacityPolicy, Evaluators, ImmutableEvaluators, SynchronizedEvaluators};

#[test]
fn stores_serialize_as_plain_sequences() {
    let mut store = Evaluators::with_policy(CapacityPolicy::new(2, 100));
    store.push(entry("a", 1)).unwrap();
    store.push(entry("b", 2)).unwrap();

    let json = serde_json::to_string(&store).unwrap();
    assert_eq!(json, r#"[{"name":"a","value":1},{"name":"b","value":2}]"#);

    let fixed = ImmutableEvaluators::from(store.to_vec());
    assert_eq!(serde_json::to_string(&fixed).unwrap(), json);

    let shared = SynchronizedEvaluators::from(store.clone());
    assert_eq!(serde_json::to_string(&shared).unwrap(), json);
}

#[test]
fn mutable_store_round_trip_uses_default_policy() {
    let store: Evaluators<Entry> = Evaluators::with_policy(CapacityPolicy::new(2, 100));
    let json = r#"[{"name":"a","value":1},{"name":"b","value":2},{"name":"c","value":3}]"#;
    let restored: Evaluators<Entry> = serde_json::from_str(json).unwrap();
    assert_eq!(restored.len(), 3);
    assert_eq!(restored.index_of("c"), Some(2));
    assert_eq!(restored.policy(), CapacityPolicy::default());
    assert_ne!(restored.policy(), store.policy());
}

#[test]
fn immutable_and_synchronized_round_trip() {
    let fixed = ImmutableEvaluators::from(vec![entry("x", 7), entry("y", 8)]);
    let json = serde_json::to_string(&fixed).unwrap();

    let restored: ImmutableEvaluators<Entry> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, fixed);

    let shared: SynchronizedEvaluators<Entry> = serde_json::from_str(&json).unwrap();
    assert_eq!(shared.evaluate(&8i64), Some(entry("y", 8)));
    shared.push(entry("z", 9)).unwrap();
    assert_eq!(shared.len(), 3);
}

#[test]
fn malformed_input_is_rejected() {
    assert!(serde_json::from_str::<Evaluators<Entry>>(r#"{"name":"a"}"#).is_err());
    assert!(serde_json::from_str::<ImmutableEvaluators<Entry>>("[1, 2]").is_err());
    let empty: Evaluators<Entry> = serde_json::from_str("[]").unwrap();
    assert!(empty.is_empty());
}
