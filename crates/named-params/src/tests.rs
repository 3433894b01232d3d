use super::*;
use proptest::prelude::*;

fn np_ops(keys: &[&str]) -> Vec<ParamOp<NamedParameters>> {
    keys.iter().map(|k| ops::by_name(k).unwrap()).collect()
}

#[test]
fn empty_operator_list_returns_base() {
    let base = NamedParameters::default_values().tolerance(0.25);
    let dict = ParamDict::new().with("verbose", true).with("tolerance", 0.5);
    let out = apply_named_parameters(base.clone(), &dict, &[]).unwrap();
    assert_eq!(out, base);
}

#[test]
fn absent_key_leaves_configuration_unchanged() {
    let base = NamedParameters::default_values();
    let dict = ParamDict::new().with("tolerance", 0.5);
    let out = apply_named_parameters(base.clone(), &dict, &np_ops(&["verbose"])).unwrap();
    assert_eq!(out, base);
}

#[test]
fn present_key_changes_only_its_field() {
    let base = NamedParameters::default_values().tolerance(0.25);
    let dict = ParamDict::new().with("max_iterations", 7i64);
    let out = apply_named_parameters(base.clone(), &dict, &ops::standard()).unwrap();
    assert_eq!(out.max_iterations, Some(7));
    assert_eq!(out.tolerance, base.tolerance);
    assert_eq!(out.verbose, base.verbose);
    assert_eq!(out.vertex_point_map, base.vertex_point_map);
    assert_eq!(out.geom_traits, base.geom_traits);
}

#[test]
fn unknown_keys_are_ignored_by_default() {
    let dict = ParamDict::new()
        .with("vertex_point_map", 42i64)
        .with("unknown", 1i64);
    let out = apply_named_parameters(
        NamedParameters::default_values(),
        &dict,
        &np_ops(&["verbose", "vertex_point_map"]),
    )
    .unwrap();
    assert_eq!(out.vertex_point_map, Some(VertexPointMap::Handle(42)));
    assert_eq!(out.verbose, None);
    assert_eq!(out.chain(), "default_values().vertex_point_map(vpm_42)");
}

#[test]
fn chain_follows_operator_order() {
    let dict = ParamDict::new()
        .with("verbose", 1i64)
        .with("geom_traits", 456i64)
        .with("vertex_point_map", 123i64);
    let app = Applicator::new(np_ops(&["vertex_point_map", "geom_traits", "verbose"]));
    let (np, report) = app
        .apply_with_report(NamedParameters::default_values(), &dict)
        .unwrap();
    assert_eq!(
        np.chain(),
        "default_values().vertex_point_map(vpm_123).geom_traits(kernel_456).verbose(true)"
    );
    assert_eq!(report.matched, vec!["vertex_point_map", "geom_traits", "verbose"]);
    assert!(report.unknown.is_empty());
}

#[test]
fn type_mismatch_names_the_key() {
    let dict = ParamDict::new().with("verbose", "yes");
    let err = apply_named_parameters(NamedParameters::default_values(), &dict, &ops::standard())
        .unwrap_err();
    assert_eq!(
        err,
        ParamError::TypeMismatch {
            key: "verbose".into(),
            expected: "bool",
            found: "text"
        }
    );
}

#[test]
fn reject_policy_lists_all_unknown_keys() {
    let dict = ParamDict::new()
        .with("verbose", true)
        .with("tolerence", 0.1)
        .with("another_unknown", 123i64);
    let app = Applicator::new(ops::standard()).with_cfg(ApplyCfg::with_unknown(UnknownKeyPolicy::Reject));
    let err = app.apply(NamedParameters::default_values(), &dict).unwrap_err();
    assert_eq!(
        err,
        ParamError::UnknownKeys(vec!["another_unknown".into(), "tolerence".into()])
    );
}

#[test]
fn json_dictionary_end_to_end() {
    let dict = ParamDict::from_json_str(r#"{"tolerance": 0.00001, "max_iterations": 500}"#).unwrap();
    let np = apply_named_parameters(NamedParameters::default_values(), &dict, &ops::standard()).unwrap();
    assert_eq!(
        mesh::process_mesh("bunny", 5000, &np),
        "Processed mesh 'bunny' with 5000 vertices (tolerance=0.00001, max_iterations=500)"
    );
}

fn entry() -> impl Strategy<Value = (String, ParamValue)> {
    prop_oneof![
        any::<bool>().prop_map(|b| ("verbose".to_string(), ParamValue::Bool(b))),
        (0i64..1000).prop_map(|h| ("vertex_point_map".to_string(), ParamValue::Int(h))),
        (0i64..1000).prop_map(|h| ("geom_traits".to_string(), ParamValue::Int(h))),
        (1e-6f64..10.0).prop_map(|t| ("tolerance".to_string(), ParamValue::Float(t))),
        (0i64..10_000).prop_map(|n| ("max_iterations".to_string(), ParamValue::Int(n))),
        "[a-z]{3,8}_x".prop_map(|k| (k, ParamValue::Int(1))),
    ]
}

proptest! {
    #[test]
    fn result_independent_of_dictionary_order(
        entries in prop::collection::vec(entry(), 0..12),
        ops_order in Just(ops::STANDARD_KEYS.to_vec()).prop_shuffle(),
    ) {
        // Last write wins per key, so dedup first to build identical dicts.
        let mut unique: Vec<(String, ParamValue)> = Vec::new();
        for (k, v) in entries {
            if let Some(slot) = unique.iter_mut().find(|(uk, _)| *uk == k) {
                slot.1 = v;
            } else {
                unique.push((k, v));
            }
        }
        let forward: ParamDict = unique.iter().cloned().collect();
        let backward: ParamDict = unique.iter().rev().cloned().collect();
        let ops = np_ops(&ops_order);
        let a = apply_named_parameters(NamedParameters::default_values(), &forward, &ops).unwrap();
        let b = apply_named_parameters(NamedParameters::default_values(), &backward, &ops).unwrap();
        prop_assert_eq!(a.chain(), b.chain());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn matched_keys_are_exactly_the_known_ones(entries in prop::collection::vec(entry(), 0..12)) {
        let dict: ParamDict = entries.into_iter().collect();
        let (_, report) = Applicator::new(ops::standard())
            .apply_with_report(NamedParameters::default_values(), &dict)
            .unwrap();
        for key in dict.keys() {
            let known = ops::STANDARD_KEYS.contains(&key);
            prop_assert_eq!(report.matched.iter().any(|m| m == key), known);
            prop_assert_eq!(report.unknown.iter().any(|u| u == key), !known);
        }
    }
}
