use std::sync::{Arc, Mutex};

use joinrs::{
    normalize_text, AttrValue, BooleanColumn, CategoricalColumn, Column, Float64Column,
    Int64Column, KeyColumn, KeyComparator, KeyResolver, StringColumn,
};

fn resolve(
    left: impl Into<Column>,
    right: impl Into<Column>,
    accept_na_match: bool,
) -> Box<dyn KeyComparator> {
    KeyResolver::new()
        .resolve(
            &KeyColumn::new(left),
            &KeyColumn::new(right),
            "k",
            "k",
            false,
            accept_na_match,
        )
        .unwrap()
}

mod empty_data_tests {
    use super::*;

    #[test]
    fn test_empty_columns_resolve() {
        let cmp = resolve(Int64Column::new(vec![]), Int64Column::new(vec![]), false);

        assert_eq!(cmp.left_len(), 0);
        assert_eq!(cmp.right_len(), 0);
    }

    #[test]
    fn test_empty_side_against_populated_side() {
        let cmp = resolve(
            StringColumn::new(vec![]),
            StringColumn::new(vec!["a".to_string()]),
            false,
        );

        assert_eq!(cmp.left_len(), 0);
        assert_eq!(cmp.right_len(), 1);
    }

    #[test]
    fn test_normalize_empty_column() {
        let column: Column = StringColumn::new(vec![]).into();
        let normalized = normalize_text(&column);

        assert_eq!(normalized.len(), 0);
        assert!(normalized.as_string().unwrap().is_canonical());
    }

    #[test]
    fn test_empty_categorical_expands_to_empty_text() {
        let column: Column = CategoricalColumn::new(vec![], vec!["a".to_string()])
            .unwrap()
            .into();
        let normalized = normalize_text(&column);

        assert_eq!(normalized.len(), 0);
    }
}

mod missing_data_tests {
    use super::*;

    #[test]
    fn test_all_missing_sides() {
        let left = Int64Column::with_nulls(vec![0, 0], vec![true, true]);
        let right = Int64Column::with_nulls(vec![0], vec![true]);

        let strict = resolve(left.clone(), right.clone(), false);
        assert!(!strict.equal(0, 0));
        assert!(!strict.equal(1, 0));

        let lenient = resolve(left, right, true);
        assert!(lenient.equal(0, 0));
        assert!(lenient.equal(1, 0));
        assert_eq!(lenient.hash_left(0), lenient.hash_right(0));
    }

    #[test]
    fn test_boolean_nulls_across_byte_boundary() {
        let values = vec![true; 12];
        let mut nulls = vec![false; 12];
        nulls[8] = true;
        nulls[11] = true;

        let cmp = resolve(
            BooleanColumn::with_nulls(values, nulls),
            BooleanColumn::new(vec![true]),
            false,
        );

        assert!(cmp.equal(7, 0));
        assert!(!cmp.equal(8, 0));
        assert!(cmp.equal(9, 0));
        assert!(!cmp.equal(11, 0));
    }

    #[test]
    fn test_categorical_with_only_invalid_codes() {
        let left = CategoricalColumn::new(vec![-1, 5], vec!["a".to_string()]).unwrap();
        let right = CategoricalColumn::new(vec![0, -1], vec!["b".to_string()]).unwrap();

        // Different levels force text coercion; every left row is missing
        let cmp = resolve(left, right, true);
        assert!(!cmp.equal(0, 0));
        assert!(cmp.equal(0, 1));
        assert!(cmp.equal(1, 1));
    }
}

mod precision_tests {
    use super::*;

    #[test]
    fn test_integer_pairs_keep_full_precision() {
        let big = (1i64 << 53) + 1;
        let cmp = resolve(
            Int64Column::new(vec![big]),
            Int64Column::new(vec![big, big - 1]),
            false,
        );

        assert!(cmp.equal(0, 0));
        assert!(!cmp.equal(0, 1));
    }

    #[test]
    fn test_integer_float_promotion_is_lossy_at_the_extreme() {
        // Above 2^53 the float side cannot represent every integer, so the
        // promoted comparison inherits float granularity.
        let big = (1i64 << 53) + 1;
        let cmp = resolve(
            Int64Column::new(vec![big]),
            Float64Column::new(vec![(1i64 << 53) as f64]),
            false,
        );

        assert!(cmp.equal(0, 0));
    }
}

mod resolver_edge_tests {
    use super::*;

    #[test]
    fn test_factor_direct_path_checks_attributes() {
        let messages: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&messages);
        let resolver = KeyResolver::new()
            .with_warning_sink(move |message| sink.lock().unwrap().push(message.to_string()));

        let left = KeyColumn::new(CategoricalColumn::from_values(&[Some("a")]));
        let right = KeyColumn::new(CategoricalColumn::from_values(&[Some("a")]))
            .with_attr("units", AttrValue::Str("m".to_string()));

        resolver.resolve(&left, &right, "f", "f", true, false).unwrap();

        assert_eq!(
            *messages.lock().unwrap(),
            ["Variable `f` has different attributes on RHS and LHS of join"]
        );
    }

    #[test]
    fn test_resolver_is_reusable_across_pairs() {
        let resolver = KeyResolver::new();
        let ints = KeyColumn::new(Int64Column::new(vec![1]));
        let floats = KeyColumn::new(Float64Column::new(vec![1.0]));
        let text = KeyColumn::new(StringColumn::new(vec!["a".to_string()]));

        assert!(resolver.resolve(&ints, &floats, "a", "b", false, false).is_ok());
        assert!(resolver.resolve(&text, &text, "c", "c", false, false).is_ok());
        assert!(resolver.resolve(&ints, &text, "a", "c", false, false).is_err());
    }

    #[test]
    fn test_strategies_outlive_the_resolver() {
        let cmp = {
            let resolver = KeyResolver::new();
            resolver
                .resolve(
                    &KeyColumn::new(Int64Column::new(vec![7])),
                    &KeyColumn::new(Int64Column::new(vec![7])),
                    "k",
                    "k",
                    false,
                    false,
                )
                .unwrap()
        };

        // The strategy owns its inputs and stands alone
        assert!(cmp.equal(0, 0));
    }

    #[test]
    fn test_single_row_columns() {
        let cmp = resolve(
            Float64Column::new(vec![2.5]),
            Float64Column::new(vec![2.5]),
            false,
        );

        assert!(cmp.equal(0, 0));
        assert_eq!(cmp.hash_left(0), cmp.hash_right(0));
    }
}
