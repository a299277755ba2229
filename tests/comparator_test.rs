use joinrs::{
    BooleanColumn, CategoricalColumn, Column, ComplexColumn, Float64Column, Int64Column,
    KeyColumn, KeyComparator, KeyResolver, StringColumn,
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

#[test]
fn test_integer_keys() {
    let cmp = resolve(
        Int64Column::new(vec![1, 2, 3]),
        Int64Column::new(vec![3, 2]),
        false,
    );

    assert_eq!(cmp.left_len(), 3);
    assert_eq!(cmp.right_len(), 2);
    assert!(cmp.equal(1, 1));
    assert!(cmp.equal(2, 0));
    assert!(!cmp.equal(0, 0));
    assert_eq!(cmp.hash_left(1), cmp.hash_right(1));
}

#[test]
fn test_integer_float_promotion() {
    let cmp = resolve(
        Int64Column::new(vec![2, 5]),
        Float64Column::new(vec![2.0, 5.5]),
        false,
    );

    assert!(cmp.equal(0, 0));
    assert!(!cmp.equal(1, 1));
    // Promoted equal values hash identically across the two storages
    assert_eq!(cmp.hash_left(0), cmp.hash_right(0));
}

#[test]
fn test_boolean_promotes_to_integer() {
    let cmp = resolve(
        BooleanColumn::new(vec![true, false]),
        Int64Column::new(vec![1, 0, 7]),
        false,
    );

    assert!(cmp.equal(0, 0));
    assert!(cmp.equal(1, 1));
    assert!(!cmp.equal(0, 2));
    assert_eq!(cmp.hash_left(1), cmp.hash_right(1));
}

#[test]
fn test_missing_value_policy() {
    let left = Int64Column::with_nulls(vec![1, 0], vec![false, true]);
    let right = Int64Column::with_nulls(vec![0, 1], vec![true, false]);

    let strict = resolve(left.clone(), right.clone(), false);
    // Missing never matches missing under the strict policy
    assert!(!strict.equal(1, 0));
    assert!(strict.equal(0, 1));

    let lenient = resolve(left, right, true);
    assert!(lenient.equal(1, 0));
    // Missing still never matches a present value
    assert!(!lenient.equal(1, 1));
    assert!(!lenient.equal(0, 0));
    // Matching missing rows must land in the same bucket
    assert_eq!(lenient.hash_left(1), lenient.hash_right(0));
}

#[test]
fn test_nan_follows_missing_policy_but_stays_distinct() {
    let left = Float64Column::with_nulls(vec![f64::NAN, 0.0], vec![false, true]);
    let right = Float64Column::new(vec![f64::NAN, 1.0]);

    let strict = resolve(left.clone(), right.clone(), false);
    assert!(!strict.equal(0, 0));

    let lenient = resolve(left, right, true);
    assert!(lenient.equal(0, 0));
    assert_eq!(lenient.hash_left(0), lenient.hash_right(0));
    // NaN is a value, missing is not: they never match each other
    assert!(!lenient.equal(1, 0));
    assert!(!lenient.equal(0, 1));
}

#[test]
fn test_negative_zero_equals_zero() {
    let cmp = resolve(
        Float64Column::new(vec![-0.0]),
        Float64Column::new(vec![0.0]),
        false,
    );

    assert!(cmp.equal(0, 0));
    assert_eq!(cmp.hash_left(0), cmp.hash_right(0));
}

#[test]
fn test_text_keys() {
    let cmp = resolve(
        StringColumn::with_nulls(
            vec!["apple".to_string(), "pear".to_string(), String::new()],
            vec![false, false, true],
        ),
        StringColumn::new(vec!["pear".to_string(), "plum".to_string()]),
        false,
    );

    assert!(cmp.equal(1, 0));
    assert!(!cmp.equal(0, 0));
    assert_eq!(cmp.hash_left(1), cmp.hash_right(0));
    // Missing text does not match present text
    assert!(!cmp.equal(2, 0));
}

#[test]
fn test_empty_string_is_not_missing() {
    let cmp = resolve(
        StringColumn::with_nulls(vec![String::new()], vec![true]),
        StringColumn::new(vec![String::new()]),
        true,
    );

    // A present empty string never matches a missing value
    assert!(!cmp.equal(0, 0));
}

#[test]
fn test_complex_keys() {
    let left = ComplexColumn::from_parts(vec![3.0, 0.0], vec![4.0, f64::NAN]).unwrap();
    let right = ComplexColumn::from_parts(vec![3.0, 0.0], vec![-4.0, f64::NAN]).unwrap();

    let strict = resolve(left.clone(), right.clone(), false);
    assert!(!strict.equal(0, 0));
    assert!(!strict.equal(1, 1));

    let lenient = resolve(left, right, true);
    // Both parts must agree, with NaN matching NaN under the lenient policy
    assert!(lenient.equal(1, 1));
    assert_eq!(lenient.hash_left(1), lenient.hash_right(1));
}

#[test]
fn test_float_against_categorical_compares_codes() {
    let codes = CategoricalColumn::new(
        vec![0, 2],
        vec!["a".to_string(), "b".to_string(), "c".to_string()],
    )
    .unwrap();

    let cmp = resolve(Float64Column::new(vec![0.0, 1.0]), codes, false);

    // The categorical side contributes its integer codes, not its labels
    assert!(cmp.equal(0, 0));
    assert!(!cmp.equal(1, 0));
    assert!(!cmp.equal(1, 1));
}

#[test]
fn test_boolean_against_categorical_compares_codes() {
    let codes = CategoricalColumn::new(vec![1, 0], vec!["no".to_string(), "yes".to_string()])
        .unwrap();

    let cmp = resolve(BooleanColumn::new(vec![true, false]), codes, false);

    assert!(cmp.equal(0, 0));
    assert!(cmp.equal(1, 1));
    assert!(!cmp.equal(0, 1));
}

#[test]
fn test_equal_rows_share_buckets() {
    let cmp = resolve(
        Int64Column::new(vec![5, -3, 0, 9000]),
        Float64Column::new(vec![5.0, -3.0, -0.0, 9000.0]),
        false,
    );

    for i in 0..4 {
        assert!(cmp.equal(i, i));
        assert_eq!(cmp.hash_left(i), cmp.hash_right(i));
    }
}

#[test]
fn test_hashes_are_deterministic() {
    let cmp = resolve(
        Int64Column::new(vec![42]),
        Int64Column::new(vec![42]),
        false,
    );

    assert_eq!(cmp.hash_left(0), cmp.hash_left(0));
    assert_eq!(cmp.hash_left(0), cmp.hash_right(0));
}
