//! Integration tests for the profiling pipeline: category resolution,
//! slicing, measure flattening, and lag-window construction.

use arrow::array::{BooleanArray, Float64Array, Int64Array, StringArray, TimestampMicrosecondArray};
use slice_guard::prelude::*;

fn mixed_table() -> Table {
    Table::try_new(vec![
        (
            "period",
            array_ref(StringArray::from(vec!["A", "A", "B", "B"])),
        ),
        ("active", array_ref(BooleanArray::from(vec![true, false, true, true]))),
        (
            "name",
            array_ref(StringArray::from(vec![
                Some(" alice"),
                Some("bob!"),
                None,
                Some("carol"),
            ])),
        ),
        (
            "amount",
            array_ref(Float64Array::from(vec![1.5, -2.0, 0.0, 4.0])),
        ),
        (
            "created_at",
            array_ref(TimestampMicrosecondArray::from(vec![
                1_000_000i64,
                2_000_000,
                3_000_000,
                4_000_000,
            ])),
        ),
    ])
    .unwrap()
}

#[test]
fn profile_covers_every_category() {
    let profiled = Profiler::builder()
        .slicer("period")
        .build()
        .profile(&mixed_table())
        .unwrap();

    let measures_of = |column: &str| -> Vec<&str> {
        profiled
            .rows()
            .iter()
            .filter(|r| r.column == column)
            .map(|r| r.measure.as_str())
            .collect()
    };

    let boolean = measures_of("active");
    assert!(boolean.contains(&"true_ratio"));
    assert!(boolean.contains(&"false_ratio"));
    assert!(boolean.contains(&"null_ratio"));

    let string = measures_of("name");
    assert!(string.contains(&"empty_ratio"));
    assert!(string.contains(&"special_character_ratio"));
    assert!(string.contains(&"trim_required_ratio"));
    assert!(string.contains(&"strict_distinct_count"));

    let number = measures_of("amount");
    assert!(number.contains(&"mean_value"));
    assert!(number.contains(&"median_value"));
    assert!(number.contains(&"negative_ratio"));
    assert!(number.contains(&"value_skew"));

    let datetime = measures_of("created_at");
    assert!(datetime.contains(&"min_value"));
    assert!(datetime.contains(&"max_value"));
    assert!(datetime.contains(&"precision_variance"));
}

#[test]
fn profile_is_canonically_sorted_with_unique_cells() {
    let profiled = Profiler::builder()
        .slicer("period")
        .build()
        .profile(&mixed_table())
        .unwrap();

    let mut keys: Vec<_> = profiled
        .rows()
        .iter()
        .map(|r| (r.inspector, r.column.clone(), r.measure.clone(), r.slice.clone()))
        .collect();
    let sorted = {
        let mut s = keys.clone();
        s.sort();
        s
    };
    assert_eq!(keys, sorted, "output must already be in canonical order");
    keys.dedup();
    assert_eq!(keys.len(), profiled.len(), "no duplicate measurement cells");
}

#[test]
fn slices_partition_the_rows() {
    let profiled = Profiler::builder()
        .slicer("period")
        .build()
        .profile(&mixed_table())
        .unwrap();

    let row_counts: Vec<(Option<SliceKey>, MeasureValue)> = profiled
        .rows()
        .iter()
        .filter(|r| r.column == "amount" && r.measure == "row_count")
        .map(|r| (r.slice.clone(), r.value.clone()))
        .collect();
    assert_eq!(
        row_counts,
        vec![
            (Some(SliceKey::Text("A".into())), MeasureValue::Long(2)),
            (Some(SliceKey::Text("B".into())), MeasureValue::Long(2)),
        ]
    );
}

#[test]
fn unsliced_profile_has_single_null_slice() {
    let profiled = Profiler::new().profile(&mixed_table()).unwrap();
    assert!(profiled.rows().iter().all(|r| r.slice.is_none()));
}

#[test]
fn numeric_override_on_textual_column() {
    let table = Table::try_new(vec![(
        "code",
        array_ref(StringArray::from(vec!["1", "2", "3"])),
    )])
    .unwrap();
    let profiled = Profiler::builder()
        .override_category("code", Category::Number)
        .build()
        .profile(&table)
        .unwrap();

    let mean = profiled
        .rows()
        .iter()
        .find(|r| r.measure == "mean_value")
        .unwrap();
    assert_eq!(mean.inspector, Category::Number);
    assert_eq!(mean.value, MeasureValue::Double(2.0));
}

#[test]
fn unparseable_cells_become_nulls_under_numeric_override() {
    let table = Table::try_new(vec![(
        "code",
        array_ref(StringArray::from(vec!["1", "oops", "3"])),
    )])
    .unwrap();
    let profiled = Profiler::builder()
        .override_category("code", Category::Number)
        .build()
        .profile(&table)
        .unwrap();

    let lookup = |measure: &str| {
        profiled
            .rows()
            .iter()
            .find(|r| r.measure == measure)
            .map(|r| r.value.clone())
            .unwrap()
    };
    // the unparseable cell drops out of the aggregates only
    assert_eq!(lookup("mean_value"), MeasureValue::Double(2.0));
    assert_eq!(lookup("row_count"), MeasureValue::Long(3));
    assert_eq!(lookup("null_ratio"), MeasureValue::Double(0.0));
}

#[test]
fn invalid_configuration_fails_before_profiling() {
    let table = mixed_table();

    let missing_slicer = Profiler::builder().slicer("no_such_column").build();
    assert!(matches!(
        missing_slicer.profile(&table),
        Err(ProfileError::ColumnNotFound(_))
    ));

    let missing_override = Profiler::builder()
        .override_category("no_such_column", Category::Number)
        .build();
    assert!(matches!(
        missing_override.profile(&table),
        Err(ProfileError::ColumnNotFound(_))
    ));
}

#[test]
fn lag_windows_follow_each_series() {
    // five ordered slices, one numeric series with distinct values per slice
    let table = Table::try_new(vec![
        ("bucket", array_ref(Int64Array::from(vec![1, 2, 3, 4, 5]))),
        (
            "reading",
            array_ref(Float64Array::from(vec![10.0, 20.0, 30.0, 40.0, 50.0])),
        ),
    ])
    .unwrap();
    let profiled = Profiler::builder()
        .slicer("bucket")
        .lag_depth(2)
        .build()
        .profile(&table)
        .unwrap();

    let mean_at = |slice: i64| {
        profiled
            .rows()
            .iter()
            .find(|r| {
                r.column == "reading"
                    && r.measure == "mean_value"
                    && r.slice == Some(SliceKey::Long(slice))
            })
            .unwrap()
    };

    let s3 = mean_at(3);
    assert_eq!(s3.lag(1), Some(&MeasureValue::Double(20.0)));
    assert_eq!(s3.lag(2), Some(&MeasureValue::Double(10.0)));

    let s1 = mean_at(1);
    assert_eq!(s1.lag(1), None);
    assert_eq!(s1.lag(2), None);

    let s2 = mean_at(2);
    assert_eq!(s2.lag(1), Some(&MeasureValue::Double(10.0)));
    assert_eq!(s2.lag(2), None);
}

#[test]
fn profiled_table_serializes_to_json() {
    let profiled = Profiler::builder()
        .slicer("period")
        .lag_depth(1)
        .build()
        .profile(&mixed_table())
        .unwrap();
    let json = profiled.to_json().unwrap();
    assert!(json.contains("mean_value"));
    assert!(json.contains("lags"));
}
