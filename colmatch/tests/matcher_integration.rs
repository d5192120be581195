//! End-to-end matching tests: profile two files, then rank correspondences.

use std::io::Write;

use colmatch::engine::{SampleOrder, SampleSize};
use colmatch::matcher::{ColumnMatcher, ScoringScheme};
use colmatch::profile::ColumnProfile;
use colmatch::profiler::Profiler;
use tempfile::NamedTempFile;

fn write_fixture(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn profiler() -> Profiler {
    Profiler::builder()
        .sample_size(SampleSize::All)
        .sample_order(SampleOrder::FirstRows)
        .build()
}

#[test]
fn test_reference_scenario() {
    let left = vec![ColumnProfile::new("customer_id", "INTEGER").with_percentages(0.0, Some(100.0))];
    let right = vec![
        ColumnProfile::new("cust_id", "INTEGER").with_percentages(0.0, Some(98.0)),
        ColumnProfile::new("address", "VARCHAR").with_percentages(5.0, Some(80.0)),
    ];

    let ranked = ColumnMatcher::default().match_profiles(&left, &right);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].right.name(), "cust_id");
    assert_eq!(ranked[1].right.name(), "address");
    assert!(ranked[0].score > 0.7);
    assert!(ranked[0].score > ranked[1].score);
}

#[tokio::test]
async fn test_match_files_end_to_end() {
    let customers = write_fixture(
        ".csv",
        "customer_id,first_name,city,signup_date\n\
         1,Ada,Paris,2024-01-01\n\
         2,Alan,London,2024-01-02\n\
         3,Grace,New York,2024-01-03\n\
         4,Edsger,Amsterdam,2024-01-04\n",
    );
    let clients = write_fixture(
        ".tsv",
        "cust_id\tfirstName\tCity\tcreated\n\
         10\tada\tparis\t2023-05-01\n\
         11\tAlan\tLondon\t2023-05-02\n\
         12\tLinus\tHelsinki\t2023-05-03\n",
    );

    let ranked = profiler()
        .match_paths(customers.path(), clients.path(), &ColumnMatcher::default())
        .await
        .unwrap();

    assert_eq!(ranked.len(), 16);
    for window in ranked.windows(2) {
        assert!(window[0].score >= window[1].score);
    }

    let best_for = |left: &str| {
        ranked
            .iter()
            .find(|pair| pair.left.name() == left)
            .map(|pair| pair.right.name().to_string())
            .unwrap()
    };
    assert_eq!(best_for("customer_id"), "cust_id");
    assert_eq!(best_for("first_name"), "firstName");
    assert_eq!(best_for("city"), "City");
    assert_eq!(best_for("signup_date"), "created");

    let city = ranked
        .iter()
        .find(|p| p.left.name() == "city" && p.right.name() == "City")
        .unwrap();
    assert_eq!(city.components.name, 1.0);
    assert!(city.components.overlap > 0.0);
}

#[tokio::test]
async fn test_match_same_file_skips_mirrored_pairs() {
    let file = write_fixture(".csv", "a,b\n1,x\n2,y\n");
    let path = file.path();

    let ranked = profiler()
        .match_paths(path, path, &ColumnMatcher::default())
        .await
        .unwrap();

    // (a,a), (a,b), (b,b); (b,a) mirrors (a,b)
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].score, 1.0);
    assert_eq!(ranked[1].score, 1.0);
}

#[tokio::test]
async fn test_type_null_product_scheme() {
    let left = write_fixture(".csv", "id,label\n1,a\n2,\n");
    let right = write_fixture(".csv", "key\n5\n6\n");
    let matcher = ColumnMatcher::builder()
        .scheme(ScoringScheme::TypeNullProduct)
        .build()
        .unwrap();

    let ranked = profiler()
        .match_paths(left.path(), right.path(), &matcher)
        .await
        .unwrap();

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].left.name(), "id");
    assert_eq!(ranked[0].score, 1.0);
    // VARCHAR vs BIGINT is a lossy cast; label is 50% null
    assert!((ranked[1].score - 0.3 * 0.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_match_with_empty_side() {
    let left = write_fixture(".csv", "id\n1\n");
    let right = write_fixture(".csv", "id\n");

    let ranked = profiler()
        .match_paths(left.path(), right.path(), &ColumnMatcher::default())
        .await
        .unwrap();

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].right.null_pct(), 0.0);
    assert_eq!(ranked[0].right.unique_pct(), 0.0);
}
