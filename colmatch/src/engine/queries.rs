//! SQL generation and result extraction for profiling queries.

use arrow::array::{Array, Float64Array};
use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};

use super::{ColumnPercentages, RawColumn, SampleOrder, SampleSize};
use crate::error::{ColmatchError, QueryStage, Result, StageContext};
use crate::security::SqlSecurity;

fn null_alias(index: usize) -> String {
    format!("null_pct_{index}")
}

fn unique_alias(index: usize) -> String {
    format!("unique_pct_{index}")
}

/// Builds one query computing null and unique percentages for every column.
///
/// The unique percentage is `NULL` when a column has no non-missing values.
pub(crate) fn aggregate_sql(relation: &str, columns: &[RawColumn]) -> String {
    let projections: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let c = SqlSecurity::quote_identifier(&column.name);
            format!(
                "CAST(CASE WHEN COUNT(*) = 0 THEN 0.0 \
                 ELSE 100.0 * (COUNT(*) - COUNT({c})) / COUNT(*) END AS DOUBLE) AS \"{null}\", \
                 CAST(CASE WHEN COUNT({c}) = 0 THEN NULL \
                 ELSE 100.0 * COUNT(DISTINCT {c}) / COUNT({c}) END AS DOUBLE) AS \"{unique}\"",
                null = null_alias(i),
                unique = unique_alias(i),
            )
        })
        .collect();
    format!("SELECT {} FROM {relation}", projections.join(", "))
}

/// Builds a full scan that forces every column to be decoded.
pub(crate) fn decode_check_sql(relation: &str, columns: &[RawColumn]) -> String {
    let counts: Vec<String> = columns
        .iter()
        .map(|c| format!("COUNT({})", SqlSecurity::quote_identifier(&c.name)))
        .collect();
    format!("SELECT {} FROM {relation}", counts.join(", "))
}

/// Builds the sampling query for the given size and order.
pub(crate) fn sample_sql(
    relation: &str,
    columns: &[RawColumn],
    size: SampleSize,
    order: SampleOrder,
) -> String {
    let projection: Vec<String> = columns
        .iter()
        .map(|c| SqlSecurity::quote_identifier(&c.name))
        .collect();
    let mut sql = format!("SELECT {} FROM {relation}", projection.join(", "));
    if let SampleSize::Rows(n) = size {
        if order == SampleOrder::Random {
            sql.push_str(" ORDER BY random()");
        }
        sql.push_str(&format!(" LIMIT {n}"));
    }
    sql
}

fn float_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Float64Array> {
    batch
        .column_by_name(name)
        .and_then(|array| array.as_any().downcast_ref::<Float64Array>())
        .ok_or_else(|| {
            ColmatchError::query(
                QueryStage::Aggregate,
                format!("aggregate result is missing DOUBLE column '{name}'"),
            )
        })
}

/// Reads the single aggregate row into per-column percentages.
pub(crate) fn extract_percentages(
    batches: &[RecordBatch],
    column_count: usize,
) -> Result<Vec<ColumnPercentages>> {
    let batch = batches
        .iter()
        .find(|b| b.num_rows() > 0)
        .ok_or_else(|| ColmatchError::query(QueryStage::Aggregate, "aggregate returned no rows"))?;

    (0..column_count)
        .map(|i| {
            let nulls = float_column(batch, &null_alias(i))?;
            let uniques = float_column(batch, &unique_alias(i))?;
            let null_pct = if nulls.is_null(0) { 0.0 } else { nulls.value(0) };
            let unique_pct = (!uniques.is_null(0)).then(|| uniques.value(0));
            Ok(ColumnPercentages {
                null_pct,
                unique_pct,
            })
        })
        .collect()
}

/// Stringifies the non-missing values of each column across all batches.
pub(crate) fn extract_samples(
    batches: &[RecordBatch],
    column_count: usize,
) -> Result<Vec<Vec<String>>> {
    let options = FormatOptions::default();
    let mut samples = vec![Vec::new(); column_count];

    for batch in batches {
        if batch.num_columns() != column_count {
            return Err(ColmatchError::query(
                QueryStage::Sampling,
                format!(
                    "sample returned {} columns, expected {column_count}",
                    batch.num_columns()
                ),
            ));
        }
        for (values, array) in samples.iter_mut().zip(batch.columns()) {
            let formatter =
                ArrayFormatter::try_new(array.as_ref(), &options).at_stage(QueryStage::Sampling)?;
            // NullArray carries no physical validity buffer
            let nulls = array.logical_nulls();
            for row in 0..array.len() {
                if nulls.as_ref().is_some_and(|n| n.is_null(row)) {
                    continue;
                }
                values.push(formatter.value(row).to_string());
            }
        }
    }
    Ok(samples)
}
