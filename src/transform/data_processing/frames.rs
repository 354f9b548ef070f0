use crate::constants::ROW_ORDER_COL;
use crate::transform::error::StrategyError;
use polars::prelude::{DataFrame, IntoLazy, JoinArgs, JoinType, SortMultipleOptions, col};

/// Left joins `right` onto `left` on the shared `key` column.
///
/// The row order of `left` is kept. Rows of `left` that match several rows of
/// `right` are repeated in place.
pub fn left_join_on(
    left: &DataFrame,
    right: &DataFrame,
    key: &str,
) -> Result<DataFrame, StrategyError> {
    let joined = left
        .clone()
        .lazy()
        .with_row_index(ROW_ORDER_COL, None)
        .join(
            right.clone().lazy(),
            [col(key)],
            [col(key)],
            JoinArgs::new(JoinType::Left),
        )
        .sort(
            [ROW_ORDER_COL],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .collect()?;

    Ok(joined.drop(ROW_ORDER_COL)?)
}

/// Names of all columns in `df` except the ones listed in `excluded`, in table order.
pub fn column_names_except(df: &DataFrame, excluded: &[&str]) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .filter(|name| !excluded.contains(&name.as_str()))
        .map(|name| name.to_string())
        .collect()
}
