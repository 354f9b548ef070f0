pub mod count_rows;
pub use count_rows::CountRowsStrategy;
pub mod drop_columns;
pub use drop_columns::DropColumnsStrategy;
pub mod drop_duplicates;
pub use drop_duplicates::DropDuplicatesStrategy;
pub mod fill_null;
pub use fill_null::FillNullStrategy;
pub mod filter_weeks;
pub use filter_weeks::FilterWeeksStrategy;
pub mod flatten;
pub use flatten::FlattenStrategy;
pub mod forward_backward_fill;
pub use forward_backward_fill::ForwardBackwardFillStrategy;
pub mod label_codes;
pub use label_codes::LabelCodesStrategy;
pub mod pivot_categories;
pub use pivot_categories::PivotCategoriesStrategy;
pub mod recode_values;
pub use recode_values::RecodeValuesStrategy;
pub mod rename_columns;
pub use rename_columns::RenameColumnsStrategy;
pub mod select_first;
pub use select_first::SelectFirstStrategy;
pub mod sum_by_keys;
pub use sum_by_keys::SumByKeysStrategy;
pub mod urine_test_outcomes;
pub use urine_test_outcomes::UrineTestOutcomesStrategy;

pub mod strategy_factory;
