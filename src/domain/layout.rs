//! Fixed positions of the feature matrix.
//!
//! Every value here is coupled to one specific spreadsheet layout (the
//! "Features and SKU" matrix). If columns or section rows move in the source
//! sheet, this file is the only place that has to change.

use std::ops::RangeInclusive;

/// Row holding edition labels; rewritten with category labels by the classifier.
pub const HEADER_ROW: usize = 0;
/// Row holding the SKU identifier for each data column.
pub const SKU_ROW: usize = 2;

pub const NAME_COL: usize = 0;
pub const DESCRIPTION_COL: usize = 1;
pub const LINK_COL: usize = 2;

/// Columns D..=AK, the only cells that may carry support markers.
pub const DATA_COLUMNS: RangeInclusive<usize> = 3..=36;

pub const SUPPORT_MARKER: &str = "X";

/// Columns D-R.
pub const IT_PRODUCTS_COLUMNS: RangeInclusive<usize> = 3..=17;
/// Columns T-AF. Column S (18) is a gutter.
pub const API_PRODUCTS_COLUMNS: RangeInclusive<usize> = 19..=31;
/// Columns AH-AK. Column AG (32) is a gutter.
pub const ADD_ONS_COLUMNS: RangeInclusive<usize> = 33..=36;

/// 1-indexed section header rows (as numbered in the spreadsheet UI).
///
/// 120 appears twice in the source list; the row filter collapses it.
pub const SECTION_ROWS: [usize; 24] = [
    1, 2, 3, 4, 20, 30, 44, 56, 76, 92, 119, 120, 120, 132, 179, 190, 204, 209, 213, 220, 225,
    240, 259, 264,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductCategory {
    ItProducts,
    ApiProducts,
    AddOns,
}

impl ProductCategory {
    pub fn label(self) -> &'static str {
        match self {
            ProductCategory::ItProducts => "IT Products",
            ProductCategory::ApiProducts => "API Products",
            ProductCategory::AddOns => {
                "Add-on products that can be combined with IT or API Products"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRange {
    pub category: ProductCategory,
    pub columns: RangeInclusive<usize>,
}

/// Positions the normalizer, classifier, filter and index agree on.
///
/// `Default` is the production matrix; tests build smaller layouts by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixLayout {
    pub header_row: usize,
    pub sku_row: usize,
    pub name_col: usize,
    pub description_col: usize,
    pub link_col: usize,
    pub data_columns: RangeInclusive<usize>,
    pub marker: String,
    pub category_ranges: Vec<CategoryRange>,
    pub section_rows: Vec<usize>,
}

impl Default for MatrixLayout {
    fn default() -> Self {
        Self {
            header_row: HEADER_ROW,
            sku_row: SKU_ROW,
            name_col: NAME_COL,
            description_col: DESCRIPTION_COL,
            link_col: LINK_COL,
            data_columns: DATA_COLUMNS,
            marker: SUPPORT_MARKER.to_string(),
            category_ranges: vec![
                CategoryRange {
                    category: ProductCategory::ItProducts,
                    columns: IT_PRODUCTS_COLUMNS,
                },
                CategoryRange {
                    category: ProductCategory::ApiProducts,
                    columns: API_PRODUCTS_COLUMNS,
                },
                CategoryRange {
                    category: ProductCategory::AddOns,
                    columns: ADD_ONS_COLUMNS,
                },
            ],
            section_rows: SECTION_ROWS.to_vec(),
        }
    }
}

impl MatrixLayout {
    /// First category whose range contains `col`, in declaration order.
    pub fn category_for_column(&self, col: usize) -> Option<ProductCategory> {
        self.category_ranges
            .iter()
            .find(|range| range.columns.contains(&col))
            .map(|range| range.category)
    }

    /// Number of columns a feature row must have for its static cells to be readable.
    pub fn required_static_columns(&self) -> usize {
        self.name_col
            .max(self.description_col)
            .max(self.link_col)
            + 1
    }
}
