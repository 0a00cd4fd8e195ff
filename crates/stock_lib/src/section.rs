//! This module contains the grouping of the selected stocks by category, and the rendering of the
//! embedded section of the documentation.

use std::fmt;

use itertools::Itertools as _;

use crate::{
    document::SECTION_HEADER,
    format::CompactStock,
    models::{StockRecord, StockType},
    selection::Selection,
};

/// The separator between two stocks of the same category.
pub const STOCK_SEPARATOR: &str = " • ";

/// The line ending the generated section, pointing to the full reference file.
pub const NOT_LISTED_LINE: &str = "**For stocks not listed:** Search \
    `references/master_stock_list.json` (all 99 SKUs). If still not found, estimate: \
    \"Typically 100# Gloss Cover runs at $0.095/sheet at 13×19.\"";

/// A category of the generated section.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Category {
    /// The cover stocks.
    Covers,
    /// The text stocks.
    Text,
    /// The offset stocks.
    Offset,
    /// The bond stocks.
    Bond,
    /// The envelopes.
    Envelopes,
}

/// The key used to sort the stocks of a category.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SortKey {
    /// Sort by brand name.
    Brand,
    /// Sort by SKU.
    Sku,
}

impl Category {
    /// The categories, in the order they appear in the generated section.
    pub const ALL: [Category; 5] = [
        Category::Covers,
        Category::Text,
        Category::Offset,
        Category::Bond,
        Category::Envelopes,
    ];

    /// Returns the category of the provided stock type, if it's part of the generated section.
    pub fn of(stock_type: &StockType) -> Option<Self> {
        match stock_type {
            StockType::Cover => Some(Category::Covers),
            StockType::Text => Some(Category::Text),
            StockType::Offset => Some(Category::Offset),
            StockType::Bond => Some(Category::Bond),
            StockType::Envelope => Some(Category::Envelopes),
            StockType::Other(_) => None,
        }
    }

    /// Returns the label of the category, as displayed in the generated section.
    pub fn label(self) -> &'static str {
        match self {
            Category::Covers => "COVERS",
            Category::Text => "TEXT",
            Category::Offset => "OFFSET",
            Category::Bond => "BOND",
            Category::Envelopes => "ENVELOPES",
        }
    }

    /// Returns the key used to sort the stocks of this category.
    pub fn sort_key(self) -> SortKey {
        match self {
            Category::Envelopes => SortKey::Sku,
            _ => SortKey::Brand,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sorts the provided stocks with the provided key.
///
/// The sort is stable, so stocks with the same key keep their order.
pub fn sort_group(stocks: &mut [&StockRecord], key: SortKey) {
    stocks.sort_by(|a, b| match key {
        SortKey::Brand => a.brand.cmp(&b.brand),
        SortKey::Sku => a.sku.cmp(&b.sku),
    });
}

/// The stocks of the generated section, grouped by category.
#[derive(Default, Debug)]
pub struct StockGroups<'a> {
    groups: [Vec<&'a StockRecord>; 5],
}

impl<'a> StockGroups<'a> {
    /// Returns the stocks of the provided category.
    #[inline]
    pub fn get(&self, category: Category) -> &[&'a StockRecord] {
        &self.groups[category.index()]
    }

    /// Returns an iterator over the categories and their stocks, in the order of the section.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[&'a StockRecord])> {
        Category::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }

    /// Returns the total amount of grouped stocks.
    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// Returns true if no stock was grouped.
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(Vec::is_empty)
    }
}

/// Groups the provided stocks by category, each group being sorted with the key of its category.
///
/// The stocks with a category that isn't part of the generated section are ignored.
pub fn group<'a, I>(stocks: I) -> StockGroups<'a>
where
    I: IntoIterator<Item = &'a StockRecord>,
{
    let mut out = StockGroups::default();

    for stock in stocks {
        match Category::of(&stock.stock_type) {
            Some(category) => out.groups[category.index()].push(stock),
            None => tracing::debug!(
                "Stock {} of type {} isn't part of any category",
                stock.sku,
                stock.stock_type
            ),
        }
    }

    for category in Category::ALL {
        sort_group(&mut out.groups[category.index()], category.sort_key());
    }

    out
}

/// Renders the embedded section of the documentation.
///
/// The section starts with the heading, followed by a line for each category (even empty ones),
/// and ends with [`NOT_LISTED_LINE`]. Each line is separated by a blank line.
pub fn render_section(groups: &StockGroups<'_>, selection: &Selection) -> String {
    let heading = format!("{SECTION_HEADER} ({})", selection.label);
    let categories = groups.iter().map(|(category, stocks)| {
        format!(
            "**{category}:** {}",
            stocks.iter().map(|s| CompactStock(s)).join(STOCK_SEPARATOR)
        )
    });

    std::iter::once(heading)
        .chain(categories)
        .chain(std::iter::once(NOT_LISTED_LINE.to_owned()))
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::{
        models::{StockRecord, StockType},
        selection::Selection,
    };

    use super::{Category, SortKey, group, render_section, sort_group};

    fn stock(brand: &str, stock_type: StockType, sku: &str) -> StockRecord {
        serde_json::from_value(serde_json::json!({
            "Brand": brand,
            "Basis_Weight": 100,
            "Finish": "Gloss",
            "Stock_Type": stock_type.as_str(),
            "SKU": sku,
            "True_Cost_Per_Press_Sheet": 0.05,
        }))
        .expect("stock should deserialize")
    }

    #[test]
    fn sort_by_brand_is_stable() {
        let stocks = [
            stock("Sterling", StockType::Cover, "1"),
            stock("Endurance", StockType::Cover, "2"),
            stock("Sterling", StockType::Cover, "0"),
            stock("Cougar", StockType::Cover, "3"),
        ];
        let mut refs = stocks.iter().collect::<Vec<_>>();

        sort_group(&mut refs, SortKey::Brand);

        let skus = refs.iter().map(|s| s.sku.as_str()).collect::<Vec<_>>();
        assert_eq!(skus, ["3", "2", "1", "0"]);
    }

    #[test]
    fn envelopes_sorted_by_sku() {
        let stocks = [
            stock("Seville", StockType::Envelope, "10766155"),
            stock("Antique", StockType::Envelope, "10766056"),
        ];

        let groups = group(&stocks);

        let skus = groups
            .get(Category::Envelopes)
            .iter()
            .map(|s| s.sku.as_str())
            .collect::<Vec<_>>();
        assert_eq!(skus, ["10766056", "10766155"]);
    }

    #[test]
    fn groups_are_disjoint_and_complete() {
        let stocks = [
            stock("A", StockType::Cover, "1"),
            stock("B", StockType::Text, "2"),
            stock("C", StockType::Offset, "3"),
            stock("D", StockType::Bond, "4"),
            stock("E", StockType::Envelope, "5"),
            stock("F", StockType::Other("Label".to_owned()), "6"),
            stock("G", StockType::Cover, "7"),
        ];

        let groups = group(&stocks);

        let mut seen = HashSet::new();
        for (category, stocks) in groups.iter() {
            for stock in stocks {
                assert_eq!(Category::of(&stock.stock_type), Some(category));
                assert!(seen.insert(stock.sku.as_str()), "{} grouped twice", stock.sku);
            }
        }
        assert_eq!(seen, HashSet::from(["1", "2", "3", "4", "5", "7"]));
        assert_eq!(groups.len(), 6);
    }

    #[test]
    fn render_empty_groups() {
        let groups = group(std::iter::empty());
        let section = render_section(&groups, &Selection::new("Top 20", ["1"]));

        assert!(groups.is_empty());
        assert_eq!(
            section,
            "### Common Paper Stocks (Top 20)\n\n\
            **COVERS:** \n\n\
            **TEXT:** \n\n\
            **OFFSET:** \n\n\
            **BOND:** \n\n\
            **ENVELOPES:** \n\n\
            **For stocks not listed:** Search `references/master_stock_list.json` (all 99 SKUs). \
            If still not found, estimate: \"Typically 100# Gloss Cover runs at $0.095/sheet at 13×19.\""
        );
    }

    #[test]
    fn render_joins_stocks_of_a_category() {
        let stocks = [
            stock("Sterling", StockType::Cover, "10735798"),
            stock("Endurance", StockType::Cover, "10735784"),
        ];

        let section = render_section(&group(&stocks), &Selection::top_20());

        assert!(section.contains(
            "**COVERS:** Endurance 100# Gloss (10735784/$0.0500) • \
            Sterling 100# Gloss (10735798/$0.0500)\n"
        ));
    }
}
