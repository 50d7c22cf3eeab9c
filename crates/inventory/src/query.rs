//! Filtered, sorted views over a collection snapshot.
//!
//! The engine works on a slice handed to it and never touches the store, so
//! it can be called any number of times against the same snapshot.
//!
//! Relevance ranking, best first:
//!
//! | rank | match                                   |
//! |------|-----------------------------------------|
//! | 0    | name equals the term                    |
//! | 1    | name starts with the term               |
//! | 2    | name contains the term                  |
//! | 3    | key contains the term                   |
//! | 4    | only description or category contain it |
//!
//! Equal ranks keep snapshot order.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use jbson_core::{DomainError, DomainResult, Entity, Field};

use crate::config::InventoryConfig;
use crate::item::{Category, Item};
use crate::validation::required_text;

/// Which fields the search term is matched against.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldScope {
    #[default]
    Any,
    Name,
    Key,
}

impl FromStr for FieldScope {
    type Err = DomainError;

    /// Accepts the search form's labels as well as the short names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" | "all" | "any (all fields)" => Ok(FieldScope::Any),
            "name" | "product name" => Ok(FieldScope::Name),
            "key" | "id" | "sku" | "product id" => Ok(FieldScope::Key),
            _ => Err(DomainError::invalid(Field::SearchScope)),
        }
    }
}

/// Category restriction; `All` is the "All Categories" entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn admits(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(value: Category) -> Self {
        CategoryFilter::Only(value)
    }
}

impl FromStr for CategoryFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") || s.eq_ignore_ascii_case("all categories") {
            return Ok(CategoryFilter::All);
        }
        s.parse::<Category>().map(CategoryFilter::Only)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Relevance,
    /// Ascending unit price.
    Price,
    /// Ascending name, ignoring case.
    Name,
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relevance" => Ok(SortKey::Relevance),
            "price" => Ok(SortKey::Price),
            "name" | "name (a-z)" => Ok(SortKey::Name),
            _ => Err(DomainError::invalid(Field::SortOrder)),
        }
    }
}

/// One search request, as assembled from the search form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySpec {
    pub term: String,
    pub scope: FieldScope,
    pub category: CategoryFilter,
    pub in_stock_only: bool,
    pub include_inactive: bool,
    pub sort: SortKey,
}

impl QuerySpec {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    pub fn scope(mut self, scope: FieldScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub fn in_stock_only(mut self, yes: bool) -> Self {
        self.in_stock_only = yes;
        self
    }

    pub fn include_inactive(mut self, yes: bool) -> Self {
        self.include_inactive = yes;
        self
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    fn admits(&self, item: &Item) -> bool {
        self.category.admits(item.category)
            && (!self.in_stock_only || item.in_stock())
            && (self.include_inactive || item.status.is_active())
    }
}

/// Stateless query evaluator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct QueryEngine {
    min_term_len: usize,
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_TERM_LEN)
    }
}

impl QueryEngine {
    pub const DEFAULT_MIN_TERM_LEN: usize = 2;

    pub fn new(min_term_len: usize) -> Self {
        Self { min_term_len }
    }

    pub fn from_config(config: &InventoryConfig) -> Self {
        Self::new(config.min_search_term_len)
    }

    /// Reject a missing or too-short term before anything is filtered.
    pub fn check_term<'a>(&self, spec: &'a QuerySpec) -> DomainResult<&'a str> {
        let term = required_text(&spec.term, Field::SearchTerm)?;
        if term.chars().count() < self.min_term_len {
            return Err(DomainError::invalid(Field::SearchTerm));
        }
        Ok(term)
    }

    pub fn query(&self, snapshot: &[Item], spec: &QuerySpec) -> DomainResult<Vec<Item>> {
        let needle = self.check_term(spec)?.to_lowercase();

        let mut hits: Vec<(u8, &Item)> = snapshot
            .iter()
            .filter(|item| spec.admits(item))
            .filter_map(|item| match_rank(item, &needle, spec.scope).map(|rank| (rank, item)))
            .collect();

        // All three sorts are stable.
        match spec.sort {
            SortKey::Relevance => hits.sort_by_key(|(rank, _)| *rank),
            SortKey::Price => hits.sort_by(|(_, a), (_, b)| a.unit_price.cmp(&b.unit_price)),
            SortKey::Name => hits.sort_by_cached_key(|(_, item)| item.name.to_lowercase()),
        }

        tracing::debug!(
            term = %needle,
            scope = ?spec.scope,
            scanned = snapshot.len(),
            matched = hits.len(),
            "evaluated inventory query"
        );

        Ok(hits.into_iter().map(|(_, item)| item.clone()).collect())
    }
}

/// Evaluate `spec` against `snapshot` with the default minimum term length.
pub fn query(snapshot: &[Item], spec: &QuerySpec) -> DomainResult<Vec<Item>> {
    QueryEngine::default().query(snapshot, spec)
}

/// Relevance rank of `item` for a lower-cased `needle`, or `None` if it does not match.
fn match_rank(item: &Item, needle: &str, scope: FieldScope) -> Option<u8> {
    let name = item.name.to_lowercase();
    let name_rank = if name == needle {
        Some(0)
    } else if name.starts_with(needle) {
        Some(1)
    } else if name.contains(needle) {
        Some(2)
    } else {
        None
    };
    let key_rank = item
        .id()
        .as_str()
        .to_lowercase()
        .contains(needle)
        .then_some(3);

    match scope {
        FieldScope::Name => name_rank,
        FieldScope::Key => key_rank,
        FieldScope::Any => name_rank.or(key_rank).or_else(|| {
            let in_description = item.description.to_lowercase().contains(needle);
            let in_category = item.category.label().to_lowercase().contains(needle);
            (in_description || in_category).then_some(4)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemStatus;
    use jbson_core::ItemKey;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn item(key: &str, name: &str, qty: u32, cents: i64, category: Category) -> Item {
        Item {
            key: ItemKey::new(key),
            name: name.to_string(),
            quantity: qty,
            unit_price: Decimal::new(cents, 2),
            description: String::new(),
            category,
            status: ItemStatus::Active,
        }
    }

    fn keys(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.key.as_str()).collect()
    }

    #[test]
    fn term_shorter_than_two_characters_is_rejected() {
        let snapshot = vec![item("SKU1", "Hammer", 1, 100, Category::Tools)];

        assert_eq!(
            query(&snapshot, &QuerySpec::new("")).unwrap_err(),
            DomainError::MissingField(Field::SearchTerm)
        );
        assert_eq!(
            query(&snapshot, &QuerySpec::new("  h ")).unwrap_err(),
            DomainError::InvalidFormat(Field::SearchTerm)
        );
        assert_eq!(keys(&query(&snapshot, &QuerySpec::new("ha")).unwrap()), ["SKU1"]);
    }

    #[test]
    fn in_stock_and_category_filters() {
        let snapshot = vec![
            item("A", "Hammer", 5, 1299, Category::Hardware),
            item("B", "Hammer Drill", 0, 420000, Category::Tools),
        ];

        let in_stock = query(&snapshot, &QuerySpec::new("hammer").in_stock_only(true)).unwrap();
        assert_eq!(keys(&in_stock), ["A"]);

        let tools = query(&snapshot, &QuerySpec::new("hammer").category(Category::Tools)).unwrap();
        assert_eq!(keys(&tools), ["B"]);
    }

    #[test]
    fn price_sort_is_ascending() {
        let snapshot = vec![
            item("H", "Hammer set", 1, 1299, Category::Tools),
            item("S", "Screw set", 1, 599, Category::Hardware),
            item("D", "Driver set", 1, 2450, Category::Tools),
        ];

        let spec = QuerySpec::new("set").sort(SortKey::Price);
        let prices: Vec<Decimal> = query(&snapshot, &spec)
            .unwrap()
            .into_iter()
            .map(|i| i.unit_price)
            .collect();
        assert_eq!(
            prices,
            [Decimal::new(599, 2), Decimal::new(1299, 2), Decimal::new(2450, 2)]
        );
    }

    #[test]
    fn name_sort_ignores_case() {
        let snapshot = vec![
            item("1", "paint roller", 1, 100, Category::Paint),
            item("2", "Paint brush", 1, 100, Category::Paint),
            item("3", "PAINT TRAY", 1, 100, Category::Paint),
        ];
        let result = query(&snapshot, &QuerySpec::new("paint").sort(SortKey::Name)).unwrap();
        assert_eq!(keys(&result), ["2", "1", "3"]);
    }

    #[test]
    fn relevance_ranks_name_matches_before_other_fields() {
        let mut described = item("SKU4", "Nails", 1, 100, Category::Hardware);
        described.description = "Use with a bar hammer".to_string();
        let snapshot = vec![
            described,
            item("SKU3", "Sledge Bar", 1, 100, Category::Tools),
            item("BAR01", "Pliers", 1, 100, Category::Tools),
            item("SKU2", "Bar clamp", 1, 100, Category::Tools),
            item("SKU1", "bar", 1, 100, Category::Tools),
        ];

        let result = query(&snapshot, &QuerySpec::new("Bar")).unwrap();
        assert_eq!(keys(&result), ["SKU1", "SKU2", "SKU3", "BAR01", "SKU4"]);
    }

    #[test]
    fn scope_limits_matched_fields() {
        let snapshot = vec![
            item("HAM01", "Pliers", 1, 100, Category::Tools),
            item("SKU2", "Hammer", 1, 100, Category::Tools),
        ];

        let by_key = query(&snapshot, &QuerySpec::new("ham").scope(FieldScope::Key)).unwrap();
        assert_eq!(keys(&by_key), ["HAM01"]);

        let by_name = query(&snapshot, &QuerySpec::new("ham").scope(FieldScope::Name)).unwrap();
        assert_eq!(keys(&by_name), ["SKU2"]);

        let any = query(&snapshot, &QuerySpec::new("ham")).unwrap();
        assert_eq!(keys(&any), ["SKU2", "HAM01"]);
    }

    #[test]
    fn category_label_matches_in_any_scope() {
        let snapshot = vec![item("SKU1", "Pipe wrench", 1, 100, Category::Plumbing)];
        assert_eq!(keys(&query(&snapshot, &QuerySpec::new("plumb")).unwrap()), ["SKU1"]);
    }

    #[test]
    fn discontinued_items_need_include_inactive() {
        let mut old = item("OLD", "Hammer (old)", 3, 100, Category::Tools);
        old.status = ItemStatus::Discontinued;
        let snapshot = vec![old, item("NEW", "Hammer", 3, 100, Category::Tools)];

        assert_eq!(keys(&query(&snapshot, &QuerySpec::new("hammer")).unwrap()), ["NEW"]);
        let all = query(&snapshot, &QuerySpec::new("hammer").include_inactive(true)).unwrap();
        assert_eq!(keys(&all), ["NEW", "OLD"]);
    }

    #[test]
    fn form_labels_parse() {
        assert_eq!("Any (All Fields)".parse::<FieldScope>().unwrap(), FieldScope::Any);
        assert_eq!("Product ID".parse::<FieldScope>().unwrap(), FieldScope::Key);
        assert_eq!("All Categories".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "Electrical".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Electrical)
        );
        assert_eq!("Name (A-Z)".parse::<SortKey>().unwrap(), SortKey::Name);
    }

    #[test]
    fn unknown_choices_name_their_own_field() {
        let err = "Popularity".parse::<SortKey>().unwrap_err();
        assert_eq!(err, DomainError::InvalidFormat(Field::SortOrder));
        assert_eq!(err.user_message(), "Error: Sort by is not valid.");

        let err = "Barcode".parse::<FieldScope>().unwrap_err();
        assert_eq!(err, DomainError::InvalidFormat(Field::SearchScope));
        assert_ne!(err.user_message(), "Error: Search term is too short.");
    }

    #[test]
    fn engine_honours_configured_minimum() {
        let engine = QueryEngine::new(4);
        let snapshot = vec![item("SKU1", "Hammer", 1, 100, Category::Tools)];
        assert!(engine.query(&snapshot, &QuerySpec::new("ham")).is_err());
        assert_eq!(engine.query(&snapshot, &QuerySpec::new("hamm")).unwrap().len(), 1);
    }

    fn arb_item() -> impl Strategy<Value = Item> {
        (
            "[A-Z]{3}[0-9]{2}",
            "[a-z]{1,8}( [a-z]{1,8})?",
            0u32..20,
            1i64..100_000,
            prop::sample::select(Category::ALL.to_vec()),
            any::<bool>(),
        )
            .prop_map(|(key, name, qty, cents, category, active)| Item {
                key: ItemKey::new(key),
                name,
                quantity: qty,
                unit_price: Decimal::new(cents, 2),
                description: String::new(),
                category,
                status: if active { ItemStatus::Active } else { ItemStatus::Discontinued },
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: every result satisfies the filters and the snapshot is untouched.
        #[test]
        fn results_respect_filters(
            snapshot in prop::collection::vec(arb_item(), 0..30),
            term in "[a-z]{2}",
            in_stock_only in any::<bool>(),
            include_inactive in any::<bool>(),
        ) {
            let before = snapshot.clone();
            let spec = QuerySpec::new(term.clone())
                .in_stock_only(in_stock_only)
                .include_inactive(include_inactive)
                .sort(SortKey::Price);

            let result = query(&snapshot, &spec).unwrap();

            prop_assert_eq!(&snapshot, &before);
            for item in &result {
                prop_assert!(!in_stock_only || item.quantity > 0);
                prop_assert!(include_inactive || item.status.is_active());
            }
            for pair in result.windows(2) {
                prop_assert!(pair[0].unit_price <= pair[1].unit_price);
            }
        }
    }
}
