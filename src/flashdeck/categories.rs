//! # Category projection
//!
//! Pure functions over the catalog and the favorites set. Nothing here is stored;
//! callers recompute whenever they need fresh numbers.
//!
//! The category list is fixed. Its first entry is the virtual favorites category,
//! which no card carries: its members come from the [`FavoritesSet`].

use crate::catalog::CardCatalog;
use crate::favorites::FavoritesSet;
use crate::model::Card;

/// Display label of the virtual favorites category.
pub const FAVORITES_LABEL: &str = "Favoriler";

/// Alternate spelling accepted when parsing user input.
pub const FAVORITES_ALIAS: &str = "Favorites";

/// Real card categories, in display order.
pub const CATEGORIES: [&str; 10] = [
    "Tarih",
    "Coğrafya",
    "Vatandaşlık",
    "Güncel Bilgiler",
    "Spor",
    "Sinema",
    "Bilim",
    "Teknoloji",
    "Edebiyat",
    "Sanat",
];

/// What a user can open: the favorites projection or one category label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryView {
    Favorites,
    Category(String),
}

impl CategoryView {
    /// Parse a label. Matching is exact and case-sensitive.
    pub fn from_label(label: &str) -> Self {
        if label == FAVORITES_LABEL || label == FAVORITES_ALIAS {
            CategoryView::Favorites
        } else {
            CategoryView::Category(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryView::Favorites => FAVORITES_LABEL,
            CategoryView::Category(name) => name,
        }
    }

    /// The virtual category followed by every real one.
    pub fn enumerated() -> impl Iterator<Item = CategoryView> {
        std::iter::once(CategoryView::Favorites)
            .chain(CATEGORIES.into_iter().map(|c| CategoryView::Category(c.to_string())))
    }
}

impl std::fmt::Display for CategoryView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub view: CategoryView,
    pub count: usize,
}

impl CategoryCount {
    /// Empty categories are listed but should not be opened.
    pub fn is_selectable(&self) -> bool {
        self.count > 0
    }
}

/// Per-category card counts, in enumerated order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCounts(Vec<CategoryCount>);

impl CategoryCounts {
    pub fn get(&self, view: &CategoryView) -> Option<usize> {
        self.0.iter().find(|c| &c.view == view).map(|c| c.count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryCount> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Favorites count the whole set, dangling ids included; every other category
/// counts cards whose label matches exactly.
pub fn counts_by_category(catalog: &CardCatalog, favorites: &FavoritesSet) -> CategoryCounts {
    let counts = CategoryView::enumerated()
        .map(|view| {
            let count = match &view {
                CategoryView::Favorites => favorites.len(),
                CategoryView::Category(name) => catalog
                    .all()
                    .iter()
                    .filter(|card| &card.category == name)
                    .count(),
            };
            CategoryCount { view, count }
        })
        .collect();
    CategoryCounts(counts)
}

/// Cards to show for `selected`, in catalog order. Nothing selected shows nothing.
pub fn cards_for_view<'a>(
    catalog: &'a CardCatalog,
    favorites: &FavoritesSet,
    selected: Option<&CategoryView>,
) -> Vec<&'a Card> {
    let Some(selected) = selected else {
        return Vec::new();
    };
    catalog
        .all()
        .iter()
        .filter(|card| match selected {
            CategoryView::Favorites => favorites.contains(&card.id),
            CategoryView::Category(name) => &card.category == name,
        })
        .collect()
}
