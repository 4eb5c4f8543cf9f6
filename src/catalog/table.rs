//! Listings table query: free-text search, make filter, sorting.

use std::cmp::Ordering;

use crate::domain::{CarListing, SortField, SortOrder};

/// Current table view settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    /// Case-insensitive substring over make, model and year.
    pub search: String,
    /// `None` shows all makes.
    pub make: Option<String>,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            make: None,
            sort_field: SortField::Listed,
            sort_order: SortOrder::Desc,
        }
    }
}

impl ListingQuery {
    /// Clicking the current sort column flips the order; a new column starts descending.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_order = self.sort_order.flip();
        } else {
            self.sort_field = field;
            self.sort_order = SortOrder::Desc;
        }
    }

    fn matches(&self, listing: &CarListing) -> bool {
        if let Some(make) = &self.make {
            if listing.make != *make {
                return false;
            }
        }

        let q = self.search.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        listing.make.to_lowercase().contains(&q)
            || listing.model.to_lowercase().contains(&q)
            || listing.year.to_string().contains(&q)
    }

    /// Apply the query. The sort is stable, so ties keep catalog order.
    pub fn apply<'a>(&self, listings: &'a [CarListing]) -> Vec<&'a CarListing> {
        let mut rows: Vec<&CarListing> = listings.iter().filter(|l| self.matches(l)).collect();
        rows.sort_by(|a, b| {
            let ord = compare(a, b, self.sort_field);
            match self.sort_order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        rows
    }
}

fn compare(a: &CarListing, b: &CarListing, field: SortField) -> Ordering {
    match field {
        SortField::Price => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
        SortField::Year => a.year.cmp(&b.year),
        SortField::Mileage => a.mileage.partial_cmp(&b.mileage).unwrap_or(Ordering::Equal),
        SortField::Listed => a.listed_date.cmp(&b.listed_date),
    }
}
