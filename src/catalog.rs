//! Per-city food catalogue and trip cost aggregation.
//!
//! The catalogue is consumed only at the cost boundary: routing never
//! reads it. Items are identified case-insensitively within a city and
//! kept sorted by name.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub price_usd: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("price for \"{item}\" must be finite and non-negative, got {price}")]
    InvalidPrice { item: String, price: f64 },
    #[error("cost per kilometer must be finite and non-negative, got {0}")]
    InvalidCostRate(f64),
    #[error("no catalogue entry for city \"{0}\"")]
    UnknownCity(String),
    #[error("no item named \"{item}\" in \"{city}\"")]
    UnknownItem { city: String, item: String },
}

/// City name -> purchasable food items with unit prices in USD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodCatalog {
    by_city: HashMap<String, Vec<FoodItem>>,
}

impl FoodCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item to a city, or replace its price when the item already
    /// exists (case-insensitive match). Negative or non-finite prices are
    /// a contract violation.
    pub fn upsert(&mut self, city: &str, item: &str, price_usd: f64) -> Result<(), CatalogError> {
        if !price_usd.is_finite() || price_usd < 0.0 {
            return Err(CatalogError::InvalidPrice {
                item: item.to_string(),
                price: price_usd,
            });
        }
        let items = self.by_city.entry(city.to_string()).or_default();
        match items
            .iter_mut()
            .find(|entry| entry.name.eq_ignore_ascii_case(item))
        {
            Some(entry) => entry.price_usd = price_usd,
            None => {
                items.push(FoodItem {
                    name: item.to_string(),
                    price_usd,
                });
                items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            }
        }
        Ok(())
    }

    /// Remove an item from a city's list.
    pub fn remove(&mut self, city: &str, item: &str) -> Result<(), CatalogError> {
        let items = self
            .by_city
            .get_mut(city)
            .ok_or_else(|| CatalogError::UnknownCity(city.to_string()))?;
        let position = items
            .iter()
            .position(|entry| entry.name.eq_ignore_ascii_case(item))
            .ok_or_else(|| CatalogError::UnknownItem {
                city: city.to_string(),
                item: item.to_string(),
            })?;
        items.remove(position);
        Ok(())
    }

    /// Items for a city, sorted by name; empty when the city is unknown.
    pub fn items(&self, city: &str) -> &[FoodItem] {
        self.by_city.get(city).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Unit price for an item in a city (case-insensitive item match).
    pub fn price(&self, city: &str, item: &str) -> Option<f64> {
        self.by_city.get(city)?
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(item))
            .map(|entry| entry.price_usd)
    }

    /// City names in sorted order.
    pub fn cities(&self) -> Vec<&str> {
        let mut cities: Vec<&str> = self.by_city.keys().map(String::as_str).collect();
        cities.sort_unstable();
        cities
    }
}

/// A quantity of one catalogue item bought at one stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub city: String,
    pub item: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub food_usd: f64,
    pub distance_usd: f64,
    pub grand_usd: f64,
}

/// Total trip cost: food subtotals plus route distance at a per-km rate.
///
/// Purchases referencing a city or item absent from the catalogue are a
/// contract violation, not a skipped line.
pub fn trip_cost(
    purchases: &[Purchase],
    catalog: &FoodCatalog,
    total_km: f64,
    cost_per_km: f64,
) -> Result<CostBreakdown, CatalogError> {
    if !cost_per_km.is_finite() || cost_per_km < 0.0 {
        return Err(CatalogError::InvalidCostRate(cost_per_km));
    }

    let mut food_usd = 0.0;
    for purchase in purchases {
        let unit = catalog.price(&purchase.city, &purchase.item).ok_or_else(|| {
            if catalog.items(&purchase.city).is_empty() {
                CatalogError::UnknownCity(purchase.city.clone())
            } else {
                CatalogError::UnknownItem {
                    city: purchase.city.clone(),
                    item: purchase.item.clone(),
                }
            }
        })?;
        food_usd += unit * f64::from(purchase.quantity);
    }

    let distance_usd = total_km * cost_per_km;
    Ok(CostBreakdown {
        food_usd,
        distance_usd,
        grand_usd: food_usd + distance_usd,
    })
}
