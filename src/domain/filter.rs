// src/domain/filter.rs

use clap::ValueEnum;
use std::fmt;

/// Whether the search targets sales or rentals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransactionMode {
    Buying,
    Rental,
}

impl TransactionMode {
    /// Value of the `buying_mode` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            TransactionMode::Buying => "buying",
            TransactionMode::Rental => "rental",
        }
    }
}

impl fmt::Display for TransactionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

/// Property kinds offered in the selection menu, each backed by a
/// marketplace category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PropertyType {
    Apartment,
    House,
    Commercial,
}

impl PropertyType {
    pub const ALL: [PropertyType; 3] = [
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Commercial,
    ];

    pub fn category_id(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "MLA1472",
            PropertyType::House => "MLA1466",
            PropertyType::Commercial => "MLA79242",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Departamento",
            PropertyType::House => "Casa",
            PropertyType::Commercial => "Local",
        }
    }
}

/// Inclusive price bounds. Only exists when both ends are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    min: u64,
    max: u64,
}

impl PriceRange {
    /// Inverted bounds are swapped so `min <= max` always holds.
    pub fn new(min: u64, max: u64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// A partial range means "no price filter".
    pub fn from_bounds(min: Option<u64>, max: Option<u64>) -> Option<Self> {
        match (min, max) {
            (Some(min), Some(max)) => Some(Self::new(min, max)),
            _ => None,
        }
    }

    /// Value of the `price` query parameter, e.g. `100000-250000`.
    pub fn as_query(&self) -> String {
        format!("{}-{}", self.min, self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationFilter {
    pub state_id: String,
    pub city_id: Option<String>,
}

/// Fully resolved search parameters for one snapshot run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub category_id: String,
    pub mode: TransactionMode,
    pub location: Option<LocationFilter>,
    pub price: Option<PriceRange>,
}

impl SearchFilter {
    pub fn new(category_id: impl Into<String>, mode: TransactionMode) -> Self {
        Self {
            category_id: category_id.into(),
            mode,
            location: None,
            price: None,
        }
    }

    pub fn with_location(mut self, state_id: impl Into<String>, city_id: Option<String>) -> Self {
        self.location = Some(LocationFilter {
            state_id: state_id.into(),
            city_id,
        });
        self
    }

    pub fn with_price(mut self, price: Option<PriceRange>) -> Self {
        self.price = price;
        self
    }
}
