use serde::{Deserialize, Serialize};

/// Catalog categories. The wire labels match what the browser client sends
/// as filter values, so Display/FromStr round-trip them exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Clothing,
    Books,
    #[serde(rename = "Home & Garden")]
    HomeAndGarden,
    Sports,
    Beauty,
    Toys,
    Other,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Electronics => write!(f, "Electronics"),
            Category::Clothing => write!(f, "Clothing"),
            Category::Books => write!(f, "Books"),
            Category::HomeAndGarden => write!(f, "Home & Garden"),
            Category::Sports => write!(f, "Sports"),
            Category::Beauty => write!(f, "Beauty"),
            Category::Toys => write!(f, "Toys"),
            Category::Other => write!(f, "Other"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Electronics" => Ok(Category::Electronics),
            "Clothing" => Ok(Category::Clothing),
            "Books" => Ok(Category::Books),
            "Home & Garden" => Ok(Category::HomeAndGarden),
            "Sports" => Ok(Category::Sports),
            "Beauty" => Ok(Category::Beauty),
            "Toys" => Ok(Category::Toys),
            "Other" => Ok(Category::Other),
            _ => Err(format!("Invalid category: {}", s)),
        }
    }
}

/// Sort key for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductSort {
    #[default]
    CreatedAt,
    Price,
    Rating,
    Name,
}

impl std::str::FromStr for ProductSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(ProductSort::CreatedAt),
            "price" => Ok(ProductSort::Price),
            "rating" => Ok(ProductSort::Rating),
            "name" => Ok(ProductSort::Name),
            _ => Err(format!("Invalid sort key: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Invalid sort order: {}", s)),
        }
    }
}
