//! Catalog data models for Vinly.
//! Mirrors the JSON snapshot exported by the backend (`wines.json`).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::rc::Rc;
use yew::Reducible;

use crate::error::{Result, VinlyError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WineType {
    Red,
    White,
    #[serde(alias = "rosé")]
    Rose,
    Sparkling,
    /// Anything the backend adds later; never fails deserialization.
    #[default]
    #[serde(other)]
    Other,
}

impl WineType {
    pub const FILTERABLE: [WineType; 4] = [
        WineType::Red,
        WineType::White,
        WineType::Rose,
        WineType::Sparkling,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WineType::Red => "Rood",
            WineType::White => "Wit",
            WineType::Rose => "Rosé",
            WineType::Sparkling => "Bubbels",
            WineType::Other => "Overig",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            WineType::White => "🥂",
            WineType::Rose => "🌸",
            WineType::Sparkling => "🍾",
            WineType::Red | WineType::Other => "🍷",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wine {
    pub id: String,
    pub name: String,
    pub supermarket: String,
    #[serde(default)]
    pub wine_type: WineType,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Legacy single image.
    #[serde(default, deserialize_with = "lenient_url")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_urls")]
    pub image_urls: Option<Vec<String>>,
    /// Older snapshots name the carousel list `images`.
    #[serde(default, deserialize_with = "lenient_urls", skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub influencer_source: Option<String>,
    #[serde(default)]
    pub post_url: Option<String>,
    #[serde(default)]
    pub date_found: Option<String>,
    #[serde(default)]
    pub in_stock: Option<bool>,
}

impl Wine {
    /// Images for the card carousel: the non-blank `image_urls`, else the
    /// non-blank `images`, else the legacy single image, else nothing.
    pub fn image_set(&self) -> ImageSet {
        for list in [&self.image_urls, &self.images] {
            let urls: Vec<String> = list
                .iter()
                .flatten()
                .map(|u| u.trim())
                .filter(|u| !u.is_empty())
                .map(str::to_owned)
                .collect();
            if !urls.is_empty() {
                return ImageSet(urls);
            }
        }
        match self.image_url.as_deref().map(str::trim) {
            Some(u) if !u.is_empty() => ImageSet(vec![u.to_owned()]),
            _ => ImageSet::default(),
        }
    }
}

// Image fields come from scraped posts; a bad entry must not sink the
// whole snapshot. Non-string items are dropped, a bare string is a list of one.
fn lenient_urls<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(url) => Some(url),
                    _ => None,
                })
                .collect(),
        ),
        Some(Value::String(url)) => Some(vec![url]),
        _ => None,
    })
}

fn lenient_url<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(url)) => Some(url),
        _ => None,
    })
}

/// Ordered, read-only image URLs of one catalog item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageSet(Vec<String>);

impl ImageSet {
    pub fn new(urls: Vec<String>) -> Self {
        Self(urls)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub supermarket: Option<String>,
    pub wine_type: Option<WineType>,
}

impl CatalogFilter {
    pub fn matches(&self, wine: &Wine) -> bool {
        self.supermarket
            .as_deref()
            .is_none_or(|s| wine.supermarket == s)
            && self.wine_type.is_none_or(|t| wine.wine_type == t)
    }
}

pub fn parse_catalog(raw: &str) -> Result<Vec<Wine>> {
    serde_json::from_str(raw).map_err(VinlyError::Catalog)
}

/// Distinct supermarket names, sorted.
pub fn supermarkets(wines: &[Wine]) -> Vec<String> {
    wines
        .iter()
        .map(|w| w.supermarket.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogState {
    pub wines: Vec<Wine>,
    pub filter: CatalogFilter,
    pub loading: bool,
    pub error: Option<String>,
    /// Bumped on every change so effects can depend on a cheap value.
    pub version: u64,
}

impl CatalogState {
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }

    pub fn visible(&self) -> Vec<Wine> {
        self.wines
            .iter()
            .filter(|w| self.filter.matches(w))
            .cloned()
            .collect()
    }

    pub fn supermarkets(&self) -> Vec<String> {
        supermarkets(&self.wines)
    }
}

#[derive(Clone, Debug)]
pub enum CatalogAction {
    Loaded(Vec<Wine>),
    Failed(String),
    SelectSupermarket(Option<String>),
    SelectType(Option<WineType>),
}

impl Reducible for CatalogState {
    type Action = CatalogAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use CatalogAction::*;
        let mut new = (*self).clone();
        match action {
            Loaded(wines) => {
                new.wines = wines;
                new.loading = false;
                new.error = None;
            }
            Failed(msg) => {
                new.wines.clear();
                new.loading = false;
                new.error = Some(msg);
            }
            SelectSupermarket(s) => {
                if new.filter.supermarket == s {
                    return self;
                }
                new.filter.supermarket = s;
            }
            SelectType(t) => {
                if new.filter.wine_type == t {
                    return self;
                }
                new.filter.wine_type = t;
            }
        }
        new.version = new.version.wrapping_add(1);
        Rc::new(new)
    }
}
