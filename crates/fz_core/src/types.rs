use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Culture {
    #[serde(rename = "culture_code")]
    pub code: String,
    #[serde(rename = "display_culture_name")]
    pub display_name: String,
    #[serde(rename = "english_culture_name")]
    pub english_name: String,
    pub language_code: String,
}

impl Culture {
    /// A culture known only by its code, enough to filter a query.
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    #[serde(rename = "category_id")]
    pub id: u32,
    #[serde(rename = "display_category_name")]
    pub display_name: String,
    #[serde(rename = "english_category_name")]
    pub english_name: String,
    #[serde(rename = "url_category_name")]
    pub url_name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subcategories: Vec<Subcategory>,
}

impl Category {
    pub fn with_id(id: u32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Subcategory {
    #[serde(rename = "subcategory_id")]
    pub id: u32,
    /// Id of the owning category.
    pub category_id: u32,
    #[serde(rename = "display_subcategory_name")]
    pub display_name: String,
    #[serde(rename = "english_subcategory_name")]
    pub english_name: String,
    #[serde(rename = "url_subcategory_name")]
    pub url_name: String,
}

impl Subcategory {
    pub fn with_id(id: u32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Enclosure {
    pub length: Option<u64>,
    pub media_type: Option<String>,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub summary: Option<String>,
    pub publish_date: Option<String>,
    pub source: Option<String>,
    pub source_url: Option<String>,
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enclosures: Vec<Enclosure>,
}

impl Article {
    /// Parses `publish_date`, which the API sends in RFC 2822 form.
    pub fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        self.publish_date
            .as_deref()
            .and_then(|date| DateTime::parse_from_rfc2822(date.trim()).ok())
    }
}

/// Response wrapper for article listings and searches.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Articles {
    pub articles: Vec<Article>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub syndication_url: Option<String>,
}

impl Articles {
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Article> {
        self.articles.iter()
    }
}

impl IntoIterator for Articles {
    type Item = Article;
    type IntoIter = std::vec::IntoIter<Article>;

    fn into_iter(self) -> Self::IntoIter {
        self.articles.into_iter()
    }
}

/// Server-side ordering of article results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleOrder {
    None,
    Relevance,
    Date,
    Latest,
    Popular,
}

impl ArticleOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleOrder::None => "none",
            ArticleOrder::Relevance => "relevance",
            ArticleOrder::Date => "date",
            ArticleOrder::Latest => "latest",
            ArticleOrder::Popular => "popular",
        }
    }
}

/// Server-side ordering of category and subcategory listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryOrder {
    #[default]
    None,
    Popular,
    Alpha,
}

impl CategoryOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryOrder::None => "none",
            CategoryOrder::Popular => "popular",
            CategoryOrder::Alpha => "alpha",
        }
    }
}

impl fmt::Display for ArticleOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CategoryOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(ArticleOrder::None),
            "relevance" => Ok(ArticleOrder::Relevance),
            "date" => Ok(ArticleOrder::Date),
            "latest" => Ok(ArticleOrder::Latest),
            "popular" => Ok(ArticleOrder::Popular),
            other => Err(Error::Validation(format!("Unknown article order: {}", other))),
        }
    }
}

impl FromStr for CategoryOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(CategoryOrder::None),
            "popular" => Ok(CategoryOrder::Popular),
            "alpha" => Ok(CategoryOrder::Alpha),
            other => Err(Error::Validation(format!("Unknown category order: {}", other))),
        }
    }
}
