//! Pure request composition: every endpoint is described as a relative path plus
//! an ordered list of query parameters, independent of any transport.

use chrono::NaiveDateTime;
use fz_core::{Category, CategoryOrder, Culture, Result, Subcategory};
use url::Url;

use crate::query::ArticleQuery;

const SINCE_FORMAT: &str = "%Y-%m-%d";

/// A relative request path and its query parameters, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    segments: Vec<String>,
    params: Vec<(&'static str, String)>,
}

impl RequestTarget {
    fn new(segments: Vec<String>, rules: Vec<(&'static str, Option<String>)>) -> Self {
        let params = rules
            .into_iter()
            .filter_map(|(name, value)| value.map(|value| (name, value)))
            .collect();
        Self { segments, params }
    }

    /// Path relative to the base URL, e.g. `categories/7/articles.json`.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Form-encoded query string without the leading `?`.
    pub fn query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter().map(|(k, v)| (*k, v.as_str())))
            .finish()
    }

    /// Resolves the target against `base`, which must end with `/`.
    pub fn to_url(&self, base: &Url) -> Result<Url> {
        let mut url = base.join(&self.path())?;
        if self.params.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&self.query_string()));
        }
        Ok(url)
    }
}

pub fn cultures_request() -> RequestTarget {
    RequestTarget::new(vec!["cultures.json".to_string()], Vec::new())
}

pub fn categories_request(culture: Option<&Culture>, order: Option<CategoryOrder>) -> RequestTarget {
    RequestTarget::new(vec!["categories.json".to_string()], listing_rules(culture, order))
}

pub fn subcategories_request(
    category: Option<&Category>,
    culture: Option<&Culture>,
    order: Option<CategoryOrder>,
) -> RequestTarget {
    let mut segments = category_segments(category, None);
    segments.push("subcategories.json".to_string());
    RequestTarget::new(segments, listing_rules(culture, order))
}

/// Describes an article listing (`search` is `None`) or a free-text search.
///
/// The culture filter only applies without a category; with one, the server
/// derives the culture from the category.
pub fn articles_request(query: &ArticleQuery, search: Option<&str>, client_source: &str) -> RequestTarget {
    let mut segments = category_segments(query.get_category(), query.get_subcategory());
    match search {
        Some(_) => {
            segments.push("articles".to_string());
            segments.push("search.json".to_string());
        }
        None => segments.push("articles.json".to_string()),
    }

    let culture = match query.get_category() {
        Some(_) => None,
        None => query.get_culture(),
    };

    let rules = vec![
        ("q", search.map(str::to_string)),
        ("count", (query.get_count() != 0).then(|| query.get_count().to_string())),
        ("since", query.get_since().map(format_since)),
        ("order", query.get_order().map(|order| order.as_str().to_string())),
        ("title_only", Some(if query.is_title_only() { "1" } else { "0" }.to_string())),
        ("clientSource", Some(client_source.to_string())),
        ("culture_code", culture.map(|culture| culture.code.clone())),
    ];
    RequestTarget::new(segments, rules)
}

/// Formats the lower date bound; the time of day is dropped.
pub fn format_since(since: NaiveDateTime) -> String {
    since.format(SINCE_FORMAT).to_string()
}

fn listing_rules(culture: Option<&Culture>, order: Option<CategoryOrder>) -> Vec<(&'static str, Option<String>)> {
    vec![
        ("culture_code", culture.map(|culture| culture.code.clone())),
        ("order", order.map(|order| order.as_str().to_string())),
    ]
}

fn category_segments(category: Option<&Category>, subcategory: Option<&Subcategory>) -> Vec<String> {
    let mut segments = Vec::new();
    if let Some(category) = category {
        segments.push("categories".to_string());
        segments.push(category.id.to_string());
        if let Some(subcategory) = subcategory {
            segments.push("subcategories".to_string());
            segments.push(subcategory.id.to_string());
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fz_core::ArticleOrder;

    const SOURCE: &str = "fz-client";

    fn base() -> Url {
        Url::parse("http://api.feedzilla.com/v1/").unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn test_cultures_request() {
        let target = cultures_request();
        assert_eq!(target.path(), "cultures.json");
        assert!(target.params().is_empty());
        assert_eq!(target.to_url(&base()).unwrap().as_str(), "http://api.feedzilla.com/v1/cultures.json");
    }

    #[test]
    fn test_categories_request() {
        let target = categories_request(None, None);
        assert_eq!(target.path(), "categories.json");
        assert!(target.params().is_empty());

        let culture = Culture::with_code("en_us");
        let target = categories_request(Some(&culture), Some(CategoryOrder::Popular));
        assert_eq!(target.query_string(), "culture_code=en_us&order=popular");
    }

    #[test]
    fn test_subcategories_request_paths() {
        assert_eq!(subcategories_request(None, None, None).path(), "subcategories.json");

        let category = Category::with_id(26);
        let target = subcategories_request(Some(&category), None, Some(CategoryOrder::None));
        assert_eq!(target.path(), "categories/26/subcategories.json");
        assert_eq!(target.query_string(), "order=none");
    }

    #[test]
    fn test_category_articles_request() {
        let query = ArticleQuery::new()
            .category_id(7)
            .count(10)
            .unwrap()
            .title_only(true)
            .order(ArticleOrder::Latest);
        let target = articles_request(&query, None, SOURCE);

        assert_eq!(target.path(), "categories/7/articles.json");
        assert_eq!(target.query_string(), "count=10&order=latest&title_only=1&clientSource=fz-client");
    }

    #[test]
    fn test_search_without_category() {
        let target = articles_request(&ArticleQuery::new(), Some("election"), SOURCE);
        assert_eq!(
            target.to_url(&base()).unwrap().as_str(),
            "http://api.feedzilla.com/v1/articles/search.json?q=election&title_only=0&clientSource=fz-client"
        );
    }

    #[test]
    fn test_subcategory_path_requires_category() {
        let query = ArticleQuery::new().subcategory_id(1263);
        let target = articles_request(&query, Some("vote"), SOURCE);
        assert_eq!(target.path(), "articles/search.json");

        let query = query.category_id(7);
        let target = articles_request(&query, Some("vote"), SOURCE);
        assert_eq!(target.path(), "categories/7/subcategories/1263/articles/search.json");
    }

    #[test]
    fn test_culture_dropped_when_category_set() {
        let query = ArticleQuery::new().culture_code("en_us").category_id(7);
        let target = articles_request(&query, None, SOURCE);
        assert_eq!(target.param("culture_code"), None);

        let target = articles_request(&query, Some("budget"), SOURCE);
        assert_eq!(target.param("culture_code"), None);
    }

    #[test]
    fn test_culture_sent_without_category() {
        let query = ArticleQuery::new().culture_code("es_ar");
        let target = articles_request(&query, Some("futbol"), SOURCE);
        assert_eq!(target.param("culture_code"), Some("es_ar"));
        assert_eq!(target.params().last().map(|(k, _)| *k), Some("culture_code"));
    }

    #[test]
    fn test_since_drops_time_of_day() {
        assert_eq!(format_since(at(2024, 3, 5, 0, 0)), "2024-03-05");
        assert_eq!(format_since(at(2024, 3, 5, 23, 59)), "2024-03-05");

        let query = ArticleQuery::new().category_id(1).since(at(1999, 12, 31, 18, 30));
        assert_eq!(articles_request(&query, None, SOURCE).param("since"), Some("1999-12-31"));
    }

    #[test]
    fn test_zero_count_is_omitted() {
        let query = ArticleQuery::new().category_id(1).count(0).unwrap();
        assert_eq!(articles_request(&query, None, SOURCE).param("count"), None);
    }

    #[test]
    fn test_setter_order_does_not_matter() {
        let culture = Culture::with_code("en_gb");
        let a = ArticleQuery::new()
            .category_id(3)
            .subcategory_id(9)
            .count(25)
            .unwrap()
            .since(at(2020, 1, 2, 3, 4))
            .order(ArticleOrder::Popular)
            .title_only(true)
            .culture(culture.clone());
        let b = ArticleQuery::new()
            .culture(culture)
            .title_only(true)
            .order(ArticleOrder::Popular)
            .since(at(2020, 1, 2, 3, 4))
            .count(25)
            .unwrap()
            .subcategory_id(9)
            .category_id(3);

        assert_eq!(articles_request(&a, None, SOURCE), articles_request(&b, None, SOURCE));
        assert_eq!(articles_request(&a, Some("x"), SOURCE), articles_request(&b, Some("x"), SOURCE));
    }

    #[test]
    fn test_search_text_is_encoded() {
        let target = articles_request(&ArticleQuery::new(), Some("rock & roll"), SOURCE);
        assert_eq!(target.param("q"), Some("rock & roll"));
        assert!(target.query_string().starts_with("q=rock+%26+roll&"));
    }
}
