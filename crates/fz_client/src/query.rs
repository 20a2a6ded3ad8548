use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use fz_core::{ArticleOrder, Articles, Category, Culture, Error, Result, Subcategory};

use crate::client::ApiClient;

pub const MAX_COUNT: u8 = 100;

/// Filters for an article listing or search. A `count` of 0 leaves the
/// result size to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    category: Option<Category>,
    subcategory: Option<Subcategory>,
    count: u8,
    since: Option<NaiveDateTime>,
    order: Option<ArticleOrder>,
    title_only: bool,
    culture: Option<Culture>,
}

impl ArticleQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn category_id(self, id: u32) -> Self {
        self.category(Category::with_id(id))
    }

    /// Only used in the request path when a category is also set.
    pub fn subcategory(mut self, subcategory: Subcategory) -> Self {
        self.subcategory = Some(subcategory);
        self
    }

    pub fn subcategory_id(self, id: u32) -> Self {
        self.subcategory(Subcategory::with_id(id))
    }

    /// Accepts 0..=100; anything else is rejected before a request is built.
    pub fn count(mut self, count: i64) -> Result<Self> {
        self.count = u8::try_from(count)
            .ok()
            .filter(|count| *count <= MAX_COUNT)
            .ok_or_else(|| {
                Error::Validation(format!("count must be between 0 and {} (inclusive), got {}", MAX_COUNT, count))
            })?;
        Ok(self)
    }

    /// Lower bound in local wall-clock time; only the date is sent.
    pub fn since(mut self, since: NaiveDateTime) -> Self {
        self.since = Some(since);
        self
    }

    pub fn since_date(self, date: NaiveDate) -> Self {
        self.since(date.and_time(NaiveTime::MIN))
    }

    /// Converts an instant to the local timezone before taking its date.
    pub fn since_instant<Tz: TimeZone>(self, instant: DateTime<Tz>) -> Self {
        self.since(instant.with_timezone(&Local).naive_local())
    }

    pub fn order(mut self, order: ArticleOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn title_only(mut self, title_only: bool) -> Self {
        self.title_only = title_only;
        self
    }

    /// Ignored by the server once a category is set.
    pub fn culture(mut self, culture: Culture) -> Self {
        self.culture = Some(culture);
        self
    }

    pub fn culture_code(self, code: impl Into<String>) -> Self {
        self.culture(Culture::with_code(code))
    }

    pub fn get_category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn get_subcategory(&self) -> Option<&Subcategory> {
        self.subcategory.as_ref()
    }

    pub fn get_count(&self) -> u8 {
        self.count
    }

    pub fn get_since(&self) -> Option<NaiveDateTime> {
        self.since
    }

    pub fn get_order(&self) -> Option<ArticleOrder> {
        self.order
    }

    pub fn is_title_only(&self) -> bool {
        self.title_only
    }

    pub fn get_culture(&self) -> Option<&Culture> {
        self.culture.as_ref()
    }
}

/// Accumulates filters and issues exactly one article request against a client.
#[derive(Debug, Clone)]
pub struct QueryBuilder<'a> {
    client: &'a ApiClient,
    query: ArticleQuery,
}

impl<'a> QueryBuilder<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            query: ArticleQuery::new(),
        }
    }

    pub fn filter(&self) -> &ArticleQuery {
        &self.query
    }

    pub fn into_filter(self) -> ArticleQuery {
        self.query
    }

    pub fn category(mut self, category: Category) -> Self {
        self.query = self.query.category(category);
        self
    }

    pub fn category_id(mut self, id: u32) -> Self {
        self.query = self.query.category_id(id);
        self
    }

    pub fn subcategory(mut self, subcategory: Subcategory) -> Self {
        self.query = self.query.subcategory(subcategory);
        self
    }

    pub fn subcategory_id(mut self, id: u32) -> Self {
        self.query = self.query.subcategory_id(id);
        self
    }

    pub fn count(mut self, count: i64) -> Result<Self> {
        self.query = self.query.count(count)?;
        Ok(self)
    }

    pub fn since(mut self, since: NaiveDateTime) -> Self {
        self.query = self.query.since(since);
        self
    }

    pub fn since_date(mut self, date: NaiveDate) -> Self {
        self.query = self.query.since_date(date);
        self
    }

    pub fn since_instant<Tz: TimeZone>(mut self, instant: DateTime<Tz>) -> Self {
        self.query = self.query.since_instant(instant);
        self
    }

    pub fn order(mut self, order: ArticleOrder) -> Self {
        self.query = self.query.order(order);
        self
    }

    pub fn title_only(mut self, title_only: bool) -> Self {
        self.query = self.query.title_only(title_only);
        self
    }

    pub fn culture(mut self, culture: Culture) -> Self {
        self.query = self.query.culture(culture);
        self
    }

    pub fn culture_code(mut self, code: impl Into<String>) -> Self {
        self.query = self.query.culture_code(code);
        self
    }

    /// Lists articles under the configured category.
    pub fn articles(self) -> Result<Articles> {
        if self.query.category.is_none() {
            return Err(Error::MissingCategory);
        }
        self.client.query_articles(&self.query, None)
    }

    /// Free-text search, narrowed by whatever category filters were set.
    pub fn search(self, text: &str) -> Result<Articles> {
        self.client.query_articles(&self.query, Some(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_count_bounds() {
        for count in [0, 1, 50, 99, 100] {
            let query = ArticleQuery::new().count(count).unwrap();
            assert_eq!(i64::from(query.get_count()), count);
        }
        for count in [-1, 101, 150, 256, i64::MIN, i64::MAX] {
            let err = ArticleQuery::new().count(count).unwrap_err();
            assert!(err.is_validation(), "{} should be rejected", count);
        }
    }

    #[test]
    fn test_rejected_count_keeps_nothing() {
        let result = ArticleQuery::new().category_id(7).count(150);
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_defaults() {
        let query = ArticleQuery::new();
        assert!(query.get_category().is_none());
        assert!(query.get_subcategory().is_none());
        assert_eq!(query.get_count(), 0);
        assert!(query.get_since().is_none());
        assert!(query.get_order().is_none());
        assert!(!query.is_title_only());
        assert!(query.get_culture().is_none());
    }

    #[test]
    fn test_id_shortcuts_build_minimal_identities() {
        let query = ArticleQuery::new().category_id(7).subcategory_id(12).culture_code("en_us");
        assert_eq!(query.get_category(), Some(&Category::with_id(7)));
        assert_eq!(query.get_subcategory().map(|s| s.id), Some(12));
        assert_eq!(query.get_culture().map(|c| c.code.as_str()), Some("en_us"));
        assert!(query.get_category().unwrap().display_name.is_empty());
    }

    #[test]
    fn test_later_setter_wins() {
        let query = ArticleQuery::new()
            .order(ArticleOrder::Date)
            .order(ArticleOrder::Relevance)
            .category_id(1)
            .category_id(2);
        assert_eq!(query.get_order(), Some(ArticleOrder::Relevance));
        assert_eq!(query.get_category().map(|c| c.id), Some(2));
    }

    #[test]
    fn test_since_date_is_midnight() {
        let date = NaiveDate::from_ymd_opt(2023, 11, 5).unwrap();
        let query = ArticleQuery::new().since_date(date);
        assert_eq!(query.get_since().map(|since| since.date()), Some(date));
    }

    #[test]
    fn test_since_instant_uses_local_date() {
        let instant = Utc::now();
        let query = ArticleQuery::new().since_instant(instant);
        assert_eq!(query.get_since(), Some(instant.with_timezone(&Local).naive_local()));
    }
}
