pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    Article, ArticleOrder, Articles, Category, CategoryOrder, Culture, Enclosure, Subcategory,
};

pub mod prelude {
    pub use super::{Article, ArticleOrder, Articles, Category, CategoryOrder, Culture, Subcategory};
    pub use super::{Error, Result};
}
