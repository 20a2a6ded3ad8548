use fz_core::{Article, Articles, Category, Culture, Subcategory};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Human,
    Json,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_cultures(cultures: &[Culture], format: Format) -> serde_json::Result<()> {
    if format == Format::Json {
        return print_json(cultures);
    }
    println!("Found {} cultures", cultures.len());
    for culture in cultures {
        println!("🌐 {:<8} {}", culture.code, culture.display_name);
    }
    Ok(())
}

pub fn print_categories(categories: &[Category], format: Format) -> serde_json::Result<()> {
    if format == Format::Json {
        return print_json(categories);
    }
    println!("Found {} categories", categories.len());
    for category in categories {
        println!("📂 {:<6} {}", category.id, category.display_name);
        for subcategory in &category.subcategories {
            println!("   └ {:<6} {}", subcategory.id, subcategory.display_name);
        }
    }
    Ok(())
}

pub fn print_subcategories(subcategories: &[Subcategory], format: Format) -> serde_json::Result<()> {
    if format == Format::Json {
        return print_json(subcategories);
    }
    println!("Found {} subcategories", subcategories.len());
    for subcategory in subcategories {
        println!(
            "📁 {:<6} {} (category {})",
            subcategory.id, subcategory.display_name, subcategory.category_id
        );
    }
    Ok(())
}

pub fn print_articles(articles: &Articles, format: Format) -> serde_json::Result<()> {
    if format == Format::Json {
        return print_json(articles);
    }
    if let Some(title) = &articles.title {
        println!("{}", title);
    }
    println!("Found {} articles", articles.len());
    for article in articles.iter() {
        println!("📰 {}", article.title);
        println!("   {}", article.url);
        if let Some(line) = byline(article) {
            println!("   {}", line);
        }
        if let Some(summary) = article.summary.as_deref().filter(|s| !s.trim().is_empty()) {
            println!("   {}", summary.trim());
        }
    }
    Ok(())
}

/// Source, author and date joined with ` · `, skipping whatever is missing.
fn byline(article: &Article) -> Option<String> {
    let date = article
        .published_at()
        .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
        .or_else(|| article.publish_date.clone());
    let parts: Vec<String> = [article.source.clone(), article.author.clone(), date]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" · "))
    }
}
