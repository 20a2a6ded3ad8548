use anyhow::Context;
use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use fz_client::logging::{init_logging, level_for_verbosity};
use fz_client::{ApiClient, ClientConfig, QueryBuilder};
use fz_core::{ArticleOrder, Category, CategoryOrder, Culture};
use tracing::info;

mod output;

use output::Format;

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse the Feedzilla news API", long_about = None)]
pub struct Cli {
    /// API root, overriding FEEDZILLA_BASE_URL
    #[arg(long)]
    base_url: Option<String>,
    /// Connect and read timeout in milliseconds, overriding FEEDZILLA_TIMEOUT_MS
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Identifier sent with article queries, overriding FEEDZILLA_CLIENT_SOURCE
    #[arg(long)]
    client_source: Option<String>,
    /// Print decoded records as JSON
    #[arg(long, global = true)]
    json: bool,
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the cultures the API serves
    Cultures,
    /// List top-level categories
    Categories {
        #[arg(long)]
        culture: Option<String>,
        /// none, popular or alpha
        #[arg(long)]
        order: Option<CategoryOrder>,
    },
    /// List subcategories, optionally under one category
    Subcategories {
        #[arg(long)]
        category: Option<u32>,
        #[arg(long)]
        culture: Option<String>,
        #[arg(long)]
        order: Option<CategoryOrder>,
    },
    /// List articles in a category
    Articles {
        #[arg(long)]
        category: u32,
        #[arg(long)]
        subcategory: Option<u32>,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Free-text article search
    Search {
        text: String,
        #[arg(long)]
        category: Option<u32>,
        #[arg(long)]
        subcategory: Option<u32>,
        /// Only applied when no category is given
        #[arg(long)]
        culture: Option<String>,
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Number of results, 1 to 100
    #[arg(long)]
    count: Option<i64>,
    /// Only articles published on or after this date (YYYY-MM-DD)
    #[arg(long)]
    since: Option<NaiveDate>,
    /// none, relevance, date, latest or popular
    #[arg(long)]
    order: Option<ArticleOrder>,
    /// Omit article summaries
    #[arg(long)]
    title_only: bool,
}

impl FilterArgs {
    fn apply<'a>(&self, mut builder: QueryBuilder<'a>) -> fz_core::Result<QueryBuilder<'a>> {
        if let Some(count) = self.count {
            builder = builder.count(count)?;
        }
        if let Some(since) = self.since {
            builder = builder.since_date(since);
        }
        if let Some(order) = self.order {
            builder = builder.order(order);
        }
        Ok(builder.title_only(self.title_only))
    }
}

impl Cli {
    fn client_config(&self) -> fz_core::Result<ClientConfig> {
        let mut config = ClientConfig::from_env()?;
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url)?;
        }
        if let Some(millis) = self.timeout_ms {
            config = config.with_timeout_ms(millis);
        }
        if let Some(source) = &self.client_source {
            config = config.with_client_source(source.clone());
        }
        Ok(config)
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let format = if cli.json { Format::Json } else { Format::Human };
    let config = cli.client_config().context("invalid client configuration")?;
    let mut client = ApiClient::from_config(config)?;

    match cli.command {
        Commands::Cultures => {
            let cultures = client.list_cultures()?;
            output::print_cultures(&cultures, format)?;
        }
        Commands::Categories { culture, order } => {
            let culture = culture.map(Culture::with_code);
            let categories = client.list_categories(culture.as_ref(), order)?;
            output::print_categories(&categories, format)?;
        }
        Commands::Subcategories { category, culture, order } => {
            let category = category.map(Category::with_id);
            let culture = culture.map(Culture::with_code);
            let subcategories = client.list_subcategories(category.as_ref(), culture.as_ref(), order)?;
            output::print_subcategories(&subcategories, format)?;
        }
        Commands::Articles { category, subcategory, filters } => {
            let mut builder = client.query().category_id(category);
            if let Some(subcategory) = subcategory {
                builder = builder.subcategory_id(subcategory);
            }
            let articles = filters.apply(builder)?.articles()?;
            info!("Fetched {} articles from category {}", articles.len(), category);
            output::print_articles(&articles, format)?;
        }
        Commands::Search { text, category, subcategory, culture, filters } => {
            let mut builder = client.query();
            if let Some(category) = category {
                builder = builder.category_id(category);
            }
            if let Some(subcategory) = subcategory {
                builder = builder.subcategory_id(subcategory);
            }
            if let Some(culture) = culture {
                builder = builder.culture_code(culture);
            }
            let articles = filters.apply(builder)?.search(&text)?;
            info!("Found {} articles for {:?}", articles.len(), text);
            output::print_articles(&articles, format)?;
        }
    }

    client.close();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(level_for_verbosity(cli.verbose));
    run(cli)
}
