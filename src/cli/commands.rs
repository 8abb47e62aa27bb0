use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::warn;

use super::output::{print_history, print_results, print_stats};
use crate::config::SearchConfig;
use crate::loaders::load_conversations;
use crate::models::{DateRange, MessageType, SearchFilter, SearchOptions, SortBy, SortOrder};
use crate::query::parse_query;
use crate::search::SearchService;
use crate::search::scorer::words;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::utils::{format_path_with_tilde, get_data_dir};

#[derive(Parser)]
#[command(name = "chat-search")]
#[command(version = "0.1.0")]
#[command(about = "Search exported AI chat conversations", long_about = None)]
pub struct Cli {
    /// Directory for persisted state such as search history
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Keyword search: "exact phrase", -excluded, free terms
    ///
    /// Quote the whole query when it contains -excluded terms.
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filters: FilterArgs,
        /// relevance, date or conversation
        #[arg(long, default_value = "relevance")]
        sort: SortBy,
        /// asc or desc
        #[arg(long, default_value = "desc")]
        order: SortOrder,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Word-overlap search, keeps matches sharing at least 30% of query words
    Semantic {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filters: FilterArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show past queries, newest first
    History {
        /// Forget all past queries
        #[arg(long)]
        clear: bool,
    },
    /// Autocomplete suggestions for a partial query
    Suggest { prefix: String },
    /// Show statistics about the loaded conversations
    Stats {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Args)]
pub struct SourceArgs {
    /// Conversation export file or directory of exports
    #[arg(long, env = "CHAT_SEARCH_DATA")]
    pub data: PathBuf,
}

#[derive(Args, Default)]
pub struct FilterArgs {
    /// user, assistant or all
    #[arg(long)]
    pub role: Option<MessageType>,
    /// Only messages from this model (repeatable)
    #[arg(long = "model")]
    pub models: Vec<String>,
    /// Messages on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub since: Option<String>,
    /// Messages on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub until: Option<String>,
    #[arg(long, conflicts_with = "without_attachments")]
    pub with_attachments: bool,
    #[arg(long)]
    pub without_attachments: bool,
    /// Minimum message length in characters
    #[arg(long)]
    pub min_length: Option<usize>,
    /// Maximum message length in characters
    #[arg(long)]
    pub max_length: Option<usize>,
}

#[derive(Args)]
pub struct OutputArgs {
    #[arg(long, default_value_t = crate::models::search::DEFAULT_LIMIT)]
    pub limit: usize,
    #[arg(long, default_value_t = 0)]
    pub offset: usize,
    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
    /// Do not HTML-escape content around <mark> tags
    #[arg(long)]
    pub raw_highlight: bool,
}

/// Check if string is valid YYYY-MM-DD format
fn parse_date(s: &str) -> Result<NaiveDate> {
    // Enforce strict YYYY-MM-DD format (10 chars); chrono rejects 2024-02-31
    if s.len() != 10 {
        bail!("Invalid date format: '{}' (expected YYYY-MM-DD)", s);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid date format: '{}' (expected YYYY-MM-DD)", s))
}

fn start_of_day(date: NaiveDate) -> Result<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()).context("Invalid start of day")
}

fn end_of_day(date: NaiveDate) -> Result<DateTime<Utc>> {
    date.and_hms_milli_opt(23, 59, 59, 999).map(|dt| dt.and_utc()).context("Invalid end of day")
}

impl FilterArgs {
    /// Build the structural filter; `None` when no flag was given
    pub fn to_filter(&self) -> Result<Option<SearchFilter>> {
        let since = self.since.as_deref().map(parse_date).transpose()?;
        let until = self.until.as_deref().map(parse_date).transpose()?;

        let date_range = match (since, until) {
            (None, None) => None,
            (start, end) => Some(DateRange::new(
                start.map(start_of_day).transpose()?.unwrap_or(DateTime::<Utc>::MIN_UTC),
                end.map(end_of_day).transpose()?.unwrap_or(DateTime::<Utc>::MAX_UTC),
            )),
        };

        let has_attachments = match (self.with_attachments, self.without_attachments) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        let filter = SearchFilter {
            date_range,
            message_type: self.role,
            models: (!self.models.is_empty()).then(|| self.models.clone()),
            has_attachments,
            min_length: self.min_length,
            max_length: self.max_length,
        };

        Ok((filter != SearchFilter::default()).then_some(filter))
    }
}

fn open_store(data_dir: Option<PathBuf>) -> Arc<dyn KeyValueStore> {
    let dir = match data_dir.map(Ok).unwrap_or_else(get_data_dir) {
        Ok(dir) => dir,
        Err(e) => {
            warn!("No data directory ({}), search history will not persist", e);
            return Arc::new(MemoryStore::new());
        }
    };

    match FileStore::open(&dir) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(
                "Cannot use {} ({}), search history will not persist",
                format_path_with_tilde(&dir),
                e
            );
            Arc::new(MemoryStore::new())
        }
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    execute(cli).await
}

fn build_service(data_dir: Option<PathBuf>, raw_highlight: bool) -> SearchService {
    let config = SearchConfig { escape_highlights: !raw_highlight, ..Default::default() };
    SearchService::new(open_store(data_dir), config)
}

pub async fn execute(cli: Cli) -> Result<()> {
    let data_dir = cli.data_dir;

    match cli.command {
        Some(Commands::Search { query, source, filters, sort, order, output }) => {
            let service = build_service(data_dir, output.raw_highlight);
            let conversations = load_conversations(&source.data)?;
            let options = SearchOptions {
                filters: filters.to_filter()?,
                sort_by: sort,
                sort_order: order,
                limit: output.limit,
                offset: output.offset,
            };
            let query = query.join(" ");
            let results = service.search(&conversations, &query, &options).await;
            let parsed = parse_query(&query);
            print_results(&results, &parsed.needles(), output.json)?;
        }
        Some(Commands::Semantic { query, source, filters, output }) => {
            let service = build_service(data_dir, output.raw_highlight);
            let conversations = load_conversations(&source.data)?;
            let options = SearchOptions {
                filters: filters.to_filter()?,
                limit: output.limit,
                offset: output.offset,
                ..Default::default()
            };
            let query = query.join(" ");
            let results = service.semantic_search(&conversations, &query, &options).await;
            let query_words = words(&query);
            let needles: Vec<&str> = query_words.iter().map(String::as_str).collect();
            print_results(&results, &needles, output.json)?;
        }
        Some(Commands::History { clear }) => {
            let service = build_service(data_dir, false);
            if clear {
                service.clear_search_history();
                println!("Search history cleared");
            } else {
                print_history(&service.search_history());
            }
        }
        Some(Commands::Suggest { prefix }) => {
            let service = build_service(data_dir, false);
            for suggestion in service.get_search_suggestions(&prefix) {
                println!("{}", suggestion);
            }
        }
        Some(Commands::Stats { source }) => {
            let conversations = load_conversations(&source.data)?;
            print_stats(&conversations, &source.data);
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
