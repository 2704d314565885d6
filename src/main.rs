use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tartil::app::AppContext;
use tartil::cli::commands::{self, ReadOptions};
use tartil::cli::{Cli, Commands};
use tartil::client::SearchQuery;
use tartil::config::Config;
use tartil::domain::Address;
use tartil::navigation::Route;

/// Logs go to stderr. The TUI owns the terminal, so it only logs when
/// `RUST_LOG` asks for it.
fn init_tracing(for_tui: bool) {
    if for_tui && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Commands::Tui { .. }));

    let mut config = Config::resolve(cli.config.as_deref())?;
    if let Some(workers) = cli.workers {
        config.reading.workers = workers;
    }
    let ctx = AppContext::new(&config)?;

    match cli.command {
        Commands::Chapters { language } => {
            let language = language.unwrap_or_else(|| ctx.reading.word_language.clone());
            commands::list_chapters(&ctx, &language).await?;
        }
        Commands::Translations { word_by_word } => {
            commands::list_translations(&ctx, word_by_word).await?;
        }
        Commands::Read {
            scheme,
            id,
            page,
            per_page,
            translation,
            language,
            tajweed,
            all,
            json,
        } => {
            let address = Address::new(scheme.into(), id)?;

            let mut query = ctx.verse_query().page(page);
            if let Some(per_page) = per_page {
                query = query.per_page(per_page);
            }
            if let Some(translation) = translation {
                query.translation_id = translation;
            }
            if let Some(language) = language {
                query = query.language(language);
            }

            let options = ReadOptions {
                query,
                all,
                tajweed,
                json,
            };
            commands::read_verses(&ctx, address, &options).await?;
        }
        Commands::Search {
            query,
            size,
            translation,
        } => {
            let mut search = SearchQuery::new(query);
            if let Some(size) = size {
                search = search.size(size);
            }
            if let Some(translation) = translation {
                search = search.translation(translation);
            }
            commands::search(&ctx, &search).await?;
        }
        Commands::Tafsir {
            verse_key,
            tafsir_id,
        } => {
            let tafsir_id = tafsir_id.unwrap_or(ctx.reading.tafsir_id);
            commands::show_tafsir(&ctx, &verse_key, tafsir_id).await?;
        }
        Commands::Random { translation } => {
            let translation = translation.unwrap_or(ctx.reading.translation_id);
            commands::random_verse(&ctx, translation).await?;
        }
        Commands::Juz { id } => {
            commands::show_juz(&ctx, id).await?;
        }
        Commands::Tui { chapter, juz, page } => {
            let route = Route {
                chapter,
                section: juz,
                page,
            };
            tartil::tui::run(Arc::new(ctx), Arc::new(config), route).await?;
        }
    }

    Ok(())
}
