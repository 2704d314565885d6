//! # Tartil
//!
//! A terminal Quran reader over the quran.com content API.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → QuranClient → Normalizer → Tajweed → CLI / TUI
//!                                   Navigation ─┘
//! ```
//!
//! - [`fetcher`]: HTTP transport behind the [`Fetcher`](fetcher::Fetcher) trait
//! - [`client`]: paginated verse retrieval by chapter, juz or page, plus catalogs
//! - [`normalizer`]: raw upstream records into canonical verses and words
//! - [`tajweed`]: rule-based tajweed classification of Arabic text
//! - [`navigation`]: sidebar mode and active-item state
//! - [`tui`]: terminal reader built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # List chapters
//! tartil chapters
//!
//! # Read Al-Fatihah with translation 131
//! tartil read chapter 1 --translation 131
//!
//! # Read all of juz 30, fetching pages concurrently
//! tartil read juz 30 --all
//!
//! # Launch TUI on page 50
//! tartil tui --page 50
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the HTTP
/// fetcher, the Quran client and the page collector.
pub mod app;

/// Configuration management.
///
/// Loads from `~/.config/tartil/config.toml`, supporting:
/// - API base URL and timeout (`QURAN_API_BASE_URL` overrides the URL)
/// - Reading defaults (translation, gloss language, tajweed)
/// - Custom colors (named or hex), including one per tajweed rule
/// - Custom keybindings
pub mod config;

/// Command-line interface using clap.
///
/// - `chapters` - List chapters
/// - `translations` - List translation sources by language
/// - `read <chapter|juz|page> <id>` - Print verses
/// - `search <query>` - Full-text search
/// - `tafsir <verse-key>` - Show commentary for one verse
/// - `random` - Show a random verse
/// - `juz <id>` - Show the verse range of a juz
/// - `tui` - Launch the TUI
pub mod cli;

/// Retrieval client for the content API.
///
/// - [`QuranClient`](client::QuranClient): one upstream request per call
/// - [`VerseQuery`](client::VerseQuery) / [`SearchQuery`](client::SearchQuery): query parameters
/// - [`VersePage`](client::VersePage): verses plus the upstream page count
pub mod client;

/// Core domain models.
///
/// - [`Address`](domain::Address): chapter, juz or page id, range-checked
/// - [`Verse`](domain::Verse), [`Word`](domain::Word), [`Translation`](domain::Translation)
/// - [`Chapter`](domain::Chapter), [`JuzInfo`](domain::JuzInfo)
/// - [`TranslationResource`](domain::TranslationResource), [`Tafsir`](domain::Tafsir)
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait returning status and body
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`ParallelFetcher`](fetcher::parallel::ParallelFetcher): Concurrent page collection with semaphore
pub mod fetcher;

/// Sidebar navigation state machine.
pub mod navigation;

/// Upstream verse and word records into the canonical model.
pub mod normalizer;

/// Tajweed transducer.
///
/// Classifies ghunnah, iqlab, madd, qalqalah, hamzat al-wasl and silent
/// letters; see [`RULES`](tajweed::RULES) for precedence.
pub mod tajweed;

/// Terminal user interface.
///
/// Two-pane layout built with ratatui:
/// - Navigation pane (surah / juz / page tabs, filter, list)
/// - Verse pane (Arabic with tajweed colours, word glosses, translation)
///
/// Keybindings: j/k navigate, Tab switches panes, [ and ] switch tabs,
/// / filters, t toggles tajweed, w toggles words, o opens quran.com, q quits.
pub mod tui;
