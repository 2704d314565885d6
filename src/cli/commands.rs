use crate::app::{AppContext, Result, TartilError};
use crate::client::{SearchQuery, VerseQuery};
use crate::domain::{group_by_language, Address, Verse, VerseKey};
use crate::tajweed;

/// How `read` fetches and prints.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    pub query: VerseQuery,
    pub all: bool,
    pub tajweed: bool,
    pub json: bool,
}

pub async fn list_chapters(ctx: &AppContext, language: &str) -> Result<()> {
    let chapters = ctx.client.chapters(language).await?;

    if chapters.is_empty() {
        println!("No chapters");
        return Ok(());
    }

    for chapter in chapters {
        let verses = chapter
            .verses_count
            .map(|n| format!("{} verses", n))
            .unwrap_or_default();
        let translated = chapter
            .translated_name
            .as_ref()
            .map(|t| t.name.as_str())
            .unwrap_or_default();

        println!(
            "{:>3}. {} {} ({}) {} {}",
            chapter.id,
            chapter.display_name(),
            chapter.name_arabic,
            translated,
            chapter.revelation_place,
            verses
        );
    }

    Ok(())
}

pub async fn list_translations(ctx: &AppContext, word_by_word: bool) -> Result<()> {
    let resources = ctx.client.translation_resources(word_by_word).await?;

    if resources.is_empty() {
        println!("No translations");
        return Ok(());
    }

    for (language, group) in group_by_language(&resources) {
        let language = if language.is_empty() {
            "unknown"
        } else {
            language.as_str()
        };
        println!("{}", language);
        for resource in group {
            match resource.author_name.as_deref() {
                Some(author) if !author.is_empty() => {
                    println!("  [{:>4}] {} - {}", resource.id, resource.name, author)
                }
                _ => println!("  [{:>4}] {}", resource.id, resource.name),
            }
        }
    }

    Ok(())
}

pub async fn read_verses(ctx: &AppContext, address: Address, options: &ReadOptions) -> Result<()> {
    let (verses, header) = if options.all {
        let verses = ctx
            .parallel_fetcher
            .fetch_all(address, &options.query)
            .await?;
        let header = format!(
            "{} {} ({} verses)",
            address.scheme().label(),
            address.id(),
            verses.len()
        );
        (verses, header)
    } else {
        let page = ctx.client.verses(address, &options.query).await?;
        let header = format!(
            "{} {} (page {}/{})",
            address.scheme().label(),
            address.id(),
            page.page,
            page.total_pages
        );
        (page.verses, header)
    };

    if options.json {
        let json = serde_json::to_string_pretty(&verses)
            .map_err(|e| TartilError::Other(format!("Failed to encode verses: {}", e)))?;
        println!("{}", json);
        return Ok(());
    }

    println!("{}\n", header);
    for verse in &verses {
        println!(
            "{}\n",
            format_verse(
                verse,
                options.query.translation_id,
                options.tajweed,
                &options.query.language
            )
        );
    }

    Ok(())
}

pub async fn search(ctx: &AppContext, query: &SearchQuery) -> Result<()> {
    let results = ctx.client.search(query).await?;

    if results.is_empty() {
        println!("No results for \"{}\"", query.text);
        return Ok(());
    }

    println!("{} results for \"{}\"\n", results.len(), query.text);
    for verse in &results {
        println!(
            "{}\n",
            format_verse(verse, query.translation_id, false, "")
        );
    }

    Ok(())
}

pub async fn show_tafsir(ctx: &AppContext, verse_key: &str, tafsir_id: u32) -> Result<()> {
    let key: VerseKey = verse_key.parse()?;
    let tafsir = ctx.client.tafsir(&key, tafsir_id).await?;

    let text = tafsir.plain_text();
    if text.is_empty() {
        println!("No tafsir for {} in resource {}", key, tafsir.resource_id);
    } else {
        println!("Tafsir {} for {}\n\n{}", tafsir.resource_id, key, text);
    }

    Ok(())
}

pub async fn random_verse(ctx: &AppContext, translation_id: u32) -> Result<()> {
    let verse = ctx.client.random_verse(translation_id).await?;
    println!("{}", format_verse(&verse, translation_id, false, ""));
    Ok(())
}

pub async fn show_juz(ctx: &AppContext, juz_id: u32) -> Result<()> {
    let juz = ctx.client.juz(juz_id).await?;

    match juz.verses_count {
        Some(count) => println!("Juz {}: {} verses", juz.juz_number, count),
        None => println!("Juz {}", juz.juz_number),
    }

    let mut mapping: Vec<(&String, &String)> = juz.verse_mapping.iter().collect();
    mapping.sort_by_key(|(chapter, _)| chapter.parse::<u16>().unwrap_or(u16::MAX));
    for (chapter, range) in mapping {
        println!("  Surah {:>3}: {}", chapter, range);
    }

    Ok(())
}

/// One verse as printed by the CLI: key and Arabic text, word glosses when a
/// language is given, then the requested translation without markup.
pub fn format_verse(verse: &Verse, translation_id: u32, with_tajweed: bool, language: &str) -> String {
    let arabic = verse.arabic_text();
    let arabic = if with_tajweed {
        tajweed::apply(&arabic)
    } else {
        arabic
    };

    let mut out = format!("[{}] {}", verse.verse_key, arabic);

    if !language.is_empty() {
        let glosses: Vec<String> = verse
            .words
            .iter()
            .filter_map(|w| w.gloss(language).map(|g| format!("{} ({})", w.uthmani, g)))
            .collect();
        if !glosses.is_empty() {
            out.push_str("\n    ");
            out.push_str(&glosses.join(" | "));
        }
    }

    let translation = verse
        .translation(translation_id)
        .or_else(|| verse.translations.first());
    if let Some(translation) = translation {
        out.push_str("\n    ");
        out.push_str(&translation.plain_text());
    }

    out
}
