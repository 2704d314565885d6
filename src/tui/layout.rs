use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::domain::Verse;
use crate::navigation::Mode;
use crate::tajweed::{self, Segment, Transducer};
use crate::tui::app::{ActivePane, TuiApp};

const MODE_TABS: [Mode; 3] = [Mode::ByChapter, Mode::BySection, Mode::ByPage];

pub fn render(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Panes
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(20)])
        .split(rows[0]);

    render_navigation_pane(frame, app, columns[0], colors);
    render_verse_pane(frame, app, columns[1], colors);
    render_status_bar(frame, app, rows[1], colors);
}

fn border_style(active: bool, colors: &ColorConfig) -> Style {
    if active {
        Style::default().fg(colors.active_border)
    } else {
        Style::default().fg(colors.inactive_border)
    }
}

fn render_navigation_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let is_active = app.active_pane == ActivePane::Navigation;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Mode tabs
            Constraint::Length(1), // Filter
            Constraint::Min(3),    // List
        ])
        .split(area);

    let mode = app.navigation.mode();
    let tabs = Tabs::new(MODE_TABS.iter().map(|m| m.scheme().label()))
        .select(MODE_TABS.iter().position(|m| *m == mode).unwrap_or(0))
        .style(Style::default().fg(colors.inactive_border))
        .highlight_style(
            Style::default()
                .fg(colors.active_border)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, chunks[0]);

    let filter = if app.editing_filter {
        format!("/{}_", app.navigation.filter())
    } else if app.navigation.filter().is_empty() {
        String::new()
    } else {
        format!("/{}", app.navigation.filter())
    };
    frame.render_widget(
        Paragraph::new(filter).style(Style::default().fg(colors.verse_key)),
        chunks[1],
    );

    let items: Vec<ListItem> = app
        .nav_items
        .iter()
        .map(|item| {
            let marker = if app.navigation.is_active(item.id) {
                "●"
            } else {
                " "
            };
            let content = match &item.detail {
                Some(detail) => format!("{} {:>3} {} {}", marker, item.id, item.label, detail),
                None => format!("{} {}", marker, item.label),
            };
            ListItem::new(content)
        })
        .collect();

    let title = format!(
        " {} [{}/{}] ",
        mode.scheme().label(),
        app.nav_index + 1,
        app.nav_items.len().max(1)
    );

    let highlight_style = if is_active {
        Style::default()
            .bg(colors.selection_bg_active)
            .fg(colors.selection_fg_active)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(colors.selection_bg_inactive)
            .fg(colors.selection_fg_inactive)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_active, colors));

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style)
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[2], &mut app.nav_list_state);
}

fn render_verse_pane(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let is_active = app.active_pane == ActivePane::Verses;

    let title = match app.loaded {
        Some(address) => format!(
            " {} {} (page {}/{}) ",
            address.scheme().label(),
            address.id(),
            app.page,
            app.total_pages
        ),
        None => " Verses ".to_string(),
    };

    let content = if app.verses.is_empty() {
        Text::from("Select a surah, juz or page")
    } else {
        let transducer = Transducer::new();
        let language = app.word_language.as_str();
        let mut lines = Vec::new();

        // The selected verse is drawn first; earlier ones scroll off.
        for (offset, verse) in app.verses[app.verse_index..].iter().enumerate() {
            let selected = offset == 0 && is_active;
            lines.extend(verse_lines(verse, app, &transducer, language, selected, colors));
            lines.push(Line::from(""));
        }
        Text::from(lines)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_active, colors));

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn verse_lines(
    verse: &Verse,
    app: &TuiApp,
    transducer: &Transducer,
    language: &str,
    selected: bool,
    colors: &ColorConfig,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let key_style = if selected {
        Style::default()
            .fg(colors.selection_fg_active)
            .bg(colors.selection_bg_active)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.verse_key)
    };
    lines.push(Line::from(Span::styled(
        format!("[{}]", verse.verse_key),
        key_style,
    )));

    let arabic = verse.arabic_text();
    lines.push(arabic_line(&arabic, app.show_tajweed, transducer, colors));

    if app.show_words && verse.has_words() {
        let glosses: Vec<Span> = verse
            .words
            .iter()
            .filter_map(|w| {
                w.gloss(language).map(|g| {
                    Span::styled(
                        format!("{} {}  ", w.uthmani, g),
                        Style::default().fg(colors.word_gloss),
                    )
                })
            })
            .collect();
        if !glosses.is_empty() {
            lines.push(Line::from(glosses));
        }
    }

    for translation in &verse.translations {
        lines.push(Line::from(Span::styled(
            translation.plain_text(),
            Style::default().fg(colors.translation_text),
        )));
    }

    lines
}

/// Arabic text as spans, one colour per tajweed category.
fn arabic_line(
    text: &str,
    with_tajweed: bool,
    transducer: &Transducer,
    colors: &ColorConfig,
) -> Line<'static> {
    let plain = Style::default().fg(colors.arabic_text);
    if !with_tajweed {
        return Line::from(Span::styled(tajweed::strip_markup(text), plain));
    }

    let spans: Vec<Span<'static>> = transducer
        .segments(text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Plain(t) => Span::styled(t.to_string(), plain),
            Segment::Markup(t) => Span::styled(tajweed::strip_markup(t), plain),
            Segment::Classified { category, text } => Span::styled(
                text.to_string(),
                Style::default().fg(colors.tajweed_color(category)),
            ),
        })
        .collect();
    Line::from(spans)
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let status = if app.is_loading {
        "Loading...".to_string()
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else if app.editing_filter {
        "Type to filter  Backspace:Delete  Enter/Esc:Done".to_string()
    } else {
        format!(
            "j/k:Nav  n/p:Page  Tab:Pane  [/]:Mode  /:Filter  t:Tajweed{}  w:Words{}  o:Open  q:Quit",
            if app.show_tajweed { "*" } else { "" },
            if app.show_words { "*" } else { "" }
        )
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}
