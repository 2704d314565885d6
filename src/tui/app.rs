use ratatui::widgets::ListState;

use crate::client::{VersePage, DEFAULT_LANGUAGE};
use crate::domain::{Address, Chapter, Scheme, Verse};
use crate::navigation::{NavEvent, NavItem, Navigation, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Navigation,
    Verses,
}

impl ActivePane {
    pub fn next(self) -> Self {
        match self {
            ActivePane::Navigation => ActivePane::Verses,
            ActivePane::Verses => ActivePane::Navigation,
        }
    }

    pub fn prev(self) -> Self {
        self.next()
    }
}

pub const PAGE_SIZE: usize = 10;
pub const WEB_BASE_URL: &str = "https://quran.com";

pub struct TuiApp {
    pub active_pane: ActivePane,
    pub navigation: Navigation,
    pub chapters: Vec<Chapter>,
    pub nav_items: Vec<NavItem>,
    pub nav_index: usize,
    pub nav_list_state: ListState,
    pub verses: Vec<Verse>,
    pub verse_index: usize,
    /// Address and page currently shown in the verse pane.
    pub loaded: Option<Address>,
    pub page: u32,
    pub total_pages: u32,
    pub show_tajweed: bool,
    pub show_words: bool,
    /// Gloss language shown when words are on.
    pub word_language: String,
    pub editing_filter: bool,
    pub is_loading: bool,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl TuiApp {
    pub fn new(navigation: Navigation, show_tajweed: bool, show_words: bool) -> Self {
        let mut app = Self {
            active_pane: ActivePane::Navigation,
            navigation,
            chapters: Vec::new(),
            nav_items: Vec::new(),
            nav_index: 0,
            nav_list_state: ListState::default(),
            verses: Vec::new(),
            verse_index: 0,
            loaded: None,
            page: 1,
            total_pages: 1,
            show_tajweed,
            show_words,
            word_language: DEFAULT_LANGUAGE.to_string(),
            editing_filter: false,
            is_loading: false,
            should_quit: false,
            status_message: None,
        };
        app.refresh_items(true);
        app
    }

    pub fn set_chapters(&mut self, chapters: Vec<Chapter>) {
        self.chapters = chapters;
        self.refresh_items(true);
    }

    /// Feed one event to the navigation state and rebuild the sidebar list.
    pub fn apply_nav(&mut self, event: NavEvent) {
        let scroll = self.navigation.apply(event);
        self.refresh_items(scroll);
    }

    fn refresh_items(&mut self, scroll_to_active: bool) {
        self.nav_items = self.navigation.candidates(&self.chapters);

        if scroll_to_active {
            if let Some(index) = self.navigation.active_index(&self.nav_items) {
                self.nav_index = index;
            }
        }
        if self.nav_index >= self.nav_items.len() {
            self.nav_index = self.nav_items.len().saturating_sub(1);
        }

        let selected = (!self.nav_items.is_empty()).then_some(self.nav_index);
        self.nav_list_state.select(selected);
    }

    pub fn next_mode(&mut self) {
        self.apply_nav(NavEvent::ModeSelected(self.navigation.mode().next()));
    }

    pub fn prev_mode(&mut self) {
        self.apply_nav(NavEvent::ModeSelected(self.navigation.mode().prev()));
    }

    pub fn start_filter(&mut self) {
        self.editing_filter = true;
        self.active_pane = ActivePane::Navigation;
    }

    pub fn finish_filter(&mut self) {
        self.editing_filter = false;
    }

    pub fn push_filter_char(&mut self, c: char) {
        let mut filter = self.navigation.filter().to_string();
        filter.push(c);
        self.set_filter(filter);
    }

    pub fn pop_filter_char(&mut self) {
        let mut filter = self.navigation.filter().to_string();
        filter.pop();
        self.set_filter(filter);
    }

    fn set_filter(&mut self, filter: String) {
        self.apply_nav(NavEvent::FilterChanged(filter));
        self.nav_index = self.navigation.active_index(&self.nav_items).unwrap_or(0);
        let selected = (!self.nav_items.is_empty()).then_some(self.nav_index);
        self.nav_list_state.select(selected);
    }

    pub fn selected_nav_item(&self) -> Option<&NavItem> {
        self.nav_items.get(self.nav_index)
    }

    /// Address behind the highlighted sidebar entry.
    pub fn selected_address(&self) -> Option<Address> {
        let item = self.selected_nav_item()?;
        Address::new(self.navigation.mode().scheme(), u32::from(item.id)).ok()
    }

    /// Navigate to `address`; the caller loads its verses.
    pub fn navigate(&mut self, address: Address) {
        self.apply_nav(NavEvent::RouteChanged(Route::from_address(address)));
    }

    pub fn set_verses(&mut self, address: Address, page: VersePage) {
        self.verses = page.verses;
        self.page = page.page;
        self.total_pages = page.total_pages.max(1);
        self.loaded = Some(address);
        self.verse_index = 0;
    }

    pub fn next_verse_page(&self) -> Option<(Address, u32)> {
        let address = self.loaded?;
        (self.page < self.total_pages).then_some((address, self.page + 1))
    }

    pub fn prev_verse_page(&self) -> Option<(Address, u32)> {
        let address = self.loaded?;
        (self.page > 1).then_some((address, self.page - 1))
    }

    pub fn selected_verse(&self) -> Option<&Verse> {
        self.verses.get(self.verse_index)
    }

    /// quran.com link for the selected verse, else for the loaded address.
    pub fn web_url(&self) -> Option<String> {
        if let Some(key) = self.selected_verse().and_then(|v| v.key().ok()) {
            return Some(format!("{}/{}/{}", WEB_BASE_URL, key.chapter, key.verse));
        }

        let address = self.loaded?;
        let url = match address.scheme() {
            Scheme::Chapter => format!("{}/{}", WEB_BASE_URL, address.id()),
            Scheme::Section => format!("{}/juz/{}", WEB_BASE_URL, address.id()),
            Scheme::Page => format!("{}/page/{}", WEB_BASE_URL, address.id()),
        };
        Some(url)
    }

    pub fn move_up(&mut self) {
        match self.active_pane {
            ActivePane::Navigation => {
                if self.nav_index > 0 {
                    self.nav_index -= 1;
                    self.nav_list_state.select(Some(self.nav_index));
                }
            }
            ActivePane::Verses => {
                self.verse_index = self.verse_index.saturating_sub(1);
            }
        }
    }

    pub fn move_down(&mut self) {
        match self.active_pane {
            ActivePane::Navigation => {
                if self.nav_index + 1 < self.nav_items.len() {
                    self.nav_index += 1;
                    self.nav_list_state.select(Some(self.nav_index));
                }
            }
            ActivePane::Verses => {
                if self.verse_index + 1 < self.verses.len() {
                    self.verse_index += 1;
                }
            }
        }
    }

    /// Jump through the sidebar list. Verse pages are fetched by the caller.
    pub fn next_page(&mut self) {
        let max_index = self.nav_items.len().saturating_sub(1);
        let new_index = (self.nav_index + PAGE_SIZE).min(max_index);
        if new_index != self.nav_index {
            self.nav_index = new_index;
            self.nav_list_state.select(Some(self.nav_index));
        }
    }

    pub fn prev_page(&mut self) {
        let new_index = self.nav_index.saturating_sub(PAGE_SIZE);
        if new_index != self.nav_index {
            self.nav_index = new_index;
            self.nav_list_state.select(Some(self.nav_index));
        }
    }

    pub fn toggle_tajweed(&mut self) {
        self.show_tajweed = !self.show_tajweed;
    }

    pub fn toggle_words(&mut self) {
        self.show_words = !self.show_words;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
