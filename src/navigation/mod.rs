//! Sidebar navigation state: which addressing mode is shown, which item is
//! current, and the filter applied to the list.
//!
//! When a route carries more than one identifier the most specific wins:
//! section (juz) over page over chapter. State is single-owner; all changes
//! go through [`Navigation::apply`] in arrival order.

use crate::domain::{Address, Chapter, Scheme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    ByChapter,
    /// Juz listing.
    BySection,
    ByPage,
}

impl Mode {
    pub fn scheme(self) -> Scheme {
        match self {
            Mode::ByChapter => Scheme::Chapter,
            Mode::BySection => Scheme::Section,
            Mode::ByPage => Scheme::Page,
        }
    }

    pub fn from_scheme(scheme: Scheme) -> Self {
        match scheme {
            Scheme::Chapter => Mode::ByChapter,
            Scheme::Section => Mode::BySection,
            Scheme::Page => Mode::ByPage,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Mode::ByChapter => Mode::BySection,
            Mode::BySection => Mode::ByPage,
            Mode::ByPage => Mode::ByChapter,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Mode::ByChapter => Mode::ByPage,
            Mode::BySection => Mode::ByChapter,
            Mode::ByPage => Mode::BySection,
        }
    }
}

/// Identifiers taken from the current route; at most one is expected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Route {
    pub chapter: Option<u16>,
    pub section: Option<u16>,
    pub page: Option<u16>,
}

impl Route {
    pub fn from_address(address: Address) -> Self {
        let id = Some(address.id());
        match address.scheme() {
            Scheme::Chapter => Self {
                chapter: id,
                ..Default::default()
            },
            Scheme::Section => Self {
                section: id,
                ..Default::default()
            },
            Scheme::Page => Self {
                page: id,
                ..Default::default()
            },
        }
    }

    /// Mode implied by the route, if it names anything.
    pub fn mode(&self) -> Option<Mode> {
        if self.section.is_some() {
            Some(Mode::BySection)
        } else if self.page.is_some() {
            Some(Mode::ByPage)
        } else if self.chapter.is_some() {
            Some(Mode::ByChapter)
        } else {
            None
        }
    }

    pub fn id_for(&self, mode: Mode) -> Option<u16> {
        match mode {
            Mode::ByChapter => self.chapter,
            Mode::BySection => self.section,
            Mode::ByPage => self.page,
        }
    }

    /// Address of the winning identifier.
    pub fn address(&self) -> Option<Address> {
        let mode = self.mode()?;
        let id = self.id_for(mode)?;
        Address::new(mode.scheme(), u32::from(id)).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    RouteChanged(Route),
    FilterChanged(String),
    /// The user switched tabs without navigating.
    ModeSelected(Mode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub id: u16,
    pub label: String,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Navigation {
    mode: Mode,
    route: Route,
    filter: String,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(route: Route) -> Self {
        let mut nav = Self::new();
        nav.apply(NavEvent::RouteChanged(route));
        nav
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Apply one event. Returns true when the active item must be scrolled
    /// into view again, i.e. the mode or an identifier changed.
    pub fn apply(&mut self, event: NavEvent) -> bool {
        match event {
            NavEvent::RouteChanged(route) => {
                // An unchanged route keeps a tab the user picked by hand.
                if route == self.route {
                    return false;
                }
                self.route = route;
                if let Some(mode) = route.mode() {
                    self.mode = mode;
                }
                true
            }
            NavEvent::FilterChanged(filter) => {
                self.filter = filter;
                false
            }
            NavEvent::ModeSelected(mode) => {
                let changed = mode != self.mode;
                self.mode = mode;
                changed
            }
        }
    }

    /// Id of the current item in the active mode, if the route names one.
    pub fn active_item(&self) -> Option<u16> {
        self.route.id_for(self.mode)
    }

    pub fn is_active(&self, id: u16) -> bool {
        self.active_item() == Some(id)
    }

    /// Items of the active mode that match the filter.
    pub fn candidates(&self, chapters: &[Chapter]) -> Vec<NavItem> {
        let needle = self.filter.trim().to_lowercase();

        match self.mode {
            Mode::ByChapter => chapters
                .iter()
                .filter(|c| {
                    c.display_name().to_lowercase().contains(&needle)
                        || c.id.to_string().contains(&needle)
                })
                .map(|c| NavItem {
                    id: c.id,
                    label: c.display_name().to_string(),
                    detail: Some(c.name_arabic.clone()).filter(|n| !n.is_empty()),
                })
                .collect(),
            Mode::BySection | Mode::ByPage => {
                let scheme = self.mode.scheme();
                (1..=scheme.max_id())
                    .filter(|id| id.to_string().contains(&needle))
                    .map(|id| NavItem {
                        id,
                        label: format!("{} {}", scheme.label(), id),
                        detail: None,
                    })
                    .collect()
            }
        }
    }

    /// Position of the active item within [`Navigation::candidates`].
    pub fn active_index(&self, candidates: &[NavItem]) -> Option<usize> {
        let active = self.active_item()?;
        candidates.iter().position(|item| item.id == active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(id: u16, name: &str) -> Chapter {
        Chapter {
            id,
            name_simple: name.to_string(),
            name_arabic: String::new(),
            revelation_place: "makkah".to_string(),
            verses_count: None,
            translated_name: None,
        }
    }

    fn chapters() -> Vec<Chapter> {
        vec![
            chapter(1, "Al-Fatihah"),
            chapter(2, "Al-Baqarah"),
            chapter(12, "Yusuf"),
            chapter(36, "Ya-Sin"),
        ]
    }

    #[test]
    fn test_section_beats_page() {
        let nav = Navigation::with_route(Route {
            chapter: None,
            section: Some(5),
            page: Some(10),
        });
        assert_eq!(nav.mode(), Mode::BySection);
        assert_eq!(nav.active_item(), Some(5));
    }

    #[test]
    fn test_page_beats_chapter() {
        let nav = Navigation::with_route(Route {
            chapter: Some(2),
            section: None,
            page: Some(10),
        });
        assert_eq!(nav.mode(), Mode::ByPage);
        assert_eq!(nav.active_item(), Some(10));
        assert_eq!(nav.route().address(), Address::page(10).ok());
    }

    #[test]
    fn test_chapter_route() {
        let nav = Navigation::with_route(Route::from_address(Address::chapter(36).unwrap()));
        assert_eq!(nav.mode(), Mode::ByChapter);
        assert!(nav.is_active(36));
    }

    #[test]
    fn test_empty_route_keeps_mode() {
        let mut nav = Navigation::new();
        nav.apply(NavEvent::ModeSelected(Mode::ByPage));
        nav.apply(NavEvent::RouteChanged(Route::default()));
        assert_eq!(nav.mode(), Mode::ByPage);
        assert_eq!(nav.active_item(), None);
    }

    #[test]
    fn test_filter_does_not_change_mode_or_scroll() {
        let mut nav = Navigation::with_route(Route {
            section: Some(3),
            ..Default::default()
        });
        assert!(!nav.apply(NavEvent::FilterChanged("1".into())));
        assert_eq!(nav.mode(), Mode::BySection);
        assert_eq!(nav.active_item(), Some(3));
    }

    #[test]
    fn test_route_change_requests_scroll() {
        let mut nav = Navigation::new();
        assert!(nav.apply(NavEvent::RouteChanged(Route {
            chapter: Some(2),
            ..Default::default()
        })));
        assert!(!nav.apply(NavEvent::RouteChanged(Route {
            chapter: Some(2),
            ..Default::default()
        })));
        assert!(nav.apply(NavEvent::RouteChanged(Route {
            chapter: Some(3),
            ..Default::default()
        })));
    }

    #[test]
    fn test_mode_selection_recomputes_active_item() {
        let mut nav = Navigation::with_route(Route {
            chapter: Some(2),
            ..Default::default()
        });
        assert!(nav.apply(NavEvent::ModeSelected(Mode::BySection)));
        assert_eq!(nav.active_item(), None);
        assert!(!nav.apply(NavEvent::ModeSelected(Mode::BySection)));
        assert!(nav.apply(NavEvent::ModeSelected(Mode::ByChapter)));
        assert_eq!(nav.active_item(), Some(2));
    }

    #[test]
    fn test_repeated_route_keeps_picked_tab() {
        let route = Route {
            section: Some(5),
            ..Default::default()
        };
        let mut nav = Navigation::with_route(route);
        nav.apply(NavEvent::ModeSelected(Mode::ByPage));

        assert!(!nav.apply(NavEvent::RouteChanged(route)));
        assert_eq!(nav.mode(), Mode::ByPage);

        assert!(nav.apply(NavEvent::RouteChanged(Route {
            section: Some(6),
            ..Default::default()
        })));
        assert_eq!(nav.mode(), Mode::BySection);
    }

    #[test]
    fn test_chapter_filter_matches_arabic_fallback_label() {
        let mut untitled = chapter(114, "");
        untitled.name_arabic = "الناس".to_string();

        let mut nav = Navigation::new();
        nav.apply(NavEvent::FilterChanged("الناس".into()));
        let items = nav.candidates(&[untitled]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label, "الناس");
    }

    #[test]
    fn test_chapter_filter_is_case_insensitive() {
        let mut nav = Navigation::new();
        nav.apply(NavEvent::FilterChanged("BAQ".into()));
        let items = nav.candidates(&chapters());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 2);
    }

    #[test]
    fn test_chapter_filter_matches_id() {
        let mut nav = Navigation::new();
        nav.apply(NavEvent::FilterChanged("12".into()));
        let ids: Vec<u16> = nav.candidates(&chapters()).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![12]);
    }

    #[test]
    fn test_section_and_page_candidates() {
        let mut nav = Navigation::new();
        nav.apply(NavEvent::ModeSelected(Mode::BySection));
        assert_eq!(nav.candidates(&[]).len(), 30);

        nav.apply(NavEvent::FilterChanged("3".into()));
        let ids: Vec<u16> = nav.candidates(&[]).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 13, 23, 30]);

        nav.apply(NavEvent::ModeSelected(Mode::ByPage));
        nav.apply(NavEvent::FilterChanged(String::new()));
        let pages = nav.candidates(&[]);
        assert_eq!(pages.len(), 604);
        assert_eq!(pages[9].label, "Page 10");
    }

    #[test]
    fn test_active_index_within_filtered_list() {
        let mut nav = Navigation::with_route(Route {
            chapter: Some(36),
            ..Default::default()
        });
        let items = nav.candidates(&chapters());
        assert_eq!(nav.active_index(&items), Some(3));

        nav.apply(NavEvent::FilterChanged("y".into()));
        let items = nav.candidates(&chapters());
        assert_eq!(nav.active_index(&items), Some(1));

        nav.apply(NavEvent::FilterChanged("fat".into()));
        let items = nav.candidates(&chapters());
        assert_eq!(nav.active_index(&items), None);
    }

    #[test]
    fn test_mode_cycles() {
        assert_eq!(Mode::ByChapter.next(), Mode::BySection);
        assert_eq!(Mode::ByPage.next(), Mode::ByChapter);
        assert_eq!(Mode::ByChapter.prev(), Mode::ByPage);
    }
}
