//! Page assembly from the flat section list.
//!
//! The backend sends every section in one list. A page is built from it in
//! four groups: full-width sections before the main content section, the
//! main content section, full-width sections after it, and the sidebar pool.

use std::collections::HashSet;

use crate::content::{ArticleId, ContentItem, ItemId, HOME_CATEGORY};
use crate::section::{sort_by_position, Section, SectionPosition};

/// Where the user is
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Category(String),
    Article(ArticleId),
    Admin,
}

impl Route {
    /// Routes that render the shared sidebar column.
    pub fn has_sidebar(&self) -> bool {
        !matches!(self, Route::Admin)
    }

    /// Active category filter. `home` is not a filter.
    pub fn category_filter(&self) -> Option<&str> {
        match self {
            Route::Category(slug) if slug != HOME_CATEGORY => Some(slug.as_str()),
            _ => None,
        }
    }

    pub fn category(slug: impl Into<String>) -> Self {
        let slug = slug.into();
        if slug == HOME_CATEGORY {
            Route::Home
        } else {
            Route::Category(slug)
        }
    }

    pub fn title(&self) -> String {
        match self {
            Route::Home => "Home".to_string(),
            Route::Category(slug) => slug.clone(),
            Route::Article(id) => format!("Article #{id}"),
            Route::Admin => "Admin".to_string(),
        }
    }
}

/// Sections grouped for rendering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub before: Vec<Section>,
    pub main: Option<Section>,
    pub after: Vec<Section>,
    pub sidebar: Vec<Section>,
}

impl PageLayout {
    /// Two columns only when there is a main section and a sidebar to show.
    pub fn is_two_column(&self) -> bool {
        self.main.is_some() && !self.sidebar.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty()
            && self.main.is_none()
            && self.after.is_empty()
            && self.sidebar.is_empty()
    }

    /// Every section in render order, sidebar last.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.before
            .iter()
            .chain(self.main.iter())
            .chain(self.after.iter())
            .chain(self.sidebar.iter())
    }
}

/// Build the page for `route` from the full section list.
pub fn compose_page(sections: &[Section], route: &Route) -> PageLayout {
    let mut ordered = sections.to_vec();
    sort_by_position(&mut ordered);

    let (sidebar, full_width): (Vec<Section>, Vec<Section>) = ordered
        .into_iter()
        .partition(|s| s.section_type.is_sidebar_widget());

    if !route.has_sidebar() {
        return PageLayout::default();
    }
    if let Route::Article(_) = route {
        return PageLayout {
            sidebar,
            ..Default::default()
        };
    }

    let mut layout = PageLayout::default();
    for section in full_width {
        if layout.main.is_none() && section.section_type.is_main_content() {
            layout.main = Some(section);
        } else if layout.main.is_none() {
            layout.before.push(section);
        } else {
            layout.after.push(section);
        }
    }

    // A category page shows only the main content, whether or not there is one
    if let Some(slug) = route.category_filter() {
        layout.before.clear();
        layout.after.clear();
        if let Some(main) = layout.main.as_mut() {
            main.items.retain(|item| item.in_category(slug));
        }
    }

    if layout.main.is_none() {
        tracing::debug!("No main content section; sidebar omitted");
        return layout;
    }

    layout.sidebar = sidebar;
    layout
}

/// Items of `section` that pass the category filter.
pub fn visible_items<'a>(section: &'a Section, filter: Option<&str>) -> Vec<&'a ContentItem> {
    section
        .items
        .iter()
        .filter(|item| filter.map_or(true, |slug| item.in_category(slug)))
        .collect()
}

fn move_index<T>(items: &mut Vec<T>, old: usize, new: usize) -> bool {
    if old >= items.len() || new >= items.len() {
        return false;
    }
    let moved = items.remove(old);
    items.insert(new, moved);
    true
}

/// Apply a reorder made on the visible (filtered) list to the full list.
///
/// Hidden items keep their slots; the visible items are redistributed over
/// the slots the visible items occupied. Returns `None` for out-of-range
/// indices or when `visible_ids` is not a subsequence of `full_ids`.
pub fn reorder_visible(
    full_ids: &[ItemId],
    visible_ids: &[ItemId],
    old: usize,
    new: usize,
) -> Option<Vec<ItemId>> {
    let mut reordered = visible_ids.to_vec();
    if !move_index(&mut reordered, old, new) {
        return None;
    }

    let visible: HashSet<ItemId> = visible_ids.iter().copied().collect();
    let slots: Vec<usize> = full_ids
        .iter()
        .enumerate()
        .filter(|(_, id)| visible.contains(*id))
        .map(|(i, _)| i)
        .collect();
    if slots.len() != visible_ids.len() {
        return None;
    }

    let mut result = full_ids.to_vec();
    for (slot, id) in slots.into_iter().zip(reordered) {
        result[slot] = id;
    }
    Some(result)
}

/// New positions after moving the section at `old` to `new` (indices in
/// position order). The existing position values are reused so they stay
/// unique.
pub fn reorder_sections(sections: &[Section], old: usize, new: usize) -> Option<Vec<SectionPosition>> {
    let mut ordered = sections.to_vec();
    sort_by_position(&mut ordered);
    let positions: Vec<i32> = ordered.iter().map(|s| s.position).collect();

    let mut ids: Vec<_> = ordered.iter().map(|s| s.id).collect();
    if !move_index(&mut ids, old, new) {
        return None;
    }

    Some(
        ids.into_iter()
            .zip(positions)
            .map(|(id, position)| SectionPosition { id, position })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::SectionType;

    fn section(id: i64, section_type: SectionType, position: i32) -> Section {
        Section::new(id, section_type, position)
    }

    fn positions(sections: &[Section]) -> Vec<i32> {
        sections.iter().map(|s| s.position).collect()
    }

    #[test]
    fn test_main_content_splits_before_and_after() {
        let sections = vec![
            section(1, SectionType::Featured, 9),
            section(2, SectionType::Breaking, 1),
            section(3, SectionType::MainContent, 5),
            section(4, SectionType::List, 7),
            section(5, SectionType::Trending, 3),
        ];
        let layout = compose_page(&sections, &Route::Home);
        assert_eq!(positions(&layout.before), vec![1, 3]);
        assert_eq!(layout.main.as_ref().map(|s| s.position), Some(5));
        assert_eq!(positions(&layout.after), vec![7, 9]);
    }

    #[test]
    fn test_sidebar_membership_is_exclusive() {
        let sections = vec![
            section(1, SectionType::Breaking, 1),
            section(2, SectionType::AdSkyscraper, 2),
            section(3, SectionType::MainContent, 3),
            section(4, SectionType::SideAudios, 4),
            section(5, SectionType::AdLarge, 5),
        ];
        let layout = compose_page(&sections, &Route::Home);
        let sidebar_ids: Vec<_> = layout.sidebar.iter().map(|s| s.id).collect();
        assert_eq!(sidebar_ids, vec![2, 4]);
        let flow_ids: Vec<_> = layout
            .before
            .iter()
            .chain(layout.main.iter())
            .chain(layout.after.iter())
            .map(|s| s.id)
            .collect();
        assert_eq!(flow_ids, vec![1, 3, 5]);
        assert!(layout.is_two_column());
    }

    #[test]
    fn test_no_main_content_omits_sidebar() {
        let sections = vec![
            section(1, SectionType::Breaking, 1),
            section(2, SectionType::Sidebar, 2),
        ];
        let layout = compose_page(&sections, &Route::Home);
        assert!(layout.main.is_none());
        assert!(layout.sidebar.is_empty());
        assert_eq!(layout.before.len(), 1);
        assert!(!layout.is_two_column());
    }

    #[test]
    fn test_category_filter_keeps_only_main_and_filters_items() {
        let main = section(3, SectionType::MainContent, 3).with_items(vec![
            ContentItem::new(1, "a").with_category("sports"),
            ContentItem::new(2, "b").with_category("politics"),
            ContentItem::new(3, "c").with_category("Sports"),
        ]);
        let sections = vec![
            section(1, SectionType::Breaking, 1),
            section(2, SectionType::Sidebar, 2),
            main,
            section(4, SectionType::List, 4),
        ];
        let layout = compose_page(&sections, &Route::category("sports"));
        assert!(layout.before.is_empty());
        assert!(layout.after.is_empty());
        let ids: Vec<_> = layout.main.unwrap().items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(layout.sidebar.len(), 1);
    }

    #[test]
    fn test_category_without_main_content_shows_nothing() {
        let sections = vec![
            section(1, SectionType::Breaking, 1),
            section(2, SectionType::List, 2),
            section(3, SectionType::Sidebar, 3),
        ];
        let layout = compose_page(&sections, &Route::category("sports"));
        assert!(layout.before.is_empty());
        assert!(layout.after.is_empty());
        assert!(layout.main.is_none());
        assert!(layout.sidebar.is_empty());
        assert!(layout.is_empty());
    }

    #[test]
    fn test_home_category_is_not_a_filter() {
        assert_eq!(Route::category(HOME_CATEGORY), Route::Home);
        assert_eq!(Route::Category("home".into()).category_filter(), None);
    }

    #[test]
    fn test_only_first_main_content_is_main() {
        let sections = vec![
            section(1, SectionType::MainContent, 1),
            section(2, SectionType::MainContent, 2),
        ];
        let layout = compose_page(&sections, &Route::Home);
        assert_eq!(layout.main.map(|s| s.id), Some(1));
        assert_eq!(layout.after.len(), 1);
    }

    #[test]
    fn test_article_route_keeps_sidebar_and_admin_has_none() {
        let sections = vec![
            section(1, SectionType::MainContent, 1),
            section(2, SectionType::Sidebar, 2),
        ];
        let article = compose_page(&sections, &Route::Article(4));
        assert!(article.main.is_none());
        assert_eq!(article.sidebar.len(), 1);
        assert!(compose_page(&sections, &Route::Admin).is_empty());
    }

    #[test]
    fn test_reorder_visible_maps_to_full_list() {
        // full: 1 2 3 4 5, visible (filtered): 1 3 5
        let full = [1, 2, 3, 4, 5];
        let visible = [1, 3, 5];
        // move 5 to the front of the visible list
        let result = reorder_visible(&full, &visible, 2, 0).unwrap();
        assert_eq!(result, vec![5, 2, 1, 4, 3]);
    }

    #[test]
    fn test_reorder_visible_rejects_bad_indices() {
        assert_eq!(reorder_visible(&[1, 2], &[1, 2], 0, 5), None);
        assert_eq!(reorder_visible(&[1, 2], &[1, 9], 0, 1), None);
    }

    #[test]
    fn test_reorder_sections_reuses_positions() {
        let sections = vec![
            section(10, SectionType::Breaking, 2),
            section(11, SectionType::List, 4),
            section(12, SectionType::Video, 8),
        ];
        let moved = reorder_sections(&sections, 2, 0).unwrap();
        assert_eq!(
            moved,
            vec![
                SectionPosition { id: 12, position: 2 },
                SectionPosition { id: 10, position: 4 },
                SectionPosition { id: 11, position: 8 },
            ]
        );
    }

    #[test]
    fn test_visible_items_filter() {
        let s = section(1, SectionType::List, 1).with_items(vec![
            ContentItem::new(1, "a").with_category("sports"),
            ContentItem::new(2, "b"),
        ]);
        assert_eq!(visible_items(&s, None).len(), 2);
        assert_eq!(visible_items(&s, Some("sports")).len(), 1);
    }
}
