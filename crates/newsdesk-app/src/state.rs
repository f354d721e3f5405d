//! Application state (Model in TEA pattern)

use newsdesk_api::{AuditEntry, CurrentUser, Page};
use newsdesk_core::{
    compose_page, visible_items, Advertisement, Article, Capability, Category, ContentItem,
    EditOptions, ItemId, PageLayout, Permissions, Route, Section, SectionId,
};

use crate::audio::AudioPlayer;
use crate::bindings::BindingRegistry;
use crate::config::Settings;
use crate::confirm_dialog::ConfirmDialogState;
use crate::edit_modal::EditModal;
use crate::forms::FormState;
use crate::hooks::{HookRegistry, Ticket};
use crate::toast::ToastQueue;

/// Current UI mode/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Waiting for the first section list
    #[default]
    Loading,

    /// Reading the page
    Browse,

    /// The shared edit modal is open
    EditModal,

    /// A create/edit form is open
    Form,

    /// Delete confirmation
    ConfirmDialog,

    /// Admin panel (categories, ads, articles, audit log, exports)
    Admin,

    /// The backend answered 401; waiting for the user to retry
    AuthRequired,
}

impl UiMode {
    pub fn is_modal(&self) -> bool {
        matches!(self, UiMode::EditModal | UiMode::Form | UiMode::ConfirmDialog)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Categories,
    Ads,
    Articles,
    AuditLog,
    Export,
}

impl AdminTab {
    pub const ALL: [AdminTab; 5] = [
        AdminTab::Categories,
        AdminTab::Ads,
        AdminTab::Articles,
        AdminTab::AuditLog,
        AdminTab::Export,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AdminTab::Categories => "Categories",
            AdminTab::Ads => "Ads",
            AdminTab::Articles => "Articles",
            AdminTab::AuditLog => "Activity",
            AdminTab::Export => "Export",
        }
    }

    fn index(&self) -> usize {
        AdminTab::ALL.iter().position(|t| t == self).unwrap_or_default()
    }

    pub fn next(&self) -> Self {
        AdminTab::ALL[(self.index() + 1) % AdminTab::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let len = AdminTab::ALL.len();
        AdminTab::ALL[(self.index() + len - 1) % len]
    }
}

/// Cursor over the page: section in render order, item within it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub section: usize,
    pub item: usize,
}

#[derive(Debug, Clone, Default)]
pub struct AdminState {
    pub tab: AdminTab,
    pub selected: usize,
    pub articles_page: u32,
    pub audit_page: u32,
}

/// Complete application state (the Model in TEA)
#[derive(Debug)]
pub struct AppState {
    pub ui_mode: UiMode,
    pub route: Route,
    pub settings: Settings,

    pub user: Option<CurrentUser>,
    pub permissions: Permissions,

    // Backend caches; replaced wholesale on every fetch
    pub sections: Vec<Section>,
    pub sections_loaded: bool,
    pub categories: Vec<Category>,
    pub ads: Vec<Advertisement>,
    pub articles: Page<Article>,
    pub article: Option<Article>,
    pub audit_log: Page<AuditEntry>,

    pub bindings: BindingRegistry,
    pub edit_modal: EditModal,
    pub hooks: HookRegistry,
    pub confirm_dialog: Option<ConfirmDialogState>,
    pub form: Option<FormState>,
    pub audio: AudioPlayer,
    pub toasts: ToastQueue,

    /// Save in flight for the open form / edit modal
    pub form_ticket: Option<Ticket>,
    pub edit_ticket: Option<Ticket>,

    pub selection: Selection,
    pub admin: AdminState,

    /// Explanation shown on the sign-in prompt
    pub auth_message: Option<String>,
    pub should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(Settings::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        let route = Route::category(settings.ui.default_category.clone());
        let toasts = ToastQueue::new(settings.ui.toast_ticks);
        Self {
            ui_mode: UiMode::Loading,
            route,
            settings,
            user: None,
            permissions: Permissions::default(),
            sections: Vec::new(),
            sections_loaded: false,
            categories: Vec::new(),
            ads: Vec::new(),
            articles: Page::default(),
            article: None,
            audit_log: Page::default(),
            bindings: BindingRegistry::new(),
            edit_modal: EditModal::new(),
            hooks: HookRegistry::new(),
            confirm_dialog: None,
            form: None,
            audio: AudioPlayer::new(),
            toasts,
            form_ticket: None,
            edit_ticket: None,
            selection: Selection::default(),
            admin: AdminState {
                articles_page: 1,
                audit_page: 1,
                ..Default::default()
            },
            auth_message: None,
            should_quit: false,
        }
    }

    /// Mode to return to when a modal closes.
    pub fn base_mode(&self) -> UiMode {
        if !self.sections_loaded && self.route != Route::Admin {
            UiMode::Loading
        } else if self.route == Route::Admin {
            UiMode::Admin
        } else {
            UiMode::Browse
        }
    }

    /// Sections grouped for the current route.
    pub fn layout(&self) -> PageLayout {
        let mut layout = compose_page(&self.sections, &self.route);
        if !self.settings.ui.show_sidebar {
            layout.sidebar.clear();
        }
        layout
    }

    pub fn category_filter(&self) -> Option<&str> {
        self.route.category_filter()
    }

    /// Sections in render order, as the layout shows them.
    pub fn page_sections(&self) -> Vec<Section> {
        self.layout().iter().cloned().collect()
    }

    pub fn selected_section(&self) -> Option<Section> {
        self.page_sections().into_iter().nth(self.selection.section)
    }

    /// Selected item with its section and visible index.
    pub fn selected_item(&self) -> Option<(SectionId, ContentItem, usize)> {
        let section = self.selected_section()?;
        // layout already applied the category filter to the main section
        let items = visible_items(&section, None);
        let item = items.get(self.selection.item)?;
        Some((section.id, (*item).clone(), self.selection.item))
    }

    pub fn find_item(&self, section_id: SectionId, item_id: ItemId) -> Option<&ContentItem> {
        self.sections
            .iter()
            .find(|s| s.id == section_id)
            .and_then(|s| s.item(item_id))
    }

    /// Keep the cursor on something that exists after a reload or route change.
    pub fn clamp_selection(&mut self) {
        let sections = self.page_sections();
        if sections.is_empty() {
            self.selection = Selection::default();
            return;
        }
        self.selection.section = self.selection.section.min(sections.len() - 1);
        let items = sections[self.selection.section].items.len();
        self.selection.item = self.selection.item.min(items.saturating_sub(1));
    }

    pub fn category_slugs(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.slug.clone()).collect()
    }

    pub fn edit_options(&self) -> EditOptions {
        self.settings.editor.edit_options(self.category_slugs())
    }

    /// Home, then each category in backend order, wrapping.
    pub fn adjacent_category(&self, forward: bool) -> Route {
        let mut routes = vec![Route::Home];
        routes.extend(self.categories.iter().map(|c| Route::category(c.slug.clone())));
        let len = routes.len();
        let current = routes.iter().position(|r| *r == self.route);
        let next = match current {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        routes.swap_remove(next)
    }

    /// Delete triggers are only offered for records the user may delete.
    pub fn can_delete_category(&self) -> bool {
        self.permissions.can(Capability::DeleteCategories)
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.permissions.can(capability)
    }

    /// Number of rows in the current admin tab.
    pub fn admin_row_count(&self) -> usize {
        match self.admin.tab {
            AdminTab::Categories => self.categories.len(),
            AdminTab::Ads => self.ads.len(),
            AdminTab::Articles => self.articles.items.len(),
            AdminTab::AuditLog => self.audit_log.items.len(),
            AdminTab::Export => newsdesk_api::ExportKind::ALL.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsdesk_core::SectionType;

    fn category(id: i64, slug: &str) -> Category {
        Category {
            id,
            name: slug.to_uppercase(),
            slug: slug.to_string(),
        }
    }

    #[test]
    fn test_default_category_sets_route() {
        let mut settings = Settings::default();
        settings.ui.default_category = "sports".into();
        let state = AppState::with_settings(settings);
        assert_eq!(state.route, Route::Category("sports".into()));
        assert_eq!(AppState::new().route, Route::Home);
    }

    #[test]
    fn test_adjacent_category_wraps_through_home() {
        let mut state = AppState::new();
        state.categories = vec![category(1, "politics"), category(2, "sports")];
        assert_eq!(state.adjacent_category(true), Route::category("politics"));
        state.route = Route::category("sports");
        assert_eq!(state.adjacent_category(true), Route::Home);
        state.route = Route::Home;
        assert_eq!(state.adjacent_category(false), Route::category("sports"));
    }

    #[test]
    fn test_hidden_sidebar_setting() {
        let mut state = AppState::new();
        state.sections = vec![
            Section::new(1, SectionType::MainContent, 1),
            Section::new(2, SectionType::Sidebar, 2),
        ];
        assert_eq!(state.layout().sidebar.len(), 1);
        state.settings.ui.show_sidebar = false;
        assert!(state.layout().sidebar.is_empty());
    }

    #[test]
    fn test_selected_item_uses_filtered_main() {
        let mut state = AppState::new();
        state.sections = vec![Section::new(1, SectionType::MainContent, 1).with_items(vec![
            ContentItem::new(10, "a").with_category("politics"),
            ContentItem::new(11, "b").with_category("sports"),
        ])];
        state.route = Route::category("sports");
        let (section_id, item, index) = state.selected_item().unwrap();
        assert_eq!((section_id, item.id, index), (1, 11, 0));
    }

    #[test]
    fn test_admin_tab_cycle() {
        assert_eq!(AdminTab::Export.next(), AdminTab::Categories);
        assert_eq!(AdminTab::Categories.prev(), AdminTab::Export);
    }
}
