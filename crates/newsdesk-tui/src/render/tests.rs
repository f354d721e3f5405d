//! Full-screen rendering tests for each mode and route

use super::*;
use crate::test_utils::{section, test_state, TestTerminal};
use newsdesk_app::state::AdminTab;
use newsdesk_core::{Article, Category, EditField, EditTarget, EditValues, Role, SectionType};

fn home_sections() -> Vec<Section> {
    vec![
        section(1, SectionType::Breaking, 0, &["Storm warning"]),
        section(2, SectionType::MainContent, 1, &["Budget passes", "Rates hold"])
            .with_title("Top stories"),
        section(3, SectionType::Sidebar, 2, &["Opinion piece"]),
    ]
}

fn render(term: &mut TestTerminal, state: &mut AppState) {
    term.draw_with(|frame| view(frame, state));
}

/// Column where `text` starts, counted in cells
fn column_of(term: &TestTerminal, text: &str) -> Option<usize> {
    term.content().lines().find_map(|line| {
        line.find(text)
            .map(|byte| line[..byte].chars().count())
    })
}

fn enter_edit_mode(state: &mut AppState) {
    state.permissions.set_roles(vec![Role::Editor]);
    state.permissions.set_edit_mode(true);
    let sections = state.sections.clone();
    state.bindings.bind_sections(&sections);
}

#[test]
fn test_loading_screen() {
    let mut state = AppState::new();
    let mut term = TestTerminal::new();
    render(&mut term, &mut state);

    assert!(term.buffer_contains("Loading sections…"));
    assert!(term.buffer_contains("Newsdesk"));
}

#[test]
fn test_sign_in_screen() {
    let mut state = test_state(home_sections());
    state.ui_mode = UiMode::AuthRequired;
    state.auth_message = Some("Token rejected".into());
    let mut term = TestTerminal::new();
    render(&mut term, &mut state);

    assert!(term.buffer_contains("Sign in required"));
    assert!(term.buffer_contains("Token rejected"));
    assert!(!term.buffer_contains("Budget passes"));
}

#[test]
fn test_home_page_renders_sections() {
    let mut state = test_state(home_sections());
    let mut term = TestTerminal::new();
    render(&mut term, &mut state);

    assert!(term.buffer_contains("Storm warning"));
    assert!(term.buffer_contains("Top stories"));
    assert!(term.buffer_contains("Budget passes"));
    assert!(term.buffer_contains("Rates hold"));
    assert!(term.buffer_contains("Opinion piece"));
}

#[test]
fn test_wide_terminal_puts_sidebar_in_its_own_column() {
    let mut state = test_state(home_sections());
    let mut term = TestTerminal::with_size(100, 30);
    render(&mut term, &mut state);

    let sidebar = column_of(&term, "Opinion piece").unwrap();
    let main = column_of(&term, "Budget passes").unwrap();
    assert!(sidebar >= 100 - crate::layout::SIDEBAR_WIDTH as usize);
    assert!(main < sidebar);
}

#[test]
fn test_narrow_terminal_stacks_sidebar_below_main() {
    let mut state = test_state(home_sections());
    let mut term = TestTerminal::with_size(60, 30);
    render(&mut term, &mut state);

    let sidebar_line = term.find_line("Opinion piece").unwrap();
    let main_line = term.find_line("Rates hold").unwrap();
    assert!(sidebar_line > main_line);
}

#[test]
fn test_unknown_section_type_draws_nothing() {
    let mut sections = home_sections();
    sections.push(section(
        4,
        SectionType::Unknown("carousel-3d".into()),
        0,
        &["Ghost story"],
    ));
    let mut state = test_state(sections);
    let mut term = TestTerminal::with_size(100, 30);
    render(&mut term, &mut state);

    assert!(!term.buffer_contains("Ghost story"));
    assert!(term.buffer_contains("Budget passes"));
}

#[test]
fn test_edit_markers_only_in_edit_mode() {
    let mut state = test_state(home_sections());
    let mut term = TestTerminal::new();
    render(&mut term, &mut state);
    assert!(!term.buffer_contains("✎"));

    enter_edit_mode(&mut state);
    render(&mut term, &mut state);
    assert!(term.buffer_contains("✎"));
}

#[test]
fn test_bindings_mounted_after_draw() {
    let mut state = test_state(home_sections());
    let title = EditTarget::item(2, 200, EditField::Title);
    let mut term = TestTerminal::new();

    render(&mut term, &mut state);
    assert!(!state.bindings.is_active(&title));

    enter_edit_mode(&mut state);
    render(&mut term, &mut state);
    assert!(state.bindings.is_active(&title));
    assert!(state.bindings.is_active(&EditTarget::section_title(2)));
}

#[test]
fn test_clicking_a_mounted_node_hits_its_binding() {
    let mut state = test_state(home_sections());
    enter_edit_mode(&mut state);
    let mut term = TestTerminal::new();
    render(&mut term, &mut state);

    let y = term.find_line("Budget passes").unwrap();
    let x = column_of(&term, "Budget passes").unwrap() as u16;
    let hit = state.bindings.hit(x, y).unwrap();
    assert_eq!(hit.target, EditTarget::item(2, 200, EditField::Title));
}

#[test]
fn test_edit_modal_records_its_area() {
    let mut state = test_state(home_sections());
    enter_edit_mode(&mut state);
    let target = EditTarget::item(2, 200, EditField::Title);
    let values: EditValues = [("text".to_string(), "Budget passes".to_string())].into();
    let options = state.edit_options();
    state.edit_modal.open(target, values, options);
    state.ui_mode = UiMode::EditModal;

    let mut term = TestTerminal::new();
    render(&mut term, &mut state);
    assert!(term.buffer_contains("Edit text"));
    assert!(state.edit_modal.area.is_some());
    assert!(state.edit_modal.click_outside(0, 0));

    state.edit_modal.close();
    state.ui_mode = UiMode::Browse;
    render(&mut term, &mut state);
    assert!(state.edit_modal.area.is_none());
}

#[test]
fn test_article_route_shows_article_and_sidebar() {
    let mut state = test_state(home_sections());
    state.route = Route::Article(7);
    state.article = Some(Article {
        id: 7,
        title: "Inside the budget deal".into(),
        summary: None,
        body: "It took three weeks.".into(),
        category_id: None,
        image_url: None,
        author: None,
        published_at: None,
        read_time: None,
    });
    let mut term = TestTerminal::with_size(100, 30);
    render(&mut term, &mut state);

    assert!(term.buffer_contains("Inside the budget deal"));
    assert!(term.buffer_contains("Opinion piece"));
    assert!(!term.buffer_contains("Storm warning"));
}

#[test]
fn test_admin_route_hides_delete_without_permission() {
    let mut state = test_state(home_sections());
    state.route = Route::Admin;
    state.ui_mode = UiMode::Admin;
    state.admin.tab = AdminTab::Categories;
    state.permissions.set_roles(vec![Role::Editor]);
    state.categories = vec![Category {
        id: 1,
        name: "Politics".into(),
        slug: "politics".into(),
    }];
    let mut term = TestTerminal::new();
    render(&mut term, &mut state);

    assert!(term.buffer_contains("Politics"));
    assert!(!term.buffer_contains("d delete"));
    assert!(!term.buffer_contains("Budget passes"));
}

#[test]
fn test_scroll_start_keeps_selected_visible() {
    let heights = [(0, 5), (1, 5), (2, 5), (3, 5)];
    assert_eq!(scroll_start(&heights, 0, 12), 0);
    assert_eq!(scroll_start(&heights, 1, 12), 0);
    assert_eq!(scroll_start(&heights, 3, 12), 2);
    // Not in this column
    assert_eq!(scroll_start(&heights, 9, 12), 0);
}
