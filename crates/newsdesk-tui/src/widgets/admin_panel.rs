//! Admin panel
//!
//! Tabs for categories, advertisements, articles, the activity log and CSV
//! exports. Create and delete hints are only drawn for what the signed-in
//! user is allowed to do, matching the keys that actually respond.

use chrono::Utc;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use newsdesk_api::{ExportKind, Page};
use newsdesk_app::actions::export_hook_key;
use newsdesk_app::state::{AdminTab, AppState};
use newsdesk_core::Capability;

use super::truncate;
use crate::theme::styles;

pub struct AdminPanel<'a> {
    state: &'a AppState,
}

impl<'a> AdminPanel<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn tabs_line(&self) -> Line<'static> {
        let mut spans = vec![Span::raw(" ")];
        for (i, tab) in AdminTab::ALL.iter().enumerate() {
            let style = if *tab == self.state.admin.tab {
                styles::focused_selected()
            } else {
                styles::text_muted()
            };
            spans.push(Span::styled(format!(" {} {} ", i + 1, tab.label()), style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    fn tab_access(&self) -> bool {
        let state = self.state;
        match state.admin.tab {
            AdminTab::Categories => true,
            AdminTab::Ads => state.can(Capability::ManageAds),
            AdminTab::Articles => state.can(Capability::ManageArticles),
            AdminTab::AuditLog | AdminTab::Export => state.can(Capability::ExportData),
        }
    }

    fn rows(&self, width: usize) -> Vec<String> {
        let state = self.state;
        match state.admin.tab {
            AdminTab::Categories => state
                .categories
                .iter()
                .map(|c| format!("{:<28} /{}", truncate(&c.name, 28), c.slug))
                .collect(),
            AdminTab::Ads => {
                let now = Utc::now();
                state
                    .ads
                    .iter()
                    .map(|ad| {
                        let format = ad.format.map(|f| f.as_str()).unwrap_or("-");
                        format!(
                            "{:<24} {:<7} {:<12} {:<10} {}",
                            truncate(&ad.name, 24),
                            ad.kind.as_str(),
                            format,
                            ad.schedule(now).label(),
                            if ad.active { "on" } else { "off" }
                        )
                    })
                    .collect()
            }
            AdminTab::Articles => state
                .articles
                .items
                .iter()
                .map(|a| {
                    let date = a
                        .published_at
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "draft".to_string());
                    let author = a.author.as_deref().unwrap_or("-");
                    format!(
                        "{:<10} {:<16} {}",
                        date,
                        truncate(author, 16),
                        truncate(&a.title, width.saturating_sub(30))
                    )
                })
                .collect(),
            AdminTab::AuditLog => state
                .audit_log
                .items
                .iter()
                .map(|e| {
                    let when = e
                        .created_at
                        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_default();
                    let actor = e.actor.as_deref().unwrap_or("system");
                    let target = e.target.as_deref().unwrap_or("");
                    format!("{when:<16} {:<14} {} {target}", truncate(actor, 14), e.action)
                })
                .collect(),
            AdminTab::Export => ExportKind::ALL
                .iter()
                .map(|kind| {
                    let status = if state.hooks.is_loading(&export_hook_key(*kind)) {
                        "  exporting…"
                    } else {
                        ""
                    };
                    format!("Export {kind}.csv{status}")
                })
                .collect(),
        }
    }

    fn page_label<T>(page: &Page<T>) -> Option<String> {
        let current = page.page?;
        Some(match page.total_pages {
            Some(total) => format!("Page {current}/{total}"),
            None => format!("Page {current}"),
        })
    }

    fn hints_line(&self) -> Line<'static> {
        let state = self.state;
        let mut hints: Vec<(&str, &str)> = Vec::new();
        match state.admin.tab {
            AdminTab::Categories => {
                if state.can(Capability::ManageCategories) {
                    hints.push(("n", "new"));
                    hints.push(("Enter", "edit"));
                }
                if state.can_delete_category() {
                    hints.push(("d", "delete"));
                }
            }
            AdminTab::Ads if state.can(Capability::ManageAds) => {
                hints.extend([("n", "new"), ("Enter", "edit"), ("t", "toggle"), ("d", "delete")]);
            }
            AdminTab::Articles if state.can(Capability::ManageArticles) => {
                hints.extend([("n", "new"), ("Enter", "edit"), ("d", "delete"), ("[ ]", "page")]);
            }
            AdminTab::AuditLog if state.can(Capability::ExportData) => {
                hints.push(("[ ]", "page"));
            }
            AdminTab::Export if state.can(Capability::ExportData) => {
                hints.push(("Enter", "download"));
            }
            _ => {}
        }
        hints.push(("Esc", "back"));

        let mut spans = vec![Span::raw(" ")];
        for (key, label) in hints {
            spans.push(Span::styled(key.to_string(), styles::keybinding()));
            spans.push(Span::styled(format!(" {label}  "), styles::text_muted()));
        }
        Line::from(spans)
    }
}

impl Widget for AdminPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true).title(" Admin ");
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 4 {
            return;
        }

        let [tabs, body, footer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        buf.set_line(tabs.x, tabs.y, &self.tabs_line(), tabs.width);

        if !self.tab_access() {
            Paragraph::new(Span::styled(
                "  You do not have access to this section",
                styles::text_muted(),
            ))
            .render(body, buf);
            buf.set_line(footer.x, footer.y, &self.hints_line(), footer.width);
            return;
        }

        let rows = self.rows(body.width as usize);
        let selected = self.state.admin.selected;
        let visible = body.height as usize;
        let offset = (selected + 1).saturating_sub(visible);

        if rows.is_empty() {
            Paragraph::new(Span::styled("  Nothing here yet", styles::text_muted())).render(body, buf);
        }
        for (i, row) in rows.iter().enumerate().skip(offset).take(visible) {
            let y = body.y + (i - offset) as u16;
            let (marker, style) = if i == selected {
                ("▸ ", styles::selected())
            } else {
                ("  ", styles::text_primary())
            };
            let line = Line::from(vec![
                Span::styled(marker, styles::accent()),
                Span::styled(row.clone(), style),
            ]);
            buf.set_line(body.x, y, &line, body.width);
        }

        let mut footer_line = self.hints_line();
        let page = match self.state.admin.tab {
            AdminTab::Articles => Self::page_label(&self.state.articles),
            AdminTab::AuditLog => Self::page_label(&self.state.audit_log),
            _ => None,
        };
        if let Some(page) = page {
            footer_line.spans.push(Span::styled(page, styles::text_secondary()));
        }
        buf.set_line(footer.x, footer.y, &footer_line, footer.width);
    }
}
