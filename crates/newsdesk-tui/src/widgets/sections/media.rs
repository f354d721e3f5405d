//! Audio, video and shorts.

use ratatui::text::Span;

use newsdesk_app::audio::NowPlaying;
use newsdesk_core::{format_duration, EditField, Section};

use super::{item_rows, with_prefix, Row};
use crate::theme::styles;

const PROGRESS_WIDTH: usize = 16;

/// `━━━━────────` for `progress` in 0.0..=1.0
pub fn progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "━".repeat(filled), "─".repeat(width - filled))
}

pub fn audio(section: &Section, now: Option<&NowPlaying>) -> Vec<Row> {
    let mut rows = Vec::new();
    for (i, item) in section.items.iter().enumerate() {
        let current = now.filter(|n| n.item_id == item.id && n.section_id == section.id);
        let icon = match current {
            Some(n) if n.paused => Span::styled("❚❚ ", styles::warning()),
            Some(_) => Span::styled("▶ ", styles::accent_bold()),
            None => Span::styled("♫ ", styles::text_muted()),
        };
        let clip = item_rows(section.id, i, item, &[EditField::Title, EditField::Duration]);
        rows.extend(with_prefix(clip, icon));

        if let Some(n) = current {
            let total = n.duration.map(format_duration).unwrap_or_else(|| "--:--".into());
            let bar = progress_bar(n.progress().unwrap_or_default(), PROGRESS_WIDTH);
            rows.push(
                Row::plain(vec![
                    Span::styled(bar, styles::accent()),
                    Span::styled(
                        format!(" {} / {total}", format_duration(n.elapsed_secs())),
                        styles::text_muted(),
                    ),
                ])
                .indented(),
            );
        }
    }
    rows
}

pub fn video(section: &Section) -> Vec<Row> {
    section
        .items
        .iter()
        .enumerate()
        .flat_map(|(i, item)| {
            let rows = item_rows(
                section.id,
                i,
                item,
                &[
                    EditField::Title,
                    EditField::Image,
                    EditField::Duration,
                    EditField::Link,
                ],
            );
            with_prefix(rows, Span::styled("▶ ", styles::accent()))
        })
        .collect()
}

pub fn shorts(section: &Section) -> Vec<Row> {
    section
        .items
        .iter()
        .enumerate()
        .flat_map(|(i, item)| {
            let rows = item_rows(section.id, i, item, &[EditField::Title, EditField::Image]);
            with_prefix(rows, Span::styled("▮ ", styles::accent()))
        })
        .collect()
}
