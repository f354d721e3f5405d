//! Full article page

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use newsdesk_core::{Article, ArticleId};

use crate::theme::styles;

/// Draws `article` when it is the one being shown, a placeholder otherwise.
pub struct ArticleView<'a> {
    id: ArticleId,
    article: Option<&'a Article>,
}

impl<'a> ArticleView<'a> {
    pub fn new(id: ArticleId, article: Option<&'a Article>) -> Self {
        Self {
            id,
            article: article.filter(|a| a.id == id),
        }
    }

    fn byline(article: &Article) -> Line<'static> {
        let mut parts = Vec::new();
        if let Some(author) = &article.author {
            parts.push(format!("By {author}"));
        }
        if let Some(published) = article.published_at {
            parts.push(published.format("%B %-d, %Y").to_string());
        }
        if let Some(read_time) = &article.read_time {
            parts.push(format!("{read_time} read"));
        }
        Line::from(Span::styled(parts.join(" · "), styles::text_secondary()))
    }

    fn text(article: &Article) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(article.title.clone(), styles::title())),
            Self::byline(article),
            Line::default(),
        ];
        if let Some(summary) = &article.summary {
            lines.push(Line::from(Span::styled(
                summary.clone(),
                styles::text_primary().add_modifier(Modifier::ITALIC),
            )));
            lines.push(Line::default());
        }
        if let Some(image) = &article.image_url {
            lines.push(Line::from(Span::styled(format!("[image] {image}"), styles::text_muted())));
            lines.push(Line::default());
        }
        lines.extend(
            article
                .body
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), styles::text_primary()))),
        );
        lines
    }
}

impl Widget for ArticleView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true).title(format!(" Article #{} ", self.id));
        let inner = block.inner(area);
        block.render(area, buf);

        let content = Rect {
            x: inner.x + 1,
            width: inner.width.saturating_sub(2),
            ..inner
        };
        match self.article {
            Some(article) => Paragraph::new(Self::text(article))
                .wrap(Wrap { trim: false })
                .render(content, buf),
            None => Paragraph::new(Span::styled("Loading article…", styles::text_muted()))
                .render(content, buf),
        }
    }
}
