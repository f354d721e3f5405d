//! Section type to renderer dispatch.

use crate::section::SectionType;

/// One variant per section renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    BreakingTicker,
    TrendingList,
    FeaturedGrid,
    Mosaic,
    AdSlot,
    SidebarList,
    AudioList,
    MainFeed,
    HeadlineList,
    VideoStrip,
    ShortsStrip,
    CustomBlock,
}

/// Pick the renderer for a section type.
///
/// Unknown types have no renderer and are skipped by the view.
pub fn widget_for(section_type: &SectionType) -> Option<WidgetKind> {
    let kind = match section_type {
        SectionType::Breaking => WidgetKind::BreakingTicker,
        SectionType::Trending => WidgetKind::TrendingList,
        SectionType::Featured => WidgetKind::FeaturedGrid,
        SectionType::Mosaic => WidgetKind::Mosaic,
        SectionType::AdSmall
        | SectionType::AdSkyscraper
        | SectionType::AdVerticalSm
        | SectionType::AdLarge => WidgetKind::AdSlot,
        SectionType::Sidebar => WidgetKind::SidebarList,
        SectionType::SideAudios | SectionType::Audios => WidgetKind::AudioList,
        SectionType::MainContent => WidgetKind::MainFeed,
        SectionType::List => WidgetKind::HeadlineList,
        SectionType::Video => WidgetKind::VideoStrip,
        SectionType::Shorts => WidgetKind::ShortsStrip,
        SectionType::Custom => WidgetKind::CustomBlock,
        SectionType::Unknown(tag) => {
            tracing::debug!("No renderer for section type '{}'", tag);
            return None;
        }
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_type_has_a_widget() {
        for t in SectionType::KNOWN.iter() {
            assert!(widget_for(t).is_some(), "{t} has no widget");
        }
    }

    #[test]
    fn test_unknown_type_renders_nothing() {
        assert_eq!(widget_for(&SectionType::parse("hologram")), None);
    }

    #[test]
    fn test_ad_types_share_slot() {
        assert_eq!(widget_for(&SectionType::AdLarge), Some(WidgetKind::AdSlot));
        assert_eq!(widget_for(&SectionType::AdSkyscraper), Some(WidgetKind::AdSlot));
    }
}
