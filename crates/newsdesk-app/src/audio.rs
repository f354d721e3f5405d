//! Playback state for audio items.
//!
//! Only one item plays at a time. Nothing is decoded; the player tracks
//! which item is playing and how far along it is, advanced by ticks.

use newsdesk_core::{ContentItem, ItemId, SectionId};

/// Ticks per second of playback
pub const TICKS_PER_SECOND: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub section_id: SectionId,
    pub item_id: ItemId,
    pub title: String,
    pub url: String,
    /// Length in seconds, when known
    pub duration: Option<u32>,
    pub elapsed_ticks: u32,
    pub paused: bool,
}

impl NowPlaying {
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_ticks / TICKS_PER_SECOND
    }

    /// 0.0..=1.0, or `None` for unknown length.
    pub fn progress(&self) -> Option<f64> {
        let duration = self.duration.filter(|d| *d > 0)?;
        Some((self.elapsed_secs() as f64 / duration as f64).min(1.0))
    }
}

#[derive(Debug, Default)]
pub struct AudioPlayer {
    current: Option<NowPlaying>,
}

impl AudioPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `item`, superseding whatever was playing.
    ///
    /// Items without an audio URL are refused.
    pub fn play(&mut self, section_id: SectionId, item: &ContentItem) -> bool {
        let Some(url) = item.audio_url.clone() else {
            return false;
        };
        if let Some(previous) = &self.current {
            tracing::debug!("Stopping item {} for item {}", previous.item_id, item.id);
        }
        self.current = Some(NowPlaying {
            section_id,
            item_id: item.id,
            title: item.title.clone(),
            url,
            duration: item.duration,
            elapsed_ticks: 0,
            paused: false,
        });
        true
    }

    pub fn toggle_pause(&mut self) {
        if let Some(now) = self.current.as_mut() {
            now.paused = !now.paused;
        }
    }

    pub fn stop(&mut self) {
        self.current = None;
    }

    /// Advance playback. Stops at the end of a known duration.
    pub fn tick(&mut self) {
        let finished = match self.current.as_mut() {
            Some(now) if !now.paused => {
                now.elapsed_ticks = now.elapsed_ticks.saturating_add(1);
                now.duration
                    .is_some_and(|d| now.elapsed_ticks >= d.saturating_mul(TICKS_PER_SECOND))
            }
            _ => false,
        };
        if finished {
            self.stop();
        }
    }

    pub fn now_playing(&self) -> Option<&NowPlaying> {
        self.current.as_ref()
    }

    pub fn is_playing(&self, item_id: ItemId) -> bool {
        self.current
            .as_ref()
            .is_some_and(|n| n.item_id == item_id && !n.paused)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(id: ItemId, duration: Option<u32>) -> ContentItem {
        let mut item = ContentItem::new(id, format!("Clip {id}"));
        item.audio_url = Some(format!("https://audio.test/{id}.mp3"));
        item.duration = duration;
        item
    }

    #[test]
    fn test_play_supersedes_current() {
        let mut player = AudioPlayer::new();
        assert!(player.play(1, &clip(1, Some(60))));
        assert!(player.play(1, &clip(2, Some(60))));
        assert!(!player.is_playing(1));
        assert!(player.is_playing(2));
    }

    #[test]
    fn test_item_without_audio_is_refused() {
        let mut player = AudioPlayer::new();
        assert!(!player.play(1, &ContentItem::new(3, "Text only")));
        assert!(player.now_playing().is_none());
    }

    #[test]
    fn test_pause_holds_progress() {
        let mut player = AudioPlayer::new();
        player.play(1, &clip(1, Some(1)));
        player.tick();
        player.toggle_pause();
        for _ in 0..50 {
            player.tick();
        }
        assert_eq!(player.now_playing().unwrap().elapsed_ticks, 1);
    }

    #[test]
    fn test_auto_stop_at_end() {
        let mut player = AudioPlayer::new();
        player.play(1, &clip(1, Some(1)));
        for _ in 0..TICKS_PER_SECOND {
            player.tick();
        }
        assert!(player.now_playing().is_none());
    }

    #[test]
    fn test_unknown_length_keeps_playing() {
        let mut player = AudioPlayer::new();
        player.play(1, &clip(1, None));
        for _ in 0..1000 {
            player.tick();
        }
        let now = player.now_playing().unwrap();
        assert_eq!(now.progress(), None);
        assert_eq!(now.elapsed_secs(), 100);
    }
}
