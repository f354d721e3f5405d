//! Edit-field model shared by the binding registry and the edit modal.
//!
//! Every editable node on the page is identified by an [`EditTarget`]. The
//! target's [`EditField`] decides the [`EditType`], and the edit type decides
//! which form keys the modal shows and which keys a save may emit.

use std::collections::BTreeMap;
use std::fmt;

use crate::content::{ContentItem, ItemDraft, ItemId};
use crate::section::{Section, SectionId};
use crate::validation::{ValidationError, ValidationErrors};

/// Form values keyed by field name
pub type EditValues = BTreeMap<String, String>;

/// Modal variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditType {
    Image,
    Category,
    Date,
    ReadTime,
    Duration,
    Text,
    Link,
}

impl EditType {
    /// Form keys this type may read and emit.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            EditType::Image => &["src", "alt"],
            EditType::Category => &["category"],
            EditType::Date => &["date"],
            EditType::ReadTime => &["read_time"],
            EditType::Duration => &["duration"],
            EditType::Text => &["text"],
            EditType::Link => &["url"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EditType::Image => "image",
            EditType::Category => "category",
            EditType::Date => "date",
            EditType::ReadTime => "read-time",
            EditType::Duration => "duration",
            EditType::Text => "text",
            EditType::Link => "link",
        }
    }

    /// Whether the modal offers quick-pick buttons for this type.
    pub fn has_quick_picks(&self) -> bool {
        matches!(self, EditType::Date | EditType::ReadTime | EditType::Duration)
    }
}

impl fmt::Display for EditType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which part of a section or item a node edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EditField {
    Title,
    Summary,
    Image,
    Category,
    Date,
    ReadTime,
    Duration,
    Link,
}

impl EditField {
    pub fn edit_type(&self) -> EditType {
        match self {
            EditField::Title | EditField::Summary => EditType::Text,
            EditField::Image => EditType::Image,
            EditField::Category => EditType::Category,
            EditField::Date => EditType::Date,
            EditField::ReadTime => EditType::ReadTime,
            EditField::Duration => EditType::Duration,
            EditField::Link => EditType::Link,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EditField::Title => "Title",
            EditField::Summary => "Summary",
            EditField::Image => "Image",
            EditField::Category => "Category",
            EditField::Date => "Date",
            EditField::ReadTime => "Read time",
            EditField::Duration => "Duration",
            EditField::Link => "Link",
        }
    }

    /// Current values of this field on `item`, keyed by the edit type's form keys.
    pub fn values_of(&self, item: &ContentItem) -> EditValues {
        let mut values = EditValues::new();
        let mut put = |key: &str, value: Option<&str>| {
            values.insert(key.to_string(), value.unwrap_or_default().to_string());
        };
        match self {
            EditField::Title => put("text", Some(item.title.as_str())),
            EditField::Summary => put("text", item.summary.as_deref()),
            EditField::Image => {
                put("src", item.image_url.as_deref());
                put("alt", item.image_alt.as_deref());
            }
            EditField::Category => put("category", item.category.as_deref()),
            EditField::Date => put("date", item.date.as_deref()),
            EditField::ReadTime => put("read_time", item.read_time.as_deref()),
            EditField::Duration => {
                let formatted = item.duration.map(format_duration);
                put("duration", formatted.as_deref());
            }
            EditField::Link => put("url", item.link_url.as_deref()),
        }
        values
    }

    /// Build an item update from `item` with `patch` applied.
    ///
    /// Keys the patch does not carry leave the item's value unchanged.
    pub fn apply(
        &self,
        item: &ContentItem,
        patch: &EditValues,
    ) -> std::result::Result<ItemDraft, ValidationErrors> {
        let mut draft = ItemDraft::from_item(item);
        let get = |key: &str| patch.get(key).map(|v| v.trim().to_string());
        let optional = |v: String| if v.is_empty() { None } else { Some(v) };

        match self {
            EditField::Title => {
                if let Some(text) = get("text") {
                    draft.title = text;
                }
            }
            EditField::Summary => {
                if let Some(text) = get("text") {
                    draft.summary = optional(text);
                }
            }
            EditField::Image => {
                if let Some(src) = get("src") {
                    draft.image_url = optional(src);
                }
                if let Some(alt) = get("alt") {
                    draft.image_alt = optional(alt);
                }
            }
            EditField::Category => {
                if let Some(category) = get("category") {
                    draft.category = optional(category);
                }
            }
            EditField::Date => {
                if let Some(date) = get("date") {
                    draft.date = optional(date);
                }
            }
            EditField::ReadTime => {
                if let Some(read_time) = get("read_time") {
                    draft.read_time = optional(read_time);
                }
            }
            EditField::Duration => {
                if let Some(raw) = get("duration") {
                    draft.duration = if raw.is_empty() {
                        None
                    } else {
                        Some(parse_duration(&raw).ok_or_else(|| {
                            ValidationErrors::from(vec![ValidationError::invalid(
                                "duration",
                                "must look like 3:25 or a number of seconds",
                            )])
                        })?)
                    };
                }
            }
            EditField::Link => {
                if let Some(url) = get("url") {
                    draft.link_url = optional(url);
                }
            }
        }
        draft.validate()?;
        Ok(draft)
    }
}

/// Identifies one editable node on the page.
///
/// `item_id == None` targets the section itself (only its title is editable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EditTarget {
    pub section_id: SectionId,
    pub item_id: Option<ItemId>,
    pub field: EditField,
}

impl EditTarget {
    pub fn item(section_id: SectionId, item_id: ItemId, field: EditField) -> Self {
        Self {
            section_id,
            item_id: Some(item_id),
            field,
        }
    }

    pub fn section_title(section_id: SectionId) -> Self {
        Self {
            section_id,
            item_id: None,
            field: EditField::Title,
        }
    }

    pub fn edit_type(&self) -> EditType {
        self.field.edit_type()
    }

    /// Read the current values of this node from the section list.
    pub fn current_values(&self, sections: &[Section]) -> Option<EditValues> {
        let section = sections.iter().find(|s| s.id == self.section_id)?;
        match self.item_id {
            Some(item_id) => Some(self.field.values_of(section.item(item_id)?)),
            None => {
                let mut values = EditValues::new();
                values.insert(
                    "text".to_string(),
                    section.title.clone().unwrap_or_default(),
                );
                Some(values)
            }
        }
    }
}

/// Choices offered by the modal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditOptions {
    pub categories: Vec<String>,
    pub quick_dates: Vec<String>,
    pub image_presets: Vec<String>,
    pub image_preset_base: String,
}

/// Synthesize an image URL from a preset category.
///
/// `seed` keeps repeated presses from producing the same image.
pub fn preset_source(base: &str, category: &str, seed: u32) -> String {
    let base = base.trim_end_matches('/');
    let category = crate::content::slugify(category);
    format!("{base}/{category}/{seed}.jpg")
}

/// Keep only the keys the edit type defines AND the session was opened with.
pub fn reduce_patch(edit_type: EditType, initial: &EditValues, form: &EditValues) -> EditValues {
    edit_type
        .fields()
        .iter()
        .filter(|key| initial.contains_key(**key))
        .map(|key| {
            let value = form
                .get(*key)
                .or_else(|| initial.get(*key))
                .cloned()
                .unwrap_or_default();
            (key.to_string(), value)
        })
        .collect()
}

/// `205` -> `"3:25"`
pub fn format_duration(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Accepts `"205"`, `"3:25"` or `"1:03:25"`.
pub fn parse_duration(value: &str) -> Option<u32> {
    let parts: Vec<&str> = value.trim().split(':').collect();
    if parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    let mut total: u32 = 0;
    for (i, part) in parts.iter().enumerate() {
        let n: u32 = part.parse().ok()?;
        if i > 0 && n >= 60 {
            return None;
        }
        total = total.checked_mul(60)?.checked_add(n)?;
    }
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::SectionType;

    fn values(pairs: &[(&str, &str)]) -> EditValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_reduce_patch_drops_foreign_keys() {
        let initial = values(&[("src", "a.jpg"), ("alt", "A")]);
        let form = values(&[("src", "b.jpg"), ("alt", "B"), ("text", "sneaky"), ("url", "x")]);
        let patch = reduce_patch(EditType::Image, &initial, &form);
        assert_eq!(patch, values(&[("src", "b.jpg"), ("alt", "B")]));
    }

    #[test]
    fn test_reduce_patch_never_adds_uninitialized_keys() {
        let initial = values(&[("src", "a.jpg")]);
        let form = values(&[("src", "b.jpg"), ("alt", "new alt")]);
        let patch = reduce_patch(EditType::Image, &initial, &form);
        assert_eq!(patch.keys().collect::<Vec<_>>(), vec!["src"]);
    }

    #[test]
    fn test_reduce_patch_keys_subset_of_type_fields_for_every_type() {
        let everything = values(&[
            ("src", "1"),
            ("alt", "2"),
            ("category", "3"),
            ("date", "4"),
            ("read_time", "5"),
            ("duration", "6"),
            ("text", "7"),
            ("url", "8"),
        ]);
        for edit_type in [
            EditType::Image,
            EditType::Category,
            EditType::Date,
            EditType::ReadTime,
            EditType::Duration,
            EditType::Text,
            EditType::Link,
        ] {
            let patch = reduce_patch(edit_type, &everything, &everything);
            assert!(patch.keys().all(|k| edit_type.fields().contains(&k.as_str())));
            assert_eq!(patch.len(), edit_type.fields().len());
        }
    }

    #[test]
    fn test_field_values_use_type_keys() {
        let mut item = ContentItem::new(1, "Headline");
        item.image_url = Some("https://img/1.jpg".into());
        let image = EditField::Image.values_of(&item);
        assert_eq!(image.get("src").map(String::as_str), Some("https://img/1.jpg"));
        assert_eq!(image.get("alt").map(String::as_str), Some(""));

        let title = EditField::Title.values_of(&item);
        assert_eq!(title, values(&[("text", "Headline")]));
    }

    #[test]
    fn test_apply_patch_updates_only_edited_field() {
        let mut item = ContentItem::new(4, "Old").with_category("sports");
        item.link_url = Some("https://a".into());
        let draft = EditField::Title
            .apply(&item, &values(&[("text", " New title ")]))
            .unwrap();
        assert_eq!(draft.title, "New title");
        assert_eq!(draft.category.as_deref(), Some("sports"));
        assert_eq!(draft.link_url.as_deref(), Some("https://a"));
    }

    #[test]
    fn test_apply_rejects_blank_title() {
        let item = ContentItem::new(4, "Old");
        let errors = EditField::Title
            .apply(&item, &values(&[("text", "   ")]))
            .unwrap_err();
        assert!(errors.for_field("title").is_some());
    }

    #[test]
    fn test_apply_duration_parses_clock_format() {
        let item = ContentItem::new(4, "Podcast");
        let draft = EditField::Duration
            .apply(&item, &values(&[("duration", "3:25")]))
            .unwrap();
        assert_eq!(draft.duration, Some(205));
        assert!(EditField::Duration
            .apply(&item, &values(&[("duration", "3:99")]))
            .is_err());
    }

    #[test]
    fn test_duration_format_round_trip() {
        assert_eq!(format_duration(205), "3:25");
        assert_eq!(format_duration(3805), "1:03:25");
        assert_eq!(parse_duration("1:03:25"), Some(3805));
        assert_eq!(parse_duration("42"), Some(42));
        assert_eq!(parse_duration("a:b"), None);
        assert_eq!(parse_duration(""), None);
    }

    #[test]
    fn test_preset_source() {
        assert_eq!(
            preset_source("https://img.example.com/presets/", "World News", 7),
            "https://img.example.com/presets/world-news/7.jpg"
        );
    }

    #[test]
    fn test_current_values_read_from_sections() {
        let section = Section::new(3, SectionType::Featured, 1)
            .with_title("Top")
            .with_items(vec![ContentItem::new(9, "Story").with_category("politics")]);
        let sections = vec![section];

        let target = EditTarget::item(3, 9, EditField::Category);
        assert_eq!(
            target.current_values(&sections),
            Some(values(&[("category", "politics")]))
        );
        assert_eq!(
            EditTarget::section_title(3).current_values(&sections),
            Some(values(&[("text", "Top")]))
        );
        assert_eq!(EditTarget::item(3, 10, EditField::Title).current_values(&sections), None);
    }
}
