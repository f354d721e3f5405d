//! Editable-node registry.
//!
//! While edit mode is on every editable node on the page has a binding
//! keyed by its [`EditTarget`]. A binding only becomes clickable once the
//! view has mounted the node for the current frame; until then it is
//! pending. Values and options are never captured here: the handler reads
//! them from state when the binding fires.

use std::collections::BTreeMap;

use newsdesk_core::{EditField, EditTarget, EditType, Section};

/// Screen rectangle, in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Area {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Area {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && y >= self.y
            && (x as u32) < self.x as u32 + self.width as u32
            && (y as u32) < self.y as u32 + self.height as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub target: EditTarget,
    pub edit_type: EditType,
}

#[derive(Debug, Default)]
pub struct BindingRegistry {
    bindings: BTreeMap<EditTarget, Binding>,
    mounted: BTreeMap<EditTarget, Area>,
    focus: Option<EditTarget>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `target`. Binding an already-bound target replaces it.
    pub fn bind(&mut self, target: EditTarget, edit_type: EditType) {
        self.bindings.insert(target, Binding { target, edit_type });
    }

    /// Drop one binding. Unknown targets are ignored.
    pub fn unbind(&mut self, target: &EditTarget) {
        self.bindings.remove(target);
        self.mounted.remove(target);
        if self.focus.as_ref() == Some(target) {
            self.focus = None;
        }
    }

    /// Drop every binding. Safe to call repeatedly.
    pub fn detach_all(&mut self) {
        self.bindings.clear();
        self.mounted.clear();
        self.focus = None;
    }

    /// Bind every editable node of `sections`, replacing what was there.
    pub fn bind_sections(&mut self, sections: &[Section]) {
        let focus = self.focus;
        self.detach_all();
        for target in editable_targets(sections) {
            self.bind(target, target.edit_type());
        }
        self.focus = focus.filter(|t| self.bindings.contains_key(t));
    }

    /// Record where the view drew `target` this frame.
    pub fn mount(&mut self, target: EditTarget, area: Area) {
        if self.bindings.contains_key(&target) {
            self.mounted.insert(target, area);
        }
    }

    /// Forget last frame's geometry. Bindings stay.
    pub fn unmount_all(&mut self) {
        self.mounted.clear();
    }

    pub fn is_bound(&self, target: &EditTarget) -> bool {
        self.bindings.contains_key(target)
    }

    /// Bound and mounted
    pub fn is_active(&self, target: &EditTarget) -> bool {
        self.bindings.contains_key(target) && self.mounted.contains_key(target)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Number of bindings for `target`; at most one.
    pub fn count_for(&self, target: &EditTarget) -> usize {
        self.bindings.keys().filter(|t| *t == target).count()
    }

    /// Active binding under the given cell. The smallest area wins when
    /// mounted nodes overlap.
    pub fn hit(&self, x: u16, y: u16) -> Option<Binding> {
        self.mounted
            .iter()
            .filter(|(_, area)| area.contains(x, y))
            .min_by_key(|(_, area)| area.width as u32 * area.height as u32)
            .and_then(|(target, _)| self.bindings.get(target).copied())
    }

    pub fn focused(&self) -> Option<Binding> {
        self.focus.and_then(|t| self.bindings.get(&t).copied())
    }

    pub fn is_focused(&self, target: &EditTarget) -> bool {
        self.focus.as_ref() == Some(target)
    }

    /// Move focus to the next active binding, wrapping around.
    pub fn focus_next(&mut self) {
        let active = self.active_targets();
        self.focus = step(&active, self.focus, true);
    }

    pub fn focus_prev(&mut self) {
        let active = self.active_targets();
        self.focus = step(&active, self.focus, false);
    }

    fn active_targets(&self) -> Vec<EditTarget> {
        self.bindings
            .keys()
            .filter(|t| self.mounted.contains_key(*t))
            .copied()
            .collect()
    }
}

fn step(targets: &[EditTarget], current: Option<EditTarget>, forward: bool) -> Option<EditTarget> {
    if targets.is_empty() {
        return None;
    }
    let len = targets.len();
    let index = match current.and_then(|c| targets.iter().position(|t| *t == c)) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    targets.get(index).copied()
}

/// Fields the page exposes for inline editing on an item.
const ITEM_FIELDS: [EditField; 8] = [
    EditField::Title,
    EditField::Summary,
    EditField::Image,
    EditField::Category,
    EditField::Date,
    EditField::ReadTime,
    EditField::Duration,
    EditField::Link,
];

/// Every editable node the page shows for `sections`.
///
/// Section titles are always editable. Item fields are editable when the
/// item carries them, plus title and category which every card shows.
pub fn editable_targets(sections: &[Section]) -> Vec<EditTarget> {
    let mut targets = Vec::new();
    for section in sections {
        if !section.section_type.is_known() {
            continue;
        }
        targets.push(EditTarget::section_title(section.id));
        for item in &section.items {
            for field in ITEM_FIELDS {
                let shown = match field {
                    EditField::Title | EditField::Category => true,
                    EditField::Summary => item.summary.is_some(),
                    EditField::Image => item.image_url.is_some(),
                    EditField::Date => item.date.is_some(),
                    EditField::ReadTime => item.read_time.is_some(),
                    EditField::Duration => item.duration.is_some() || item.audio_url.is_some(),
                    EditField::Link => item.link_url.is_some(),
                };
                if shown {
                    targets.push(EditTarget::item(section.id, item.id, field));
                }
            }
        }
    }
    targets
}
