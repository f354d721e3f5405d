//! The shared edit modal.
//!
//! There is exactly one modal. Opening it while a session is live replaces
//! that session; closing it drops the form without saving.

use newsdesk_core::{preset_source, reduce_patch, EditOptions, EditTarget, EditType, EditValues};

use crate::bindings::Area;

/// An open edit form
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub target: EditTarget,
    pub edit_type: EditType,
    /// Values the session was opened (or last refreshed) with
    pub initial: EditValues,
    pub form: EditValues,
    pub options: EditOptions,
    /// Index into [`EditSession::keys`]
    pub focus: usize,
    /// Set when a refresh replaced what the user had typed
    pub values_refreshed: bool,
    pub error: Option<String>,
    pub saving: bool,
}

impl EditSession {
    fn new(target: EditTarget, values: EditValues, options: EditOptions) -> Self {
        let edit_type = target.edit_type();
        Self {
            target,
            edit_type,
            form: values.clone(),
            initial: values,
            options,
            focus: 0,
            values_refreshed: false,
            error: None,
            saving: false,
        }
    }

    /// Form keys shown for this session, in field order.
    pub fn keys(&self) -> Vec<&'static str> {
        self.edit_type
            .fields()
            .iter()
            .copied()
            .filter(|k| self.initial.contains_key(*k))
            .collect()
    }

    pub fn focused_key(&self) -> Option<&'static str> {
        self.keys().get(self.focus).copied()
    }

    pub fn value(&self, key: &str) -> &str {
        self.form.get(key).map(String::as_str).unwrap_or_default()
    }

    fn focused_value_mut(&mut self) -> Option<&mut String> {
        let key = self.focused_key()?;
        if self.edit_type == EditType::Category {
            // single-select, not typed
            return None;
        }
        Some(self.form.entry(key.to_string()).or_default())
    }

    pub fn next_field(&mut self) {
        let len = self.keys().len();
        if len > 0 {
            self.focus = (self.focus + 1) % len;
        }
    }

    pub fn prev_field(&mut self) {
        let len = self.keys().len();
        if len > 0 {
            self.focus = (self.focus + len - 1) % len;
        }
    }

    pub fn input(&mut self, c: char) {
        if let Some(value) = self.focused_value_mut() {
            value.push(c);
        }
        self.error = None;
    }

    pub fn backspace(&mut self) {
        if let Some(value) = self.focused_value_mut() {
            value.pop();
        }
    }

    /// Only text is multi-line.
    pub fn newline(&mut self) {
        if self.edit_type == EditType::Text {
            self.input('\n');
        }
    }

    /// Fill the focused field with quick date `index`.
    pub fn quick_pick(&mut self, index: usize) -> bool {
        if !self.edit_type.has_quick_picks() {
            return false;
        }
        let Some(choice) = self.options.quick_dates.get(index).cloned() else {
            return false;
        };
        match self.focused_value_mut() {
            Some(value) => {
                *value = choice;
                true
            }
            None => false,
        }
    }

    /// Replace the image source with one synthesized from preset `index`.
    pub fn apply_preset(&mut self, index: usize, seed: u32) -> bool {
        if self.edit_type != EditType::Image || !self.initial.contains_key("src") {
            return false;
        }
        let Some(category) = self.options.image_presets.get(index) else {
            return false;
        };
        let src = preset_source(&self.options.image_preset_base, category, seed);
        self.form.insert("src".to_string(), src);
        true
    }

    /// Step through `options.categories`. Values outside the list are never set.
    pub fn cycle_category(&mut self, forward: bool) {
        if self.edit_type != EditType::Category || self.options.categories.is_empty() {
            return;
        }
        let choices = &self.options.categories;
        let len = choices.len();
        let current = choices
            .iter()
            .position(|c| c.eq_ignore_ascii_case(self.value("category")));
        let next = match current {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        if let Some(choice) = choices.get(next).cloned() {
            self.form.insert("category".to_string(), choice);
        }
    }

    /// Payload for saving: only the type's keys that the session was opened with.
    pub fn patch(&self) -> EditValues {
        reduce_patch(self.edit_type, &self.initial, &self.form)
    }

    pub fn is_dirty(&self) -> bool {
        self.form != self.initial
    }
}

/// Singleton holder for the live session
#[derive(Debug, Default)]
pub struct EditModal {
    session: Option<EditSession>,
    /// Where the view drew the modal last frame
    pub area: Option<Area>,
}

impl EditModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session, replacing any live one.
    ///
    /// Returns the target of the replaced session, if any.
    pub fn open(
        &mut self,
        target: EditTarget,
        values: EditValues,
        options: EditOptions,
    ) -> Option<EditTarget> {
        let replaced = self.session.take().map(|s| s.target);
        if let Some(old) = replaced {
            tracing::debug!("Edit session for {:?} replaced by {:?}", old, target);
        }
        self.session = Some(EditSession::new(target, values, options));
        replaced
    }

    /// Discard the session. Returns what it was editing.
    pub fn close(&mut self) -> Option<EditTarget> {
        self.area = None;
        self.session.take().map(|s| s.target)
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut EditSession> {
        self.session.as_mut()
    }

    /// Validate locally and hand back what to save.
    pub fn submit(&mut self) -> Option<(EditTarget, EditValues)> {
        let session = self.session.as_mut()?;
        if session.saving {
            return None;
        }
        session.saving = true;
        session.error = None;
        Some((session.target, session.patch()))
    }

    /// Save failed; keep the session open with an inline error.
    pub fn fail(&mut self, target: &EditTarget, message: impl Into<String>) {
        if let Some(session) = self.session.as_mut().filter(|s| s.target == *target) {
            session.saving = false;
            session.error = Some(message.into());
        }
    }

    /// The node's values changed underneath the open session.
    ///
    /// Identical values leave the session alone. Different values replace
    /// the form, dropping anything typed since opening; when that threw
    /// away input `values_refreshed` is raised so the view can say so.
    pub fn sync_values(&mut self, target: &EditTarget, values: EditValues) -> bool {
        let Some(session) = self.session.as_mut().filter(|s| s.target == *target) else {
            return false;
        };
        if session.initial == values {
            return false;
        }
        session.values_refreshed = session.is_dirty();
        session.form = values.clone();
        session.initial = values;
        session.focus = session.focus.min(session.keys().len().saturating_sub(1));
        true
    }

    /// A click outside the drawn modal dismisses it.
    pub fn click_outside(&self, x: u16, y: u16) -> bool {
        match (&self.session, self.area) {
            (Some(_), Some(area)) => !area.contains(x, y),
            _ => false,
        }
    }
}
