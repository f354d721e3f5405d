//! Create/edit forms.
//!
//! A [`FormState`] is a list of labelled fields with a focus. Submitting
//! builds the draft for its [`FormKind`] and validates it locally; nothing
//! is sent while validation fails.

use std::path::Path;

use newsdesk_core::{
    AdDraft, AdFormat, AdId, AdKind, Advertisement, Article, ArticleDraft, ArticleId, CardSize,
    Category, CategoryDraft, CategoryId, ContentItem, ItemDraft, ItemId, Orientation,
    PasswordChange, SectionDraft, SectionId, SectionStyle, SectionType, Upload, ValidationError,
    ValidationErrors,
};

use crate::actions::Mutation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    NewSection,
    NewItem { section_id: SectionId },
    EditItem { section_id: SectionId, item_id: ItemId },
    NewCategory,
    EditCategory(CategoryId),
    NewAd,
    EditAd(AdId),
    NewArticle,
    EditArticle(ArticleId),
    ChangePassword,
}

impl FormKind {
    pub fn title(&self) -> &'static str {
        match self {
            FormKind::NewSection => "New section",
            FormKind::NewItem { .. } => "New item",
            FormKind::EditItem { .. } => "Edit item",
            FormKind::NewCategory => "New category",
            FormKind::EditCategory(_) => "Edit category",
            FormKind::NewAd => "New advertisement",
            FormKind::EditAd(_) => "Edit advertisement",
            FormKind::NewArticle => "New article",
            FormKind::EditArticle(_) => "Edit article",
            FormKind::ChangePassword => "Change password",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    Secret,
    /// One of a fixed list; `""` allowed when `optional`
    Choice { choices: Vec<String>, optional: bool },
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
}

impl FormField {
    fn text(key: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Text,
            value: value.into(),
        }
    }

    fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    fn choice(key: &'static str, label: &'static str, choices: Vec<String>, optional: bool) -> Self {
        let value = if optional {
            String::new()
        } else {
            choices.first().cloned().unwrap_or_default()
        };
        Self {
            key,
            label,
            kind: FieldKind::Choice { choices, optional },
            value,
        }
    }

    fn toggle(key: &'static str, label: &'static str, on: bool) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Toggle,
            value: on.to_string(),
        }
    }

    /// Masked for secrets
    pub fn display_value(&self) -> String {
        match self.kind {
            FieldKind::Secret => "•".repeat(self.value.chars().count()),
            FieldKind::Toggle => (if self.value == "true" { "[x]" } else { "[ ]" }).to_string(),
            _ => self.value.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub focus: usize,
    pub errors: ValidationErrors,
    /// Server-side failure message
    pub error: Option<String>,
    pub submitting: bool,
}

impl FormState {
    fn new(kind: FormKind, fields: Vec<FormField>) -> Self {
        Self {
            kind,
            fields,
            focus: 0,
            errors: ValidationErrors::new(),
            error: None,
            submitting: false,
        }
    }

    pub fn new_section(next_position: i32) -> Self {
        let types = SectionType::KNOWN.iter().map(|t| t.as_str().to_string()).collect();
        Self::new(
            FormKind::NewSection,
            vec![
                FormField::choice("type", "Type", types, false),
                FormField::text("title", "Title", ""),
                FormField::text("position", "Position", next_position.to_string()),
                FormField::text("background_color", "Background", ""),
                FormField::text("text_color", "Text color", ""),
                FormField::text("font_family", "Font", ""),
            ],
        )
    }

    pub fn new_item(section_id: SectionId) -> Self {
        Self::new(FormKind::NewItem { section_id }, item_fields(&ContentItem::default()))
    }

    pub fn edit_item(section_id: SectionId, item: &ContentItem) -> Self {
        Self::new(
            FormKind::EditItem {
                section_id,
                item_id: item.id,
            },
            item_fields(item),
        )
    }

    pub fn new_category() -> Self {
        Self::new(
            FormKind::NewCategory,
            vec![
                FormField::text("name", "Name", ""),
                FormField::text("slug", "Slug (blank = from name)", ""),
            ],
        )
    }

    pub fn edit_category(category: &Category) -> Self {
        Self::new(
            FormKind::EditCategory(category.id),
            vec![
                FormField::text("name", "Name", category.name.clone()),
                FormField::text("slug", "Slug (blank = from name)", category.slug.clone()),
            ],
        )
    }

    pub fn new_ad() -> Self {
        Self::new(FormKind::NewAd, ad_fields(None))
    }

    pub fn edit_ad(ad: &Advertisement) -> Self {
        Self::new(FormKind::EditAd(ad.id), ad_fields(Some(ad)))
    }

    pub fn new_article(categories: &[Category]) -> Self {
        Self::new(FormKind::NewArticle, article_fields(None, categories))
    }

    pub fn edit_article(article: &Article, categories: &[Category]) -> Self {
        Self::new(
            FormKind::EditArticle(article.id),
            article_fields(Some(article), categories),
        )
    }

    pub fn change_password() -> Self {
        let secret = |key, label| FormField::text(key, label, "").with_kind(FieldKind::Secret);
        Self::new(
            FormKind::ChangePassword,
            vec![
                secret("current_password", "Current password"),
                secret("new_password", "New password"),
                secret("confirm_password", "Confirm password"),
            ],
        )
    }

    pub fn value(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
            .unwrap_or_default()
    }

    fn optional(&self, key: &str) -> Option<String> {
        let value = self.value(key).trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    pub fn set_value(&mut self, key: &str, value: impl Into<String>) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.key == key) {
            field.value = value.into();
        }
    }

    pub fn focused(&self) -> Option<&FormField> {
        self.fields.get(self.focus)
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Type into the focused field. Choice and toggle fields ignore text,
    /// except space which flips a toggle.
    pub fn input(&mut self, c: char) {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };
        match field.kind {
            FieldKind::Text | FieldKind::Secret => {
                if c != '\n' {
                    field.value.push(c);
                }
            }
            FieldKind::Multiline => field.value.push(c),
            FieldKind::Toggle if c == ' ' => {
                field.value = (field.value != "true").to_string();
            }
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if matches!(field.kind, FieldKind::Text | FieldKind::Secret | FieldKind::Multiline) {
                field.value.pop();
            }
        }
    }

    /// Step a choice field or flip a toggle.
    pub fn cycle(&mut self, forward: bool) {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };
        match &field.kind {
            FieldKind::Choice { choices, optional } => {
                let mut options: Vec<&str> = Vec::new();
                if *optional {
                    options.push("");
                }
                options.extend(choices.iter().map(String::as_str));
                if options.is_empty() {
                    return;
                }
                let len = options.len();
                let current = options.iter().position(|o| *o == field.value).unwrap_or(0);
                let next = if forward {
                    (current + 1) % len
                } else {
                    (current + len - 1) % len
                };
                field.value = options[next].to_string();
            }
            FieldKind::Toggle => field.value = (field.value != "true").to_string(),
            _ => {}
        }
    }

    /// Error for `key` from the last submit, if any.
    pub fn field_error(&self, key: &str) -> Option<String> {
        self.errors.for_field(key).map(|e| e.to_string())
    }

    /// Build and validate the request. Validation errors are kept on the
    /// form so the view can show them inline.
    pub fn submit(&mut self, categories: &[Category]) -> Option<Mutation> {
        match self.build(categories) {
            Ok(mutation) => {
                self.errors = ValidationErrors::new();
                self.error = None;
                self.submitting = true;
                Some(mutation)
            }
            Err(errors) => {
                tracing::debug!("{} rejected locally: {}", self.kind.title(), errors);
                self.errors = errors;
                None
            }
        }
    }

    pub fn build(&self, categories: &[Category]) -> Result<Mutation, ValidationErrors> {
        let mutation = match self.kind {
            FormKind::NewSection => {
                let position = self.value("position").trim().parse::<i32>().map_err(|_| {
                    ValidationErrors::from(vec![ValidationError::invalid(
                        "position",
                        "must be a whole number",
                    )])
                })?;
                let draft = SectionDraft {
                    section_type: SectionType::parse(self.value("type")),
                    title: self.optional("title"),
                    position,
                    style: SectionStyle {
                        background_color: self.optional("background_color"),
                        font_family: self.optional("font_family"),
                        text_color: self.optional("text_color"),
                    },
                };
                draft.validate()?;
                Mutation::CreateSection(draft)
            }
            FormKind::NewItem { section_id } => Mutation::AddItem {
                section_id,
                draft: self.item_draft()?,
            },
            FormKind::EditItem {
                section_id,
                item_id,
            } => Mutation::UpdateItem {
                section_id,
                item_id,
                draft: self.item_draft()?,
            },
            FormKind::NewCategory => Mutation::CreateCategory(self.category_draft()?),
            FormKind::EditCategory(id) => Mutation::UpdateCategory {
                id,
                draft: self.category_draft()?,
            },
            FormKind::NewAd => Mutation::CreateAd(self.ad_draft()?),
            FormKind::EditAd(id) => Mutation::UpdateAd {
                id,
                draft: self.ad_draft()?,
            },
            FormKind::NewArticle => Mutation::CreateArticle(self.article_draft(categories)?),
            FormKind::EditArticle(id) => Mutation::UpdateArticle {
                id,
                draft: self.article_draft(categories)?,
            },
            FormKind::ChangePassword => {
                let change = PasswordChange {
                    current: self.value("current_password").to_string(),
                    new: self.value("new_password").to_string(),
                    confirm: self.value("confirm_password").to_string(),
                };
                change.validate()?;
                Mutation::ChangePassword(change)
            }
        };
        Ok(mutation)
    }

    fn item_draft(&self) -> Result<ItemDraft, ValidationErrors> {
        let mut draft = ItemDraft {
            title: self.value("title").trim().to_string(),
            category: self.optional("category"),
            image_url: self.optional("image_url"),
            image_alt: self.optional("image_alt"),
            audio_url: self.optional("audio_url"),
            link_url: self.optional("link_url"),
            summary: self.optional("summary"),
            date: self.optional("date"),
            read_time: self.optional("read_time"),
            ..Default::default()
        };
        if let Some(raw) = self.optional("duration") {
            draft.duration = Some(newsdesk_core::parse_duration(&raw).ok_or_else(|| {
                ValidationErrors::from(vec![ValidationError::invalid(
                    "duration",
                    "must look like 3:25 or a number of seconds",
                )])
            })?);
        }
        if let Some(size) = self.optional("size").and_then(|s| CardSize::parse(&s)) {
            draft.set_size(size);
        }
        if let Some(orientation) = self.optional("orientation").and_then(|o| Orientation::parse(&o)) {
            draft.set_orientation(Some(orientation));
        }
        draft.validate()?;
        Ok(draft)
    }

    fn category_draft(&self) -> Result<CategoryDraft, ValidationErrors> {
        let draft = CategoryDraft::new(self.value("name").trim(), self.value("slug").trim());
        draft.validate()?;
        Ok(draft)
    }

    fn ad_draft(&self) -> Result<AdDraft, ValidationErrors> {
        let kind = match self.value("type") {
            "script" => AdKind::Script,
            _ => AdKind::Image,
        };
        let image_file = match self.optional("image_file") {
            Some(path) => Some(read_upload(Path::new(&path))?),
            None => None,
        };
        let draft = AdDraft {
            name: self.value("name").trim().to_string(),
            kind,
            format: AdFormat::parse(self.value("format")),
            image_url: self.optional("image_url"),
            script: self.optional("script"),
            target_url: self.optional("target_url"),
            starts_at: None,
            ends_at: None,
            active: self.value("active") == "true",
            image_file,
        };
        draft.validate()?;
        Ok(draft)
    }

    fn article_draft(&self, categories: &[Category]) -> Result<ArticleDraft, ValidationErrors> {
        let category_id = categories
            .iter()
            .find(|c| c.name == self.value("category"))
            .map(|c| c.id);
        let image_file = match self.optional("image_file") {
            Some(path) => Some(read_upload(Path::new(&path))?),
            None => None,
        };
        let draft = ArticleDraft {
            title: self.value("title").trim().to_string(),
            summary: self.optional("summary"),
            body: self.value("body").trim().to_string(),
            category_id,
            image_url: self.optional("image_url"),
            read_time: self.optional("read_time"),
            image_file,
        };
        draft.validate()?;
        Ok(draft)
    }
}

fn read_upload(path: &Path) -> Result<Upload, ValidationErrors> {
    let bytes = std::fs::read(path).map_err(|e| {
        ValidationErrors::from(vec![ValidationError::invalid(
            "image_file",
            format!("cannot read {}: {e}", path.display()),
        )])
    })?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(Upload::new(filename, bytes))
}

fn item_fields(item: &ContentItem) -> Vec<FormField> {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    let sizes = CardSize::ALL.iter().map(|s| s.as_str().to_string()).collect();
    let orientations = vec![
        Orientation::Vertical.as_str().to_string(),
        Orientation::Horizontal.as_str().to_string(),
    ];
    let mut size = FormField::choice("size", "Size", sizes, true);
    size.value = item.size().map(|s| s.as_str().to_string()).unwrap_or_default();
    let mut orientation = FormField::choice("orientation", "Orientation", orientations, true);
    orientation.value = item
        .orientation()
        .map(|o| o.as_str().to_string())
        .unwrap_or_default();

    vec![
        FormField::text("title", "Title", item.title.clone()),
        FormField::text("category", "Category", opt(&item.category)),
        size,
        orientation,
        FormField::text("image_url", "Image URL", opt(&item.image_url)),
        FormField::text("image_alt", "Image alt", opt(&item.image_alt)),
        FormField::text("audio_url", "Audio URL", opt(&item.audio_url)),
        FormField::text(
            "duration",
            "Duration",
            item.duration.map(newsdesk_core::format_duration).unwrap_or_default(),
        ),
        FormField::text("link_url", "Link", opt(&item.link_url)),
        FormField::text("summary", "Summary", opt(&item.summary)).with_kind(FieldKind::Multiline),
        FormField::text("date", "Date", opt(&item.date)),
        FormField::text("read_time", "Read time", opt(&item.read_time)),
    ]
}

fn ad_fields(ad: Option<&Advertisement>) -> Vec<FormField> {
    let opt = |f: fn(&Advertisement) -> Option<String>| ad.and_then(f).unwrap_or_default();
    let formats = AdFormat::ALL.iter().map(|f| f.as_str().to_string()).collect();
    let mut kind = FormField::choice(
        "type",
        "Type",
        vec![AdKind::Image.as_str().to_string(), AdKind::Script.as_str().to_string()],
        false,
    );
    let mut format = FormField::choice("format", "Format", formats, true);
    if let Some(ad) = ad {
        kind.value = ad.kind.as_str().to_string();
        format.value = ad.format.map(|f| f.as_str().to_string()).unwrap_or_default();
    }

    vec![
        FormField::text("name", "Name", opt(|a| Some(a.name.clone()))),
        kind,
        format,
        FormField::text("image_url", "Image URL", opt(|a| a.image_url.clone())),
        FormField::text("image_file", "Image file (local path)", ""),
        FormField::text("target_url", "Target URL", opt(|a| a.target_url.clone())),
        FormField::text("script", "Script", opt(|a| a.script.clone())).with_kind(FieldKind::Multiline),
        FormField::toggle("active", "Active", ad.map_or(true, |a| a.active)),
    ]
}

fn article_fields(article: Option<&Article>, categories: &[Category]) -> Vec<FormField> {
    let opt = |f: fn(&Article) -> Option<String>| article.and_then(f).unwrap_or_default();
    let names = categories.iter().map(|c| c.name.clone()).collect();
    let mut category = FormField::choice("category", "Category", names, true);
    if let Some(id) = article.and_then(|a| a.category_id) {
        if let Some(c) = categories.iter().find(|c| c.id == id) {
            category.value = c.name.clone();
        }
    }

    vec![
        FormField::text("title", "Title", opt(|a| Some(a.title.clone()))),
        FormField::text("summary", "Summary", opt(|a| a.summary.clone())),
        FormField::text("body", "Body", opt(|a| Some(a.body.clone()))).with_kind(FieldKind::Multiline),
        category,
        FormField::text("image_url", "Image URL", opt(|a| a.image_url.clone())),
        FormField::text("image_file", "Image file (local path)", ""),
        FormField::text("read_time", "Read time", opt(|a| a.read_time.clone())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(form: &mut FormState, key: &str, text: &str) {
        form.focus = form.fields.iter().position(|f| f.key == key).unwrap();
        for c in text.chars() {
            form.input(c);
        }
    }

    #[test]
    fn test_image_ad_without_target_url_is_rejected() {
        let mut form = FormState::new_ad();
        type_into(&mut form, "name", "Spring sale");
        type_into(&mut form, "image_url", "https://img.test/ad.png");
        form.set_value("format", "leaderboard");

        assert!(form.submit(&[]).is_none());
        assert!(form.field_error("target_url").is_some());
        assert!(!form.submitting);
    }

    #[test]
    fn test_valid_category_builds_mutation() {
        let mut form = FormState::new_category();
        type_into(&mut form, "name", "World News");
        match form.submit(&[]) {
            Some(Mutation::CreateCategory(draft)) => assert_eq!(draft.slug, "world-news"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(form.submitting);
    }

    #[test]
    fn test_password_mismatch_is_inline_error() {
        let mut form = FormState::change_password();
        type_into(&mut form, "current_password", "old-secret");
        type_into(&mut form, "new_password", "new-secret-1");
        type_into(&mut form, "confirm_password", "new-secret-2");
        assert!(form.submit(&[]).is_none());
        assert!(form.field_error("confirm_password").is_some());
        assert_eq!(form.fields[1].display_value(), "••••••••••••");
    }

    #[test]
    fn test_item_size_choice_applies_exclusivity() {
        let mut form = FormState::new_item(3);
        type_into(&mut form, "title", "Budget vote");
        form.set_value("orientation", "horizontal");
        form.set_value("size", "extralarge");
        match form.build(&[]).unwrap() {
            Mutation::AddItem { section_id, draft } => {
                assert_eq!(section_id, 3);
                // orientation applied last steps the size down
                assert_eq!(draft.size, Some(CardSize::Large));
                assert_eq!(draft.orientation, Some(Orientation::Horizontal));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_choice_cycles_with_blank_when_optional() {
        let mut form = FormState::new_item(1);
        form.focus = form.fields.iter().position(|f| f.key == "size").unwrap();
        assert_eq!(form.value("size"), "");
        form.cycle(true);
        assert_eq!(form.value("size"), "small");
        form.cycle(false);
        form.cycle(false);
        assert_eq!(form.value("size"), "extralarge");
        form.input('z');
        assert_eq!(form.value("size"), "extralarge");
    }

    #[test]
    fn test_article_category_resolves_by_name() {
        let categories = vec![Category {
            id: 4,
            name: "Sports".into(),
            slug: "sports".into(),
        }];
        let mut form = FormState::new_article(&categories);
        type_into(&mut form, "title", "Cup final tonight");
        type_into(&mut form, "body", "Kick-off at eight.");
        form.set_value("category", "Sports");
        match form.build(&categories).unwrap() {
            Mutation::CreateArticle(draft) => assert_eq!(draft.category_id, Some(4)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unreadable_upload_is_validation_error() {
        let mut form = FormState::new_ad();
        type_into(&mut form, "name", "Promo");
        type_into(&mut form, "image_file", "/definitely/not/here.png");
        let errors = form.build(&[]).unwrap_err();
        assert!(errors.for_field("image_file").is_some());
    }

    #[test]
    fn test_section_position_must_be_numeric() {
        let mut form = FormState::new_section(4);
        assert_eq!(form.value("position"), "4");
        form.set_value("position", "four");
        assert!(form.build(&[]).unwrap_err().for_field("position").is_some());
    }
}
