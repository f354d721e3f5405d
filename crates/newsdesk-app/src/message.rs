//! Message types for the application (TEA pattern)

use std::path::PathBuf;

use newsdesk_api::{ActionResult, AuditEntry, CurrentUser, ExportKind, Page};
use newsdesk_core::{
    AdId, Advertisement, Article, ArticleId, Category, CategoryId, EditTarget, EditValues, ItemId,
    Route, Section, SectionId,
};

use crate::forms::FormKind;
use crate::hooks::Ticket;
use crate::input_key::InputKey;
use crate::intents::SectionIntent;
use crate::state::AdminTab;

/// A cache the app can (re)load from the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    User,
    Sections,
    Categories,
    Ads,
    Articles { page: u32 },
    Article(ArticleId),
    AuditLog { page: u32 },
}

/// Record a delete confirmation is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Section(SectionId),
    Item {
        section_id: SectionId,
        item_id: ItemId,
    },
    Category(CategoryId),
    Article(ArticleId),
    Ad(AdId),
}

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    // ─────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────
    Key(InputKey),
    /// Left click at a terminal cell
    Click {
        x: u16,
        y: u16,
    },
    Tick,
    Quit,

    // ─────────────────────────────────────────────────────────
    // Data
    // ─────────────────────────────────────────────────────────
    UserLoaded(CurrentUser),
    SectionsLoaded(Vec<Section>),
    CategoriesLoaded(Vec<Category>),
    AdsLoaded(Vec<Advertisement>),
    ArticlesLoaded(Page<Article>),
    ArticleLoaded(Article),
    AuditLogLoaded(Page<AuditEntry>),
    FetchFailed {
        resource: Resource,
        message: String,
        unauthorized: bool,
    },

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    Navigate(Route),
    NextCategory,
    PrevCategory,
    SelectAdminTab(AdminTab),
    NextAdminTab,
    PrevAdminTab,
    SelectNext,
    SelectPrev,
    SelectNextSection,
    SelectPrevSection,
    NextPage,
    PrevPage,
    OpenSelected,

    // ─────────────────────────────────────────────────────────
    // Edit mode
    // ─────────────────────────────────────────────────────────
    ToggleEditMode,
    FocusNextBinding,
    FocusPrevBinding,
    ActivateFocused,
    ActivateBinding(EditTarget),

    // ─────────────────────────────────────────────────────────
    // Edit modal
    // ─────────────────────────────────────────────────────────
    EditInput(char),
    EditBackspace,
    EditNewline,
    EditNextField,
    EditPrevField,
    EditQuickPick(usize),
    EditPreset(usize),
    EditCycleOption {
        forward: bool,
    },
    EditSubmit,
    EditClose,
    /// The modal produced a patch for `target`
    EditSaved {
        target: EditTarget,
        patch: EditValues,
    },

    // ─────────────────────────────────────────────────────────
    // Sections
    // ─────────────────────────────────────────────────────────
    SectionIntent {
        section_id: SectionId,
        intent: SectionIntent,
    },
    /// Move the selected section up or down the page
    MoveSection {
        down: bool,
    },
    /// Intents for the currently selected item
    AddToSelected,
    EditSelected,
    DeleteSelected,
    MoveSelected {
        down: bool,
    },

    // ─────────────────────────────────────────────────────────
    // Forms
    // ─────────────────────────────────────────────────────────
    OpenForm(FormKind),
    FormInput(char),
    FormBackspace,
    FormNextField,
    FormPrevField,
    FormCycle {
        forward: bool,
    },
    FormSubmit,
    FormCancel,

    // ─────────────────────────────────────────────────────────
    // Confirmation
    // ─────────────────────────────────────────────────────────
    RequestDelete(DeleteTarget),
    ConfirmSelectNext,
    ConfirmAccept,
    ConfirmCancel,

    // ─────────────────────────────────────────────────────────
    // Admin
    // ─────────────────────────────────────────────────────────
    ToggleAdActive(AdId),
    Export(ExportKind),

    // ─────────────────────────────────────────────────────────
    // Results
    // ─────────────────────────────────────────────────────────
    MutationFinished {
        ticket: Ticket,
        result: ActionResult<()>,
    },
    ExportFinished {
        ticket: Ticket,
        result: ActionResult<PathBuf>,
    },

    // ─────────────────────────────────────────────────────────
    // Audio
    // ─────────────────────────────────────────────────────────
    PlayAudio {
        section_id: SectionId,
        item_id: ItemId,
    },
    ToggleAudioPause,
    StopAudio,

    DismissToast,
    /// Reload the page caches
    Refresh,
    /// Reload everything after a 401
    RetryLogin,
}
