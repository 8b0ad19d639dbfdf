//! Generic lifecycle controller.
//!
//! Drives the select/create/accept/cancel/delete state machine shared by every
//! resource type:
//!
//! ```text
//!            select                 startCreate
//!   Idle ───────────→ Viewing      any ─────────→ Drafting
//!    ↑                  │ edit
//!    │ cancel/accept    ↓
//!    └──────────────  Editing / Drafting
//!    ↑
//!    └── delete/cancel ── Viewing
//! ```
//!
//! The selected entity is always a copy. Edits go through
//! [`selected_mut`](LifecycleController::selected_mut) and never reach the
//! collection until a successful accept splices the backend's canonical record
//! back in.
//!
//! Operations take `&mut self`, so a controller never runs two backend calls
//! at once. Backend calls may be bounded by
//! [`ControllerConfig::backend_timeout_secs`].

use std::future::Future;
use std::sync::Arc;

use idm_org::{Entity, SessionContext};
use tracing::{debug, info, instrument, warn};

use crate::behavior::ResourceBehavior;
use crate::collaborators::{Navigation, NotificationSink, ResourceService};
use crate::config::ControllerConfig;
use crate::error::{LifecycleError, LifecycleResult};
use crate::view::{CollectionView, SortDirection};

/// Observable selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// No selection, detail panel hidden
    Idle,
    /// Existing entity selected and unmodified
    Viewing,
    /// Existing entity selected and modified
    Editing,
    /// New entity being drafted
    Drafting,
}

/// Result of an accept or delete that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Backend call succeeded and state was reconciled
    Completed,
    /// Guard blocked the action; user was notified and selection cancelled
    Rejected,
    /// Backend answered that nothing was deleted; selection kept
    Refused,
}

/// Create/select/edit/delete controller for one resource type.
pub struct LifecycleController<E: Entity> {
    collection: Vec<E>,
    selected: E,
    original: Option<E>,
    is_new: bool,
    detail_visible: bool,
    view: CollectionView,
    context: SessionContext,
    service: Arc<dyn ResourceService<E>>,
    behavior: Arc<dyn ResourceBehavior<E>>,
    navigation: Arc<dyn Navigation>,
    notifier: Arc<dyn NotificationSink>,
    config: ControllerConfig,
}

impl<E: Entity> std::fmt::Debug for LifecycleController<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleController")
            .field("kind", &E::KIND)
            .field("collection_len", &self.collection.len())
            .field("selected", &self.selected.identification())
            .field("is_new", &self.is_new)
            .field("detail_visible", &self.detail_visible)
            .finish()
    }
}

impl<E: Entity> LifecycleController<E> {
    /// Creates a controller in the idle state with an empty collection.
    pub fn new(
        context: SessionContext,
        service: Arc<dyn ResourceService<E>>,
        behavior: Arc<dyn ResourceBehavior<E>>,
        navigation: Arc<dyn Navigation>,
        notifier: Arc<dyn NotificationSink>,
        config: ControllerConfig,
    ) -> Self {
        Self {
            collection: Vec::new(),
            selected: E::create_empty(),
            original: None,
            is_new: false,
            detail_visible: false,
            view: CollectionView::new(),
            context,
            service,
            behavior,
            navigation,
            notifier,
            config,
        }
    }

    /// Load the collection and follow a deep link, if the location carries one.
    ///
    /// The collection is replaced, not merged. Without a scope (signed out, or
    /// no focused common group for scoped resources) the collection becomes
    /// empty and the backend is not asked.
    #[instrument(skip(self), fields(kind = E::KIND))]
    pub async fn initialize(&mut self) -> LifecycleResult<()> {
        let Some(scope) = self.behavior.scope(&self.context) else {
            debug!("No scope available, clearing collection");
            self.collection.clear();
            return Ok(());
        };

        let loaded = self.backend(self.service.list_all(&scope)).await?;
        debug!(count = loaded.len(), "Collection loaded");
        self.collection = loaded;

        if let Some(identification) = self.navigation.resource_identifier() {
            if !self.select_by_identification(&identification) {
                debug!(identification = %identification, "Deep link target not in collection");
            }
        }
        Ok(())
    }

    /// Select `entity` for viewing and editing.
    ///
    /// The location is replaced when the identification changes; the selection
    /// itself always happens. Returns the editable copy.
    pub fn select(&mut self, entity: &E) -> &mut E {
        if entity.identification() != self.selected.identification() {
            let location = self.location_for(entity.identification());
            self.navigation.replace_location(&location);
        }
        debug!(kind = E::KIND, identification = entity.identification(), "Selected");

        self.selected = entity.clone();
        self.original = Some(entity.clone());
        self.detail_visible = true;
        self.is_new = false;
        &mut self.selected
    }

    /// Select the collection member with `identification`.
    ///
    /// # Returns
    ///
    /// `false` if no such member exists; state is left untouched
    pub fn select_by_identification(&mut self, identification: &str) -> bool {
        let Some(entity) = self
            .collection
            .iter()
            .find(|e| e.identification() == identification)
            .cloned()
        else {
            return false;
        };
        self.select(&entity);
        true
    }

    /// Whether `entity` is the selected one, compared by identification only.
    pub fn is_selected(&self, entity: &E) -> bool {
        entity.identification() == self.selected.identification()
    }

    /// Start drafting a new entity. Returns the editable draft.
    pub fn start_create(&mut self) -> &mut E {
        debug!(kind = E::KIND, "Drafting new entity");
        self.selected = E::create_empty();
        self.original = None;
        self.detail_visible = true;
        self.is_new = true;
        &mut self.selected
    }

    /// Whether accept is currently blocked.
    ///
    /// Blocked when required fields are missing, when an existing entity is
    /// unmodified, or when the actor may not create/update this resource.
    pub fn disable_accept(&self) -> bool {
        let fields_ok = self.behavior.check_required_fields(&self.selected);
        let invalid = if self.is_new {
            !fields_ok
        } else {
            !fields_ok || self.selected.equals(self.original.as_ref())
        };
        invalid || !self.behavior.may_save(self.is_new, &self.selected)
    }

    /// Whether delete is currently blocked.
    ///
    /// Drafts and unsaved placeholders are blocked before the policy is asked.
    pub fn disable_delete(&self) -> bool {
        if self.is_new || self.selected.is_unsaved() {
            return true;
        }
        !self.behavior.may_delete(&self.selected)
    }

    /// Store the selected entity.
    ///
    /// Drafts are created with their minimal fields first and then updated
    /// with the full entity under the backend-assigned identification. On
    /// success the canonical record is spliced into the collection and
    /// selected.
    ///
    /// # Errors
    ///
    /// - Backend failure or timeout: the user is notified, the edit stays open.
    ///   If only the follow-up update of a draft failed, the created record is
    ///   added to the collection and the edit continues on it.
    /// - `LifecycleError::MissingScope` when drafting a scoped resource with no
    ///   focused common group.
    #[instrument(skip(self), fields(kind = E::KIND, is_new = self.is_new))]
    pub async fn accept(&mut self) -> LifecycleResult<ActionOutcome> {
        if self.disable_accept() {
            let message = self.config.messages.accept_rejected.clone();
            self.reject(&message);
            return Ok(ActionOutcome::Rejected);
        }

        let canonical = if self.is_new {
            self.create_selected().await?
        } else {
            self.backend(self.service.update(&self.selected)).await?
        };

        info!(identification = canonical.identification(), "Saved");
        self.reconcile(canonical);
        Ok(ActionOutcome::Completed)
    }

    /// Delete the selected entity.
    ///
    /// # Errors
    ///
    /// Backend failure or timeout; the user is notified and state is kept.
    #[instrument(skip(self), fields(kind = E::KIND, identification = self.selected.identification()))]
    pub async fn delete(&mut self) -> LifecycleResult<ActionOutcome> {
        if self.disable_delete() {
            let message = self.config.messages.delete_rejected.clone();
            self.reject(&message);
            return Ok(ActionOutcome::Rejected);
        }

        let identification = self.selected.identification().to_string();
        let deleted = self.backend(self.service.delete(&identification)).await?;
        if !deleted {
            warn!("Backend refused delete");
            self.notify(&self.config.messages.delete_refused);
            return Ok(ActionOutcome::Refused);
        }

        info!("Deleted");
        self.collection
            .retain(|e| e.identification() != identification);
        self.cancel();
        Ok(ActionOutcome::Completed)
    }

    /// Drop the selection and hide the detail panel.
    pub fn cancel(&mut self) {
        self.detail_visible = false;
        self.is_new = false;
        self.original = None;
        self.selected = E::create_empty();
    }

    /// Apply a free-text filter to the visible projection.
    pub fn apply_filter(&mut self, value: &str) {
        self.view.set_filter(value);
    }

    /// Sort the visible projection by `column`.
    pub fn sort_by(&mut self, column: impl Into<String>, direction: SortDirection) {
        self.view.set_sort(column, direction);
    }

    /// Visible entities in display order.
    pub fn visible(&self) -> Vec<&E> {
        self.view.apply(&self.collection)
    }

    /// Current selection state.
    pub fn state(&self) -> SelectionState {
        if !self.detail_visible {
            SelectionState::Idle
        } else if self.is_new {
            SelectionState::Drafting
        } else if self.selected.equals(self.original.as_ref()) {
            SelectionState::Viewing
        } else {
            SelectionState::Editing
        }
    }

    /// Known collection.
    pub fn collection(&self) -> &[E] {
        &self.collection
    }

    /// Selected copy, or the placeholder when idle.
    pub fn selected(&self) -> &E {
        &self.selected
    }

    /// Editable selected copy.
    pub fn selected_mut(&mut self) -> &mut E {
        &mut self.selected
    }

    /// Pristine copy of the selected entity, `None` when idle or drafting.
    pub fn original(&self) -> Option<&E> {
        self.original.as_ref()
    }

    /// Whether a new entity is being drafted.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Whether the detail panel is shown.
    pub fn detail_visible(&self) -> bool {
        self.detail_visible
    }

    /// Filter and sort state.
    pub fn view(&self) -> &CollectionView {
        &self.view
    }

    /// Session the controller reads actor and scope from.
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    async fn create_selected(&mut self) -> LifecycleResult<E> {
        let scope = self
            .behavior
            .scope(&self.context)
            .ok_or(LifecycleError::MissingScope(E::KIND))?;

        let created = self
            .backend(self.service.create(&self.selected.new_fields(), &scope))
            .await?;
        debug!(identification = created.identification(), "Created, updating full entity");

        let mut full = self.selected.clone();
        full.assign_identification(created.identification())?;

        match self.backend(self.service.update(&full)).await {
            Ok(canonical) => Ok(canonical),
            Err(e) => {
                // keep the created record and continue as an edit of it
                self.collection.push(created.clone());
                self.original = Some(created);
                self.selected = full;
                self.is_new = false;
                Err(e)
            }
        }
    }

    fn reconcile(&mut self, canonical: E) {
        match self
            .collection
            .iter()
            .position(|e| e.identification() == canonical.identification())
        {
            Some(index) => self.collection[index] = canonical.clone(),
            None => self.collection.push(canonical.clone()),
        }
        self.select(&canonical);
    }

    fn reject(&mut self, message: &str) {
        debug!(kind = E::KIND, reason = message, "Action rejected");
        self.notify(message);
        self.cancel();
    }

    fn notify(&self, message: &str) {
        self.notifier.notify(message, &self.config.action_label);
    }

    fn location_for(&self, identification: &str) -> String {
        let base = self.behavior.base_path().trim_end_matches('/');
        format!("{}/{}", base, identification)
    }

    /// Await a backend call, applying the timeout and notifying on failure.
    async fn backend<T>(
        &self,
        call: impl Future<Output = LifecycleResult<T>>,
    ) -> LifecycleResult<T> {
        let result = match self.config.timeout() {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or(Err(LifecycleError::Timeout(limit))),
            None => call.await,
        };
        if let Err(e) = &result {
            warn!(kind = E::KIND, error = %e, "Backend call failed");
            self.notify(&self.config.messages.backend_failed);
        }
        result
    }
}
