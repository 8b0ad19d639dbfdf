//! In-memory collaborator implementations.
//!
//! Suitable for single-process use and testing. The backend service records
//! every call it receives so tests can assert which requests were issued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use idm_org::{Entity, Scope};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::collaborators::{Navigation, NotificationSink, ResourceService};
use crate::error::{LifecycleError, LifecycleResult};

/// A request received by [`MemoryResourceService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    /// `list_all` for the scope
    ListAll(Scope),
    /// `create` in the scope
    Create(Scope),
    /// `update` of the identification
    Update(String),
    /// `delete` of the identification
    Delete(String),
}

/// In-memory backend for one resource type.
///
/// Identifications are UUID v7 strings. Records remember the scope they were
/// created in and are only listed for that scope.
pub struct MemoryResourceService<E: Entity> {
    /// Stored records with their scope
    records: RwLock<Vec<(Scope, E)>>,
    /// Every request received, oldest first
    calls: RwLock<Vec<BackendCall>>,
    /// Answer deletes with `false`
    refuse_deletes: AtomicBool,
    /// Fail create and update requests
    fail_writes: AtomicBool,
    /// Artificial latency per request
    delay: Mutex<Option<Duration>>,
}

impl<E: Entity> std::fmt::Debug for MemoryResourceService<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryResourceService")
            .field("kind", &E::KIND)
            .finish()
    }
}

impl<E: Entity> Default for MemoryResourceService<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> MemoryResourceService<E> {
    /// Create an empty in-memory backend.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            calls: RwLock::new(Vec::new()),
            refuse_deletes: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            delay: Mutex::new(None),
        }
    }

    /// Store saved entities under `scope`.
    pub async fn seed(&self, scope: Scope, entities: impl IntoIterator<Item = E>) {
        let mut records = self.records.write().await;
        records.extend(entities.into_iter().map(|e| (scope.clone(), e)));
    }

    /// Entities stored under `scope`.
    pub async fn records(&self, scope: &Scope) -> Vec<E> {
        self.records
            .read()
            .await
            .iter()
            .filter(|(s, _)| s == scope)
            .map(|(_, e)| e.clone())
            .collect()
    }

    /// Requests received so far.
    pub async fn calls(&self) -> Vec<BackendCall> {
        self.calls.read().await.clone()
    }

    /// Number of create, update and delete requests received.
    pub async fn write_count(&self) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| !matches!(c, BackendCall::ListAll(_)))
            .count()
    }

    /// Make delete answer `false` without removing anything.
    pub fn set_refuse_deletes(&self, refuse: bool) {
        self.refuse_deletes.store(refuse, Ordering::SeqCst);
    }

    /// Make create and update fail with a backend error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Delay every request by `delay`.
    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock().unwrap_or_else(PoisonError::into_inner) = delay;
    }

    async fn record(&self, call: BackendCall) {
        self.calls.write().await.push(call);
        let delay = *self.delay.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn check_writes(&self) -> LifecycleResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LifecycleError::Backend(format!("{} write rejected", E::KIND)));
        }
        Ok(())
    }
}

#[async_trait]
impl<E: Entity> ResourceService<E> for MemoryResourceService<E> {
    async fn list_all(&self, scope: &Scope) -> LifecycleResult<Vec<E>> {
        self.record(BackendCall::ListAll(scope.clone())).await;
        Ok(self.records(scope).await)
    }

    async fn create(&self, fields: &E::NewFields, scope: &Scope) -> LifecycleResult<E> {
        self.record(BackendCall::Create(scope.clone())).await;
        self.check_writes()?;

        let entity = E::from_new_fields(fields).with_identification(&Uuid::now_v7().to_string())?;
        self.records
            .write()
            .await
            .push((scope.clone(), entity.clone()));
        Ok(entity)
    }

    async fn update(&self, entity: &E) -> LifecycleResult<E> {
        let id = entity.identification().to_string();
        self.record(BackendCall::Update(id.clone())).await;
        self.check_writes()?;

        let mut records = self.records.write().await;
        let (_, stored) = records
            .iter_mut()
            .find(|(_, e)| e.identification() == id)
            .ok_or(LifecycleError::NotFound(id))?;
        *stored = entity.clone();
        Ok(stored.clone())
    }

    async fn delete(&self, identification: &str) -> LifecycleResult<bool> {
        self.record(BackendCall::Delete(identification.to_string()))
            .await;
        if self.refuse_deletes.load(Ordering::SeqCst) {
            return Ok(false);
        }

        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|(_, e)| e.identification() != identification);
        Ok(records.len() < before)
    }
}

/// Navigation holding the location in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryNavigation {
    identifier: Arc<Mutex<Option<String>>>,
    replaced: Arc<Mutex<Vec<String>>>,
}

impl MemoryNavigation {
    /// Navigation without a resource identifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigation whose location carries `identifier`.
    pub fn with_identifier(identifier: impl Into<String>) -> Self {
        let nav = Self::new();
        *nav.identifier.lock().unwrap_or_else(PoisonError::into_inner) = Some(identifier.into());
        nav
    }

    /// Locations written through `replace_location`, oldest first.
    pub fn replaced(&self) -> Vec<String> {
        self.replaced
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigation for MemoryNavigation {
    fn resource_identifier(&self) -> Option<String> {
        self.identifier
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace_location(&self, location: &str) {
        self.replaced
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(location.to_string());
    }
}

/// Notification sink collecting messages in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    messages: Arc<Mutex<Vec<(String, String)>>>,
}

impl MemoryNotifier {
    /// Create an empty notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// `(message, action_label)` pairs received, oldest first.
    pub fn messages(&self) -> Vec<(String, String)> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of notifications received.
    pub fn count(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl NotificationSink for MemoryNotifier {
    fn notify(&self, message: &str, action_label: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((message.to_string(), action_label.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idm_org::{BaseGroup, NewGroup};

    fn scope() -> Scope {
        Scope::CommonGroup("CGAA00001".into())
    }

    #[tokio::test]
    async fn test_create_assigns_identification() {
        let service = MemoryResourceService::<BaseGroup>::new();
        let created = service.create(&NewGroup::new("Ops"), &scope()).await.unwrap();

        assert!(!created.is_unsaved());
        assert_eq!(created.group_name, "Ops");
        assert_eq!(service.records(&scope()).await, vec![created]);
    }

    #[tokio::test]
    async fn test_list_is_scoped() {
        let service = MemoryResourceService::<BaseGroup>::new();
        service
            .seed(scope(), [BaseGroup::new("A").with_identification("1").unwrap()])
            .await;
        service
            .seed(
                Scope::CommonGroup("other".into()),
                [BaseGroup::new("B").with_identification("2").unwrap()],
            )
            .await;

        let listed = service.list_all(&scope()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].identification(), "1");
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found() {
        let service = MemoryResourceService::<BaseGroup>::new();
        let ghost = BaseGroup::new("Ghost").with_identification("404").unwrap();
        assert!(matches!(
            service.update(&ghost).await,
            Err(LifecycleError::NotFound(id)) if id == "404"
        ));
    }

    #[tokio::test]
    async fn test_delete_and_refusal() {
        let service = MemoryResourceService::<BaseGroup>::new();
        service
            .seed(scope(), [BaseGroup::new("A").with_identification("1").unwrap()])
            .await;

        service.set_refuse_deletes(true);
        assert!(!service.delete("1").await.unwrap());
        assert_eq!(service.records(&scope()).await.len(), 1);

        service.set_refuse_deletes(false);
        assert!(service.delete("1").await.unwrap());
        assert!(!service.delete("1").await.unwrap());
        assert_eq!(service.write_count().await, 3);
    }

    #[tokio::test]
    async fn test_fail_writes() {
        let service = MemoryResourceService::<BaseGroup>::new();
        service.set_fail_writes(true);
        assert!(service.create(&NewGroup::new("Ops"), &scope()).await.is_err());
        assert!(service.records(&scope()).await.is_empty());
        assert_eq!(service.calls().await, vec![BackendCall::Create(scope())]);
    }

    #[test]
    fn test_memory_navigation() {
        let nav = MemoryNavigation::with_identifier("BGAA00001");
        assert_eq!(nav.resource_identifier(), Some("BGAA00001".into()));
        nav.replace_location("/basegroups/BGAA00002");
        assert_eq!(nav.replaced(), vec!["/basegroups/BGAA00002".to_string()]);
        assert!(MemoryNavigation::new().resource_identifier().is_none());
    }

    #[test]
    fn test_memory_notifier() {
        let notifier = MemoryNotifier::new();
        notifier.notify("saved", "OK");
        assert_eq!(notifier.count(), 1);
        assert_eq!(notifier.messages()[0], ("saved".into(), "OK".into()));
    }
}
