use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    config::SessionBackend,
    session::SessionLocks,
    store::{
        CatalogStore, CategoryStore, SessionStore,
        memory::{MemoryCatalog, MemorySessionStore},
        orm::{OrmCatalog, OrmSessionStore},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    pub categories: Arc<dyn CategoryStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub session_locks: SessionLocks,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        categories: Arc<dyn CategoryStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            catalog,
            categories,
            sessions,
            session_locks: SessionLocks::new(),
        }
    }

    /// State backed by the relational store, with sessions kept where `backend` says.
    pub fn from_orm(orm: DatabaseConnection, backend: SessionBackend) -> Self {
        let catalog = Arc::new(OrmCatalog::new(orm.clone()));
        let sessions: Arc<dyn SessionStore> = match backend {
            SessionBackend::Database => Arc::new(OrmSessionStore::new(orm)),
            SessionBackend::Memory => Arc::new(MemorySessionStore::new()),
        };
        Self::new(catalog.clone(), catalog, sessions)
    }

    /// State held entirely in process memory.
    pub fn in_memory(catalog: Arc<MemoryCatalog>) -> Self {
        Self::new(
            catalog.clone(),
            catalog,
            Arc::new(MemorySessionStore::new()),
        )
    }
}
