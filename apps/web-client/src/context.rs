//! Application context - built once per page load and passed to every
//! loader and handler.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinHandle;

use brew_core::domain::{ActiveCaseView, Catalog};
use brew_core::ports::{Browser, Document, Storage, TokenDecoder, Transport};

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::pages::admin::AdminState;
use crate::session::Session;

/// Adapters the context is wired from.
pub struct Ports {
    /// Persistent storage (`localStorage`).
    pub storage: Arc<dyn Storage>,
    /// Short-lived storage (`sessionStorage`).
    pub scratch: Arc<dyn Storage>,
    pub decoder: Arc<dyn TokenDecoder>,
    pub transport: Arc<dyn Transport>,
    pub document: Arc<dyn Document>,
    pub browser: Arc<dyn Browser>,
}

pub struct AppContext {
    pub config: AppConfig,
    pub session: Session,
    pub scratch: Arc<dyn Storage>,
    pub api: ApiClient,
    pub doc: Arc<dyn Document>,
    pub browser: Arc<dyn Browser>,
    /// Coffee ids and question flags of the case on the submit page.
    active_case: Mutex<Option<ActiveCaseView>>,
    catalog: Mutex<Catalog>,
    admin: Mutex<AdminState>,
    highlighter: Mutex<Option<JoinHandle<()>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl AppContext {
    pub fn new(config: AppConfig, ports: Ports) -> Self {
        let session = Session::new(ports.storage, ports.decoder);
        let api = ApiClient::new(&config.api_base_url, ports.transport, session.clone());

        tracing::info!(api_base_url = %config.api_base_url, "Application context initialized");

        Self {
            config,
            session,
            scratch: ports.scratch,
            api,
            doc: ports.document,
            browser: ports.browser,
            active_case: Mutex::new(None),
            catalog: Mutex::new(Catalog::default()),
            admin: Mutex::new(AdminState::default()),
            highlighter: Mutex::new(None),
        }
    }

    pub fn active_case(&self) -> Option<ActiveCaseView> {
        lock(&self.active_case).clone()
    }

    pub fn set_active_case(&self, case: Option<ActiveCaseView>) {
        *lock(&self.active_case) = case;
    }

    pub fn catalog(&self) -> Catalog {
        lock(&self.catalog).clone()
    }

    pub fn set_catalog(&self, catalog: Catalog) {
        *lock(&self.catalog) = catalog;
    }

    pub(crate) fn admin(&self) -> MutexGuard<'_, AdminState> {
        lock(&self.admin)
    }

    /// Forget the admin panels' records, answers included.
    pub(crate) fn clear_admin(&self) {
        *lock(&self.admin) = AdminState::default();
    }

    /// Replace the running highlight task, stopping the previous one.
    pub(crate) fn set_highlighter(&self, handle: JoinHandle<()>) {
        if let Some(previous) = lock(&self.highlighter).replace(handle) {
            previous.abort();
        }
    }

    pub fn stop_highlighter(&self) {
        if let Some(handle) = lock(&self.highlighter).take() {
            handle.abort();
        }
    }
}

impl Drop for AppContext {
    fn drop(&mut self) {
        self.stop_highlighter();
    }
}
