//! Mock user store and provider

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::store::{NewUser, StoreError, StoreProvider, StoreResult, UserStore};

/// A store call as seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    UserExists { email: String, password: String },
    RegisterUser(NewUser),
}

/// Mock store that records every call.
///
/// Clones share the call log and close counter, which lets a
/// [`MockStoreProvider`] hand out sessions that report back to one place.
#[derive(Clone, Default)]
pub struct MockUserStore {
    user_exists: bool,
    lookup_error: Option<StoreError>,
    register_error: Option<StoreError>,
    close_error: Option<StoreError>,
    calls: Arc<Mutex<Vec<StoreCall>>>,
    closed: Arc<AtomicUsize>,
}

impl MockUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value `user_exists` answers with
    pub fn with_user_exists(mut self, exists: bool) -> Self {
        self.user_exists = exists;
        self
    }

    /// Make `user_exists` fail after it has been called
    pub fn with_lookup_error(mut self, error: StoreError) -> Self {
        self.lookup_error = Some(error);
        self
    }

    pub fn with_register_error(mut self, error: StoreError) -> Self {
        self.register_error = Some(error);
        self
    }

    pub fn with_close_error(mut self, error: StoreError) -> Self {
        self.close_error = Some(error);
        self
    }

    /// Calls recorded so far
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of sessions closed
    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn user_exists(&self, email: &str, password: &str) -> StoreResult<bool> {
        self.record(StoreCall::UserExists {
            email: email.to_string(),
            password: password.to_string(),
        });
        match &self.lookup_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.user_exists),
        }
    }

    async fn register_user(&self, user: NewUser) -> StoreResult<()> {
        self.record(StoreCall::RegisterUser(user));
        match &self.register_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn close(self: Box<Self>) -> StoreResult<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        match &self.close_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

/// Provider handing out clones of one template [`MockUserStore`]
pub struct MockStoreProvider {
    template: MockUserStore,
    open_error: Option<StoreError>,
    opened: AtomicUsize,
}

impl MockStoreProvider {
    pub fn new(template: MockUserStore) -> Self {
        Self {
            template,
            open_error: None,
            opened: AtomicUsize::new(0),
        }
    }

    pub fn with_open_error(mut self, error: StoreError) -> Self {
        self.open_error = Some(error);
        self
    }

    /// Sessions successfully opened
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Sessions closed
    pub fn closed(&self) -> usize {
        self.template.closed()
    }

    /// Calls made through any session
    pub fn calls(&self) -> Vec<StoreCall> {
        self.template.calls()
    }
}

#[async_trait]
impl StoreProvider for MockStoreProvider {
    async fn open(&self) -> StoreResult<Box<dyn UserStore>> {
        if let Some(error) = &self.open_error {
            return Err(error.clone());
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(self.template.clone()))
    }

    fn backend(&self) -> &'static str {
        "mock"
    }
}
