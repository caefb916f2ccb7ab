//! State

use std::sync::Arc;

use dormitory_app::context::AppContext;

use crate::uploads::UploadStore;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) uploads: UploadStore,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, uploads: UploadStore) -> Self {
        Self { app, uploads }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, uploads: UploadStore) -> Arc<Self> {
        Arc::new(Self::new(app, uploads))
    }
}
