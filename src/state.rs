use axum::extract::FromRef;

use std::sync::Arc;

use crate::{auth::TokenVerifier, service::NoteService};

#[derive(Clone)]
pub struct AppState {
    pub notes: NoteService,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub const fn new(notes: NoteService, verifier: Arc<TokenVerifier>) -> Self {
        Self { notes, verifier }
    }
}

impl FromRef<AppState> for NoteService {
    fn from_ref(state: &AppState) -> Self {
        state.notes.clone()
    }
}

impl FromRef<AppState> for Arc<TokenVerifier> {
    fn from_ref(state: &AppState) -> Self {
        state.verifier.clone()
    }
}
