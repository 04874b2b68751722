// src/state.rs
use std::sync::Arc;

use crate::services::dispatcher::Dispatcher;

pub type SharedState<C> = Arc<AppState<C>>;

pub struct AppState<C> {
    pub dispatcher: Dispatcher<C>,
}

impl<C> AppState<C> {
    pub fn new(dispatcher: Dispatcher<C>) -> Self {
        Self { dispatcher }
    }
}
