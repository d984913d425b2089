use std::sync::Arc;

use kennel_core::DogStore;

/// Router state: the store every handler talks to.
#[derive(Clone)]
pub struct KennelState {
    pub store: Arc<dyn DogStore>,
}

impl KennelState {
    pub fn new(store: Arc<dyn DogStore>) -> Self {
        Self { store }
    }
}
