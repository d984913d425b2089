use std::sync::Arc;

use axum::Router;
use kennel_core::DogStore;
use tokio::net::{TcpListener, ToSocketAddrs};

use crate::{middlewares, rest, KennelState};

/// The Kennel HTTP application: routes, fallbacks and layers over one store.
#[derive(Clone)]
pub struct KennelApp {
    pub router: Router<()>,
}

impl KennelApp {
    pub fn new(store: Arc<dyn DogStore>) -> Self {
        let router = middlewares::apply(rest::routes(KennelState::new(store)));
        Self { router }
    }

    /// Bind `addr` and serve until the process exits.
    pub async fn listen<A>(self, addr: A) -> anyhow::Result<()>
    where
        A: ToSocketAddrs,
    {
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    pub async fn serve(self, listener: TcpListener) -> anyhow::Result<()> {
        tracing::info!("Server ready at: http://localhost:{}", listener.local_addr()?.port());
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

pub fn kennel(store: Arc<dyn DogStore>) -> KennelApp {
    KennelApp::new(store)
}
