use crate::admin::{AdminConsole, AdminGate};
use crate::api::{HttpStoreApi, StoreApi};
use crate::catalog::CatalogClient;
use crate::checkout::OrderComposer;
use crate::config::AppConfig;
use crate::identity::{ClientKeyStore, FileStorage, LocalStorage};
use crate::tracker::OrderTracker;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info};

/// Every storefront component, wired to one backend and one client-state store.
///
/// `Storefront` owns the admin order-book actor task:
/// - **Startup**: the actor is spawned with the backend API as its context
/// - **Shutdown**: dropping the console closes the actor's channel; [`Storefront::shutdown`]
///   then awaits the task
///
/// # Example
///
/// ```ignore
/// let shop = Storefront::new(&AppConfig::from_env()?)?;
/// let grades = shop.catalog.list_grades().await?;
/// let mine = shop.tracker.list_my_orders().await?;
/// shop.shutdown().await?;
/// ```
pub struct Storefront {
    pub catalog: CatalogClient,
    pub composer: OrderComposer,
    pub tracker: OrderTracker,
    pub client_keys: ClientKeyStore,
    pub admin: AdminConsole,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Storefront {
    /// HTTP backend and on-disk client state, as configured.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let api = HttpStoreApi::new(&config.backend_url, config.request_timeout)
            .with_context(|| format!("failed to build client for {}", config.backend_url))?;
        let storage = FileStorage::new(&config.client_state_path);
        info!(
            backend = %config.backend_url,
            state = %config.client_state_path.display(),
            shape = %config.payload_shape,
            "Starting storefront"
        );
        Ok(Self::with_parts(Arc::new(api), Arc::new(storage), config))
    }

    /// Wires the components around injected parts. Must be called inside a Tokio runtime.
    pub fn with_parts(
        api: Arc<dyn StoreApi>,
        storage: Arc<dyn LocalStorage>,
        config: &AppConfig,
    ) -> Self {
        let client_keys = ClientKeyStore::new(storage);

        let (order_actor, order_client) = crate::order_actor::new();
        let order_handle = tokio::spawn(order_actor.run(api.clone()));

        let gate = AdminGate::new(
            config.admin_password.clone(),
            config.admin_max_attempts,
            config.admin_lockout,
        );

        Self {
            catalog: CatalogClient::new(api.clone()),
            composer: OrderComposer::new(api.clone(), client_keys.clone(), config.payload_shape),
            tracker: OrderTracker::new(api.clone(), client_keys.clone()),
            client_keys,
            admin: AdminConsole::new(gate, api, order_client),
            handles: vec![order_handle],
        }
    }

    /// Drops every client, then waits for the actor tasks to finish.
    pub async fn shutdown(self) -> Result<()> {
        info!("Shutting down storefront...");

        // The console holds the last order-book sender.
        drop(self.admin);
        drop(self.composer);
        drop(self.tracker);
        drop(self.catalog);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(anyhow::anyhow!("actor task failed: {e}"));
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
