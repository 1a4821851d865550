//! OrderDesk - orchestration over the cart, the recorder and notifications
//!
//! The desk owns three stores, each behind its own lock, plus the external
//! collaborators (catalog, export gateway, relay link builder). Every user
//! action is one call here; feedback goes to the notification center.
//!
//! # Submit Flow
//!
//! ```text
//! submit_order()
//!     ├─ 1. Record cart (fails fast on empty cart, nothing else happens)
//!     ├─ 2. Clear cart (not gated on export/relay)
//!     ├─ 3. Export sheet via ExportGateway
//!     ├─ 4. Build relay link
//!     └─ 5. One success or error notification
//! ```
//!
//! A failed export or relay never rolls back the record: it stays in
//! history and can be exported again with [`OrderDesk::export_order`].
//!
//! Lock order is cart → recorder. Locks are never held across `.await`.

use crate::cart::{AddOutcome, Cart, Notice};
use crate::catalog::CatalogAccessor;
use crate::core::Config;
use crate::export::{ExportArtifact, ExportGateway, OrderSheet};
use crate::notify::NotificationCenter;
use crate::orders::OrderRecorder;
use crate::relay::RelayLinkBuilder;
use crate::utils::{DeskError, DeskResult};
use chrono::Utc;
use chrono_tz::Tz;
use parking_lot::Mutex;
use shared::notification::{Notification, NotificationId};
use shared::order::{Item, LineItem, OrderRecord};
use std::sync::Arc;


const ORDER_PLACED: &str = "Order placed successfully! WhatsApp opened with details.";
const ORDER_SEND_FAILED: &str = "Error sending order. Please try again.";
const HISTORY_DOWNLOADED: &str = "Order history downloaded successfully";

/// Result of a submission that got recorded
///
/// `artifact` and `relay_url` are `None` when that step failed; the record
/// is in history either way.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub record: OrderRecord,
    pub artifact: Option<ExportArtifact>,
    pub relay_url: Option<String>,
}

impl PlacedOrder {
    /// Export and relay both succeeded
    pub fn is_complete(&self) -> bool {
        self.artifact.is_some() && self.relay_url.is_some()
    }
}

/// Ordering session
pub struct OrderDesk {
    catalog: Arc<dyn CatalogAccessor>,
    cart: Mutex<Cart>,
    recorder: Mutex<OrderRecorder>,
    notifications: NotificationCenter,
    exporter: Arc<dyn ExportGateway>,
    relay: RelayLinkBuilder,
    tz: Tz,
    /// Session ID - regenerated on every reset
    session_id: Mutex<String>,
}

impl std::fmt::Debug for OrderDesk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderDesk")
            .field("session_id", &*self.session_id.lock())
            .field("cart_lines", &self.cart.lock().len())
            .field("orders", &self.recorder.lock().history().len())
            .field("notifications", &self.notifications)
            .finish()
    }
}

impl OrderDesk {
    pub fn new(
        catalog: Arc<dyn CatalogAccessor>,
        exporter: Arc<dyn ExportGateway>,
        config: &Config,
    ) -> Self {
        let session_id = uuid::Uuid::new_v4().to_string();
        tracing::info!(session_id = %session_id, "Order desk session started");
        Self {
            catalog,
            cart: Mutex::new(Cart::new()),
            recorder: Mutex::new(OrderRecorder::new()),
            notifications: NotificationCenter::new(config.notification_ttl()),
            exporter,
            relay: RelayLinkBuilder::from_config(config),
            tz: config.tz(),
            session_id: Mutex::new(session_id),
        }
    }

    pub fn session_id(&self) -> String {
        self.session_id.lock().clone()
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    pub fn search(&self, term: &str) -> Vec<Item> {
        self.catalog.search(term)
    }

    pub fn catalog(&self) -> &dyn CatalogAccessor {
        self.catalog.as_ref()
    }

    // ========================================================================
    // Cart
    // ========================================================================

    /// Add a catalog item by ID
    pub fn add_to_cart(&self, item_id: &str) -> DeskResult<AddOutcome> {
        let Some(item) = self.catalog.get(item_id).cloned() else {
            let err = DeskError::ItemNotFound(item_id.to_string());
            self.report(&err);
            return Err(err);
        };
        Ok(self.add_item(&item))
    }

    /// Add one unit of `item`
    ///
    /// The returned outcome tells the caller to clear its search input.
    pub fn add_item(&self, item: &Item) -> AddOutcome {
        let mut cart = self.cart.lock();
        let outcome = cart.add(item);
        self.notify(&outcome.notice);
        outcome
    }

    pub fn update_quantity(&self, item_id: &str, delta: i64) {
        let mut cart = self.cart.lock();
        if let Some(notice) = cart.update_quantity(item_id, delta) {
            self.notify(&notice);
        }
    }

    pub fn remove_from_cart(&self, item_id: &str) {
        let mut cart = self.cart.lock();
        if let Some(notice) = cart.remove(item_id) {
            self.notify(&notice);
        }
    }

    pub fn clear_cart(&self) {
        let mut cart = self.cart.lock();
        if let Some(notice) = cart.clear() {
            self.notify(&notice);
        }
    }

    pub fn cart_snapshot(&self) -> Vec<LineItem> {
        self.cart.lock().snapshot()
    }

    pub fn total_quantity(&self) -> u64 {
        self.cart.lock().total_quantity()
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Record the cart, clear it, then export and relay the order
    ///
    /// Only an empty cart is returned as an error. Export and relay
    /// failures are reported through a notification and leave the
    /// corresponding field of [`PlacedOrder`] empty.
    pub async fn submit_order(&self) -> DeskResult<PlacedOrder> {
        let submitted = {
            let mut cart = self.cart.lock();
            let mut recorder = self.recorder.lock();
            let submitted = recorder.submit(&cart);
            if submitted.is_ok() {
                cart.reset();
            }
            submitted
        };
        let record = match submitted {
            Ok(record) => record,
            Err(err) => {
                let err = DeskError::from(err);
                self.report(&err);
                return Err(err);
            }
        };

        let sheet = OrderSheet::for_order(&record, self.tz);
        let artifact = match self.exporter.export(&sheet).await {
            Ok(artifact) => artifact,
            Err(e) => {
                tracing::error!(order_id = %record.order_id(), error = %e, "Order export failed");
                self.notify(&Notice::error(ORDER_SEND_FAILED));
                return Ok(PlacedOrder {
                    record,
                    artifact: None,
                    relay_url: None,
                });
            }
        };

        let relay_url = match self.relay.link_for(&record) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(order_id = %record.order_id(), error = %e, "Relay link failed");
                self.notify(&Notice::error(ORDER_SEND_FAILED));
                return Ok(PlacedOrder {
                    record,
                    artifact: Some(artifact),
                    relay_url: None,
                });
            }
        };

        tracing::info!(order_id = %record.order_id(), "Order placed");
        self.notify(&Notice::success(ORDER_PLACED));
        Ok(PlacedOrder {
            record,
            artifact: Some(artifact),
            relay_url: Some(relay_url),
        })
    }

    /// Export a recorded order again
    pub async fn export_order(&self, order_id: &str) -> DeskResult<ExportArtifact> {
        let record = self.recorder.lock().history().get(order_id).cloned();
        let Some(record) = record else {
            let err = DeskError::OrderNotFound(order_id.to_string());
            self.report(&err);
            return Err(err);
        };

        let sheet = OrderSheet::for_order(&record, self.tz);
        match self.exporter.export(&sheet).await {
            Ok(artifact) => {
                self.notify(&Notice::success(format!("Order {} exported", order_id)));
                Ok(artifact)
            }
            Err(e) => {
                let err = DeskError::from(e);
                self.report(&err);
                Err(err)
            }
        }
    }

    /// Export every recorded order as one sheet
    pub async fn download_history(&self) -> DeskResult<ExportArtifact> {
        let sheet = {
            let recorder = self.recorder.lock();
            let history = recorder.history();
            if history.is_empty() {
                None
            } else {
                Some(OrderSheet::for_history(
                    history,
                    self.tz,
                    Utc::now().timestamp_millis(),
                ))
            }
        };
        let Some(sheet) = sheet else {
            let err = DeskError::NoHistory;
            self.report(&err);
            return Err(err);
        };

        match self.exporter.export(&sheet).await {
            Ok(artifact) => {
                self.notify(&Notice::success(HISTORY_DOWNLOADED));
                Ok(artifact)
            }
            Err(e) => {
                let err = DeskError::from(e);
                self.report(&err);
                Err(err)
            }
        }
    }

    /// Recorded orders in submission order
    pub fn history(&self) -> Vec<OrderRecord> {
        self.recorder.lock().history().records().to_vec()
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Active notifications in display order
    pub fn active_notifications(&self) -> Vec<Notification> {
        self.notifications.active()
    }

    pub fn dismiss(&self, id: &NotificationId) -> bool {
        self.notifications.dismiss(id)
    }

    // ========================================================================
    // Session
    // ========================================================================

    /// Full-session reset: empties cart, history and notifications
    pub fn reset_session(&self) {
        let mut cart = self.cart.lock();
        let mut recorder = self.recorder.lock();
        cart.reset();
        recorder.reset();
        self.notifications.clear();

        let session_id = uuid::Uuid::new_v4().to_string();
        tracing::info!(session_id = %session_id, "Order desk session reset");
        *self.session_id.lock() = session_id;
    }

    fn notify(&self, notice: &Notice) -> NotificationId {
        self.notifications.post(notice.message.clone(), notice.severity)
    }

    /// Translate a boundary error into one error notification
    fn report(&self, err: &DeskError) -> NotificationId {
        tracing::warn!(error = %err, "Desk operation failed");
        self.notify(&Notice::error(err.user_message()))
    }
}
