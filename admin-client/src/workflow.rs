//! Point-of-sale order workflow
//!
//! Drives an [`OrderDraft`] and its [`ProductCatalog`] through the stock
//! reservation round-trips:
//!
//! ```text
//! add/change/remove ─► local checks ─► reserve/adjust/release ─► apply to draft
//!                           │                    │
//!                        rejected             failed
//!                           └──── nothing changes ────┘
//! ```
//!
//! Header edits (customer, notes, discount, fulfillment, advance) need no
//! round-trip and are applied to the draft directly.

use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use shared::models::{
    CashRegister, CreateOrderRequest, Order, Product, ReserveStockRequest, StockLevel,
    StockReservation,
};
use shared::order::money::validate_quantity;
use shared::order::{
    AdvancePayment, CashRegisterState, Discount, DiscountAuthorization, Fulfillment, Operator,
};
use shared::{DraftError, OrderDraft, ProductCatalog};
use tracing::{info, warn};

/// Stock calls needed by the workflow
#[async_trait]
pub trait StockGateway: Send + Sync {
    async fn levels(&self, branch_id: i64, product_ids: &[i64]) -> ClientResult<Vec<StockLevel>>;
    async fn reserve(&self, request: &ReserveStockRequest) -> ClientResult<StockReservation>;
    async fn adjust(&self, reservation_id: &str, quantity: i32) -> ClientResult<StockReservation>;
    async fn release(&self, reservation_id: &str) -> ClientResult<()>;
}

/// Order and register calls needed by the workflow
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn current_register(&self, branch_id: i64) -> ClientResult<Option<CashRegister>>;
    async fn create_order(&self, request: &CreateOrderRequest) -> ClientResult<Order>;
}

pub struct OrderWorkflow<G> {
    gateway: G,
    draft: OrderDraft,
    catalog: ProductCatalog,
}

impl<G: StockGateway + OrderGateway> OrderWorkflow<G> {
    pub fn new(gateway: G, operator: Operator) -> Self {
        let draft = OrderDraft::new(operator);
        let catalog = ProductCatalog::new(draft.branch_id(), Vec::new(), &[]);
        Self {
            gateway,
            draft,
            catalog,
        }
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Rebuild the catalog for the draft's branch with fresh stock levels
    pub async fn load_catalog(&mut self, products: Vec<Product>) -> ClientResult<()> {
        let branch_id = self.draft.branch_id();
        let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
        let levels = self.gateway.levels(branch_id, &ids).await?;
        self.catalog = ProductCatalog::new(branch_id, products, &levels);
        Ok(())
    }

    /// Read the branch's register state into the draft
    pub async fn refresh_register(&mut self) -> ClientResult<()> {
        let register = self
            .gateway
            .current_register(self.draft.branch_id())
            .await?;
        self.draft
            .set_register(CashRegisterState::from(register.as_ref()));
        Ok(())
    }

    // ========== Header ==========

    pub fn set_customer(&mut self, name: impl Into<String>, phone: Option<String>) -> ClientResult<()> {
        Ok(self.draft.set_customer(name, phone)?)
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.draft.set_notes(notes);
    }

    pub fn set_discount(
        &mut self,
        discount: Discount,
        authorization: Option<DiscountAuthorization>,
    ) -> ClientResult<()> {
        Ok(self.draft.set_discount(discount, authorization)?)
    }

    pub fn clear_discount(&mut self) {
        self.draft.clear_discount();
    }

    pub fn set_fulfillment(&mut self, fulfillment: Fulfillment) -> ClientResult<()> {
        Ok(self.draft.set_fulfillment(fulfillment)?)
    }

    pub fn set_advance(&mut self, advance: AdvancePayment) -> ClientResult<()> {
        Ok(self.draft.set_advance(advance)?)
    }

    pub fn clear_advance(&mut self) {
        self.draft.clear_advance();
    }

    // ========== Items ==========

    /// Add units of a product, reserving them first
    pub async fn add_product(&mut self, product_id: i64, quantity: i32) -> ClientResult<()> {
        self.ensure_catalog_current()?;
        validate_quantity(quantity)?;
        let product = self.catalog.ensure_available(product_id, quantity)?.clone();

        let current = self.draft.item(product_id).cloned();
        let held = current.as_ref().map(|i| i.quantity).unwrap_or(0);
        let target = held
            .checked_add(quantity)
            .ok_or(DraftError::InvalidQuantity(i32::MAX))?;
        validate_quantity(target)?;

        let previous = current.and_then(|i| i.reservation);
        let reservation = self.hold(product_id, previous.as_ref(), target).await?;

        if let Err(e) = self
            .draft
            .add_item(&product, quantity, Some(reservation.clone()))
        {
            self.undo_hold(&reservation, previous.as_ref()).await;
            return Err(e.into());
        }
        self.catalog.consume(product_id, quantity);
        Ok(())
    }

    /// Set a line's quantity; 0 removes the line
    pub async fn change_quantity(&mut self, product_id: i64, quantity: i32) -> ClientResult<()> {
        if quantity == 0 {
            return self.remove_product(product_id).await;
        }
        self.ensure_catalog_current()?;
        validate_quantity(quantity)?;

        let line = self
            .draft
            .item(product_id)
            .cloned()
            .ok_or(DraftError::ItemNotFound(product_id))?;
        let delta = quantity - line.quantity;
        if delta == 0 {
            return Ok(());
        }
        if delta > 0 {
            self.catalog.ensure_available(product_id, delta)?;
        }

        let previous = line.reservation;
        let reservation = self.hold(product_id, previous.as_ref(), quantity).await?;

        if let Err(e) = self
            .draft
            .set_quantity(product_id, quantity, Some(reservation.clone()))
        {
            self.undo_hold(&reservation, previous.as_ref()).await;
            return Err(e.into());
        }
        if delta > 0 {
            self.catalog.consume(product_id, delta);
        } else {
            self.catalog.restore(product_id, -delta);
        }
        Ok(())
    }

    /// Release a line's reservation and drop the line
    pub async fn remove_product(&mut self, product_id: i64) -> ClientResult<()> {
        let line = self
            .draft
            .item(product_id)
            .ok_or(DraftError::ItemNotFound(product_id))?;
        if let Some(reservation) = &line.reservation {
            self.gateway.release(&reservation.id).await?;
        }
        let removed = self.draft.remove_item(product_id)?;
        self.catalog.restore(product_id, removed.reserved_quantity());
        Ok(())
    }

    /// Release every reservation; lines whose release fails stay in the draft
    pub async fn release_all(&mut self) -> ClientResult<()> {
        let lines: Vec<_> = self.draft.items().to_vec();
        let mut first_error: Option<ClientError> = None;

        for line in lines {
            if let Some(reservation) = &line.reservation {
                if let Err(e) = self.gateway.release(&reservation.id).await {
                    warn!(
                        reservation_id = %reservation.id,
                        product_id = line.product_id,
                        error = %e,
                        "failed to release reservation"
                    );
                    first_error.get_or_insert(e);
                    continue;
                }
            }
            self.draft.remove_item(line.product_id)?;
            self.catalog
                .restore(line.product_id, line.reserved_quantity());
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Move the draft to another branch (admins only)
    ///
    /// Stock levels and the register of the new branch are read first; if
    /// either read fails the draft stays where it was. Reservations are
    /// branch-scoped, so every line is then released before the move.
    pub async fn switch_branch(&mut self, branch_id: i64, products: Vec<Product>) -> ClientResult<()> {
        if branch_id == self.draft.branch_id() {
            return Ok(());
        }
        let role = self.draft.operator().role;
        if !role.can_pick_branch() {
            return Err(DraftError::BranchChangeNotAllowed(role).into());
        }

        let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
        let levels = self.gateway.levels(branch_id, &ids).await?;
        let register = self.gateway.current_register(branch_id).await?;

        self.release_all().await?;
        self.draft.set_branch(branch_id)?;
        self.catalog = ProductCatalog::new(branch_id, products, &levels);
        self.draft
            .set_register(CashRegisterState::from(register.as_ref()));
        info!(branch_id, "draft moved to branch");
        Ok(())
    }

    /// Drop the draft, giving back its stock
    pub async fn cancel(&mut self) -> ClientResult<()> {
        self.release_all().await?;
        self.draft.reset();
        Ok(())
    }

    /// Post the order; the draft is reset only when the server accepts it
    pub async fn submit(&mut self) -> ClientResult<Order> {
        let request = self.draft.to_request()?;
        let order = match self.gateway.create_order(&request).await {
            Ok(order) => order,
            Err(e) => {
                warn!(reference = %request.client_reference, error = %e, "order submission failed");
                return Err(e);
            }
        };
        info!(
            order_id = order.id,
            folio = %order.folio,
            total = request.totals.total,
            "order submitted"
        );
        self.draft.reset();
        Ok(order)
    }

    fn ensure_catalog_current(&self) -> Result<(), DraftError> {
        if self.catalog.branch_id() != self.draft.branch_id() {
            return Err(DraftError::CatalogNotLoaded(self.draft.branch_id()));
        }
        Ok(())
    }

    /// Reserve `quantity` units for a line, reusing its reservation if any
    async fn hold(
        &self,
        product_id: i64,
        existing: Option<&StockReservation>,
        quantity: i32,
    ) -> ClientResult<StockReservation> {
        let result = match existing {
            Some(r) => self.gateway.adjust(&r.id, quantity).await,
            None => {
                let request = ReserveStockRequest {
                    branch_id: self.draft.branch_id(),
                    product_id,
                    quantity,
                };
                self.gateway.reserve(&request).await
            }
        };
        if let Err(e) = &result {
            warn!(product_id, quantity, error = %e, "stock reservation rejected");
        }
        let reservation = result?;
        if reservation.quantity < quantity {
            let short = reservation.clone();
            self.undo_hold(&short, existing).await;
            return Err(DraftError::InsufficientStock {
                product_id,
                requested: quantity,
                available: short.quantity,
            }
            .into());
        }
        Ok(reservation)
    }

    /// Best-effort rollback of a hold the draft could not take
    async fn undo_hold(&self, reservation: &StockReservation, previous: Option<&StockReservation>) {
        let result = match previous {
            Some(prev) => self.gateway.adjust(&prev.id, prev.quantity).await.map(|_| ()),
            None => self.gateway.release(&reservation.id).await,
        };
        if let Err(e) = result {
            warn!(reservation_id = %reservation.id, error = %e, "failed to roll back reservation");
        }
    }
}
