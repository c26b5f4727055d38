//! Order draft state machine
//!
//! Owns every piece of client-side state of an order being composed and
//! keeps the invariants between them:
//!
//! - a rejected mutation leaves the draft untouched
//! - the advance never exceeds the total; mutations that lower the total
//!   clamp it (the tendered cash is kept, so the change grows)
//! - a discount is always paired with the employee who authorized it
//! - items are branch-scoped: the branch only changes on an empty draft
//!
//! Totals are derived from the state on every read through
//! [`calculate_totals`](super::calculate_totals).

use super::calculator::{calculate_subtotal, calculate_totals};
use super::money::{
    require_finite, round_money, to_decimal, to_f64, validate_price, validate_quantity,
    MAX_PAYMENT_AMOUNT, MAX_PRICE,
};
use super::{
    AdvancePayment, CashRegisterState, Discount, DiscountAuthorization, DraftError, DraftItem,
    Fulfillment, Operator, OrderTotals,
};
use crate::models::{AdvanceRequest, CreateOrderRequest, OrderLineRequest, Product, StockReservation};
use crate::validation::{is_valid_phone, validate_form};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct OrderDraft {
    /// Idempotency key sent with the creation request
    reference: Uuid,
    operator: Operator,
    branch_id: i64,
    customer_name: String,
    customer_phone: Option<String>,
    notes: Option<String>,
    items: Vec<DraftItem>,
    discount: Option<Discount>,
    authorization: Option<DiscountAuthorization>,
    fulfillment: Fulfillment,
    advance: Option<AdvancePayment>,
    register: CashRegisterState,
}

impl OrderDraft {
    /// Empty draft at the operator's branch
    pub fn new(operator: Operator) -> Self {
        let branch_id = operator.branch_id;
        Self {
            reference: Uuid::new_v4(),
            operator,
            branch_id,
            customer_name: String::new(),
            customer_phone: None,
            notes: None,
            items: Vec::new(),
            discount: None,
            authorization: None,
            fulfillment: Fulfillment::Pickup,
            advance: None,
            register: CashRegisterState::Closed,
        }
    }

    // ========== Accessors ==========

    pub fn reference(&self) -> Uuid {
        self.reference
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn branch_id(&self) -> i64 {
        self.branch_id
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn customer_phone(&self) -> Option<&str> {
        self.customer_phone.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn items(&self) -> &[DraftItem] {
        &self.items
    }

    pub fn item(&self, product_id: i64) -> Option<&DraftItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn discount(&self) -> Option<&Discount> {
        self.discount.as_ref()
    }

    pub fn authorization(&self) -> Option<&DiscountAuthorization> {
        self.authorization.as_ref()
    }

    pub fn fulfillment(&self) -> &Fulfillment {
        &self.fulfillment
    }

    pub fn advance(&self) -> Option<&AdvancePayment> {
        self.advance.as_ref()
    }

    pub fn register(&self) -> &CashRegisterState {
        &self.register
    }

    /// Derived amounts
    pub fn totals(&self) -> OrderTotals {
        calculate_totals(
            &self.items,
            self.discount.as_ref(),
            &self.fulfillment,
            self.advance.as_ref(),
        )
    }

    // ========== Header ==========

    /// Move the draft to another branch
    pub fn set_branch(&mut self, branch_id: i64) -> Result<(), DraftError> {
        if branch_id == self.branch_id {
            return Ok(());
        }
        if !self.operator.role.can_pick_branch() {
            return Err(DraftError::BranchChangeNotAllowed(self.operator.role));
        }
        if !self.items.is_empty() {
            return Err(DraftError::BranchHasItems);
        }
        self.branch_id = branch_id;
        // Registers are per branch
        self.register = CashRegisterState::Closed;
        Ok(())
    }

    pub fn set_customer(
        &mut self,
        name: impl Into<String>,
        phone: Option<String>,
    ) -> Result<(), DraftError> {
        let name = name.into().trim().to_string();
        if name.chars().count() > 100 {
            return Err(DraftError::InvalidCustomer("name longer than 100 characters".into()));
        }
        let phone = phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        if let Some(p) = &phone {
            if !is_valid_phone(p) {
                return Err(DraftError::InvalidCustomer(format!("invalid phone: {}", p)));
            }
        }
        self.customer_name = name;
        self.customer_phone = phone;
        Ok(())
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
    }

    // ========== Items ==========

    /// Add units of a product; merges with an existing line
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: i32,
        reservation: Option<StockReservation>,
    ) -> Result<(), DraftError> {
        if !product.is_active {
            return Err(DraftError::InactiveProduct(product.id));
        }
        validate_price(product.price)?;
        validate_quantity(quantity)?;
        if let Some(r) = &reservation {
            self.check_reservation(product.id, r)?;
        }

        match self.items.iter_mut().find(|i| i.product_id == product.id) {
            Some(line) => {
                let merged = line
                    .quantity
                    .checked_add(quantity)
                    .ok_or(DraftError::InvalidQuantity(i32::MAX))?;
                validate_quantity(merged)?;
                line.quantity = merged;
                if reservation.is_some() {
                    line.reservation = reservation;
                }
            }
            None => {
                let mut line = DraftItem::from_product(product, quantity);
                line.reservation = reservation;
                self.items.push(line);
            }
        }

        self.reconcile();
        Ok(())
    }

    /// Set a line's quantity; 0 removes the line and returns it
    pub fn set_quantity(
        &mut self,
        product_id: i64,
        quantity: i32,
        reservation: Option<StockReservation>,
    ) -> Result<Option<DraftItem>, DraftError> {
        if quantity == 0 {
            return self.remove_item(product_id).map(Some);
        }
        validate_quantity(quantity)?;
        if let Some(r) = &reservation {
            self.check_reservation(product_id, r)?;
        }

        let line = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product_id)
            .ok_or(DraftError::ItemNotFound(product_id))?;
        line.quantity = quantity;
        if reservation.is_some() {
            line.reservation = reservation;
        }

        self.reconcile();
        Ok(None)
    }

    /// Remove a line and return it (its reservation still has to be released)
    pub fn remove_item(&mut self, product_id: i64) -> Result<DraftItem, DraftError> {
        let idx = self
            .items
            .iter()
            .position(|i| i.product_id == product_id)
            .ok_or(DraftError::ItemNotFound(product_id))?;
        let removed = self.items.remove(idx);
        self.reconcile();
        Ok(removed)
    }

    /// Remove every line
    pub fn clear_items(&mut self) -> Vec<DraftItem> {
        let removed = std::mem::take(&mut self.items);
        self.reconcile();
        removed
    }

    fn check_reservation(
        &self,
        product_id: i64,
        reservation: &StockReservation,
    ) -> Result<(), DraftError> {
        if reservation.product_id != product_id || reservation.branch_id != self.branch_id {
            return Err(DraftError::ReservationMismatch {
                reservation_id: reservation.id.clone(),
                product_id,
                branch_id: self.branch_id,
            });
        }
        Ok(())
    }

    // ========== Discount ==========

    /// Apply an order discount
    ///
    /// Operators who cannot grant discounts must name an authorizer other
    /// than themselves. Admins and managers authorize their own discounts
    /// unless an authorizer is given.
    pub fn set_discount(
        &mut self,
        discount: Discount,
        authorization: Option<DiscountAuthorization>,
    ) -> Result<(), DraftError> {
        match discount {
            Discount::Percentage(percent) => {
                require_finite(percent, "discount percentage")?;
                if percent <= 0.0 || percent > 100.0 {
                    return Err(DraftError::InvalidDiscount(format!(
                        "percentage must be in (0, 100], got {}",
                        percent
                    )));
                }
            }
            Discount::Fixed(amount) => {
                require_finite(amount, "discount amount")?;
                if amount <= 0.0 {
                    return Err(DraftError::InvalidDiscount(format!(
                        "amount must be positive, got {}",
                        amount
                    )));
                }
                let subtotal = calculate_subtotal(&self.items);
                if round_money(to_decimal(amount)) > subtotal {
                    return Err(DraftError::InvalidDiscount(format!(
                        "amount {:.2} exceeds subtotal {:.2}",
                        amount,
                        to_f64(subtotal)
                    )));
                }
            }
        }

        let authorization = match authorization {
            Some(auth) if auth.authorizer_id == self.operator.employee_id
                && !self.operator.role.can_authorize_discounts() =>
            {
                return Err(DraftError::DiscountNotAuthorized);
            }
            Some(auth) => auth,
            None if self.operator.role.can_authorize_discounts() => DiscountAuthorization {
                authorizer_id: self.operator.employee_id,
                authorizer_name: self.operator.name.clone(),
            },
            None => return Err(DraftError::DiscountNotAuthorized),
        };

        self.discount = Some(discount);
        self.authorization = Some(authorization);
        self.reconcile();
        Ok(())
    }

    pub fn clear_discount(&mut self) {
        self.discount = None;
        self.authorization = None;
    }

    // ========== Fulfillment ==========

    pub fn set_fulfillment(&mut self, fulfillment: Fulfillment) -> Result<(), DraftError> {
        let fulfillment = match fulfillment {
            Fulfillment::Pickup => Fulfillment::Pickup,
            Fulfillment::Delivery { address, price } => {
                let address = address.trim().to_string();
                if address.is_empty() {
                    return Err(DraftError::MissingDeliveryAddress);
                }
                require_finite(price, "delivery price")?;
                if !(0.0..=MAX_PRICE).contains(&price) {
                    return Err(DraftError::InvalidDeliveryPrice(price));
                }
                Fulfillment::Delivery { address, price }
            }
        };
        self.fulfillment = fulfillment;
        self.reconcile();
        Ok(())
    }

    // ========== Advance payment ==========

    /// Record the up-front payment; a zero amount clears it
    pub fn set_advance(&mut self, advance: AdvancePayment) -> Result<(), DraftError> {
        require_finite(advance.amount, "advance amount")?;
        if advance.amount < 0.0 || advance.amount > MAX_PAYMENT_AMOUNT {
            return Err(DraftError::InvalidAdvance(format!(
                "amount out of range: {}",
                advance.amount
            )));
        }
        let amount = round_money(to_decimal(advance.amount));
        if amount.is_zero() {
            self.advance = None;
            return Ok(());
        }

        let total = to_decimal(self.totals().total);
        if amount > total {
            return Err(DraftError::InvalidAdvance(format!(
                "amount {:.2} exceeds total {:.2}",
                advance.amount,
                to_f64(total)
            )));
        }

        match (advance.cash, advance.tendered) {
            (true, Some(tendered)) => {
                require_finite(tendered, "tendered")?;
                if round_money(to_decimal(tendered)) < amount {
                    return Err(DraftError::InvalidAdvance(format!(
                        "tendered {:.2} is less than {:.2}",
                        tendered,
                        to_f64(amount)
                    )));
                }
            }
            (false, Some(_)) => {
                return Err(DraftError::InvalidAdvance(
                    "only cash payments take a tendered amount".into(),
                ));
            }
            (_, None) => {}
        }

        self.advance = Some(AdvancePayment {
            amount: to_f64(amount),
            ..advance
        });
        Ok(())
    }

    pub fn clear_advance(&mut self) {
        self.advance = None;
    }

    // ========== Cash register ==========

    pub fn set_register(&mut self, register: CashRegisterState) {
        self.register = register;
    }

    /// Keep the advance within the total after a mutation
    fn reconcile(&mut self) {
        let total = self.totals().total;
        let exhausted = match self.advance.as_mut() {
            Some(advance) => {
                if advance.amount > total {
                    tracing::debug!(
                        previous = advance.amount,
                        total,
                        "advance clamped to order total"
                    );
                    advance.amount = total;
                }
                advance.amount <= 0.0
            }
            None => false,
        };
        if exhausted {
            self.advance = None;
        }
    }

    // ========== Submission ==========

    /// Every rule a draft must satisfy before it is posted
    pub fn check_submittable(&self) -> Result<(), DraftError> {
        if self.items.is_empty() {
            return Err(DraftError::EmptyOrder);
        }
        if let Some(item) = self.items.iter().find(|i| !i.is_fully_reserved()) {
            return Err(DraftError::MissingReservation(item.product_id));
        }

        let name_len = self.customer_name.chars().count();
        if !(3..=100).contains(&name_len) {
            return Err(DraftError::InvalidCustomer(
                "name must have between 3 and 100 characters".into(),
            ));
        }

        if let Fulfillment::Delivery { address, .. } = &self.fulfillment {
            if address.trim().is_empty() {
                return Err(DraftError::MissingDeliveryAddress);
            }
        }

        if self.discount.is_some() && self.authorization.is_none() {
            return Err(DraftError::DiscountNotAuthorized);
        }

        if let Some(advance) = &self.advance {
            if advance.cash && !self.register.is_open() {
                return Err(DraftError::CashRegisterClosed);
            }
        }

        Ok(())
    }

    /// Build the creation request
    pub fn to_request(&self) -> Result<CreateOrderRequest, DraftError> {
        self.check_submittable()?;
        let totals = self.totals();

        let items = self
            .items
            .iter()
            .map(|item| {
                let reservation_id = item
                    .reservation
                    .as_ref()
                    .map(|r| r.id.clone())
                    .ok_or(DraftError::MissingReservation(item.product_id))?;
                Ok(OrderLineRequest {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                    reservation_id,
                })
            })
            .collect::<Result<Vec<_>, DraftError>>()?;

        let advance = self.advance.as_ref().map(|a| AdvanceRequest {
            payment_method_id: a.payment_method_id,
            amount: totals.advance,
            tendered: a.tendered,
            change: totals.change,
        });
        let cash_register_id = match &self.advance {
            Some(a) if a.cash => self.register.register_id(),
            _ => None,
        };

        let request = CreateOrderRequest {
            client_reference: self.reference,
            branch_id: self.branch_id,
            employee_id: self.operator.employee_id,
            customer_name: self.customer_name.clone(),
            customer_phone: self.customer_phone.clone(),
            notes: self.notes.clone(),
            items,
            discount: self.discount,
            discount_authorized_by: self.authorization.as_ref().map(|a| a.authorizer_id),
            fulfillment: self.fulfillment.clone(),
            advance,
            cash_register_id,
            totals,
        };
        validate_form(&request)?;
        Ok(request)
    }

    /// Start over after a submission or cancellation
    ///
    /// Branch and register state are kept; everything else is cleared.
    pub fn reset(&mut self) {
        let register = std::mem::take(&mut self.register);
        let branch_id = self.branch_id;
        *self = Self::new(self.operator.clone());
        self.branch_id = branch_id;
        self.register = register;
    }
}

// ==================== Tests ====================
