//! Draft errors

use crate::validation::FormError;
use thiserror::Error;

/// Rejected draft mutation or failed submission check
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DraftError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i32),

    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    #[error("Product is inactive: {0}")]
    InactiveProduct(i64),

    #[error("Item not found: {0}")]
    ItemNotFound(i64),

    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: i64,
        requested: i32,
        available: i32,
    },

    #[error("Reservation {reservation_id} does not cover product {product_id} at branch {branch_id}")]
    ReservationMismatch {
        reservation_id: String,
        product_id: i64,
        branch_id: i64,
    },

    #[error("Item {0} has no stock reservation covering its quantity")]
    MissingReservation(i64),

    #[error("Invalid discount: {0}")]
    InvalidDiscount(String),

    #[error("Discount requires authorization")]
    DiscountNotAuthorized,

    #[error("Delivery requires an address")]
    MissingDeliveryAddress,

    #[error("Invalid delivery price: {0}")]
    InvalidDeliveryPrice(f64),

    #[error("Invalid advance: {0}")]
    InvalidAdvance(String),

    #[error("Cash register is closed")]
    CashRegisterClosed,

    #[error("Role {0:?} cannot change branch")]
    BranchChangeNotAllowed(crate::models::Role),

    #[error("Remove all items before changing branch")]
    BranchHasItems,

    #[error("Product catalog is not loaded for branch {0}")]
    CatalogNotLoaded(i64),

    #[error("Order has no items")]
    EmptyOrder,

    #[error("Invalid customer: {0}")]
    InvalidCustomer(String),

    #[error("Invalid form: {0}")]
    Form(#[from] FormError),
}
