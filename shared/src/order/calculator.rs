//! Order Totals Calculator
//!
//! Folds the draft state into its derived amounts:
//! 1. Subtotal: sum of unit_price * quantity
//! 2. Discount: percentage of the subtotal, or a fixed amount capped at it
//! 3. Total: subtotal - discount + delivery price
//! 4. Remaining balance: total - advance
//! 5. Change: tendered - advance, cash advances only
//!
//! The discount never touches the delivery price.

use super::money::{round_money, to_decimal, to_f64};
use super::{AdvancePayment, Discount, DraftItem, Fulfillment, OrderTotals};
use rust_decimal::Decimal;

/// Item subtotal, rounded
pub fn calculate_subtotal(items: &[DraftItem]) -> Decimal {
    let sum: Decimal = items
        .iter()
        .map(|item| to_decimal(item.unit_price) * Decimal::from(item.quantity))
        .sum();
    round_money(sum)
}

/// Discount amount for a given subtotal, never above it
pub fn calculate_discount(discount: Option<&Discount>, subtotal: Decimal) -> Decimal {
    let amount = match discount {
        None => Decimal::ZERO,
        Some(Discount::Percentage(percent)) => {
            round_money(subtotal * to_decimal(*percent) / Decimal::ONE_HUNDRED)
        }
        Some(Discount::Fixed(amount)) => round_money(to_decimal(*amount)),
    };
    amount.clamp(Decimal::ZERO, subtotal.max(Decimal::ZERO))
}

/// Calculate all derived amounts of a draft
pub fn calculate_totals(
    items: &[DraftItem],
    discount: Option<&Discount>,
    fulfillment: &Fulfillment,
    advance: Option<&AdvancePayment>,
) -> OrderTotals {
    let subtotal = calculate_subtotal(items);
    let discount_amount = calculate_discount(discount, subtotal);
    let delivery_price = round_money(to_decimal(fulfillment.price()).max(Decimal::ZERO));
    let total = (subtotal - discount_amount + delivery_price).max(Decimal::ZERO);

    let (advance_amount, change) = match advance {
        None => (Decimal::ZERO, Decimal::ZERO),
        Some(payment) => {
            let amount = round_money(to_decimal(payment.amount)).clamp(Decimal::ZERO, total);
            let change = match (payment.cash, payment.tendered) {
                (true, Some(tendered)) => (to_decimal(tendered) - amount).max(Decimal::ZERO),
                _ => Decimal::ZERO,
            };
            (amount, change)
        }
    };
    let remaining_balance = (total - advance_amount).max(Decimal::ZERO);

    OrderTotals {
        subtotal: to_f64(subtotal),
        discount_amount: to_f64(discount_amount),
        delivery_price: to_f64(delivery_price),
        total: to_f64(total),
        advance: to_f64(advance_amount),
        remaining_balance: to_f64(remaining_balance),
        change: to_f64(change),
    }
}

// ==================== Tests ====================
