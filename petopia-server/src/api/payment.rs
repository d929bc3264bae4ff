use axum::{
    Json,
    extract::{Path, State},
};
use petopia_core::entities::order_records::OrderId;
use petopia_core::payments::PaymentError;
use petopia_sdk::objects::PaymentForm;

use super::ApiError;
use crate::state::AppState;

/// `GET /orders/{order_id}/payment`: sign a LiqPay checkout for an order.
///
/// The charged amount is the order's stored total, never a client value.
pub(super) async fn order_payment(
    State(state): State<AppState>,
    Path(order_id): Path<OrderId>,
) -> Result<Json<PaymentForm>, ApiError> {
    let order = state
        .orders
        .get_order(order_id)
        .await?
        .ok_or_else(|| PaymentError::OrderNotFound(order_id.to_string()))?;

    let description = state.payment_builder.describe(order.id);
    let form = state
        .payment_builder
        .build(order.id, order.total_amount, &description)?;

    Ok(Json(form))
}
