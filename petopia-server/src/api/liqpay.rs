use axum::{Form, Json, extract::State};
use petopia_sdk::objects::{Acknowledgement, CallbackForm};

use super::ApiError;
use crate::state::AppState;

/// `POST /liqpay/callback/`: payment result pushed by LiqPay.
///
/// Every processed outcome is acknowledged with `{"status": "OK"}` so that
/// LiqPay stops redelivering. Forged or malformed callbacks get a 4xx.
pub(super) async fn liqpay_callback(
    State(state): State<AppState>,
    Form(form): Form<CallbackForm>,
) -> Result<Json<Acknowledgement>, ApiError> {
    let data = form.data.unwrap_or_default();
    let signature = form.signature.unwrap_or_default();

    let outcome = state
        .callback_verifier
        .verify_and_apply(&data, &signature, state.orders.as_ref())
        .await?;
    tracing::debug!(?outcome, "LiqPay callback processed");

    Ok(Json(Acknowledgement::ok()))
}
