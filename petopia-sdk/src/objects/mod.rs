pub mod callback;
pub mod checkout;

pub use callback::{Acknowledgement, CallbackForm, CallbackPayload, PaymentStatus};
pub use checkout::{API_VERSION, CHECKOUT_ACTION, CheckoutParams, PaymentForm};
