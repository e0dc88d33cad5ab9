//! Cart module.
//!
//! Contains the add-to-cart form snapshot, submit button state, the async
//! submission and count refresh, and quantity clamping.

mod control;
mod form;
mod quantity;
mod submit;

pub use control::{ControlPhase, SubmitControl, ADDED_CLASS, ADDED_HTML, SPINNER_HTML};
pub use form::{AddToCartForm, CSRF_FIELD};
pub use quantity::{clamp_quantity, clamp_quantity_input, QuantityAdjustment};
pub use submit::{
    apply_outcome, fetch_cart_count, post_add_to_cart, send_add_to_cart, CartConfig, CartEffects,
    CartOutcome, CartResponse,
};
