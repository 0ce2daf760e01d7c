//! Checkout workflow: form records, validation, and the step machine.

mod flow;
mod payment;
mod shipping;
mod validate;

pub use flow::{CheckoutFlow, CheckoutStep};
pub use payment::{PaymentInfo, PaymentMethod};
pub use shipping::ShippingInfo;
pub use validate::ValidationErrors;
