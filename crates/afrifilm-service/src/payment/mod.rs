//! Simulated Orange Money payment gateway.

pub mod reference;
pub mod simulator;

pub use reference::generate_reference;
pub use simulator::{PaymentDetails, PaymentSimulator};
