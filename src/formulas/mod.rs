//! Time-value-of-money primitives and auxiliary rate utilities
//!
//! Every other calculation in the crate composes these functions. Each one
//! validates its arguments before computing and returns
//! [`PlanningError::InvalidInput`](crate::PlanningError::InvalidInput) naming
//! the offending argument.

pub(crate) mod guards;
mod tvm;
mod auxiliary;

pub use tvm::{
    future_value, present_value, future_value_of_annuity, present_value_of_annuity,
    payment_for_future_value, payment_for_present_value,
};
pub use auxiliary::{rule_of_72, inflation_adjusted_return};

pub(crate) use tvm::is_zero_rate;
