//! External service clients.

pub mod resend;

pub use resend::{DispatchOutcome, Notifier, NotifyError, ResendClient};
