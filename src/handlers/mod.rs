pub mod webhooks;

pub use webhooks::handle_payment_webhook;
