//! Command dispatch services.

mod dispatcher;

pub use dispatcher::{CommandDispatcher, Reply};
