use std::sync::Arc;

use roadhire_core::flow::BookingFlow;

#[derive(Clone)]
pub struct AppState {
    pub flow: Arc<BookingFlow>,
}
