mod observer;
mod types;

pub use observer::AuthStateObserver;
pub use types::AuthStateEvent;
