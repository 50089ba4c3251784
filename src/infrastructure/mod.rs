pub mod api_client;
pub mod request_context;
pub mod session_store;

pub use api_client::ApiClient;
pub use request_context::RequestContext;
pub use session_store::SessionStore;
