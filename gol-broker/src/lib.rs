mod adjustments;
mod broker;
mod control;
mod controller_conn;
mod dispatch;
mod event_conn;
mod planning;
mod registry;
mod rpc_server;
mod session;

pub use broker::Broker;
pub use controller_conn::serve_controller_connections;
pub use registry::serve_registrations;
pub use rpc_server::serve as serve_broker_rpc;
pub use session::SessionOutcome;
