mod logic;
mod matrix;
mod registration;
mod rpc_server;
mod worker;

pub use registration::register_forever;
pub use rpc_server::serve;
pub use worker::Worker;
