mod event_stream;
mod frame;
mod rpc;

pub use event_stream::{read_event, write_event};
pub use frame::{read_framed, write_framed};
pub use rpc::{
    call_broker, call_worker, recv_broker_call, recv_worker_call, send_broker_reply,
    send_worker_reply, BrokerCall, BrokerReply, WorkerCall, WorkerReply,
};
