use std::net::{TcpListener, TcpStream};

use gol_base::Result;
use gol_net::{recv_broker_call, send_broker_reply, BrokerCall, BrokerReply};
use tracing::{error, warn};

use crate::broker::Broker;

/// Accept `Broker.*` control-plane connections forever, one at a time --
/// the controller dials once and reuses the connection for every call.
/// Distinct from the registration listener (workers) and the event
/// listener (the broker-to-controller push stream); this is the
/// controller-to-broker request/response surface.
pub fn serve(listener: TcpListener, broker: &Broker) -> Result<()> {
    for stream in listener.incoming() {
        let stream = stream?;
        if let Err(e) = serve_connection(stream, broker) {
            error!("broker rpc connection ended with error: {e:?}");
        }
    }
    Ok(())
}

fn serve_connection(mut stream: TcpStream, broker: &Broker) -> Result<()> {
    while let Some(call) = recv_broker_call(&mut stream)? {
        let reply = match call {
            BrokerCall::Init(bp) => match broker.init(bp) {
                Ok(()) => BrokerReply::Ok,
                Err(e) => BrokerReply::Err(format!("{e:?}")),
            },
            BrokerCall::Pause => {
                broker.pause();
                BrokerReply::Ok
            }
            BrokerCall::Resume => {
                broker.resume();
                BrokerReply::Ok
            }
            BrokerCall::Save => {
                broker.save();
                BrokerReply::Ok
            }
            BrokerCall::Quit => {
                broker.quit();
                BrokerReply::Ok
            }
            BrokerCall::Kill => {
                broker.kill();
                BrokerReply::Ok
            }
        };
        send_broker_reply(&mut stream, &reply)?;
    }
    warn!("controller rpc connection closed");
    Ok(())
}
