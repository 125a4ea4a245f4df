//! Fan-out registry for live connections.
//!
//! The coordinator mutates session state and then hands finished
//! [`ServerMsg`] values to this registry; delivery is a `do_send` per
//! recipient, so broadcasting never blocks the coordinator on a slow
//! connection's I/O.

use actix::prelude::*;
use dashmap::DashMap;
use uuid::Uuid;

use crate::ws::protocol::ServerMsg;

/// A server message on its way out to one connection's socket actor.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct Outbound(pub ServerMsg);

#[derive(Default)]
pub struct ConnectionRegistry {
    connections: DashMap<Uuid, Recipient<Outbound>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    pub fn register(&self, conn_id: Uuid, recipient: Recipient<Outbound>) {
        self.connections.insert(conn_id, recipient);
    }

    pub fn unregister(&self, conn_id: Uuid) {
        self.connections.remove(&conn_id);
    }

    /// Deliver to a single connection. Unknown ids are ignored (the
    /// connection may have just gone away).
    pub fn send_to(&self, conn_id: Uuid, msg: ServerMsg) {
        if let Some(recipient) = self.connections.get(&conn_id) {
            recipient.do_send(Outbound(msg));
        }
    }

    /// Deliver to every live connection.
    pub fn broadcast(&self, msg: ServerMsg) {
        for recipient in self.connections.iter() {
            recipient.value().do_send(Outbound(msg.clone()));
        }
    }

    pub fn active_connections_count(&self) -> usize {
        self.connections.len()
    }
}
