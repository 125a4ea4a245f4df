use std::sync::Arc;

use actix::prelude::*;

use crate::config::time_control::TimeControl;
use crate::engine::standard::StandardRules;
use crate::engine::RulesEngine;
use crate::ws::coordinator::SessionCoordinator;
use crate::ws::hub::ConnectionRegistry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Address of the single live session's coordinator
    pub coordinator: Addr<SessionCoordinator>,
    /// Fan-out registry shared with the coordinator
    pub connections: Arc<ConnectionRegistry>,
    /// Clock configuration the coordinator was started with
    pub time_control: TimeControl,
}

impl AppState {
    /// Start a coordinator over the given rules engine. Must run inside
    /// an actix system (main, or an actix-flavored test).
    pub fn build(time_control: TimeControl, engine: Arc<dyn RulesEngine>) -> Self {
        let connections = Arc::new(ConnectionRegistry::new());
        let coordinator =
            SessionCoordinator::new(connections.clone(), engine, time_control).start();
        Self {
            coordinator,
            connections,
            time_control,
        }
    }

    /// Production wiring: standard chess rules.
    pub fn standard(time_control: TimeControl) -> Self {
        Self::build(time_control, Arc::new(StandardRules::new()))
    }
}
