//! The session coordinator: a single actor that owns all mutable
//! session state (role registry, position, clock, phase) and serializes
//! every mutating event — connects, disconnects, move proposals, clock
//! ticks — through its mailbox.
//!
//! Connections never touch session state directly; they receive
//! read-only broadcasts fanned out through the [`ConnectionRegistry`].

use std::sync::Arc;

use actix::prelude::*;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::time_control::TimeControl;
use crate::domain::clock::{ClockState, TickOutcome};
use crate::domain::roles::RoleRegistry;
use crate::domain::state::{GameOutcome, OutcomeCause, Role, SessionPhase, Side};
use crate::engine::{EngineError, Position, ProposedMove, RulesEngine, TerminalStatus};
use crate::ws::hub::{ConnectionRegistry, Outbound};
use crate::ws::protocol::{RejectReason, ServerMsg};

/// A connection opened and is ready to receive broadcasts.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub conn_id: Uuid,
    pub recipient: Recipient<Outbound>,
}

/// A connection went away (socket closed, heartbeat timed out).
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub conn_id: Uuid,
}

/// A connection proposed a move for the current position.
#[derive(Message)]
#[rtype(result = "()")]
pub struct ProposeMove {
    pub conn_id: Uuid,
    pub mv: ProposedMove,
}

/// Read-only session snapshot for diagnostics (`/health`) and tests.
#[derive(Message)]
#[rtype(result = "SessionStatus")]
pub struct GetStatus;

#[derive(Debug, Clone, MessageResponse, serde::Serialize)]
pub struct SessionStatus {
    pub active: bool,
    pub connections: usize,
    pub both_present: bool,
    pub white_remaining: u64,
    pub black_remaining: u64,
    pub position: String,
}

pub struct SessionCoordinator {
    connections: Arc<ConnectionRegistry>,
    engine: Arc<dyn RulesEngine>,
    time_control: TimeControl,

    phase: SessionPhase,
    roles: RoleRegistry,
    position: Position,
    clock: ClockState,
    /// Live connections in arrival order, for re-seating after reset.
    arrivals: Vec<Uuid>,
    clock_handle: Option<SpawnHandle>,
}

impl SessionCoordinator {
    pub fn new(
        connections: Arc<ConnectionRegistry>,
        engine: Arc<dyn RulesEngine>,
        time_control: TimeControl,
    ) -> Self {
        let position = engine.starting_position();
        let clock = ClockState::new(time_control.initial);
        Self {
            connections,
            engine,
            time_control,
            phase: SessionPhase::WaitingForPlayers,
            roles: RoleRegistry::new(),
            position,
            clock,
            arrivals: Vec::new(),
            clock_handle: None,
        }
    }

    /// Both controlling roles just filled: start playing.
    fn activate(&mut self, ctx: &mut Context<Self>) {
        self.phase = SessionPhase::Active;
        let side = match self.engine.side_to_move(&self.position) {
            Ok(side) => side,
            Err(err) => {
                // Position State is always engine-validated, so this is
                // unreachable in practice; fall back to the clock's view.
                error!(error = %err, "side-to-move query failed on activation");
                self.clock.side_to_move()
            }
        };
        info!(side_to_move = %side, "session active");
        self.connections.broadcast(ServerMsg::BothPresent);
        let generation = self.clock.start(side);
        self.arm_clock(generation, ctx);
    }

    fn arm_clock(&mut self, generation: u64, ctx: &mut Context<Self>) {
        if let Some(handle) = self.clock_handle.take() {
            ctx.cancel_future(handle);
        }
        let period = self.time_control.tick;
        self.clock_handle =
            Some(ctx.run_interval(period, move |actor, ctx| actor.on_tick(generation, ctx)));
    }

    fn stop_clock(&mut self, ctx: &mut Context<Self>) {
        if let Some(handle) = self.clock_handle.take() {
            ctx.cancel_future(handle);
        }
        self.clock.stop();
    }

    fn on_tick(&mut self, generation: u64, ctx: &mut Context<Self>) {
        match self.clock.tick(generation) {
            TickOutcome::Stale => {}
            TickOutcome::Running { white, black } => {
                self.connections.broadcast(ServerMsg::ClockTick { white, black });
            }
            TickOutcome::Expired { winner } => {
                // The zero reading still goes out before the verdict.
                self.connections.broadcast(ServerMsg::ClockTick {
                    white: self.clock.remaining(Side::White),
                    black: self.clock.remaining(Side::Black),
                });
                self.finish(GameOutcome::win(winner, OutcomeCause::Timeout), ctx);
            }
        }
    }

    /// Terminal transition. Idempotent: a second trigger in the same
    /// instant (timeout racing a disconnect) observes a non-active
    /// phase and does nothing.
    fn finish(&mut self, outcome: GameOutcome, ctx: &mut Context<Self>) {
        if self.phase != SessionPhase::Active {
            return;
        }
        self.phase = SessionPhase::Terminal;
        self.stop_clock(ctx);
        info!(outcome = %outcome, "game over");
        self.connections.broadcast(ServerMsg::GameOver {
            winner: outcome.winner,
            cause: outcome.cause,
            description: outcome.to_string(),
        });
        self.reset(ctx);
    }

    /// Back to a fresh session: empty registry, starting position, full
    /// clocks — then re-seat the surviving connections in arrival order
    /// (clients learn of the reset through their new `role_assigned`).
    fn reset(&mut self, ctx: &mut Context<Self>) {
        self.roles.reset();
        self.position = self.engine.starting_position();
        self.clock.reset();
        self.phase = SessionPhase::WaitingForPlayers;
        info!(survivors = self.arrivals.len(), "session reset");

        for conn_id in self.arrivals.clone() {
            let role = self.roles.assign(conn_id);
            self.connections
                .send_to(conn_id, ServerMsg::RoleAssigned { role });
        }
        if self.roles.both_controlling_present() {
            self.activate(ctx);
        }
    }

    fn reject(&self, conn_id: Uuid, mv: ProposedMove, reason: RejectReason) {
        self.connections
            .send_to(conn_id, ServerMsg::MoveRejected { mv, reason });
    }
}

impl Actor for SessionCoordinator {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!(
            initial_time = self.time_control.initial,
            tick_millis = self.time_control.tick.as_millis() as u64,
            "session coordinator started"
        );
    }
}

impl Handler<Connect> for SessionCoordinator {
    type Result = ();

    fn handle(&mut self, msg: Connect, ctx: &mut Self::Context) -> Self::Result {
        let Connect { conn_id, recipient } = msg;
        self.connections.register(conn_id, recipient);
        self.arrivals.push(conn_id);

        let role = self.roles.assign(conn_id);
        info!(conn_id = %conn_id, ?role, "connection joined");
        self.connections
            .send_to(conn_id, ServerMsg::RoleAssigned { role });

        if self.phase == SessionPhase::WaitingForPlayers && self.roles.both_controlling_present() {
            self.activate(ctx);
        }
    }
}

impl Handler<Disconnect> for SessionCoordinator {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, ctx: &mut Self::Context) -> Self::Result {
        let conn_id = msg.conn_id;
        self.connections.unregister(conn_id);
        self.arrivals.retain(|id| *id != conn_id);

        match self.roles.release(conn_id) {
            Err(err) => {
                // Duplicate disconnects and never-registered ids are no-ops.
                debug!(conn_id = %conn_id, %err, "disconnect ignored");
            }
            Ok(Role::Observer) => {
                info!(conn_id = %conn_id, "observer left");
            }
            Ok(role) => {
                info!(conn_id = %conn_id, ?role, "controlling connection left");
                if self.phase == SessionPhase::Active {
                    if let Some(side) = role.side() {
                        self.finish(
                            GameOutcome::win(side.opponent(), OutcomeCause::Abandonment),
                            ctx,
                        );
                    }
                }
            }
        }
    }
}

impl Handler<ProposeMove> for SessionCoordinator {
    type Result = ();

    fn handle(&mut self, msg: ProposeMove, ctx: &mut Self::Context) -> Self::Result {
        let ProposeMove { conn_id, mv } = msg;

        if self.phase != SessionPhase::Active {
            self.reject(conn_id, mv, RejectReason::SessionNotActive);
            return;
        }

        let role = match self.roles.role_of(conn_id) {
            Ok(role) => role,
            Err(err) => {
                warn!(conn_id = %conn_id, %err, "move from unknown connection ignored");
                return;
            }
        };

        let turn = match self.engine.side_to_move(&self.position) {
            Ok(side) => side,
            Err(err) => {
                error!(error = %err, "side-to-move query failed; move rejected");
                self.reject(conn_id, mv, RejectReason::TransientFailure);
                return;
            }
        };

        // Ownership is checked before the rules engine ever sees the
        // move: observers and the idle player are turned away here.
        if role.side() != Some(turn) {
            self.reject(conn_id, mv, RejectReason::WrongTurn);
            return;
        }

        match self.engine.validate_move(&self.position, &mv) {
            Ok(next) => {
                self.position = next;
                info!(conn_id = %conn_id, from = %mv.from, to = %mv.to, "move accepted");
                self.connections.broadcast(ServerMsg::MoveAccepted {
                    mv,
                    position: self.position.clone(),
                });
                let generation = self.clock.switch_side();
                self.arm_clock(generation, ctx);

                match self.engine.terminal_status(&self.position) {
                    Ok(Some(status)) => self.finish(outcome_of(status), ctx),
                    Ok(None) => {}
                    Err(err) => {
                        // The move already stands; the session plays on
                        // and the next accepted move re-queries.
                        error!(error = %err, "terminal status query failed");
                    }
                }
            }
            Err(EngineError::Illegal(detail)) => {
                info!(conn_id = %conn_id, detail = %detail, "move rejected");
                self.reject(conn_id, mv, RejectReason::IllegalMove);
            }
            Err(EngineError::Unavailable(detail)) => {
                error!(conn_id = %conn_id, detail = %detail, "rules engine unavailable; move rejected");
                self.reject(conn_id, mv, RejectReason::TransientFailure);
            }
        }
    }
}

impl Handler<GetStatus> for SessionCoordinator {
    type Result = SessionStatus;

    fn handle(&mut self, _msg: GetStatus, _ctx: &mut Self::Context) -> Self::Result {
        SessionStatus {
            active: self.phase == SessionPhase::Active,
            connections: self.arrivals.len(),
            both_present: self.roles.both_controlling_present(),
            white_remaining: self.clock.remaining(Side::White),
            black_remaining: self.clock.remaining(Side::Black),
            position: self.position.as_fen().to_string(),
        }
    }
}

fn outcome_of(status: TerminalStatus) -> GameOutcome {
    match status {
        TerminalStatus::Checkmate { loser } => {
            GameOutcome::win(loser.opponent(), OutcomeCause::Checkmate)
        }
        TerminalStatus::Stalemate => GameOutcome::draw(OutcomeCause::Stalemate),
        TerminalStatus::Draw => GameOutcome::draw(OutcomeCause::FiftyMoveRule),
        TerminalStatus::InsufficientMaterial => {
            GameOutcome::draw(OutcomeCause::InsufficientMaterial)
        }
    }
}
