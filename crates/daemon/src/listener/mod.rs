// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener task for handling socket I/O.
//!
//! One command per connection, length-prefixed JSON both ways. Fetch
//! commands spawn their aggregation engine and return an immediate Ack;
//! `Subscribe` upgrades the connection to a one-way event stream that
//! runs until the client disconnects.

use std::sync::Arc;

use thiserror::Error;
use tokio::net::UnixListener;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use serde_json::Value;

use crate::ctx::Ctx;
use crate::env::ipc_timeout;
use crate::protocol::{self, Request, Response};
use crate::requests;

/// Errors from connection handling.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] protocol::ProtocolError),
}

/// Listener task for accepting socket connections.
pub struct Listener {
    unix: UnixListener,
    ctx: Arc<Ctx>,
}

impl Listener {
    pub fn new(unix: UnixListener, ctx: Arc<Ctx>) -> Self {
        Self { unix, ctx }
    }

    /// Accept loop; spawns a task per connection.
    pub async fn run(self) {
        loop {
            match self.unix.accept().await {
                Ok((stream, _)) => {
                    let ctx = Arc::clone(&self.ctx);
                    tokio::spawn(async move {
                        let (reader, writer) = stream.into_split();
                        if let Err(e) = handle_connection(reader, writer, &ctx).await {
                            log_connection_error(e);
                        }
                    });
                }
                Err(e) => error!("accept error: {}", e),
            }
        }
    }
}

fn log_connection_error(e: ConnectionError) {
    match e {
        ConnectionError::Protocol(protocol::ProtocolError::ConnectionClosed) => {
            debug!("client disconnected")
        }
        ConnectionError::Protocol(protocol::ProtocolError::Timeout) => {
            warn!("connection timeout")
        }
        _ => error!("connection error: {}", e),
    }
}

/// Handle a single client connection.
async fn handle_connection<R, W>(
    mut reader: R,
    mut writer: W,
    ctx: &Arc<Ctx>,
) -> Result<(), ConnectionError>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
    W: tokio::io::AsyncWrite + Unpin + Send + 'static,
{
    // Commands are read untyped first so an unknown `type` can be told
    // apart from a known command with a malformed payload.
    let value = protocol::read_value(&mut reader, ipc_timeout()).await?;
    let request = match parse_request(&value) {
        Ok(request) => request,
        Err(message) => {
            warn!(message, "rejecting command");
            let response = Response::error(message);
            protocol::write_response(&mut writer, &response, ipc_timeout()).await?;
            return Ok(());
        }
    };

    info!(command = command_kind(&value), "received command");

    if request == Request::Subscribe {
        return stream_events(writer, ctx).await;
    }

    let response = dispatch(request, ctx).await;
    protocol::write_response(&mut writer, &response, ipc_timeout()).await?;
    Ok(())
}

fn command_kind(value: &Value) -> &str {
    value.get("type").and_then(Value::as_str).unwrap_or("?")
}

/// Classify an untyped command frame.
fn parse_request(value: &Value) -> Result<Request, String> {
    let Some(kind) = value.get("type").and_then(Value::as_str) else {
        return Err("missing command type".to_owned());
    };
    if !Request::KNOWN_TYPES.contains(&kind) {
        return Err(format!("unknown command: {kind}"));
    }
    serde_json::from_value(value.clone()).map_err(|e| format!("invalid {kind} payload: {e}"))
}

/// Route one parsed command. Fetch commands spawn and Ack; everything
/// else resolves inline.
async fn dispatch(request: Request, ctx: &Arc<Ctx>) -> Response {
    match request {
        Request::FetchProjectIncome { token, from_date, to_date } => {
            tokio::spawn(requests::fetch_project_income(
                Arc::clone(ctx),
                token,
                from_date,
                to_date,
            ));
            Response::Ack
        }

        Request::FetchWorkLogs { token, team_id, from_date, to_date, hide_freelancers } => {
            tokio::spawn(requests::fetch_work_logs(
                Arc::clone(ctx),
                token,
                team_id,
                from_date,
                to_date,
                hide_freelancers,
            ));
            Response::Ack
        }

        Request::FetchVacations { token, from_date, to_date, filter_type } => {
            tokio::spawn(requests::fetch_vacations(
                Arc::clone(ctx),
                token,
                from_date,
                to_date,
                filter_type,
            ));
            Response::Ack
        }

        Request::GetCachedData => match ctx.store.snapshot_recovered(ctx.now_ms()) {
            Ok(data) => Response::CachedData { data },
            Err(e) => {
                error!(error = %e, "failed to read cached data");
                Response::error(format!("failed to read cached data: {e}"))
            }
        },

        Request::ClearRequestState => match ctx.store.clear_request_state() {
            Ok(()) => Response::Ack,
            Err(e) => {
                error!(error = %e, "failed to clear request state");
                Response::error(format!("failed to clear request state: {e}"))
            }
        },

        Request::ClearAllData { scope } => {
            for aborted in ctx.scopes.abort(scope) {
                info!(scope = %aborted, "aborted active operation");
            }
            match ctx.store.clear_scope_data(scope) {
                Ok(()) => Response::Ack,
                Err(e) => {
                    error!(error = %e, "failed to clear cached data");
                    Response::error(format!("failed to clear cached data: {e}"))
                }
            }
        }

        // Awaited inline: a one-shot passthrough, no descriptor, no
        // events.
        Request::GetMyTeams { token } => {
            let cancel = CancellationToken::new();
            match ctx.gateway.my_teams(&token, &cancel).await {
                Ok(teams) => Response::Teams { teams },
                Err(e) => {
                    warn!(error = %e, "teams fetch failed");
                    Response::error(e.to_string())
                }
            }
        }

        // Intercepted in handle_connection before reaching dispatch.
        Request::Subscribe => Response::Subscribed,
    }
}

/// Upgrade the connection to an event stream.
///
/// The subscription is taken before the `Subscribed` response is written
/// so no event published in between is missed. A write failure means the
/// client went away; that ends the stream without error.
async fn stream_events<W>(mut writer: W, ctx: &Arc<Ctx>) -> Result<(), ConnectionError>
where
    W: tokio::io::AsyncWrite + Unpin + Send + 'static,
{
    let mut events = ctx.broadcaster.subscribe();
    protocol::write_response(&mut writer, &Response::Subscribed, ipc_timeout()).await?;
    loop {
        match events.recv().await {
            Ok(event) => {
                if protocol::write_event(&mut writer, &event, ipc_timeout()).await.is_err() {
                    debug!("event subscriber disconnected");
                    return Ok(());
                }
            }
            Err(RecvError::Lagged(missed)) => {
                warn!(missed, "event subscriber lagged; continuing");
            }
            Err(RecvError::Closed) => return Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../listener_tests.rs"]
mod tests;
