use std::io::Read;
use std::sync::Arc;
use std::thread;

use anyhow::{anyhow, Result};
use serde_json::json;
use tiny_http::{Header, Method, Response, Server, StatusCode};
use tracing::{debug, error, info, warn};
use yacht_engine::api::{decide_request, Request};

use crate::config::ServeConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    fn json(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: "application/json",
            body,
        }
    }

    fn error(status: u16, message: impl std::fmt::Display) -> Self {
        Self::json(status, json!({ "error": message.to_string() }).to_string())
    }

    fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: body.to_string(),
        }
    }
}

pub fn serve(cfg: &ServeConfig) -> Result<()> {
    let server = Server::http(cfg.bind.as_str())
        .map_err(|e| anyhow!("failed to bind {}: {}", cfg.bind, e))?;
    let server = Arc::new(server);
    info!(bind = %cfg.bind, workers = cfg.workers, "decision service listening");

    let handles: Vec<_> = (0..cfg.workers)
        .map(|worker| {
            let server = Arc::clone(&server);
            let pretty = cfg.pretty;
            thread::spawn(move || {
                for request in server.incoming_requests() {
                    if let Err(err) = handle(request, pretty) {
                        warn!(worker, "failed to answer request: {err}");
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            error!("worker thread panicked");
        }
    }
    Ok(())
}

fn handle(mut request: tiny_http::Request, pretty: bool) -> Result<()> {
    let method = request.method().clone();
    let url = request.url().to_string();
    let mut body = String::new();
    if method == Method::Post {
        request.as_reader().read_to_string(&mut body)?;
    }

    let reply = route(&method, &url, &body, pretty);
    debug!(%method, %url, status = reply.status, "handled");

    let header = Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes())
        .map_err(|_| anyhow!("bad content type header"))?;
    let response = Response::from_string(reply.body)
        .with_status_code(StatusCode(reply.status))
        .with_header(header);
    request.respond(response)?;
    Ok(())
}

pub fn route(method: &Method, url: &str, body: &str, pretty: bool) -> Reply {
    match (method, url) {
        (Method::Get, "/health") => Reply::text(200, "ok"),
        (Method::Post, "/decide") => decide_body(body, pretty),
        _ => Reply::error(404, format!("no route for {} {}", method, url)),
    }
}

fn decide_body(body: &str, pretty: bool) -> Reply {
    let request: Request = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => {
            warn!("rejected malformed request: {e}");
            return Reply::error(400, format!("invalid_request: {}", e));
        }
    };

    let response = match decide_request(&request) {
        Ok(r) => r,
        Err(e) if e.is_client_error() => {
            warn!(player = %request.state.player, "rejected request: {e}");
            return Reply::error(400, e);
        }
        Err(e) => {
            error!(player = %request.state.player, "invariant breach: {e}");
            return Reply::error(500, e);
        }
    };

    if request.state.trial == 3 && response.decision.choice.is_none() {
        error!(turn = request.state.turn, "final trial produced no choice");
        return Reply::error(500, "final trial produced no choice");
    }

    let encoded = if pretty {
        serde_json::to_string_pretty(&response)
    } else {
        serde_json::to_string(&response)
    };
    match encoded {
        Ok(text) => Reply::json(200, text),
        Err(e) => Reply::error(500, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{"state":{"turn":1,"trial":1,"player":"p1","dices":[6,6,6,6,6],"scoreBoard":{"p1":{"yacht":null,"choice":null}}}}"#;

    #[test]
    fn decide_route_answers_with_a_decision() {
        let reply = route(&Method::Post, "/decide", BODY, false);
        assert_eq!(reply.status, 200);
        assert_eq!(reply.content_type, "application/json");
        assert_eq!(reply.body, r#"{"decision":{"keep":[],"choice":"yacht"}}"#);
    }

    #[test]
    fn malformed_json_is_a_bad_request() {
        let reply = route(&Method::Post, "/decide", "{not json", false);
        assert_eq!(reply.status, 400);
        assert!(reply.body.contains("invalid_request"));
    }

    #[test]
    fn unknown_player_is_a_bad_request() {
        let body = BODY.replace("\"player\":\"p1\"", "\"player\":\"p2\"");
        let reply = route(&Method::Post, "/decide", &body, false);
        assert_eq!(reply.status, 400);
        assert!(reply.body.contains("p2"));
    }

    #[test]
    fn exhausted_board_is_a_server_error() {
        let body = BODY.replace(r#"{"yacht":null,"choice":null}"#, r#"{"yacht":50}"#);
        let reply = route(&Method::Post, "/decide", &body, false);
        assert_eq!(reply.status, 500);
    }

    #[test]
    fn health_and_unknown_routes() {
        assert_eq!(route(&Method::Get, "/health", "", false).status, 200);
        assert_eq!(route(&Method::Get, "/decide", "", false).status, 404);
        assert_eq!(route(&Method::Post, "/nope", "{}", false).status, 404);
    }
}
