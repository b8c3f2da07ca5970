//! Access logging: one line per request, request body included.

use std::pin::Pin;

use actix_web::{
    body::MessageBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    error::PayloadError,
    middleware::{Logger, Next},
    web::Bytes,
    HttpMessage,
};
use futures::{stream, Stream, StreamExt};

/// At most this many body bytes are copied into the log line.
const LOGGED_BODY_LIMIT: usize = 4 * 1024;

/// Request body as it will appear in the access log.
#[derive(Clone, Debug)]
pub(crate) struct LoggedBody(pub(crate) String);

impl LoggedBody {
    fn from_prefix(prefix: &[u8], truncated: bool) -> Self {
        if prefix.is_empty() {
            return Self("{}".to_owned());
        }
        if truncated {
            return Self(format!("{}...", String::from_utf8_lossy(prefix)));
        }
        // Re-serialize JSON so the log line stays on one line.
        match serde_json::from_slice::<serde_json::Value>(prefix) {
            Ok(value) => Self(value.to_string()),
            Err(_) => Self(String::from_utf8_lossy(prefix).into_owned()),
        }
    }
}

/// Access log: method, path, status, response size, latency and body.
///
/// Register this last so it is the outermost middleware and sees every
/// request; [`capture_body`] hands the body over on the response.
pub fn access_log() -> Logger {
    Logger::new("%{method}xi %U %s %b - %D ms %{body}xo")
        .custom_request_replace("method", |req| req.method().to_string())
        .custom_response_replace("body", |res| {
            res.response()
                .extensions()
                .get::<LoggedBody>()
                .map(|body| body.0.clone())
                .unwrap_or_else(|| "{}".to_owned())
        })
}

/// Copies the first [`LOGGED_BODY_LIMIT`] bytes of the request body for the
/// access log and replays them, followed by the untouched rest of the
/// stream, to the handler. Never fails and never limits the body; size
/// limits stay with the handlers' extractors.
pub async fn capture_body(
    mut req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let mut rest = req.take_payload();
    let mut chunks: Vec<Result<Bytes, PayloadError>> = Vec::new();
    let mut prefix: Vec<u8> = Vec::new();
    let mut truncated = false;

    while !truncated {
        match rest.next().await {
            Some(Ok(chunk)) => {
                let room = LOGGED_BODY_LIMIT - prefix.len();
                truncated = chunk.len() > room;
                prefix.extend_from_slice(&chunk[..chunk.len().min(room)]);
                chunks.push(Ok(chunk));
            }
            Some(Err(error)) => {
                chunks.push(Err(error));
                break;
            }
            None => break,
        }
    }

    let replay: Pin<Box<dyn Stream<Item = Result<Bytes, PayloadError>>>> =
        Box::pin(stream::iter(chunks).chain(rest));
    req.set_payload(Payload::from(replay));

    let logged = LoggedBody::from_prefix(&prefix, truncated);
    let mut res = next.call(req).await?;
    res.response_mut().extensions_mut().insert(logged);
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_logs_as_empty_object() {
        assert_eq!(LoggedBody::from_prefix(b"", false).0, "{}");
    }

    #[test]
    fn json_body_is_compacted() {
        let body = LoggedBody::from_prefix(b"{\n  \"content\": \"hi\"\n}", false);
        assert_eq!(body.0, r#"{"content":"hi"}"#);
    }

    #[test]
    fn non_json_body_is_logged_verbatim() {
        assert_eq!(LoggedBody::from_prefix(b"name=x", false).0, "name=x");
    }

    #[test]
    fn truncated_body_is_marked() {
        assert_eq!(LoggedBody::from_prefix(br#"{"content":"aaa"#, true).0, r#"{"content":"aaa..."#);
    }
}
