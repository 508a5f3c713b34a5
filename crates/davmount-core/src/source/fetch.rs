//! Single HTTP GET for a remote manifest.
//!
//! Runs in the current thread; `DocumentSource::load` calls it from
//! `spawn_blocking` so the run task only suspends.

use std::cell::Cell;
use std::str;

use crate::config::HttpConfig;
use crate::error::RunError;

fn transport(err: curl::Error) -> RunError {
    RunError::Transport(err.to_string())
}

/// Returns the trimmed line if it is an HTTP status line (`HTTP/1.1 404 Not Found`).
pub(crate) fn status_line(header: &[u8]) -> Option<String> {
    let line = str::from_utf8(header).ok()?.trim_end();
    line.starts_with("HTTP/").then(|| line.to_string())
}

/// Numeric code of a status line (`HTTP/1.1 404 Not Found` → 404).
pub(crate) fn status_code(line: &str) -> Option<u32> {
    line.split_whitespace().nth(1)?.parse().ok()
}

fn is_success(line: &str) -> bool {
    status_code(line).map_or(true, |code| (200..300).contains(&code))
}

/// GETs `url` and returns the full body. Any final status outside 2xx is a
/// [`RunError::Fetch`] carrying the last status line seen (redirect hops excluded).
/// The body cap applies to success responses only; error bodies are discarded.
pub fn fetch(url: &str, http: &HttpConfig) -> Result<Vec<u8>, RunError> {
    let mut body: Vec<u8> = Vec::new();
    let mut last_status: Option<String> = None;
    let mut over_cap = false;
    let discard_body = Cell::new(false);
    let cap = http.max_body_bytes;

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(transport)?;
    easy.get(true).map_err(transport)?;
    easy.follow_location(http.max_redirections > 0).map_err(transport)?;
    easy.max_redirections(http.max_redirections).map_err(transport)?;
    easy.connect_timeout(http.connect_timeout()).map_err(transport)?;
    easy.timeout(http.timeout()).map_err(transport)?;
    // Loopback never goes through a proxy from the environment.
    easy.noproxy("localhost,127.0.0.1,::1").map_err(transport)?;
    if let Some(agent) = &http.user_agent {
        easy.useragent(agent).map_err(transport)?;
    }

    let performed = {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                if let Some(line) = status_line(data) {
                    discard_body.set(!is_success(&line));
                    last_status = Some(line);
                }
                true
            })
            .map_err(transport)?;
        transfer
            .write_function(|data| {
                if discard_body.get() {
                    return Ok(data.len());
                }
                if (body.len() + data.len()) as u64 > cap {
                    over_cap = true;
                    return Ok(0); // abort transfer
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(transport)?;
        transfer.perform()
    };

    if let Err(err) = performed {
        if over_cap {
            return Err(RunError::Transport(format!(
                "response body from {} exceeds {} bytes",
                url, cap
            )));
        }
        return Err(RunError::Transport(format!("GET {} failed: {}", url, err)));
    }

    let code = easy.response_code().map_err(transport)?;
    if !(200..300).contains(&code) {
        let status_line = last_status.unwrap_or_else(|| format!("HTTP {}", code));
        tracing::warn!(url, code, "manifest fetch returned {}", status_line);
        return Err(RunError::Fetch {
            status: code,
            status_line,
        });
    }

    tracing::debug!(url, code, bytes = body.len(), "manifest fetched");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_detected() {
        assert_eq!(
            status_line(b"HTTP/1.1 404 Not Found\r\n").as_deref(),
            Some("HTTP/1.1 404 Not Found")
        );
        assert_eq!(status_line(b"HTTP/2 200\r\n").as_deref(), Some("HTTP/2 200"));
    }

    #[test]
    fn status_code_parsed_from_line() {
        assert_eq!(status_code("HTTP/1.1 404 Not Found"), Some(404));
        assert_eq!(status_code("HTTP/2 200"), Some(200));
        assert_eq!(status_code("HTTP/1.1"), None);
        assert!(is_success("HTTP/1.1 204 No Content"));
        assert!(!is_success("HTTP/1.1 500 Internal Server Error"));
    }

    #[test]
    fn other_headers_are_not_status_lines() {
        assert!(status_line(b"Content-Type: text/xml\r\n").is_none());
        assert!(status_line(b"\r\n").is_none());
        assert!(status_line(&[0xff, 0xfe]).is_none());
    }

    #[test]
    fn unsupported_protocol_is_transport_error() {
        let err = fetch("nosuchproto://example.com/manifest.xml", &HttpConfig::default())
            .unwrap_err();
        assert!(matches!(err, RunError::Transport(_)), "got {err:?}");
    }
}
