//! Stdio Transport
//!
//! Newline-delimited JSON-RPC: one message per line in, one response per line
//! out. Messages are handled strictly in arrival order.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::handlers::{PARSE_ERROR, RpcResponse, handle_message};
use crate::state::AppState;

/// Serve requests from `reader` until EOF, writing responses to `writer`.
///
/// A line that is not UTF-8 is answered with a parse error and skipped; only
/// an I/O failure on either stream ends the loop early.
pub async fn serve<R, W>(state: &mut AppState, mut reader: R, mut writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => handle_message(state, line.trim()).await,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding non UTF-8 message");
                Some(RpcResponse::error(
                    serde_json::Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {e}"),
                ))
            }
        };

        if let Some(response) = response {
            let mut payload = serde_json::to_vec(&response)?;
            payload.push(b'\n');
            writer.write_all(&payload).await?;
            writer.flush().await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use payman_client::PaymanClient;
    use payman_core::ToolRegistry;
    use serde_json::json;

    fn state() -> AppState {
        let mut tools = ToolRegistry::new();
        payman_tools::register_tools(&mut tools, &PaymanClient::new("http://127.0.0.1:1"));
        AppState::new(tools)
    }

    async fn run(state: &mut AppState, input: &str) -> Vec<RpcResponse> {
        run_bytes(state, input.as_bytes()).await
    }

    async fn run_bytes(state: &mut AppState, input: &[u8]) -> Vec<RpcResponse> {
        let mut output = Vec::new();
        serve(state, input, &mut output).await.unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_session_flow() {
        let input = [
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call",
                   "params": {"name": "search-payees", "arguments": {}}}),
            json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call",
                   "params": {"name": "set-api-key", "arguments": {"apiKey": "sk_test"}}}),
            json!({"jsonrpc": "2.0", "id": 4, "method": "ping"}),
        ]
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");

        let mut state = state();
        let responses = run(&mut state, &input).await;

        let ids: Vec<_> = responses.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec![json!(1), json!(2), json!(3), json!(4)]);

        let search = responses[1].result.as_ref().unwrap();
        assert_eq!(search["isError"], true);

        let set_key = responses[2].result.as_ref().unwrap();
        assert_eq!(
            set_key["content"][0]["text"],
            "Payman API key has been set successfully."
        );
        assert!(state.session.is_authenticated());
    }

    #[tokio::test]
    async fn test_blank_lines_skipped_and_bad_json_answered() {
        let mut state = state();
        let responses = run(&mut state, "\n   \n{oops\n").await;
        assert_eq!(responses.len(), 1);
        assert!(responses[0].error.is_some());
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_end_session() {
        let set_key = json!({"jsonrpc": "2.0", "id": 1, "method": "tools/call",
                             "params": {"name": "set-api-key", "arguments": {"apiKey": "sk_test"}}});
        let mut input = set_key.to_string().into_bytes();
        input.extend_from_slice(b"\n\xff\xfe\n");
        input.extend_from_slice(br#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#);
        input.push(b'\n');

        let mut state = state();
        let responses = run_bytes(&mut state, &input).await;

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0].id, json!(1));
        assert_eq!(responses[1].id, serde_json::Value::Null);
        assert_eq!(responses[1].error.as_ref().unwrap().code, PARSE_ERROR);
        assert_eq!(responses[2].id, json!(2));
        assert_eq!(responses[2].result, Some(json!({})));
        assert!(state.session.is_authenticated());
    }

    #[tokio::test]
    async fn test_eof_ends_cleanly() {
        let mut state = state();
        assert!(run(&mut state, "").await.is_empty());
    }
}
