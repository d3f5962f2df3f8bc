//! Stdio transport tests over in-memory streams.

use std::sync::Arc;

use serde_json::Value;

use mathtext_mcp::protocol::ProtocolHandler;
use mathtext_mcp::tools::default_registry;
use mathtext_mcp::transport::StdioTransport;

async fn run_lines(input: &str) -> Vec<Value> {
    let handler = ProtocolHandler::new(Arc::new(default_registry().unwrap()));
    let transport = StdioTransport::new(handler);

    let mut output = Vec::new();
    transport.serve(input.as_bytes(), &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_one_response_per_line() {
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"tools/list","params":{}}"#,
        "\n\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"multiply_numbers","arguments":{"a":6,"b":7}}}"#,
        "\n",
    );

    let responses = run_lines(input).await;
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["tools"].as_array().unwrap().len(), 3);
    assert_eq!(
        responses[1]["result"]["content"][0]["text"],
        "The product of 6 and 7 is 42"
    );
}

#[tokio::test]
async fn test_parse_error_keeps_loop_running() {
    let input = concat!(
        "{\"broken\":\n",
        r#"{"jsonrpc":"2.0","id":5,"method":"tools/list"}"#,
    );

    let responses = run_lines(input).await;
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["id"], Value::Null);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[1]["id"], 5);
}
