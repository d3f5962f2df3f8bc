//! Interactive REPL for the mathtext MCP server.
//!
//! Launch with `mathtext-mcp repl` to enter interactive mode.
//! Type `/help` for available commands, Tab for completion.

use rustyline::completion::{Completer, Pair};
use rustyline::config::CompletionType;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{
    Cmd, ConditionalEventHandler, Config, Editor, Event, EventContext, EventHandler, Helper,
    KeyEvent, RepeatCount,
};
use serde_json::{json, Map, Value};

use crate::protocol::ProtocolHandler;
use crate::types::{Implementation, JSONRPC_VERSION};

/// Available REPL commands.
const COMMANDS: &[(&str, &str)] = &[
    ("/tools", "List available MCP tools"),
    ("/call", "Call a tool: /call <tool> key=value ..."),
    ("/raw", "Send a raw JSON-RPC message"),
    ("/info", "Show server identity"),
    ("/clear", "Clear the screen"),
    ("/help", "Show available commands"),
    ("/exit", "Quit the REPL"),
];

/// REPL helper for tab completion.
struct ReplHelper {
    tool_names: Vec<String>,
}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let input = &line[..pos];

        if !input.contains(' ') {
            let matches: Vec<Pair> = COMMANDS
                .iter()
                .filter(|(cmd, _)| cmd.starts_with(input))
                .map(|(cmd, desc)| Pair {
                    display: format!("{cmd:<16} {desc}"),
                    replacement: format!("{cmd} "),
                })
                .collect();
            return Ok((0, matches));
        }

        // Tool name completion
        if let Some(args) = input.strip_prefix("/call ") {
            if !args.contains(' ') {
                let prefix_start = input.len() - args.len();
                let matches: Vec<Pair> = self
                    .tool_names
                    .iter()
                    .filter(|name| name.starts_with(args))
                    .map(|name| Pair {
                        display: name.clone(),
                        replacement: format!("{name} "),
                    })
                    .collect();
                return Ok((prefix_start, matches));
            }
        }

        Ok((pos, Vec::new()))
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if pos < line.len() || line.is_empty() {
            return None;
        }
        if line.starts_with('/') && !line.contains(' ') {
            for (cmd, _) in COMMANDS {
                if cmd.starts_with(line) && *cmd != line {
                    return Some(cmd[line.len()..].to_string());
                }
            }
        }
        None
    }
}

impl Highlighter for ReplHelper {}
impl Validator for ReplHelper {}
impl Helper for ReplHelper {}

struct TabCompleteOrAcceptHint;

impl ConditionalEventHandler for TabCompleteOrAcceptHint {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        ctx: &EventContext<'_>,
    ) -> Option<Cmd> {
        if ctx.has_hint() {
            Some(Cmd::CompleteHint)
        } else {
            Some(Cmd::Complete)
        }
    }
}

/// Session state.
struct ReplState {
    handler: ProtocolHandler,
    next_id: i64,
}

/// Run the interactive REPL.
pub fn run(handler: ProtocolHandler) -> anyhow::Result<()> {
    eprintln!();
    eprintln!(
        "  \x1b[32m\u{25c9}\x1b[0m \x1b[1mmathtext-mcp v{}\x1b[0m \x1b[90m\u{2014} Math and Text Tools\x1b[0m",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!();
    eprintln!(
        "    Press \x1b[36m/\x1b[0m to browse commands, \x1b[90mTab\x1b[0m to complete, \x1b[90m/exit\x1b[0m to quit."
    );
    eprintln!();

    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .completion_type(CompletionType::List)
        .completion_prompt_limit(20)
        .build();

    let tool_names = handler
        .registry()
        .list_tools()
        .iter()
        .map(|t| t.name().to_string())
        .collect();

    let mut rl: Editor<ReplHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(config)?;
    rl.set_helper(Some(ReplHelper { tool_names }));
    rl.bind_sequence(
        KeyEvent::from('\t'),
        EventHandler::Conditional(Box::new(TabCompleteOrAcceptHint)),
    );

    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    let hist_path = std::path::PathBuf::from(&home).join(".mathtext_mcp_history");
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    let mut state = ReplState {
        handler,
        next_id: 1,
    };
    let prompt = " \x1b[36mmathtext>\x1b[0m ";

    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let input = line.strip_prefix('/').unwrap_or(line);
                if input.is_empty() {
                    cmd_help();
                    continue;
                }

                let mut parts = input.splitn(2, ' ');
                let cmd = parts.next().unwrap_or("");
                let args = parts.next().unwrap_or("").trim();

                match cmd {
                    "exit" | "quit" => {
                        eprintln!("  \x1b[90m\u{2728}\x1b[0m Goodbye!");
                        break;
                    }
                    "help" | "h" | "?" => cmd_help(),
                    "clear" | "cls" => eprint!("\x1b[2J\x1b[H"),
                    "info" => cmd_info(&state),
                    "tools" => cmd_tools(&mut state),
                    "call" => cmd_call(args, &mut state),
                    "raw" => cmd_raw(args, &state),
                    _ => {
                        eprintln!("  Unknown command '/{cmd}'. Type /help for commands.");
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                eprintln!("  \x1b[90m(Ctrl+C)\x1b[0m Type \x1b[1m/exit\x1b[0m to quit.");
            }
            Err(ReadlineError::Eof) => {
                eprintln!("  \x1b[90m\u{2728}\x1b[0m Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("  Error: {err}");
                break;
            }
        }
    }

    let _ = std::fs::create_dir_all(hist_path.parent().unwrap_or(std::path::Path::new(".")));
    let _ = rl.save_history(&hist_path);

    Ok(())
}

fn cmd_help() {
    eprintln!();
    eprintln!("  Commands:");
    eprintln!();
    for (cmd, desc) in COMMANDS {
        eprintln!("    {cmd:<18} {desc}");
    }
    eprintln!();
    eprintln!("  Example: /call process_text text=\"hello world\" operation=upper");
    eprintln!();
}

fn cmd_info(state: &ReplState) {
    let server = Implementation::current();
    eprintln!();
    eprintln!("  Server:   {} v{}", server.name, server.version);
    eprintln!("  Protocol: JSON-RPC {JSONRPC_VERSION}");
    eprintln!("  Tools:    {}", state.handler.registry().len());
    eprintln!();
}

fn cmd_tools(state: &mut ReplState) {
    let request = envelope(state.next_request_id(), "tools/list", json!({}));
    let Some(response) = send(&state.handler, request) else {
        return;
    };

    let tools = response["result"]["tools"].as_array().cloned().unwrap_or_default();
    eprintln!();
    eprintln!("  {} MCP tools available:", tools.len());
    eprintln!();
    for tool in &tools {
        let params = tool["inputSchema"]["properties"]
            .as_object()
            .map(|p| p.keys().cloned().collect::<Vec<_>>().join(", "))
            .unwrap_or_default();
        eprintln!(
            "    {:<20} {} ({params})",
            tool["name"].as_str().unwrap_or(""),
            tool["description"].as_str().unwrap_or("")
        );
    }
    eprintln!();
}

fn cmd_call(args: &str, state: &mut ReplState) {
    let mut parts = args.splitn(2, ' ');
    let name = parts.next().unwrap_or("").trim();
    if name.is_empty() {
        eprintln!("  Usage: /call <tool> key=value ...");
        return;
    }

    let arguments = match parse_call_args(parts.next().unwrap_or("")) {
        Ok(arguments) => arguments,
        Err(e) => {
            eprintln!("  {e}");
            return;
        }
    };

    let request = envelope(
        state.next_request_id(),
        "tools/call",
        json!({ "name": name, "arguments": arguments }),
    );
    if let Some(response) = send(&state.handler, request) {
        print_response(&response);
    }
}

fn cmd_raw(args: &str, state: &ReplState) {
    if args.is_empty() {
        eprintln!("  Usage: /raw <json-rpc message>");
        return;
    }

    let reply = state.handler.handle_bytes(args.as_bytes());
    match serde_json::from_slice::<Value>(reply.body()) {
        Ok(response) => print_response(&response),
        Err(e) => eprintln!("  Unreadable response: {e}"),
    }
}

impl ReplState {
    fn next_request_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn envelope(id: i64, method: &str, params: Value) -> Value {
    json!({ "jsonrpc": JSONRPC_VERSION, "id": id, "method": method, "params": params })
}

fn send(handler: &ProtocolHandler, request: Value) -> Option<Value> {
    let body = handler.handle_value(request);
    match serde_json::from_slice(&body) {
        Ok(response) => Some(response),
        Err(e) => {
            eprintln!("  Unreadable response: {e}");
            None
        }
    }
}

fn print_response(response: &Value) {
    eprintln!();
    if let Some(error) = response.get("error") {
        eprintln!(
            "  \x1b[31mError {}\x1b[0m: {}",
            error["code"],
            error["message"].as_str().unwrap_or("")
        );
    } else if let Some(content) = response["result"]["content"].as_array() {
        for segment in content {
            eprintln!("  {}", segment["text"].as_str().unwrap_or(""));
        }
    } else {
        eprintln!(
            "{}",
            serde_json::to_string_pretty(response).unwrap_or_default()
        );
    }
    eprintln!();
}

/// Parse `key=value` pairs. Values are read as JSON when they parse
/// (`5`, `true`, `"quoted text"`), otherwise taken as plain strings.
fn parse_call_args(input: &str) -> Result<Map<String, Value>, String> {
    let mut arguments = Map::new();

    for token in tokenize(input)? {
        let (key, raw) = token
            .split_once('=')
            .ok_or_else(|| format!("Expected key=value, got '{token}'"))?;
        if key.is_empty() {
            return Err(format!("Missing argument name in '{token}'"));
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        arguments.insert(key.to_string(), value);
    }

    Ok(arguments)
}

/// Split on whitespace, keeping double-quoted spans together.
fn tokenize(input: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;

    for c in input.chars() {
        match c {
            _ if escaped => {
                current.push(c);
                escaped = false;
            }
            '\\' if in_quotes => {
                current.push(c);
                escaped = true;
            }
            '"' => {
                current.push(c);
                in_quotes = !in_quotes;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }

    if in_quotes {
        return Err("Unterminated quote".to_string());
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_call_args() {
        let args = parse_call_args(r#"a=5 b=2.5 text="hello world" operation=upper"#).unwrap();
        assert_eq!(args["a"], json!(5));
        assert_eq!(args["b"], json!(2.5));
        assert_eq!(args["text"], json!("hello world"));
        assert_eq!(args["operation"], json!("upper"));
    }

    #[test]
    fn test_parse_call_args_errors() {
        assert!(parse_call_args("novalue").is_err());
        assert!(parse_call_args("=5").is_err());
        assert!(parse_call_args(r#"text="open"#).is_err());
        assert!(parse_call_args("").unwrap().is_empty());
    }

    #[test]
    fn test_tokenize_keeps_escaped_quotes() {
        let tokens = tokenize(r#"text="say \"hi\"" x=1"#).unwrap();
        assert_eq!(tokens, [r#"text="say \"hi\"""#, "x=1"]);
        let args = parse_call_args(r#"text="say \"hi\"""#).unwrap();
        assert_eq!(args["text"], json!(r#"say "hi""#));
    }
}
