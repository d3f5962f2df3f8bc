//! Configuration loading and resolution.
//!
//! Every setting resolves as: explicit flag, then environment, then default.

pub const DEFAULT_RPC_ADDR: &str = "0.0.0.0:9000";
pub const DEFAULT_HEALTH_ADDR: &str = "0.0.0.0:9001";

pub const RPC_ADDR_ENV: &str = "MCP_SERVER_ENDPOINT";
pub const HEALTH_ADDR_ENV: &str = "MCP_HEALTH_ENDPOINT";

/// Resolve the JSON-RPC listen address.
pub fn resolve_rpc_addr(explicit: Option<&str>) -> String {
    resolve_addr(explicit, std::env::var(RPC_ADDR_ENV).ok(), DEFAULT_RPC_ADDR)
}

/// Resolve the health service listen address.
pub fn resolve_health_addr(explicit: Option<&str>) -> String {
    resolve_addr(explicit, std::env::var(HEALTH_ADDR_ENV).ok(), DEFAULT_HEALTH_ADDR)
}

fn resolve_addr(explicit: Option<&str>, env: Option<String>, default: &str) -> String {
    let chosen = explicit
        .map(str::to_string)
        .or(env.filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| default.to_string());
    normalize_addr(chosen.trim())
}

/// Accept Go-style `:port` addresses by binding all interfaces.
fn normalize_addr(addr: &str) -> String {
    if addr.starts_with(':') {
        format!("0.0.0.0{addr}")
    } else {
        addr.to_string()
    }
}

/// URL clients should use to reach an address (wildcard hosts become localhost).
pub fn public_url(addr: &str) -> String {
    match addr.rsplit_once(':') {
        Some(("0.0.0.0" | "" | "[::]", port)) => format!("http://localhost:{port}"),
        _ => format!("http://{addr}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_wins() {
        let addr = resolve_addr(Some("127.0.0.1:1"), Some("127.0.0.1:2".into()), "x:3");
        assert_eq!(addr, "127.0.0.1:1");
    }

    #[test]
    fn test_env_then_default() {
        assert_eq!(resolve_addr(None, Some("127.0.0.1:2".into()), "x:3"), "127.0.0.1:2");
        assert_eq!(resolve_addr(None, Some("  ".into()), "x:3"), "x:3");
        assert_eq!(resolve_addr(None, None, DEFAULT_RPC_ADDR), "0.0.0.0:9000");
    }

    #[test]
    fn test_port_only_address() {
        assert_eq!(resolve_addr(None, Some(":8090".into()), "x:3"), "0.0.0.0:8090");
    }

    #[test]
    fn test_public_url() {
        assert_eq!(public_url("0.0.0.0:9000"), "http://localhost:9000");
        assert_eq!(public_url("127.0.0.1:9000"), "http://127.0.0.1:9000");
    }
}
