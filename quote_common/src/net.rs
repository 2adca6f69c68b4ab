//! Shared networking constants and helpers used by client and server.

/// Upstream CSV endpoint; `{symbol}` is replaced with the URL-encoded symbol.
pub const DEFAULT_SOURCE_URL: &str = "https://stooq.com/q/l/?s={symbol}&f=sd2t2ohlcv&h&e=csv";
/// Placeholder substituted in the source URL template.
pub const SYMBOL_PLACEHOLDER: &str = "{symbol}";
/// Upstream request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Poll interval used when none is given.
pub const DEFAULT_INTERVAL_MS: i64 = 60_000;
/// TCP port the relay listens on by default.
pub const RELAY_PORT: u16 = 8080;

/// Helper to format an IPv4 address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}
