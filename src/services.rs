//! Service names for well-known ports.
//!
//! nmap leaves the service column empty when it could not fingerprint a
//! port; those entries are filled from this table.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Name used when neither the engine nor the table knows the service.
pub const UNKNOWN_SERVICE: &str = "unknown";

static WELL_KNOWN: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    [
        (20, "ftp-data"),
        (21, "ftp"),
        (22, "ssh"),
        (23, "telnet"),
        (25, "smtp"),
        (53, "domain"),
        (67, "dhcps"),
        (69, "tftp"),
        (80, "http"),
        (88, "kerberos"),
        (110, "pop3"),
        (111, "rpcbind"),
        (123, "ntp"),
        (135, "msrpc"),
        (139, "netbios-ssn"),
        (143, "imap"),
        (161, "snmp"),
        (389, "ldap"),
        (443, "https"),
        (445, "microsoft-ds"),
        (465, "smtps"),
        (514, "syslog"),
        (515, "printer"),
        (548, "afp"),
        (554, "rtsp"),
        (587, "submission"),
        (631, "ipp"),
        (636, "ldaps"),
        (873, "rsync"),
        (993, "imaps"),
        (995, "pop3s"),
        (1080, "socks"),
        (1433, "ms-sql-s"),
        (1521, "oracle"),
        (1723, "pptp"),
        (1883, "mqtt"),
        (2049, "nfs"),
        (3306, "mysql"),
        (3389, "ms-wbt-server"),
        (5432, "postgresql"),
        (5900, "vnc"),
        (6379, "redis"),
        (8080, "http-proxy"),
        (8443, "https-alt"),
        (9200, "elasticsearch"),
        (27017, "mongodb"),
    ]
    .into_iter()
    .collect()
});

/// Look up the conventional service name for a port.
pub fn well_known(port: u16) -> Option<&'static str> {
    WELL_KNOWN.get(&port).copied()
}

/// Pick the service name to record for a port.
///
/// The engine's answer wins when present; otherwise the well-known table,
/// then [`UNKNOWN_SERVICE`].
pub fn resolve(port: u16, reported: &str) -> String {
    let reported = reported.trim();
    if !reported.is_empty() {
        return reported.to_string();
    }
    well_known(port).unwrap_or(UNKNOWN_SERVICE).to_string()
}
