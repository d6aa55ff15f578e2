//! Drives `NmapEngine` against a stand-in nmap written as a shell script.

#![cfg(unix)]

use netsweep::scanner::{NmapEngine, ScanOptions};
use netsweep::{CidrBlock, ScanEngine, ScanError};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

// Records the -oG path it was given next to itself, and prints a Latin-1
// hostname on stdout the way nmap does for non-UTF-8 reverse DNS names.
const FAKE_NMAP: &str = r#"#!/bin/sh
out=""
prev=""
for arg in "$@"; do
    if [ "$prev" = "-oG" ]; then out="$arg"; fi
    prev="$arg"
done
echo "$out" > "$(dirname "$0")/og-path"
echo "Starting Nmap 7.94 ( https://nmap.org )"
echo "SYN Stealth Scan Timing: About 50.00% done; ETC: 10:00 (0:00:01 remaining)"
printf 'Nmap scan report for caf\351.lan (10.0.0.5)\n'
printf '# Nmap 7.94 scan initiated\n' > "$out"
printf 'Host: 10.0.0.5 ()\tStatus: Up\n' >> "$out"
printf 'Host: 10.0.0.5 ()\tPorts: 22/open/tcp//ssh//OpenSSH 9.6/, 25/closed/tcp//smtp///, 80/open/tcp//http///\n' >> "$out"
printf 'Host: 10.0.0.8 ()\tStatus: Up\n' >> "$out"
echo "Nmap done: 4 IP addresses (2 hosts up) scanned in 1.00 seconds"
"#;

// Undecodable stderr must not hide the privilege message.
const DENIED_NMAP: &str = r#"#!/bin/sh
printf 'Starting Nmap on caf\351\n' >&2
echo "You requested a scan type which requires root privileges." >&2
echo "QUITTING!" >&2
exit 1
"#;

fn install_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

// All scripts run from one test so no other test forks while a script is
// still open for writing.
#[test]
fn fake_nmap_runs() {
    let dir = tempfile::tempdir().unwrap();
    let ok = install_script(dir.path(), "nmap-ok", FAKE_NMAP);
    let denied = install_script(dir.path(), "nmap-denied", DENIED_NMAP);
    let target: CidrBlock = "10.0.0.4/30".parse().unwrap();

    // A file planted where a predictable scratch name would land.
    let victim = dir.path().join("victim.txt");
    fs::write(&victim, "precious\n").unwrap();
    let planted = std::env::temp_dir().join(format!(
        "netsweep-{}-{}.gnmap",
        std::process::id(),
        target.safe_label()
    ));
    let _ = fs::remove_file(&planted);
    std::os::unix::fs::symlink(&victim, &planted).unwrap();

    let engine = NmapEngine::new(&ok, ScanOptions::default().without_progress());
    let result = tokio_test::block_on(engine.scan(&target));
    let _ = fs::remove_file(&planted);
    let hosts = result.unwrap();

    assert_eq!(hosts.len(), 2);
    assert_eq!(hosts[0].ip, "10.0.0.5");
    let ports: Vec<(u16, &str)> = hosts[0]
        .ports
        .iter()
        .map(|p| (p.port, p.service.as_str()))
        .collect();
    assert_eq!(ports, vec![(22, "ssh"), (80, "http")]);
    assert!(hosts[1].ports.is_empty());

    assert_eq!(fs::read_to_string(&victim).unwrap(), "precious\n");
    let og_path = PathBuf::from(fs::read_to_string(dir.path().join("og-path")).unwrap().trim());
    assert_ne!(og_path.parent(), Some(std::env::temp_dir().as_path()));
    assert!(!og_path.exists());

    let engine = NmapEngine::new(&denied, ScanOptions::default().without_progress());
    let err = tokio_test::block_on(engine.scan(&target)).unwrap_err();
    assert!(matches!(err, ScanError::PermissionDenied(msg) if msg.ends_with("requires root privileges.")));
}
