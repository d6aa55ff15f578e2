//! XML output shaped like nmap's `-oX` reports.
//!
//! Only the elements netsweep has data for are written: `status`,
//! `address`, and a `ports` list with `state` and `service` per port.

use crate::error::{WriteError, WriteResult};
use crate::types::HostRecord;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Write;

fn emit<W: Write>(xml: &mut Writer<W>, event: Event<'_>) -> WriteResult<()> {
    xml.write_event(event)
        .map_err(|e| WriteError::Serialize(e.to_string()))
}

fn open<W: Write>(xml: &mut Writer<W>, name: &str, attrs: &[(&str, &str)]) -> WriteResult<()> {
    emit(xml, Event::Start(BytesStart::new(name).with_attributes(attrs.iter().copied())))
}

fn close<W: Write>(xml: &mut Writer<W>, name: &str) -> WriteResult<()> {
    emit(xml, Event::End(BytesEnd::new(name)))
}

fn empty<W: Write>(xml: &mut Writer<W>, name: &str, attrs: &[(&str, &str)]) -> WriteResult<()> {
    emit(xml, Event::Empty(BytesStart::new(name).with_attributes(attrs.iter().copied())))
}

/// Write results as an `<nmaprun>` document with one `<host>` per record.
pub fn write_xml<W: Write>(results: &[HostRecord], out: W) -> WriteResult<()> {
    let mut xml = Writer::new_with_indent(out, b' ', 2);

    emit(&mut xml, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    open(
        &mut xml,
        "nmaprun",
        &[("scanner", "netsweep"), ("version", env!("CARGO_PKG_VERSION"))],
    )?;

    for host in results {
        open(&mut xml, "host", &[])?;
        empty(&mut xml, "status", &[("state", "up")])?;
        empty(&mut xml, "address", &[("addr", host.ip.as_str()), ("addrtype", "ipv4")])?;

        open(&mut xml, "ports", &[])?;
        for entry in &host.ports {
            let portid = entry.port.to_string();
            open(&mut xml, "port", &[("protocol", "tcp"), ("portid", portid.as_str())])?;
            empty(&mut xml, "state", &[("state", "open")])?;
            empty(&mut xml, "service", &[("name", entry.service.as_str())])?;
            close(&mut xml, "port")?;
        }
        close(&mut xml, "ports")?;

        close(&mut xml, "host")?;
    }

    close(&mut xml, "nmaprun")?;

    let mut out = xml.into_inner();
    out.write_all(b"\n")
        .and_then(|()| out.flush())
        .map_err(|e| WriteError::Serialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(results: &[HostRecord]) -> String {
        let mut buf = Vec::new();
        write_xml(results, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_nmap_like_layout() {
        let results = vec![
            HostRecord::new("10.0.0.5")
                .with_port(22, "ssh")
                .with_port(80, "http"),
            HostRecord::new("10.0.0.8"),
        ];
        let text = render(&results);

        assert!(text.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(text.contains(r#"<nmaprun scanner="netsweep""#));
        assert_eq!(text.matches("<host>").count(), 2);
        assert!(text.contains(r#"<address addr="10.0.0.5" addrtype="ipv4"/>"#));
        assert!(text.contains(r#"<port protocol="tcp" portid="22">"#));
        assert!(text.contains(r#"<service name="ssh"/>"#));
        assert!(text.contains(r#"<service name="http"/>"#));
        assert_eq!(text.matches("<port ").count(), 2);
        assert!(text.trim_end().ends_with("</nmaprun>"));
    }

    #[test]
    fn test_service_names_are_escaped() {
        let results = vec![HostRecord::new("10.0.0.1").with_port(8080, "a<b&\"c\"")];
        let text = render(&results);

        assert!(text.contains(r#"<service name="a&lt;b&amp;&quot;c&quot;"/>"#));
    }

    #[test]
    fn test_no_hosts() {
        let text = render(&[]);
        assert!(!text.contains("<host>"));
        assert!(text.contains("</nmaprun>"));
    }
}
