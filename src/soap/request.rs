//! Inbound envelope parsing
//!
//! Only as much of the document is read as is needed to find the first
//! element under `Envelope/Body`. Headers (including WS-Security tokens) are
//! skipped, and anything after the operation element is never looked at, so
//! a request truncated past that point still resolves.

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::error::SoapError;

/// Qualified name of the requested operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Namespace URI, `None` when the element's prefix is not bound
    pub namespace: Option<String>,
    /// Local element name
    pub name: String,
}

impl Operation {
    fn from_resolved(ns: &ResolveResult<'_>, local: &[u8]) -> Self {
        let namespace = match ns {
            ResolveResult::Bound(Namespace(uri)) => Some(String::from_utf8_lossy(uri).into_owned()),
            _ => None,
        };

        Self {
            namespace,
            name: String::from_utf8_lossy(local).into_owned(),
        }
    }
}

/// Locate the HTTP body inside a raw request buffer
///
/// Returns everything after the first blank line, or the whole buffer when
/// there is no header terminator.
pub fn http_body(raw: &[u8]) -> &[u8] {
    raw.windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|pos| &raw[pos + 4..])
        .unwrap_or(raw)
}

/// Find the operation requested by a SOAP envelope
///
/// Returns `Ok(None)` for an envelope with an empty `Body`.
pub fn parse_operation(payload: &[u8]) -> Result<Option<Operation>, SoapError> {
    let mut reader = NsReader::from_reader(payload);
    reader.config_mut().trim_text(true);

    // Number of currently open elements
    let mut depth = 0usize;
    let mut in_body = false;
    let mut seen_envelope = false;

    loop {
        let (ns, event) = reader.read_resolved_event()?;
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                let local = e.local_name();
                let local = local.as_ref();

                match depth {
                    0 if local != b"Envelope" => return Err(SoapError::NotAnEnvelope),
                    0 => seen_envelope = true,
                    1 if local == b"Body" => {
                        if is_empty {
                            return Ok(None);
                        }
                        in_body = true;
                    }
                    2 if in_body => return Ok(Some(Operation::from_resolved(&ns, local))),
                    _ => {}
                }

                if is_empty {
                    if depth == 0 {
                        return Err(SoapError::MissingBody);
                    }
                } else {
                    depth += 1;
                }
            }
            Event::End(_) => {
                if in_body && depth == 2 {
                    return Ok(None);
                }
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Err(SoapError::MissingBody);
                }
            }
            Event::Eof => {
                return Err(if seen_envelope {
                    SoapError::MissingBody
                } else {
                    SoapError::NotAnEnvelope
                });
            }
            _ => {}
        }
    }
}
