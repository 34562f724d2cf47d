//! Response envelope generation
//!
//! Every response body is wrapped in the same envelope declaring the
//! `SOAP-ENV`, `tds`, `trt` and `tptz` prefixes, so any body fragment the
//! builders produce is namespace-complete.

use std::borrow::Cow;

use super::{NS_DEVICE, NS_MEDIA, NS_PTZ, NS_SOAP_ENV};

/// Escape text for insertion into element content or attribute values
pub fn escape(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// Wrap a body fragment in a SOAP envelope
pub fn wrap(body: &str) -> String {
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<SOAP-ENV:Envelope xmlns:SOAP-ENV=\"{soap}\" ",
            "xmlns:tds=\"{tds}\" ",
            "xmlns:trt=\"{trt}\" ",
            "xmlns:tptz=\"{tptz}\">\n",
            "<SOAP-ENV:Body>\n",
            "{body}\n",
            "</SOAP-ENV:Body>\n",
            "</SOAP-ENV:Envelope>"
        ),
        soap = NS_SOAP_ENV,
        tds = NS_DEVICE,
        trt = NS_MEDIA,
        tptz = NS_PTZ,
        body = body,
    )
}

/// SOAP 1.2 fault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    /// Fault code value, e.g. `SOAP-ENV:Receiver`
    pub code: String,
    /// Human readable reason
    pub reason: String,
}

impl Fault {
    /// Create a fault with an arbitrary code
    pub fn new(code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            reason: reason.into(),
        }
    }

    /// Receiver-side fault
    pub fn receiver(reason: impl Into<String>) -> Self {
        Self::new("SOAP-ENV:Receiver", reason)
    }

    /// Fault returned for any request no builder answers
    pub fn not_implemented() -> Self {
        Self::receiver("Method not implemented")
    }

    /// Render the fault body fragment
    pub fn to_body(&self) -> String {
        format!(
            concat!(
                "<SOAP-ENV:Fault>\n",
                "<SOAP-ENV:Code>\n",
                "<SOAP-ENV:Value>{code}</SOAP-ENV:Value>\n",
                "</SOAP-ENV:Code>\n",
                "<SOAP-ENV:Reason>\n",
                "<SOAP-ENV:Text xml:lang=\"en\">{reason}</SOAP-ENV:Text>\n",
                "</SOAP-ENV:Reason>\n",
                "</SOAP-ENV:Fault>"
            ),
            code = escape(&self.code),
            reason = escape(&self.reason),
        )
    }

    /// Render the complete fault envelope
    pub fn to_envelope(&self) -> String {
        wrap(&self.to_body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_declares_namespaces() {
        let envelope = wrap("<tds:Foo/>");

        assert!(envelope.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(envelope.contains(&format!("xmlns:SOAP-ENV=\"{}\"", NS_SOAP_ENV)));
        assert!(envelope.contains(&format!("xmlns:tds=\"{}\"", NS_DEVICE)));
        assert!(envelope.contains(&format!("xmlns:trt=\"{}\"", NS_MEDIA)));
        assert!(envelope.contains(&format!("xmlns:tptz=\"{}\"", NS_PTZ)));
        assert!(envelope.contains("<SOAP-ENV:Body>\n<tds:Foo/>\n</SOAP-ENV:Body>"));
        assert!(envelope.ends_with("</SOAP-ENV:Envelope>"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("A&B <x>"), "A&amp;B &lt;x&gt;");
        assert_eq!(escape("\"q\""), "&quot;q&quot;");
    }

    #[test]
    fn test_not_implemented_fault() {
        let body = Fault::not_implemented().to_body();

        assert!(body.contains("<SOAP-ENV:Value>SOAP-ENV:Receiver</SOAP-ENV:Value>"));
        assert!(body.contains(">Method not implemented</SOAP-ENV:Text>"));
    }

    #[test]
    fn test_fault_reason_escaped() {
        let body = Fault::receiver("bad <input> & more").to_body();

        assert!(body.contains("bad &lt;input&gt; &amp; more"));
    }
}
