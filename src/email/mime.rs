//! Raw MIME assembly for SES
//!
//! SES raw sending expects a fully-formed message: a `multipart/mixed`
//! envelope holding a `multipart/alternative` (plaintext, then HTML) and
//! one base64 part per CSV attachment. Bodies are base64-encoded so the
//! rupee sign and other UTF-8 survive every hop.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use uuid::Uuid;

/// One CSV attachment, already rendered to text.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub content: String,
}

/// A fully-specified outgoing message.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
    pub attachments: Vec<Attachment>,
}

/// Base64 with the 76-column line wrapping MIME bodies expect.
fn encode_wrapped(data: &[u8]) -> String {
    let encoded = BASE64.encode(data);
    let mut wrapped = String::with_capacity(encoded.len() + encoded.len() / 76 * 2 + 2);
    for chunk in encoded.as_bytes().chunks(76) {
        wrapped.push_str(std::str::from_utf8(chunk).expect("base64 is ascii"));
        wrapped.push_str("\r\n");
    }
    wrapped
}

fn text_part(content_type: &str, body: &str) -> String {
    format!(
        "Content-Type: {content_type}; charset=UTF-8\r\n\
         Content-Transfer-Encoding: base64\r\n\r\n{}",
        encode_wrapped(body.as_bytes()),
    )
}

/// Assemble the raw RFC 5322 message bytes.
pub fn build_mime(email: &OutgoingEmail) -> String {
    let mixed_boundary = format!("=_mixed_{}", Uuid::new_v4().simple());
    let alt_boundary = format!("=_alt_{}", Uuid::new_v4().simple());

    let mut msg = String::new();
    msg.push_str(&format!("From: {}\r\n", email.from));
    msg.push_str(&format!("To: {}\r\n", email.to));
    msg.push_str(&format!("Subject: {}\r\n", email.subject));
    msg.push_str("MIME-Version: 1.0\r\n");
    msg.push_str(&format!(
        "Content-Type: multipart/mixed; boundary=\"{mixed_boundary}\"\r\n\r\n"
    ));

    // Alternative body: plaintext first, HTML preferred.
    msg.push_str(&format!("--{mixed_boundary}\r\n"));
    msg.push_str(&format!(
        "Content-Type: multipart/alternative; boundary=\"{alt_boundary}\"\r\n\r\n"
    ));
    msg.push_str(&format!("--{alt_boundary}\r\n"));
    msg.push_str(&text_part("text/plain", &email.text));
    msg.push_str(&format!("--{alt_boundary}\r\n"));
    msg.push_str(&text_part("text/html", &email.html));
    msg.push_str(&format!("--{alt_boundary}--\r\n"));

    for attachment in &email.attachments {
        msg.push_str(&format!("--{mixed_boundary}\r\n"));
        msg.push_str("Content-Type: application/octet-stream\r\n");
        msg.push_str("Content-Transfer-Encoding: base64\r\n");
        msg.push_str(&format!(
            "Content-Disposition: attachment; filename=\"{}\"\r\n\r\n",
            attachment.filename,
        ));
        msg.push_str(&encode_wrapped(attachment.content.as_bytes()));
    }

    msg.push_str(&format!("--{mixed_boundary}--\r\n"));
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_fixture() -> OutgoingEmail {
        OutgoingEmail {
            from: "reports@example.com".into(),
            to: "owner@example.com".into(),
            subject: "Daily Report - 15/03/2024 - MG Road".into(),
            html: "<html><body>₹800</body></html>".into(),
            text: "Total Revenue: ₹800".into(),
            attachments: vec![Attachment {
                filename: "daily_report_2024-03-15_mg-road.csv".into(),
                content: "A,B\n1,2".into(),
            }],
        }
    }

    #[test]
    fn test_headers_present() {
        let mime = build_mime(&email_fixture());
        assert!(mime.starts_with("From: reports@example.com\r\n"));
        assert!(mime.contains("To: owner@example.com\r\n"));
        assert!(mime.contains("Subject: Daily Report - 15/03/2024 - MG Road\r\n"));
        assert!(mime.contains("MIME-Version: 1.0\r\n"));
        assert!(mime.contains("Content-Type: multipart/mixed; boundary="));
    }

    #[test]
    fn test_alternative_body_puts_plaintext_before_html() {
        let mime = build_mime(&email_fixture());
        let text_pos = mime.find("Content-Type: text/plain").unwrap();
        let html_pos = mime.find("Content-Type: text/html").unwrap();
        assert!(text_pos < html_pos);
    }

    #[test]
    fn test_attachment_part() {
        let mime = build_mime(&email_fixture());
        assert!(mime.contains(
            "Content-Disposition: attachment; filename=\"daily_report_2024-03-15_mg-road.csv\""
        ));
        // Attachment body is its base64 encoding.
        assert!(mime.contains(&BASE64.encode("A,B\n1,2")));
    }

    #[test]
    fn test_message_is_ascii_after_encoding() {
        let mime = build_mime(&email_fixture());
        // Bodies carry the rupee sign; encoded form must be pure ASCII.
        assert!(mime.is_ascii());
    }

    #[test]
    fn test_no_attachments_still_closes_envelope() {
        let mut email = email_fixture();
        email.attachments.clear();
        let mime = build_mime(&email);
        assert!(mime.trim_end().ends_with("--"));
    }
}
