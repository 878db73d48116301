//! Parses a raw request with `httparse`, then interprets the interesting
//! header values through their typed codecs.
//!
//! Run with: `cargo run --example inspect`

use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;
use wirefield::typed;

const RAW: &[u8] = b"GET /report.pdf HTTP/1.1\r\n\
Host: files.example\r\n\
User-Agent: curl/8.5.0\r\n\
Accept-Encoding: gzip;q=1.0, identity;q=0.5\r\n\
If-None-Match: \"33a64df5\", W/\"0815\"\r\n\
Range: bytes=0-499, 19000-\r\n\r\n";

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let mut parsed_headers = [httparse::EMPTY_HEADER; 16];
    let mut request = httparse::Request::new(&mut parsed_headers);
    request.parse(RAW).expect("example request is well-formed");

    let mut headers = http::HeaderMap::new();
    for header in request.headers.iter() {
        let name: http::HeaderName = header.name.parse().expect("httparse verified the name");
        let value =
            http::HeaderValue::from_bytes(header.value).expect("httparse verified the value");
        headers.append(name, value);
    }

    match typed::RANGE.get(&headers) {
        Ok(Some(range)) => {
            info!(unit = %range.unit(), "range request");
            for span in range.spans() {
                match span.upper() {
                    Some(upper) => info!(lower = span.lower(), upper, "span"),
                    None => info!(lower = span.lower(), "open-ended span"),
                }
            }
        }
        Ok(None) => info!("no range requested"),
        Err(error) => warn!(%error, "bad Range header"),
    }

    match typed::IF_NONE_MATCH.get(&headers) {
        Ok(Some(tags)) => {
            for tag in &tags {
                info!(tag = %tag, weak = tag.is_weak(), "cached validator");
            }
        }
        Ok(None) => info!("unconditional request"),
        Err(error) => warn!(%error, "bad If-None-Match header"),
    }

    match typed::ACCEPT_ENCODING.get(&headers) {
        Ok(Some(encodings)) => {
            for encoding in &encodings {
                let q = encoding.qvalue().unwrap_or(None).unwrap_or(1.0);
                info!(encoding = encoding.value(), q, "acceptable encoding");
            }
        }
        Ok(None) => info!("any encoding accepted"),
        Err(error) => warn!(%error, "bad Accept-Encoding header"),
    }
}
