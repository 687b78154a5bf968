use base64::{Engine as _};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

const SCHEMA_VERSION: &str = "1";

/// Tutorial family a time token was issued for. This gateway serves
/// `FinancialServices`; tokens for other tutorials must not validate here.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tutorial {
    PersonalFinance,
    FinancialServices,
    Markets,
    Economics
}

/// What a time token says: which task was started, and when.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TimeTokenPayload {
    pub tutorial: Tutorial,
    pub unit: i32,
    pub task: i32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start: DateTime<Utc>
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("token is not three dot-separated parts")]
    Malformed,
    #[error("unsupported token schema version {0}")]
    SchemaVersion(String),
    #[error("base64 decoding failed")]
    Base64Decoding(#[from] base64::DecodeError),
    #[error("hex decoding failed")]
    HexDecoding(#[from] hex::FromHexError),
    #[error("payload parsing failed")]
    PayloadParsing(#[from] serde_json::Error),
    #[error("signature verification failed")]
    Verify(#[from] digest::MacError)
}

fn get_mac(secret: &[u8]) -> Hmac::<Sha256> {
    Hmac::<Sha256>::new_from_slice(secret)
        .expect("HMAC can take key of any size")
}

/// Reversible mapping between a [`TimeTokenPayload`] and the opaque string
/// carried in request bodies: `1.<base64 payload>.<hex HMAC-SHA256>`.
///
/// Issuance is done elsewhere; [`TokenCodec::encode`] exists to pin down the
/// contract the decoder inverts. The HMAC is computed over the base64 payload
/// and verified before anything is decoded, so a tampered token fails as
/// [`DecodeError::Verify`] rather than as garbage payload.
#[derive(Clone)]
pub struct TokenCodec {
    secret: Vec<u8>
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> TokenCodec {
        TokenCodec {
            secret: secret.to_vec()
        }
    }

    pub fn encode(&self, payload: &TimeTokenPayload) -> String {
        let json = serde_json::to_vec(payload)
            .expect("payload serialization cannot fail");
        let b64 = base64::engine::general_purpose::STANDARD.encode(json);

        let mut mac = get_mac(&self.secret);
        mac.update(b64.as_bytes());
        let sig = hex::encode(mac.finalize().into_bytes());

        format!("{SCHEMA_VERSION}.{b64}.{sig}")
    }

    pub fn decode(&self, token: &str) -> Result<TimeTokenPayload, DecodeError> {
        let mut parts = token.split('.');
        let (version, b64, sig) = match (
            parts.next(), parts.next(), parts.next(), parts.next()
        ) {
            (Some(v), Some(b), Some(s), None) => (v, b, s),
            _ => return Err(DecodeError::Malformed)
        };

        if version != SCHEMA_VERSION {
            return Err(DecodeError::SchemaVersion(version.into()));
        }

        // check integrity before looking inside
        let mut mac = get_mac(&self.secret);
        mac.update(b64.as_bytes());
        mac.verify_slice(&hex::decode(sig)?)?;

        let json = base64::engine::general_purpose::STANDARD.decode(b64)?;

        Ok(serde_json::from_slice(&json)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SECRET: &[u8] = b"a/rA1Y&(iOqBN1M-FCq@";

    fn payload() -> TimeTokenPayload {
        TimeTokenPayload {
            tutorial: Tutorial::FinancialServices,
            unit: 2,
            task: 3,
            start: DateTime::from_timestamp_millis(1693870400000).unwrap()
        }
    }

    #[test]
    fn round_trip() {
        let codec = TokenCodec::new(SECRET);
        let p = payload();
        assert_eq!(codec.decode(&codec.encode(&p)).unwrap(), p);
    }

    #[test]
    fn decode_empty() {
        let codec = TokenCodec::new(SECRET);
        assert!(matches!(
            codec.decode("").unwrap_err(),
            DecodeError::Malformed
        ));
    }

    #[test]
    fn decode_garbage() {
        let codec = TokenCodec::new(SECRET);
        assert!(matches!(
            codec.decode("total garbage").unwrap_err(),
            DecodeError::Malformed
        ));
    }

    #[test]
    fn decode_too_many_parts() {
        let codec = TokenCodec::new(SECRET);
        let token = TokenCodec::new(SECRET).encode(&payload()) + ".extra";
        assert!(matches!(
            codec.decode(&token).unwrap_err(),
            DecodeError::Malformed
        ));
    }

    #[test]
    fn decode_wrong_version() {
        let codec = TokenCodec::new(SECRET);
        let token = codec.encode(&payload());
        let token = format!("2{}", &token[1..]);
        assert!(matches!(
            codec.decode(&token).unwrap_err(),
            DecodeError::SchemaVersion(v) if v == "2"
        ));
    }

    #[test]
    fn decode_tampered_payload() {
        let codec = TokenCodec::new(SECRET);
        let token = codec.encode(&payload());

        // flip a character inside the base64 payload
        let i = token.find('.').unwrap() + 1;
        let mut bytes = token.into_bytes();
        bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
        let token = String::from_utf8(bytes).unwrap();

        assert!(matches!(
            codec.decode(&token).unwrap_err(),
            DecodeError::Verify(_)
        ));
    }

    #[test]
    fn decode_truncated_signature() {
        let codec = TokenCodec::new(SECRET);
        let token = codec.encode(&payload());
        let token = &token[..token.len() - 2];
        assert!(matches!(
            codec.decode(token).unwrap_err(),
            DecodeError::Verify(_)
        ));
    }

    #[test]
    fn decode_signature_not_hex() {
        let codec = TokenCodec::new(SECRET);
        let token = codec.encode(&payload());
        let token = format!("{}zz", &token[..token.len() - 2]);
        assert!(matches!(
            codec.decode(&token).unwrap_err(),
            DecodeError::HexDecoding(_)
        ));
    }

    #[test]
    fn decode_wrong_secret() {
        let token = TokenCodec::new(SECRET).encode(&payload());
        assert!(matches!(
            TokenCodec::new(b"other").decode(&token).unwrap_err(),
            DecodeError::Verify(_)
        ));
    }

    #[test]
    fn start_is_millisecond_precision() {
        let codec = TokenCodec::new(SECRET);
        let p = payload();
        let decoded = codec.decode(&codec.encode(&p)).unwrap();
        assert_eq!(decoded.start.timestamp_millis(), 1693870400000);
    }
}
