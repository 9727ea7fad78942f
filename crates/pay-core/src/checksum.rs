//! # Request Checksums
//!
//! Nuvei authenticates merchant requests with a SHA-256 digest over an
//! ordered list of fields, the merchant secret key always last. Fields are
//! joined with no separator, so `["ab", "c"]` and `["a", "bc"]` hash alike;
//! the field order per operation is fixed by the gateway protocol.

use sha2::{Digest, Sha256};

/// Hash `fields` in order and return the lowercase hex digest.
pub fn sign<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut hasher = Sha256::new();
    for field in fields {
        hasher.update(field.as_ref().as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// An ordered field sequence together with its checksum.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedRequest {
    fields: Vec<String>,
    signature: String,
}

impl SignedRequest {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        let signature = sign(&fields);
        Self { fields, signature }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn into_signature(self) -> String {
        self.signature
    }
}

// The last field is the secret key; keep it out of logs.
impl std::fmt::Debug for SignedRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible = self.fields.len().saturating_sub(1);
        f.debug_struct("SignedRequest")
            .field("fields", &&self.fields[..visible])
            .field("signature", &self.signature)
            .finish()
    }
}
