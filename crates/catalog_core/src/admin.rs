//! Admin access gate.
//!
//! The catalog service never consults this gate; callers that expose
//! mutations (the CLI) ask it for an authorization decision first.

/// Decides whether a presented credential grants admin capability.
pub trait AdminGate {
    fn authorize(&self, candidate: &str) -> bool;
}

/// Gate comparing the candidate against one static shared secret.
///
/// An empty configured secret authorizes nobody.
pub struct SharedSecretGate {
    secret: String,
}

impl SharedSecretGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl AdminGate for SharedSecretGate {
    fn authorize(&self, candidate: &str) -> bool {
        if self.secret.is_empty() || candidate.len() != self.secret.len() {
            return false;
        }
        // Compare every byte so mismatches take the same time wherever they occur.
        self.secret
            .bytes()
            .zip(candidate.bytes())
            .fold(0u8, |acc, (left, right)| acc | (left ^ right))
            == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{AdminGate, SharedSecretGate};

    #[test]
    fn matching_secret_is_authorized() {
        let gate = SharedSecretGate::new("admin123");
        assert!(gate.authorize("admin123"));
        assert!(!gate.authorize("admin12"));
        assert!(!gate.authorize("Admin123"));
    }

    #[test]
    fn empty_secret_authorizes_nobody() {
        let gate = SharedSecretGate::new("");
        assert!(!gate.authorize(""));
    }
}
