pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Per-request correlation tag for the presence transport.
pub fn new_nonce() -> String {
    new_id()
}
