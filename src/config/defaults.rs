pub(super) const MAX_RETRY_ATTEMPTS: usize = 10;
pub(super) const MIN_RESPONSE_BYTES: usize = 64 * 1024;

pub(super) fn clamp_retry_attempts(value: usize) -> usize {
    value.clamp(1, MAX_RETRY_ATTEMPTS)
}

pub(super) fn default_production_origin() -> String {
    "http://localhost".to_string()
}

pub(super) fn default_development_base_url() -> String {
    "http://localhost:8001".to_string()
}

pub(super) fn default_connect_timeout_secs() -> u64 {
    10
}

pub(super) fn default_read_timeout_secs() -> u64 {
    // Training runs synchronously on the backend.
    600
}

pub(super) fn default_write_timeout_secs() -> u64 {
    30
}

pub(super) fn default_list_retry_attempts() -> usize {
    1
}

pub(super) fn default_retry_base_delay_ms() -> u64 {
    250
}

pub(super) fn default_retry_max_delay_ms() -> u64 {
    2_000
}

pub(super) fn default_max_response_bytes() -> usize {
    16 * 1024 * 1024
}

pub(super) fn default_login_username() -> String {
    "Admin".to_string()
}

pub(super) fn default_login_password() -> String {
    "Admin".to_string()
}
