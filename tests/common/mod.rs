#![allow(dead_code)]

pub mod command;
pub mod file;

/// Object ID of the blob holding exactly `hello`
pub const HELLO_BLOB_OID: &str = "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0";

/// Short commit ID printed by `commit`, e.g. `abc1234` from `[(root-commit) abc1234] msg`
pub fn short_oid_from_commit_output(stdout: &[u8]) -> String {
    let stdout = String::from_utf8_lossy(stdout);
    let inside = stdout
        .trim()
        .trim_start_matches('[')
        .split(']')
        .next()
        .unwrap_or_default()
        .to_string();

    inside
        .rsplit(' ')
        .next()
        .unwrap_or_default()
        .to_string()
}
