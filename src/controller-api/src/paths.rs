//! Relative paths are appended verbatim to the controller base URI, so each
//! one starts with `/`.

const API: &str = "/v1";

pub fn scopes() -> String {
    format!("{}/scopes", API)
}

pub fn scope(scope: &str) -> String {
    format!("{}/scopes/{}", API, scope)
}

pub fn streams(scope: &str) -> String {
    format!("{}/scopes/{}/streams", API, scope)
}

pub fn stream(scope: &str, stream: &str) -> String {
    format!("{}/scopes/{}/streams/{}", API, scope, stream)
}

pub fn reader_groups(scope: &str) -> String {
    format!("{}/scopes/{}/readergroups", API, scope)
}

pub fn reader_group(scope: &str, reader_group: &str) -> String {
    format!("{}/scopes/{}/readergroups/{}", API, scope, reader_group)
}
