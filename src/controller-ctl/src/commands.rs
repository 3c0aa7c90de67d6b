//! Controller commands run by `controller-ctl`

use controller_api::{paths, ResponseOutcome};
use controller_client::{ControllerRest, Output, RestError};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ListScopes,
    DescribeScope(String),
    ListStreams(String),
    DescribeStream(String, String),
    ListReaderGroups(String),
    DescribeReaderGroup(String, String),
    Get(String),
}

fn value(matches: &clap::ArgMatches, name: &str) -> Option<String> {
    matches.value_of(name).map(|s| s.to_string())
}

impl Command {
    pub fn from_matches(matches: &clap::ArgMatches) -> Option<Self> {
        match matches.subcommand() {
            ("list-scopes", _) => Some(Command::ListScopes),
            ("describe-scope", Some(m)) => Some(Command::DescribeScope(value(m, "SCOPE")?)),
            ("list-streams", Some(m)) => Some(Command::ListStreams(value(m, "SCOPE")?)),
            ("describe-stream", Some(m)) => Some(Command::DescribeStream(
                value(m, "SCOPE")?,
                value(m, "STREAM")?,
            )),
            ("list-readergroups", Some(m)) => Some(Command::ListReaderGroups(value(m, "SCOPE")?)),
            ("describe-readergroup", Some(m)) => Some(Command::DescribeReaderGroup(
                value(m, "SCOPE")?,
                value(m, "READERGROUP")?,
            )),
            ("get", Some(m)) => Some(Command::Get(value(m, "PATH")?)),
            _ => None,
        }
    }
    /// Resource path relative to the controller REST URI
    pub fn path(&self) -> String {
        match self {
            Command::ListScopes => paths::scopes(),
            Command::DescribeScope(scope) => paths::scope(scope),
            Command::ListStreams(scope) => paths::streams(scope),
            Command::DescribeStream(scope, stream) => paths::stream(scope, stream),
            Command::ListReaderGroups(scope) => paths::reader_groups(scope),
            Command::DescribeReaderGroup(scope, reader_group) => {
                paths::reader_group(scope, reader_group)
            }
            Command::Get(path) if path.starts_with('/') => path.clone(),
            Command::Get(path) => format!("/{}", path),
        }
    }
    // (list field, name field) of list responses
    fn list_keys(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Command::ListScopes => Some(("scopes", "scopeName")),
            Command::ListStreams(_) => Some(("streams", "streamName")),
            Command::ListReaderGroups(_) => Some(("readerGroups", "readerGroupName")),
            _ => None,
        }
    }
}

fn names(body: &str, list: &str, name: &str) -> Option<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get(list)?
        .as_array()?
        .iter()
        .map(|item| item.get(name).and_then(|s| s.as_str()).map(|s| s.to_string()))
        .collect()
}

/// Pretty print JSON bodies, anything else as is
pub fn render(body: &str) -> String {
    if body.trim().is_empty() {
        "<none>".to_string()
    } else if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| body.to_string())
    } else {
        body.trim_end().to_string()
    }
}

/// Run `command` and print its result
pub async fn run<R: ControllerRest>(
    rest: &R,
    command: &Command,
    out: &dyn Output,
) -> Result<ResponseOutcome, RestError> {
    let res = rest.execute(&command.path()).await?;
    match command.list_keys() {
        Some((list, name)) if res.outcome.is_success() => {
            match names(&res.body, list, name) {
                Some(names) if names.is_empty() => out.output("<none>"),
                Some(names) => names.iter().for_each(|name| out.output(name)),
                None => out.output(&render(&res.body)),
            }
        }
        _ => out.output(&render(&res.body)),
    }
    Ok(res.outcome)
}
