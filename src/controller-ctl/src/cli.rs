use clap::{crate_version, App, AppSettings, Arg, SubCommand};

fn scope_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("SCOPE").required(true).help("scope name")
}

pub fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("controller-ctl")
        .version(crate_version!())
        .about("Controller REST client")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .takes_value(true)
                .help("YAML client configuration file"),
        )
        .arg(
            Arg::with_name("controller")
                .short("u")
                .long("controller")
                .takes_value(true)
                .help("controller REST URI"),
        )
        .arg(
            Arg::with_name("tls")
                .long("tls")
                .help("connect to the controller with TLS"),
        )
        .arg(
            Arg::with_name("truststore")
                .long("truststore")
                .takes_value(true)
                .help("PEM certificate bundle used to verify the controller"),
        )
        .arg(
            Arg::with_name("strict-truststore")
                .long("strict-truststore")
                .help("fail if the trust store cannot be loaded"),
        )
        .arg(
            Arg::with_name("auth")
                .long("auth")
                .help("use HTTP basic authentication"),
        )
        .arg(
            Arg::with_name("user")
                .long("user")
                .takes_value(true)
                .help("user name for basic authentication"),
        )
        .arg(
            Arg::with_name("password")
                .long("password")
                .takes_value(true)
                .help("password for basic authentication"),
        )
        .subcommand(SubCommand::with_name("list-scopes").about("List scopes"))
        .subcommand(
            SubCommand::with_name("describe-scope")
                .about("Describe a scope")
                .arg(scope_arg()),
        )
        .subcommand(
            SubCommand::with_name("list-streams")
                .about("List the streams of a scope")
                .arg(scope_arg()),
        )
        .subcommand(
            SubCommand::with_name("describe-stream")
                .about("Describe a stream")
                .arg(scope_arg())
                .arg(Arg::with_name("STREAM").required(true).help("stream name")),
        )
        .subcommand(
            SubCommand::with_name("list-readergroups")
                .about("List the reader groups of a scope")
                .arg(scope_arg()),
        )
        .subcommand(
            SubCommand::with_name("describe-readergroup")
                .about("Describe a reader group")
                .arg(scope_arg())
                .arg(
                    Arg::with_name("READERGROUP")
                        .required(true)
                        .help("reader group name"),
                ),
        )
        .subcommand(
            SubCommand::with_name("get")
                .about("GET any controller resource")
                .arg(
                    Arg::with_name("PATH")
                        .required(true)
                        .help("resource path, e.g. /v1/scopes"),
                ),
        )
}
