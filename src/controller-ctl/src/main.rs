use controller_api::{ClientConfiguration, ResponseOutcome, TCP_PORT};
use controller_client::{
    base_uri, build_client, parse_controller_url, ControllerRest, Output, Stdout,
};
use std::rc::Rc;

mod cli;
mod commands;

type Error = Box<dyn std::error::Error + Send + Sync>;

#[actix_rt::main]
async fn main() -> Result<(), Error> {
    let matches = cli::app().get_matches();

    // enable logging
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "controller_client=warn,controller_ctl=info");
    }
    std::env::set_var("RUST_BACKTRACE", "0");
    env_logger::init();

    let config = configuration(&matches)?;
    let command = commands::Command::from_matches(&matches).ok_or("missing command")?;

    let outcome = run_command(&config, &command, Rc::new(Stdout)).await?;
    // the status line has already been reported
    if !outcome.is_success() {
        std::process::exit(1)
    }
    Ok(())
}

/// Run one command with its own client context, released on every path
async fn run_command(
    config: &ClientConfiguration,
    command: &commands::Command,
    output: Rc<dyn Output>,
) -> Result<ResponseOutcome, Error> {
    let mut context = build_client(config, output.clone())?;
    if config.tls_enabled && !context.trust_loaded() {
        log::warn!("controller certificate is checked against the system trust roots")
    }
    let result = commands::run(&context, command, output.as_ref()).await;
    context.close();
    Ok(result?)
}

/// Defaults, then the configuration file, then command line flags
fn configuration(matches: &clap::ArgMatches) -> Result<ClientConfiguration, Error> {
    let mut config = match matches.value_of("config") {
        Some(file) => ClientConfiguration::from_path(file)?,
        None => ClientConfiguration::default(),
    };
    if let Some(controller) = matches.value_of("controller") {
        config.controller_rest_uri = controller.to_string()
    }
    if matches.is_present("tls") {
        config.tls_enabled = true
    }
    if let Some(truststore) = matches.value_of("truststore") {
        config.truststore = Some(truststore.into())
    }
    if matches.is_present("strict-truststore") {
        config.strict_truststore = true
    }
    if matches.is_present("auth") {
        config.auth_enabled = true
    }
    if let Some(user) = matches.value_of("user") {
        config.user_name = Some(user.to_string())
    }
    if let Some(password) = matches.value_of("password") {
        config.password = Some(password.to_string())
    }
    let url = parse_controller_url(&config.controller_rest_uri, config.tls_enabled, TCP_PORT)?;
    config.controller_rest_uri = base_uri(&url);
    config.validate()?;
    log::debug!("{:?}", config);
    Ok(config)
}
