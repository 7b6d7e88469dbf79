use std::fmt::Display;
use std::io;
use std::process::ExitCode;

use utilities::config::{self, EndpointConfig};

mod apis;
mod fim;
mod requester;
mod utilities;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let logging = utilities::logchamp::init().map_err(|err| eprintln!("logging disabled: {err}"));
    dotenvy::dotenv().ok();

    let endpoint = match EndpointConfig::local() {
        Ok(endpoint) => endpoint,
        Err(err) => {
            return fail(logging.is_ok(), format!("invalid base URL {}: {err}", config::BASE_URL));
        }
    };

    let http_client = match config::http_client() {
        Ok(http_client) => http_client,
        Err(err) => {
            return fail(logging.is_ok(), format!("cannot build the HTTP client: {err}"));
        }
    };

    if let Err(err) = requester::run(http_client, &endpoint, &mut io::stdout().lock()).await {
        return fail(logging.is_ok(), err);
    }

    log::logger().flush();
    ExitCode::SUCCESS
}

fn fail(logging: bool, err: impl Display) -> ExitCode {
    if logging {
        log::error!("{err}");
        log::logger().flush();
    } else {
        eprintln!("{err}");
    }

    ExitCode::FAILURE
}
