use std::process::ExitCode;

use fetch_adapter::{fetch, new_http_transport};

const DEMO_URL: &str = "https://jsonplaceholder.typicode.com/posts/1";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .init();

    let transport = new_http_transport();
    match fetch(&transport, DEMO_URL) {
        Ok(body) => {
            println!("Response: {}", body);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
