mod cli;
mod config;
mod routes;
mod server;

fn main() {
    env_logger::init();

    if let Err(e) = cli::run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
