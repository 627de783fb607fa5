use std::process;

#[tokio::main]
async fn main() {
    match spotifyrs::cli::run().await {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}
