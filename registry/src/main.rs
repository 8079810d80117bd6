#[tokio::main]
async fn main() {
    if let Err(err) = registry::runner::run().await {
        eprintln!("Fatal: {err}");
        std::process::exit(1);
    }
}
