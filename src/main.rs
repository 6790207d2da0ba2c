use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    court_booking_client::run().await
}
