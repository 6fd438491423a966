#[tokio::main]
async fn main() {
    travel_backend::run().await;
}
