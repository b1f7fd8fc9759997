#[actix_web::main]
async fn main() -> std::io::Result<()> {
    cenarista::app::run().await
}
