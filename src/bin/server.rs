use tracing::Level;

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    #[cfg(debug_assertions)]
    let level = Some(Level::DEBUG);
    #[cfg(not(debug_assertions))]
    let level = Some(Level::INFO);

    let r = lessonlink_backend::create(level).await?;
    r.launch().await?;

    Ok(())
}
