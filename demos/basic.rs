use supabase_http::{user_message_for, ClientConfig, SupabaseClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env();
    let Some(db) = SupabaseClient::from_config(config) else {
        anyhow::bail!("set SUPABASE_URL and SUPABASE_ANON_KEY first");
    };

    if !db.check_connection("results").await {
        println!("connection check failed");
        return Ok(());
    }

    match db.get("results?select=count&limit=1").await {
        Ok(response) => {
            println!("status: {}", response.status());
            println!("body: {}", response.text().await?);
        }
        Err(err) => println!("{}", user_message_for(&err)),
    }

    Ok(())
}
