use bson::doc;
use mongodb::{
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client,
};
use std::sync::Arc;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the shared MongoDB client used by every handler. The startup ping
/// is advisory: a cluster that is slow to wake must not keep the API from
/// binding, so a failed ping is logged and the client handed out anyway.
pub async fn create_mongo_client(uri: &str) -> Result<Arc<Client>, mongodb::error::Error> {
    println!("Connecting to MongoDB...");

    let mut options = ClientOptions::parse(uri).await?;
    options.connect_timeout = Some(CONNECT_TIMEOUT);
    options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
    options.max_pool_size = Some(10);
    options.min_pool_size = Some(1);
    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());

    let client = Client::with_options(options)?;

    match client
        .database("Bookings")
        .run_command(doc! {"ping": 1})
        .await
    {
        Ok(_) => println!("MongoDB connection verified with ping"),
        Err(e) => eprintln!("MongoDB ping failed at startup: {}", e),
    }

    Ok(Arc::new(client))
}
