pub struct Db {
    db_uri: String,
    db_name: String,
}

impl Db {
    pub fn new(uri: String, name: String) -> Self {
        Db {
            db_uri: uri,
            db_name: name,
        }
    }
    pub async fn client(self) -> anyhow::Result<mongodb::Database> {
        let conf = mongodb::options::ClientOptions::parse(self.db_uri).await?;
        let client = mongodb::Client::with_options(conf)?;
        Ok(client.database(&self.db_name))
    }
}
