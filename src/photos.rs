//! Photo store: one encoded image string per date-key, kept apart from the
//! record blob so large payloads never ride along with every record write.

use crate::date::parse_date_key;
use std::{
    env, io,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};
use tokio::{fs, io::AsyncWriteExt, sync::OnceCell};
use tracing::info;

const DB_NAME: &str = "lifeLogPhotos";
const STORE_NAME: &str = "photos";

pub fn resolve_photo_dir() -> PathBuf {
    if let Ok(path) = env::var("APP_PHOTO_DIR") {
        return PathBuf::from(path);
    }

    PathBuf::from("data")
}

#[derive(Debug)]
pub struct PhotoStore {
    root: PathBuf,
    opened: OnceCell<PathBuf>,
}

impl PhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            opened: OnceCell::new(),
        }
    }

    pub async fn save_photo(&self, key: &str, encoded: &str) -> io::Result<()> {
        let dir = self.open().await?;
        let path = entry_path(dir, key)?;
        let tmp = dir.join(temp_name(key));

        let mut file = fs::File::create(&tmp).await?;
        file.write_all(encoded.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&tmp, &path).await
    }

    /// Empty string when nothing is stored for `key`.
    pub async fn get_photo(&self, key: &str) -> io::Result<String> {
        let dir = self.open().await?;
        let path = entry_path(dir, key)?;

        match fs::read_to_string(&path).await {
            Ok(photo) => Ok(photo),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(err) => Err(err),
        }
    }

    pub async fn delete_photo(&self, key: &str) -> io::Result<()> {
        let dir = self.open().await?;
        let path = entry_path(dir, key)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }

    async fn open(&self) -> io::Result<&Path> {
        let dir = self
            .opened
            .get_or_try_init(|| async {
                let dir = self.root.join(DB_NAME).join(STORE_NAME);
                fs::create_dir_all(&dir).await?;
                info!("photo store opened at {}", dir.display());
                Ok::<_, io::Error>(dir)
            })
            .await?;
        Ok(dir.as_path())
    }
}

// Unique per write, so saves racing on one key never share a temp file.
fn temp_name(key: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    format!("{key}.{nanos}.{:08x}.tmp", rand::random::<u32>())
}

fn entry_path(dir: &Path, key: &str) -> io::Result<PathBuf> {
    if parse_date_key(key).is_none() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid date key: {key:?}"),
        ));
    }
    Ok(dir.join(format!("{key}.txt")))
}
