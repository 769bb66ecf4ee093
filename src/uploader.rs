use std::path::Path;

use futures::compat::*;
use rusoto_s3::{PutObjectRequest, S3Client, S3};
use tokio::fs;

use super::utils::with_retry;
use super::Error;

/// Upload helper sitting above the bare client: reads the file, fills in the
/// request metadata and retries transient failures before giving up.
pub struct Uploader {
    s3_client: S3Client,
}

impl Uploader {
    pub fn new(s3_client: S3Client) -> Self {
        Self { s3_client }
    }

    pub async fn load_file(
        &self,
        path: &Path,
        bucket: &str,
        key: &str,
        acl: Option<&str>,
    ) -> Result<(), Error> {
        let body = fs::read(path).await?;
        with_retry(10, 1, 5, || {
            let put_object_request = PutObjectRequest {
                bucket: bucket.to_owned(),
                key: key.to_owned(),
                body: Some(body.clone().into()),
                content_length: Some(body.len() as i64),
                content_type: Some("text/csv".to_owned()),
                acl: acl.map(ToOwned::to_owned),
                ..Default::default()
            };
            self.s3_client.put_object(put_object_request).compat()
        })
        .await?;
        Ok(())
    }
}
