use std::path::Path;

use futures::compat::*;
use rusoto_s3::{PutObjectRequest, S3Client, S3};
use tokio::fs;
use tracing::{error, info};

use super::config::ProbeConfig;
use super::key_resolver;
use super::mechanism::Mechanism;
use super::scratch::{self, ScratchFile};
use super::table::DemoTable;
use super::uploader::Uploader;
use super::Error;

const OWNER_FULL_CONTROL: &str = "bucket-owner-full-control";

#[derive(Debug)]
pub struct MechanismOutcome {
    pub mechanism: Mechanism,
    pub result: Result<(), Error>,
}

#[derive(Debug)]
pub struct RunReport {
    pub filename: String,
    pub outcomes: Vec<MechanismOutcome>,
}

impl RunReport {
    pub fn failures(&self) -> impl Iterator<Item = &MechanismOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    /// Failures outside the tolerated set; any of these fails the run.
    pub fn fatal_failures(&self, tolerated: &[Mechanism]) -> Vec<&MechanismOutcome> {
        self.failures()
            .filter(|o| !tolerated.contains(&o.mechanism))
            .collect()
    }

    pub fn passed(&self, tolerated: &[Mechanism]) -> bool {
        self.fatal_failures(tolerated).is_empty()
    }
}

pub struct ProbeExecutor {
    s3_client: S3Client,
}

impl ProbeExecutor {
    pub fn new(s3_client: S3Client) -> Self {
        Self { s3_client }
    }

    /// One probe run: write the demo CSV to scratch, then push it through
    /// every mechanism in order, recording each outcome. A mechanism failure
    /// never stops the remaining mechanisms; only scratch-file trouble aborts.
    pub async fn execute(&self, config: &ProbeConfig) -> Result<RunReport, Error> {
        let filename = scratch::scratch_filename(scratch::draw_suffix());
        let table = DemoTable::demo();
        info!(
            "generated demo table: {} rows ({})",
            table.rows().len(),
            table.labels().join(", ")
        );

        let scratch = ScratchFile::create(&filename)?;
        table.write_csv_file(&scratch.path())?;
        info!(
            "local_file_path: {}, bucket_name: {}, folder_name: {}",
            scratch.path().display(),
            config.s3_bucket,
            config.s3_folder
        );

        let mut outcomes = Vec::with_capacity(Mechanism::ALL.len());
        for &mechanism in Mechanism::ALL.iter() {
            let key = key_resolver::object_key(&config.s3_folder, mechanism, &filename);
            info!(
                "uploading CSV to s3://{}/{} via {}",
                config.s3_bucket, key, mechanism
            );
            let result = self
                .upload(mechanism, &table, &scratch.path(), &config.s3_bucket, &key)
                .await;
            match result {
                Ok(()) => info!("done uploading CSV via {}", mechanism),
                Err(ref e) => error!("uploading CSV via {} failed: {}", mechanism, e),
            }
            outcomes.push(MechanismOutcome { mechanism, result });
        }

        // scratch drops here, removing the temp dir and the CSV with it
        Ok(RunReport { filename, outcomes })
    }

    async fn upload(
        &self,
        mechanism: Mechanism,
        table: &DemoTable,
        path: &Path,
        bucket: &str,
        key: &str,
    ) -> Result<(), Error> {
        match mechanism {
            Mechanism::Boto3 => self.put_file(path, bucket, key).await,
            Mechanism::S3Hook => {
                Uploader::new(self.s3_client.clone())
                    .load_file(path, bucket, key, Some(OWNER_FULL_CONTROL))
                    .await
            }
            Mechanism::Pandas => table.put_csv(&self.s3_client, bucket, key).await,
        }
    }

    // Bare single-shot PutObject, no retry.
    async fn put_file(&self, path: &Path, bucket: &str, key: &str) -> Result<(), Error> {
        let body = fs::read(path).await?;
        let put_object_request = PutObjectRequest {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
            body: Some(body.into()),
            acl: Some(OWNER_FULL_CONTROL.to_owned()),
            ..Default::default()
        };
        self.s3_client.put_object(put_object_request).compat().await?;
        Ok(())
    }
}
