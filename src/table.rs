use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use futures::compat::*;
use rusoto_s3::{PutObjectRequest, S3Client, S3};

use super::Error;

pub const COLUMNS: [&str; 3] = ["leg_count", "wing_count", "specimens_seen"];

#[derive(Debug, Clone)]
pub struct DemoRow {
    pub label: &'static str,
    pub leg_count: u32,
    pub wing_count: u32,
    pub specimens_seen: u32,
}

/// The fixed dataset every run generates and uploads. Labels key the rows in
/// memory but are never serialized.
#[derive(Debug, Clone)]
pub struct DemoTable {
    rows: Vec<DemoRow>,
}

impl DemoTable {
    pub fn demo() -> DemoTable {
        let rows = vec![
            DemoRow {
                label: "falcon",
                leg_count: 2,
                wing_count: 2,
                specimens_seen: 10,
            },
            DemoRow {
                label: "dog",
                leg_count: 4,
                wing_count: 0,
                specimens_seen: 2,
            },
            DemoRow {
                label: "spider",
                leg_count: 8,
                wing_count: 0,
                specimens_seen: 1,
            },
            DemoRow {
                label: "fish",
                leg_count: 0,
                wing_count: 0,
                specimens_seen: 8,
            },
        ];
        DemoTable { rows }
    }

    pub fn rows(&self) -> &[DemoRow] {
        &self.rows
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.rows.iter().map(|row| row.label).collect()
    }

    // Every mechanism serializes through here, so the uploaded objects stay
    // byte-identical.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&COLUMNS)?;
        for row in &self.rows {
            csv_writer.write_record(&[
                row.leg_count.to_string(),
                row.wing_count.to_string(),
                row.specimens_seen.to_string(),
            ])?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn to_csv_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(buf)
    }

    pub fn write_csv_file(&self, path: &Path) -> Result<(), Error> {
        let file = File::create(path)?;
        self.write_csv(BufWriter::new(file))
    }

    /// Serializes straight to the bucket without touching the scratch file.
    pub async fn put_csv(&self, s3_client: &S3Client, bucket: &str, key: &str) -> Result<(), Error> {
        let body = self.to_csv_bytes()?;
        let put_object_request = PutObjectRequest {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
            body: Some(body.into()),
            ..Default::default()
        };
        s3_client.put_object(put_object_request).compat().await?;
        Ok(())
    }
}
