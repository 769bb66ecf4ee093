use std::env;

use super::mechanism::Mechanism;
use super::Error;

pub const BUCKET_VAR: &str = "TEST_BUCKET";
pub const FOLDER_VAR: &str = "TEST_FOLDER";

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub s3_bucket: String,
    pub s3_folder: String,
    /// Mechanisms whose upload failure does not fail the run.
    pub tolerated: Vec<Mechanism>,
}

impl ProbeConfig {
    // Resolved once at startup, before anything touches disk or the bucket.
    pub fn from_env(tolerated: Vec<Mechanism>) -> Result<ProbeConfig, Error> {
        ProbeConfig::resolve(|var| env::var(var).ok(), tolerated)
    }

    fn resolve<F>(lookup: F, tolerated: Vec<Mechanism>) -> Result<ProbeConfig, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let s3_bucket = required(&lookup, BUCKET_VAR)?;
        let s3_folder = required(&lookup, FOLDER_VAR)?;
        Ok(ProbeConfig {
            s3_bucket,
            s3_folder,
            tolerated,
        })
    }
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String, Error>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(ref v) if v.is_empty() => Err(Error::MissingVar(var)),
        Some(v) => Ok(v),
        None => Err(Error::MissingVar(var)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = pairs.iter().cloned().collect();
        move |var| map.get(var).map(|v| v.to_string())
    }

    #[test]
    fn resolves_bucket_and_folder() {
        let config = ProbeConfig::resolve(
            lookup_from(&[("TEST_BUCKET", "demo-bucket"), ("TEST_FOLDER", "probe")]),
            vec![],
        )
        .unwrap();
        assert_eq!(config.s3_bucket, "demo-bucket");
        assert_eq!(config.s3_folder, "probe");
    }

    #[test]
    fn missing_bucket_names_the_variable() {
        let err =
            ProbeConfig::resolve(lookup_from(&[("TEST_FOLDER", "probe")]), vec![]).unwrap_err();
        match err {
            Error::MissingVar(var) => assert_eq!(var, "TEST_BUCKET"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn empty_folder_counts_as_missing() {
        let err = ProbeConfig::resolve(
            lookup_from(&[("TEST_BUCKET", "demo-bucket"), ("TEST_FOLDER", "")]),
            vec![],
        )
        .unwrap_err();
        match err {
            Error::MissingVar(var) => assert_eq!(var, "TEST_FOLDER"),
            other => panic!("unexpected error: {}", other),
        }
    }
}
