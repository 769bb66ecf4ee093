use std::fmt;
use std::str::FromStr;

/// The three independent paths a run pushes the same CSV through. The name of
/// each doubles as its object key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mechanism {
    /// Bare single-shot PutObject through the S3 client.
    Boto3,
    /// The retrying uploader helper.
    S3Hook,
    /// The demo table serializing itself straight to the bucket.
    Pandas,
}

impl Mechanism {
    /// Upload order within a run.
    pub const ALL: [Mechanism; 3] = [Mechanism::Boto3, Mechanism::S3Hook, Mechanism::Pandas];

    pub fn prefix(self) -> &'static str {
        match self {
            Mechanism::Boto3 => "boto3",
            Mechanism::S3Hook => "s3hook",
            Mechanism::Pandas => "pandas",
        }
    }
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for Mechanism {
    type Err = String;

    fn from_str(s: &str) -> Result<Mechanism, String> {
        match s {
            "boto3" => Ok(Mechanism::Boto3),
            "s3hook" => Ok(Mechanism::S3Hook),
            "pandas" => Ok(Mechanism::Pandas),
            other => Err(format!("unknown mechanism: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_stable() {
        assert_eq!(Mechanism::Boto3.prefix(), "boto3");
        assert_eq!(Mechanism::S3Hook.prefix(), "s3hook");
        assert_eq!(Mechanism::Pandas.prefix(), "pandas");
    }

    #[test]
    fn upload_order_is_boto3_then_s3hook_then_pandas() {
        assert_eq!(
            Mechanism::ALL,
            [Mechanism::Boto3, Mechanism::S3Hook, Mechanism::Pandas]
        );
    }

    #[test]
    fn parses_prefix_names() {
        assert_eq!("s3hook".parse::<Mechanism>(), Ok(Mechanism::S3Hook));
        assert!("rsync".parse::<Mechanism>().is_err());
    }
}
