use std::path::PathBuf;

use rand::Rng;
use tempfile::TempDir;

use super::Error;

pub fn draw_suffix() -> u32 {
    rand::thread_rng().gen_range(100..=10_000)
}

pub fn scratch_filename(n: u32) -> String {
    format!("demo_{}.csv", n)
}

/// Scratch CSV location. Owns its temp directory, so the file goes away when
/// the value drops, however the run ends.
#[derive(Debug)]
pub struct ScratchFile {
    dir: TempDir,
    filename: String,
}

impl ScratchFile {
    pub fn create(filename: &str) -> Result<ScratchFile, Error> {
        let dir = tempfile::tempdir()?;
        Ok(ScratchFile {
            dir,
            filename: filename.to_owned(),
        })
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join(&self.filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_stays_in_range() {
        for _ in 0..1000 {
            let n = draw_suffix();
            assert!(n >= 100 && n <= 10_000, "suffix {} out of range", n);
        }
    }

    #[test]
    fn filename_shape() {
        assert_eq!(scratch_filename(4242), "demo_4242.csv");
    }

    #[test]
    fn removes_file_on_drop() {
        let scratch = ScratchFile::create("demo_123.csv").unwrap();
        std::fs::write(scratch.path(), b"leg_count\n").unwrap();
        let path = scratch.path();
        assert!(path.exists());
        drop(scratch);
        assert!(!path.exists());
    }
}
