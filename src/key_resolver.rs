use super::mechanism::Mechanism;

pub fn object_key(folder: &str, mechanism: Mechanism, filename: &str) -> String {
    format!("{}/{}_{}", folder, mechanism.prefix(), filename)
}
