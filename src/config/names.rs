use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum NamesError {
    #[error("Invalid names: {0}")]
    InvalidNames(String),
}

/// Parses a comma-separated list of message names, e.g. `cpu_temp,gpu_temp`.
pub fn parse_names(list: &str) -> Result<Vec<String>, NamesError> {
    let mut names: Vec<String> = Vec::new();

    for part in list.split(',') {
        let name = part.trim();
        if name.is_empty() {
            return Err(NamesError::InvalidNames(format!("Empty name in '{}'", list)));
        }

        if names.iter().any(|n| n == name) {
            return Err(NamesError::InvalidNames(format!(
                "Name '{}' is listed multiple times",
                name
            )));
        }

        names.push(name.to_owned());
    }

    Ok(names)
}
