use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use regex::Regex;

pub const TEST_DATA_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata");

pub struct TestCasePaths {
    pub config: PathBuf,
    pub trace: PathBuf,
    pub output: PathBuf,
}

/// Finds every sample case under `testdata`. Each `outputs/output-<trace>-<config>.json` names the
/// trace and config it was produced from
pub fn get_configs() -> Result<Vec<TestCasePaths>, Box<dyn Error>> {
    get_configs_in(Path::new(TEST_DATA_PATH))
}

pub fn get_configs_in(root: &Path) -> Result<Vec<TestCasePaths>, Box<dyn Error>> {
    let mut out = Vec::new();
    let output_file_directory = fs::read_dir(root.join("outputs"))?;
    let output_pattern = Regex::new(r"^output-(?P<trace>[0-9a-zA-Z_]+)-(?P<config>[0-9a-zA-Z_]+)\.json$")?;
    let mut file_names = Vec::new();
    for entry in output_file_directory {
        let file_name = entry?
            .file_name()
            .into_string()
            .map_err(|e| format!("Can't convert OS string ({e:?}) to standard string"))?;
        if output_pattern.is_match(&file_name) {
            file_names.push(file_name);
        }
    }
    file_names.sort();
    for file_name in file_names {
        // Get components of name
        let tokens = output_pattern.captures(&file_name).ok_or("Couldn't parse the file name".to_string())?;
        let trace_name = tokens
            .name("trace")
            .ok_or("Couldn't get the trace file from the output file name".to_string())?
            .as_str();
        let config_name = tokens
            .name("config")
            .ok_or("Couldn't get the config file from the output file name".to_string())?
            .as_str();
        out.push(TestCasePaths {
            config: root.join("configs").join(format!("{config_name}.json")),
            trace: root.join("traces").join(format!("{trace_name}.trace")),
            output: root.join("outputs").join(&file_name),
        })
    }
    Ok(out)
}
