//! Scaffolding for Modernization Studio definitions.
//!
//! A studio is a JSON document describing targets and the commands that run
//! against them. The scaffold carries the studio's identity and purpose and
//! leaves every target/command field blank for the author to fill in.

use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
pub struct StudioSchema {
    pub id: String,
    pub version: String,
    pub title: String,
    pub description: String,
    pub targets: Vec<Target>,
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Target {
    pub id: String,
    pub label: String,
    pub description: String,
    pub patterns: Vec<String>,
    pub commands: Vec<Command>,
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Command {
    pub id: String,
    pub version: String,
    pub label: String,
    pub protocol: Protocol,
    pub parameters: CommandParameters,
}

#[derive(Debug, Default, Serialize)]
pub struct Protocol {
    #[serde(rename = "type")]
    pub kind: String,
    pub mode: String,
    pub source: String,
    pub executable: String,
    pub command_template: String,
}

#[derive(Debug, Serialize)]
pub struct CommandParameters {
    pub config_auth: ParameterValue,
    pub output: ParameterValue,
}

#[derive(Debug, Serialize)]
pub struct ParameterValue {
    pub value: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_output: Option<bool>,
}

impl StudioSchema {
    /// The blank scaffold for a studio called `name`
    pub fn scaffold(name: &str, purpose: &str) -> Self {
        let command = Command {
            id: String::new(),
            version: String::new(),
            label: String::new(),
            protocol: Protocol::default(),
            parameters: CommandParameters {
                config_auth: ParameterValue {
                    value: "{auth}".to_string(),
                    required: true,
                    is_output: None,
                },
                output: ParameterValue {
                    value: "{output_dir}/docs/jobs/{selected_filename}/index.md".to_string(),
                    required: true,
                    is_output: Some(true),
                },
            },
        };

        Self {
            id: name.to_string(),
            version: "1.0.0".to_string(),
            title: name.to_string(),
            description: purpose.to_string(),
            targets: vec![Target {
                id: String::new(),
                label: String::new(),
                description: String::new(),
                patterns: Vec::new(),
                commands: vec![command],
                tags: vec![String::new()],
            }],
            tags: vec![String::new()],
        }
    }
}

/// Writes the scaffold to `{directory}/{name}.json`, creating the directory if needed
pub async fn write_studio(name: &str, purpose: &str, directory: &Path) -> anyhow::Result<PathBuf> {
    let schema = StudioSchema::scaffold(name, purpose);
    let json = serde_json::to_string_pretty(&schema)?;

    tokio::fs::create_dir_all(directory).await?;
    let path = directory.join(format!("{}.json", name));
    tokio::fs::write(&path, json).await?;

    Ok(path)
}

/// Runs the scaffolding and reports the outcome as user-facing text
pub async fn create_studio(name: &str, purpose: &str, directory: &str) -> String {
    match write_studio(name, purpose, Path::new(directory)).await {
        Ok(path) => {
            tracing::info!("Studio schema written to {}", path.display());
            format!("Studio schema created at {}", path.display())
        }
        Err(e) => {
            tracing::warn!("Failed to create studio '{}': {}", name, e);
            format!("Error creating studio schema: {}", e)
        }
    }
}
