//! CLI commands

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use reqwest::Method;
use sentiscope_core::proxy::rewrite_with;
use sentiscope_frontend::Shell;
use sentiscope_http::RequestConfig;
use sentiscope_http::types::Upload;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// List the route table
    Routes,

    /// Navigate to a path and report where the guard lets you land
    Navigate {
        /// Target path, e.g. /manager/overview
        path: String,
    },

    /// Log in and store the session credential
    Login {
        username: String,
        /// Password hash as expected by the backend
        password_hash: String,
    },

    /// Create an account
    Register {
        username: String,
        password_hash: String,
    },

    /// Forget the stored credential
    Logout,

    /// Show the profile of the logged-in user
    Whoami,

    /// Send an arbitrary request through the gateway
    Request {
        /// HTTP method
        method: String,
        /// Path relative to the backend origin
        path: String,
        /// JSON body
        #[arg(long)]
        json: Option<String>,
    },

    /// Upload a spreadsheet for cleaning
    Clean {
        /// CSV or Excel file
        file: PathBuf,
        /// Project to create
        #[arg(long)]
        project: String,
        /// Cleaning step to apply (repeatable)
        #[arg(long = "option")]
        options: Vec<String>,
    },

    /// Show where the dev server would forward a path
    Proxy {
        path: String,
    },
}

impl Commands {
    pub async fn execute(&self, shell: &Shell) -> Result<()> {
        match self {
            Commands::Routes => {
                for path in shell.router().routes().paths() {
                    println!("{path}");
                }
                println!("*  -> /login");
            }
            Commands::Navigate { path } => match shell.navigate(path)? {
                Some(nav) if nav.was_redirected() => {
                    println!("{} -> {}", nav.requested, nav.resolved);
                }
                Some(nav) => println!("{}", nav.resolved),
                None => println!("already at {path}"),
            },
            Commands::Login {
                username,
                password_hash,
            } => {
                let envelope = shell.gateway().login(username, password_hash).await?;
                if !envelope.is_success() {
                    bail!(
                        "login failed ({}): {}",
                        envelope.code,
                        envelope.msg.unwrap_or_default()
                    );
                }
                println!("logged in as {username}");
            }
            Commands::Register {
                username,
                password_hash,
            } => {
                let envelope = shell.gateway().register(username, password_hash).await?;
                envelope.into_result()?;
                println!("registered {username}");
            }
            Commands::Logout => {
                shell.gateway().logout()?;
                println!("logged out");
            }
            Commands::Whoami => {
                let Some(uuid) = shell.session().uuid() else {
                    bail!("not logged in");
                };
                let info = shell.gateway().user_info(&uuid).await?.into_data()?;
                println!("{}", serde_json::to_string_pretty(&info)?);
            }
            Commands::Request { method, path, json } => {
                let method = Method::from_bytes(method.to_uppercase().as_bytes())
                    .with_context(|| format!("invalid HTTP method {method}"))?;
                let mut request = RequestConfig::new(method, path.as_str());
                if let Some(body) = json {
                    let body: Value = serde_json::from_str(body).context("--json is not valid JSON")?;
                    request = request.json(&body)?;
                }
                let value = shell.gateway().send(request).await?;
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
            Commands::Clean {
                file,
                project,
                options,
            } => {
                let bytes = std::fs::read(file)
                    .with_context(|| format!("failed to read {}", file.display()))?;
                let file_name = file
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "upload".to_string());
                let report = shell
                    .gateway()
                    .upload_for_cleaning(Upload::new(file_name, bytes), project, options)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            Commands::Proxy { path } => {
                let rules = &shell.config().dev_server.proxy;
                match rewrite_with(rules, path) {
                    Some(url) => println!("{path} -> {url}"),
                    None => println!(
                        "{path} is served by the dev server on port {}",
                        shell.config().dev_server.port
                    ),
                }
            }
        }
        Ok(())
    }
}
