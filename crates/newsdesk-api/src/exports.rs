//! CSV exports.

use std::fmt;
use std::str::FromStr;

use newsdesk_core::prelude::*;

use crate::client::ApiClient;
use crate::download::Download;

/// Which table to export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    Roles,
    Users,
    Articles,
    Logs,
}

impl ExportKind {
    pub const ALL: [ExportKind; 4] = [
        ExportKind::Roles,
        ExportKind::Users,
        ExportKind::Articles,
        ExportKind::Logs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportKind::Roles => "roles",
            ExportKind::Users => "users",
            ExportKind::Articles => "articles",
            ExportKind::Logs => "logs",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ExportKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::config(format!("unknown export kind '{s}'")))
    }
}

impl ApiClient {
    /// Download a CSV export. `default_name` is used when the server does
    /// not name the file.
    pub async fn export_csv(&self, kind: ExportKind, default_name: &str) -> Result<Download> {
        info!("Exporting {}", kind);
        self.download(&format!("exports/{kind}"), default_name).await
    }
}
