//! Program request/response types.

use livecode_storage::Pid;
use serde::{Deserialize, Serialize};

/// Query string for the project picker.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgramListQuery {
    /// Substring to search for; absent or empty lists everything.
    #[serde(default)]
    pub q: Option<String>,
}

/// Response for listing or searching programs.
#[derive(Debug, Clone, Serialize)]
pub struct ProgramListResponse {
    /// Matching identifiers, sorted.
    pub programs: Vec<Pid>,
}

/// Response from saving a program.
#[derive(Debug, Clone, Serialize)]
pub struct SaveProgramResponse {
    /// Always "OK" on success.
    pub status: &'static str,
    /// The program that was written.
    pub id: Pid,
}
