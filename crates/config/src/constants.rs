//! Centralized constants for the envlayer workspace.
//!
//! This module contains the markers and default names shared by the
//! tokenizer, the load orchestrator and the CLI.

// =============================================================================
// Syntax Markers
// =============================================================================

/// Opens and closes a multi-line block value.
pub const TRIPLE_QUOTE: &str = "\"\"\"";

/// Wraps a single-line quoted value.
pub const DOUBLE_QUOTE: char = '"';

/// Starts a comment line (outside multi-line blocks only).
pub const COMMENT_PREFIX: char = '#';

// =============================================================================
// Profile Defaults
// =============================================================================

/// Default prefix used to derive profile file paths (`.env.<profile>`).
pub const DEFAULT_PROFILE_PREFIX: &str = ".env";

/// Default name of the variable holding the comma-separated profile list.
pub const DEFAULT_PROFILE_VAR: &str = "PROFILES";

/// Separator between profile names in the selector variable.
pub const PROFILE_SEPARATOR: char = ',';

/// Default separator for `list` schema fields.
pub const DEFAULT_LIST_SEPARATOR: &str = ",";
